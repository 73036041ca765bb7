//! Runtime bridge between UI command queue and backend event intake.
//!
//! The worker thread owns a tokio runtime. Each queued command runs as its own
//! task, so slow calls never hold up the ones behind them; the UI sorts out
//! ordering through the generation tags carried by list and routine events.

use std::{sync::Arc, thread};

use client_core::{
    BackofficeClient, EmpresaGateway, MunicipioGateway, RotinaGateway, TenantResolver,
};
use crossbeam_channel::{Receiver, Sender, TrySendError};
use tracing::{error, info, warn};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{SaveMode, UiError, UiErrorContext, UiEvent};

/// Gateway handles shared by every backend task.
#[derive(Clone)]
pub struct Gateways {
    pub empresas: Arc<dyn EmpresaGateway>,
    pub municipios: Arc<dyn MunicipioGateway>,
    pub rotinas: Arc<dyn RotinaGateway>,
    pub tenant: Arc<dyn TenantResolver>,
}

impl Gateways {
    pub fn from_client(client: BackofficeClient) -> Self {
        let client = Arc::new(client);
        Self {
            empresas: client.clone(),
            municipios: client.clone(),
            rotinas: client.clone(),
            tenant: client,
        }
    }
}

pub fn launch(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    gateways: Gateways,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                error!("failed to build backend runtime: {err}");
                return;
            }
        };
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));

        while let Ok(cmd) = cmd_rx.recv() {
            info!(command = cmd.name(), "backend: handling command");
            let gateways = gateways.clone();
            let ui_tx = ui_tx.clone();
            runtime.spawn(async move {
                let event = execute(&gateways, cmd).await;
                deliver(&ui_tx, event);
            });
        }

        info!("backend: command queue closed, shutting down worker");
        runtime.shutdown_background();
    })
}

fn deliver(ui_tx: &Sender<UiEvent>, event: UiEvent) {
    match ui_tx.try_send(event) {
        Ok(()) => {}
        Err(TrySendError::Full(event)) => {
            warn!(?event, "backend: ui event queue full, dropping event");
        }
        Err(TrySendError::Disconnected(_)) => {}
    }
}

/// Runs one command against the gateways and maps the outcome to the event the
/// UI expects.
pub async fn execute(gateways: &Gateways, cmd: BackendCommand) -> UiEvent {
    match cmd {
        BackendCommand::ResolveTenant => match gateways.tenant.resolve_tenant().await {
            Ok(tenant) => UiEvent::TenantResolved(tenant),
            Err(err) => UiEvent::TenantRejected(UiError::from_tenant(&err)),
        },
        BackendCommand::LoadEmpresas { generation, query } => {
            match gateways.empresas.list(&query).await {
                Ok(page) => UiEvent::EmpresasLoaded { generation, page },
                Err(err) => UiEvent::EmpresasFailed {
                    generation,
                    error: UiError::from_gateway(UiErrorContext::ListEmpresas, &err),
                },
            }
        }
        BackendCommand::LoadMunicipios => match gateways.municipios.list_municipios().await {
            Ok(municipios) => UiEvent::MunicipiosLoaded(municipios),
            Err(err) => {
                UiEvent::MunicipiosFailed(UiError::from_gateway(UiErrorContext::Lookups, &err))
            }
        },
        BackendCommand::LoadRotinas {
            generation,
            municipio,
        } => match gateways.rotinas.list_rotinas(&municipio).await {
            Ok(rotinas) => UiEvent::RotinasLoaded {
                generation,
                rotinas,
            },
            Err(err) => UiEvent::RotinasFailed {
                generation,
                error: UiError::from_gateway(UiErrorContext::Lookups, &err),
            },
        },
        BackendCommand::CreateEmpresa { request, empresa } => {
            // The returned page is ignored; the UI reloads its own window.
            let result = gateways
                .empresas
                .create(&empresa)
                .await
                .map(|_| ())
                .map_err(|err| UiError::from_gateway(UiErrorContext::SaveEmpresa, &err));
            UiEvent::EmpresaSaved {
                request,
                mode: SaveMode::Create,
                result,
            }
        }
        BackendCommand::UpdateEmpresa { request, empresa } => {
            let result = gateways
                .empresas
                .update(&empresa)
                .await
                .map_err(|err| UiError::from_gateway(UiErrorContext::SaveEmpresa, &err));
            UiEvent::EmpresaSaved {
                request,
                mode: SaveMode::Update,
                result,
            }
        }
        BackendCommand::DeleteEmpresa { request, empresa } => {
            let result = gateways
                .empresas
                .delete(&empresa)
                .await
                .map_err(|err| UiError::from_gateway(UiErrorContext::DeleteEmpresa, &err));
            if result.is_ok() {
                info!(empresa_id = %empresa.id, "backend: empresa deleted");
            }
            UiEvent::EmpresaDeleted { request, result }
        }
    }
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
