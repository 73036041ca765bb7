use std::{sync::Mutex, time::Duration};

use async_trait::async_trait;
use client_core::{GatewayError, GatewayResult, TenantError};
use crossbeam_channel::bounded;
use shared::{
    domain::{Empresa, EmpresaId, Municipio, Rotina, TenantId},
    error::{ApiError, ErrorCode},
    protocol::{EmpresaPage, LazyTableState},
};

use super::*;
use crate::controller::events::UiErrorCategory;

#[derive(Default)]
struct FakeBackoffice {
    calls: Mutex<Vec<String>>,
    fail_writes: bool,
    tenant: Option<&'static str>,
}

impl FakeBackoffice {
    fn record(&self, call: impl Into<String>) {
        self.calls.lock().expect("calls lock").push(call.into());
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }

    fn write_result(&self) -> GatewayResult<()> {
        if self.fail_writes {
            Err(GatewayError::Status {
                status: 500,
                error: ApiError::new(ErrorCode::Internal, "boom"),
            })
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl EmpresaGateway for FakeBackoffice {
    async fn list(&self, query: &LazyTableState) -> GatewayResult<EmpresaPage> {
        self.record(format!("list:{}:{}", query.first, query.name_filter()));
        Ok(EmpresaPage {
            empresas: vec![Empresa {
                id: EmpresaId::new("e1"),
                nome: "Acme".into(),
                ..Empresa::default()
            }],
            total_records: 41,
        })
    }

    async fn create(&self, empresa: &Empresa) -> GatewayResult<EmpresaPage> {
        self.record(format!("create:{}", empresa.nome));
        self.write_result().map(|_| EmpresaPage::default())
    }

    async fn update(&self, empresa: &Empresa) -> GatewayResult<()> {
        self.record(format!("update:{}", empresa.id));
        self.write_result()
    }

    async fn delete(&self, empresa: &Empresa) -> GatewayResult<()> {
        self.record(format!("delete:{}", empresa.id));
        self.write_result()
    }
}

#[async_trait]
impl MunicipioGateway for FakeBackoffice {
    async fn list_municipios(&self) -> GatewayResult<Vec<Municipio>> {
        self.record("municipios");
        Ok(vec![Municipio::new("1", "City")])
    }
}

#[async_trait]
impl RotinaGateway for FakeBackoffice {
    async fn list_rotinas(&self, municipio: &Municipio) -> GatewayResult<Vec<Rotina>> {
        self.record(format!("rotinas:{}", municipio.id));
        Ok(vec![Rotina::new("2", "R1")])
    }
}

#[async_trait]
impl TenantResolver for FakeBackoffice {
    async fn resolve_tenant(&self) -> Result<TenantId, TenantError> {
        self.record("tenant");
        self.tenant
            .map(TenantId::new)
            .ok_or(TenantError::Unauthenticated)
    }
}

fn gateways(fake: Arc<FakeBackoffice>) -> Gateways {
    Gateways {
        empresas: fake.clone(),
        municipios: fake.clone(),
        rotinas: fake.clone(),
        tenant: fake,
    }
}

#[tokio::test]
async fn list_events_carry_the_request_generation() {
    let fake = Arc::new(FakeBackoffice::default());
    let mut query = LazyTableState::new(TenantId::new("t-1"), 20);
    query.first = 20;

    let event = execute(
        &gateways(fake.clone()),
        BackendCommand::LoadEmpresas {
            generation: 7,
            query,
        },
    )
    .await;

    let UiEvent::EmpresasLoaded { generation, page } = event else {
        panic!("unexpected event {event:?}");
    };
    assert_eq!(generation, 7);
    assert_eq!(page.total_records, 41);
    assert_eq!(fake.calls(), vec!["list:20:".to_string()]);
}

#[tokio::test]
async fn lookups_map_to_loaded_events() {
    let fake = Arc::new(FakeBackoffice::default());
    let gateways = gateways(fake.clone());

    let municipios = execute(&gateways, BackendCommand::LoadMunicipios).await;
    assert_eq!(
        municipios,
        UiEvent::MunicipiosLoaded(vec![Municipio::new("1", "City")])
    );

    let rotinas = execute(
        &gateways,
        BackendCommand::LoadRotinas {
            generation: 3,
            municipio: Municipio::new("1", "City"),
        },
    )
    .await;
    assert_eq!(
        rotinas,
        UiEvent::RotinasLoaded {
            generation: 3,
            rotinas: vec![Rotina::new("2", "R1")],
        }
    );
    assert_eq!(fake.calls(), vec!["municipios", "rotinas:1"]);
}

#[tokio::test]
async fn write_failures_become_save_and_delete_errors() {
    let fake = Arc::new(FakeBackoffice {
        fail_writes: true,
        ..FakeBackoffice::default()
    });
    let gateways = gateways(fake.clone());
    let empresa = Empresa {
        id: EmpresaId::new("e9"),
        nome: "Beta".into(),
        ..Empresa::default()
    };

    let saved = execute(
        &gateways,
        BackendCommand::UpdateEmpresa {
            request: 4,
            empresa: empresa.clone(),
        },
    )
    .await;
    let UiEvent::EmpresaSaved {
        request: 4,
        mode: SaveMode::Update,
        result: Err(error),
    } = saved
    else {
        panic!("unexpected event {saved:?}");
    };
    assert_eq!(error.context(), UiErrorContext::SaveEmpresa);
    assert_eq!(error.category(), UiErrorCategory::Server);

    let deleted = execute(
        &gateways,
        BackendCommand::DeleteEmpresa {
            request: 5,
            empresa,
        },
    )
    .await;
    assert!(matches!(
        deleted,
        UiEvent::EmpresaDeleted {
            request: 5,
            result: Err(ref error),
        } if error.context() == UiErrorContext::DeleteEmpresa
    ));
    assert_eq!(fake.calls(), vec!["update:e9", "delete:e9"]);
}

#[tokio::test]
async fn successful_create_ignores_returned_page() {
    let fake = Arc::new(FakeBackoffice::default());
    let event = execute(
        &gateways(fake),
        BackendCommand::CreateEmpresa {
            request: 1,
            empresa: Empresa {
                nome: "Acme".into(),
                ..Empresa::default()
            },
        },
    )
    .await;
    assert_eq!(
        event,
        UiEvent::EmpresaSaved {
            request: 1,
            mode: SaveMode::Create,
            result: Ok(()),
        }
    );
}

#[tokio::test]
async fn rejected_tenant_is_an_auth_error() {
    let fake = Arc::new(FakeBackoffice::default());
    let event = execute(&gateways(fake), BackendCommand::ResolveTenant).await;
    let UiEvent::TenantRejected(error) = event else {
        panic!("unexpected event {event:?}");
    };
    assert!(error.requires_reauth());
    assert_eq!(error.context(), UiErrorContext::Tenant);
}

#[test]
fn worker_answers_queued_commands_until_queue_closes() {
    let fake = Arc::new(FakeBackoffice {
        tenant: Some("t-1"),
        ..FakeBackoffice::default()
    });
    let (cmd_tx, cmd_rx) = bounded(8);
    let (ui_tx, ui_rx) = bounded(8);
    let worker = launch(cmd_rx, ui_tx, gateways(fake));

    assert!(matches!(
        ui_rx.recv_timeout(Duration::from_secs(5)),
        Ok(UiEvent::Info(_))
    ));
    cmd_tx.send(BackendCommand::ResolveTenant).expect("queue");
    assert_eq!(
        ui_rx.recv_timeout(Duration::from_secs(5)),
        Ok(UiEvent::TenantResolved(TenantId::new("t-1")))
    );

    drop(cmd_tx);
    worker.join().expect("worker exits");
}
