use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use tracing::{error, info};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    events::{UiError, UiErrorContext, UiEvent},
    orchestration::{dispatch_backend_command, dispatch_backend_commands},
    reducer::{EmpresasScreen, UiAction},
};
use crate::ui::{dialogs, table};

#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub api_base_url: String,
    /// Absolute URL the user is sent to when no tenant can be resolved.
    pub login_url: String,
    pub rows_per_page: u32,
}

pub enum AppViewState {
    ResolvingTenant,
    Empresas(Box<EmpresasScreen>),
    Redirect { destination: String, reason: UiError },
}

pub struct EmpresasApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    config: StartupConfig,
    view_state: AppViewState,
    status: String,
}

impl EmpresasApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        config: StartupConfig,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            config,
            view_state: AppViewState::ResolvingTenant,
            status: "Resolvendo tenant...".to_string(),
        }
    }

    pub fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            let cmds = self.apply_event(event);
            dispatch_backend_commands(&self.cmd_tx, cmds, &mut self.status);
        }
    }

    fn apply_event(&mut self, event: UiEvent) -> Vec<BackendCommand> {
        match event {
            UiEvent::Info(message) => {
                self.status = message;
                Vec::new()
            }
            UiEvent::TenantResolved(tenant) => {
                info!(tenant = %tenant, "tenant resolved");
                let mut screen = EmpresasScreen::new(tenant, self.config.rows_per_page);
                let cmds = screen.initial_load();
                self.view_state = AppViewState::Empresas(Box::new(screen));
                self.status.clear();
                cmds
            }
            UiEvent::TenantRejected(reason) => {
                error!(
                    category = ?reason.category(),
                    destination = %self.config.login_url,
                    "tenant resolution failed: {}",
                    reason.message()
                );
                self.view_state = AppViewState::Redirect {
                    destination: self.config.login_url.clone(),
                    reason,
                };
                Vec::new()
            }
            UiEvent::Error(err) if err.context() == UiErrorContext::BackendStartup => {
                error!("backend startup failed: {}", err.message());
                self.status = err.message().to_string();
                Vec::new()
            }
            other => match &mut self.view_state {
                AppViewState::Empresas(screen) => screen.apply(other),
                _ => Vec::new(),
            },
        }
    }

    fn run_actions(&mut self, actions: Vec<UiAction>) {
        let AppViewState::Empresas(screen) = &mut self.view_state else {
            return;
        };
        for action in actions {
            let cmds = screen.handle(action);
            dispatch_backend_commands(&self.cmd_tx, cmds, &mut self.status);
        }
    }

    fn retry_tenant(&mut self) {
        self.view_state = AppViewState::ResolvingTenant;
        self.status = "Resolvendo tenant...".to_string();
        dispatch_backend_command(&self.cmd_tx, BackendCommand::ResolveTenant, &mut self.status);
    }

    fn show_resolving(&self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.centered_and_justified(|ui| {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(self.status.as_str());
                });
            });
        });
    }

    fn show_redirect(&mut self, ctx: &egui::Context) {
        let AppViewState::Redirect {
            destination,
            reason,
        } = &self.view_state
        else {
            return;
        };
        let destination = destination.clone();
        let (heading, hint) = if reason.requires_reauth() {
            ("Sessão sem empresa vinculada", "Faça login novamente para continuar.")
        } else {
            ("Não foi possível identificar a empresa", "Tente novamente ou faça login.")
        };
        let detail = reason.message().to_string();
        let mut retry = false;
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(80.0);
                ui.heading(heading);
                ui.label(hint);
                ui.weak(detail.as_str());
                ui.add_space(12.0);
                if ui.button("Ir para o login").clicked() {
                    ctx.open_url(egui::OpenUrl::new_tab(&destination));
                }
                ui.weak(destination.as_str());
                ui.add_space(12.0);
                if ui.button("Tentar novamente").clicked() {
                    retry = true;
                }
            });
        });
        if retry {
            self.retry_tenant();
        }
    }

    fn show_empresas(&mut self, ctx: &egui::Context) {
        let mut actions = Vec::new();
        let status = self.status.clone();
        let api_base_url = self.config.api_base_url.clone();
        let AppViewState::Empresas(screen) = &mut self.view_state else {
            return;
        };
        let tenant = screen.tenant().to_string();

        egui::TopBottomPanel::top("empresas_header").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.heading("Cadastro de Empresas");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let mut search = screen.page.search_input().to_string();
                    let response = ui
                        .add(
                            egui::TextEdit::singleline(&mut search)
                                .hint_text("Procurar Empresa...")
                                .desired_width(260.0),
                        )
                        .on_hover_text("Digite o nome da Empresa e tecle Enter");
                    if response.changed() {
                        actions.push(UiAction::SearchInputChanged(search));
                    }
                    if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                        actions.push(UiAction::SearchCommitted);
                    }
                    ui.label("🔍");
                });
            });
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                if ui.button("➕ Criar").clicked() {
                    actions.push(UiAction::OpenCreate);
                }
            });
            ui.add_space(6.0);
        });

        egui::TopBottomPanel::bottom("empresas_status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.weak(api_base_url.as_str());
                ui.separator();
                ui.weak(format!("tenant {tenant}"));
                if !status.is_empty() {
                    ui.separator();
                    ui.label(status.as_str());
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            table::show_table(ui, &screen.page, &mut actions);
            ui.separator();
            table::show_paginator(ui, &screen.page, &mut actions);
        });

        dialogs::show_editor(
            ctx,
            &screen.editor,
            dialogs::Lookups {
                municipios: screen.municipios(),
                rotinas: screen.rotinas(),
                rotina_scope: screen.rotina_scope(),
            },
            &mut actions,
        );
        dialogs::show_toasts(ctx, &mut screen.notifications, &mut actions);

        self.run_actions(actions);
    }
}

impl eframe::App for EmpresasApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        match self.view_state {
            AppViewState::ResolvingTenant => self.show_resolving(ctx),
            AppViewState::Empresas(_) => self.show_empresas(ctx),
            AppViewState::Redirect { .. } => self.show_redirect(ctx),
        }

        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}

#[cfg(test)]
#[path = "tests/app_tests.rs"]
mod tests;
