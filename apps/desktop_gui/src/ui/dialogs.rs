//! Modal windows for editing and deleting an Empresa, and the toast overlay.

use std::time::Instant;

use eframe::egui;
use shared::domain::{EmpresaField, Municipio, Rotina};

use crate::controller::{
    editor::{DraftForm, EditorDialog, PendingDelete, ValidationIssue},
    notifications::{Notifications, Severity},
    reducer::UiAction,
};

pub struct Lookups<'a> {
    pub municipios: &'a [Municipio],
    pub rotinas: &'a [Rotina],
    /// Municipality the routine list was last loaded for.
    pub rotina_scope: &'a Municipio,
}

pub fn show_editor(
    ctx: &egui::Context,
    editor: &EditorDialog,
    lookups: Lookups<'_>,
    actions: &mut Vec<UiAction>,
) {
    if let Some(form) = editor.form() {
        show_form(ctx, form, lookups, actions);
    } else if let Some(pending) = editor.pending_delete() {
        show_delete(ctx, pending, actions);
    }
}

fn show_form(
    ctx: &egui::Context,
    form: &DraftForm,
    lookups: Lookups<'_>,
    actions: &mut Vec<UiAction>,
) {
    let Lookups {
        municipios,
        rotinas,
        rotina_scope,
    } = lookups;
    let issues = form.issues();
    let mut open = true;
    egui::Window::new("Detalhe da Empresa")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .default_width(550.0)
        .show(ctx, |ui| {
            ui.add_enabled_ui(!form.saving(), |ui| {
                egui::Grid::new("empresa_form")
                    .num_columns(2)
                    .spacing([12.0, 6.0])
                    .show(ui, |ui| {
                        for field in EmpresaField::ALL {
                            ui.label(field.label());
                            let mut value = form.draft.field(field).to_string();
                            let response = ui.add(
                                egui::TextEdit::singleline(&mut value).desired_width(320.0),
                            );
                            if response.changed() {
                                actions.push(UiAction::EditField { field, value });
                            }
                            ui.end_row();
                            if field == EmpresaField::Nome {
                                inline_issue(ui, &issues, ValidationIssue::MissingNome);
                            }
                        }

                        ui.label("Município");
                        let selected = if form.draft.municipio.is_selected() {
                            form.draft.municipio.nome.clone()
                        } else {
                            "Selecione um Município".to_string()
                        };
                        egui::ComboBox::from_id_salt("empresa_municipio")
                            .selected_text(selected)
                            .width(320.0)
                            .show_ui(ui, |ui| {
                                if municipios.is_empty() {
                                    ui.weak("Nenhum Município encontrado");
                                }
                                let mut chosen = form.draft.municipio.id.clone();
                                for municipio in municipios {
                                    ui.selectable_value(
                                        &mut chosen,
                                        municipio.id.clone(),
                                        municipio.nome.as_str(),
                                    );
                                }
                                if chosen != form.draft.municipio.id {
                                    if let Some(municipio) =
                                        municipios.iter().find(|m| m.id == chosen)
                                    {
                                        actions.push(UiAction::SelectMunicipio(municipio.clone()));
                                    }
                                }
                            });
                        ui.end_row();
                        inline_issue(ui, &issues, ValidationIssue::MissingMunicipio);

                        ui.label("Rotina");
                        let selected = if form.draft.rotina.is_selected() {
                            form.draft.rotina.descricao.clone()
                        } else {
                            "Selecione uma Rotina".to_string()
                        };
                        let scope_hint = if rotina_scope.is_selected() {
                            format!("Rotinas de {}", rotina_scope.nome)
                        } else {
                            "Todas as rotinas".to_string()
                        };
                        egui::ComboBox::from_id_salt("empresa_rotina")
                            .selected_text(selected)
                            .width(320.0)
                            .show_ui(ui, |ui| {
                                if rotinas.is_empty() {
                                    ui.weak("Nenhuma Rotina encontrada");
                                }
                                let mut chosen = form.draft.rotina.id.clone();
                                for rotina in rotinas {
                                    ui.selectable_value(
                                        &mut chosen,
                                        rotina.id.clone(),
                                        rotina.descricao.as_str(),
                                    );
                                }
                                if chosen != form.draft.rotina.id {
                                    if let Some(rotina) = rotinas.iter().find(|r| r.id == chosen) {
                                        actions.push(UiAction::SelectRotina(rotina.clone()));
                                    }
                                }
                            })
                            .response
                            .on_hover_text(scope_hint);
                        ui.end_row();
                        inline_issue(ui, &issues, ValidationIssue::MissingRotina);
                    });
            });

            ui.separator();
            ui.horizontal(|ui| {
                if ui.button("Cancelar").clicked() {
                    actions.push(UiAction::CancelDialog);
                }
                if ui
                    .add_enabled(!form.saving(), egui::Button::new("Salvar"))
                    .clicked()
                {
                    actions.push(UiAction::Save);
                }
                if form.saving() {
                    ui.spinner();
                }
            });
        });
    if !open {
        actions.push(UiAction::CancelDialog);
    }
}

fn inline_issue(ui: &mut egui::Ui, issues: &[ValidationIssue], issue: ValidationIssue) {
    if issues.contains(&issue) {
        ui.label("");
        ui.colored_label(ui.visuals().error_fg_color, issue.inline());
        ui.end_row();
    }
}

fn show_delete(ctx: &egui::Context, pending: &PendingDelete, actions: &mut Vec<UiAction>) {
    let mut open = true;
    egui::Window::new("Confirma a exclusão ?")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .default_width(450.0)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("⚠");
                ui.label("Tem certeza que quer deletar");
                ui.strong(pending.record.nome.as_str());
                ui.label("?");
            });
            ui.separator();
            ui.horizontal(|ui| {
                if ui.button("Não").clicked() {
                    actions.push(UiAction::CancelDialog);
                }
                if ui
                    .add_enabled(!pending.deleting(), egui::Button::new("Sim"))
                    .clicked()
                {
                    actions.push(UiAction::ConfirmDelete);
                }
            });
        });
    if !open {
        actions.push(UiAction::CancelDialog);
    }
}

/// Draws live toasts in the top-right corner and drops expired ones.
pub fn show_toasts(
    ctx: &egui::Context,
    notifications: &mut Notifications,
    actions: &mut Vec<UiAction>,
) {
    if notifications.prune(Instant::now()) == 0 {
        return;
    }
    egui::Area::new(egui::Id::new("empresas_toasts"))
        .anchor(egui::Align2::RIGHT_TOP, [-12.0, 12.0])
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            for toast in notifications.active() {
                let color = match toast.severity {
                    Severity::Success => egui::Color32::from_rgb(46, 125, 50),
                    Severity::Warn => egui::Color32::from_rgb(204, 138, 0),
                    Severity::Error => egui::Color32::from_rgb(198, 40, 40),
                };
                egui::Frame::popup(ui.style())
                    .stroke(egui::Stroke::new(1.5, color))
                    .show(ui, |ui| {
                        ui.set_max_width(320.0);
                        ui.horizontal(|ui| {
                            let summary = egui::RichText::new(toast.summary.as_str()).strong();
                            ui.colored_label(color, summary);
                            if ui.small_button("✕").clicked() {
                                actions.push(UiAction::DismissToast(toast.id));
                            }
                        });
                        ui.label(toast.detail.as_str());
                    });
                ui.add_space(6.0);
            }
        });
    ctx.request_repaint_after(std::time::Duration::from_millis(250));
}
