//! Row and paginator view models for the Empresas table, plus the widgets
//! that draw them.

use eframe::egui;
use shared::{
    domain::Empresa,
    protocol::{NOME_FIELD, ROWS_PER_PAGE_OPTIONS},
};

use crate::controller::{page_state::PageState, reducer::UiAction};

pub const PAGE_LINK_SIZE: u32 = 5;
pub const EMPTY_MESSAGE: &str = "Nenhuma empresa encontrada.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmpresaRow {
    pub nome: String,
    pub municipio: String,
    pub rotina: String,
}

impl From<&Empresa> for EmpresaRow {
    fn from(empresa: &Empresa) -> Self {
        Self {
            nome: empresa.nome.clone(),
            municipio: empresa.municipio.nome.clone(),
            rotina: empresa.rotina.descricao.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageLink {
    Page { index: u32, current: bool },
    /// Window edge standing in for the pages beyond it; not clickable.
    Ellipsis,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginatorView {
    pub current: u32,
    pub page_count: u32,
    pub links: Vec<PageLink>,
}

impl PaginatorView {
    pub fn new(first: u64, rows: u32, total: u64) -> Self {
        let rows = u64::from(rows.max(1));
        let page_count = u32::try_from(total.div_ceil(rows)).unwrap_or(u32::MAX);
        let current = u32::try_from(first / rows).unwrap_or(u32::MAX);

        let (start, end) = page_window(current, page_count);
        let mut links = Vec::new();
        if page_count > 0 {
            for index in start..=end {
                let leading_edge = index == start && start != 0;
                let trailing_edge = index == end && index + 1 != page_count;
                if leading_edge || trailing_edge {
                    links.push(PageLink::Ellipsis);
                } else {
                    links.push(PageLink::Page {
                        index,
                        current: index == current,
                    });
                }
            }
        }

        Self {
            current,
            page_count,
            links,
        }
    }

    pub fn has_previous(&self) -> bool {
        self.current > 0
    }

    pub fn has_next(&self) -> bool {
        self.current + 1 < self.page_count
    }
}

/// Inclusive window of page indexes centred on `current`, shifted back when
/// it would run past the last page.
fn page_window(current: u32, page_count: u32) -> (u32, u32) {
    if page_count == 0 {
        return (0, 0);
    }
    let visible = PAGE_LINK_SIZE.min(page_count);
    let start = current.saturating_sub(visible / 2);
    let end = (start + visible - 1).min(page_count - 1);
    let delta = PAGE_LINK_SIZE.saturating_sub(end - start + 1);
    (start.saturating_sub(delta), end)
}

pub fn show_table(ui: &mut egui::Ui, page: &PageState, actions: &mut Vec<UiAction>) {
    let query = page.query();
    let sort_marker = match (query.sort_field.as_deref(), query.sort_order) {
        (Some(NOME_FIELD), shared::protocol::SortOrder::Ascending) => " ▲",
        (Some(NOME_FIELD), shared::protocol::SortOrder::Descending) => " ▼",
        _ => "",
    };

    egui::ScrollArea::vertical()
        .max_height((ui.available_height() - 48.0).max(0.0))
        .show(ui, |ui| {
            egui::Grid::new("empresas_table")
                .striped(true)
                .num_columns(4)
                .min_col_width(160.0)
                .show(ui, |ui| {
                    if ui.button(format!("Nome{sort_marker}")).clicked() {
                        actions.push(UiAction::SortByColumn(NOME_FIELD.to_string()));
                    }
                    ui.strong("Município");
                    ui.strong("Rotina");
                    ui.label("");
                    ui.end_row();

                    for empresa in page.records() {
                        let row = EmpresaRow::from(empresa);
                        ui.label(row.nome);
                        ui.label(row.municipio);
                        ui.label(row.rotina);
                        ui.horizontal(|ui| {
                            if ui.button("✏").on_hover_text("Editar").clicked() {
                                actions.push(UiAction::OpenEdit(empresa.clone()));
                            }
                            if ui.button("🗑").on_hover_text("Excluir").clicked() {
                                actions.push(UiAction::OpenDelete(empresa.clone()));
                            }
                        });
                        ui.end_row();
                    }
                });

            if page.records().is_empty() && !page.loading() {
                ui.add_space(8.0);
                ui.weak(EMPTY_MESSAGE);
            }
        });
}

pub fn show_paginator(ui: &mut egui::Ui, page: &PageState, actions: &mut Vec<UiAction>) {
    let query = page.query();
    let view = PaginatorView::new(query.first, query.rows, page.total_records());

    ui.horizontal(|ui| {
        if ui.button("⟳").on_hover_text("Atualizar").clicked() {
            actions.push(UiAction::Refresh);
        }
        if ui
            .add_enabled(view.has_previous(), egui::Button::new("Página anterior"))
            .clicked()
        {
            actions.push(UiAction::PageChanged {
                page_index: view.current - 1,
            });
        }
        for link in &view.links {
            match link {
                PageLink::Page { index, current } => {
                    let button = egui::Button::new((index + 1).to_string()).selected(*current);
                    if ui.add(button).clicked() && !current {
                        actions.push(UiAction::PageChanged { page_index: *index });
                    }
                }
                PageLink::Ellipsis => {
                    ui.add_enabled(false, egui::Label::new("..."));
                }
            }
        }
        if ui
            .add_enabled(view.has_next(), egui::Button::new("Próxima página"))
            .clicked()
        {
            actions.push(UiAction::PageChanged {
                page_index: view.current + 1,
            });
        }

        let mut rows = query.rows;
        egui::ComboBox::from_id_salt("empresas_rows_per_page")
            .selected_text(rows.to_string())
            .width(56.0)
            .show_ui(ui, |ui| {
                for option in ROWS_PER_PAGE_OPTIONS {
                    ui.selectable_value(&mut rows, option, option.to_string());
                }
            });
        if rows != query.rows {
            actions.push(UiAction::RowsPerPageChanged(rows));
        }

        ui.label("Página");
        let mut input = page.page_input().to_string();
        let mut response =
            ui.add(egui::TextEdit::singleline(&mut input).desired_width(40.0));
        if !page.page_input_tooltip().is_empty() {
            response = response.on_hover_text(page.page_input_tooltip());
        }
        if response.changed() {
            actions.push(UiAction::PageInputChanged(input));
        }
        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            actions.push(UiAction::PageInputCommitted);
        }

        if page.loading() {
            ui.spinner();
        }
    });
}

#[cfg(test)]
#[path = "tests/table_tests.rs"]
mod tests;
