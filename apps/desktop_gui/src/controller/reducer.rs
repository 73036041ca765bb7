//! Screen-level reducer: turns UI actions and backend events into state
//! changes plus the backend commands they require.

use shared::{
    domain::{Empresa, EmpresaField, Municipio, Rotina, TenantId},
    protocol::{NOME_FIELD, ROWS_PER_PAGE_OPTIONS},
};
use tracing::{debug, warn};

use crate::{
    backend_bridge::commands::BackendCommand,
    controller::{
        editor::{DeleteRejected, EditorDialog, SaveRequest},
        events::{SaveMode, UiError, UiEvent},
        notifications::{Notifications, DELETE_ERROR_LIFE, TOAST_LIFE},
        page_state::PageState,
    },
};

pub const LIST_ERROR: &str = "Erro ao carregar as Empresas";
pub const MUNICIPIOS_ERROR: &str = "Erro ao carregar os municípios";
pub const ROTINAS_ERROR: &str = "Erro ao carregar as rotinas";
pub const DELETE_INCOMPLETE: &str = "Empresa inválida para exclusão";

#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    Refresh,
    /// 0-based, as reported by the paginator links.
    PageChanged { page_index: u32 },
    RowsPerPageChanged(u32),
    SortByColumn(String),
    PageInputChanged(String),
    PageInputCommitted,
    SearchInputChanged(String),
    SearchCommitted,
    OpenCreate,
    OpenEdit(Empresa),
    OpenDelete(Empresa),
    EditField { field: EmpresaField, value: String },
    SelectMunicipio(Municipio),
    SelectRotina(Rotina),
    CancelDialog,
    Save,
    ConfirmDelete,
    DismissToast(u64),
}

pub struct EmpresasScreen {
    tenant: TenantId,
    pub page: PageState,
    pub editor: EditorDialog,
    municipios: Vec<Municipio>,
    rotinas: Vec<Rotina>,
    rotina_scope: Municipio,
    rotinas_generation: u64,
    /// Id handed to the next save or delete request.
    next_request: u64,
    pub notifications: Notifications,
}

impl EmpresasScreen {
    pub fn new(tenant: TenantId, rows_per_page: u32) -> Self {
        Self {
            page: PageState::new(tenant.clone(), rows_per_page),
            tenant,
            editor: EditorDialog::default(),
            municipios: Vec::new(),
            rotinas: Vec::new(),
            rotina_scope: Municipio::default(),
            rotinas_generation: 0,
            next_request: 0,
            notifications: Notifications::default(),
        }
    }

    pub fn tenant(&self) -> &TenantId {
        &self.tenant
    }

    pub fn municipios(&self) -> &[Municipio] {
        &self.municipios
    }

    pub fn rotinas(&self) -> &[Rotina] {
        &self.rotinas
    }

    pub fn rotina_scope(&self) -> &Municipio {
        &self.rotina_scope
    }

    /// Municipalities, unscoped routines, then the first page of companies.
    pub fn initial_load(&mut self) -> Vec<BackendCommand> {
        vec![
            BackendCommand::LoadMunicipios,
            self.reload_rotinas(Municipio::default()),
            self.page.refresh(),
        ]
    }

    fn reload_rotinas(&mut self, municipio: Municipio) -> BackendCommand {
        self.rotinas_generation += 1;
        self.rotina_scope = municipio.clone();
        BackendCommand::LoadRotinas {
            generation: self.rotinas_generation,
            municipio,
        }
    }

    pub fn handle(&mut self, action: UiAction) -> Vec<BackendCommand> {
        match action {
            UiAction::Refresh => vec![self.page.refresh()],
            UiAction::PageChanged { page_index } => {
                let last = self.page.total_pages().saturating_sub(1);
                vec![self.page.go_to_page_index(page_index.min(last))]
            }
            UiAction::RowsPerPageChanged(rows) => {
                if !ROWS_PER_PAGE_OPTIONS.contains(&rows) || rows == self.page.query().rows {
                    return Vec::new();
                }
                vec![self.page.on_rows_per_page_change(rows)]
            }
            UiAction::SortByColumn(field) => {
                if field != NOME_FIELD {
                    return Vec::new();
                }
                vec![self.page.on_sort_change(&field)]
            }
            UiAction::PageInputChanged(text) => {
                self.page.set_page_input(text);
                Vec::new()
            }
            UiAction::PageInputCommitted => self.page.on_manual_page_jump().into_iter().collect(),
            UiAction::SearchInputChanged(text) => {
                self.page.set_search_input(text).into_iter().collect()
            }
            UiAction::SearchCommitted => vec![self.page.commit_search()],
            UiAction::OpenCreate => {
                self.editor.open_create();
                Vec::new()
            }
            UiAction::OpenEdit(record) => {
                let scope = self.editor.open_edit(&record);
                vec![self.reload_rotinas(scope)]
            }
            UiAction::OpenDelete(record) => {
                self.editor.open_delete(&record);
                Vec::new()
            }
            UiAction::EditField { field, value } => {
                self.editor.edit_field(field, value);
                Vec::new()
            }
            UiAction::SelectMunicipio(municipio) => {
                if self.editor.select_municipio(municipio.clone()) {
                    vec![self.reload_rotinas(municipio)]
                } else {
                    Vec::new()
                }
            }
            UiAction::SelectRotina(rotina) => {
                self.editor.select_rotina(rotina);
                Vec::new()
            }
            UiAction::CancelDialog => {
                self.editor.cancel();
                Vec::new()
            }
            UiAction::Save => self.save(),
            UiAction::ConfirmDelete => self.confirm_delete(),
            UiAction::DismissToast(id) => {
                self.notifications.dismiss(id);
                Vec::new()
            }
        }
    }

    fn save(&mut self) -> Vec<BackendCommand> {
        let request = self.next_request + 1;
        match self.editor.begin_save(&self.tenant, request) {
            Ok(Some(save)) => {
                self.next_request = request;
                debug!(request, mode = ?save.mode(), "empresas: save requested");
                let cmd = match save {
                    SaveRequest::Create(empresa) => {
                        BackendCommand::CreateEmpresa { request, empresa }
                    }
                    SaveRequest::Update(empresa) => {
                        BackendCommand::UpdateEmpresa { request, empresa }
                    }
                };
                vec![cmd]
            }
            Ok(None) => Vec::new(),
            Err(issues) => {
                for issue in issues {
                    self.notifications.warn(issue.detail());
                }
                Vec::new()
            }
        }
    }

    fn confirm_delete(&mut self) -> Vec<BackendCommand> {
        let request = self.next_request + 1;
        match self.editor.begin_delete(request) {
            Ok(empresa) => {
                self.next_request = request;
                vec![BackendCommand::DeleteEmpresa { request, empresa }]
            }
            Err(DeleteRejected::Incomplete) => {
                self.notifications.warn(DELETE_INCOMPLETE);
                Vec::new()
            }
            Err(DeleteRejected::NotPinned | DeleteRejected::InFlight) => Vec::new(),
        }
    }

    /// Applies a backend event. Tenant events are handled by the app shell and
    /// ignored here.
    pub fn apply(&mut self, event: UiEvent) -> Vec<BackendCommand> {
        match event {
            UiEvent::EmpresasLoaded { generation, page } => {
                let count = page.empresas.len();
                if !self
                    .page
                    .apply_loaded(generation, page.empresas, page.total_records)
                {
                    debug!(
                        generation,
                        latest = self.page.latest_generation(),
                        count,
                        "empresas: discarded stale list response"
                    );
                }
                Vec::new()
            }
            UiEvent::EmpresasFailed { generation, error } => {
                if self.page.apply_failed(generation) {
                    warn!(generation, error = error.message(), "empresas: list failed");
                    self.notifications.error(LIST_ERROR, TOAST_LIFE);
                } else {
                    debug!(generation, "empresas: discarded stale list failure");
                }
                Vec::new()
            }
            UiEvent::MunicipiosLoaded(municipios) => {
                self.municipios = municipios;
                Vec::new()
            }
            UiEvent::MunicipiosFailed(error) => {
                warn!(error = error.message(), "empresas: municipio lookup failed");
                self.notifications.error(MUNICIPIOS_ERROR, TOAST_LIFE);
                Vec::new()
            }
            UiEvent::RotinasLoaded { generation, rotinas } => {
                if generation == self.rotinas_generation {
                    self.rotinas = rotinas;
                } else {
                    debug!(generation, "empresas: discarded stale rotina response");
                }
                Vec::new()
            }
            UiEvent::RotinasFailed { generation, error } => {
                if generation == self.rotinas_generation {
                    warn!(generation, error = error.message(), "empresas: rotina lookup failed");
                    self.notifications.error(ROTINAS_ERROR, TOAST_LIFE);
                }
                Vec::new()
            }
            UiEvent::EmpresaSaved {
                request,
                mode,
                result,
            } => {
                self.on_saved(mode, result);
                self.finish_request(request);
                vec![self.page.refresh()]
            }
            UiEvent::EmpresaDeleted { request, result } => {
                match result {
                    Ok(()) => {
                        self.notifications.success("Empresa Excluída");
                    }
                    Err(error) => {
                        warn!(error = error.message(), "empresas: delete failed");
                        self.notifications
                            .error("Erro ao excluir a empresa", DELETE_ERROR_LIFE);
                    }
                }
                self.finish_request(request);
                vec![self.page.refresh()]
            }
            UiEvent::Error(error) => {
                self.notifications.error(error.message(), TOAST_LIFE);
                Vec::new()
            }
            UiEvent::Info(_) | UiEvent::TenantResolved(_) | UiEvent::TenantRejected(_) => {
                Vec::new()
            }
        }
    }

    fn finish_request(&mut self, request: u64) {
        if !self.editor.finish(request) {
            debug!(request, "empresas: completion for a dialog that is no longer open");
        }
    }

    fn on_saved(&mut self, mode: SaveMode, result: Result<(), UiError>) {
        match (mode, result) {
            (SaveMode::Create, Ok(())) => {
                self.notifications.success("Empresa Criada");
            }
            (SaveMode::Update, Ok(())) => {
                self.notifications.success("Empresa Atualizada");
            }
            (mode, Err(error)) => {
                warn!(?mode, error = error.message(), "empresas: save failed");
                let detail = match mode {
                    SaveMode::Create => "Erro ao criar a empresa",
                    SaveMode::Update => "Erro ao atualizar a empresa",
                };
                self.notifications.error(detail, TOAST_LIFE);
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/reducer_tests.rs"]
mod tests;
