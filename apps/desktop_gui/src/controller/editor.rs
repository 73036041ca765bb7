//! Create/edit/delete dialog state machine for a single Empresa.

use shared::domain::{Empresa, EmpresaField, Municipio, Rotina, TenantId};

use crate::controller::events::SaveMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationIssue {
    MissingNome,
    MissingMunicipio,
    MissingRotina,
}

impl ValidationIssue {
    pub fn detail(self) -> &'static str {
        match self {
            ValidationIssue::MissingNome => "Preencha o nome da empresa",
            ValidationIssue::MissingMunicipio => "Selecione o município da empresa",
            ValidationIssue::MissingRotina => "Selecione a rotina da empresa",
        }
    }

    /// Inline message shown under the offending input.
    pub fn inline(self) -> &'static str {
        match self {
            ValidationIssue::MissingNome => "Nome da Empresa é obrigatório.",
            ValidationIssue::MissingMunicipio => "Município da Empresa é obrigatório.",
            ValidationIssue::MissingRotina => "Rotina é obrigatório.",
        }
    }
}

/// Every rule a draft must pass before create/update, in display order.
pub fn validate_draft(draft: &Empresa) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    if draft.nome.trim().is_empty() {
        issues.push(ValidationIssue::MissingNome);
    }
    if !draft.municipio.is_selected() {
        issues.push(ValidationIssue::MissingMunicipio);
    }
    if !draft.rotina.is_selected() {
        issues.push(ValidationIssue::MissingRotina);
    }
    issues
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftForm {
    pub draft: Empresa,
    /// Set after the first save attempt so inline errors start showing.
    pub submitted: bool,
    /// Id of the save request this dialog is waiting on.
    pub in_flight: Option<u64>,
}

impl DraftForm {
    fn new(draft: Empresa) -> Self {
        Self {
            draft,
            submitted: false,
            in_flight: None,
        }
    }

    pub fn saving(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn issues(&self) -> Vec<ValidationIssue> {
        if self.submitted {
            validate_draft(&self.draft)
        } else {
            Vec::new()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub record: Empresa,
    pub in_flight: Option<u64>,
}

impl PendingDelete {
    pub fn deleting(&self) -> bool {
        self.in_flight.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveRequest {
    Create(Empresa),
    Update(Empresa),
}

impl SaveRequest {
    pub fn mode(&self) -> SaveMode {
        match self {
            SaveRequest::Create(_) => SaveMode::Create,
            SaveRequest::Update(_) => SaveMode::Update,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteRejected {
    NotPinned,
    Incomplete,
    InFlight,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditorDialog {
    #[default]
    Closed,
    Create(DraftForm),
    Edit(DraftForm),
    ConfirmDelete(PendingDelete),
}

impl EditorDialog {
    #[cfg(test)]
    pub fn is_closed(&self) -> bool {
        matches!(self, EditorDialog::Closed)
    }

    pub fn form(&self) -> Option<&DraftForm> {
        match self {
            EditorDialog::Create(form) | EditorDialog::Edit(form) => Some(form),
            _ => None,
        }
    }

    fn form_mut(&mut self) -> Option<&mut DraftForm> {
        match self {
            EditorDialog::Create(form) | EditorDialog::Edit(form) => Some(form),
            _ => None,
        }
    }

    pub fn pending_delete(&self) -> Option<&PendingDelete> {
        match self {
            EditorDialog::ConfirmDelete(pending) => Some(pending),
            _ => None,
        }
    }

    pub fn open_create(&mut self) {
        *self = EditorDialog::Create(DraftForm::new(Empresa::default()));
    }

    /// Opens the editor on a copy of `record` and returns the municipality the
    /// routine list should be scoped to.
    pub fn open_edit(&mut self, record: &Empresa) -> Municipio {
        *self = EditorDialog::Edit(DraftForm::new(record.clone()));
        record.municipio.clone()
    }

    pub fn open_delete(&mut self, record: &Empresa) {
        *self = EditorDialog::ConfirmDelete(PendingDelete {
            record: record.clone(),
            in_flight: None,
        });
    }

    pub fn cancel(&mut self) {
        *self = EditorDialog::Closed;
    }

    pub fn edit_field(&mut self, field: EmpresaField, value: impl Into<String>) {
        if let Some(form) = self.form_mut() {
            form.draft = form.draft.with_field(field, value);
        }
    }

    /// Returns `false` when no draft is open. The current routine is kept.
    pub fn select_municipio(&mut self, municipio: Municipio) -> bool {
        match self.form_mut() {
            Some(form) => {
                form.draft = form.draft.with_municipio(municipio);
                true
            }
            None => false,
        }
    }

    pub fn select_rotina(&mut self, rotina: Rotina) -> bool {
        match self.form_mut() {
            Some(form) => {
                form.draft = form.draft.with_rotina(rotina);
                true
            }
            None => false,
        }
    }

    /// Validates the open draft and, when it passes, marks the dialog as
    /// waiting on `request` and returns what to send. A second save while one
    /// is in flight yields no request and no issues.
    pub fn begin_save(
        &mut self,
        tenantid: &TenantId,
        request: u64,
    ) -> Result<Option<SaveRequest>, Vec<ValidationIssue>> {
        let Some(form) = self.form_mut() else {
            return Ok(None);
        };
        if form.saving() {
            return Ok(None);
        }
        form.submitted = true;
        let issues = validate_draft(&form.draft);
        if !issues.is_empty() {
            return Err(issues);
        }
        form.in_flight = Some(request);
        let empresa = form.draft.with_tenant(tenantid.clone());
        Ok(Some(if empresa.is_new() {
            SaveRequest::Create(empresa)
        } else {
            SaveRequest::Update(empresa)
        }))
    }

    pub fn begin_delete(&mut self, request: u64) -> Result<Empresa, DeleteRejected> {
        let EditorDialog::ConfirmDelete(pending) = self else {
            return Err(DeleteRejected::NotPinned);
        };
        if pending.deleting() {
            return Err(DeleteRejected::InFlight);
        }
        if pending.record.nome.trim().is_empty() || pending.record.id.is_empty() {
            return Err(DeleteRejected::Incomplete);
        }
        pending.in_flight = Some(request);
        Ok(pending.record.clone())
    }

    /// Closes the dialog once `request` completes, whatever the outcome. A
    /// dialog opened after that request was issued stays open; returns
    /// whether anything was closed.
    pub fn finish(&mut self, request: u64) -> bool {
        let issued_here = match self {
            EditorDialog::Create(form) | EditorDialog::Edit(form) => {
                form.in_flight == Some(request)
            }
            EditorDialog::ConfirmDelete(pending) => pending.in_flight == Some(request),
            EditorDialog::Closed => false,
        };
        if issued_here {
            *self = EditorDialog::Closed;
        }
        issued_here
    }
}

#[cfg(test)]
#[path = "tests/editor_tests.rs"]
mod tests;
