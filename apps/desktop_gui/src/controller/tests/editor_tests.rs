use super::*;

fn tenant() -> TenantId {
    TenantId::new("t-1")
}

fn complete_draft(dialog: &mut EditorDialog) {
    dialog.edit_field(EmpresaField::Nome, "Acme");
    assert!(dialog.select_municipio(Municipio::new("m1", "Cuiabá")));
    assert!(dialog.select_rotina(Rotina::new("r1", "Rotina 1")));
}

fn stored(id: &str, nome: &str) -> Empresa {
    Empresa {
        id: shared::domain::EmpresaId::new(id),
        nome: nome.into(),
        municipio: Municipio::new("m2", "Sinop"),
        rotina: Rotina::new("r2", "Rotina 2"),
        ..Empresa::default()
    }
}

#[test]
fn empty_draft_reports_every_missing_field_in_order() {
    let issues = validate_draft(&Empresa::default());
    assert_eq!(
        issues,
        vec![
            ValidationIssue::MissingNome,
            ValidationIssue::MissingMunicipio,
            ValidationIssue::MissingRotina
        ]
    );
    assert_eq!(issues[0].detail(), "Preencha o nome da empresa");
    assert_eq!(issues[1].detail(), "Selecione o município da empresa");
    assert_eq!(issues[2].detail(), "Selecione a rotina da empresa");
}

#[test]
fn whitespace_name_is_missing() {
    let draft = Empresa::default().with_field(EmpresaField::Nome, "   ");
    assert!(validate_draft(&draft).contains(&ValidationIssue::MissingNome));
}

#[test]
fn inline_errors_appear_only_after_first_save_attempt() {
    let mut dialog = EditorDialog::default();
    dialog.open_create();
    assert!(dialog.form().expect("form").issues().is_empty());

    let issues = dialog.begin_save(&tenant(), 1).expect_err("invalid");
    assert_eq!(issues.len(), 3);
    let form = dialog.form().expect("still open");
    assert!(form.submitted);
    assert!(!form.saving());
    assert_eq!(form.issues().len(), 3);
}

#[test]
fn new_draft_becomes_create_request_stamped_with_tenant() {
    let mut dialog = EditorDialog::default();
    dialog.open_create();
    complete_draft(&mut dialog);

    let request = dialog.begin_save(&tenant(), 1).expect("valid").expect("request");
    assert_eq!(request.mode(), SaveMode::Create);
    let SaveRequest::Create(empresa) = request else {
        panic!("expected create");
    };
    assert_eq!(empresa.nome, "Acme");
    assert_eq!(empresa.tenantid, tenant());
    assert!(dialog.form().expect("form").saving());
}

#[test]
fn second_save_while_in_flight_is_ignored() {
    let mut dialog = EditorDialog::default();
    dialog.open_create();
    complete_draft(&mut dialog);
    assert!(dialog.begin_save(&tenant(), 1).expect("valid").is_some());
    assert_eq!(dialog.begin_save(&tenant(), 1), Ok(None));
}

#[test]
fn editing_copies_record_and_scopes_routines() {
    let record = stored("e1", "Beta");
    let mut dialog = EditorDialog::default();

    let scope = dialog.open_edit(&record);
    assert_eq!(scope, Municipio::new("m2", "Sinop"));

    dialog.edit_field(EmpresaField::Fantasia, "Beta Ltda");
    assert_eq!(record.fantasia, "");

    let request = dialog.begin_save(&tenant(), 1).expect("valid").expect("request");
    assert_eq!(request.mode(), SaveMode::Update);
}

#[test]
fn municipio_change_keeps_selected_routine() {
    let mut dialog = EditorDialog::default();
    dialog.open_edit(&stored("e1", "Beta"));
    dialog.select_municipio(Municipio::new("m3", "Sorriso"));

    let draft = &dialog.form().expect("form").draft;
    assert_eq!(draft.municipio.nome, "Sorriso");
    assert_eq!(draft.rotina, Rotina::new("r2", "Rotina 2"));
}

#[test]
fn edits_without_open_form_are_ignored() {
    let mut dialog = EditorDialog::default();
    dialog.edit_field(EmpresaField::Nome, "x");
    assert!(!dialog.select_municipio(Municipio::new("m1", "Cuiabá")));
    assert!(!dialog.select_rotina(Rotina::new("r1", "R")));
    assert!(dialog.is_closed());
    assert_eq!(dialog.begin_save(&tenant(), 1), Ok(None));
}

#[test]
fn delete_requires_pinned_complete_record() {
    let mut dialog = EditorDialog::default();
    assert_eq!(dialog.begin_delete(1), Err(DeleteRejected::NotPinned));

    dialog.open_delete(&stored("", "Sem id"));
    assert_eq!(dialog.begin_delete(1), Err(DeleteRejected::Incomplete));

    dialog.open_delete(&stored("e9", "  "));
    assert_eq!(dialog.begin_delete(1), Err(DeleteRejected::Incomplete));
}

#[test]
fn delete_marks_in_flight_and_closes_on_finish() {
    let mut dialog = EditorDialog::default();
    dialog.open_delete(&stored("e1", "Beta"));

    let empresa = dialog.begin_delete(1).expect("delete");
    assert_eq!(empresa.nome, "Beta");
    assert!(dialog.pending_delete().expect("pending").deleting());
    assert_eq!(dialog.begin_delete(1), Err(DeleteRejected::InFlight));

    assert!(dialog.finish(1));
    assert!(dialog.is_closed());
}

#[test]
fn finish_leaves_dialog_opened_after_the_request() {
    let mut dialog = EditorDialog::default();
    dialog.open_edit(&stored("e1", "Beta"));
    assert!(dialog.begin_save(&tenant(), 1).expect("valid").is_some());

    dialog.cancel();
    dialog.open_create();
    dialog.edit_field(EmpresaField::Nome, "Nova");
    assert!(!dialog.finish(1));
    assert_eq!(dialog.form().expect("still open").draft.nome, "Nova");

    complete_draft(&mut dialog);
    assert!(dialog.begin_save(&tenant(), 2).expect("valid").is_some());
    assert!(!dialog.finish(1));
    assert!(dialog.finish(2));
    assert!(dialog.is_closed());
}

#[test]
fn cancel_discards_draft() {
    let mut dialog = EditorDialog::default();
    dialog.open_create();
    dialog.edit_field(EmpresaField::Nome, "Rascunho");
    dialog.cancel();
    assert!(dialog.is_closed());

    dialog.open_create();
    assert_eq!(dialog.form().expect("form").draft.nome, "");
}
