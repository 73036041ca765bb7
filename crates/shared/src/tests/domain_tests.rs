use super::*;

#[test]
fn missing_fields_and_null_lookups_deserialize_to_empty_values() {
    let empresa: Empresa = serde_json::from_str(
        r#"{"id":"7","nome":"Acme","municipio":null,"rotina":{"id":"2"}}"#,
    )
    .expect("empresa");

    assert_eq!(empresa.id, EmpresaId::new("7"));
    assert_eq!(empresa.cnpj, "");
    assert_eq!(empresa.municipio, Municipio::default());
    assert_eq!(empresa.rotina, Rotina::new("2", ""));
}

#[test]
fn serializes_nested_lookups_with_api_field_names() {
    let empresa = Empresa {
        nome: "Acme".to_string(),
        municipio: Municipio::new("1", "City"),
        rotina: Rotina::new("2", "R1"),
        tenantid: TenantId::new("t-1"),
        ..Empresa::default()
    };

    let value = serde_json::to_value(&empresa).expect("json");
    assert_eq!(value["municipio"]["nome"], "City");
    assert_eq!(value["rotina"]["descricao"], "R1");
    assert_eq!(value["tenantid"], "t-1");
    assert_eq!(value["id"], "");
}

#[test]
fn with_field_returns_new_value_and_leaves_original_untouched() {
    let original = Empresa::default();
    let edited = original
        .with_field(EmpresaField::Nome, "Beta")
        .with_field(EmpresaField::Cep, "01000-000");

    assert_eq!(original.nome, "");
    assert_eq!(edited.field(EmpresaField::Nome), "Beta");
    assert_eq!(edited.field(EmpresaField::Cep), "01000-000");
}

#[test]
fn blank_ids_count_as_unassigned() {
    assert!(Empresa::default().is_new());
    assert!(!Municipio::new("  ", "Nowhere").is_selected());
    assert!(Rotina::new("9", "R9").is_selected());
}
