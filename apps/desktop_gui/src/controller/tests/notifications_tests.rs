use super::*;

#[test]
fn helpers_use_fixed_summaries_and_lifetimes() {
    let mut notifications = Notifications::default();
    notifications.success("Empresa Criada");
    notifications.warn("Preencha o nome da empresa");
    notifications.error("Erro ao excluir a empresa", DELETE_ERROR_LIFE);

    let active = notifications.active();
    assert_eq!(active.len(), 3);
    assert_eq!((active[0].severity, active[0].summary.as_str()), (Severity::Success, "Sucesso"));
    assert_eq!((active[1].severity, active[1].summary.as_str()), (Severity::Warn, "Alerta"));
    assert_eq!((active[2].severity, active[2].summary.as_str()), (Severity::Error, "Erro"));
    assert_eq!(active[0].life, TOAST_LIFE);
    assert_eq!(active[2].life, DELETE_ERROR_LIFE);
}

#[test]
fn prune_drops_only_expired_toasts() {
    let mut notifications = Notifications::default();
    notifications.success("curta");
    notifications.error("longa", DELETE_ERROR_LIFE);
    let shown_at = notifications.active()[0].shown_at;

    assert_eq!(notifications.prune(shown_at + Duration::from_secs(1)), 2);
    assert_eq!(notifications.prune(shown_at + Duration::from_secs(4)), 1);
    assert_eq!(notifications.active()[0].detail, "longa");
    assert_eq!(notifications.prune(shown_at + Duration::from_secs(10)), 0);
}

#[test]
fn dismiss_removes_by_id() {
    let mut notifications = Notifications::default();
    let first = notifications.warn("a");
    let second = notifications.warn("b");
    assert_ne!(first, second);

    notifications.dismiss(first);
    assert_eq!(notifications.active().len(), 1);
    assert_eq!(notifications.active()[0].id, second);
}
