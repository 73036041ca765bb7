use super::*;
use crossbeam_channel::bounded;

#[test]
fn queued_commands_leave_status_untouched() {
    let (tx, rx) = bounded(4);
    let mut status = String::new();

    dispatch_backend_commands(
        &tx,
        [BackendCommand::ResolveTenant, BackendCommand::LoadMunicipios],
        &mut status,
    );

    assert!(status.is_empty());
    assert_eq!(rx.try_recv(), Ok(BackendCommand::ResolveTenant));
    assert_eq!(rx.try_recv(), Ok(BackendCommand::LoadMunicipios));
}

#[test]
fn full_queue_reports_retry_status() {
    let (tx, _rx) = bounded(1);
    let mut status = String::new();

    dispatch_backend_command(&tx, BackendCommand::ResolveTenant, &mut status);
    assert!(status.is_empty());
    dispatch_backend_command(&tx, BackendCommand::LoadMunicipios, &mut status);
    assert!(status.contains("queue is full"));
}

#[test]
fn disconnected_worker_reports_status() {
    let (tx, rx) = bounded::<BackendCommand>(1);
    drop(rx);
    let mut status = String::new();

    dispatch_backend_command(&tx, BackendCommand::ResolveTenant, &mut status);
    assert!(status.contains("disconnected"));
}
