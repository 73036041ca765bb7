//! Transient toast messages shown over the Empresas screen.

use std::time::{Duration, Instant};

pub const TOAST_LIFE: Duration = Duration::from_secs(3);
pub const DELETE_ERROR_LIFE: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Warn,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub severity: Severity,
    pub summary: String,
    pub detail: String,
    pub life: Duration,
    pub shown_at: Instant,
}

impl Toast {
    pub fn expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= self.life
    }
}

#[derive(Debug, Clone, Default)]
pub struct Notifications {
    next_id: u64,
    toasts: Vec<Toast>,
}

impl Notifications {
    pub fn push(
        &mut self,
        severity: Severity,
        summary: impl Into<String>,
        detail: impl Into<String>,
        life: Duration,
    ) -> u64 {
        self.next_id += 1;
        self.toasts.push(Toast {
            id: self.next_id,
            severity,
            summary: summary.into(),
            detail: detail.into(),
            life,
            shown_at: Instant::now(),
        });
        self.next_id
    }

    pub fn success(&mut self, detail: impl Into<String>) -> u64 {
        self.push(Severity::Success, "Sucesso", detail, TOAST_LIFE)
    }

    pub fn warn(&mut self, detail: impl Into<String>) -> u64 {
        self.push(Severity::Warn, "Alerta", detail, TOAST_LIFE)
    }

    pub fn error(&mut self, detail: impl Into<String>, life: Duration) -> u64 {
        self.push(Severity::Error, "Erro", detail, life)
    }

    /// Drops expired toasts; returns how many are still visible.
    pub fn prune(&mut self, now: Instant) -> usize {
        self.toasts.retain(|toast| !toast.expired(now));
        self.toasts.len()
    }

    pub fn dismiss(&mut self, id: u64) {
        self.toasts.retain(|toast| toast.id != id);
    }

    pub fn active(&self) -> &[Toast] {
        &self.toasts
    }
}

#[cfg(test)]
#[path = "tests/notifications_tests.rs"]
mod tests;
