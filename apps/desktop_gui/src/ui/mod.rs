//! UI layer: app shell, Empresas table, dialogs and toasts.

pub mod app;
pub mod dialogs;
pub mod table;

pub use app::{EmpresasApp, StartupConfig};
