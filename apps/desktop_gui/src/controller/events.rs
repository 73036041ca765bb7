//! Backend-to-UI events and error modeling for the Empresas controller.

use client_core::{GatewayError, TenantError};
use shared::{
    domain::{Municipio, Rotina, TenantId},
    protocol::EmpresaPage,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveMode {
    Create,
    Update,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Info(String),
    TenantResolved(TenantId),
    TenantRejected(UiError),
    EmpresasLoaded {
        generation: u64,
        page: EmpresaPage,
    },
    EmpresasFailed {
        generation: u64,
        error: UiError,
    },
    MunicipiosLoaded(Vec<Municipio>),
    MunicipiosFailed(UiError),
    RotinasLoaded {
        generation: u64,
        rotinas: Vec<Rotina>,
    },
    RotinasFailed {
        generation: u64,
        error: UiError,
    },
    EmpresaSaved {
        request: u64,
        mode: SaveMode,
        result: Result<(), UiError>,
    },
    EmpresaDeleted {
        request: u64,
        result: Result<(), UiError>,
    },
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Auth,
    Transport,
    Validation,
    Server,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Tenant,
    ListEmpresas,
    Lookups,
    SaveEmpresa,
    DeleteEmpresa,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let lower = message.to_ascii_lowercase();
        let category = if lower.contains("401")
            || lower.contains("403")
            || lower.contains("unauthorized")
            || lower.contains("forbidden")
            || lower.contains("not authenticated")
        {
            UiErrorCategory::Auth
        } else if lower.contains("invalid") || lower.contains("missing") {
            UiErrorCategory::Validation
        } else if lower.contains("timeout")
            || lower.contains("timed out")
            || lower.contains("connection")
            || lower.contains("transport")
            || lower.contains("disconnected")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn from_gateway(context: UiErrorContext, err: &GatewayError) -> Self {
        let category = match err {
            _ if err.is_authorization() => UiErrorCategory::Auth,
            GatewayError::Transport(_) => UiErrorCategory::Transport,
            GatewayError::InvalidUrl(_) | GatewayError::Encode(_) => UiErrorCategory::Validation,
            GatewayError::Status { .. } | GatewayError::Decode { .. } => UiErrorCategory::Server,
        };
        Self {
            category,
            context,
            message: err.to_string(),
        }
    }

    pub fn from_tenant(err: &TenantError) -> Self {
        match err {
            TenantError::Gateway(inner) => Self::from_gateway(UiErrorContext::Tenant, inner),
            other => Self {
                category: UiErrorCategory::Auth,
                context: UiErrorContext::Tenant,
                message: other.to_string(),
            },
        }
    }

    pub fn requires_reauth(&self) -> bool {
        self.category == UiErrorCategory::Auth
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
