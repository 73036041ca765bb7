//! Backend commands queued from UI to backend worker.

use shared::{
    domain::{Empresa, Municipio},
    protocol::LazyTableState,
};

#[derive(Debug, Clone, PartialEq)]
pub enum BackendCommand {
    ResolveTenant,
    LoadEmpresas {
        generation: u64,
        query: LazyTableState,
    },
    LoadMunicipios,
    LoadRotinas {
        generation: u64,
        municipio: Municipio,
    },
    CreateEmpresa {
        request: u64,
        empresa: Empresa,
    },
    UpdateEmpresa {
        request: u64,
        empresa: Empresa,
    },
    DeleteEmpresa {
        request: u64,
        empresa: Empresa,
    },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::ResolveTenant => "resolve_tenant",
            BackendCommand::LoadEmpresas { .. } => "load_empresas",
            BackendCommand::LoadMunicipios => "load_municipios",
            BackendCommand::LoadRotinas { .. } => "load_rotinas",
            BackendCommand::CreateEmpresa { .. } => "create_empresa",
            BackendCommand::UpdateEmpresa { .. } => "update_empresa",
            BackendCommand::DeleteEmpresa { .. } => "delete_empresa",
        }
    }
}
