use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{Empresa, Municipio, Rotina, TenantId};

pub const DEFAULT_ROWS_PER_PAGE: u32 = 20;
pub const ROWS_PER_PAGE_OPTIONS: [u32; 3] = [10, 20, 50];
pub const NOME_FIELD: &str = "nome";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchMode {
    /// Case-insensitive substring match, evaluated by the server.
    #[default]
    Contains,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterConstraint {
    pub value: String,
    pub match_mode: MatchMode,
}

impl FilterConstraint {
    pub fn contains(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            match_mode: MatchMode::Contains,
        }
    }
}

/// Sort direction, serialized as the `1` / `-1` integers the list endpoint expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }
}

impl From<SortOrder> for i8 {
    fn from(value: SortOrder) -> Self {
        match value {
            SortOrder::Ascending => 1,
            SortOrder::Descending => -1,
        }
    }
}

impl TryFrom<i8> for SortOrder {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            1 | 0 => Ok(SortOrder::Ascending),
            -1 => Ok(SortOrder::Descending),
            other => Err(format!("invalid sort order {other}")),
        }
    }
}

/// Query descriptor sent to the company list endpoint as the `lazyEvent` parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LazyTableState {
    pub total_records: u64,
    pub first: u64,
    pub rows: u32,
    /// 1-based page number.
    pub page: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_field: Option<String>,
    pub sort_order: SortOrder,
    pub filters: BTreeMap<String, FilterConstraint>,
    pub tenantid: TenantId,
}

impl LazyTableState {
    pub fn new(tenantid: TenantId, rows: u32) -> Self {
        let mut filters = BTreeMap::new();
        filters.insert(NOME_FIELD.to_string(), FilterConstraint::contains(""));
        Self {
            total_records: 0,
            first: 0,
            rows,
            page: 1,
            sort_field: None,
            sort_order: SortOrder::Ascending,
            filters,
            tenantid,
        }
    }

    pub fn name_filter(&self) -> &str {
        self.filters
            .get(NOME_FIELD)
            .map(|filter| filter.value.as_str())
            .unwrap_or_default()
    }

    pub fn to_lazy_event(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// One page of companies plus the total across all pages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmpresaPage {
    #[serde(default)]
    pub empresas: Vec<Empresa>,
    #[serde(default)]
    pub total_records: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MunicipiosResponse {
    #[serde(default)]
    pub municipios: Vec<Municipio>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RotinasResponse {
    #[serde(default, alias = "routinas")]
    pub rotinas: Vec<Rotina>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsuarioTenantResponse {
    pub tenantid: TenantId,
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
