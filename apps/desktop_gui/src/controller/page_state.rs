//! List window, sort and filter state for the Empresas table.
//!
//! Every transition that affects the list rebuilds the query descriptor and
//! returns the reload command for it. Reloads are tagged with a generation so
//! a slow response for an older query never overwrites a newer one.

use shared::{
    domain::{Empresa, TenantId},
    protocol::{FilterConstraint, LazyTableState, SortOrder, NOME_FIELD, ROWS_PER_PAGE_OPTIONS},
};

use crate::backend_bridge::commands::BackendCommand;

#[derive(Debug, Clone)]
pub struct PageState {
    query: LazyTableState,
    records: Vec<Empresa>,
    total_records: u64,
    loading: bool,
    latest_generation: u64,
    page_input: String,
    page_input_tooltip: String,
    search_input: String,
}

impl PageState {
    pub fn new(tenantid: TenantId, rows: u32) -> Self {
        let rows = if ROWS_PER_PAGE_OPTIONS.contains(&rows) {
            rows
        } else {
            shared::protocol::DEFAULT_ROWS_PER_PAGE
        };
        Self {
            query: LazyTableState::new(tenantid, rows),
            records: Vec::new(),
            total_records: 0,
            loading: false,
            latest_generation: 0,
            page_input: "1".to_string(),
            page_input_tooltip: String::new(),
            search_input: String::new(),
        }
    }

    pub fn query(&self) -> &LazyTableState {
        &self.query
    }

    pub fn records(&self) -> &[Empresa] {
        &self.records
    }

    pub fn total_records(&self) -> u64 {
        self.total_records
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn latest_generation(&self) -> u64 {
        self.latest_generation
    }

    /// Never less than 1, so an empty result still has a valid page to jump to.
    pub fn total_pages(&self) -> u32 {
        let rows = u64::from(self.query.rows.max(1));
        let pages = self.total_records.div_ceil(rows).max(1);
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    pub fn page_input(&self) -> &str {
        &self.page_input
    }

    pub fn page_input_tooltip(&self) -> &str {
        &self.page_input_tooltip
    }

    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    /// Issues a reload of the current descriptor.
    pub fn refresh(&mut self) -> BackendCommand {
        self.loading = true;
        self.latest_generation += 1;
        self.query.total_records = self.total_records;
        BackendCommand::LoadEmpresas {
            generation: self.latest_generation,
            query: self.query.clone(),
        }
    }

    /// `page_index` is 0-based, as reported by the paginator.
    pub fn on_page_change(&mut self, first: u64, rows: u32, page_index: u32) -> BackendCommand {
        self.query = LazyTableState {
            first,
            rows,
            page: page_index + 1,
            ..self.query.clone()
        };
        self.sync_page_input();
        self.refresh()
    }

    pub fn go_to_page_index(&mut self, page_index: u32) -> BackendCommand {
        let rows = self.query.rows;
        self.on_page_change(u64::from(rows) * u64::from(page_index), rows, page_index)
    }

    pub fn on_rows_per_page_change(&mut self, rows: u32) -> BackendCommand {
        self.on_page_change(0, rows, 0)
    }

    /// Clicking the sorted column flips direction; another column starts ascending.
    pub fn on_sort_change(&mut self, field: &str) -> BackendCommand {
        let sort_order = if self.query.sort_field.as_deref() == Some(field) {
            self.query.sort_order.toggled()
        } else {
            SortOrder::Ascending
        };
        self.query = LazyTableState {
            sort_field: Some(field.to_string()),
            sort_order,
            ..self.query.clone()
        };
        self.refresh()
    }

    pub fn on_filter_change(&mut self, value: &str) -> BackendCommand {
        let mut filters = self.query.filters.clone();
        filters.insert(NOME_FIELD.to_string(), FilterConstraint::contains(value));
        self.query = LazyTableState {
            first: 0,
            page: 1,
            filters,
            ..self.query.clone()
        };
        self.sync_page_input();
        self.refresh()
    }

    pub fn set_page_input(&mut self, text: impl Into<String>) {
        self.page_input = text.into();
    }

    /// Commits the page box. Out-of-range or unparsable input only sets the
    /// tooltip; the displayed page stays where it is.
    pub fn on_manual_page_jump(&mut self) -> Option<BackendCommand> {
        let total_pages = self.total_pages();
        match self.page_input.trim().parse::<u32>() {
            Ok(page) if (1..=total_pages).contains(&page) => {
                self.page_input_tooltip.clear();
                let rows = self.query.rows;
                Some(self.on_page_change(u64::from(rows) * u64::from(page - 1), rows, page - 1))
            }
            _ => {
                self.page_input_tooltip = format!("Valor deve estar entre 1 e {total_pages}.");
                None
            }
        }
    }

    /// Tracks the search box. Emptying it drops the name filter immediately;
    /// any other text waits for [`PageState::commit_search`].
    pub fn set_search_input(&mut self, text: impl Into<String>) -> Option<BackendCommand> {
        self.search_input = text.into();
        if self.search_input.is_empty() {
            Some(self.on_filter_change(""))
        } else {
            None
        }
    }

    pub fn commit_search(&mut self) -> BackendCommand {
        let value = self.search_input.clone();
        self.on_filter_change(&value)
    }

    /// Applies a list response; returns `false` when it belongs to a superseded request.
    pub fn apply_loaded(&mut self, generation: u64, records: Vec<Empresa>, total: u64) -> bool {
        if generation != self.latest_generation {
            return false;
        }
        self.records = records;
        self.total_records = total;
        self.query.total_records = total;
        self.loading = false;
        true
    }

    pub fn apply_failed(&mut self, generation: u64) -> bool {
        if generation != self.latest_generation {
            return false;
        }
        self.loading = false;
        true
    }

    fn sync_page_input(&mut self) {
        self.page_input = self.query.page.to_string();
    }
}

#[cfg(test)]
#[path = "tests/page_state_tests.rs"]
mod tests;
