//! Applies a successful table response back into view state.

use crate::domain::{DataKind, PageResult};
use crate::view::state::ViewState;
use serde::Serialize;

/// Pagination controls derived from the last applied page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationView {
    pub current_page: u32,
    pub total_pages: u32,
    pub previous_visible: bool,
    pub next_visible: bool,
}

impl PaginationView {
    pub fn new(current_page: u32, total_pages: u32) -> Self {
        Self {
            current_page,
            total_pages,
            previous_visible: current_page > 1,
            next_visible: current_page < total_pages,
        }
    }

    /// `0 / 0` with both controls hidden.
    pub fn empty() -> Self {
        Self::new(0, 0)
    }
}

pub struct ResultReconciler;

impl ResultReconciler {
    /// Make the server's page, rows-per-page and echoed filters authoritative.
    pub fn apply<K: DataKind>(
        kind: &K,
        state: &mut ViewState<K>,
        page: &PageResult<K::Record>,
    ) -> PaginationView {
        state.confirm_page(page.current_page);
        if let Some(rows) = page.echo.rows_per_page {
            state.confirm_rows_per_page(rows);
        }
        kind.apply_echo(state.filters_mut(), &page.echo);

        tracing::debug!(
            kind = kind.name(),
            page = state.current_page(),
            total = page.total_pages,
            records = page.records.len(),
            "Reconciled table page"
        );
        PaginationView::new(state.current_page(), page.total_pages)
    }
}
