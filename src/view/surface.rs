//! Rendering boundary.
//!
//! The pipeline never touches the DOM. It reports what to show through
//! [`ViewSurface`]; a host renders it however it likes.

use crate::domain::DataKind;
use crate::view::reconcile::PaginationView;
use crate::view::series::Chart;
use crate::view::state::ViewState;

/// A record that can be shown as one table row.
pub trait TableRow {
    /// Column headers, in display order.
    fn columns() -> &'static [&'static str];
    /// Display strings, one per column.
    fn cells(&self) -> Vec<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    /// A failed fetch.
    Error,
    /// An empty result; not a failure.
    Info,
}

/// A message shown in place of the table or chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub kind: BannerKind,
    pub message: String,
}

impl Banner {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Info,
            message: message.into(),
        }
    }
}

/// Everything the pipeline asks the page to display.
///
/// Showing a banner hides the table and the chart; rendering either one
/// hides the banner.
pub trait ViewSurface<K: DataKind> {
    /// Show the loading indicator. Called once per issued request.
    ///
    /// Loading is a single flag, not a counter: overlapping requests call this
    /// several times, but [`end_loading`](Self::end_loading) follows only when
    /// the newest request settles. Superseded requests never end loading.
    fn begin_loading(&self);

    /// Hide the loading indicator, whatever number of `begin_loading` calls
    /// preceded it.
    fn end_loading(&self);

    /// Reflect `state` in the selectors and mode toggles.
    fn sync_controls(&self, state: &ViewState<K>);

    fn render_table(&self, records: &[K::Record]);

    fn set_pagination(&self, view: &PaginationView);

    fn render_chart(&self, chart: &Chart);

    fn show_banner(&self, banner: &Banner);
}
