//! Per-session view state.

use serde::{Deserialize, Serialize};

use crate::shuffle::DailyOrder;

/// Which screen the session is on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    Catalog,
    Detail,
}

/// Navigation state of one browser session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    pub mode: ViewMode,
    /// Record shown in the detail view.
    pub selected: Option<u64>,
    /// 1-based catalog page.
    pub page: usize,
    /// Search text as last submitted.
    pub last_query: String,
    /// Catalog order for the current day, computed on first catalog render.
    #[serde(skip)]
    pub daily_order: Option<DailyOrder>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            mode: ViewMode::Catalog,
            selected: None,
            page: 1,
            last_query: String::new(),
            daily_order: None,
        }
    }
}

impl ViewState {
    /// Store a new query. A changed query sends the catalog back to page 1.
    ///
    /// Returns true when the query changed.
    pub fn set_query(&mut self, raw: &str) -> bool {
        if self.last_query == raw {
            return false;
        }
        self.last_query = raw.to_string();
        self.page = 1;
        true
    }
}
