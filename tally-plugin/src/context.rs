//! Conversion Context

use chrono::{Local, NaiveDate};

/// Ambient inputs a converter may read besides its fields
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertContext {
    /// The date age calculations count up to
    pub today: NaiveDate,
}

impl ConvertContext {
    /// Context pinned to the local calendar date
    pub fn new() -> Self {
        Self { today: Local::now().date_naive() }
    }

    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }
}

impl Default for ConvertContext {
    fn default() -> Self {
        Self::new()
    }
}
