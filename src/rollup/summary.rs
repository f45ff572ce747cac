use serde::{Deserialize, Serialize};

/// Counters describing one reformat pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollupSummary {
    pub records_read: usize,
    /// Dated today or later.
    pub skipped_not_before_today: usize,
    /// Already carried an `all` facet value.
    pub skipped_rollup_rows: usize,
    pub records_accumulated: usize,
    /// Accumulated records whose geo folded into `Other`.
    pub other_geo: usize,
    /// Accumulated records whose channel folded into `Other`.
    pub other_channel: usize,
    pub cells: usize,
}

impl RollupSummary {
    pub fn records_skipped(&self) -> usize {
        self.skipped_not_before_today + self.skipped_rollup_rows
    }
}
