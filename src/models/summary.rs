use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DatasetSummary — Date-picker bounds and selector options
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub record_count: i64,
    /// `None` when the dataset is empty.
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    pub categories: Vec<String>,
    /// All-time top products, best seller first.
    pub top_products: Vec<String>,
}
