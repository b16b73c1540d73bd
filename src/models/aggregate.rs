use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ChartKind — The three fixed dashboard views
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Region,
    Category,
    TopProducts,
}

impl ChartKind {
    pub const ALL: [ChartKind; 3] = [ChartKind::Region, ChartKind::Category, ChartKind::TopProducts];

    /// The `sales` column whose values become the bars of this chart.
    pub fn group_column(&self) -> &'static str {
        match self {
            Self::Region => "Region",
            Self::Category => "Category",
            Self::TopProducts => "Product",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Region => "Sales by Region Over Time",
            Self::Category => "Sales by Category Over Time",
            Self::TopProducts => "Top 10 Products by Sales Over Time",
        }
    }
}

// ---------------------------------------------------------------------------
// AggregateRow — One (Month, group) total (query result)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AggregateRow {
    pub month: String,
    /// Region, Category or Product, depending on the chart kind.
    pub group_key: String,
    pub total_price: f64,
}
