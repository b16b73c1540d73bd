//! Sales-by-region series.

use chrono::NaiveDate;

use crate::connection::Connection;
use crate::error::Result;
use crate::models::{AggregateRow, ChartKind};

use super::{monthly_totals, Selection};

/// Query interface for the region view.
pub struct RegionQuery<'a> {
    conn: &'a Connection,
}

impl<'a> RegionQuery<'a> {
    /// Create a new `RegionQuery` bound to the given connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Monthly totals per region for records dated within `[start, end]`.
    ///
    /// Rows are ordered by month, then region name, which is the frame order
    /// the animated chart steps through. An inverted range yields no rows.
    pub fn series(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<AggregateRow>> {
        monthly_totals(
            self.conn,
            ChartKind::Region,
            Selection::All,
            start,
            end,
            &["Month ASC", "GroupKey ASC"],
        )
    }
}
