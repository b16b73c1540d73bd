//! Sales-by-category series and the category selector options.

use chrono::NaiveDate;

use crate::config::SALES_TABLE;
use crate::connection::Connection;
use crate::error::Result;
use crate::models::{AggregateRow, ChartKind};
use crate::sql_builder::SqlBuilder;

use super::{monthly_totals, Selection};

/// Query interface for the category view.
pub struct CategoryQuery<'a> {
    conn: &'a Connection,
}

impl<'a> CategoryQuery<'a> {
    /// Create a new `CategoryQuery` bound to the given connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Every distinct category in the dataset, name ascending.
    ///
    /// This is the default selection when the user has not picked any.
    pub fn list(&self) -> Result<Vec<String>> {
        let (sql, params) = SqlBuilder::new(SALES_TABLE)
            .select(&["DISTINCT Category"])
            .order_by(&["Category ASC"])
            .build();
        self.conn.execute_column(&sql, &params)
    }

    /// Monthly totals per category, restricted to `categories`.
    ///
    /// An empty `categories` slice selects nothing and yields no rows; callers
    /// wanting every category pass [`list()`](Self::list).
    pub fn series<S: AsRef<str>>(
        &self,
        categories: &[S],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<AggregateRow>> {
        let selected: Vec<&str> = categories.iter().map(|c| c.as_ref()).collect();
        monthly_totals(
            self.conn,
            ChartKind::Category,
            Selection::Categories(&selected),
            start,
            end,
            &["Month ASC", "GroupKey ASC"],
        )
    }
}
