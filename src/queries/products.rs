//! Top-products series and its CSV export.
//!
//! The top set is fixed when the dataset is loaded: the products with the
//! greatest all-time sales, ties at the cut-off going to the product name
//! that sorts first. Date filters never change which products are in it.

use chrono::NaiveDate;

use crate::config::{EXPORT_HEADER, TOP_PRODUCTS_TABLE};
use crate::connection::Connection;
use crate::csv_writer;
use crate::error::{Result, SalesError};
use crate::models::{AggregateRow, ChartKind, ExportPayload};
use crate::sql_builder::SqlBuilder;

use super::{monthly_totals, Selection};

/// Query interface for the top-products view.
pub struct ProductQuery<'a> {
    conn: &'a Connection,
}

impl<'a> ProductQuery<'a> {
    /// Create a new `ProductQuery` bound to the given connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// The all-time top products, best seller first.
    pub fn top_set(&self) -> Result<Vec<String>> {
        let (sql, params) = SqlBuilder::new(TOP_PRODUCTS_TABLE)
            .select(&["Product"])
            .order_by(&["LifetimeTotal DESC", "Product ASC"])
            .build();
        self.conn.execute_column(&sql, &params)
    }

    /// Monthly totals per top product for records dated within `[start, end]`.
    ///
    /// Within a month the largest total comes first so a horizontal bar
    /// chart draws its biggest bar on top.
    pub fn series(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<AggregateRow>> {
        monthly_totals(
            self.conn,
            ChartKind::TopProducts,
            Selection::TopProducts,
            start,
            end,
            &["Month ASC", "SUM(TotalPrice) DESC", "GroupKey ASC"],
        )
    }

    /// The same totals as [`series()`](Self::series) as a downloadable CSV.
    ///
    /// Header `Month,Product,TotalPrice`, rows ordered by month then product.
    /// A range with no matching sales produces the header line only.
    pub fn export(&self, start: NaiveDate, end: NaiveDate) -> Result<ExportPayload> {
        let rows = monthly_totals(
            self.conn,
            ChartKind::TopProducts,
            Selection::TopProducts,
            start,
            end,
            &["Month ASC", "GroupKey ASC"],
        )?;

        let mut wtr = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());
        wtr.write_record(EXPORT_HEADER)?;
        for row in &rows {
            wtr.write_record([
                row.month.as_str(),
                row.group_key.as_str(),
                csv_writer::format_amount(row.total_price).as_str(),
            ])?;
        }
        let bytes = wtr.into_inner().map_err(|e| SalesError::Io(e.into_error()))?;
        let content = String::from_utf8(bytes)
            .map_err(|e| SalesError::InvalidArgument(format!("export is not UTF-8: {e}")))?;
        log::info!("Exported top products {}..={} ({} bytes)", start, end, content.len());
        Ok(ExportPayload::csv(content))
    }
}
