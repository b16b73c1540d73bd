//! Query modules for the sales dashboard.
//!
//! Each module provides a query struct that borrows from a
//! [`Connection`](crate::connection::Connection) and exposes methods
//! returning `Result<T>` with typed rows. All of them are read-only over the
//! loaded dataset.

pub mod categories;
pub mod products;
pub mod regions;

pub use categories::CategoryQuery;
pub use products::ProductQuery;
pub use regions::RegionQuery;

use chrono::NaiveDate;

use crate::config::{SALES_TABLE, TOP_PRODUCTS_TABLE};
use crate::connection::Connection;
use crate::error::Result;
use crate::models::{AggregateRow, ChartKind};
use crate::sql_builder::SqlBuilder;

/// Row filter applied before grouping.
pub(crate) enum Selection<'s> {
    All,
    Categories(&'s [&'s str]),
    TopProducts,
}

/// Sum `TotalPrice` per `(Month, group)` for records dated within `[start, end]`.
///
/// `order` is the ORDER BY list; it may use `Month`, the `GroupKey` alias
/// and `SUM(TotalPrice)`.
pub(crate) fn monthly_totals(
    conn: &Connection,
    kind: ChartKind,
    selection: Selection<'_>,
    start: NaiveDate,
    end: NaiveDate,
    order: &[&str],
) -> Result<Vec<AggregateRow>> {
    let group_col = kind.group_column();
    let group_select = format!("{} AS GroupKey", group_col);
    let start = start.format("%Y-%m-%d").to_string();
    let end = end.format("%Y-%m-%d").to_string();

    let mut builder = SqlBuilder::new(SALES_TABLE);
    builder
        .select(&[
            "Month",
            group_select.as_str(),
            "CAST(SUM(TotalPrice) AS DOUBLE) AS TotalPrice",
        ])
        .where_date_between("\"Date\"", &start, &end);

    let top_filter = format!("Product IN (SELECT Product FROM {})", TOP_PRODUCTS_TABLE);
    match selection {
        Selection::All => {}
        Selection::Categories(categories) => {
            builder.where_in("Category", categories);
        }
        Selection::TopProducts => {
            builder.where_clause(&top_filter, &[]);
        }
    }

    let (sql, params) = builder
        .group_by(&["Month", group_col])
        .order_by(order)
        .build();

    let rows: Vec<AggregateRow> = conn.execute_into(&sql, &params)?;
    log::debug!(
        "{:?} series {}..={}: {} row(s)",
        kind,
        start,
        end,
        rows.len()
    );
    Ok(rows)
}
