//! Sales dashboard SDK for Rust.
//!
//! Loads a retail sales table (CSV, parquet, JSON, Excel or in-memory
//! records) into an in-process DuckDB database once, then answers the
//! queries behind an animated dashboard: monthly sales by region, by
//! category, and for the all-time top-10 products, plus a CSV export of the
//! top-products view.
//!
//! # Quick start
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use sales_dashboard::SalesDashboard;
//!
//! let dash = SalesDashboard::builder()
//!     .source("sampledatafoodsales.xlsx")
//!     .build()
//!     .unwrap();
//!
//! let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
//! let end = NaiveDate::from_ymd_opt(2020, 12, 31).unwrap();
//!
//! let by_region = dash.regions().series(start, end).unwrap();
//! let csv = dash.products().export(start, end).unwrap();
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod chart;
pub mod config;
pub mod connection;
pub mod csv_writer;
pub mod error;
pub mod models;
pub mod queries;
pub mod sql_builder;

#[cfg(feature = "async")]
pub use async_client::AsyncSalesDashboard;
pub use chart::ChartFigure;
pub use connection::Connection;
pub use error::{Result, SalesError};
pub use models::{AggregateRow, ChartKind, DatasetSummary, ExportPayload, FilterParams, SalesRecord};
pub use sql_builder::SqlBuilder;

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use config::{DEFAULT_SHEET, SALES_TABLE, TOP_PRODUCT_COUNT};

// ---------------------------------------------------------------------------
// SalesDashboardBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`SalesDashboard`] instance.
///
/// Exactly one data source must be given: a file via
/// [`source()`](Self::source) or rows via [`records()`](Self::records).
pub struct SalesDashboardBuilder {
    source: Option<PathBuf>,
    records: Option<Vec<SalesRecord>>,
    sheet: String,
    top_n: usize,
}

impl Default for SalesDashboardBuilder {
    fn default() -> Self {
        Self {
            source: None,
            records: None,
            sheet: DEFAULT_SHEET.to_string(),
            top_n: TOP_PRODUCT_COUNT,
        }
    }
}

impl SalesDashboardBuilder {
    /// Load the dataset from a file. The format follows the extension:
    /// `.csv`, `.parquet`, `.json`/`.ndjson` or `.xlsx`.
    pub fn source<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.source = Some(path.as_ref().to_path_buf());
        self
    }

    /// Load the dataset from in-memory records.
    pub fn records(mut self, records: Vec<SalesRecord>) -> Self {
        self.records = Some(records);
        self
    }

    /// Worksheet to read from `.xlsx` sources. Defaults to `FoodSales`.
    pub fn sheet(mut self, sheet: &str) -> Self {
        self.sheet = sheet.to_string();
        self
    }

    /// Size of the all-time top-products set. Defaults to 10.
    pub fn top_n(mut self, n: usize) -> Self {
        self.top_n = n;
        self
    }

    /// Build the dashboard, loading and validating the dataset.
    ///
    /// This is the only step that writes to the database; every query
    /// afterwards is read-only.
    pub fn build(self) -> Result<SalesDashboard> {
        if self.top_n == 0 {
            return Err(SalesError::InvalidArgument(
                "top_n must be at least 1".to_string(),
            ));
        }

        let conn = Connection::open_in_memory()?;
        let source = match (self.source, self.records) {
            (Some(path), None) => {
                conn.stage_source(&path, &self.sheet)?;
                path.display().to_string()
            }
            (None, Some(records)) => {
                conn.stage_records(&records)?;
                "<memory>".to_string()
            }
            (None, None) => {
                return Err(SalesError::InvalidArgument(
                    "no data source: call source() or records()".to_string(),
                ))
            }
            (Some(_), Some(_)) => {
                return Err(SalesError::InvalidArgument(
                    "source() and records() are mutually exclusive".to_string(),
                ))
            }
        };

        let record_count = conn.materialize(self.top_n)?;
        log::info!(
            "Loaded {} sales records from {} (top {} products)",
            record_count,
            source,
            self.top_n
        );

        Ok(SalesDashboard {
            conn,
            source,
            top_n: self.top_n,
        })
    }
}

// ---------------------------------------------------------------------------
// SalesDashboard
// ---------------------------------------------------------------------------

/// The main entry point: one loaded, read-only sales dataset.
///
/// Exposes the dashboard views as lightweight borrowing query wrappers.
/// Created via [`SalesDashboard::builder()`].
pub struct SalesDashboard {
    conn: Connection,
    source: String,
    top_n: usize,
}

impl SalesDashboard {
    /// Create a new builder for configuring the dashboard.
    pub fn builder() -> SalesDashboardBuilder {
        SalesDashboardBuilder::default()
    }

    // -- Query accessors ---------------------------------------------------

    /// Access the sales-by-region query interface.
    pub fn regions(&self) -> queries::RegionQuery<'_> {
        queries::RegionQuery::new(&self.conn)
    }

    /// Access the sales-by-category query interface.
    pub fn categories(&self) -> queries::CategoryQuery<'_> {
        queries::CategoryQuery::new(&self.conn)
    }

    /// Access the top-products query interface, including the CSV export.
    pub fn products(&self) -> queries::ProductQuery<'_> {
        queries::ProductQuery::new(&self.conn)
    }

    // -- Dashboard helpers -------------------------------------------------

    /// Record count, date-picker bounds, category options and the top set.
    pub fn summary(&self) -> Result<DatasetSummary> {
        let rows = self.conn.execute(
            &format!(
                "SELECT COUNT(*) AS record_count, MIN(\"Date\") AS first_date, \
                 MAX(\"Date\") AS last_date FROM {}",
                SALES_TABLE
            ),
            &[],
        )?;
        let bounds = rows.into_iter().next().unwrap_or_default();
        let date_at = |key: &str| -> Result<Option<chrono::NaiveDate>> {
            match bounds.get(key).and_then(|v| v.as_str()) {
                Some(text) => Ok(Some(models::parse_date(text)?)),
                None => Ok(None),
            }
        };

        Ok(DatasetSummary {
            record_count: bounds
                .get("record_count")
                .and_then(|v| v.as_i64())
                .unwrap_or(0),
            first_date: date_at("first_date")?,
            last_date: date_at("last_date")?,
            categories: self.categories().list()?,
            top_products: self.products().top_set()?,
        })
    }

    /// Build the chart figure for one view under the given filter.
    ///
    /// For the category view, `params.categories == None` selects every
    /// category in the dataset.
    pub fn chart(&self, kind: ChartKind, params: &FilterParams) -> Result<ChartFigure> {
        let rows = match kind {
            ChartKind::Region => self.regions().series(params.start_date, params.end_date)?,
            ChartKind::Category => {
                let selected = match &params.categories {
                    Some(categories) => categories.clone(),
                    None => self.categories().list()?,
                };
                self.categories()
                    .series(&selected, params.start_date, params.end_date)?
            }
            ChartKind::TopProducts => self.products().series(params.start_date, params.end_date)?,
        };
        Ok(ChartFigure::from_rows(kind, &rows))
    }

    /// Execute a raw SQL query against the loaded dataset.
    ///
    /// Provides escape-hatch access for queries not covered by the views.
    /// Tables: `sales` and `top_products`.
    pub fn sql(
        &self,
        query: &str,
        params: &[String],
    ) -> Result<Vec<HashMap<String, serde_json::Value>>> {
        self.conn.execute(query, params)
    }

    /// Open another handle onto the same loaded dataset, e.g. one per
    /// browser session or worker thread.
    pub fn try_clone(&self) -> Result<Self> {
        Ok(Self {
            conn: self.conn.try_clone()?,
            source: self.source.clone(),
            top_n: self.top_n,
        })
    }

    /// Where the dataset was loaded from (`<memory>` for in-memory records).
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    /// Return a reference to the underlying [`Connection`] for advanced usage.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for SalesDashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SalesDashboard(source={}, top_n={})",
            self.source, self.top_n
        )
    }
}
