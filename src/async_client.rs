//! Async wrapper around [`SalesDashboard`] for use in async runtimes (Tokio, etc.).
//!
//! Runs all dashboard operations on a blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free.
//!
//! # Example
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use sales_dashboard::AsyncSalesDashboard;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let dash = AsyncSalesDashboard::builder()
//!         .source("sales.csv")
//!         .build()
//!         .await
//!         .unwrap();
//!
//!     let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
//!     let end = NaiveDate::from_ymd_opt(2020, 12, 31).unwrap();
//!     let rows = dash.region_series(start, end).await.unwrap();
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

use crate::config::{DEFAULT_SHEET, TOP_PRODUCT_COUNT};
use crate::error::{Result, SalesError};
use crate::models::{AggregateRow, ExportPayload, SalesRecord};
use crate::SalesDashboard;

// ---------------------------------------------------------------------------
// AsyncSalesDashboardBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncSalesDashboard`] instance.
pub struct AsyncSalesDashboardBuilder {
    source: Option<PathBuf>,
    records: Option<Vec<SalesRecord>>,
    sheet: String,
    top_n: usize,
}

impl Default for AsyncSalesDashboardBuilder {
    fn default() -> Self {
        Self {
            source: None,
            records: None,
            sheet: DEFAULT_SHEET.to_string(),
            top_n: TOP_PRODUCT_COUNT,
        }
    }
}

impl AsyncSalesDashboardBuilder {
    /// Load the dataset from a file.
    pub fn source<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.source = Some(path.as_ref().to_path_buf());
        self
    }

    /// Load the dataset from in-memory records.
    pub fn records(mut self, records: Vec<SalesRecord>) -> Self {
        self.records = Some(records);
        self
    }

    /// Worksheet to read from `.xlsx` sources.
    pub fn sheet(mut self, sheet: &str) -> Self {
        self.sheet = sheet.to_string();
        self
    }

    /// Size of the all-time top-products set.
    pub fn top_n(mut self, n: usize) -> Self {
        self.top_n = n;
        self
    }

    /// Build the async dashboard.
    ///
    /// Loading runs on the blocking thread pool so it won't block the async
    /// event loop.
    pub async fn build(self) -> Result<AsyncSalesDashboard> {
        tokio::task::spawn_blocking(move || {
            let mut builder = SalesDashboard::builder()
                .sheet(&self.sheet)
                .top_n(self.top_n);
            if let Some(path) = self.source {
                builder = builder.source(path);
            }
            if let Some(records) = self.records {
                builder = builder.records(records);
            }
            let dash = builder.build()?;
            Ok(AsyncSalesDashboard {
                inner: Arc::new(Mutex::new(dash)),
            })
        })
        .await
        .map_err(|e| SalesError::InvalidArgument(format!("Task join error: {e}")))?
    }
}

// ---------------------------------------------------------------------------
// AsyncSalesDashboard
// ---------------------------------------------------------------------------

/// Async wrapper around [`SalesDashboard`].
///
/// All operations are dispatched to a blocking thread pool via
/// [`tokio::task::spawn_blocking`]. The underlying DuckDB connection is not
/// `Sync`, so the dashboard sits behind a [`Mutex`].
#[derive(Clone)]
pub struct AsyncSalesDashboard {
    inner: Arc<Mutex<SalesDashboard>>,
}

impl AsyncSalesDashboard {
    /// Create a new builder for configuring the async dashboard.
    pub fn builder() -> AsyncSalesDashboardBuilder {
        AsyncSalesDashboardBuilder::default()
    }

    /// Run a sync dashboard operation on the blocking thread pool.
    ///
    /// The closure receives an `&SalesDashboard` reference and should return
    /// a `Result<T>`.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&SalesDashboard) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let dash = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let guard = dash
                .lock()
                .map_err(|_| SalesError::InvalidArgument("dashboard lock poisoned".into()))?;
            f(&guard)
        })
        .await
        .map_err(|e| SalesError::InvalidArgument(format!("Task join error: {e}")))?
    }

    pub async fn region_series(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<AggregateRow>> {
        self.run(move |d| d.regions().series(start, end)).await
    }

    pub async fn category_series(
        &self,
        categories: Vec<String>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<AggregateRow>> {
        self.run(move |d| d.categories().series(&categories, start, end))
            .await
    }

    pub async fn top_products_series(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<AggregateRow>> {
        self.run(move |d| d.products().series(start, end)).await
    }

    pub async fn export_top_products(&self, start: NaiveDate, end: NaiveDate) -> Result<ExportPayload> {
        self.run(move |d| d.products().export(start, end)).await
    }
}
