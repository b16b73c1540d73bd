//! DuckDB connection wrapper: dataset ingestion and query execution.
//!
//! A source is first materialized into a staging table, validated, then
//! rewritten into the typed `sales` table with its derived `Month` column.
//! The all-time top products are computed in the same step and never change
//! afterwards, so every query after load is read-only.

use std::collections::HashMap;
use std::path::Path;

use chrono::NaiveDate;
use duckdb::{types::ValueRef, Connection as DuckDbConnection};
use serde::de::DeserializeOwned;

use crate::config::{
    SourceFormat, AMOUNT_TYPE, RAW_TABLE, REQUIRED_COLUMNS, SALES_TABLE, TOP_PRODUCTS_TABLE,
};
use crate::error::{Result, SalesError};
use crate::models::SalesRecord;

/// Wraps a DuckDB connection holding one loaded sales dataset.
pub struct Connection {
    conn: DuckDbConnection,
}

impl Connection {
    /// Open an empty in-memory DuckDB database.
    pub fn open_in_memory() -> Result<Self> {
        let conn = DuckDbConnection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Open a second connection onto the same in-memory database.
    ///
    /// Each session gets its own handle; the tables are never written after
    /// load, so readers do not contend.
    pub fn try_clone(&self) -> Result<Self> {
        Ok(Self {
            conn: self.conn.try_clone()?,
        })
    }

    /// Stage a file source into the raw table.
    ///
    /// The format is chosen from the file extension. `.xlsx` files need the
    /// DuckDB `excel` extension, which is installed on first use.
    pub fn stage_source(&self, path: &Path, sheet: &str) -> Result<()> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let format = SourceFormat::from_extension(ext)
            .ok_or_else(|| SalesError::UnsupportedSource(path.display().to_string()))?;
        if !path.exists() {
            return Err(SalesError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("sales source not found: {}", path.display()),
            )));
        }

        if format == SourceFormat::Xlsx {
            self.conn.execute_batch("INSTALL excel; LOAD excel;")?;
        }

        let path_str = path.to_string_lossy();
        self.conn.execute_batch(&format!(
            "DROP TABLE IF EXISTS {}; CREATE TABLE {} AS SELECT * FROM {}",
            RAW_TABLE,
            RAW_TABLE,
            format.reader_sql(&path_str, sheet)
        ))?;
        log::debug!("Staged {:?} source: {}", format, path_str);
        Ok(())
    }

    /// Stage in-memory records into the raw table.
    ///
    /// Values go in as text so they pass through the same validation and
    /// casts as file sources.
    pub fn stage_records(&self, records: &[SalesRecord]) -> Result<()> {
        self.conn.execute_batch(&format!(
            "DROP TABLE IF EXISTS {}; \
             CREATE TABLE {} (\"Date\" VARCHAR, Product VARCHAR, Category VARCHAR, \
             Region VARCHAR, TotalPrice VARCHAR)",
            RAW_TABLE, RAW_TABLE
        ))?;

        let mut appender = self.conn.appender(RAW_TABLE)?;
        for record in records {
            let date = record.date.format("%Y-%m-%d").to_string();
            let amount = record.total_price.to_string();
            appender.append_row(duckdb::params![
                date,
                record.product,
                record.category,
                record.region,
                amount
            ])?;
        }
        appender.flush()?;
        log::debug!("Staged {} in-memory records", records.len());
        Ok(())
    }

    /// Validate the staged rows and build the `sales` and `top_products` tables.
    ///
    /// Returns the number of loaded records. Fails with `MissingField` when a
    /// required column is absent and `MalformedRecords` when any row has an
    /// unparseable date, an empty text field, or a null, non-finite or
    /// negative amount.
    pub fn materialize(&self, top_n: usize) -> Result<i64> {
        let cols = self.resolve_columns()?;
        let date = quote(&cols["Date"]);
        let product = quote(&cols["Product"]);
        let category = quote(&cols["Category"]);
        let region = quote(&cols["Region"]);
        let amount = quote(&cols["TotalPrice"]);

        let date_expr = format!("CAST(TRY_CAST({} AS TIMESTAMP) AS DATE)", date);
        let amount_expr = format!("TRY_CAST({} AS {})", amount, AMOUNT_TYPE);
        let blank = |col: &str| format!("NULLIF(TRIM(CAST({} AS VARCHAR)), '') IS NULL", col);

        let bad_rows = self
            .execute_scalar(
                &format!(
                    "SELECT COUNT(*) FROM {} WHERE {} IS NULL OR {} OR {} OR {} \
                     OR {} IS NULL OR NOT isfinite({}) OR {} < 0",
                    RAW_TABLE,
                    date_expr,
                    blank(product.as_str()),
                    blank(category.as_str()),
                    blank(region.as_str()),
                    amount_expr,
                    amount_expr,
                    amount_expr
                ),
                &[],
            )?
            .and_then(|v| v.as_i64())
            .unwrap_or(0);
        if bad_rows > 0 {
            log::warn!("Rejected sales source: {} malformed row(s)", bad_rows);
            return Err(SalesError::MalformedRecords { count: bad_rows });
        }

        self.conn.execute_batch(&format!(
            "CREATE OR REPLACE TABLE {sales} AS \
             SELECT {date_expr} AS \"Date\", \
                    CAST({product} AS VARCHAR) AS Product, \
                    CAST({category} AS VARCHAR) AS Category, \
                    CAST({region} AS VARCHAR) AS Region, \
                    {amount_expr} AS TotalPrice, \
                    strftime({date_expr}, '%Y-%m') AS Month \
             FROM {raw}; \
             DROP TABLE {raw}; \
             CREATE OR REPLACE TABLE {top} AS \
             SELECT Product, SUM(TotalPrice) AS LifetimeTotal \
             FROM {sales} \
             GROUP BY Product \
             ORDER BY LifetimeTotal DESC, Product ASC \
             LIMIT {top_n};",
            sales = SALES_TABLE,
            raw = RAW_TABLE,
            top = TOP_PRODUCTS_TABLE,
        ))?;

        let count = self
            .execute_scalar(&format!("SELECT COUNT(*) FROM {}", SALES_TABLE), &[])?
            .and_then(|v| v.as_i64())
            .unwrap_or(0);
        Ok(count)
    }

    /// Execute SQL and return results as a `Vec` of `HashMap`s.
    ///
    /// Each row is represented as a `HashMap<String, serde_json::Value>`.
    /// Dates come back as `YYYY-MM-DD` strings.
    pub fn execute(
        &self,
        sql: &str,
        params: &[String],
    ) -> Result<Vec<HashMap<String, serde_json::Value>>> {
        let mut stmt = self.conn.prepare(sql)?;

        let param_values: Vec<&dyn duckdb::ToSql> = params
            .iter()
            .map(|p| p as &dyn duckdb::ToSql)
            .collect();

        let mut rows_result = stmt.query(param_values.as_slice())?;

        // Column metadata is only available after execution
        let (column_names, column_count) = {
            let executed = rows_result
                .as_ref()
                .ok_or_else(|| SalesError::InvalidArgument("statement was not executed".into()))?;
            let names: Vec<String> = executed
                .column_names()
                .into_iter()
                .map(|s| s.to_string())
                .collect();
            (names, executed.column_count())
        };

        let mut out: Vec<HashMap<String, serde_json::Value>> = Vec::new();

        while let Some(row) = rows_result.next()? {
            let mut map = HashMap::with_capacity(column_count);
            for (i, col_name) in column_names.iter().enumerate() {
                let value = convert_value_ref(row.get_ref(i)?);
                map.insert(col_name.clone(), value);
            }
            out.push(map);
        }

        Ok(out)
    }

    /// Execute SQL and deserialize each row into type `T`.
    pub fn execute_into<T: DeserializeOwned>(
        &self,
        sql: &str,
        params: &[String],
    ) -> Result<Vec<T>> {
        let rows = self.execute(sql, params)?;
        let mut results = Vec::with_capacity(rows.len());
        for row in rows {
            let value = serde_json::Value::Object(
                row.into_iter().collect::<serde_json::Map<String, serde_json::Value>>(),
            );
            let item: T = serde_json::from_value(value)?;
            results.push(item);
        }
        Ok(results)
    }

    /// Execute SQL and return the first column of the first row.
    ///
    /// Returns `None` if the result set is empty.
    pub fn execute_scalar(
        &self,
        sql: &str,
        params: &[String],
    ) -> Result<Option<serde_json::Value>> {
        let mut stmt = self.conn.prepare(sql)?;
        let param_values: Vec<&dyn duckdb::ToSql> = params
            .iter()
            .map(|p| p as &dyn duckdb::ToSql)
            .collect();

        let mut rows = stmt.query(param_values.as_slice())?;

        if let Some(row) = rows.next()? {
            Ok(Some(convert_value_ref(row.get_ref(0)?)))
        } else {
            Ok(None)
        }
    }

    /// Execute SQL and collect the first column of every row as strings.
    pub fn execute_column(&self, sql: &str, params: &[String]) -> Result<Vec<String>> {
        let rows = self.execute(sql, params)?;
        Ok(rows
            .into_iter()
            .filter_map(|row| row.into_values().next())
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect())
    }

    /// Check whether a table exists in the database.
    pub fn has_table(&self, name: &str) -> Result<bool> {
        let found = self.execute_scalar(
            "SELECT COUNT(*) FROM information_schema.tables WHERE table_name = ?",
            &[name.to_string()],
        )?;
        Ok(found.and_then(|v| v.as_i64()).unwrap_or(0) > 0)
    }

    /// Map each required column to the staged column of the same name,
    /// compared case-insensitively.
    fn resolve_columns(&self) -> Result<HashMap<&'static str, String>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT column_name FROM (DESCRIBE {})", RAW_TABLE))?;
        let mut rows = stmt.query([])?;
        let mut present: Vec<String> = Vec::new();
        while let Some(row) = rows.next()? {
            present.push(row.get(0)?);
        }

        let mut resolved = HashMap::new();
        for required in REQUIRED_COLUMNS {
            let actual = present
                .iter()
                .find(|c| c.trim().eq_ignore_ascii_case(required))
                .ok_or_else(|| SalesError::MissingField(required.to_string()))?;
            resolved.insert(required, actual.clone());
        }
        Ok(resolved)
    }
}

fn quote(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Convert a DuckDB `ValueRef` to a `serde_json::Value`.
fn convert_value_ref(val: ValueRef<'_>) -> serde_json::Value {
    match val {
        ValueRef::Null => serde_json::Value::Null,
        ValueRef::Boolean(b) => serde_json::Value::Bool(b),
        ValueRef::TinyInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::SmallInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::Int(n) => serde_json::Value::Number(n.into()),
        ValueRef::BigInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::HugeInt(n) => {
            // HugeInt may not fit in i64; try i64, fallback to string
            if let Ok(i) = i64::try_from(n) {
                serde_json::Value::Number(i.into())
            } else {
                serde_json::Value::String(n.to_string())
            }
        }
        ValueRef::Float(f) => serde_json::Number::from_f64(f as f64)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        ValueRef::Double(f) => serde_json::Number::from_f64(f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        ValueRef::Text(bytes) => serde_json::Value::String(String::from_utf8_lossy(bytes).to_string()),
        ValueRef::Date32(days) => date_from_epoch_days(days)
            .map(|d| serde_json::Value::String(d.format("%Y-%m-%d").to_string()))
            .unwrap_or(serde_json::Value::Null),
        // Amounts and other types are cast to DOUBLE/VARCHAR in SQL before reading
        _ => serde_json::Value::Null,
    }
}

/// Days since 1970-01-01 (DuckDB's DATE representation) to a calendar date.
fn date_from_epoch_days(days: i32) -> Option<NaiveDate> {
    const UNIX_EPOCH_FROM_CE: i32 = 719_163;
    days.checked_add(UNIX_EPOCH_FROM_CE)
        .and_then(NaiveDate::from_num_days_from_ce_opt)
}
