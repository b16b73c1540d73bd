/// Table holding the validated, typed sales records.
pub const SALES_TABLE: &str = "sales";

/// Staging table the raw source is materialized into before validation.
pub const RAW_TABLE: &str = "raw_sales";

/// Table holding the all-time top products, computed once at load.
pub const TOP_PRODUCTS_TABLE: &str = "top_products";

/// Number of products in the all-time top set.
pub const TOP_PRODUCT_COUNT: usize = 10;

/// Columns every source must provide. Matched case-insensitively.
pub const REQUIRED_COLUMNS: [&str; 5] = ["Date", "Product", "Category", "Region", "TotalPrice"];

/// Storage type for amounts. Stored at full precision, never rounded.
pub const AMOUNT_TYPE: &str = "DOUBLE";

/// Worksheet read from `.xlsx` sources when none is configured.
pub const DEFAULT_SHEET: &str = "FoodSales";

pub const EXPORT_FILE_NAME: &str = "animated_top10_products.csv";
pub const EXPORT_MIME_TYPE: &str = "text/csv";
pub const EXPORT_HEADER: [&str; 3] = ["Month", "Product", "TotalPrice"];

/// Headroom above the tallest bar on the value axis.
pub const AXIS_HEADROOM: f64 = 1.1;

/// Data source formats the loader knows how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Parquet,
    Json,
    Xlsx,
}

impl SourceFormat {
    /// Detect the format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" | "tsv" | "txt" => Some(Self::Csv),
            "parquet" => Some(Self::Parquet),
            "json" | "ndjson" | "jsonl" => Some(Self::Json),
            "xlsx" => Some(Self::Xlsx),
            _ => None,
        }
    }

    /// DuckDB table function expression reading `path` in this format.
    pub fn reader_sql(&self, path: &str, sheet: &str) -> String {
        let path = path.replace('\\', "/").replace('\'', "''");
        match self {
            Self::Csv => format!("read_csv_auto('{}', header = true)", path),
            Self::Parquet => format!("read_parquet('{}')", path),
            Self::Json => format!("read_json_auto('{}')", path),
            Self::Xlsx => format!(
                "read_xlsx('{}', sheet = '{}', header = true)",
                path,
                sheet.replace('\'', "''")
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_formats_from_extension() {
        assert_eq!(SourceFormat::from_extension("CSV"), Some(SourceFormat::Csv));
        assert_eq!(SourceFormat::from_extension("parquet"), Some(SourceFormat::Parquet));
        assert_eq!(SourceFormat::from_extension("ndjson"), Some(SourceFormat::Json));
        assert_eq!(SourceFormat::from_extension("xlsx"), Some(SourceFormat::Xlsx));
        assert_eq!(SourceFormat::from_extension("xls"), None);
    }

    #[test]
    fn reader_sql_escapes_quotes_and_backslashes() {
        let sql = SourceFormat::Csv.reader_sql("C:\\data\\o'brien.csv", DEFAULT_SHEET);
        assert_eq!(sql, "read_csv_auto('C:/data/o''brien.csv', header = true)");

        let sql = SourceFormat::Xlsx.reader_sql("sales.xlsx", "FoodSales");
        assert!(sql.contains("sheet = 'FoodSales'"));
    }
}
