//! Unit tests for the SqlBuilder query construction.

use sales_dashboard::SqlBuilder;

// ---------------------------------------------------------------------------
// Basic construction
// ---------------------------------------------------------------------------

#[test]
fn new_creates_select_star_from_table() {
    let (sql, params) = SqlBuilder::new("sales").build();
    assert_eq!(sql, "SELECT *\nFROM sales");
    assert!(params.is_empty());
}

#[test]
fn select_replaces_default_star() {
    let (sql, _) = SqlBuilder::new("sales")
        .select(&["Month", "Region"])
        .build();
    assert!(sql.starts_with("SELECT Month, Region\n"));
}

// ---------------------------------------------------------------------------
// WHERE conditions
// ---------------------------------------------------------------------------

#[test]
fn where_in_adds_in_clause() {
    let (sql, params) = SqlBuilder::new("sales")
        .where_in("Category", &["Bars", "Cookies", "Crackers"])
        .build();
    assert!(sql.contains("Category IN (?, ?, ?)"));
    assert_eq!(params, vec!["Bars", "Cookies", "Crackers"]);
}

#[test]
fn where_in_empty_produces_false() {
    let (sql, params) = SqlBuilder::new("sales")
        .where_in("Category", &[])
        .build();
    assert!(sql.contains("WHERE FALSE"));
    assert!(params.is_empty());
}

#[test]
fn where_date_between_binds_both_bounds() {
    let (sql, params) = SqlBuilder::new("sales")
        .where_date_between("Date", "2024-01-01", "2024-01-31")
        .build();
    assert!(sql.contains("WHERE Date BETWEEN CAST(? AS DATE) AND CAST(? AS DATE)"));
    assert_eq!(params, vec!["2024-01-01", "2024-01-31"]);
}

#[test]
fn where_clause_appends_params_in_order() {
    let (sql, params) = SqlBuilder::new("sales")
        .where_date_between("Date", "2024-01-01", "2024-12-31")
        .where_clause("Region = ?", &["East"])
        .build();
    assert!(sql.contains("Region = ?"));
    assert_eq!(params, vec!["2024-01-01", "2024-12-31", "East"]);
}

#[test]
fn multiple_where_clauses_joined_with_and() {
    let (sql, _) = SqlBuilder::new("sales")
        .where_clause("Region = ?", &["East"])
        .where_clause("Product = ?", &["Carrot"])
        .build();
    assert!(sql.contains("WHERE Region = ? AND Product = ?"));
}

// ---------------------------------------------------------------------------
// GROUP BY / ORDER BY / LIMIT
// ---------------------------------------------------------------------------

#[test]
fn group_by_adds_clause() {
    let (sql, _) = SqlBuilder::new("sales")
        .select(&["Month", "Region", "SUM(TotalPrice) AS TotalPrice"])
        .group_by(&["Month", "Region"])
        .build();
    assert!(sql.contains("GROUP BY Month, Region"));
}

#[test]
fn order_by_adds_clause() {
    let (sql, _) = SqlBuilder::new("sales")
        .order_by(&["Month ASC", "TotalPrice DESC"])
        .build();
    assert!(sql.contains("ORDER BY Month ASC, TotalPrice DESC"));
}

// ---------------------------------------------------------------------------
// Combined / chained
// ---------------------------------------------------------------------------

#[test]
fn full_monthly_aggregate_query() {
    let (sql, params) = SqlBuilder::new("sales")
        .select(&["Month", "Category AS GroupKey", "SUM(TotalPrice) AS TotalPrice"])
        .where_date_between("Date", "2024-01-01", "2024-06-30")
        .where_in("Category", &["Bars"])
        .group_by(&["Month", "Category"])
        .order_by(&["Month ASC", "GroupKey ASC"])
        .build();

    assert_eq!(
        sql,
        "SELECT Month, Category AS GroupKey, SUM(TotalPrice) AS TotalPrice\n\
         FROM sales\n\
         WHERE Date BETWEEN CAST(? AS DATE) AND CAST(? AS DATE) AND Category IN (?)\n\
         GROUP BY Month, Category\n\
         ORDER BY Month ASC, GroupKey ASC"
    );
    assert_eq!(params, vec!["2024-01-01", "2024-06-30", "Bars"]);
}
