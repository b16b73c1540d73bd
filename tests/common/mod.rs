//! Shared test fixtures for the sales dashboard integration tests.
//!
//! Provides a small FoodSales-style dataset spanning January–March 2024:
//! twelve products in four categories across two regions. Two of the
//! products (Ginger Snap, Saltine) sell too little to make the top 10.
#![allow(dead_code)]

use chrono::NaiveDate;
use sales_dashboard::{SalesDashboard, SalesRecord};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn record(d: NaiveDate, product: &str, category: &str, region: &str, total: f64) -> SalesRecord {
    SalesRecord::new(d, product, category, region, total)
}

pub fn sample_records() -> Vec<SalesRecord> {
    vec![
        // -- 2024-01 ---------------------------------------------------------
        record(date(2024, 1, 5), "Carrot", "Bars", "East", 100.00),
        record(date(2024, 1, 20), "Carrot", "Bars", "West", 50.00),
        record(date(2024, 1, 10), "Bran", "Bars", "East", 80.00),
        record(date(2024, 1, 15), "Arrowroot", "Cookies", "West", 70.00),
        record(date(2024, 1, 31), "Oatmeal Raisin", "Cookies", "East", 60.00),
        // -- 2024-02 ---------------------------------------------------------
        record(date(2024, 2, 1), "Chocolate Chip", "Cookies", "East", 90.00),
        record(date(2024, 2, 14), "Whole Wheat", "Crackers", "West", 55.50),
        record(date(2024, 2, 29), "Potato Chips", "Snacks", "East", 45.25),
        record(date(2024, 2, 10), "Carrot", "Bars", "East", 20.00),
        // -- 2024-03 ---------------------------------------------------------
        record(date(2024, 3, 3), "Pretzels", "Snacks", "West", 40.00),
        record(date(2024, 3, 15), "Banana", "Bars", "East", 35.00),
        record(date(2024, 3, 20), "Oat, Honey", "Bars", "West", 30.00),
        record(date(2024, 3, 25), "Ginger Snap", "Cookies", "East", 5.00),
        record(date(2024, 3, 31), "Saltine", "Crackers", "West", 4.00),
    ]
}

/// The expected all-time top 10, best seller first.
pub fn expected_top_products() -> Vec<&'static str> {
    vec![
        "Carrot",
        "Chocolate Chip",
        "Bran",
        "Arrowroot",
        "Oatmeal Raisin",
        "Whole Wheat",
        "Potato Chips",
        "Pretzels",
        "Banana",
        "Oat, Honey",
    ]
}

pub fn sample_dashboard() -> SalesDashboard {
    dashboard_from(sample_records())
}

pub fn dashboard_from(records: Vec<SalesRecord>) -> SalesDashboard {
    SalesDashboard::builder().records(records).build().unwrap()
}

/// The whole fixture period.
pub fn full_range() -> (NaiveDate, NaiveDate) {
    (date(2024, 1, 1), date(2024, 3, 31))
}

/// Sum of `TotalPrice` over records in `[start, end]` matching `keep`.
pub fn source_total<F>(records: &[SalesRecord], start: NaiveDate, end: NaiveDate, keep: F) -> f64
where
    F: Fn(&SalesRecord) -> bool,
{
    records
        .iter()
        .filter(|r| r.date >= start && r.date <= end && keep(r))
        .map(|r| r.total_price)
        .sum()
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}
