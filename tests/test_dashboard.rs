//! Dashboard-level tests: summary, chart figures, cloned handles.

mod common;

use common::{date, expected_top_products, full_range};
use sales_dashboard::chart::Orientation;
use sales_dashboard::{ChartKind, FilterParams};

// ---------------------------------------------------------------------------
// summary
// ---------------------------------------------------------------------------

#[test]
fn summary_describes_dataset() {
    let dash = common::sample_dashboard();

    let summary = dash.summary().unwrap();
    assert_eq!(summary.record_count, 14);
    assert_eq!(summary.first_date, Some(date(2024, 1, 5)));
    assert_eq!(summary.last_date, Some(date(2024, 3, 31)));
    assert_eq!(summary.categories, vec!["Bars", "Cookies", "Crackers", "Snacks"]);
    assert_eq!(summary.top_products, expected_top_products());
}

// ---------------------------------------------------------------------------
// chart
// ---------------------------------------------------------------------------

#[test]
fn region_chart_has_one_frame_per_month() {
    let dash = common::sample_dashboard();
    let (start, end) = full_range();

    let fig = dash
        .chart(ChartKind::Region, &FilterParams::new(start, end))
        .unwrap();
    assert_eq!(fig.title, "Sales by Region Over Time");
    assert_eq!(fig.orientation, Orientation::Vertical);
    let months: Vec<&str> = fig.frames.iter().map(|f| f.month.as_str()).collect();
    assert_eq!(months, vec!["2024-01", "2024-02", "2024-03"]);
    assert_eq!(fig.frames[0].bars.len(), 2);
    common::assert_close(fig.value_range[1], 240.0 * 1.1);
}

#[test]
fn category_chart_defaults_to_all_categories() {
    let dash = common::sample_dashboard();
    let (start, end) = full_range();

    let all = dash
        .chart(ChartKind::Category, &FilterParams::new(start, end))
        .unwrap();
    let bars: usize = all.frames.iter().map(|f| f.bars.len()).sum();
    assert_eq!(bars, 10);

    let only_bars = dash
        .chart(
            ChartKind::Category,
            &FilterParams::new(start, end).with_categories(&["Bars"]),
        )
        .unwrap();
    assert!(only_bars
        .frames
        .iter()
        .all(|f| f.bars.iter().all(|b| b.label == "Bars")));
}

#[test]
fn category_chart_with_empty_selection_is_empty() {
    let dash = common::sample_dashboard();
    let (start, end) = full_range();
    let none: [&str; 0] = [];

    let fig = dash
        .chart(
            ChartKind::Category,
            &FilterParams::new(start, end).with_categories(&none),
        )
        .unwrap();
    assert!(fig.is_empty());
    assert_eq!(fig.value_range, [0.0, 1.0]);
}

#[test]
fn top_products_chart_is_horizontal_largest_first() {
    let dash = common::sample_dashboard();
    let (start, end) = full_range();

    let fig = dash
        .chart(ChartKind::TopProducts, &FilterParams::new(start, end))
        .unwrap();
    assert_eq!(fig.orientation, Orientation::Horizontal);
    for frame in &fig.frames {
        for pair in frame.bars.windows(2) {
            assert!(pair[0].value >= pair[1].value);
        }
    }
    assert_eq!(fig.frames[0].bars[0].label, "Carrot");
}

#[test]
fn empty_range_charts_do_not_divide_by_zero() {
    let dash = common::sample_dashboard();
    let params = FilterParams::parse("2019-01-01", "2019-12-31").unwrap();

    for kind in ChartKind::ALL {
        let fig = dash.chart(kind, &params).unwrap();
        assert!(fig.is_empty());
        assert_eq!(fig.value_range, [0.0, 1.0]);
        assert!(fig.value_range[1].is_finite());
    }
}

// ---------------------------------------------------------------------------
// Handles
// ---------------------------------------------------------------------------

#[test]
fn cloned_handles_read_concurrently() {
    let dash = common::sample_dashboard();
    let (start, end) = full_range();
    let expected = dash.regions().series(start, end).unwrap();

    let workers: Vec<_> = (0..4)
        .map(|_| {
            let handle = dash.try_clone().unwrap();
            std::thread::spawn(move || handle.regions().series(start, end).unwrap())
        })
        .collect();

    for worker in workers {
        assert_eq!(worker.join().unwrap(), expected);
    }
}

#[test]
fn display_names_source() {
    let dash = common::sample_dashboard();
    assert_eq!(dash.to_string(), "SalesDashboard(source=<memory>, top_n=10)");
}
