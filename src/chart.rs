//! Chart-ready figures for the animated dashboard views.
//!
//! The aggregator produces the rows; this module arranges them into one
//! frame per month with a fixed value axis, so a renderer only has to draw.

use serde::{Deserialize, Serialize};

use crate::config::AXIS_HEADROOM;
use crate::models::{AggregateRow, ChartKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Vertical,
    Horizontal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub label: String,
    pub value: f64,
}

/// One animation frame: the bars of a single month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartFrame {
    pub month: String,
    pub bars: Vec<Bar>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartFigure {
    pub kind: ChartKind,
    pub title: String,
    pub orientation: Orientation,
    pub category_label: String,
    pub value_label: String,
    /// `[0, max * 1.1]`; `[0, 1]` when there is nothing to draw.
    pub value_range: [f64; 2],
    pub frames: Vec<ChartFrame>,
}

impl ChartFigure {
    /// Arrange month-sorted rows into frames.
    ///
    /// Bars keep the row order within each month, so the descending order of
    /// the top-products series carries through to the drawing.
    pub fn from_rows(kind: ChartKind, rows: &[AggregateRow]) -> Self {
        let mut frames: Vec<ChartFrame> = Vec::new();
        for row in rows {
            let bar = Bar {
                label: row.group_key.clone(),
                value: row.total_price,
            };
            match frames.last_mut() {
                Some(frame) if frame.month == row.month => frame.bars.push(bar),
                _ => frames.push(ChartFrame {
                    month: row.month.clone(),
                    bars: vec![bar],
                }),
            }
        }

        let orientation = match kind {
            ChartKind::TopProducts => Orientation::Horizontal,
            ChartKind::Region | ChartKind::Category => Orientation::Vertical,
        };

        Self {
            kind,
            title: kind.title().to_string(),
            orientation,
            category_label: kind.group_column().to_string(),
            value_label: "Total Sales".to_string(),
            value_range: [0.0, axis_max(rows)],
            frames,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Upper bound of the value axis, shared by every frame so bars do not
/// rescale while animating.
fn axis_max(rows: &[AggregateRow]) -> f64 {
    let max = rows
        .iter()
        .map(|r| r.total_price)
        .fold(0.0_f64, f64::max);
    if max > 0.0 {
        max * AXIS_HEADROOM
    } else {
        1.0
    }
}
