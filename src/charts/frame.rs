//! Chart frame description handed to the renderer.

use crate::charts::marks::{Fill, Mark};
use crate::charts::scale::{BandScale, LinearScale};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Canvas size and plot margins in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub width: u32,
    pub height: u32,
    pub margin: Margin,
}

impl Layout {
    pub fn new(width: u32, height: u32, margin: Margin) -> Self {
        Self {
            width,
            height,
            margin,
        }
    }

    /// Horizontal pixel span of the plot area.
    pub fn x_range(&self) -> (f64, f64) {
        (self.margin.left, self.width as f64 - self.margin.right)
    }

    /// Vertical pixel span of the plot area, bottom first so larger values
    /// sit higher.
    pub fn y_range(&self) -> (f64, f64) {
        (self.height as f64 - self.margin.bottom, self.margin.top)
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::new(
            950,
            600,
            Margin {
                top: 20.0,
                right: 30.0,
                bottom: 50.0,
                left: 50.0,
            },
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AxisSide {
    Bottom,
    Left,
}

/// Axis line with labelled ticks at pixel offsets along it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub side: AxisSide,
    /// Pixel coordinate of the axis line (y for bottom, x for left).
    pub offset: f64,
    pub span: (f64, f64),
    pub ticks: Vec<(f64, String)>,
    /// Tick labels run upward from the tick instead of lying flat.
    pub vertical_labels: bool,
}

impl Axis {
    pub fn linear(side: AxisSide, offset: f64, scale: &LinearScale, count: usize) -> Self {
        let ticks = scale
            .ticks(count)
            .into_iter()
            .map(|v| (scale.map(v), format_tick(v)))
            .collect();
        Self {
            side,
            offset,
            span: scale.range,
            ticks,
            vertical_labels: false,
        }
    }

    /// Category labels on a bottom band axis are turned upright so long
    /// team lists do not overlap.
    pub fn band(side: AxisSide, offset: f64, scale: &BandScale, span: (f64, f64)) -> Self {
        let half = scale.bandwidth() / 2.0;
        let ticks = scale
            .domain()
            .iter()
            .filter_map(|key| scale.position(key).map(|p| (p + half, key.clone())))
            .collect();
        Self {
            side,
            offset,
            span,
            ticks,
            vertical_labels: side == AxisSide::Bottom,
        }
    }
}

fn format_tick(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{:.0}", v)
    } else {
        format!("{}", v)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub fill: Fill,
    pub label: String,
}

/// Everything needed to draw one chart state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub title: String,
    pub layout: Layout,
    pub axes: Vec<Axis>,
    pub marks: Vec<Mark>,
    pub legend: Vec<LegendEntry>,
}

impl Frame {
    pub fn new(title: impl Into<String>, layout: Layout) -> Self {
        Self {
            title: title.into(),
            layout,
            axes: Vec::new(),
            marks: Vec::new(),
            legend: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }
}
