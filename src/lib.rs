//! Olympic Charts - aggregation and animated chart rendering for the
//! Olympic athletes dataset.
//!
//! Three charts are built from one CSV:
//! - medals by sport, a bar per team with a drill-down athlete list
//! - height x weight scatterplot per year
//! - animated team scatterplot cycling through the years
//!
//! Charts are driven by [`session::ChartEvent`]s and produce
//! [`session::RenderPlan`]s carrying a keyed mark diff and an SVG-ready frame.

pub mod animation;
pub mod charts;
pub mod config;
pub mod data;
pub mod selector;
pub mod session;
pub mod stats;
