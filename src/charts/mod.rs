//! Charts module - chart views, keyed marks and SVG rendering

mod frame;
mod marks;
mod medals;
mod renderer;
mod scale;
mod scatter;
mod team_year;
mod view;

pub use frame::{Axis, AxisSide, Frame, Layout, LegendEntry, Margin};
pub use marks::{reconcile, Fill, Mark, MarkDiff, MarkKey, MarkSet, MarkUpdate, Shape};
pub use medals::{AthleteList, MedalsBySport, TeamBar, DEFAULT_LIST_CAP};
pub use renderer::{RenderError, StaticChartRenderer};
pub use scale::{nice_step, BandScale, LinearScale};
pub use scatter::{YearReport, YearScatter};
pub use team_year::{animated_layout, TeamYearStat, TeamYearStats};
pub use view::ChartView;
