//! Chart view trait shared by the selector-driven charts.

use crate::charts::frame::Frame;
use crate::charts::medals::AthleteList;
use std::fmt;
use std::str::FromStr;

/// A chart whose displayed state is chosen by one selector key.
pub trait ChartView {
    type Key: Clone + PartialEq + fmt::Debug + fmt::Display + FromStr;

    /// Selectable keys, in the order the dropdown lists them.
    fn domain(&self) -> Vec<Self::Key>;

    /// Frame for a key from the domain.
    fn frame(&self, key: &Self::Key) -> Frame;

    /// Zero-mark frame shown when the requested key is not in the domain.
    fn empty_frame(&self, requested: &str) -> Frame;

    /// Drill-down list for a clicked mark, if the chart has one.
    fn detail(&self, _item: &str) -> Option<AthleteList> {
        None
    }
}
