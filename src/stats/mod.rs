//! Stats module - grouping and per-group aggregation

mod duplicates;
mod group;
mod summary;

pub use duplicates::{duplicate_records, find_duplicates, Extremes, PointClass};
pub use group::{group, group2, GroupSlice, Grouped, Grouped2};
pub use summary::{sorted_years, summarize, Extent, GroupSummary};
