//! Data module - CSV loading and typed athlete records

mod loader;
mod record;

pub use loader::{records_from_frame, DataLoader, LoaderError, REQUIRED_COLUMNS};
pub use record::{parse_number, parse_total, parse_year, AthleteRecord, Medal, NO_MEDAL};
