//! CSV Data Loader Module
//! Handles loading the athlete CSV with Polars and converting rows into records.

use crate::data::record::{parse_number, parse_total, parse_year, AthleteRecord, Medal};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Missing required column: {0}")]
    MissingColumn(String),
    #[error("No data loaded")]
    NoData,
}

/// Columns every dataset row must carry.
pub const REQUIRED_COLUMNS: [&str; 7] = ["Name", "Team", "Sport", "Year", "Height", "Weight", "Medal"];

/// Handles CSV file loading with Polars.
///
/// The dataset is read once per session; records are never mutated afterwards.
pub struct DataLoader {
    records: Option<Vec<AthleteRecord>>,
    file_path: Option<PathBuf>,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    pub fn new() -> Self {
        Self {
            records: None,
            file_path: None,
        }
    }

    /// Load a CSV file. Any failure here is fatal for the caller.
    pub fn load_csv(&mut self, file_path: impl AsRef<Path>) -> Result<&[AthleteRecord], LoaderError> {
        let file_path = file_path.as_ref();
        self.file_path = Some(file_path.to_path_buf());

        // Schema inference off: every column arrives as a string and numeric
        // coercion happens per cell below
        let df = LazyCsvReader::new(file_path)
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .finish()?
            .collect()?;

        let records = records_from_frame(&df)?;
        info!(
            path = %file_path.display(),
            rows = records.len(),
            "loaded athlete dataset"
        );

        self.records = Some(records);
        self.dataset()
    }

    /// Get the loaded records.
    pub fn dataset(&self) -> Result<&[AthleteRecord], LoaderError> {
        self.records.as_deref().ok_or(LoaderError::NoData)
    }

    /// Get the number of loaded rows.
    pub fn get_row_count(&self) -> usize {
        self.records.as_ref().map(Vec::len).unwrap_or(0)
    }

    /// Get file path.
    pub fn get_file_path(&self) -> Option<&PathBuf> {
        self.file_path.as_ref()
    }

    /// Take ownership of the records, leaving the loader empty.
    pub fn into_records(self) -> Result<Vec<AthleteRecord>, LoaderError> {
        self.records.ok_or(LoaderError::NoData)
    }
}

fn string_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a StringChunked, LoaderError> {
    df.column(name)
        .map_err(|_| LoaderError::MissingColumn(name.to_string()))?
        .as_materialized_series()
        .str()
        .map_err(LoaderError::from)
}

fn optional_column<'a>(df: &'a DataFrame, name: &str) -> Option<&'a StringChunked> {
    df.column(name)
        .ok()
        .and_then(|col| col.as_materialized_series().str().ok())
}

/// Convert an all-string DataFrame into typed records.
pub fn records_from_frame(df: &DataFrame) -> Result<Vec<AthleteRecord>, LoaderError> {
    let name = string_column(df, "Name")?;
    let team = string_column(df, "Team")?;
    let sport = string_column(df, "Sport")?;
    let year = string_column(df, "Year")?;
    let height = string_column(df, "Height")?;
    let weight = string_column(df, "Weight")?;
    let medal = string_column(df, "Medal")?;
    let total_athletes = optional_column(df, "TotalAthletes");
    let total_medals = optional_column(df, "TotalMedals");

    let mut malformed_body = 0usize;
    let mut malformed_year = 0usize;
    let mut records = Vec::with_capacity(df.height());

    for i in 0..df.height() {
        let record = AthleteRecord::new(
            name.get(i).unwrap_or_default(),
            team.get(i).unwrap_or_default(),
            sport.get(i).unwrap_or_default(),
            parse_year(year.get(i)),
            Medal::parse(medal.get(i).unwrap_or_default()),
        )
        .with_body(parse_number(height.get(i)), parse_number(weight.get(i)))
        .with_totals(
            parse_total(total_athletes.and_then(|c| c.get(i))),
            parse_total(total_medals.and_then(|c| c.get(i))),
        );

        if !record.has_body() {
            malformed_body += 1;
        }
        if record.year.is_none() {
            malformed_year += 1;
        }
        records.push(record);
    }

    if malformed_body > 0 || malformed_year > 0 {
        warn!(
            malformed_body,
            malformed_year, "coerced non-numeric Height/Weight/Year cells"
        );
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".csv")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn loads_typed_records() {
        let file = write_csv(
            "Name,Team,Sport,Year,Height,Weight,Medal,TotalAthletes,TotalMedals\n\
             Ana,BRA,Judo,1992,160,55,Gold,10,3\n\
             Bo,USA,Judo,1996,abc,80,No Medal,,\n",
        );
        let mut loader = DataLoader::new();
        let records = loader.load_csv(file.path()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Ana");
        assert_eq!(records[0].year, Some(1992));
        assert_eq!(records[0].height, 160.0);
        assert_eq!(records[0].medal, Medal::Gold);
        assert_eq!(records[0].total_athletes, 10.0);
        assert_eq!(records[0].total_medals, 3.0);

        assert!(records[1].height.is_nan());
        assert_eq!(records[1].weight, 80.0);
        assert_eq!(records[1].medal, Medal::NoMedal);
        assert_eq!(records[1].total_athletes, 0.0);
        assert_eq!(loader.get_row_count(), 2);
    }

    #[test]
    fn missing_required_column_is_an_error() {
        let file = write_csv("Name,Team,Sport,Year,Height,Weight\nAna,BRA,Judo,1992,160,55\n");
        let mut loader = DataLoader::new();
        let err = loader.load_csv(file.path()).unwrap_err();
        assert!(matches!(err, LoaderError::MissingColumn(ref c) if c == "Medal"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let mut loader = DataLoader::new();
        assert!(loader.load_csv("/nonexistent/dataset_limpo.csv").is_err());
        assert!(matches!(loader.dataset(), Err(LoaderError::NoData)));
    }
}
