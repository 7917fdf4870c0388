//! Athlete Record Module
//! One typed row of the Olympic athlete dataset.

use serde::Serialize;
use std::fmt;

/// Exact text the dataset uses for "no medal awarded".
pub const NO_MEDAL: &str = "No Medal";

/// Medal outcome of a single athlete entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
    NoMedal,
    /// Any other text found in the Medal column, kept verbatim.
    Other(String),
}

impl Medal {
    /// Parse the Medal column by exact string match.
    ///
    /// Only the literal `"No Medal"` maps to the sentinel; everything else
    /// (including blanks or `"NA"`) counts as an outcome.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "Gold" => Medal::Gold,
            "Silver" => Medal::Silver,
            "Bronze" => Medal::Bronze,
            NO_MEDAL => Medal::NoMedal,
            other => Medal::Other(other.to_string()),
        }
    }

    pub fn is_awarded(&self) -> bool {
        !matches!(self, Medal::NoMedal)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Medal::Gold => "Gold",
            Medal::Silver => "Silver",
            Medal::Bronze => "Bronze",
            Medal::NoMedal => NO_MEDAL,
            Medal::Other(s) => s,
        }
    }
}

impl fmt::Display for Medal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single dataset row. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AthleteRecord {
    pub name: String,
    pub team: String,
    pub sport: String,
    /// `None` when the Year cell is missing or not an integer.
    pub year: Option<i32>,
    /// Centimetres; `NaN` when malformed.
    pub height: f64,
    /// Kilograms; `NaN` when malformed.
    pub weight: f64,
    pub medal: Medal,
    /// Precomputed column; `0.0` when absent or malformed.
    pub total_athletes: f64,
    /// Precomputed column; `0.0` when absent or malformed.
    pub total_medals: f64,
}

impl AthleteRecord {
    pub fn new(
        name: impl Into<String>,
        team: impl Into<String>,
        sport: impl Into<String>,
        year: Option<i32>,
        medal: Medal,
    ) -> Self {
        Self {
            name: name.into(),
            team: team.into(),
            sport: sport.into(),
            year,
            height: f64::NAN,
            weight: f64::NAN,
            medal,
            total_athletes: 0.0,
            total_medals: 0.0,
        }
    }

    pub fn with_body(mut self, height: f64, weight: f64) -> Self {
        self.height = height;
        self.weight = weight;
        self
    }

    pub fn with_totals(mut self, total_athletes: f64, total_medals: f64) -> Self {
        self.total_athletes = total_athletes;
        self.total_medals = total_medals;
        self
    }

    /// Both body measurements are usable for plotting.
    pub fn has_body(&self) -> bool {
        !self.height.is_nan() && !self.weight.is_nan()
    }
}

/// Coerce a numeric cell, yielding `NaN` for blanks and garbage.
pub fn parse_number(raw: Option<&str>) -> f64 {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

/// Coerce a Year cell. Accepts `"1992"` and `"1992.0"`.
pub fn parse_year(raw: Option<&str>) -> Option<i32> {
    let value = parse_number(raw);
    if value.is_finite() && value.fract() == 0.0 && value.abs() <= i32::MAX as f64 {
        Some(value as i32)
    } else {
        None
    }
}

/// Coerce a precomputed total, falling back to zero.
pub fn parse_total(raw: Option<&str>) -> f64 {
    let value = parse_number(raw);
    if value.is_nan() {
        0.0
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn medal_sentinel_is_exact_match() {
        assert_eq!(Medal::parse("No Medal"), Medal::NoMedal);
        assert!(!Medal::parse("No Medal").is_awarded());
        // Case or whitespace differences are not the sentinel
        assert!(Medal::parse("no medal").is_awarded());
        assert!(Medal::parse("No Medal ").is_awarded());
        assert_eq!(Medal::parse("Gold"), Medal::Gold);
        assert_eq!(Medal::parse("NA"), Medal::Other("NA".into()));
    }

    #[test]
    fn numeric_coercion() {
        assert_eq!(parse_number(Some(" 180 ")), 180.0);
        assert!(parse_number(Some("tall")).is_nan());
        assert!(parse_number(Some("")).is_nan());
        assert!(parse_number(None).is_nan());

        assert_eq!(parse_year(Some("1992")), Some(1992));
        assert_eq!(parse_year(Some("1992.0")), Some(1992));
        assert_eq!(parse_year(Some("1992.5")), None);
        assert_eq!(parse_year(Some("n/a")), None);

        assert_eq!(parse_total(Some("12")), 12.0);
        assert_eq!(parse_total(Some("x")), 0.0);
        assert_eq!(parse_total(None), 0.0);
    }

    #[test]
    fn record_body_flags() {
        let r = AthleteRecord::new("A", "USA", "Judo", Some(2000), Medal::Gold);
        assert!(!r.has_body());
        assert!(r.with_body(180.0, 80.0).has_body());
    }
}
