//! Height x weight scatterplot for one Olympic year.

use crate::charts::frame::{Axis, AxisSide, Frame, Layout, LegendEntry};
use crate::charts::marks::{Fill, Mark};
use crate::charts::scale::LinearScale;
use crate::charts::view::ChartView;
use crate::data::AthleteRecord;
use crate::stats::{
    duplicate_records, group, sorted_years, summarize, Extent, Extremes, GroupSlice, GroupSummary, Grouped,
    PointClass,
};
use serde::Serialize;
use std::collections::HashMap;
use tracing::info;

/// Padding added on both sides of the height and weight domains.
const DOMAIN_PAD: f64 = 5.0;
const POINT_RADIUS: f64 = 5.0;

/// Informational summary of one year's slice.
#[derive(Debug, Clone, Serialize)]
pub struct YearReport<'a> {
    pub year: i32,
    pub summary: GroupSummary,
    /// Athletes sharing an exact (Height, Weight) pair with someone else.
    pub duplicates: Vec<&'a AthleteRecord>,
}

pub struct YearScatter<'a> {
    by_year: Grouped<Option<i32>, &'a AthleteRecord>,
    years: Vec<i32>,
    layout: Layout,
}

impl<'a> YearScatter<'a> {
    pub fn new(records: &'a [AthleteRecord], layout: Layout) -> Self {
        Self {
            by_year: group(records.iter(), |r| r.year),
            years: sorted_years(records),
            layout,
        }
    }

    /// Records of one year; empty for a year not in the dataset.
    pub fn slice(&self, year: i32) -> &[&'a AthleteRecord] {
        self.by_year.group(&Some(year))
    }

    pub fn report(&self, year: i32) -> YearReport<'a> {
        let slice = self.slice(year);
        YearReport {
            year,
            summary: summarize(slice.iter().copied()),
            duplicates: duplicate_records(slice),
        }
    }

    fn fill(class: PointClass) -> Fill {
        match class {
            PointClass::Highest => Fill::Red,
            PointClass::Lowest => Fill::Blue,
            PointClass::Regular => Fill::SteelBlue,
        }
    }

    fn legend() -> Vec<LegendEntry> {
        [
            (Fill::Red, "Highest height/weight"),
            (Fill::Blue, "Lowest height/weight"),
            (Fill::SteelBlue, "Other athletes"),
        ]
        .into_iter()
        .map(|(fill, label)| LegendEntry {
            fill,
            label: label.to_string(),
        })
        .collect()
    }

    fn scatter_frame(&self, title: String, slice: &[&AthleteRecord]) -> Frame {
        let extremes = Extremes::of(slice);
        let domain = |e: Option<Extent>| {
            e.map(|e| e.padded(DOMAIN_PAD))
                .map(|e| (e.min, e.max))
                .unwrap_or((0.0, 1.0))
        };
        let x = LinearScale::new(domain(extremes.weight), self.layout.x_range());
        let y = LinearScale::new(domain(extremes.height), self.layout.y_range());

        let mut frame = Frame::new(title, self.layout);
        frame.axes = vec![
            Axis::linear(AxisSide::Bottom, self.layout.y_range().0, &x, 10),
            Axis::linear(AxisSide::Left, self.layout.margin.left, &y, 10),
        ];
        frame.legend = Self::legend();

        // Names repeat when an athlete enters several events in one year
        let mut seen: HashMap<&str, usize> = HashMap::new();
        frame.marks = slice
            .iter()
            .filter(|r| r.has_body())
            .map(|r| {
                let ordinal = seen.entry(r.name.as_str()).or_insert(0);
                let key = format!("{}#{}", r.name, ordinal);
                *ordinal += 1;
                Mark::point(key, x.map(r.weight), y.map(r.height), POINT_RADIUS)
                    .with_fill(Self::fill(extremes.classify(r)))
                    .with_label(format!(
                        "{}\nTeam: {}\nSport: {}\nHeight: {} cm\nWeight: {} kg",
                        r.name, r.team, r.sport, r.height, r.weight
                    ))
            })
            .collect();
        frame
    }
}

impl ChartView for YearScatter<'_> {
    type Key = i32;

    /// Years ascending.
    fn domain(&self) -> Vec<i32> {
        self.years.clone()
    }

    fn frame(&self, year: &i32) -> Frame {
        let report = self.report(*year);
        if !report.duplicates.is_empty() {
            let names: Vec<&str> = report.duplicates.iter().map(|r| r.name.as_str()).collect();
            info!(year, count = names.len(), ?names, "athletes sharing height/weight");
        }
        self.scatter_frame(format!("Height x Weight - {year}"), self.slice(*year))
    }

    fn empty_frame(&self, requested: &str) -> Frame {
        self.scatter_frame(format!("Height x Weight - {requested}"), &[])
    }
}
