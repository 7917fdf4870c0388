//! Team x year statistics for the animated scatterplot.
//!
//! One point per (team, year) at (athletes sent, medals won). Scales are
//! fixed over the whole dataset so positions are comparable across years.

use crate::charts::frame::{Axis, AxisSide, Frame, Layout, Margin};
use crate::charts::marks::{Mark, MarkKey};
use crate::charts::scale::LinearScale;
use crate::data::AthleteRecord;
use crate::stats::{group2, summarize};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeSet;

const POINT_RADIUS: f64 = 5.0;

/// Canvas used by the animated chart.
pub fn animated_layout(width: u32, height: u32) -> Layout {
    Layout::new(
        width,
        height,
        Margin {
            top: 70.0,
            right: 20.0,
            bottom: 40.0,
            left: 60.0,
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamYearStat {
    pub team: String,
    pub year: i32,
    /// Entries of the team that year.
    pub total_athletes: usize,
    /// Entries that won any medal.
    pub total_medals: usize,
}

impl TeamYearStat {
    /// Composite identity used to key the point across redraws.
    pub fn key(&self) -> MarkKey {
        format!("{}:{}", self.team, self.year)
    }

    fn label(&self) -> String {
        format!(
            "Year: {}\nTeam: {}\nAthletes: {}\nMedals: {}",
            self.year, self.team, self.total_athletes, self.total_medals
        )
    }
}

pub struct TeamYearStats {
    stats: Vec<TeamYearStat>,
    years: Vec<i32>,
    x: LinearScale,
    y: LinearScale,
    layout: Layout,
}

impl TeamYearStats {
    /// Group by team then year and reduce each group. Records without a
    /// year are left out.
    pub fn new(records: &[AthleteRecord], layout: Layout) -> Self {
        let grouped = group2(records.iter(), |r| r.team.as_str(), |r| r.year);
        let groups: Vec<(&str, i32, &[&AthleteRecord])> = grouped
            .iter()
            .flat_map(|(team, years)| {
                years
                    .iter()
                    .filter_map(move |(year, group)| year.map(|y| (*team, y, group.as_slice())))
            })
            .collect();

        let stats: Vec<TeamYearStat> = groups
            .par_iter()
            .map(|&(team, year, group)| {
                let summary = summarize(group.iter().copied());
                TeamYearStat {
                    team: team.to_string(),
                    year,
                    total_athletes: summary.count,
                    total_medals: summary.medal_count,
                }
            })
            .collect();

        let years = stats
            .iter()
            .map(|s| s.year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let max_athletes = stats.iter().map(|s| s.total_athletes).max().unwrap_or(0);
        let max_medals = stats.iter().map(|s| s.total_medals).max().unwrap_or(0);

        Self {
            x: LinearScale::new((0.0, max_athletes as f64), layout.x_range()),
            y: LinearScale::new((0.0, max_medals as f64), layout.y_range()),
            stats,
            years,
            layout,
        }
    }

    pub fn stats(&self) -> &[TeamYearStat] {
        &self.stats
    }

    /// Years ascending.
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    /// Stats for one year; empty for a year with no entries.
    pub fn slice(&self, year: i32) -> Vec<&TeamYearStat> {
        self.stats.iter().filter(|s| s.year == year).collect()
    }

    /// Every point parked at the data origin.
    pub fn origin_marks(&self) -> Vec<Mark> {
        let (ox, oy) = (self.x.map(0.0), self.y.map(0.0));
        self.stats
            .iter()
            .map(|s| Mark::point(s.key(), ox, oy, POINT_RADIUS).with_label(s.label()))
            .collect()
    }

    /// Points of one year at their data positions.
    pub fn year_marks(&self, year: i32) -> Vec<Mark> {
        self.slice(year)
            .into_iter()
            .map(|s| {
                Mark::point(
                    s.key(),
                    self.x.map(s.total_athletes as f64),
                    self.y.map(s.total_medals as f64),
                    POINT_RADIUS,
                )
                .with_label(s.label())
            })
            .collect()
    }

    pub fn origin(&self) -> (f64, f64) {
        (self.x.map(0.0), self.y.map(0.0))
    }

    /// Frame with the fixed axes and the given marks.
    pub fn frame(&self, title: impl Into<String>, marks: Vec<Mark>) -> Frame {
        let mut frame = Frame::new(title, self.layout);
        frame.axes = vec![
            Axis::linear(AxisSide::Bottom, self.layout.y_range().0, &self.x, 10),
            Axis::linear(AxisSide::Left, self.layout.margin.left, &self.y, 10),
        ];
        frame.marks = marks;
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Medal;

    fn dataset() -> Vec<AthleteRecord> {
        vec![
            AthleteRecord::new("a", "USA", "Judo", Some(1996), Medal::Gold),
            AthleteRecord::new("b", "USA", "Judo", Some(1996), Medal::NoMedal),
            AthleteRecord::new("c", "JPN", "Judo", Some(1992), Medal::Silver),
            AthleteRecord::new("d", "USA", "Swimming", Some(1992), Medal::NoMedal),
            AthleteRecord::new("e", "BRA", "Judo", None, Medal::Gold),
        ]
    }

    #[test]
    fn stats_per_team_and_year() {
        let records = dataset();
        let view = TeamYearStats::new(&records, animated_layout(900, 600));

        assert_eq!(
            view.stats(),
            &[
                TeamYearStat { team: "USA".into(), year: 1996, total_athletes: 2, total_medals: 1 },
                TeamYearStat { team: "USA".into(), year: 1992, total_athletes: 1, total_medals: 0 },
                TeamYearStat { team: "JPN".into(), year: 1992, total_athletes: 1, total_medals: 1 },
            ]
        );
        assert_eq!(view.years(), &[1992, 1996]);
        assert!(view.slice(2000).is_empty());
    }

    #[test]
    fn marks_keyed_by_team_and_year() {
        let records = dataset();
        let layout = animated_layout(900, 600);
        let view = TeamYearStats::new(&records, layout);

        let origin = view.origin_marks();
        assert_eq!(origin.len(), 3);
        assert!(origin.iter().all(|m| (m.x, m.y) == view.origin()));
        assert_eq!(view.origin(), (layout.margin.left, layout.y_range().0));

        let marks = view.year_marks(1996);
        assert_eq!(marks.len(), 1);
        assert_eq!(marks[0].key, "USA:1996");
        // Largest team and medal count reach the far corner
        assert_eq!(marks[0].x, layout.x_range().1);
        assert_eq!(marks[0].y, layout.y_range().1);
    }
}
