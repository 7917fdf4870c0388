//! Medals by sport: one bar per team for the selected sport, with a
//! drill-down athlete list per team.

use crate::charts::frame::{Axis, AxisSide, Frame, Layout};
use crate::charts::marks::Mark;
use crate::charts::scale::{BandScale, LinearScale};
use crate::charts::view::ChartView;
use crate::data::AthleteRecord;
use crate::stats::{group, group2, summarize, GroupSlice, Grouped, Grouped2};
use serde::Serialize;

/// Default number of athletes listed before "show more".
pub const DEFAULT_LIST_CAP: usize = 25;

/// Aggregate behind one bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamBar {
    pub country: String,
    /// Entries of this team in the sport.
    pub count: usize,
    pub medal_count: usize,
}

/// Athletes of one team, truncated until expanded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AthleteList {
    pub team: String,
    items: Vec<String>,
    cap: usize,
    expanded: bool,
}

impl AthleteList {
    pub fn new(team: impl Into<String>, items: Vec<String>, cap: usize) -> Self {
        Self {
            team: team.into(),
            items,
            cap,
            expanded: false,
        }
    }

    /// Items currently shown.
    pub fn visible(&self) -> &[String] {
        if self.expanded {
            &self.items
        } else {
            &self.items[..self.items.len().min(self.cap)]
        }
    }

    pub fn total(&self) -> usize {
        self.items.len()
    }

    /// Whether a "show more" control applies.
    pub fn has_more(&self) -> bool {
        !self.expanded && self.items.len() > self.cap
    }

    pub fn expand(&mut self) {
        self.expanded = true;
    }
}

pub struct MedalsBySport<'a> {
    by_sport: Grouped2<&'a str, &'a str, &'a AthleteRecord>,
    by_team: Grouped<&'a str, &'a AthleteRecord>,
    layout: Layout,
    list_cap: usize,
}

impl<'a> MedalsBySport<'a> {
    pub fn new(records: &'a [AthleteRecord], layout: Layout, list_cap: usize) -> Self {
        Self {
            by_sport: group2(records.iter(), |r| r.sport.as_str(), |r| r.team.as_str()),
            by_team: group(records.iter(), |r| r.team.as_str()),
            layout,
            list_cap,
        }
    }

    /// Bars for a sport in first-seen team order; empty for an unknown sport.
    pub fn bars(&self, sport: &str) -> Vec<TeamBar> {
        self.by_sport
            .get(sport)
            .map(|teams| {
                teams
                    .iter()
                    .map(|(team, records)| {
                        let summary = summarize(records.iter().copied());
                        TeamBar {
                            country: team.to_string(),
                            count: summary.count,
                            medal_count: summary.medal_count,
                        }
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// All athletes of a team across sports, as `"Name (Medal)"`.
    pub fn athletes(&self, team: &str) -> AthleteList {
        let items = self
            .by_team
            .group(team)
            .iter()
            .map(|r| format!("{} ({})", r.name, r.medal))
            .collect();
        AthleteList::new(team, items, self.list_cap)
    }

    fn axes_frame(&self, title: String, bars: &[TeamBar]) -> Frame {
        let countries = bars.iter().map(|b| b.country.clone()).collect();
        let x_range = self.layout.x_range();
        let band = BandScale::new(countries, x_range, 0.1);
        let max = bars.iter().map(|b| b.count).max().unwrap_or(0) as f64;
        let y = LinearScale::new((0.0, max), self.layout.y_range()).nice();
        let baseline = y.map(0.0);

        let mut frame = Frame::new(title, self.layout);
        frame.axes = vec![
            Axis::band(AxisSide::Bottom, self.layout.y_range().0, &band, x_range),
            Axis::linear(AxisSide::Left, self.layout.margin.left, &y, 10),
        ];
        frame.marks = bars
            .iter()
            .filter_map(|bar| {
                let x = band.position(&bar.country)?;
                let top = y.map(bar.count as f64);
                Some(
                    Mark::bar(bar.country.clone(), x, top, band.bandwidth(), baseline - top).with_label(
                        format!("{}: {} entries, {} medals", bar.country, bar.count, bar.medal_count),
                    ),
                )
            })
            .collect();
        frame
    }
}

impl ChartView for MedalsBySport<'_> {
    type Key = String;

    fn domain(&self) -> Vec<String> {
        self.by_sport.keys().map(|s| s.to_string()).collect()
    }

    fn frame(&self, sport: &String) -> Frame {
        let bars = self.bars(sport);
        self.axes_frame(sport.clone(), &bars)
    }

    fn empty_frame(&self, requested: &str) -> Frame {
        self.axes_frame(requested.to_string(), &[])
    }

    fn detail(&self, team: &str) -> Option<AthleteList> {
        Some(self.athletes(team))
    }
}
