//! Group Summary Module
//! Pure reductions over a group of athlete records.

use crate::data::AthleteRecord;
use serde::Serialize;
use std::collections::BTreeSet;

/// Closed numeric interval observed over a group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Extent {
    pub min: f64,
    pub max: f64,
}

impl Extent {
    /// Extent of the non-NaN values, or `None` if there are none.
    pub fn of(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        values.into_iter().fold(None, |acc, v| Self::include(acc, v))
    }

    fn include(acc: Option<Self>, value: f64) -> Option<Self> {
        if value.is_nan() {
            return acc;
        }
        Some(match acc {
            None => Extent {
                min: value,
                max: value,
            },
            Some(e) => Extent {
                min: e.min.min(value),
                max: e.max.max(value),
            },
        })
    }

    /// Widen both ends by `pad`.
    pub fn padded(&self, pad: f64) -> Self {
        Extent {
            min: self.min - pad,
            max: self.max + pad,
        }
    }
}

/// Derived numeric summary for one group.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GroupSummary {
    pub count: usize,
    /// Records whose medal is anything other than the "No Medal" sentinel.
    pub medal_count: usize,
    pub height: Option<Extent>,
    pub weight: Option<Extent>,
}

/// Reduce a group of records to its summary.
///
/// An empty group yields a zero-count summary. NaN heights/weights are
/// skipped by the min/max so a malformed row never corrupts the extent.
pub fn summarize<'a, I>(records: I) -> GroupSummary
where
    I: IntoIterator<Item = &'a AthleteRecord>,
{
    records
        .into_iter()
        .fold(GroupSummary::default(), |mut acc, record| {
            acc.count += 1;
            if record.medal.is_awarded() {
                acc.medal_count += 1;
            }
            acc.height = Extent::include(acc.height, record.height);
            acc.weight = Extent::include(acc.weight, record.weight);
            acc
        })
}

/// Distinct known years, ascending.
pub fn sorted_years<'a, I>(records: I) -> Vec<i32>
where
    I: IntoIterator<Item = &'a AthleteRecord>,
{
    records
        .into_iter()
        .filter_map(|r| r.year)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Medal;
    use crate::stats::{group2, GroupSlice};
    use proptest::prelude::*;

    fn athlete(team: &str, sport: &str, medal: &str) -> AthleteRecord {
        AthleteRecord::new("x", team, sport, Some(2000), Medal::parse(medal))
    }

    #[test]
    fn judo_medal_counts_by_team() {
        let records = vec![
            athlete("USA", "Judo", "Gold"),
            athlete("USA", "Judo", "No Medal"),
            athlete("JPN", "Judo", "Silver"),
        ];
        let grouped = group2(records.iter(), |r| r.sport.clone(), |r| r.team.clone());
        let judo = grouped.get("Judo").unwrap();

        let usa = summarize(judo.group("USA").iter().copied());
        assert_eq!(usa.count, 2);
        assert_eq!(usa.medal_count, 1);

        let jpn = summarize(judo.group("JPN").iter().copied());
        assert_eq!(jpn.count, 1);
        assert_eq!(jpn.medal_count, 1);
    }

    #[test]
    fn empty_group_is_zero_not_absent() {
        let summary = summarize(std::iter::empty::<&AthleteRecord>());
        assert_eq!(summary, GroupSummary::default());
        assert_eq!(summary.count, 0);
        assert!(summary.height.is_none());
    }

    #[test]
    fn single_element_extent_is_degenerate() {
        let r = athlete("USA", "Judo", "Gold").with_body(181.0, 90.0);
        let summary = summarize([&r]);
        let h = summary.height.unwrap();
        assert_eq!(h.min, h.max);
        assert_eq!(h.min, 181.0);
    }

    #[test]
    fn nan_is_excluded_from_extents() {
        let a = athlete("USA", "Judo", "Gold").with_body(170.0, f64::NAN);
        let b = athlete("USA", "Judo", "Gold").with_body(f64::NAN, 60.0);
        let c = athlete("USA", "Judo", "Gold").with_body(190.0, 100.0);
        let summary = summarize([&a, &b, &c]);

        assert_eq!(summary.count, 3);
        assert_eq!(summary.height, Some(Extent { min: 170.0, max: 190.0 }));
        assert_eq!(summary.weight, Some(Extent { min: 60.0, max: 100.0 }));
    }

    #[test]
    fn years_are_sorted_and_unique() {
        let mut records = Vec::new();
        for y in [2000, 1992, 1996, 1992] {
            records.push(AthleteRecord::new("x", "USA", "Judo", Some(y), Medal::Gold));
        }
        records.push(AthleteRecord::new("x", "USA", "Judo", None, Medal::Gold));
        assert_eq!(sorted_years(&records), vec![1992, 1996, 2000]);
    }

    proptest! {
        #[test]
        fn prop_counts_are_bounded(medals in proptest::collection::vec(0usize..5, 0..40)) {
            let labels = ["Gold", "Silver", "Bronze", "No Medal", "NA"];
            let records: Vec<_> = medals.iter().map(|&m| athlete("USA", "Judo", labels[m])).collect();
            let summary = summarize(&records);
            prop_assert_eq!(summary.count, records.len());
            prop_assert!(summary.medal_count <= summary.count);
            prop_assert_eq!(summary.medal_count, medals.iter().filter(|&&m| m != 3).count());
        }
    }
}
