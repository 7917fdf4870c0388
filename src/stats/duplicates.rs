//! Body Measurement Analysis
//! Duplicate (Height, Weight) detection and extreme-athlete classification
//! for a single year's slice.

use crate::data::AthleteRecord;
use crate::stats::summary::Extent;
use serde::Serialize;

/// Flag every record that shares its exact (Height, Weight) pair with at
/// least one other record in the slice.
///
/// Pairwise O(n²); slices are bounded by one Games' entrants. NaN never
/// equals anything, so records with a malformed measurement are never flagged.
pub fn find_duplicates(slice: &[&AthleteRecord]) -> Vec<bool> {
    let mut flags = vec![false; slice.len()];
    for i in 0..slice.len() {
        for j in (i + 1)..slice.len() {
            if slice[i].height == slice[j].height && slice[i].weight == slice[j].weight {
                flags[i] = true;
                flags[j] = true;
            }
        }
    }
    flags
}

/// The flagged records themselves, in slice order.
pub fn duplicate_records<'a>(slice: &[&'a AthleteRecord]) -> Vec<&'a AthleteRecord> {
    find_duplicates(slice)
        .into_iter()
        .zip(slice.iter().copied())
        .filter_map(|(dup, record)| dup.then_some(record))
        .collect()
}

/// Colour class of a point in the height/weight scatterplot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PointClass {
    /// Tallest or heaviest in the slice.
    Highest,
    /// Shortest or lightest in the slice.
    Lowest,
    Regular,
}

/// Height and weight extents of a slice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Extremes {
    pub height: Option<Extent>,
    pub weight: Option<Extent>,
}

impl Extremes {
    pub fn of(slice: &[&AthleteRecord]) -> Self {
        Self {
            height: Extent::of(slice.iter().map(|r| r.height)),
            weight: Extent::of(slice.iter().map(|r| r.weight)),
        }
    }

    /// Maxima are checked before minima, so an athlete who is both the
    /// tallest and the lightest is `Highest`.
    pub fn classify(&self, record: &AthleteRecord) -> PointClass {
        let hits = |extent: Option<Extent>, value: f64, max: bool| {
            extent.is_some_and(|e| value == if max { e.max } else { e.min })
        };

        if hits(self.height, record.height, true) || hits(self.weight, record.weight, true) {
            PointClass::Highest
        } else if hits(self.height, record.height, false) || hits(self.weight, record.weight, false)
        {
            PointClass::Lowest
        } else {
            PointClass::Regular
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Medal;
    use proptest::prelude::*;

    fn body(name: &str, h: f64, w: f64) -> AthleteRecord {
        AthleteRecord::new(name, "USA", "Judo", Some(2000), Medal::NoMedal).with_body(h, w)
    }

    #[test]
    fn duplicates_flag_both_sides() {
        let a = body("a", 180.0, 80.0);
        let b = body("b", 170.0, 70.0);
        let c = body("c", 180.0, 80.0);
        let slice = [&a, &b, &c];

        assert_eq!(find_duplicates(&slice), vec![true, false, true]);
        let names: Vec<_> = duplicate_records(&slice).iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["a", "c"]);
    }

    #[test]
    fn nan_pairs_are_not_duplicates() {
        let a = body("a", f64::NAN, 80.0);
        let b = body("b", f64::NAN, 80.0);
        assert_eq!(find_duplicates(&[&a, &b]), vec![false, false]);
    }

    #[test]
    fn classification_prefers_highest() {
        let tall_light = body("tall", 200.0, 50.0);
        let short = body("short", 150.0, 70.0);
        let mid = body("mid", 175.0, 65.0);
        let heavy = body("heavy", 180.0, 120.0);
        let slice = [&tall_light, &short, &mid, &heavy];
        let ex = Extremes::of(&slice);

        assert_eq!(ex.classify(&tall_light), PointClass::Highest);
        assert_eq!(ex.classify(&heavy), PointClass::Highest);
        assert_eq!(ex.classify(&short), PointClass::Lowest);
        assert_eq!(ex.classify(&mid), PointClass::Regular);
    }

    #[test]
    fn empty_slice_classifies_regular() {
        let ex = Extremes::of(&[]);
        assert_eq!(ex, Extremes::default());
        assert_eq!(ex.classify(&body("x", 180.0, 80.0)), PointClass::Regular);
    }

    proptest! {
        #[test]
        fn prop_duplicates_are_symmetric(
            pairs in proptest::collection::vec((150u8..155, 60u8..63), 0..30)
        ) {
            let records: Vec<_> = pairs
                .iter()
                .map(|&(h, w)| body("x", h as f64, w as f64))
                .collect();
            let slice: Vec<&AthleteRecord> = records.iter().collect();
            let flags = find_duplicates(&slice);

            for i in 0..slice.len() {
                let has_twin = (0..slice.len()).any(|j| j != i && pairs[i] == pairs[j]);
                prop_assert_eq!(flags[i], has_twin);
            }
        }
    }
}
