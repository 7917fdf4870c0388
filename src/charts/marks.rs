//! Marks Module
//! Visual marks keyed by stable identity, and the enter/update/exit diff
//! between two mark sets.

use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::warn;

/// Stable identity of a mark across redraws.
pub type MarkKey = String;

/// Fill colours used by the charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Fill {
    SteelBlue,
    Red,
    Blue,
}

impl Fill {
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Fill::SteelBlue => (70, 130, 180),
            Fill::Red => (255, 0, 0),
            Fill::Blue => (0, 0, 255),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Shape {
    /// Rectangle whose top-left corner is the mark position.
    Bar { width: f64, height: f64 },
    /// Circle centred on the mark position.
    Point { radius: f64 },
}

/// One visual element in pixel coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mark {
    pub key: MarkKey,
    pub x: f64,
    pub y: f64,
    pub shape: Shape,
    pub fill: Fill,
    pub opacity: f64,
    /// Hover text.
    pub label: String,
}

impl Mark {
    pub fn bar(key: impl Into<MarkKey>, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            key: key.into(),
            x,
            y,
            shape: Shape::Bar { width, height },
            fill: Fill::SteelBlue,
            opacity: 1.0,
            label: String::new(),
        }
    }

    pub fn point(key: impl Into<MarkKey>, x: f64, y: f64, radius: f64) -> Self {
        Self {
            key: key.into(),
            x,
            y,
            shape: Shape::Point { radius },
            fill: Fill::SteelBlue,
            opacity: 1.0,
            label: String::new(),
        }
    }

    pub fn with_fill(mut self, fill: Fill) -> Self {
        self.fill = fill;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.x = x;
        self.y = y;
        self
    }
}

/// A mark whose key survived the redraw.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkUpdate {
    pub previous: Mark,
    pub next: Mark,
}

impl MarkUpdate {
    pub fn is_changed(&self) -> bool {
        self.previous != self.next
    }
}

/// Explicit keyed reconciliation result.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MarkDiff {
    /// Keys absent from the previous set.
    pub enter: Vec<Mark>,
    /// Keys present in both sets, moved/restyled rather than recreated.
    pub update: Vec<MarkUpdate>,
    /// Keys absent from the new data.
    pub exit: Vec<Mark>,
}

impl MarkDiff {
    pub fn is_empty(&self) -> bool {
        self.enter.is_empty() && self.update.is_empty() && self.exit.is_empty()
    }
}

/// Ordered set of marks with unique keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MarkSet {
    marks: Vec<Mark>,
    #[serde(skip)]
    index: HashMap<MarkKey, usize>,
}

impl MarkSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set; later marks repeating an earlier key are dropped.
    pub fn from_marks(marks: Vec<Mark>) -> Self {
        let mut set = Self::new();
        for mark in dedup_keys(marks) {
            set.index.insert(mark.key.clone(), set.marks.len());
            set.marks.push(mark);
        }
        set
    }

    pub fn get(&self, key: &str) -> Option<&Mark> {
        self.index.get(key).map(|&i| &self.marks[i])
    }

    pub fn marks(&self) -> &[Mark] {
        &self.marks
    }

    pub fn len(&self) -> usize {
        self.marks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// The full mark list with every mark whose key appears in `updates`
    /// replaced. Updates for unknown keys are ignored: no new marks appear.
    pub fn merged(&self, updates: Vec<Mark>) -> Vec<Mark> {
        let mut marks = self.marks.clone();
        for update in updates {
            if let Some(&i) = self.index.get(&update.key) {
                marks[i] = update;
            }
        }
        marks
    }

    /// Every mark restyled by `f`.
    pub fn mapped(&self, f: impl Fn(&Mark) -> Mark) -> Vec<Mark> {
        self.marks.iter().map(f).collect()
    }

    /// Bring this set in line with a diff produced against it.
    ///
    /// Surviving marks keep their slot, entering marks are appended.
    pub fn apply(&mut self, diff: &MarkDiff) {
        let exiting: HashSet<&str> = diff.exit.iter().map(|m| m.key.as_str()).collect();
        let mut marks: Vec<Mark> = self
            .marks
            .drain(..)
            .filter(|m| !exiting.contains(m.key.as_str()))
            .collect();

        let slots: HashMap<&str, usize> = marks
            .iter()
            .enumerate()
            .map(|(i, m)| (m.key.as_str(), i))
            .collect();
        let replacements: Vec<(usize, Mark)> = diff
            .update
            .iter()
            .filter_map(|u| slots.get(u.next.key.as_str()).map(|&i| (i, u.next.clone())))
            .collect();
        for (i, mark) in replacements {
            marks[i] = mark;
        }
        marks.extend(diff.enter.iter().cloned());

        *self = Self::from_marks(marks);
    }
}

fn dedup_keys(marks: Vec<Mark>) -> Vec<Mark> {
    let mut seen = HashSet::new();
    marks
        .into_iter()
        .filter(|m| {
            let fresh = seen.insert(m.key.clone());
            if !fresh {
                warn!(key = %m.key, "dropping mark with duplicate key");
            }
            fresh
        })
        .collect()
}

/// Match `next` against `previous` by key.
pub fn reconcile(previous: &MarkSet, next: Vec<Mark>) -> MarkDiff {
    let next = dedup_keys(next);
    let next_keys: HashSet<&str> = next.iter().map(|m| m.key.as_str()).collect();

    let exit = previous
        .marks
        .iter()
        .filter(|m| !next_keys.contains(m.key.as_str()))
        .cloned()
        .collect();

    let mut diff = MarkDiff {
        exit,
        ..MarkDiff::default()
    };
    for mark in next {
        match previous.get(&mark.key) {
            Some(prev) => diff.update.push(MarkUpdate {
                previous: prev.clone(),
                next: mark,
            }),
            None => diff.enter.push(mark),
        }
    }
    diff
}
