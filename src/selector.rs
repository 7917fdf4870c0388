//! Selector State
//! The currently chosen filter key (sport or year) driving a chart.

use std::fmt::Debug;
use tracing::{debug, warn};

/// Outcome of a selection request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<K> {
    /// The key is in the domain and is now current.
    Changed(K),
    /// The key is not in the domain; the current key is untouched and the
    /// caller shows an empty view.
    Unknown,
}

/// Active key over a fixed domain.
///
/// The current key is always a member of the domain, or `None` when the
/// domain itself is empty.
#[derive(Debug, Clone)]
pub struct SelectorState<K> {
    domain: Vec<K>,
    current: Option<K>,
}

impl<K: Clone + PartialEq + Debug> SelectorState<K> {
    /// Start on the first key in domain order.
    ///
    /// Domain order is whatever the caller built: first-seen for sports,
    /// ascending for years. It is deliberately not re-sorted here.
    pub fn new(domain: Vec<K>) -> Self {
        let current = domain.first().cloned();
        Self { domain, current }
    }

    /// First key of the domain.
    pub fn initial(&self) -> Option<&K> {
        self.domain.first()
    }

    pub fn current(&self) -> Option<&K> {
        self.current.as_ref()
    }

    pub fn domain(&self) -> &[K] {
        &self.domain
    }

    pub fn contains(&self, key: &K) -> bool {
        self.domain.contains(key)
    }

    pub fn select(&mut self, key: K) -> Selection<K> {
        if self.contains(&key) {
            debug!(?key, "selection changed");
            self.current = Some(key.clone());
            Selection::Changed(key)
        } else {
            warn!(?key, "ignoring selection outside the key domain");
            Selection::Unknown
        }
    }
}
