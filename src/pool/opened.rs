//! Opened-case tracking.
//!
//! `OpenedCases` only grows: there is no removal API, so the opened set of a
//! play-through is monotonic by construction. Backed by `im::OrdSet` so
//! snapshots of a play-through clone in O(1) and iterate in case order.

use im::OrdSet;
use serde::{Deserialize, Serialize};

use crate::core::CaseNumber;

/// Insert-only set of opened case numbers.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenedCases {
    inner: OrdSet<CaseNumber>,
}

impl OpenedCases {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a case opened.
    ///
    /// Returns false if it was already open.
    pub fn insert(&mut self, number: CaseNumber) -> bool {
        self.inner.insert(number).is_none()
    }

    /// Is the case open?
    #[must_use]
    pub fn contains(&self, number: CaseNumber) -> bool {
        self.inner.contains(&number)
    }

    /// Number of opened cases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// True if nothing has been opened.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Iterate in ascending case order.
    pub fn iter(&self) -> impl Iterator<Item = CaseNumber> + '_ {
        self.inner.iter().copied()
    }
}

impl FromIterator<CaseNumber> for OpenedCases {
    fn from_iter<I: IntoIterator<Item = CaseNumber>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().collect(),
        }
    }
}
