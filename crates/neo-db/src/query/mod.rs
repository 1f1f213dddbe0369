//! Filtered queries over linked close approaches

mod filters;

pub use filters::{limit, ApproachFilter, Comparison, FilterSet, Predicate};

use std::iter::FusedIterator;

use crate::database::NeoDatabase;
use crate::types::{ApproachId, LinkedApproach};

/// Lazy iterator over the approaches that satisfy every filter
///
/// Approaches are yielded in input order. The query holds only borrows and a
/// cursor, so cloning it (or calling [`rewind`](Self::rewind)) restarts the scan.
#[derive(Debug, Clone)]
pub struct ApproachQuery<'a> {
    db: &'a NeoDatabase,
    filters: &'a [ApproachFilter],
    cursor: usize,
}

impl<'a> ApproachQuery<'a> {
    pub(crate) fn new(db: &'a NeoDatabase, filters: &'a [ApproachFilter]) -> Self {
        Self {
            db,
            filters,
            cursor: 0,
        }
    }

    /// Start over from the first approach
    pub fn rewind(&mut self) {
        self.cursor = 0;
    }
}

impl<'a> Iterator for ApproachQuery<'a> {
    type Item = LinkedApproach<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let approaches = self.db.approaches();
        while self.cursor < approaches.len() {
            let id = ApproachId(self.cursor);
            self.cursor += 1;

            let approach = &approaches[id.0];
            let candidate = LinkedApproach {
                id,
                approach,
                neo: self.db.neo_for(approach),
            };
            if self.filters.iter().all(|filter| filter.matches(&candidate)) {
                return Some(candidate);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.db.approaches().len().saturating_sub(self.cursor);
        if self.filters.is_empty() {
            (remaining, Some(remaining))
        } else {
            (0, Some(remaining))
        }
    }
}

impl FusedIterator for ApproachQuery<'_> {}
