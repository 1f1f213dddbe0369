//! Linked in-memory database of NEOs and their close approaches
//!
//! The database owns both collections as arenas. Each NEO lists the handles of
//! its approaches and each approach carries a [`NeoRef`](crate::NeoRef) back to its NEO, so the
//! one-to-many relation is navigable in both directions without shared
//! ownership.

use serde::Serialize;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::config::{DuplicatePolicy, LinkingConfig};
use crate::error::{Error, Result};
use crate::query::{ApproachFilter, ApproachQuery};
use crate::types::{ApproachId, CloseApproach, LinkedApproach, NearEarthObject, NeoId};

/// Summary of a linking pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LinkReport {
    /// NEOs kept after duplicate resolution
    pub neo_count: usize,
    /// Close approaches ingested
    pub approach_count: usize,
    /// Approaches attached to a NEO
    pub linked: usize,
    /// Approaches whose designation matched no NEO
    pub unlinked: usize,
    /// Duplicate NEO records folded into an earlier entry
    pub duplicates_replaced: usize,
}

/// A collection of NEOs and close approaches, linked by designation
#[derive(Debug)]
pub struct NeoDatabase {
    neos: Vec<NearEarthObject>,
    approaches: Vec<CloseApproach>,
    by_designation: HashMap<String, NeoId>,
    by_name: HashMap<String, NeoId>,
    report: LinkReport,
}

impl NeoDatabase {
    /// Link the given collections, rejecting duplicate designations
    pub fn new(neos: Vec<NearEarthObject>, approaches: Vec<CloseApproach>) -> Result<Self> {
        Self::with_config(neos, approaches, &LinkingConfig::default())
    }

    /// Link the given collections using `config` to settle duplicates
    pub fn with_config(
        neos: Vec<NearEarthObject>,
        approaches: Vec<CloseApproach>,
        config: &LinkingConfig,
    ) -> Result<Self> {
        let mut db = Self {
            neos: Vec::with_capacity(neos.len()),
            approaches,
            by_designation: HashMap::with_capacity(neos.len()),
            by_name: HashMap::new(),
            report: LinkReport::default(),
        };

        db.index_neos(neos, config.duplicate_policy)?;
        db.link_approaches();

        tracing::info!(
            "Linked {} of {} close approaches to {} NEOs ({} unlinked)",
            db.report.linked,
            db.report.approach_count,
            db.report.neo_count,
            db.report.unlinked
        );

        Ok(db)
    }

    fn index_neos(&mut self, neos: Vec<NearEarthObject>, policy: DuplicatePolicy) -> Result<()> {
        for mut neo in neos {
            // Handles are only meaningful inside the arena that issued them
            neo.clear_approaches();
            match self.by_designation.entry(neo.designation().to_string()) {
                Entry::Vacant(slot) => {
                    let id = NeoId(self.neos.len());
                    slot.insert(id);
                    self.neos.push(neo);
                }
                Entry::Occupied(slot) => match policy {
                    DuplicatePolicy::Reject => {
                        return Err(Error::DuplicateDesignation(slot.key().clone()));
                    }
                    DuplicatePolicy::LastWriteWins => {
                        tracing::warn!(
                            "Duplicate NEO designation '{}', keeping the later record",
                            slot.key()
                        );
                        let kept = &mut self.neos[slot.get().0];
                        kept.clear_approaches();
                        kept.replace_attributes(neo);
                        self.report.duplicates_replaced += 1;
                    }
                },
            }
        }

        // Built after duplicates are settled so a replaced name does not linger
        for (index, neo) in self.neos.iter().enumerate() {
            if let Some(name) = neo.name() {
                self.by_name.entry(name.to_string()).or_insert(NeoId(index));
            }
        }

        self.report.neo_count = self.neos.len();
        Ok(())
    }

    fn link_approaches(&mut self) {
        self.report.approach_count = self.approaches.len();

        for (index, approach) in self.approaches.iter_mut().enumerate() {
            let found = approach
                .raw_designation()
                .and_then(|des| self.by_designation.get(des))
                .copied();

            match found {
                Some(neo_id) => {
                    self.neos[neo_id.0].push_approach(ApproachId(index));
                    self.report.linked += 1;
                }
                None => {
                    tracing::debug!(
                        "No NEO matches close approach {} ({:?})",
                        index,
                        approach.raw_designation().unwrap_or_default()
                    );
                    self.report.unlinked += 1;
                }
            }
            approach.resolve(found);
        }

        if self.report.unlinked > 0 {
            tracing::warn!(
                "{} close approaches reference designations with no NEO record",
                self.report.unlinked
            );
        }
    }

    /// All NEOs, in input order
    pub fn neos(&self) -> &[NearEarthObject] {
        &self.neos
    }

    /// All close approaches, in input order
    pub fn approaches(&self) -> &[CloseApproach] {
        &self.approaches
    }

    pub fn neo(&self, id: NeoId) -> Option<&NearEarthObject> {
        self.neos.get(id.0)
    }

    pub fn approach(&self, id: ApproachId) -> Option<&CloseApproach> {
        self.approaches.get(id.0)
    }

    /// The NEO an approach was linked to, if any
    pub fn neo_for(&self, approach: &CloseApproach) -> Option<&NearEarthObject> {
        approach.neo().neo_id().and_then(|id| self.neo(id))
    }

    /// Close approaches of a NEO, in input order
    pub fn approaches_for<'a>(
        &'a self,
        neo: &'a NearEarthObject,
    ) -> impl Iterator<Item = LinkedApproach<'a>> + 'a {
        neo.approaches().iter().filter_map(move |&id| {
            self.approaches.get(id.0).map(|approach| LinkedApproach {
                id,
                approach,
                neo: Some(neo),
            })
        })
    }

    /// Resolve one approach into a view carrying its NEO
    pub fn linked(&self, id: ApproachId) -> Option<LinkedApproach<'_>> {
        self.approach(id).map(|approach| LinkedApproach {
            id,
            approach,
            neo: self.neo_for(approach),
        })
    }

    /// Find a NEO by its primary designation
    pub fn get_neo_by_designation(&self, designation: &str) -> Option<&NearEarthObject> {
        self.by_designation
            .get(designation)
            .and_then(|&id| self.neo(id))
    }

    /// Find a NEO by its IAU name (exact, case-sensitive)
    pub fn get_neo_by_name(&self, name: &str) -> Option<&NearEarthObject> {
        if name.is_empty() {
            return None;
        }
        self.by_name.get(name).and_then(|&id| self.neo(id))
    }

    /// Lazily iterate over the close approaches matching every filter
    pub fn query<'a>(&'a self, filters: &'a [ApproachFilter]) -> ApproachQuery<'a> {
        ApproachQuery::new(self, filters)
    }

    pub fn link_report(&self) -> &LinkReport {
        &self.report
    }
}
