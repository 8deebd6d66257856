use std::collections::hash_map::Entry;
use std::collections::HashMap;

use gitver_hash::ObjectId;

use crate::accessor::RepositoryAccessor;
use crate::error::DescribeError;
use crate::reference::Reference;

/// A tag as recorded in the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagEntry {
    pub reference: Reference,
    pub annotated: bool,
}

impl TagEntry {
    /// Whether `self` should win over `other` when both tag the same commit:
    /// annotated beats lightweight, then the smaller short name wins.
    fn outranks(&self, other: &TagEntry) -> bool {
        match (self.annotated, other.annotated) {
            (true, false) => true,
            (false, true) => false,
            _ => self.reference.short_name() < other.reference.short_name(),
        }
    }
}

/// Commit id → the tag that names it.
///
/// Built once per describe and drained by the search: every match is
/// removed, so a tag is reported at most once and an empty index ends the
/// walk.
#[derive(Debug, Default)]
pub struct TagIndex {
    entries: HashMap<ObjectId, TagEntry>,
}

impl TagIndex {
    /// Index every tag the accessor knows about in one pass.
    ///
    /// Annotated tags are keyed by the commit they target, lightweight tags
    /// by their own hash.
    pub fn build<R>(repo: &R) -> Result<Self, DescribeError>
    where
        R: RepositoryAccessor + ?Sized,
    {
        let mut index = Self::default();
        for tag in repo.tags().map_err(DescribeError::access)? {
            let tag = tag.map_err(DescribeError::access)?;
            match repo.peel_tag(&tag).map_err(DescribeError::access)? {
                Some(commit) => index.insert(commit, tag, true),
                None => {
                    let commit = tag.target();
                    index.insert(commit, tag, false);
                }
            }
        }
        tracing::debug!(tags = index.len(), "built tag index");
        Ok(index)
    }

    /// Record `tag` as naming `commit`, keeping whichever entry outranks
    /// the other if the commit is already tagged.
    pub fn insert(&mut self, commit: ObjectId, reference: Reference, annotated: bool) {
        let entry = TagEntry {
            reference,
            annotated,
        };
        match self.entries.entry(commit) {
            Entry::Vacant(slot) => {
                slot.insert(entry);
            }
            Entry::Occupied(mut slot) => {
                if entry.outranks(slot.get()) {
                    slot.insert(entry);
                }
            }
        }
    }

    /// Remove and return the tag naming `commit`, if any.
    pub fn take(&mut self, commit: &ObjectId) -> Option<TagEntry> {
        self.entries.remove(commit)
    }

    #[cfg(test)]
    fn get(&self, commit: &ObjectId) -> Option<&TagEntry> {
        self.entries.get(commit)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
