//! Iterators handed to the describe search.

use gitver_core::{CommitInfo, Reference};

use crate::{to_object_id, RepoError};

/// Commits reachable from a start point, newest committer time first.
pub struct History<'a> {
    repo: &'a git2::Repository,
    walk: git2::Revwalk<'a>,
}

impl<'a> History<'a> {
    pub(crate) fn new(repo: &'a git2::Repository, walk: git2::Revwalk<'a>) -> Self {
        Self { repo, walk }
    }

    fn load(&self, oid: git2::Oid) -> Result<CommitInfo, RepoError> {
        let commit = self.repo.find_commit(oid)?;
        let parents = commit
            .parent_ids()
            .map(to_object_id)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(CommitInfo {
            id: to_object_id(oid)?,
            parents,
            commit_time: commit.time().seconds(),
        })
    }
}

impl Iterator for History<'_> {
    type Item = Result<CommitInfo, RepoError>;

    fn next(&mut self) -> Option<Self::Item> {
        let oid = match self.walk.next()? {
            Ok(oid) => oid,
            Err(err) => return Some(Err(err.into())),
        };
        Some(self.load(oid))
    }
}

/// References under `refs/tags/`, resolved to the object they name.
pub struct TagRefs<'a> {
    refs: git2::References<'a>,
}

impl<'a> TagRefs<'a> {
    pub(crate) fn new(refs: git2::References<'a>) -> Self {
        Self { refs }
    }

    fn convert(reference: git2::Reference<'_>) -> Result<Option<Reference>, RepoError> {
        let resolved = reference.resolve()?;
        match resolved.target() {
            Some(oid) => Ok(Some(Reference::new(
                reference.name_bytes(),
                to_object_id(oid)?,
            ))),
            None => Ok(None),
        }
    }
}

impl Iterator for TagRefs<'_> {
    type Item = Result<Reference, RepoError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let reference = match self.refs.next()? {
                Ok(reference) => reference,
                Err(err) => return Some(Err(err.into())),
            };
            match Self::convert(reference) {
                Ok(Some(tag)) => return Some(Ok(tag)),
                Ok(None) => continue,
                Err(err) => return Some(Err(err)),
            }
        }
    }
}
