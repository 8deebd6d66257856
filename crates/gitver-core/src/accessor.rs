//! The read-only view of a repository the describe search needs.

use gitver_hash::ObjectId;

use crate::reference::Reference;

/// A commit as seen by the history walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo {
    pub id: ObjectId,
    pub parents: Vec<ObjectId>,
    /// Committer timestamp (seconds since epoch).
    pub commit_time: i64,
}

/// Access to a version-controlled working tree.
///
/// Implemented over libgit2 by `gitver-repository` and in memory by
/// [`crate::memory::MemoryRepository`]. Errors are passed through the
/// describe search untouched.
pub trait RepositoryAccessor {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Commits reachable from a start point, newest committer time first.
    type Log<'a>: Iterator<Item = Result<CommitInfo, Self::Error>>
    where
        Self: 'a;

    /// Every reference under `refs/tags/`.
    type Tags<'a>: Iterator<Item = Result<Reference, Self::Error>>
    where
        Self: 'a;

    /// The resolved HEAD. A detached checkout is reported with the name
    /// [`crate::reference::DETACHED_HEAD`].
    fn head(&self) -> Result<Reference, Self::Error>;

    fn log(&self, from: ObjectId) -> Result<Self::Log<'_>, Self::Error>;

    fn tags(&self) -> Result<Self::Tags<'_>, Self::Error>;

    /// The commit an annotated tag ultimately points at, or `None` when the
    /// reference is a lightweight tag pointing straight at a commit.
    fn peel_tag(&self, tag: &Reference) -> Result<Option<ObjectId>, Self::Error>;

    /// Whether the working tree has uncommitted changes.
    fn is_dirty(&self) -> Result<bool, Self::Error>;
}
