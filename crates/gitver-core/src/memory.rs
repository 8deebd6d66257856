//! An in-memory repository for tests and benchmarks.
//!
//! Commits and tags get deterministic ids, and history is walked newest
//! committer time first from the start point, the way `git log` orders it.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use gitver_hash::ObjectId;

use crate::accessor::{CommitInfo, RepositoryAccessor};
use crate::reference::{Reference, DETACHED_HEAD};

/// Base committer timestamp for generated commits.
const BASE_TIME: i64 = 1_700_000_000;

/// Errors from [`MemoryRepository`].
#[derive(Debug, thiserror::Error)]
pub enum MemoryError {
    #[error("HEAD is not set")]
    NoHead,

    #[error("commit not found: {0}")]
    CommitNotFound(ObjectId),
}

#[derive(Debug, Default)]
pub struct MemoryRepository {
    commits: HashMap<ObjectId, CommitInfo>,
    head: Option<Reference>,
    tags: Vec<Reference>,
    /// Annotated tag object id → the commit it targets.
    tag_objects: HashMap<ObjectId, ObjectId>,
    dirty: bool,
    next_commit: u32,
    next_tag: u32,
}

fn make_oid(kind: u8, n: u32) -> ObjectId {
    let mut bytes = [0u8; 20];
    bytes[0] = kind;
    bytes[16..].copy_from_slice(&n.to_be_bytes());
    ObjectId::Sha1(bytes)
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a commit with the given parents, one second newer than the
    /// previous one.
    pub fn commit(&mut self, parents: &[ObjectId]) -> ObjectId {
        let time = BASE_TIME + i64::from(self.next_commit);
        self.commit_at(parents, time)
    }

    /// Add a commit with an explicit committer timestamp.
    pub fn commit_at(&mut self, parents: &[ObjectId], commit_time: i64) -> ObjectId {
        self.next_commit += 1;
        let id = make_oid(0xc0, self.next_commit);
        self.commits.insert(
            id,
            CommitInfo {
                id,
                parents: parents.to_vec(),
                commit_time,
            },
        );
        id
    }

    /// Add `n` commits in a line on top of `parent` and return their ids,
    /// oldest first.
    pub fn linear(&mut self, parent: Option<ObjectId>, n: usize) -> Vec<ObjectId> {
        let mut ids = Vec::with_capacity(n);
        let mut tip = parent;
        for _ in 0..n {
            let id = self.commit(tip.as_slice());
            ids.push(id);
            tip = Some(id);
        }
        ids
    }

    /// Point HEAD at `refs/heads/<branch>`.
    pub fn checkout_branch(&mut self, branch: &str, commit: ObjectId) {
        self.head = Some(Reference::new(format!("refs/heads/{branch}"), commit));
    }

    /// Detach HEAD at `commit`.
    pub fn detach(&mut self, commit: ObjectId) {
        self.head = Some(Reference::new(DETACHED_HEAD, commit));
    }

    pub fn lightweight_tag(&mut self, name: &str, commit: ObjectId) {
        self.tags.push(Reference::new(format!("refs/tags/{name}"), commit));
    }

    /// Create a tag object pointing at `commit` and a ref to it; returns the
    /// tag object's id.
    pub fn annotated_tag(&mut self, name: &str, commit: ObjectId) -> ObjectId {
        self.next_tag += 1;
        let tag_oid = make_oid(0x7a, self.next_tag);
        self.tag_objects.insert(tag_oid, commit);
        self.tags.push(Reference::new(format!("refs/tags/{name}"), tag_oid));
        tag_oid
    }

    pub fn set_dirty(&mut self, dirty: bool) {
        self.dirty = dirty;
    }
}

/// Queue entry ordering: newer commit time first, then insertion order.
struct WalkEntry {
    commit_time: i64,
    insertion_ctr: u64,
    id: ObjectId,
}

impl PartialEq for WalkEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for WalkEntry {}

impl PartialOrd for WalkEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for WalkEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.commit_time
            .cmp(&other.commit_time)
            .then_with(|| other.insertion_ctr.cmp(&self.insertion_ctr))
    }
}

/// Lazy committer-time walk over a [`MemoryRepository`].
pub struct MemoryLog<'a> {
    repo: &'a MemoryRepository,
    queue: BinaryHeap<WalkEntry>,
    seen: HashSet<ObjectId>,
    insertion_ctr: u64,
    pending_error: Option<MemoryError>,
}

impl<'a> MemoryLog<'a> {
    fn new(repo: &'a MemoryRepository, from: ObjectId) -> Self {
        let mut log = Self {
            repo,
            queue: BinaryHeap::new(),
            seen: HashSet::new(),
            insertion_ctr: 0,
            pending_error: None,
        };
        log.push(from);
        log
    }

    fn push(&mut self, id: ObjectId) {
        if !self.seen.insert(id) {
            return;
        }
        match self.repo.commits.get(&id) {
            Some(commit) => {
                self.insertion_ctr += 1;
                self.queue.push(WalkEntry {
                    commit_time: commit.commit_time,
                    insertion_ctr: self.insertion_ctr,
                    id,
                });
            }
            None => {
                if self.pending_error.is_none() {
                    self.pending_error = Some(MemoryError::CommitNotFound(id));
                }
            }
        }
    }
}

impl Iterator for MemoryLog<'_> {
    type Item = Result<CommitInfo, MemoryError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(err) = self.pending_error.take() {
            return Some(Err(err));
        }
        let entry = self.queue.pop()?;
        let commit = self.repo.commits.get(&entry.id)?.clone();
        for parent in &commit.parents {
            self.push(*parent);
        }
        Some(Ok(commit))
    }
}

impl RepositoryAccessor for MemoryRepository {
    type Error = MemoryError;
    type Log<'a> = MemoryLog<'a>;
    type Tags<'a> = std::iter::Map<
        std::slice::Iter<'a, Reference>,
        fn(&Reference) -> Result<Reference, MemoryError>,
    >;

    fn head(&self) -> Result<Reference, MemoryError> {
        self.head.clone().ok_or(MemoryError::NoHead)
    }

    fn log(&self, from: ObjectId) -> Result<MemoryLog<'_>, MemoryError> {
        Ok(MemoryLog::new(self, from))
    }

    fn tags(&self) -> Result<Self::Tags<'_>, MemoryError> {
        let to_ok: fn(&Reference) -> Result<Reference, MemoryError> = |r| Ok(r.clone());
        Ok(self.tags.iter().map(to_ok))
    }

    fn peel_tag(&self, tag: &Reference) -> Result<Option<ObjectId>, MemoryError> {
        Ok(self.tag_objects.get(&tag.target()).copied())
    }

    fn is_dirty(&self) -> Result<bool, MemoryError> {
        Ok(self.dirty)
    }
}
