//! Repository access for gitver, backed by libgit2.
//!
//! [`Repository`] opens a working tree and implements
//! [`gitver_core::RepositoryAccessor`]: HEAD resolution, a committer-time
//! history walk, tag enumeration and peeling, and working-tree status.

mod error;
mod walk;

pub use error::RepoError;
pub use walk::{History, TagRefs};

use std::path::{Path, PathBuf};

use git2::{ErrorCode, ObjectType, Sort, Status, StatusOptions};
use gitver_core::{Reference, RepositoryAccessor, DETACHED_HEAD};
use gitver_hash::ObjectId;

pub(crate) fn to_object_id(oid: git2::Oid) -> Result<ObjectId, RepoError> {
    Ok(ObjectId::from_bytes(oid.as_bytes())?)
}

pub(crate) fn to_git2_oid(oid: ObjectId) -> Result<git2::Oid, RepoError> {
    Ok(git2::Oid::from_bytes(oid.as_bytes())?)
}

pub struct Repository {
    repo: git2::Repository,
}

impl std::fmt::Debug for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("git_dir", &self.repo.path())
            .field("work_tree", &self.repo.workdir())
            .finish_non_exhaustive()
    }
}

fn not_found(path: &Path, err: git2::Error) -> RepoError {
    if err.code() == ErrorCode::NotFound {
        RepoError::NotFound(path.to_path_buf())
    } else {
        RepoError::Git(err)
    }
}

impl Repository {
    /// Open the repository whose working tree (or git dir) is exactly `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, RepoError> {
        let path = path.as_ref();
        let repo = git2::Repository::open(path).map_err(|e| not_found(path, e))?;
        tracing::debug!(path = %path.display(), "opened repository");
        Ok(Self { repo })
    }

    /// Find the repository containing `start`, walking up parent directories.
    pub fn discover(start: impl AsRef<Path>) -> Result<Self, RepoError> {
        let start = start.as_ref();
        let repo = git2::Repository::discover(start).map_err(|e| not_found(start, e))?;
        tracing::debug!(
            start = %start.display(),
            git_dir = %repo.path().display(),
            "discovered repository"
        );
        Ok(Self { repo })
    }

    /// Path to the working tree (None for bare repos).
    pub fn work_tree(&self) -> Option<PathBuf> {
        self.repo.workdir().map(Path::to_path_buf)
    }
}

impl RepositoryAccessor for Repository {
    type Error = RepoError;
    type Log<'a> = History<'a>;
    type Tags<'a> = TagRefs<'a>;

    fn head(&self) -> Result<Reference, RepoError> {
        let head = self.repo.head()?;
        let target = to_object_id(head.peel_to_commit()?.id())?;
        let reference = if self.repo.head_detached()? {
            Reference::new(DETACHED_HEAD, target)
        } else {
            Reference::new(head.name_bytes(), target)
        };
        tracing::debug!(head = %reference.name(), "resolved HEAD");
        Ok(reference)
    }

    fn log(&self, from: ObjectId) -> Result<History<'_>, RepoError> {
        let mut walk = self.repo.revwalk()?;
        walk.set_sorting(Sort::TIME)?;
        walk.push(to_git2_oid(from)?)?;
        Ok(History::new(&self.repo, walk))
    }

    fn tags(&self) -> Result<TagRefs<'_>, RepoError> {
        Ok(TagRefs::new(self.repo.references_glob("refs/tags/*")?))
    }

    fn peel_tag(&self, tag: &Reference) -> Result<Option<ObjectId>, RepoError> {
        let object = self.repo.find_object(to_git2_oid(tag.target())?, None)?;
        if object.kind() != Some(ObjectType::Tag) {
            return Ok(None);
        }
        // Tags of trees or blobs never match a commit in the walk.
        match object.peel_to_commit() {
            Ok(commit) => Ok(Some(to_object_id(commit.id())?)),
            Err(err) => {
                tracing::debug!(
                    tag = %tag.name(),
                    %err,
                    "annotated tag does not point at a commit"
                );
                Ok(None)
            }
        }
    }

    fn is_dirty(&self) -> Result<bool, RepoError> {
        if self.repo.is_bare() {
            return Ok(false);
        }
        let mut opts = StatusOptions::new();
        opts.include_untracked(false)
            .include_ignored(false)
            .exclude_submodules(true);
        let statuses = self.repo.statuses(Some(&mut opts))?;
        let dirty = statuses.iter().any(|entry| entry.status() != Status::CURRENT);
        tracing::debug!(dirty, "checked working tree status");
        Ok(dirty)
    }
}
