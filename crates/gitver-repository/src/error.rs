use std::path::PathBuf;

/// Errors from repository access.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("{} is not a git repository", .0.display())]
    NotFound(PathBuf),

    #[error(transparent)]
    Git(#[from] git2::Error),

    #[error(transparent)]
    Hash(#[from] gitver_hash::HashError),
}
