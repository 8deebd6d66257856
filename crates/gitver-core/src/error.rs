use gitver_hash::ObjectId;

/// Errors from the describe search.
#[derive(Debug, thiserror::Error)]
pub enum DescribeError {
    #[error(
        "It looks like the branch being examined is a detached HEAD pointing to commit {}.\n\
         Without a proper branch name gitver cannot determine the build version.",
        .hash.abbrev(6)
    )]
    DetachedHead { hash: ObjectId },

    #[error("tag not found")]
    TagNotFound,

    /// A failure reported by the repository accessor.
    #[error("repository access failed")]
    Access(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl DescribeError {
    pub fn access<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Access(Box::new(err))
    }
}
