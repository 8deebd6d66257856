use crate::error::DescribeError;
use crate::reference::Reference;

/// Ensure HEAD goes through a named branch.
///
/// Returns the reference unchanged, or `DetachedHead` carrying the commit
/// HEAD points at.
pub fn ensure_head_not_detached(head: Reference) -> Result<Reference, DescribeError> {
    tracing::debug!("ensuring head is not detached");
    if head.name().is_detached_head() {
        return Err(DescribeError::DetachedHead {
            hash: head.target(),
        });
    }
    Ok(head)
}
