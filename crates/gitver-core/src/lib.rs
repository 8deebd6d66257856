//! Tag resolution for gitver.
//!
//! Given a repository seen through [`RepositoryAccessor`], find the nearest
//! tag reachable from the current branch tip and describe HEAD relative to
//! it as `<tag>[-<distance>]-g<hash>[-dirty]`, the `git describe` shape.
//!
//! The pieces run in this order: [`ensure_head_not_detached`] rejects a
//! detached HEAD, [`TagIndex::build`] maps commits to tags, [`search`] walks
//! history and ranks the tags it meets, and [`Describe`]'s `Display` renders
//! the result. [`find`] ties them together.

mod accessor;
mod describe;
mod error;
mod head;
pub mod memory;
mod options;
mod reference;
mod tag_index;

pub use accessor::{CommitInfo, RepositoryAccessor};
pub use describe::{find, search, Describe, DescribeCandidate};
pub use error::DescribeError;
pub use head::ensure_head_not_detached;
pub use options::{DescribeOptions, DEFAULT_ABBREV, DEFAULT_CANDIDATES};
pub use reference::{RefName, Reference, DETACHED_HEAD};
pub use tag_index::{TagEntry, TagIndex};

pub use gitver_hash::ObjectId;
