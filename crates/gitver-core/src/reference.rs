use std::fmt;

use bstr::{BStr, BString, ByteSlice};
use gitver_hash::ObjectId;

/// Name git reports for HEAD when it points straight at a commit.
pub const DETACHED_HEAD: &str = "HEAD";

/// A full reference name such as `refs/heads/main` or `refs/tags/v1.0.0`.
///
/// Names are kept as bytes; git does not guarantee UTF-8 ref names.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RefName(BString);

impl RefName {
    pub fn new(name: impl Into<BString>) -> Self {
        Self(name.into())
    }

    /// Get the short name (e.g., `main` from `refs/heads/main`).
    pub fn short_name(&self) -> &BStr {
        let s = self.0.as_bstr();
        for prefix in [&b"refs/heads/"[..], b"refs/tags/", b"refs/remotes/"] {
            if let Some(rest) = s.strip_prefix(prefix) {
                return rest.as_bstr();
            }
        }
        s
    }

    /// True for the synthetic `HEAD` name of a detached checkout.
    pub fn is_detached_head(&self) -> bool {
        self.0 == DETACHED_HEAD
    }

    pub fn as_bstr(&self) -> &BStr {
        self.0.as_bstr()
    }
}

impl fmt::Display for RefName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.0.as_bstr(), f)
    }
}

/// A named pointer to an object: a branch, a tag, or a detached HEAD.
///
/// For tags the target is the ref's own hash, which is the tag object for
/// annotated tags and the commit itself for lightweight ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    name: RefName,
    target: ObjectId,
}

impl Reference {
    pub fn new(name: impl Into<BString>, target: ObjectId) -> Self {
        Self {
            name: RefName::new(name),
            target,
        }
    }

    pub fn name(&self) -> &RefName {
        &self.name
    }

    pub fn target(&self) -> ObjectId {
        self.target
    }

    pub fn short_name(&self) -> &BStr {
        self.name.short_name()
    }
}
