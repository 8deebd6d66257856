//! The describe search: nearest tag reachable from HEAD.

use std::fmt;
use std::io::Write;

use gitver_hash::ObjectId;

use crate::accessor::{CommitInfo, RepositoryAccessor};
use crate::error::DescribeError;
use crate::head::ensure_head_not_detached;
use crate::options::DescribeOptions;
use crate::reference::Reference;
use crate::tag_index::TagIndex;

/// A tag found while walking history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescribeCandidate {
    pub tag: Reference,
    pub annotated: bool,
    /// Commits visited before reaching the tagged one.
    pub distance: usize,
}

/// The outcome of a describe: HEAD named by its nearest tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Describe {
    /// The head being described.
    pub reference: Reference,
    /// The selected tag.
    pub tag: Option<Reference>,
    /// Distance to the tag in commits.
    pub distance: usize,
    /// Dirty mark to append; empty for a clean tree.
    pub dirty: String,
    /// Hex digits of the head hash to display.
    pub abbrev: usize,
}

impl Describe {
    /// The dirty mark without its separator: one leading `-` is dropped, so
    /// "-dirty" and "dirty" both yield "dirty". Empty for a clean tree.
    pub fn dirty_mark(&self) -> &str {
        self.dirty.strip_prefix('-').unwrap_or(&self.dirty)
    }
}

/// Renders `<tag>[-<distance>]-g<hash>[-<dirty>]`.
impl fmt::Display for Describe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::with_capacity(4);
        if let Some(tag) = &self.tag {
            parts.push(tag.short_name().to_string());
        }
        if self.distance > 0 {
            parts.push(self.distance.to_string());
        }
        parts.push(format!("g{}", self.reference.target().abbrev(self.abbrev)));
        let dirty = self.dirty_mark();
        if !dirty.is_empty() {
            parts.push(dirty.to_string());
        }
        f.write_str(&parts.join("-"))
    }
}

/// Search trace sink, silent unless `debug` is set.
struct Diagnostics<'w> {
    sink: Option<&'w mut dyn Write>,
}

impl<'w> Diagnostics<'w> {
    fn new(enabled: bool, sink: &'w mut dyn Write) -> Self {
        Self {
            sink: enabled.then_some(sink),
        }
    }

    // Trace output never affects the result, so write errors are dropped.
    fn line(&mut self, args: fmt::Arguments<'_>) {
        if let Some(sink) = self.sink.as_mut() {
            let _ = sink.write_fmt(args);
            let _ = sink.write_all(b"\n");
        }
    }
}

/// Describe HEAD of `repo`, like `git describe`.
///
/// Fails with `DetachedHead` before touching history when HEAD is not a
/// branch, and with `TagNotFound` when no acceptable tag is reachable. The
/// search trace goes to `trace` when `opts.debug` is set.
pub fn find<R>(
    repo: &R,
    opts: &DescribeOptions,
    trace: &mut dyn Write,
) -> Result<Describe, DescribeError>
where
    R: RepositoryAccessor + ?Sized,
{
    let opts = opts.clone().validated();
    let head = ensure_head_not_detached(repo.head().map_err(DescribeError::access)?)?;

    let mut index = TagIndex::build(repo)?;
    let history = repo.log(head.target()).map_err(DescribeError::access)?;
    let mut describe = search(head, history, &mut index, &opts, trace)?;

    if !opts.dirty.is_empty() && repo.is_dirty().map_err(DescribeError::access)? {
        describe.dirty = opts.dirty;
    }
    Ok(describe)
}

/// Walk `history` from `head` and pick the nearest acceptable tag.
///
/// The walk runs in rounds, each stopping at the first commit the index
/// names and the next one resuming from the same cursor. Matches are taken
/// out of `index`. Every tag found counts towards `opts.candidates`, but
/// only annotated tags are accepted unless `opts.tags` is set. The search
/// ends once more than `opts.candidates` tags were found, the index is
/// drained, or history runs out.
///
/// Distance counts commits in the order `history` yields them, which for a
/// committer-time walk differs from graph distance across merges.
pub fn search<I, E>(
    head: Reference,
    history: I,
    index: &mut TagIndex,
    opts: &DescribeOptions,
    trace: &mut dyn Write,
) -> Result<Describe, DescribeError>
where
    I: IntoIterator<Item = Result<CommitInfo, E>>,
    E: std::error::Error + Send + Sync + 'static,
{
    let mut diag = Diagnostics::new(opts.debug, trace);
    let mut history = history.into_iter();
    let mut accepted: Vec<DescribeCandidate> = Vec::new();
    let mut candidates_found = 0usize;
    let mut traversed = 0usize;
    let mut last_commit: Option<ObjectId> = None;

    diag.line(format_args!("searching to describe {}", head.name()));

    while !index.is_empty() && candidates_found <= opts.candidates {
        let mut found = None;
        for commit in history.by_ref() {
            let commit = commit.map_err(DescribeError::access)?;
            let distance = traversed;
            traversed += 1;
            last_commit = Some(commit.id);
            if let Some(entry) = index.take(&commit.id) {
                found = Some(DescribeCandidate {
                    tag: entry.reference,
                    annotated: entry.annotated,
                    distance,
                });
                break;
            }
        }
        let Some(candidate) = found else {
            break;
        };

        candidates_found += 1;
        if (candidate.annotated || opts.tags) && candidates_found <= opts.candidates {
            accepted.push(candidate);
        }
    }

    for c in &accepted {
        let kind = if c.annotated { "annotated" } else { "lightweight" };
        diag.line(format_args!(" {:<11} {:>8} {}", kind, c.distance, c.tag.short_name()));
    }
    diag.line(format_args!("traversed {} commits", traversed));
    if candidates_found > opts.candidates {
        diag.line(format_args!(
            "more than {} tags found; listed {} most recent",
            opts.candidates,
            accepted.len()
        ));
    }
    if let Some(last) = last_commit {
        diag.line(format_args!("gave up search at {}", last));
    }

    tracing::debug!(
        traversed,
        candidates_found,
        accepted = accepted.len(),
        "describe search finished"
    );

    let best = accepted.into_iter().next().ok_or(DescribeError::TagNotFound)?;
    Ok(Describe {
        reference: head,
        tag: Some(best.tag),
        distance: best.distance,
        dirty: String::new(),
        abbrev: opts.abbrev,
    })
}
