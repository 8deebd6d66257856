use anyhow::{Context, Result};
use gitver_core::Describe;
use regex::Regex;

use crate::config::BranchRule;

/// Turns a describe result into a product version for the current branch.
#[derive(Debug)]
pub struct VersionPolicy {
    rules: Vec<(Regex, String)>,
}

impl VersionPolicy {
    pub fn new(rules: &[BranchRule]) -> Result<Self> {
        let rules = rules
            .iter()
            .map(|rule| {
                let regex = Regex::new(&rule.pattern)
                    .with_context(|| format!("invalid branch pattern '{}'", rule.pattern))?;
                Ok((regex, rule.suffix.clone()))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    /// Suffix of the first rule matching `branch`.
    pub fn suffix_for(&self, branch: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|(regex, _)| regex.is_match(branch))
            .map(|(_, suffix)| suffix.as_str())
    }

    /// `<tag>` on a tagged commit, else `<tag><suffix><distance>` with the
    /// branch suffix or `-` when no rule matches. A dirty mark is appended.
    pub fn version(&self, describe: &Describe, branch: &str) -> String {
        let mut version = describe
            .tag
            .as_ref()
            .map(|tag| tag.short_name().to_string())
            .unwrap_or_default();

        if describe.distance != 0 {
            let suffix = self.suffix_for(branch).unwrap_or("-");
            version.push_str(&format!("{suffix}{}", describe.distance));
        }

        let dirty = describe.dirty_mark();
        if !dirty.is_empty() {
            version.push('-');
            version.push_str(dirty);
        }

        tracing::debug!(branch, %version, "applied version policy");
        version
    }
}
