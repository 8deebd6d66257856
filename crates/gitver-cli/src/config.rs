use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use gitver_core::DescribeOptions;
use serde::Deserialize;

use crate::commands::DescribeArgs;

/// Per-repository configuration file, at the root of the working tree.
pub const FILE_NAME: &str = ".gitver.toml";

/// Mark used by a bare `--dirty`.
pub const DEFAULT_DIRTY: &str = "-dirty";

/// Commented configuration written by `gitver init`.
pub const TEMPLATE: &str = r#"# gitver configuration.

# Printed instead of failing when no tag is reachable from HEAD.
# fallback = "0.0.0"

[describe]
# Consider lightweight tags as well as annotated ones.
tags = true
# Hex digits of the commit hash in `gitver describe` output.
abbrev = 7
# Stop searching once more than this many tags have been found.
candidates = 10
# Mark appended when tracked files have uncommitted changes ("" disables).
dirty = ""
# Print the tag search trace on stderr.
debug = false

# Pre-release suffix per branch. The first pattern (a regex) matching the
# branch name wins; other branches get <tag>-<distance>.
[[branch]]
pattern = "dev"
suffix = "-alpha"

[[branch]]
pattern = "master"
suffix = "-beta"
"#;

/// Maps branch names to a pre-release suffix.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct BranchRule {
    pub pattern: String,
    pub suffix: String,
}

impl BranchRule {
    pub fn new(pattern: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            suffix: suffix.into(),
        }
    }

    pub fn defaults() -> Vec<BranchRule> {
        vec![
            BranchRule::new("dev", "-alpha"),
            BranchRule::new("master", "-beta"),
        ]
    }
}

/// `[describe]` table. Unset keys fall back to the command-line defaults.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DescribeSection {
    pub tags: Option<bool>,
    pub debug: Option<bool>,
    pub abbrev: Option<usize>,
    pub candidates: Option<usize>,
    pub dirty: Option<String>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub fallback: Option<String>,
    #[serde(default)]
    pub describe: DescribeSection,
    #[serde(default = "BranchRule::defaults", rename = "branch")]
    pub branches: Vec<BranchRule>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fallback: None,
            describe: DescribeSection::default(),
            branches: BranchRule::defaults(),
        }
    }
}

impl Config {
    /// Returns the user-level configuration file path.
    pub fn default_path() -> Option<PathBuf> {
        if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME") {
            return Some(Path::new(&xdg_config).join("gitver/gitver.toml"));
        }

        if let Ok(home) = env::var("HOME") {
            return Some(Path::new(&home).join(".gitver.toml"));
        }

        None
    }

    /// Load configuration. An explicit path must exist; otherwise the
    /// working tree's `.gitver.toml` and then the user file are tried, and
    /// defaults apply when neither exists.
    pub fn load(explicit: Option<&Path>, work_tree: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.is_file() {
                bail!("configuration file '{}' does not exist", path.display());
            }
            return Self::from_file(path);
        }

        let candidates = work_tree
            .map(|dir| dir.join(FILE_NAME))
            .into_iter()
            .chain(Self::default_path());
        for path in candidates {
            if path.is_file() {
                return Self::from_file(&path);
            }
        }

        tracing::debug!("no configuration file found, using defaults");
        Ok(Self::default())
    }

    /// Parse configuration from the file at the supplied path.
    pub fn from_file(path: &Path) -> Result<Self> {
        let context = || {
            format!(
                "failed to read configuration from file '{}'",
                path.display()
            )
        };

        let toml_str = fs::read_to_string(path).with_context(context)?;
        let config = toml::from_str(&toml_str).with_context(context)?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Merge the `[describe]` table with command-line overrides.
    pub fn describe_options(&self, args: &DescribeArgs) -> DescribeOptions {
        let file = &self.describe;
        let dirty = match &args.dirty {
            Some(mark) => mark.clone().unwrap_or_else(|| DEFAULT_DIRTY.to_string()),
            None => file.dirty.clone().unwrap_or_default(),
        };
        DescribeOptions {
            tags: args.tags_override().or(file.tags).unwrap_or(true),
            debug: args.debug || file.debug.unwrap_or(false),
            abbrev: args.abbrev.or(file.abbrev).unwrap_or(0),
            candidates: args.candidates.or(file.candidates).unwrap_or(0),
            dirty,
        }
        .validated()
    }
}
