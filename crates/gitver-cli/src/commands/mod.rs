pub mod describe;
pub mod init;
pub mod version;

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use gitver_repository::Repository;

use crate::config::Config;
use crate::Cli;

#[derive(Subcommand)]
pub enum Commands {
    /// Print the describe string: <tag>[-<distance>]-g<hash>[<dirty>]
    Describe(VersionArgs),
    /// Write a commented default .gitver.toml
    Init(init::InitArgs),
}

/// Repository selection, shared by every command that reads one.
#[derive(Args, Debug, Default, Clone, PartialEq, Eq)]
pub struct TargetArgs {
    /// Path inside the repository to examine
    #[arg(value_name = "PATH")]
    path: Option<PathBuf>,

    /// Same as PATH
    #[arg(long = "path", value_name = "PATH", conflicts_with = "path")]
    path_flag: Option<PathBuf>,
}

impl TargetArgs {
    pub fn path(&self) -> &Path {
        self.explicit().unwrap_or(Path::new("."))
    }

    /// The path given on the command line, if any.
    pub fn explicit(&self) -> Option<&Path> {
        self.path.as_deref().or(self.path_flag.as_deref())
    }
}

/// Flags controlling the tag search. Unset flags defer to the config file.
#[derive(Args, Debug, Default, Clone, PartialEq, Eq)]
pub struct DescribeArgs {
    /// Use any tag, not just annotated (the default)
    #[arg(long, overrides_with = "no_tags")]
    pub(crate) tags: bool,

    /// Only consider annotated tags
    #[arg(long, overrides_with = "tags")]
    pub(crate) no_tags: bool,

    /// Print the tag search trace on stderr
    #[arg(long)]
    pub(crate) debug: bool,

    /// Number of hex digits for abbreviation
    #[arg(long, value_name = "N")]
    pub(crate) abbrev: Option<usize>,

    /// Stop after finding more than N tags
    #[arg(long, value_name = "N")]
    pub(crate) candidates: Option<usize>,

    /// Append a mark if tracked files are modified (default mark: -dirty)
    #[arg(long, value_name = "MARK", require_equals = true)]
    pub(crate) dirty: Option<Option<String>>,
}

impl DescribeArgs {
    /// `--tags` / `--no-tags`, whichever was given.
    pub fn tags_override(&self) -> Option<bool> {
        if self.tags {
            Some(true)
        } else if self.no_tags {
            Some(false)
        } else {
            None
        }
    }
}

#[derive(Args, Debug, Default, Clone, PartialEq, Eq)]
pub struct VersionArgs {
    #[command(flatten)]
    pub(crate) target: TargetArgs,

    #[command(flatten)]
    pub(crate) describe: DescribeArgs,
}

impl VersionArgs {
    /// Fill anything not given after a subcommand from what was given
    /// before it, so `gitver --abbrev 12 describe` keeps the flag.
    pub fn inherit(&self, outer: &VersionArgs) -> VersionArgs {
        let target = if self.target.explicit().is_some() {
            self.target.clone()
        } else {
            outer.target.clone()
        };
        let inner = &self.describe;
        let (tags, no_tags) = if inner.tags_override().is_some() {
            (inner.tags, inner.no_tags)
        } else {
            (outer.describe.tags, outer.describe.no_tags)
        };
        VersionArgs {
            target,
            describe: DescribeArgs {
                tags,
                no_tags,
                debug: inner.debug || outer.describe.debug,
                abbrev: inner.abbrev.or(outer.describe.abbrev),
                candidates: inner.candidates.or(outer.describe.candidates),
                dirty: inner.dirty.clone().or_else(|| outer.describe.dirty.clone()),
            },
        }
    }
}

/// Open the repository containing the target path and its configuration.
pub fn open_repo(target: &TargetArgs, cli: &Cli) -> Result<(Repository, Config)> {
    let repo = Repository::discover(target.path())?;
    let work_tree = repo.work_tree();
    let config = Config::load(cli.config.as_deref(), work_tree.as_deref())?;
    Ok((repo, config))
}

pub fn run(cli: Cli) -> Result<i32> {
    match &cli.command {
        Some(Commands::Describe(args)) => describe::run(&args.inherit(&cli.version), &cli),
        Some(Commands::Init(args)) => {
            if cli.version.describe != DescribeArgs::default() {
                bail!("describe options cannot be used with init");
            }
            init::run(args, &cli)
        }
        None => version::run(&cli.version, &cli),
    }
}
