use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use crate::config::{FILE_NAME, TEMPLATE};
use crate::Cli;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing configuration file
    #[arg(short, long)]
    force: bool,

    /// Directory to write the configuration into
    #[arg(value_name = "PATH")]
    directory: Option<PathBuf>,
}

pub fn run(args: &InitArgs, cli: &Cli) -> Result<i32> {
    // `gitver DIR init` names the directory before the subcommand.
    let directory = args
        .directory
        .as_deref()
        .or_else(|| cli.version.target.explicit());
    let target = match directory {
        Some(dir) => dir.to_path_buf(),
        None => std::env::current_dir()?,
    };
    if !target.is_dir() {
        bail!("'{}' is not a directory", target.display());
    }

    let path = target.join(FILE_NAME);
    if path.exists() && !args.force {
        bail!(
            "'{}' already exists (use --force to overwrite)",
            path.display()
        );
    }

    fs::write(&path, TEMPLATE)
        .with_context(|| format!("failed to write '{}'", path.display()))?;
    tracing::debug!(path = %path.display(), "wrote configuration");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "Wrote {}", path.display())?;
    Ok(0)
}
