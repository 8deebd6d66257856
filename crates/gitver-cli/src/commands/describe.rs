use std::io::{self, Write};

use anyhow::Result;

use super::{open_repo, VersionArgs};
use crate::Cli;

pub fn run(args: &VersionArgs, cli: &Cli) -> Result<i32> {
    let (repo, config) = open_repo(&args.target, cli)?;
    let opts = config.describe_options(&args.describe);

    let stderr = io::stderr();
    let describe = gitver_core::find(&repo, &opts, &mut stderr.lock())?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{describe}")?;
    Ok(0)
}
