use std::io::{self, Write};

use anyhow::Result;
use bstr::ByteSlice;
use gitver_core::DescribeError;

use super::{open_repo, VersionArgs};
use crate::policy::VersionPolicy;
use crate::Cli;

pub fn run(args: &VersionArgs, cli: &Cli) -> Result<i32> {
    let (repo, config) = open_repo(&args.target, cli)?;
    let opts = config.describe_options(&args.describe);
    let policy = VersionPolicy::new(&config.branches)?;

    let stderr = io::stderr();
    let mut trace = stderr.lock();
    let version = match gitver_core::find(&repo, &opts, &mut trace) {
        Ok(describe) => {
            let branch = describe.reference.short_name().to_str_lossy();
            policy.version(&describe, &branch)
        }
        Err(DescribeError::TagNotFound) => match &config.fallback {
            Some(fallback) => {
                tracing::warn!(%fallback, "no tag reachable from HEAD, using fallback version");
                fallback.clone()
            }
            None => return Err(DescribeError::TagNotFound.into()),
        },
        Err(e) => return Err(e.into()),
    };
    drop(trace);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{version}")?;
    Ok(0)
}
