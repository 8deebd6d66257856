mod commands;
mod config;
mod policy;
mod trace;

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::{error::ErrorKind, ArgAction, Parser};

use commands::{Commands, VersionArgs};

#[derive(Parser)]
#[command(
    name = "gitver",
    about = "Derive a SemVer product version from the nearest git tag",
    version = env!("CARGO_PKG_VERSION"),
    subcommand_precedence_over_arg = true
)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    version: VersionArgs,

    /// Configuration file (default: <repo>/.gitver.toml, then
    /// $XDG_CONFIG_HOME/gitver/gitver.toml or $HOME/.gitver.toml)
    #[arg(long, global = true, env = "GITVER_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log more (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => process::exit(0),
                _ => process::exit(2),
            }
        }
    };

    if let Err(e) = trace::initialize_logging(cli.verbose) {
        eprintln!("warning: {e:#}");
    }

    match run(cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e:#}");
            process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    commands::run(cli)
}
