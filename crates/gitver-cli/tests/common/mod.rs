//! Shared test harness for gitver-cli integration tests.
//!
//! Provides process runners and repo setup utilities. Environment variables
//! are pinned so commit ids, dates and config lookup are the same on every
//! machine.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Command;

/// Captured output from running a command.
pub struct CommandResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

/// Path to the compiled `gitver` binary.
pub fn gitver_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_gitver"))
}

/// Apply the pinned environment to a `Command`.
fn pin_env(cmd: &mut Command, dir: &Path) {
    cmd.env("GIT_AUTHOR_NAME", "Test Author")
        .env("GIT_AUTHOR_EMAIL", "test@example.com")
        .env("GIT_AUTHOR_DATE", "1700000000 +0000")
        .env("GIT_COMMITTER_NAME", "Test Committer")
        .env("GIT_COMMITTER_EMAIL", "test@example.com")
        .env("GIT_COMMITTER_DATE", "1700000000 +0000")
        .env("TZ", "UTC")
        .env("LC_ALL", "C")
        .env("LANG", "C")
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .env("HOME", dir)
        .env_remove("XDG_CONFIG_HOME")
        .env_remove("GITVER_CONFIG")
        .env_remove("GITVER_LOG")
        .env_remove("RUST_LOG");
}

fn capture(cmd: &mut Command, what: &str) -> CommandResult {
    let output = cmd
        .output()
        .unwrap_or_else(|e| panic!("failed to run {what}: {e}"));
    CommandResult {
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        exit_code: output.status.code().unwrap_or(128),
    }
}

/// Run C git in `dir` with the given arguments.
pub fn git(dir: &Path, args: &[&str]) -> CommandResult {
    let mut cmd = Command::new("git");
    cmd.args(args).current_dir(dir);
    pin_env(&mut cmd, dir);
    capture(&mut cmd, "git")
}

/// Run C git with a specific date override (for multi-commit scenarios).
pub fn git_with_date(dir: &Path, args: &[&str], epoch: &str) -> CommandResult {
    let mut cmd = Command::new("git");
    cmd.args(args).current_dir(dir);
    pin_env(&mut cmd, dir);
    cmd.env("GIT_AUTHOR_DATE", epoch)
        .env("GIT_COMMITTER_DATE", epoch);
    capture(&mut cmd, "git")
}

/// Run the gitver binary in `dir` with the given arguments.
pub fn gitver(dir: &Path, args: &[&str]) -> CommandResult {
    gitver_with_env(dir, args, &[])
}

/// Run gitver with extra environment variables set after pinning.
pub fn gitver_with_env(dir: &Path, args: &[&str], vars: &[(&str, &str)]) -> CommandResult {
    let mut cmd = Command::new(gitver_bin());
    cmd.args(args).current_dir(dir);
    pin_env(&mut cmd, dir);
    for (key, value) in vars {
        cmd.env(key, value);
    }
    capture(&mut cmd, "gitver")
}

/// Run C git and panic on failure, returning trimmed stdout.
pub fn git_ok(dir: &Path, args: &[&str]) -> String {
    let result = git(dir, args);
    assert_eq!(
        result.exit_code, 0,
        "git {:?} failed: {}",
        args, result.stderr
    );
    result.stdout.trim().to_string()
}

/// Create `n` commits on `branch`, one thousand seconds apart. Returns the
/// commit ids newest first, as `git rev-list HEAD` prints them.
pub fn setup_linear_history(dir: &Path, branch: &str, n: usize) -> Vec<String> {
    git_ok(dir, &["init", "-b", branch]);
    for i in 0..n {
        let name = format!("file_{i}.txt");
        std::fs::write(dir.join(&name), format!("content {i}\n")).unwrap();
        let date = format!("{} +0000", 1_700_000_000 + i * 1000);
        let add = git_with_date(dir, &["add", &name], &date);
        assert_eq!(add.exit_code, 0, "git add failed: {}", add.stderr);
        let commit = git_with_date(dir, &["commit", "-m", &format!("commit {i}")], &date);
        assert_eq!(commit.exit_code, 0, "git commit failed: {}", commit.stderr);
    }
    git_ok(dir, &["rev-list", "HEAD"])
        .lines()
        .map(String::from)
        .collect()
}

/// Four commits on `branch` with annotated `v1.0.0` two commits behind HEAD.
pub fn setup_tagged_repo(dir: &Path, branch: &str) -> Vec<String> {
    let commits = setup_linear_history(dir, branch, 4);
    git_ok(dir, &["tag", "-a", "v1.0.0", "-m", "release 1.0.0", &commits[2]]);
    commits
}
