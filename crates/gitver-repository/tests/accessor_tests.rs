//! Accessor tests against repositories built with C git.

use std::io;
use std::path::Path;
use std::process::Command;

use gitver_core::{find, DescribeError, DescribeOptions, RepositoryAccessor, DETACHED_HEAD};
use gitver_repository::{RepoError, Repository};

/// Helper: run a git command in the given directory and return stdout.
fn git(dir: &Path, args: &[&str]) -> String {
    git_at(dir, args, "1700000000 +0000")
}

/// Helper: run git with pinned author and committer dates.
fn git_at(dir: &Path, args: &[&str], date: &str) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .env("GIT_AUTHOR_NAME", "Test Author")
        .env("GIT_AUTHOR_EMAIL", "author@test.com")
        .env("GIT_COMMITTER_NAME", "Test Committer")
        .env("GIT_COMMITTER_EMAIL", "committer@test.com")
        .env("GIT_AUTHOR_DATE", date)
        .env("GIT_COMMITTER_DATE", date)
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .env("HOME", dir)
        .output()
        .expect("failed to run git");
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("git {:?} failed: {}", args, stderr);
    }
    String::from_utf8(output.stdout).unwrap().trim().to_string()
}

/// Linear history of `n` commits on main, one thousand seconds apart.
/// Returns commit ids newest first, as `git rev-list HEAD` prints them.
fn create_linear_repo(dir: &Path, n: usize) -> Vec<String> {
    git(dir, &["init", "-b", "main"]);
    for i in 0..n {
        let name = format!("file_{i}.txt");
        std::fs::write(dir.join(&name), format!("content {i}\n")).unwrap();
        let date = format!("{} +0000", 1_700_000_000 + i * 1000);
        git_at(dir, &["add", &name], &date);
        git_at(dir, &["commit", "-m", &format!("commit {i}")], &date);
    }
    git(dir, &["rev-list", "HEAD"])
        .lines()
        .map(String::from)
        .collect()
}

#[test]
fn open_non_repository_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let err = Repository::open(dir.path()).unwrap_err();
    match err {
        RepoError::NotFound(path) => assert_eq!(path, dir.path()),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn discover_from_subdirectory() {
    let dir = tempfile::tempdir().unwrap();
    create_linear_repo(dir.path(), 1);
    let sub = dir.path().join("nested/deeper");
    std::fs::create_dir_all(&sub).unwrap();

    let repo = Repository::discover(&sub).unwrap();
    assert!(repo.work_tree().is_some());
}

#[test]
fn head_on_branch() {
    let dir = tempfile::tempdir().unwrap();
    let commits = create_linear_repo(dir.path(), 2);
    let repo = Repository::open(dir.path()).unwrap();

    let head = repo.head().unwrap();
    assert_eq!(head.name().to_string(), "refs/heads/main");
    assert_eq!(head.short_name(), "main");
    assert_eq!(head.target().to_hex(), commits[0]);
}

#[test]
fn head_detached() {
    let dir = tempfile::tempdir().unwrap();
    let commits = create_linear_repo(dir.path(), 2);
    git(dir.path(), &["checkout", "--detach", &commits[1]]);
    let repo = Repository::open(dir.path()).unwrap();

    let head = repo.head().unwrap();
    assert_eq!(head.name().to_string(), DETACHED_HEAD);
    assert_eq!(head.target().to_hex(), commits[1]);
}

#[test]
fn log_matches_rev_list() {
    let dir = tempfile::tempdir().unwrap();
    let commits = create_linear_repo(dir.path(), 5);
    let repo = Repository::open(dir.path()).unwrap();

    let head = repo.head().unwrap();
    let walked: Vec<String> = repo
        .log(head.target())
        .unwrap()
        .map(|c| c.unwrap().id.to_hex())
        .collect();
    assert_eq!(walked, commits);
}

#[test]
fn log_reports_parents_and_time() {
    let dir = tempfile::tempdir().unwrap();
    let commits = create_linear_repo(dir.path(), 2);
    let repo = Repository::open(dir.path()).unwrap();

    let head = repo.head().unwrap();
    let first = repo.log(head.target()).unwrap().next().unwrap().unwrap();
    assert_eq!(first.commit_time, 1_700_001_000);
    assert_eq!(first.parents.len(), 1);
    assert_eq!(first.parents[0].to_hex(), commits[1]);
}

#[test]
fn tags_are_listed_and_peeled() {
    let dir = tempfile::tempdir().unwrap();
    let commits = create_linear_repo(dir.path(), 3);
    git(dir.path(), &["tag", "light", &commits[1]]);
    git(dir.path(), &["tag", "-a", "v1.0.0", "-m", "release", &commits[2]]);
    git(dir.path(), &["tag", "-a", "nested", "-m", "tag of tag", "v1.0.0"]);
    let repo = Repository::open(dir.path()).unwrap();

    let mut tags: Vec<_> = repo.tags().unwrap().map(Result::unwrap).collect();
    tags.sort_by(|a, b| a.name().cmp(b.name()));
    let names: Vec<String> = tags.iter().map(|t| t.short_name().to_string()).collect();
    assert_eq!(names, ["light", "nested", "v1.0.0"]);

    assert_eq!(repo.peel_tag(&tags[0]).unwrap(), None);
    assert_eq!(tags[0].target().to_hex(), commits[1]);
    assert_eq!(repo.peel_tag(&tags[1]).unwrap().unwrap().to_hex(), commits[2]);
    let annotated = repo.peel_tag(&tags[2]).unwrap().unwrap();
    assert_eq!(annotated.to_hex(), commits[2]);
    assert_ne!(tags[2].target(), annotated);
}

#[test]
fn tag_of_tree_is_not_a_commit() {
    let dir = tempfile::tempdir().unwrap();
    create_linear_repo(dir.path(), 1);
    let tree = git(dir.path(), &["rev-parse", "HEAD^{tree}"]);
    git(dir.path(), &["tag", "-a", "tree-tag", "-m", "tree", &tree]);
    let repo = Repository::open(dir.path()).unwrap();

    let tag = repo.tags().unwrap().next().unwrap().unwrap();
    assert_eq!(repo.peel_tag(&tag).unwrap(), None);
}

#[test]
fn dirty_tracks_modified_files_only() {
    let dir = tempfile::tempdir().unwrap();
    create_linear_repo(dir.path(), 1);
    let repo = Repository::open(dir.path()).unwrap();
    assert!(!repo.is_dirty().unwrap());

    std::fs::write(dir.path().join("untracked.txt"), "new\n").unwrap();
    assert!(!repo.is_dirty().unwrap());

    std::fs::write(dir.path().join("file_0.txt"), "changed\n").unwrap();
    assert!(repo.is_dirty().unwrap());
}

#[test]
fn describe_matches_git_describe() {
    let dir = tempfile::tempdir().unwrap();
    let commits = create_linear_repo(dir.path(), 4);
    git(dir.path(), &["tag", "-a", "v1.0.0", "-m", "release", &commits[2]]);
    let repo = Repository::open(dir.path()).unwrap();

    let d = find(&repo, &DescribeOptions::default(), &mut io::sink()).unwrap();
    assert_eq!(d.distance, 2);
    assert_eq!(d.to_string(), git(dir.path(), &["describe", "--long"]));
}

#[test]
fn describe_detached_head_fails() {
    let dir = tempfile::tempdir().unwrap();
    let commits = create_linear_repo(dir.path(), 2);
    git(dir.path(), &["tag", "-a", "v1.0.0", "-m", "release", &commits[1]]);
    git(dir.path(), &["checkout", "--detach", "HEAD"]);
    let repo = Repository::open(dir.path()).unwrap();

    let err = find(&repo, &DescribeOptions::default(), &mut io::sink()).unwrap_err();
    assert!(matches!(err, DescribeError::DetachedHead { .. }));
    assert!(err.to_string().contains(&commits[0][..6]));
}

#[test]
fn describe_without_tags_fails() {
    let dir = tempfile::tempdir().unwrap();
    create_linear_repo(dir.path(), 2);
    let repo = Repository::open(dir.path()).unwrap();

    let opts = DescribeOptions {
        tags: true,
        ..Default::default()
    };
    let err = find(&repo, &opts, &mut io::sink()).unwrap_err();
    assert!(matches!(err, DescribeError::TagNotFound));
}
