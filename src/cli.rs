use std::path::PathBuf;

use anyhow::{Result, anyhow, bail};

use crate::gogs::MergeStrategy;

pub const USAGE: &str = "\
usage:
  gogs-branch branches list <owner> <repo>
  gogs-branch branches get <owner> <repo> <branch>
  gogs-branch branches create <owner> <repo> <name> <base>
  gogs-branch branches delete <owner> <repo> <branch> [--force]
  gogs-branch diff <owner> <repo> <branch1> <branch2>
  gogs-branch diff batch <projects.json>
  gogs-branch diff files <files.json>
  gogs-branch commits <owner> <repo> <branch> [page-size]
  gogs-branch patch create|update <owner> <repo> <base> <head>
  gogs-branch patch test <owner> <repo> <base> <patch-file>
  gogs-branch merge <owner> <repo> <base> <head> [merge|squash|rebase]
  gogs-branch auth reset";

const DEFAULT_PAGE_SIZE: &str = "20";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub repo: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    AuthReset,
    ListBranches(RepoRef),
    GetBranch(RepoRef, String),
    CreateBranch {
        repo: RepoRef,
        name: String,
        base: String,
    },
    DeleteBranch {
        repo: RepoRef,
        branch: String,
        force: bool,
    },
    Diff {
        repo: RepoRef,
        branch1: String,
        branch2: String,
    },
    DiffBatch(PathBuf),
    DiffFiles(PathBuf),
    Commits {
        repo: RepoRef,
        branch: String,
        page_size: String,
    },
    CreatePatch {
        repo: RepoRef,
        base: String,
        head: String,
    },
    UpdatePatch {
        repo: RepoRef,
        base: String,
        head: String,
    },
    TestPatch {
        repo: RepoRef,
        base: String,
        patch_file: PathBuf,
    },
    Merge {
        repo: RepoRef,
        base: String,
        head: String,
        strategy: MergeStrategy,
    },
}

pub fn parse_args(args: &[String]) -> Result<Option<CliCommand>> {
    if args.len() <= 1 {
        return Ok(None);
    }

    let words = args[1..].iter().map(String::as_str).collect::<Vec<&str>>();
    let command = match words.as_slice() {
        ["auth", "reset"] => CliCommand::AuthReset,
        ["branches", "list", owner, repo] => CliCommand::ListBranches(repo_ref(owner, repo)),
        ["branches", "get", owner, repo, branch] => {
            CliCommand::GetBranch(repo_ref(owner, repo), branch.to_string())
        }
        ["branches", "create", owner, repo, name, base] => CliCommand::CreateBranch {
            repo: repo_ref(owner, repo),
            name: name.to_string(),
            base: base.to_string(),
        },
        ["branches", "delete", owner, repo, branch, rest @ ..] => CliCommand::DeleteBranch {
            repo: repo_ref(owner, repo),
            branch: branch.to_string(),
            force: parse_force(rest)?,
        },
        ["diff", "batch", path] => CliCommand::DiffBatch(PathBuf::from(path)),
        ["diff", "files", path] => CliCommand::DiffFiles(PathBuf::from(path)),
        ["diff", owner, repo, branch1, branch2] => CliCommand::Diff {
            repo: repo_ref(owner, repo),
            branch1: branch1.to_string(),
            branch2: branch2.to_string(),
        },
        ["commits", owner, repo, branch, rest @ ..] if rest.len() <= 1 => CliCommand::Commits {
            repo: repo_ref(owner, repo),
            branch: branch.to_string(),
            page_size: parse_page_size(rest.first().copied())?,
        },
        ["patch", "create", owner, repo, base, head] => CliCommand::CreatePatch {
            repo: repo_ref(owner, repo),
            base: base.to_string(),
            head: head.to_string(),
        },
        ["patch", "update", owner, repo, base, head] => CliCommand::UpdatePatch {
            repo: repo_ref(owner, repo),
            base: base.to_string(),
            head: head.to_string(),
        },
        ["patch", "test", owner, repo, base, patch_file] => CliCommand::TestPatch {
            repo: repo_ref(owner, repo),
            base: base.to_string(),
            patch_file: PathBuf::from(patch_file),
        },
        ["merge", owner, repo, base, head, rest @ ..] if rest.len() <= 1 => CliCommand::Merge {
            repo: repo_ref(owner, repo),
            base: base.to_string(),
            head: head.to_string(),
            strategy: match rest.first() {
                Some(value) => MergeStrategy::parse(value)
                    .ok_or_else(|| anyhow!("Unknown merge strategy: {}", value))?,
                None => MergeStrategy::default(),
            },
        },
        _ => bail!("Unrecognized command: {}\n{}", words.join(" "), USAGE),
    };

    Ok(Some(command))
}

fn repo_ref(owner: &str, repo: &str) -> RepoRef {
    RepoRef {
        owner: owner.to_string(),
        repo: repo.to_string(),
    }
}

fn parse_force(rest: &[&str]) -> Result<bool> {
    match rest {
        [] => Ok(false),
        ["--force"] | ["-f"] => Ok(true),
        other => bail!("Unexpected arguments: {}", other.join(" ")),
    }
}

fn parse_page_size(value: Option<&str>) -> Result<String> {
    let value = value.unwrap_or(DEFAULT_PAGE_SIZE);
    match value.parse::<u32>() {
        Ok(size) if size > 0 => Ok(value.to_string()),
        _ => bail!("Page size must be a positive number, got {}", value),
    }
}
