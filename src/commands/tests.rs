use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use async_trait::async_trait;

use super::{GogsApi, run_command};
use crate::cli::{CliCommand, RepoRef};
use crate::gogs::{
    AutoMergeOption, AutoMergeResponse, Branch, CommitResponse, CreateBranchOption,
    DiffBranchInfo, DiffFileList, MergeStrategy, PatchOption, PatchResponse, ProjectBranch,
    ReturnDiffFile, TestPatchOption, TestPatchResponse,
};

#[derive(Default)]
struct FakeGogs {
    calls: Mutex<Vec<String>>,
    fail: bool,
}

impl FakeGogs {
    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn record(&self, call: String) -> Result<()> {
        self.calls.lock().expect("calls lock").push(call);
        if self.fail {
            return Err(anyhow::anyhow!("404 Not Found"));
        }
        Ok(())
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }
}

#[async_trait]
impl GogsApi for FakeGogs {
    async fn list_repo_branches(&self, owner: &str, repo: &str) -> Result<Vec<Branch>> {
        self.record(format!("list {owner}/{repo}"))?;
        Ok(vec![Branch {
            name: "master".to_string(),
            commit: None,
        }])
    }

    async fn get_repo_branch(&self, owner: &str, repo: &str, branch: &str) -> Result<Branch> {
        self.record(format!("get {owner}/{repo}/{branch}"))?;
        Ok(Branch {
            name: branch.to_string(),
            commit: None,
        })
    }

    async fn create_branch(
        &self,
        owner: &str,
        repo: &str,
        opt: &CreateBranchOption,
    ) -> Result<Branch> {
        self.record(format!("create {owner}/{repo} {} from {}", opt.branch_name, opt.base))?;
        Ok(Branch {
            name: opt.branch_name.clone(),
            commit: None,
        })
    }

    async fn delete_branch(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
        force: bool,
    ) -> Result<()> {
        self.record(format!("delete {owner}/{repo}/{branch} force={force}"))
    }

    async fn get_branch_diff(
        &self,
        owner: &str,
        repo: &str,
        branch1: &str,
        branch2: &str,
    ) -> Result<DiffBranchInfo> {
        self.record(format!("diff {owner}/{repo} {branch1}..{branch2}"))?;
        Ok(DiffBranchInfo {
            owner: owner.to_string(),
            repo: repo.to_string(),
            branch1: branch1.to_string(),
            branch2: branch2.to_string(),
            ..DiffBranchInfo::default()
        })
    }

    async fn get_branches_diff(&self, projects: &[ProjectBranch]) -> Result<Vec<DiffBranchInfo>> {
        self.record(format!("batch diff {}", projects.len()))?;
        Ok(projects
            .iter()
            .map(|project| DiffBranchInfo {
                owner: project.owner.clone(),
                repo: project.repo.clone(),
                ..DiffBranchInfo::default()
            })
            .collect())
    }

    async fn get_branches_diff_file(&self, files: &[DiffFileList]) -> Result<Vec<ReturnDiffFile>> {
        self.record(format!("raw files {}", files.len()))?;
        Ok(Vec::new())
    }

    async fn get_commits_of_branch(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
        page_size: &str,
    ) -> Result<Vec<CommitResponse>> {
        self.record(format!("commits {owner}/{repo}/{branch} size={page_size}"))?;
        Ok(Vec::new())
    }

    async fn create_patch(
        &self,
        owner: &str,
        repo: &str,
        opt: &PatchOption,
    ) -> Result<PatchResponse> {
        self.record(format!(
            "create patch {owner}/{repo} {}..{}",
            opt.base_branch, opt.head_branch
        ))?;
        Ok(PatchResponse::default())
    }

    async fn update_patch(
        &self,
        owner: &str,
        repo: &str,
        opt: &PatchOption,
    ) -> Result<PatchResponse> {
        self.record(format!(
            "update patch {owner}/{repo} {}..{}",
            opt.base_branch, opt.head_branch
        ))?;
        Ok(PatchResponse::default())
    }

    async fn test_patch(
        &self,
        owner: &str,
        repo: &str,
        opt: &TestPatchOption,
    ) -> Result<TestPatchResponse> {
        self.record(format!(
            "test patch {owner}/{repo} on {} ({} bytes)",
            opt.base_branch,
            opt.patch.len()
        ))?;
        Ok(TestPatchResponse {
            applicable: true,
            ..TestPatchResponse::default()
        })
    }

    async fn auto_merge(
        &self,
        owner: &str,
        repo: &str,
        opt: &AutoMergeOption,
    ) -> Result<AutoMergeResponse> {
        self.record(format!(
            "merge {owner}/{repo} {} into {} {:?}",
            opt.head_branch, opt.base_branch, opt.strategy
        ))?;
        Ok(AutoMergeResponse {
            merged: true,
            commit_id: "abc123".to_string(),
            reason: String::new(),
        })
    }
}

fn repo() -> RepoRef {
    RepoRef {
        owner: "devops".to_string(),
        repo: "docker-k8s".to_string(),
    }
}

fn temp_file(name: &str, contents: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = std::env::temp_dir().join(format!("gogs-branch-{nanos}-{name}"));
    fs::write(&path, contents).expect("write temp file");
    path
}

#[tokio::test]
async fn list_branches_renders_json() {
    let api = FakeGogs::default();
    let output = run_command(&api, &CliCommand::ListBranches(repo()))
        .await
        .expect("command succeeds");

    let value: serde_json::Value = serde_json::from_str(&output).expect("json output");
    assert_eq!(value[0]["name"], "master");
    assert_eq!(api.calls(), vec!["list devops/docker-k8s"]);
}

#[tokio::test]
async fn create_branch_builds_option_from_arguments() {
    let api = FakeGogs::default();
    let command = CliCommand::CreateBranch {
        repo: repo(),
        name: "Feature-docker-k8s-test".to_string(),
        base: "master".to_string(),
    };
    let output = run_command(&api, &command).await.expect("command succeeds");

    assert!(output.contains("Feature-docker-k8s-test"));
    assert_eq!(
        api.calls(),
        vec!["create devops/docker-k8s Feature-docker-k8s-test from master"]
    );
}

#[tokio::test]
async fn delete_branch_passes_force_flag() {
    let api = FakeGogs::default();
    let command = CliCommand::DeleteBranch {
        repo: repo(),
        branch: "old".to_string(),
        force: true,
    };
    let output = run_command(&api, &command).await.expect("command succeeds");

    assert!(output.contains("\"deleted\": \"old\""));
    assert_eq!(api.calls(), vec!["delete devops/docker-k8s/old force=true"]);
}

#[tokio::test]
async fn commits_forward_page_size() {
    let api = FakeGogs::default();
    let command = CliCommand::Commits {
        repo: repo(),
        branch: "main".to_string(),
        page_size: "20".to_string(),
    };
    let output = run_command(&api, &command).await.expect("command succeeds");

    assert_eq!(output, "[]");
    assert_eq!(api.calls(), vec!["commits devops/docker-k8s/main size=20"]);
}

#[tokio::test]
async fn diff_batch_reads_projects_file() {
    let path = temp_file(
        "projects.json",
        r#"[{"owner":"devops","repo":"docker-k8s","branch1":"master","branch2":"dev"}]"#,
    );
    let api = FakeGogs::default();
    let output = run_command(&api, &CliCommand::DiffBatch(path.clone()))
        .await
        .expect("command succeeds");
    let _ = fs::remove_file(&path);

    let value: serde_json::Value = serde_json::from_str(&output).expect("json output");
    assert_eq!(value[0]["Owner"], "devops");
    assert_eq!(api.calls(), vec!["batch diff 1"]);
}

#[tokio::test]
async fn diff_batch_reports_unreadable_file() {
    let api = FakeGogs::default();
    let path = std::env::temp_dir().join("gogs-branch-does-not-exist.json");
    let err = run_command(&api, &CliCommand::DiffBatch(path))
        .await
        .expect_err("missing file");

    assert!(err.to_string().contains("Failed to read"));
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn test_patch_sends_file_contents() {
    let patch = "diff --git a/a.txt b/a.txt\n";
    let path = temp_file("change.patch", patch);
    let api = FakeGogs::default();
    let command = CliCommand::TestPatch {
        repo: repo(),
        base: "master".to_string(),
        patch_file: path.clone(),
    };
    let output = run_command(&api, &command).await.expect("command succeeds");
    let _ = fs::remove_file(&path);

    assert!(output.contains("\"applicable\": true"));
    assert_eq!(
        api.calls(),
        vec![format!(
            "test patch devops/docker-k8s on master ({} bytes)",
            patch.len()
        )]
    );
}

#[tokio::test]
async fn merge_uses_requested_strategy() {
    let api = FakeGogs::default();
    let command = CliCommand::Merge {
        repo: repo(),
        base: "master".to_string(),
        head: "feature".to_string(),
        strategy: MergeStrategy::Rebase,
    };
    let output = run_command(&api, &command).await.expect("command succeeds");

    assert!(output.contains("abc123"));
    assert_eq!(
        api.calls(),
        vec!["merge devops/docker-k8s feature into master Rebase"]
    );
}

#[tokio::test]
async fn api_errors_propagate() {
    let api = FakeGogs::failing();
    let err = run_command(&api, &CliCommand::GetBranch(repo(), "gone".to_string()))
        .await
        .expect_err("api failure");

    assert_eq!(err.to_string(), "404 Not Found");
}

#[tokio::test]
async fn auth_reset_is_not_a_remote_command() {
    let api = FakeGogs::default();
    assert!(run_command(&api, &CliCommand::AuthReset).await.is_err());
    assert!(api.calls().is_empty());
}
