use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::cli::{CliCommand, RepoRef};
use crate::gogs::{
    AutoMergeOption, AutoMergeResponse, Branch, CommitResponse, CreateBranchOption,
    DiffBranchInfo, DiffFileList, GogsClient, PatchOption, PatchResponse, ProjectBranch,
    ReturnDiffFile, TestPatchOption, TestPatchResponse,
};

/// The remote operations the command line can drive.
#[async_trait]
pub trait GogsApi: Send + Sync {
    async fn list_repo_branches(&self, owner: &str, repo: &str) -> Result<Vec<Branch>>;
    async fn get_repo_branch(&self, owner: &str, repo: &str, branch: &str) -> Result<Branch>;
    async fn create_branch(
        &self,
        owner: &str,
        repo: &str,
        opt: &CreateBranchOption,
    ) -> Result<Branch>;
    async fn delete_branch(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
        force: bool,
    ) -> Result<()>;
    async fn get_branch_diff(
        &self,
        owner: &str,
        repo: &str,
        branch1: &str,
        branch2: &str,
    ) -> Result<DiffBranchInfo>;
    async fn get_branches_diff(&self, projects: &[ProjectBranch]) -> Result<Vec<DiffBranchInfo>>;
    async fn get_branches_diff_file(&self, files: &[DiffFileList]) -> Result<Vec<ReturnDiffFile>>;
    async fn get_commits_of_branch(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
        page_size: &str,
    ) -> Result<Vec<CommitResponse>>;
    async fn create_patch(
        &self,
        owner: &str,
        repo: &str,
        opt: &PatchOption,
    ) -> Result<PatchResponse>;
    async fn update_patch(
        &self,
        owner: &str,
        repo: &str,
        opt: &PatchOption,
    ) -> Result<PatchResponse>;
    async fn test_patch(
        &self,
        owner: &str,
        repo: &str,
        opt: &TestPatchOption,
    ) -> Result<TestPatchResponse>;
    async fn auto_merge(
        &self,
        owner: &str,
        repo: &str,
        opt: &AutoMergeOption,
    ) -> Result<AutoMergeResponse>;
}

#[async_trait]
impl GogsApi for GogsClient {
    async fn list_repo_branches(&self, owner: &str, repo: &str) -> Result<Vec<Branch>> {
        Ok(self.list_repo_branches(owner, repo).await?)
    }

    async fn get_repo_branch(&self, owner: &str, repo: &str, branch: &str) -> Result<Branch> {
        Ok(self.get_repo_branch(owner, repo, branch).await?)
    }

    async fn create_branch(
        &self,
        owner: &str,
        repo: &str,
        opt: &CreateBranchOption,
    ) -> Result<Branch> {
        Ok(self.create_branch(owner, repo, opt).await?)
    }

    async fn delete_branch(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
        force: bool,
    ) -> Result<()> {
        Ok(self.delete_branch(owner, repo, branch, force).await?)
    }

    async fn get_branch_diff(
        &self,
        owner: &str,
        repo: &str,
        branch1: &str,
        branch2: &str,
    ) -> Result<DiffBranchInfo> {
        Ok(self.get_branch_diff(owner, repo, branch1, branch2).await?)
    }

    async fn get_branches_diff(&self, projects: &[ProjectBranch]) -> Result<Vec<DiffBranchInfo>> {
        Ok(self.get_branches_diff(projects).await?)
    }

    async fn get_branches_diff_file(&self, files: &[DiffFileList]) -> Result<Vec<ReturnDiffFile>> {
        Ok(self.get_branches_diff_file(files).await?)
    }

    async fn get_commits_of_branch(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
        page_size: &str,
    ) -> Result<Vec<CommitResponse>> {
        Ok(self
            .get_commits_of_branch(owner, repo, branch, page_size)
            .await?)
    }

    async fn create_patch(
        &self,
        owner: &str,
        repo: &str,
        opt: &PatchOption,
    ) -> Result<PatchResponse> {
        Ok(self.create_patch(owner, repo, opt).await?)
    }

    async fn update_patch(
        &self,
        owner: &str,
        repo: &str,
        opt: &PatchOption,
    ) -> Result<PatchResponse> {
        Ok(self.update_patch(owner, repo, opt).await?)
    }

    async fn test_patch(
        &self,
        owner: &str,
        repo: &str,
        opt: &TestPatchOption,
    ) -> Result<TestPatchResponse> {
        Ok(self.test_patch(owner, repo, opt).await?)
    }

    async fn auto_merge(
        &self,
        owner: &str,
        repo: &str,
        opt: &AutoMergeOption,
    ) -> Result<AutoMergeResponse> {
        Ok(self.auto_merge(owner, repo, opt).await?)
    }
}

/// Runs one remote command and renders its result as pretty JSON.
pub async fn run_command(api: &dyn GogsApi, command: &CliCommand) -> Result<String> {
    match command {
        CliCommand::AuthReset => anyhow::bail!("auth reset does not talk to the server"),
        CliCommand::ListBranches(RepoRef { owner, repo }) => {
            render(&api.list_repo_branches(owner, repo).await?)
        }
        CliCommand::GetBranch(RepoRef { owner, repo }, branch) => {
            render(&api.get_repo_branch(owner, repo, branch).await?)
        }
        CliCommand::CreateBranch { repo, name, base } => {
            let opt = CreateBranchOption {
                branch_name: name.clone(),
                base: base.clone(),
            };
            render(&api.create_branch(&repo.owner, &repo.repo, &opt).await?)
        }
        CliCommand::DeleteBranch {
            repo,
            branch,
            force,
        } => {
            api.delete_branch(&repo.owner, &repo.repo, branch, *force)
                .await?;
            render(&serde_json::json!({ "deleted": branch }))
        }
        CliCommand::Diff {
            repo,
            branch1,
            branch2,
        } => render(
            &api.get_branch_diff(&repo.owner, &repo.repo, branch1, branch2)
                .await?,
        ),
        CliCommand::DiffBatch(path) => {
            let projects: Vec<ProjectBranch> = read_json(path)?;
            render(&api.get_branches_diff(&projects).await?)
        }
        CliCommand::DiffFiles(path) => {
            let files: Vec<DiffFileList> = read_json(path)?;
            render(&api.get_branches_diff_file(&files).await?)
        }
        CliCommand::Commits {
            repo,
            branch,
            page_size,
        } => render(
            &api.get_commits_of_branch(&repo.owner, &repo.repo, branch, page_size)
                .await?,
        ),
        CliCommand::CreatePatch { repo, base, head } => {
            let opt = patch_option(base, head);
            render(&api.create_patch(&repo.owner, &repo.repo, &opt).await?)
        }
        CliCommand::UpdatePatch { repo, base, head } => {
            let opt = patch_option(base, head);
            render(&api.update_patch(&repo.owner, &repo.repo, &opt).await?)
        }
        CliCommand::TestPatch {
            repo,
            base,
            patch_file,
        } => {
            let patch = fs::read_to_string(patch_file)
                .with_context(|| format!("Failed to read patch at {}", patch_file.display()))?;
            let opt = TestPatchOption {
                base_branch: base.clone(),
                patch,
            };
            render(&api.test_patch(&repo.owner, &repo.repo, &opt).await?)
        }
        CliCommand::Merge {
            repo,
            base,
            head,
            strategy,
        } => {
            let opt = AutoMergeOption {
                base_branch: base.clone(),
                head_branch: head.clone(),
                strategy: *strategy,
                message: None,
            };
            render(&api.auto_merge(&repo.owner, &repo.repo, &opt).await?)
        }
    }
}

fn patch_option(base: &str, head: &str) -> PatchOption {
    PatchOption {
        base_branch: base.to_string(),
        head_branch: head.to_string(),
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("Failed to parse {}", path.display()))
}

fn render<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to render result")
}

#[cfg(test)]
mod tests;
