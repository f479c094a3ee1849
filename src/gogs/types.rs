use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayloadUser {
    pub name: String,
    pub email: String,
    pub username: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayloadCommit {
    pub id: String,
    pub message: String,
    pub url: String,
    pub author: Option<PayloadUser>,
    pub committer: Option<PayloadUser>,
    pub timestamp: Option<DateTime<FixedOffset>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Branch {
    pub name: String,
    pub commit: Option<PayloadCommit>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateBranchOption {
    #[serde(rename = "branchname")]
    pub branch_name: String,
    pub base: String,
}

/// Result of comparing two branches of one repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DiffBranchInfo {
    pub change_info: String,
    pub owner: String,
    pub repo: String,
    pub branch1: String,
    pub branch2: String,
    pub branch1_commit_id: String,
    pub branch2_commit_id: String,
    pub file_list: Vec<DiffBranchChangeList>,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DiffBranchChangeList {
    pub file: String,
    pub is_binary: bool,
}

/// One entry of a cross-project diff request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectBranch {
    pub owner: String,
    pub repo: String,
    pub branch1: String,
    pub branch2: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DiffFileList {
    pub file: String,
    pub is_binary: bool,
    pub project: String,
    pub project_owner: String,
    pub base_diff_branch_commit_id: String,
    pub deploy_branch_commit_id: String,
}

/// Raw content of one file on both sides of a diff.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ReturnDiffFile {
    pub base_info: DiffFileList,
    pub base_diff_file: String,
    pub branch_diff_file: String,
    pub error_info: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CommitUserResponse {
    pub name: String,
    pub email: String,
    /// `None` when the server leaves the signature time out.
    pub when: Option<DateTime<FixedOffset>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommitResponse {
    pub id: String,
    pub author: CommitUserResponse,
    pub committer: CommitUserResponse,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchOption {
    pub base_branch: String,
    pub head_branch: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PatchResponse {
    pub patch: String,
    pub base_commit_id: String,
    pub head_commit_id: String,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestPatchOption {
    pub base_branch: String,
    pub patch: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TestPatchResponse {
    pub applicable: bool,
    pub conflict_files: Vec<String>,
    pub error: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeStrategy {
    #[default]
    Merge,
    Squash,
    Rebase,
}

impl MergeStrategy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "merge" => Some(Self::Merge),
            "squash" => Some(Self::Squash),
            "rebase" => Some(Self::Rebase),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoMergeOption {
    pub base_branch: String,
    pub head_branch: String,
    pub strategy: MergeStrategy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Outcome of an automatic merge: the new commit when `merged`, otherwise `reason`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AutoMergeResponse {
    pub merged: bool,
    pub commit_id: String,
    pub reason: String,
}
