use super::*;

impl GogsClient {
    pub async fn get_branch_diff(
        &self,
        owner: &str,
        repo: &str,
        branch1: &str,
        branch2: &str,
    ) -> Result<DiffBranchInfo> {
        self.get_parsed(&format!(
            "/repos/{}/{}/branch/diff/{}/{}",
            owner, repo, branch1, branch2
        ))
        .await
    }

    /// Compares branch pairs across several projects in one call. An empty
    /// slice is still sent as `[]`.
    pub async fn get_branches_diff(
        &self,
        projects: &[ProjectBranch],
    ) -> Result<Vec<DiffBranchInfo>> {
        self.send_json(Method::POST, "/repos/branchs/diff", projects)
            .await
    }

    pub async fn get_branches_diff_file(
        &self,
        files: &[DiffFileList],
    ) -> Result<Vec<ReturnDiffFile>> {
        self.send_json(Method::POST, "/repos/raw", files).await
    }
}
