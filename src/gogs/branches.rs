use super::*;

impl GogsClient {
    pub async fn list_repo_branches(&self, owner: &str, repo: &str) -> Result<Vec<Branch>> {
        self.get_parsed(&format!("/repos/{}/{}/branches", owner, repo))
            .await
    }

    pub async fn get_repo_branch(&self, owner: &str, repo: &str, branch: &str) -> Result<Branch> {
        self.get_parsed(&format!("/repos/{}/{}/branches/{}", owner, repo, branch))
            .await
    }

    pub async fn create_branch(
        &self,
        owner: &str,
        repo: &str,
        opt: &CreateBranchOption,
    ) -> Result<Branch> {
        self.send_json(
            Method::POST,
            &format!("/repos/{}/{}/branch", owner, repo),
            opt,
        )
        .await
    }

    /// Deletes `branch`; `force` also drops it when it holds unmerged commits.
    pub async fn delete_branch(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
        force: bool,
    ) -> Result<()> {
        let mut path = format!("/repos/{}/{}/branch/{}", owner, repo, branch);
        if force {
            path.push_str("?force=true");
        }
        self.request_empty(Method::DELETE, &path, None, None).await
    }
}
