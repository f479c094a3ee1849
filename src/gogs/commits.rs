use super::*;

impl GogsClient {
    /// Latest `page_size` commits of `branch`, newest first.
    pub async fn get_commits_of_branch(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
        page_size: &str,
    ) -> Result<Vec<CommitResponse>> {
        self.get_parsed(&format!(
            "/repos/{}/{}/branch/commits/{}/{}",
            owner, repo, page_size, branch
        ))
        .await
    }
}
