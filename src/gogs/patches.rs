use super::*;

impl GogsClient {
    pub async fn create_patch(
        &self,
        owner: &str,
        repo: &str,
        opt: &PatchOption,
    ) -> Result<PatchResponse> {
        self.send_json(Method::POST, &patch_path(owner, repo), opt)
            .await
    }

    /// Regenerates a patch after either branch moved.
    pub async fn update_patch(
        &self,
        owner: &str,
        repo: &str,
        opt: &PatchOption,
    ) -> Result<PatchResponse> {
        self.send_json(Method::PUT, &patch_path(owner, repo), opt)
            .await
    }

    pub async fn test_patch(
        &self,
        owner: &str,
        repo: &str,
        opt: &TestPatchOption,
    ) -> Result<TestPatchResponse> {
        self.send_json(
            Method::POST,
            &format!("{}/test", patch_path(owner, repo)),
            opt,
        )
        .await
    }

    /// A refused merge is still a 2xx; check `merged` and `reason`.
    pub async fn auto_merge(
        &self,
        owner: &str,
        repo: &str,
        opt: &AutoMergeOption,
    ) -> Result<AutoMergeResponse> {
        self.send_json(
            Method::POST,
            &format!("/repos/{}/{}/branch/merge", owner, repo),
            opt,
        )
        .await
    }
}

fn patch_path(owner: &str, repo: &str) -> String {
    format!("/repos/{}/{}/branch/patch", owner, repo)
}
