use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::{Error, Result};

mod branches;
mod commits;
mod diffs;
mod patches;
mod types;

pub use types::*;

const API_PREFIX: &str = "/api/v1";
const DEFAULT_USER_AGENT: &str = "gogs-branch";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Handle on one Gogs server. Immutable once built; clone or share freely.
#[derive(Debug, Clone)]
pub struct GogsClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl GogsClient {
    pub fn new(base_url: &str, token: &str) -> Result<Self> {
        Self::builder(base_url, token).build()
    }

    pub fn builder(base_url: &str, token: &str) -> GogsClientBuilder {
        GogsClientBuilder {
            base_url: base_url.to_string(),
            token: token.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send one request and decode the JSON body of a 2xx response into `T`.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        headers: Option<HeaderMap>,
        body: Option<Vec<u8>>,
    ) -> Result<T> {
        let (status, data) = self.execute(method, path, headers, body).await?;
        serde_json::from_slice(&data).map_err(|source| Error::Decode { status, source })
    }

    /// Send one request and discard the body of a 2xx response.
    pub async fn request_empty(
        &self,
        method: Method,
        path: &str,
        headers: Option<HeaderMap>,
        body: Option<Vec<u8>>,
    ) -> Result<()> {
        self.execute(method, path, headers, body).await?;
        Ok(())
    }

    async fn get_parsed<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(Method::GET, path, None, None).await
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, payload: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_vec(payload).map_err(Error::Encode)?;
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        self.request(method, path, Some(headers), Some(body)).await
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        headers: Option<HeaderMap>,
        body: Option<Vec<u8>>,
    ) -> Result<(StatusCode, Vec<u8>)> {
        let url = format!("{}{}{}", self.base_url, API_PREFIX, path);
        let auth = HeaderValue::from_str(&format!("token {}", self.token))
            .map_err(|_| Error::InvalidHeader("authorization"))?;

        debug!(%method, %url, "sending request");
        let mut request = self
            .client
            .request(method.clone(), &url)
            .header(AUTHORIZATION, auth);
        if let Some(headers) = headers {
            request = request.headers(headers);
        }
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let data = response.bytes().await?;
        debug!(%method, %url, %status, bytes = data.len(), "received response");

        if !status.is_success() {
            warn!(%method, %url, %status, "request rejected");
            return Err(Error::from_response(status, &data));
        }
        Ok((status, data.to_vec()))
    }
}

#[derive(Debug, Clone)]
pub struct GogsClientBuilder {
    base_url: String,
    token: String,
    timeout: Duration,
    user_agent: String,
}

impl GogsClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn build(self) -> Result<GogsClient> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&self.user_agent)
                .map_err(|_| Error::InvalidHeader("user-agent"))?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(self.timeout)
            .build()?;
        Ok(GogsClient {
            client,
            base_url: self.base_url.trim_end_matches('/').to_string(),
            token: self.token,
        })
    }
}
