use anyhow::{Context, Result, anyhow};
use futures::FutureExt;
use futures::future::BoxFuture;
use reqwest::{Client, Request, StatusCode, Url};
use thiserror::Error;
use tracing::debug;

use crate::constants::constants;
use crate::model::{VideoPage, normalize};

/// Why a videos fetch ended in the failure view.
#[derive(Debug, Error)]
pub enum FetchError {
  #[error("request failed: {0}")]
  Transport(#[from] reqwest::Error),
  #[error("server responded with {0}")]
  Status(StatusCode),
  #[error("malformed response body: {0}")]
  Malformed(#[from] serde_json::Error),
  #[error("fetch task ended without a result")]
  Interrupted,
}

/// Anything that can list videos for a search string.
///
/// The returned future is `'static` so it can be handed to `tokio::spawn`.
pub trait VideoSource: Send + Sync {
  fn fetch_all(&self, search: String, token: String) -> BoxFuture<'static, Result<VideoPage, FetchError>>;
}

/// HTTP client for `GET {base}/videos/all?search=…`.
#[derive(Debug, Clone)]
pub struct VideosClient {
  http: Client,
  endpoint: Url,
}

impl VideosClient {
  pub fn new(base_url: &str) -> Result<Self> {
    Self::with_client(Client::new(), base_url)
  }

  pub fn with_client(http: Client, base_url: &str) -> Result<Self> {
    let mut endpoint = Url::parse(base_url).with_context(|| format!("Invalid API base URL: {}", base_url))?;
    endpoint.set_query(None);
    endpoint.set_fragment(None);
    // Appended under any path prefix the base carries, e.g. `https://host/api/`.
    endpoint
      .path_segments_mut()
      .map_err(|_| anyhow!("API base URL cannot carry a path: {}", base_url))?
      .pop_if_empty()
      .extend(constants().videos_path.split('/').filter(|s| !s.is_empty()));
    Ok(Self { http, endpoint })
  }

  pub fn endpoint(&self) -> &Url {
    &self.endpoint
  }

  /// Build the listing request. An empty `token` still produces a
  /// `Bearer ` header; the server is left to reject it.
  pub fn build_request(&self, search: &str, token: &str) -> Result<Request, FetchError> {
    let mut url = self.endpoint.clone();
    url.query_pairs_mut().append_pair("search", search);
    Ok(self.http.get(url).bearer_auth(token).build()?)
  }

  pub async fn fetch(&self, search: &str, token: &str) -> Result<VideoPage, FetchError> {
    let request = self.build_request(search, token)?;
    debug!(url = %request.url(), "api: GET videos");
    let response = self.http.execute(request).await?;
    let status = response.status();
    let body = response.bytes().await?;
    interpret(status, &body)
  }
}

impl VideoSource for VideosClient {
  fn fetch_all(&self, search: String, token: String) -> BoxFuture<'static, Result<VideoPage, FetchError>> {
    let client = self.clone();
    async move { client.fetch(&search, &token).await }.boxed()
  }
}

/// Map a finished response onto the fetch outcome.
pub fn interpret(status: StatusCode, body: &[u8]) -> Result<VideoPage, FetchError> {
  if !status.is_success() {
    return Err(FetchError::Status(status));
  }
  Ok(normalize(body)?)
}
