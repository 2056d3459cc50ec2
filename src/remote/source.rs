// src/remote/source.rs

use anyhow::{Context, Result};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::config::model::RemoteSection;

/// The remote copy of one marker: its text content plus the opaque version
/// fingerprint the store assigns to that content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteMarker {
    pub fingerprint: String,
    pub content: String,
}

/// Where remote markers come from.
///
/// `Ok(None)` means the store does not currently hold the marker, or answered
/// with a non-success status; for the poller both are simply "no update this
/// tick". A hard transport failure is an `Err`, which the poller treats the
/// same way. The distinction only matters for logging.
#[async_trait]
pub trait MarkerSource: Send + Sync {
    async fn fetch(&self, signal: &str) -> Result<Option<RemoteMarker>>;
}

/// Marker source backed by the GitHub contents API.
///
/// One GET per signal per tick, against
/// `{api_base}/repos/{owner}/{repo}/contents/{dir}/{signal}?ref={branch}`.
/// The response carries the blob base64-encoded plus its `sha`, which serves
/// as the fingerprint.
pub struct GitHubMarkerSource {
    client: Client,
    api_base: String,
    owner: String,
    repo: String,
    branch: String,
    dir: String,
    token: Option<String>,
}

impl GitHubMarkerSource {
    /// Build a source from the `[remote]` config section.
    ///
    /// The API token, if any, is read from the environment variable named by
    /// `token_env`; an unset variable means unauthenticated fetches.
    pub fn new(section: &RemoteSection) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("relaybell/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("building HTTP client")?;

        let token = std::env::var(&section.token_env).ok();

        Ok(Self {
            client,
            api_base: section.api_base.trim_end_matches('/').to_string(),
            owner: section.owner.clone(),
            repo: section.repo.clone(),
            branch: section.branch.clone(),
            dir: section.dir.clone(),
            token,
        })
    }

    fn contents_url(&self, signal: &str) -> String {
        let path = if self.dir.is_empty() {
            signal.to_string()
        } else {
            format!("{}/{}", self.dir.trim_matches('/'), signal)
        };
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_base, self.owner, self.repo, path
        )
    }
}

/// Subset of the contents API response we care about.
#[derive(Debug, Deserialize)]
struct ContentsResponse {
    sha: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    encoding: String,
}

#[async_trait]
impl MarkerSource for GitHubMarkerSource {
    async fn fetch(&self, signal: &str) -> Result<Option<RemoteMarker>> {
        let url = self.contents_url(signal);

        let mut request = self
            .client
            .get(&url)
            .query(&[("ref", self.branch.as_str())])
            .header("accept", "application/vnd.github+json");

        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("fetching remote marker for '{signal}'"))?;

        let status = response.status();
        if !status.is_success() {
            // Absence of the marker is a 404 here, not an error payload.
            debug!(signal = %signal, status = %status, "remote marker not available");
            return Ok(None);
        }

        let body: ContentsResponse = response
            .json()
            .await
            .with_context(|| format!("decoding contents response for '{signal}'"))?;

        let content = decode_blob(&body.encoding, &body.content)
            .with_context(|| format!("decoding blob content for '{signal}'"))?;

        Ok(Some(RemoteMarker {
            fingerprint: body.sha,
            content,
        }))
    }
}

/// Decode the blob payload into trimmed text.
///
/// The API wraps base64 payloads in newlines at 60 columns, so whitespace is
/// stripped before decoding. Unknown encodings are passed through as-is.
fn decode_blob(encoding: &str, raw: &str) -> Result<String> {
    let text = match encoding {
        "base64" => {
            let cleaned: String = raw.chars().filter(|c| !c.is_ascii_whitespace()).collect();
            let bytes = STANDARD
                .decode(cleaned)
                .context("payload is not valid base64")?;
            String::from_utf8_lossy(&bytes).into_owned()
        }
        _ => raw.to_string(),
    };
    Ok(text.trim().to_string())
}
