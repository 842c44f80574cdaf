//! Version resolution against the upstream release feed
//!
//! A configured version is used verbatim. Otherwise the latest release tag
//! is fetched and its leading prefix character (`v`) is dropped.

use crate::config::schema::ReleaseConfig;
use crate::error::{SetupError, SetupResult};
use async_trait::async_trait;
use serde::Deserialize;
use std::fmt;
use tracing::debug;

/// Resolved esbuild version, used as a cache key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version(String);

impl Version {
    /// Wrap a caller-supplied version without validating it
    pub fn verbatim(version: impl Into<String>) -> Self {
        Self(version.into())
    }

    /// Derive a version from a release tag such as `v0.24.0`
    pub fn from_tag(tag: &str) -> SetupResult<Self> {
        let mut chars = tag.chars();
        chars.next();
        let version = chars.as_str();

        semver::Version::parse(version).map_err(|e| {
            SetupError::Parse(format!("release tag {:?} is not a semantic version: {}", tag, e))
        })?;

        Ok(Self(version.to_string()))
    }

    /// Borrow the version string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Source of the latest upstream release tag
#[async_trait]
pub trait ReleaseFeed: Send + Sync {
    /// Fetch the tag name of the latest release
    async fn latest_tag(&self) -> SetupResult<String>;
}

#[derive(Debug, Deserialize)]
struct LatestRelease {
    tag_name: String,
}

/// Parse a latest-release response body into its tag name
pub fn parse_latest_tag(body: &str) -> SetupResult<String> {
    let release: LatestRelease =
        serde_json::from_str(body).map_err(|e| SetupError::Parse(e.to_string()))?;
    Ok(release.tag_name)
}

/// GitHub Releases API feed
pub struct GithubReleaseFeed {
    url: String,
    user_agent: String,
}

impl GithubReleaseFeed {
    /// Create a feed for the configured endpoint
    pub fn new(config: &ReleaseConfig) -> Self {
        Self {
            url: config.api_url.clone(),
            user_agent: config.user_agent.clone(),
        }
    }

    fn fetch_blocking(url: &str, user_agent: &str, token: Option<&str>) -> SetupResult<String> {
        let agent = ureq::Agent::new_with_config(
            ureq::Agent::config_builder()
                .http_status_as_error(false)
                .build(),
        );

        let mut request = agent
            .get(url)
            .header("User-Agent", user_agent)
            .header("Accept", "application/vnd.github+json");
        if let Some(token) = token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        let mut response = request.call().map_err(|e| SetupError::FeedUnreachable {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let status = response.status();
        if status != ureq::http::StatusCode::OK {
            return Err(SetupError::Fetch {
                status: status.as_u16(),
                reason: status
                    .canonical_reason()
                    .map(str::to_string)
                    .unwrap_or_else(|| status.as_u16().to_string()),
            });
        }

        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| SetupError::Parse(format!("reading response body: {}", e)))?;

        parse_latest_tag(&body)
    }
}

#[async_trait]
impl ReleaseFeed for GithubReleaseFeed {
    async fn latest_tag(&self) -> SetupResult<String> {
        debug!(url = %self.url, "Fetching latest release");

        let url = self.url.clone();
        let user_agent = self.user_agent.clone();
        let token = github_token();

        tokio::task::spawn_blocking(move || {
            Self::fetch_blocking(&url, &user_agent, token.as_deref())
        })
        .await
        .map_err(|_| SetupError::Unexpected)?
    }
}

/// Token used to lift API rate limits, if the runner provides one
fn github_token() -> Option<String> {
    ["GITHUB_TOKEN", "GH_TOKEN"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|token| !token.is_empty())
}

/// Resolve the version to install
///
/// A non-empty `configured` version wins without touching the feed.
pub async fn resolve_version(
    configured: Option<&str>,
    feed: &dyn ReleaseFeed,
) -> SetupResult<Version> {
    if let Some(version) = configured.filter(|v| !v.is_empty()) {
        return Ok(Version::verbatim(version));
    }

    let tag = feed.latest_tag().await?;
    let version = Version::from_tag(&tag)?;
    debug!(%tag, %version, "Resolved latest release");
    Ok(version)
}
