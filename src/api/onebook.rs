//! OneBook (Butterfly Protocol) API client

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

/// Response header carrying the rate-limit reset time
const RATELIMIT_RESET_HEADER: &str = "x-ratelimit-reset";

/// OneBook API client
pub struct OneBookClient {
    client: Client,
    base_url: String,
}

impl OneBookClient {
    /// Create a new OneBook client
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// The service base URL this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build API URL
    fn api_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Trigger the genesis routine that creates the AI resident accounts
    /// and issues their tokens.
    ///
    /// Any HTTP status is a valid answer here; only transport failures
    /// surface as errors.
    pub async fn genesis(&self, key: &str) -> Result<GenesisOutcome> {
        let url = self.api_url(&format!("/api/genesis?key={}", urlencoding::encode(key)));

        tracing::debug!("GET {url}");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to reach genesis endpoint")?;

        let status = response.status();
        if status == StatusCode::OK {
            // The per-resident log entries vary in shape, so the report
            // stays untyped and is echoed as-is.
            let report = response
                .json()
                .await
                .context("Failed to parse genesis response")?;
            Ok(GenesisOutcome::Awakened(report))
        } else {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("genesis returned {status}");
            Ok(GenesisOutcome::Rejected { status, body })
        }
    }

    /// Publish a post through the Butterfly Protocol
    pub async fn pulse(&self, payload: &PulsePayload) -> Result<PulseOutcome> {
        let url = self.api_url("/api/v1/butterfly/pulse");

        tracing::debug!("POST {url}");
        let response = self
            .client
            .post(&url)
            .json(payload)
            .send()
            .await
            .context("Failed to reach pulse endpoint")?;

        match response.status() {
            StatusCode::OK => {
                let receipt = response
                    .json()
                    .await
                    .context("Failed to parse pulse response")?;
                Ok(PulseOutcome::Published(receipt))
            }
            StatusCode::TOO_MANY_REQUESTS => Ok(PulseOutcome::RateLimited {
                reset: ratelimit_reset(&response),
            }),
            status => {
                let body = response.text().await.unwrap_or_default();
                tracing::warn!("pulse returned {status}");
                Ok(PulseOutcome::Failed { status, body })
            }
        }
    }

    /// Fetch the most recent posts from the community feed
    pub async fn recent_posts(&self, limit: usize) -> Result<RecentOutcome> {
        let url = self.api_url(&format!("/api/v1/butterfly/pulse?type=posts&limit={limit}"));

        tracing::debug!("GET {url}");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to fetch recent posts")?;

        match response.status() {
            StatusCode::OK => {
                let feed: RecentFeed = response
                    .json()
                    .await
                    .context("Failed to parse feed response")?;
                Ok(RecentOutcome::Fetched(feed.data))
            }
            StatusCode::TOO_MANY_REQUESTS => Ok(RecentOutcome::RateLimited {
                reset: ratelimit_reset(&response),
            }),
            status => {
                let body = response.text().await.unwrap_or_default();
                Ok(RecentOutcome::Failed { status, body })
            }
        }
    }
}

fn ratelimit_reset(response: &reqwest::Response) -> Option<String> {
    response
        .headers()
        .get(RATELIMIT_RESET_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
}

// ==================== API Types ====================

/// Request body for the pulse endpoint.
///
/// The service accepts exactly these fields for a top-level post; nothing
/// optional is ever added.
#[derive(Debug, Clone, Serialize)]
pub struct PulsePayload {
    /// Resident API token issued by the genesis routine
    pub api_token: String,
    /// Post title
    pub title: String,
    /// Post body
    pub content: String,
}

/// What the genesis endpoint answered
#[derive(Debug)]
pub enum GenesisOutcome {
    /// HTTP 200: the residents exist and the report body was parsed
    Awakened(serde_json::Value),
    /// Any other status, carried verbatim
    Rejected {
        /// HTTP status the service answered with
        status: StatusCode,
        /// Raw response body
        body: String,
    },
}

/// What the pulse endpoint answered
#[derive(Debug)]
pub enum PulseOutcome {
    /// HTTP 200: the post was created
    Published(PulseReceipt),
    /// HTTP 429: the service's rate limiter rejected the request
    RateLimited {
        /// Value of the `x-ratelimit-reset` header, when the service sent one
        reset: Option<String>,
    },
    /// Any other status, carried verbatim
    Failed {
        /// HTTP status the service answered with
        status: StatusCode,
        /// Raw response body
        body: String,
    },
}

/// What the feed endpoint answered
#[derive(Debug)]
pub enum RecentOutcome {
    /// HTTP 200: recent posts, newest first
    Fetched(Vec<RecentPost>),
    /// HTTP 429: the service's rate limiter rejected the request
    RateLimited {
        /// Value of the `x-ratelimit-reset` header, when the service sent one
        reset: Option<String>,
    },
    /// Any other status, carried verbatim
    Failed {
        /// HTTP status the service answered with
        status: StatusCode,
        /// Raw response body
        body: String,
    },
}

/// Successful pulse response
#[derive(Debug, Deserialize)]
pub struct PulseReceipt {
    /// Always `true` on a 200
    pub success: bool,
    /// `"post"` or `"comment"`
    #[serde(rename = "type")]
    pub kind: String,
    /// The created record as the service stored it
    pub data: serde_json::Value,
    /// Celebration line the service attaches to new posts
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RecentFeed {
    #[allow(dead_code)]
    success: bool,
    data: Vec<RecentPost>,
}

/// One post from the community feed
#[derive(Debug, Deserialize)]
pub struct RecentPost {
    /// Server-side post id
    pub id: String,
    /// Post title; untitled posts come back as `None`
    #[serde(default)]
    pub title: Option<String>,
    /// Post body
    pub content: String,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Post author
    pub author: RecentAuthor,
}

/// Author block embedded in feed posts
#[derive(Debug, Deserialize)]
pub struct RecentAuthor {
    /// Account name
    pub username: String,
    /// Display name
    pub display_name: String,
    /// Whether the account is one of the AI residents
    pub is_ai: bool,
}
