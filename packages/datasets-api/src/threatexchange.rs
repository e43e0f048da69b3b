//! ThreatExchange Graph API client for privacy-group collaborations.
//!
//! Only the two listing edges are used:
//! - `threat_privacy_groups_member`: groups this app is a member of
//! - `threat_privacy_groups_owner`: groups this app owns

use crate::model::{DatasetConfig, PrivacyGroupId};
use crate::Error;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, info};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const FIELDS: &str = "id,name,description,threat_updates_enabled";
/// Stop following `paging.next` after this many pages.
const MAX_PAGES: usize = 100;

/// A privacy group as reported by ThreatExchange.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PrivacyGroup {
    pub id: PrivacyGroupId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Threat updates must be enabled for the fetcher to read the group.
    #[serde(default)]
    pub threat_updates_enabled: bool,
}

impl PrivacyGroup {
    /// Dataset config for a group discovered by sync. All behaviors start on.
    pub fn into_config(self) -> DatasetConfig {
        DatasetConfig {
            privacy_group_id: self.id,
            privacy_group_name: self.name,
            description: self.description,
            fetcher_active: true,
            matcher_active: true,
            write_back: true,
            in_use: true,
        }
    }
}

/// Source of the collaborations that dataset configs mirror.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CollaborationSource: Send + Sync {
    /// Every privacy group visible to this deployment, each id at most once.
    async fn privacy_groups(&self) -> Result<Vec<PrivacyGroup>, Error>;
}

#[derive(Deserialize)]
struct Page {
    #[serde(default)]
    data: Vec<PrivacyGroup>,
    paging: Option<Paging>,
}

#[derive(Deserialize)]
struct Paging {
    next: Option<String>,
}

pub struct ThreatExchangeClient {
    http: reqwest::Client,
    base_url: String,
    access_token: Option<String>,
}

impl ThreatExchangeClient {
    pub fn new(
        base_url: &str,
        access_token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| Error::Config(format!("HTTP client build failed: {e}")))?;

        info!(
            base_url,
            token_configured = access_token.is_some(),
            "ThreatExchange client initialized"
        );

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token,
        })
    }

    /// Fetch every page of one listing edge.
    async fn list_edge(&self, edge: &str) -> Result<Vec<PrivacyGroup>, Error> {
        let token = self.access_token.as_deref().ok_or_else(|| {
            Error::Upstream("ThreatExchange access token is not configured".into())
        })?;

        let mut request = self
            .http
            .get(format!("{}/{edge}", self.base_url))
            .query(&[("access_token", token), ("fields", FIELDS)]);
        let mut groups = Vec::new();

        for page_no in 0..MAX_PAGES {
            let resp = request
                .send()
                .await
                .map_err(|e| transport_error(edge, "request failed", e))?;

            let status = resp.status();
            if !status.is_success() {
                let body = resp.text().await.unwrap_or_default().replace(token, "<redacted>");
                return Err(Error::Upstream(format!(
                    "ThreatExchange {edge} returned {status}: {}",
                    body.chars().take(200).collect::<String>()
                )));
            }

            let page: Page = resp
                .json()
                .await
                .map_err(|e| transport_error(edge, "bad response", e))?;

            debug!(edge, page = page_no, count = page.data.len(), "Fetched privacy groups page");
            groups.extend(page.data);

            match page.paging.and_then(|p| p.next) {
                // `next` is absolute and already carries the token.
                Some(next) => request = self.http.get(next),
                None => return Ok(groups),
            }
        }

        Err(Error::Upstream(format!(
            "ThreatExchange {edge} paging exceeded {MAX_PAGES} pages"
        )))
    }
}

#[async_trait]
impl CollaborationSource for ThreatExchangeClient {
    async fn privacy_groups(&self) -> Result<Vec<PrivacyGroup>, Error> {
        let member = self.list_edge("threat_privacy_groups_member").await?;
        let owner = self.list_edge("threat_privacy_groups_owner").await?;
        Ok(merge_unique(member, owner))
    }
}

/// Request URLs carry the access token, so reqwest errors are reported
/// without them.
fn transport_error(edge: &str, what: &str, e: reqwest::Error) -> Error {
    let timed_out = if e.is_timeout() { " (timed out)" } else { "" };
    Error::Upstream(format!(
        "ThreatExchange {edge} {what}{timed_out}: {}",
        e.without_url()
    ))
}

/// Concatenate, keeping the first occurrence of each id.
fn merge_unique(first: Vec<PrivacyGroup>, second: Vec<PrivacyGroup>) -> Vec<PrivacyGroup> {
    let mut seen = HashSet::new();
    first
        .into_iter()
        .chain(second)
        .filter(|g| seen.insert(g.id.clone()))
        .collect()
}
