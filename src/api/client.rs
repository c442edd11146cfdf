//! Typed client for the conversation analytics API.
//!
//! One method per backend endpoint. Every response travels in the
//! `{success, data, message?}` envelope; `success: false` is treated
//! as an error no matter what HTTP status accompanies it. Requests
//! carry no automatic retry.

use reqwest::Url;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use crate::error::ApiError;
use crate::models::{
    AgentAnalysis, AgentPerformance, ConversationDetail, ConversationListItem, DashboardData,
    Envelope, FilterOptions, HealthStatus, Paginated, TagAnalysis,
};
use crate::state::{FilterState, PageState};

/// Client bound to one API base URL.
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    timeout_seconds: u64,
}

impl ApiClient {
    /// Build a client for the given base URL (e.g.
    /// `http://localhost:5000/api`).
    pub fn new(base_url: &str, timeout_seconds: u64) -> Result<Self, ApiError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url)
            .map_err(|e| ApiError::Transport(format!("invalid API base URL {}: {}", base_url, e)))?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|e| ApiError::Transport(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url,
            http,
            timeout_seconds,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Paged conversation list with the current filter set.
    pub async fn conversations(
        &self,
        page: &PageState,
        filters: &FilterState,
    ) -> Result<Paginated<ConversationListItem>, ApiError> {
        let mut params = page_params(page);
        params.extend(filters.query_params());
        self.get(&["conversations"], &params).await
    }

    /// Full detail for one conversation. IDs are expected to carry a
    /// leading `#`; one is added when missing.
    pub async fn conversation_detail(&self, id: &str) -> Result<ConversationDetail, ApiError> {
        let normalized = normalize_conversation_id(id);
        self.get(&["conversations", &normalized], &[]).await
    }

    /// Distinct agents, statuses, and tags for filter dropdowns.
    pub async fn options(&self) -> Result<FilterOptions, ApiError> {
        self.get(&["options"], &[]).await
    }

    /// Aggregate dashboard summary.
    pub async fn dashboard(&self) -> Result<DashboardData, ApiError> {
        self.get(&["dashboard"], &[]).await
    }

    /// Rollup rows for every agent.
    pub async fn agents(&self) -> Result<Vec<AgentPerformance>, ApiError> {
        self.get(&["agents"], &[]).await
    }

    /// Analysis for one agent, with the agent-scoped filter subset.
    pub async fn agent_analysis(
        &self,
        agent: &str,
        page: &PageState,
        filters: &FilterState,
    ) -> Result<AgentAnalysis, ApiError> {
        let mut params = page_params(page);
        params.extend(filters.agent_scope_params());
        self.get(&["agent", agent], &params).await
    }

    /// Analysis for one tag, with the tag-scoped filter subset.
    pub async fn tag_analysis(
        &self,
        tag: &str,
        page: &PageState,
        filters: &FilterState,
    ) -> Result<TagAnalysis, ApiError> {
        let mut params = page_params(page);
        params.extend(filters.tag_scope_params());
        self.get(&["tag", tag], &params).await
    }

    /// Backend health check.
    pub async fn health(&self) -> Result<HealthStatus, ApiError> {
        self.get(&["health"], &[]).await
    }

    /// GET an endpoint and unwrap its envelope.
    async fn get<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        params: &[(&'static str, String)],
    ) -> Result<T, ApiError> {
        let url = self.endpoint(segments)?;
        debug!("GET {} with {} params", url, params.len());

        let mut request = self.http.get(url);
        if !params.is_empty() {
            request = request.query(params);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::from_transport(e, &self.base_url, self.timeout_seconds))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::from_transport(e, &self.base_url, self.timeout_seconds))?;

        // The backend signals failure inside the envelope even on
        // non-2xx statuses, so try to decode the envelope first. The
        // payload is decoded only after `success` is checked: error
        // envelopes carry placeholder data that is no valid payload.
        let envelope: Envelope<serde_json::Value> = match serde_json::from_str(&body) {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => {
                return Err(ApiError::Http {
                    status: status.as_u16(),
                    body: truncate(&body, 200),
                });
            }
            Err(e) => return Err(ApiError::Shape(e.to_string())),
        };

        if !envelope.success {
            return Err(ApiError::Rejected(
                envelope
                    .message
                    .unwrap_or_else(|| "analytics API reported failure".to_string()),
            ));
        }

        let data = envelope
            .data
            .ok_or_else(|| ApiError::Shape("successful envelope without data".to_string()))?;
        serde_json::from_value(data).map_err(|e| ApiError::Shape(e.to_string()))
    }

    /// Join path segments onto the base URL, percent-encoding each
    /// segment (conversation IDs contain `#`).
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ApiError::Transport(format!("invalid API base URL: {}", e)))?;
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| ApiError::Transport("API base URL cannot carry a path".to_string()))?;
            path.pop_if_empty();
            for segment in segments {
                path.push(segment);
            }
        }
        Ok(url)
    }
}

fn page_params(page: &PageState) -> Vec<(&'static str, String)> {
    vec![
        ("page", page.current.to_string()),
        ("pageSize", page.page_size.to_string()),
    ]
}

/// Add the leading `#` conversation IDs carry on the wire.
fn normalize_conversation_id(id: &str) -> String {
    if id.starts_with('#') {
        id.to_string()
    } else {
        format!("#{}", id)
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.len() <= max {
        text.to_string()
    } else {
        let mut end = max;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &text[..end])
    }
}
