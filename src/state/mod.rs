//! Client-side view state for fetch-driven screens.
//!
//! Every screen follows the same lifecycle: Idle -> Loading ->
//! Success or Error, re-entering Loading on any filter or pagination
//! change. The filter and pagination values are explicit serializable
//! objects owned per view; nothing is shared between views. A
//! monotonically increasing request generation guards against a slow
//! response overwriting the result of a later request.

use serde::{Deserialize, Serialize};

use crate::models::Pagination;

/// User-set filter fields driving a list query.
///
/// Fields left at their default are omitted from the query entirely;
/// multi-valued tags collapse into one comma-separated parameter.
/// Date-range ordering is not validated client-side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    pub search_text: Option<String>,
    pub agent: Option<String>,
    pub resolution_status: Option<String>,
    pub tags: Vec<String>,
    /// Inclusive (start, end) bounds as `YYYY-MM-DD` strings.
    pub time_range: Option<(String, String)>,
}

impl FilterState {
    /// True when every field is at its default.
    pub fn is_empty(&self) -> bool {
        *self == FilterState::default()
    }

    /// Clear all fields back to defaults (the "reset" action).
    pub fn reset(&mut self) {
        *self = FilterState::default();
    }

    /// Query parameters for the `/conversations` list endpoint.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        self.push_common(&mut params);
        if let Some(ref agent) = self.agent {
            if !agent.is_empty() {
                params.push(("agent", agent.clone()));
            }
        }
        if !self.tags.is_empty() {
            params.push(("tags", self.tags.join(",")));
        }
        params
    }

    /// Query parameters for `/agent/:name` (tag filter is singular,
    /// the agent itself lives in the path).
    pub fn agent_scope_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        self.push_common(&mut params);
        if let Some(tag) = self.tags.first() {
            if !tag.is_empty() {
                params.push(("tag", tag.clone()));
            }
        }
        params
    }

    /// Query parameters for `/tag/:name` (the tag lives in the path).
    pub fn tag_scope_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        self.push_common(&mut params);
        if let Some(ref agent) = self.agent {
            if !agent.is_empty() {
                params.push(("agent", agent.clone()));
            }
        }
        params
    }

    fn push_common(&self, params: &mut Vec<(&'static str, String)>) {
        if let Some(ref text) = self.search_text {
            if !text.is_empty() {
                params.push(("searchText", text.clone()));
            }
        }
        if let Some(ref status) = self.resolution_status {
            if !status.is_empty() {
                params.push(("resolutionStatus", status.clone()));
            }
        }
        if let Some((ref start, ref end)) = self.time_range {
            params.push(("timeStart", start.clone()));
            params.push(("timeEnd", end.clone()));
        }
    }
}

/// Pagination state for a list view.
///
/// `total` always comes verbatim from the last server response; the
/// client never counts rows itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageState {
    pub current: u32,
    pub page_size: u32,
    pub total: u64,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            current: 1,
            page_size: 10,
            total: 0,
        }
    }
}

impl PageState {
    pub fn new(page_size: u32) -> Self {
        Self {
            page_size,
            ..Self::default()
        }
    }

    /// Apply a page or page-size change from the user; the filter set
    /// is untouched.
    pub fn set(&mut self, current: u32, page_size: u32) {
        self.current = current.max(1);
        self.page_size = page_size.max(1);
    }

    /// Adopt the pagination block of a server response.
    pub fn apply(&mut self, pagination: &Pagination) {
        self.current = pagination.current;
        self.page_size = pagination.page_size;
        self.total = pagination.total;
    }
}

/// Lifecycle of a single fetch-driven view.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    Idle,
    Loading,
    Success(T),
    Error(String),
}

impl<T> FetchState<T> {
    /// Consume the state, yielding the payload or the error message.
    /// Idle and Loading yield an error since no result arrived.
    pub fn into_result(self) -> Result<T, String> {
        match self {
            FetchState::Success(data) => Ok(data),
            FetchState::Error(message) => Err(message),
            FetchState::Idle | FetchState::Loading => Err("request never completed".to_string()),
        }
    }
}

/// Token identifying one outstanding request of a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

/// A fetch-driven view with a staleness guard.
///
/// `begin` bumps the generation and enters Loading; `complete` applies
/// a result only when it carries the latest token, so a response that
/// was overtaken by a newer request is dropped instead of replacing
/// fresher data.
#[derive(Debug)]
pub struct ViewState<T> {
    fetch: FetchState<T>,
    generation: u64,
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        Self {
            fetch: FetchState::Idle,
            generation: 0,
        }
    }
}

impl<T> ViewState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fetch; the returned token must accompany the result.
    pub fn begin(&mut self) -> RequestToken {
        self.generation += 1;
        self.fetch = FetchState::Loading;
        RequestToken(self.generation)
    }

    /// Apply a fetch result. Returns false (and leaves the state
    /// untouched) when the token is stale.
    pub fn complete(&mut self, token: RequestToken, result: Result<T, String>) -> bool {
        if token.0 != self.generation {
            return false;
        }
        self.fetch = match result {
            Ok(data) => FetchState::Success(data),
            Err(message) => FetchState::Error(message),
        };
        true
    }

    /// Consume the view, yielding the payload or the error message.
    pub fn into_result(self) -> Result<T, String> {
        self.fetch.into_result()
    }
}
