//! Data models for the analytics API.
//!
//! This module contains the wire types returned by the conversation
//! analytics backend. Field names follow the JSON the backend emits
//! (camelCase keys, a handful of snake_case aggregates, and Chinese
//! domain values for resolution statuses and sentiments), so every
//! struct deserializes from a response body without translation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Standard response envelope wrapping every endpoint's payload.
///
/// The backend reports failure through `success: false` plus a
/// human-readable `message`, regardless of HTTP status code.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Pagination block attached to list responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub current: u32,
    #[serde(rename = "pageSize")]
    pub page_size: u32,
    pub total: u64,
}

/// A page of items plus its pagination block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

/// Who produced a message within a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    System,
    Agent,
    User,
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageKind::System => write!(f, "system"),
            MessageKind::Agent => write!(f, "agent"),
            MessageKind::User => write!(f, "user"),
        }
    }
}

/// Per-message sentiment classification attached upstream.
///
/// The wire values are the Chinese labels the analysis pipeline emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    #[serde(rename = "正向")]
    Positive,
    #[serde(rename = "中立")]
    Neutral,
    #[serde(rename = "负向")]
    Negative,
}

impl Sentiment {
    /// Returns an emoji marker for transcripts.
    pub fn emoji(&self) -> &'static str {
        match self {
            Sentiment::Positive => "🙂",
            Sentiment::Neutral => "😐",
            Sentiment::Negative => "🙁",
        }
    }

    /// Returns the wire label.
    pub fn label(&self) -> &'static str {
        match self {
            Sentiment::Positive => "正向",
            Sentiment::Neutral => "中立",
            Sentiment::Negative => "负向",
        }
    }
}

/// One turn of a conversation transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub content: String,
    pub time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Sentiment>,
}

/// Trend direction attached to a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendStatus {
    Up,
    Down,
    Equal,
}

/// A single scored metric (0-100) with its trend.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Metric {
    pub value: f64,
    #[serde(default)]
    pub trend: f64,
    #[serde(default = "default_trend_status")]
    pub status: TrendStatus,
}

fn default_trend_status() -> TrendStatus {
    TrendStatus::Equal
}

/// The four per-conversation metrics.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Metrics {
    pub satisfaction: Metric,
    pub resolution: Metric,
    pub attitude: Metric,
    pub risk: Metric,
}

/// Customer details attached to a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerInfo {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(default)]
    pub device: String,
    #[serde(default)]
    pub history: String,
}

/// Resolution status plus a free-text description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolutionStatus {
    pub status: String,
    #[serde(default)]
    pub description: String,
}

/// Upstream-generated summary of a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationSummary {
    #[serde(rename = "mainIssue")]
    pub main_issue: String,
    #[serde(rename = "resolutionStatus")]
    pub resolution_status: ResolutionStatus,
    #[serde(default, rename = "mainSolution")]
    pub main_solution: String,
}

/// Message counts the backend pre-computed for a conversation.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct InteractionAnalysis {
    #[serde(rename = "totalMessages")]
    pub total_messages: u64,
    #[serde(rename = "agentMessages")]
    pub agent_messages: u64,
    #[serde(rename = "userMessages")]
    pub user_messages: u64,
}

/// Upstream sentiment tally over a conversation's user messages.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct EmotionSummary {
    pub positive: u64,
    pub neutral: u64,
    pub negative: u64,
}

/// Full detail payload for a single conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationDetail {
    pub id: String,
    pub time: String,
    pub agent: String,
    pub metrics: Metrics,
    #[serde(rename = "customerInfo")]
    pub customer_info: CustomerInfo,
    #[serde(rename = "conversationSummary")]
    pub conversation_summary: ConversationSummary,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default, rename = "improvementSuggestions")]
    pub improvement_suggestions: Vec<String>,
    #[serde(default, rename = "interactionAnalysis")]
    pub interaction_analysis: Option<InteractionAnalysis>,
    #[serde(default, rename = "emotionSummary")]
    pub emotion_summary: Option<EmotionSummary>,
    #[serde(default, rename = "hotWords")]
    pub hot_words: Vec<String>,
}

/// One row of the conversation list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationListItem {
    pub id: String,
    pub time: String,
    pub agent: String,
    #[serde(rename = "customerId")]
    pub customer_id: String,
    #[serde(rename = "mainIssue")]
    pub main_issue: String,
    #[serde(rename = "resolutionStatus")]
    pub resolution_status: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub satisfaction: f64,
}

/// Overview counters on the dashboard.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DashboardOverview {
    #[serde(rename = "totalConversations")]
    pub total_conversations: u64,
    #[serde(default, rename = "avg_totalMessages")]
    pub avg_total_messages: f64,
    #[serde(default, rename = "avg_agentMessages")]
    pub avg_agent_messages: f64,
    #[serde(default, rename = "avg_userMessages")]
    pub avg_user_messages: f64,
}

/// Fleet-wide metric averages on the dashboard.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ConversationMetrics {
    #[serde(default)]
    pub avg_satisfaction: f64,
    #[serde(default)]
    pub avg_resolution: f64,
    #[serde(default)]
    pub avg_attitude: f64,
    #[serde(default)]
    pub avg_risk: f64,
}

/// A ranked term (tag or hot word) with its share of conversations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedTerm {
    #[serde(rename = "_id")]
    pub term: String,
    pub count: u64,
    #[serde(default)]
    pub percentage: f64,
}

/// Per-tag resolution-rate aggregate delivered with the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagResolutionRate {
    pub tag: String,
    pub count: u64,
    pub resolved: f64,
    pub partially_resolved: f64,
    pub unresolved: f64,
}

/// Co-occurrence edge between two tags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagCooccurrence {
    pub source: String,
    pub target: String,
    pub count: u64,
}

/// Share of conversations handled per agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentServiceRate {
    pub agent: String,
    pub count: u64,
    #[serde(default)]
    pub percentage: f64,
}

/// Dashboard summary payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardData {
    pub overview: DashboardOverview,
    #[serde(rename = "conversationMetrics")]
    pub conversation_metrics: ConversationMetrics,
    #[serde(default, rename = "Top_tags")]
    pub top_tags: Vec<RankedTerm>,
    #[serde(default, rename = "Top_hotwords")]
    pub top_hotwords: Vec<RankedTerm>,
    #[serde(default)]
    pub tag_resolution_rates: Vec<TagResolutionRate>,
    #[serde(default)]
    pub tag_cooccurrence: Vec<TagCooccurrence>,
    #[serde(default)]
    pub agent_service_rates: Vec<AgentServiceRate>,
}

/// Rollup row returned by `/agents` for every agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentPerformance {
    pub agent: String,
    pub count: u64,
    pub resolved: f64,
    pub partially_resolved: f64,
    pub unresolved: f64,
    pub avg_satisfaction: f64,
    pub avg_resolution: f64,
    pub avg_attitude: f64,
    #[serde(default)]
    pub avg_security: f64,
    pub overall_performance: f64,
}

/// Performance block of an agent detail payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentPerformanceDetail {
    pub resolved: f64,
    pub partially_resolved: f64,
    pub unresolved: f64,
    pub avg_satisfaction: f64,
    pub avg_resolution: f64,
    pub avg_attitude: f64,
    #[serde(default)]
    pub avg_security: f64,
    pub overall_performance: f64,
    #[serde(default)]
    pub avg_response_time: f64,
    #[serde(default)]
    pub avg_resolution_time: f64,
}

/// One conversation row within an agent detail payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConversation {
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub time: String,
    #[serde(rename = "customerId")]
    pub customer_id: String,
    #[serde(rename = "mainIssue")]
    pub main_issue: String,
    pub status: String,
    pub satisfaction: f64,
    #[serde(default)]
    pub resolution: f64,
    #[serde(default)]
    pub attitude: f64,
    #[serde(default)]
    pub security: f64,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Analysis payload for a single agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentAnalysis {
    pub agent: String,
    pub count: u64,
    pub performance: AgentPerformanceDetail,
    pub conversations: Vec<AgentConversation>,
    pub pagination: Pagination,
}

/// One conversation row within a tag detail payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagConversation {
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub time: String,
    pub agent: String,
    #[serde(rename = "customerId")]
    pub customer_id: String,
    #[serde(rename = "mainIssue")]
    pub main_issue: String,
    pub status: String,
    pub satisfaction: f64,
    #[serde(default)]
    pub resolution: f64,
    #[serde(default)]
    pub attitude: f64,
    #[serde(default)]
    pub risk: f64,
}

/// Analysis payload for a single tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagAnalysis {
    pub tag: String,
    pub count: u64,
    pub resolved: f64,
    pub partially_resolved: f64,
    pub unresolved: f64,
    pub conversations: Vec<TagConversation>,
    pub pagination: Pagination,
}

/// Distinct values available for the filter dropdowns.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterOptions {
    #[serde(default)]
    pub agents: Vec<String>,
    #[serde(default)]
    pub statuses: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Backend health-check payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_roundtrip() {
        let json = r#"{"success": true, "data": {"agents": ["沐沐"], "statuses": [], "tags": []}}"#;
        let envelope: Envelope<FilterOptions> = serde_json::from_str(json).unwrap();
        assert!(envelope.success);
        assert_eq!(envelope.data.unwrap().agents, vec!["沐沐"]);
        assert!(envelope.message.is_none());
    }

    #[test]
    fn test_envelope_failure_without_data() {
        let json = r#"{"success": false, "message": "未找到标签: 退款", "data": null}"#;
        let envelope: Envelope<TagAnalysis> = serde_json::from_str(json).unwrap();
        assert!(!envelope.success);
        assert!(envelope.data.is_none());
        assert_eq!(envelope.message.as_deref(), Some("未找到标签: 退款"));
    }

    #[test]
    fn test_message_wire_names() {
        let json =
            r#"{"type": "user", "content": "还是不行", "time": "14:05", "sentiment": "负向"}"#;
        let message: Message = serde_json::from_str(json).unwrap();
        assert_eq!(message.kind, MessageKind::User);
        assert_eq!(message.sentiment, Some(Sentiment::Negative));
        assert!(message.sender.is_none());
    }

    #[test]
    fn test_list_item_camel_case() {
        let json = r##"{
            "id": "#12345",
            "time": "2024-03-01 14:00",
            "agent": "沐沐",
            "customerId": "U1001",
            "mainIssue": "退款失败",
            "resolutionStatus": "已解决",
            "tags": ["退款", "投诉"],
            "satisfaction": 92.5
        }"##;
        let item: ConversationListItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.customer_id, "U1001");
        assert_eq!(item.resolution_status, "已解决");
        assert_eq!(item.tags.len(), 2);
    }

    #[test]
    fn test_dashboard_optional_sections_default_empty() {
        let json = r#"{
            "overview": {"totalConversations": 120},
            "conversationMetrics": {"avg_satisfaction": 82.3},
            "Top_tags": [{"_id": "退款", "count": 40, "percentage": 33.3}]
        }"#;
        let dashboard: DashboardData = serde_json::from_str(json).unwrap();
        assert_eq!(dashboard.overview.total_conversations, 120);
        assert_eq!(dashboard.top_tags[0].term, "退款");
        assert!(dashboard.top_hotwords.is_empty());
        assert!(dashboard.tag_resolution_rates.is_empty());
    }

    #[test]
    fn test_pagination_page_size_rename() {
        let json = r#"{"current": 2, "pageSize": 20, "total": 55}"#;
        let pagination: Pagination = serde_json::from_str(json).unwrap();
        assert_eq!(pagination.page_size, 20);
        let back = serde_json::to_string(&pagination).unwrap();
        assert!(back.contains("\"pageSize\":20"));
    }
}
