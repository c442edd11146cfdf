//! Markdown report generation.
//!
//! This module renders the payloads fetched from the analytics API
//! into Markdown reports, one generator per view. Scores carry the
//! band marker from [`crate::analysis::score_band`] so a terminal
//! reader gets the same color coding the dashboard used.

use crate::analysis::{score_band, Direction, InteractionStats, Scheme, SentimentTally, TagRollup};
use crate::models::{
    AgentAnalysis, AgentPerformance, ConversationDetail, ConversationListItem, DashboardData,
    FilterOptions, HealthStatus, Message, MessageKind, Metric, Paginated, Pagination, TagAnalysis,
    TrendStatus,
};
use crate::state::FilterState;
use anyhow::Result;
use chrono::Utc;
use serde::Serialize;

/// Render any payload as pretty-printed JSON.
pub fn json_report<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(Into::into)
}

/// Generate the conversation list report.
pub fn conversations_markdown(
    page: &Paginated<ConversationListItem>,
    filters: &FilterState,
) -> String {
    let mut output = String::new();

    output.push_str("# Conversations\n\n");
    output.push_str(&generate_filter_section(filters));

    if page.items.is_empty() {
        output.push_str("No conversations matched.\n\n");
    } else {
        output.push_str("| ID | Time | Agent | Customer | Main Issue | Status | Satisfaction | Tags |\n");
        output.push_str("|:---|:---|:---|:---|:---|:---|:---:|:---|\n");
        for item in &page.items {
            output.push_str(&format!(
                "| {} | {} | {} | {} | {} | {} | {} | {} |\n",
                item.id,
                item.time,
                item.agent,
                item.customer_id,
                item.main_issue,
                item.resolution_status,
                score_cell(item.satisfaction, Direction::HigherIsBetter, Scheme::Standard),
                item.tags.join(", "),
            ));
        }
        output.push('\n');
    }

    output.push_str(&generate_pagination_footer(&page.pagination));
    output.push_str(&generate_footer());
    output
}

/// Generate the full report for one conversation.
pub fn conversation_detail_markdown(detail: &ConversationDetail) -> String {
    let mut output = String::new();

    output.push_str(&format!("# Conversation {}\n\n", detail.id));
    output.push_str(&format!("- **Time:** {}\n", detail.time));
    output.push_str(&format!("- **Agent:** {}\n", detail.agent));
    output.push_str(&format!("- **Customer:** {}\n", detail.customer_info.user_id));
    if !detail.customer_info.device.is_empty() {
        output.push_str(&format!("- **Device:** {}\n", detail.customer_info.device));
    }
    if !detail.customer_info.history.is_empty() {
        output.push_str(&format!("- **History:** {}\n", detail.customer_info.history));
    }
    if !detail.tags.is_empty() {
        output.push_str(&format!("- **Tags:** {}\n", detail.tags.join(", ")));
    }
    output.push('\n');

    output.push_str(&generate_metrics_section(detail));
    output.push_str(&generate_summary_section(detail));
    output.push_str(&generate_interaction_section(detail));
    output.push_str(&generate_transcript_section(&detail.messages));

    if !detail.hot_words.is_empty() {
        output.push_str("## Hot Words\n\n");
        output.push_str(&format!("{}\n\n", detail.hot_words.join(", ")));
    }

    if !detail.improvement_suggestions.is_empty() {
        output.push_str("## Improvement Suggestions\n\n");
        for (i, suggestion) in detail.improvement_suggestions.iter().enumerate() {
            output.push_str(&format!("{}. {}\n", i + 1, suggestion));
        }
        output.push('\n');
    }

    output.push_str(&generate_footer());
    output
}

/// Generate the metrics section with band markers and trends.
fn generate_metrics_section(detail: &ConversationDetail) -> String {
    let mut section = String::new();

    section.push_str("## Metrics\n\n");
    section.push_str("| Metric | Score | Trend |\n");
    section.push_str("|:---|:---:|:---:|\n");
    section.push_str(&metric_row("Satisfaction", &detail.metrics.satisfaction, Direction::HigherIsBetter));
    section.push_str(&metric_row("Resolution", &detail.metrics.resolution, Direction::HigherIsBetter));
    section.push_str(&metric_row("Attitude", &detail.metrics.attitude, Direction::HigherIsBetter));
    section.push_str(&metric_row("Risk", &detail.metrics.risk, Direction::LowerIsBetter));
    section.push('\n');

    section
}

fn metric_row(name: &str, metric: &Metric, direction: Direction) -> String {
    let arrow = match metric.status {
        TrendStatus::Up => "↑",
        TrendStatus::Down => "↓",
        TrendStatus::Equal => "→",
    };
    format!(
        "| {} | {} | {} {:.1} |\n",
        name,
        score_cell(metric.value, direction, Scheme::Standard),
        arrow,
        metric.trend,
    )
}

/// Generate the upstream summary section.
fn generate_summary_section(detail: &ConversationDetail) -> String {
    let mut section = String::new();

    section.push_str("## Summary\n\n");
    section.push_str(&format!(
        "- **Main Issue:** {}\n",
        detail.conversation_summary.main_issue
    ));
    section.push_str(&format!(
        "- **Resolution:** {}",
        detail.conversation_summary.resolution_status.status
    ));
    if !detail.conversation_summary.resolution_status.description.is_empty() {
        section.push_str(&format!(
            " ({})",
            detail.conversation_summary.resolution_status.description
        ));
    }
    section.push('\n');
    if !detail.conversation_summary.main_solution.is_empty() {
        section.push_str(&format!(
            "- **Solution:** {}\n",
            detail.conversation_summary.main_solution
        ));
    }
    section.push('\n');

    section
}

/// Generate message counts and the sentiment split.
///
/// Counts are recomputed from the transcript; the backend's own
/// `interactionAnalysis` block (when present) is shown alongside only
/// if it disagrees.
fn generate_interaction_section(detail: &ConversationDetail) -> String {
    let mut section = String::new();
    let stats = InteractionStats::from_messages(&detail.messages);

    section.push_str("## Interaction\n\n");
    section.push_str(&format!("- **Total Messages:** {}\n", stats.total_messages));
    section.push_str(&format!("- **Agent Messages:** {}\n", stats.agent_messages));
    section.push_str(&format!("- **User Messages:** {}\n", stats.user_messages));
    if stats.system_messages > 0 {
        section.push_str(&format!("- **System Messages:** {}\n", stats.system_messages));
    }

    if let Some(upstream) = &detail.interaction_analysis {
        if upstream.total_messages != stats.total_messages
            || upstream.agent_messages != stats.agent_messages
            || upstream.user_messages != stats.user_messages
        {
            section.push_str(&format!(
                "- **Reported Upstream:** {} total / {} agent / {} user\n",
                upstream.total_messages, upstream.agent_messages, upstream.user_messages
            ));
        }
    }
    section.push('\n');

    // Transcripts without per-message labels still carry the tally in
    // the upstream emotionSummary block.
    let tally = if stats.sentiment.total() > 0 {
        stats.sentiment
    } else {
        detail
            .emotion_summary
            .map(SentimentTally::from)
            .unwrap_or_default()
    };
    if tally.total() > 0 {
        let (positive, neutral, negative) = tally.percentages();
        section.push_str("### User Sentiment\n\n");
        section.push_str(&format!(
            "🙂 {}% positive | 😐 {}% neutral | 🙁 {}% negative\n\n",
            positive, neutral, negative
        ));
    }

    section
}

/// Generate the transcript section.
fn generate_transcript_section(messages: &[Message]) -> String {
    let mut section = String::new();

    section.push_str("## Transcript\n\n");
    if messages.is_empty() {
        section.push_str("No messages recorded.\n\n");
        return section;
    }

    for message in messages {
        let speaker = match (message.kind, &message.sender) {
            (MessageKind::System, _) => "system".to_string(),
            (_, Some(sender)) => sender.clone(),
            (kind, None) => kind.to_string(),
        };
        let sentiment = message
            .sentiment
            .map(|s| format!(" {}", s.emoji()))
            .unwrap_or_default();
        section.push_str(&format!(
            "- `{}` **{}**:{} {}\n",
            message.time, speaker, sentiment, message.content
        ));
    }
    section.push('\n');

    section
}

/// Generate the dashboard report.
pub fn dashboard_markdown(data: &DashboardData) -> String {
    let mut output = String::new();

    output.push_str("# Dashboard\n\n");

    // Overview
    output.push_str("## Overview\n\n");
    output.push_str(&format!(
        "- **Total Conversations:** {}\n",
        data.overview.total_conversations
    ));
    output.push_str(&format!(
        "- **Avg Messages per Conversation:** {:.1} ({:.1} agent / {:.1} user)\n\n",
        data.overview.avg_total_messages,
        data.overview.avg_agent_messages,
        data.overview.avg_user_messages
    ));

    // Fleet metrics use the wider banding the dashboard cards used.
    output.push_str("## Conversation Metrics\n\n");
    output.push_str("| Metric | Average |\n");
    output.push_str("|:---|:---:|\n");
    output.push_str(&format!(
        "| Satisfaction | {} |\n",
        score_cell(data.conversation_metrics.avg_satisfaction, Direction::HigherIsBetter, Scheme::Wide)
    ));
    output.push_str(&format!(
        "| Resolution | {} |\n",
        score_cell(data.conversation_metrics.avg_resolution, Direction::HigherIsBetter, Scheme::Wide)
    ));
    output.push_str(&format!(
        "| Attitude | {} |\n",
        score_cell(data.conversation_metrics.avg_attitude, Direction::HigherIsBetter, Scheme::Wide)
    ));
    output.push_str(&format!(
        "| Risk | {} |\n\n",
        score_cell(data.conversation_metrics.avg_risk, Direction::LowerIsBetter, Scheme::Wide)
    ));

    if !data.top_tags.is_empty() {
        output.push_str("## Top Tags\n\n");
        output.push_str("| Tag | Count | Share |\n");
        output.push_str("|:---|:---:|:---|\n");
        for term in &data.top_tags {
            output.push_str(&format!(
                "| {} | {} | {} {:.1}% |\n",
                term.term,
                term.count,
                bar(term.percentage),
                term.percentage
            ));
        }
        output.push('\n');
    }

    if !data.top_hotwords.is_empty() {
        output.push_str("## Top Hot Words\n\n");
        output.push_str("| Word | Count | Share |\n");
        output.push_str("|:---|:---:|:---|\n");
        for term in &data.top_hotwords {
            output.push_str(&format!(
                "| {} | {} | {} {:.1}% |\n",
                term.term,
                term.count,
                bar(term.percentage),
                term.percentage
            ));
        }
        output.push('\n');
    }

    if !data.tag_resolution_rates.is_empty() {
        output.push_str("## Resolution Rate by Tag\n\n");
        output.push_str("| Tag | Conversations | Resolved | Partial | Unresolved |\n");
        output.push_str("|:---|:---:|:---:|:---:|:---:|\n");
        for rate in &data.tag_resolution_rates {
            output.push_str(&format!(
                "| {} | {} | {:.1}% | {:.1}% | {:.1}% |\n",
                rate.tag, rate.count, rate.resolved, rate.partially_resolved, rate.unresolved
            ));
        }
        output.push('\n');
    }

    if !data.tag_cooccurrence.is_empty() {
        output.push_str("## Tag Co-occurrence\n\n");
        for edge in &data.tag_cooccurrence {
            output.push_str(&format!(
                "- {} + {} ({} conversations)\n",
                edge.source, edge.target, edge.count
            ));
        }
        output.push('\n');
    }

    if !data.agent_service_rates.is_empty() {
        output.push_str("## Conversations by Agent\n\n");
        output.push_str("| Agent | Count | Share |\n");
        output.push_str("|:---|:---:|:---|\n");
        for rate in &data.agent_service_rates {
            output.push_str(&format!(
                "| {} | {} | {} {:.1}% |\n",
                rate.agent,
                rate.count,
                bar(rate.percentage),
                rate.percentage
            ));
        }
        output.push('\n');
    }

    output.push_str(&generate_footer());
    output
}

/// Generate the agents overview report.
pub fn agents_markdown(rows: &[AgentPerformance]) -> String {
    let mut output = String::new();

    output.push_str("# Agents\n\n");
    if rows.is_empty() {
        output.push_str("No agents found.\n");
        return output;
    }

    output.push_str(
        "| Agent | Conversations | Resolved | Satisfaction | Resolution | Attitude | Overall |\n",
    );
    output.push_str("|:---|:---:|:---:|:---:|:---:|:---:|:---:|\n");
    for row in rows {
        output.push_str(&format!(
            "| {} | {} | {:.1}% | {} | {} | {} | {} |\n",
            row.agent,
            row.count,
            row.resolved,
            score_cell(row.avg_satisfaction, Direction::HigherIsBetter, Scheme::Standard),
            score_cell(row.avg_resolution, Direction::HigherIsBetter, Scheme::Standard),
            score_cell(row.avg_attitude, Direction::HigherIsBetter, Scheme::Standard),
            score_cell(row.overall_performance, Direction::HigherIsBetter, Scheme::Standard),
        ));
    }
    output.push('\n');

    output.push_str(&generate_footer());
    output
}

/// Generate the report for one agent.
pub fn agent_markdown(analysis: &AgentAnalysis) -> String {
    let mut output = String::new();
    let perf = &analysis.performance;

    output.push_str(&format!("# Agent {}\n\n", analysis.agent));
    output.push_str(&format!("- **Conversations:** {}\n", analysis.count));
    output.push_str(&format!(
        "- **Resolution Split:** {:.1}% resolved / {:.1}% partial / {:.1}% unresolved\n",
        perf.resolved, perf.partially_resolved, perf.unresolved
    ));
    if perf.avg_response_time > 0.0 {
        output.push_str(&format!(
            "- **Avg Response Time:** {:.1} min\n",
            perf.avg_response_time
        ));
    }
    if perf.avg_resolution_time > 0.0 {
        output.push_str(&format!(
            "- **Avg Resolution Time:** {:.1} min\n",
            perf.avg_resolution_time
        ));
    }
    output.push('\n');

    output.push_str("## Performance\n\n");
    output.push_str("| Metric | Score |\n");
    output.push_str("|:---|:---:|\n");
    output.push_str(&format!(
        "| Satisfaction | {} |\n",
        score_cell(perf.avg_satisfaction, Direction::HigherIsBetter, Scheme::Standard)
    ));
    output.push_str(&format!(
        "| Resolution | {} |\n",
        score_cell(perf.avg_resolution, Direction::HigherIsBetter, Scheme::Standard)
    ));
    output.push_str(&format!(
        "| Attitude | {} |\n",
        score_cell(perf.avg_attitude, Direction::HigherIsBetter, Scheme::Standard)
    ));
    output.push_str(&format!(
        "| Security | {} |\n",
        score_cell(perf.avg_security, Direction::HigherIsBetter, Scheme::Standard)
    ));
    output.push_str(&format!(
        "| **Overall** | {} |\n\n",
        score_cell(perf.overall_performance, Direction::HigherIsBetter, Scheme::Standard)
    ));

    output.push_str("## Conversations\n\n");
    if analysis.conversations.is_empty() {
        output.push_str("No conversations on this page.\n\n");
    } else {
        output.push_str("| ID | Time | Customer | Main Issue | Status | Satisfaction | Tags |\n");
        output.push_str("|:---|:---|:---|:---|:---|:---:|:---|\n");
        for conv in &analysis.conversations {
            output.push_str(&format!(
                "| {} | {} | {} | {} | {} | {} | {} |\n",
                conv.id,
                conv.time,
                conv.customer_id,
                conv.main_issue,
                conv.status,
                score_cell(conv.satisfaction, Direction::HigherIsBetter, Scheme::Standard),
                conv.tags.join(", "),
            ));
        }
        output.push('\n');
    }

    output.push_str(&generate_pagination_footer(&analysis.pagination));
    output.push_str(&generate_footer());
    output
}

/// Generate the report for one tag.
pub fn tag_markdown(analysis: &TagAnalysis) -> String {
    let mut output = String::new();

    output.push_str(&format!("# Tag {}\n\n", analysis.tag));
    output.push_str(&format!("- **Conversations:** {}\n", analysis.count));
    output.push_str(&format!(
        "- **Resolution Split:** {:.1}% resolved / {:.1}% partial / {:.1}% unresolved\n\n",
        analysis.resolved, analysis.partially_resolved, analysis.unresolved
    ));

    output.push_str("## Conversations\n\n");
    if analysis.conversations.is_empty() {
        output.push_str("No conversations on this page.\n\n");
    } else {
        output.push_str("| ID | Time | Agent | Customer | Main Issue | Status | Satisfaction |\n");
        output.push_str("|:---|:---|:---|:---|:---|:---|:---:|\n");
        for conv in &analysis.conversations {
            output.push_str(&format!(
                "| {} | {} | {} | {} | {} | {} | {} |\n",
                conv.id,
                conv.time,
                conv.agent,
                conv.customer_id,
                conv.main_issue,
                conv.status,
                score_cell(conv.satisfaction, Direction::HigherIsBetter, Scheme::Standard),
            ));
        }
        output.push('\n');
    }

    output.push_str(&generate_pagination_footer(&analysis.pagination));
    output.push_str(&generate_footer());
    output
}

/// Generate the derived tag overview.
pub fn tag_rollups_markdown(rollups: &[TagRollup]) -> String {
    let mut output = String::new();

    output.push_str("# Tags\n\n");
    if rollups.is_empty() {
        output.push_str("No tag data available.\n");
        return output;
    }

    output.push_str(
        "| Tag | Conversations | Resolved | Partial | Unresolved | Satisfaction* | Resolution* |\n",
    );
    output.push_str("|:---|:---:|:---:|:---:|:---:|:---:|:---:|\n");
    for rollup in rollups {
        output.push_str(&format!(
            "| {} | {} | {:.1}% | {:.1}% | {:.1}% | {} | {} |\n",
            rollup.tag,
            rollup.count,
            rollup.resolved,
            rollup.partially_resolved,
            rollup.unresolved,
            score_cell(rollup.avg_satisfaction, Direction::HigherIsBetter, Scheme::Standard),
            score_cell(rollup.avg_resolution, Direction::HigherIsBetter, Scheme::Standard),
        ));
    }
    output.push('\n');
    output.push_str("\\* estimated from the resolution split\n");

    output.push_str(&generate_footer());
    output
}

/// Generate the filter-options report.
pub fn options_markdown(options: &FilterOptions) -> String {
    let mut output = String::new();

    output.push_str("# Filter Options\n\n");
    output.push_str(&format!("- **Agents:** {}\n", options.agents.join(", ")));
    output.push_str(&format!("- **Statuses:** {}\n", options.statuses.join(", ")));
    output.push_str(&format!("- **Tags:** {}\n", options.tags.join(", ")));

    output
}

/// Generate the health report.
pub fn health_markdown(health: &HealthStatus) -> String {
    let mut output = String::new();
    let glyph = if health.status == "ok" || health.status == "healthy" {
        "✅"
    } else {
        "❌"
    };

    output.push_str("# Health\n\n");
    output.push_str(&format!("- **Status:** {} {}\n", glyph, health.status));
    if !health.version.is_empty() {
        output.push_str(&format!("- **Version:** {}\n", health.version));
    }
    if !health.timestamp.is_empty() {
        output.push_str(&format!("- **Timestamp:** {}\n", health.timestamp));
    }

    output
}

/// Generate the active-filter section shown above list reports.
fn generate_filter_section(filters: &FilterState) -> String {
    if filters.is_empty() {
        return String::new();
    }

    let mut section = String::new();
    section.push_str("## Active Filters\n\n");
    if let Some(ref search) = filters.search_text {
        section.push_str(&format!("- **Search:** {}\n", search));
    }
    if let Some(ref agent) = filters.agent {
        section.push_str(&format!("- **Agent:** {}\n", agent));
    }
    if let Some(ref status) = filters.resolution_status {
        section.push_str(&format!("- **Status:** {}\n", status));
    }
    if !filters.tags.is_empty() {
        section.push_str(&format!("- **Tags:** {}\n", filters.tags.join(", ")));
    }
    if let Some((ref start, ref end)) = filters.time_range {
        section.push_str(&format!("- **Time Range:** {} to {}\n", start, end));
    }
    section.push('\n');

    section
}

/// Generate the page footer. The total comes from the server verbatim.
fn generate_pagination_footer(pagination: &Pagination) -> String {
    let pages = if pagination.page_size == 0 {
        1
    } else {
        (pagination.total + pagination.page_size as u64 - 1) / pagination.page_size as u64
    };
    format!(
        "*Page {} of {} ({} total)*\n",
        pagination.current,
        pages.max(1),
        pagination.total
    )
}

/// Generate the report footer.
fn generate_footer() -> String {
    format!(
        "\n---\n\n*Generated by convolens at {}*\n",
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    )
}

/// Format a score with its band marker.
fn score_cell(value: f64, direction: Direction, scheme: Scheme) -> String {
    format!("{} {:.1}", score_band(value, direction, scheme).emoji(), value)
}

/// Render a percentage (0-100) as a ten-slot bar.
fn bar(percentage: f64) -> String {
    let filled = ((percentage / 10.0).round() as usize).min(10);
    format!("{}{}", "█".repeat(filled), "░".repeat(10 - filled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        ConversationMetrics, ConversationSummary, CustomerInfo, DashboardOverview, EmotionSummary,
        Metric, Metrics, RankedTerm, ResolutionStatus, Sentiment, TagConversation,
    };

    fn metric(value: f64) -> Metric {
        Metric {
            value,
            trend: 0.0,
            status: TrendStatus::Equal,
        }
    }

    fn sample_detail() -> ConversationDetail {
        ConversationDetail {
            id: "#12345".to_string(),
            time: "2024-03-01 14:00".to_string(),
            agent: "沐沐".to_string(),
            metrics: Metrics {
                satisfaction: metric(92.0),
                resolution: metric(65.0),
                attitude: metric(88.0),
                risk: metric(15.0),
            },
            customer_info: CustomerInfo {
                user_id: "U1001".to_string(),
                device: "iOS".to_string(),
                history: String::new(),
            },
            conversation_summary: ConversationSummary {
                main_issue: "退款失败".to_string(),
                resolution_status: ResolutionStatus {
                    status: "已解决".to_string(),
                    description: "已重新发起退款".to_string(),
                },
                main_solution: "重新提交退款申请".to_string(),
            },
            tags: vec!["退款".to_string()],
            messages: vec![
                Message {
                    kind: MessageKind::User,
                    content: "退款一直失败".to_string(),
                    time: "14:00".to_string(),
                    sender: None,
                    sentiment: Some(Sentiment::Negative),
                },
                Message {
                    kind: MessageKind::Agent,
                    content: "我来帮您处理".to_string(),
                    time: "14:01".to_string(),
                    sender: Some("沐沐".to_string()),
                    sentiment: None,
                },
                Message {
                    kind: MessageKind::User,
                    content: "谢谢".to_string(),
                    time: "14:05".to_string(),
                    sender: None,
                    sentiment: Some(Sentiment::Positive),
                },
            ],
            improvement_suggestions: vec!["更快确认退款路径".to_string()],
            interaction_analysis: None,
            emotion_summary: None,
            hot_words: vec!["退款".to_string(), "失败".to_string()],
        }
    }

    #[test]
    fn test_detail_report_sections() {
        let markdown = conversation_detail_markdown(&sample_detail());

        assert!(markdown.contains("# Conversation #12345"));
        assert!(markdown.contains("## Metrics"));
        assert!(markdown.contains("## Summary"));
        assert!(markdown.contains("## Interaction"));
        assert!(markdown.contains("## Transcript"));
        assert!(markdown.contains("退款失败"));
    }

    #[test]
    fn test_detail_bands_follow_direction() {
        let markdown = conversation_detail_markdown(&sample_detail());

        // 92 satisfaction is green; 15 risk is green because lower is better.
        assert!(markdown.contains("| Satisfaction | 🟢 92.0"));
        assert!(markdown.contains("| Risk | 🟢 15.0"));
        assert!(markdown.contains("| Resolution | 🟡 65.0"));
    }

    #[test]
    fn test_detail_sentiment_percentages() {
        let markdown = conversation_detail_markdown(&sample_detail());
        assert!(markdown.contains("🙂 50% positive | 😐 0% neutral | 🙁 50% negative"));
    }

    #[test]
    fn test_sentiment_falls_back_to_upstream_summary() {
        let mut detail = sample_detail();
        // Strip the per-message labels; the tally survives upstream.
        for message in &mut detail.messages {
            message.sentiment = None;
        }
        detail.emotion_summary = Some(EmotionSummary {
            positive: 3,
            neutral: 1,
            negative: 1,
        });

        let markdown = conversation_detail_markdown(&detail);

        assert!(markdown.contains("### User Sentiment"));
        assert!(markdown.contains("🙂 60% positive | 😐 20% neutral | 🙁 20% negative"));
    }

    #[test]
    fn test_conversations_report_flags_filters() {
        let page = Paginated {
            items: vec![ConversationListItem {
                id: "#1".to_string(),
                time: "2024-03-01".to_string(),
                agent: "小林".to_string(),
                customer_id: "U2".to_string(),
                main_issue: "物流延误".to_string(),
                resolution_status: "部分解决".to_string(),
                tags: vec!["物流".to_string()],
                satisfaction: 58.0,
            }],
            pagination: Pagination {
                current: 2,
                page_size: 10,
                total: 35,
            },
        };
        let filters = FilterState {
            agent: Some("小林".to_string()),
            ..FilterState::default()
        };

        let markdown = conversations_markdown(&page, &filters);

        assert!(markdown.contains("## Active Filters"));
        assert!(markdown.contains("- **Agent:** 小林"));
        assert!(markdown.contains("🔴 58.0"));
        assert!(markdown.contains("*Page 2 of 4 (35 total)*"));
    }

    #[test]
    fn test_dashboard_uses_wide_bands() {
        let data = DashboardData {
            overview: DashboardOverview {
                total_conversations: 120,
                avg_total_messages: 14.2,
                avg_agent_messages: 7.5,
                avg_user_messages: 6.7,
            },
            conversation_metrics: ConversationMetrics {
                avg_satisfaction: 70.0,
                avg_resolution: 86.0,
                avg_attitude: 78.0,
                avg_risk: 30.0,
            },
            top_tags: vec![RankedTerm {
                term: "退款".to_string(),
                count: 40,
                percentage: 33.3,
            }],
            top_hotwords: vec![],
            tag_resolution_rates: vec![],
            tag_cooccurrence: vec![],
            agent_service_rates: vec![],
        };

        let markdown = dashboard_markdown(&data);

        // Wide scheme: [60, 75) is the pink band, [75, 85) yellow.
        assert!(markdown.contains("| Satisfaction | 🟣 70.0"));
        assert!(markdown.contains("| Resolution | 🟢 86.0"));
        assert!(markdown.contains("| Attitude | 🟡 78.0"));
        assert!(markdown.contains("| Risk | 🟡 30.0"));
        assert!(markdown.contains("## Top Tags"));
        assert!(markdown.contains("退款"));
    }

    #[test]
    fn test_tag_report_pagination_footer() {
        let analysis = TagAnalysis {
            tag: "退款".to_string(),
            count: 40,
            resolved: 70.0,
            partially_resolved: 20.0,
            unresolved: 10.0,
            conversations: vec![TagConversation {
                id: "#7".to_string(),
                title: String::new(),
                time: "2024-03-02".to_string(),
                agent: "沐沐".to_string(),
                customer_id: "U9".to_string(),
                main_issue: "退款未到账".to_string(),
                status: "已解决".to_string(),
                satisfaction: 90.0,
                resolution: 95.0,
                attitude: 88.0,
                risk: 10.0,
            }],
            pagination: Pagination {
                current: 1,
                page_size: 10,
                total: 40,
            },
        };

        let markdown = tag_markdown(&analysis);

        assert!(markdown.contains("# Tag 退款"));
        assert!(markdown.contains("70.0% resolved / 20.0% partial / 10.0% unresolved"));
        assert!(markdown.contains("*Page 1 of 4 (40 total)*"));
    }

    #[test]
    fn test_bar_scaling() {
        assert_eq!(bar(0.0), "░░░░░░░░░░");
        assert_eq!(bar(33.3), "███░░░░░░░");
        assert_eq!(bar(100.0), "██████████");
    }

    #[test]
    fn test_json_report_round_trips() {
        let options = FilterOptions {
            agents: vec!["沐沐".to_string()],
            statuses: vec!["已解决".to_string()],
            tags: vec!["退款".to_string()],
        };
        let json = json_report(&options).unwrap();
        assert!(json.contains("\"agents\""));
        assert!(json.contains("沐沐"));
    }
}
