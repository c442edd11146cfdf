//! Report rendering.

mod generator;

pub use generator::{
    agent_markdown, agents_markdown, conversation_detail_markdown, conversations_markdown,
    dashboard_markdown, health_markdown, json_report, options_markdown, tag_markdown,
    tag_rollups_markdown,
};
