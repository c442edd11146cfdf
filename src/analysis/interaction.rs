//! Transcript aggregation for the interaction panel.
//!
//! A single linear pass over a conversation's messages: count turns
//! per speaker and tally the sentiment labels on user messages.

use crate::models::{EmotionSummary, Message, MessageKind, Sentiment};

/// Counts of the three sentiment labels over user messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SentimentTally {
    pub positive: u64,
    pub neutral: u64,
    pub negative: u64,
}

impl SentimentTally {
    pub fn total(&self) -> u64 {
        self.positive + self.neutral + self.negative
    }

    /// Percentages of the tally total, rounded to whole numbers.
    /// All zero when no user message carried a sentiment.
    pub fn percentages(&self) -> (u64, u64, u64) {
        let total = self.total();
        if total == 0 {
            return (0, 0, 0);
        }
        let pct = |count: u64| ((count as f64 / total as f64) * 100.0).round() as u64;
        (
            pct(self.positive),
            pct(self.neutral),
            pct(self.negative),
        )
    }
}

// The upstream pipeline ships the same three counters on the detail
// payload when per-message labels are absent.
impl From<EmotionSummary> for SentimentTally {
    fn from(summary: EmotionSummary) -> Self {
        Self {
            positive: summary.positive,
            neutral: summary.neutral,
            negative: summary.negative,
        }
    }
}

/// Message counts and sentiment tally for one conversation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InteractionStats {
    pub total_messages: u64,
    pub agent_messages: u64,
    pub user_messages: u64,
    pub system_messages: u64,
    pub sentiment: SentimentTally,
}

impl InteractionStats {
    /// Aggregate a transcript. Order-independent.
    pub fn from_messages(messages: &[Message]) -> Self {
        let mut stats = Self {
            total_messages: messages.len() as u64,
            ..Self::default()
        };

        for message in messages {
            match message.kind {
                MessageKind::Agent => stats.agent_messages += 1,
                MessageKind::System => stats.system_messages += 1,
                MessageKind::User => {
                    stats.user_messages += 1;
                    match message.sentiment {
                        Some(Sentiment::Positive) => stats.sentiment.positive += 1,
                        Some(Sentiment::Neutral) => stats.sentiment.neutral += 1,
                        Some(Sentiment::Negative) => stats.sentiment.negative += 1,
                        None => {}
                    }
                }
            }
        }

        stats
    }
}
