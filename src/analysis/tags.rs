//! Synthetic per-tag rollups.
//!
//! The backend exposes no dedicated tag-list endpoint, so the tag
//! overview is derived client-side from the dashboard's per-tag
//! resolution rates. The satisfaction and resolution scores below are
//! fixed-weight estimates, not measurements; they reproduce the
//! numbers the original dashboard displayed and carry no statistical
//! meaning beyond that.

use crate::models::TagResolutionRate;
use serde::{Deserialize, Serialize};

/// One row of the derived tag overview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagRollup {
    pub tag: String,
    pub count: u64,
    pub resolved: f64,
    pub partially_resolved: f64,
    pub unresolved: f64,
    /// Estimated, see [`estimate_rollups`].
    pub avg_satisfaction: f64,
    /// Estimated, see [`estimate_rollups`].
    pub avg_resolution: f64,
}

/// Derive tag rollups from dashboard resolution rates, ordered by
/// conversation count descending.
///
/// The estimate blends the status percentages with fixed weights:
/// satisfaction = (resolved x 90 + partial x 60 + unresolved x 30) / 100,
/// resolution   = (resolved x 95 + partial x 50) / 100.
pub fn estimate_rollups(rates: &[TagResolutionRate]) -> Vec<TagRollup> {
    let mut rollups: Vec<TagRollup> = rates
        .iter()
        .map(|rate| TagRollup {
            tag: rate.tag.clone(),
            count: rate.count,
            resolved: rate.resolved,
            partially_resolved: rate.partially_resolved,
            unresolved: rate.unresolved,
            avg_satisfaction: (rate.resolved * 90.0
                + rate.partially_resolved * 60.0
                + rate.unresolved * 30.0)
                / 100.0,
            avg_resolution: (rate.resolved * 95.0 + rate.partially_resolved * 50.0) / 100.0,
        })
        .collect();

    rollups.sort_by(|a, b| b.count.cmp(&a.count));
    rollups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rate(tag: &str, count: u64, resolved: f64, partial: f64, unresolved: f64) -> TagResolutionRate {
        TagResolutionRate {
            tag: tag.to_string(),
            count,
            resolved,
            partially_resolved: partial,
            unresolved,
        }
    }

    #[test]
    fn test_fixed_weight_estimate() {
        let rollups = estimate_rollups(&[rate("退款", 40, 70.0, 20.0, 10.0)]);
        assert_eq!(rollups.len(), 1);
        // (70*90 + 20*60 + 10*30) / 100 and (70*95 + 20*50) / 100.
        assert!((rollups[0].avg_satisfaction - 78.0).abs() < 1e-9);
        assert!((rollups[0].avg_resolution - 76.5).abs() < 1e-9);
    }

    #[test]
    fn test_fully_resolved_tag() {
        let rollups = estimate_rollups(&[rate("咨询", 12, 100.0, 0.0, 0.0)]);
        assert!((rollups[0].avg_satisfaction - 90.0).abs() < 1e-9);
        assert!((rollups[0].avg_resolution - 95.0).abs() < 1e-9);
    }

    #[test]
    fn test_fully_unresolved_tag() {
        let rollups = estimate_rollups(&[rate("投诉", 5, 0.0, 0.0, 100.0)]);
        assert!((rollups[0].avg_satisfaction - 30.0).abs() < 1e-9);
        assert!((rollups[0].avg_resolution - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_ordered_by_count_descending() {
        let rollups = estimate_rollups(&[
            rate("咨询", 3, 50.0, 25.0, 25.0),
            rate("退款", 40, 70.0, 20.0, 10.0),
            rate("物流", 12, 60.0, 30.0, 10.0),
        ]);
        let order: Vec<&str> = rollups.iter().map(|r| r.tag.as_str()).collect();
        assert_eq!(order, vec!["退款", "物流", "咨询"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(estimate_rollups(&[]).is_empty());
    }
}
