//! Health score, trend and efficiency.
//!
//! Both scores are weighted blends whose latency term is floored at zero but
//! never capped, so a very low average latency can push a score past 100.
//! Results are not clamped to [0, 100].

use super::types::*;
use super::{active_ratio, average_latency, average_uptime, round_half_up};

const ACTIVE_WEIGHT: f64 = 40.0;
const LATENCY_WEIGHT: f64 = 30.0;
const UPTIME_WEIGHT: f64 = 30.0;
/// Average latency at which the health latency term reaches zero
const HEALTH_LATENCY_CEILING_MS: f64 = 200.0;

const EFFICIENCY_ACTIVE_WEIGHT: f64 = 50.0;
const EFFICIENCY_LATENCY_WEIGHT: f64 = 50.0;
const EFFICIENCY_LATENCY_CEILING_MS: f64 = 150.0;

/// Latency contribution in `[0, inf)`: 1 at 0ms, 0 at or above `ceiling_ms`
fn latency_factor(avg_latency: f64, ceiling_ms: f64) -> f64 {
    ((ceiling_ms - avg_latency) / ceiling_ms).max(0.0)
}

/// Compute the overall network health score
///
/// `round(activeRatio*40 + latencyFactor*30 + (avgUptime/100)*30)`. An empty
/// snapshot scores 0.
pub fn compute_health_score(nodes: &[NodeRecord]) -> i64 {
    if nodes.is_empty() {
        return 0;
    }

    let active = active_ratio(nodes);
    let avg_latency = average_latency(nodes);
    let avg_uptime = average_uptime(nodes);

    let raw = active * ACTIVE_WEIGHT
        + latency_factor(avg_latency, HEALTH_LATENCY_CEILING_MS) * LATENCY_WEIGHT
        + (avg_uptime / 100.0) * UPTIME_WEIGHT;

    log::debug!(
        "Health score inputs: active_ratio={:.3}, avg_latency={:.1}ms, avg_uptime={:.2}% -> {:.2}",
        active,
        avg_latency,
        avg_uptime,
        raw
    );

    round_half_up(raw)
}

/// Classify the trend from a health score
pub fn classify_trend(health_score: i64) -> PerformanceTrend {
    if health_score > 80 {
        PerformanceTrend::Improving
    } else if health_score > 60 {
        PerformanceTrend::Stable
    } else {
        PerformanceTrend::Degrading
    }
}

/// Compute network efficiency
///
/// `round(activeRatio*50 + latencyFactor*50)` with a 150ms latency ceiling.
/// An empty snapshot yields 0.
pub fn compute_efficiency(nodes: &[NodeRecord]) -> i64 {
    if nodes.is_empty() {
        return 0;
    }

    let raw = active_ratio(nodes) * EFFICIENCY_ACTIVE_WEIGHT
        + latency_factor(average_latency(nodes), EFFICIENCY_LATENCY_CEILING_MS)
            * EFFICIENCY_LATENCY_WEIGHT;

    round_half_up(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fleet(active: usize, offline: usize, latency: f64, uptime: f64) -> Vec<NodeRecord> {
        let mut nodes = Vec::new();
        for i in 0..active {
            nodes.push(NodeRecord::new(format!("a{}", i), NodeStatus::Active, latency).with_uptime(uptime));
        }
        for i in 0..offline {
            nodes.push(NodeRecord::new(format!("o{}", i), NodeStatus::Offline, latency).with_uptime(uptime));
        }
        nodes
    }

    #[test]
    fn test_reference_health_score() {
        // 0.9*40 + 0.75*30 + 0.98*30 = 87.9
        let nodes = fleet(9, 1, 50.0, 98.0);
        let score = compute_health_score(&nodes);
        assert_eq!(score, 88);
        assert_eq!(classify_trend(score), PerformanceTrend::Improving);
    }

    #[test]
    fn test_empty_snapshot_scores_zero() {
        assert_eq!(compute_health_score(&[]), 0);
        assert_eq!(compute_efficiency(&[]), 0);
        assert_eq!(classify_trend(0), PerformanceTrend::Degrading);
    }

    #[test]
    fn test_latency_term_floors_at_zero() {
        // Latency above the ceiling contributes nothing, never a penalty
        let nodes = fleet(1, 0, 1000.0, 100.0);
        assert_eq!(compute_health_score(&nodes), 70);
        assert_eq!(compute_efficiency(&nodes), 50);
    }

    #[test]
    fn test_latency_term_is_not_capped() {
        // Negative latency pushes the latency factor above 1
        let nodes = fleet(1, 0, -200.0, 100.0);
        assert_eq!(compute_health_score(&nodes), 40 + 60 + 30);
        assert_eq!(compute_efficiency(&nodes), 50 + round_half_up(350.0 / 150.0 * 50.0));
    }

    #[test]
    fn test_missing_uptime_counts_as_zero() {
        let nodes = vec![NodeRecord::new("a", NodeStatus::Active, 200.0)];
        assert_eq!(compute_health_score(&nodes), 40);
    }

    #[test]
    fn test_trend_thresholds() {
        assert_eq!(classify_trend(81), PerformanceTrend::Improving);
        assert_eq!(classify_trend(80), PerformanceTrend::Stable);
        assert_eq!(classify_trend(61), PerformanceTrend::Stable);
        assert_eq!(classify_trend(60), PerformanceTrend::Degrading);
        assert_eq!(classify_trend(-5), PerformanceTrend::Degrading);
        assert_eq!(classify_trend(130), PerformanceTrend::Improving);
    }

    #[test]
    fn test_efficiency() {
        // 0.9*50 + (100/150)*50 = 45 + 33.33
        let nodes = fleet(9, 1, 50.0, 98.0);
        assert_eq!(compute_efficiency(&nodes), 78);
    }
}
