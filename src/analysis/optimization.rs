//! Optimization opportunities.

use super::types::*;
use super::{average_latency, count_distinct, round_half_up};

const TARGET_AVERAGE_LATENCY_MS: f64 = 100.0;
const MIN_REGIONS: usize = 3;

/// Find optimization opportunities in a snapshot
pub fn find_optimizations(nodes: &[NodeRecord]) -> Vec<Insight> {
    if nodes.is_empty() {
        return Vec::new();
    }

    let mut optimizations = Vec::new();

    let avg_latency = average_latency(nodes);
    if avg_latency > TARGET_AVERAGE_LATENCY_MS {
        optimizations.push(
            Insight::new(
                InsightKind::Optimization,
                Severity::Medium,
                "Latency Optimization Opportunity",
                format!(
                    "Network average latency at {}ms, could be improved",
                    round_half_up(avg_latency)
                ),
                "Reducing latency would improve transaction confirmation times",
            )
            .with_action(
                "Consider geographic distribution of nodes and network topology optimization",
            ),
        );
    }

    let regions = count_distinct(nodes.iter().map(|n| n.location.as_deref()));
    if regions < MIN_REGIONS {
        optimizations.push(
            Insight::new(
                InsightKind::Optimization,
                Severity::Low,
                "Geographic Diversity",
                format!("Network concentrated in {} regions", regions),
                "Limited geographic diversity increases regional failure risk",
            )
            .with_action("Expand validator presence to additional geographic regions"),
        );
    }

    optimizations
}
