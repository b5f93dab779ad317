//! Snapshot aggregates shown alongside the analytics.

use super::types::*;
use super::{average_latency, average_uptime};

/// Compute stat-card aggregates for a snapshot
pub fn calculate_stats(nodes: &[NodeRecord]) -> NetworkStats {
    NetworkStats {
        total_nodes: nodes.len(),
        active_nodes: nodes.iter().filter(|n| n.is_active()).count(),
        total_storage: nodes.iter().map(|n| n.disk_space.unwrap_or(0.0)).sum(),
        avg_latency: average_latency(nodes),
    }
}

/// Status breakdown and averages for exported reports
pub fn summarize_nodes(nodes: &[NodeRecord]) -> NodesSummary {
    let count = |status: NodeStatus| nodes.iter().filter(|n| n.status == status).count();

    NodesSummary {
        total: nodes.len(),
        by_status: StatusBreakdown {
            active: count(NodeStatus::Active),
            delinquent: count(NodeStatus::Delinquent),
            offline: count(NodeStatus::Offline),
        },
        average_metrics: AverageMetrics {
            latency: average_latency(nodes),
            uptime: average_uptime(nodes),
        },
    }
}
