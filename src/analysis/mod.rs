//! Network health analytics for pNode snapshots.
//!
//! Every analyzer here is a pure function of the snapshot slice it is given.
//! Nothing is cached between calls, so the same snapshot always produces the
//! same scores and the same insight content.

pub mod types;
pub mod score;
pub mod anomaly;
pub mod prediction;
pub mod optimization;
pub mod ranking;
pub mod stats;
pub mod engine;
pub mod report;

use std::collections::HashSet;

pub use types::*;
pub use score::{classify_trend, compute_efficiency, compute_health_score};
pub use anomaly::detect_anomalies;
pub use prediction::predict_issues;
pub use optimization::find_optimizations;
pub use ranking::{generate_insights_summary, rank_insights};
pub use stats::{calculate_stats, summarize_nodes};
pub use engine::analyze_network_health;
pub use report::{export_nodes_csv, generate_json_report, generate_markdown_report};

/// Number of nodes used as a divisor; an empty snapshot divides by 1
fn divisor(nodes: &[NodeRecord]) -> f64 {
    nodes.len().max(1) as f64
}

/// Fraction of nodes reporting `Active`
pub fn active_ratio(nodes: &[NodeRecord]) -> f64 {
    let active = nodes.iter().filter(|n| n.is_active()).count();
    active as f64 / divisor(nodes)
}

/// Mean latency in milliseconds
pub fn average_latency(nodes: &[NodeRecord]) -> f64 {
    nodes.iter().map(|n| n.latency).sum::<f64>() / divisor(nodes)
}

/// Mean uptime percentage, missing uptime counted as 0
pub fn average_uptime(nodes: &[NodeRecord]) -> f64 {
    nodes.iter().map(|n| n.uptime.unwrap_or(0.0)).sum::<f64>() / divisor(nodes)
}

/// Mean disk space in terabytes, missing disk space counted as 0
pub fn average_storage(nodes: &[NodeRecord]) -> f64 {
    nodes.iter().map(|n| n.disk_space.unwrap_or(0.0)).sum::<f64>() / divisor(nodes)
}

/// Count distinct values, ignoring missing and empty strings
pub fn count_distinct<'a, I>(values: I) -> usize
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    values
        .into_iter()
        .flatten()
        .filter(|v| !v.is_empty())
        .collect::<HashSet<_>>()
        .len()
}

/// Round half up (`2.5 -> 3`, `-2.5 -> -2`)
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
