//! Anomaly detection.
//!
//! Three aggregate rules run in a fixed order: high latency, unstable nodes,
//! version fragmentation. Each rule emits at most one insight for the whole
//! snapshot.

use super::types::*;
use super::{average_latency, count_distinct, round_half_up};

/// Absolute floor a node must exceed before its latency is considered high
const HIGH_LATENCY_FLOOR_MS: f64 = 100.0;
/// More flagged nodes than this escalates the latency anomaly to high
const HIGH_LATENCY_ESCALATION_COUNT: usize = 5;
const MIN_STABLE_UPTIME: f64 = 95.0;
const MAX_HEALTHY_VERSIONS: usize = 3;

/// Detect anomalies in a snapshot
pub fn detect_anomalies(nodes: &[NodeRecord]) -> Vec<Insight> {
    if nodes.is_empty() {
        return Vec::new();
    }

    let avg_latency = average_latency(nodes);

    [
        detect_high_latency(nodes, avg_latency),
        detect_unstable_nodes(nodes),
        detect_version_fragmentation(nodes),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Flag nodes slower than twice the snapshot average and above 100ms
fn detect_high_latency(nodes: &[NodeRecord], avg_latency: f64) -> Option<Insight> {
    let threshold = avg_latency * 2.0;
    let flagged = nodes
        .iter()
        .filter(|n| n.latency > threshold && n.latency > HIGH_LATENCY_FLOOR_MS)
        .count();

    log::debug!(
        "High latency rule: avg={:.1}ms threshold={:.1}ms flagged={}",
        avg_latency,
        threshold,
        flagged
    );

    if flagged == 0 {
        return None;
    }

    let severity = if flagged > HIGH_LATENCY_ESCALATION_COUNT {
        Severity::High
    } else {
        Severity::Medium
    };

    Some(
        Insight::new(
            InsightKind::Anomaly,
            severity,
            "High Latency Detected",
            format!(
                "{} nodes showing abnormally high latency (>{}ms)",
                flagged,
                round_half_up(threshold)
            ),
            "May affect network responsiveness and user experience",
        )
        .with_action("Investigate network conditions and node configurations"),
    )
}

/// Flag active nodes whose uptime is below 95%
fn detect_unstable_nodes(nodes: &[NodeRecord]) -> Option<Insight> {
    let flagged = nodes
        .iter()
        .filter(|n| n.is_active() && n.uptime.unwrap_or(0.0) < MIN_STABLE_UPTIME)
        .count();

    log::debug!("Unstable node rule: flagged={}", flagged);

    if flagged == 0 {
        return None;
    }

    Some(
        Insight::new(
            InsightKind::Anomaly,
            Severity::Medium,
            "Unstable Nodes Detected",
            format!("{} active nodes with uptime below 95%", flagged),
            "Reduced network reliability and potential data inconsistencies",
        )
        .with_action("Review node stability and consider replacing unreliable validators"),
    )
}

/// Flag snapshots running more than three distinct versions
fn detect_version_fragmentation(nodes: &[NodeRecord]) -> Option<Insight> {
    let versions = count_distinct(nodes.iter().map(|n| n.version.as_deref()));

    log::debug!("Version fragmentation rule: distinct_versions={}", versions);

    if versions <= MAX_HEALTHY_VERSIONS {
        return None;
    }

    Some(
        Insight::new(
            InsightKind::Anomaly,
            Severity::Low,
            "Version Fragmentation",
            format!("Network running {} different versions", versions),
            "May lead to consensus issues and reduced performance",
        )
        .with_action("Encourage validators to upgrade to latest stable version"),
    )
}
