//! Entry point that runs every analyzer over one snapshot.

use super::types::*;
use super::{
    classify_trend, compute_efficiency, compute_health_score, detect_anomalies,
    find_optimizations, predict_issues,
};

/// Analyze a snapshot of node telemetry
///
/// Total over any input, including an empty snapshot, which yields a score of
/// 0, a degrading trend and no insights.
pub fn analyze_network_health(nodes: &[NodeRecord]) -> AnalyticsResult {
    let health_score = compute_health_score(nodes);
    let performance_trend = classify_trend(health_score);
    let network_efficiency = compute_efficiency(nodes);

    let anomalies = detect_anomalies(nodes);
    let predicted_issues = predict_issues(nodes);
    let optimization_opportunities = find_optimizations(nodes);

    log::debug!(
        "Analyzed {} nodes: score={} trend={} efficiency={} anomalies={} predictions={} optimizations={}",
        nodes.len(),
        health_score,
        performance_trend,
        network_efficiency,
        anomalies.len(),
        predicted_issues.len(),
        optimization_opportunities.len()
    );

    AnalyticsResult {
        health_score,
        performance_trend,
        network_efficiency,
        anomalies,
        predicted_issues,
        optimization_opportunities,
    }
}
