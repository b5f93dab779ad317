//! Presentation helpers: severity ranking and the one-paragraph digest.

use super::types::*;

/// Merge all insights and order them by severity, most severe first
///
/// Concatenation order is anomalies, predictions, optimizations. The sort is
/// stable, so insights of equal severity keep that order.
pub fn rank_insights(result: &AnalyticsResult) -> Vec<&Insight> {
    let mut ranked: Vec<&Insight> = result.all_insights().collect();
    ranked.sort_by_key(|insight| insight.severity.rank());
    ranked
}

/// Human-readable digest of an analytics result
pub fn generate_insights_summary(result: &AnalyticsResult) -> String {
    let mut summary = format!(
        "Network health score: {}/100 ({}). ",
        result.health_score, result.performance_trend
    );

    if !result.anomalies.is_empty() {
        summary.push_str(&format!(
            "Detected {} anomalies requiring attention. ",
            result.anomalies.len()
        ));
    }

    if result.predicted_issues.is_empty() {
        summary.push_str("No immediate issues predicted.");
    } else {
        summary.push_str(&format!(
            "{} potential issues identified for proactive monitoring.",
            result.predicted_issues.len()
        ));
    }

    summary
}
