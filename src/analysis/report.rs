//! Report generation for network health analytics.
//!
//! Produces a JSON report, a Markdown report, a CSV export of the raw node
//! table, and a short stdout summary.

use std::fs;
use std::path::Path;

use color_eyre::eyre::{Context, Result};

use super::types::*;
use super::{calculate_stats, generate_insights_summary, rank_insights, round_half_up, summarize_nodes};

const CSV_HEADERS: [&str; 9] = [
    "Identity",
    "Gossip Address",
    "RPC Address",
    "Version",
    "Status",
    "Latency (ms)",
    "Location",
    "Disk Space (TB)",
    "Uptime (%)",
];

/// Assemble the exported report for one snapshot
pub fn build_report(
    result: &AnalyticsResult,
    nodes: &[NodeRecord],
    snapshot_source: &str,
) -> AnalyticsReport {
    AnalyticsReport {
        generated_at: chrono::Utc::now().to_rfc3339(),
        snapshot_source: snapshot_source.to_string(),
        network_stats: calculate_stats(nodes),
        analytics: AnalyticsSection {
            health_score: result.health_score,
            performance_trend: result.performance_trend,
            network_efficiency: result.network_efficiency,
            anomalies_count: result.anomalies.len(),
            predicted_issues_count: result.predicted_issues.len(),
            optimization_opportunities_count: result.optimization_opportunities.len(),
            insights: result.all_insights().cloned().collect(),
        },
        nodes_summary: summarize_nodes(nodes),
        summary: generate_insights_summary(result),
    }
}

/// Generate JSON report
pub fn generate_json_report(report: &AnalyticsReport, output_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)
        .context("Failed to serialize report to JSON")?;

    fs::write(output_path, json)
        .with_context(|| format!("Failed to write JSON report to {}", output_path.display()))?;

    log::info!("JSON report written to {}", output_path.display());
    Ok(())
}

/// Render the Markdown report body
pub fn render_markdown_report(report: &AnalyticsReport, nodes: &[NodeRecord], top_nodes: usize) -> String {
    let stats = &report.network_stats;
    let analytics = &report.analytics;
    let mut lines: Vec<String> = Vec::new();

    lines.push("# pNode Network Report".to_string());
    lines.push(format!("Generated: {}", report.generated_at));
    lines.push(String::new());

    lines.push("## Network Overview".to_string());
    lines.push(format!("- **Total Nodes**: {}", stats.total_nodes));
    let active_pct = if stats.total_nodes > 0 {
        round_half_up(stats.active_nodes as f64 / stats.total_nodes as f64 * 100.0)
    } else {
        0
    };
    lines.push(format!("- **Active Nodes**: {} ({}%)", stats.active_nodes, active_pct));
    lines.push(format!("- **Total Storage**: {} TB", stats.total_storage));
    lines.push(format!("- **Average Latency**: {} ms", round_half_up(stats.avg_latency)));
    lines.push(String::new());

    lines.push("## Analytics".to_string());
    lines.push(format!("- **Health Score**: {}/100", analytics.health_score));
    lines.push(format!("- **Performance Trend**: {}", analytics.performance_trend));
    lines.push(format!("- **Network Efficiency**: {}%", analytics.network_efficiency));
    lines.push(String::new());
    lines.push(report.summary.clone());
    lines.push(String::new());

    let sections = [
        ("Anomalies Detected", InsightKind::Anomaly),
        ("Predicted Issues", InsightKind::Prediction),
        ("Optimization Opportunities", InsightKind::Optimization),
    ];
    for (heading, kind) in sections {
        let insights: Vec<&Insight> = analytics.insights.iter().filter(|i| i.kind == kind).collect();
        lines.push(format!("### {} ({})", heading, insights.len()));
        for insight in insights {
            if kind == InsightKind::Optimization {
                lines.push(format!("- **{}**: {}", insight.title, insight.description));
            } else {
                lines.push(format!(
                    "- **{}** [{}]: {}",
                    insight.title, insight.severity, insight.description
                ));
            }
        }
        lines.push(String::new());
    }

    lines.push("## Top Performing Nodes".to_string());
    let mut fastest: Vec<&NodeRecord> = nodes.iter().collect();
    fastest.sort_by(|a, b| a.latency.total_cmp(&b.latency));
    for (i, node) in fastest.iter().take(top_nodes).enumerate() {
        lines.push(format!(
            "{}. {} - {}ms latency",
            i + 1,
            node.identity_pubkey,
            node.latency
        ));
    }
    lines.push(String::new());

    lines.join("\n")
}

/// Generate Markdown report
pub fn generate_markdown_report(
    report: &AnalyticsReport,
    nodes: &[NodeRecord],
    output_path: &Path,
    top_nodes: usize,
) -> Result<()> {
    let content = render_markdown_report(report, nodes, top_nodes);
    fs::write(output_path, content)
        .with_context(|| format!("Failed to write Markdown report to {}", output_path.display()))?;

    log::info!("Markdown report written to {}", output_path.display());
    Ok(())
}

fn quote(cell: &str) -> String {
    format!("\"{}\"", cell.replace('"', "\"\""))
}

/// Render the node table as CSV, every cell quoted
pub fn render_nodes_csv(nodes: &[NodeRecord]) -> String {
    let mut lines: Vec<String> = Vec::with_capacity(nodes.len() + 1);
    lines.push(CSV_HEADERS.join(","));

    for node in nodes {
        let row = [
            node.identity_pubkey.clone(),
            node.gossip_addr.clone().unwrap_or_else(|| "N/A".to_string()),
            node.rpc_addr.clone().unwrap_or_else(|| "N/A".to_string()),
            node.version.clone().unwrap_or_else(|| "Unknown".to_string()),
            node.status.to_string(),
            node.latency.to_string(),
            node.location.clone().unwrap_or_else(|| "Unknown".to_string()),
            node.disk_space.map(|d| d.to_string()).unwrap_or_else(|| "N/A".to_string()),
            node.uptime.map(|u| format!("{:.2}", u)).unwrap_or_else(|| "N/A".to_string()),
        ];
        lines.push(row.iter().map(|cell| quote(cell)).collect::<Vec<_>>().join(","));
    }

    lines.join("\n")
}

/// Export the node table to a CSV file
pub fn export_nodes_csv(nodes: &[NodeRecord], output_path: &Path) -> Result<()> {
    fs::write(output_path, render_nodes_csv(nodes))
        .with_context(|| format!("Failed to write CSV export to {}", output_path.display()))?;

    log::info!("CSV export written to {}", output_path.display());
    Ok(())
}

/// Print a summary to stdout
pub fn print_summary(report: &AnalyticsReport, result: &AnalyticsResult) {
    println!("\n=== PNODE NETWORK HEALTH SUMMARY ===\n");
    println!("Source: {}", report.snapshot_source);
    println!(
        "Nodes: {} ({} active, {} delinquent, {} offline)",
        report.nodes_summary.total,
        report.nodes_summary.by_status.active,
        report.nodes_summary.by_status.delinquent,
        report.nodes_summary.by_status.offline
    );
    println!("Average latency: {:.1}ms", report.network_stats.avg_latency);
    println!("Total storage: {} TB", report.network_stats.total_storage);
    println!();
    println!("Health score: {}/100 ({})", result.health_score, result.performance_trend);
    println!("Network efficiency: {}%", result.network_efficiency);
    println!();
    println!("{}", report.summary);

    let ranked = rank_insights(result);
    if !ranked.is_empty() {
        println!("\nInsights:");
        for (i, insight) in ranked.iter().enumerate() {
            println!(
                "  {}. [{}] {} ({}): {}",
                i + 1,
                insight.severity,
                insight.title,
                insight.kind,
                insight.description
            );
            if let Some(ref action) = insight.action {
                println!("     -> {}", action);
            }
        }
    }

    println!();
}
