//! Core data types for network health analytics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reported state of a pNode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeStatus {
    Active,
    Delinquent,
    Offline,
}

impl NodeStatus {
    /// Parse the status string used by the node registry
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Active" => Some(NodeStatus::Active),
            "Delinquent" => Some(NodeStatus::Delinquent),
            "Offline" => Some(NodeStatus::Offline),
            _ => None,
        }
    }
}

impl std::fmt::Display for NodeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeStatus::Active => write!(f, "Active"),
            NodeStatus::Delinquent => write!(f, "Delinquent"),
            NodeStatus::Offline => write!(f, "Offline"),
        }
    }
}

/// Telemetry for a single pNode as delivered by the registry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRecord {
    #[serde(alias = "identity")]
    pub identity_pubkey: String,
    pub status: NodeStatus,
    /// Milliseconds
    pub latency: f64,
    /// Percentage in [0, 100]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uptime: Option<f64>,
    /// Terabytes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disk_space: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gossip_addr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpc_addr: Option<String>,
}

impl NodeRecord {
    pub fn new(identity_pubkey: impl Into<String>, status: NodeStatus, latency: f64) -> Self {
        Self {
            identity_pubkey: identity_pubkey.into(),
            status,
            latency,
            uptime: None,
            disk_space: None,
            version: None,
            location: None,
            gossip_addr: None,
            rpc_addr: None,
        }
    }

    pub fn with_uptime(mut self, uptime: f64) -> Self {
        self.uptime = Some(uptime);
        self
    }

    pub fn with_disk_space(mut self, disk_space: f64) -> Self {
        self.disk_space = Some(disk_space);
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn is_active(&self) -> bool {
        self.status == NodeStatus::Active
    }
}

/// Category of a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Anomaly,
    Prediction,
    Optimization,
    Recommendation,
}

impl std::fmt::Display for InsightKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InsightKind::Anomaly => write!(f, "anomaly"),
            InsightKind::Prediction => write!(f, "prediction"),
            InsightKind::Optimization => write!(f, "optimization"),
            InsightKind::Recommendation => write!(f, "recommendation"),
        }
    }
}

/// Insight severity, ordered `Low < Medium < High < Critical`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Display priority: critical = 0 through low = 3
    pub fn rank(&self) -> u8 {
        match self {
            Severity::Critical => 0,
            Severity::High => 1,
            Severity::Medium => 2,
            Severity::Low => 3,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Low => write!(f, "low"),
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

/// A single structured finding produced by one detection rule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Insight {
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub severity: Severity,
    pub title: String,
    pub description: String,
    pub impact: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl Insight {
    pub fn new(
        kind: InsightKind,
        severity: Severity,
        title: impl Into<String>,
        description: impl Into<String>,
        impact: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            severity,
            title: title.into(),
            description: description.into(),
            impact: impact.into(),
            action: None,
            timestamp: Utc::now(),
        }
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    /// Compare everything except the creation timestamp
    pub fn same_finding(&self, other: &Insight) -> bool {
        self.kind == other.kind
            && self.severity == other.severity
            && self.title == other.title
            && self.description == other.description
            && self.impact == other.impact
            && self.action == other.action
    }
}

/// Coarse direction of network health derived from the score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceTrend {
    Improving,
    Stable,
    Degrading,
}

impl std::fmt::Display for PerformanceTrend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PerformanceTrend::Improving => write!(f, "improving"),
            PerformanceTrend::Stable => write!(f, "stable"),
            PerformanceTrend::Degrading => write!(f, "degrading"),
        }
    }
}

/// Full analytics output for one snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsResult {
    pub health_score: i64,
    pub performance_trend: PerformanceTrend,
    pub network_efficiency: i64,
    pub anomalies: Vec<Insight>,
    pub predicted_issues: Vec<Insight>,
    pub optimization_opportunities: Vec<Insight>,
}

impl AnalyticsResult {
    /// Anomalies, then predictions, then optimizations
    pub fn all_insights(&self) -> impl Iterator<Item = &Insight> {
        self.anomalies
            .iter()
            .chain(self.predicted_issues.iter())
            .chain(self.optimization_opportunities.iter())
    }

    pub fn insight_count(&self) -> usize {
        self.anomalies.len() + self.predicted_issues.len() + self.optimization_opportunities.len()
    }
}

/// Aggregates shown on the dashboard stat cards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkStats {
    pub total_nodes: usize,
    pub active_nodes: usize,
    /// Terabytes, missing disk space counted as 0
    pub total_storage: f64,
    pub avg_latency: f64,
}

/// Node counts by status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusBreakdown {
    pub active: usize,
    pub delinquent: usize,
    pub offline: usize,
}

/// Averages carried in exported reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AverageMetrics {
    pub latency: f64,
    pub uptime: f64,
}

/// Node population section of an exported report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodesSummary {
    pub total: usize,
    pub by_status: StatusBreakdown,
    pub average_metrics: AverageMetrics,
}

/// Analytics section of an exported report
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSection {
    pub health_score: i64,
    pub performance_trend: PerformanceTrend,
    pub network_efficiency: i64,
    pub anomalies_count: usize,
    pub predicted_issues_count: usize,
    pub optimization_opportunities_count: usize,
    /// Concatenation order, not ranked
    pub insights: Vec<Insight>,
}

/// Complete exported report for one snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub generated_at: String,
    pub snapshot_source: String,
    pub network_stats: NetworkStats,
    pub analytics: AnalyticsSection,
    pub nodes_summary: NodesSummary,
    pub summary: String,
}
