//! # pnode-analytics - Health analytics for pNode network snapshots
//!
//! This library turns a snapshot of per-node telemetry into a health
//! assessment: a health score, a trend, a network efficiency figure and a set
//! of insights (anomalies, predicted issues, optimization opportunities).
//!
//! ## Overview
//!
//! The analytics engine is a pure function of one snapshot. It keeps no
//! history and uses fixed heuristic thresholds, so the same snapshot always
//! yields the same scores and the same findings. Callers that poll the node
//! registry simply re-run the engine on every refresh.
//!
//! ## Architecture
//!
//! - `analysis`: scoring, insight rules, ranking and report export
//! - `snapshot`: loading node snapshots from registry JSON dumps
//! - `config`: YAML configuration and CLI overrides for the binary
//!
//! ## Example Usage
//!
//! ```rust
//! use pnode_analytics::analysis::{self, NodeRecord, NodeStatus, PerformanceTrend};
//!
//! let nodes: Vec<NodeRecord> = (0..10)
//!     .map(|i| {
//!         let status = if i == 0 { NodeStatus::Offline } else { NodeStatus::Active };
//!         NodeRecord::new(format!("node-{}", i), status, 50.0).with_uptime(98.0)
//!     })
//!     .collect();
//!
//! let result = analysis::analyze_network_health(&nodes);
//! assert_eq!(result.health_score, 88);
//! assert_eq!(result.performance_trend, PerformanceTrend::Improving);
//!
//! for insight in analysis::rank_insights(&result) {
//!     println!("[{}] {}", insight.severity, insight.title);
//! }
//! println!("{}", analysis::generate_insights_summary(&result));
//! ```
//!
//! ## Error Handling
//!
//! The engine itself never fails. Snapshot loading, configuration and report
//! writing return `color_eyre::Result` with context attached.

pub mod analysis;
pub mod config;
pub mod snapshot;
