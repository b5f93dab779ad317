//! Issue prediction from availability and storage levels.

use super::types::*;
use super::{active_ratio, average_storage, round_half_up};

/// Active ratio below which availability is at risk
const AVAILABILITY_RISK_RATIO: f64 = 0.85;
/// Active ratio below which the availability risk is critical
const AVAILABILITY_CRITICAL_RATIO: f64 = 0.7;
/// Terabytes
const MIN_AVERAGE_STORAGE_TB: f64 = 50.0;

/// Predict upcoming issues in a snapshot
pub fn predict_issues(nodes: &[NodeRecord]) -> Vec<Insight> {
    if nodes.is_empty() {
        return Vec::new();
    }

    [predict_availability_risk(nodes), predict_storage_shortage(nodes)]
        .into_iter()
        .flatten()
        .collect()
}

fn predict_availability_risk(nodes: &[NodeRecord]) -> Option<Insight> {
    let ratio = active_ratio(nodes);
    if ratio >= AVAILABILITY_RISK_RATIO {
        return None;
    }

    let severity = if ratio < AVAILABILITY_CRITICAL_RATIO {
        Severity::Critical
    } else {
        Severity::High
    };

    Some(
        Insight::new(
            InsightKind::Prediction,
            severity,
            "Network Availability Risk",
            format!(
                "Active node ratio at {}%, below optimal threshold",
                round_half_up(ratio * 100.0)
            ),
            "Risk of reduced network capacity and slower transaction processing",
        )
        .with_action("Monitor node status and prepare failover strategies"),
    )
}

fn predict_storage_shortage(nodes: &[NodeRecord]) -> Option<Insight> {
    let avg_storage = average_storage(nodes);
    log::debug!("Storage rule: avg_storage={:.2}TB", avg_storage);

    if avg_storage >= MIN_AVERAGE_STORAGE_TB {
        return None;
    }

    Some(
        Insight::new(
            InsightKind::Prediction,
            Severity::Medium,
            "Storage Capacity Planning",
            format!(
                "Average node storage at {}TB, may need expansion",
                round_half_up(avg_storage)
            ),
            "Future storage constraints could limit network growth",
        )
        .with_action("Plan for storage expansion across validator infrastructure"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fleet(active: usize, offline: usize, disk: f64) -> Vec<NodeRecord> {
        (0..active)
            .map(|i| NodeRecord::new(format!("a{}", i), NodeStatus::Active, 20.0))
            .chain((0..offline).map(|i| NodeRecord::new(format!("o{}", i), NodeStatus::Offline, 20.0)))
            .map(|n| n.with_disk_space(disk))
            .collect()
    }

    #[test]
    fn test_availability_critical() {
        let predictions = predict_issues(&fleet(6, 4, 100.0));
        assert_eq!(predictions.len(), 1);
        assert_eq!(predictions[0].kind, InsightKind::Prediction);
        assert_eq!(predictions[0].severity, Severity::Critical);
        assert_eq!(
            predictions[0].description,
            "Active node ratio at 60%, below optimal threshold"
        );
    }

    #[test]
    fn test_availability_high() {
        let predictions = predict_issues(&fleet(8, 2, 100.0));
        assert_eq!(predictions.len(), 1);
        assert_eq!(predictions[0].severity, Severity::High);
        assert!(predictions[0].description.contains("80%"));
    }

    #[test]
    fn test_availability_boundaries() {
        // 0.7 exactly is high, 0.85 exactly does not fire
        let at_seventy = predict_issues(&fleet(7, 3, 100.0));
        assert_eq!(at_seventy[0].severity, Severity::High);

        assert!(predict_issues(&fleet(17, 3, 100.0)).is_empty());
    }

    #[test]
    fn test_storage_shortage() {
        let mut nodes = fleet(10, 0, 60.0);
        assert!(predict_issues(&nodes).is_empty());

        // Missing disk space drags the average down: (9*60 + 0) / 10 = 54
        nodes[0].disk_space = None;
        assert!(predict_issues(&nodes).is_empty());
        nodes[1].disk_space = None;
        nodes[2].disk_space = Some(46.0);

        let predictions = predict_issues(&nodes);
        assert_eq!(predictions.len(), 1);
        assert_eq!(predictions[0].title, "Storage Capacity Planning");
        assert_eq!(predictions[0].severity, Severity::Medium);
        assert_eq!(
            predictions[0].description,
            "Average node storage at 47TB, may need expansion"
        );
    }

    #[test]
    fn test_rule_order() {
        let predictions = predict_issues(&fleet(1, 1, 1.0));
        let titles: Vec<&str> = predictions.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Network Availability Risk", "Storage Capacity Planning"]);
    }

    #[test]
    fn test_empty_snapshot() {
        assert!(predict_issues(&[]).is_empty());
    }

    #[test]
    fn test_storage_exactly_fifty_does_not_fire() {
        assert!(predict_issues(&fleet(10, 0, 50.0)).is_empty());
        assert_eq!(predict_issues(&fleet(10, 0, 49.9)).len(), 1);
    }
}
