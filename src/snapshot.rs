//! Snapshot loading from node-registry JSON dumps.
//!
//! Accepts either a bare array of node objects or an object wrapping them in
//! a `nodes` array. Entries that cannot be interpreted are skipped with a
//! warning instead of failing the whole snapshot.

use std::fs;
use std::path::Path;

use color_eyre::eyre::{eyre, Context, Result};
use serde_json::Value;

use crate::analysis::types::{NodeRecord, NodeStatus};

/// Load a snapshot from a JSON file
pub fn load_snapshot(path: &Path) -> Result<Vec<NodeRecord>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot from {}", path.display()))?;

    let nodes = parse_snapshot(&content)
        .with_context(|| format!("Failed to parse snapshot {}", path.display()))?;

    log::info!("Loaded {} nodes from {}", nodes.len(), path.display());
    Ok(nodes)
}

/// Parse snapshot JSON text
pub fn parse_snapshot(content: &str) -> Result<Vec<NodeRecord>> {
    // Parse as generic JSON first to detect format
    let json: Value = serde_json::from_str(content).context("Failed to parse snapshot JSON")?;

    let entries = if let Some(array) = json.as_array() {
        array
    } else if let Some(array) = json.get("nodes").and_then(|v| v.as_array()) {
        array
    } else {
        return Err(eyre!("Snapshot must be a JSON array or an object with a \"nodes\" array"));
    };

    let mut nodes = Vec::with_capacity(entries.len());
    let mut skipped = 0;

    for value in entries {
        match parse_node(value) {
            Some(node) => nodes.push(node),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        log::warn!("Skipped {} malformed node entries", skipped);
    }

    Ok(nodes)
}

fn string_field(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| value.get(*key).and_then(|v| v.as_str()))
        .map(|s| s.to_string())
}

fn number_field(value: &Value, key: &str) -> Option<f64> {
    value.get(key).and_then(|v| v.as_f64())
}

/// Only entries with a string identity and a known status are accepted
fn parse_node(value: &Value) -> Option<NodeRecord> {
    let identity = string_field(value, &["identityPubkey", "identity"])?;
    let status = value
        .get("status")
        .and_then(|v| v.as_str())
        .and_then(NodeStatus::from_name)?;

    Some(NodeRecord {
        identity_pubkey: identity,
        status,
        latency: number_field(value, "latency").unwrap_or(0.0),
        uptime: number_field(value, "uptime"),
        disk_space: number_field(value, "diskSpace"),
        version: string_field(value, &["version"]),
        location: string_field(value, &["location"]),
        gossip_addr: string_field(value, &["gossipAddr"]),
        rpc_addr: string_field(value, &["rpcAddr"]),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_array_snapshot() {
        let json = r#"[
            {"identityPubkey": "a", "status": "Active", "latency": 12.5, "uptime": 99.9, "version": "1.0"},
            {"identityPubkey": "b", "status": "Offline", "latency": 300, "diskSpace": 20}
        ]"#;
        let nodes = parse_snapshot(json).unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].uptime, Some(99.9));
        assert_eq!(nodes[0].version.as_deref(), Some("1.0"));
        assert_eq!(nodes[1].status, NodeStatus::Offline);
        assert_eq!(nodes[1].disk_space, Some(20.0));
        assert_eq!(nodes[1].uptime, None);
    }

    #[test]
    fn test_parse_wrapped_snapshot() {
        let json = r#"{"nodes": [{"identity": "a", "status": "Delinquent", "latency": 1}]}"#;
        let nodes = parse_snapshot(json).unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].identity_pubkey, "a");
    }

    #[test]
    fn test_malformed_entries_are_skipped() {
        let json = r#"[
            {"identityPubkey": 7, "status": "Active", "latency": 1},
            {"identityPubkey": "x", "status": "Rebooting", "latency": 1},
            {"status": "Active", "latency": 1},
            {"identityPubkey": "ok", "status": "Active"}
        ]"#;
        let nodes = parse_snapshot(json).unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].identity_pubkey, "ok");
        assert_eq!(nodes[0].latency, 0.0);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let json = r#"[
            {"identityPubkey": "a", "status": "Active", "latency": 1},
            {"identityPubkey": "a", "status": "Active", "latency": 2}
        ]"#;
        assert_eq!(parse_snapshot(json).unwrap().len(), 2);
    }

    #[test]
    fn test_rejects_unknown_shape() {
        assert!(parse_snapshot(r#"{"peers": []}"#).is_err());
        assert!(parse_snapshot("not json").is_err());
    }

    #[test]
    fn test_load_snapshot_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, r#"[{{"identityPubkey": "a", "status": "Active", "latency": 5}}]"#).unwrap();

        let nodes = load_snapshot(temp_file.path()).unwrap();
        assert_eq!(nodes.len(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        assert!(load_snapshot(Path::new("/nonexistent/snapshot.json")).is_err());
    }
}
