//! Network health analytics CLI for pNode snapshots.
//!
//! Loads a node snapshot, runs the analytics engine, and writes JSON,
//! Markdown and CSV reports. `watch` mode re-reads the snapshot on a fixed
//! interval the way the dashboard polls the registry.

use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Context, Result};
use env_logger::Env;
use log::{info, warn};

use pnode_analytics::analysis::{self, report, AnalyticsResult, NodeRecord, Severity};
use pnode_analytics::config::{self, CliOverrides, Config, ReportFormat};
use pnode_analytics::snapshot;

#[derive(Parser, Debug)]
#[command(name = "pnode-analytics")]
#[command(about = "Health analytics for pNode network snapshots")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output directory for reports
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze a snapshot once and write reports
    Analyze {
        /// Snapshot JSON file
        #[arg(short, long)]
        snapshot: PathBuf,

        /// Report formats to write (defaults to the configured set)
        #[arg(short, long, value_enum)]
        format: Vec<ReportFormat>,
    },

    /// Re-analyze a snapshot file on a fixed interval
    Watch {
        /// Snapshot JSON file, re-read on every tick
        #[arg(short, long)]
        snapshot: PathBuf,

        /// Refresh interval (e.g. 30s, 5m)
        #[arg(long, value_parser = config::parse_interval)]
        interval: Option<Duration>,

        /// Stop after this many refreshes (0 = run until interrupted)
        #[arg(long)]
        iterations: Option<u64>,
    },

    /// Print snapshot statistics and the insight summary only
    Summary {
        /// Snapshot JSON file
        #[arg(short, long)]
        snapshot: PathBuf,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(ref path) => config::load_config(path)?,
        None => Config::default(),
    };

    let overrides = build_overrides(&cli);
    config::apply_overrides(&mut config, &overrides)?;

    // Initialize logging
    env_logger::Builder::from_env(Env::default().default_filter_or(&config.general.log_level))
        .init();

    if let Some(ref path) = cli.config {
        info!("Loaded configuration from: {:?}", path);
    }

    match cli.command {
        Commands::Analyze { snapshot: path, .. } => {
            let nodes = snapshot::load_snapshot(&path)?;
            let result = analysis::analyze_network_health(&nodes);
            write_reports(&config, &path, &nodes, &result, true)?;
        }
        Commands::Watch { snapshot: path, .. } => {
            run_watch(&config, &path)?;
        }
        Commands::Summary { snapshot: path } => {
            let nodes = snapshot::load_snapshot(&path)?;
            let result = analysis::analyze_network_health(&nodes);
            let report = report::build_report(&result, &nodes, &path.display().to_string());
            report::print_summary(&report, &result);
        }
    }

    Ok(())
}

fn build_overrides(cli: &Cli) -> CliOverrides {
    let mut overrides = CliOverrides {
        log_level: cli.log_level.clone(),
        output: cli.output.clone(),
        ..Default::default()
    };

    match cli.command {
        Commands::Analyze { ref format, .. } => {
            overrides.formats = Some(format.clone());
        }
        Commands::Watch {
            interval,
            iterations,
            ..
        } => {
            overrides.interval = interval;
            overrides.iterations = iterations;
        }
        Commands::Summary { .. } => {}
    }

    overrides
}

fn write_reports(
    config: &Config,
    snapshot_path: &Path,
    nodes: &[NodeRecord],
    result: &AnalyticsResult,
    print: bool,
) -> Result<()> {
    let output_dir = &config.output.directory;
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory: {}", output_dir.display()))?;

    let report = report::build_report(result, nodes, &snapshot_path.display().to_string());

    for format in &config.output.formats {
        let path = output_dir.join(format.file_name());
        match format {
            ReportFormat::Json => report::generate_json_report(&report, &path)?,
            ReportFormat::Markdown => {
                report::generate_markdown_report(&report, nodes, &path, config.output.top_nodes)?
            }
            ReportFormat::Csv => report::export_nodes_csv(nodes, &path)?,
        }
    }

    if print {
        report::print_summary(&report, result);
    }

    info!("Analysis complete. Reports written to {}", output_dir.display());
    Ok(())
}

fn run_watch(config: &Config, snapshot_path: &Path) -> Result<()> {
    info!(
        "Watching {} every {:?}",
        snapshot_path.display(),
        config.watch.interval
    );

    let mut iteration: u64 = 0;
    loop {
        iteration += 1;

        // A failed refresh keeps the loop alive; the next tick retries
        if let Err(err) = refresh(config, snapshot_path) {
            warn!("Refresh {} failed: {:#}", iteration, err);
        }

        if config.watch.max_iterations > 0 && iteration >= config.watch.max_iterations {
            break;
        }
        thread::sleep(config.watch.interval);
    }

    Ok(())
}

/// One watch tick: reload, analyze, notify, rewrite reports
fn refresh(config: &Config, snapshot_path: &Path) -> Result<()> {
    let nodes = snapshot::load_snapshot(snapshot_path)?;
    let result = analysis::analyze_network_health(&nodes);
    notify(&result);
    write_reports(config, snapshot_path, &nodes, &result, false)?;
    info!("{}", analysis::generate_insights_summary(&result));
    Ok(())
}

/// Surface high and critical insights in the log
fn notify(result: &AnalyticsResult) {
    for insight in analysis::rank_insights(result) {
        if insight.severity >= Severity::High {
            warn!(
                "[{}] {}: {}",
                insight.severity, insight.title, insight.description
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_parsing() {
        let cli = Cli::parse_from([
            "pnode-analytics",
            "analyze",
            "--snapshot", "nodes.json",
            "--format", "json",
            "--format", "csv",
        ]);

        assert!(cli.config.is_none());
        match cli.command {
            Commands::Analyze { snapshot, format } => {
                assert_eq!(snapshot, PathBuf::from("nodes.json"));
                assert_eq!(format, vec![ReportFormat::Json, ReportFormat::Csv]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_watch_parsing() {
        let cli = Cli::parse_from([
            "pnode-analytics",
            "--output", "out",
            "watch",
            "--snapshot", "nodes.json",
            "--interval", "5m",
            "--iterations", "3",
        ]);

        let overrides = build_overrides(&cli);
        assert_eq!(overrides.output, Some(PathBuf::from("out")));
        assert_eq!(overrides.interval, Some(Duration::from_secs(300)));
        assert_eq!(overrides.iterations, Some(3));
        assert!(overrides.formats.is_none());
    }

    #[test]
    fn test_invalid_interval_is_rejected() {
        let result = Cli::try_parse_from([
            "pnode-analytics",
            "watch",
            "--snapshot", "nodes.json",
            "--interval", "soon",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_write_reports_creates_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.output.directory = dir.path().join("reports");

        let nodes = vec![NodeRecord::new("a", analysis::NodeStatus::Active, 20.0)];
        let result = analysis::analyze_network_health(&nodes);
        write_reports(&config, Path::new("nodes.json"), &nodes, &result, false).unwrap();

        for format in &config.output.formats {
            assert!(config.output.directory.join(format.file_name()).exists());
        }
    }

    #[test]
    fn test_watch_stops_after_iterations() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot_path = dir.path().join("nodes.json");
        fs::write(
            &snapshot_path,
            r#"[{"identityPubkey": "a", "status": "Offline", "latency": 900}]"#,
        )
        .unwrap();

        let mut config = Config::default();
        config.output.directory = dir.path().join("out");
        config.watch.interval = Duration::from_millis(1);
        config.watch.max_iterations = 2;

        run_watch(&config, &snapshot_path).unwrap();
        assert!(config.output.directory.join("nodes.csv").exists());
    }

    #[test]
    fn test_watch_survives_report_write_failure() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot_path = dir.path().join("nodes.json");
        fs::write(
            &snapshot_path,
            r#"[{"identityPubkey": "a", "status": "Active", "latency": 20}]"#,
        )
        .unwrap();

        // A regular file where the output directory should be
        let blocked = dir.path().join("out");
        fs::write(&blocked, "not a directory").unwrap();

        let mut config = Config::default();
        config.output.directory = blocked.clone();
        config.watch.interval = Duration::from_millis(1);
        config.watch.max_iterations = 2;

        assert!(refresh(&config, &snapshot_path).is_err());
        run_watch(&config, &snapshot_path).unwrap();
        assert!(blocked.is_file());
    }

    #[test]
    fn test_cli_interval_matches_yaml_grammar() {
        let cli = Cli::parse_from([
            "pnode-analytics",
            "watch",
            "--snapshot", "nodes.json",
            "--interval", "1m30s",
        ]);
        assert_eq!(build_overrides(&cli).interval, Some(Duration::from_secs(90)));
    }
}
