//! Bizpulse CLI: inspect the generated catalog, layouts and traces
//!
//! Everything is computed locally from the dashboard configuration.

use bizpulse::trace::LogLevel;
use bizpulse::{CosmeticRandom, Dashboard, DashboardConfig, TraceTree};
use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bizpulse", version, about = "Bizpulse operations dashboard CLI")]
struct Cli {
    /// Dashboard configuration file (YAML)
    #[arg(long, global = true, env = "BIZPULSE_CONFIG")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// List business systems
    Systems {
        /// Only systems of this department
        #[arg(long)]
        department: Option<String>,
    },
    /// Show the unified data of one system
    System {
        /// System id, e.g. SYS-001
        id: String,
    },
    /// Lay out the department × importance matrix
    Matrix {
        /// Seed the cosmetic jitter for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Lay out the asset honeycomb of one system
    Honeycomb {
        /// System id
        id: String,
    },
    /// List generated traces, or show one as a call tree
    Traces {
        /// Trace id to expand
        #[arg(long)]
        id: Option<String>,
    },
    /// List abnormal logs
    Logs {
        /// Only logs correlated with this trace
        #[arg(long)]
        trace: Option<String>,
        /// Only error-level logs
        #[arg(long)]
        errors: bool,
    },
    /// Print the effective configuration
    Config,
}

type CliResult = Result<(), Box<dyn std::error::Error>>;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let result = match load_config(cli.config.as_ref()) {
        Ok(config) => run(cli.command, config, &cli.format).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<DashboardConfig, Box<dyn std::error::Error>> {
    Ok(match path {
        Some(path) => DashboardConfig::from_yaml_file(path)?,
        None => DashboardConfig::default(),
    })
}

async fn run(command: Commands, config: DashboardConfig, format: &OutputFormat) -> CliResult {
    let mut dashboard = Dashboard::new(config);
    match command {
        Commands::Systems { department } => run_systems(&dashboard, department.as_deref(), format),
        Commands::System { id } => run_system(&mut dashboard, &id, format),
        Commands::Matrix { seed } => run_matrix(&dashboard, seed, format),
        Commands::Honeycomb { id } => run_honeycomb(&dashboard, &id, format),
        Commands::Traces { id } => run_traces(&dashboard, id.as_deref(), format).await,
        Commands::Logs { trace, errors } => run_logs(&dashboard, trace.as_deref(), errors, format).await,
        Commands::Config => run_config(dashboard.config(), format),
    }
}

fn new_table<I, S>(header: I) -> Table
where
    I: IntoIterator<Item = S>,
    S: Into<comfy_table::Cell>,
{
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header);
    table
}

fn run_systems(dashboard: &Dashboard, department: Option<&str>, format: &OutputFormat) -> CliResult {
    let systems: Vec<_> = dashboard
        .catalog()
        .systems()
        .iter()
        .filter(|s| department.map_or(true, |d| s.department == d))
        .collect();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&systems)?);
        }
        OutputFormat::Table => {
            if systems.is_empty() {
                println!("(no systems)");
                return Ok(());
            }

            let mut table = new_table(["ID", "Name", "Department", "Importance", "Health", "Score", "Assets", "Alerts"]);
            for s in &systems {
                table.add_row(vec![
                    s.id.clone(),
                    s.name.clone(),
                    s.department.clone(),
                    s.importance.to_string(),
                    s.health_status.to_string(),
                    s.health_score().to_string(),
                    s.asset_count.to_string(),
                    s.counters.alert_count.to_string(),
                ]);
            }
            println!("{}", table);
            println!("{} system(s)", systems.len());
        }
    }
    Ok(())
}

fn run_system(dashboard: &mut Dashboard, id: &str, format: &OutputFormat) -> CliResult {
    let data = dashboard.unified_store().require(id)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(data)?);
        }
        OutputFormat::Table => {
            let kpis = &data.monitoring.kpis;
            println!("{} ({}) - {}", data.system.name, data.system.id, data.system.department);
            println!("Health:          {} ({})", kpis.health_score, kpis.health_status);
            println!("Availability:    {:.2}%", kpis.availability);
            println!("Response time:   {:.0} ms", kpis.response_time);
            println!("Error rate:      {:.2}%", kpis.error_rate);
            println!("Throughput:      {:.0} req/min", kpis.throughput);
            println!("Last activity:   {} min ago", kpis.activity.minutes_ago);

            let mut penalties = new_table(["Penalty", "Points"]);
            let p = &kpis.penalties;
            for (name, value) in [
                ("error rate", p.error_rate),
                ("response time", p.response_time),
                ("availability", p.availability),
                ("alerts", p.alerts),
                ("vulnerabilities", p.vulnerabilities),
            ] {
                penalties.add_row(vec![name.to_string(), format!("{:.1}", value)]);
            }
            println!("{}", penalties);

            let mut alerts = new_table(["Alert", "Level", "Status", "Title"]);
            for a in &data.monitoring.alerts {
                alerts.add_row(vec![a.id.clone(), format!("{:?}", a.level), format!("{:?}", a.status), a.title.clone()]);
            }
            println!("{}", alerts);

            let mut vulns = new_table(["Vulnerability", "CVE", "Severity", "CVSS"]);
            for v in &data.monitoring.vulnerabilities {
                vulns.add_row(vec![v.id.clone(), v.cve_id.clone(), format!("{:?}", v.severity), format!("{:.1}", v.cvss_score)]);
            }
            println!("{}", vulns);

            let topology = &data.monitoring.topology;
            println!("Topology: {} nodes, {} links", topology.nodes.len(), topology.links.len());
        }
    }
    Ok(())
}

fn run_matrix(dashboard: &Dashboard, seed: Option<u64>, format: &OutputFormat) -> CliResult {
    let bubbles = match seed {
        Some(seed) => dashboard.matrix(&mut CosmeticRandom::seeded(seed))?,
        None => dashboard.matrix(&mut CosmeticRandom::new())?,
    };

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&bubbles)?);
        }
        OutputFormat::Table => {
            let mut table = new_table(["System", "Department", "Importance", "X", "Y", "Radius", "Color"]);
            for b in &bubbles {
                table.add_row(vec![
                    b.system_id.clone(),
                    b.department.clone(),
                    b.importance.to_string(),
                    format!("{:.1}", b.x),
                    format!("{:.1}", b.y),
                    format!("{:.1}", b.radius),
                    b.color.clone(),
                ]);
            }
            println!("{}", table);
        }
    }
    Ok(())
}

fn run_honeycomb(dashboard: &Dashboard, id: &str, format: &OutputFormat) -> CliResult {
    let cells = dashboard.honeycomb(id)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&cells)?);
        }
        OutputFormat::Table => {
            let mut table = new_table(["Asset", "Type", "Band", "Health", "X", "Y"]);
            for c in &cells {
                table.add_row(vec![
                    c.asset_id.clone(),
                    c.asset_type.clone(),
                    c.band.label().to_string(),
                    c.health_status.to_string(),
                    format!("{:.1}", c.x),
                    format!("{:.1}", c.y),
                ]);
            }
            println!("{}", table);
            println!("{} asset(s)", cells.len());
        }
    }
    Ok(())
}

async fn run_traces(dashboard: &Dashboard, id: Option<&str>, format: &OutputFormat) -> CliResult {
    let snapshot = dashboard.observability().await;

    let Some(id) = id else {
        let summaries = snapshot.summaries();
        match format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summaries)?),
            OutputFormat::Table => {
                let mut table = new_table(["Trace", "Service", "Operation", "Duration (ms)", "Spans", "Errors", "Status"]);
                for s in &summaries {
                    table.add_row(vec![
                        s.trace_id.clone(),
                        s.root_service.clone(),
                        s.operation.clone(),
                        s.duration_ms.to_string(),
                        s.span_count.to_string(),
                        s.error_count.to_string(),
                        format!("{:?}", s.status),
                    ]);
                }
                println!("{}", table);
            }
        }
        return Ok(());
    };

    // Snapshots are regenerated per invocation, so ids from a previous run will not resolve
    let detail = snapshot
        .trace(id)
        .ok_or_else(|| format!("Trace {} not found in this snapshot", id))?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(detail)?),
        OutputFormat::Table => {
            let tree = TraceTree::build(&detail.spans);
            let mut table = new_table(["Span", "Start (ms)", "Duration (ms)", "Status"]);
            for (depth, span) in tree.walk() {
                table.add_row(vec![
                    format!("{}{} {}", "  ".repeat(depth), span.service, span.operation),
                    span.start_offset_ms.to_string(),
                    span.duration_ms.to_string(),
                    format!("{:?}", span.status),
                ]);
            }
            println!("{}", table);
            println!("Critical path: {} ms", tree.critical_path_ms());
        }
    }
    Ok(())
}

async fn run_logs(dashboard: &Dashboard, trace: Option<&str>, errors: bool, format: &OutputFormat) -> CliResult {
    let snapshot = dashboard.observability().await;
    let logs: Vec<_> = snapshot
        .logs
        .iter()
        .filter(|l| trace.map_or(true, |t| l.trace_id.as_deref() == Some(t)))
        .filter(|l| !errors || l.level == LogLevel::Error)
        .collect();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&logs)?),
        OutputFormat::Table => {
            let mut table = new_table(["Time", "Level", "Service", "Message", "Trace"]);
            for l in &logs {
                table.add_row(vec![
                    l.timestamp.format("%H:%M:%S").to_string(),
                    l.level.to_string(),
                    l.service.clone(),
                    l.message.clone(),
                    l.trace_id.clone().unwrap_or_else(|| "-".to_string()),
                ]);
            }
            println!("{}", table);
            println!("{} log(s), {} correlated in snapshot", logs.len(), snapshot.correlated_logs);
        }
    }
    Ok(())
}

fn run_config(config: &DashboardConfig, format: &OutputFormat) -> CliResult {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(config)?),
        OutputFormat::Table => print!("{}", config.to_yaml()?),
    }
    Ok(())
}
