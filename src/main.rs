use bizpulse::{CosmeticRandom, Dashboard, DashboardConfig, TraceTree};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let config = match std::env::args().nth(1) {
        Some(path) => DashboardConfig::from_yaml_file(path)?,
        None => DashboardConfig::default(),
    };

    println!("{} (bizpulse v{})", config.display_name, bizpulse::version());
    println!("==========================================");
    println!();

    let mut dashboard = Dashboard::new(config);

    // Demo 1: Catalog overview
    demo_catalog(&dashboard);

    // Demo 2: Unified system data
    demo_unified(&mut dashboard)?;

    // Demo 3: Layouts
    demo_layouts(&dashboard)?;

    // Demo 4: Traces and abnormal logs
    demo_traces(&dashboard).await;

    Ok(())
}

fn demo_catalog(dashboard: &Dashboard) {
    println!("=== Demo 1: Catalog ===");
    let summary = dashboard.summary();
    println!("✓ {} systems, {} assets", summary.total_systems, summary.total_assets);
    for (status, count) in &summary.by_health {
        println!("  {:<10} {}", status, count);
    }
    for (importance, count) in &summary.by_importance {
        println!("  {:<10} {}", importance, count);
    }
    println!();
}

fn demo_unified(dashboard: &mut Dashboard) -> anyhow::Result<()> {
    println!("=== Demo 2: Unified Data ===");
    let first_id = match dashboard.catalog().systems().first() {
        Some(system) => system.id.clone(),
        None => {
            println!("(empty catalog)");
            return Ok(());
        }
    };

    let data = dashboard.unified_store().require(&first_id)?;
    let kpis = &data.monitoring.kpis;
    println!("✓ {} ({})", data.system.name, data.system.id);
    println!("  Health score:   {} ({})", kpis.health_score, kpis.health_status);
    println!("  Availability:   {:.2}%", kpis.availability);
    println!("  Response time:  {:.0} ms", kpis.response_time);
    println!("  Alerts:         {}", data.monitoring.alerts.len());
    println!("  Vulnerabilities: {}", data.monitoring.vulnerabilities.len());
    println!(
        "  Topology:       {} nodes, {} links",
        data.monitoring.topology.nodes.len(),
        data.monitoring.topology.links.len()
    );
    for (name, series) in data.monitoring.performance.named() {
        let last = series.last().map(|p| p.value).unwrap_or_default();
        println!("  {:<16} {} points, last {:.2}", name, series.len(), last);
    }
    println!();
    Ok(())
}

fn demo_layouts(dashboard: &Dashboard) -> anyhow::Result<()> {
    println!("=== Demo 3: Layouts ===");
    let bubbles = dashboard.matrix(&mut CosmeticRandom::new())?;
    println!("✓ Matrix: {} bubbles", bubbles.len());
    for bubble in bubbles.iter().take(5) {
        println!(
            "  {:<8} {:<12} {:<9} ({:.1}, {:.1}) r={:.1}",
            bubble.system_id, bubble.department, bubble.importance, bubble.x, bubble.y, bubble.radius
        );
    }

    if let Some(system) = dashboard.catalog().systems().first() {
        let cells = dashboard.honeycomb(&system.id)?;
        println!("✓ Honeycomb for {}: {} hexagons", system.id, cells.len());
        for cell in cells.iter().take(3) {
            println!("  {:<16} {:<14} ({:.1}, {:.1})", cell.asset_id, cell.band.label(), cell.x, cell.y);
        }
    }
    println!();
    Ok(())
}

async fn demo_traces(dashboard: &Dashboard) {
    println!("=== Demo 4: Traces ===");
    let snapshot = dashboard.observability().await;
    println!(
        "✓ {} traces, {} abnormal logs ({} correlated)",
        snapshot.traces.len(),
        snapshot.logs.len(),
        snapshot.correlated_logs
    );

    if let Some(detail) = snapshot.traces.iter().find(|t| t.summary.error_count > 0) {
        println!("  Failing trace {} ({} ms)", detail.summary.trace_id, detail.summary.duration_ms);
        let tree = TraceTree::build(&detail.spans);
        for (depth, span) in tree.walk() {
            println!(
                "  {}{} {} [{} ms] {:?}",
                "  ".repeat(depth),
                span.service,
                span.operation,
                span.duration_ms,
                span.status
            );
        }
        for log in snapshot.logs_for_trace(&detail.summary.trace_id) {
            println!("  {} {} {}", log.level, log.service, log.message);
        }
    }
}
