mod plan;

use almanac_astro::{SwissEphemerisAdapter, TransitBatch};
use almanac_publish::publish_to_drive;
use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use log::info;
use std::path::PathBuf;

/// Compute seven days of planetary transits and aspects, write them as JSON
/// and optionally replace the published copy on Google Drive.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Config file (default: configs/almanac.toml if present).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output file name (default: transit_data.json, or transit_<YYYYMMDD>.json when publishing).
    #[arg(long)]
    output: Option<String>,

    /// Directory for the output file (overrides `output_dir` from the config).
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Skip publishing even when Google Drive credentials are set.
    #[arg(long)]
    local_only: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = almanac_config::load_config(args.config.as_deref())?;
    let start = Utc::now().date_naive();
    let plan = plan::plan_run(
        &config,
        start,
        args.output_dir.as_deref(),
        args.output.as_deref(),
        args.local_only,
    );

    let adapter = SwissEphemerisAdapter::new(config.ephemeris.clone(), config.sign_labels)
        .context("Failed to initialize Swiss Ephemeris")?;
    let batch = TransitBatch::compute(&adapter, start).context("Failed to compute transits")?;

    batch
        .write_to(&plan.output_path)
        .with_context(|| format!("Failed to write {}", plan.output_path.display()))?;

    println!("Generated: {}", plan.output_path.display());
    if let Some((first, last)) = batch.date_range() {
        println!("Date range: {} to {}", first, last);
    }

    let Some((drive, target)) = plan.publish else {
        info!("Publishing disabled, done");
        return Ok(());
    };

    let report = publish_to_drive(&drive.credentials_json, &target, &plan.output_path)
        .await
        .context("Failed to publish to Google Drive")?;
    println!("Uploaded: {} ({})", report.uploaded.name, report.uploaded.id);
    if !report.deleted.is_empty() {
        info!("Replaced {} previous file(s)", report.deleted.len());
    }

    Ok(())
}
