use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, bail};
use chrono::NaiveDate;
use clap::Parser;
use hospital_analytics::{
    AnalysisRequest, AnalyticsEngine, Dispatcher, EngineConfig, PatientRecord,
    SyntheticDataGenerator, records_from_json,
};
use hospital_analytics::utils::synthetic::assign_ids;
use log::info;
use rayon::prelude::*;

/// Run analytics queries over hospital visit records
#[derive(Parser)]
#[command(name = "hospital-analytics")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON file holding an array of visit records
    #[arg(short, long, conflicts_with = "demo")]
    records: Option<PathBuf>,

    /// Analyse a generated demo dataset instead of a file
    #[arg(long)]
    demo: bool,

    /// Seed for the demo dataset
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// JSON engine configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Dataset identifier attached to the results
    #[arg(short, long, default_value = "default")]
    dataset_id: String,

    /// Free-text queries, e.g. "malaria trend over time"
    #[arg(required = true)]
    queries: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => EngineConfig::from_json_file(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => EngineConfig::default(),
    };
    info!("{config}");

    let records = load_records(&cli)?;
    let dispatcher = Dispatcher::new(AnalyticsEngine::new(config)?);

    let start = Instant::now();
    let results = cli
        .queries
        .par_iter()
        .map(|query| {
            let request = AnalysisRequest::new(cli.dataset_id.as_str(), query.as_str());
            dispatcher
                .analyze(&request, &records)
                .with_context(|| format!("analysing query {query:?}"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    info!(
        "Analysed {} queries over {} records in {:?}",
        results.len(),
        records.len(),
        start.elapsed()
    );

    for result in &results {
        println!("{}", serde_json::to_string_pretty(result)?);
    }
    Ok(())
}

fn load_records(cli: &Cli) -> anyhow::Result<Vec<PatientRecord>> {
    if let Some(path) = &cli.records {
        info!("Loading records from {}", path.display());
        let json = fs::read_to_string(path)
            .with_context(|| format!("reading records from {}", path.display()))?;
        let records = records_from_json(&json)
            .with_context(|| format!("parsing records from {}", path.display()))?;
        info!("Loaded {} records", records.len());
        return Ok(records);
    }
    if !cli.demo {
        bail!("either --records FILE or --demo is required");
    }

    let start = NaiveDate::from_ymd_opt(2024, 1, 1).context("invalid demo start date")?;
    let end = NaiveDate::from_ymd_opt(2025, 1, 1).context("invalid demo end date")?;
    let mut generator = SyntheticDataGenerator::new(Some(cli.seed));
    let mut records = generator.opd_records(2000, start, end, &cli.dataset_id)?;
    records.extend(generator.ipd_records(500, start, end, &cli.dataset_id)?);
    records.extend(generator.seasonal_records("Malaria", start, end, &cli.dataset_id)?);
    records.sort_by_key(|record| record.visit_date);
    let records = assign_ids(records, &cli.dataset_id);
    info!("Generated {} demo records with seed {}", records.len(), cli.seed);
    Ok(records)
}
