// Batch prediction over a CSV file
//
// Usage: cargo run --release --bin batch_predict -- <input.csv> <output.csv>
//
// Input columns: region, season, rainfall, temperature, humidity,
// soil_moisture, sunlight, soil_ph, nitrogen, phosphorus, potassium

use anyhow::Context;
use crop_advisor::batch::{load_csv, predict_frame, write_csv};
use crop_advisor::{AdvisorConfig, ArtifactPaths, Recommender};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "crop_advisor=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <input.csv> <output.csv>", args[0]);
        std::process::exit(2);
    }
    let input = PathBuf::from(&args[1]);
    let output = PathBuf::from(&args[2]);

    let config = AdvisorConfig::from_env();
    let recommender = match Recommender::load(&ArtifactPaths::in_dir(&config.model_dir)) {
        Ok(rec) => rec.with_top_k(config.top_k),
        Err(e) => {
            eprintln!("Cannot start: {}", e);
            std::process::exit(1);
        }
    };

    let df = load_csv(&input)?;
    tracing::info!("Loaded {} rows from {}", df.height(), input.display());

    let (mut out, summary) = predict_frame(&recommender, &df).context("Batch prediction failed")?;
    write_csv(&mut out, &output)?;

    println!(
        "Wrote {} rows to {} ({} ok, {} failed)",
        summary.rows,
        output.display(),
        summary.rows - summary.failed,
        summary.failed
    );
    Ok(())
}
