#![allow(clippy::doc_markdown)]
#![doc = include_str!("../README.md")]

mod cli;
mod prelude;
mod tables;

use std::fs;

use battery_health::{Engine, Snapshot};
use clap::{Parser, crate_version};
use tracing_subscriber::EnvFilter;

use crate::{
    cli::{Args, Command, Format, InspectArgs},
    prelude::*,
    tables::{build_findings_table, build_recommendations_table, build_summary_table},
};

fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .without_time()
        .compact()
        .init();
    info!(version = crate_version!(), "starting…");

    match Args::parse().command {
        Command::Inspect(args) => inspect(&args),
    }
}

#[instrument(skip_all, fields(path = %args.path.display()))]
fn inspect(args: &InspectArgs) -> Result {
    let json = fs::read_to_string(&args.path)
        .with_context(|| format!("failed to read `{}`", args.path.display()))?;
    let snapshot = Snapshot::from_json(&json, args.validation_policy())
        .with_context(|| format!("invalid snapshot in `{}`", args.path.display()))?;
    let report = Engine::new(args.thresholds.into())
        .generate(&snapshot)
        .with_context(|| format!("failed to assess `{}`", snapshot.vehicle_id))?;
    info!(
        n_findings = report.findings.len(),
        n_recommendations = report.recommendations.len(),
        "done",
    );

    match args.format {
        Format::Table => {
            println!("{}", build_summary_table(&report));
            if !report.findings.is_empty() {
                println!("{}", build_findings_table(&report));
            }
            if !report.recommendations.is_empty() {
                println!("{}", build_recommendations_table(&report));
            }
        }
        Format::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}
