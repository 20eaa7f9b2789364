//! Endorsement Tally Binary
//!
//! Reads a forum export, prints per-contributor verified/endorsed counts,
//! and writes them as CSV.
//!
//! ## Configuration
//!
//! Environment variables:
//! - `TALLY_INPUT`: JSON export to read (default: `cpsc323_ed_fall24.json`)
//! - `TALLY_OUTPUT`: CSV file to write (default: `cpsc323_ed_fall24_verified_endorsed_counts.csv`)
//! - `TALLY_GROUPS`: set to `1` to also print contributors grouped by count
//! - `RUST_LOG`: Log level filter (default: endorsement_tally=info)
//! - `LOG_FORMAT`: "json" for structured logs, "pretty" for development (default: json)
//!
//! Logs go to stderr; the ranking goes to stdout.
//!
//! ## Usage
//!
//! ```bash
//! TALLY_INPUT=export.json TALLY_OUTPUT=counts.csv cargo run --bin endorsement_tally
//! ```

use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use endorsement_tally::{
    group_by_count, render_groups, tally_file, QualifyingPolicy, DEFAULT_INPUT_PATH,
    DEFAULT_OUTPUT_PATH,
};

/// Initialize the tracing subscriber with JSON or pretty format
fn init_tracing() {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "endorsement_tally=info".into());

    if log_format == "pretty" {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_current_span(true)
                    .flatten_event(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let input = std::env::var("TALLY_INPUT").unwrap_or_else(|_| DEFAULT_INPUT_PATH.to_string());
    let output = std::env::var("TALLY_OUTPUT").unwrap_or_else(|_| DEFAULT_OUTPUT_PATH.to_string());
    let show_groups = std::env::var("TALLY_GROUPS").map(|v| v == "1").unwrap_or(false);

    let policy = QualifyingPolicy::default();
    info!(
        version = env!("CARGO_PKG_VERSION"),
        input = %input,
        output = %output,
        policy = policy.policy_id(),
        min_unendorsed_chars = policy.min_unendorsed_chars,
        "Starting endorsement tally"
    );

    let run = match tally_file(&input, &policy) {
        Ok(run) => run,
        Err(e) => {
            error!(error = %e, "Failed to tally export");
            return Err(e.into());
        }
    };

    print!("{}", run.ranking.render_console());

    if show_groups {
        println!();
        print!("{}", render_groups(&group_by_count(&run.report.tally)));
    }

    if let Err(e) = run.ranking.write_csv(&output) {
        error!(error = %e, "Failed to write CSV");
        return Err(e.into());
    }
    println!("\nWrote CSV to {}", output);

    info!(
        snapshot_id = %run.snapshot.snapshot_id,
        tally_fingerprint = %run.snapshot.tally_fingerprint,
        "Endorsement tally complete"
    );

    Ok(())
}
