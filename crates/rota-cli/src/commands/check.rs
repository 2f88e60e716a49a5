use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use rota_gen::validate::{audit_sequence, offending_pairs};
use rota_gen::RunConfig;
use rota_report::{format_dates, read_csv_path, schedule_dates};
use tracing::{info, warn};

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// JSON configuration the grid was generated from.
    #[arg(long, default_value = "config.json")]
    pub config: PathBuf,
    /// CSV grid to audit.
    #[arg(long, default_value = "assignments.csv")]
    pub input: PathBuf,
    /// Window to audit against instead of `history_length`.
    #[arg(long)]
    pub window: Option<usize>,
}

pub fn run(args: &CheckArgs) -> Result<(), Box<dyn Error>> {
    let config = RunConfig::load(&args.config)?;
    let roster = config.roster()?;
    let history = read_csv_path(&args.input, &roster)?;
    let window = args.window.unwrap_or(config.history_length);
    if history.len() != config.num_days() {
        warn!(
            found = history.len(),
            expected = config.num_days(),
            "grid length differs from configured run"
        );
    }

    let labels = format_dates(
        &schedule_dates(config.start_date, history.len())?,
        &config.report.date_format,
    )?;
    let violations = audit_sequence(&history, window);
    for found in &violations {
        let prefix = history.prefix(found.day);
        let Some(assignment) = history.day(found.day) else {
            continue;
        };
        let calls: Vec<String> = offending_pairs(&prefix, assignment, found.violation)
            .into_iter()
            .map(|(caller, target)| format!("{} -> {}", roster.name(caller), roster.name(target)))
            .collect();
        println!(
            "day {} ({}): {}: {}",
            found.day,
            labels[found.day],
            found.violation,
            calls.join(", ")
        );
    }

    if violations.is_empty() {
        info!(days = history.len(), window, "grid satisfies every rule");
        println!("ok: {} day(s) satisfy every rule with window {window}", history.len());
        Ok(())
    } else {
        Err(format!("{} day(s) break the rota rules", violations.len()).into())
    }
}
