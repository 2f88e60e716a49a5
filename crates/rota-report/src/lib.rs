#![deny(missing_docs)]

//! Rendering of generated call rotas: calendar labels, the CSV grid and the
//! JSON run summary.

/// Calendar date helpers for column labels.
pub mod calendar;
/// CSV grid writer and reader.
pub mod grid;
/// JSON run summary.
pub mod summary;

pub use calendar::{format_dates, schedule_dates};
pub use grid::{read_csv, read_csv_path, CallGrid};
pub use summary::{config_hash, RunSummary};

use rota_core::{History, Roster, RotaError};
use rota_gen::RunConfig;

/// Builds the grid for `history` using the dates and labels in `config`.
///
/// `history` may be shorter than the configured run (an aborted run's
/// completed prefix); only its days get columns.
pub fn grid_for_run(
    config: &RunConfig,
    roster: &Roster,
    history: &History,
) -> Result<CallGrid, RotaError> {
    let dates = schedule_dates(config.start_date, history.len())?;
    let labels = format_dates(&dates, &config.report.date_format)?;
    CallGrid::from_history(roster, history, &labels, &config.report.corner_label)
}
