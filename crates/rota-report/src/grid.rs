use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use rota_core::errors::ErrorInfo;
use rota_core::{DailyAssignment, History, ParticipantId, Roster, RotaError};
use tracing::debug;

/// Participant-by-day table of who calls whom.
///
/// The header row holds the corner label followed by one label per day; each
/// following row starts with a participant's name and lists the person they
/// call on each day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallGrid {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

fn report_error(code: &str, message: impl Into<String>) -> RotaError {
    RotaError::Report(ErrorInfo::new(code, message))
}

fn csv_error(code: &str, err: csv::Error) -> RotaError {
    let mut info = ErrorInfo::new(code, err.to_string());
    if let Some(position) = err.position() {
        info = info.with_context("line", position.line());
    }
    RotaError::Report(info)
}

impl CallGrid {
    /// Lays out `history` with one column per entry of `day_labels`.
    pub fn from_history(
        roster: &Roster,
        history: &History,
        day_labels: &[String],
        corner_label: &str,
    ) -> Result<Self, RotaError> {
        if day_labels.len() != history.len() {
            return Err(RotaError::Report(
                ErrorInfo::new("grid-label-mismatch", "one label is required per day")
                    .with_context("labels", day_labels.len())
                    .with_context("days", history.len()),
            ));
        }
        if let Some((day, assignment)) = history
            .days()
            .iter()
            .enumerate()
            .find(|(_, assignment)| assignment.len() != roster.len())
        {
            return Err(RotaError::Report(
                ErrorInfo::new("grid-roster-mismatch", "assignment does not cover the roster")
                    .with_context("day", day)
                    .with_context("covered", assignment.len())
                    .with_context("participants", roster.len()),
            ));
        }

        let mut header = Vec::with_capacity(day_labels.len() + 1);
        header.push(corner_label.to_string());
        header.extend(day_labels.iter().cloned());

        let rows = roster
            .ids()
            .map(|caller| {
                let mut row = Vec::with_capacity(history.len() + 1);
                row.push(roster.name(caller).to_string());
                row.extend(
                    history
                        .days()
                        .iter()
                        .map(|assignment| roster.name(assignment.target(caller)).to_string()),
                );
                row
            })
            .collect();

        Ok(Self { header, rows })
    }

    /// Header row, corner label first.
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Participant rows in roster order.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Writes the grid as CSV.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), RotaError> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(&self.header)
            .map_err(|err| csv_error("grid-write", err))?;
        for row in &self.rows {
            wtr.write_record(row)
                .map_err(|err| csv_error("grid-write", err))?;
        }
        wtr.flush()
            .map_err(|err| report_error("grid-write", err.to_string()))
    }

    /// Writes the grid to a CSV file, replacing any existing file.
    pub fn write_csv_path(&self, path: &Path) -> Result<(), RotaError> {
        let file = File::create(path).map_err(|err| RotaError::io("grid-create", path, err))?;
        self.write_csv(file).map_err(|err| match err {
            RotaError::Report(info) => {
                RotaError::Report(info.with_context("path", path.display()))
            }
            other => other,
        })?;
        debug!(path = %path.display(), rows = self.rows.len(), "wrote call grid");
        Ok(())
    }
}

/// Parses a grid produced by [`CallGrid::write_csv`] back into a history.
///
/// Rows may appear in any order but every roster member must have exactly
/// one row, and every cell must name a roster member.
pub fn read_csv<R: Read>(reader: R, roster: &Roster) -> Result<History, RotaError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let num_days = rdr
        .headers()
        .map_err(|err| csv_error("grid-read", err))?
        .len()
        .saturating_sub(1);

    let mut columns: Vec<Option<Vec<ParticipantId>>> = vec![None; roster.len()];
    for record in rdr.records() {
        let record = record.map_err(|err| csv_error("grid-read", err))?;
        let line = record
            .position()
            .map(|position| position.line().to_string())
            .unwrap_or_default();
        let name = record.get(0).unwrap_or_default();
        let caller = roster.find(name).ok_or_else(|| {
            RotaError::Report(
                ErrorInfo::new("grid-unknown-participant", "row names a participant not on the roster")
                    .with_context("name", name)
                    .with_context("line", &line),
            )
        })?;
        let targets = record
            .iter()
            .skip(1)
            .enumerate()
            .map(|(day, cell)| {
                roster.find(cell).ok_or_else(|| {
                    RotaError::Report(
                        ErrorInfo::new("grid-unknown-participant", "cell names a participant not on the roster")
                            .with_context("name", cell)
                            .with_context("day", day)
                            .with_context("line", &line),
                    )
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let slot = &mut columns[caller.as_raw()];
        if slot.replace(targets).is_some() {
            return Err(RotaError::Report(
                ErrorInfo::new("grid-duplicate-row", "participant has more than one row")
                    .with_context("name", name),
            ));
        }
    }

    let rows = roster
        .ids()
        .zip(columns)
        .map(|(id, column)| {
            column.ok_or_else(|| {
                RotaError::Report(
                    ErrorInfo::new("grid-missing-row", "participant has no row")
                        .with_context("name", roster.name(id)),
                )
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    (0..num_days)
        .map(|day| {
            let targets = rows.iter().map(|row| row[day]).collect();
            DailyAssignment::from_targets(targets).map_err(|err| {
                RotaError::Report(
                    ErrorInfo::new("grid-not-permutation", err.info().message.clone())
                        .with_context("day", day),
                )
            })
        })
        .collect()
}

/// Reads a CSV grid from disk.
pub fn read_csv_path(path: &Path, roster: &Roster) -> Result<History, RotaError> {
    let file = File::open(path).map_err(|err| RotaError::io("grid-open", path, err))?;
    read_csv(file, roster)
}
