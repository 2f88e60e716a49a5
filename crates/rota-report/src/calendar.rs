use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::{Days, NaiveDate};
use rota_core::errors::ErrorInfo;
use rota_core::RotaError;

/// Consecutive calendar days starting at `start`, one per generated day.
pub fn schedule_dates(start: NaiveDate, num_days: usize) -> Result<Vec<NaiveDate>, RotaError> {
    (0..num_days)
        .map(|offset| {
            start.checked_add_days(Days::new(offset as u64)).ok_or_else(|| {
                RotaError::Report(
                    ErrorInfo::new("calendar-overflow", "date range leaves the supported calendar")
                        .with_context("start_date", start)
                        .with_context("offset", offset),
                )
            })
        })
        .collect()
}

/// Renders each date with a `chrono` strftime pattern.
pub fn format_dates(dates: &[NaiveDate], pattern: &str) -> Result<Vec<String>, RotaError> {
    let items: Vec<Item<'_>> = StrftimeItems::new(pattern).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(RotaError::Report(
            ErrorInfo::new("calendar-bad-format", "invalid date format pattern")
                .with_context("pattern", pattern),
        ));
    }
    dates
        .iter()
        .map(|date| {
            let mut rendered = String::new();
            write!(rendered, "{}", date.format_with_items(items.iter()))
                .map(|_| rendered)
                .map_err(|_| {
                    RotaError::Report(
                        ErrorInfo::new("calendar-render", "date cannot be rendered with pattern")
                            .with_context("pattern", pattern)
                            .with_context("date", date),
                    )
                })
        })
        .collect()
}
