use rand::seq::SliceRandom;
use rota_core::errors::ErrorInfo;
use rota_core::{DailyAssignment, History, ParticipantId, RngHandle, Roster, RotaError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, trace, warn};

use crate::config::RunConfig;
use crate::validate;

/// Failures of the randomized search.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// No candidate passed validation within the attempt budget.
    #[error("max tries {max_tries} reached on day {day}")]
    MaxTriesExceeded {
        /// Index of the day that could not be filled.
        day: usize,
        /// Configured attempt budget.
        max_tries: usize,
    },
    /// Fewer than two participants reached the generator.
    #[error("cannot build a call rota for {participants} participant(s)")]
    DegenerateRoster {
        /// Number of participants supplied.
        participants: usize,
    },
    /// The configuration was rejected before generation started.
    #[error(transparent)]
    Config(#[from] RotaError),
}

impl From<GenerationError> for RotaError {
    fn from(err: GenerationError) -> Self {
        match err {
            GenerationError::MaxTriesExceeded { day, max_tries } => RotaError::Generation(
                ErrorInfo::new("max-tries-exceeded", "no valid assignment found within budget")
                    .with_context("day", day)
                    .with_context("max_tries", max_tries)
                    .with_hint(
                        "raise max_tries, shrink history_length, or add participants",
                    ),
            ),
            GenerationError::DegenerateRoster { participants } => RotaError::Generation(
                ErrorInfo::new("degenerate-roster", "at least two participants are required")
                    .with_context("participants", participants),
            ),
            GenerationError::Config(inner) => inner,
        }
    }
}

/// An accepted day and the number of candidates drawn to find it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayOutcome {
    /// Accepted assignment.
    pub assignment: DailyAssignment,
    /// Candidates drawn, including the accepted one.
    pub attempts: usize,
}

/// Draws a uniformly random permutation of the roster.
pub fn sample_candidate(participants: usize, rng: &mut RngHandle) -> DailyAssignment {
    let mut targets: Vec<ParticipantId> = (0..participants).map(ParticipantId::from_raw).collect();
    targets.shuffle(rng);
    DailyAssignment::from_permutation_unchecked(targets)
}

/// Finds an admissible assignment for the day following `history`.
///
/// Draws up to `max_tries` shuffled candidates and returns the first one the
/// validator accepts, so `attempts` never exceeds `max_tries`. `history` is
/// not modified; the caller appends the result.
pub fn generate_day(
    history: &History,
    roster: &Roster,
    window: usize,
    max_tries: usize,
    rng: &mut RngHandle,
) -> Result<DayOutcome, GenerationError> {
    if roster.len() < 2 {
        return Err(GenerationError::DegenerateRoster {
            participants: roster.len(),
        });
    }
    let day = history.len();
    for attempt in 1..=max_tries {
        let candidate = sample_candidate(roster.len(), rng);
        match validate::first_violation(history, &candidate, window) {
            None => {
                debug!(day, attempts = attempt, rejected = attempt - 1, "accepted assignment");
                return Ok(DayOutcome {
                    assignment: candidate,
                    attempts: attempt,
                });
            }
            Some(violation) => trace!(day, attempt, %violation, "rejected candidate"),
        }
    }
    warn!(day, max_tries, "attempt budget exhausted");
    Err(GenerationError::MaxTriesExceeded { day, max_tries })
}

/// Drives day-by-day generation, owning the RNG and the growing history.
#[derive(Debug, Clone)]
pub struct SequenceGenerator {
    roster: Roster,
    window: usize,
    max_tries: usize,
    num_days: usize,
    rng: RngHandle,
    history: History,
    attempts: Vec<usize>,
}

impl SequenceGenerator {
    /// Prepares a run for `config`, seeded by `rng`.
    pub fn new(config: &RunConfig, rng: RngHandle) -> Result<Self, GenerationError> {
        config.validate()?;
        let roster = config.roster()?;
        Ok(Self {
            roster,
            window: config.history_length,
            max_tries: config.max_tries,
            num_days: config.num_days(),
            rng,
            history: History::new(),
            attempts: Vec::new(),
        })
    }

    /// Total number of days this run will produce.
    pub fn num_days(&self) -> usize {
        self.num_days
    }

    /// True once every day has been generated.
    pub fn is_finished(&self) -> bool {
        self.history.len() >= self.num_days
    }

    /// Generates and records the next day. Returns `Ok(None)` when the run is
    /// complete.
    pub fn next_day(&mut self) -> Result<Option<&DailyAssignment>, GenerationError> {
        if self.is_finished() {
            return Ok(None);
        }
        let outcome = generate_day(
            &self.history,
            &self.roster,
            self.window,
            self.max_tries,
            &mut self.rng,
        )?;
        self.attempts.push(outcome.attempts);
        self.history.push(outcome.assignment);
        Ok(self.history.days().last())
    }

    /// Days accepted so far.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Candidates drawn for each accepted day.
    pub fn attempts(&self) -> &[usize] {
        &self.attempts
    }

    /// Participant roster driving the run.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Seed of the RNG driving the run.
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Consumes the generator, returning the accepted days.
    pub fn into_history(self) -> History {
        self.history
    }
}

/// Generates the full sequence of `(participants - 1) * num_rounds` days.
///
/// Stops at the first day that cannot be filled; no partial result is
/// returned. Use [`SequenceGenerator`] directly to keep the completed prefix.
pub fn generate_sequence(config: &RunConfig, rng: RngHandle) -> Result<History, GenerationError> {
    let mut generator = SequenceGenerator::new(config, rng)?;
    info!(
        days = generator.num_days(),
        participants = generator.roster().len(),
        window = config.history_length,
        seed = generator.seed(),
        "generating call rota"
    );
    while generator.next_day()?.is_some() {}
    let total: usize = generator.attempts().iter().sum();
    info!(days = generator.history().len(), total_attempts = total, "call rota complete");
    Ok(generator.into_history())
}
