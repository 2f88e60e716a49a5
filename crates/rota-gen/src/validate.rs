//! Admissibility checks for a candidate day against the recent history.
//!
//! Every check is a pure function. `p` calls `candidate.target(p)`; the
//! reverse checks look up who the candidate's target called, so a pair is
//! rejected whenever the edge `p -> q` would close a loop `q -> p` on the
//! same day or within the window.
//!
//! The two-day predicates index `previous` by the candidate's participants,
//! so they require `previous.len() == candidate.len()` and panic otherwise.
//! [`first_violation`] and [`is_valid`] check the lengths first and report a
//! mismatch as [`Violation::SizeMismatch`].

use rota_core::{DailyAssignment, History, ParticipantId};
use serde::{Deserialize, Serialize};

/// False if any participant is assigned to call themselves.
pub fn has_no_self_calls(candidate: &DailyAssignment) -> bool {
    candidate.pairs().all(|(caller, target)| caller != target)
}

/// False if two participants call each other on the same day.
pub fn has_no_mutual_calls(candidate: &DailyAssignment) -> bool {
    has_no_repeat_reverse(candidate, candidate)
}

/// False if any participant calls the same target as on `previous`.
///
/// # Panics
/// Panics if `previous` covers fewer participants than `candidate`.
pub fn has_no_repeat_direct(previous: &DailyAssignment, candidate: &DailyAssignment) -> bool {
    candidate
        .pairs()
        .all(|(caller, target)| previous.target(caller) != target)
}

/// False if any participant would call the person who called them on
/// `previous`, i.e. `previous[candidate[p]] == p`.
///
/// # Panics
/// Panics if `previous` covers fewer participants than `candidate`.
pub fn has_no_repeat_reverse(previous: &DailyAssignment, candidate: &DailyAssignment) -> bool {
    candidate
        .pairs()
        .all(|(caller, target)| previous.target(target) != caller)
}

/// Rule a rejected candidate broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "kebab-case")]
pub enum Violation {
    /// Somebody calls themselves.
    SelfCall,
    /// Two participants call each other on the same day.
    MutualCall,
    /// Somebody calls the same person as `days_ago` days earlier.
    RepeatDirect {
        /// Distance to the conflicting day (1 = previous day).
        days_ago: usize,
    },
    /// Somebody calls the person who called them `days_ago` days earlier.
    RepeatReverse {
        /// Distance to the conflicting day (1 = previous day).
        days_ago: usize,
    },
    /// The day `days_ago` days earlier covers a different number of
    /// participants than the candidate.
    SizeMismatch {
        /// Distance to the mismatched day (1 = previous day).
        days_ago: usize,
    },
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Violation::SelfCall => write!(f, "participant calls themselves"),
            Violation::MutualCall => write!(f, "two participants call each other"),
            Violation::RepeatDirect { days_ago } => {
                write!(f, "repeats a call made {days_ago} day(s) earlier")
            }
            Violation::RepeatReverse { days_ago } => {
                write!(f, "calls back a caller from {days_ago} day(s) earlier")
            }
            Violation::SizeMismatch { days_ago } => {
                write!(f, "roster size differs from the day {days_ago} day(s) earlier")
            }
        }
    }
}

/// First rule the candidate breaks, checked in the order same-day self,
/// same-day mutual, then for each of the last `min(history.len(), window)`
/// days (most recent first) size mismatch, direct repeat and reverse repeat.
pub fn first_violation(
    history: &History,
    candidate: &DailyAssignment,
    window: usize,
) -> Option<Violation> {
    if !has_no_self_calls(candidate) {
        return Some(Violation::SelfCall);
    }
    if !has_no_mutual_calls(candidate) {
        return Some(Violation::MutualCall);
    }
    for (offset, previous) in history.recent(window).enumerate() {
        let days_ago = offset + 1;
        if previous.len() != candidate.len() {
            return Some(Violation::SizeMismatch { days_ago });
        }
        if !has_no_repeat_direct(previous, candidate) {
            return Some(Violation::RepeatDirect { days_ago });
        }
        if !has_no_repeat_reverse(previous, candidate) {
            return Some(Violation::RepeatReverse { days_ago });
        }
    }
    None
}

/// True when the candidate passes every check against the trailing window.
pub fn is_valid(history: &History, candidate: &DailyAssignment, window: usize) -> bool {
    first_violation(history, candidate, window).is_none()
}

/// A violation found while auditing a finished sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceViolation {
    /// Day index of the offending assignment.
    pub day: usize,
    /// Rule it broke.
    pub violation: Violation,
}

/// Re-validates every day of `history` against the days before it.
pub fn audit_sequence(history: &History, window: usize) -> Vec<SequenceViolation> {
    let mut prefix = History::new();
    let mut found = Vec::new();
    for (day, assignment) in history.days().iter().enumerate() {
        if let Some(violation) = first_violation(&prefix, assignment, window) {
            found.push(SequenceViolation { day, violation });
        }
        prefix.push(assignment.clone());
    }
    found
}

/// Participants that break `violation` in `candidate`, as `(caller, target)`.
pub fn offending_pairs(
    history: &History,
    candidate: &DailyAssignment,
    violation: Violation,
) -> Vec<(ParticipantId, ParticipantId)> {
    let previous = match violation {
        Violation::SelfCall | Violation::MutualCall | Violation::SizeMismatch { .. } => None,
        Violation::RepeatDirect { days_ago } | Violation::RepeatReverse { days_ago } => {
            history.days().len().checked_sub(days_ago).and_then(|day| history.day(day))
        }
    };
    candidate
        .pairs()
        .filter(|&(caller, target)| match (violation, previous) {
            (Violation::SelfCall, _) => caller == target,
            (Violation::MutualCall, _) => candidate.target(target) == caller,
            (_, Some(prev)) if prev.len() != candidate.len() => false,
            (Violation::RepeatDirect { .. }, Some(prev)) => prev.target(caller) == target,
            (Violation::RepeatReverse { .. }, Some(prev)) => prev.target(target) == caller,
            _ => false,
        })
        .collect()
}
