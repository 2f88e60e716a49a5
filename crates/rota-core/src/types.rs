use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, RotaError};

/// Identifier for a participant within a [`Roster`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ParticipantId(usize);

impl ParticipantId {
    /// Creates a new identifier from its raw index.
    pub fn from_raw(raw: usize) -> Self {
        Self(raw)
    }

    /// Returns the raw index of the identifier.
    pub fn as_raw(&self) -> usize {
        self.0
    }
}

/// Ordered, duplicate-free set of participant names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Roster {
    names: Vec<String>,
}

impl Roster {
    /// Builds a roster, rejecting fewer than two, blank, or duplicate names.
    pub fn new<I, S>(names: I) -> Result<Self, RotaError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.len() < 2 {
            return Err(RotaError::Roster(
                ErrorInfo::new("roster-too-small", "at least two participants are required")
                    .with_context("participants", names.len()),
            ));
        }
        let mut seen = BTreeSet::new();
        for (index, name) in names.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(RotaError::Roster(
                    ErrorInfo::new("roster-blank-name", "participant names must not be blank")
                        .with_context("index", index),
                ));
            }
            if !seen.insert(name.as_str()) {
                return Err(RotaError::Roster(
                    ErrorInfo::new("roster-duplicate-name", "participant names must be unique")
                        .with_context("name", name.clone()),
                ));
            }
        }
        Ok(Self { names })
    }

    /// Number of participants.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always false for a constructed roster; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Returns the participant identifiers in roster order.
    pub fn ids(&self) -> impl ExactSizeIterator<Item = ParticipantId> + '_ {
        (0..self.names.len()).map(ParticipantId)
    }

    /// Returns the name of a participant.
    ///
    /// # Panics
    /// Panics if `id` does not belong to this roster.
    pub fn name(&self, id: ParticipantId) -> &str {
        &self.names[id.0]
    }

    /// Looks a participant up by name.
    pub fn find(&self, name: &str) -> Option<ParticipantId> {
        self.names.iter().position(|n| n == name).map(ParticipantId)
    }

    /// Names in roster order.
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

impl TryFrom<Vec<String>> for Roster {
    type Error = RotaError;

    fn try_from(names: Vec<String>) -> Result<Self, Self::Error> {
        Roster::new(names)
    }
}

impl From<Roster> for Vec<String> {
    fn from(roster: Roster) -> Self {
        roster.names
    }
}

/// One day of calls: participant `p` calls `targets[p]`.
///
/// Construction guarantees the mapping is a bijection over the roster. The
/// no-self-call and no-mutual-call rules are checked by the validator, not
/// here, so rejected candidates can still be represented. Deserializing goes
/// through [`DailyAssignment::from_targets`] as well.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<ParticipantId>", into = "Vec<ParticipantId>")]
pub struct DailyAssignment {
    targets: Vec<ParticipantId>,
}

impl DailyAssignment {
    /// Builds an assignment, verifying that every participant is called
    /// exactly once.
    pub fn from_targets(targets: Vec<ParticipantId>) -> Result<Self, RotaError> {
        let mut seen = vec![false; targets.len()];
        for (caller, target) in targets.iter().enumerate() {
            let slot = seen.get_mut(target.0).ok_or_else(|| {
                RotaError::Roster(
                    ErrorInfo::new("assignment-out-of-range", "target is not on the roster")
                        .with_context("caller", caller)
                        .with_context("target", target.0),
                )
            })?;
            if std::mem::replace(slot, true) {
                return Err(RotaError::Roster(
                    ErrorInfo::new("assignment-not-bijective", "participant called twice")
                        .with_context("target", target.0),
                ));
            }
        }
        Ok(Self { targets })
    }

    /// Builds an assignment from a permutation produced by the generator.
    ///
    /// The caller guarantees `targets` is a permutation of `0..targets.len()`.
    pub fn from_permutation_unchecked(targets: Vec<ParticipantId>) -> Self {
        debug_assert!(Self::from_targets(targets.clone()).is_ok());
        Self { targets }
    }

    /// Number of participants covered by the assignment.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// True when the assignment covers nobody.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Who `caller` calls on this day.
    pub fn target(&self, caller: ParticipantId) -> ParticipantId {
        self.targets[caller.0]
    }

    /// `(caller, target)` pairs in caller order.
    pub fn pairs(&self) -> impl ExactSizeIterator<Item = (ParticipantId, ParticipantId)> + '_ {
        self.targets
            .iter()
            .enumerate()
            .map(|(caller, &target)| (ParticipantId(caller), target))
    }

    /// Raw target slice indexed by caller.
    pub fn targets(&self) -> &[ParticipantId] {
        &self.targets
    }
}

impl TryFrom<Vec<ParticipantId>> for DailyAssignment {
    type Error = RotaError;

    fn try_from(targets: Vec<ParticipantId>) -> Result<Self, Self::Error> {
        DailyAssignment::from_targets(targets)
    }
}

impl From<DailyAssignment> for Vec<ParticipantId> {
    fn from(assignment: DailyAssignment) -> Self {
        assignment.targets
    }
}

/// Append-only, chronologically ordered record of accepted assignments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct History {
    days: Vec<DailyAssignment>,
}

impl History {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the assignment for the next day.
    pub fn push(&mut self, assignment: DailyAssignment) {
        self.days.push(assignment);
    }

    /// Number of recorded days.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// True when no day has been recorded.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Assignment recorded for `day`, if any.
    pub fn day(&self, day: usize) -> Option<&DailyAssignment> {
        self.days.get(day)
    }

    /// All days in chronological order.
    pub fn days(&self) -> &[DailyAssignment] {
        &self.days
    }

    /// Up to `window` most recent days, most recent first.
    pub fn recent(&self, window: usize) -> impl Iterator<Item = &DailyAssignment> + '_ {
        self.days.iter().rev().take(window)
    }

    /// History truncated to its first `len` days.
    pub fn prefix(&self, len: usize) -> History {
        History {
            days: self.days[..len.min(self.days.len())].to_vec(),
        }
    }
}

impl FromIterator<DailyAssignment> for History {
    fn from_iter<T: IntoIterator<Item = DailyAssignment>>(iter: T) -> Self {
        Self {
            days: iter.into_iter().collect(),
        }
    }
}
