#![deny(missing_docs)]
#![doc = "Core data model for the call rota: participants, daily call assignments, history, errors and seeding."]

pub mod errors;
pub mod rng;
mod types;

pub use errors::{ErrorInfo, RotaError};
pub use rng::{resolve_seed, RngHandle, SeedSource};
pub use types::{DailyAssignment, History, ParticipantId, Roster};
