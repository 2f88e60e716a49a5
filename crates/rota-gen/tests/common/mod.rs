#![allow(dead_code)]

use rota_core::{DailyAssignment, ParticipantId};
use rota_gen::RunConfig;

pub fn day(targets: &[usize]) -> DailyAssignment {
    DailyAssignment::from_targets(targets.iter().copied().map(ParticipantId::from_raw).collect())
        .expect("fixture must be a permutation")
}

pub fn names(count: usize) -> Vec<String> {
    (0..count).map(|idx| format!("P{idx}")).collect()
}

pub fn config(participants: usize, rounds: usize, window: usize, max_tries: usize) -> RunConfig {
    let json = serde_json::json!({
        "names": names(participants),
        "num_rounds": rounds,
        "history_length": window,
        "max_tries": max_tries,
        "random_seed": 7,
        "start_date": "2024-01-01"
    });
    RunConfig::from_json_str(&json.to_string()).expect("fixture config is valid")
}
