mod common;

use common::day;
use rota_core::History;
use rota_gen::validate::{
    audit_sequence, first_violation, has_no_mutual_calls, has_no_repeat_direct,
    has_no_repeat_reverse, has_no_self_calls, is_valid, offending_pairs, SequenceViolation,
    Violation,
};
use rota_core::ParticipantId;

// A=0, B=1, C=2
const CYCLE_FORWARD: [usize; 3] = [1, 2, 0];
const CYCLE_BACKWARD: [usize; 3] = [2, 0, 1];

#[test]
fn self_calls_are_detected() {
    assert!(has_no_self_calls(&day(&CYCLE_FORWARD)));
    assert!(!has_no_self_calls(&day(&[0, 2, 1])));
}

#[test]
fn mutual_pairs_are_detected() {
    assert!(has_no_mutual_calls(&day(&CYCLE_FORWARD)));
    assert!(!has_no_mutual_calls(&day(&[1, 0, 3, 2])));
    assert!(!has_no_mutual_calls(&day(&[1, 0, 3, 4, 2])));
}

#[test]
fn direct_repeats_compare_targets_per_caller() {
    let previous = day(&[1, 2, 3, 4, 0]);
    assert!(!has_no_repeat_direct(&previous, &day(&[1, 3, 4, 0, 2])));
    assert!(has_no_repeat_direct(&previous, &day(&[2, 3, 4, 0, 1])));
}

#[test]
fn reverse_repeats_look_up_the_targets_previous_call() {
    let previous = day(&CYCLE_FORWARD);
    // C called A yesterday, so A may not call C today.
    assert!(!has_no_repeat_reverse(&previous, &day(&CYCLE_BACKWARD)));
    assert!(has_no_repeat_reverse(&previous, &day(&CYCLE_FORWARD)));
}

#[test]
fn three_participants_have_no_second_day_under_window_one() {
    let history: History = vec![day(&CYCLE_FORWARD)].into_iter().collect();
    assert_eq!(
        first_violation(&history, &day(&CYCLE_FORWARD), 1),
        Some(Violation::RepeatDirect { days_ago: 1 })
    );
    assert_eq!(
        first_violation(&history, &day(&CYCLE_BACKWARD), 1),
        Some(Violation::RepeatReverse { days_ago: 1 })
    );
}

#[test]
fn window_zero_only_applies_same_day_rules() {
    let history: History = vec![day(&CYCLE_FORWARD)].into_iter().collect();
    assert!(is_valid(&history, &day(&CYCLE_FORWARD), 0));
    assert!(!is_valid(&history, &day(&[1, 0, 2]), 0));
}

#[test]
fn window_larger_than_history_is_clamped() {
    let history: History = vec![day(&[1, 2, 3, 4, 0])].into_iter().collect();
    assert!(is_valid(&history, &day(&[2, 3, 4, 0, 1]), 50));
}

#[test]
fn older_days_outside_window_are_ignored() {
    let first = day(&[1, 2, 3, 4, 0]);
    let second = day(&[2, 3, 4, 0, 1]);
    let history: History = vec![first.clone(), second].into_iter().collect();
    assert!(is_valid(&history, &first, 1));
    assert_eq!(
        first_violation(&history, &first, 2),
        Some(Violation::RepeatDirect { days_ago: 2 })
    );
}

#[test]
fn same_day_rules_are_checked_before_history() {
    let history: History = vec![day(&[1, 0, 2])].into_iter().collect();
    assert_eq!(first_violation(&history, &day(&[1, 0, 2]), 1), Some(Violation::SelfCall));
}

#[test]
fn audit_reports_each_offending_day() {
    let ok = day(&[1, 2, 3, 4, 0]);
    let history: History = vec![ok.clone(), ok.clone(), day(&[2, 3, 4, 0, 1])]
        .into_iter()
        .collect();
    assert_eq!(
        audit_sequence(&history, 1),
        vec![SequenceViolation {
            day: 1,
            violation: Violation::RepeatDirect { days_ago: 1 },
        }]
    );
    assert!(audit_sequence(&history, 0).is_empty());
}

#[test]
fn offending_pairs_name_the_conflicting_calls() {
    let history: History = vec![day(&CYCLE_FORWARD)].into_iter().collect();
    let pairs = offending_pairs(
        &history,
        &day(&CYCLE_BACKWARD),
        Violation::RepeatReverse { days_ago: 1 },
    );
    let id = ParticipantId::from_raw;
    assert_eq!(pairs, vec![(id(0), id(2)), (id(1), id(0)), (id(2), id(1))]);
}

#[test]
fn history_of_a_different_roster_size_is_rejected() {
    let history: History = vec![day(&CYCLE_FORWARD)].into_iter().collect();
    let larger = day(&[1, 2, 3, 4, 0]);
    assert_eq!(
        first_violation(&history, &larger, 1),
        Some(Violation::SizeMismatch { days_ago: 1 })
    );
    assert!(!is_valid(&history, &larger, 1));
    assert!(is_valid(&history, &larger, 0));
    assert!(offending_pairs(&history, &larger, Violation::SizeMismatch { days_ago: 1 }).is_empty());
}
