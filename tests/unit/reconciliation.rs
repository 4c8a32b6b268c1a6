//! Merging available and applied migrations into one classified view.

use crate::helpers::migration::{applied, available, init_marker, states, v};
use migstate::MigrationState::*;
use migstate::{MigrationRecord, MigrationState, MigrationVersion, merge_available_and_applied};
use rstest::rstest;
use std::collections::BTreeSet;

fn expected(entries: &[(&str, MigrationState)]) -> Vec<(String, MigrationState)> {
    entries
        .iter()
        .map(|(version, state)| (version.to_string(), *state))
        .collect()
}

#[rstest]
#[case::nothing_applied(
    vec![available("1", "a"), available("2", "b"), available("3", "c")],
    vec![],
    "3",
    &[("1", Pending), ("2", Pending), ("3", Pending)]
)]
#[case::gap_is_ignored(
    vec![available("1", "a"), available("2", "b"), available("3", "c")],
    vec![applied("1", "a", 1, true), applied("3", "c", 2, true)],
    "3",
    &[("1", Success), ("2", Ignored), ("3", Success)]
)]
#[case::removed_locally_is_missing(
    vec![available("2", "b"), available("3", "c")],
    vec![applied("1", "a", 1, true)],
    "3",
    &[("1", MissingSuccess), ("2", Pending), ("3", Pending)]
)]
#[case::init_marker_baselines_older_versions(
    vec![available("1", "a"), available("2", "b"), available("3", "c"), available("4", "d")],
    vec![init_marker("2"), applied("3", "c", 1, true)],
    "4",
    &[("1", PreInit), ("2", Success), ("3", Success), ("4", Pending)]
)]
#[case::newer_than_anything_available_is_future(
    vec![available("1", "a")],
    vec![applied("5", "e", 1, true)],
    "5",
    &[("1", Ignored), ("5", FutureSuccess)]
)]
fn test_reconciliation_scenarios(
    #[case] available_migrations: Vec<MigrationRecord>,
    #[case] applied_migrations: Vec<MigrationRecord>,
    #[case] target: &str,
    #[case] expected_states: &[(&str, MigrationState)],
) {
    let result = merge_available_and_applied(&available_migrations, &applied_migrations, &v(target));
    assert_eq!(states(&result), expected(expected_states));
}

/// Applied order, not version order, decides the baseline and the ignore boundary.
#[test]
fn test_chronological_order_is_not_version_order() {
    let available_migrations = vec![available("1", "a"), available("2", "b"), available("3", "c")];

    // 3 was applied first, then 1 (out of order hotfix)
    let applied_migrations = vec![applied("3", "c", 1, true), applied("1", "a", 2, true)];

    let result = merge_available_and_applied(
        &available_migrations,
        &applied_migrations,
        &MigrationVersion::Latest,
    );

    // Last applied is 1, so 2 stays pending even though 3 is applied
    assert_eq!(
        states(&result),
        expected(&[("1", Success), ("2", Pending), ("3", Success)])
    );
}

#[test]
fn test_preinit_has_no_execution_details() {
    // 1 was applied before tracking was re-initialized at 2
    let result = merge_available_and_applied(
        &[available("1", "a"), available("2", "b")],
        &[init_marker("2")],
        &MigrationVersion::Latest,
    );

    assert_eq!(result[0].state, PreInit);
    assert!(result[0].installed_on.is_none());
    assert!(result[0].execution_time.is_none());
}

#[test]
fn test_applied_precedence_keeps_recorded_details() {
    let applied_v1 = applied("1", "a", 7, false);
    let result = merge_available_and_applied(
        &[available("1", "a")],
        std::slice::from_ref(&applied_v1),
        &MigrationVersion::Latest,
    );

    assert_eq!(result[0].state, Failed);
    assert_eq!(result[0].installed_on, applied_v1.installed_on);
    assert_eq!(result[0].execution_time, applied_v1.execution_time);
}

fn mixed_inputs() -> (Vec<MigrationRecord>, Vec<MigrationRecord>) {
    let available_migrations = vec![
        available("1", "a"),
        available("1.1", "a fix"),
        available("2", "b"),
        available("4", "d"),
        available("6", "f"),
    ];
    let applied_migrations = vec![
        init_marker("1.1"),
        applied("2", "b", 1, true),
        applied("3", "c", 2, false),
        applied("7", "g", 3, true),
        applied("5", "e", 4, true),
    ];
    (available_migrations, applied_migrations)
}

#[test]
fn test_union_of_versions_each_exactly_once() {
    let (available_migrations, applied_migrations) = mixed_inputs();

    let result = merge_available_and_applied(
        &available_migrations,
        &applied_migrations,
        &MigrationVersion::Latest,
    );

    let expected_versions: BTreeSet<MigrationVersion> = available_migrations
        .iter()
        .chain(&applied_migrations)
        .map(|m| m.version.clone())
        .collect();
    let result_versions: Vec<MigrationVersion> = result.iter().map(|m| m.version.clone()).collect();

    assert_eq!(result.len(), expected_versions.len());
    assert_eq!(
        result_versions,
        expected_versions.into_iter().collect::<Vec<_>>()
    );

    // Strictly ascending
    assert!(result.windows(2).all(|w| w[0].version < w[1].version));

    assert_eq!(
        states(&result),
        expected(&[
            ("1", PreInit),
            ("1.1", Success),
            ("2", Success),
            ("3", MissingFailed),
            ("4", Ignored),
            ("5", MissingSuccess),
            ("6", Pending),
            ("7", FutureSuccess),
        ])
    );
}

#[test]
fn test_raising_target_only_adds_versions() {
    let (available_migrations, applied_migrations) = mixed_inputs();

    let lower = merge_available_and_applied(&available_migrations, &applied_migrations, &v("3"));
    let higher = merge_available_and_applied(&available_migrations, &applied_migrations, &v("6"));

    assert!(lower.iter().all(|m| m.version <= v("3")));
    assert!(higher.iter().all(|m| m.version <= v("6")));

    let higher_restricted: Vec<_> = higher
        .into_iter()
        .filter(|m| m.version <= v("3"))
        .collect();
    assert_eq!(lower, higher_restricted);
}

#[test]
fn test_ignored_only_below_last_applied() {
    let (available_migrations, applied_migrations) = mixed_inputs();
    let last_applied = applied_migrations.last().unwrap().version.clone();

    let result = merge_available_and_applied(
        &available_migrations,
        &applied_migrations,
        &MigrationVersion::Latest,
    );

    for migration in &result {
        if migration.state == Pending {
            assert!(migration.version > last_applied);
        }
        if migration.state == Ignored {
            assert!(migration.version < last_applied);
        }
    }
}
