//! Rendered output snapshot tests using insta
//!
//! To update snapshots after intentional changes:
//! ```bash
//! cargo insta review
//! ```

use crate::helpers::migration::{applied, available, init_marker};
use anyhow::Result;
use insta::assert_snapshot;
use migstate::output::{OutputFormat, format_anomalies, format_info_output, format_info_table};
use migstate::{MigrationInfos, MigrationVersion, merge_available_and_applied};

fn baselined_infos() -> MigrationInfos {
    MigrationInfos::new(merge_available_and_applied(
        &[
            available("1", "create users"),
            available("2", "add orders"),
            available("3", "add index"),
            available("4", "seed data"),
        ],
        &[init_marker("2"), applied("3", "add index", 5, true)],
        &MigrationVersion::Latest,
    ))
}

#[test]
fn test_snapshot_info_table() {
    let output = format_info_table(&baselined_infos(), false);

    assert_snapshot!(output, @r"
    Version | Description  | Installed on        | State
    --------+--------------+---------------------+--------
    1       | create users |                     | PreInit
    2       | << Init >>   | 2024-03-01 12:00:00 | Success
    3       | add index    | 2024-03-01 12:05:00 | Success
    4       | seed data    |                     | Pending
    ");
}

#[test]
fn test_info_json() -> Result<()> {
    let output = format_info_output(&baselined_infos(), OutputFormat::Json)?;
    let json: serde_json::Value = serde_json::from_str(&output)?;

    assert_eq!(json["current_version"], "3");
    assert_eq!(json["pending_count"], 1);

    let migrations = json["migrations"].as_array().unwrap();
    assert_eq!(migrations.len(), 4);
    assert_eq!(migrations[0]["state"], "PRE_INIT");
    assert!(migrations[0]["execution_time_ms"].is_null());
    assert_eq!(migrations[1]["type"], "INIT");
    assert_eq!(migrations[2]["installed_on"], "2024-03-01T12:05:00+00:00");
    assert_eq!(migrations[2]["execution_time_ms"], 25);

    Ok(())
}

#[test]
fn test_anomalies_listing() {
    let infos = MigrationInfos::new(merge_available_and_applied(
        &[available("1", "a"), available("2", "b"), available("3", "c")],
        &[applied("1", "a", 1, false), applied("3", "c", 2, true)],
        &MigrationVersion::Latest,
    ));

    let anomalies = infos.validate();
    assert_eq!(anomalies.len(), 2);

    let output = format_anomalies(&anomalies);
    assert!(output.contains("Detected failed migration to version 1 (a)"));
    assert!(output.contains("Detected ignored migration 2 (b)"));

    assert_eq!(
        format_anomalies(&[]),
        "No failed or ignored migrations found"
    );
}
