use chrono::{DateTime, TimeZone, Utc};
use migstate::{MigrationRecord, MigrationState, MigrationType, MigrationVersion};
use std::time::Duration;

pub fn v(version: &str) -> MigrationVersion {
    version.parse().expect("valid test version")
}

/// Fixed timestamp so rendered output is stable
pub fn installed_on(minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, minute, 0)
        .single()
        .expect("valid test timestamp")
}

pub fn available(version: &str, description: &str) -> MigrationRecord {
    MigrationRecord::available(
        v(version),
        description,
        format!("V{}__{}.sql", version, description.replace(' ', "_")),
        None,
    )
}

pub fn applied(version: &str, description: &str, minute: u32, success: bool) -> MigrationRecord {
    MigrationRecord::applied(
        v(version),
        description,
        MigrationType::Sql,
        installed_on(minute),
        Duration::from_millis(25),
        success,
    )
}

pub fn init_marker(version: &str) -> MigrationRecord {
    MigrationRecord::applied(
        v(version),
        "<< Init >>",
        MigrationType::Init,
        installed_on(0),
        Duration::ZERO,
        true,
    )
}

pub fn states(result: &[MigrationRecord]) -> Vec<(String, MigrationState)> {
    result
        .iter()
        .map(|m| (m.version.to_string(), m.state))
        .collect()
}
