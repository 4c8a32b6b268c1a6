use super::state::{MigrationState, MigrationType};
use crate::version::MigrationVersion;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// One migration, either known from the migrations directory, recorded in the
/// metadata table, or both after merging
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationRecord {
    pub version: MigrationVersion,
    pub description: String,
    pub migration_type: MigrationType,
    pub script: String,
    pub checksum: Option<String>,
    pub installed_on: Option<DateTime<Utc>>,
    pub execution_time: Option<Duration>,
    pub state: MigrationState,
}

impl MigrationRecord {
    /// A migration resolved from its source definition and not applied yet
    pub fn available(
        version: MigrationVersion,
        description: impl Into<String>,
        script: impl Into<String>,
        checksum: Option<String>,
    ) -> Self {
        Self {
            version,
            description: description.into(),
            migration_type: MigrationType::Sql,
            script: script.into(),
            checksum,
            installed_on: None,
            execution_time: None,
            state: MigrationState::Pending,
        }
    }

    /// A migration as recorded in the metadata table
    pub fn applied(
        version: MigrationVersion,
        description: impl Into<String>,
        migration_type: MigrationType,
        installed_on: DateTime<Utc>,
        execution_time: Duration,
        success: bool,
    ) -> Self {
        Self {
            version,
            description: description.into(),
            migration_type,
            script: String::new(),
            checksum: None,
            installed_on: Some(installed_on),
            execution_time: Some(execution_time),
            state: if success {
                MigrationState::Success
            } else {
                MigrationState::Failed
            },
        }
    }

    pub fn with_script(mut self, script: impl Into<String>) -> Self {
        self.script = script.into();
        self
    }

    pub fn with_checksum(mut self, checksum: Option<String>) -> Self {
        self.checksum = checksum;
        self
    }

    /// Same migration with a new state, keeping its execution details
    pub fn reclassified(self, state: MigrationState) -> Self {
        Self { state, ..self }
    }

    /// Same migration with a new state and no execution details
    pub fn without_execution_details(self, state: MigrationState) -> Self {
        Self {
            state,
            installed_on: None,
            execution_time: None,
            ..self
        }
    }

    pub fn is_init(&self) -> bool {
        self.migration_type == MigrationType::Init
    }
}
