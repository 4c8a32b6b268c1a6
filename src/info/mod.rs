pub mod aggregator;

pub use aggregator::{InfoAggregator, merge_available_and_applied};

use crate::migration::{MigrationRecord, MigrationState};

/// Merged and classified view of all migrations, ascending by version
#[derive(Debug, Clone, Default)]
pub struct MigrationInfos {
    migrations: Vec<MigrationRecord>,
}

/// Something about a migration that needs attention before migrating further
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anomaly {
    pub version: String,
    pub state: MigrationState,
    pub message: String,
}

impl MigrationInfos {
    pub fn new(migrations: Vec<MigrationRecord>) -> Self {
        Self { migrations }
    }

    pub fn all(&self) -> &[MigrationRecord] {
        &self.migrations
    }

    pub fn is_empty(&self) -> bool {
        self.migrations.is_empty()
    }

    /// The applied migration with the highest version, if any
    pub fn current(&self) -> Option<&MigrationRecord> {
        self.migrations.iter().rev().find(|m| m.state.is_applied())
    }

    pub fn pending(&self) -> impl Iterator<Item = &MigrationRecord> {
        self.migrations
            .iter()
            .filter(|m| m.state == MigrationState::Pending)
    }

    pub fn applied(&self) -> impl Iterator<Item = &MigrationRecord> {
        self.migrations.iter().filter(|m| m.state.is_applied())
    }

    /// Failed and ignored migrations, in version order
    pub fn validate(&self) -> Vec<Anomaly> {
        self.migrations
            .iter()
            .filter_map(|m| {
                let message = if m.state.is_failed() {
                    format!(
                        "Detected failed migration to version {} ({})",
                        m.version, m.description
                    )
                } else if m.state == MigrationState::Ignored {
                    format!(
                        "Detected ignored migration {} ({}): a newer version was applied before it",
                        m.version, m.description
                    )
                } else {
                    return None;
                };

                Some(Anomaly {
                    version: m.version.to_string(),
                    state: m.state,
                    message,
                })
            })
            .collect()
    }
}
