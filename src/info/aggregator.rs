use super::MigrationInfos;
use crate::metadata_table::MetadataTable;
use crate::migration::{MigrationRecord, MigrationState};
use crate::resolver::MigrationResolver;
use crate::version::MigrationVersion;
use anyhow::Result;
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Aggregates info about all known migrations, both available locally and
/// applied to the database
pub struct InfoAggregator<R, M> {
    resolver: R,
    metadata_table: M,
    target: MigrationVersion,
}

impl<R, M> InfoAggregator<R, M>
where
    R: MigrationResolver,
    M: MetadataTable,
{
    pub fn new(resolver: R, metadata_table: M, target: MigrationVersion) -> Self {
        Self {
            resolver,
            metadata_table,
            target,
        }
    }

    /// Pull both sources once and merge them
    pub async fn aggregate_migration_info(&self) -> Result<MigrationInfos> {
        let available = self.resolver.resolve_migrations()?;
        let applied = self.metadata_table.all_applied_migrations().await?;

        debug!(
            "Merging {} available and {} applied migrations up to {}",
            available.len(),
            applied.len(),
            self.target
        );

        Ok(MigrationInfos::new(merge_available_and_applied(
            &available,
            &applied,
            &self.target,
        )))
    }
}

/// Merge available and applied migrations into one list, ascending by version,
/// with every entry classified.
///
/// `available` must be ascending by version. `applied` must be in the order the
/// migrations were applied (oldest first): its first entry decides the INIT
/// baseline and its last entry the out-of-order boundary. Neither may contain
/// duplicate versions. Entries above `target` are dropped.
pub fn merge_available_and_applied(
    available: &[MigrationRecord],
    applied: &[MigrationRecord],
    target: &MigrationVersion,
) -> Vec<MigrationRecord> {
    let mut all: BTreeMap<MigrationVersion, MigrationRecord> = available
        .iter()
        .map(|m| {
            let pending = m.clone().without_execution_details(MigrationState::Pending);
            (m.version.clone(), pending)
        })
        .collect();

    let last_available_version = available
        .last()
        .map(|m| m.version.clone())
        .unwrap_or(MigrationVersion::Empty);

    for applied_migration in applied {
        let mut merged = applied_migration.clone();

        if !all.contains_key(&merged.version) {
            let failed = merged.state.is_failed();
            let state = if merged.version < last_available_version {
                MigrationState::missing(failed)
            } else if merged.version > last_available_version {
                MigrationState::future(failed)
            } else {
                // Equal to the last available version means it is already a key
                merged.state
            };
            trace!("{} not available locally: {}", merged.version, state);
            merged = merged.reclassified(state);
        }

        all.insert(merged.version.clone(), merged);
    }

    if let Some(init) = applied.first().filter(|m| m.is_init()) {
        for migration in all.values_mut() {
            if migration.version >= init.version {
                break;
            }
            trace!("{} predates init marker {}", migration.version, init.version);
            *migration = migration.clone().without_execution_details(MigrationState::PreInit);
        }
    }

    if let Some(last_applied) = applied.last() {
        for migration in all.values_mut() {
            if migration.version < last_applied.version
                && migration.state == MigrationState::Pending
            {
                debug!(
                    "{} was never applied but {} already is; marking ignored",
                    migration.version, last_applied.version
                );
                *migration = migration.clone().without_execution_details(MigrationState::Ignored);
            }
        }
    }

    all.into_values()
        .filter(|m| m.version <= *target)
        .collect()
}
