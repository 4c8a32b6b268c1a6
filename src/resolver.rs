use crate::migration::{MigrationRecord, calculate_checksum, discover_migrations};
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{debug, warn};

/// Source of the migrations available to run
pub trait MigrationResolver {
    /// Resolve available migrations, ascending by version without duplicates
    fn resolve_migrations(&self) -> Result<Vec<MigrationRecord>>;
}

/// Resolves `V<version>__<description>.sql` files from a single directory
#[derive(Debug, Clone)]
pub struct FileSystemResolver {
    migrations_dir: PathBuf,
}

impl FileSystemResolver {
    pub fn new(migrations_dir: impl Into<PathBuf>) -> Self {
        Self {
            migrations_dir: migrations_dir.into(),
        }
    }
}

impl MigrationResolver for FileSystemResolver {
    fn resolve_migrations(&self) -> Result<Vec<MigrationRecord>> {
        if !self.migrations_dir.exists() {
            warn!(
                "Migrations directory {} does not exist",
                self.migrations_dir.display()
            );
            return Ok(Vec::new());
        }

        let migrations = discover_migrations(&self.migrations_dir)?;
        debug!(
            "Resolved {} migrations from {}",
            migrations.len(),
            self.migrations_dir.display()
        );

        migrations
            .into_iter()
            .map(|migration| {
                let sql = std::fs::read_to_string(&migration.path).with_context(|| {
                    format!(
                        "Failed to read migration file: {}",
                        migration.path.display()
                    )
                })?;

                Ok(MigrationRecord::available(
                    migration.version,
                    migration.description,
                    migration.script,
                    Some(calculate_checksum(&sql)),
                ))
            })
            .collect()
    }
}

impl MigrationResolver for Vec<MigrationRecord> {
    fn resolve_migrations(&self) -> Result<Vec<MigrationRecord>> {
        Ok(self.clone())
    }
}
