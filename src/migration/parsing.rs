use crate::constants::{
    MIGRATION_FILENAME_PREFIX, MIGRATION_FILENAME_SEPARATOR, MIGRATION_FILENAME_SUFFIX,
};
use crate::version::MigrationVersion;
use anyhow::{Context, Result, anyhow};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Represents a parsed migration file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedMigration {
    pub path: PathBuf,
    pub script: String,
    pub version: MigrationVersion,
    pub description: String,
}

/// Parse a migration filename like "V1_2__add_user_index.sql"
///
/// The description has underscores turned into spaces ("add user index").
pub fn parse_migration_filename(filename: &str) -> Option<(MigrationVersion, String)> {
    let name = filename
        .strip_prefix(MIGRATION_FILENAME_PREFIX)?
        .strip_suffix(MIGRATION_FILENAME_SUFFIX)?;

    let (version_str, description) = name.split_once(MIGRATION_FILENAME_SEPARATOR)?;
    if description.is_empty() {
        return None;
    }

    // The prefix is stripped once; the version itself must start with a digit
    if !version_str.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    let version = version_str.parse::<MigrationVersion>().ok()?;

    Some((version, description.replace('_', " ")))
}

/// Find all migration files in a directory and return them sorted by version
///
/// Two files resolving to the same version are rejected.
pub fn discover_migrations(migrations_dir: &Path) -> Result<Vec<ParsedMigration>> {
    let mut migrations = Vec::new();

    if !migrations_dir.exists() {
        return Ok(migrations);
    }

    let entries = std::fs::read_dir(migrations_dir).with_context(|| {
        format!(
            "Failed to read migrations directory {}",
            migrations_dir.display()
        )
    })?;

    for entry in entries {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }

        let Some(filename) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        match parse_migration_filename(filename) {
            Some((version, description)) => migrations.push(ParsedMigration {
                script: filename.to_string(),
                path,
                version,
                description,
            }),
            None => debug!("Skipping {} (not a versioned migration)", filename),
        }
    }

    migrations.sort_by(|a, b| a.version.cmp(&b.version));

    if let Some(pair) = migrations.windows(2).find(|w| w[0].version == w[1].version) {
        return Err(anyhow!(
            "Found more than one migration with version {}: {} and {}",
            pair[0].version,
            pair[0].script,
            pair[1].script
        ));
    }

    Ok(migrations)
}

/// Calculate checksum for migration content
pub fn calculate_checksum(content: &str) -> String {
    format!("{:x}", md5::compute(content))
}
