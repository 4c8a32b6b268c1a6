use crate::config::types::*;
use crate::constants::{DEFAULT_INIT_DESCRIPTION, DEFAULT_METADATA_SCHEMA, DEFAULT_METADATA_TABLE};
use crate::version::MigrationVersion;

// Config and Database derive Default

impl Default for Directories {
    fn default() -> Self {
        Self {
            migrations: "migrations".to_string(),
        }
    }
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            tracking_table: TrackingTable::default(),
            target: MigrationVersion::Latest,
            init_version: MigrationVersion::from_parts(&[1]),
            init_description: DEFAULT_INIT_DESCRIPTION.to_string(),
        }
    }
}

impl Default for TrackingTable {
    fn default() -> Self {
        Self {
            schema: DEFAULT_METADATA_SCHEMA.to_string(),
            name: DEFAULT_METADATA_TABLE.to_string(),
        }
    }
}
