use crate::version::MigrationVersion;
use clap::Args;
use serde::{Deserialize, Serialize};

/// Raw configuration input - all fields Optional for merging
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ConfigInput {
    pub database: Option<DatabaseInput>,
    pub directories: Option<DirectoriesInput>,
    pub metadata: Option<MetadataInput>,
}

/// Resolved configuration with all defaults applied
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub database: Database,
    pub directories: Directories,
    pub metadata: Metadata,
}

// Database configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DatabaseInput {
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Database {
    pub url: Option<String>,
}

// Directory configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DirectoriesInput {
    pub migrations_dir: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Directories {
    pub migrations: String,
}

// Metadata table configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MetadataInput {
    pub table: Option<TrackingTableInput>,
    /// Highest version to report, "latest" for no bound
    pub target: Option<String>,
    pub init_version: Option<String>,
    pub init_description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TrackingTableInput {
    pub schema: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Metadata {
    pub tracking_table: TrackingTable,
    pub target: MigrationVersion,
    pub init_version: MigrationVersion,
    pub init_description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingTable {
    pub schema: String,
    pub name: String,
}

// CLI argument groups for command-specific options
#[derive(Debug, Clone, Default, Args)]
pub struct DatabaseArgs {
    #[arg(long, help = "Database URL")]
    pub database_url: Option<String>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct DirectoryArgs {
    #[arg(long, help = "Migrations directory path")]
    pub migrations_dir: Option<String>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct MetadataArgs {
    #[arg(long, help = "Schema holding the metadata table")]
    pub table_schema: Option<String>,

    #[arg(long, help = "Name of the metadata table")]
    pub table_name: Option<String>,

    #[arg(long, help = "Highest version to consider (e.g. 1.4, or latest)")]
    pub target: Option<String>,
}

// Conversion functions from CLI args to config input
impl From<DatabaseArgs> for DatabaseInput {
    fn from(args: DatabaseArgs) -> Self {
        Self {
            url: args.database_url,
        }
    }
}

impl From<DirectoryArgs> for DirectoriesInput {
    fn from(args: DirectoryArgs) -> Self {
        Self {
            migrations_dir: args.migrations_dir,
        }
    }
}

impl From<MetadataArgs> for MetadataInput {
    fn from(args: MetadataArgs) -> Self {
        let table = if args.table_schema.is_some() || args.table_name.is_some() {
            Some(TrackingTableInput {
                schema: args.table_schema,
                name: args.table_name,
            })
        } else {
            None
        };

        Self {
            table,
            target: args.target,
            init_version: None,
            init_description: None,
        }
    }
}
