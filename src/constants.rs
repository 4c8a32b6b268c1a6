use std::time::Duration;

// Migration file naming: V<version>__<description>.sql
pub const MIGRATION_FILENAME_PREFIX: &str = "V";
pub const MIGRATION_FILENAME_SEPARATOR: &str = "__";
pub const MIGRATION_FILENAME_SUFFIX: &str = ".sql";

// Configuration file name
pub const CONFIG_FILENAME: &str = "migstate.yaml";

// Metadata table defaults
pub const DEFAULT_METADATA_SCHEMA: &str = "public";
pub const DEFAULT_METADATA_TABLE: &str = "schema_version";
pub const DEFAULT_INIT_DESCRIPTION: &str = "<< Init >>";

// Database connection
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
