pub mod commands;
pub mod config;
pub mod constants;
pub mod db;
pub mod info;
pub mod metadata_table;
pub mod migration;
pub mod output;
pub mod resolver;
pub mod version;

pub use info::{InfoAggregator, MigrationInfos, merge_available_and_applied};
pub use migration::{MigrationRecord, MigrationState, MigrationType};
pub use version::MigrationVersion;
