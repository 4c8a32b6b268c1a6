pub mod parsing;
pub mod record;
pub mod state;

pub use parsing::{ParsedMigration, calculate_checksum, discover_migrations};
pub use record::MigrationRecord;
pub use state::{MigrationState, MigrationType};
