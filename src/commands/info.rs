use crate::config::Config;
use crate::db::connect_with_retry;
use crate::info::{InfoAggregator, MigrationInfos};
use crate::metadata_table::PgMetadataTable;
use crate::output::{OutputFormat, format_info_output};
use crate::resolver::FileSystemResolver;
use anyhow::{Result, anyhow};
use std::path::Path;
use tracing::debug;

/// Resolve available migrations, read applied ones and merge them
pub async fn load_migration_infos(config: &Config, root_dir: &Path) -> Result<MigrationInfos> {
    let database_url = config.database.url.as_ref().ok_or_else(|| {
        anyhow!(
            "No database specified.\n\n\
             Provide one of:\n\n\
             • migstate info --database-url postgres://host/db\n\
             • export DATABASE_URL=postgres://host/db\n\
             • Add 'database: {{ url: ... }}' to migstate.yaml"
        )
    })?;

    let migrations_dir = root_dir.join(&config.directories.migrations);
    debug!("Resolving migrations from {}", migrations_dir.display());

    let pool = connect_with_retry(database_url).await?;
    let metadata_table = PgMetadataTable::new(pool.clone(), config.metadata.tracking_table.clone());
    let aggregator = InfoAggregator::new(
        FileSystemResolver::new(migrations_dir),
        metadata_table,
        config.metadata.target.clone(),
    );

    let infos = aggregator.aggregate_migration_info().await;
    pool.close().await;
    infos
}

pub async fn cmd_info(config: &Config, root_dir: &Path, format: OutputFormat) -> Result<()> {
    let infos = load_migration_infos(config, root_dir).await?;
    println!("{}", format_info_output(&infos, format)?);
    Ok(())
}
