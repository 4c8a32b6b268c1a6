use crate::config::Config;
use crate::db::connect_with_retry;
use crate::metadata_table::{PgMetadataTable, format_tracking_table_name};
use anyhow::{Result, anyhow};
use dialoguer::Confirm;
use std::io::IsTerminal;

/// Record the INIT marker so migrations below it are treated as pre-existing
pub async fn cmd_init(config: &Config, assume_yes: bool) -> Result<()> {
    let database_url = config
        .database
        .url
        .as_ref()
        .ok_or_else(|| anyhow!("No database specified. Use --database-url or set DATABASE_URL"))?;

    let table_name = format_tracking_table_name(&config.metadata.tracking_table)?;
    let version = &config.metadata.init_version;

    if !assume_yes && std::io::stdin().is_terminal() {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Initialize {} at version {}? Migrations below this version will be treated as pre-existing",
                table_name, version
            ))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("Init cancelled");
            return Ok(());
        }
    }

    let pool = connect_with_retry(database_url).await?;
    let metadata_table = PgMetadataTable::new(pool.clone(), config.metadata.tracking_table.clone());
    let result = metadata_table
        .init(version, &config.metadata.init_description)
        .await;
    pool.close().await;
    result?;

    println!("Metadata table {} initialized with version {}", table_name, version);
    Ok(())
}
