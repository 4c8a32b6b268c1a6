use crate::commands::info::load_migration_infos;
use crate::config::Config;
use crate::output::format_anomalies;
use anyhow::{Result, anyhow};
use std::path::Path;

pub async fn cmd_validate(config: &Config, root_dir: &Path) -> Result<()> {
    let infos = load_migration_infos(config, root_dir).await?;
    let anomalies = infos.validate();

    println!("{}", format_anomalies(&anomalies));

    if anomalies.is_empty() {
        Ok(())
    } else {
        Err(anyhow!(
            "Validation failed: {} migration(s) need attention",
            anomalies.len()
        ))
    }
}
