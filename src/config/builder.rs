use crate::config::{merge::Merge, types::*};
use crate::version::MigrationVersion;
use anyhow::{Context, Result, anyhow};

pub struct ConfigBuilder {
    config_input: ConfigInput,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config_input: ConfigInput::default(),
        }
    }

    pub fn with_file(mut self, file_input: ConfigInput) -> Self {
        self.config_input = self.config_input.merge(file_input);
        self
    }

    pub fn with_cli_args(mut self, cli_input: ConfigInput) -> Self {
        self.config_input = self.config_input.merge(cli_input);
        self
    }

    pub fn resolve(self) -> Result<Config> {
        let defaults = Config::default();

        Ok(Config {
            database: self.resolve_database(&defaults.database),
            directories: self.resolve_directories(&defaults.directories),
            metadata: self.resolve_metadata(&defaults.metadata)?,
        })
    }

    fn resolve_database(&self, defaults: &Database) -> Database {
        let db_input = self.config_input.database.as_ref();

        let url = db_input
            .and_then(|d| d.url.as_ref())
            .cloned()
            .or_else(|| std::env::var("DATABASE_URL").ok())
            .or_else(|| defaults.url.clone());

        Database { url }
    }

    fn resolve_directories(&self, defaults: &Directories) -> Directories {
        let dir_input = self.config_input.directories.as_ref();

        Directories {
            migrations: dir_input
                .and_then(|d| d.migrations_dir.as_ref())
                .cloned()
                .unwrap_or_else(|| defaults.migrations.clone()),
        }
    }

    fn resolve_metadata(&self, defaults: &Metadata) -> Result<Metadata> {
        let meta_input = self.config_input.metadata.as_ref();

        let tracking_table = meta_input
            .and_then(|m| m.table.as_ref())
            .map(|t| TrackingTable {
                schema: t
                    .schema
                    .as_ref()
                    .cloned()
                    .unwrap_or_else(|| defaults.tracking_table.schema.clone()),
                name: t
                    .name
                    .as_ref()
                    .cloned()
                    .unwrap_or_else(|| defaults.tracking_table.name.clone()),
            })
            .unwrap_or_else(|| defaults.tracking_table.clone());

        let target = match meta_input.and_then(|m| m.target.as_ref()) {
            Some(target) => target
                .parse::<MigrationVersion>()
                .context("Invalid target version")?,
            None => defaults.target.clone(),
        };

        let init_version = match meta_input.and_then(|m| m.init_version.as_ref()) {
            Some(version) => version
                .parse::<MigrationVersion>()
                .context("Invalid init version")?,
            None => defaults.init_version.clone(),
        };
        if !init_version.is_numbered() {
            return Err(anyhow!(
                "Invalid init version: must be a concrete version, got '{}'",
                init_version
            ));
        }

        Ok(Metadata {
            tracking_table,
            target,
            init_version,
            init_description: meta_input
                .and_then(|m| m.init_description.as_ref())
                .cloned()
                .unwrap_or_else(|| defaults.init_description.clone()),
        })
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
