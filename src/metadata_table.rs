use crate::config::types::TrackingTable;
use crate::migration::{MigrationRecord, MigrationType};
use crate::version::MigrationVersion;
use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::time::Duration;
use tracing::{debug, info};

/// Source of the migrations already applied to a database
pub trait MetadataTable {
    /// All applied migrations in the order they were applied, oldest first.
    /// Never sorted by version.
    fn all_applied_migrations(
        &self,
    ) -> impl Future<Output = Result<Vec<MigrationRecord>>> + Send;
}

impl MetadataTable for Vec<MigrationRecord> {
    async fn all_applied_migrations(&self) -> Result<Vec<MigrationRecord>> {
        Ok(self.clone())
    }
}

/// Safely format a schema-qualified table name for SQL queries
/// This prevents SQL injection by properly escaping SQL identifiers
pub fn format_tracking_table_name(tracking_table: &TrackingTable) -> Result<String> {
    // Allow alphanumeric, underscore, and dollar sign (PostgreSQL identifier rules)
    fn is_valid_sql_identifier(name: &str) -> bool {
        let mut chars = name.chars();
        match chars.next() {
            Some(first) if first.is_alphabetic() || first == '_' => {
                chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
            }
            _ => false,
        }
    }

    if !is_valid_sql_identifier(&tracking_table.schema) {
        return Err(anyhow!(
            "Invalid schema name '{}': must contain only letters, numbers, underscores, and dollar signs, starting with letter or underscore",
            tracking_table.schema
        ));
    }

    if !is_valid_sql_identifier(&tracking_table.name) {
        return Err(anyhow!(
            "Invalid table name '{}': must contain only letters, numbers, underscores, and dollar signs, starting with letter or underscore",
            tracking_table.name
        ));
    }

    Ok(format!(
        r#""{}"."{}""#,
        tracking_table.schema, tracking_table.name
    ))
}

/// One row of the metadata table
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AppliedRow {
    pub installed_rank: i32,
    pub version: String,
    pub description: String,
    #[sqlx(rename = "type")]
    pub migration_type: String,
    pub script: String,
    pub checksum: Option<String>,
    pub installed_on: DateTime<Utc>,
    /// Milliseconds
    pub execution_time: i32,
    pub success: bool,
}

impl TryFrom<AppliedRow> for MigrationRecord {
    type Error = anyhow::Error;

    fn try_from(row: AppliedRow) -> Result<Self> {
        let version = row.version.parse::<MigrationVersion>().with_context(|| {
            format!(
                "Corrupted metadata row (installed_rank {})",
                row.installed_rank
            )
        })?;
        let migration_type = row.migration_type.parse::<MigrationType>()?;
        let execution_millis = u64::try_from(row.execution_time).map_err(|_| {
            anyhow!(
                "Negative execution time {} for migration {} in metadata table",
                row.execution_time,
                row.version
            )
        })?;

        Ok(MigrationRecord::applied(
            version,
            row.description,
            migration_type,
            row.installed_on,
            Duration::from_millis(execution_millis),
            row.success,
        )
        .with_script(row.script)
        .with_checksum(row.checksum))
    }
}

/// Statements run by `init`, in order, inside one transaction: the exclusive
/// lock blocks other writers (and other `init` runs) until commit, so the
/// emptiness check still holds when the marker is inserted.
fn init_statements(table_name: &str) -> [String; 3] {
    [
        format!("LOCK TABLE {} IN EXCLUSIVE MODE", table_name),
        format!("SELECT COUNT(*) FROM {}", table_name),
        format!(
            "INSERT INTO {} (version, description, type, script, checksum, execution_time, success) \
             VALUES ($1, $2, $3, $4, NULL, 0, TRUE)",
            table_name
        ),
    ]
}

/// Metadata table stored in PostgreSQL
#[derive(Debug, Clone)]
pub struct PgMetadataTable {
    pool: PgPool,
    tracking_table: TrackingTable,
}

impl PgMetadataTable {
    pub fn new(pool: PgPool, tracking_table: TrackingTable) -> Self {
        Self {
            pool,
            tracking_table,
        }
    }

    pub async fn exists(&self) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM information_schema.tables \
             WHERE table_schema = $1 AND table_name = $2)",
        )
        .bind(&self.tracking_table.schema)
        .bind(&self.tracking_table.name)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    /// Create the metadata table if it does not exist yet
    pub async fn ensure_exists(&self) -> Result<()> {
        let table_name = format_tracking_table_name(&self.tracking_table)?;

        sqlx::query(&format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                installed_rank SERIAL PRIMARY KEY,
                version TEXT NOT NULL UNIQUE,
                description TEXT NOT NULL,
                type TEXT NOT NULL,
                script TEXT NOT NULL,
                checksum TEXT,
                installed_by TEXT NOT NULL DEFAULT CURRENT_USER,
                installed_on TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT CURRENT_TIMESTAMP,
                execution_time INTEGER NOT NULL,
                success BOOLEAN NOT NULL
            )
            "#,
            table_name
        ))
        .execute(&self.pool)
        .await
        .with_context(|| format!("Failed to create metadata table {}", table_name))?;

        Ok(())
    }

    /// Record the INIT marker. Only allowed on an empty metadata table.
    pub async fn init(&self, version: &MigrationVersion, description: &str) -> Result<()> {
        if !version.is_numbered() {
            return Err(anyhow!(
                "Unable to initialize metadata table with version {}: must be a concrete version",
                version
            ));
        }

        let table_name = format_tracking_table_name(&self.tracking_table)?;
        self.ensure_exists().await?;

        let [lock_sql, count_sql, insert_sql] = init_statements(&table_name);
        let mut tx = self.pool.begin().await?;

        sqlx::query(&lock_sql)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("Failed to lock metadata table {}", table_name))?;

        let count: i64 = sqlx::query_scalar(&count_sql).fetch_one(&mut *tx).await?;

        if count > 0 {
            tx.rollback().await?;
            return Err(anyhow!(
                "Unable to initialize metadata table {} with version {}: it already contains {} applied migration(s)",
                table_name,
                version,
                count
            ));
        }

        sqlx::query(&insert_sql)
            .bind(version.to_string())
            .bind(description)
            .bind(MigrationType::Init.as_str())
            .bind(description)
            .execute(&mut *tx)
            .await
            .with_context(|| {
                format!("Failed to record init marker {} in {}", version, table_name)
            })?;

        tx.commit().await?;

        info!("Initialized metadata table {} at version {}", table_name, version);
        Ok(())
    }
}

impl MetadataTable for PgMetadataTable {
    async fn all_applied_migrations(&self) -> Result<Vec<MigrationRecord>> {
        let table_name = format_tracking_table_name(&self.tracking_table)?;

        if !self.exists().await? {
            debug!("Metadata table {} does not exist yet", table_name);
            return Ok(Vec::new());
        }

        let rows: Vec<AppliedRow> = sqlx::query_as(&format!(
            "SELECT installed_rank, version, description, type, script, checksum, \
             installed_on, execution_time, success \
             FROM {} ORDER BY installed_rank",
            table_name
        ))
        .fetch_all(&self.pool)
        .await
        .with_context(|| format!("Failed to read applied migrations from {}", table_name))?;

        debug!("Loaded {} applied migrations from {}", rows.len(), table_name);

        rows.into_iter().map(MigrationRecord::try_from).collect()
    }
}
