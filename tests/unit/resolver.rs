use anyhow::Result;
use migstate::migration::calculate_checksum;
use migstate::resolver::{FileSystemResolver, MigrationResolver};
use migstate::{MigrationState, MigrationVersion};
use std::fs;
use tempfile::TempDir;

/// Flyway-style directory:
///   V1__Initial_schema.sql
///   V1_1__Add_email.sql
///   V2__Add_indexes.sql
#[test]
fn test_resolves_flyway_style_directory() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let migrations_dir = temp_dir.path().join("db/migration");
    fs::create_dir_all(&migrations_dir)?;

    fs::write(migrations_dir.join("V2__Add_indexes.sql"), "CREATE INDEX idx ON app.users (id);")?;
    fs::write(migrations_dir.join("V1__Initial_schema.sql"), "CREATE SCHEMA app;")?;
    fs::write(
        migrations_dir.join("V1_1__Add_email.sql"),
        "ALTER TABLE app.users ADD COLUMN email TEXT;",
    )?;
    fs::write(migrations_dir.join("README.md"), "# migrations")?;

    let resolver = FileSystemResolver::new(&migrations_dir);
    let migrations = resolver.resolve_migrations()?;

    assert_eq!(migrations.len(), 3);
    assert_eq!(migrations[0].version, MigrationVersion::from_parts(&[1]));
    assert_eq!(migrations[0].description, "Initial schema");
    assert_eq!(migrations[0].script, "V1__Initial_schema.sql");
    assert_eq!(migrations[1].version, MigrationVersion::from_parts(&[1, 1]));
    assert_eq!(migrations[2].version, MigrationVersion::from_parts(&[2]));

    for migration in &migrations {
        assert_eq!(migration.state, MigrationState::Pending);
        assert!(migration.installed_on.is_none());
    }

    assert_eq!(
        migrations[0].checksum.as_deref(),
        Some(calculate_checksum("CREATE SCHEMA app;").as_str())
    );

    Ok(())
}

#[test]
fn test_missing_directory_resolves_nothing() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let resolver = FileSystemResolver::new(temp_dir.path().join("migrations"));

    assert!(resolver.resolve_migrations()?.is_empty());

    Ok(())
}

#[test]
fn test_duplicate_versions_are_rejected() -> Result<()> {
    let temp_dir = TempDir::new()?;
    fs::write(temp_dir.path().join("V3__first.sql"), "SELECT 1;")?;
    fs::write(temp_dir.path().join("V3_0__second.sql"), "SELECT 2;")?;

    let err = FileSystemResolver::new(temp_dir.path())
        .resolve_migrations()
        .unwrap_err();

    let message = err.to_string();
    assert!(message.contains("V3__first.sql") || message.contains("V3_0__second.sql"));

    Ok(())
}
