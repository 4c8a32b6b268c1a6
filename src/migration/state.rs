use anyhow::{Result, anyhow};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Kind of entry in the metadata table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MigrationType {
    /// An ordinary versioned SQL migration
    Sql,
    /// Marker recording the version at which metadata tracking began.
    /// Nothing below it was executed by this tool.
    Init,
}

impl MigrationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sql => "SQL",
            Self::Init => "INIT",
        }
    }
}

impl fmt::Display for MigrationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MigrationType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SQL" => Ok(Self::Sql),
            "INIT" => Ok(Self::Init),
            other => Err(anyhow!("Unknown migration type '{}'", other)),
        }
    }
}

/// Classification of a migration after available and applied migrations are merged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MigrationState {
    /// Available and not applied yet
    Pending,
    /// Available, but older than the INIT marker. It will never be applied.
    PreInit,
    /// Available and not applied, but a newer version has already been applied.
    /// Usually means migrations were checked in out of order.
    Ignored,
    /// Applied successfully but no longer available locally
    MissingSuccess,
    /// Applied with a failure and no longer available locally
    MissingFailed,
    Success,
    Failed,
    /// Applied successfully, newer than anything available locally
    FutureSuccess,
    /// Applied with a failure, newer than anything available locally
    FutureFailed,
}

impl MigrationState {
    pub const ALL: [MigrationState; 9] = [
        Self::Pending,
        Self::PreInit,
        Self::Ignored,
        Self::MissingSuccess,
        Self::MissingFailed,
        Self::Success,
        Self::Failed,
        Self::FutureSuccess,
        Self::FutureFailed,
    ];

    /// Whether this migration was applied against the database
    pub fn is_applied(&self) -> bool {
        matches!(
            self,
            Self::MissingSuccess
                | Self::MissingFailed
                | Self::Success
                | Self::Failed
                | Self::FutureSuccess
                | Self::FutureFailed
        )
    }

    /// Whether applying this migration failed
    pub fn is_failed(&self) -> bool {
        matches!(
            self,
            Self::MissingFailed | Self::Failed | Self::FutureFailed
        )
    }

    /// Short name for tables and status lines
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::PreInit => "PreInit",
            Self::Ignored => "Ignored",
            Self::MissingSuccess => "Missing",
            Self::MissingFailed => "MisFail",
            Self::Success => "Success",
            Self::Failed => "Failed",
            Self::FutureSuccess => "Future",
            Self::FutureFailed => "FutFail",
        }
    }

    /// State for an applied migration that has no local counterpart and is
    /// older than the newest available one
    pub fn missing(failed: bool) -> Self {
        if failed {
            Self::MissingFailed
        } else {
            Self::MissingSuccess
        }
    }

    /// State for an applied migration newer than anything available locally
    pub fn future(failed: bool) -> Self {
        if failed {
            Self::FutureFailed
        } else {
            Self::FutureSuccess
        }
    }
}

impl fmt::Display for MigrationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
