use crate::info::{Anomaly, MigrationInfos};
use crate::migration::{MigrationRecord, MigrationState, MigrationType};
use anyhow::Result;
use console::{StyledObject, style};
use itertools::Itertools;
use serde::Serialize;

/// Output format for commands that print migration info
#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Human,
    /// JSON output for scripts and CI
    Json,
}

/// JSON output structure for `info`
#[derive(Debug, Serialize)]
pub struct InfoJsonOutput {
    pub current_version: Option<String>,
    pub pending_count: usize,
    pub migrations: Vec<MigrationJson>,
}

#[derive(Debug, Serialize)]
pub struct MigrationJson {
    pub version: String,
    pub description: String,
    #[serde(rename = "type")]
    pub migration_type: MigrationType,
    pub state: MigrationState,
    /// RFC 3339 timestamp
    pub installed_on: Option<String>,
    pub execution_time_ms: Option<u64>,
}

impl From<&MigrationRecord> for MigrationJson {
    fn from(m: &MigrationRecord) -> Self {
        Self {
            version: m.version.to_string(),
            description: m.description.clone(),
            migration_type: m.migration_type,
            state: m.state,
            installed_on: m.installed_on.map(|t| t.to_rfc3339()),
            // Stored as an i32 of milliseconds, so this never truncates
            execution_time_ms: m.execution_time.map(|d| d.as_millis() as u64),
        }
    }
}

/// Format migration info based on the requested output format
pub fn format_info_output(infos: &MigrationInfos, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let output = InfoJsonOutput {
                current_version: infos.current().map(|m| m.version.to_string()),
                pending_count: infos.pending().count(),
                migrations: infos.all().iter().map(MigrationJson::from).collect(),
            };
            Ok(serde_json::to_string_pretty(&output)?)
        }
        OutputFormat::Human => Ok(format_info_table(infos, console::colors_enabled())),
    }
}

/// Render migration info as a table, one row per version
pub fn format_info_table(infos: &MigrationInfos, colored: bool) -> String {
    if infos.is_empty() {
        return "No migrations found".to_string();
    }

    let header = ["Version", "Description", "Installed on", "State"];
    let rows: Vec<[String; 4]> = infos
        .all()
        .iter()
        .map(|m| {
            [
                m.version.to_string(),
                m.description.clone(),
                m.installed_on
                    .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
                    .unwrap_or_default(),
                m.state.display_name().to_string(),
            ]
        })
        .collect();

    let widths: Vec<usize> = (0..header.len())
        .map(|col| {
            rows.iter()
                .map(|row| row[col].chars().count())
                .chain(std::iter::once(header[col].len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut lines = vec![
        pad_row(&header, &widths),
        widths.iter().map(|w| "-".repeat(*w)).join("-+-"),
    ];

    for (row, migration) in rows.iter().zip(infos.all()) {
        let line = pad_row(&[row[0].as_str(), row[1].as_str(), row[2].as_str(), ""], &widths);
        let state = if colored {
            state_style(migration.state).to_string()
        } else {
            row[3].clone()
        };
        lines.push(format!("{}{}", line, state));
    }

    lines.join("\n")
}

/// Pad every cell but the last to its column width
fn pad_row(cells: &[&str], widths: &[usize]) -> String {
    cells
        .iter()
        .enumerate()
        .map(|(col, cell)| {
            if col + 1 == cells.len() {
                cell.to_string()
            } else {
                format!("{:<width$}", cell, width = widths[col])
            }
        })
        .join(" | ")
}

fn state_style(state: MigrationState) -> StyledObject<&'static str> {
    let styled = style(state.display_name());
    match state {
        MigrationState::Success => styled.green(),
        MigrationState::Pending | MigrationState::Ignored => styled.yellow(),
        MigrationState::Failed => styled.red().bold(),
        MigrationState::MissingFailed | MigrationState::FutureFailed => styled.red(),
        MigrationState::PreInit
        | MigrationState::MissingSuccess
        | MigrationState::FutureSuccess => styled.dim(),
    }
}

/// Render the result of `validate`
pub fn format_anomalies(anomalies: &[Anomaly]) -> String {
    if anomalies.is_empty() {
        return "No failed or ignored migrations found".to_string();
    }

    anomalies
        .iter()
        .map(|a| format!("{} {}", style("✗").red(), a.message))
        .join("\n")
}
