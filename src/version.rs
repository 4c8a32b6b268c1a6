use anyhow::{Result, anyhow};
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Position of a migration in the sequence.
///
/// `Empty` sorts before every real version and stands for "no migrations".
/// `Latest` sorts after every real version and is the default target.
#[derive(Debug, Clone)]
pub enum MigrationVersion {
    Empty,
    Numbered {
        /// Numeric parts with trailing zeros removed, used for comparison
        parts: Vec<u64>,
        /// The version as it was written, used for display
        raw: String,
    },
    Latest,
}

impl MigrationVersion {
    /// Build a numbered version from its parts (e.g. `[1, 2]` for `1.2`)
    pub fn from_parts(parts: &[u64]) -> Self {
        let raw = parts
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(".");
        Self::Numbered {
            parts: normalize(parts.to_vec()),
            raw,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn is_latest(&self) -> bool {
        matches!(self, Self::Latest)
    }

    /// A real version that can be stored and read back, as opposed to a sentinel
    pub fn is_numbered(&self) -> bool {
        matches!(self, Self::Numbered { .. })
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Empty => 0,
            Self::Numbered { .. } => 1,
            Self::Latest => 2,
        }
    }
}

fn normalize(mut parts: Vec<u64>) -> Vec<u64> {
    while parts.last() == Some(&0) {
        parts.pop();
    }
    parts
}

impl FromStr for MigrationVersion {
    type Err = anyhow::Error;

    /// Parse versions like "1", "1.2.3", "V1_2" or "latest"
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();

        if trimmed.eq_ignore_ascii_case("latest") {
            return Ok(Self::Latest);
        }

        let without_prefix = trimmed
            .strip_prefix('V')
            .or_else(|| trimmed.strip_prefix('v'))
            .unwrap_or(trimmed);

        if without_prefix.is_empty() {
            return Err(anyhow!("Invalid migration version '{}': version is empty", s));
        }

        let raw = without_prefix.replace('_', ".");
        let parts = raw
            .split('.')
            .map(|part| {
                part.parse::<u64>().map_err(|_| {
                    anyhow!(
                        "Invalid migration version '{}': '{}' is not a non-negative integer",
                        s,
                        part
                    )
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::Numbered {
            parts: normalize(parts),
            raw,
        })
    }
}

impl fmt::Display for MigrationVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "<< Empty >>"),
            Self::Numbered { raw, .. } => write!(f, "{}", raw),
            Self::Latest => write!(f, "<< Latest >>"),
        }
    }
}

impl Ord for MigrationVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Numbered { parts: a, .. }, Self::Numbered { parts: b, .. }) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for MigrationVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for MigrationVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for MigrationVersion {}

impl Hash for MigrationVersion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank().hash(state);
        if let Self::Numbered { parts, .. } = self {
            parts.hash(state);
        }
    }
}

impl Serialize for MigrationVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
