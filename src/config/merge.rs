use crate::config::types::*;

/// Trait for merging optional configuration values
pub trait Merge<T> {
    fn merge(self, other: T) -> T;
}

impl<T> Merge<Option<T>> for Option<T> {
    fn merge(self, other: Option<T>) -> Option<T> {
        other.or(self)
    }
}

impl Merge<ConfigInput> for ConfigInput {
    fn merge(self, other: ConfigInput) -> ConfigInput {
        ConfigInput {
            database: match (self.database, other.database) {
                (None, None) => None,
                (Some(a), None) => Some(a),
                (None, Some(b)) => Some(b),
                (Some(a), Some(b)) => Some(a.merge_with(b)),
            },
            directories: match (self.directories, other.directories) {
                (None, None) => None,
                (Some(a), None) => Some(a),
                (None, Some(b)) => Some(b),
                (Some(a), Some(b)) => Some(a.merge_with(b)),
            },
            metadata: match (self.metadata, other.metadata) {
                (None, None) => None,
                (Some(a), None) => Some(a),
                (None, Some(b)) => Some(b),
                (Some(a), Some(b)) => Some(a.merge_with(b)),
            },
        }
    }
}

// Custom merge implementations for complex types
impl DatabaseInput {
    pub fn merge_with(self, other: DatabaseInput) -> DatabaseInput {
        DatabaseInput {
            url: other.url.or(self.url),
        }
    }
}

impl DirectoriesInput {
    pub fn merge_with(self, other: DirectoriesInput) -> DirectoriesInput {
        DirectoriesInput {
            migrations_dir: other.migrations_dir.or(self.migrations_dir),
        }
    }
}

impl MetadataInput {
    pub fn merge_with(self, other: MetadataInput) -> MetadataInput {
        let table = match (self.table, other.table) {
            (Some(a), Some(b)) => Some(TrackingTableInput {
                schema: b.schema.or(a.schema),
                name: b.name.or(a.name),
            }),
            (a, b) => a.merge(b),
        };

        MetadataInput {
            table,
            target: other.target.or(self.target),
            init_version: other.init_version.or(self.init_version),
            init_description: other.init_description.or(self.init_description),
        }
    }
}
