//! Relational catalog facts.

use serde::{Deserialize, Serialize};

/// Raw metadata for one relational table column, as read from the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Column name (`user_id`).
    pub name: String,
    /// Native type name (`varchar`, `tinyint`).
    pub data_type: String,
    /// Full native type including length, precision and modifiers
    /// (`varchar(255)`, `int(10) unsigned`).
    pub column_type: String,
    pub nullable: bool,
    pub default: Option<String>,
    pub primary_key: bool,
    pub auto_increment: bool,
    pub comment: String,
    pub max_length: Option<u64>,
    pub numeric_scale: Option<u64>,
}

impl ColumnDescriptor {
    /// Convenience constructor for a column whose full type equals its type name.
    pub fn new(name: impl Into<String>, column_type: impl Into<String>) -> Self {
        let column_type = column_type.into();
        let data_type = column_type
            .split(|c: char| c == '(' || c.is_whitespace())
            .next()
            .unwrap_or_default()
            .to_lowercase();
        Self {
            name: name.into(),
            data_type,
            column_type,
            ..Self::default()
        }
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    pub fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }

    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }
}

/// A table's comment and ordered columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    pub name: String,
    pub comment: String,
    pub columns: Vec<ColumnDescriptor>,
}

/// One row of a table listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSummary {
    pub name: String,
    pub comment: String,
}
