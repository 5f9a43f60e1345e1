//! Reading storage annotations back.
//!
//! Annotations are `;` separated segments: `key:value` pairs (`column`,
//! `type`, `default`, `comment`) and bare flags (`primaryKey`,
//! `autoIncrement`, `not null`).

/// A parsed storage annotation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Storage {
    pub column: Option<String>,
    pub native_type: Option<String>,
    pub primary_key: bool,
    pub auto_increment: bool,
    pub not_null: bool,
    pub default: Option<String>,
    pub comment: Option<String>,
}

impl Storage {
    /// Parse an annotation; unknown segments are ignored.
    pub fn parse(annotation: &str) -> Self {
        let mut storage = Storage::default();
        for segment in annotation.split(';').map(str::trim) {
            match segment.split_once(':') {
                Some((key, value)) => {
                    let value = value.trim().to_string();
                    match key.trim().to_ascii_lowercase().as_str() {
                        "column" => storage.column = Some(value),
                        "type" => storage.native_type = Some(value),
                        "default" => storage.default = Some(value),
                        "comment" => storage.comment = Some(value),
                        _ => {}
                    }
                }
                None => match segment.to_ascii_lowercase().as_str() {
                    "primarykey" => storage.primary_key = true,
                    "autoincrement" => storage.auto_increment = true,
                    "not null" => storage.not_null = true,
                    _ => {}
                },
            }
        }
        storage
    }
}
