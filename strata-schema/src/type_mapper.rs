//! Relational column types to generated field types.

use strata_ir::{ColumnDescriptor, Field, TEMPORAL_TYPE, base_of_nullable, nullable_of};

/// Base target type of a column, ignoring nullability.
pub fn base_type(column: &ColumnDescriptor) -> &'static str {
    let data_type = column.data_type.to_ascii_lowercase();
    let column_type = column.column_type.to_ascii_lowercase();
    let unsigned = column_type.contains("unsigned");

    match data_type.as_str() {
        "char" | "varchar" | "tinytext" | "text" | "mediumtext" | "longtext" | "enum" | "set" => {
            "String"
        }
        "tinyint" if column_type.starts_with("tinyint(1)") => "bool",
        "tinyint" => {
            if unsigned {
                "u8"
            } else {
                "i8"
            }
        }
        "smallint" => {
            if unsigned {
                "u16"
            } else {
                "i16"
            }
        }
        "mediumint" | "int" | "integer" => {
            if unsigned {
                "u32"
            } else {
                "i32"
            }
        }
        "bigint" => {
            if unsigned {
                "u64"
            } else {
                "i64"
            }
        }
        "float" | "double" | "real" | "decimal" | "numeric" => "f64",
        "bool" | "boolean" | "bit" => "bool",
        "date" | "datetime" | "timestamp" => TEMPORAL_TYPE,
        "binary" | "varbinary" => "Vec<u8>",
        blob if blob.ends_with("blob") => "Vec<u8>",
        _ => "String",
    }
}

/// Target type of a column: nullable non-key columns get a nullable wrapper.
pub fn target_type(column: &ColumnDescriptor) -> String {
    let base = base_type(column);
    if column.nullable && !column.primary_key {
        nullable_of(base)
    } else {
        base.to_string()
    }
}

/// Map a nullable wrapper back to its base type; other types are unchanged.
pub fn unwrap_nullable(ty: &str) -> &str {
    base_of_nullable(ty).unwrap_or(ty)
}

/// Native column type used when a field carries no storage annotation.
pub fn default_native_type(ty: &str) -> &'static str {
    match unwrap_nullable(ty) {
        "String" => "varchar(255)",
        "i8" => "tinyint",
        "u8" => "tinyint unsigned",
        "i16" => "smallint",
        "u16" => "smallint unsigned",
        "i32" => "int",
        "u32" => "int unsigned",
        "i64" => "bigint",
        "u64" => "bigint unsigned",
        "f32" => "float",
        "f64" => "double",
        "bool" => "tinyint(1)",
        "Vec<u8>" => "blob",
        "serde_json::Value" => "json",
        other if strata_ir::is_temporal(other) => "datetime",
        _ => "text",
    }
}

/// Storage annotation for a column:
/// `column:<c>;type:<native>[;primaryKey][;autoIncrement][;not null][;default:<d>][;comment:<text>]`.
pub fn storage_annotation(column: &ColumnDescriptor) -> String {
    let mut parts = vec![
        format!("column:{}", column.name),
        format!("type:{}", sanitize(&column.column_type)),
    ];
    if column.primary_key {
        parts.push("primaryKey".to_string());
    }
    if column.auto_increment {
        parts.push("autoIncrement".to_string());
    }
    if !column.nullable && !column.primary_key {
        parts.push("not null".to_string());
    }
    if let Some(default) = column.default.as_deref().and_then(format_default) {
        parts.push(format!("default:{}", default));
    }
    let comment = sanitize(&column.comment);
    if !comment.is_empty() {
        parts.push(format!("comment:{}", comment));
    }
    parts.join(";")
}

/// Convert a catalog column into a field.
pub fn column_to_field(column: &ColumnDescriptor) -> Field {
    Field::new(&column.name, target_type(column))
        .required(!column.nullable)
        .storage(storage_annotation(column))
        .comment(column.comment.as_str())
}

/// Render a column default; `NULL` defaults are omitted.
fn format_default(raw: &str) -> Option<String> {
    let value = raw.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("null") {
        return None;
    }

    let unquoted = value
        .strip_prefix('\'')
        .and_then(|v| v.strip_suffix('\''))
        .unwrap_or(value);

    if unquoted.parse::<f64>().is_ok() || is_sql_keyword(unquoted) {
        Some(unquoted.to_string())
    } else {
        Some(format!("'{}'", sanitize(unquoted)))
    }
}

const SQL_KEYWORDS: &[&str] = &[
    "current_timestamp",
    "current_date",
    "current_time",
    "localtime",
    "localtimestamp",
    "utc_timestamp",
    "now",
    "true",
    "false",
];

/// `CURRENT_TIMESTAMP`, `current_timestamp()`, `NOW()` and the like.
fn is_sql_keyword(value: &str) -> bool {
    let head = match value.split_once('(') {
        Some((head, args)) => match args.strip_suffix(')') {
            Some(args) if args.chars().all(|c| c.is_ascii_digit()) => head,
            _ => return false,
        },
        None => value,
    };
    SQL_KEYWORDS.iter().any(|k| head.eq_ignore_ascii_case(k))
}

/// Keep annotation separators and string delimiters out of free text.
fn sanitize(text: &str) -> String {
    text.trim().replace(';', ",").replace('"', "'")
}
