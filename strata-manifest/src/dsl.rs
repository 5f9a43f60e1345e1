//! Field DSL: `title:string!,price:decimal,tags:HashMap<String, i64>`.
//!
//! Each comma separated token is `name:type`, with a trailing `!` marking the
//! field as required. Logical type names resolve through a fixed dictionary;
//! anything else is passed through as a literal target type.

use strata_ir::Field;

use crate::{Error, Result};

/// A logical DSL type resolved to its target and native column types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedType {
    pub target: String,
    pub native: &'static str,
}

/// Resolve a DSL type token.
///
/// Dictionary lookups are case-insensitive; unknown tokens are kept verbatim
/// with a `text` column.
pub fn resolve_type(token: &str) -> ResolvedType {
    let (target, native) = match token.to_ascii_lowercase().as_str() {
        "string" | "str" | "varchar" => ("String", "varchar(255)"),
        "text" => ("String", "text"),
        "int" | "int32" | "integer" => ("i32", "int"),
        "int64" | "bigint" | "long" => ("i64", "bigint"),
        "uint" | "uint32" => ("u32", "int unsigned"),
        "uint64" => ("u64", "bigint unsigned"),
        "float" | "float32" => ("f32", "float"),
        "float64" | "double" => ("f64", "double"),
        "decimal" => ("f64", "decimal(10,2)"),
        "bool" | "boolean" => ("bool", "tinyint(1)"),
        "time" | "datetime" | "timestamp" | "date" => ("NaiveDateTime", "datetime"),
        "json" => ("serde_json::Value", "json"),
        _ => {
            return ResolvedType {
                target: token.to_string(),
                native: "text",
            };
        }
    };
    ResolvedType {
        target: target.to_string(),
        native,
    }
}

/// Storage annotation for a DSL field.
pub fn storage_annotation(column: &str, native: &str, required: bool) -> String {
    let mut storage = format!("column:{};type:{}", column, native);
    if required {
        storage.push_str(";not null");
    }
    storage
}

/// Parse a field DSL string into an ordered field sequence.
///
/// Empty or whitespace-only input yields no fields.
pub fn parse_fields(input: &str) -> Result<Vec<Field>> {
    let mut fields = Vec::new();

    for (start, end) in split_top_level(input) {
        let raw = &input[start..end];
        let token = raw.trim();
        if token.is_empty() {
            continue;
        }
        let offset = start + (raw.len() - raw.trim_start().len());
        fields.push(parse_token(input, token, offset)?);
    }

    Ok(fields)
}

fn parse_token(input: &str, token: &str, offset: usize) -> Result<Field> {
    let span = (offset, token.len());

    let colons = field_colons(token);
    let colon = match colons.as_slice() {
        [colon] => *colon,
        [] => return Err(Error::malformed_field(token, "missing ':'", input, span)),
        _ => {
            return Err(Error::malformed_field(
                token,
                "more than one ':'",
                input,
                span,
            ));
        }
    };

    let name = token[..colon].trim();
    let ty = token[colon + 1..].trim();

    if name.is_empty() {
        return Err(Error::malformed_field(token, "missing name", input, span));
    }
    if let Some(reason) = validate_name(name) {
        return Err(Error::invalid_field_name(
            name,
            reason,
            input,
            (offset, name.len()),
        ));
    }

    let (ty, required) = match ty.strip_suffix('!') {
        Some(stripped) => (stripped.trim_end(), true),
        None => (ty, false),
    };
    if ty.is_empty() {
        return Err(Error::malformed_field(token, "missing type", input, span));
    }

    let resolved = resolve_type(ty);
    let field = Field::new(name, resolved.target).required(required);
    let storage = storage_annotation(&field.serialized_name, resolved.native, required);
    Ok(field.storage(storage))
}

/// Byte ranges of comma separated tokens, ignoring commas nested in
/// `<...>`, `(...)` or `[...]`.
fn split_top_level(input: &str) -> Vec<(usize, usize)> {
    let mut ranges = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, c) in input.char_indices() {
        match c {
            '<' | '(' | '[' => depth += 1,
            '>' | ')' | ']' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                ranges.push((start, i));
                start = i + 1;
            }
            _ => {}
        }
    }
    ranges.push((start, input.len()));
    ranges
}

/// Positions of top-level colons that are not part of a `::` path separator.
fn field_colons(token: &str) -> Vec<usize> {
    let bytes = token.as_bytes();
    let mut depth = 0usize;
    let mut colons = Vec::new();

    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b'<' | b'(' | b'[' => depth += 1,
            b'>' | b')' | b']' => depth = depth.saturating_sub(1),
            b':' if depth == 0 => {
                let prev = i > 0 && bytes[i - 1] == b':';
                let next = bytes.get(i + 1) == Some(&b':');
                if !prev && !next {
                    colons.push(i);
                }
            }
            _ => {}
        }
    }
    colons
}

fn validate_name(name: &str) -> Option<&'static str> {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        Some(_) => return Some("name must start with a letter or underscore"),
        None => return Some("name cannot be empty"),
    }
    if chars.any(|c| !(c.is_ascii_alphanumeric() || c == '_' || c == '-')) {
        return Some("name contains invalid characters");
    }
    None
}
