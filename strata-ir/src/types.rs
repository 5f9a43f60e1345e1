//! Target type vocabulary.
//!
//! Generated models use plain Rust types for required values and one named
//! wrapper per base category for nullable ones, so absence stays visible in
//! the type itself. Anything without a named wrapper uses `Option<T>`.

/// Temporal base type used by generated models.
pub const TEMPORAL_TYPE: &str = "NaiveDateTime";

/// Fallback type for shapes that cannot be resolved.
pub const ANY_TYPE: &str = "serde_json::Value";

/// (base type, nullable wrapper) pairs.
pub const NULLABLE_WRAPPERS: &[(&str, &str)] = &[
    ("String", "NullString"),
    ("i32", "NullInt32"),
    ("i64", "NullInt64"),
    ("f64", "NullFloat64"),
    ("bool", "NullBool"),
    (TEMPORAL_TYPE, "NullTime"),
];

/// Wrap a base type in its nullable wrapper.
pub fn nullable_of(base: &str) -> String {
    NULLABLE_WRAPPERS
        .iter()
        .find(|(b, _)| *b == base)
        .map(|(_, wrapper)| wrapper.to_string())
        .unwrap_or_else(|| format!("Option<{}>", base))
}

/// Strip a nullable wrapper, returning the base type.
///
/// Returns `None` for types that are not nullable.
pub fn base_of_nullable(ty: &str) -> Option<&str> {
    if let Some(&(base, _)) = NULLABLE_WRAPPERS.iter().find(|(_, w)| *w == ty) {
        return Some(base);
    }
    ty.strip_prefix("Option<")
        .and_then(|inner| inner.strip_suffix('>'))
        .map(str::trim)
}

/// Whether a type is a nullable wrapper or `Option<T>`.
pub fn is_nullable(ty: &str) -> bool {
    base_of_nullable(ty).is_some()
}

/// Whether a type is the temporal type, qualified or not.
pub fn is_temporal(ty: &str) -> bool {
    let head = ty.split('<').next().unwrap_or(ty).trim();
    let last = head.rsplit("::").next().unwrap_or(head);
    last == TEMPORAL_TYPE || last == "DateTime"
}

/// Broad category of a target type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeCategory {
    String,
    Integer,
    Float,
    Boolean,
    Temporal,
    Bytes,
    Json,
    Other,
}

impl TypeCategory {
    /// Categorize a target type name, looking through nullable wrappers.
    pub fn of(ty: &str) -> Self {
        let base = base_of_nullable(ty).unwrap_or(ty);
        match base {
            "String" | "&str" | "char" => TypeCategory::String,
            "i8" | "i16" | "i32" | "i64" | "i128" | "u8" | "u16" | "u32" | "u64" | "u128"
            | "isize" | "usize" => TypeCategory::Integer,
            "f32" | "f64" | "Decimal" | "rust_decimal::Decimal" => TypeCategory::Float,
            "bool" => TypeCategory::Boolean,
            "Vec<u8>" => TypeCategory::Bytes,
            "serde_json::Value" | "Value" => TypeCategory::Json,
            other if is_temporal(other) => TypeCategory::Temporal,
            _ => TypeCategory::Other,
        }
    }

    /// Label used in derived field comments.
    pub fn label(&self) -> &'static str {
        match self {
            TypeCategory::String => "string",
            TypeCategory::Integer => "integer",
            TypeCategory::Float => "number",
            TypeCategory::Boolean => "boolean",
            TypeCategory::Temporal => "timestamp",
            TypeCategory::Bytes => "binary",
            TypeCategory::Json => "json",
            TypeCategory::Other => "custom",
        }
    }

    /// TypeScript type for frontend scaffolds.
    pub fn ts_type(&self) -> &'static str {
        match self {
            TypeCategory::String | TypeCategory::Temporal => "string",
            TypeCategory::Integer | TypeCategory::Float => "number",
            TypeCategory::Boolean => "boolean",
            TypeCategory::Bytes => "string",
            TypeCategory::Json | TypeCategory::Other => "unknown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nullable_round_trip() {
        for (base, wrapper) in NULLABLE_WRAPPERS {
            assert_eq!(nullable_of(base), *wrapper);
            assert_eq!(base_of_nullable(wrapper), Some(*base));
        }
        assert_eq!(nullable_of("u8"), "Option<u8>");
        assert_eq!(base_of_nullable("Option<u8>"), Some("u8"));
        assert_eq!(base_of_nullable("String"), None);
    }

    #[test]
    fn test_is_temporal() {
        assert!(is_temporal("NaiveDateTime"));
        assert!(is_temporal("chrono::NaiveDateTime"));
        assert!(is_temporal("DateTime<Utc>"));
        assert!(is_temporal("chrono::DateTime<chrono::Utc>"));
        assert!(!is_temporal("NullTime"));
        assert!(!is_temporal("String"));
    }

    #[test]
    fn test_type_category() {
        assert_eq!(TypeCategory::of("NullString"), TypeCategory::String);
        assert_eq!(TypeCategory::of("i64"), TypeCategory::Integer);
        assert_eq!(TypeCategory::of("Option<u16>"), TypeCategory::Integer);
        assert_eq!(TypeCategory::of("NullFloat64"), TypeCategory::Float);
        assert_eq!(TypeCategory::of("NullTime"), TypeCategory::Temporal);
        assert_eq!(TypeCategory::of("Vec<u8>"), TypeCategory::Bytes);
        assert_eq!(TypeCategory::of("Money"), TypeCategory::Other);
        assert_eq!(TypeCategory::of("bool").label(), "boolean");
    }
}
