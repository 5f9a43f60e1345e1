//! Generated entity fields.

use serde::{Deserialize, Serialize};
use strata_core::{to_pascal_case, to_snake_case};

use crate::types::TypeCategory;

/// One generated data attribute of an entity.
///
/// Fields coming from the DSL, from a database table, from a persisted
/// side-file or from reflection of a generated model are indistinguishable:
/// `name` is always PascalCase and `serialized_name` is always its
/// snake_case form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Canonical name in type-identifier casing (`UserId`).
    pub name: String,
    /// Resolved target type (`String`, `NullInt64`, `Vec<u8>`, ...).
    #[serde(rename = "type")]
    pub ty: String,
    /// Wire and column name (`user_id`).
    pub serialized_name: String,
    /// Opaque persistence mapping (`column:user_id;type:bigint;not null`).
    pub storage: String,
    /// Human-readable description.
    pub comment: String,
    /// Whether a value must be supplied.
    pub required: bool,
}

impl Field {
    /// Create a field, deriving the canonical and serialized names from `name`.
    pub fn new(name: &str, ty: impl Into<String>) -> Self {
        let pascal = to_pascal_case(&to_snake_case(name));
        let ty = ty.into();
        Self {
            serialized_name: to_snake_case(&pascal),
            comment: derived_comment(&pascal, &ty),
            storage: String::new(),
            name: pascal,
            ty,
            required: false,
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn storage(mut self, storage: impl Into<String>) -> Self {
        self.storage = storage.into();
        self
    }

    /// Set the comment; an empty comment keeps the derived one.
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        let comment = comment.into();
        if !comment.trim().is_empty() {
            self.comment = comment.trim().to_string();
        }
        self
    }

    /// Category of the field's type.
    pub fn category(&self) -> TypeCategory {
        TypeCategory::of(&self.ty)
    }
}

/// Comment used when no description is available: `"UserId (integer)"`.
pub fn derived_comment(name: &str, ty: &str) -> String {
    format!("{} ({})", name, TypeCategory::of(ty).label())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_names_from_any_casing() {
        for input in ["user_id", "UserId", "userId", "user-id"] {
            let field = Field::new(input, "i64");
            assert_eq!(field.name, "UserId");
            assert_eq!(field.serialized_name, "user_id");
        }
    }

    #[test]
    fn test_field_names_keep_digit_segments() {
        let field = Field::new("line_2", "String");
        assert_eq!(field.name, "Line_2");
        assert_eq!(field.serialized_name, "line_2");

        let field = Field::new("address_1_text", "String");
        assert_eq!(field.serialized_name, "address_1_text");
    }

    #[test]
    fn test_field_derived_comment() {
        let field = Field::new("title", "String");
        assert_eq!(field.comment, "Title (string)");

        let field = Field::new("title", "String").comment("  ");
        assert_eq!(field.comment, "Title (string)");

        let field = Field::new("title", "String").comment("Headline");
        assert_eq!(field.comment, "Headline");
    }

    #[test]
    fn test_field_serializes_type_key() {
        let field = Field::new("price", "f64").required(true);
        let toml = toml::to_string(&field).unwrap();
        assert!(toml.contains("type = \"f64\""));
        assert!(toml.contains("required = true"));
    }
}
