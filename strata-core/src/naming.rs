//! Name derivation shared by every generator.
//!
//! All functions here are pure and total: any input produces an output,
//! and re-applying a conversion to its own output is a no-op.

use serde::Serialize;

fn is_separator(c: char) -> bool {
    c == '_' || c == '-' || c.is_whitespace()
}

/// Convert a string to snake_case (e.g., "HelloWorld" -> "hello_world")
///
/// A separator is inserted before every internal uppercase letter. Existing
/// `_`, `-` and whitespace collapse into a single `_`, and separators never
/// appear at the start or end of the result.
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut pending = false;

    for c in s.chars() {
        if is_separator(c) {
            pending = true;
            continue;
        }
        if c.is_uppercase() {
            pending = true;
        }
        if pending && !result.is_empty() {
            result.push('_');
        }
        pending = false;
        result.extend(c.to_lowercase());
    }

    result
}

/// Convert a string to PascalCase (e.g., "hello_world" -> "HelloWorld")
///
/// A segment starting with a digit keeps its `_` (`line_2` -> `Line_2`),
/// so `to_snake_case` can recover the original boundary.
pub fn to_pascal_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for part in s.split(is_separator) {
        let mut chars = part.chars();
        let Some(first) = chars.next() else {
            continue;
        };
        if first.is_ascii_digit() && !result.is_empty() {
            result.push('_');
        }
        result.extend(first.to_uppercase());
        result.extend(chars);
    }
    result
}

/// Convert a string to camelCase (e.g., "hello_world" -> "helloWorld")
pub fn to_camel_case(s: &str) -> String {
    let pascal = to_pascal_case(s);
    let mut chars = pascal.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_lowercase().chain(chars).collect(),
    }
}

/// Convert a string to kebab-case (e.g., "HelloWorld" -> "hello-world")
pub fn to_kebab_case(s: &str) -> String {
    to_snake_case(s).replace('_', "-")
}

/// Lowercase with every separator removed (e.g., "OrderItem" -> "orderitem")
pub fn to_lower_flat(s: &str) -> String {
    to_snake_case(s).replace('_', "")
}

/// Pluralize a lowercase word.
///
/// This is a deliberate approximation without an irregular-word table:
/// `category -> categories`, `box -> boxes`, `bus -> buses`, `tag -> tags`.
pub fn pluralize(word: &str) -> String {
    if let Some(stem) = word.strip_suffix('y') {
        format!("{}ies", stem)
    } else if ["s", "sh", "ch", "x", "z"]
        .iter()
        .any(|suffix| word.ends_with(suffix))
    {
        format!("{}es", word)
    } else if word.is_empty() {
        String::new()
    } else {
        format!("{}s", word)
    }
}

const RUST_RESERVED: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum", "extern",
    "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub",
    "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true", "type",
    "unsafe", "use", "where", "while", "abstract", "become", "box", "do", "final", "macro",
    "override", "priv", "try", "typeof", "unsized", "virtual", "yield",
];

/// Check if a name is a Rust reserved word.
pub fn is_rust_reserved(name: &str) -> bool {
    RUST_RESERVED.contains(&name)
}

/// Make a name usable as a Rust identifier (e.g., "type" -> "r#type").
///
/// Path keywords cannot be raw identifiers and get a trailing underscore.
pub fn rust_ident(name: &str) -> String {
    let snake = to_snake_case(name);
    match snake.as_str() {
        "self" | "super" | "crate" => format!("{}_", snake),
        s if is_rust_reserved(s) => format!("r#{}", snake),
        _ => snake,
    }
}

/// Every casing and plural variant of one entity name.
///
/// Built once per generator invocation and handed to templates as the
/// `names` object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamingSet {
    /// The name as given by the user
    pub raw: String,
    /// `OrderItem`
    pub type_name: String,
    /// `orderItem`
    pub var_name: String,
    /// `order_item`
    pub file_name: String,
    /// `order-item`
    pub route_name: String,
    /// `orderitem`
    pub lower_name: String,
    /// `order_items`
    pub table_name: String,
    /// `OrderItems`
    pub plural_type: String,
    /// `orderItems`
    pub plural_var: String,
    /// `order_items`
    pub plural_file: String,
    /// `order-items`
    pub plural_route: String,
}

impl NamingSet {
    pub fn new(name: &str) -> Self {
        let file_name = to_snake_case(name);
        let plural_file = pluralize(&file_name);

        Self {
            raw: name.to_string(),
            type_name: to_pascal_case(&file_name),
            var_name: to_camel_case(&file_name),
            route_name: to_kebab_case(&file_name),
            lower_name: to_lower_flat(&file_name),
            table_name: plural_file.clone(),
            plural_type: to_pascal_case(&plural_file),
            plural_var: to_camel_case(&plural_file),
            plural_route: to_kebab_case(&plural_file),
            plural_file,
            file_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("Hello"), "hello");
        assert_eq!(to_snake_case("HelloWorld"), "hello_world");
        assert_eq!(to_snake_case("FooBarBaz"), "foo_bar_baz");
        assert_eq!(to_snake_case("hello-world"), "hello_world");
        assert_eq!(to_snake_case("userId"), "user_id");
        assert_eq!(to_snake_case(""), "");
    }

    #[test]
    fn test_to_snake_case_separators() {
        assert_eq!(to_snake_case("foo__bar"), "foo_bar");
        assert_eq!(to_snake_case("_leading"), "leading");
        assert_eq!(to_snake_case("trailing_"), "trailing");
        assert_eq!(to_snake_case("Foo_Bar"), "foo_bar");
        assert_eq!(to_snake_case("order item"), "order_item");
    }

    #[test]
    fn test_snake_case_idempotent() {
        for input in ["HelloWorld", "user_id", "userID", "A1B", "foo--bar", "x"] {
            let once = to_snake_case(input);
            assert_eq!(to_snake_case(&once), once, "input: {}", input);
        }
    }

    #[test]
    fn test_snake_of_pascal_matches_snake() {
        for input in [
            "user_id", "userId", "UserId", "userID", "foo__bar", "Foo_Bar", "_leading",
            "trailing_", "order-item", "a1b", "A1B", "user2name", "HTTPServer", "line_2",
            "address_1_text", "v_2", "Line_2", "item__3",
        ] {
            assert_eq!(
                to_snake_case(&to_pascal_case(input)),
                to_snake_case(input),
                "input: {}",
                input
            );
        }
    }

    #[test]
    fn test_to_pascal_case() {
        assert_eq!(to_pascal_case("hello"), "Hello");
        assert_eq!(to_pascal_case("hello_world"), "HelloWorld");
        assert_eq!(to_pascal_case("foo-bar baz"), "FooBarBaz");
        assert_eq!(to_pascal_case("hElLo"), "HElLo");
        assert_eq!(to_pascal_case("line_2"), "Line_2");
        assert_eq!(to_pascal_case("address_1_text"), "Address_1Text");
        assert_eq!(to_pascal_case("Line_2"), "Line_2");
        assert_eq!(to_pascal_case(""), "");
    }

    #[test]
    fn test_camel_and_kebab() {
        assert_eq!(to_camel_case("hello_world"), "helloWorld");
        assert_eq!(to_camel_case("HelloWorld"), "helloWorld");
        assert_eq!(to_kebab_case("HelloWorld"), "hello-world");
        assert_eq!(to_lower_flat("OrderItem"), "orderitem");
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize("category"), "categories");
        assert_eq!(pluralize("tag"), "tags");
        assert_eq!(pluralize("box"), "boxes");
        assert_eq!(pluralize("bus"), "buses");
        assert_eq!(pluralize("brush"), "brushes");
        assert_eq!(pluralize("match"), "matches");
        assert_eq!(pluralize("quiz"), "quizes");
        assert_eq!(pluralize("order_item"), "order_items");
        assert_eq!(pluralize(""), "");
    }

    #[test]
    fn test_rust_ident() {
        assert_eq!(rust_ident("Type"), "r#type");
        assert_eq!(rust_ident("UserId"), "user_id");
        assert_eq!(rust_ident("self"), "self_");
    }

    #[test]
    fn test_naming_set() {
        let names = NamingSet::new("OrderItem");
        assert_eq!(names.type_name, "OrderItem");
        assert_eq!(names.var_name, "orderItem");
        assert_eq!(names.file_name, "order_item");
        assert_eq!(names.route_name, "order-item");
        assert_eq!(names.lower_name, "orderitem");
        assert_eq!(names.table_name, "order_items");
        assert_eq!(names.plural_type, "OrderItems");
        assert_eq!(names.plural_var, "orderItems");
        assert_eq!(names.plural_route, "order-items");
    }

    #[test]
    fn test_naming_set_same_for_any_casing() {
        assert_eq!(
            NamingSet::new("order_item").type_name,
            NamingSet::new("OrderItem").type_name
        );
        assert_eq!(NamingSet::new("category").table_name, "categories");
    }
}
