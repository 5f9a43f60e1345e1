//! Data handed to templates.

use chrono::{Datelike, NaiveDateTime};
use serde::Serialize;
use strata_core::{NamingSet, rust_ident};
use strata_ir::{
    Driver, Features, Field, Framework, MigrationAction, ModuleType, Storage, TypeCategory,
    is_nullable,
};
use strata_schema::type_mapper::{default_native_type, unwrap_nullable};

/// The template data context of one generator call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateContext {
    pub names: NamingSet,
    pub fields: Vec<FieldView>,
    pub features: Features,
    pub year: i32,
    /// `YYYYMMDDHHMMSS`
    pub timestamp: String,
    pub module_type: Option<ModuleType>,
    pub framework: Option<Framework>,
    pub driver: Driver,
    pub dialect: Dialect,
    pub table: String,
    pub action: Option<MigrationAction>,
    pub entity_comment: String,
    pub crate_name: String,
}

/// A field plus everything templates derive from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldView {
    #[serde(flatten)]
    pub field: Field,
    /// Rust member name (`user_id`, `r#type`).
    pub ident: String,
    /// Comment on one line.
    pub doc: String,
    /// Human label for UI (`User id`).
    pub label: String,
    /// Type without its nullable wrapper.
    pub base_type: String,
    pub nullable: bool,
    /// Category label (`string`, `integer`, ...).
    pub category: &'static str,
    pub ts_type: &'static str,
    /// Column name in the database.
    pub column: String,
    /// Column type in the selected SQL dialect.
    pub sql_type: String,
    /// Column default, if the storage annotation has one.
    pub sql_default: Option<String>,
    /// Column comment, if the storage annotation has one.
    pub sql_comment: Option<String>,
}

impl FieldView {
    pub fn new(field: &Field, driver: Driver) -> Self {
        let storage = Storage::parse(&field.storage);
        let category = field.category();
        let doc = field.comment.split_whitespace().collect::<Vec<_>>().join(" ");

        Self {
            ident: rust_ident(&field.serialized_name),
            label: label(&field.serialized_name),
            base_type: unwrap_nullable(&field.ty).to_string(),
            nullable: is_nullable(&field.ty),
            category: category.label(),
            ts_type: category.ts_type(),
            column: storage
                .column
                .clone()
                .unwrap_or_else(|| field.serialized_name.clone()),
            sql_type: sql_type(field, &storage, driver),
            sql_default: storage.default.clone(),
            sql_comment: storage.comment.clone(),
            doc,
            field: field.clone(),
        }
    }
}

/// `user_id` → `User id`
fn label(serialized: &str) -> String {
    let words = serialized.replace('_', " ");
    let mut chars = words.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// SQL specifics of a driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dialect {
    /// Primary key column definition.
    pub id_column: &'static str,
    pub id_type: &'static str,
    pub timestamp_type: &'static str,
    pub now: &'static str,
    /// Whether bind parameters are numbered (`$1`) rather than `?`.
    pub numbered_params: bool,
    /// sqlx pool type used by generated repositories.
    pub pool: &'static str,
    pub column_comments: bool,
    pub table_options: &'static str,
}

impl Dialect {
    pub fn of(driver: Driver) -> Self {
        match driver {
            Driver::Mysql => Dialect {
                id_column: "id BIGINT UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY",
                id_type: "u64",
                timestamp_type: "DATETIME",
                now: "CURRENT_TIMESTAMP",
                numbered_params: false,
                pool: "MySqlPool",
                column_comments: true,
                table_options: " ENGINE=InnoDB DEFAULT CHARSET=utf8mb4",
            },
            Driver::Postgres => Dialect {
                id_column: "id BIGSERIAL PRIMARY KEY",
                id_type: "i64",
                timestamp_type: "TIMESTAMP",
                now: "CURRENT_TIMESTAMP",
                numbered_params: true,
                pool: "PgPool",
                column_comments: false,
                table_options: "",
            },
            Driver::Sqlite => Dialect {
                id_column: "id INTEGER PRIMARY KEY AUTOINCREMENT",
                id_type: "i64",
                timestamp_type: "DATETIME",
                now: "CURRENT_TIMESTAMP",
                numbered_params: false,
                pool: "SqlitePool",
                column_comments: false,
                table_options: "",
            },
        }
    }
}

/// Column type of a field for a driver.
///
/// MySQL keeps the native type recorded in the storage annotation; other
/// drivers translate from the field's type category.
pub fn sql_type(field: &Field, storage: &Storage, driver: Driver) -> String {
    let native = storage
        .native_type
        .clone()
        .unwrap_or_else(|| default_native_type(&field.ty).to_string());
    let native_lower = native.to_ascii_lowercase();
    let base = unwrap_nullable(&field.ty);

    match driver {
        Driver::Mysql => native,
        Driver::Postgres => match TypeCategory::of(&field.ty) {
            TypeCategory::String if native_lower.starts_with("varchar") => native.to_uppercase(),
            TypeCategory::String if native_lower.starts_with("char") => native.to_uppercase(),
            TypeCategory::String if native_lower.contains("text") => "TEXT".into(),
            TypeCategory::String => "VARCHAR(255)".into(),
            TypeCategory::Integer => match base {
                "i8" | "u8" | "i16" => "SMALLINT".into(),
                "u16" | "i32" => "INTEGER".into(),
                _ => "BIGINT".into(),
            },
            TypeCategory::Float if native_lower.starts_with("decimal") => {
                native_lower.replacen("decimal", "NUMERIC", 1)
            }
            TypeCategory::Float if base == "f32" => "REAL".into(),
            TypeCategory::Float => "DOUBLE PRECISION".into(),
            TypeCategory::Boolean => "BOOLEAN".into(),
            TypeCategory::Temporal => "TIMESTAMP".into(),
            TypeCategory::Bytes => "BYTEA".into(),
            TypeCategory::Json => "JSONB".into(),
            TypeCategory::Other => "TEXT".into(),
        },
        Driver::Sqlite => match TypeCategory::of(&field.ty) {
            TypeCategory::Integer | TypeCategory::Boolean => "INTEGER".into(),
            TypeCategory::Float if native_lower.starts_with("decimal") => "NUMERIC".into(),
            TypeCategory::Float => "REAL".into(),
            TypeCategory::Temporal => "DATETIME".into(),
            TypeCategory::Bytes => "BLOB".into(),
            TypeCategory::String | TypeCategory::Json | TypeCategory::Other => "TEXT".into(),
        },
    }
}

/// Inputs for building a [`TemplateContext`].
pub struct ContextBuilder<'a> {
    names: &'a NamingSet,
    fields: &'a [Field],
    driver: Driver,
    now: NaiveDateTime,
    features: Features,
    crate_name: String,
    table: Option<String>,
    action: Option<MigrationAction>,
    module_type: Option<ModuleType>,
    framework: Option<Framework>,
    entity_comment: Option<String>,
}

impl<'a> ContextBuilder<'a> {
    pub fn new(names: &'a NamingSet, fields: &'a [Field], now: NaiveDateTime) -> Self {
        Self {
            names,
            fields,
            driver: Driver::default(),
            now,
            features: Features::default(),
            crate_name: "crate".to_string(),
            table: None,
            action: None,
            module_type: None,
            framework: None,
            entity_comment: None,
        }
    }

    pub fn driver(mut self, driver: Driver) -> Self {
        self.driver = driver;
        self
    }

    pub fn features(mut self, features: Features) -> Self {
        self.features = features;
        self
    }

    pub fn crate_name(mut self, crate_name: impl Into<String>) -> Self {
        self.crate_name = crate_name.into();
        self
    }

    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    pub fn action(mut self, action: MigrationAction) -> Self {
        self.action = Some(action);
        self
    }

    pub fn frontend(mut self, module_type: ModuleType, framework: Framework) -> Self {
        self.module_type = Some(module_type);
        self.framework = Some(framework);
        self
    }

    pub fn entity_comment(mut self, comment: impl Into<String>) -> Self {
        self.entity_comment = Some(comment.into());
        self
    }

    pub fn build(self) -> TemplateContext {
        TemplateContext {
            fields: self
                .fields
                .iter()
                .map(|field| FieldView::new(field, self.driver))
                .collect(),
            features: self.features,
            year: self.now.year(),
            timestamp: self.now.format("%Y%m%d%H%M%S").to_string(),
            module_type: self.module_type,
            framework: self.framework,
            driver: self.driver,
            dialect: Dialect::of(self.driver),
            table: self
                .table
                .unwrap_or_else(|| self.names.table_name.clone()),
            action: self.action,
            entity_comment: self
                .entity_comment
                .unwrap_or_else(|| self.names.type_name.clone()),
            crate_name: self.crate_name,
            names: self.names.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .and_then(|d| d.and_hms_opt(14, 5, 1))
            .unwrap()
    }

    #[test]
    fn test_context_defaults() {
        let names = NamingSet::new("OrderItem");
        let fields = vec![Field::new("quantity", "i32").required(true)];
        let ctx = ContextBuilder::new(&names, &fields, now()).build();

        assert_eq!(ctx.year, 2024);
        assert_eq!(ctx.timestamp, "20240309140501");
        assert_eq!(ctx.table, "order_items");
        assert_eq!(ctx.entity_comment, "OrderItem");
        assert_eq!(ctx.fields.len(), 1);
        assert_eq!(ctx.fields[0].ident, "quantity");
        assert!(ctx.module_type.is_none());
    }

    #[test]
    fn test_field_view() {
        let field = Field::new("type", "NullString")
            .storage("column:kind;type:varchar(32);default:'a'")
            .comment("Kind of\n  thing");
        let view = FieldView::new(&field, Driver::Mysql);

        assert_eq!(view.ident, "r#type");
        assert_eq!(view.column, "kind");
        assert_eq!(view.base_type, "String");
        assert!(view.nullable);
        assert_eq!(view.sql_type, "varchar(32)");
        assert_eq!(view.sql_default.as_deref(), Some("'a'"));
        assert_eq!(view.doc, "Kind of thing");
        assert_eq!(view.ts_type, "string");
    }

    #[test]
    fn test_sql_types_per_driver() {
        let decimal = Field::new("price", "f64").storage("column:price;type:decimal(10,2)");
        let storage = Storage::parse(&decimal.storage);
        assert_eq!(sql_type(&decimal, &storage, Driver::Mysql), "decimal(10,2)");
        assert_eq!(sql_type(&decimal, &storage, Driver::Postgres), "NUMERIC(10,2)");
        assert_eq!(sql_type(&decimal, &storage, Driver::Sqlite), "NUMERIC");

        let flag = Field::new("active", "bool");
        let storage = Storage::parse(&flag.storage);
        assert_eq!(sql_type(&flag, &storage, Driver::Mysql), "tinyint(1)");
        assert_eq!(sql_type(&flag, &storage, Driver::Postgres), "BOOLEAN");
        assert_eq!(sql_type(&flag, &storage, Driver::Sqlite), "INTEGER");

        let body = Field::new("body", "String").storage("column:body;type:text");
        let storage = Storage::parse(&body.storage);
        assert_eq!(sql_type(&body, &storage, Driver::Postgres), "TEXT");
    }

    #[test]
    fn test_label() {
        assert_eq!(label("user_id"), "User id");
        assert_eq!(label(""), "");
    }
}
