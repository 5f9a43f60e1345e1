//! Compiled-in template registry.

use minijinja::{AutoEscape, Environment, ErrorKind, UndefinedBehavior};
use serde::Serialize;
use strata_core::{pluralize, to_camel_case, to_kebab_case, to_pascal_case, to_snake_case};

use crate::TemplateError;

macro_rules! templates {
    ($($name:literal => $file:literal),+ $(,)?) => {
        &[$(($name, include_str!(concat!("../templates/", $file)))),+]
    };
}

/// Every template, by name.
const TEMPLATES: &[(&str, &str)] = templates! {
    "model.rs" => "model.rs.j2",
    "nullable.rs" => "nullable.rs.j2",
    "repository.rs" => "repository.rs.j2",
    "service.rs" => "service.rs.j2",
    "handler.rs" => "handler.rs.j2",
    "registry/mod.rs" => "registry/mod.rs.j2",
    "registry/routes.rs" => "registry/routes.rs.j2",
    "registry/routes.ts" => "registry/routes.ts.j2",
    "registry/state.rs" => "registry/state.rs.j2",
    "registry/locales.ts" => "registry/locales.ts.j2",
    "migration/create_table" => "migration/create_table.sql.j2",
    "migration/drop_table" => "migration/drop_table.sql.j2",
    "migration/alter_table" => "migration/alter_table.sql.j2",
    "migration/alter_table_undo" => "migration/alter_table_undo.sql.j2",
    "frontend/react/page" => "frontend/react/page.tsx.j2",
    "frontend/vue/page" => "frontend/vue/page.vue.j2",
    "frontend/service" => "frontend/service.ts.j2",
    "frontend/types" => "frontend/types.ts.j2",
    "frontend/locale" => "frontend/locale.ts.j2",
};

/// Renders named templates against a data context.
///
/// All templates are loaded at construction; the engine is read-only
/// afterwards and can be shared across threads.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    pub fn new() -> Result<Self, TemplateError> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);
        register_filters(&mut env);

        for &(name, source) in TEMPLATES {
            env.add_template(name, source)
                .map_err(|source| TemplateError::Load {
                    name: name.to_string(),
                    source,
                })?;
        }

        Ok(Self { env })
    }

    /// Render template `name` with `context`.
    pub fn render<S: Serialize>(&self, name: &str, context: S) -> Result<String, TemplateError> {
        let template = self.env.get_template(name).map_err(|e| match e.kind() {
            ErrorKind::TemplateNotFound => TemplateError::UnknownTemplate {
                name: name.to_string(),
            },
            _ => TemplateError::Render {
                name: name.to_string(),
                source: e,
            },
        })?;

        template.render(context).map_err(|source| TemplateError::Render {
            name: name.to_string(),
            source,
        })
    }

    /// Names of all registered templates.
    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        TEMPLATES.iter().map(|(name, _)| *name)
    }
}

fn register_filters(env: &mut Environment<'static>) {
    env.add_filter("snake_case", snake_case);
    env.add_filter("pascal_case", pascal_case);
    env.add_filter("camel_case", camel_case);
    env.add_filter("kebab_case", kebab_case);
    env.add_filter("pluralize", plural);
    env.add_filter("trim_prefix", trim_prefix);
    env.add_filter("trim_suffix", trim_suffix);
    env.add_filter("has_prefix", has_prefix);
    env.add_filter("has_suffix", has_suffix);
    env.add_filter("contains", contains);
}

fn snake_case(value: &str) -> String {
    to_snake_case(value)
}

fn pascal_case(value: &str) -> String {
    to_pascal_case(value)
}

fn camel_case(value: &str) -> String {
    to_camel_case(value)
}

fn kebab_case(value: &str) -> String {
    to_kebab_case(value)
}

fn plural(value: &str) -> String {
    pluralize(value)
}

fn trim_prefix(value: &str, prefix: &str) -> String {
    value.strip_prefix(prefix).unwrap_or(value).to_string()
}

fn trim_suffix(value: &str, suffix: &str) -> String {
    value.strip_suffix(suffix).unwrap_or(value).to_string()
}

fn has_prefix(value: &str, prefix: &str) -> bool {
    value.starts_with(prefix)
}

fn has_suffix(value: &str, suffix: &str) -> bool {
    value.ends_with(suffix)
}

fn contains(value: &str, needle: &str) -> bool {
    value.contains(needle)
}

#[cfg(test)]
mod tests {
    use minijinja::context;

    use super::*;

    fn engine() -> TemplateEngine {
        TemplateEngine::new().unwrap()
    }

    #[test]
    fn test_all_templates_load() {
        let engine = engine();
        assert_eq!(engine.names().count(), TEMPLATES.len());
    }

    #[test]
    fn test_engine_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TemplateEngine>();
    }

    #[test]
    fn test_unknown_template() {
        let err = engine().render("missing.rs", context! {}).unwrap_err();
        assert!(matches!(err, TemplateError::UnknownTemplate { ref name } if name == "missing.rs"));
    }

    #[test]
    fn test_strict_undefined_is_render_error() {
        let err = engine()
            .render("frontend/types", context! { names => context! {} })
            .unwrap_err();
        assert!(matches!(err, TemplateError::Render { .. }));
    }

    #[test]
    fn test_filters() {
        let mut env = Environment::new();
        register_filters(&mut env);
        let render = |source: &str| env.render_str(source, context! { s => "OrderItem" }).unwrap();

        assert_eq!(render("{{ s | snake_case }}"), "order_item");
        assert_eq!(render("{{ s | camel_case }}"), "orderItem");
        assert_eq!(render("{{ s | kebab_case }}"), "order-item");
        assert_eq!(render("{{ s | snake_case | pascal_case }}"), "OrderItem");
        assert_eq!(render("{{ 'category' | pluralize }}"), "categories");
        assert_eq!(render("{{ s | trim_prefix('Order') }}"), "Item");
        assert_eq!(render("{{ s | trim_suffix('Item') }}"), "Order");
        assert_eq!(render("{{ s | has_prefix('Order') }}"), "true");
        assert_eq!(render("{{ s | has_suffix('Order') }}"), "false");
        assert_eq!(render("{{ s | contains('rI') }}"), "true");
    }
}
