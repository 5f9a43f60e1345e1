//! Output path conventions of a generated project.

use std::path::{Path, PathBuf};

use strata_core::NamingSet;

use crate::{Driver, Framework, ModuleType};

/// Directory holding strata's own state inside a project.
pub const STATE_DIR: &str = ".strata";

/// Resolves where each generated artifact lives under a project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    root: PathBuf,
}

impl ProjectLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path relative to the root, for display and journals.
    pub fn relative<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(&self.root).unwrap_or(path)
    }

    pub fn models_dir(&self) -> PathBuf {
        self.root.join("src").join("models")
    }

    pub fn model_file(&self, names: &NamingSet) -> PathBuf {
        self.models_dir().join(format!("{}.rs", names.file_name))
    }

    pub fn nullable_file(&self) -> PathBuf {
        self.models_dir().join("nullable.rs")
    }

    pub fn repositories_dir(&self) -> PathBuf {
        self.root.join("src").join("repositories")
    }

    pub fn repository_file(&self, names: &NamingSet) -> PathBuf {
        self.repositories_dir()
            .join(format!("{}_repository.rs", names.file_name))
    }

    pub fn services_dir(&self) -> PathBuf {
        self.root.join("src").join("services")
    }

    pub fn service_file(&self, names: &NamingSet) -> PathBuf {
        self.services_dir()
            .join(format!("{}_service.rs", names.file_name))
    }

    pub fn handlers_dir(&self) -> PathBuf {
        self.root.join("src").join("handlers")
    }

    pub fn handler_file(&self, names: &NamingSet) -> PathBuf {
        self.handlers_dir()
            .join(format!("{}_handler.rs", names.file_name))
    }

    pub fn routes_file(&self) -> PathBuf {
        self.root.join("src").join("routes.rs")
    }

    /// Shared server state the services are registered in.
    pub fn state_file(&self) -> PathBuf {
        self.root.join("src").join("state.rs")
    }

    /// Module registry (`mod.rs`) of a layer directory.
    pub fn registry_file(dir: &Path) -> PathBuf {
        dir.join("mod.rs")
    }

    pub fn migrations_dir(&self, driver: Driver) -> PathBuf {
        self.root.join("migrations").join(driver.as_str())
    }

    /// Forward and rollback migration files sharing one timestamp prefix.
    pub fn migration_files(&self, driver: Driver, timestamp: &str, name: &str) -> (PathBuf, PathBuf) {
        let dir = self.migrations_dir(driver);
        (
            dir.join(format!("{}_{}.up.sql", timestamp, name)),
            dir.join(format!("{}_{}.down.sql", timestamp, name)),
        )
    }

    pub fn frontend_dir(&self, framework: Framework, module: ModuleType) -> PathBuf {
        self.root
            .join("web")
            .join(framework.as_str())
            .join("src")
            .join(module.as_str())
    }

    pub fn frontend_page(&self, framework: Framework, module: ModuleType, names: &NamingSet) -> PathBuf {
        self.frontend_dir(framework, module)
            .join("pages")
            .join(&names.lower_name)
            .join(format!("index.{}", framework.page_extension()))
    }

    pub fn frontend_service(&self, framework: Framework, module: ModuleType, names: &NamingSet) -> PathBuf {
        self.frontend_dir(framework, module)
            .join("services")
            .join(format!("{}.ts", names.lower_name))
    }

    pub fn frontend_types(&self, framework: Framework, module: ModuleType, names: &NamingSet) -> PathBuf {
        self.frontend_dir(framework, module)
            .join("types")
            .join(format!("{}.ts", names.lower_name))
    }

    pub fn frontend_routes(&self, framework: Framework, module: ModuleType) -> PathBuf {
        self.frontend_dir(framework, module).join("routes.ts")
    }

    /// English message bundle of a frontend module.
    pub fn frontend_locales(&self, framework: Framework, module: ModuleType) -> PathBuf {
        self.frontend_dir(framework, module)
            .join("locales")
            .join("en.ts")
    }

    /// Persisted field list of an entity.
    pub fn fields_file(&self, names: &NamingSet) -> PathBuf {
        self.root
            .join(STATE_DIR)
            .join("fields")
            .join(format!("{}.toml", names.file_name))
    }

    pub fn runs_dir(&self) -> PathBuf {
        self.root.join(STATE_DIR).join("runs")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_paths() {
        let layout = ProjectLayout::new("/app");
        let names = NamingSet::new("OrderItem");

        assert_eq!(
            layout.model_file(&names),
            PathBuf::from("/app/src/models/order_item.rs")
        );
        assert_eq!(
            layout.repository_file(&names),
            PathBuf::from("/app/src/repositories/order_item_repository.rs")
        );
        assert_eq!(
            layout.handler_file(&names),
            PathBuf::from("/app/src/handlers/order_item_handler.rs")
        );
        assert_eq!(
            layout.fields_file(&names),
            PathBuf::from("/app/.strata/fields/order_item.toml")
        );
        assert_eq!(layout.state_file(), PathBuf::from("/app/src/state.rs"));
    }

    #[test]
    fn test_migration_paths_share_prefix() {
        let layout = ProjectLayout::new("/app");
        let (up, down) = layout.migration_files(Driver::Mysql, "20240102030405", "create_invoices_table");
        assert_eq!(
            up,
            PathBuf::from("/app/migrations/mysql/20240102030405_create_invoices_table.up.sql")
        );
        assert_eq!(
            down,
            PathBuf::from("/app/migrations/mysql/20240102030405_create_invoices_table.down.sql")
        );
    }

    #[test]
    fn test_frontend_paths() {
        let layout = ProjectLayout::new("/app");
        let names = NamingSet::new("OrderItem");

        assert_eq!(
            layout.frontend_page(Framework::Vue, ModuleType::Public, &names),
            PathBuf::from("/app/web/vue/src/public/pages/orderitem/index.vue")
        );
        assert_eq!(
            layout.frontend_service(Framework::React, ModuleType::Admin, &names),
            PathBuf::from("/app/web/react/src/admin/services/orderitem.ts")
        );
        assert_eq!(
            layout.frontend_routes(Framework::React, ModuleType::Admin),
            PathBuf::from("/app/web/react/src/admin/routes.ts")
        );
        assert_eq!(
            layout.frontend_locales(Framework::Vue, ModuleType::Admin),
            PathBuf::from("/app/web/vue/src/admin/locales/en.ts")
        );
    }
}
