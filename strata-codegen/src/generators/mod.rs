//! Component generators.
//!
//! Each generator turns a resolved field list into a [`Plan`]. Generators
//! are stateless; everything they need arrives in a [`GeneratorInput`].

mod frontend;
mod handler;
mod migration;
mod model;
mod repository;
mod service;

use std::path::Path;

use strata_core::{NamingSet, RegistryEntry};
use strata_ir::{ComponentKind, Field, GenerationRequest, ProjectLayout};

pub use frontend::FrontendGenerator;
pub use handler::HandlerGenerator;
pub use migration::MigrationGenerator;
pub use model::ModelGenerator;
pub use repository::RepositoryGenerator;
pub use service::ServiceGenerator;

use crate::{
    Result, Settings,
    context::ContextBuilder,
    engine::TemplateEngine,
    plan::Plan,
};

/// Everything one generator call reads.
pub struct GeneratorInput<'a> {
    pub names: &'a NamingSet,
    pub fields: &'a [Field],
    pub request: &'a GenerationRequest,
    pub engine: &'a TemplateEngine,
    pub layout: &'a ProjectLayout,
    pub settings: &'a Settings,
}

impl<'a> GeneratorInput<'a> {
    /// Context builder preset with the request's driver and features.
    pub fn context(&self) -> ContextBuilder<'a> {
        ContextBuilder::new(self.names, self.fields, self.settings.now)
            .driver(self.request.driver)
            .features(self.request.features)
            .crate_name(self.settings.crate_name.clone())
    }

    pub fn plan(&self, component: ComponentKind) -> Plan {
        Plan::new(component, self.names.type_name.clone())
    }

    /// Registry entry for a `mod.rs` listing, scaffolded when missing.
    pub fn module_entry(
        &self,
        dir: &Path,
        title: &str,
        marker: &str,
        module: &str,
        preamble: &str,
    ) -> Result<RegistryEntry> {
        let scaffold = self.engine.render(
            "registry/mod.rs",
            minijinja::context! { title, marker, preamble },
        )?;
        let line = format!("pub mod {};", module);
        Ok(RegistryEntry::new(
            ProjectLayout::registry_file(dir),
            marker,
            line.clone(),
            line,
            scaffold,
        ))
    }
}

/// One layer of generated output.
pub trait Generator {
    fn kind(&self) -> ComponentKind;

    fn plan(&self, input: &GeneratorInput<'_>) -> Result<Plan>;
}

/// The generator for a component.
pub fn generator(kind: ComponentKind) -> &'static dyn Generator {
    match kind {
        ComponentKind::Model => &ModelGenerator,
        ComponentKind::Repository => &RepositoryGenerator,
        ComponentKind::Service => &ServiceGenerator,
        ComponentKind::Handler => &HandlerGenerator,
        ComponentKind::Migration => &MigrationGenerator,
        ComponentKind::Frontend => &FrontendGenerator,
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use chrono::{NaiveDate, NaiveDateTime};
    use strata_ir::FieldSource;

    use super::*;

    pub fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 17)
            .and_then(|d| d.and_hms_opt(9, 30, 0))
            .unwrap()
    }

    pub fn fields() -> Vec<Field> {
        strata_manifest::parse_fields("title:string!,price:decimal,published:bool").unwrap()
    }

    /// Owns what a [`GeneratorInput`] borrows.
    pub struct Fixture {
        pub names: NamingSet,
        pub fields: Vec<Field>,
        pub request: GenerationRequest,
        pub engine: TemplateEngine,
        pub layout: ProjectLayout,
        pub settings: Settings,
    }

    impl Fixture {
        pub fn new(entity: &str) -> Self {
            let fields = fields();
            Self {
                names: NamingSet::new(entity),
                request: GenerationRequest::new(entity, FieldSource::Fields(fields.clone())),
                fields,
                engine: TemplateEngine::new().unwrap(),
                layout: ProjectLayout::new("/srv/shop"),
                settings: Settings::new("shop").with_now(now()),
            }
        }

        pub fn input(&self) -> GeneratorInput<'_> {
            GeneratorInput {
                names: &self.names,
                fields: &self.fields,
                request: &self.request,
                engine: &self.engine,
                layout: &self.layout,
                settings: &self.settings,
            }
        }

        /// Rendered content of the planned file at `relative`.
        pub fn content(plan: &Plan, relative: &str) -> String {
            plan.preview(&ProjectLayout::new("/srv/shop"))
                .into_iter()
                .find(|p| p.path == Path::new(relative))
                .map(|p| p.content)
                .unwrap_or_else(|| panic!("{} not planned", relative))
        }
    }
}
