//! Layered code generation for strata.
//!
//! # Pipeline
//!
//! ```text
//! FieldSource ─► FieldResolver ─► fields ─► Generator ─► Plan ─► check ─► apply ─► Journal
//!                                             │
//!                                    TemplateContext ─► TemplateEngine
//! ```
//!
//! [`Codegen`] runs one generator; [`Orchestrator`] runs every layer for an
//! entity, checking all plans before writing anything.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

pub mod context;
mod engine;
mod error;
pub mod generators;
mod journal;
mod orchestrator;
mod plan;

use chrono::NaiveDateTime;
use strata_core::NamingSet;
use strata_ir::{ComponentKind, Field, FieldSource, GenerationRequest, ProjectLayout};
use strata_schema::{FieldResolver, TableSource};

pub use context::{ContextBuilder, Dialect, FieldView, TemplateContext};
pub use engine::TemplateEngine;
pub use error::{Error, ErrorKind, Result, TemplateError};
pub use generators::{Generator, GeneratorInput, generator};
pub use journal::{Journal, JournalEntry, RevertReport};
pub use orchestrator::{Orchestrator, RunOutcome};
pub use plan::{FileOp, Plan, PreviewEntry, WriteStats};

/// Values fixed for a whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Crate name of the generated project.
    pub crate_name: String,
    /// Clock reading used for years, migration prefixes and journals.
    pub now: NaiveDateTime,
}

impl Settings {
    pub fn new(crate_name: impl Into<String>) -> Self {
        Self {
            crate_name: crate_name.into(),
            now: chrono::Local::now().naive_local(),
        }
    }

    pub fn with_now(mut self, now: NaiveDateTime) -> Self {
        self.now = now;
        self
    }

    /// `YYYYMMDDHHMMSS`
    pub fn timestamp(&self) -> String {
        self.now.format("%Y%m%d%H%M%S").to_string()
    }
}

/// Runs component generators against one project tree.
pub struct Codegen<'a> {
    engine: TemplateEngine,
    layout: ProjectLayout,
    resolver: FieldResolver<'a>,
    settings: Settings,
}

impl<'a> Codegen<'a> {
    pub fn new(layout: ProjectLayout, settings: Settings) -> Result<Self> {
        Ok(Self {
            engine: TemplateEngine::new()?,
            resolver: FieldResolver::new(layout.clone()),
            layout,
            settings,
        })
    }

    /// Resolve [`FieldSource::Table`] through `tables`.
    pub fn with_tables(mut self, tables: &'a dyn TableSource) -> Self {
        self.resolver = self.resolver.with_tables(tables);
        self
    }

    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn resolve(&self, names: &NamingSet, source: &FieldSource) -> Result<Vec<Field>> {
        Ok(self.resolver.resolve(names, source)?)
    }

    /// Plan one component without touching the disk.
    pub fn plan(&self, kind: ComponentKind, request: &GenerationRequest) -> Result<Plan> {
        let names = NamingSet::new(&request.entity);
        let fields = self
            .resolve(&names, &request.source)
            .map_err(|e| e.step(kind, &names.type_name))?;
        self.plan_resolved(kind, &names, &fields, request)
    }

    pub(crate) fn plan_resolved(
        &self,
        kind: ComponentKind,
        names: &NamingSet,
        fields: &[Field],
        request: &GenerationRequest,
    ) -> Result<Plan> {
        let input = GeneratorInput {
            names,
            fields,
            request,
            engine: &self.engine,
            layout: &self.layout,
            settings: &self.settings,
        };
        tracing::debug!(component = %kind, entity = %names.type_name, "planning");
        generator(kind)
            .plan(&input)
            .map_err(|e| e.step(kind, &names.type_name))
    }

    /// Plan, check and apply one component, saving a run journal.
    pub fn generate(&self, kind: ComponentKind, request: &GenerationRequest) -> Result<RunOutcome> {
        let plan = self.plan(kind, request)?;
        Orchestrator::new(self).execute(vec![plan], false)
    }

    /// Plan one component and report it without writing.
    pub fn preview(&self, kind: ComponentKind, request: &GenerationRequest) -> Result<RunOutcome> {
        let plan = self.plan(kind, request)?;
        Orchestrator::new(self).execute(vec![plan], true)
    }
}
