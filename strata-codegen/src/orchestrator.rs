//! Whole-entity generation across every layer.

use std::path::PathBuf;

use strata_core::NamingSet;
use strata_ir::{ComponentKind, FieldSource, GenerationRequest, MigrationAction, MigrationOptions};

use crate::{Codegen, Error, Journal, Plan, Result, WriteStats};

/// Layers generated for an entity, in order. Frontend is appended when
/// the request asks for it.
const LAYERS: &[ComponentKind] = &[
    ComponentKind::Model,
    ComponentKind::Repository,
    ComponentKind::Service,
    ComponentKind::Handler,
    ComponentKind::Migration,
];

/// Result of a run.
#[derive(Debug)]
pub struct RunOutcome {
    /// Plans in the order they were (or would be) applied.
    pub plans: Vec<Plan>,
    pub stats: WriteStats,
    /// Saved run journal; `None` for dry runs and runs that wrote nothing.
    pub journal: Option<PathBuf>,
    pub dry_run: bool,
}

/// Plans every layer for an entity, checks them all, then applies them.
pub struct Orchestrator<'c, 'a> {
    codegen: &'c Codegen<'a>,
}

impl<'c, 'a> Orchestrator<'c, 'a> {
    pub fn new(codegen: &'c Codegen<'a>) -> Self {
        Self { codegen }
    }

    /// Component kinds a request runs, in order.
    pub fn components(request: &GenerationRequest) -> Vec<ComponentKind> {
        let mut kinds = LAYERS.to_vec();
        if request.frontend.is_some() {
            kinds.push(ComponentKind::Frontend);
        }
        kinds
    }

    /// Generate every layer of `request.entity`.
    ///
    /// Fields are resolved once and shared by every layer. No file is
    /// written unless every plan was built and checked.
    pub fn run(&self, request: &GenerationRequest, dry_run: bool) -> Result<RunOutcome> {
        let names = NamingSet::new(&request.entity);
        let fields = self
            .codegen
            .resolve(&names, &request.source)
            .map_err(|e| e.step(ComponentKind::Model, &names.type_name))?;

        let mut resolved = request.clone();
        resolved.source = FieldSource::Fields(fields.clone());
        resolved.migration = Some(MigrationOptions::new(
            MigrationAction::Create,
            names.table_name.clone(),
        ));

        let plans = Self::components(request)
            .into_iter()
            .map(|kind| self.codegen.plan_resolved(kind, &names, &fields, &resolved))
            .collect::<Result<Vec<_>>>()?;

        self.execute(plans, dry_run)
    }

    /// Check all plans, then apply them in order unless `dry_run`.
    pub(crate) fn execute(&self, plans: Vec<Plan>, dry_run: bool) -> Result<RunOutcome> {
        for plan in &plans {
            plan.check()
                .map_err(|e| Error::from(e).step(plan.component, &plan.entity))?;
        }

        if dry_run {
            return Ok(RunOutcome {
                plans,
                stats: WriteStats::default(),
                journal: None,
                dry_run,
            });
        }

        let Some(first) = plans.first() else {
            return Ok(RunOutcome {
                plans,
                stats: WriteStats::default(),
                journal: None,
                dry_run,
            });
        };
        let layout = self.codegen.layout();
        let entity = first.entity.clone();
        let stem = NamingSet::new(&entity).file_name;
        let mut journal = Journal::new(entity, self.codegen.settings().timestamp());
        let mut stats = WriteStats::default();

        for plan in &plans {
            match plan.apply(layout, &mut journal) {
                Ok(applied) => stats.add(applied),
                Err(source) => {
                    let saved = match journal.save(layout, &stem) {
                        Ok(path) => layout.relative(&path).display().to_string(),
                        Err(err) => {
                            tracing::error!(error = %err, "failed to save run journal");
                            "<unsaved>".to_string()
                        }
                    };
                    return Err(Error::Apply {
                        component: plan.component,
                        entity: plan.entity.clone(),
                        journal: saved,
                        source,
                    });
                }
            }
        }

        let journal = if journal.is_empty() {
            None
        } else {
            Some(journal.save(layout, &stem)?)
        };

        Ok(RunOutcome {
            plans,
            stats,
            journal,
            dry_run,
        })
    }
}
