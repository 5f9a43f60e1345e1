mod completions;
mod frontend;
mod generate;
mod init;
mod layer;
mod migration;
mod revert;
mod tables;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use frontend::FrontendCommand;
use generate::GenerateCommand;
use init::InitCommand;
use layer::LayerCommand;
use migration::MigrationCommand;
use revert::RevertCommand;
use strata_ir::{ComponentKind, Driver, Features, FieldSource, GenerationRequest};
use strata_manifest::{MANIFEST_FILE, StrataToml};
use strata_schema::TableSource;
use tables::TablesCommand;

use crate::{
    ops::{
        self, Project,
        generate::{GenerateOptions, Target},
    },
    reports::{Report, TerminalOutput},
};

/// Extension trait for exiting on diagnostics with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for strata_manifest::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

impl<T> UnwrapOrExit<T> for strata_codegen::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                let mut current = e;
                loop {
                    match current {
                        strata_codegen::Error::Step {
                            component,
                            entity,
                            source,
                        } => {
                            eprintln!("error: {} generation failed for '{}'", component, entity);
                            current = *source;
                        }
                        other => {
                            eprintln!("{:?}", miette::Report::new(other));
                            std::process::exit(1);
                        }
                    }
                }
            }
        }
    }
}

/// Options shared by every command.
#[derive(Args)]
pub(crate) struct GlobalArgs {
    /// Path to strata.toml (defaults to <output>/strata.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Project root to generate into
    #[arg(short, long, global = true, default_value = ".")]
    pub output: PathBuf,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl GlobalArgs {
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(|| self.output.join(MANIFEST_FILE))
    }

    /// The project, configured from strata.toml when present.
    pub fn project(&self) -> Project {
        let file = StrataToml::open_or_default(self.config_path(), &self.output).unwrap_or_exit();
        Project::new(&self.output, file.manifest().clone())
    }
}

/// Run a generation request and print its report.
pub(crate) fn execute(
    project: &Project,
    request: &GenerationRequest,
    target: Target,
    dry_run: bool,
) -> Result<()> {
    let introspector = match &request.source {
        FieldSource::Table(_) => Some(project.introspector().unwrap_or_exit()),
        _ => None,
    };

    let report = ops::generate(
        project,
        request,
        GenerateOptions {
            target,
            dry_run,
            tables: introspector.as_ref().map(|i| i as &dyn TableSource),
        },
    )
    .unwrap_or_exit();

    report.render(&mut TerminalOutput::new());
    Ok(())
}

/// Where an entity's fields come from.
#[derive(Args, Debug, Clone, Default)]
pub(crate) struct SourceArgs {
    /// Field DSL, e.g. "title:string!,price:decimal"
    #[arg(short, long, conflicts_with = "table")]
    pub fields: Option<String>,

    /// Read fields from this database table
    #[arg(short, long)]
    pub table: Option<String>,
}

impl SourceArgs {
    /// Field source for a step that generates `kind`.
    ///
    /// Model generation parses `--fields` directly. Later layers read the
    /// existing model first and fall back to `--fields`.
    pub fn source(&self, kind: ComponentKind) -> FieldSource {
        match (&self.table, &self.fields) {
            (Some(table), _) => FieldSource::Table(table.clone()),
            (None, Some(dsl)) if kind == ComponentKind::Model => FieldSource::Dsl(dsl.clone()),
            (None, fallback) => FieldSource::Model {
                fallback_dsl: fallback.clone(),
            },
        }
    }
}

/// Optional behaviour, added on top of strata.toml.
#[derive(Args, Debug, Clone, Default)]
pub(crate) struct FeatureArgs {
    /// Read-through cache in the service layer
    #[arg(long)]
    pub cache: bool,

    /// Authentication guard on handler routes
    #[arg(long)]
    pub auth: bool,

    /// Soft delete with a deleted_at column
    #[arg(long)]
    pub soft_delete: bool,

    /// Database driver (mysql, postgres, sqlite)
    #[arg(long)]
    pub driver: Option<Driver>,
}

impl FeatureArgs {
    pub fn features(&self, configured: Features) -> Features {
        Features {
            cache: configured.cache || self.cache,
            auth: configured.auth || self.auth,
            soft_delete: configured.soft_delete || self.soft_delete,
        }
    }

    pub fn driver(&self, configured: Driver) -> Driver {
        self.driver.unwrap_or(configured)
    }
}

#[derive(Parser)]
#[command(name = "strata")]
#[command(version)]
#[command(about = "Generate layered CRUD code from a field DSL or a database table")]
pub(crate) struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.global.verbose
    }

    pub fn run(&self) -> Result<()> {
        let global = &self.global;
        match &self.command {
            Commands::Model(cmd) => cmd.run(global, ComponentKind::Model),
            Commands::Repository(cmd) => cmd.run(global, ComponentKind::Repository),
            Commands::Service(cmd) => cmd.run(global, ComponentKind::Service),
            Commands::Handler(cmd) => cmd.run(global, ComponentKind::Handler),
            Commands::Migration(cmd) => cmd.run(global),
            Commands::Frontend(cmd) => cmd.run(global),
            Commands::Generate(cmd) => cmd.run(global),
            Commands::Tables(cmd) => cmd.run(global),
            Commands::Revert(cmd) => cmd.run(global),
            Commands::Init(cmd) => cmd.run(global),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a data model
    Model(LayerCommand),

    /// Generate a repository over an entity's table
    Repository(LayerCommand),

    /// Generate a service layer
    Service(LayerCommand),

    /// Generate HTTP handlers and register their routes
    Handler(LayerCommand),

    /// Generate a forward and rollback SQL migration pair
    Migration(MigrationCommand),

    /// Generate a frontend page, API client and types
    Frontend(FrontendCommand),

    /// Generate every layer of an entity
    Generate(GenerateCommand),

    /// List tables of the configured database
    Tables(TablesCommand),

    /// Undo a run recorded in .strata/runs
    Revert(RevertCommand),

    /// Create strata.toml
    Init(InitCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}
