//! Generation requests and their options.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Field;

/// Where the fields of an entity come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSource {
    /// A field DSL string (`title:string!,price:decimal`).
    Dsl(String),
    /// A live database table.
    Table(String),
    /// The previously generated model, with an optional DSL fallback.
    Model { fallback_dsl: Option<String> },
    /// Fields resolved by the caller.
    Fields(Vec<Field>),
}

/// Optional behaviour toggled in generated layers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Features {
    /// Read-through cache in the service layer.
    pub cache: bool,
    /// Authentication guard on handler routes.
    pub auth: bool,
    /// `deleted_at` column and soft delete queries.
    pub soft_delete: bool,
}

/// Relational database driver, selecting migration dialect and directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Driver {
    #[default]
    Mysql,
    Postgres,
    Sqlite,
}

impl Driver {
    pub fn as_str(&self) -> &'static str {
        match self {
            Driver::Mysql => "mysql",
            Driver::Postgres => "postgres",
            Driver::Sqlite => "sqlite",
        }
    }
}

/// Structural action of a migration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MigrationAction {
    Create,
    Alter,
    Drop,
}

impl MigrationAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            MigrationAction::Create => "create",
            MigrationAction::Alter => "alter",
            MigrationAction::Drop => "drop",
        }
    }
}

/// Frontend area a page belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleType {
    #[default]
    Admin,
    Public,
}

impl ModuleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleType::Admin => "admin",
            ModuleType::Public => "public",
        }
    }
}

/// Frontend framework for UI scaffolds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    #[default]
    React,
    Vue,
}

impl Framework {
    pub fn as_str(&self) -> &'static str {
        match self {
            Framework::React => "react",
            Framework::Vue => "vue",
        }
    }

    /// File extension of page components.
    pub fn page_extension(&self) -> &'static str {
        match self {
            Framework::React => "tsx",
            Framework::Vue => "vue",
        }
    }
}

/// The component generators, in orchestration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    Model,
    Repository,
    Service,
    Handler,
    Migration,
    Frontend,
}

impl ComponentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::Model => "model",
            ComponentKind::Repository => "repository",
            ComponentKind::Service => "service",
            ComponentKind::Handler => "handler",
            ComponentKind::Migration => "migration",
            ComponentKind::Frontend => "frontend",
        }
    }
}

macro_rules! display_from_str {
    ($ty:ident, $expected:literal, { $($text:literal => $variant:expr),+ $(,)? }) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_lowercase().as_str() {
                    $($text => Ok($variant),)+
                    _ => Err(format!("unknown value '{}', expected {}", s, $expected)),
                }
            }
        }
    };
}

display_from_str!(Driver, "'mysql', 'postgres' or 'sqlite'", {
    "mysql" => Driver::Mysql,
    "postgres" => Driver::Postgres,
    "postgresql" => Driver::Postgres,
    "sqlite" => Driver::Sqlite,
});
display_from_str!(MigrationAction, "'create', 'alter' or 'drop'", {
    "create" => MigrationAction::Create,
    "alter" => MigrationAction::Alter,
    "drop" => MigrationAction::Drop,
});
display_from_str!(ModuleType, "'admin' or 'public'", {
    "admin" => ModuleType::Admin,
    "public" => ModuleType::Public,
});
display_from_str!(Framework, "'react' or 'vue'", {
    "react" => Framework::React,
    "vue" => Framework::Vue,
});
display_from_str!(ComponentKind, "a component name", {
    "model" => ComponentKind::Model,
    "repository" => ComponentKind::Repository,
    "service" => ComponentKind::Service,
    "handler" => ComponentKind::Handler,
    "migration" => ComponentKind::Migration,
    "frontend" => ComponentKind::Frontend,
});

/// Migration-specific options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationOptions {
    pub action: MigrationAction,
    /// Table the migration operates on.
    pub table: String,
    /// Migration name; defaults to `<action>_<table>_table`.
    pub name: Option<String>,
}

impl MigrationOptions {
    pub fn new(action: MigrationAction, table: impl Into<String>) -> Self {
        Self {
            action,
            table: table.into(),
            name: None,
        }
    }

    pub fn name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("{}_{}_table", self.action.as_str(), self.table))
    }
}

/// Frontend-specific options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrontendOptions {
    pub module: ModuleType,
    pub framework: Framework,
}

/// Per-generator configuration. Immutable for one generator call.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Entity name in any casing.
    pub entity: String,
    pub source: FieldSource,
    pub features: Features,
    pub driver: Driver,
    pub migration: Option<MigrationOptions>,
    pub frontend: Option<FrontendOptions>,
}

impl GenerationRequest {
    pub fn new(entity: impl Into<String>, source: FieldSource) -> Self {
        Self {
            entity: entity.into(),
            source,
            features: Features::default(),
            driver: Driver::default(),
            migration: None,
            frontend: None,
        }
    }

    pub fn with_features(mut self, features: Features) -> Self {
        self.features = features;
        self
    }

    pub fn with_driver(mut self, driver: Driver) -> Self {
        self.driver = driver;
        self
    }

    pub fn with_migration(mut self, migration: MigrationOptions) -> Self {
        self.migration = Some(migration);
        self
    }

    pub fn with_frontend(mut self, frontend: FrontendOptions) -> Self {
        self.frontend = Some(frontend);
        self
    }
}
