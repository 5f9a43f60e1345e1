use std::path::PathBuf;

use miette::Diagnostic;
use strata_core::WriteError;
use strata_ir::ComponentKind;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failure inside the template engine.
#[derive(Debug, Error, Diagnostic)]
pub enum TemplateError {
    #[error("unknown template '{name}'")]
    #[diagnostic(code(strata::template::unknown))]
    UnknownTemplate { name: String },

    #[error("failed to load template '{name}'")]
    #[diagnostic(code(strata::template::load))]
    Load {
        name: String,
        #[source]
        source: minijinja::Error,
    },

    #[error("failed to render template '{name}'")]
    #[diagnostic(code(strata::template::render))]
    Render {
        name: String,
        #[source]
        source: minijinja::Error,
    },
}

/// Broad class of a generation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The field source or request is malformed.
    Definition,
    /// The database could not be read.
    Introspection,
    Template,
    /// A file or registry entry is in the way, or the disk failed.
    WriteConflict,
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Fields(#[from] strata_schema::Error),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    #[diagnostic(
        code(strata::write_conflict),
        help("nothing was written; remove the conflicting file or registry entry and run again")
    )]
    Write(#[from] WriteError),

    #[error("invalid {component} request for '{entity}': {message}")]
    #[diagnostic(code(strata::invalid_request))]
    Invalid {
        component: ComponentKind,
        entity: String,
        message: String,
    },

    #[error("{component} generation failed for '{entity}'")]
    Step {
        component: ComponentKind,
        entity: String,
        #[source]
        source: Box<Error>,
    },

    #[error("{component} generation failed for '{entity}' after files were written")]
    #[diagnostic(help("run 'strata revert {journal}' to undo the partial run"))]
    Apply {
        component: ComponentKind,
        entity: String,
        journal: String,
        #[source]
        source: WriteError,
    },

    #[error("failed to read run journal '{path}'")]
    JournalRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse run journal '{path}'")]
    JournalParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize run journal of '{entity}'")]
    JournalSerialize {
        entity: String,
        #[source]
        source: toml::ser::Error,
    },
}

impl Error {
    pub(crate) fn invalid(
        component: ComponentKind,
        entity: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Error::Invalid {
            component,
            entity: entity.into(),
            message: message.into(),
        }
    }

    pub(crate) fn step(self, component: ComponentKind, entity: &str) -> Self {
        match self {
            Error::Step { .. } | Error::Invalid { .. } => self,
            other => Error::Step {
                component,
                entity: entity.to_string(),
                source: Box::new(other),
            },
        }
    }

    /// Classify the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Fields(strata_schema::Error::Introspect(_))
            | Error::Fields(strata_schema::Error::NoDatabase) => ErrorKind::Introspection,
            Error::Fields(_) | Error::Invalid { .. } => ErrorKind::Definition,
            Error::Template(_) => ErrorKind::Template,
            Error::Write(_)
            | Error::Apply { .. }
            | Error::JournalRead { .. }
            | Error::JournalParse { .. }
            | Error::JournalSerialize { .. } => ErrorKind::WriteConflict,
            Error::Step { source, .. } => source.kind(),
        }
    }
}
