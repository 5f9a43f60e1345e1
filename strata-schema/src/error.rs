use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use crate::{IntrospectError, ReflectError};

pub type Result<T> = std::result::Result<T, Error>;

/// Failure to produce the fields of an entity.
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error(transparent)]
    Dsl(#[from] Box<strata_manifest::Error>),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Introspect(#[from] IntrospectError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Reflect(#[from] ReflectError),

    #[error("no database configured for table introspection")]
    #[diagnostic(help("set [database] in strata.toml"))]
    NoDatabase,

    #[error("failed to read field list '{path}'")]
    SidecarRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse field list '{path}'")]
    #[diagnostic(help("delete the file to fall back to reflecting the model"))]
    SidecarParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize field list of '{entity}'")]
    SidecarSerialize {
        entity: String,
        #[source]
        source: toml::ser::Error,
    },
}
