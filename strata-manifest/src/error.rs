use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for strata-manifest operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(help("run 'strata init' to create a new project"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse strata.toml")]
    #[diagnostic(code(strata::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("{message}")]
    #[diagnostic(code(strata::validation_error))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },

    #[error("malformed field '{token}': {reason}")]
    #[diagnostic(
        code(strata::field_dsl),
        help("fields are written as name:type, with a trailing '!' for required, e.g. title:string!,price:decimal")
    )]
    MalformedField {
        #[source_code]
        src: NamedSource<String>,
        #[label("{reason}")]
        span: SourceSpan,
        token: String,
        reason: String,
    },

    #[error("invalid field name '{name}'")]
    #[diagnostic(
        code(strata::field_name),
        help("{reason}. Use only letters, numbers, '-' and '_', starting with a letter or underscore.")
    )]
    InvalidFieldName {
        #[source_code]
        src: NamedSource<String>,
        #[label("invalid identifier")]
        span: SourceSpan,
        name: String,
        reason: String,
    },

    #[error("no database URL configured")]
    #[diagnostic(help(
        "set [database].url in strata.toml or export the '{env}' environment variable"
    ))]
    MissingDatabaseUrl { env: String },
}

impl Error {
    /// Create a parse error from a toml error with source context
    pub fn parse(source: toml::de::Error, src: &str, filename: &str) -> Box<Self> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: NamedSource::new(filename, src.to_string()),
            span,
            source,
        })
    }

    /// Create a validation error with a span
    pub fn validation_at(
        message: impl Into<String>,
        src: &str,
        filename: &str,
        span: Option<SourceSpan>,
    ) -> Box<Self> {
        Box::new(Error::Validation {
            src: NamedSource::new(filename, src.to_string()),
            span,
            message: message.into(),
        })
    }

    pub(crate) fn malformed_field(
        token: &str,
        reason: impl Into<String>,
        src: &str,
        span: impl Into<SourceSpan>,
    ) -> Box<Self> {
        Box::new(Error::MalformedField {
            src: NamedSource::new("fields", src.to_string()),
            span: span.into(),
            token: token.to_string(),
            reason: reason.into(),
        })
    }

    pub(crate) fn invalid_field_name(
        name: &str,
        reason: impl Into<String>,
        src: &str,
        span: impl Into<SourceSpan>,
    ) -> Box<Self> {
        Box::new(Error::InvalidFieldName {
            src: NamedSource::new("fields", src.to_string()),
            span: span.into(),
            name: name.to_string(),
            reason: reason.into(),
        })
    }
}
