use std::{path::Path, str::FromStr};

use miette::SourceSpan;
use serde::{Deserialize, Serialize};
use strata_ir::{Driver, Features, Framework, FrontendOptions, ModuleType};

use crate::{Error, Result};

/// Default environment variable holding the database URL.
pub const DEFAULT_DATABASE_ENV: &str = "DATABASE_URL";

/// Root manifest for strata.toml
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub project: ProjectConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub features: Features,

    #[serde(default)]
    pub frontend: FrontendConfig,
}

/// Project metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Project name
    pub name: String,

    /// Crate name used in generated `use` paths; defaults to the project name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crate_name: Option<String>,
}

impl ProjectConfig {
    pub fn crate_name(&self) -> String {
        self.crate_name
            .clone()
            .unwrap_or_else(|| strata_core::to_snake_case(&self.name))
    }
}

/// Relational database settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Migration dialect and introspection driver
    pub driver: Driver,

    /// Connection URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Environment variable holding the connection URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env: Option<String>,
}

impl DatabaseConfig {
    /// Name of the environment variable consulted when no URL is set.
    pub fn env_var(&self) -> &str {
        self.env.as_deref().unwrap_or(DEFAULT_DATABASE_ENV)
    }

    /// Resolve the connection URL from the process environment.
    pub fn connection_url(&self) -> Result<String> {
        self.connection_url_with(|key| std::env::var(key).ok())
    }

    /// Resolve the connection URL with a custom environment lookup.
    pub fn connection_url_with(&self, lookup: impl Fn(&str) -> Option<String>) -> Result<String> {
        if let Some(url) = self.url.as_ref().filter(|url| !url.is_empty()) {
            return Ok(url.clone());
        }
        lookup(self.env_var())
            .filter(|url| !url.is_empty())
            .ok_or_else(|| {
                Box::new(Error::MissingDatabaseUrl {
                    env: self.env_var().to_string(),
                })
            })
    }
}

/// Frontend scaffold settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontendConfig {
    /// Include the frontend step in `strata generate`
    pub enabled: bool,
    pub framework: Framework,
    pub module: ModuleType,
}

impl FrontendConfig {
    pub fn options(&self) -> FrontendOptions {
        FrontendOptions {
            module: self.module,
            framework: self.framework,
        }
    }
}

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_str_with_filename(s, "strata.toml")
    }
}

impl Manifest {
    /// Manifest with default settings for a new project.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            project: ProjectConfig {
                name: name.into(),
                crate_name: None,
            },
            database: DatabaseConfig::default(),
            features: Features::default(),
            frontend: FrontendConfig::default(),
        }
    }

    /// Parse a strata.toml file from the given path
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        Self::from_str_with_filename(&content, &path.display().to_string())
    }

    /// Parse a strata.toml from a string with a custom filename for error reporting
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        let manifest: Self =
            toml::from_str(content).map_err(|e| Error::parse(e, content, filename))?;
        manifest.validate(content, filename)?;
        Ok(manifest)
    }

    /// Render the manifest as TOML.
    pub fn to_toml(&self) -> String {
        toml::to_string(self).unwrap_or_default()
    }

    fn validate(&self, content: &str, filename: &str) -> Result<()> {
        if self.project.name.trim().is_empty() {
            let span = find_key_span(content, "name");
            return Err(Error::validation_at(
                "project name cannot be empty",
                content,
                filename,
                span,
            ));
        }
        if let Some(crate_name) = &self.project.crate_name {
            let valid = crate_name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
                && crate_name
                    .chars()
                    .next()
                    .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
            if !valid {
                let span = find_key_span(content, "crate_name");
                return Err(Error::validation_at(
                    format!("'{}' is not a valid crate name", crate_name),
                    content,
                    filename,
                    span,
                ));
            }
        }
        Ok(())
    }
}

/// Span of the first `key = ...` line in the source.
fn find_key_span(content: &str, key: &str) -> Option<SourceSpan> {
    let mut offset = 0;
    for line in content.split_inclusive('\n') {
        let trimmed = line.trim_start();
        let is_key = trimmed
            .strip_prefix(key)
            .is_some_and(|rest| rest.trim_start().starts_with('='));
        if is_key {
            let start = offset + (line.len() - trimmed.len());
            return Some(SourceSpan::from((start, trimmed.trim_end().len())));
        }
        offset += line.len();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal() {
        let manifest = Manifest::from_str("[project]\nname = \"shop\"\n").unwrap();
        assert_eq!(manifest.project.name, "shop");
        assert_eq!(manifest.project.crate_name(), "shop");
        assert_eq!(manifest.database.driver, Driver::Mysql);
        assert_eq!(manifest.database.env_var(), "DATABASE_URL");
        assert_eq!(manifest.features, Features::default());
        assert!(!manifest.frontend.enabled);
    }

    #[test]
    fn test_parse_full() {
        let content = r#"
[project]
name = "my-shop"

[database]
driver = "postgres"
env = "SHOP_DB"

[features]
cache = true
soft_delete = true

[frontend]
enabled = true
framework = "vue"
module = "public"
"#;
        let manifest = Manifest::from_str(content).unwrap();
        assert_eq!(manifest.project.crate_name(), "my_shop");
        assert_eq!(manifest.database.driver, Driver::Postgres);
        assert!(manifest.features.cache);
        assert!(!manifest.features.auth);
        assert!(manifest.features.soft_delete);
        assert_eq!(manifest.frontend.framework, Framework::Vue);
        assert_eq!(manifest.frontend.options().module, ModuleType::Public);
    }

    #[test]
    fn test_missing_project_is_parse_error() {
        let err = Manifest::from_str("[database]\ndriver = \"mysql\"\n").unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_unknown_driver_is_parse_error() {
        let err =
            Manifest::from_str("[project]\nname = \"shop\"\n[database]\ndriver = \"oracle\"\n")
                .unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_empty_name_is_validation_error() {
        let err = Manifest::from_str("[project]\nname = \"\"\n").unwrap_err();
        match *err {
            Error::Validation { span, .. } => assert_eq!(span.unwrap().offset(), 10),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_connection_url() {
        let mut db = DatabaseConfig::default();
        let url = db
            .connection_url_with(|key| (key == "DATABASE_URL").then(|| "mysql://env".into()))
            .unwrap();
        assert_eq!(url, "mysql://env");

        db.url = Some("mysql://file".into());
        let url = db.connection_url_with(|_| None).unwrap();
        assert_eq!(url, "mysql://file");

        db.url = None;
        db.env = Some("SHOP_DB".into());
        let err = db.connection_url_with(|_| None).unwrap_err();
        assert!(matches!(*err, Error::MissingDatabaseUrl { ref env } if env == "SHOP_DB"));
    }

    #[test]
    fn test_to_toml_round_trip() {
        let mut manifest = Manifest::new("shop");
        manifest.features.soft_delete = true;
        let parsed = Manifest::from_str(&manifest.to_toml()).unwrap();
        assert_eq!(parsed, manifest);
    }
}
