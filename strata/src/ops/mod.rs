//! Core operations.
//!
//! This module contains the business logic for strata commands,
//! separated from CLI argument parsing and output rendering.

pub mod generate;
pub mod revert;
pub mod tables;

use std::path::Path;

use strata_codegen::Settings;
use strata_ir::ProjectLayout;
use strata_manifest::Manifest;
use strata_schema::{Introspector, MySqlConnector};

pub use generate::generate;
pub use revert::revert;
pub use tables::tables;

/// A project root with its configuration.
pub struct Project {
    pub layout: ProjectLayout,
    pub manifest: Manifest,
}

impl Project {
    pub fn new(root: &Path, manifest: Manifest) -> Self {
        Self {
            layout: ProjectLayout::new(root),
            manifest,
        }
    }

    pub fn settings(&self) -> Settings {
        Settings::new(self.manifest.project.crate_name())
    }

    /// Introspector over the configured database.
    pub fn introspector(&self) -> strata_manifest::Result<Introspector<MySqlConnector>> {
        let url = self.manifest.database.connection_url()?;
        Ok(Introspector::new(MySqlConnector::new(url)))
    }
}
