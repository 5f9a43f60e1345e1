use strata_core::NamingSet;
use strata_ir::{Field, FieldSource, ProjectLayout};

use crate::{Error, FieldManifest, Result, TableSource, reflect::reflect_model};

/// Turns a [`FieldSource`] into the ordered fields of an entity.
pub struct FieldResolver<'a> {
    layout: ProjectLayout,
    tables: Option<&'a dyn TableSource>,
}

impl<'a> FieldResolver<'a> {
    pub fn new(layout: ProjectLayout) -> Self {
        Self {
            layout,
            tables: None,
        }
    }

    /// Use `tables` for [`FieldSource::Table`].
    pub fn with_tables(mut self, tables: &'a dyn TableSource) -> Self {
        self.tables = Some(tables);
        self
    }

    pub fn resolve(&self, names: &NamingSet, source: &FieldSource) -> Result<Vec<Field>> {
        match source {
            FieldSource::Dsl(dsl) => Ok(strata_manifest::parse_fields(dsl)?),
            FieldSource::Fields(fields) => Ok(fields.clone()),
            FieldSource::Table(table) => {
                let tables = self.tables.ok_or(Error::NoDatabase)?;
                Ok(tables.fields_for_table(table)?)
            }
            FieldSource::Model { fallback_dsl } => self.from_model(names, fallback_dsl.as_deref()),
        }
    }

    /// Field list, else reflection of the model, else the fallback DSL.
    fn from_model(&self, names: &NamingSet, fallback_dsl: Option<&str>) -> Result<Vec<Field>> {
        let fields_file = self.layout.fields_file(names);
        if let Some(manifest) = FieldManifest::load(&fields_file)? {
            tracing::debug!(path = %fields_file.display(), "using persisted field list");
            return Ok(manifest.fields);
        }

        let model_file = self.layout.model_file(names);
        match reflect_model(&model_file, &names.type_name) {
            Ok(fields) => {
                tracing::warn!(
                    entity = %names.type_name,
                    path = %model_file.display(),
                    "no persisted field list, reflected fields from the model source"
                );
                Ok(fields)
            }
            Err(err) => match fallback_dsl {
                Some(dsl) => {
                    tracing::warn!(
                        entity = %names.type_name,
                        error = %err,
                        "model reflection failed, using --fields"
                    );
                    Ok(strata_manifest::parse_fields(dsl)?)
                }
                None => Err(err.into()),
            },
        }
    }
}
