//! Tables operation - list the tables of the configured database.

use strata_schema::{Connector, IntrospectError, Introspector};

use crate::reports::TablesReport;

pub fn tables<C: Connector>(
    introspector: &Introspector<C>,
) -> Result<TablesReport, IntrospectError> {
    Ok(TablesReport {
        tables: introspector.list_tables()?,
    })
}
