use log::debug;

use crate::{
    errors::DbError,
    models::{
        connections::PersistenceConfig,
        options::{Options, TelemetryOptions},
    },
};

use super::classify;

/// Assembles the persistence config from server options.
///
/// Classification failures are returned unchanged. The three option strings
/// are copied verbatim, empty table names included.
pub fn build_config<O>(options: &O) -> Result<PersistenceConfig, DbError>
where
    O: TelemetryOptions + ?Sized,
{
    let conn_string = options.conn_string();
    let backend = classify(conn_string)?;
    debug!("Resolved persistence backend: {}", backend);

    Ok(PersistenceConfig::from_parts(
        backend,
        conn_string,
        options.scripts_table(),
        options.events_table(),
    ))
}

impl TryFrom<&Options> for PersistenceConfig {
    type Error = DbError;

    fn try_from(options: &Options) -> Result<Self, Self::Error> {
        build_config(options)
    }
}
