use std::env::{self, VarError};

use crate::errors::DbError;

pub const CONN_STRING_VAR: &str = "TELEMETRY_CONN_STRING";
pub const SCRIPTS_TABLE_VAR: &str = "TELEMETRY_SCRIPTS_TABLE";
pub const EVENTS_TABLE_VAR: &str = "TELEMETRY_EVENTS_TABLE";

/// Read-only view of the server options the persistence config is built from.
pub trait TelemetryOptions {
    fn conn_string(&self) -> &str;
    fn scripts_table(&self) -> &str;
    fn events_table(&self) -> &str;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    pub conn_string: String,
    pub scripts_table: String,
    pub events_table: String,
}

impl Options {
    pub fn new(
        conn_string: impl Into<String>,
        scripts_table: impl Into<String>,
        events_table: impl Into<String>,
    ) -> Self {
        Self {
            conn_string: conn_string.into(),
            scripts_table: scripts_table.into(),
            events_table: events_table.into(),
        }
    }

    /// Loads options from the process environment.
    pub fn from_env() -> Result<Self, DbError> {
        Self::from_lookup(|key| env::var(key))
    }

    /// Loads options through an arbitrary key lookup with `env::var` semantics.
    /// The connection string is required; table names fall back to empty strings.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DbError>
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let conn_string = read_var(&lookup, CONN_STRING_VAR)?
            .ok_or_else(|| DbError::Config(format!("{} must be set", CONN_STRING_VAR)))?;

        Ok(Self {
            conn_string,
            scripts_table: read_var(&lookup, SCRIPTS_TABLE_VAR)?.unwrap_or_default(),
            events_table: read_var(&lookup, EVENTS_TABLE_VAR)?.unwrap_or_default(),
        })
    }
}

fn read_var<F>(lookup: &F, key: &str) -> Result<Option<String>, DbError>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    match lookup(key) {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(_)) => {
            Err(DbError::Config(format!("{} is not valid unicode", key)))
        }
    }
}

impl TelemetryOptions for Options {
    fn conn_string(&self) -> &str {
        &self.conn_string
    }

    fn scripts_table(&self) -> &str {
        &self.scripts_table
    }

    fn events_table(&self) -> &str {
        &self.events_table
    }
}
