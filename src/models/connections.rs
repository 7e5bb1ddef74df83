use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::DbError;

/// Database family a telemetry connection string targets.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DbBackend {
    Postgres,
    MongoDb,
    MySql,
    SqlServer,
    #[serde(rename = "sqlite3")]
    Sqlite,
}

impl DbBackend {
    pub const ALL: [DbBackend; 5] = [
        DbBackend::Postgres,
        DbBackend::MongoDb,
        DbBackend::MySql,
        DbBackend::SqlServer,
        DbBackend::Sqlite,
    ];

    /// Canonical tag spelling, shared with the serialised form.
    pub fn as_str(&self) -> &'static str {
        match self {
            DbBackend::Postgres => "postgres",
            DbBackend::MongoDb => "mongodb",
            DbBackend::MySql => "mysql",
            DbBackend::SqlServer => "sqlserver",
            DbBackend::Sqlite => "sqlite3",
        }
    }

    /// Scheme prefix a connection string must start with for this backend.
    pub fn prefix(&self) -> &'static str {
        match self {
            DbBackend::Postgres => "postgres:",
            DbBackend::MongoDb => "mongodb:",
            DbBackend::MySql => "mysql:",
            DbBackend::SqlServer => "sqlserver:",
            DbBackend::Sqlite => "sqlite3:",
        }
    }
}

impl fmt::Display for DbBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DbBackend {
    type Err = DbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DbBackend::ALL
            .into_iter()
            .find(|backend| backend.as_str() == s)
            .ok_or_else(|| {
                DbError::UnsupportedBackend(format!("db \"{}\" is not yet supported", s))
            })
    }
}

/// Persistence settings resolved once at startup.
///
/// Fields are only reachable through accessors so a constructed value always
/// pairs a backend with a connection string carrying its prefix.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(try_from = "RawPersistenceConfig")]
pub struct PersistenceConfig {
    backend: DbBackend,
    connection_string: String,
    script_target: String,
    event_target: String,
}

impl PersistenceConfig {
    pub(crate) fn from_parts(
        backend: DbBackend,
        connection_string: &str,
        script_target: &str,
        event_target: &str,
    ) -> Self {
        Self {
            backend,
            connection_string: connection_string.to_owned(),
            script_target: script_target.to_owned(),
            event_target: event_target.to_owned(),
        }
    }

    pub fn backend(&self) -> DbBackend {
        self.backend
    }

    pub fn connection_string(&self) -> &str {
        &self.connection_string
    }

    /// Table or collection receiving script-run records.
    pub fn script_target(&self) -> &str {
        &self.script_target
    }

    /// Table or collection receiving event records.
    pub fn event_target(&self) -> &str {
        &self.event_target
    }

    /// Renders the diagnostic document.
    pub fn to_json(&self) -> Result<String, DbError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[derive(Deserialize)]
struct RawPersistenceConfig {
    backend: DbBackend,
    connection_string: String,
    script_target: String,
    event_target: String,
}

impl TryFrom<RawPersistenceConfig> for PersistenceConfig {
    type Error = DbError;

    fn try_from(raw: RawPersistenceConfig) -> Result<Self, Self::Error> {
        let detected = crate::db::classify(&raw.connection_string)?;
        if detected != raw.backend {
            return Err(DbError::Config(format!(
                "backend \"{}\" does not match connection string scheme \"{}\"",
                raw.backend, detected
            )));
        }

        Ok(Self {
            backend: raw.backend,
            connection_string: raw.connection_string,
            script_target: raw.script_target,
            event_target: raw.event_target,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_spelling_matches_serde() {
        for backend in DbBackend::ALL {
            let json = serde_json::to_value(backend).unwrap();
            assert_eq!(json, serde_json::Value::String(backend.as_str().to_string()));
            assert_eq!(backend.as_str().parse::<DbBackend>().unwrap(), backend);
        }
    }

    #[test]
    fn test_prefix_is_tag_with_colon() {
        for backend in DbBackend::ALL {
            assert_eq!(backend.prefix(), format!("{}:", backend));
        }
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        assert!(matches!(
            "sqlite".parse::<DbBackend>(),
            Err(DbError::UnsupportedBackend(_))
        ));
        assert!("Postgres".parse::<DbBackend>().is_err());
    }

    #[test]
    fn test_serialized_keys() {
        let config =
            PersistenceConfig::from_parts(DbBackend::Sqlite, "sqlite3:/tmp/t.db", "s", "e");
        let value = serde_json::to_value(&config).unwrap();
        let obj = value.as_object().unwrap();

        assert_eq!(obj.len(), 4);
        assert_eq!(obj["backend"], "sqlite3");
        assert_eq!(obj["connection_string"], "sqlite3:/tmp/t.db");
        assert_eq!(obj["script_target"], "s");
        assert_eq!(obj["event_target"], "e");
    }

    #[test]
    fn test_deserialize_rejects_mismatched_backend() {
        let doc = r#"{
            "backend": "mysql",
            "connection_string": "postgres://host/db",
            "script_target": "s",
            "event_target": "e"
        }"#;

        assert!(serde_json::from_str::<PersistenceConfig>(doc).is_err());
    }

    #[test]
    fn test_deserialize_rejects_unsupported_connection_string() {
        let raw = RawPersistenceConfig {
            backend: DbBackend::Postgres,
            connection_string: "redis://h".to_string(),
            script_target: "s".to_string(),
            event_target: "e".to_string(),
        };
        assert!(matches!(
            PersistenceConfig::try_from(raw),
            Err(DbError::UnsupportedBackend(_))
        ));

        let doc = r#"{
            "backend": "postgres",
            "connection_string": "redis://h",
            "script_target": "s",
            "event_target": "e"
        }"#;
        let err = serde_json::from_str::<PersistenceConfig>(doc).unwrap_err();
        assert!(err.to_string().contains("not yet supported"));
    }

    #[test]
    fn test_deserialize_rejects_unknown_backend_spelling() {
        let doc = r#"{
            "backend": "sqlite",
            "connection_string": "sqlite3:/var/lib/t.db",
            "script_target": "s",
            "event_target": "e"
        }"#;

        assert!(serde_json::from_str::<PersistenceConfig>(doc).is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let config = PersistenceConfig::from_parts(
            DbBackend::MongoDb,
            "mongodb://localhost:27017",
            "scripts",
            "events",
        );
        let json = config.to_json().unwrap();
        let parsed: PersistenceConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
