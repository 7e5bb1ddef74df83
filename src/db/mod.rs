use crate::{errors::DbError, models::connections::DbBackend};

pub mod config;

/// Scheme prefixes accepted in a connection string, matched case-sensitively.
pub const BACKEND_PREFIXES: [(&str, DbBackend); 5] = [
    ("postgres:", DbBackend::Postgres),
    ("mongodb:", DbBackend::MongoDb),
    ("mysql:", DbBackend::MySql),
    ("sqlserver:", DbBackend::SqlServer),
    ("sqlite3:", DbBackend::Sqlite),
];

/// Detects the backend a connection string targets from its scheme prefix.
pub fn classify(conn_string: &str) -> Result<DbBackend, DbError> {
    BACKEND_PREFIXES
        .iter()
        .find(|(prefix, _)| conn_string.starts_with(prefix))
        .map(|&(_, backend)| backend)
        .ok_or_else(|| DbError::UnsupportedBackend(unsupported_message(conn_string)))
}

// Only a URI-shaped scheme is echoed back; any other text may carry credentials.
fn unsupported_message(conn_string: &str) -> String {
    if conn_string.is_empty() {
        return "empty connection string, db is not yet supported".to_string();
    }
    match conn_string.split_once(':') {
        Some((scheme, _)) if is_uri_scheme(scheme) => {
            format!("db \"{}\" is not yet supported", scheme)
        }
        _ => "db is not yet supported".to_string(),
    }
}

/// `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`
fn is_uri_scheme(candidate: &str) -> bool {
    let mut chars = candidate.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}
