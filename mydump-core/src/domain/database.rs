// mydump-core/src/domain/database.rs

use crate::domain::error::DomainError;

/// Strips every whitespace character and empty segment from a comma-separated
/// database list: `"a , b,c "` becomes `"a,b,c"`.
///
/// Idempotent: an already normalized list comes back unchanged.
pub fn normalize_database_list(raw: &str) -> String {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();

    compact
        .split(',')
        .filter(|name| !name.is_empty())
        .collect::<Vec<_>>()
        .join(",")
}

/// Normalizes and rejects a list with no database name left in it.
pub fn require_database_list(raw: &str) -> Result<String, DomainError> {
    let normalized = normalize_database_list(raw);
    if normalized.is_empty() {
        return Err(DomainError::EmptyDatabaseName);
    }
    Ok(normalized)
}

/// Splits a normalized list back into individual database names.
pub fn database_names(normalized: &str) -> Vec<&str> {
    normalized.split(',').filter(|n| !n.is_empty()).collect()
}
