// mydump-core/src/domain/naming.rs

use chrono::{DateTime, TimeZone};
use std::fmt;

/// strftime layout substituted by the dump engine (RFC3339-like, second precision).
pub const TIMESTAMP_LAYOUT: &str = "%Y-%m-%dT%H:%M:%S";

/// Extension appended by the mysqldump engine.
pub const SQL_EXTENSION: &str = "sql";

/// Output filename pattern: `<label>-<database>-<timestamp layout>`.
///
/// The stem is stored escaped so that a `%` in a label or database name never
/// reaches the formatter as a directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpFilePattern {
    stem: String,
}

impl DumpFilePattern {
    pub fn new(label: &str, database: &str) -> Self {
        let stem = format!("{}-{}-", label, database).replace('%', "%%");
        Self { stem }
    }

    /// Full pattern, timestamp placeholder included.
    pub fn pattern(&self) -> String {
        format!("{}{}", self.stem, TIMESTAMP_LAYOUT)
    }

    /// Substitutes `at` into the pattern and appends `extension`.
    pub fn render<Tz>(&self, at: &DateTime<Tz>, extension: &str) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        format!("{}.{}", at.format(&self.pattern()), extension)
    }
}

impl fmt::Display for DumpFilePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_pattern_starts_with_label_and_database() {
        let pattern = DumpFilePattern::new("backup", "shop");
        assert!(pattern.pattern().starts_with("backup-shop-"));
        assert_eq!(pattern.pattern(), "backup-shop-%Y-%m-%dT%H:%M:%S");
    }

    #[test]
    fn test_render_substitutes_timestamp() {
        let pattern = DumpFilePattern::new("dump", "a,b");
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).single();
        let Some(at) = at else {
            panic!("invalid fixture date");
        };
        assert_eq!(
            pattern.render(&at, SQL_EXTENSION),
            "dump-a,b-2024-03-09T07:05:01.sql"
        );
    }

    #[test]
    fn test_percent_in_label_is_literal() {
        let pattern = DumpFilePattern::new("100%", "shop");
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single();
        let Some(at) = at else {
            panic!("invalid fixture date");
        };
        assert_eq!(
            pattern.render(&at, SQL_EXTENSION),
            "100%-shop-2024-01-01T00:00:00.sql"
        );
    }
}
