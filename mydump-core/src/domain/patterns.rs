// mydump-core/src/domain/patterns.rs

use regex::Regex;

use crate::domain::error::DomainError;

/// Compiled ignore / structure-only table patterns.
///
/// Each line is a literal table name or a regular expression, matched against the
/// whole table name. Blank lines are kept in the raw list but never match.
#[derive(Debug, Clone, Default)]
pub struct TablePatterns {
    rules: Vec<Regex>,
}

impl TablePatterns {
    pub fn compile<S: AsRef<str>>(lines: &[S]) -> Result<Self, DomainError> {
        let mut rules = Vec::with_capacity(lines.len());

        for line in lines {
            let pattern = line.as_ref().trim();
            if pattern.is_empty() {
                continue;
            }

            let anchored = format!("^(?:{})$", pattern);
            let rule = Regex::new(&anchored).map_err(|e| DomainError::InvalidTablePattern {
                pattern: pattern.to_string(),
                reason: e.to_string(),
            })?;
            rules.push(rule);
        }

        Ok(Self { rules })
    }

    pub fn matches(&self, table: &str) -> bool {
        self.rules.iter().any(|rule| rule.is_match(table))
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn test_literal_and_regex_patterns() -> Result<()> {
        let patterns = TablePatterns::compile(&["users", "log_.*"])?;
        assert!(patterns.matches("users"));
        assert!(patterns.matches("log_2024"));
        assert!(!patterns.matches("users_archive"));
        assert!(!patterns.matches("audit_log_x"));
        Ok(())
    }

    #[test]
    fn test_blank_lines_never_match() -> Result<()> {
        let patterns = TablePatterns::compile(&["", "  ", "orders"])?;
        assert_eq!(patterns.len(), 1);
        assert!(!patterns.matches(""));
        Ok(())
    }

    #[test]
    fn test_invalid_regex_is_rejected() {
        let err = TablePatterns::compile(&["broken[("]);
        assert!(matches!(
            err,
            Err(DomainError::InvalidTablePattern { ref pattern, .. }) if pattern == "broken[("
        ));
    }
}
