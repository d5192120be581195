//! SQL identifier handling for generated engine queries.
//!
//! Column names come straight from file headers and may contain spaces,
//! quotes, or reserved words, so they are always emitted as quoted
//! identifiers. Relation names are generated internally and held to a strict
//! pattern.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{ColmatchError, Result};

/// Maximum length of a generated relation name.
pub const MAX_RELATION_NAME_LEN: usize = 128;

/// SQL identifier validation and escaping utilities.
pub struct SqlSecurity;

impl SqlSecurity {
    /// Quotes an identifier, doubling any embedded double quotes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use colmatch::security::SqlSecurity;
    ///
    /// assert_eq!(SqlSecurity::quote_identifier("customer id"), "\"customer id\"");
    /// assert_eq!(SqlSecurity::quote_identifier("a\"b"), "\"a\"\"b\"");
    /// ```
    pub fn quote_identifier(identifier: &str) -> String {
        let escaped = identifier.replace('"', "\"\"");
        format!("\"{escaped}\"")
    }

    /// Validates a relation name before it is registered with the engine.
    ///
    /// Names must be lower-case ASCII, start with a letter or underscore,
    /// and contain only letters, digits, and underscores.
    pub fn validate_relation_name(name: &str) -> Result<()> {
        if name.is_empty() || name.len() > MAX_RELATION_NAME_LEN {
            return Err(ColmatchError::configuration(format!(
                "relation name must be 1 to {MAX_RELATION_NAME_LEN} characters, got {}",
                name.len()
            )));
        }

        static RELATION_REGEX: Lazy<Regex> = Lazy::new(|| {
            #[allow(clippy::expect_used)]
            Regex::new(r"^[a-z_][a-z0-9_]*$").expect("Hard-coded regex pattern should be valid")
        });

        if !RELATION_REGEX.is_match(name) {
            return Err(ColmatchError::configuration(format!(
                "invalid relation name '{name}'"
            )));
        }
        Ok(())
    }

    /// Reduces arbitrary text (typically a file stem) to a fragment that is
    /// safe inside a relation name.
    pub fn sanitize_fragment(text: &str, max_len: usize) -> String {
        let mut fragment: String = text
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_lowercase()
                } else {
                    '_'
                }
            })
            .take(max_len)
            .collect();
        if fragment.is_empty() || fragment.starts_with(|c: char| c.is_ascii_digit()) {
            fragment.insert(0, '_');
        }
        fragment
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_identifier() {
        assert_eq!(SqlSecurity::quote_identifier("id"), "\"id\"");
        assert_eq!(SqlSecurity::quote_identifier("First Name"), "\"First Name\"");
        assert_eq!(
            SqlSecurity::quote_identifier("x\"; DROP TABLE t; --"),
            "\"x\"\"; DROP TABLE t; --\""
        );
    }

    #[test]
    fn test_validate_relation_name() {
        assert!(SqlSecurity::validate_relation_name("colmatch_users_1").is_ok());
        assert!(SqlSecurity::validate_relation_name("_x").is_ok());
        assert!(SqlSecurity::validate_relation_name("").is_err());
        assert!(SqlSecurity::validate_relation_name("Users").is_err());
        assert!(SqlSecurity::validate_relation_name("1abc").is_err());
        assert!(SqlSecurity::validate_relation_name("a.b").is_err());
        assert!(SqlSecurity::validate_relation_name(&"a".repeat(200)).is_err());
    }

    #[test]
    fn test_sanitize_fragment() {
        assert_eq!(SqlSecurity::sanitize_fragment("Customer List", 32), "customer_list");
        assert_eq!(SqlSecurity::sanitize_fragment("2024-orders", 32), "_2024_orders");
        assert_eq!(SqlSecurity::sanitize_fragment("", 32), "_");
        assert_eq!(SqlSecurity::sanitize_fragment("abcdef", 3), "abc");
        assert_eq!(SqlSecurity::sanitize_fragment("données", 32), "donn_es");
    }
}
