//! Identifier validation for table, column, database and index names.

use crate::error::{TranslateError, TranslateResult};
use crate::value::Value;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Longest identifier accepted by the engine
pub const IDENTIFIER_LIMIT: usize = 65536;

static IDENTIFIER_RE: OnceLock<Regex> = OnceLock::new();

/// What an identifier names; only affects error messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    Database,
    Table,
    Column,
    Index,
}

impl fmt::Display for NameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NameKind::Database => "Database",
            NameKind::Table => "Table",
            NameKind::Column => "Column",
            NameKind::Index => "Index",
        };
        write!(f, "{}", name)
    }
}

/// Check that `name` is a valid identifier of the given kind.
///
/// A valid identifier starts with an ASCII letter, continues with ASCII
/// letters, digits or underscores, and is at most [`IDENTIFIER_LIMIT`]
/// characters long.
pub fn check_valid_name(name: &str, kind: NameKind) -> TranslateResult<()> {
    let re = IDENTIFIER_RE
        .get_or_init(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9_]*$").expect("valid regex"));

    if name.is_empty() {
        return Err(invalid(format!("invalid name: {}", name)));
    }
    if name.chars().all(char::is_whitespace) {
        return Err(invalid(format!(
            "{} name cannot be composed of whitespace characters only",
            kind
        )));
    }
    if name.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid(format!("invalid name: {}", name)));
    }
    if !re.is_match(name) {
        return Err(invalid(format!(
            "{} name '{}' is not valid. It should start with a letter and can contain only letters, numbers and underscores",
            kind, name
        )));
    }
    if name.len() > IDENTIFIER_LIMIT {
        return Err(invalid(format!(
            "{} name '{}...' is not of appropriate length",
            kind,
            &name[..16]
        )));
    }
    Ok(())
}

/// Like [`check_valid_name`] for an untyped host value; non-strings fail
pub fn check_valid_name_value(name: &Value, kind: NameKind) -> TranslateResult<()> {
    match name.as_str() {
        Some(s) => check_valid_name(s, kind),
        None => Err(invalid(format!(
            "{} name must be a string, got {}",
            kind,
            name.type_name()
        ))),
    }
}

fn invalid(message: String) -> TranslateError {
    TranslateError::InvalidIdentifierName(message)
}
