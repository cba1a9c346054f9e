//! Search option handling.

use crate::error::{TranslateError, TranslateResult};
use crate::ir::ParsedExpr;
use crate::sql::parse_condition;
use crate::translate::translate_condition;
use crate::value::Value;
use indexmap::IndexMap;
use log::debug;

/// Optional search parameters, keyed by option name
pub type SearchOptions = IndexMap<String, Value>;

/// Option key holding the filter condition, matched case-insensitively
pub const FILTER_KEY: &str = "filter";

/// Take the filter condition out of `options` and translate it.
///
/// Returns `Ok(None)` when no filter is present. On success the filter
/// key is removed from `options`; on error the map is left untouched.
pub fn extract_filter(options: &mut SearchOptions) -> TranslateResult<Option<ParsedExpr>> {
    let mut found: Option<(String, ParsedExpr)> = None;

    for (key, value) in options.iter() {
        if !key.eq_ignore_ascii_case(FILTER_KEY) {
            continue;
        }
        if found.is_some() {
            return Err(TranslateError::DuplicateFilterOption);
        }
        let Some(text) = value.as_str() else {
            return Err(TranslateError::InvalidFilterType {
                value: format!("{:?}", value),
                actual: value.type_name(),
            });
        };
        let node = parse_condition(text)
            .map_err(|e| TranslateError::InvalidExpression(format!("{:#}", e)))?;
        found = Some((key.clone(), translate_condition(&node, None)?));
    }

    Ok(found.map(|(key, filter)| {
        options.shift_remove(&key);
        debug!("extracted search filter from option '{}'", key);
        filter
    }))
}
