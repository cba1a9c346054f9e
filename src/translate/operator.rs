//! Operator-name mapping for binary expressions.

use crate::error::{TranslateError, TranslateResult};

/// Map an operator key (`eq`, `gte`, `add`, ...) to the engine function name
pub fn binary_function_name(key: &str) -> TranslateResult<&'static str> {
    let name = match key {
        "eq" => "=",
        "neq" => "!=",
        "gt" => ">",
        "gte" => ">=",
        "lt" => "<",
        "lte" => "<=",
        "and" => "and",
        "or" => "or",
        "add" => "+",
        "sub" => "-",
        "mul" => "*",
        "div" => "/",
        "mod" => "%",
        _ => {
            return Err(TranslateError::InvalidExpression(format!(
                "unknown binary expression: {}",
                key
            )))
        }
    };
    Ok(name)
}
