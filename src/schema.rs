//! Schema descriptor builder.
//!
//! Turns a user column specification such as
//! `{"type": "vector,128,float32", "default": [0.0, ...], "constraints": ["not null"]}`
//! into the [`ColumnDescriptor`] the engine's create-table call expects.

pub mod type_string;

pub use type_string::{data_type_from_tokens, element_type, parse_data_type};

use crate::error::{TranslateError, TranslateResult};
use crate::ir::{ColumnDescriptor, ConstantExpr, ConstraintType, DataType};
use crate::literal::encode_constant;
use crate::validate::{check_valid_name, NameKind};
use crate::value::Value;
use indexmap::IndexMap;
use log::debug;
use std::path::Path;

/// Column specification: option name to value, keys matched case-insensitively
pub type ColumnSpec = IndexMap<String, Value>;

/// Table specification: column name to column spec, in declaration order
pub type TableSpec = IndexMap<String, ColumnSpec>;

/// Build the descriptor of the column at ordinal position `index`
pub fn build_column(name: &str, spec: &ColumnSpec, index: usize) -> TranslateResult<ColumnDescriptor> {
    check_valid_name(name, NameKind::Column)?;

    let spec: IndexMap<String, &Value> = spec
        .iter()
        .map(|(key, value)| (key.to_lowercase(), value))
        .collect();

    let column_type = column_type(&spec)?;
    let default = match spec.get("default") {
        None | Some(Value::Null) => ConstantExpr::Null,
        Some(value) => encode_constant(value)?,
    };
    let constraints = constraints(spec.get("constraints").copied())?;
    let comment = match spec.get("comment") {
        None | Some(Value::Null) => None,
        Some(Value::String(comment)) => Some(comment.clone()),
        Some(other) => {
            return Err(TranslateError::InvalidDataType(format!(
                "column comment must be a string, got {}",
                other.type_name()
            )))
        }
    };

    Ok(ColumnDescriptor {
        id: index,
        name: name.to_string(),
        column_type,
        default,
        constraints,
        comment,
    })
}

/// Build every column of a table, numbering them in declaration order
pub fn build_columns(table: &TableSpec) -> TranslateResult<Vec<ColumnDescriptor>> {
    let columns = table
        .iter()
        .enumerate()
        .map(|(index, (name, spec))| build_column(name, spec, index))
        .collect::<TranslateResult<Vec<_>>>()?;
    debug!("built {} column descriptors", columns.len());
    Ok(columns)
}

/// Read a table specification from a JSON object file
pub fn load_table_spec(path: impl AsRef<Path>) -> TranslateResult<TableSpec> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let json: serde_json::Value = serde_json::from_str(&text).map_err(|e| {
        TranslateError::InvalidDataType(format!("{}: {}", path.display(), e))
    })?;
    debug!("loaded table spec from {}", path.display());
    table_spec_from_value(Value::from(json))
}

/// Convert a host mapping of column name to column options
pub fn table_spec_from_value(value: Value) -> TranslateResult<TableSpec> {
    let Value::Map(columns) = value else {
        return Err(TranslateError::InvalidDataType(format!(
            "table spec must be a mapping, got {}",
            value.type_name()
        )));
    };
    columns
        .into_iter()
        .map(|(name, spec)| match spec {
            Value::Map(options) => Ok((name, options)),
            other => Err(TranslateError::InvalidDataType(format!(
                "column '{}' spec must be a mapping, got {}",
                name,
                other.type_name()
            ))),
        })
        .collect()
}

fn column_type(spec: &IndexMap<String, &Value>) -> TranslateResult<DataType> {
    match spec.get("type") {
        None => Err(TranslateError::NoColumnTypeDefined),
        Some(Value::String(type_string)) => parse_data_type(type_string),
        Some(other) => Err(TranslateError::InvalidDataType(format!(
            "column type must be a string, got {}",
            other.type_name()
        ))),
    }
}

fn constraints(value: Option<&Value>) -> TranslateResult<Vec<ConstraintType>> {
    let items = match value {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::List(items)) => items,
        Some(other) => {
            return Err(TranslateError::UnknownConstraintType(format!(
                "constraints must be a list, got {}",
                other.type_name()
            )))
        }
    };

    let mut constraints = Vec::with_capacity(items.len());
    for item in items {
        let Value::String(keyword) = item else {
            return Err(TranslateError::UnknownConstraintType(item.type_name().to_string()));
        };
        let keyword = keyword.to_lowercase();
        let constraint = match keyword.as_str() {
            "null" => ConstraintType::Null,
            "not null" => ConstraintType::NotNull,
            "primary key" => ConstraintType::PrimaryKey,
            "unique" => ConstraintType::Unique,
            _ => return Err(TranslateError::UnknownConstraintType(keyword)),
        };
        if constraints.contains(&constraint) {
            return Err(TranslateError::DuplicatedConstraint(
                constraint.as_str().to_string(),
            ));
        }
        constraints.push(constraint);
    }
    Ok(constraints)
}
