//! Packaging of engine query results into a host table.

use crate::error::{TranslateError, TranslateResult};
use crate::ir::DataType;
use crate::value::Value;
use indexmap::IndexMap;

/// Scalar type a result column is materialized as on the host side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostScalarType {
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
    Bool,
    Utf8,
    /// Anything without a flat scalar representation
    Object,
}

impl HostScalarType {
    pub fn for_data_type(data_type: &DataType) -> Self {
        match data_type {
            DataType::TinyInt => HostScalarType::Int8,
            DataType::SmallInt => HostScalarType::Int16,
            DataType::Integer => HostScalarType::Int32,
            DataType::BigInt => HostScalarType::Int64,
            DataType::Float | DataType::Float16 | DataType::BFloat16 => HostScalarType::Float32,
            DataType::Double => HostScalarType::Float64,
            DataType::Boolean => HostScalarType::Bool,
            DataType::Varchar
            | DataType::Date
            | DataType::Time
            | DataType::DateTime
            | DataType::Timestamp => HostScalarType::Utf8,
            DataType::HugeInt
            | DataType::Embedding(_)
            | DataType::MultiVector(_)
            | DataType::Tensor(_)
            | DataType::TensorArray(_)
            | DataType::Sparse(_)
            | DataType::Array(_) => HostScalarType::Object,
        }
    }

    /// Whether `value` can be stored in a column of this type. Null always can.
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::Null) | (HostScalarType::Object, _) => true,
            (HostScalarType::Int8, Value::Integer(i)) => i8::try_from(*i).is_ok(),
            (HostScalarType::Int16, Value::Integer(i)) => i16::try_from(*i).is_ok(),
            (HostScalarType::Int32, Value::Integer(i)) => i32::try_from(*i).is_ok(),
            (HostScalarType::Int64, Value::Integer(_)) => true,
            (HostScalarType::Float32 | HostScalarType::Float64, Value::Double(_))
            | (HostScalarType::Float32 | HostScalarType::Float64, Value::Integer(_)) => true,
            (HostScalarType::Bool, Value::Boolean(_)) => true,
            (HostScalarType::Utf8, Value::String(_)) => true,
            _ => false,
        }
    }
}

/// Column-oriented access to a query result produced by the engine
pub trait ResultSource {
    fn column_count(&self) -> usize;

    fn column_name(&self, index: usize) -> &str;

    fn column_type(&self, index: usize) -> &DataType;

    /// Raw values of one column, one per row
    fn column_values(&self, index: usize) -> &[Value];
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableColumn {
    pub data_type: DataType,
    pub host_type: HostScalarType,
    pub values: Vec<Value>,
}

/// Result table keyed by column name, in result column order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: IndexMap<String, TableColumn>,
    row_count: usize,
}

impl Table {
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column(&self, name: &str) -> Option<&TableColumn> {
        self.columns.get(name)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &TableColumn)> {
        self.columns.iter().map(|(name, column)| (name.as_str(), column))
    }

    /// Values of row `index` in column order
    pub fn row(&self, index: usize) -> Option<Vec<&Value>> {
        if index >= self.row_count {
            return None;
        }
        Some(self.columns.values().map(|c| &c.values[index]).collect())
    }
}

/// Package every column of `source` into a [`Table`]
pub fn build_table(source: &impl ResultSource) -> TranslateResult<Table> {
    let mut table = Table::default();

    for index in 0..source.column_count() {
        let name = source.column_name(index);
        let data_type = source.column_type(index);
        let values = source.column_values(index);
        let host_type = HostScalarType::for_data_type(data_type);

        if index == 0 {
            table.row_count = values.len();
        } else if values.len() != table.row_count {
            return Err(TranslateError::InvalidResult(format!(
                "column '{}' has {} rows, expected {}",
                name,
                values.len(),
                table.row_count
            )));
        }

        if let Some((row, value)) = values
            .iter()
            .enumerate()
            .find(|(_, value)| !host_type.accepts(value))
        {
            return Err(TranslateError::InvalidResult(format!(
                "column '{}' of type {} has {} value at row {}",
                name,
                data_type,
                value.type_name(),
                row
            )));
        }

        if table.columns.contains_key(name) {
            return Err(TranslateError::InvalidResult(format!(
                "duplicate result column '{}'",
                name
            )));
        }

        table.columns.insert(
            name.to_string(),
            TableColumn {
                data_type: data_type.clone(),
                host_type,
                values: values.to_vec(),
            },
        );
    }

    Ok(table)
}
