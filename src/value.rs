//! Host runtime values handed to the translator.
//!
//! These mirror what a host-language caller can pass as a default value or a
//! search argument: scalars, nested lists, mappings, sparse vectors, typed
//! array wrappers and numeric-library tensors.

use crate::error::{TranslateError, TranslateResult};
use indexmap::IndexMap;

/// A host value before literal encoding
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Boolean(bool),
    Integer(i64),
    Double(f64),
    String(String),
    List(Vec<Value>),
    /// Insertion-ordered mapping; used for index -> value sparse vectors
    Map(IndexMap<String, Value>),
    Sparse(SparseVector),
    Array(Array),
    NdArray(NdArray),
}

impl Value {
    /// Name of the runtime type, used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "bool",
            Value::Integer(_) => "int",
            Value::Double(_) => "float",
            Value::String(_) => "str",
            Value::List(_) => "list",
            Value::Map(_) => "dict",
            Value::Sparse(_) => "SparseVector",
            Value::Array(_) => "Array",
            Value::NdArray(_) => "ndarray",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Build a mapping value from `(index, value)` pairs
    pub fn sparse_map<I, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (i64, V)>,
        V: Into<Value>,
    {
        Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.into()))
                .collect(),
        )
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::List(v.into_iter().map(Into::into).collect())
    }
}

impl From<SparseVector> for Value {
    fn from(v: SparseVector) -> Self {
        Value::Sparse(v)
    }
}

impl From<Array> for Value {
    fn from(v: Array) -> Self {
        Value::Array(v)
    }
}

impl From<NdArray> for Value {
    fn from(v: NdArray) -> Self {
        Value::NdArray(v)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Boolean(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Integer(i),
                // u64 beyond i64::MAX and real numbers both land here
                None => Value::Double(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Map(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

/// Sparse vector given as parallel index and value lists
#[derive(Debug, Clone, PartialEq)]
pub struct SparseVector {
    pub indices: Vec<i64>,
    pub values: SparseValues,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SparseValues {
    Integer(Vec<i64>),
    Double(Vec<f64>),
}

impl SparseValues {
    pub fn len(&self) -> usize {
        match self {
            SparseValues::Integer(v) => v.len(),
            SparseValues::Double(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SparseVector {
    pub fn integer(indices: Vec<i64>, values: Vec<i64>) -> Self {
        Self {
            indices,
            values: SparseValues::Integer(values),
        }
    }

    pub fn double(indices: Vec<i64>, values: Vec<f64>) -> Self {
        Self {
            indices,
            values: SparseValues::Double(values),
        }
    }
}

/// Typed array wrapper; encodes as a curly-brackets array literal
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Array {
    pub elements: Vec<Value>,
}

impl Array {
    pub fn new(elements: Vec<Value>) -> Self {
        Self { elements }
    }
}

/// Dense tensor from a numeric library, stored row-major
#[derive(Debug, Clone, PartialEq)]
pub struct NdArray {
    shape: Vec<usize>,
    data: NdData,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NdData {
    Integer(Vec<i64>),
    Double(Vec<f64>),
}

impl NdData {
    fn len(&self) -> usize {
        match self {
            NdData::Integer(v) => v.len(),
            NdData::Double(v) => v.len(),
        }
    }
}

impl NdArray {
    /// Create a tensor, checking that `shape` covers `data` exactly
    pub fn new(shape: Vec<usize>, data: NdData) -> TranslateResult<Self> {
        let expected: usize = shape.iter().product();
        if expected != data.len() {
            return Err(TranslateError::InvalidConstantType(format!(
                "ndarray of shape {:?} needs {} elements, got {}",
                shape,
                expected,
                data.len()
            )));
        }
        Ok(Self { shape, data })
    }

    pub fn integers(shape: Vec<usize>, data: Vec<i64>) -> TranslateResult<Self> {
        Self::new(shape, NdData::Integer(data))
    }

    pub fn doubles(shape: Vec<usize>, data: Vec<f64>) -> TranslateResult<Self> {
        Self::new(shape, NdData::Double(data))
    }

    /// Zero-dimensional integer wrapper (e.g. a numpy integer scalar)
    pub fn scalar_integer(v: i64) -> Self {
        Self {
            shape: vec![],
            data: NdData::Integer(vec![v]),
        }
    }

    /// Zero-dimensional float wrapper
    pub fn scalar_double(v: f64) -> Self {
        Self {
            shape: vec![],
            data: NdData::Double(vec![v]),
        }
    }

    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Convert into plain values: a scalar for rank 0, nested lists otherwise
    pub fn to_value(&self) -> Value {
        match &self.data {
            NdData::Integer(data) => nest(&self.shape, data, &Value::Integer),
            NdData::Double(data) => nest(&self.shape, data, &Value::Double),
        }
    }
}

fn nest<T: Copy>(shape: &[usize], data: &[T], leaf: &dyn Fn(T) -> Value) -> Value {
    match shape.split_first() {
        None => leaf(data[0]),
        Some((&rows, rest)) => {
            let stride: usize = rest.iter().product();
            Value::List(
                (0..rows)
                    .map(|i| nest(rest, &data[i * stride..(i + 1) * stride], leaf))
                    .collect(),
            )
        }
    }
}
