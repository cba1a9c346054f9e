//! Literal encoder: host values to constant expressions.
//!
//! Classification is a closed, ordered match. Booleans are matched before
//! integers, and lists are classified by their first leaf element and
//! nesting depth. Once a list kind is chosen every element must conform;
//! integers widen into double arrays but nothing narrows.

use crate::error::{TranslateError, TranslateResult};
use crate::ir::ConstantExpr;
use crate::value::{NdArray, SparseValues, SparseVector, Value};
use indexmap::IndexMap;
use std::borrow::Cow;

/// Highest tensor rank accepted from a numeric library
const MAX_NDARRAY_RANK: usize = 2;

/// Encode a host value as a constant expression
pub fn encode_constant(value: &Value) -> TranslateResult<ConstantExpr> {
    let value = normalize(value)?;
    match &*value {
        Value::String(s) => Ok(ConstantExpr::String(s.clone())),
        Value::Boolean(b) => Ok(ConstantExpr::Boolean(*b)),
        Value::Integer(i) => Ok(ConstantExpr::Integer(*i)),
        Value::Double(d) => Ok(ConstantExpr::Double(*d)),
        Value::List(items) => encode_list(items),
        Value::Sparse(sparse) => encode_sparse(sparse),
        Value::Map(map) => encode_sparse_map(map),
        Value::Array(array) => array
            .elements
            .iter()
            .map(encode_constant)
            .collect::<TranslateResult<Vec<_>>>()
            .map(ConstantExpr::CurlyBracketsArray),
        other => Err(unexpected(other)),
    }
}

/// Replace numeric-library tensors by plain scalars and nested lists
fn normalize(value: &Value) -> TranslateResult<Cow<'_, Value>> {
    match value {
        Value::NdArray(array) => Ok(Cow::Owned(ndarray_to_value(array)?)),
        Value::List(items) => match items.first() {
            Some(Value::NdArray(first)) => {
                if first.ndim() > MAX_NDARRAY_RANK {
                    return Err(rank_error(first));
                }
                let items = items
                    .iter()
                    .map(|item| match item {
                        Value::NdArray(array) if array.ndim() <= MAX_NDARRAY_RANK => {
                            array.to_value()
                        }
                        other => other.clone(),
                    })
                    .collect();
                Ok(Cow::Owned(Value::List(items)))
            }
            _ => Ok(Cow::Borrowed(value)),
        },
        _ => Ok(Cow::Borrowed(value)),
    }
}

fn ndarray_to_value(array: &NdArray) -> TranslateResult<Value> {
    if array.ndim() > MAX_NDARRAY_RANK {
        return Err(rank_error(array));
    }
    Ok(array.to_value())
}

fn encode_list(items: &[Value]) -> TranslateResult<ConstantExpr> {
    let mut depth = 1;
    let mut leaf = items.first().ok_or_else(|| {
        TranslateError::InvalidConstantType("empty list has no element type".to_string())
    })?;
    while let Value::List(inner) = leaf {
        depth += 1;
        leaf = inner.first().ok_or_else(|| {
            TranslateError::InvalidConstantType("nested empty list has no element type".to_string())
        })?;
    }

    match (depth, leaf) {
        (1, Value::Integer(_)) => integers(items).map(ConstantExpr::IntegerArray),
        (1, Value::Double(_)) => doubles(items).map(ConstantExpr::DoubleArray),
        (2, Value::Integer(_)) => rows(items, integers).map(ConstantExpr::IntegerTensor),
        (2, Value::Double(_)) => rows(items, doubles).map(ConstantExpr::DoubleTensor),
        (3, Value::Integer(_)) => {
            rows(items, |row| rows(row, integers)).map(ConstantExpr::IntegerTensorArray)
        }
        (3, Value::Double(_)) => {
            rows(items, |row| rows(row, doubles)).map(ConstantExpr::DoubleTensorArray)
        }
        // Booleans and strings have no array form
        (1, leaf) => Err(TranslateError::InvalidConstantType(format!(
            "list of {}",
            leaf.type_name()
        ))),
        (depth, leaf) => Err(TranslateError::InvalidConstantType(format!(
            "list of {} nested {} levels deep",
            leaf.type_name(),
            depth
        ))),
    }
}

fn integers(items: &[Value]) -> TranslateResult<Vec<i64>> {
    items
        .iter()
        .map(|item| match item {
            Value::Integer(i) => Ok(*i),
            other => Err(element_error("int", other)),
        })
        .collect()
}

fn doubles(items: &[Value]) -> TranslateResult<Vec<f64>> {
    items
        .iter()
        .map(|item| match item {
            Value::Double(d) => Ok(*d),
            Value::Integer(i) => Ok(*i as f64),
            other => Err(element_error("float", other)),
        })
        .collect()
}

fn rows<T, F>(items: &[Value], row: F) -> TranslateResult<Vec<T>>
where
    F: Fn(&[Value]) -> TranslateResult<T>,
{
    items
        .iter()
        .map(|item| match item {
            Value::List(inner) => row(inner),
            other => Err(element_error("list", other)),
        })
        .collect()
}

fn encode_sparse(sparse: &SparseVector) -> TranslateResult<ConstantExpr> {
    if sparse.values.is_empty() {
        return Err(TranslateError::InvalidConstantType(
            "SparseVector without values".to_string(),
        ));
    }
    if sparse.indices.len() != sparse.values.len() {
        return Err(TranslateError::InvalidConstantType(format!(
            "SparseVector has {} indices but {} values",
            sparse.indices.len(),
            sparse.values.len()
        )));
    }
    let indices = sparse.indices.clone();
    Ok(match &sparse.values {
        SparseValues::Integer(values) => ConstantExpr::LongSparseArray {
            indices,
            values: values.clone(),
        },
        SparseValues::Double(values) => ConstantExpr::DoubleSparseArray {
            indices,
            values: values.clone(),
        },
    })
}

fn encode_sparse_map(map: &IndexMap<String, Value>) -> TranslateResult<ConstantExpr> {
    let Some(first) = map.values().next() else {
        return Err(TranslateError::EmptySparseVector);
    };
    let indices = map
        .keys()
        .map(|key| {
            key.trim().parse::<i64>().map_err(|_| {
                TranslateError::InvalidConstantType(format!(
                    "sparse index '{}' is not an integer",
                    key
                ))
            })
        })
        .collect::<TranslateResult<Vec<_>>>()?;
    let values: Vec<Value> = map.values().cloned().collect();

    match first {
        Value::Integer(_) => Ok(ConstantExpr::LongSparseArray {
            indices,
            values: integers(&values)?,
        }),
        Value::Double(_) => Ok(ConstantExpr::DoubleSparseArray {
            indices,
            values: doubles(&values)?,
        }),
        other => Err(TranslateError::InvalidConstantType(format!(
            "sparse value of type {}",
            other.type_name()
        ))),
    }
}

fn unexpected(value: &Value) -> TranslateError {
    TranslateError::InvalidConstantType(format!("unexpected constant type: {}", value.type_name()))
}

fn element_error(expected: &str, found: &Value) -> TranslateError {
    TranslateError::InvalidConstantType(format!(
        "expected {} element, got {}",
        expected,
        found.type_name()
    ))
}

fn rank_error(array: &NdArray) -> TranslateError {
    TranslateError::InvalidConstantType(format!(
        "ndarray of rank {} (shape {:?}) is not supported",
        array.ndim(),
        array.shape()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::LiteralType;
    use crate::value::Array;

    fn encode(value: impl Into<Value>) -> TranslateResult<ConstantExpr> {
        encode_constant(&value.into())
    }

    #[test]
    fn test_scalars() {
        assert_eq!(encode("x").unwrap(), ConstantExpr::String("x".to_string()));
        assert_eq!(encode(7i64).unwrap(), ConstantExpr::Integer(7));
        assert_eq!(encode(0.25).unwrap(), ConstantExpr::Double(0.25));
    }

    #[test]
    fn test_boolean_is_not_integer() {
        let constant = encode(true).unwrap();
        assert_eq!(constant, ConstantExpr::Boolean(true));
        assert_eq!(constant.literal_type(), LiteralType::Boolean);
    }

    #[test]
    fn test_flat_lists() {
        assert_eq!(
            encode(vec![1i64, 2, 3]).unwrap(),
            ConstantExpr::IntegerArray(vec![1, 2, 3])
        );
        assert_eq!(
            encode(vec![1.5, 2.5]).unwrap(),
            ConstantExpr::DoubleArray(vec![1.5, 2.5])
        );

        // Integers widen once the first element chose doubles
        let mixed = Value::List(vec![Value::Double(0.5), Value::Integer(2)]);
        assert_eq!(
            encode_constant(&mixed).unwrap(),
            ConstantExpr::DoubleArray(vec![0.5, 2.0])
        );

        // but doubles never narrow
        let mixed = Value::List(vec![Value::Integer(1), Value::Double(2.5)]);
        assert!(matches!(
            encode_constant(&mixed),
            Err(TranslateError::InvalidConstantType(_))
        ));
    }

    #[test]
    fn test_tensors() {
        let tensor = Value::from(vec![vec![1i64, 2], vec![3, 4]]);
        assert_eq!(
            encode_constant(&tensor).unwrap(),
            ConstantExpr::IntegerTensor(vec![vec![1, 2], vec![3, 4]])
        );

        let tensor = Value::from(vec![vec![1.0], vec![2.0]]);
        assert_eq!(
            encode_constant(&tensor).unwrap(),
            ConstantExpr::DoubleTensor(vec![vec![1.0], vec![2.0]])
        );

        let tensor_array = Value::from(vec![vec![vec![1i64]], vec![vec![2], vec![3]]]);
        assert_eq!(
            encode_constant(&tensor_array).unwrap(),
            ConstantExpr::IntegerTensorArray(vec![vec![vec![1]], vec![vec![2], vec![3]]])
        );
        assert_eq!(
            encode_constant(&tensor_array).unwrap().literal_type(),
            LiteralType::SubArrayArray
        );

        let tensor_array = Value::from(vec![vec![vec![0.5]]]);
        assert_eq!(
            encode_constant(&tensor_array).unwrap(),
            ConstantExpr::DoubleTensorArray(vec![vec![vec![0.5]]])
        );
    }

    #[test]
    fn test_ragged_nesting_is_rejected() {
        let ragged = Value::List(vec![Value::from(vec![1i64]), Value::Integer(2)]);
        assert!(matches!(
            encode_constant(&ragged),
            Err(TranslateError::InvalidConstantType(_))
        ));
    }

    #[test]
    fn test_unsupported_lists() {
        for value in [
            Value::List(vec![]),
            Value::from(vec![Vec::<i64>::new()]),
            Value::from(vec!["a", "b"]),
            Value::from(vec![true, false]),
            Value::from(vec![vec![vec![vec![1i64]]]]),
        ] {
            assert!(
                matches!(
                    encode_constant(&value),
                    Err(TranslateError::InvalidConstantType(_))
                ),
                "{:?}",
                value
            );
        }
    }

    #[test]
    fn test_sparse_vector() {
        let sparse = SparseVector::integer(vec![0, 4], vec![1, 2]);
        assert_eq!(
            encode(sparse).unwrap(),
            ConstantExpr::LongSparseArray {
                indices: vec![0, 4],
                values: vec![1, 2]
            }
        );

        let sparse = SparseVector::double(vec![3], vec![0.5]);
        assert_eq!(
            encode(sparse).unwrap().literal_type(),
            LiteralType::DoubleSparseArray
        );

        let empty = SparseVector::integer(vec![], vec![]);
        assert!(matches!(
            encode(empty),
            Err(TranslateError::InvalidConstantType(_))
        ));

        let mismatched = SparseVector::double(vec![1, 2], vec![0.5]);
        assert!(matches!(
            encode(mismatched),
            Err(TranslateError::InvalidConstantType(_))
        ));
    }

    #[test]
    fn test_sparse_map() {
        let map = Value::sparse_map([(0, 1i64), (2, 3)]);
        assert_eq!(
            encode_constant(&map).unwrap(),
            ConstantExpr::LongSparseArray {
                indices: vec![0, 2],
                values: vec![1, 3]
            }
        );

        let map = Value::sparse_map([(0, 1.5)]);
        assert_eq!(
            encode_constant(&map).unwrap(),
            ConstantExpr::DoubleSparseArray {
                indices: vec![0],
                values: vec![1.5]
            }
        );

        let empty = Value::Map(IndexMap::new());
        assert!(matches!(
            encode_constant(&empty),
            Err(TranslateError::EmptySparseVector)
        ));

        let mut bad_key = IndexMap::new();
        bad_key.insert("x".to_string(), Value::Integer(1));
        assert!(matches!(
            encode_constant(&Value::Map(bad_key)),
            Err(TranslateError::InvalidConstantType(_))
        ));

        let flags = Value::sparse_map([(0, true)]);
        assert!(matches!(
            encode_constant(&flags),
            Err(TranslateError::InvalidConstantType(_))
        ));
    }

    #[test]
    fn test_curly_brackets_array() {
        let array = Array::new(vec![
            Value::Integer(1),
            Value::from(vec![0.5]),
            Value::Array(Array::new(vec![Value::from("x")])),
        ]);
        assert_eq!(
            encode(array).unwrap(),
            ConstantExpr::CurlyBracketsArray(vec![
                ConstantExpr::Integer(1),
                ConstantExpr::DoubleArray(vec![0.5]),
                ConstantExpr::CurlyBracketsArray(vec![ConstantExpr::String("x".to_string())]),
            ])
        );

        let failing = Array::new(vec![Value::Null]);
        assert!(encode(failing).is_err());
    }

    #[test]
    fn test_ndarray_normalization() {
        assert_eq!(
            encode(NdArray::scalar_integer(5)).unwrap(),
            ConstantExpr::Integer(5)
        );
        assert_eq!(
            encode(NdArray::scalar_double(0.5)).unwrap(),
            ConstantExpr::Double(0.5)
        );
        assert_eq!(
            encode(NdArray::doubles(vec![3], vec![1.0, 2.0, 3.0]).unwrap()).unwrap(),
            ConstantExpr::DoubleArray(vec![1.0, 2.0, 3.0])
        );
        assert_eq!(
            encode(NdArray::integers(vec![2, 2], vec![1, 2, 3, 4]).unwrap()).unwrap(),
            ConstantExpr::IntegerTensor(vec![vec![1, 2], vec![3, 4]])
        );

        let deep = NdArray::integers(vec![2, 2, 2, 2], (0..16).collect()).unwrap();
        assert!(matches!(
            encode(deep),
            Err(TranslateError::InvalidConstantType(_))
        ));
    }

    #[test]
    fn test_list_of_ndarrays() {
        let rows = Value::List(vec![
            Value::NdArray(NdArray::integers(vec![2], vec![1, 2]).unwrap()),
            Value::NdArray(NdArray::integers(vec![2], vec![3, 4]).unwrap()),
        ]);
        assert_eq!(
            encode_constant(&rows).unwrap(),
            ConstantExpr::IntegerTensor(vec![vec![1, 2], vec![3, 4]])
        );

        let tensors = Value::List(vec![Value::NdArray(
            NdArray::doubles(vec![1, 2], vec![0.5, 1.5]).unwrap(),
        )]);
        assert_eq!(
            encode_constant(&tensors).unwrap(),
            ConstantExpr::DoubleTensorArray(vec![vec![vec![0.5, 1.5]]])
        );

        let deep = Value::List(vec![Value::NdArray(
            NdArray::integers(vec![1, 1, 1], vec![1]).unwrap(),
        )]);
        assert!(matches!(
            encode_constant(&deep),
            Err(TranslateError::InvalidConstantType(_))
        ));
    }

    #[test]
    fn test_null_is_rejected() {
        let err = encode_constant(&Value::Null).unwrap_err();
        assert!(err.to_string().contains("null"));
    }
}
