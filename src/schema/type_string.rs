//! Column type strings such as `vector,128,float32` or `array,varchar`.

use crate::error::{TranslateError, TranslateResult};
use crate::ir::{DataType, EmbeddingDataType, EmbeddingType, SparseType};

/// Parse a comma-separated type string (case-insensitive)
pub fn parse_data_type(type_string: &str) -> TranslateResult<DataType> {
    let lowered = type_string.to_lowercase();
    let tokens: Vec<&str> = lowered.split(',').map(str::trim).collect();
    data_type_from_tokens(&tokens)
}

/// Resolve already split, lower-cased tokens
pub fn data_type_from_tokens(tokens: &[&str]) -> TranslateResult<DataType> {
    let Some(&first) = tokens.first() else {
        return Err(TranslateError::InvalidDataType("empty type string".to_string()));
    };

    match first {
        "vector" | "multivector" | "tensor" | "tensorarray" => {
            let embedding = embedding_type(tokens)?;
            Ok(match first {
                "vector" => DataType::Embedding(embedding),
                "multivector" => DataType::MultiVector(embedding),
                "tensor" => DataType::Tensor(embedding),
                _ => DataType::TensorArray(embedding),
            })
        }
        "sparse" => sparse_type(tokens).map(DataType::Sparse),
        "array" => {
            if tokens.len() < 2 {
                return Err(TranslateError::NoArrayElementType);
            }
            let element = data_type_from_tokens(&tokens[1..])?;
            Ok(DataType::Array(Box::new(element)))
        }
        _ if tokens.len() > 1 => Err(TranslateError::TooManyArguments(format!("{:?}", tokens))),
        scalar => scalar_type(scalar),
    }
}

fn scalar_type(name: &str) -> TranslateResult<DataType> {
    let data_type = match name {
        "int8" => DataType::TinyInt,
        "int16" => DataType::SmallInt,
        "integer" | "int32" | "int" => DataType::Integer,
        "int64" => DataType::BigInt,
        "int128" => DataType::HugeInt,
        "float" | "float32" => DataType::Float,
        "double" | "float64" => DataType::Double,
        "float16" => DataType::Float16,
        "bfloat16" => DataType::BFloat16,
        "varchar" => DataType::Varchar,
        "bool" => DataType::Boolean,
        "date" => DataType::Date,
        "time" => DataType::Time,
        "datetime" => DataType::DateTime,
        "timestamp" => DataType::Timestamp,
        _ => return Err(TranslateError::UnknownDataType(name.to_string())),
    };
    Ok(data_type)
}

// [kind, dimension, element]
fn embedding_type(tokens: &[&str]) -> TranslateResult<EmbeddingType> {
    let [kind, dimension, element, ..] = tokens else {
        return Err(missing_parameters(tokens, "dimension and element type"));
    };
    Ok(EmbeddingType {
        element_type: element_type(element)?,
        dimension: parse_dimension(kind, dimension)?,
    })
}

// [sparse, dimension, element, index]
fn sparse_type(tokens: &[&str]) -> TranslateResult<SparseType> {
    let [kind, dimension, element, index, ..] = tokens else {
        return Err(missing_parameters(tokens, "dimension, element type and index type"));
    };
    Ok(SparseType {
        element_type: element_type(element)?,
        index_type: index_type(index)?,
        dimension: parse_dimension(kind, dimension)?,
    })
}

/// Element type of embeddings, tensors and sparse vectors
pub fn element_type(name: &str) -> TranslateResult<EmbeddingDataType> {
    let element = match name {
        "bit" => EmbeddingDataType::Bit,
        "float32" | "float" | "f32" => EmbeddingDataType::Float,
        "float64" | "double" | "f64" => EmbeddingDataType::Double,
        "float16" | "f16" => EmbeddingDataType::Float16,
        "bfloat16" | "bf16" => EmbeddingDataType::BFloat16,
        "uint8" | "u8" => EmbeddingDataType::UInt8,
        "int8" | "i8" => EmbeddingDataType::Int8,
        "int16" | "i16" => EmbeddingDataType::Int16,
        "int32" | "int" | "i32" => EmbeddingDataType::Int32,
        "int64" | "i64" => EmbeddingDataType::Int64,
        _ => return Err(TranslateError::UnknownEmbeddingElementType(name.to_string())),
    };
    Ok(element)
}

fn index_type(name: &str) -> TranslateResult<EmbeddingDataType> {
    match name {
        "int8" => Ok(EmbeddingDataType::Int8),
        "int16" => Ok(EmbeddingDataType::Int16),
        "int32" | "int" => Ok(EmbeddingDataType::Int32),
        "int64" => Ok(EmbeddingDataType::Int64),
        _ => Err(TranslateError::UnknownSparseIndexType(name.to_string())),
    }
}

fn parse_dimension(kind: &str, dimension: &str) -> TranslateResult<usize> {
    dimension.parse::<usize>().map_err(|_| {
        TranslateError::InvalidDataType(format!(
            "{} dimension '{}' is not a non-negative integer",
            kind, dimension
        ))
    })
}

fn missing_parameters(tokens: &[&str], expected: &str) -> TranslateError {
    TranslateError::InvalidDataType(format!(
        "{} requires {}, got '{}'",
        tokens.first().copied().unwrap_or_default(),
        expected,
        tokens.join(",")
    ))
}
