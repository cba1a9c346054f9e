//! Column data types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Flat logical type tag of a [`DataType`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogicalType {
    TinyInt,
    SmallInt,
    Integer,
    BigInt,
    HugeInt,
    Float,
    Double,
    Float16,
    BFloat16,
    Varchar,
    Boolean,
    Date,
    Time,
    DateTime,
    Timestamp,
    Embedding,
    MultiVector,
    Tensor,
    TensorArray,
    Sparse,
    Array,
}

/// Element type of embeddings, tensors and sparse vectors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmbeddingDataType {
    Bit,
    UInt8,
    Int8,
    Int16,
    Int32,
    Int64,
    Float,
    Double,
    Float16,
    BFloat16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmbeddingType {
    pub element_type: EmbeddingDataType,
    pub dimension: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SparseType {
    pub element_type: EmbeddingDataType,
    pub index_type: EmbeddingDataType,
    pub dimension: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    TinyInt,
    SmallInt,
    Integer,
    BigInt,
    HugeInt,
    Float,
    Double,
    Float16,
    BFloat16,
    Varchar,
    Boolean,
    Date,
    Time,
    DateTime,
    Timestamp,
    Embedding(EmbeddingType),
    MultiVector(EmbeddingType),
    Tensor(EmbeddingType),
    TensorArray(EmbeddingType),
    Sparse(SparseType),
    Array(Box<DataType>),
}

impl DataType {
    pub fn logical_type(&self) -> LogicalType {
        match self {
            DataType::TinyInt => LogicalType::TinyInt,
            DataType::SmallInt => LogicalType::SmallInt,
            DataType::Integer => LogicalType::Integer,
            DataType::BigInt => LogicalType::BigInt,
            DataType::HugeInt => LogicalType::HugeInt,
            DataType::Float => LogicalType::Float,
            DataType::Double => LogicalType::Double,
            DataType::Float16 => LogicalType::Float16,
            DataType::BFloat16 => LogicalType::BFloat16,
            DataType::Varchar => LogicalType::Varchar,
            DataType::Boolean => LogicalType::Boolean,
            DataType::Date => LogicalType::Date,
            DataType::Time => LogicalType::Time,
            DataType::DateTime => LogicalType::DateTime,
            DataType::Timestamp => LogicalType::Timestamp,
            DataType::Embedding(_) => LogicalType::Embedding,
            DataType::MultiVector(_) => LogicalType::MultiVector,
            DataType::Tensor(_) => LogicalType::Tensor,
            DataType::TensorArray(_) => LogicalType::TensorArray,
            DataType::Sparse(_) => LogicalType::Sparse,
            DataType::Array(_) => LogicalType::Array,
        }
    }

    /// Embedding parameters of the vector/tensor family
    pub fn embedding_type(&self) -> Option<&EmbeddingType> {
        match self {
            DataType::Embedding(e)
            | DataType::MultiVector(e)
            | DataType::Tensor(e)
            | DataType::TensorArray(e) => Some(e),
            _ => None,
        }
    }

    pub fn sparse_type(&self) -> Option<&SparseType> {
        match self {
            DataType::Sparse(s) => Some(s),
            _ => None,
        }
    }

    pub fn array_element(&self) -> Option<&DataType> {
        match self {
            DataType::Array(inner) => Some(inner),
            _ => None,
        }
    }
}

impl fmt::Display for EmbeddingDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EmbeddingDataType::Bit => "bit",
            EmbeddingDataType::UInt8 => "uint8",
            EmbeddingDataType::Int8 => "int8",
            EmbeddingDataType::Int16 => "int16",
            EmbeddingDataType::Int32 => "int32",
            EmbeddingDataType::Int64 => "int64",
            EmbeddingDataType::Float => "float32",
            EmbeddingDataType::Double => "float64",
            EmbeddingDataType::Float16 => "float16",
            EmbeddingDataType::BFloat16 => "bfloat16",
        };
        write!(f, "{}", name)
    }
}

/// Renders the comma-separated type string accepted by the schema builder
impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::TinyInt => write!(f, "int8"),
            DataType::SmallInt => write!(f, "int16"),
            DataType::Integer => write!(f, "int32"),
            DataType::BigInt => write!(f, "int64"),
            DataType::HugeInt => write!(f, "int128"),
            DataType::Float => write!(f, "float32"),
            DataType::Double => write!(f, "float64"),
            DataType::Float16 => write!(f, "float16"),
            DataType::BFloat16 => write!(f, "bfloat16"),
            DataType::Varchar => write!(f, "varchar"),
            DataType::Boolean => write!(f, "bool"),
            DataType::Date => write!(f, "date"),
            DataType::Time => write!(f, "time"),
            DataType::DateTime => write!(f, "datetime"),
            DataType::Timestamp => write!(f, "timestamp"),
            DataType::Embedding(e) => write!(f, "vector,{},{}", e.dimension, e.element_type),
            DataType::MultiVector(e) => {
                write!(f, "multivector,{},{}", e.dimension, e.element_type)
            }
            DataType::Tensor(e) => write!(f, "tensor,{},{}", e.dimension, e.element_type),
            DataType::TensorArray(e) => {
                write!(f, "tensorarray,{},{}", e.dimension, e.element_type)
            }
            DataType::Sparse(s) => write!(
                f,
                "sparse,{},{},{}",
                s.dimension, s.element_type, s.index_type
            ),
            DataType::Array(inner) => write!(f, "array,{}", inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logical_type() {
        let embedding = EmbeddingType {
            element_type: EmbeddingDataType::Float,
            dimension: 4,
        };
        assert_eq!(
            DataType::Tensor(embedding).logical_type(),
            LogicalType::Tensor
        );
        assert_eq!(
            DataType::Array(Box::new(DataType::Varchar)).logical_type(),
            LogicalType::Array
        );
        assert_eq!(
            DataType::Tensor(embedding).embedding_type(),
            Some(&embedding)
        );
        assert!(DataType::Varchar.embedding_type().is_none());
    }

    #[test]
    fn test_display() {
        let sparse = DataType::Sparse(SparseType {
            element_type: EmbeddingDataType::Float,
            index_type: EmbeddingDataType::Int32,
            dimension: 100,
        });
        assert_eq!(sparse.to_string(), "sparse,100,float32,int32");

        let nested = DataType::Array(Box::new(DataType::Array(Box::new(DataType::BigInt))));
        assert_eq!(nested.to_string(), "array,array,int64");
    }
}
