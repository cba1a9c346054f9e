//! Constant (literal) expressions.

use serde::{Deserialize, Serialize};

/// Wire literal tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LiteralType {
    Null,
    Boolean,
    Integer,
    Double,
    String,
    IntegerArray,
    DoubleArray,
    /// Shared by tensors and tensor arrays of either element kind
    SubArrayArray,
    LongSparseArray,
    DoubleSparseArray,
    CurlyBracketsArray,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConstantExpr {
    Null,
    Boolean(bool),
    Integer(i64),
    Double(f64),
    String(String),
    IntegerArray(Vec<i64>),
    DoubleArray(Vec<f64>),
    IntegerTensor(Vec<Vec<i64>>),
    DoubleTensor(Vec<Vec<f64>>),
    IntegerTensorArray(Vec<Vec<Vec<i64>>>),
    DoubleTensorArray(Vec<Vec<Vec<f64>>>),
    LongSparseArray { indices: Vec<i64>, values: Vec<i64> },
    DoubleSparseArray { indices: Vec<i64>, values: Vec<f64> },
    CurlyBracketsArray(Vec<ConstantExpr>),
}

impl ConstantExpr {
    pub fn literal_type(&self) -> LiteralType {
        match self {
            ConstantExpr::Null => LiteralType::Null,
            ConstantExpr::Boolean(_) => LiteralType::Boolean,
            ConstantExpr::Integer(_) => LiteralType::Integer,
            ConstantExpr::Double(_) => LiteralType::Double,
            ConstantExpr::String(_) => LiteralType::String,
            ConstantExpr::IntegerArray(_) => LiteralType::IntegerArray,
            ConstantExpr::DoubleArray(_) => LiteralType::DoubleArray,
            ConstantExpr::IntegerTensor(_)
            | ConstantExpr::DoubleTensor(_)
            | ConstantExpr::IntegerTensorArray(_)
            | ConstantExpr::DoubleTensorArray(_) => LiteralType::SubArrayArray,
            ConstantExpr::LongSparseArray { .. } => LiteralType::LongSparseArray,
            ConstantExpr::DoubleSparseArray { .. } => LiteralType::DoubleSparseArray,
            ConstantExpr::CurlyBracketsArray(_) => LiteralType::CurlyBracketsArray,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ConstantExpr::Null)
    }
}
