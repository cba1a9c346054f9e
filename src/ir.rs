//! Structures handed to the native engine.
//!
//! Every type here is a tagged structure: exactly one variant is populated
//! and the discriminant is available explicitly (`expr_type`,
//! `literal_type`, `logical_type`) so the consumer never has to infer it.

pub mod column;
pub mod constant;
pub mod data_type;
pub mod parsed;

pub use column::{ColumnDescriptor, ConstraintType};
pub use constant::{ConstantExpr, LiteralType};
pub use data_type::{DataType, EmbeddingDataType, EmbeddingType, LogicalType, SparseType};
pub use parsed::{ColumnExpr, FunctionExpr, InExpr, ParsedExpr, ParsedExprKind, ParsedExprType};
