//! Column descriptors.

use crate::ir::constant::ConstantExpr;
use crate::ir::data_type::DataType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConstraintType {
    Null,
    NotNull,
    PrimaryKey,
    Unique,
}

impl ConstraintType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConstraintType::Null => "null",
            ConstraintType::NotNull => "not null",
            ConstraintType::PrimaryKey => "primary key",
            ConstraintType::Unique => "unique",
        }
    }
}

/// Column definition as consumed by the engine's create-table call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Ordinal position in the table
    pub id: usize,
    pub name: String,
    pub column_type: DataType,
    /// `ConstantExpr::Null` when no default was given
    pub default: ConstantExpr,
    pub constraints: Vec<ConstraintType>,
    pub comment: Option<String>,
}

impl ColumnDescriptor {
    pub fn has_constraint(&self, constraint: ConstraintType) -> bool {
        self.constraints.contains(&constraint)
    }
}
