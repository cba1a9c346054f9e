//! Parsed expression nodes.

use crate::ir::constant::ConstantExpr;
use serde::{Deserialize, Serialize};

/// Discriminant of a [`ParsedExpr`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParsedExprType {
    Constant,
    Column,
    Function,
    In,
}

/// Function call node; operators are function calls too
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionExpr {
    pub func_name: String,
    pub arguments: Vec<ParsedExpr>,
}

/// Column reference node
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ColumnExpr {
    pub names: Vec<String>,
    pub star: bool,
}

/// Membership test; `in_type` is false for `NOT IN`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InExpr {
    pub left: Box<ParsedExpr>,
    pub arguments: Vec<ParsedExpr>,
    pub in_type: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParsedExprKind {
    Constant(ConstantExpr),
    Column(ColumnExpr),
    Function(FunctionExpr),
    In(InExpr),
}

/// A translated expression with an optional display name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedExpr {
    pub kind: ParsedExprKind,
    pub alias_name: Option<String>,
}

impl ParsedExpr {
    pub fn new(kind: ParsedExprKind) -> Self {
        Self {
            kind,
            alias_name: None,
        }
    }

    pub fn constant(constant: ConstantExpr) -> Self {
        Self::new(ParsedExprKind::Constant(constant))
    }

    pub fn column(names: Vec<String>, star: bool) -> Self {
        Self::new(ParsedExprKind::Column(ColumnExpr { names, star }))
    }

    /// Bare `*` column with no names
    pub fn star() -> Self {
        Self::column(vec![], true)
    }

    pub fn function(func_name: impl Into<String>, arguments: Vec<ParsedExpr>) -> Self {
        Self::new(ParsedExprKind::Function(FunctionExpr {
            func_name: func_name.into(),
            arguments,
        }))
    }

    pub fn in_list(left: ParsedExpr, arguments: Vec<ParsedExpr>, in_type: bool) -> Self {
        Self::new(ParsedExprKind::In(InExpr {
            left: Box::new(left),
            arguments,
            in_type,
        }))
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias_name = Some(alias.into());
        self
    }

    pub fn expr_type(&self) -> ParsedExprType {
        match &self.kind {
            ParsedExprKind::Constant(_) => ParsedExprType::Constant,
            ParsedExprKind::Column(_) => ParsedExprType::Column,
            ParsedExprKind::Function(_) => ParsedExprType::Function,
            ParsedExprKind::In(_) => ParsedExprType::In,
        }
    }

    pub fn as_function(&self) -> Option<&FunctionExpr> {
        match &self.kind {
            ParsedExprKind::Function(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_column(&self) -> Option<&ColumnExpr> {
        match &self.kind {
            ParsedExprKind::Column(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_constant(&self) -> Option<&ConstantExpr> {
        match &self.kind {
            ParsedExprKind::Constant(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_in(&self) -> Option<&InExpr> {
        match &self.kind {
            ParsedExprKind::In(i) => Some(i),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expr_type_tags() {
        assert_eq!(
            ParsedExpr::constant(ConstantExpr::Integer(1)).expr_type(),
            ParsedExprType::Constant
        );
        assert_eq!(ParsedExpr::star().expr_type(), ParsedExprType::Column);
        assert_eq!(
            ParsedExpr::function("=", vec![]).expr_type(),
            ParsedExprType::Function
        );
        assert_eq!(
            ParsedExpr::in_list(ParsedExpr::star(), vec![], false).expr_type(),
            ParsedExprType::In
        );
    }

    #[test]
    fn test_alias() {
        let expr = ParsedExpr::column(vec!["a".to_string()], false).with_alias("b");
        assert_eq!(expr.alias_name.as_deref(), Some("b"));
        assert!(expr.as_column().is_some());
        assert!(expr.as_function().is_none());
    }
}
