//! Condition translator.
//!
//! Walks an input [`Expression`] and builds the tagged [`ParsedExpr`] the
//! engine consumes. Operands of binary operators and of logical NOT can be
//! routed through a caller-supplied leaf transform; every other recursion
//! goes either straight back into [`translate_condition`] (alias, paren) or
//! through [`parse_expr`] (negation, calls, IN lists), regardless of the
//! transform.

use crate::error::{TranslateError, TranslateResult};
use crate::ir::{ConstantExpr, ParsedExpr};
use crate::sql::ast::{Expression, Literal};
use crate::translate::operator::binary_function_name;
use log::trace;

/// Substitute translation applied to binary and NOT operands
pub type LeafTransform<'a> = &'a dyn Fn(&Expression) -> TranslateResult<ParsedExpr>;

/// Deepest expression tree the translator walks
pub const MAX_DEPTH: usize = 256;

#[derive(Clone, Copy)]
enum Leaf<'a> {
    Direct,
    ParseExpr,
    Custom(LeafTransform<'a>),
}

/// Translate one condition node.
///
/// Fails with `UnsupportedExpression` for node kinds that have no parsed
/// form (bare `*`, `NULL`, `BETWEEN`), and with `NestingTooDeep` for trees
/// deeper than [`MAX_DEPTH`].
pub fn translate_condition(
    node: &Expression,
    leaf: Option<LeafTransform<'_>>,
) -> TranslateResult<ParsedExpr> {
    let leaf = match leaf {
        Some(transform) => Leaf::Custom(transform),
        None => Leaf::Direct,
    };
    translate_at(node, leaf, 0)
}

/// Translate with [`parse_expr`] as the leaf transform.
///
/// A bare `*` that the dispatch rejects becomes a star column; any other
/// failure is reported as `UnknownExpressionType`.
pub fn parse_expr(node: &Expression) -> TranslateResult<ParsedExpr> {
    parse_expr_at(node, 0)
}

fn parse_expr_at(node: &Expression, depth: usize) -> TranslateResult<ParsedExpr> {
    match translate_at(node, Leaf::ParseExpr, depth) {
        Err(err @ TranslateError::NestingTooDeep(_)) => Err(err),
        Err(_) if matches!(node, Expression::Star) => {
            trace!("translating bare * as a star column");
            Ok(ParsedExpr::star())
        }
        Err(err) => Err(TranslateError::UnknownExpressionType {
            expression: node.to_string(),
            source: Box::new(err),
        }),
        ok => ok,
    }
}

fn translate_at(node: &Expression, leaf: Leaf<'_>, depth: usize) -> TranslateResult<ParsedExpr> {
    if depth >= MAX_DEPTH {
        return Err(TranslateError::NestingTooDeep(MAX_DEPTH));
    }
    let depth = depth + 1;

    let operand = |expr: &Expression| match leaf {
        Leaf::Direct => translate_at(expr, Leaf::Direct, depth),
        Leaf::ParseExpr => parse_expr_at(expr, depth),
        Leaf::Custom(transform) => transform(expr),
    };
    let nested = |expr: &Expression| parse_expr_at(expr, depth);

    match node {
        Expression::Alias { expression, alias } => {
            Ok(translate_at(expression, Leaf::Direct, depth)?.with_alias(alias.clone()))
        }

        Expression::Binary { op, left, right } => {
            let func_name = binary_function_name(op.key())?;
            let arguments = vec![operand(left)?, operand(right)?];
            Ok(ParsedExpr::function(func_name, arguments))
        }

        Expression::Not(inner) if !matches!(**inner, Expression::In { .. }) => {
            Ok(ParsedExpr::function("not", vec![operand(inner)?]))
        }

        Expression::Column(column) if column.name == "*" => Ok(ParsedExpr::star()),

        Expression::Column(column) => Ok(ParsedExpr::column(
            vec![column.name.to_lowercase()],
            false,
        )),

        Expression::Boolean(value) => Ok(ParsedExpr::constant(ConstantExpr::Boolean(*value))),

        Expression::Literal(literal) => translate_literal(literal).map(ParsedExpr::constant),

        Expression::Paren(inner) => translate_at(inner, Leaf::Direct, depth),

        Expression::Neg(inner) => Ok(ParsedExpr::function("-", vec![nested(inner)?])),

        Expression::Anonymous { name, args } => {
            let arguments = args
                .iter()
                .flatten()
                .map(nested)
                .collect::<TranslateResult<Vec<_>>>()?;
            Ok(ParsedExpr::function(name.clone(), arguments))
        }

        Expression::Function(call) => {
            let arguments = call
                .fields()
                .filter_map(|(_, value)| value)
                .map(nested)
                .collect::<TranslateResult<Vec<_>>>()?;
            Ok(ParsedExpr::function(call.kind().key(), arguments))
        }

        Expression::In { expression, list } => translate_in(expression, list, true, depth),

        Expression::Not(inner) => match inner.as_ref() {
            Expression::In { expression, list } => translate_in(expression, list, false, depth),
            other => Err(unsupported(other)),
        },

        Expression::Star | Expression::Null | Expression::Between { .. } => Err(unsupported(node)),
    }
}

fn translate_in(
    expression: &Expression,
    list: &[Option<Expression>],
    in_type: bool,
    depth: usize,
) -> TranslateResult<ParsedExpr> {
    let left = parse_expr_at(expression, depth)?;
    let arguments = list
        .iter()
        .flatten()
        .map(|item| parse_expr_at(item, depth))
        .collect::<TranslateResult<Vec<_>>>()?;
    Ok(ParsedExpr::in_list(left, arguments, in_type))
}

fn translate_literal(literal: &Literal) -> TranslateResult<ConstantExpr> {
    if literal.is_int() {
        if let Ok(value) = literal.text.parse::<i64>() {
            return Ok(ConstantExpr::Integer(value));
        }
    }
    if literal.is_number() {
        if let Ok(value) = literal.text.parse::<f64>() {
            return Ok(ConstantExpr::Double(value));
        }
    }
    if literal.is_string {
        return Ok(ConstantExpr::String(literal.text.clone()));
    }
    Err(TranslateError::UnknownLiteralType(literal.text.clone()))
}

fn unsupported(node: &Expression) -> TranslateError {
    TranslateError::UnsupportedExpression(format!("unknown condition type: {}", node))
}
