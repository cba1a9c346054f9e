// Filter condition syntax tree

use super::function::FunctionCall;
use super::token::Token;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    // expression AS alias
    Alias {
        expression: Box<Expression>,
        alias: String,
    },

    // Binary operations
    Binary {
        op: BinaryOperator,
        left: Box<Expression>,
        right: Box<Expression>,
    },

    // Logical NOT
    Not(Box<Expression>),

    // Arithmetic negation
    Neg(Box<Expression>),

    Boolean(bool),
    Literal(Literal),
    Column(ColumnRef),

    // Call to a function the grammar does not know
    Anonymous {
        name: String,
        args: Vec<Option<Expression>>,
    },

    // Call to a registered function
    Function(FunctionCall),

    // IN expression
    In {
        expression: Box<Expression>,
        list: Vec<Option<Expression>>,
    },

    // Parenthesized group
    Paren(Box<Expression>),

    // Bare `*`, e.g. COUNT(*)
    Star,

    Null,

    // BETWEEN expression
    Between {
        expression: Box<Expression>,
        low: Box<Expression>,
        high: Box<Expression>,
    },
}

/// Numeric or string literal, kept as raw text
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    pub text: String,
    pub is_string: bool,
}

impl Literal {
    pub fn number(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_string: false,
        }
    }

    pub fn string(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_string: true,
        }
    }

    /// Numeric literal whose text is a 64-bit integer
    pub fn is_int(&self) -> bool {
        !self.is_string && self.text.parse::<i64>().is_ok()
    }

    /// Numeric literal whose text is any number
    pub fn is_number(&self) -> bool {
        !self.is_string && self.text.parse::<f64>().is_ok()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnRef {
    pub table: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,

    // Comparison
    Eq,
    Neq,
    Lt,
    Lte,
    Gt,
    Gte,

    // Logical
    And,
    Or,

    // String / null tests
    Like,
    Is,
    Concat,
}

impl BinaryOperator {
    /// Lower-case operator key, e.g. `gte`
    pub fn key(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "add",
            BinaryOperator::Sub => "sub",
            BinaryOperator::Mul => "mul",
            BinaryOperator::Div => "div",
            BinaryOperator::Mod => "mod",
            BinaryOperator::Eq => "eq",
            BinaryOperator::Neq => "neq",
            BinaryOperator::Lt => "lt",
            BinaryOperator::Lte => "lte",
            BinaryOperator::Gt => "gt",
            BinaryOperator::Gte => "gte",
            BinaryOperator::And => "and",
            BinaryOperator::Or => "or",
            BinaryOperator::Like => "like",
            BinaryOperator::Is => "is",
            BinaryOperator::Concat => "concat",
        }
    }

    /// Source text of the operator
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Mul => "*",
            BinaryOperator::Div => "/",
            BinaryOperator::Mod => "%",
            BinaryOperator::Eq => "=",
            BinaryOperator::Neq => "<>",
            BinaryOperator::Lt => "<",
            BinaryOperator::Lte => "<=",
            BinaryOperator::Gt => ">",
            BinaryOperator::Gte => ">=",
            BinaryOperator::And => "AND",
            BinaryOperator::Or => "OR",
            BinaryOperator::Like => "LIKE",
            BinaryOperator::Is => "IS",
            BinaryOperator::Concat => "||",
        }
    }
}

impl Expression {
    /// Create a column reference expression
    pub fn column(name: impl Into<String>) -> Self {
        Expression::Column(ColumnRef {
            table: None,
            name: name.into(),
        })
    }

    /// Create a qualified column reference (table.column)
    pub fn qualified_column(table: impl Into<String>, column: impl Into<String>) -> Self {
        Expression::Column(ColumnRef {
            table: Some(table.into()),
            name: column.into(),
        })
    }

    pub fn number(text: impl Into<String>) -> Self {
        Expression::Literal(Literal::number(text))
    }

    pub fn string(text: impl Into<String>) -> Self {
        Expression::Literal(Literal::string(text))
    }

    pub fn binary(op: BinaryOperator, left: Expression, right: Expression) -> Self {
        Expression::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn not(operand: Expression) -> Self {
        Expression::Not(Box::new(operand))
    }

    pub fn neg(operand: Expression) -> Self {
        Expression::Neg(Box::new(operand))
    }

    pub fn paren(inner: Expression) -> Self {
        Expression::Paren(Box::new(inner))
    }

    pub fn in_list(expression: Expression, list: Vec<Expression>) -> Self {
        Expression::In {
            expression: Box::new(expression),
            list: list.into_iter().map(Some).collect(),
        }
    }

    pub fn alias(self, alias: impl Into<String>) -> Self {
        Expression::Alias {
            expression: Box::new(self),
            alias: alias.into(),
        }
    }

    /// Create an equality comparison
    pub fn eq(self, other: Expression) -> Self {
        Self::binary(BinaryOperator::Eq, self, other)
    }

    /// Create a greater than comparison
    pub fn gt(self, other: Expression) -> Self {
        Self::binary(BinaryOperator::Gt, self, other)
    }

    /// Create an AND expression
    pub fn and(self, other: Expression) -> Self {
        Self::binary(BinaryOperator::And, self, other)
    }

    /// Create an OR expression
    pub fn or(self, other: Expression) -> Self {
        Self::binary(BinaryOperator::Or, self, other)
    }
}

fn write_identifier(f: &mut fmt::Formatter<'_>, name: &str) -> fmt::Result {
    let plain = name
        .chars()
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
        && name.chars().all(|c| c.is_alphanumeric() || c == '_')
        && Token::keyword_from_str(name).is_none();
    if plain {
        write!(f, "{}", name)
    } else {
        write!(f, "\"{}\"", name.replace('"', "\"\""))
    }
}

fn write_list<'a>(
    f: &mut fmt::Formatter<'_>,
    items: impl Iterator<Item = &'a Expression>,
) -> fmt::Result {
    for (i, item) in items.enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

/// Renders condition text.
///
/// Operands are written without added parentheses, so only trees whose
/// grouping is carried by `Paren` nodes, as the parser produces them,
/// parse back to the same tree.
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Alias { expression, alias } => {
                write!(f, "{} AS ", expression)?;
                write_identifier(f, alias)
            }
            Expression::Binary { op, left, right } => {
                write!(f, "{} {} {}", left, op.symbol(), right)
            }
            Expression::Not(operand) => write!(f, "NOT {}", operand),
            // `--` would lex as a comment
            Expression::Neg(operand) if matches!(**operand, Expression::Neg(_)) => {
                write!(f, "- {}", operand)
            }
            Expression::Neg(operand) => write!(f, "-{}", operand),
            Expression::Boolean(true) => write!(f, "TRUE"),
            Expression::Boolean(false) => write!(f, "FALSE"),
            Expression::Literal(lit) if lit.is_string => {
                write!(f, "'{}'", lit.text.replace('\'', "''"))
            }
            Expression::Literal(lit) => write!(f, "{}", lit.text),
            Expression::Column(col) => {
                if let Some(table) = &col.table {
                    write_identifier(f, table)?;
                    write!(f, ".")?;
                }
                if col.name == "*" {
                    write!(f, "*")
                } else {
                    write_identifier(f, &col.name)
                }
            }
            Expression::Anonymous { name, args } => {
                write_identifier(f, name)?;
                write!(f, "(")?;
                write_list(f, args.iter().flatten())?;
                write!(f, ")")
            }
            Expression::Function(call) => {
                write!(f, "{}(", call.kind().sql_name())?;
                write_list(f, call.slots().iter().flatten())?;
                write!(f, ")")
            }
            Expression::In { expression, list } => {
                write!(f, "{} IN (", expression)?;
                write_list(f, list.iter().flatten())?;
                write!(f, ")")
            }
            Expression::Paren(inner) => write!(f, "({})", inner),
            Expression::Star => write!(f, "*"),
            Expression::Null => write!(f, "NULL"),
            Expression::Between {
                expression,
                low,
                high,
            } => write!(f, "{} BETWEEN {} AND {}", expression, low, high),
        }
    }
}
