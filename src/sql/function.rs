//! Registered (known) scalar and aggregate functions.
//!
//! A registered call stores its arguments in named slots. The slot order is
//! the declaration order below and is what the translator iterates, so it
//! can differ from the order the caller wrote the arguments in (`LOCATE`
//! takes the needle first but stores the haystack in `this`).

use super::ast::Expression;
use anyhow::{bail, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionKind {
    Abs,
    Sqrt,
    Lower,
    Upper,
    Length,
    Count,
    Sum,
    Avg,
    Min,
    Max,
    Round,
    Pow,
    Substring,
    StrPosition,
}

impl FunctionKind {
    /// Canonical function name emitted by the translator
    pub fn key(&self) -> &'static str {
        match self {
            FunctionKind::Abs => "abs",
            FunctionKind::Sqrt => "sqrt",
            FunctionKind::Lower => "lower",
            FunctionKind::Upper => "upper",
            FunctionKind::Length => "length",
            FunctionKind::Count => "count",
            FunctionKind::Sum => "sum",
            FunctionKind::Avg => "avg",
            FunctionKind::Min => "min",
            FunctionKind::Max => "max",
            FunctionKind::Round => "round",
            FunctionKind::Pow => "pow",
            FunctionKind::Substring => "substring",
            FunctionKind::StrPosition => "strposition",
        }
    }

    /// Argument slots in declaration order
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            FunctionKind::Abs
            | FunctionKind::Sqrt
            | FunctionKind::Lower
            | FunctionKind::Upper
            | FunctionKind::Length
            | FunctionKind::Count
            | FunctionKind::Sum
            | FunctionKind::Avg
            | FunctionKind::Min
            | FunctionKind::Max => &["this"],
            FunctionKind::Round => &["this", "decimals"],
            FunctionKind::Pow => &["this", "expression"],
            FunctionKind::Substring => &["this", "start", "length"],
            FunctionKind::StrPosition => &["this", "substr", "position"],
        }
    }

    /// Number of leading slots that must be filled
    fn required(&self) -> usize {
        match self {
            FunctionKind::Pow | FunctionKind::Substring | FunctionKind::StrPosition => 2,
            _ => 1,
        }
    }

    /// Name used when rendering a call back to text
    pub fn sql_name(&self) -> &'static str {
        match self {
            FunctionKind::StrPosition => "STRPOS",
            FunctionKind::Abs => "ABS",
            FunctionKind::Sqrt => "SQRT",
            FunctionKind::Lower => "LOWER",
            FunctionKind::Upper => "UPPER",
            FunctionKind::Length => "LENGTH",
            FunctionKind::Count => "COUNT",
            FunctionKind::Sum => "SUM",
            FunctionKind::Avg => "AVG",
            FunctionKind::Min => "MIN",
            FunctionKind::Max => "MAX",
            FunctionKind::Round => "ROUND",
            FunctionKind::Pow => "POW",
            FunctionKind::Substring => "SUBSTRING",
        }
    }
}

/// Maps a source argument position to a slot index
pub type Binding = &'static [usize];

const IN_ORDER: Binding = &[0, 1, 2];
const LOCATE_ORDER: Binding = &[1, 0, 2];

/// Resolve a called name (case-insensitive) to a registered function
pub fn lookup(name: &str) -> Option<(FunctionKind, Binding)> {
    let kind = match name.to_uppercase().as_str() {
        "ABS" => FunctionKind::Abs,
        "SQRT" => FunctionKind::Sqrt,
        "LOWER" | "LCASE" => FunctionKind::Lower,
        "UPPER" | "UCASE" => FunctionKind::Upper,
        "LENGTH" | "LEN" | "CHAR_LENGTH" => FunctionKind::Length,
        "COUNT" => FunctionKind::Count,
        "SUM" => FunctionKind::Sum,
        "AVG" => FunctionKind::Avg,
        "MIN" => FunctionKind::Min,
        "MAX" => FunctionKind::Max,
        "ROUND" => FunctionKind::Round,
        "POW" | "POWER" => FunctionKind::Pow,
        "SUBSTRING" | "SUBSTR" => FunctionKind::Substring,
        "STRPOS" => FunctionKind::StrPosition,
        "LOCATE" => return Some((FunctionKind::StrPosition, LOCATE_ORDER)),
        _ => return None,
    };
    Some((kind, IN_ORDER))
}

/// A call to a registered function with its arguments bound to slots
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    kind: FunctionKind,
    slots: Vec<Option<Expression>>,
}

impl FunctionCall {
    /// Build a call from explicit slot values, in declaration order
    pub fn new(kind: FunctionKind, slots: Vec<Option<Expression>>) -> Result<Self> {
        let fields = kind.fields();
        if slots.len() > fields.len() {
            bail!(
                "{} takes at most {} arguments, got {}",
                kind.sql_name(),
                fields.len(),
                slots.len()
            );
        }
        let mut slots = slots;
        slots.resize(fields.len(), None);
        if slots[..kind.required()].iter().any(Option::is_none) {
            bail!(
                "{} requires at least {} arguments",
                kind.sql_name(),
                kind.required()
            );
        }
        Ok(Self { kind, slots })
    }

    /// Bind positional source arguments through `binding`
    pub fn bind(kind: FunctionKind, binding: Binding, args: Vec<Expression>) -> Result<Self> {
        let fields = kind.fields();
        if args.len() > fields.len() {
            bail!(
                "{} takes at most {} arguments, got {}",
                kind.sql_name(),
                fields.len(),
                args.len()
            );
        }
        let mut slots: Vec<Option<Expression>> = vec![None; fields.len()];
        for (position, arg) in args.into_iter().enumerate() {
            slots[binding[position]] = Some(arg);
        }
        Self::new(kind, slots)
    }

    pub fn kind(&self) -> FunctionKind {
        self.kind
    }

    /// Slot values in declaration order, `None` for absent slots
    pub fn slots(&self) -> &[Option<Expression>] {
        &self.slots
    }

    /// `(field name, value)` pairs in declaration order
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, Option<&Expression>)> + '_ {
        self.kind
            .fields()
            .iter()
            .copied()
            .zip(self.slots.iter().map(Option::as_ref))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn col(name: &str) -> Expression {
        Expression::column(name)
    }

    #[test]
    fn test_lookup_aliases() {
        assert_eq!(lookup("substr").map(|(k, _)| k), Some(FunctionKind::Substring));
        assert_eq!(lookup("Power").map(|(k, _)| k), Some(FunctionKind::Pow));
        assert_eq!(lookup("locate").map(|(k, _)| k), Some(FunctionKind::StrPosition));
        assert!(lookup("my_udf").is_none());
    }

    #[test]
    fn test_locate_binding_swaps_arguments() {
        let (kind, binding) = lookup("LOCATE").unwrap();
        let call = FunctionCall::bind(kind, binding, vec![col("needle"), col("haystack")]).unwrap();
        let fields: Vec<_> = call.fields().collect();
        assert_eq!(fields[0], ("this", Some(&col("haystack"))));
        assert_eq!(fields[1], ("substr", Some(&col("needle"))));
        assert_eq!(fields[2], ("position", None));
    }

    #[test]
    fn test_arity_checks() {
        assert!(FunctionCall::bind(FunctionKind::Abs, IN_ORDER, vec![]).is_err());
        assert!(FunctionCall::bind(FunctionKind::Abs, IN_ORDER, vec![col("a"), col("b")]).is_err());
        assert!(FunctionCall::bind(FunctionKind::Pow, IN_ORDER, vec![col("a")]).is_err());

        let round = FunctionCall::bind(FunctionKind::Round, IN_ORDER, vec![col("a")]).unwrap();
        assert_eq!(round.slots().len(), 2);
        assert!(round.slots()[1].is_none());
    }
}
