//! Expression tree to parsed-expression translation.

pub mod condition;
pub mod operator;

pub use condition::{parse_expr, translate_condition, LeafTransform};
pub use operator::binary_function_name;
