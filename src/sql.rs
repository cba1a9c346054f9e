// Filter condition front end - lexing, parsing and the input expression tree

pub mod ast;
pub mod function;
pub mod lexer;
pub mod parser;
pub mod token;

pub use ast::*;
pub use function::{FunctionCall, FunctionKind};
pub use lexer::Lexer;
pub use parser::{parse_condition, Parser};
pub use token::*;
