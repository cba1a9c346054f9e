// Filter condition parser - converts tokens to an expression tree

use super::ast::*;
use super::function::{self, FunctionCall};
use super::lexer::Lexer;
use super::token::Token;
use anyhow::{bail, Result};

/// Deepest nesting of parentheses, call arguments, NOT and sign prefixes
const MAX_DEPTH: usize = 100;

pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
    depth: usize,
}

impl Parser {
    pub fn new(condition: &str) -> Self {
        let mut lexer = Lexer::new(condition);
        let tokens = lexer.tokenize();
        Parser {
            tokens,
            position: 0,
            depth: 0,
        }
    }

    /// Parse a whole condition, optionally followed by `AS alias`
    pub fn parse(&mut self) -> Result<Expression> {
        if self.match_token(&Token::Eof) {
            bail!("Empty condition");
        }

        let mut expr = self.parse_expression()?;

        if self.match_token(&Token::As) {
            self.advance();
            let alias = self.expect_identifier()?;
            expr = expr.alias(alias);
        }

        if !self.match_token(&Token::Eof) {
            bail!("Unexpected token: {:?}", self.current_token());
        }

        Ok(expr)
    }

    /// Parse expression
    fn parse_expression(&mut self) -> Result<Expression> {
        self.descend()?;
        let expr = self.parse_or()?;
        self.ascend();
        Ok(expr)
    }

    /// Parse OR expression
    fn parse_or(&mut self) -> Result<Expression> {
        let mut left = self.parse_and()?;

        while self.match_token(&Token::Or) {
            self.advance();
            let right = self.parse_and()?;
            left = Expression::binary(BinaryOperator::Or, left, right);
        }

        Ok(left)
    }

    /// Parse AND expression
    fn parse_and(&mut self) -> Result<Expression> {
        let mut left = self.parse_not()?;

        while self.match_token(&Token::And) {
            self.advance();
            let right = self.parse_not()?;
            left = Expression::binary(BinaryOperator::And, left, right);
        }

        Ok(left)
    }

    /// Parse NOT expression
    fn parse_not(&mut self) -> Result<Expression> {
        if self.match_token(&Token::Not) {
            self.advance();
            self.descend()?;
            let operand = self.parse_not()?;
            self.ascend();
            Ok(Expression::not(operand))
        } else {
            self.parse_comparison()
        }
    }

    /// Parse comparison expression
    fn parse_comparison(&mut self) -> Result<Expression> {
        let left = self.parse_addition()?;

        // `x NOT IN`, `x NOT LIKE`, `x NOT BETWEEN` wrap the positive form
        let negated = if self.match_token(&Token::Not) {
            self.advance();
            if !matches!(
                self.current_token(),
                Token::In | Token::Like | Token::Between
            ) {
                bail!(
                    "Expected IN, LIKE or BETWEEN after NOT, found {:?}",
                    self.current_token()
                );
            }
            true
        } else {
            false
        };

        let expr = match self.current_token() {
            Token::Is => {
                self.advance();
                let is_not = if self.match_token(&Token::Not) {
                    self.advance();
                    true
                } else {
                    false
                };
                self.expect_token(Token::Null)?;
                let test = Expression::binary(BinaryOperator::Is, left, Expression::Null);
                return Ok(if is_not { Expression::not(test) } else { test });
            }
            Token::In => {
                self.advance();
                self.expect_token(Token::LeftParen)?;
                let list = if self.match_token(&Token::RightParen) {
                    vec![]
                } else {
                    self.parse_expression_list()?
                };
                self.expect_token(Token::RightParen)?;
                Expression::in_list(left, list)
            }
            Token::Between => {
                self.advance();
                let low = self.parse_addition()?;
                self.expect_token(Token::And)?;
                let high = self.parse_addition()?;
                Expression::Between {
                    expression: Box::new(left),
                    low: Box::new(low),
                    high: Box::new(high),
                }
            }
            Token::Like => {
                self.advance();
                let pattern = self.parse_addition()?;
                Expression::binary(BinaryOperator::Like, left, pattern)
            }
            _ => {
                let op = match self.current_token() {
                    Token::Equal => BinaryOperator::Eq,
                    Token::NotEqual => BinaryOperator::Neq,
                    Token::Less => BinaryOperator::Lt,
                    Token::Greater => BinaryOperator::Gt,
                    Token::LessEqual => BinaryOperator::Lte,
                    Token::GreaterEqual => BinaryOperator::Gte,
                    _ => return Ok(left),
                };
                self.advance();
                let right = self.parse_addition()?;
                Expression::binary(op, left, right)
            }
        };

        Ok(if negated { Expression::not(expr) } else { expr })
    }

    /// Parse addition/subtraction/concatenation expression
    fn parse_addition(&mut self) -> Result<Expression> {
        let mut left = self.parse_multiplication()?;

        loop {
            let op = match self.current_token() {
                Token::Plus => BinaryOperator::Add,
                Token::Minus => BinaryOperator::Sub,
                Token::Concat => BinaryOperator::Concat,
                _ => break,
            };
            self.advance();

            let right = self.parse_multiplication()?;
            left = Expression::binary(op, left, right);
        }

        Ok(left)
    }

    /// Parse multiplication/division expression
    fn parse_multiplication(&mut self) -> Result<Expression> {
        let mut left = self.parse_unary()?;

        loop {
            let op = match self.current_token() {
                Token::Star => BinaryOperator::Mul,
                Token::Slash => BinaryOperator::Div,
                Token::Percent => BinaryOperator::Mod,
                _ => break,
            };
            self.advance();

            let right = self.parse_unary()?;
            left = Expression::binary(op, left, right);
        }

        Ok(left)
    }

    /// Parse unary expression
    fn parse_unary(&mut self) -> Result<Expression> {
        match self.current_token() {
            Token::Plus => {
                self.advance();
                self.descend()?;
                let operand = self.parse_unary()?;
                self.ascend();
                Ok(operand)
            }
            Token::Minus => {
                self.advance();
                self.descend()?;
                let operand = self.parse_unary()?;
                self.ascend();
                Ok(Expression::neg(operand))
            }
            _ => self.parse_primary(),
        }
    }

    /// Parse primary expression
    fn parse_primary(&mut self) -> Result<Expression> {
        match self.current_token() {
            Token::Number(n) => {
                self.advance();
                Ok(Expression::number(n))
            }
            Token::String(s) => {
                self.advance();
                Ok(Expression::string(s))
            }
            Token::True => {
                self.advance();
                Ok(Expression::Boolean(true))
            }
            Token::False => {
                self.advance();
                Ok(Expression::Boolean(false))
            }
            Token::Null => {
                self.advance();
                Ok(Expression::Null)
            }
            Token::Star => {
                self.advance();
                Ok(Expression::Star)
            }
            Token::Identifier(name) => {
                self.advance();

                // Check for qualified column (table.column)
                if self.match_token(&Token::Dot) {
                    self.advance();
                    if self.match_token(&Token::Star) {
                        self.advance();
                        return Ok(Expression::qualified_column(name, "*"));
                    }
                    let column = self.expect_identifier()?;
                    Ok(Expression::qualified_column(name, column))
                }
                // Check for function call
                else if self.match_token(&Token::LeftParen) {
                    self.advance();
                    let args = if self.match_token(&Token::RightParen) {
                        vec![]
                    } else {
                        self.parse_expression_list()?
                    };
                    self.expect_token(Token::RightParen)?;
                    self.function_call(name, args)
                } else {
                    Ok(Expression::column(name))
                }
            }
            Token::LeftParen => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect_token(Token::RightParen)?;
                Ok(Expression::paren(expr))
            }
            Token::Illegal(c) => bail!("Unexpected character: {:?}", c),
            token => bail!("Unexpected token: {:?}", token),
        }
    }

    /// Registered names become bound calls; anything else stays anonymous
    fn function_call(&self, name: String, args: Vec<Expression>) -> Result<Expression> {
        match function::lookup(&name) {
            Some((kind, binding)) => Ok(Expression::Function(FunctionCall::bind(
                kind, binding, args,
            )?)),
            None => Ok(Expression::Anonymous {
                name,
                args: args.into_iter().map(Some).collect(),
            }),
        }
    }

    /// Parse list of expressions
    fn parse_expression_list(&mut self) -> Result<Vec<Expression>> {
        let mut expressions = vec![];

        loop {
            expressions.push(self.parse_expression()?);
            if !self.match_token(&Token::Comma) {
                break;
            }
            self.advance();
        }

        Ok(expressions)
    }

    // Helper methods

    /// Enter one nesting level, failing past `MAX_DEPTH`
    fn descend(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            bail!("Condition nested deeper than {} levels", MAX_DEPTH);
        }
        Ok(())
    }

    fn ascend(&mut self) {
        self.depth -= 1;
    }

    /// Get current token
    fn current_token(&self) -> Token {
        self.tokens
            .get(self.position)
            .cloned()
            .unwrap_or(Token::Eof)
    }

    /// Advance to next token
    fn advance(&mut self) {
        if self.position < self.tokens.len() - 1 {
            self.position += 1;
        }
    }

    /// Check if current token matches
    fn match_token(&self, token: &Token) -> bool {
        self.current_token() == *token
    }

    /// Expect a specific token
    fn expect_token(&mut self, token: Token) -> Result<()> {
        if self.current_token() == token {
            self.advance();
            Ok(())
        } else {
            bail!("Expected {:?}, found {:?}", token, self.current_token())
        }
    }

    /// Expect an identifier
    fn expect_identifier(&mut self) -> Result<String> {
        match self.current_token() {
            Token::Identifier(name) => {
                self.advance();
                Ok(name)
            }
            token => bail!("Expected identifier, found {:?}", token),
        }
    }
}

/// Parse a textual filter predicate into an expression tree
pub fn parse_condition(condition: &str) -> Result<Expression> {
    Parser::new(condition).parse()
}
