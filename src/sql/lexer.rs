// Filter condition lexer

use super::token::Token;

pub struct Lexer {
    input: Vec<char>,
    position: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
        }
    }

    /// Get the next token from the input
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let Some(ch) = self.current_char() else {
            return Token::Eof;
        };

        match ch {
            '+' => {
                self.advance();
                Token::Plus
            }
            '-' => {
                self.advance();
                if self.current_char() == Some('-') {
                    self.skip_comment();
                    return self.next_token();
                }
                Token::Minus
            }
            '*' => {
                self.advance();
                Token::Star
            }
            '/' => {
                self.advance();
                Token::Slash
            }
            '%' => {
                self.advance();
                Token::Percent
            }
            '=' => {
                self.advance();
                // `==` is accepted as equality
                if self.current_char() == Some('=') {
                    self.advance();
                }
                Token::Equal
            }
            '<' => {
                self.advance();
                match self.current_char() {
                    Some('=') => {
                        self.advance();
                        Token::LessEqual
                    }
                    Some('>') => {
                        self.advance();
                        Token::NotEqual
                    }
                    _ => Token::Less,
                }
            }
            '>' => {
                self.advance();
                if self.current_char() == Some('=') {
                    self.advance();
                    Token::GreaterEqual
                } else {
                    Token::Greater
                }
            }
            '!' => {
                self.advance();
                if self.current_char() == Some('=') {
                    self.advance();
                    Token::NotEqual
                } else {
                    Token::Illegal('!')
                }
            }
            '|' => {
                self.advance();
                if self.current_char() == Some('|') {
                    self.advance();
                    Token::Concat
                } else {
                    Token::Illegal('|')
                }
            }
            '(' => {
                self.advance();
                Token::LeftParen
            }
            ')' => {
                self.advance();
                Token::RightParen
            }
            ',' => {
                self.advance();
                Token::Comma
            }
            '.' => {
                self.advance();
                Token::Dot
            }
            '\'' => self.read_string(),
            '"' => self.read_quoted_identifier(),
            c if c.is_alphabetic() || c == '_' => self.read_identifier(),
            c if c.is_ascii_digit() => self.read_number(),
            c => {
                self.advance();
                Token::Illegal(c)
            }
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.position + 1).copied()
    }

    fn advance(&mut self) {
        if self.position < self.input.len() {
            self.position += 1;
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Skip single-line comments starting with --
    fn skip_comment(&mut self) {
        while let Some(ch) = self.current_char() {
            self.advance();
            if ch == '\n' {
                break;
            }
        }
    }

    /// Read an identifier or keyword
    fn read_identifier(&mut self) -> Token {
        let mut identifier = String::new();

        while let Some(ch) = self.current_char() {
            if ch.is_alphanumeric() || ch == '_' {
                identifier.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        Token::keyword_from_str(&identifier).unwrap_or(Token::Identifier(identifier))
    }

    /// Read a quoted identifier (e.g., "column name")
    fn read_quoted_identifier(&mut self) -> Token {
        match self.read_quoted('"') {
            Some(identifier) => Token::Identifier(identifier),
            None => Token::Illegal('"'),
        }
    }

    /// Read a string literal
    fn read_string(&mut self) -> Token {
        match self.read_quoted('\'') {
            Some(string) => Token::String(string),
            None => Token::Illegal('\''),
        }
    }

    /// Read up to the closing `quote`, where a doubled quote stands for
    /// itself. `None` if the input ends first.
    fn read_quoted(&mut self, quote: char) -> Option<String> {
        self.advance(); // Skip opening quote
        let mut text = String::new();

        while let Some(ch) = self.current_char() {
            self.advance();
            if ch != quote {
                text.push(ch);
            } else if self.current_char() == Some(quote) {
                text.push(quote);
                self.advance();
            } else {
                return Some(text);
            }
        }

        None
    }

    /// Read a number: digits, optional fraction, optional exponent
    fn read_number(&mut self) -> Token {
        let mut number = String::new();
        let mut has_dot = false;

        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                number.push(ch);
                self.advance();
            } else if ch == '.' && !has_dot && self.peek().is_some_and(|c| c.is_ascii_digit()) {
                has_dot = true;
                number.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        if matches!(self.current_char(), Some('e') | Some('E')) {
            let sign = matches!(self.peek(), Some('+') | Some('-'));
            let digit_at = if sign {
                self.position + 2
            } else {
                self.position + 1
            };
            if self
                .input
                .get(digit_at)
                .is_some_and(|c| c.is_ascii_digit())
            {
                while self.position < digit_at {
                    number.push(self.input[self.position]);
                    self.advance();
                }
                while let Some(ch) = self.current_char() {
                    if !ch.is_ascii_digit() {
                        break;
                    }
                    number.push(ch);
                    self.advance();
                }
            }
        }

        Token::Number(number)
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token();
            let done = token == Token::Eof;
            tokens.push(token);
            if done {
                break;
            }
        }

        tokens
    }
}
