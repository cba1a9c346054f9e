// Tokens of the filter condition grammar

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    Identifier(String),
    Number(String),
    String(String),

    // Keywords
    And,
    Or,
    Not,
    Null,
    In,
    Between,
    Like,
    Is,
    As,
    True,
    False,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Concat,
    Equal,
    NotEqual,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,

    // Delimiters
    LeftParen,
    RightParen,
    Comma,
    Dot,

    // Special
    Illegal(char),
    Eof,
}

impl Token {
    /// Convert a string to a keyword token if it matches
    pub fn keyword_from_str(s: &str) -> Option<Token> {
        match s.to_uppercase().as_str() {
            "AND" => Some(Token::And),
            "OR" => Some(Token::Or),
            "NOT" => Some(Token::Not),
            "NULL" => Some(Token::Null),
            "IN" => Some(Token::In),
            "BETWEEN" => Some(Token::Between),
            "LIKE" => Some(Token::Like),
            "IS" => Some(Token::Is),
            "AS" => Some(Token::As),
            "TRUE" => Some(Token::True),
            "FALSE" => Some(Token::False),
            _ => None,
        }
    }
}
