//! Lexer (tokenizer) for pl0 source code
//!
//! Converts raw source text into a lazy stream of [`Token`]s consumed by the
//! parser. The [`Lexer`] is an iterator of `Result<Token, LexError>`: it
//! yields one token per call, finishes with a single [`TokenKind::Eof`]
//! token, and stops for good after the first error.

use super::ast::SourceLocation;
use std::fmt;
use thiserror::Error;

/// Token categories produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Literals
    Ident,
    IntLiteral,
    FloatLiteral,
    StringLiteral,

    // Keywords
    Fun,
    Begin,
    End,
    If,
    Then,
    Else,
    While,
    Do,
    Print,
    Read,
    Write,
    Return,
    Break,
    Skip,
    Int,
    Float,
    Not,
    And,
    Or,

    // Operators
    Plus,        // +
    Minus,       // -
    Star,        // *
    Slash,       // /
    Lt,          // <
    Le,          // <=
    Gt,          // >
    Ge,          // >=
    EqEq,        // ==
    NotEq,       // !=
    Assign,      // =
    PlusAssign,  // +=
    MinusAssign, // -=

    // Punctuation
    LParen,    // (
    RParen,    // )
    LBracket,  // [
    RBracket,  // ]
    Comma,     // ,
    Semicolon, // ;
    Colon,     // :

    // End of input
    Eof,
}

/// Keyword for `ident`, if it is one. Keywords are spelled all-lowercase or
/// all-uppercase; anything else (e.g. `Fun`) is an identifier.
fn keyword(ident: &str) -> Option<TokenKind> {
    let lower = ident.to_ascii_lowercase();
    if ident != lower && ident != ident.to_ascii_uppercase() {
        return None;
    }

    let kind = match lower.as_str() {
        "fun" => TokenKind::Fun,
        "begin" => TokenKind::Begin,
        "end" => TokenKind::End,
        "if" => TokenKind::If,
        "then" => TokenKind::Then,
        "else" => TokenKind::Else,
        "while" => TokenKind::While,
        "do" => TokenKind::Do,
        "print" => TokenKind::Print,
        "read" => TokenKind::Read,
        "write" => TokenKind::Write,
        "return" => TokenKind::Return,
        "break" => TokenKind::Break,
        "skip" => TokenKind::Skip,
        "int" => TokenKind::Int,
        "float" => TokenKind::Float,
        "not" => TokenKind::Not,
        "and" => TokenKind::And,
        "or" => TokenKind::Or,
        _ => return None,
    };
    Some(kind)
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenKind::Ident => "identifier",
            TokenKind::IntLiteral => "integer literal",
            TokenKind::FloatLiteral => "float literal",
            TokenKind::StringLiteral => "string literal",
            TokenKind::Fun => "'fun'",
            TokenKind::Begin => "'begin'",
            TokenKind::End => "'end'",
            TokenKind::If => "'if'",
            TokenKind::Then => "'then'",
            TokenKind::Else => "'else'",
            TokenKind::While => "'while'",
            TokenKind::Do => "'do'",
            TokenKind::Print => "'print'",
            TokenKind::Read => "'read'",
            TokenKind::Write => "'write'",
            TokenKind::Return => "'return'",
            TokenKind::Break => "'break'",
            TokenKind::Skip => "'skip'",
            TokenKind::Int => "'int'",
            TokenKind::Float => "'float'",
            TokenKind::Not => "'not'",
            TokenKind::And => "'and'",
            TokenKind::Or => "'or'",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Lt => "'<'",
            TokenKind::Le => "'<='",
            TokenKind::Gt => "'>'",
            TokenKind::Ge => "'>='",
            TokenKind::EqEq => "'=='",
            TokenKind::NotEq => "'!='",
            TokenKind::Assign => "'='",
            TokenKind::PlusAssign => "'+='",
            TokenKind::MinusAssign => "'-='",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::Comma => "','",
            TokenKind::Semicolon => "';'",
            TokenKind::Colon => "':'",
            TokenKind::Eof => "end of input",
        };
        f.write_str(text)
    }
}

/// A classified lexeme.
///
/// `text` is the source spelling, except for string literals where it is the
/// decoded contents without the quotes.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            kind,
            text: text.into(),
            location,
        }
    }

    pub fn line(&self) -> usize {
        self.location.line
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Ident => write!(f, "identifier '{}'", self.text),
            TokenKind::IntLiteral | TokenKind::FloatLiteral => write!(f, "number {}", self.text),
            TokenKind::StringLiteral => write!(f, "string literal {:?}", self.text),
            TokenKind::Eof => write!(f, "end of input"),
            _ => write!(f, "'{}'", self.text),
        }
    }
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unexpected character '{character}' at line {}", .location.line)]
    UnexpectedCharacter {
        character: char,
        location: SourceLocation,
    },
    #[error("unterminated string literal \"{text}\" starting at line {}", .location.line)]
    UnterminatedString {
        /// Raw source text after the opening quote
        text: String,
        location: SourceLocation,
    },
    #[error("unknown escape sequence '\\{escape}' at line {}", .location.line)]
    InvalidEscape {
        escape: char,
        location: SourceLocation,
    },
    #[error("malformed numeric literal '{literal}' at line {}", .location.line)]
    InvalidNumber {
        literal: String,
        location: SourceLocation,
    },
    #[error("unterminated block comment starting at line {}", .location.line)]
    UnterminatedComment { location: SourceLocation },
}

impl LexError {
    pub fn location(&self) -> SourceLocation {
        match self {
            LexError::UnexpectedCharacter { location, .. }
            | LexError::UnterminatedString { location, .. }
            | LexError::InvalidEscape { location, .. }
            | LexError::InvalidNumber { location, .. }
            | LexError::UnterminatedComment { location } => *location,
        }
    }

    pub fn line(&self) -> usize {
        self.location().line
    }

    /// The offending source text
    pub fn text(&self) -> String {
        match self {
            LexError::UnexpectedCharacter { character, .. } => character.to_string(),
            LexError::UnterminatedString { text, .. } => format!("\"{}", text),
            LexError::InvalidEscape { escape, .. } => format!("\\{}", escape),
            LexError::InvalidNumber { literal, .. } => literal.clone(),
            LexError::UnterminatedComment { .. } => "/*".to_string(),
        }
    }
}

/// Tokenize `source` lazily.
///
/// Cloning the returned lexer, or calling this again, restarts the stream.
pub fn tokenize(source: &str) -> Lexer {
    Lexer::new(source)
}

/// Lexer for pl0 source code
#[derive(Debug, Clone)]
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
    finished: bool,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
            finished: false,
        }
    }

    /// Tokenize the entire input, stopping at the first error.
    pub fn tokenize_all(self) -> Result<Vec<Token>, LexError> {
        self.collect()
    }

    /// Get next token
    fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace_and_comments()?;

        let loc = self.current_location();
        let ch = match self.advance() {
            Some(ch) => ch,
            None => return Ok(Token::new(TokenKind::Eof, "", loc)),
        };

        let single = |kind: TokenKind| Ok(Token::new(kind, ch.to_string(), loc));

        match ch {
            // String literals
            '"' => self.string_literal(loc),

            // Numeric literals
            '0'..='9' => self.number_literal(ch, loc),
            '.' if matches!(self.peek(), Some(c) if c.is_ascii_digit()) => {
                self.number_literal(ch, loc)
            }

            // Identifiers and keywords
            'a'..='z' | 'A'..='Z' => Ok(self.identifier_or_keyword(ch, loc)),

            // Operators, longest match first
            '+' => Ok(self.with_optional_eq(loc, "+", TokenKind::Plus, TokenKind::PlusAssign)),
            '-' => Ok(self.with_optional_eq(loc, "-", TokenKind::Minus, TokenKind::MinusAssign)),
            '<' => Ok(self.with_optional_eq(loc, "<", TokenKind::Lt, TokenKind::Le)),
            '>' => Ok(self.with_optional_eq(loc, ">", TokenKind::Gt, TokenKind::Ge)),
            '=' => Ok(self.with_optional_eq(loc, "=", TokenKind::Assign, TokenKind::EqEq)),
            '!' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Ok(Token::new(TokenKind::NotEq, "!=", loc))
                } else {
                    Err(LexError::UnexpectedCharacter {
                        character: ch,
                        location: loc,
                    })
                }
            }
            '*' => single(TokenKind::Star),
            '/' => single(TokenKind::Slash),

            // Punctuation
            '(' => single(TokenKind::LParen),
            ')' => single(TokenKind::RParen),
            '[' => single(TokenKind::LBracket),
            ']' => single(TokenKind::RBracket),
            ',' => single(TokenKind::Comma),
            ';' => single(TokenKind::Semicolon),
            ':' => single(TokenKind::Colon),

            _ => Err(LexError::UnexpectedCharacter {
                character: ch,
                location: loc,
            }),
        }
    }

    /// `op` or `op=`
    fn with_optional_eq(
        &mut self,
        loc: SourceLocation,
        op: &str,
        plain: TokenKind,
        with_eq: TokenKind,
    ) -> Token {
        if self.peek() == Some('=') {
            self.advance();
            Token::new(with_eq, format!("{}=", op), loc)
        } else {
            Token::new(plain, op, loc)
        }
    }

    /// Parse string literal. The opening quote is already consumed.
    fn string_literal(&mut self, loc: SourceLocation) -> Result<Token, LexError> {
        let start = self.position;
        let mut string = String::new();

        while let Some(ch) = self.peek() {
            match ch {
                '"' => {
                    self.advance(); // consume closing quote
                    return Ok(Token::new(TokenKind::StringLiteral, string, loc));
                }
                '\n' => break,
                '\\' => {
                    let escape_loc = self.current_location();
                    self.advance();
                    let escaped = match self.peek() {
                        Some(c) if c != '\n' => c,
                        _ => break,
                    };
                    self.advance();
                    string.push(match escaped {
                        'n' => '\n',
                        't' => '\t',
                        '\\' => '\\',
                        '"' => '"',
                        _ => {
                            return Err(LexError::InvalidEscape {
                                escape: escaped,
                                location: escape_loc,
                            })
                        }
                    });
                }
                _ => {
                    string.push(ch);
                    self.advance();
                }
            }
        }

        // Source spelling up to the line break, escapes undecoded
        Err(LexError::UnterminatedString {
            text: self.input[start..self.position].iter().collect(),
            location: loc,
        })
    }

    /// Parse integer or float literal.
    ///
    /// `digits [. digits*] [e [+-] digits]`, `. digits [e ...]`, or
    /// `digits e [+-] digits`.
    fn number_literal(&mut self, first: char, loc: SourceLocation) -> Result<Token, LexError> {
        let mut text = String::new();
        text.push(first);
        let mut is_float = first == '.';

        self.take_digits(&mut text);

        if !is_float && self.peek() == Some('.') {
            is_float = true;
            text.push('.');
            self.advance();
            self.take_digits(&mut text);
        }

        if matches!(self.peek(), Some('e') | Some('E')) {
            let has_sign = matches!(self.peek_ahead(1), Some('+') | Some('-'));
            let digit_at = if has_sign { 2 } else { 1 };
            if matches!(self.peek_ahead(digit_at), Some(c) if c.is_ascii_digit()) {
                is_float = true;
                for _ in 0..digit_at {
                    if let Some(c) = self.advance() {
                        text.push(c);
                    }
                }
                self.take_digits(&mut text);
            }
        }

        // `12abc` or `1.5x` is one malformed lexeme rather than two tokens
        if matches!(self.peek(), Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '.') {
            while let Some(c) = self.peek() {
                if c.is_ascii_alphanumeric() || c == '_' || c == '.' {
                    text.push(c);
                    self.advance();
                } else {
                    break;
                }
            }
            return Err(LexError::InvalidNumber {
                literal: text,
                location: loc,
            });
        }

        let valid = if is_float {
            text.parse::<f64>().is_ok()
        } else {
            text.parse::<i64>().is_ok()
        };
        if !valid {
            return Err(LexError::InvalidNumber {
                literal: text,
                location: loc,
            });
        }

        let kind = if is_float {
            TokenKind::FloatLiteral
        } else {
            TokenKind::IntLiteral
        };
        Ok(Token::new(kind, text, loc))
    }

    fn take_digits(&mut self, text: &mut String) {
        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                text.push(ch);
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Parse identifier or keyword
    fn identifier_or_keyword(&mut self, first_char: char, loc: SourceLocation) -> Token {
        let mut ident = String::new();
        ident.push(first_char);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        let kind = keyword(&ident).unwrap_or(TokenKind::Ident);
        Token::new(kind, ident, loc)
    }

    /// Skip whitespace and comments
    fn skip_whitespace_and_comments(&mut self) -> Result<(), LexError> {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.advance();
                }
                Some('/') => {
                    if self.peek_ahead(1) == Some('/') {
                        self.skip_line_comment();
                    } else if self.peek_ahead(1) == Some('*') {
                        self.skip_block_comment()?;
                    } else {
                        break;
                    }
                }
                _ => break,
            }
        }
        Ok(())
    }

    /// Skip single-line comment (// ...)
    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.peek() {
            self.advance();
            if ch == '\n' {
                break;
            }
        }
    }

    /// Skip multi-line comment (/* ... */)
    fn skip_block_comment(&mut self) -> Result<(), LexError> {
        let start_loc = self.current_location();
        self.advance(); // skip '/'
        self.advance(); // skip '*'

        while !self.is_at_end() {
            if self.peek() == Some('*') && self.peek_ahead(1) == Some('/') {
                self.advance(); // skip '*'
                self.advance(); // skip '/'
                return Ok(());
            }
            self.advance();
        }

        Err(LexError::UnterminatedComment {
            location: start_loc,
        })
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Peek ahead n characters
    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

impl Iterator for Lexer {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let result = self.next_token();
        match &result {
            Ok(token) if token.kind == TokenKind::Eof => self.finished = true,
            Err(_) => self.finished = true,
            Ok(_) => {}
        }
        Some(result)
    }
}
