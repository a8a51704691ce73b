//! Lexer for `$name` placeholder templates using logos

use logos::Logos;

/// Byte range in template text
pub type Span = std::ops::Range<usize>;

#[derive(Logos, Debug, Clone, PartialEq)]
pub enum Token {
    /// `$$`, a literal dollar sign
    #[token("$$")]
    Escape,

    /// `$identifier`
    #[regex(r"\$[_a-zA-Z][_a-zA-Z0-9]*", |lex| lex.slice()[1..].to_string())]
    Named(String),

    /// `${identifier}`
    #[regex(r"\$\{[_a-zA-Z][_a-zA-Z0-9]*\}", |lex| {
        let s = lex.slice();
        s[2..s.len() - 1].to_string()
    })]
    Braced(String),

    /// A `$` that starts no valid placeholder
    #[token("$")]
    Stray,

    /// Literal text between placeholders
    #[regex(r"[^$]+")]
    Text,
}

impl Token {
    /// Placeholder identifier, if this token is one
    pub fn placeholder(&self) -> Option<&str> {
        match self {
            Token::Named(name) | Token::Braced(name) => Some(name),
            _ => None,
        }
    }
}

/// Lex template text into tokens with spans
pub fn lex(input: &str) -> impl Iterator<Item = (Token, Span)> + '_ {
    Token::lexer(input)
        .spanned()
        .map(|(tok, span)| (tok.unwrap_or(Token::Stray), span))
}

/// 1-based line and column of a byte offset
pub fn line_column(input: &str, offset: usize) -> (usize, usize) {
    let before = &input[..offset.min(input.len())];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}
