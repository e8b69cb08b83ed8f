use crate::policy::Policy;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Characters that always form a token of their own inside text runs.
pub const SEPARATORS: [char; 3] = ['-', '_', ' '];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Str,
    Num,
    Format, // extension, e.g. ".jpg"
    Wildcard,
}

impl TokenKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Str => "str",
            Self::Num => "num",
            Self::Format => "format",
            Self::Wildcard => "wildcard",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    pub kind: TokenKind,
}

impl Token {
    pub fn new(text: impl Into<String>, kind: TokenKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    pub fn wildcard() -> Self {
        Self::new("*", TokenKind::Wildcard)
    }

    pub fn is_wildcard(&self) -> bool {
        self.kind == TokenKind::Wildcard
    }

    pub fn is_format(&self) -> bool {
        self.kind == TokenKind::Format
    }

    pub fn is_number(&self) -> bool {
        self.kind == TokenKind::Num
    }

    /// Numeric value of a `Num` token. `None` for other kinds or when the
    /// digit run does not fit in an `i64`.
    pub fn value(&self) -> Option<i64> {
        if self.is_number() {
            self.text.parse().ok()
        } else {
            None
        }
    }

    /// Digit count including leading zeros.
    pub fn width(&self) -> usize {
        self.text.len()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} => {}", self.text, self.kind)
    }
}

/// Tokenize a filename (`is_pattern == false`) or a pattern with the default policy.
pub fn tokenize(name: &str, is_pattern: bool) -> Vec<Token> {
    if is_pattern {
        tokenize_pattern(name, &Policy::default())
    } else {
        tokenize_filename(name)
    }
}

/// Front-end entry point: the token sequence of a filename.
pub fn parse(name: &str) -> Vec<Token> {
    tokenize_filename(name)
}

/// Tokenize a filename. Lossless: the token texts concatenate back to `name`.
pub fn tokenize_filename(name: &str) -> Vec<Token> {
    let (stem, extension) = split_extension(name);

    let mut tokens = Vec::new();
    scan_body(stem, false, &mut tokens);
    if !extension.is_empty() {
        tokens.push(Token::new(extension, TokenKind::Format));
    }

    debug_tokens(name, &tokens);
    tokens
}

/// Tokenize a pattern: `*` becomes a wildcard and a trailing `.` plus
/// letters/digits becomes a format token.
pub fn tokenize_pattern(pattern: &str, policy: &Policy) -> Vec<Token> {
    let extension = extension_literal(pattern).unwrap_or_default();
    let body = &pattern[..pattern.len() - extension.len()];

    let mut tokens = Vec::new();
    scan_body(body, true, &mut tokens);
    if !extension.is_empty() {
        tokens.push(Token::new(extension, TokenKind::Format));
    }

    if policy.implicit_leading_wildcard
        && tokens.first().is_some_and(Token::is_number)
        && !has_format(&tokens)
    {
        tokens.insert(0, Token::wildcard());
    }

    debug_tokens(pattern, &tokens);
    tokens
}

/// Split a filename into stem and extension the way the OS reports it.
///
/// The extension keeps its dot. Dotfiles (`.bashrc`) and names ending in a
/// bare dot have no extension.
pub fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(dot) if dot > 0 && dot + 1 < name.len() => name.split_at(dot),
        _ => (name, ""),
    }
}

/// The extension-like literal at the end of a pattern (`.` followed by one
/// or more ASCII letters/digits), dot included.
pub fn extension_literal(pattern: &str) -> Option<&str> {
    let dot = pattern.rfind('.')?;
    let suffix = &pattern[dot + 1..];
    if !suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_alphanumeric()) {
        Some(&pattern[dot..])
    } else {
        None
    }
}

pub fn has_format(tokens: &[Token]) -> bool {
    tokens.iter().any(Token::is_format)
}

pub fn has_wildcard(tokens: &[Token]) -> bool {
    tokens.iter().any(Token::is_wildcard)
}

/// Concatenate token texts.
pub fn join(tokens: &[Token]) -> String {
    tokens.iter().map(|t| t.text.as_str()).collect()
}

fn scan_body(body: &str, is_pattern: bool, tokens: &mut Vec<Token>) {
    let mut chars = body.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        if is_pattern && c == '*' {
            tokens.push(Token::wildcard());
        } else if SEPARATORS.contains(&c) {
            tokens.push(Token::new(c.to_string(), TokenKind::Str));
        } else if c.is_ascii_digit() {
            // Leading zeros stay in the token text so the padding width survives.
            let mut end = start + c.len_utf8();
            while let Some(&(i, d)) = chars.peek() {
                if !d.is_ascii_digit() {
                    break;
                }
                end = i + d.len_utf8();
                chars.next();
            }
            tokens.push(Token::new(&body[start..end], TokenKind::Num));
        } else {
            let mut end = start + c.len_utf8();
            while let Some(&(i, d)) = chars.peek() {
                if d.is_ascii_digit() || SEPARATORS.contains(&d) || (is_pattern && d == '*') {
                    break;
                }
                end = i + d.len_utf8();
                chars.next();
            }
            tokens.push(Token::new(&body[start..end], TokenKind::Str));
        }
    }
}

fn debug_tokens(input: &str, tokens: &[Token]) {
    if std::env::var_os("BATCHREN_DEBUG").is_some() {
        eprintln!("=== Tokenizing: '{}' ===", input);
        for token in tokens {
            eprintln!("    {}", token);
        }
    }
}
