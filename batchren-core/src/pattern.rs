use crate::token::{has_format, Token, TokenKind};
use regex::{Regex, RegexBuilder};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Wildcard,
    Number,
}

/// Capturing expression built from a prefix pattern's tokens.
#[derive(Debug, Clone)]
pub struct CapturePattern {
    regex: Regex,
    slots: Vec<Slot>,
}

/// What a [`CapturePattern`] pulled out of a name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Captures {
    /// Byte length of the matched head; the tail starts here.
    pub head_len: usize,
    /// Wildcard spans in pattern order.
    pub wildcards: Vec<String>,
    /// Digit runs matched by numeric tokens, in pattern order.
    pub numbers: Vec<String>,
}

impl CapturePattern {
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    pub fn captures(&self, subject: &str) -> Option<Captures> {
        let caps = self.regex.captures(subject)?;
        let head_len = caps.get(0).map_or(0, |m| m.end());

        let mut result = Captures {
            head_len,
            ..Captures::default()
        };
        for (i, slot) in self.slots.iter().enumerate() {
            let text = caps
                .get(i + 1)
                .map_or_else(String::new, |m| m.as_str().to_string());
            match slot {
                Slot::Wildcard => result.wildcards.push(text),
                Slot::Number => result.numbers.push(text),
            }
        }
        Some(result)
    }
}

/// Build the capturing expression for a prefix pattern.
///
/// Literal text matches verbatim (extensions case-insensitively), numbers
/// capture one or more digits, and a wildcard captures lazily while any
/// literal or number follows it, greedily when nothing does. Lazy wildcards
/// give the leftmost alignment, the same one [`crate::matcher::match_tokens`]
/// settles on. The expression is anchored at the start, and at the end too
/// when the pattern names an extension.
pub fn build_pattern(tokens: &[Token]) -> Result<CapturePattern, regex::Error> {
    let mut pattern = String::from("^");
    let mut slots = Vec::new();

    for (i, token) in tokens.iter().enumerate() {
        match token.kind {
            TokenKind::Str => pattern.push_str(&regex::escape(&token.text)),
            TokenKind::Format => {
                pattern.push_str("(?i:");
                pattern.push_str(&regex::escape(&token.text));
                pattern.push(')');
            },
            TokenKind::Num => {
                pattern.push_str(r"(\d+)");
                slots.push(Slot::Number);
            },
            TokenKind::Wildcard => {
                let lazy = tokens[i + 1..].iter().any(|next| !next.is_wildcard());
                pattern.push_str(if lazy { "(.*?)" } else { "(.*)" });
                slots.push(Slot::Wildcard);
            },
        }
    }

    if has_format(tokens) {
        pattern.push('$');
    }

    let regex = RegexBuilder::new(&pattern).dot_matches_new_line(true).build()?;
    Ok(CapturePattern { regex, slots })
}
