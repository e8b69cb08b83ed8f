use crate::token::{Token, TokenKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of comparing a name against a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum MatchCode {
    /// Tokens identical within the pattern window
    Identical = 0,
    /// Only numeric values differ; renaming may shift them
    NumericOnly = 1,
    /// Structural or non-numeric difference; renaming is blocked
    Blocked = 2,
}

impl MatchCode {
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn is_blocked(self) -> bool {
        self == Self::Blocked
    }
}

impl From<MatchCode> for u8 {
    fn from(code: MatchCode) -> Self {
        code.as_u8()
    }
}

impl TryFrom<u8> for MatchCode {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Identical),
            1 => Ok(Self::NumericOnly),
            2 => Ok(Self::Blocked),
            other => Err(format!("Invalid match code: {}", other)),
        }
    }
}

impl fmt::Display for MatchCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub code: MatchCode,
    pub diagnostics: Vec<String>,
}

/// Most recent wildcard: where matching resumes in the pattern, which file
/// token it currently claims up to, and how many numeric diffs were
/// recorded before it.
#[derive(Debug, Clone, Copy)]
struct Backtrack {
    pattern: usize,
    file: usize,
    diffs: usize,
}

enum Comparison {
    Equal,
    NumberDiffers,
    KindDiffers,
    ValueDiffers,
}

fn compare(actual: &Token, expected: &Token) -> Comparison {
    if actual.kind != expected.kind {
        return Comparison::KindDiffers;
    }

    let equal = match expected.kind {
        TokenKind::Format => actual.text.eq_ignore_ascii_case(&expected.text),
        _ => actual.text == expected.text,
    };

    if equal {
        Comparison::Equal
    } else if expected.kind == TokenKind::Num {
        Comparison::NumberDiffers
    } else {
        Comparison::ValueDiffers
    }
}

/// Compare a file's tokens against a pattern's tokens.
///
/// The pattern is a prefix window: once every pattern token is consumed the
/// rest of the file sequence is irrelevant. Wildcards start out claiming no
/// tokens and absorb one more file token each time a later token fails.
pub fn match_tokens(file: &[Token], pattern: &[Token]) -> MatchResult {
    if pattern.is_empty() {
        return MatchResult {
            code: MatchCode::Identical,
            diagnostics: vec!["note: empty pattern, every name matches".to_string()],
        };
    }

    let mut diffs: Vec<String> = Vec::new();
    let mut backtrack: Option<Backtrack> = None;
    let mut f = 0;
    let mut p = 0;

    while p < pattern.len() {
        let expected = &pattern[p];

        if expected.is_wildcard() {
            backtrack = Some(Backtrack {
                pattern: p + 1,
                file: f,
                diffs: diffs.len(),
            });
            p += 1;
            continue;
        }

        let mismatch = match file.get(f) {
            None => format!(
                "position {}: pattern expects {} '{}' past the end of the name",
                f, expected.kind, expected.text
            ),
            Some(actual) => match compare(actual, expected) {
                Comparison::Equal => {
                    f += 1;
                    p += 1;
                    continue;
                },
                Comparison::NumberDiffers => {
                    diffs.push(format!(
                        "position {}: number differs: {} != {}",
                        f, actual.text, expected.text
                    ));
                    f += 1;
                    p += 1;
                    continue;
                },
                Comparison::KindDiffers => format!(
                    "position {}: kind differs: {} vs {}",
                    f, actual.kind, expected.kind
                ),
                Comparison::ValueDiffers => format!(
                    "position {}: value differs: '{}' != '{}' ({})",
                    f, actual.text, expected.text, expected.kind
                ),
            },
        };

        match backtrack.as_mut() {
            Some(point) if point.file < file.len() => {
                point.file += 1;
                diffs.truncate(point.diffs);
                f = point.file;
                p = point.pattern;
            },
            _ => {
                let mut diagnostics = diffs;
                diagnostics.push(mismatch);
                diagnostics.push("result: blocked (structural or non-numeric difference)".to_string());
                return MatchResult {
                    code: MatchCode::Blocked,
                    diagnostics,
                };
            },
        }
    }

    let code = if diffs.is_empty() {
        MatchCode::Identical
    } else {
        MatchCode::NumericOnly
    };

    let mut diagnostics = diffs;
    diagnostics.push(match code {
        MatchCode::Identical => "result: no differences".to_string(),
        _ => "result: only numbers differ".to_string(),
    });

    MatchResult { code, diagnostics }
}
