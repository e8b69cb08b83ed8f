use crate::token::{split_extension, tokenize_filename, TokenKind};
use serde::{Deserialize, Serialize};

/// Widest zero padding accepted for [`Zeros::Pad`].
pub const MAX_PAD_WIDTH: usize = 64;

/// Leading-zero handling for every number in a stem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zeros {
    /// Pad each number with zeros to at least this many digits
    Pad(usize),
    /// Drop leading zeros, keeping at least one digit
    Strip,
}

/// Edits made to a name after the pattern rename.
///
/// They only touch the stem; the extension is carried over as is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Adjustments {
    /// Removed from the end of the stem when the stem ends with it
    pub strip_suffix: Option<String>,
    pub zeros: Option<Zeros>,
}

impl Adjustments {
    pub fn is_empty(&self) -> bool {
        self.strip_suffix.as_deref().is_none_or(str::is_empty) && self.zeros.is_none()
    }

    /// Adjust `name`, returning the new name and one diagnostic per edit made.
    pub fn apply(&self, name: &str) -> (String, Vec<String>) {
        let mut diagnostics = Vec::new();
        let (stem, extension) = split_extension(name);
        let mut stem = stem.to_string();

        if let Some(suffix) = self.strip_suffix.as_deref().filter(|s| !s.is_empty()) {
            if let Some(kept) = stem.strip_suffix(suffix) {
                diagnostics.push(format!("removed suffix '{}'", suffix));
                stem = kept.to_string();
            }
        }

        if let Some(zeros) = self.zeros {
            let adjusted = adjust_numbers(&stem, zeros);
            if adjusted != stem {
                diagnostics.push(match zeros {
                    Zeros::Pad(width) => {
                        format!("padded numbers to {} digits", width.min(MAX_PAD_WIDTH))
                    },
                    Zeros::Strip => "removed leading zeros".to_string(),
                });
                stem = adjusted;
            }
        }

        (stem + extension, diagnostics)
    }
}

fn adjust_numbers(stem: &str, zeros: Zeros) -> String {
    tokenize_filename(stem)
        .into_iter()
        .map(|token| {
            if token.kind != TokenKind::Num {
                return token.text;
            }
            match zeros {
                Zeros::Pad(width) => {
                    format!("{:0>width$}", token.text, width = width.min(MAX_PAD_WIDTH))
                },
                Zeros::Strip => match token.text.trim_start_matches('0') {
                    "" => "0".to_string(),
                    digits => digits.to_string(),
                },
            }
        })
        .collect()
}
