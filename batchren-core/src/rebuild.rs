use crate::matcher::{match_tokens, MatchCode};
use crate::pattern::build_pattern;
use crate::policy::Policy;
use crate::token::{has_format, has_wildcard, tokenize_filename, tokenize_pattern, Token, TokenKind};
use serde::{Deserialize, Serialize};

/// A rebuilt name plus the steps that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rebuild {
    pub name: String,
    pub diagnostics: Vec<String>,
}

impl Rebuild {
    fn unchanged(subject: &str, mut diagnostics: Vec<String>, reason: String) -> Self {
        diagnostics.push(reason);
        Self {
            name: subject.to_string(),
            diagnostics,
        }
    }
}

/// How one replacement number is produced from a captured number.
#[derive(Debug, Clone, Copy)]
struct Shift<'a> {
    captured: &'a str,
    delta: i64,
}

/// Result of [`classify_and_suggest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub code: MatchCode,
    pub suggested: String,
    pub diagnostics: Vec<String>,
}

/// Rebuild `subject` by replacing the head matched by `prefix` with `replacement`.
pub fn rebuild(subject: &str, prefix: &str, replacement: &str) -> Rebuild {
    rebuild_with(subject, prefix, replacement, &Policy::default())
}

/// [`rebuild`] with an explicit policy.
///
/// Numbers captured by the prefix are shifted by the difference between the
/// replacement's and the prefix's numbers, keeping zero padding.
pub fn rebuild_with(subject: &str, prefix: &str, replacement: &str, policy: &Policy) -> Rebuild {
    let mut diagnostics = Vec::new();

    let prefix_tokens = tokenize_pattern(prefix, policy);
    let mut replacement_tokens = tokenize_pattern(replacement, &policy.without_implicit_wildcard());

    let leading_wildcard = prefix_tokens.first().is_some_and(Token::is_wildcard);
    let implicit_wildcard = leading_wildcard && !prefix.starts_with('*');

    if leading_wildcard && !has_wildcard(&replacement_tokens) {
        replacement_tokens.insert(0, Token::wildcard());
        diagnostics.push("replacement gets a leading wildcard to keep the text before the match".to_string());
    }

    let pattern = match build_pattern(&prefix_tokens) {
        Ok(pattern) => pattern,
        Err(e) => {
            return Rebuild::unchanged(
                subject,
                diagnostics,
                format!("pattern could not be compiled ({}); no change", e),
            );
        },
    };

    let Some(caps) = pattern.captures(subject) else {
        return Rebuild::unchanged(
            subject,
            diagnostics,
            format!("'{}' does not match the start of '{}'; no change", prefix, subject),
        );
    };

    if is_extension_swap(&prefix_tokens) && is_extension_swap(&replacement_tokens) {
        let stem = caps.wildcards.first().map_or("", String::as_str);
        let name = format!("{}{}", stem, replacement_tokens[1].text);
        diagnostics.push(format!("extension change: '{}' -> '{}'", subject, name));
        return Rebuild { name, diagnostics };
    }

    let prefix_numbers: Vec<&Token> = prefix_tokens.iter().filter(|t| t.is_number()).collect();

    if implicit_wildcard {
        if let (Some(captured), Some(expected)) = (caps.numbers.first(), prefix_numbers.first()) {
            if let (Ok(captured_value), Some(expected_value)) = (captured.parse::<i64>(), expected.value()) {
                if captured_value < expected_value {
                    return Rebuild::unchanged(
                        subject,
                        diagnostics,
                        format!(
                            "captured number {} is below the pattern's {}; no change",
                            captured, expected.text
                        ),
                    );
                }
            }
        }
    }

    let shifts = pair_numbers(&prefix_numbers, &replacement_tokens, &caps.numbers);
    if let Some(Some(reference)) = shifts.last() {
        diagnostics.push(format!("delta = {}", reference.delta));
    } else {
        diagnostics.push("no numeric delta; replacement numbers are literal".to_string());
    }

    let mut head = String::new();
    let mut wildcard_ordinal = 0;
    let mut number_ordinal = 0;
    for token in &replacement_tokens {
        match token.kind {
            TokenKind::Str | TokenKind::Format => head.push_str(&token.text),
            TokenKind::Wildcard => {
                if let Some(span) = caps.wildcards.get(wildcard_ordinal) {
                    head.push_str(span);
                }
                wildcard_ordinal += 1;
            },
            TokenKind::Num => {
                match shifts.get(number_ordinal).copied().flatten() {
                    Some(shift) => match shifted(token, shift) {
                        Ok(digits) => head.push_str(&digits),
                        Err(reason) => return Rebuild::unchanged(subject, diagnostics, reason),
                    },
                    None => head.push_str(&token.text),
                }
                number_ordinal += 1;
            },
        }
    }

    let drops_tail = policy.drop_tail_on_format
        && has_format(&replacement_tokens)
        && !has_wildcard(&replacement_tokens);
    let tail = &subject[caps.head_len..];

    let name = if drops_tail {
        if !tail.is_empty() {
            diagnostics.push(format!("dropping tail '{}'", tail));
        }
        head
    } else {
        head + tail
    };

    diagnostics.push(format!("'{}' -> '{}'", subject, name));
    Rebuild { name, diagnostics }
}

/// Match `subject` against `prefix`, then rebuild it unless the match is blocked.
pub fn classify_and_suggest(subject: &str, prefix: &str, replacement: &str) -> Suggestion {
    classify_and_suggest_with(subject, prefix, replacement, &Policy::default())
}

pub fn classify_and_suggest_with(
    subject: &str,
    prefix: &str,
    replacement: &str,
    policy: &Policy,
) -> Suggestion {
    let file_tokens = tokenize_filename(subject);
    let prefix_tokens = tokenize_pattern(prefix, policy);
    let matched = match_tokens(&file_tokens, &prefix_tokens);

    if matched.code.is_blocked() {
        return Suggestion {
            code: matched.code,
            suggested: subject.to_string(),
            diagnostics: matched.diagnostics,
        };
    }

    let rebuilt = rebuild_with(subject, prefix, replacement, policy);
    let mut diagnostics = matched.diagnostics;
    diagnostics.extend(rebuilt.diagnostics);

    Suggestion {
        code: matched.code,
        suggested: rebuilt.name,
        diagnostics,
    }
}

fn is_extension_swap(tokens: &[Token]) -> bool {
    matches!(
        tokens,
        [first, second] if first.is_wildcard() && second.is_format()
    )
}

/// Pair replacement numbers with prefix numbers, aligned from the end.
///
/// The last pair is the reference delta. Replacement numbers without a
/// partner, or whose values do not fit an `i64`, stay literal.
fn pair_numbers<'a>(
    prefix_numbers: &[&Token],
    replacement_tokens: &[Token],
    captured: &'a [String],
) -> Vec<Option<Shift<'a>>> {
    let replacement_numbers: Vec<&Token> =
        replacement_tokens.iter().filter(|t| t.is_number()).collect();
    let offset = prefix_numbers.len() as isize - replacement_numbers.len() as isize;

    replacement_numbers
        .iter()
        .enumerate()
        .map(|(j, target)| {
            let i = usize::try_from(j as isize + offset).ok()?;
            let source = prefix_numbers.get(i)?;
            let delta = target.value()?.checked_sub(source.value()?)?;
            Some(Shift {
                captured: captured.get(i)?.as_str(),
                delta,
            })
        })
        .collect()
}

fn shifted(token: &Token, shift: Shift<'_>) -> Result<String, String> {
    let value = shift
        .captured
        .parse::<i64>()
        .ok()
        .and_then(|n| n.checked_add(shift.delta))
        .ok_or_else(|| format!("number {} cannot be shifted by {}; no change", shift.captured, shift.delta))?;

    if value < 0 {
        return Err(format!(
            "shifting {} by {} goes below zero; no change",
            shift.captured, shift.delta
        ));
    }

    let width = if token.text.starts_with('0') {
        token.width().max(shift.captured.len())
    } else {
        shift.captured.len()
    };
    Ok(format!("{:0width$}", value, width = width))
}
