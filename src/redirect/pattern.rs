//! Delimited regular expressions.
//!
//! Patterns are written as `<delim>body<delim>modifiers`, e.g. `#^/blog/(\d+)$#i`.
//! The body is compiled with `fancy-regex`, so backreferences and lookaround
//! work alongside the regular syntax.
//!
//! Modifiers `i m s x U` become inline flags and `A` anchors the match at the
//! start of the subject. `u D S X J n` are accepted and have no effect; for
//! `n` this means plain groups keep capturing.

use fancy_regex::Regex;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PatternError {
    #[error("pattern is empty")]
    Empty,

    #[error("delimiter must not be alphanumeric, backslash or whitespace")]
    InvalidDelimiter,

    #[error("no ending delimiter '{0}' found")]
    Unterminated(char),

    #[error("unknown modifier '{0}'")]
    UnknownModifier(char),

    #[error(transparent)]
    Regex(#[from] fancy_regex::Error),
}

/// Compile a delimited pattern.
pub fn compile(pattern: &str) -> Result<Regex, PatternError> {
    let mut chars = pattern.char_indices();
    let (_, open) = chars.next().ok_or(PatternError::Empty)?;
    if open.is_alphanumeric() || open == '\\' || open.is_whitespace() {
        return Err(PatternError::InvalidDelimiter);
    }
    let close = closing_delimiter(open);

    let body_start = open.len_utf8();
    let mut depth = 0usize;
    let mut escaped = false;
    let mut body_end = None;
    for (idx, c) in chars {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == close && depth == 0 {
            body_end = Some(idx);
            break;
        } else if c == close {
            depth -= 1;
        } else if c == open && open != close {
            depth += 1;
        }
    }
    let body_end = body_end.ok_or(PatternError::Unterminated(close))?;
    let body = &pattern[body_start..body_end];
    let modifiers = &pattern[body_end + close.len_utf8()..];

    let mut anchored = false;
    let mut flags = String::new();
    for m in modifiers.chars() {
        match m {
            'i' | 'm' | 's' | 'x' | 'U' => {
                if !flags.contains(m) {
                    flags.push(m);
                }
            }
            'A' => anchored = true,
            'u' | 'D' | 'S' | 'X' | 'J' | 'n' | ' ' | '\n' | '\r' => {}
            other => return Err(PatternError::UnknownModifier(other)),
        }
    }

    let mut source = String::new();
    if !flags.is_empty() {
        source.push_str(&format!("(?{flags})"));
    }
    if anchored {
        // The newline closes a trailing `#` comment in extended mode.
        let tail = if flags.contains('x') { "\n" } else { "" };
        source.push_str(&format!(r"\A(?:{body}{tail})"));
    } else {
        source.push_str(body);
    }

    Ok(Regex::new(&source)?)
}

fn closing_delimiter(open: char) -> char {
    match open {
        '(' => ')',
        '[' => ']',
        '{' => '}',
        '<' => '>',
        c => c,
    }
}
