use std::borrow::Cow;

mod scanner;

use scanner::{State, is_block_comment_end, is_block_comment_start, is_line_comment_start, scan_digits};

/// Target placeholder style for translating synthesized SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderStyle {
    /// `SQLite`-style placeholders like `?1` (one-based).
    Sqlite,
}

/// Rewrite the gateway's zero-based `@N` placeholders into the target style.
///
/// A lightweight state machine skips placeholders inside quoted strings,
/// bracket-quoted identifiers, and comments. `@` tokens not followed by
/// digits (e.g. driver-native named parameters) are left untouched. Returns
/// a borrowed `Cow` when nothing needs rewriting.
#[must_use]
pub fn translate_placeholders(sql: &str, target: PlaceholderStyle) -> Cow<'_, str> {
    let bytes = sql.as_bytes();
    let mut out: Option<String> = None;
    let mut copied_from = 0usize;
    let mut state = State::Normal;
    let mut idx = 0;

    while idx < bytes.len() {
        let b = bytes[idx];
        match state {
            State::Normal => match b {
                b'\'' => state = State::SingleQuoted,
                b'"' => state = State::DoubleQuoted,
                b'[' => state = State::Bracketed,
                _ if is_line_comment_start(bytes, idx) => state = State::LineComment,
                _ if is_block_comment_start(bytes, idx) => state = State::BlockComment(1),
                b'@' if matches!(target, PlaceholderStyle::Sqlite) => {
                    if let Some((digits_end, digits)) = scan_digits(bytes, idx + 1)
                        && let Ok(n) = digits.parse::<usize>()
                    {
                        let buf = out.get_or_insert_with(String::new);
                        buf.push_str(&sql[copied_from..idx]);
                        buf.push('?');
                        buf.push_str(&(n + 1).to_string());
                        copied_from = digits_end;
                        idx = digits_end;
                        continue;
                    }
                }
                _ => {}
            },
            State::SingleQuoted => {
                if b == b'\'' {
                    if bytes.get(idx + 1) == Some(&b'\'') {
                        idx += 1; // skip escaped quote
                    } else {
                        state = State::Normal;
                    }
                }
            }
            State::DoubleQuoted => {
                if b == b'"' {
                    if bytes.get(idx + 1) == Some(&b'"') {
                        idx += 1; // skip escaped quote
                    } else {
                        state = State::Normal;
                    }
                }
            }
            State::Bracketed => {
                if b == b']' {
                    state = State::Normal;
                }
            }
            State::LineComment => {
                if b == b'\n' {
                    state = State::Normal;
                }
            }
            State::BlockComment(depth) => {
                if is_block_comment_start(bytes, idx) {
                    state = State::BlockComment(depth + 1);
                } else if is_block_comment_end(bytes, idx) {
                    if depth == 1 {
                        state = State::Normal;
                    } else {
                        state = State::BlockComment(depth - 1);
                    }
                }
            }
        }

        idx += 1;
    }

    match out {
        Some(mut buf) => {
            buf.push_str(&sql[copied_from..]);
            Cow::Owned(buf)
        }
        None => Cow::Borrowed(sql),
    }
}
