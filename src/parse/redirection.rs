//! Redirection clause extraction.
//!
//! Runs before tokenization: a quote-tracking scan over the raw line
//! finds the first unquoted redirection operator, taking the longest
//! operator at that position (`2>>` before `2>`). Operators inside
//! quotes or behind a backslash are literal text. A digit prefix (`1>`,
//! `2>>`) only counts when the digit starts a word.
//!
//! The token after the operator is the target path; any text after the
//! target is re-joined into the command text so it tokenizes as ordinary
//! arguments. An operator with no following token is left in place as
//! literal text.

use crate::parse::{RedirectionSpec, Stream};

pub fn extract_redirection(line: &str) -> (String, Option<RedirectionSpec>) {
    let Some(hit) = find_operator(line) else {
        return (line.to_string(), None);
    };
    let Some((target, remainder)) = take_target(&line[hit.end..]) else {
        return (line.to_string(), None);
    };
    let mut command = line[..hit.start].trim_end().to_string();
    let remainder = remainder.trim();
    if !remainder.is_empty() {
        command.push(' ');
        command.push_str(remainder);
    }
    let spec = RedirectionSpec {
        stream: hit.stream,
        path: target,
        append: hit.append,
    };
    (command, Some(spec))
}

struct OperatorHit {
    start: usize,
    end: usize,
    stream: Stream,
    append: bool,
}

fn find_operator(line: &str) -> Option<OperatorHit> {
    let bytes = line.as_bytes();
    let mut quote: Option<u8> = None;
    let mut word_start = true;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if let Some(q) = quote {
            if b == q {
                quote = None;
            } else if q == b'"' && b == b'\\' {
                i += 1;
            }
            word_start = false;
            i += 1;
            continue;
        }
        match b {
            b'\'' | b'"' => {
                quote = Some(b);
                word_start = false;
            }
            b'\\' => {
                // The escaped character is literal, skip it too.
                i += 1;
                word_start = false;
            }
            b' ' | b'\t' => word_start = true,
            b'1' | b'2' if word_start && bytes.get(i + 1) == Some(&b'>') => {
                let stream = if b == b'1' { Stream::Stdout } else { Stream::Stderr };
                let append = bytes.get(i + 2) == Some(&b'>');
                let end = if append { i + 3 } else { i + 2 };
                return Some(OperatorHit { start: i, end, stream, append });
            }
            b'>' => {
                let append = bytes.get(i + 1) == Some(&b'>');
                let end = if append { i + 2 } else { i + 1 };
                return Some(OperatorHit {
                    start: i,
                    end,
                    stream: Stream::Stdout,
                    append,
                });
            }
            _ => word_start = false,
        }
        i += 1;
    }
    None
}

/// Read the target path token after an operator, honoring the same quote
/// rules as the tokenizer. Returns the unquoted target and the unread
/// remainder of the line.
fn take_target(rest: &str) -> Option<(String, &str)> {
    let trimmed = rest.trim_start();
    if trimmed.is_empty() {
        return None;
    }
    let mut target = String::new();
    let mut quote: Option<char> = None;
    let mut end = trimmed.len();
    let mut chars = trimmed.char_indices().peekable();
    while let Some((idx, ch)) = chars.next() {
        if let Some(q) = quote {
            if ch == q {
                quote = None;
            } else if q == '"' && ch == '\\' {
                match chars.peek().map(|&(_, c)| c) {
                    Some(next @ ('\\' | '$' | '"')) => {
                        chars.next();
                        target.push(next);
                    }
                    _ => target.push('\\'),
                }
            } else {
                target.push(ch);
            }
            continue;
        }
        match ch {
            ' ' | '\t' => {
                end = idx;
                break;
            }
            '\'' | '"' => quote = Some(ch),
            '\\' => match chars.next() {
                Some((_, next)) => target.push(next),
                None => target.push('\\'),
            },
            _ => target.push(ch),
        }
    }
    Some((target, &trimmed[end..]))
}
