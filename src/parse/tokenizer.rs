//! Tokenizer for shell input.
//!
//! Uses Normal/Single/Double modes to preserve quoting semantics while
//! emitting a flat argument list. The tokenizer is total: every input
//! yields a best-effort token vector, never an error. An open quote is
//! treated as closed at end of line and a trailing backslash stays
//! literal.

#[derive(Copy, Clone, Eq, PartialEq)]
enum ParseMode {
    Normal,
    Single,
    Double,
}

pub fn tokenize(input: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut buf = String::new();
    let mut chars = input.chars().peekable();
    let mut mode = ParseMode::Normal;
    let mut in_token = false;

    while let Some(ch) = chars.next() {
        match mode {
            ParseMode::Normal => match ch {
                ' ' | '\t' => {
                    if in_token {
                        args.push(std::mem::take(&mut buf));
                        in_token = false;
                    }
                }
                '\\' => {
                    in_token = true;
                    match chars.next() {
                        Some(next) => buf.push(next),
                        None => buf.push('\\'),
                    }
                }
                '\'' => {
                    in_token = true;
                    mode = ParseMode::Single;
                }
                '"' => {
                    in_token = true;
                    mode = ParseMode::Double;
                }
                _ => {
                    in_token = true;
                    buf.push(ch);
                }
            },
            ParseMode::Single => {
                if ch == '\'' {
                    mode = ParseMode::Normal;
                } else {
                    buf.push(ch);
                }
            }
            ParseMode::Double => match ch {
                '"' => mode = ParseMode::Normal,
                '\\' => match chars.peek().copied() {
                    // Backslash is special only before these characters.
                    Some(next @ ('\\' | '$' | '"')) => {
                        chars.next();
                        buf.push(next);
                    }
                    Some('\n') => {
                        chars.next();
                    }
                    _ => buf.push('\\'),
                },
                _ => buf.push(ch),
            },
        }
    }

    if in_token {
        args.push(buf);
    }
    args
}
