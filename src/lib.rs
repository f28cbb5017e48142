//! Parser surface of the shell.
//!
//! This crate exposes a minimal API so fuzz targets and black-box tests
//! can link tokenization and redirection extraction without pulling in
//! interactive deps.

mod parse;

pub use parse::{extract_redirection, tokenize, RedirectionSpec, Stream};

/// Fuzz helper for parser-only targets.
pub fn fuzz_parse_bytes(data: &[u8]) {
    let input = String::from_utf8_lossy(data);
    let _ = tokenize(&input);
    let (command, spec) = extract_redirection(&input);
    if spec.is_some() {
        let _ = tokenize(&command);
    }
}
