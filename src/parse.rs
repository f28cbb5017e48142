//! Line parsing: quoting-aware tokenization and redirection extraction.
//!
//! A raw input line goes through `extract_redirection` first, which peels
//! off at most one `stream > file` clause, then `tokenize` splits the
//! remaining command text into arguments.

mod redirection;
mod tokenizer;

pub use redirection::extract_redirection;
pub use tokenizer::tokenize;

/// Output stream a redirection applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

/// A single `stream > file` association for one command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectionSpec {
    pub stream: Stream,
    pub path: String,
    pub append: bool,
}
