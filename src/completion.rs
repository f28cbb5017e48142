//! rustyline glue for tab completion.
//!
//! The engine in `completions` decides what a completion request should
//! do; this module translates its verdict into rustyline candidates,
//! bell rings, and the candidate listing the two-press protocol calls
//! for.

use std::cell::RefCell;
use std::io::{self, Write};

use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

use crate::completions::{command_candidates, complete_line, CompletionAction, CompletionState};
use crate::repl::PROMPT;
use crate::resolver::SearchPath;

pub struct LineHelper {
    search_path: SearchPath,
    // Completer::complete takes &self; the press counter needs interior
    // mutability.
    state: RefCell<CompletionState>,
}

impl LineHelper {
    pub fn new(search_path: SearchPath) -> Self {
        Self {
            search_path,
            state: RefCell::new(CompletionState::default()),
        }
    }

    /// Called by the REPL whenever a line is actually submitted.
    pub fn reset_completion(&self) {
        self.state.borrow_mut().reset();
    }
}

impl Helper for LineHelper {}

impl Completer for LineHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> Result<(usize, Vec<Pair>), ReadlineError> {
        let prefix = &line[..pos];
        let candidates = command_candidates(&self.search_path);
        let action = complete_line(prefix, &candidates, &mut self.state.borrow_mut());
        match action {
            CompletionAction::Bell => {
                let mut out = io::stdout().lock();
                let _ = out.write_all(b"\x07");
                let _ = out.flush();
                Ok((0, Vec::new()))
            }
            CompletionAction::Replace(text) => Ok((
                0,
                vec![Pair {
                    display: text.clone(),
                    replacement: text,
                }],
            )),
            CompletionAction::ShowList(items) => {
                let mut out = io::stdout().lock();
                let _ = write!(out, "\n{}\n\x07{PROMPT}{line}", items.join("  "));
                let _ = out.flush();
                Ok((0, Vec::new()))
            }
        }
    }
}

impl Hinter for LineHelper {
    type Hint = String;
}

impl Highlighter for LineHelper {}

impl Validator for LineHelper {}
