//! Completion engine: candidate collection, longest-common-prefix
//! narrowing, and the two-press disambiguation protocol.
//!
//! A request for an ambiguous prefix first rings the bell; a second
//! consecutive request for the exact same prefix lists the candidates.
//! Any change to the line in between starts the count over.

use crate::builtins::BUILTIN_NAMES;
use crate::resolver::SearchPath;

/// What the line editor should do in response to one completion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionAction {
    /// No match, or ambiguous on the first press: ring the bell.
    Bell,
    /// Replace the whole line with this text.
    Replace(String),
    /// Print the candidates below the prompt, then redisplay the line.
    ShowList(Vec<String>),
}

/// Tracks consecutive completion requests for the same line text.
#[derive(Debug, Default)]
pub struct CompletionState {
    last_line: String,
    presses: u32,
}

impl CompletionState {
    /// Forget any pending press count, e.g. after a line is submitted.
    pub fn reset(&mut self) {
        self.last_line.clear();
        self.presses = 0;
    }
}

/// Candidate command names: builtins plus every executable on the
/// search path, sorted and deduplicated.
pub fn command_candidates(search_path: &SearchPath) -> Vec<String> {
    let mut names: Vec<String> = BUILTIN_NAMES.iter().map(|name| name.to_string()).collect();
    names.extend(search_path.executables());
    names.sort();
    names.dedup();
    names
}

pub fn complete_line(
    line: &str,
    candidates: &[String],
    state: &mut CompletionState,
) -> CompletionAction {
    if line != state.last_line {
        state.last_line = line.to_string();
        state.presses = 0;
    }
    state.presses += 1;

    let mut matches: Vec<&str> = candidates
        .iter()
        .map(String::as_str)
        .filter(|candidate| candidate.starts_with(line))
        .collect();
    matches.sort_unstable();
    matches.dedup();

    match matches.as_slice() {
        [] => CompletionAction::Bell,
        [only] => {
            let only = *only;
            state.reset();
            if only == line {
                CompletionAction::Replace(line.to_string())
            } else {
                CompletionAction::Replace(format!("{only} "))
            }
        }
        _ => {
            let prefix = longest_common_prefix(&matches);
            if prefix.len() > line.len() {
                state.reset();
                CompletionAction::Replace(prefix)
            } else if state.presses >= 2 {
                state.reset();
                CompletionAction::ShowList(matches.iter().map(|m| m.to_string()).collect())
            } else {
                CompletionAction::Bell
            }
        }
    }
}

fn longest_common_prefix(items: &[&str]) -> String {
    let mut prefix = items.first().copied().unwrap_or("");
    for item in items.iter().skip(1) {
        let mut end = 0;
        for (a, b) in prefix.bytes().zip(item.bytes()) {
            if a != b {
                break;
            }
            end += 1;
        }
        while end > 0 && !prefix.is_char_boundary(end) {
            end -= 1;
        }
        prefix = &prefix[..end];
        if prefix.is_empty() {
            break;
        }
    }
    prefix.to_string()
}
