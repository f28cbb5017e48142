use std::env;
use std::io;
use std::path::PathBuf;

use log::debug;
use rustyline::history::DefaultHistory;
use rustyline::{Config, EditMode, Editor};

use crate::builtins::{execute_builtin, Builtin};
use crate::completion::LineHelper;
use crate::execution::{run_external, OutputRouter};
use crate::io_helpers::read_input_line;
use crate::parse::{extract_redirection, tokenize, RedirectionSpec};
use crate::resolver::SearchPath;

pub const PROMPT: &str = "$ ";

pub(crate) struct ShellState {
    pub(crate) editor: Editor<LineHelper, DefaultHistory>,
    pub(crate) cwd: PathBuf,
    pub(crate) home: Option<String>,
    pub(crate) search_path: SearchPath,
    pub(crate) last_status: i32,
    pub(crate) interactive: bool,
}

impl ShellState {
    pub(crate) fn save_history(&mut self) {
        let _ = self.editor.save_history(&history_path(self.home.as_deref()));
    }
}

fn history_path(home: Option<&str>) -> PathBuf {
    home.map(PathBuf::from)
        .unwrap_or_default()
        .join(".minish_history")
}

pub(crate) fn init_state(interactive: bool) -> io::Result<ShellState> {
    let edit_mode = match env::var("MINISH_EDITMODE").ok().as_deref() {
        Some("vi") | Some("VI") => EditMode::Vi,
        _ => EditMode::Emacs,
    };
    let config = Config::builder()
        .auto_add_history(true)
        .edit_mode(edit_mode)
        .build();
    let mut editor = Editor::with_config(config).map_err(io::Error::other)?;
    let search_path = SearchPath::from_env();
    editor.set_helper(Some(LineHelper::new(search_path.clone())));

    let home = env::var("HOME").ok();
    let _ = editor.load_history(&history_path(home.as_deref()));

    Ok(ShellState {
        editor,
        cwd: env::current_dir().unwrap_or_else(|_| PathBuf::from("/")),
        home,
        search_path,
        last_status: 0,
        interactive,
    })
}

/// One REPL iteration: read a line, parse it, dispatch it.
pub(crate) fn run_once(state: &mut ShellState) -> io::Result<()> {
    let line = match read_input_line(&mut state.editor, state.interactive, PROMPT)? {
        Some(line) => line,
        None => {
            if state.interactive {
                println!();
            }
            state.save_history();
            std::process::exit(0);
        }
    };

    // A submitted line ends any pending completion sequence.
    if let Some(helper) = state.editor.helper_mut() {
        helper.reset_completion();
    }

    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(());
    }

    let (command_text, redirect) = extract_redirection(trimmed);
    let args = tokenize(&command_text);
    debug!("dispatch args={:?} redirect={:?}", args, redirect);
    if args.is_empty() {
        return Ok(());
    }

    dispatch(state, &args, redirect.as_ref())?;
    debug!("dispatch done status={}", state.last_status);
    Ok(())
}

fn dispatch(
    state: &mut ShellState,
    args: &[String],
    redirect: Option<&RedirectionSpec>,
) -> io::Result<()> {
    let mut router = match OutputRouter::new(redirect, &state.cwd) {
        Ok(router) => router,
        Err(err) => {
            eprintln!("{err}");
            state.last_status = 1;
            return Ok(());
        }
    };

    let name = args[0].as_str();
    if let Some(builtin) = Builtin::from_name(name) {
        state.last_status = execute_builtin(state, builtin, &args[1..], &mut router)?;
        return Ok(());
    }

    let Some(resolved) = state.search_path.resolve(name) else {
        router.stderr_line(&format!("{name}: command not found"))?;
        state.last_status = 127;
        return Ok(());
    };

    match run_external(&resolved, name, &args[1..], &mut router, &state.cwd) {
        Ok(code) => state.last_status = code,
        Err(err) => {
            // Resolution already succeeded; this is an execution failure,
            // not "command not found".
            eprintln!("{err}");
            state.last_status = 126;
        }
    }
    Ok(())
}
