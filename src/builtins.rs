//! Builtin commands and their handlers.

use std::io;
use std::path::{Path, PathBuf};

use crate::execution::OutputRouter;
use crate::repl::ShellState;

/// The closed set of commands implemented inside the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Echo,
    Cd,
    Pwd,
    Type,
    Exit,
}

pub const BUILTIN_NAMES: [&str; 5] = ["cd", "echo", "exit", "pwd", "type"];

impl Builtin {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "echo" => Some(Builtin::Echo),
            "cd" => Some(Builtin::Cd),
            "pwd" => Some(Builtin::Pwd),
            "type" => Some(Builtin::Type),
            "exit" => Some(Builtin::Exit),
            _ => None,
        }
    }
}

/// Execute one builtin; returns the command's exit status. `exit` with a
/// valid code terminates the process and does not return.
pub fn execute_builtin(
    state: &mut ShellState,
    builtin: Builtin,
    args: &[String],
    router: &mut OutputRouter,
) -> io::Result<i32> {
    match builtin {
        Builtin::Echo => {
            router.stdout_line(&args.join(" "))?;
            Ok(0)
        }
        Builtin::Pwd => {
            router.stdout_line(&state.cwd.display().to_string())?;
            Ok(0)
        }
        Builtin::Cd => {
            let target = args.first().map(String::as_str).unwrap_or("~");
            match resolve_cd(&state.cwd, target, state.home.as_deref()) {
                Some(dir) => {
                    state.cwd = dir;
                    Ok(0)
                }
                None => {
                    router.stderr_line(&format!("cd: {target}: No such file or directory"))?;
                    Ok(1)
                }
            }
        }
        Builtin::Type => {
            let Some(name) = args.first() else {
                return Ok(0);
            };
            if Builtin::from_name(name).is_some() {
                router.stdout_line(&format!("{name} is a shell builtin"))?;
                Ok(0)
            } else if let Some(path) = state.search_path.resolve(name) {
                router.stdout_line(&format!("{name} is {}", path.display()))?;
                Ok(0)
            } else {
                router.stdout_line(&format!("{name}: not found"))?;
                Ok(1)
            }
        }
        Builtin::Exit => {
            let code = match args.first() {
                None => 0,
                Some(arg) => match arg.parse::<i32>() {
                    Ok(code) => code,
                    Err(_) => {
                        router.stderr_line("exit: numeric argument required")?;
                        return Ok(2);
                    }
                },
            };
            state.save_history();
            std::process::exit(code);
        }
    }
}

/// Resolve a `cd` target against the working directory, applying one
/// path segment at a time and requiring every prefix to exist. Returns
/// `None` (working directory unchanged) when any prefix is missing.
fn resolve_cd(cwd: &Path, target: &str, home: Option<&str>) -> Option<PathBuf> {
    let expanded = if let Some(rest) = target.strip_prefix('~') {
        let home = home?;
        format!("{home}{rest}")
    } else {
        target.to_string()
    };
    let mut dir = if expanded.starts_with('/') {
        PathBuf::from("/")
    } else {
        cwd.to_path_buf()
    };
    for segment in expanded.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                dir.pop();
            }
            name => dir.push(name),
        }
        if !dir.is_dir() {
            return None;
        }
    }
    Some(dir)
}
