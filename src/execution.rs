//! Output routing and external command execution.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Write};
use std::os::unix::process::CommandExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;

use log::debug;

use crate::error::{ErrorKind, ShellError, ShellResult};
use crate::parse::{RedirectionSpec, Stream};

/// Routes stdout/stderr writes to the redirection target or the console.
///
/// The target file is opened (and its parent directories created) up
/// front, so a redirected stream that never receives any data still
/// leaves an empty file behind.
pub struct OutputRouter {
    target: Option<(Stream, File)>,
}

impl OutputRouter {
    pub fn new(spec: Option<&RedirectionSpec>, cwd: &Path) -> ShellResult<Self> {
        let target = match spec {
            Some(spec) => Some((spec.stream, open_target(spec, cwd)?)),
            None => None,
        };
        Ok(Self { target })
    }

    /// Write a line to the stdout route.
    pub fn stdout_line(&mut self, text: &str) -> io::Result<()> {
        self.write_stream(Stream::Stdout, text.as_bytes())?;
        self.write_stream(Stream::Stdout, b"\n")
    }

    /// Write a line to the stderr route.
    pub fn stderr_line(&mut self, text: &str) -> io::Result<()> {
        self.write_stream(Stream::Stderr, text.as_bytes())?;
        self.write_stream(Stream::Stderr, b"\n")
    }

    /// Write raw bytes to one stream's route.
    pub fn write_stream(&mut self, stream: Stream, bytes: &[u8]) -> io::Result<()> {
        match &mut self.target {
            Some((redirected, file)) if *redirected == stream => file.write_all(bytes),
            _ => match stream {
                Stream::Stdout => {
                    let mut out = io::stdout().lock();
                    out.write_all(bytes)?;
                    out.flush()
                }
                Stream::Stderr => {
                    let mut err = io::stderr().lock();
                    err.write_all(bytes)?;
                    err.flush()
                }
            },
        }
    }

    fn is_redirected(&self, stream: Stream) -> bool {
        matches!(self.target, Some((redirected, _)) if redirected == stream)
    }
}

fn open_target(spec: &RedirectionSpec, cwd: &Path) -> ShellResult<File> {
    let path = resolve_target_path(&spec.path, cwd);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|err| {
                ShellError::new(ErrorKind::Redirection, err.to_string())
                    .with_context(parent.display().to_string())
            })?;
        }
    }
    let mut opts = OpenOptions::new();
    opts.write(true).create(true);
    if spec.append {
        opts.append(true);
    } else {
        opts.truncate(true);
    }
    opts.open(&path).map_err(|err| {
        ShellError::new(ErrorKind::Redirection, err.to_string())
            .with_context(path.display().to_string())
    })
}

fn resolve_target_path(path: &str, cwd: &Path) -> PathBuf {
    let path = PathBuf::from(path);
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}

/// Run an external command to completion.
///
/// The child executes the resolved path but sees the typed name in
/// `argv[0]`. A redirected stream is piped and drained by a reader
/// thread while the shell waits, so pipe buffers cannot fill up;
/// unredirected streams inherit the terminal.
pub fn run_external(
    resolved: &Path,
    name: &str,
    args: &[String],
    router: &mut OutputRouter,
    cwd: &Path,
) -> ShellResult<i32> {
    let mut command = Command::new(resolved);
    command.arg0(name);
    command.args(args);
    command.current_dir(cwd);
    if router.is_redirected(Stream::Stdout) {
        command.stdout(Stdio::piped());
    }
    if router.is_redirected(Stream::Stderr) {
        command.stderr(Stdio::piped());
    }

    let mut child = command
        .spawn()
        .map_err(|err| ShellError::new(ErrorKind::Execution, format!("{name}: {err}")))?;
    debug!("job event=spawn pid={} argv0={}", child.id(), name);

    let stdout_drain = child.stdout.take().map(drain_stream);
    let stderr_drain = child.stderr.take().map(drain_stream);

    let status = child
        .wait()
        .map_err(|err| ShellError::new(ErrorKind::Execution, format!("{name}: {err}")))?;

    if let Some(handle) = stdout_drain {
        let bytes = join_drain(handle)?;
        router.write_stream(Stream::Stdout, &bytes)?;
    }
    if let Some(handle) = stderr_drain {
        let bytes = join_drain(handle)?;
        router.write_stream(Stream::Stderr, &bytes)?;
    }

    let code = status.code().unwrap_or(1);
    debug!("job event=exit pid={} status={}", child.id(), code);
    Ok(code)
}

fn drain_stream<R: Read + Send + 'static>(mut stream: R) -> thread::JoinHandle<io::Result<Vec<u8>>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        stream.read_to_end(&mut buf)?;
        Ok(buf)
    })
}

fn join_drain(handle: thread::JoinHandle<io::Result<Vec<u8>>>) -> ShellResult<Vec<u8>> {
    match handle.join() {
        Ok(Ok(bytes)) => Ok(bytes),
        Ok(Err(err)) => Err(err.into()),
        Err(_) => Err(ShellError::new(
            ErrorKind::Execution,
            "stream reader thread panicked",
        )),
    }
}
