#![cfg(target_os = "linux")]

use std::fs;
use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::process::{Command, Stdio};

use anyhow::{Context, Result};
use tempfile::TempDir;

fn run_script_in(script: &str, cwd: Option<&Path>, envs: &[(&str, &str)]) -> Result<(String, String, i32)> {
    let home = TempDir::new().context("temp home")?;
    let mut command = Command::new(env!("CARGO_BIN_EXE_minish"));
    command
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .env("HOME", home.path());
    if let Some(dir) = cwd {
        command.current_dir(dir);
    }
    for (key, value) in envs {
        command.env(key, value);
    }
    let mut child = command.spawn().context("spawn shell")?;
    {
        let stdin = child.stdin.as_mut().context("stdin")?;
        stdin.write_all(script.as_bytes()).context("write script")?;
    }
    let output = child.wait_with_output().context("wait")?;
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(1);
    Ok((stdout, stderr, code))
}

fn run_script(script: &str) -> Result<(String, String, i32)> {
    run_script_in(script, None, &[])
}

#[test]
fn scripted_echo_joins_arguments() -> Result<()> {
    let (out, err, code) = run_script("echo hello   world\nexit 0\n")?;
    assert!(err.is_empty(), "stderr: {err}");
    assert!(out.contains("hello world"));
    assert_eq!(code, 0);
    Ok(())
}

#[test]
fn scripted_quoting_preserves_spaces() -> Result<()> {
    let (out, err, code) = run_script("echo 'a  b'\necho \"c  d\"\nexit 0\n")?;
    assert!(err.is_empty(), "stderr: {err}");
    assert!(out.contains("a  b"));
    assert!(out.contains("c  d"));
    assert_eq!(code, 0);
    Ok(())
}

#[test]
fn scripted_pwd_follows_cd() -> Result<()> {
    let dir = TempDir::new()?;
    fs::create_dir_all(dir.path().join("sub"))?;
    let script = "cd sub\npwd\ncd ..\npwd\nexit 0\n";
    let (out, err, code) = run_script_in(script, Some(dir.path()), &[])?;
    assert!(err.is_empty(), "stderr: {err}");
    assert!(out.contains(&dir.path().join("sub").display().to_string()));
    assert!(out.contains(&dir.path().display().to_string()));
    assert_eq!(code, 0);
    Ok(())
}

#[test]
fn scripted_cd_failure_keeps_directory() -> Result<()> {
    let dir = TempDir::new()?;
    let script = "cd /no/such/dir123\npwd\nexit 0\n";
    let (out, err, code) = run_script_in(script, Some(dir.path()), &[])?;
    assert!(err.contains("cd: /no/such/dir123: No such file or directory"));
    assert!(out.contains(&dir.path().display().to_string()));
    assert_eq!(code, 0);
    Ok(())
}

#[test]
fn scripted_redirect_truncate_and_append() -> Result<()> {
    let dir = TempDir::new()?;
    let script = "echo one > out.txt\necho two >> out.txt\nexit 0\n";
    let (_, err, code) = run_script_in(script, Some(dir.path()), &[])?;
    assert!(err.is_empty(), "stderr: {err}");
    assert_eq!(code, 0);
    let content = fs::read_to_string(dir.path().join("out.txt"))?;
    assert_eq!(content, "one\ntwo\n");
    Ok(())
}

#[test]
fn scripted_redirect_creates_parent_directories() -> Result<()> {
    let dir = TempDir::new()?;
    let script = "echo deep > a/b/out.txt\nexit 0\n";
    let (_, err, code) = run_script_in(script, Some(dir.path()), &[])?;
    assert!(err.is_empty(), "stderr: {err}");
    assert_eq!(code, 0);
    let content = fs::read_to_string(dir.path().join("a/b/out.txt"))?;
    assert_eq!(content, "deep\n");
    Ok(())
}

#[test]
fn scripted_echo_stderr_redirect_leaves_empty_file() -> Result<()> {
    let dir = TempDir::new()?;
    let script = "echo hi 2> err.txt\nexit 0\n";
    let (out, _, code) = run_script_in(script, Some(dir.path()), &[])?;
    assert!(out.contains("hi"));
    assert_eq!(code, 0);
    let content = fs::read_to_string(dir.path().join("err.txt"))?;
    assert!(content.is_empty());
    Ok(())
}

#[test]
fn scripted_external_stderr_redirect() -> Result<()> {
    let dir = TempDir::new()?;
    let script = "ls /definitely/not/there 2> err.txt\nexit 0\n";
    let (_, _, code) = run_script_in(script, Some(dir.path()), &[])?;
    assert_eq!(code, 0);
    let content = fs::read_to_string(dir.path().join("err.txt"))?;
    assert!(!content.is_empty());
    Ok(())
}

#[test]
fn scripted_external_stdout_redirect() -> Result<()> {
    let dir = TempDir::new()?;
    fs::write(dir.path().join("marker.txt"), "x")?;
    let script = "ls > listing.txt\nexit 0\n";
    let (_, err, code) = run_script_in(script, Some(dir.path()), &[])?;
    assert!(err.is_empty(), "stderr: {err}");
    assert_eq!(code, 0);
    let content = fs::read_to_string(dir.path().join("listing.txt"))?;
    assert!(content.contains("marker.txt"));
    Ok(())
}

#[test]
fn scripted_type_reports_builtins_and_externals() -> Result<()> {
    let bin = TempDir::new()?;
    let frob = bin.path().join("frob");
    fs::write(&frob, "#!/bin/sh\n")?;
    fs::set_permissions(&frob, fs::Permissions::from_mode(0o755))?;
    let path = bin.path().display().to_string();
    let script = "type cd\ntype frob\ntype nowhere_to_be_found\nexit 0\n";
    let (out, _, code) = run_script_in(script, None, &[("PATH", path.as_str())])?;
    assert!(out.contains("cd is a shell builtin"));
    assert!(out.contains(&format!("frob is {}", frob.display())));
    assert!(out.contains("nowhere_to_be_found: not found"));
    assert_eq!(code, 0);
    Ok(())
}

#[test]
fn scripted_command_not_found() -> Result<()> {
    let (_, err, code) = run_script("definitely_not_a_cmd_123\nexit 0\n")?;
    assert!(err.contains("definitely_not_a_cmd_123: command not found"));
    assert_eq!(code, 0);
    Ok(())
}

#[test]
fn scripted_exit_code_propagates() -> Result<()> {
    let (_, err, code) = run_script("exit 3\n")?;
    assert!(err.is_empty(), "stderr: {err}");
    assert_eq!(code, 3);
    Ok(())
}

#[test]
fn scripted_exit_rejects_non_numeric() -> Result<()> {
    let (_, err, code) = run_script("exit abc\nexit 5\n")?;
    assert!(err.contains("exit: numeric argument required"));
    assert_eq!(code, 5);
    Ok(())
}

#[test]
fn scripted_eof_exits_cleanly() -> Result<()> {
    let (out, err, code) = run_script("echo done\n")?;
    assert!(err.is_empty(), "stderr: {err}");
    assert!(out.contains("done"));
    assert_eq!(code, 0);
    Ok(())
}

#[test]
fn scripted_no_prompt_noise_in_redirected_file() -> Result<()> {
    let dir = TempDir::new()?;
    let script = "echo quiet 1> out.txt\nexit 0\n";
    let (_, err, code) = run_script_in(script, Some(dir.path()), &[])?;
    assert!(err.is_empty(), "stderr: {err}");
    assert_eq!(code, 0);
    let content = fs::read_to_string(dir.path().join("out.txt"))?;
    assert_eq!(content, "quiet\n");
    Ok(())
}
