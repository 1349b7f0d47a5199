#![allow(dead_code)]

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};
use std::time::{SystemTime, UNIX_EPOCH};

pub fn temp_path(file_name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("taskrank-{nanos}-{file_name}"))
}

/// The binary with an isolated (missing) config file.
pub fn taskrank() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_taskrank"));
    command
        .env("TASKRANK_CONFIG_PATH", temp_path("absent-config.json"))
        .env_remove("TASKRANK_LOG");
    command
}

pub fn base_url_override(url: &str) -> String {
    format!("base_url={url}")
}

pub fn run_interactive(extra_args: &[&str], input: &str) -> Output {
    let mut child = taskrank()
        .args(extra_args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn interactive session");

    {
        let stdin = child.stdin.as_mut().expect("stdin");
        stdin
            .write_all(input.as_bytes())
            .expect("failed to write to stdin");
    }

    child
        .wait_with_output()
        .expect("failed to read interactive output")
}
