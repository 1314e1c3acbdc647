//! Shared mock infrastructure for unit tests.
//!
//! Provides recording [`CommandRunner`] and [`FileTransfer`] implementations
//! and output helpers so each test file doesn't redefine the same boilerplate.

#![allow(clippy::expect_used, dead_code)]

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Output};
use std::time::Duration;

use anyhow::Result;
use kitchen_solo::application::ports::{CommandRunner, FileTransfer};

// ── Output helpers ────────────────────────────────────────────────────────────

#[cfg(unix)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    ExitStatus::from_raw(code << 8)
}

#[cfg(windows)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;
    #[allow(clippy::cast_sign_loss)]
    ExitStatus::from_raw(code as u32)
}

pub fn ok_output(stdout: &[u8]) -> Output {
    Output {
        status: exit_status(0),
        stdout: stdout.to_vec(),
        stderr: Vec::new(),
    }
}

pub fn err_output(code: i32, stderr: &[u8]) -> Output {
    Output {
        status: exit_status(code),
        stdout: Vec::new(),
        stderr: stderr.to_vec(),
    }
}

// ── Mock: command runner ──────────────────────────────────────────────────────

/// Records every invocation and replies with a fixed output.
pub struct RecordingRunner {
    reply: Output,
    pub calls: RefCell<Vec<(String, Vec<String>, Duration)>>,
}

impl RecordingRunner {
    pub fn new(reply: Output) -> Self {
        Self {
            reply,
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl CommandRunner for RecordingRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output> {
        self.run_with_timeout(program, args, Duration::from_secs(30))
            .await
    }

    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output> {
        self.calls.borrow_mut().push((
            program.to_string(),
            args.iter().map(ToString::to_string).collect(),
            timeout,
        ));
        Ok(self.reply.clone())
    }
}

/// Fails every spawn, as if the shell were missing.
pub struct SpawnFails;

impl CommandRunner for SpawnFails {
    async fn run(&self, _: &str, _: &[&str]) -> Result<Output> {
        anyhow::bail!("failed to spawn sh")
    }
    async fn run_with_timeout(&self, _: &str, _: &[&str], _: Duration) -> Result<Output> {
        anyhow::bail!("failed to spawn sh")
    }
}

// ── Mock: file transfer ───────────────────────────────────────────────────────

/// Records each transfer without touching the filesystem.
#[derive(Default)]
pub struct RecordingTransfer {
    pub calls: RefCell<Vec<(PathBuf, String)>>,
}

impl FileTransfer for RecordingTransfer {
    async fn transfer_recursive(&self, local: &Path, remote: &str) -> Result<()> {
        self.calls
            .borrow_mut()
            .push((local.to_path_buf(), remote.to_string()));
        Ok(())
    }
}

/// Transfer that always fails.
pub struct TransferFails;

impl FileTransfer for TransferFails {
    async fn transfer_recursive(&self, _: &Path, _: &str) -> Result<()> {
        anyhow::bail!("target unreachable")
    }
}
