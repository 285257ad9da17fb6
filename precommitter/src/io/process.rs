//! Helpers for running child processes with bounded captured output.
//!
//! Commands run to natural completion: there is no timeout and no attempt to
//! interrupt a started package-manager or hook-manager invocation.

use std::io::{Read, Write};
use std::process::{Command, ExitStatus, Stdio};
use std::thread;

use anyhow::{Context, Result, anyhow};
use tracing::{debug, error, instrument, warn};

/// Exit status and captured stderr of a finished child.
///
/// Stdout is drained (and mirrored when asked) but not kept.
#[derive(Debug)]
pub struct CommandOutput {
    pub status: ExitStatus,
    pub stderr: Vec<u8>,
}

/// Where the child's output goes while it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Echo {
    /// Only capture.
    Quiet,
    /// Capture and mirror output to this process's stdout/stderr.
    Terminal,
}

/// Run a command to completion, capturing stdout/stderr without risking pipe deadlocks.
///
/// Output is read on reader threads while the child runs. `output_limit_bytes` bounds how
/// much of each stream is kept in memory; bytes beyond the limit are drained and counted.
#[instrument(skip_all, fields(program = ?cmd.get_program(), output_limit_bytes))]
pub fn run_command(mut cmd: Command, output_limit_bytes: usize, echo: Echo) -> Result<CommandOutput> {
    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::piped()).stderr(Stdio::piped());

    debug!("spawning child process");
    let mut child = match cmd.spawn() {
        Ok(c) => c,
        Err(e) => {
            error!(err = %e, "failed to spawn command");
            return Err(e).context("spawn command");
        }
    };

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| anyhow!("stdout was not piped"))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| anyhow!("stderr was not piped"))?;

    let stdout_handle = thread::spawn(move || {
        let sink = (echo == Echo::Terminal).then(|| Box::new(std::io::stdout()) as Box<dyn Write>);
        read_stream_limited(stdout, output_limit_bytes, sink)
    });
    let stderr_handle = thread::spawn(move || {
        let sink = (echo == Echo::Terminal).then(|| Box::new(std::io::stderr()) as Box<dyn Write>);
        read_stream_limited(stderr, output_limit_bytes, sink)
    });

    let status = child.wait().context("wait for command")?;

    let (_, stdout_truncated) = join_output(stdout_handle).context("join stdout")?;
    let (stderr, stderr_truncated) = join_output(stderr_handle).context("join stderr")?;

    if stdout_truncated > 0 || stderr_truncated > 0 {
        warn!(stdout_truncated, stderr_truncated, "output truncated");
    }

    debug!(exit_code = ?status.code(), "command finished");
    Ok(CommandOutput { status, stderr })
}

fn join_output(handle: thread::JoinHandle<Result<(Vec<u8>, usize)>>) -> Result<(Vec<u8>, usize)> {
    match handle.join() {
        Ok(result) => result,
        Err(_) => Err(anyhow!("output reader thread panicked")),
    }
}

/// Read a stream in fixed chunks with a size limit, optionally mirroring to `sink`.
///
/// Memory stays bounded by `limit` plus one chunk, even for output without
/// newlines.
fn read_stream_limited<R: Read>(
    mut reader: R,
    limit: usize,
    mut sink: Option<Box<dyn Write>>,
) -> Result<(Vec<u8>, usize)> {
    let mut buf = Vec::new();
    let mut truncated = 0usize;
    let mut chunk = [0u8; 8192];

    loop {
        let n = reader.read(&mut chunk).context("read output")?;
        if n == 0 {
            break;
        }

        if let Some(writer) = sink.as_mut() {
            if let Err(e) = writer.write_all(&chunk[..n]) {
                warn!(err = %e, "failed to mirror child output");
            } else if let Err(e) = writer.flush() {
                warn!(err = %e, "failed to flush mirrored output");
            }
        }

        let remaining = limit.saturating_sub(buf.len());
        if remaining > 0 {
            let keep = n.min(remaining);
            buf.extend_from_slice(&chunk[..keep]);
            truncated += n.saturating_sub(keep);
        } else {
            truncated += n;
        }
    }

    Ok((buf, truncated))
}
