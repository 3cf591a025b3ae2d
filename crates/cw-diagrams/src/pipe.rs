//! Scoped external command invocation over a temporary file.

use std::io::{self, Read, Write};
use std::process::{Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::consts::POLL_INTERVAL;
use crate::error::PipeError;

/// Run `command` against a temporary file holding `input` and return its stdout.
///
/// `command` is a program followed by fixed arguments; the temporary file path
/// is appended as the last argument. The file is closed before the command
/// starts and removed when this function returns, on success and failure
/// alike. A command still running after `timeout` is killed. The timeout also
/// covers reading its output, so a background process that inherited the
/// pipes cannot hold the call open; its reader thread is left behind.
///
/// # Example
///
/// ```ignore
/// let command = vec!["cat".to_owned()];
/// let out = cw_diagrams::pipe(&command, b"hello", Duration::from_secs(5))?;
/// assert_eq!(out, b"hello");
/// ```
pub fn pipe(command: &[String], input: &[u8], timeout: Duration) -> Result<Vec<u8>, PipeError> {
    let (program, args) = command.split_first().ok_or(PipeError::EmptyCommand)?;

    let mut file = NamedTempFile::new()?;
    file.write_all(input)?;
    file.flush()?;
    // Close the handle but keep the path alive until this scope ends.
    let path = file.into_temp_path();

    debug!(program, path = %path.display(), "running external command");

    let mut child = Command::new(program)
        .args(args)
        .arg(&path)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| PipeError::Spawn {
            program: program.clone(),
            source,
        })?;

    // Drain both pipes while polling so a chatty child cannot block on a full pipe.
    let stdout = drain(child.stdout.take());
    let stderr = drain(child.stderr.take());

    let deadline = Instant::now() + timeout;
    let status = loop {
        if let Some(status) = child.try_wait()? {
            break status;
        }
        if Instant::now() >= deadline {
            // The child may have exited between the poll and the kill.
            let _ = child.kill();
            child.wait()?;
            return Err(PipeError::Timeout {
                program: program.clone(),
                timeout,
            });
        }
        thread::sleep(POLL_INTERVAL);
    };

    let (Some(stdout), Some(stderr)) = (join(stdout, deadline)?, join(stderr, deadline)?) else {
        debug!(program, "output still open after exit, giving up");
        return Err(PipeError::Timeout {
            program: program.clone(),
            timeout,
        });
    };

    if !status.success() {
        return Err(PipeError::Status {
            program: program.clone(),
            code: status.code(),
            stderr: String::from_utf8_lossy(&stderr).trim().to_owned(),
        });
    }

    debug!(program, bytes = stdout.len(), "external command finished");
    Ok(stdout)
}

fn drain<R: Read + Send + 'static>(reader: Option<R>) -> JoinHandle<io::Result<Vec<u8>>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut reader) = reader {
            reader.read_to_end(&mut buf)?;
        }
        Ok(buf)
    })
}

/// Wait for a reader thread until `deadline`; `None` if it is still reading.
fn join(
    handle: JoinHandle<io::Result<Vec<u8>>>,
    deadline: Instant,
) -> Result<Option<Vec<u8>>, PipeError> {
    while !handle.is_finished() {
        if Instant::now() >= deadline {
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL);
    }
    let buf = handle.join().map_err(|_| PipeError::ReaderPanicked)??;
    Ok(Some(buf))
}
