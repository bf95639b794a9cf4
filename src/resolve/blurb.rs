use std::path::Path;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};

/// Flag a subcommand answers with its one-line description.
pub const BLURB_FLAG: &str = "--help-blurb";

/// Longest blurb kept, in bytes.
pub const MAX_BLURB_BYTES: u64 = 4096;

/// Source of one-line subcommand descriptions.
///
/// Implementations never fail: anything that goes wrong is an empty blurb.
#[async_trait]
pub trait Introspect: Send + Sync {
    async fn blurb(&self, path: &Path) -> String;
}

/// Runs the candidate with `--help-blurb` and keeps the first line of stdout.
pub struct HelpBlurbProbe {
    timeout: Duration,
}

impl HelpBlurbProbe {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl Introspect for HelpBlurbProbe {
    async fn blurb(&self, path: &Path) -> String {
        match tokio::time::timeout(self.timeout, run_probe(path)).await {
            Ok(Ok((status, line))) if status.success() => line,
            Ok(Ok((status, _))) => {
                tracing::debug!(
                    path = %path.display(),
                    status = %status,
                    "blurb probe failed"
                );
                String::new()
            }
            Ok(Err(e)) => {
                tracing::debug!(path = %path.display(), error = %e, "blurb probe could not run");
                String::new()
            }
            Err(_) => {
                tracing::debug!(
                    path = %path.display(),
                    timeout_ms = self.timeout.as_millis() as u64,
                    "blurb probe timed out"
                );
                String::new()
            }
        }
    }
}

/// Run `path --help-blurb`, keep at most `MAX_BLURB_BYTES` of the first line
/// and discard the rest of stdout.
async fn run_probe(path: &Path) -> std::io::Result<(ExitStatus, String)> {
    let mut child = tokio::process::Command::new(path)
        .arg(BLURB_FLAG)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()?;

    let mut line = Vec::new();
    if let Some(stdout) = child.stdout.take() {
        let mut reader = BufReader::new(stdout);
        (&mut reader)
            .take(MAX_BLURB_BYTES)
            .read_until(b'\n', &mut line)
            .await?;
        tokio::io::copy(&mut reader, &mut tokio::io::sink()).await?;
    }

    let status = child.wait().await?;
    Ok((status, first_line(&String::from_utf8_lossy(&line))))
}

fn first_line(output: &str) -> String {
    let line = output.split('\n').next().unwrap_or_default();
    line.trim_end_matches('\r').to_string()
}
