//! External Graphviz invocation.
//!
//! Pipes DOT text into `dot -T<format>` and collects the image bytes. The
//! child is killed if it outlives `PlotConfig::render_timeout`.

use std::io::{Read, Write};
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, warn};

use crate::config::{OutputFormat, PlotConfig};
use crate::error::{PlotError, Result};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Render `dot` to `format`. `OutputFormat::Dot` short-circuits and returns
/// the text unchanged.
pub fn dottify(dot: &str, format: OutputFormat, config: &PlotConfig) -> Result<Vec<u8>> {
    if format == OutputFormat::Dot {
        return Ok(dot.as_bytes().to_vec());
    }

    let mut child = Command::new(&config.dot_binary)
        .arg(format!("-T{}", format.as_str()))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;
    debug!("spawned {} -T{} (pid {})", config.dot_binary, format, child.id());

    // stdin/stdout/stderr are drained on their own threads so a chatty
    // renderer never blocks on a full pipe while we wait on it.
    let stdin = child.stdin.take();
    let input = dot.as_bytes().to_vec();
    let writer = thread::spawn(move || -> std::io::Result<()> {
        if let Some(mut stdin) = stdin {
            stdin.write_all(&input)?;
        }
        Ok(())
    });
    let stdout = drain(child.stdout.take());
    let stderr = drain(child.stderr.take());

    let status = match wait_timeout(&mut child, config.render_timeout)? {
        Some(status) => status,
        None => {
            warn!(
                "{} exceeded {:?}, killing pid {}",
                config.dot_binary,
                config.render_timeout,
                child.id()
            );
            let _ = child.kill();
            let _ = child.wait();
            return Err(PlotError::RenderTimeout(config.render_timeout));
        }
    };

    let write_result = writer
        .join()
        .map_err(|_| PlotError::Render("stdin writer panicked".to_string()))?;
    let out = join_drain(stdout)?;
    let err = join_drain(stderr)?;

    if !status.success() {
        let msg = String::from_utf8_lossy(&err).trim().to_string();
        return Err(PlotError::Render(if msg.is_empty() {
            format!("{} exited with {}", config.dot_binary, status)
        } else {
            msg
        }));
    }
    // A renderer may legitimately close stdin early once it succeeded.
    if let Err(e) = write_result {
        debug!("writing to {} stdin: {}", config.dot_binary, e);
    }
    Ok(out)
}

fn drain<R: Read + Send + 'static>(
    pipe: Option<R>,
) -> thread::JoinHandle<std::io::Result<Vec<u8>>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            pipe.read_to_end(&mut buf)?;
        }
        Ok(buf)
    })
}

fn join_drain(handle: thread::JoinHandle<std::io::Result<Vec<u8>>>) -> Result<Vec<u8>> {
    let buf = handle
        .join()
        .map_err(|_| PlotError::Render("output reader panicked".to_string()))??;
    Ok(buf)
}

/// Poll the child until it exits or `timeout` passes; `None` on timeout.
fn wait_timeout(
    child: &mut Child,
    timeout: Duration,
) -> std::io::Result<Option<std::process::ExitStatus>> {
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if Instant::now() >= deadline {
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_renderers_graphviz.rs"]
mod tests;
