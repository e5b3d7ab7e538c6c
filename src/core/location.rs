//! Position acquisition for shift start/end.
//!
//! The provider runs on a helper thread; after the timeout the shift
//! operation goes on without a location instead of waiting.

use crate::errors::{AppError, AppResult};
use crate::models::GeoPoint;
use std::io::Read;
use std::process::{Child, Command, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, mpsc};
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

pub trait LocationProvider: Send + Sync {
    fn locate(&self) -> AppResult<Option<GeoPoint>>;

    /// Stop a lookup still running after the caller gave up on it.
    fn abort(&self) {}
}

/// No positioning available.
pub struct NoLocation;

impl LocationProvider for NoLocation {
    fn locate(&self) -> AppResult<Option<GeoPoint>> {
        Ok(None)
    }
}

/// A position typed by the user (`--at lat,lng`).
pub struct FixedLocation(pub GeoPoint);

impl LocationProvider for FixedLocation {
    fn locate(&self) -> AppResult<Option<GeoPoint>> {
        Ok(Some(self.0))
    }
}

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Runs a shell command that prints `lat,lng` on stdout.
pub struct CommandLocation {
    command: String,
    running: Mutex<Option<Child>>,
    aborted: AtomicBool,
}

impl CommandLocation {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            running: Mutex::new(None),
            aborted: AtomicBool::new(false),
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    fn spawn(&self) -> AppResult<Child> {
        let mut cmd = if cfg!(target_os = "windows") {
            let mut c = Command::new("cmd");
            c.args(["/C", &self.command]);
            c
        } else {
            let mut c = Command::new("sh");
            c.args(["-c", &self.command]);
            c
        };
        Ok(cmd
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()?)
    }

    fn lock(&self) -> AppResult<MutexGuard<'_, Option<Child>>> {
        self.running
            .lock()
            .map_err(|_| AppError::Other("location command state poisoned".into()))
    }
}

impl LocationProvider for CommandLocation {
    fn locate(&self) -> AppResult<Option<GeoPoint>> {
        {
            let mut guard = self.lock()?;
            if self.aborted.load(Ordering::SeqCst) {
                return Ok(None);
            }
            *guard = Some(self.spawn()?);
        }

        // the child stays in `running` so `abort` can reach it
        let (status, mut child) = loop {
            {
                let mut guard = self.lock()?;
                let Some(child) = guard.as_mut() else {
                    debug!("location command aborted");
                    return Ok(None);
                };
                if let Some(status) = child.try_wait()? {
                    let Some(child) = guard.take() else {
                        return Ok(None);
                    };
                    break (status, child);
                }
            }
            thread::sleep(POLL_INTERVAL);
        };

        if !status.success() {
            return Err(AppError::Other(format!(
                "location command exited with {status}"
            )));
        }

        let mut text = String::new();
        if let Some(mut stdout) = child.stdout.take() {
            stdout.read_to_string(&mut text)?;
        }
        let line = text.lines().next().unwrap_or("").trim();
        if line.is_empty() {
            return Ok(None);
        }
        GeoPoint::parse(line).map(Some)
    }

    fn abort(&self) {
        let Ok(mut guard) = self.running.lock() else {
            return;
        };
        self.aborted.store(true, Ordering::SeqCst);
        if let Some(mut child) = guard.take() {
            if let Err(e) = child.kill() {
                warn!(error = %e, "could not stop location command");
            }
            // reap it so no zombie is left behind
            let _ = child.wait();
        }
    }
}

/// Ask `provider` for a position, giving up after `timeout`.
///
/// On timeout the provider is aborted; a running location command is killed.
pub fn acquire_location(provider: Box<dyn LocationProvider>, timeout: Duration) -> Option<GeoPoint> {
    let provider: Arc<dyn LocationProvider> = Arc::from(provider);
    let (tx, rx) = mpsc::channel();

    let worker = Arc::clone(&provider);
    thread::spawn(move || {
        // receiver may be gone after a timeout
        let _ = tx.send(worker.locate());
    });

    match rx.recv_timeout(timeout) {
        Ok(Ok(point)) => point,
        Ok(Err(e)) => {
            warn!(error = %e, "could not obtain location");
            None
        }
        Err(_) => {
            warn!(timeout_secs = timeout.as_secs(), "location timed out, continuing without it");
            provider.abort();
            None
        }
    }
}
