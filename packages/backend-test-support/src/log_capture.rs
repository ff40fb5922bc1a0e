//! In-memory capture of tracing output.
//!
//! Installs a thread-scoped subscriber that writes plain-text events into a
//! shared buffer. Actix test runtimes are single-threaded, so everything the
//! service logs while a test runs lands in the buffer.

use std::io;
use std::sync::{Arc, Mutex};

use tracing::dispatcher::DefaultGuard;
use tracing::Level;
use tracing_subscriber::fmt;

#[derive(Clone, Default)]
pub struct CapturedLogs {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl CapturedLogs {
    /// Start capturing events at `TRACE` and above on the current thread.
    ///
    /// Capture stops when the returned guard is dropped.
    pub fn start() -> (Self, DefaultGuard) {
        let logs = Self::default();
        let writer = logs.clone();

        let subscriber = fmt()
            .with_max_level(Level::TRACE)
            .with_ansi(false)
            .without_time()
            .with_writer(move || writer.clone())
            .finish();

        let guard = tracing::subscriber::set_default(subscriber);
        (logs, guard)
    }

    pub fn contents(&self) -> String {
        let buf = self.buf.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        String::from_utf8_lossy(&buf).into_owned()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.contents().contains(needle)
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        let mut buf = self.buf.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
