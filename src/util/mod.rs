//! # Small shared utilities.
//!
//! - [`monotonic_millis`] — wall-clock milliseconds clamped to be
//!   non-decreasing within the process
//! - [`elapsed_nanos`] — elapsed nanoseconds since an [`Instant`]
//! - [`ScratchDir`] — RAII temporary directory removed on drop

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::{Instant, SystemTime, UNIX_EPOCH};
use std::{env, fs, io, process};

/// Last timestamp handed out, in milliseconds since the Unix epoch.
static LAST_MILLIS: AtomicU64 = AtomicU64::new(0);

/// Sequence for scratch directory names within this process.
static SCRATCH_SEQ: AtomicU64 = AtomicU64::new(0);

/// Returns wall-clock milliseconds since the Unix epoch, clamped so that
/// successive calls within one process never go backwards (NTP steps and
/// clock slew are absorbed by the clamp).
pub fn monotonic_millis() -> u64 {
    let wall = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let previous = LAST_MILLIS.fetch_max(wall, AtomicOrdering::SeqCst);
    previous.max(wall)
}

/// Elapsed nanoseconds since `since`.
pub fn elapsed_nanos(since: Instant) -> u128 {
    since.elapsed().as_nanos()
}

/// A uniquely named directory under the system temp dir, removed
/// recursively when the guard is dropped.
///
/// ## Example
/// ```
/// use stepvisor::util::ScratchDir;
///
/// let dir = ScratchDir::new("demo").unwrap();
/// let file = dir.file("out.log");
/// std::fs::write(&file, "hello").unwrap();
/// assert!(file.exists());
/// ```
#[derive(Debug)]
pub struct ScratchDir {
    path: PathBuf,
}

impl ScratchDir {
    /// Creates a fresh directory named from `prefix`, the process id and a
    /// per-process sequence number.
    pub fn new(prefix: &str) -> io::Result<Self> {
        let path = env::temp_dir().join(format!(
            "{prefix}-{}-{}",
            process::id(),
            SCRATCH_SEQ.fetch_add(1, AtomicOrdering::Relaxed)
        ));
        fs::create_dir_all(&path)?;
        Ok(Self { path })
    }

    /// Path of the directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of `name` inside the directory.
    pub fn file(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}
