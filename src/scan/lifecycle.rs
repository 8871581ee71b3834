/// This module owns the background-scan lifecycle, demonstrating Rust's
/// cooperative cancellation compared to .NET's thread termination.
///
/// A .NET implementation of a restartable background search will often
/// reach for `Thread.Abort`:
/// ```csharp
/// public static void StopFind() {
///     _backgroundThread.Abort();
///     _backgroundThread = null;
/// }
/// ```
/// Aborting a thread can interrupt it mid-mutation and leave shared state
/// half-written. Rust has no equivalent, and deliberately so: the scan
/// thread here is asked to stop through a shared `AtomicBool` that it
/// polls at file and group granularity, and every result commit re-checks
/// the flag under the entry's lock. Stopping is therefore always safe,
/// at the cost of bounded (not instant) cancellation latency.
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use tracing::{error, info};

use super::engine::run_scan;
use crate::config::ScanOptions;
use crate::project::{DefaultClassifier, FileClassifier, SourceFile};
use crate::resource::{ResourceContainer, ResourceEntry};

/// Manages at most one reference scan on a background thread.
///
/// `begin_scan` cancels whatever is in flight before launching the next
/// run, so two scans never interleave writes to the same entries; the
/// calling thread returns immediately in all cases.
pub struct ScanManager {
    classifier: Arc<dyn FileClassifier>,
    options: ScanOptions,
    cancel_flag: Option<Arc<AtomicBool>>,
    handle: Option<JoinHandle<()>>,
}

impl ScanManager {
    pub fn new(classifier: Arc<dyn FileClassifier>, options: ScanOptions) -> Self {
        Self {
            classifier,
            options,
            cancel_flag: None,
            handle: None,
        }
    }

    /// A manager using the conventional file classification and default
    /// options.
    pub fn with_defaults() -> Self {
        Self::new(Arc::new(DefaultClassifier), ScanOptions::default())
    }

    /// Starts a scan of `files` for references to the entries of
    /// `containers`, cancelling any scan already in flight.
    pub fn begin_scan(&mut self, containers: &[ResourceContainer], files: Vec<Arc<SourceFile>>) {
        self.stop_scan();

        let entries: Vec<Arc<ResourceEntry>> = containers
            .iter()
            .flat_map(|container| container.entries().iter().cloned())
            .collect();

        let cancel = Arc::new(AtomicBool::new(false));
        self.cancel_flag = Some(Arc::clone(&cancel));

        let classifier = Arc::clone(&self.classifier);
        let options = self.options.clone();

        let spawned = std::thread::Builder::new()
            .name("refscout-scan".to_string())
            .spawn(move || {
                let result = catch_unwind(AssertUnwindSafe(|| {
                    run_scan(&entries, &files, classifier.as_ref(), &options, &cancel);
                }));
                if result.is_err() {
                    error!("Scan thread panicked; affected entries keep their last state");
                }
            });

        match spawned {
            Ok(handle) => {
                // The previous handle, if any, is dropped here; its thread
                // already observed the raised cancel flag and winds down on
                // its own.
                self.handle = Some(handle);
                info!("Reference scan started");
            }
            Err(e) => {
                error!("Failed to spawn scan thread: {}", e);
                self.cancel_flag = None;
            }
        }
    }

    /// Requests cancellation of the in-flight scan.
    ///
    /// Idempotent and a no-op when no scan is running. Returns without
    /// waiting for the background thread to finish winding down.
    pub fn stop_scan(&mut self) {
        if let Some(flag) = self.cancel_flag.take() {
            flag.store(true, Ordering::SeqCst);
            info!("Reference scan cancellation requested");
        }
    }

    /// Whether a scan thread is currently alive.
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Blocks until the current scan thread has exited.
    ///
    /// Intended for orderly shutdown and for tests; interactive callers
    /// normally never wait on a scan.
    pub fn wait_for_idle(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for ScanManager {
    fn drop(&mut self) {
        self.stop_scan();
    }
}
