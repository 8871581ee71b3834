use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use crate::project::SourceFile;

/// A single located occurrence of a resource entry in a source file.
///
/// The five line segments are, in order: text before the first matched
/// token (left-trimmed), the first token's exact text, text strictly
/// between the tokens, the second token's exact text, and text after the
/// second token (right-trimmed). "First" and "second" are ordered by
/// position in the line, not by which token matched which role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeReference {
    /// The file the occurrence was found in
    pub file: Arc<SourceFile>,
    /// The 1-based line number of the occurrence
    pub line_number: usize,
    /// The five-part decomposition of the matched line
    pub line_segments: [String; 5],
}

impl CodeReference {
    pub fn new(file: Arc<SourceFile>, line_number: usize, line_segments: [String; 5]) -> Self {
        Self {
            file,
            line_number,
            line_segments,
        }
    }
}

/// One entry of a resource container, identified by its owner's base name
/// and its key.
///
/// The code-references slot is the only state the scan mutates. `None`
/// means "not scanned yet"; a completed scan leaves `Some` for every entry
/// it was given, empty when nothing matched.
#[derive(Debug)]
pub struct ResourceEntry {
    base_name: String,
    key: String,
    code_references: RwLock<Option<Vec<CodeReference>>>,
}

impl ResourceEntry {
    pub fn new(base_name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            base_name: base_name.into(),
            key: key.into(),
            code_references: RwLock::new(None),
        }
    }

    /// The owning container's base name
    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    /// The entry's key within its container
    pub fn key(&self) -> &str {
        &self.key
    }

    /// A snapshot of the entry's scan result. `None` until a scan has
    /// committed results for this entry.
    pub fn code_references(&self) -> Option<Vec<CodeReference>> {
        self.code_references
            .read()
            .ok()
            .and_then(|slot| slot.clone())
    }

    /// Clears the slot at scan start.
    ///
    /// Guarded by the same cancel flag as commits: a scan superseded
    /// before its reset pass finishes must not clear slots the
    /// replacement scan is about to own.
    pub(crate) fn reset_references(&self, cancel: &AtomicBool) {
        let Ok(mut slot) = self.code_references.write() else {
            return;
        };
        if cancel.load(Ordering::SeqCst) {
            return;
        }
        *slot = None;
    }

    /// Commits a scan's results unless the scan has been superseded.
    ///
    /// The cancel flag is re-read while holding the write lock. A newer
    /// scan raises the flag before it starts resetting slots, so a stale
    /// worker that lost the race observes the raised flag here and
    /// discards its results instead of overwriting the newer scan's state.
    pub(crate) fn commit_references(&self, references: Vec<CodeReference>, cancel: &AtomicBool) {
        let Ok(mut slot) = self.code_references.write() else {
            return;
        };
        if cancel.load(Ordering::SeqCst) {
            return;
        }
        *slot = Some(references);
    }

    /// Final sweep: entries never touched by any group end the scan with
    /// an empty collection rather than an unset slot.
    pub(crate) fn commit_empty_if_unset(&self, cancel: &AtomicBool) {
        let Ok(mut slot) = self.code_references.write() else {
            return;
        };
        if cancel.load(Ordering::SeqCst) || slot.is_some() {
            return;
        }
        *slot = Some(Vec::new());
    }
}

/// A resource container: a base name plus the entries it owns.
#[derive(Debug, Default)]
pub struct ResourceContainer {
    base_name: String,
    entries: Vec<Arc<ResourceEntry>>,
}

impl ResourceContainer {
    pub fn new(base_name: impl Into<String>) -> Self {
        Self {
            base_name: base_name.into(),
            entries: Vec::new(),
        }
    }

    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    /// Adds an entry keyed by `key` and returns a shared handle to it.
    pub fn add_entry(&mut self, key: impl Into<String>) -> Arc<ResourceEntry> {
        let entry = Arc::new(ResourceEntry::new(self.base_name.clone(), key));
        self.entries.push(Arc::clone(&entry));
        entry
    }

    pub fn entries(&self) -> &[Arc<ResourceEntry>] {
        &self.entries
    }
}
