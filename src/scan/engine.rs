use rayon::prelude::*;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::matcher::find_whole_words;
use super::reader::read_lines;
use super::segmenter::line_segments;
use crate::config::ScanOptions;
use crate::project::{FileClassifier, SourceFile};
use crate::resource::{CodeReference, ResourceEntry};

/// One file's content, read once per scan and shared by every group.
struct FileContent {
    file: Arc<SourceFile>,
    case_sensitive: bool,
    lines: Vec<String>,
}

/// Performs one complete reference scan, mutating each entry's
/// code-references slot in place.
///
/// Resource and generated designer files are excluded up front and every
/// remaining file is read exactly once. Entries are grouped by their
/// owner's base name and the groups fan out across a rayon pool; a line
/// is only searched per entry key after the group's base name matched it
/// as a whole word, which prunes files that are irrelevant to the whole
/// group.
///
/// The cancel flag is observed per file read, per group-file iteration,
/// and once more under each entry's slot lock before results are
/// committed, so a superseded run stops quickly and never overwrites a
/// newer run's state.
pub fn run_scan(
    entries: &[Arc<ResourceEntry>],
    files: &[Arc<SourceFile>],
    classifier: &dyn FileClassifier,
    options: &ScanOptions,
    cancel: &AtomicBool,
) {
    info!(
        "Starting reference scan: {} entries over {} candidate files",
        entries.len(),
        files.len()
    );

    if cancel.load(Ordering::SeqCst) {
        debug!("Scan superseded before it started");
        return;
    }
    for entry in entries {
        entry.reset_references(cancel);
    }

    let throttle = options.read_throttle();
    let mut contents = Vec::new();
    for file in files {
        if cancel.load(Ordering::SeqCst) {
            debug!("Scan cancelled while reading files");
            return;
        }
        if classifier.is_resource_file(file) || classifier.is_designer_file(file) {
            debug!("Excluding {} from the scan", file.path().display());
            continue;
        }
        contents.push(FileContent {
            file: Arc::clone(file),
            case_sensitive: !classifier.is_visual_basic_file(file),
            lines: read_lines(file, throttle),
        });
    }

    let mut groups: HashMap<&str, Vec<&Arc<ResourceEntry>>> = HashMap::new();
    for entry in entries {
        groups.entry(entry.base_name()).or_default().push(entry);
    }
    debug!(
        "Scanning {} base-name groups across {} readable files",
        groups.len(),
        contents.len()
    );

    match rayon::ThreadPoolBuilder::new()
        .num_threads(options.thread_count.get())
        .thread_name(|idx| format!("refscout-scan-{idx}"))
        .build()
    {
        Ok(pool) => pool.install(|| scan_groups(&groups, &contents, cancel)),
        Err(e) => {
            warn!("Failed to build scan thread pool, using defaults: {}", e);
            scan_groups(&groups, &contents, cancel);
        }
    }

    if cancel.load(Ordering::SeqCst) {
        debug!("Scan cancelled before completion");
        return;
    }

    // Entries whose group never committed (and entries of an empty group
    // sweep) must end the scan with an empty collection, not an unset one.
    for entry in entries {
        entry.commit_empty_if_unset(cancel);
    }

    info!("Reference scan complete: {} entries updated", entries.len());
}

fn scan_groups(
    groups: &HashMap<&str, Vec<&Arc<ResourceEntry>>>,
    contents: &[FileContent],
    cancel: &AtomicBool,
) {
    groups.par_iter().for_each(|(base_name, group)| {
        // One accumulator per entry, created before any file is visited,
        // so no collection is ever created from inside the match loop.
        let mut collected: Vec<Vec<CodeReference>> = group.iter().map(|_| Vec::new()).collect();

        for content in contents {
            if cancel.load(Ordering::SeqCst) {
                return;
            }
            for (index, line) in content.lines.iter().enumerate() {
                let base_offsets: Vec<usize> =
                    find_whole_words(line, base_name, content.case_sensitive).collect();
                if base_offsets.is_empty() {
                    continue;
                }
                for (accumulator, entry) in collected.iter_mut().zip(group) {
                    let key_offsets: Vec<usize> =
                        find_whole_words(line, entry.key(), content.case_sensitive).collect();
                    if key_offsets.is_empty() {
                        continue;
                    }
                    match line_segments(
                        line,
                        &base_offsets,
                        base_name.len(),
                        &key_offsets,
                        entry.key().len(),
                    ) {
                        Ok(segments) => accumulator.push(CodeReference::new(
                            Arc::clone(&content.file),
                            index + 1,
                            segments,
                        )),
                        Err(e) => debug!(
                            "Skipping line {} of {}: {}",
                            index + 1,
                            content.file.path().display(),
                            e
                        ),
                    }
                }
            }
        }

        for (entry, references) in group.iter().zip(collected) {
            entry.commit_references(references, cancel);
        }
    });
}
