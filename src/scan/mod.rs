/// This module implements the reference scan itself: the whole-word
/// matcher, the line segmenter, best-effort file reading, the group
/// fan-out engine, and the background-scan lifecycle.
pub mod engine;
pub mod lifecycle;
pub mod matcher;
pub mod reader;
pub mod segmenter;

pub use engine::run_scan;
pub use lifecycle::ScanManager;
pub use matcher::find_whole_words;
pub use segmenter::line_segments;
