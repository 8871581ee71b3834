pub mod config;
pub mod errors;
pub mod logging;
pub mod project;
pub mod resource;
pub mod scan;

pub use config::ScanOptions;
pub use errors::{ScanError, ScanResult};
pub use project::{DefaultClassifier, FileClassifier, SourceFile};
pub use resource::{CodeReference, ResourceContainer, ResourceEntry};
pub use scan::{find_whole_words, line_segments, ScanManager};
