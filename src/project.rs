use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A candidate source file supplied by the project enumeration layer.
///
/// The scan treats files as read-only identities; content is fetched on
/// demand by the reader. Shared across match records via `Arc`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceFile {
    path: PathBuf,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>) -> Arc<Self> {
        Arc::new(Self { path: path.into() })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Project-level file classification policy, injected into the scan.
///
/// Which files count as resource files, which are generated designer
/// artifacts, and which use Visual Basic syntax are project conventions,
/// not scan logic. The scan only consumes the three predicates: resource
/// and designer files are excluded from the search, and Visual Basic files
/// are matched case-insensitively because VB identifiers are
/// case-insensitive.
pub trait FileClassifier: Send + Sync {
    fn is_resource_file(&self, file: &SourceFile) -> bool;
    fn is_designer_file(&self, file: &SourceFile) -> bool;
    fn is_visual_basic_file(&self, file: &SourceFile) -> bool;
}

/// Extension-based conventions used by typical .NET resource projects.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultClassifier;

impl DefaultClassifier {
    fn extension_is(file: &SourceFile, ext: &str) -> bool {
        file.path()
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(ext))
    }
}

impl FileClassifier for DefaultClassifier {
    fn is_resource_file(&self, file: &SourceFile) -> bool {
        Self::extension_is(file, "resx") || Self::extension_is(file, "resw")
    }

    fn is_designer_file(&self, file: &SourceFile) -> bool {
        file.path()
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.to_ascii_lowercase().contains(".designer."))
    }

    fn is_visual_basic_file(&self, file: &SourceFile) -> bool {
        Self::extension_is(file, "vb")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_file_detection() {
        let classifier = DefaultClassifier;
        assert!(classifier.is_resource_file(&SourceFile::new("Strings.resx")));
        assert!(classifier.is_resource_file(&SourceFile::new("Strings.de.RESW")));
        assert!(!classifier.is_resource_file(&SourceFile::new("Strings.cs")));
    }

    #[test]
    fn test_designer_file_detection() {
        let classifier = DefaultClassifier;
        assert!(classifier.is_designer_file(&SourceFile::new("Strings.Designer.cs")));
        assert!(classifier.is_designer_file(&SourceFile::new("Form1.designer.vb")));
        assert!(!classifier.is_designer_file(&SourceFile::new("Designer.cs")));
        assert!(!classifier.is_designer_file(&SourceFile::new("MainWindow.cs")));
    }

    #[test]
    fn test_visual_basic_detection() {
        let classifier = DefaultClassifier;
        assert!(classifier.is_visual_basic_file(&SourceFile::new("Module1.vb")));
        assert!(!classifier.is_visual_basic_file(&SourceFile::new("Program.cs")));
        assert!(!classifier.is_visual_basic_file(&SourceFile::new("Module1.vbproj")));
    }
}
