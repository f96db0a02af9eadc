//! Source text snapshots and the collaborator seams around them
//!
//! Architecture: Anti-Corruption Layer - SourceFile isolates the rules from storage
//! - A file's contents are snapshotted once; rules never touch the filesystem
//! - Span classification and persistence are traits so embedders can substitute
//!   their own lexer and storage backends

pub mod classify;

pub use classify::LexicalClassifier;

use crate::domain::{Location, WardenError, WardenResult};
use std::fs;
use std::path::{Path, PathBuf};

/// A half-open byte range classified as comment or string literal
///
/// Read-only to the matching core; violations never overlap one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExcludedSpan {
    /// Byte offset, inclusive
    pub start: usize,
    /// Byte offset, exclusive
    pub end: usize,
}

impl ExcludedSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Whether this span intersects the half-open range `[start, end)`
    pub fn overlaps(&self, start: usize, end: usize) -> bool {
        self.start < end && start < self.end
    }

    /// Whether `offset` falls inside this span
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }
}

/// Classifies the regions of a source text that are not code
///
/// Implementations return the set of byte ranges inside comments or string
/// literals. The matching core only consumes the result.
pub trait SpanClassifier: Send + Sync {
    fn classify(&self, text: &str) -> Vec<ExcludedSpan>;
}

/// Persists corrected file contents
///
/// The correction path calls `write` exactly once per file, after all
/// replacements are computed, and never when zero corrections applied.
pub trait Writer {
    fn write(&mut self, contents: &str) -> std::io::Result<()>;
}

/// Writer that replaces the contents of a file on disk
pub struct FileWriter {
    path: PathBuf,
}

impl FileWriter {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }
}

impl Writer for FileWriter {
    fn write(&mut self, contents: &str) -> std::io::Result<()> {
        fs::write(&self.path, contents)
    }
}

/// Byte-offset to line/column resolution over a fixed text
///
/// Line starts are collected once; lookups binary-search them. Columns are
/// 1-indexed and counted in characters, not bytes.
#[derive(Debug, Clone)]
pub struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self { line_starts }
    }

    /// Resolve a byte offset into a 1-indexed line/column location
    ///
    /// Returns `None` when the offset is out of bounds or does not fall on a
    /// character boundary of `text`.
    pub fn resolve(&self, text: &str, offset: usize) -> Option<Location> {
        if offset > text.len() {
            return None;
        }
        let line = self.line_starts.partition_point(|&start| start <= offset) - 1;
        let line_start = self.line_starts[line];
        let column = text.get(line_start..offset)?.chars().count() + 1;
        Some(Location::new((line + 1) as u32, column as u32, offset))
    }
}

/// An immutable snapshot of one file's contents at the time scanning begins
///
/// Owned exclusively by the validation or correction invocation that loaded
/// it. Excluded spans and the line index are computed once at load time.
pub struct SourceFile {
    path: PathBuf,
    contents: String,
    excluded_spans: Vec<ExcludedSpan>,
    line_index: LineIndex,
}

impl SourceFile {
    /// Read a file from disk and classify its excluded spans
    pub fn load<P: AsRef<Path>>(path: P, classifier: &dyn SpanClassifier) -> WardenResult<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            WardenError::analysis(path.display().to_string(), format!("Failed to read file: {e}"))
        })?;
        Ok(Self::from_contents(path.to_path_buf(), contents, classifier))
    }

    /// Build a snapshot from in-memory contents
    pub fn from_contents(
        path: PathBuf,
        contents: String,
        classifier: &dyn SpanClassifier,
    ) -> Self {
        let excluded_spans = classifier.classify(&contents);
        let line_index = LineIndex::new(&contents);
        Self { path, contents, excluded_spans, line_index }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn contents(&self) -> &str {
        &self.contents
    }

    pub fn excluded_spans(&self) -> &[ExcludedSpan] {
        &self.excluded_spans
    }

    /// Resolve a byte offset against this file's contents
    pub fn resolve(&self, offset: usize) -> Option<Location> {
        self.line_index.resolve(&self.contents, offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_excluded_span_overlap() {
        let span = ExcludedSpan::new(10, 20);

        assert!(span.overlaps(5, 11));
        assert!(span.overlaps(19, 25));
        assert!(span.overlaps(12, 15));
        assert!(span.overlaps(0, 100));
        assert!(!span.overlaps(0, 10));
        assert!(!span.overlaps(20, 30));
        assert!(span.contains(10));
        assert!(span.contains(19));
        assert!(!span.contains(20));
    }

    #[test]
    fn test_line_index_single_line() {
        let text = "hello world";
        let index = LineIndex::new(text);

        let loc = index.resolve(text, 0).unwrap();
        assert_eq!((loc.line, loc.column, loc.offset), (1, 1, 0));

        let loc = index.resolve(text, 6).unwrap();
        assert_eq!((loc.line, loc.column), (1, 7));
    }

    #[test]
    fn test_line_index_multiline() {
        let text = "first\nsecond\nthird";
        let index = LineIndex::new(text);

        assert_eq!(index.resolve(text, 0).unwrap().line, 1);

        let loc = index.resolve(text, 6).unwrap();
        assert_eq!((loc.line, loc.column), (2, 1));

        let loc = index.resolve(text, 13).unwrap();
        assert_eq!((loc.line, loc.column), (3, 1));

        // End of text resolves to one past the last column
        let loc = index.resolve(text, text.len()).unwrap();
        assert_eq!((loc.line, loc.column), (3, 6));
    }

    #[test]
    fn test_line_index_out_of_bounds() {
        let text = "short";
        let index = LineIndex::new(text);
        assert!(index.resolve(text, 6).is_none());
    }

    #[test]
    fn test_line_index_non_boundary_offset() {
        let text = "héllo";
        let index = LineIndex::new(text);
        // Offset 2 lands inside the two-byte 'é'
        assert!(index.resolve(text, 2).is_none());
        let loc = index.resolve(text, 3).unwrap();
        assert_eq!(loc.column, 3);
    }

    #[test]
    fn test_source_file_load() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("sample.c");
        fs::write(&file_path, "\tint x; // note\n").unwrap();

        let file = SourceFile::load(&file_path, &LexicalClassifier).unwrap();

        assert_eq!(file.path(), file_path);
        assert!(file.contents().starts_with('\t'));
        assert_eq!(file.excluded_spans().len(), 1);
        assert_eq!(file.resolve(0).unwrap().line, 1);
    }

    #[test]
    fn test_source_file_load_missing() {
        let temp_dir = TempDir::new().unwrap();
        let result = SourceFile::load(temp_dir.path().join("absent.c"), &LexicalClassifier);
        assert!(matches!(result, Err(WardenError::Analysis { .. })));
    }

    #[test]
    fn test_file_writer() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("out.txt");
        fs::write(&file_path, "old contents").unwrap();

        let mut writer = FileWriter::new(&file_path);
        writer.write("new contents").unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "new contents");
    }
}
