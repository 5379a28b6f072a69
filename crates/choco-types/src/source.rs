//! Source text handling.
//!
//! The source format is line-oriented: one instruction per line, blank
//! lines ignored, tokens whitespace-separated. [`SourceFile`] owns the raw
//! text, yields the trimmed instruction lines with their original 1-based
//! numbers, and supports random-access line lookup for error context.

/// Holds one source program for classification and error reporting.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub name: String,
    pub source: String,
    /// Cached line start byte offsets for fast line lookup.
    line_starts: Vec<usize>,
}

/// A trimmed, non-empty source line with its original 1-based number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLine<'a> {
    pub number: u32,
    pub text: &'a str,
}

impl SourceFile {
    /// Create a new source file.
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        let source = source.into();
        let line_starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self {
            name: name.into(),
            source,
            line_starts,
        }
    }

    /// Extract a raw source line by 1-based line number.
    ///
    /// Returns `None` if the line number is out of range.
    pub fn line(&self, line_number: u32) -> Option<&str> {
        let idx = line_number.checked_sub(1)? as usize;
        if idx >= self.line_starts.len() {
            return None;
        }
        let start = self.line_starts[idx];
        let end = self
            .line_starts
            .get(idx + 1)
            .map(|&s| s.saturating_sub(1)) // strip the \n
            .unwrap_or(self.source.len());
        let line = &self.source[start..end];
        // Also strip trailing \r for CRLF
        Some(line.trim_end_matches('\r'))
    }

    /// Get the total number of lines.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Iterate the instruction lines: trimmed, blank lines skipped, original
    /// numbering preserved.
    pub fn instruction_lines(&self) -> impl Iterator<Item = SourceLine<'_>> {
        self.source.lines().enumerate().filter_map(|(idx, raw)| {
            let text = raw.trim();
            if text.is_empty() {
                None
            } else {
                Some(SourceLine {
                    number: idx as u32 + 1,
                    text,
                })
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_extraction() {
        let src = SourceFile::new("test.choco", "memory 5\nadd 3\noutput raw");
        assert_eq!(src.line(1), Some("memory 5"));
        assert_eq!(src.line(2), Some("add 3"));
        assert_eq!(src.line(3), Some("output raw"));
        assert_eq!(src.line(0), None);
        assert_eq!(src.line(4), None);
    }

    #[test]
    fn test_line_extraction_crlf() {
        let src = SourceFile::new("test.choco", "memory 5\r\nadd 3\r\n");
        assert_eq!(src.line(1), Some("memory 5"));
        assert_eq!(src.line(2), Some("add 3"));
    }

    #[test]
    fn test_instruction_lines_skip_blanks() {
        let src = SourceFile::new("test.choco", "memory 5\n\n  add 3\t\n\n\noutput raw\n");
        let lines: Vec<_> = src.instruction_lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], SourceLine { number: 1, text: "memory 5" });
        assert_eq!(lines[1], SourceLine { number: 3, text: "add 3" });
        assert_eq!(lines[2], SourceLine { number: 6, text: "output raw" });
    }

    #[test]
    fn test_instruction_lines_whitespace_only() {
        let src = SourceFile::new("test.choco", "   \n\t\n");
        assert_eq!(src.instruction_lines().count(), 0);
    }

    #[test]
    fn test_empty_source() {
        let src = SourceFile::new("test.choco", "");
        assert_eq!(src.line_count(), 1);
        assert_eq!(src.line(1), Some(""));
        assert_eq!(src.instruction_lines().count(), 0);
    }
}
