// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Source location tracking.

/// A byte range in the source code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Smallest span covering both `self` and `other`.
    pub fn to(self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, other: Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// The source text covered by this span, if it lies on char boundaries.
    pub fn slice<'a>(&self, source: &'a str) -> Option<&'a str> {
        source.get(self.start..self.end)
    }
}

/// Line starts of one source file, for turning byte offsets into the
/// 1-based line and column stored on tokens and shown in diagnostics.
///
/// Columns count bytes. A `\r` before a line's `\n` is kept in the offsets
/// but left out of [`LineMap::line_text`].
#[derive(Debug, Clone)]
pub struct LineMap {
    starts: Vec<usize>,
    len: usize,
}

impl LineMap {
    pub fn new(source: &str) -> Self {
        let starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        LineMap { starts, len: source.len() }
    }

    /// Line and column of `offset`. Offsets past the end land on the end of
    /// the last line, where end-of-input errors point.
    pub fn offset_to_line_col(&self, offset: usize) -> (u32, u32) {
        let offset = offset.min(self.len);
        let line = self.starts.partition_point(|&start| start <= offset).max(1);
        let col = offset - self.starts[line - 1] + 1;
        (line as u32, col as u32)
    }

    /// Text of a 1-based line without its line terminator.
    pub fn line_text<'a>(&self, source: &'a str, line: u32) -> Option<&'a str> {
        let idx = (line as usize).checked_sub(1)?;
        let start = *self.starts.get(idx)?;
        let end = self.starts.get(idx + 1).map_or(source.len(), |&next| next - 1);
        let text = source.get(start..end)?;
        Some(text.strip_suffix('\r').unwrap_or(text))
    }

    pub fn line_count(&self) -> u32 {
        self.starts.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_has_one_line() {
        let lm = LineMap::new("");
        assert_eq!(lm.offset_to_line_col(0), (1, 1));
        assert_eq!(lm.line_count(), 1);
        assert_eq!(lm.line_text("", 1), Some(""));
    }

    #[test]
    fn positions_in_a_function() {
        let src = "fun main() {\n  imu x := 1;\n}";
        let lm = LineMap::new(src);
        assert_eq!(lm.line_count(), 3);
        assert_eq!(lm.offset_to_line_col(4), (1, 5)); // main
        assert_eq!(lm.offset_to_line_col(15), (2, 3)); // imu
        assert_eq!(lm.offset_to_line_col(src.len() - 1), (3, 1));
        assert_eq!(lm.line_text(src, 2), Some("  imu x := 1;"));
        assert_eq!(lm.line_text(src, 4), None);
    }

    #[test]
    fn crlf_lines_and_newline_offsets() {
        let src = "imu a := 1;\r\nimu b := 2;\r\n";
        let lm = LineMap::new(src);
        // the terminator belongs to the line it ends
        assert_eq!(lm.offset_to_line_col(12), (1, 13));
        assert_eq!(lm.offset_to_line_col(13), (2, 1));
        assert_eq!(lm.line_text(src, 1), Some("imu a := 1;"));
        assert_eq!(lm.line_text(src, 3), Some(""));
    }

    #[test]
    fn end_of_input_clamps() {
        let src = "fun f() {\n";
        let lm = LineMap::new(src);
        assert_eq!(lm.offset_to_line_col(src.len()), (2, 1));
        assert_eq!(lm.offset_to_line_col(src.len() + 40), (2, 1));
    }

    #[test]
    fn span_merge_and_contains() {
        let a = Span::new(4, 9);
        let b = Span::new(12, 20);
        let both = a.to(b);
        assert_eq!(both, Span::new(4, 20));
        assert!(both.contains(a));
        assert!(both.contains(b));
        assert!(!a.contains(b));
        assert_eq!(Span::new(3, 3).len(), 0);
        assert_eq!(Span::new(0, 3).slice("imu x"), Some("imu"));
    }
}
