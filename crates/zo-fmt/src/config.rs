// SPDX-License-Identifier: (MIT OR Apache-2.0)

/// Layout knobs for the printer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatConfig {
    /// Spaces per nesting level.
    pub indent_width: usize,
    /// Field and variant lists longer than this are broken one per line.
    pub max_line_width: usize,
}

impl FormatConfig {
    pub fn with_indent(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            indent_width: 2,
            max_line_width: 80,
        }
    }
}
