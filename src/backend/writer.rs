//! Output writer with indentation tracking
//!
//! Lays out generated files: IR blocks are written at the current indentation level, with block-relative depths added
//! on top.

use super::ir::Line;

/// Writer that tracks indentation and builds the output text
pub struct CodeWriter {
    /// The output buffer
    output: String,
    /// Current indentation level
    indent_level: usize,
    /// Text for one indentation level
    indent: String,
    /// Whether we're at the start of a line
    at_line_start: bool,
}

impl CodeWriter {
    /// Create a new writer with the given indentation unit
    pub fn new(indent: impl Into<String>) -> Self {
        Self {
            output: String::new(),
            indent_level: 0,
            indent: indent.into(),
            at_line_start: true,
        }
    }

    /// Get the written output
    pub fn finish(self) -> String {
        self.output
    }

    /// Increase indentation level
    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    /// Decrease indentation level
    pub fn dedent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }

    fn write_indent(&mut self, extra: usize) {
        if self.at_line_start {
            self.output.push_str(&self.indent.repeat(self.indent_level + extra));
            self.at_line_start = false;
        }
    }

    /// Write a string (with auto-indent)
    pub fn write(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        self.write_indent(0);
        self.output.push_str(s);
    }

    /// Write a string and newline
    pub fn writeln(&mut self, s: &str) {
        self.write(s);
        self.newline();
    }

    /// Write just a newline
    pub fn newline(&mut self) {
        self.output.push('\n');
        self.at_line_start = true;
    }

    /// Write multiple blank lines (for spacing between declarations)
    pub fn blank_lines(&mut self, count: usize) {
        for _ in 0..count {
            self.newline();
        }
    }

    /// Write every line of an IR block, each on its own line
    pub fn write_block(&mut self, block: &[Line]) {
        for line in block {
            if !line.text.is_empty() {
                self.write_indent(line.depth);
                self.output.push_str(&line.text);
            }
            self.newline();
        }
    }

    /// Get current indentation level
    pub fn current_indent(&self) -> usize {
        self.indent_level
    }
}
