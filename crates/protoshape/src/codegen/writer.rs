//! Indentation-aware text output for generated C#.
//!
//! Blocks are opened with [`CodeWriter::bracket`] or [`CodeWriter::scope`] and
//! closed in LIFO order. [`Scope`] closes its block when dropped, so a block
//! opened through it is balanced on every exit path, early returns included.

use std::ops::{Deref, DerefMut};

/// Indentation unit used for one nesting level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentStyle {
    Spaces,
    Tabs,
}

impl IndentStyle {
    fn unit(self) -> &'static str {
        match self {
            IndentStyle::Spaces => "    ",
            IndentStyle::Tabs => "\t",
        }
    }
}

/// Accumulates generated source text.
pub struct CodeWriter {
    output: String,
    indent: IndentStyle,
    /// Headers of the currently open blocks, innermost last.
    open: Vec<String>,
}

impl CodeWriter {
    pub fn new(indent: IndentStyle) -> Self {
        Self {
            output: String::new(),
            indent,
            open: Vec::new(),
        }
    }

    /// Number of blocks currently open.
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    /// Writes one line at the current indentation. Empty lines carry no
    /// indentation.
    pub fn write_line(&mut self, line: &str) {
        if !line.is_empty() {
            for _ in 0..self.open.len() {
                self.output.push_str(self.indent.unit());
            }
            self.output.push_str(line);
        }
        self.output.push('\n');
    }

    pub fn blank_line(&mut self) {
        self.write_line("");
    }

    /// Writes `text` as `//` line comments, one per source line.
    pub fn comment(&mut self, text: &str) {
        for line in text.lines() {
            self.write_line(&format!("// {}", line));
        }
    }

    /// Writes `text` as an XML `<summary>` doc comment. Blank text writes
    /// nothing.
    pub fn summary(&mut self, text: &str) {
        if text.trim().is_empty() {
            return;
        }
        self.write_line("/// <summary>");
        for line in text.lines() {
            self.write_line(&format!("/// {}", escape_xml(line.trim_end())));
        }
        self.write_line("/// </summary>");
    }

    /// Writes `header` and opens a block below it.
    pub fn bracket(&mut self, header: &str) {
        self.write_line(header);
        self.write_line("{");
        self.open.push(header.to_string());
    }

    /// Closes the innermost open block.
    pub fn end_bracket(&mut self) {
        debug_assert!(!self.open.is_empty(), "end_bracket without open block");
        self.open.pop();
        self.write_line("}");
    }

    /// Opens a block that is closed when the returned guard is dropped.
    pub fn scope(&mut self, header: &str) -> Scope<'_> {
        self.bracket(header);
        Scope { writer: self }
    }

    /// Returns the generated text.
    pub fn finish(self) -> String {
        debug_assert!(
            self.open.is_empty(),
            "unclosed blocks: {:?}",
            self.open
        );
        self.output
    }
}

/// An open block. Dereferences to the writer and closes the block on drop.
pub struct Scope<'w> {
    writer: &'w mut CodeWriter,
}

impl Deref for Scope<'_> {
    type Target = CodeWriter;

    fn deref(&self) -> &CodeWriter {
        self.writer
    }
}

impl DerefMut for Scope<'_> {
    fn deref_mut(&mut self) -> &mut CodeWriter {
        self.writer
    }
}

impl Drop for Scope<'_> {
    fn drop(&mut self) {
        self.writer.end_bracket();
    }
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
