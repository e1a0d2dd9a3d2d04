//! Indentation-aware text builder for emitted C# source.

/// Incrementally constructs source text with indentation handling.
#[derive(Debug, Default, Clone)]
pub struct SourceWriter {
    content: String,
    indent_level: usize,
    indent: String,
}

impl SourceWriter {
    /// A writer indenting by `width` spaces per level.
    #[must_use]
    pub fn new(width: usize) -> Self {
        Self {
            content: String::new(),
            indent_level: 0,
            indent: " ".repeat(width),
        }
    }

    /// Writes one line at the current indentation.
    pub fn line(&mut self, line: &str) {
        for _ in 0..self.indent_level {
            self.content.push_str(&self.indent);
        }
        self.content.push_str(line);
        self.content.push('\n');
    }

    /// Writes an empty line without indentation.
    pub fn blank_line(&mut self) {
        self.content.push('\n');
    }

    /// Writes `{` and indents.
    pub fn open_block(&mut self) {
        self.line("{");
        self.indent();
    }

    /// Dedents and writes `}`.
    pub fn close_block(&mut self) {
        self.dedent();
        self.line("}");
    }

    /// Increases the indentation by one level.
    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    /// Decreases the indentation by one level, stopping at zero.
    pub fn dedent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }

    /// Current nesting level.
    #[must_use]
    pub fn level(&self) -> usize {
        self.indent_level
    }

    /// Consumes the writer and returns the text.
    #[must_use]
    pub fn finish(self) -> String {
        self.content
    }
}
