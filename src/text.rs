// ============================================================================
// Indented Text Accumulation
// ============================================================================

const INDENT_WIDTH: usize = 4;

/// Indentation-aware text accumulator
///
/// Collects statement text line by line, prefixing each line with the
/// current indent. Used by the command list builder to lay out generated
/// DDL, but usable for any line-oriented text generation.
///
/// # Examples
///
/// ```
/// use relmig::text::IndentedStringBuilder;
///
/// let mut builder = IndentedStringBuilder::new();
/// builder.append_line("CREATE TABLE users (");
/// builder.increment_indent();
/// builder.append_line("id INTEGER");
/// builder.decrement_indent();
/// builder.append_line(");");
///
/// assert_eq!(builder.build(), "CREATE TABLE users (\n    id INTEGER\n);\n");
/// ```
#[derive(Debug)]
pub struct IndentedStringBuilder {
    indent_level: usize,
    /// Indent still owed to the current line; paid on the next append.
    pending_indent: bool,
    text: String,
}

impl IndentedStringBuilder {
    pub fn new() -> Self {
        Self {
            indent_level: 0,
            pending_indent: true,
            text: String::new(),
        }
    }

    /// Append text to the current line without a terminator
    pub fn append(&mut self, value: &str) -> &mut Self {
        self.write_pending_indent();
        self.text.push_str(value);
        self
    }

    /// Append one line of text followed by a line terminator
    ///
    /// An empty value produces a bare terminator with no indent.
    pub fn append_line(&mut self, value: &str) -> &mut Self {
        if !value.is_empty() {
            self.write_pending_indent();
            self.text.push_str(value);
        }
        self.text.push('\n');
        self.pending_indent = true;
        self
    }

    /// Append multi-line text, indenting every line at the current level
    pub fn append_lines(&mut self, value: &str) -> &mut Self {
        for line in value.split('\n') {
            self.append_line(line);
        }
        self
    }

    pub fn increment_indent(&mut self) -> &mut Self {
        self.indent_level += 1;
        self
    }

    /// Decrement the indent level, saturating at zero
    pub fn decrement_indent(&mut self) -> &mut Self {
        self.indent_level = self.indent_level.saturating_sub(1);
        self
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Reset to a pristine accumulator (text, pending indent and level)
    pub fn clear(&mut self) {
        self.text.clear();
        self.pending_indent = true;
        self.indent_level = 0;
    }

    /// Drain the accumulated text, resetting the accumulator
    pub fn take(&mut self) -> String {
        let text = std::mem::take(&mut self.text);
        self.clear();
        text
    }

    /// Consume the accumulator and return the accumulated text
    pub fn build(self) -> String {
        self.text
    }

    fn write_pending_indent(&mut self) {
        if self.pending_indent {
            self.pending_indent = false;
            if self.indent_level > 0 {
                self.text
                    .push_str(&" ".repeat(self.indent_level * INDENT_WIDTH));
            }
        }
    }
}

impl Default for IndentedStringBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for IndentedStringBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}
