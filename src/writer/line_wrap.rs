/// Text builder that wraps lines before they exceed a length limit.
///
/// Wrapping happens between appended pieces, never inside one. A wrapped line
/// is closed with `suffix` and the next one opened with `prefix`, which lets a
/// long C++ string literal continue as `"..."` on the following line.
#[derive(Debug, Clone)]
pub struct WrappedLineBuilder {
    done: String,
    line: String,
    line_length: usize,
    prefix: String,
    suffix: String,
    /// Length of `line` that is only the wrap prefix
    line_start: usize,
    ignore_limit: bool,
}

impl WrappedLineBuilder {
    pub fn new(line_length: usize) -> Self {
        Self {
            done: String::new(),
            line: String::new(),
            line_length,
            prefix: String::new(),
            suffix: String::new(),
            line_start: 0,
            ignore_limit: false,
        }
    }

    /// Set the text that closes a wrapped line and opens the next one
    pub fn wrapping_with(mut self, prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self.suffix = suffix.into();
        self
    }

    /// The next append is not allowed to wrap
    pub fn nonbreaking(&mut self) -> &mut Self {
        self.ignore_limit = true;
        self
    }

    pub fn append(&mut self, value: &str) -> &mut Self {
        if !self.ignore_limit {
            self.wrap_if_needed(value);
        }
        self.line.push_str(value);
        self.ignore_limit = false;
        self
    }

    pub fn append_line(&mut self, value: &str) -> &mut Self {
        self.append(value);
        self.done.push_str(&self.line);
        self.done.push('\n');
        self.line.clear();
        self.line_start = 0;
        self
    }

    /// Consume the builder and return the text
    pub fn finish(mut self) -> String {
        self.done.push_str(&self.line);
        self.done
    }

    fn wrap_if_needed(&mut self, value: &str) {
        let has_content = self.line.len() > self.line_start;
        if has_content && self.line.len() + value.len() > self.line_length {
            self.done.push_str(&self.line);
            self.done.push_str(&self.suffix);
            self.done.push('\n');
            self.line.clear();
            self.line.push_str(&self.prefix);
            self.line_start = self.prefix.len();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_wrap_under_limit() {
        let mut b = WrappedLineBuilder::new(20);
        b.append("abc, ").append("def");
        assert_eq!(b.finish(), "abc, def");
    }

    #[test]
    fn test_wraps_with_prefix_and_suffix() {
        let mut b = WrappedLineBuilder::new(12).wrapping_with("  \"", "\"");
        b.append("\"SELECT ").append("ID, ").append("Name");
        assert_eq!(b.finish(), "\"SELECT ID, \"\n  \"Name");
    }

    #[test]
    fn test_nonbreaking_append() {
        let mut b = WrappedLineBuilder::new(10);
        b.append("0123456789");
        b.nonbreaking().append("\");");
        assert_eq!(b.finish(), "0123456789\");");
    }

    #[test]
    fn test_oversized_piece_on_empty_line_does_not_wrap() {
        let mut b = WrappedLineBuilder::new(4).wrapping_with("> ", "");
        b.append("toolong").append("x");
        assert_eq!(b.finish(), "toolong\n> x");
    }

    #[test]
    fn test_append_line_resets_line() {
        let mut b = WrappedLineBuilder::new(10);
        b.append_line("").append_line("    // x").append("abc");
        assert_eq!(b.finish(), "\n    // x\nabc");
    }
}
