//! Search bar text buffer.

/// Text buffer behind the search bar.
///
/// Holds only what the user is currently typing. Submitting hands the trimmed
/// text to the caller and clears the buffer, so the bar never retains a query
/// that has already been searched for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchInput {
    buffer: String,
}

impl SearchInput {
    #[must_use]
    pub fn value(&self) -> &str {
        &self.buffer
    }

    pub fn push(&mut self, c: char) {
        self.buffer.push(c);
    }

    pub fn pop(&mut self) {
        self.buffer.pop();
    }

    /// Takes the buffer as a query.
    ///
    /// Returns `Some` only when the trimmed text is non-empty. The buffer is
    /// cleared in both cases.
    ///
    /// ```
    /// use zinema::app::input::SearchInput;
    ///
    /// let mut input = SearchInput::default();
    /// for c in "  alien ".chars() {
    ///     input.push(c);
    /// }
    /// assert_eq!(input.submit().as_deref(), Some("alien"));
    /// assert_eq!(input.value(), "");
    /// ```
    pub fn submit(&mut self) -> Option<String> {
        let submitted = std::mem::take(&mut self.buffer);
        let trimmed = submitted.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_only_submit_does_not_fire() {
        let mut input = SearchInput::default();
        input.push(' ');
        input.push('\t');
        assert_eq!(input.submit(), None);
        assert_eq!(input.value(), "");
    }

    #[test]
    fn backspace_on_empty_buffer_is_a_noop() {
        let mut input = SearchInput::default();
        input.pop();
        input.push('x');
        input.pop();
        input.pop();
        assert_eq!(input.value(), "");
    }
}
