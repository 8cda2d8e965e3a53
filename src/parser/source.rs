//! Character source for the lexer
//!
//! A pull cursor over the input text that tracks line and column and allows a
//! single character of pushback. The lexer's DFA reads one character past the
//! end of identifiers, numbers and one-character operators; that character is
//! handed back here so it can start the next token.

use super::ast::SourceLocation;

/// Pull cursor over source text with one character of pushback
pub struct CharSource {
    input: Vec<char>,
    position: usize,
    pending: Option<char>,
    line: usize,
    column: usize,
    // Column before the most recent newline, restored when it is pushed back
    column_before_newline: usize,
}

impl CharSource {
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            pending: None,
            line: 1,
            column: 0,
            column_before_newline: 0,
        }
    }

    /// Next character, or `None` at end of input
    pub fn next(&mut self) -> Option<char> {
        let ch = match self.pending.take() {
            Some(ch) => ch,
            None => {
                let ch = *self.input.get(self.position)?;
                self.position += 1;
                ch
            }
        };

        if ch == '\n' {
            self.line += 1;
            self.column_before_newline = self.column;
            self.column = 0;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    /// Hand back the character most recently returned by [`next`](Self::next).
    ///
    /// Only one character may be pending at a time.
    pub fn pushback(&mut self, ch: char) {
        debug_assert!(
            self.pending.is_none(),
            "CharSource supports a single character of pushback"
        );

        if ch == '\n' {
            self.line -= 1;
            self.column = self.column_before_newline;
        } else {
            self.column -= 1;
        }

        self.pending = Some(ch);
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    /// Current cursor position
    pub fn location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}
