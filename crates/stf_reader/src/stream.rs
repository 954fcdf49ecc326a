//! Line counting character stream
//!

/// Every control character and the space count as whitespace
pub fn is_whitespace(c: char) -> bool {
    c <= ' '
}

/// Decoded text of one file with a cursor and a line counter.
///
/// End of input is `None`; reading past it is harmless and keeps
/// returning `None`.
#[derive(Debug, Clone)]
pub struct CharStream {
    chars: Vec<char>,
    position: usize,
    line: usize,
}

impl CharStream {
    /// Start reading `text`, numbering its first line `first_line`
    pub fn new(text: &str, first_line: usize) -> Self {
        CharStream {
            chars: text.chars().collect(),
            position: 0,
            line: first_line,
        }
    }

    pub fn peek(&self) -> Option<char> {
        self.chars.get(self.position).copied()
    }

    pub fn read(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.position += 1;
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    /// Consume whitespace and return the next visible character without
    /// consuming it
    pub fn peek_past_whitespace(&mut self) -> Option<char> {
        while let Some(c) = self.peek() {
            if !is_whitespace(c) {
                return Some(c);
            }
            self.read();
        }
        None
    }

    pub fn is_eof(&self) -> bool {
        self.position >= self.chars.len()
    }

    /// Line of the next character to be read
    pub fn line_number(&self) -> usize {
        self.line
    }
}
