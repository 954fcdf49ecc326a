//! Turns a character stream into raw items
//!
use std::path::{Path, PathBuf};

use crate::{
    error::{Diagnostics, Error, Result, Warning},
    item::Item,
    stream::{is_whitespace, CharStream},
};

/// How directives are treated while reading an item
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Mode {
    /// Comments, `skip`, `comment` and `include` are interpreted
    Normal,
    /// Every token is data
    String,
    /// Every token is data and nobody will look at it
    Skip,
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Lexed {
    Item(Item),
    /// An `include` directive naming this target, still to be resolved
    Include(String),
}

/// Lexer over the text of a single file
#[derive(Debug)]
pub(crate) struct Lexer {
    stream: CharStream,
    file_name: PathBuf,
    /// Block depth contributed by this file alone
    pub depth: usize,
}

impl Lexer {
    pub fn new(file_name: PathBuf, text: &str, first_line: usize) -> Self {
        Lexer {
            stream: CharStream::new(text, first_line),
            file_name,
            depth: 0,
        }
    }

    pub fn file_name(&self) -> &Path {
        &self.file_name
    }

    pub fn line_number(&self) -> usize {
        self.stream.line_number()
    }

    pub fn stream(&mut self) -> &mut CharStream {
        &mut self.stream
    }

    pub fn warn(&self, diagnostics: &mut Diagnostics, message: impl Into<String>) {
        diagnostics.push(Warning::new(
            self.file_name.clone(),
            self.line_number(),
            message.into(),
        ));
    }

    /// Read the next raw item
    pub fn next(&mut self, mode: Mode, diagnostics: &mut Diagnostics) -> Result<Lexed> {
        let Some(first) = self.stream.peek_past_whitespace() else {
            return Ok(Lexed::Item(Item::Eof));
        };
        self.stream.read();

        let token = match first {
            '(' => return Ok(Lexed::Item(Item::Open)),
            ')' => return Ok(Lexed::Item(Item::Close)),
            '#' | '_' if mode == Mode::Normal => return self.comment(diagnostics),
            '"' => return Ok(Lexed::Item(Item::Token(self.quoted(mode, diagnostics)))),
            first => self.bare(first),
        };

        if mode != Mode::Normal {
            return Ok(Lexed::Item(Item::Token(token)));
        }
        match token.to_lowercase().as_str() {
            "include" => self.include(diagnostics),
            "skip" | "comment" => self.discard_following(diagnostics),
            _ => Ok(Lexed::Item(Item::Token(token))),
        }
    }

    /// Skip to the `)` closing the current block, without interpreting
    /// anything inside it
    pub fn skip_rest_of_block(&mut self, diagnostics: &mut Diagnostics) -> Result<()> {
        let mut depth = 1;
        while depth > 0 {
            match self.next(Mode::Skip, diagnostics)? {
                Lexed::Item(Item::Open) => depth += 1,
                Lexed::Item(Item::Close) => depth -= 1,
                Lexed::Item(Item::Eof) => break,
                _ => {}
            }
        }
        Ok(())
    }

    fn escape(&mut self, text: &mut String) {
        match self.stream.read() {
            Some('n') => text.push('\n'),
            Some('t') => text.push('\t'),
            Some(c) => text.push(c),
            None => {}
        }
    }

    fn bare(&mut self, first: char) -> String {
        let mut text = String::new();
        if first == '\\' {
            self.escape(&mut text);
        } else {
            text.push(first);
        }

        while let Some(c) = self.stream.peek() {
            match c {
                '(' | ')' => break,
                c if is_whitespace(c) => break,
                '"' => {
                    // a stray closing quote ends the token
                    self.stream.read();
                    break;
                }
                '\\' => {
                    self.stream.read();
                    self.escape(&mut text);
                }
                c => {
                    self.stream.read();
                    text.push(c);
                }
            }
        }
        text
    }

    fn quoted(&mut self, mode: Mode, diagnostics: &mut Diagnostics) -> String {
        let mut text = String::new();
        loop {
            match self.stream.read() {
                None => {
                    self.warn(
                        diagnostics,
                        "Found an unexpected EOF, while reading an item started with a double-quote character.",
                    );
                    return text;
                }
                Some('\\') => self.escape(&mut text),
                Some('"') => {
                    if self.stream.peek_past_whitespace() != Some('+') {
                        return text;
                    }
                    self.stream.read();

                    match self.stream.peek_past_whitespace() {
                        Some('"') => {
                            self.stream.read();
                        }
                        None => {
                            self.warn(
                                diagnostics,
                                "Found an unexpected EOF, while reading an item started with a double-quote character and followed by the + operator.",
                            );
                            return text;
                        }
                        Some(_) => {
                            if mode != Mode::Skip {
                                self.warn(
                                    diagnostics,
                                    "Reading an item started with a double-quote character and followed by the + operator but then the next item must also be double-quoted.",
                                );
                            }
                            return text;
                        }
                    }
                }
                Some(c) => text.push(c),
            }
        }
    }

    /// `#` or `_` marker: the rest of the marker token is ignored, and so is
    /// the item after it
    fn comment(&mut self, diagnostics: &mut Diagnostics) -> Result<Lexed> {
        loop {
            match self.stream.peek() {
                Some('(' | ')') => break,
                Some(c) => {
                    self.stream.read();
                    if is_whitespace(c) {
                        break;
                    }
                }
                None => {
                    self.warn(
                        diagnostics,
                        "Found a # marker immediately followed by an unexpected EOF.",
                    );
                    return Ok(Lexed::Item(Item::Eof));
                }
            }
        }
        self.discard_following(diagnostics)
    }

    /// Drop the item or block following a comment directive and read the
    /// item after it. A `)` ahead is left in place and reported as
    /// [`Item::CommentTail`].
    fn discard_following(&mut self, diagnostics: &mut Diagnostics) -> Result<Lexed> {
        if self.stream.peek_past_whitespace() == Some(')') {
            return Ok(Lexed::Item(Item::CommentTail));
        }

        if let Lexed::Item(Item::Open) = self.next(Mode::Skip, diagnostics)? {
            self.skip_rest_of_block(diagnostics)?;
        }

        if self.stream.peek_past_whitespace() == Some(')') {
            return Ok(Lexed::Item(Item::CommentTail));
        }
        self.next(Mode::Normal, diagnostics)
    }

    fn include(&mut self, diagnostics: &mut Diagnostics) -> Result<Lexed> {
        let mut target = self.next(Mode::String, diagnostics)?;
        if target == Lexed::Item(Item::Open) {
            target = self.next(Mode::String, diagnostics)?;
            if target != Lexed::Item(Item::Close) {
                self.skip_rest_of_block(diagnostics)?;
            }
        }

        match target {
            Lexed::Item(Item::Token(name)) if !name.is_empty() => Ok(Lexed::Include(name)),
            _ => Err(Error::Parse {
                file: self.file_name.clone(),
                line: self.line_number(),
                message: "Unexpected end of file during include statement".to_string(),
            }),
        }
    }
}
