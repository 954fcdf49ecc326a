//! The STF reader: block tracking, step back and include files
//!
use encoding_rs::Encoding;
use std::{
    io::Read,
    path::{Path, PathBuf},
};

use crate::{
    error::{Diagnostics, Error, Result, Warning},
    item::Item,
    lexer::{Lexed, Lexer, Mode},
    source::{decode, resolve_include, split_signature, FsLoader, Loader},
};

/// Everything needed to replay one item
#[derive(Debug, Clone)]
struct StepBack {
    item: Item,
    previous: String,
    depth: usize,
    /// Only kept when the item changed the tree
    tree: Option<Vec<String>>,
}

/// STF file reader
///
/// Items are read one at a time. Blocks are tracked so the reader can
/// report where it is, the last item can be stepped back once, and
/// `include` directives are followed transparently.
///
/// ```no_run
/// use stf_reader::{StfReader, TokenProcessor, Units};
///
/// #[derive(Default)]
/// struct Engine {
///     name: Option<String>,
///     max_speed: f32,
/// }
///
/// fn load_engine(path: &str) -> stf_reader::error::Result<Engine> {
///     let mut reader = StfReader::open(path)?;
///     let mut engine = Engine::default();
///
///     reader.parse_file(&mut engine, &mut [
///         TokenProcessor::new("name", |stf, engine: &mut Engine| {
///             engine.name = stf.read_string_block(None)?;
///             Ok(())
///         }),
///         TokenProcessor::new("maxvelocity", |stf, engine: &mut Engine| {
///             engine.max_speed = stf.read_float_block(Units::SPEED_DEFAULT_MPH, None)?;
///             Ok(())
///         }),
///     ])?;
///
///     Ok(engine)
/// }
/// ```
pub struct StfReader {
    root: Lexer,
    /// Innermost include last
    includes: Vec<Lexer>,
    loader: Box<dyn Loader>,
    simis_signature: Option<String>,
    diagnostics: Diagnostics,
    depth: usize,
    tree: Vec<String>,
    previous: String,
    last: Option<StepBack>,
    pending: Option<StepBack>,
    finished: bool,
}

impl StfReader {
    /// Open a file from disk. Its first line is the SIMIS signature.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with(path, FsLoader)
    }

    /// Open a file through `loader`, which is also used for its includes
    pub fn open_with(path: impl AsRef<Path>, loader: impl Loader + 'static) -> Result<Self> {
        let path = path.as_ref();
        let text = load_text(&loader, path)?;
        let (signature, body) = split_signature(&text);

        let root = Lexer::new(path.to_path_buf(), body, 2);
        Ok(Self::with_root(root, Some(signature), Box::new(loader)))
    }

    /// Read from text that has no signature line. `file_name` is used for
    /// diagnostics and to resolve includes.
    pub fn from_text(text: &str, file_name: impl Into<PathBuf>) -> Self {
        let root = Lexer::new(file_name.into(), text, 1);
        Self::with_root(root, None, Box::new(FsLoader))
    }

    /// Read a whole stream that has no signature line. Without an explicit
    /// encoding a byte order mark is honoured and UTF-8 assumed otherwise.
    pub fn from_reader<R: Read>(
        mut reader: R,
        file_name: impl Into<PathBuf>,
        encoding: Option<&'static Encoding>,
    ) -> Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Ok(Self::from_text(&decode(&bytes, encoding), file_name))
    }

    /// Replace the loader used for include files
    pub fn with_loader(mut self, loader: impl Loader + 'static) -> Self {
        self.loader = Box::new(loader);
        self
    }

    fn with_root(root: Lexer, simis_signature: Option<String>, loader: Box<dyn Loader>) -> Self {
        StfReader {
            root,
            includes: Vec::new(),
            loader,
            simis_signature,
            diagnostics: Diagnostics::default(),
            depth: 0,
            tree: Vec::new(),
            previous: String::new(),
            last: None,
            pending: None,
            finished: false,
        }
    }

    fn active(&self) -> &Lexer {
        self.includes.last().unwrap_or(&self.root)
    }

    /// File currently being read, which may be an include
    pub fn file_name(&self) -> &Path {
        self.active().file_name()
    }

    /// Line of the file currently being read
    pub fn line_number(&self) -> usize {
        self.active().line_number()
    }

    /// First line of the root file, when it was opened as a file
    pub fn simis_signature(&self) -> Option<&str> {
        self.simis_signature.as_deref()
    }

    /// Current block depth, never negative
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Warnings reported so far
    pub fn warnings(&self) -> &[Warning] {
        self.diagnostics.warnings()
    }

    /// Report a recoverable problem at the current position
    pub fn warn(&mut self, message: impl Into<String>) {
        let lexer = self.includes.last().unwrap_or(&self.root);
        lexer.warn(&mut self.diagnostics, message);
    }

    fn parse_error(&self, message: impl Into<String>) -> Error {
        Error::Parse {
            file: self.file_name().to_path_buf(),
            line: self.line_number(),
            message: message.into(),
        }
    }

    /// Whether only whitespace is left, in this file and every open include
    pub fn eof(&mut self) -> bool {
        match &self.pending {
            Some(pending) => pending.item == Item::Eof,
            None => self.peek_past_whitespace().is_none(),
        }
    }

    /// Path of enclosing blocks followed by the last item, e.g.
    /// `wagon(lights(light`
    pub fn tree(&self) -> String {
        match &self.pending {
            Some(pending) => {
                let tree = pending.tree.as_ref().unwrap_or(&self.tree);
                format!("{}{}", tree.concat(), pending.previous)
            }
            None => format!("{}{}", self.tree.concat(), self.previous),
        }
    }

    /// Next item with comments removed and includes followed
    pub fn read_item(&mut self) -> Result<Item> {
        self.next_item(Mode::Normal)
    }

    /// Next item taken literally, so `_name` or `#1` are data and not
    /// comments
    pub fn read_string(&mut self) -> Result<String> {
        Ok(self.next_item(Mode::String)?.into_string())
    }

    pub(crate) fn next_item(&mut self, mode: Mode) -> Result<Item> {
        if let Some(pending) = self.pending.take() {
            self.previous = pending.previous;
            self.depth = pending.depth;
            if let Some(tree) = pending.tree {
                self.tree = tree;
            }
            return Ok(self.update(pending.item));
        }

        let item = self.lex(mode)?;
        Ok(self.update(item))
    }

    /// Pull the next item from the innermost live file
    fn lex(&mut self, mode: Mode) -> Result<Item> {
        loop {
            let nested = !self.includes.is_empty();
            let lexer = match self.includes.last_mut() {
                Some(include) => include,
                None => &mut self.root,
            };

            let item = match lexer.next(mode, &mut self.diagnostics)? {
                Lexed::Item(item) => item,
                Lexed::Include(target) => {
                    let path = resolve_include(lexer.file_name(), &target);
                    let include = self.open_include(path)?;
                    self.includes.push(include);
                    continue;
                }
            };

            match item {
                Item::Open => lexer.depth += 1,
                Item::Close => lexer.depth = lexer.depth.saturating_sub(1),
                Item::Eof if nested => {
                    self.close_include();
                    continue;
                }
                _ => {}
            }
            return Ok(item);
        }
    }

    fn open_include(&self, path: PathBuf) -> Result<Lexer> {
        let text = load_text(self.loader.as_ref(), &path)?;
        let (_, body) = split_signature(&text);
        Ok(Lexer::new(path, body, 2))
    }

    fn close_include(&mut self) {
        if let Some(include) = self.includes.pop() {
            if include.depth != 0 {
                include.warn(
                    &mut self.diagnostics,
                    format!(
                        "Expected depth 0; got depth {} at end of file (missing ')'?)",
                        include.depth
                    ),
                );
            }
        }
    }

    /// Track block depth and the tree for an item about to be returned
    fn update(&mut self, item: Item) -> Item {
        let mut step_back = StepBack {
            item: item.clone(),
            previous: self.previous.clone(),
            depth: self.depth,
            tree: None,
        };

        match &item {
            Item::Open => {
                step_back.tree = Some(self.tree.clone());
                self.tree.push(format!("{}(", self.previous));
                self.depth += 1;
                self.previous.clear();
            }
            Item::Close => {
                step_back.tree = Some(self.tree.clone());
                self.tree.pop();
                self.depth = self.depth.saturating_sub(1);
                self.previous = ")".to_string();
            }
            Item::CommentTail => {}
            other => self.previous = other.as_str().to_string(),
        }

        self.last = Some(step_back);
        item
    }

    /// Make the next read return the last item again.
    ///
    /// # Panics
    ///
    /// Only one item can be stepped back. Panics when called twice without
    /// a read in between, or before anything was read.
    pub fn step_back_one_item(&mut self) {
        assert!(
            self.pending.is_none(),
            "step_back_one_item called twice without reading an item in between"
        );
        match self.last.take() {
            Some(last) => self.pending = Some(last),
            None => panic!("step_back_one_item called before any item was read"),
        }
    }

    /// Accept a stepped back item without replaying it. The block state
    /// still reflects it having been read.
    fn consume_pending(&mut self) -> Option<Item> {
        let pending = self.pending.take()?;
        let item = pending.item.clone();
        self.last = Some(pending);
        Some(item)
    }

    /// Consume whitespace and look at the next character without reading it
    pub fn peek_past_whitespace(&mut self) -> Option<char> {
        if let Some(pending) = &self.pending {
            return pending.item.as_str().chars().next();
        }

        loop {
            let nested = !self.includes.is_empty();
            let lexer = match self.includes.last_mut() {
                Some(include) => include,
                None => &mut self.root,
            };
            match lexer.stream().peek_past_whitespace() {
                None if nested => self.close_include(),
                next => return next,
            }
        }
    }

    /// Consume the `)` ending the current block if it is next. End of input
    /// also ends the block.
    pub fn end_of_block(&mut self) -> bool {
        if let Some(pending) = &self.pending {
            return match pending.item {
                Item::Close => self.consume_pending().is_some(),
                Item::Eof => true,
                _ => false,
            };
        }

        match self.peek_past_whitespace() {
            Some(')') => {
                let lexer = match self.includes.last_mut() {
                    Some(include) => include,
                    None => &mut self.root,
                };
                lexer.stream().read();
                lexer.depth = lexer.depth.saturating_sub(1);
                self.update(Item::Close);
                true
            }
            Some(_) => false,
            None => true,
        }
    }

    /// Read `target`, case-insensitively.
    ///
    /// A first mismatch is a warning and the next item is tried as well; a
    /// second mismatch is an error.
    pub fn must_match(&mut self, target: &str) -> Result<()> {
        if self.eof() {
            self.warn(format!("Unexpected end of file instead of {target}"));
            return Ok(());
        }

        let found = self.read_item()?;
        if found.is(target) {
            return Ok(());
        }
        self.warn(format!("\"{target}\" not found - instead found \"{found}\""));

        let found = self.read_item()?;
        if found.is(target) {
            return Ok(());
        }
        Err(Error::Mismatch {
            file: self.file_name().to_path_buf(),
            line: self.line_number(),
            expected: target.to_string(),
            found: found.into_string(),
        })
    }

    /// Read the `(` opening a block
    pub fn verify_start_of_block(&mut self) -> Result<()> {
        self.must_match("(")
    }

    /// Skip a whole block, `(` included. A `)` found instead is a warning
    /// and is left for the caller.
    pub fn skip_block(&mut self) -> Result<()> {
        match self.next_item(Mode::Skip)? {
            Item::Open => self.skip_rest_of_block(),
            Item::Close => {
                self.warn("Found a close parenthesis, rather than the expected block of data");
                self.step_back_one_item();
                Ok(())
            }
            other => Err(self.parse_error(format!(
                "SkipBlock() expected an open block but found a token instead: {other}"
            ))),
        }
    }

    /// Skip everything up to and including the `)` closing the current
    /// block. Directives inside are not interpreted.
    pub fn skip_rest_of_block(&mut self) -> Result<()> {
        let mut depth = 1usize;
        match self.consume_pending() {
            Some(Item::Close) => return Ok(()),
            Some(Item::Open) => depth += 1,
            _ => {}
        }

        while depth > 0 && !self.eof() {
            match self.next_item(Mode::Skip)? {
                Item::Open => depth += 1,
                Item::Close => depth -= 1,
                Item::Eof => break,
                _ => {}
            }
        }
        Ok(())
    }

    /// Stop reading, run the end of file check and hand back every warning
    pub fn finish(mut self) -> Vec<Warning> {
        self.check_end();
        self.finished = true;
        std::mem::take(&mut self.diagnostics).into_warnings()
    }

    fn check_end(&mut self) {
        if self.peek_past_whitespace().is_some() {
            self.warn("Expected end of file");
        } else if self.depth != 0 {
            let depth = self.depth;
            self.warn(format!(
                "Expected depth 0; got depth {depth} at end of file (missing ')'?)"
            ));
        }
    }
}

impl Drop for StfReader {
    fn drop(&mut self) {
        if !self.finished {
            self.check_end();
        }
    }
}

fn load_text(loader: &dyn Loader, path: &Path) -> Result<String> {
    let bytes = loader.load(path).map_err(|source| Error::Open {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(decode(&bytes, None))
}
