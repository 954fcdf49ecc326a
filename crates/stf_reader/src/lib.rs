//! # STF Format Documentation
//!
//! This crate reads the **STF** (structured text format) files used by *Microsoft Train
//! Simulator* and *Open Rails* content: engines (`.eng`), wagons (`.wag`), consists (`.con`),
//! activities (`.act`) and many more. An STF file is a tree of named, parenthesised blocks
//! holding whitespace separated values.
//!
//! ## File Structure
//!
//! | Part            | Description                                                         |
//! |-----------------|---------------------------------------------------------------------|
//! | Signature line  | Optional first line, e.g. `SIMISA@@@@@@@@@@JINX0D0t______`          |
//! | Items           | Tokens, quoted strings and the block markers `(` and `)`            |
//!
//! Files are usually UTF-16 with a byte order mark. A BOM is honoured and UTF-8 assumed
//! otherwise.
//!
//! ### Items
//!
//! | Written as          | Read as                                                       |
//! |---------------------|---------------------------------------------------------------|
//! | `Name`              | the token `Name`                                              |
//! | `"two words"`       | the token `two words`, with `\n`, `\t` and `\"` escapes       |
//! | `"a" + "b"`         | the token `ab`                                                |
//! | `(` / `)`           | block open / close                                            |
//! | `60mph`             | a token; numeric readers convert it with [`stf_units`]        |
//!
//! ### Directives
//!
//! | Directive               | Effect                                                      |
//! |-------------------------|-------------------------------------------------------------|
//! | `#...`, `_...`          | comment: the following item (or block) is discarded         |
//! | `comment`, `skip`       | same as above                                               |
//! | `include ( "file" )`    | items of `file`, relative to the current file, are spliced  |
//!
//! A comment right before the `)` closing a block has nothing to discard and reads as
//! [`Item::CommentTail`].
//!
//! ## Reading
//!
//! [`StfReader`] tracks block depth, lets the last item be stepped back once and
//! follows includes. Values are read with typed readers such as
//! [`StfReader::read_float_block`], and whole files are walked by dispatching tokens to
//! [`TokenProcessor`]s. Recoverable problems are collected as [`Warning`]s and logged.
//!

pub mod error;
pub mod item;
mod lexer;
pub mod parse;
pub mod read;
pub mod source;
pub mod stream;
pub mod types;
mod values;

pub use error::{Error, Result, Warning};
pub use item::Item;
pub use parse::TokenProcessor;
pub use read::StfReader;
pub use source::{FsLoader, Loader};
pub use stf_units::{self, Conversion, Units};
pub use types::{Color, Vector2, Vector3, Vector4};
