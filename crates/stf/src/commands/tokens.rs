use clap::Args;
use miette::{IntoDiagnostic, Result};
use owo_colors::OwoColorize;
use serde::Serialize;
use std::{io::Write, path::PathBuf};
use stf_reader::{Item, StfReader};

#[derive(Args)]
pub struct TokensArgs {
    /// An input STF file
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// Print one JSON object per item
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Serialize)]
struct TokenLine<'a> {
    line: usize,
    depth: usize,
    tree: String,
    item: &'a Item,
}

impl TokensArgs {
    pub fn handle(&self) -> Result<()> {
        let mut reader = StfReader::open(&self.file)?;
        let mut out = std::io::stdout().lock();

        if let Some(signature) = reader.simis_signature() {
            if !self.json {
                writeln!(out, "{}", signature.dimmed()).into_diagnostic()?;
            }
        }

        while !reader.eof() {
            let item = reader.read_item()?;
            let line = TokenLine {
                line: reader.line_number(),
                depth: reader.depth(),
                tree: reader.tree(),
                item: &item,
            };

            if self.json {
                let json = serde_json::to_string(&line).into_diagnostic()?;
                writeln!(out, "{json}").into_diagnostic()?;
            } else {
                writeln!(
                    out,
                    "{:>6} {:<40} {}",
                    line.line.dimmed(),
                    line.tree.cyan(),
                    item
                )
                .into_diagnostic()?;
            }
        }

        reader.finish();
        Ok(())
    }
}
