use clap::Args;
use itertools::Itertools;
use miette::{miette, IntoDiagnostic, Result};
use owo_colors::OwoColorize;
use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
};
use stf_reader::{StfReader, Warning};
use tracing::debug;
use walkdir::WalkDir;

#[derive(Args)]
pub struct CheckArgs {
    /// STF files, or directories to search for them
    #[arg(value_name = "PATH", required = true)]
    paths: Vec<PathBuf>,

    /// Only check files with this extension when searching directories
    #[arg(short, long, value_name = "EXT")]
    extension: Vec<String>,
}

impl CheckArgs {
    pub fn handle(&self) -> Result<()> {
        let files = self.files()?;

        let mut warned = 0;
        let mut warnings = 0;
        let mut failed = 0;
        for path in &files {
            match check_file(path) {
                Ok(found) if found.is_empty() => {
                    println!("{} {}", "ok".green(), path.display());
                }
                Ok(found) => {
                    warned += 1;
                    warnings += found.len();
                    println!(
                        "{} {} ({} warnings)",
                        "warn".yellow(),
                        path.display(),
                        found.len()
                    );
                }
                Err(error) => {
                    failed += 1;
                    println!("{} {}", "fail".red(), path.display());
                    eprintln!("{:?}", miette::Report::new(error));
                }
            }
        }

        println!(
            "{} files checked, {} with warnings ({} total), {} failed",
            files.len(),
            warned,
            warnings,
            failed
        );

        if failed > 0 {
            return Err(miette!("{failed} of {} files could not be read", files.len()));
        }
        Ok(())
    }

    fn files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for path in &self.paths {
            if !path.is_dir() {
                files.push(path.clone());
                continue;
            }

            for entry in WalkDir::new(path).sort_by_file_name() {
                let entry = entry.into_diagnostic()?;
                if entry.file_type().is_file() && self.wanted(entry.path()) {
                    files.push(entry.into_path());
                }
            }
        }
        Ok(files.into_iter().unique().collect())
    }

    fn wanted(&self, path: &Path) -> bool {
        if self.extension.is_empty() {
            return true;
        }
        path.extension()
            .and_then(OsStr::to_str)
            .is_some_and(|extension| {
                self.extension
                    .iter()
                    .any(|wanted| wanted.trim_start_matches('.').eq_ignore_ascii_case(extension))
            })
    }
}

fn check_file(path: &Path) -> stf_reader::Result<Vec<Warning>> {
    debug!("checking {}", path.display());
    let mut reader = StfReader::open(path)?;
    while !reader.eof() {
        reader.read_item()?;
    }
    Ok(reader.finish())
}
