pub mod check;
pub mod convert;
pub mod tokens;

#[derive(clap::Subcommand)]
pub enum Commands {
    /// Read STF files to the end and report every warning
    Check(check::CheckArgs),
    /// Print the items of an STF file
    Tokens(tokens::TokensArgs),
    /// Convert values with unit suffixes to canonical units
    Convert(convert::ConvertArgs),
}

impl Commands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            Commands::Check(check) => check.handle(),
            Commands::Tokens(tokens) => tokens.handle(),
            Commands::Convert(convert) => convert.handle(),
        }
    }
}
