use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decode a document and write it back in canonical form
    Fmt {
        input: PathBuf,

        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(long)]
        compact: bool,
    },
    /// Print the schema a `#/components/schemas/...` reference points to
    Resolve { input: PathBuf, reference: String },
    /// List every `VERB path` pair
    Routes { input: PathBuf },
}
