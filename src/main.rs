use clap::Parser;
use openapi_document_model::{
    cli::{Args, Command},
    parser, Document, Error, Result,
};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

pub fn read_document(path: &Path) -> Result<Document> {
    tracing::info!(?path, "reading document");

    if !path.is_file() {
        return Err(Error::from(io::Error::new(
            io::ErrorKind::NotFound,
            format!("Input path {path:?} is not a readable file"),
        )));
    }

    let file = fs::File::open(path)?;
    parser::from_reader(io::BufReader::new(file))
}

fn write_output(bytes: &[u8], output: Option<&PathBuf>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, bytes)?;
            tracing::info!(?path, "document written");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(bytes)?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}

fn run(args: Args) -> Result<()> {
    match args.command {
        Command::Fmt {
            input,
            output,
            compact,
        } => {
            let document = read_document(&input)?;
            let bytes = if compact {
                document.to_json()?
            } else {
                document.to_json_pretty()?
            };
            write_output(&bytes, output.as_ref())
        }
        Command::Resolve { input, reference } => {
            let document = read_document(&input)?;
            match document.resolve_ref(&reference) {
                Some((name, schema)) => {
                    tracing::info!(%name, "reference resolved");
                    let bytes = serde_json::to_vec_pretty(&schema)?;
                    write_output(&bytes, None)
                }
                None => {
                    tracing::warn!(%reference, "reference not found");
                    std::process::exit(1);
                }
            }
        }
        Command::Routes { input } => {
            let document = read_document(&input)?;
            let mut stdout = io::stdout().lock();
            for (path, item) in &document.paths {
                for (verb, operation) in item.operations_by_verb() {
                    if operation.summary.is_empty() {
                        writeln!(stdout, "{verb} {path}")?;
                    } else {
                        writeln!(stdout, "{verb} {path}  {}", operation.summary)?;
                    }
                }
            }
            Ok(())
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(Args::parse()) {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}
