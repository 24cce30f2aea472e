//! Command-line interface for chordpro_rs.
//!
//! Usage:
//!   chordpro [-f text|html|html-css|json] [-o none|title|file] `<file>`...
//!
//! Files using a directive that is not implemented yet are skipped with a
//! warning; any other error stops the run.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, ValueEnum};
use log::{info, warn};
use thiserror::Error as ThisError;

use chordpro_rs::{parse_str, Document, Format, ParseError, RenderOptions};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Order {
    /// Keep the command-line order
    #[value(name = "none")]
    AsGiven,
    /// Sort by song title
    Title,
    /// Sort by file path
    File,
}

#[derive(Parser, Debug)]
#[command(
    name = "chordpro",
    version,
    about = "Tool for processing song lyrics stored in ChordPro formatted files"
)]
struct Cli {
    /// ChordPro files to be processed
    #[arg(required = true, value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Order before rendering
    #[arg(short, long, value_enum, default_value_t = Order::AsGiven)]
    order: Order,

    /// Line width for text output
    #[arg(short, long, default_value_t = 79)]
    width: usize,

    /// Leave chord names out of the output
    #[arg(long)]
    no_chords: bool,

    /// Write to this file instead of standard output
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, ThisError)]
enum CliError {
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{}: {source}", .path.display())]
    Parse { path: PathBuf, source: ParseError },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let mut songs = read_songs(&cli.files)?;

    match cli.order {
        Order::AsGiven => {}
        Order::Title => {
            info!("Sorting songs according to title");
            songs.sort_by_key(|(_, doc)| doc.title().unwrap_or("").trim().to_string());
        }
        Order::File => songs.sort_by(|(a, _), (b, _)| a.cmp(b)),
    }

    let options = RenderOptions {
        width: cli.width,
        show_chords: !cli.no_chords,
        ..RenderOptions::default()
    };

    info!("Rendering {} songs to {:?}", songs.len(), cli.format);
    let rendered = match cli.format {
        Format::Json => {
            let docs: Vec<&Document> = songs.iter().map(|(_, doc)| doc).collect();
            let mut json = serde_json::to_string_pretty(&docs)?;
            json.push('\n');
            json
        }
        format => {
            let mut out = String::new();
            for (_, doc) in &songs {
                out.push_str(&format.render(doc, &options)?);
            }
            out
        }
    };

    match &cli.output {
        Some(path) => fs::write(path, rendered).map_err(|source| CliError::Io {
            path: path.clone(),
            source,
        })?,
        None => print!("{}", rendered),
    }
    Ok(())
}

fn read_songs(files: &[PathBuf]) -> Result<Vec<(PathBuf, Document)>, CliError> {
    let mut songs = Vec::with_capacity(files.len());
    for path in files {
        info!("Reading {:?}", path);
        let text = fs::read_to_string(path).map_err(|source| CliError::Io {
            path: path.clone(),
            source,
        })?;
        match parse_str(&text) {
            Ok(doc) => songs.push((path.clone(), doc)),
            Err(e) if e.is_unsupported() => warn!("skipping {}: {}", path.display(), e),
            Err(source) => {
                return Err(CliError::Parse {
                    path: path.clone(),
                    source,
                })
            }
        }
    }
    Ok(songs)
}
