//! Vegan-safety scanner CLI
//!
//! Classifies ingredient-label text (e.g. pasted OCR output) against a
//! lexicon file, optionally overlaid with extension fragments.
//!
//! # Usage
//!
//! ```bash
//! # Classify a text file against the default lexicon
//! scan_cli scan --file label.txt
//!
//! # Pipe OCR output through, JSON result
//! cat label.txt | scan_cli scan -o json
//!
//! # Overlay extension fragments, then classify
//! scan_cli scan --file label.txt --extend extra-enumbers.json
//!
//! # Inspect the merged lexicon
//! scan_cli merge --extend extra-enumbers.json
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use scan_core::{classify, Lexicon, LexiconLoader, ScanResult, Verdict};

#[derive(Parser)]
#[command(name = "scan_cli")]
#[command(version = "0.1.0")]
#[command(about = "Classify ingredient-label text into a vegan-safety verdict")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format: json or pretty (default)
    #[arg(long, short = 'o', global = true, default_value = "pretty", value_enum)]
    format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Pretty,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify label text (reads stdin if no --file)
    Scan {
        /// Input text file (reads stdin if not provided)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Lexicon file (default: SCAN_LEXICON_PATH or config/ingredients.json)
        #[arg(long)]
        lexicon: Option<PathBuf>,

        /// Extension fragment files to overlay before classifying
        #[arg(long = "extend")]
        extend: Vec<PathBuf>,
    },

    /// Merge extension fragments into the lexicon and print the result
    Merge {
        /// Lexicon file (default: SCAN_LEXICON_PATH or config/ingredients.json)
        #[arg(long)]
        lexicon: Option<PathBuf>,

        /// Extension fragment files to overlay
        #[arg(long = "extend", required = true)]
        extend: Vec<PathBuf>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Scan {
            file,
            lexicon,
            extend,
        } => cmd_scan(file, lexicon, extend, cli.format),
        Commands::Merge { lexicon, extend } => cmd_merge(lexicon, extend),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn cmd_scan(
    file: Option<PathBuf>,
    lexicon: Option<PathBuf>,
    extend: Vec<PathBuf>,
    format: OutputFormat,
) -> Result<()> {
    let lexicon = load_lexicon(lexicon, &extend)?;
    let text = read_input(file)?;

    let result = classify(&text, Some(&lexicon));

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Pretty => print_pretty(&result),
    }

    Ok(())
}

fn cmd_merge(lexicon: Option<PathBuf>, extend: Vec<PathBuf>) -> Result<()> {
    let merged = load_lexicon(lexicon, &extend)?;
    println!("{}", serde_json::to_string_pretty(&merged)?);
    Ok(())
}

/// Load the base lexicon and overlay extension fragment files.
fn load_lexicon(path: Option<PathBuf>, extend: &[PathBuf]) -> Result<Lexicon> {
    let loader = match path {
        Some(path) => LexiconLoader::new(path),
        None => LexiconLoader::from_env(),
    };
    let base = loader.load()?;

    if extend.is_empty() {
        return Ok(base);
    }

    let mut fragments = Vec::with_capacity(extend.len());
    for path in extend {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        fragments.push(value);
    }

    Ok(base.merge_values(&fragments))
}

fn read_input(file: Option<PathBuf>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read stdin")?;
            Ok(buffer)
        }
    }
}

fn print_pretty(result: &ScanResult) {
    let verdict = match result.verdict {
        Verdict::Vegan => "Vegan".green().bold(),
        Verdict::NotVegan => "Not vegan".red().bold(),
        Verdict::Unclear => "Unclear".yellow().bold(),
    };
    println!("Verdict: {}", verdict);

    print_pills("Blacklist", &result.blacklist_hits);
    print_pills("Greylist", &result.greylist_hits);
    print_pills("Additive codes", &result.code_hits);
    print_pills("Unknown/check", &result.unknown_tokens);
}

fn print_pills(label: &str, items: &[String]) {
    if items.is_empty() {
        println!("{:>15}: {}", label, "none".dimmed());
    } else {
        println!("{:>15}: {}", label, items.join(", "));
    }
}
