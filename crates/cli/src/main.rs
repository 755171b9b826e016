//! CLI tool for extracting plain text from heterogeneous files.

use anyhow::{Context, Result};
use clap::Parser;
use omnitext_core::{media_type_for_extension, FileStatus, InputFile};
use omnitext_pipeline::{process_batch, Dispatcher};
use omnitext_remote::{GeminiExtractor, RemoteConfig};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Extract normalized plain text from files of heterogeneous formats.
#[derive(Parser, Debug)]
#[command(name = "omnitext")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input file(s): images, audio, video, PDF, Office documents,
    /// archives, or plain text
    #[arg(required = true)]
    input: Vec<PathBuf>,

    /// Output directory (default: same as input file)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print output to stdout instead of writing to file
    #[arg(short, long)]
    print: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let remote = GeminiExtractor::new(RemoteConfig::from_env());
    let dispatcher = Dispatcher::new(Arc::new(remote));

    // Load inputs up front; an unreadable path is reported and skipped
    // without aborting the remaining files.
    let mut files: Vec<(PathBuf, InputFile)> = Vec::new();
    for path in &args.input {
        match load_input(path) {
            Ok(file) => files.push((path.clone(), file)),
            Err(e) => eprintln!("Error reading {}: {}", path.display(), e),
        }
    }

    let inputs: Vec<InputFile> = files.iter().map(|(_, f)| f.clone()).collect();
    let verbose = args.verbose;
    let outcomes = process_batch(&dispatcher, &inputs, |index, status| {
        if verbose {
            match status {
                FileStatus::Pending => {}
                FileStatus::Processing => {
                    eprintln!("Processing: {}", inputs[index].name);
                }
                FileStatus::Completed(_) => eprintln!("  Done: {}", inputs[index].name),
                FileStatus::Error(_) => {}
            }
        }
    })
    .await;

    for ((path, _), outcome) in files.iter().zip(outcomes) {
        match outcome {
            FileStatus::Completed(text) => {
                if args.print {
                    print!("{}", text);
                } else {
                    let written = write_result(path, args.output.as_deref(), &text)?;
                    if args.verbose {
                        eprintln!("Written to: {}", written.display());
                    }
                }
            }
            FileStatus::Error(message) => {
                eprintln!("Error processing {}: {}", path.display(), message);
            }
            _ => unreachable!("batch outcomes are always terminal"),
        }
    }

    Ok(())
}

/// Read a path into an input file, inferring a media type from the extension.
fn load_input(path: &Path) -> Result<InputFile> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to open {}", path.display()))?;

    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown")
        .to_string();

    let media_type = media_type_for_extension(&name);
    log::debug!("loaded {} ({} bytes) as {}", name, bytes.len(), media_type);

    Ok(InputFile::new(name, media_type, bytes))
}

/// Write extracted text as `<stem>.txt` into `output_dir` (created on
/// demand) or next to the input file, returning the path written.
fn write_result(input_path: &Path, output_dir: Option<&Path>, text: &str) -> Result<PathBuf> {
    let stem = input_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");

    let dir = match output_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
            dir.to_path_buf()
        }
        None => input_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default(),
    };

    let output_path = dir.join(format!("{}.txt", stem));
    std::fs::write(&output_path, text)
        .with_context(|| format!("Failed to write to {}", output_path.display()))?;

    Ok(output_path)
}
