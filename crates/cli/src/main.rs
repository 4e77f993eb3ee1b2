//! CLI tool for converting Markdown documents into slide decks.

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use deck_core::style::BUILTIN_THEMES;
use deck_core::{Conversion, Converter, FsImageProbe, Theme};
use deck_render::{OutputFormat, STDOUT_PATH};
use std::cell::Cell;
use std::io::Write;
use std::path::{Path, PathBuf};

const PROGRESS_BAR_WIDTH: usize = 30;

/// Convert Markdown documents into slide decks.
#[derive(Parser, Debug)]
#[command(name = "md-deck")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input Markdown file(s)
    #[arg(required_unless_present = "list_themes")]
    input: Vec<PathBuf>,

    /// Output file (single input only)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output directory (default: same as input file)
    #[arg(short, long)]
    directory: Option<PathBuf>,

    /// Built-in theme name
    #[arg(short, long, default_value = deck_core::style::DEFAULT_THEME)]
    theme: String,

    /// Load the theme from a JSON file instead
    #[arg(long, conflicts_with = "theme")]
    theme_file: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Print output to stdout instead of writing to file
    #[arg(short, long, conflicts_with_all = ["output", "directory"])]
    print: bool,

    /// Suppress progress and warning output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// List the built-in themes and exit
    #[arg(long)]
    list_themes: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Json,
    Outline,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Json => OutputFormat::Json,
            Format::Outline => OutputFormat::Outline,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = log_filter(args.verbose, args.quiet);
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    if args.list_themes {
        list_themes();
        return Ok(());
    }

    if args.output.is_some() && args.input.len() > 1 {
        bail!("--output can only be used with a single input file");
    }

    let theme = match &args.theme_file {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read theme file {}", path.display()))?;
            Some(
                Theme::from_json(&json)
                    .with_context(|| format!("Invalid theme file {}", path.display()))?,
            )
        }
        None => None,
    };

    let mut failed = 0;
    for input_path in &args.input {
        if args.verbose {
            eprintln!("Processing: {}", input_path.display());
        }

        match process_file(input_path, &args, theme.as_ref()) {
            Ok((output_path, conversion)) => {
                if !args.quiet && !args.print {
                    eprintln!(
                        "Created {} ({} slides)",
                        output_path.display(),
                        conversion.slide_count
                    );
                }
                if show_progress(&args) && !conversion.warnings.is_empty() {
                    eprint!("{}", format_warnings(&conversion.warnings));
                }
            }
            Err(e) => {
                eprintln!("Error processing {}: {:#}", input_path.display(), e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        bail!("{} of {} files failed", failed, args.input.len());
    }

    Ok(())
}

/// Convert a single Markdown file.
fn process_file(
    input_path: &Path,
    args: &Args,
    theme: Option<&Theme>,
) -> Result<(PathBuf, Conversion)> {
    let markdown = std::fs::read_to_string(input_path)
        .with_context(|| format!("Failed to read {}", input_path.display()))?;

    let format = OutputFormat::from(args.format);
    let output_path = if args.print {
        PathBuf::from(STDOUT_PATH)
    } else {
        get_output_path(input_path, args, format)?
    };

    // Set while the progress bar line is still open on stderr.
    let bar_open = Cell::new(false);

    let base_dir = input_path.parent().unwrap_or(Path::new("."));
    let mut converter = Converter::new()
        .with_theme_name(&args.theme)
        .with_image_probe(FsImageProbe::relative_to(base_dir));
    if let Some(theme) = theme {
        converter = converter.with_theme(theme.clone());
    }
    if show_progress(args) {
        converter = converter.with_progress(|current, total, message: &str| {
            let line = progress_line(current, total, message);
            let mut stderr = std::io::stderr().lock();
            let _ = write!(stderr, "{}", line);
            let _ = stderr.flush();
            bar_open.set(!line.ends_with('\n'));
        });
    }

    let mut backend = format.backend();
    let result = converter.convert(&markdown, backend.as_mut(), &output_path);
    if bar_open.get() {
        eprintln!();
    }
    let conversion =
        result.with_context(|| format!("Failed to convert {}", input_path.display()))?;

    log::debug!(
        "{}: {} slides, {} warnings",
        input_path.display(),
        conversion.slide_count,
        conversion.warnings.len()
    );

    Ok((output_path, conversion))
}

/// Determine the output path for a converted file.
fn get_output_path(input_path: &Path, args: &Args, format: OutputFormat) -> Result<PathBuf> {
    if let Some(output) = &args.output {
        return Ok(match &args.directory {
            Some(dir) if output.is_relative() => dir.join(output),
            _ => output.clone(),
        });
    }

    let stem = input_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");

    let output_filename = format!("{}.{}", stem, format.extension());

    let output_path = match &args.directory {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
            dir.join(output_filename)
        }
        None => {
            if let Some(parent) = input_path.parent() {
                parent.join(output_filename)
            } else {
                PathBuf::from(output_filename)
            }
        }
    };

    Ok(output_path)
}

/// Default log filter. While the progress bar is drawn, library warnings
/// are collected and listed after the run instead of logged.
fn log_filter(verbose: bool, quiet: bool) -> &'static str {
    if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn,deck_core=error"
    }
}

/// The progress bar is drawn unless the output is quiet or verbose logs
/// would interleave with it.
fn show_progress(args: &Args) -> bool {
    !args.quiet && !args.verbose
}

/// One redraw of the progress bar. The line is ended once the deck is saved.
fn progress_line(current: usize, total: usize, message: &str) -> String {
    let filled = ((PROGRESS_BAR_WIDTH * current) / total.max(1)).min(PROGRESS_BAR_WIDTH);
    let mut line = format!(
        "\r\x1b[2K[{}{}] {}/{} - {}",
        "█".repeat(filled),
        "░".repeat(PROGRESS_BAR_WIDTH - filled),
        current,
        total,
        message
    );
    if current == total && message.starts_with("Saved") {
        line.push('\n');
    }
    line
}

fn format_warnings(warnings: &[String]) -> String {
    let mut out = String::from("Warnings:\n");
    for warning in warnings {
        out.push_str(&format!("  - {}\n", warning));
    }
    out
}

fn list_themes() {
    println!("Available themes:");
    for key in BUILTIN_THEMES {
        if let Some(theme) = Theme::builtin(key) {
            println!("  {:12} - {}", key, theme.name);
        }
    }
}
