//! Clippings CLI - Parse, validate, and normalize e-reader clippings exports
//!
//! Usage:
//!   clippings [OPTIONS] <COMMAND> <FILE>
//!
//! Commands:
//!   parse     Show the books and clippings in an export
//!   validate  Report entries that could not be parsed
//!   stats     Show export statistics
//!   render    Re-emit the export in canonical form

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Args, Parser as ClapParser, Subcommand};
use clippings_core::{
    encode, render_export, sort_by_book, BookClippings, ClippingContent, ClippingKind, LabelStyle,
    Location, LocationKind, ParseError, ParseOutput, Parser,
};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(ClapParser, Debug)]
#[command(name = "clippings", version, about = "E-reader clippings parser and validator")]
struct Cli {
    /// Show every clipping and debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the books and clippings in an export
    Parse(ParseArgs),
    /// Report entries that could not be parsed
    Validate(InputArgs),
    /// Show export statistics
    Stats(InputArgs),
    /// Re-emit the export in canonical form
    Render(InputArgs),
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Clippings export file
    file: PathBuf,

    /// Output in JSON format
    #[arg(short, long)]
    json: bool,

    /// Order books by author and title
    #[arg(long)]
    sort: bool,

    /// Fail on the first malformed entry instead of skipping it
    #[arg(long)]
    strict: bool,
}

#[derive(Args, Debug)]
struct ParseArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Indent JSON output
    #[arg(long)]
    pretty: bool,

    /// Tag clippings as ClippingHighlight, ClippingNote, ...
    #[arg(long)]
    legacy_labels: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("error: {:#}", e);
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Command::Parse(args) => cmd_parse(args, cli.verbose),
        Command::Validate(args) => cmd_validate(args),
        Command::Stats(args) => cmd_stats(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn load(args: &InputArgs) -> Result<(Vec<u8>, ParseOutput)> {
    let bytes = read_input(&args.file)?;
    let parser = Parser::new().with_recovery(!args.strict);

    let mut output = parser
        .parse_bytes(&bytes)
        .with_context(|| format!("failed to parse '{}'", args.file.display()))?;

    if args.sort {
        sort_by_book(&mut output.books);
    }

    debug!(
        books = output.books.len(),
        clippings = output.clipping_count(),
        skipped = output.errors.len(),
        "loaded export"
    );
    Ok((bytes, output))
}

fn read_input(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("failed to read '{}'", path.display()))
}

// =============================================================================
// Parse Command
// =============================================================================

fn cmd_parse(args: &ParseArgs, verbose: bool) -> Result<()> {
    let (_, output) = load(&args.input)?;

    for error in output.errors.iter() {
        eprintln!("warning: {}", error);
    }

    if args.input.json {
        let style = if args.legacy_labels {
            LabelStyle::Prefixed
        } else {
            LabelStyle::Bare
        };
        println!("{}", encode::to_json(&output.books, style, args.pretty)?);
    } else if verbose {
        print_books_verbose(&output.books);
    } else {
        print_books_summary(&output.books);
    }

    Ok(())
}

// =============================================================================
// Validate Command
// =============================================================================

#[derive(Serialize)]
struct JsonDiagnostic<'a> {
    entry: usize,
    line: Option<usize>,
    kind: String,
    message: &'a str,
    span: Option<JsonSpan>,
}

#[derive(Serialize)]
struct JsonSpan {
    start: usize,
    end: usize,
}

fn cmd_validate(args: &InputArgs) -> Result<()> {
    let (bytes, output) = load(args)?;
    let text = String::from_utf8_lossy(&bytes);
    let line_of = |e: &ParseError| e.span.map(|s| s.line_number(&text));

    if args.json {
        let errors: Vec<_> = output
            .errors
            .iter()
            .map(|e| JsonDiagnostic {
                entry: e.entry,
                line: line_of(e),
                kind: format!("{:?}", e.kind),
                message: &e.message,
                span: e.span.map(|s| JsonSpan {
                    start: s.start,
                    end: s.end,
                }),
            })
            .collect();
        println!(
            "{}",
            serde_json::json!({ "valid": output.is_ok(), "errors": errors })
        );
    } else if output.is_ok() {
        println!("Valid: {} clippings, no errors found", output.clipping_count());
    } else {
        eprintln!("Invalid: {} malformed entries", output.errors.len());
        for error in output.errors.iter() {
            match line_of(error) {
                Some(line) => eprintln!("  - line {}: {}", line, error),
                None => eprintln!("  - {}", error),
            }
        }
    }

    if output.is_ok() {
        Ok(())
    } else {
        anyhow::bail!("{} malformed entries", output.errors.len())
    }
}

// =============================================================================
// Stats Command
// =============================================================================

#[derive(Serialize)]
struct ExportStats {
    books: usize,
    clippings: usize,
    highlights: usize,
    notes: usize,
    bookmarks: usize,
    article_clips: usize,
    skipped: usize,
    bytes: usize,
    lines: usize,
}

impl ExportStats {
    fn from_output(output: &ParseOutput, input: &[u8]) -> Self {
        Self {
            books: output.books.len(),
            clippings: output.clipping_count(),
            highlights: output.count(ClippingKind::Highlight),
            notes: output.count(ClippingKind::Note),
            bookmarks: output.count(ClippingKind::Bookmark),
            article_clips: output.count(ClippingKind::ArticleClip),
            skipped: output.errors.len(),
            bytes: input.len(),
            lines: input.iter().filter(|&&b| b == b'\n').count(),
        }
    }
}

fn cmd_stats(args: &InputArgs) -> Result<()> {
    let (bytes, output) = load(args)?;
    let stats = ExportStats::from_output(&output, &bytes);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("Export Statistics");
    println!("-----------------");
    println!("Books:          {}", stats.books);
    println!("Clippings:      {}", stats.clippings);
    println!("  Highlights:     {}", stats.highlights);
    println!("  Notes:          {}", stats.notes);
    println!("  Bookmarks:      {}", stats.bookmarks);
    println!("  Article clips:  {}", stats.article_clips);
    println!();
    println!("Size:");
    println!("  Bytes:          {}", stats.bytes);
    println!("  Lines:          {}", stats.lines);
    println!();
    println!("Skipped:        {}", stats.skipped);

    Ok(())
}

// =============================================================================
// Render Command
// =============================================================================

fn cmd_render(args: &InputArgs) -> Result<()> {
    let (_, output) = load(args)?;

    for error in output.errors.iter() {
        eprintln!("warning: dropped {}", error);
    }

    print!("{}", render_export(&output.books));
    Ok(())
}

// =============================================================================
// Text Output
// =============================================================================

fn print_books_summary(books: &[BookClippings]) {
    println!("Books: {}", books.len());
    for (i, book) in books.iter().enumerate() {
        println!(
            "  [{}] {} ({} clippings)",
            i + 1,
            describe_book(book),
            book.clippings.len()
        );
    }
}

fn print_books_verbose(books: &[BookClippings]) {
    for (i, book) in books.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("=== {} ===", describe_book(book));
        for (j, clipping) in book.clippings.iter().enumerate() {
            println!("[{}] {}", j + 1, describe_clipping(clipping));
            if let Some(text) = clipping.text() {
                let preview: String = text.chars().take(72).collect();
                let ellipsis = if text.chars().count() > 72 { "..." } else { "" };
                println!("    {}{}", preview.replace('\n', "\\n"), ellipsis);
            }
        }
    }
}

fn describe_book(book: &BookClippings) -> String {
    if book.book.has_author() {
        format!("{} by {}", book.book.title, book.book.author)
    } else {
        book.book.title.clone()
    }
}

fn describe_clipping(clipping: &ClippingContent) -> String {
    format!(
        "{} at {}",
        clipping.kind().label(LabelStyle::Bare),
        format_location(clipping.location())
    )
}

fn format_location(location: &Location) -> String {
    let scheme = match location.kind {
        LocationKind::Page => "page",
        LocationKind::Location => "location",
    };
    match location.to {
        Some(to) => format!("{} {}-{}", scheme, location.from, to),
        None => format!("{} {}", scheme, location.from),
    }
}
