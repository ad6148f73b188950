//! gdcolor - print GDScript files with syntax colors
//!
//! Reads a file, colors it line by line and writes it to the terminal
//! with 24-bit colors.

use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use tracing::debug;

use gdcolor::error::{HighlightError, Result};
use gdcolor::render::write_lines;
use gdcolor::{init_tracing, GdScriptHighlighter, SyntaxHighlighter, TextBuffer, TextSource, Theme};

fn main() {
    init_tracing();
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Parsed command line
#[derive(Debug, Default)]
struct Options {
    theme: Option<PathBuf>,
    line: Option<usize>,
    file: Option<PathBuf>,
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let mut opts = Options::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            "--version" | "-V" => {
                print_version();
                return Ok(());
            }
            "--theme" | "-t" => {
                let path = iter
                    .next()
                    .ok_or_else(|| HighlightError::Message("--theme needs a file".into()))?;
                opts.theme = Some(PathBuf::from(path));
            }
            "--line" | "-l" => {
                let value = iter
                    .next()
                    .ok_or_else(|| HighlightError::Message("--line needs a number".into()))?;
                let line = value
                    .parse::<usize>()
                    .map_err(|_| HighlightError::Message(format!("invalid line number: {}", value)))?;
                opts.line = Some(line);
            }
            s if s.starts_with('-') => {
                return Err(HighlightError::Message(format!("unknown option: {}", s)));
            }
            _ => opts.file = Some(PathBuf::from(arg)),
        }
    }

    let Some(file) = opts.file else {
        print_usage();
        return Err(HighlightError::Message("no input file".into()));
    };

    let theme = match &opts.theme {
        Some(path) => Theme::from_file(path)?,
        None => Theme::load(),
    };
    let mut highlighter = GdScriptHighlighter::new(&theme);
    let buffer = TextBuffer::from_file(&file)?.with_gdscript_regions();
    debug!(file = %file.display(), lines = buffer.line_count(), highlighter = highlighter.name(), "highlighting");

    // Lines are numbered from 1 on the command line
    let lines = match opts.line {
        Some(0) => return Err(HighlightError::Message("line numbers start at 1".into())),
        Some(n) => n - 1..n,
        None => 0..buffer.line_count(),
    };

    let default = highlighter.state().font_color;
    let mut out = io::stdout().lock();
    write_lines(&mut out, &mut highlighter, &buffer, lines, default)?;
    out.flush()?;

    Ok(())
}

fn print_usage() {
    println!("gdcolor {} - GDScript syntax colorizer", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: gdcolor [OPTIONS] FILE");
    println!();
    println!("Options:");
    println!("  -t, --theme FILE  Read colors from a TOML theme file");
    println!("  -l, --line N      Print only line N (1-based)");
    println!("  -h, --help        Show this help message");
    println!("  -V, --version     Show version information");
    println!();
    println!("Without --theme, colors are read from ~/.gdcolor.toml when present.");
}

fn print_version() {
    println!("gdcolor {}", env!("CARGO_PKG_VERSION"));
}
