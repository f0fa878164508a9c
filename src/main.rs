//! apidoc: structured documentation for declared types.
//!
//! Supports two modes:
//!
//! - **stdin mode**: `apidoc < comment.txt` prints one parsed doc comment as JSON
//! - **file mode**: `apidoc -f html -o api.html decls/*.json`, where each file
//!   is the JSON output of a declaration extractor

use anyhow::{Context, Result};
use apidoc::{logger, parser, registry::Registry, render};
use clap::Parser;
use std::fs;
use std::io::{self, Read, Write};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::thread;
use tracing::{debug, info, warn};

#[derive(Parser)]
#[command(
    name = "apidoc",
    about = "Parse type documentation comments and export them as JSON or a static viewer"
)]
struct Cli {
    /// Declaration files (glob patterns and directories supported).
    /// If omitted, reads a single doc comment from stdin.
    files: Vec<String>,

    /// Output path. '-' writes to stdout; a directory receives apidoc.<ext>
    #[arg(short = 'o', long, default_value = "-")]
    output: PathBuf,

    /// Output format: html (default), json, js
    #[arg(short = 'f', long, default_value = "html")]
    format: String,

    /// Type the viewer opens first (qualified name)
    #[arg(short = 't', long = "type")]
    start_type: Option<String>,

    /// Worker threads for doc parsing [default: available parallelism]
    #[arg(short = 'j', long)]
    jobs: Option<NonZeroUsize>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Errors only
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Disable colored log output
    #[arg(long)]
    no_color: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init_logger(cli.verbose, cli.quiet, cli.no_color);

    if cli.files.is_empty() {
        return stdin_mode();
    }

    file_mode(&cli)
}

/// stdin mode: parse one raw doc comment, print its Document as JSON.
fn stdin_mode() -> Result<()> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;

    let doc = parser::parse(&input);
    let mut out = serde_json::to_string_pretty(&doc).context("failed to serialize document")?;
    out.push('\n');
    io::stdout()
        .write_all(out.as_bytes())
        .context("failed to write stdout")
}

/// file mode: load declarations, parse every doc string, render one artifact.
fn file_mode(cli: &Cli) -> Result<()> {
    let renderer = render::create_renderer(&cli.format)?;
    debug!(
        output = %cli.output.display(),
        format = %cli.format,
        start_type = ?cli.start_type,
        files = ?cli.files,
        "flags"
    );

    let input_files = expand_globs(&cli.files)?;

    let mut declared = Vec::new();
    for path in &input_files {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        match parser::parse_file(path, &content) {
            Ok(types) => {
                debug!(file = %path.display(), types = types.len(), "loaded declarations");
                declared.extend(types);
            }
            Err(e) => {
                warn!("skipping input: {:#}", e);
            }
        }
    }

    let jobs = cli
        .jobs
        .unwrap_or_else(|| thread::available_parallelism().unwrap_or(NonZeroUsize::MIN));
    let registry = Registry::build(declared, jobs);
    info!("Found {} types.", registry.len());

    if let Some(name) = cli.start_type.as_deref() {
        if registry.get(name).is_none() {
            warn!("start type {} is not among the documented types", name);
        }
    }

    let rendered = renderer.render(&registry, cli.start_type.as_deref())?;
    write_output(&cli.output, &rendered, renderer.file_extension())
}

fn write_output(output: &Path, content: &str, ext: &str) -> Result<()> {
    if output == Path::new("-") {
        return io::stdout()
            .write_all(content.as_bytes())
            .context("failed to write stdout");
    }

    let path = output_path(output, ext);
    fs::write(&path, content).with_context(|| format!("failed to write {}", path.display()))?;
    info!("Wrote {}", path.display());
    Ok(())
}

/// An existing directory gets `apidoc.<ext>` inside it; anything else is
/// used as the file path.
fn output_path(output: &Path, ext: &str) -> PathBuf {
    if output.is_dir() {
        output.join(format!("apidoc.{}", ext))
    } else {
        output.to_path_buf()
    }
}

/// File extensions recognized as declaration files.
const SUPPORTED_EXTENSIONS: &[&str] = &["json"];

/// Expand glob patterns into a list of real file paths.
/// Also handles bare directory paths by scanning for declaration files.
fn expand_globs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        // Directories are scanned non-recursively
        if path.is_dir() {
            let entries = fs::read_dir(path)
                .with_context(|| format!("failed to read directory: {}", path.display()))?;
            for entry in entries.flatten() {
                let p = entry.path();
                let supported = p
                    .extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext));
                if p.is_file() && supported {
                    files.push(p);
                }
            }
            continue;
        }
        let matches: Vec<_> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            warn!("no files matched: {}", pattern);
        }
        files.extend(matches);
    }
    // Sort for deterministic output
    files.sort();
    files.dedup();
    Ok(files)
}
