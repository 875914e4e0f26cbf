//! outline — render `outline:` documentation blocks as indented text.
//!
//! Reads annotated source files (or stdin), collects every outline block,
//! alpha-sorts documents and their members unless `--no-sort` is given, and
//! prints one indented block per document.

mod logging;
mod model;
mod parser;
mod render;
mod sort;
mod token;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "outline",
    about = "Render outline documentation blocks from annotated source files"
)]
struct Cli {
    /// Input files, directories or glob patterns. If omitted, reads from stdin.
    files: Vec<String>,

    /// Keep documents and their members in source order
    #[arg(long)]
    no_sort: bool,

    /// Write output to this file instead of stdout
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Indentation string for one nesting level
    #[arg(short = 'i', long, default_value = "  ")]
    indent: String,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Where documents are read from.
enum Input {
    Stdin,
    File(PathBuf),
}

impl Input {
    fn label(&self) -> String {
        match self {
            Input::Stdin => "<stdin>".to_string(),
            Input::File(path) => path.display().to_string(),
        }
    }

    fn read(&self) -> Result<String> {
        match self {
            Input::Stdin => {
                let mut buf = String::new();
                io::stdin()
                    .read_to_string(&mut buf)
                    .context("failed to read stdin")?;
                Ok(buf)
            }
            Input::File(path) => fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display())),
        }
    }

    fn load(&self) -> Result<model::Docs> {
        let content = self.read()?;
        parser::parse(&content).with_context(|| format!("failed to parse {}", self.label()))
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    let inputs = if cli.files.is_empty() {
        vec![Input::Stdin]
    } else {
        expand_globs(&cli.files)?
            .into_iter()
            .map(Input::File)
            .collect()
    };

    // A failed input is skipped; the rest are still rendered.
    let mut docs = model::Docs::new();
    let mut failed = 0;
    for input in &inputs {
        match input.load() {
            Ok(found) => {
                tracing::debug!(input = %input.label(), documents = found.len(), "parsed input");
                docs.extend(found);
            }
            Err(e) => {
                tracing::error!("{:#}", e);
                failed += 1;
            }
        }
    }

    match &cli.output {
        Some(path) => {
            let file = fs::File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            write_docs(&mut docs, !cli.no_sort, &cli.indent, BufWriter::new(file))?;
        }
        None => {
            let stdout = io::stdout();
            write_docs(&mut docs, !cli.no_sort, &cli.indent, BufWriter::new(stdout.lock()))?;
        }
    }

    if failed > 0 {
        anyhow::bail!("failed to process {} input(s)", failed);
    }
    Ok(())
}

/// Optionally sort `docs`, then write each rendered document followed by a
/// blank line.
fn write_docs(
    docs: &mut model::Docs,
    alpha_sort: bool,
    indent: &str,
    mut out: impl Write,
) -> Result<()> {
    if alpha_sort {
        sort::sort_collection(docs);
    }
    for doc in docs.iter() {
        tracing::debug!(
            document = %doc.name,
            examples = doc.examples().len(),
            "rendering document"
        );
        let data = render::render(doc, 0, indent)
            .with_context(|| format!("failed to render document {:?}", doc.name))?;
        out.write_all(&data)?;
        out.write_all(b"\n")?;
    }
    out.flush().context("failed to flush output")?;
    Ok(())
}

/// File extensions scanned when a directory is given.
const SUPPORTED_EXTENSIONS: &[&str] = &["go", "rs", "star", "py", "outline"];

/// Whether a directory scan should pick up `path`, judged by extension.
fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext))
}

/// Supported files directly inside `dir`.
fn scan_dir(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?;
    Ok(entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|p| p.is_file() && is_supported(p))
        .collect())
}

/// Turn command-line inputs into the files to read, sorted and deduplicated.
///
/// Each input is a file, a directory (scanned non-recursively), or a glob.
/// A plain path that does not exist is kept so that reading it reports the
/// error; a glob that matches nothing only warns.
fn expand_globs(inputs: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        let path = Path::new(input);
        if path.is_dir() {
            files.extend(scan_dir(path)?);
        } else if path.exists() || !has_glob_meta(input) {
            files.push(path.to_path_buf());
        } else {
            let before = files.len();
            let matches = glob::glob(input)
                .with_context(|| format!("invalid glob pattern: {}", input))?;
            files.extend(matches.flatten().filter(|p| p.is_file()));
            if files.len() == before {
                tracing::warn!(pattern = %input, "no files matched");
            }
        }
    }
    files.sort();
    files.dedup();
    Ok(files)
}

fn has_glob_meta(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}
