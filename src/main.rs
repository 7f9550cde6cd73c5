use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use streamhash::fs::{walk, Filesystem, SystemFilesystem};
use streamhash::io::{hash_file, hash_reader, DEFAULT_BUFFER_SIZE};
use streamhash::Algorithm;
use tracing::{debug, error, warn};
use tracing_subscriber::EnvFilter;

/// Print message digests of files, coreutils `*sum` style.
#[derive(Parser, Debug)]
#[command(name = "streamhash", version, about, long_about = None)]
struct Cli {
    /// Digest to compute: sha1, sha256, sha512 or md5.
    #[arg(short, long, default_value = "sha256")]
    algorithm: Algorithm,

    /// Read buffer size in bytes.
    #[arg(long, default_value_t = DEFAULT_BUFFER_SIZE)]
    buffer_size: usize,

    /// Descend into directories.
    #[arg(short, long)]
    recursive: bool,

    /// Write the report to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log progress to stderr.
    #[arg(short, long)]
    verbose: bool,

    /// Files to hash; standard input when empty.
    paths: Vec<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let fs = SystemFilesystem;
    debug!(cwd = %fs.cwd()?.display(), algorithm = %cli.algorithm, "starting");

    let mut out: Box<dyn Write> = match &cli.output {
        Some(path) => fs.sink(path)?,
        None => Box::new(io::stdout().lock()),
    };
    let failures = run(&cli, &fs, &mut out)?;
    out.flush()?;
    drop(out);

    if failures > 0 {
        std::process::exit(1);
    }
    Ok(())
}

/// Hashes every requested path, returning how many could not be read.
fn run(cli: &Cli, fs: &dyn Filesystem, out: &mut dyn Write) -> io::Result<usize> {
    if cli.paths.is_empty() {
        let digest = hash_reader(cli.algorithm, io::stdin().lock(), cli.buffer_size)?;
        writeln!(out, "{}  -", digest)?;
        return Ok(0);
    }

    let mut failures = 0;
    for path in &cli.paths {
        for file in expand(cli, fs, path, &mut failures) {
            match hash_file(fs, &file, cli.algorithm, cli.buffer_size) {
                Ok(digest) => writeln!(out, "{}  {}", digest, file.display())?,
                Err(e) => {
                    error!(path = %file.display(), "{}", e);
                    failures += 1;
                }
            }
        }
    }
    Ok(failures)
}

fn expand(cli: &Cli, fs: &dyn Filesystem, path: &Path, failures: &mut usize) -> Vec<PathBuf> {
    if !fs.is_dir(path) {
        return vec![path.to_path_buf()];
    }
    if !cli.recursive {
        warn!(path = %path.display(), "is a directory, skipping");
        return Vec::new();
    }
    let mut files = Vec::new();
    if let Err(e) = walk(fs, path, &mut files) {
        error!(path = %path.display(), "{}", e);
        *failures += 1;
    }
    files
}
