//! Command-line argument parsing for `sasm-stress`.
//!
//! The only required argument is the corpus size. Everything else has a
//! default derived from the harness's own location, so a bare
//! `sasm-stress 50000` reproduces the classic layout: corpus at
//! `<harness dir>/StressTest.sasm`, compiler at `<harness dir>/../startasm`.
//!
//! [`parse_args_from`] takes an explicit argument list so the parser can be
//! unit-tested without touching `std::env`.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use clap::{ArgAction, Parser};

use crate::config::MIN_LINES;
use crate::driver::{default_anchor, default_compiler_path, resolve_against};
use crate::harness::HarnessConfig;

use super::constants::level_from_flags;

#[derive(Parser, Debug)]
#[command(name = "sasm-stress")]
#[command(version)]
#[command(about = "Generate and run a StartASM front-end stress test", long_about = None)]
pub struct Cli {
    /// Number of lines to include in the stress test file (at least 2)
    #[arg(value_name = "NUM_LINES", value_parser = parse_num_lines)]
    pub num_lines: u64,

    /// Anchor directory for relative paths and the compiler's working directory
    /// [default: directory of this executable]
    #[arg(long = "base-dir", value_name = "DIR")]
    pub base_dir: Option<PathBuf>,

    /// Compiler executable [default: <base-dir>/../startasm]
    #[arg(long = "compiler", value_name = "PATH")]
    pub compiler: Option<PathBuf>,

    /// Scratch corpus file [default: <base-dir>/StressTest.sasm]
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Seed the generator for a reproducible corpus
    #[arg(long = "seed", value_name = "SEED")]
    pub seed: Option<u64>,

    /// Kill the compiler if it runs longer than this many seconds
    #[arg(long = "timeout", value_name = "SECS", value_parser = parse_timeout)]
    pub timeout: Option<Duration>,

    /// Only write the corpus (kept on disk); do not run the compiler
    #[arg(long = "generate-only")]
    pub generate_only: bool,

    /// Keep the scratch corpus after the benchmark
    #[arg(long = "keep", conflicts_with = "generate_only")]
    pub keep: bool,

    /// More progress output (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    /// Less progress output (repeatable)
    #[arg(short = 'q', long = "quiet", action = ArgAction::Count)]
    pub quiet: u8,
}

impl Cli {
    pub fn display_level(&self) -> u32 {
        level_from_flags(self.verbose, self.quiet)
    }

    /// Resolve every path and build the library configuration.
    ///
    /// The base directory is made absolute against the current working
    /// directory, and compiler / output paths are made absolute against it.
    pub fn to_config(&self) -> anyhow::Result<HarnessConfig> {
        let base_dir = match &self.base_dir {
            Some(dir) => absolute(dir)?,
            None => default_anchor().context("cannot locate the harness executable")?,
        };
        let compiler = match &self.compiler {
            Some(p) => resolve_against(&base_dir, p),
            None => default_compiler_path(&base_dir),
        };

        let mut config = HarnessConfig::new(self.num_lines, base_dir.clone())
            .with_compiler(compiler)
            .with_seed(self.seed)
            .with_timeout(self.timeout)
            .with_keep_scratch(self.keep);
        if let Some(output) = &self.output {
            config = config.with_scratch_path(resolve_against(&base_dir, output));
        }
        Ok(config)
    }
}

fn absolute(path: &Path) -> anyhow::Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("cannot read the current directory")?;
    Ok(cwd.join(path))
}

/// Positional size: an integer no smaller than [`MIN_LINES`].
fn parse_num_lines(s: &str) -> Result<u64, String> {
    let n: u64 = s
        .trim()
        .parse()
        .map_err(|_| format!("`{}` is not a non-negative integer", s))?;
    if n < MIN_LINES {
        return Err(format!(
            "corpus needs at least {} lines (header and terminator), got {}",
            MIN_LINES, n
        ));
    }
    Ok(n)
}

/// Positive number of seconds, fractions allowed.
fn parse_timeout(s: &str) -> Result<Duration, String> {
    let secs: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("`{}` is not a number of seconds", s))?;
    if !(secs > 0.0) {
        return Err(format!("timeout must be positive, got {}", s));
    }
    Duration::try_from_secs_f64(secs).map_err(|e| format!("invalid timeout `{}`: {}", s, e))
}

/// Parse `std::env::args_os()`, exiting with clap's usage message on error.
pub fn parse_args() -> Cli {
    Cli::parse()
}

/// Parse an explicit argument list; `argv[0]` is the program name.
pub fn parse_args_from<I, T>(argv: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Cli::try_parse_from(argv)
}
