//! One benchmark run, end to end.
//!
//! The sequence is strictly synchronous:
//!
//! 1. synthesize the corpus body ([`crate::synth`]);
//! 2. stream it to the scratch path ([`crate::scratch::ScratchFile::create`]),
//!    one line at a time, so memory use does not grow with the corpus size;
//! 3. invoke the compiler on it ([`crate::driver::Invocation::run`]);
//! 4. delete the scratch file, whatever step 3 returned.
//!
//! Steps 1 and 2 are fatal on error and nothing is launched. Step 3's result,
//! good or bad, is carried in the [`RunReport`] next to the cleanup outcome,
//! so the caller always learns both.

use std::path::PathBuf;
use std::time::Duration;

use crate::config::DEFAULT_SCRATCH_NAME;
use crate::corpus::body_len;
use crate::displaylevel;
use crate::driver::{default_compiler_path, BenchOutput, Invocation};
use crate::error::Result;
use crate::scratch::{CleanupOutcome, ScratchFile};
use crate::synth::Synthesizer;

/// Runtime parameters of a run, all explicit.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Total corpus lines, header and terminator included.
    pub num_lines: u64,
    /// Anchor directory; also the compiler's working directory.
    pub base_dir: PathBuf,
    pub compiler: PathBuf,
    pub scratch_path: PathBuf,
    /// Fixed seed; a fresh random one is drawn when `None`.
    pub seed: Option<u64>,
    pub timeout: Option<Duration>,
    /// Leave the scratch file on disk after the run.
    pub keep_scratch: bool,
}

impl HarnessConfig {
    /// Defaults: compiler at `<base>/../startasm`, corpus at
    /// `<base>/StressTest.sasm`, random seed, no timeout.
    pub fn new(num_lines: u64, base_dir: impl Into<PathBuf>) -> Self {
        let base_dir = base_dir.into();
        HarnessConfig {
            num_lines,
            compiler: default_compiler_path(&base_dir),
            scratch_path: base_dir.join(DEFAULT_SCRATCH_NAME),
            base_dir,
            seed: None,
            timeout: None,
            keep_scratch: false,
        }
    }

    pub fn with_compiler(mut self, compiler: impl Into<PathBuf>) -> Self {
        self.compiler = compiler.into();
        self
    }

    pub fn with_scratch_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.scratch_path = path.into();
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_keep_scratch(mut self, keep: bool) -> Self {
        self.keep_scratch = keep;
        self
    }
}

/// What happened during a run that got as far as launching the compiler.
#[derive(Debug)]
pub struct RunReport {
    pub corpus_path: PathBuf,
    pub line_count: u64,
    pub seed: u64,
    /// Captured compiler output, or the launch/timeout error.
    pub result: Result<BenchOutput>,
    /// `None` when the scratch file was kept on purpose.
    pub cleanup: Option<CleanupOutcome>,
}

/// A corpus left on disk by [`generate`].
#[derive(Debug, Clone)]
pub struct GeneratedCorpus {
    pub path: PathBuf,
    pub line_count: u64,
    pub seed: u64,
}

/// Synthesize a corpus of `config.num_lines` lines straight into the scratch
/// file. Returns the file's owner and the seed that produced it.
fn write_scratch(config: &HarnessConfig) -> Result<(ScratchFile, u64)> {
    let body = body_len(config.num_lines)?;
    let seed = config.seed.unwrap_or_else(rand::random);
    displaylevel!(4, "Synthesizing {} lines (seed {})\n", config.num_lines, seed);
    let mut synth = Synthesizer::from_seed(seed);
    let scratch = ScratchFile::create(&config.scratch_path, synth.lines(body))?;
    Ok((scratch, seed))
}

/// Write the corpus and leave it in place; no compiler is involved.
pub fn generate(config: &HarnessConfig) -> Result<GeneratedCorpus> {
    let (scratch, seed) = write_scratch(config)?;
    let path = scratch.keep();
    displaylevel!(3, "Corpus written to {}\n", path.display());
    Ok(GeneratedCorpus {
        path,
        line_count: config.num_lines,
        seed,
    })
}

/// Synthesize, write, benchmark and clean up.
///
/// Returns `Err` only for failures before the compiler is launched
/// ([`crate::error::HarnessError::InvalidLineCount`],
/// [`crate::error::HarnessError::CorpusWrite`]).
pub fn run(config: &HarnessConfig) -> Result<RunReport> {
    displaylevel!(2, "Preparing test unit\n");
    let (scratch, seed) = write_scratch(config)?;
    let corpus_path = scratch.path().to_path_buf();

    displaylevel!(2, "Starting benchmark\n");
    let invocation = Invocation::compile(&config.compiler, &corpus_path)
        .current_dir(&config.base_dir)
        .timeout(config.timeout);
    display_invocation(&invocation);

    let result = invocation.run();

    let cleanup = if config.keep_scratch {
        let kept = scratch.keep();
        displaylevel!(3, "Keeping stress test file {}\n", kept.display());
        None
    } else {
        Some(scratch.remove())
    };

    Ok(RunReport {
        corpus_path,
        line_count: config.num_lines,
        seed,
        result,
        cleanup,
    })
}

fn display_invocation(invocation: &Invocation) {
    displaylevel!(3, "Compiler : {}\n", invocation.executable().display());
    let args: Vec<String> = invocation
        .args()
        .iter()
        .map(|a| a.to_string_lossy().into_owned())
        .collect();
    displaylevel!(3, "Arguments : {}\n", args.join(" "));
}
