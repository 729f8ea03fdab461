// sasm-stress — synthetic-corpus generator and front-end benchmark harness
// for the StartASM compiler.

pub mod config;
pub mod error;
pub mod grammar;
pub mod synth;
pub mod corpus;
pub mod scratch;
pub mod driver;
pub mod harness;
pub mod cli;

// ── Top-level re-exports ──────────────────────────────────────────────────────
pub use corpus::Corpus;
pub use driver::{BenchOutput, Invocation};
pub use error::HarnessError;
pub use grammar::InstructionLine;
pub use harness::{HarnessConfig, RunReport};
pub use scratch::{remove_scratch_file, CleanupOutcome, ScratchFile};
pub use synth::Synthesizer;
