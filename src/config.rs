// config.rs — Fixed constants shared by the synthesizer, the corpus writer and
// the benchmark driver.
//
// Everything that is a property of the StartASM surface grammar or of the
// compiler's command line lives here; runtime choices (paths, seed, timeout)
// live in `crate::harness::HarnessConfig`.

// First line of every corpus. Emitted verbatim.
pub const HEADER_COMMENT: &str = "comment \"This is the automatically generated stress test script to test the front-end compilation performance of the compiler\"";

// Last line of every corpus. No line break follows it.
pub const TERMINATOR: &str = "stop";

// Smallest corpus that can hold the header and the terminator.
pub const MIN_LINES: u64 = 2;

// Number of general-purpose registers, named r0..r9.
pub const REGISTER_COUNT: usize = 10;

// Inclusive upper bound of a `m<addr>` memory operand (lower bound is 0).
pub const ADDRESS_MAX: u32 = 1000;

// Compiler executable name, looked up one directory above the harness
// anchor when no explicit path is given.
pub const DEFAULT_COMPILER_NAME: &str = "startasm";

// Scratch corpus file name, placed inside the harness anchor directory
// when no explicit output path is given.
pub const DEFAULT_SCRATCH_NAME: &str = "StressTest.sasm";

// Fixed argument vector passed to the compiler: `compile <corpus> --timings`.
pub const COMPILE_SUBCOMMAND: &str = "compile";
pub const TIMINGS_FLAG: &str = "--timings";
