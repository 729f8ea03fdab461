//! Binary entry point for the `sasm-stress` command-line tool.
//!
//! # Control flow
//!
//! 1. [`parse_args`] reads the command line; usage errors exit 2 before any
//!    file is touched.
//! 2. The display level is set from `-v` / `-q`.
//! 3. [`run`] either writes a corpus and stops (`--generate-only`) or performs
//!    a full benchmark run, then relays what the compiler printed.
//!
//! Exit codes: 0 when the benchmark step completed (whatever the compiler's
//! own status), 1 for corpus-write, launch and timeout errors, 2 for usage
//! errors.

use sasm_stress::cli::args::{parse_args, Cli};
use sasm_stress::cli::constants::{set_display_level, PROGRAM_NAME};
use sasm_stress::error::HarnessError;
use sasm_stress::harness::{self, RunReport};
use sasm_stress::{display, displaylevel, displayout};

fn report_fatal(err: &HarnessError) -> i32 {
    displaylevel!(1, "{}: {}\n", PROGRAM_NAME, err);
    err.exit_code()
}

/// Relay a completed run: cleanup warning first, then the compiler's text.
fn report_run(report: RunReport) -> i32 {
    if let Some(warning) = report
        .cleanup
        .as_ref()
        .and_then(|outcome| outcome.warning(&report.corpus_path))
    {
        displaylevel!(2, "{}\n", warning);
    }

    match report.result {
        Ok(output) => {
            if !output.stderr.is_empty() {
                displaylevel!(1, "{}", output.stderr);
            }
            displayout!("{}", output.stdout);
            if !output.success() {
                displaylevel!(2, "warning: compiler exited with {}\n", output.status);
            }
            0
        }
        Err(err) => report_fatal(&err),
    }
}

fn run(cli: &Cli) -> anyhow::Result<i32> {
    let config = cli.to_config()?;

    if cli.generate_only {
        return Ok(match harness::generate(&config) {
            Ok(generated) => {
                displaylevel!(
                    2,
                    "Generated sample stress test at {} lines of code.\n",
                    generated.line_count
                );
                displaylevel!(
                    2,
                    "Compile {} with the --timings flag to measure front-end performance.\n",
                    generated.path.display()
                );
                0
            }
            Err(err) => report_fatal(&err),
        });
    }

    Ok(match harness::run(&config) {
        Ok(report) => report_run(report),
        Err(err) => report_fatal(&err),
    })
}

fn main() {
    let cli = parse_args();
    set_display_level(cli.display_level());

    let exit_code = match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            display!("{}: {:#}\n", PROGRAM_NAME, e);
            1
        }
    };
    std::process::exit(exit_code);
}
