//! Command-line interface for the `sasm-stress` binary.
//!
//! | Submodule     | Responsibility |
//! |---------------|---------------|
//! | [`constants`] | Program name, the `DISPLAY_LEVEL` atomic and the `display*` macros. |
//! | [`args`]      | `Cli` (clap derive), value validation, and conversion into a `HarnessConfig`. |
//!
//! Typical call sequence: `parse_args` → `set_display_level` → `Cli::to_config`
//! → `harness::run` or `harness::generate`.

pub mod constants;
pub mod args;
