// cli/constants.rs — Program identity and the display-level infrastructure
// shared by the binary and the library's progress messages.

use std::sync::atomic::{AtomicU32, Ordering};

pub const PROGRAM_NAME: &str = "sasm-stress";

// ── Display level global ──────────────────────────────────────────────────────
//
// 0 = no output; 1 = errors only; 2 = normal progress and warnings (default);
// 3 = resolved paths and arguments; 4 = verbose (seed, line counts).
pub const DISPLAY_LEVEL_DEFAULT: u32 = 2;
pub const DISPLAY_LEVEL_MAX: u32 = 4;

pub static DISPLAY_LEVEL: AtomicU32 = AtomicU32::new(DISPLAY_LEVEL_DEFAULT);

/// Returns the current display level.
#[inline]
pub fn display_level() -> u32 {
    DISPLAY_LEVEL.load(Ordering::Relaxed)
}

/// Sets the display level, clamped to [`DISPLAY_LEVEL_MAX`].
#[inline]
pub fn set_display_level(level: u32) {
    DISPLAY_LEVEL.store(level.min(DISPLAY_LEVEL_MAX), Ordering::Relaxed);
}

/// Default level moved up by `verbose` steps and down by `quiet` steps.
pub fn level_from_flags(verbose: u8, quiet: u8) -> u32 {
    (DISPLAY_LEVEL_DEFAULT + u32::from(verbose))
        .saturating_sub(u32::from(quiet))
        .min(DISPLAY_LEVEL_MAX)
}

// ── Display helpers ───────────────────────────────────────────────────────────
//
//   displayout!(...)      → stdout, unconditional (relayed compiler output)
//   display!(...)         → stderr, unconditional
//   displaylevel!(l, ...) → stderr when display_level() >= l

/// Print to stdout.
#[macro_export]
macro_rules! displayout {
    ($($arg:tt)*) => { print!($($arg)*) };
}

/// Print to stderr.
#[macro_export]
macro_rules! display {
    ($($arg:tt)*) => { eprint!($($arg)*) };
}

/// Conditionally print to stderr at or above `level`.
#[macro_export]
macro_rules! displaylevel {
    ($level:expr, $($arg:tt)*) => {
        if $crate::cli::constants::display_level() >= $level {
            eprint!($($arg)*);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn program_name_constant() {
        assert_eq!(PROGRAM_NAME, "sasm-stress");
    }

    #[test]
    fn flags_move_level_within_bounds() {
        assert_eq!(level_from_flags(0, 0), 2);
        assert_eq!(level_from_flags(1, 0), 3);
        assert_eq!(level_from_flags(9, 0), DISPLAY_LEVEL_MAX);
        assert_eq!(level_from_flags(0, 1), 1);
        assert_eq!(level_from_flags(0, 5), 0);
        assert_eq!(level_from_flags(2, 1), 3);
    }

    #[test]
    fn display_level_setter_clamps() {
        // Other tests may read this global; restore it afterwards.
        let prev = display_level();
        set_display_level(9);
        assert_eq!(display_level(), DISPLAY_LEVEL_MAX);
        set_display_level(prev);
    }
}
