// Tests for src/cli/constants.rs — display-level global and helpers.

use sasm_stress::cli::constants::{
    display_level, level_from_flags, set_display_level, DISPLAY_LEVEL_DEFAULT, DISPLAY_LEVEL_MAX,
    PROGRAM_NAME,
};

#[test]
fn defaults() {
    assert_eq!(PROGRAM_NAME, "sasm-stress");
    assert_eq!(DISPLAY_LEVEL_DEFAULT, 2);
    assert_eq!(level_from_flags(0, 0), DISPLAY_LEVEL_DEFAULT);
}

#[test]
fn set_display_level_round_trips() {
    let prev = display_level();
    set_display_level(3);
    assert_eq!(display_level(), 3);
    set_display_level(DISPLAY_LEVEL_MAX + 10);
    assert_eq!(display_level(), DISPLAY_LEVEL_MAX);
    set_display_level(prev);
}

#[test]
fn displaylevel_macro_is_usable_from_outside_the_crate() {
    let prev = display_level();
    set_display_level(0);
    // Must compile and print nothing at level 0.
    sasm_stress::displaylevel!(1, "should not appear {}\n", 1);
    set_display_level(prev);
}
