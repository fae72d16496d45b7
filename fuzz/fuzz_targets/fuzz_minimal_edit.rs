//! Fuzz target for snapshot diffing.
//!
//! The edit computed for any pair of snapshots must reproduce the second
//! one when applied to the first.

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (&str, &str)| {
    let (old, new) = input;
    let edit = goatee::minimal_edit(old, new);
    assert_eq!(edit.apply(old), new);
    assert!(edit.pos <= old.chars().count().min(new.chars().count()));
});
