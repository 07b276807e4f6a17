//! Fuzzer for the `OK <x> <y>` confirmation grammar.

#![no_main]

use drover_proto::{parse_confirmation, Position};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // INVARIANT 1: never panics, whatever the bytes.
    let parsed = parse_confirmation(data);

    // INVARIANT 2: anything that parses re-formats to something that parses
    // to the same position.
    if let Ok(Position { x, y }) = parsed {
        let canonical = format!("OK {x} {y}");
        assert_eq!(
            parse_confirmation(canonical.as_bytes()),
            Ok(Position { x, y }),
            "canonical form must stay parsable"
        );
    }
});
