#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: AmcHeader::read_from with arbitrary bytes.
//
// Catches bugs in:
// - Signature validation
// - Version digit parsing (multi-byte chars, missing dot)
// - Header text cutting at null or 64 chars
fuzz_target!(|data: &[u8]| {
    let _ = amc_wire::AmcHeader::read_from(data);
});
