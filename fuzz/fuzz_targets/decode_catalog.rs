#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: full decoder entry point.
//
// Calls `decode_bytes(data)` on arbitrary input bytes. Nearly every input
// fails the header sniff; see decode_payload for a target that gets past
// it.
fuzz_target!(|data: &[u8]| {
    let _ = amc_decoder::decode_bytes(data.to_vec(), amc_decoder::DecoderConfig::default());
});
