#![no_main]

use libfuzzer_sys::fuzz_target;
use amc_wire::{CursorReader, MemorySource, WireError};

// Fuzz target: CursorReader primitive reads.
//
// Input format:
//   byte 0: op selector stream seed
//   bytes 1..: the stream the reader walks
//
// Each step reads an i32, a bool or a string depending on the selector
// bits, until a read fails. Catches bugs in:
// - Length prefix handling (negative, oversized)
// - Offset bookkeeping across partial reads
fuzz_target!(|data: &[u8]| {
    let Some((&ops, stream)) = data.split_first() else {
        return;
    };

    let mut reader = CursorReader::new(MemorySource::new(stream.to_vec()))
        .with_start_offset(0)
        .with_max_string_len(1 << 16)
        .with_string_validation(ops & 0x80 != 0);

    let mut step = 0u32;
    loop {
        let before = reader.offset();
        let result = match (ops.rotate_left(step) as u32 + step) % 3 {
            0 => reader.read_i32("i32").map(|_| ()),
            1 => reader.read_bool("bool").map(|_| ()),
            _ => reader.read_string("string").map(|_| ()),
        };
        step += 1;

        match result {
            Ok(()) => assert!(reader.offset() > before),
            Err(WireError::Io(e)) => panic!("memory source raised I/O error: {e}"),
            Err(_) => break,
        }
        assert!(reader.offset() <= stream.len() as u64);
    }
});
