//! Fuzz target for the assembler.
//!
//! Feeds arbitrary text to the assembler to find panics in preprocessing,
//! symbol collection, operand matching and encoding.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sim6502::{assemble, disassemble};

fuzz_target!(|data: &[u8]| {
    let source = String::from_utf8_lossy(data);

    // Errors are fine; panics are not.
    if let Ok(output) = assemble(&source) {
        let total: usize = output.instructions.iter().map(|i| i.bytes.len()).sum();
        assert_eq!(total, output.bytes.len());

        // Whatever was emitted must decode back to the same length.
        let decoded: usize = disassemble(&output.bytes, output.entry_point)
            .iter()
            .map(|i| i.size_bytes as usize)
            .sum();
        assert_eq!(decoded, output.bytes.len());
    }
});
