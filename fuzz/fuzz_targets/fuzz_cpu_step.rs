//! Fuzz target for CPU step execution.
//!
//! Builds an arbitrary register state and memory contents, then executes a
//! few instructions with the display attached.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sim6502::{Cpu, DisplayBus, FlatMemory, Framebuffer, MemoryBus};

/// Arbitrary CPU initial state for fuzzing
#[derive(Debug, Arbitrary)]
struct FuzzCpuState {
    a: u8,
    x: u8,
    y: u8,
    sp: u8,
    status: u8,
}

/// Memory regions for fuzzing
#[derive(Debug, Arbitrary)]
struct FuzzMemory {
    /// Instruction stream at the entry point
    program: [u8; 16],
    zero_page: [u8; 256],
    stack_page: [u8; 256],
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    cpu_state: FuzzCpuState,
    memory: FuzzMemory,
    steps: u8,
}

fuzz_target!(|input: FuzzInput| {
    let mut memory = FlatMemory::new();
    memory.load(0x0000, &input.memory.zero_page);
    memory.load(0x0100, &input.memory.stack_page);
    memory.load(0x0600, &input.memory.program);

    let screen = Framebuffer::new();
    let bus = DisplayBus::new(memory).with_sink(screen.clone());
    let mut cpu = Cpu::new(bus);

    cpu.set_a(input.cpu_state.a);
    cpu.set_x(input.cpu_state.x);
    cpu.set_y(input.cpu_state.y);
    cpu.set_sp(input.cpu_state.sp);
    cpu.set_status(input.cpu_state.status);

    for _ in 0..input.steps % 32 {
        let before = cpu.cycles();
        match cpu.step() {
            Ok(cycles) => assert_eq!(cpu.cycles(), before + cycles as u64),
            Err(_) => {
                assert!(cpu.is_halted());
                break;
            }
        }
        if cpu.is_halted() {
            break;
        }
    }

    // The framebuffer mirrors memory for every pixel the program touched.
    let memory = cpu.memory();
    for y in 0..32 {
        for x in 0..32 {
            let addr = 0x0200 + (y * 32 + x) as u16;
            assert_eq!(screen.color_index(x, y), memory.read(addr) & 0x0F);
        }
    }
});
