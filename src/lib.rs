//! # 6502 Emulator and Assembler
//!
//! A MOS 6502 emulator with a memory-mapped 32x32 display, paired with a
//! two-pass assembler that turns 6502 assembly text into a loadable memory
//! image.
//!
//! ## Quick Start
//!
//! ```rust
//! use sim6502::{assemble, Cpu, FlatMemory, MemoryBus};
//!
//! let output = assemble("LDA #$05\nSTA $0200\nBRK").unwrap();
//! assert_eq!(output.entry_point, 0x0600);
//!
//! let mut memory = FlatMemory::new();
//! memory.load(output.entry_point, &output.bytes);
//!
//! let mut cpu = Cpu::new(memory);
//! while !cpu.is_halted() {
//!     cpu.step().unwrap();
//! }
//!
//! assert_eq!(cpu.a(), 0x05);
//! assert_eq!(cpu.memory().read(0x0200), 0x05);
//! ```
//!
//! ## Memory Map
//!
//! - `0x00FE`: random byte, refreshed every clock tick by the run loop
//! - `0x00FF`: last key code written by the presentation side
//! - `0x0100-0x01FF`: stack
//! - `0x0200-0x05FF`: 32x32 framebuffer, one palette index per pixel
//! - `0x0600`: default program entry point
//!
//! ## Modules
//!
//! - `cpu` - CPU state, addressing-mode resolver and single step
//! - `memory` - MemoryBus trait, flat and shared backends, memory image I/O
//! - `display` - framebuffer write notifications and palette
//! - `opcodes` - opcode table shared by the CPU and the disassembler
//! - `runner` - threaded, rate-limited execution loop
//! - `assembler` - source text to bytes
//! - `disassembler` - bytes to source text
//! - `config` - emulator settings

pub mod addressing;
pub mod assembler;
pub mod config;
pub mod cpu;
pub mod disassembler;
pub mod display;
pub mod memory;
pub mod opcodes;
pub mod runner;

// Internal instruction implementations (not part of public API)
mod instructions;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export public API
pub use addressing::AddressingMode;
pub use assembler::{assemble, assemble_lines, AssemblerError, AssemblerOutput, ErrorType};
pub use config::EmulatorConfig;
pub use cpu::{Cpu, StatusFlags};
pub use disassembler::{disassemble, disassemble_to_text, Instruction};
pub use display::{DisplayBus, DisplaySink, Framebuffer, PixelWrite, PALETTE};
pub use memory::{dump, format_rows, load_listing, FlatMemory, LoadError, MemoryBus, SharedMemory};
pub use opcodes::{Mnemonic, Opcode, OPCODE_TABLE};
pub use runner::{RunHandle, Runner, StopReason};

/// Errors that can occur during CPU execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    /// The fetched byte has no entry in the opcode table.
    IllegalOpcode { opcode: u8, pc: u16 },

    /// The instruction at `pc` was dispatched with an addressing mode its
    /// handler cannot serve.
    UnsupportedMode {
        opcode: u8,
        mode: AddressingMode,
        pc: u16,
    },
}

impl ExecutionError {
    /// Pins the error to the instruction that raised it.
    pub(crate) fn at(self, opcode: u8, pc: u16) -> Self {
        match self {
            ExecutionError::UnsupportedMode { mode, .. } => {
                ExecutionError::UnsupportedMode { opcode, mode, pc }
            }
            other => other,
        }
    }
}

impl std::fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ExecutionError::IllegalOpcode { opcode, pc } => {
                write!(f, "illegal opcode 0x{:02X} at ${:04X}", opcode, pc)
            }
            ExecutionError::UnsupportedMode { opcode, mode, pc } => write!(
                f,
                "opcode 0x{:02X} at ${:04X} has no {} operand",
                opcode,
                pc,
                mode.tag()
            ),
        }
    }
}

impl std::error::Error for ExecutionError {}
