//! WASM API for the 6502 emulator.
//!
//! Provides JavaScript-callable interfaces for assembly, CPU control, state
//! inspection, the framebuffer, and keyboard input.
//!
//! The browser drives timing itself (typically one `run_for_cycles` call per
//! animation frame), so there is no execution thread here.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use wasm_bindgen::prelude::*;

use crate::config::{KEY_CELL, RNG_CELL};
use crate::{
    assemble, disassemble_to_text, Cpu, DisplayBus, EmulatorConfig, FlatMemory, Framebuffer,
    MemoryBus,
};

/// JavaScript-compatible error wrapper
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsError {
    message: String,
}

#[wasm_bindgen]
impl JsError {
    #[wasm_bindgen(getter)]
    pub fn message(&self) -> String {
        self.message.clone()
    }
}

impl<E: std::error::Error> From<E> for JsError {
    fn from(err: E) -> Self {
        JsError {
            message: err.to_string(),
        }
    }
}

/// Result of an assembly request
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct AssemblyResult {
    success: bool,
    entry_point: u16,
    size: usize,
    listing: Vec<String>,
    error_message: Option<String>,
    error_line: Option<usize>,
}

#[wasm_bindgen]
impl AssemblyResult {
    #[wasm_bindgen(getter)]
    pub fn success(&self) -> bool {
        self.success
    }

    #[wasm_bindgen(getter)]
    pub fn entry_point(&self) -> u16 {
        self.entry_point
    }

    #[wasm_bindgen(getter)]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Hex image rows joined with newlines
    #[wasm_bindgen(getter)]
    pub fn listing(&self) -> String {
        self.listing.join("\n")
    }

    #[wasm_bindgen(getter)]
    pub fn error_message(&self) -> Option<String> {
        self.error_message.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn error_line(&self) -> Option<usize> {
        self.error_line
    }
}

/// A 6502 with the 32x32 display attached.
#[wasm_bindgen]
pub struct Emulator {
    cpu: Cpu<DisplayBus<FlatMemory>>,
    screen: Framebuffer,
    rng: StdRng,
    entry_point: u16,
}

#[wasm_bindgen]
impl Emulator {
    /// Creates an emulator whose random byte stream starts from `seed`.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u32) -> Self {
        let screen = Framebuffer::new();
        let bus = DisplayBus::new(FlatMemory::new()).with_sink(screen.clone());
        let entry_point = EmulatorConfig::default().entry_point;

        Emulator {
            cpu: Cpu::with_entry(bus, entry_point),
            screen,
            rng: StdRng::seed_from_u64(seed as u64),
            entry_point,
        }
    }

    /// Assembles `source`, loads it, and resets the CPU to its entry point.
    pub fn assemble_and_load(&mut self, source: String) -> AssemblyResult {
        match assemble(&source) {
            Ok(output) => {
                self.cpu.memory_mut().load(output.entry_point, &output.bytes);
                self.entry_point = output.entry_point;
                self.cpu.reset(output.entry_point);

                AssemblyResult {
                    success: true,
                    entry_point: output.entry_point,
                    size: output.bytes.len(),
                    listing: output.listing,
                    error_message: None,
                    error_line: None,
                }
            }
            Err(err) => AssemblyResult {
                success: false,
                entry_point: self.entry_point,
                size: 0,
                listing: Vec::new(),
                error_message: Some(err.to_string()),
                error_line: Some(err.line),
            },
        }
    }

    /// Executes one instruction.
    pub fn step(&mut self) -> Result<u8, JsError> {
        self.refresh_random();
        Ok(self.cpu.step()?)
    }

    /// Runs until `cycles` have elapsed or the program stops.
    pub fn run_for_cycles(&mut self, cycles: u32) -> Result<u32, JsError> {
        let start = self.cpu.cycles();
        while self.cpu.cycles() - start < cycles as u64 && !self.cpu.is_halted() {
            self.step()?;
        }
        Ok((self.cpu.cycles() - start) as u32)
    }

    /// Resets registers to the last loaded entry point. Memory is kept.
    pub fn reset(&mut self) {
        self.cpu.reset(self.entry_point);
    }

    #[wasm_bindgen(getter)]
    pub fn halted(&self) -> bool {
        self.cpu.is_halted()
    }

    #[wasm_bindgen(getter)]
    pub fn a(&self) -> u8 {
        self.cpu.a()
    }

    #[wasm_bindgen(getter)]
    pub fn x(&self) -> u8 {
        self.cpu.x()
    }

    #[wasm_bindgen(getter)]
    pub fn y(&self) -> u8 {
        self.cpu.y()
    }

    #[wasm_bindgen(getter)]
    pub fn pc(&self) -> u16 {
        self.cpu.pc()
    }

    #[wasm_bindgen(getter)]
    pub fn sp(&self) -> u8 {
        self.cpu.sp()
    }

    #[wasm_bindgen(getter)]
    pub fn status(&self) -> u8 {
        self.cpu.status()
    }

    // JavaScript numbers are f64
    #[wasm_bindgen(getter)]
    pub fn cycles(&self) -> f64 {
        self.cpu.cycles() as f64
    }

    /// Registers, stack pointer, PC and flag bits, one group per line.
    pub fn state_summary(&self) -> String {
        self.cpu.to_string()
    }

    /// Latches a key code into the key cell.
    pub fn press_key(&mut self, code: u8) {
        self.cpu.memory_mut().write(KEY_CELL, code);
    }

    pub fn read_memory(&self, addr: u16) -> u8 {
        self.cpu.memory().read(addr)
    }

    pub fn write_memory(&mut self, addr: u16, value: u8) {
        self.cpu.memory_mut().write(addr, value);
    }

    /// The 32x32 display as RGBA bytes, row-major.
    pub fn framebuffer(&self) -> js_sys::Uint8Array {
        js_sys::Uint8Array::from(self.screen.to_rgba().as_slice())
    }

    /// Disassembles `len` bytes starting at `addr`, one row per line.
    pub fn disassemble(&self, addr: u16, len: u16) -> String {
        let bytes: Vec<u8> = (0..len)
            .map(|i| self.cpu.memory().read(addr.wrapping_add(i)))
            .collect();
        disassemble_to_text(&bytes, addr).join("\n")
    }
}

impl Emulator {
    fn refresh_random(&mut self) {
        let value: u8 = self.rng.random();
        self.cpu.memory_mut().write(RNG_CELL, value);
    }
}
