//! # Memory Bus Abstraction
//!
//! This module provides the `MemoryBus` trait that decouples the CPU from specific
//! memory implementations, plus the two backends the emulator ships with:
//!
//! - [`FlatMemory`]: a plain 64KB array owned by one CPU (tests, tools)
//! - [`SharedMemory`]: a 64KB array of atomic cells whose handle can be cloned
//!   into other threads, so a presentation actor can read the framebuffer and
//!   inject key codes while the execution loop runs
//!
//! It also owns the textual memory image format (`AAAA:HH HH ...`) that the
//! assembler emits and [`load_listing`] consumes.
//!
//! ## Design Principles
//!
//! The MemoryBus trait follows 6502 hardware behavior:
//! - No bus errors - reads/writes always succeed
//! - Addresses are 16 bits, so the address space wraps and never grows
//! - All multi-byte values are little-endian

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

/// Size of the 6502 address space in bytes.
pub const MEMORY_SIZE: usize = 0x10000;

/// Bytes per row in listings and memory dumps.
pub const ROW_BYTES: usize = 16;

/// Memory bus trait for CPU to read/write bytes.
///
/// # Design
///
/// - `read(&self)`: Immutable reference allows shared reads
/// - `write(&mut self)`: Mutable reference makes side effects explicit
/// - No error types: 6502 hardware has no bus error mechanism
///
/// # Examples
///
/// ```
/// use sim6502::{MemoryBus, FlatMemory};
///
/// let mut mem = FlatMemory::new();
/// mem.write(0x1234, 0x42);
/// assert_eq!(mem.read(0x1234), 0x42);
/// ```
pub trait MemoryBus {
    /// Reads a byte from the specified 16-bit address.
    fn read(&self, addr: u16) -> u8;

    /// Writes a byte to the specified 16-bit address.
    fn write(&mut self, addr: u16, value: u8);

    /// Reads a little-endian word (low byte at `addr`, high byte at `addr + 1`).
    fn read_word(&self, addr: u16) -> u16 {
        let lo = self.read(addr) as u16;
        let hi = self.read(addr.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }

    /// Writes `bytes` sequentially starting at `base`, wrapping at 0xFFFF.
    ///
    /// Every byte goes through [`MemoryBus::write`], so memory-mapped hooks fire.
    fn load(&mut self, base: u16, bytes: &[u8]) {
        let mut addr = base;
        for &byte in bytes {
            self.write(addr, byte);
            addr = addr.wrapping_add(1);
        }
    }
}

/// Simple 64KB flat memory implementation.
///
/// All addresses (0x0000-0xFFFF) are writable RAM initialized to 0x00.
///
/// # Examples
///
/// ```
/// use sim6502::{Cpu, FlatMemory, MemoryBus};
///
/// let mut memory = FlatMemory::new();
/// memory.write(0x0600, 0xEA); // NOP
///
/// let cpu = Cpu::new(memory);
/// assert_eq!(cpu.pc(), 0x0600);
/// ```
pub struct FlatMemory {
    data: Box<[u8; MEMORY_SIZE]>,
}

impl FlatMemory {
    /// Creates a new FlatMemory instance with all bytes initialized to zero.
    pub fn new() -> Self {
        Self {
            data: Box::new([0; MEMORY_SIZE]),
        }
    }
}

impl Default for FlatMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBus for FlatMemory {
    fn read(&self, addr: u16) -> u8 {
        self.data[addr as usize]
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.data[addr as usize] = value;
    }
}

/// 64KB memory whose cells can be observed from other threads.
///
/// Cloning a `SharedMemory` clones the handle, not the contents: every clone
/// sees the same 65536 cells. Cells are individual `AtomicU8`s accessed with
/// relaxed ordering, so a reader may observe a partially updated frame but
/// never a torn byte.
///
/// # Examples
///
/// ```
/// use sim6502::{MemoryBus, SharedMemory};
///
/// let mut mem = SharedMemory::new();
/// let observer = mem.clone();
///
/// mem.write(0x0200, 0x07);
/// assert_eq!(observer.read(0x0200), 0x07);
/// ```
#[derive(Clone)]
pub struct SharedMemory {
    cells: Arc<[AtomicU8]>,
}

impl SharedMemory {
    /// Creates a zero-initialized shared address space.
    pub fn new() -> Self {
        let cells: Vec<AtomicU8> = (0..MEMORY_SIZE).map(|_| AtomicU8::new(0)).collect();
        Self {
            cells: cells.into(),
        }
    }

    /// Stores a byte without requiring a mutable handle.
    ///
    /// Used by actors outside the execution loop, e.g. to latch a key code.
    pub fn store(&self, addr: u16, value: u8) {
        self.cells[addr as usize].store(value, Ordering::Relaxed);
    }

    /// Copies `len` bytes starting at `from` into a vector.
    pub fn snapshot(&self, from: u16, len: usize) -> Vec<u8> {
        (0..len)
            .map(|i| self.read(from.wrapping_add(i as u16)))
            .collect()
    }
}

impl Default for SharedMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBus for SharedMemory {
    fn read(&self, addr: u16) -> u8 {
        self.cells[addr as usize].load(Ordering::Relaxed)
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.store(addr, value);
    }
}

/// Error returned when a memory image line cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadError {
    /// Line number in the image (1-indexed)
    pub line: usize,

    /// Human-readable error message
    pub message: String,
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "memory image line {}: {}", self.line, self.message)
    }
}

impl std::error::Error for LoadError {}

/// Loads a memory image in `AAAA:HH HH HH ...` form.
///
/// Each line names a hex base address followed by a colon and space-separated
/// hex bytes, which are written sequentially from that address. Blank lines are
/// skipped. Returns the total number of bytes written.
///
/// # Examples
///
/// ```
/// use sim6502::{load_listing, FlatMemory, MemoryBus};
///
/// let mut mem = FlatMemory::new();
/// let written = load_listing(&mut mem, &["0600: a9 05 00"]).unwrap();
///
/// assert_eq!(written, 3);
/// assert_eq!(mem.read(0x0600), 0xA9);
/// assert_eq!(mem.read(0x0601), 0x05);
/// ```
pub fn load_listing<M, S>(bus: &mut M, lines: &[S]) -> Result<usize, LoadError>
where
    M: MemoryBus + ?Sized,
    S: AsRef<str>,
{
    let mut written = 0;

    for (index, line) in lines.iter().enumerate() {
        let line = line.as_ref().trim();
        if line.is_empty() {
            continue;
        }

        let error = |message: String| LoadError {
            line: index + 1,
            message,
        };

        let (address, data) = line
            .split_once(':')
            .ok_or_else(|| error(format!("missing ':' after address in '{}'", line)))?;

        let mut addr = u16::from_str_radix(address.trim(), 16)
            .map_err(|e| error(format!("invalid address '{}': {}", address.trim(), e)))?;

        for hex in data.split_whitespace() {
            let byte = u8::from_str_radix(hex, 16)
                .map_err(|e| error(format!("invalid byte '{}': {}", hex, e)))?;
            bus.write(addr, byte);
            addr = addr.wrapping_add(1);
            written += 1;
        }
    }

    Ok(written)
}

/// Formats bytes as address-prefixed hex rows.
///
/// Rows break on 16-byte address boundaries; the first row is prefixed with
/// `start` even when it is not aligned. The output is accepted by
/// [`load_listing`].
pub fn format_rows<I>(start: u16, bytes: I) -> Vec<String>
where
    I: IntoIterator<Item = u8>,
{
    let mut rows = Vec::new();
    let mut row = String::new();
    let mut addr = start;

    for byte in bytes {
        if row.is_empty() || (addr as usize) % ROW_BYTES == 0 {
            if !row.is_empty() {
                rows.push(std::mem::take(&mut row));
            }
            row.push_str(&format!("{:04x}:", addr));
        }
        row.push_str(&format!(" {:02x}", byte));
        addr = addr.wrapping_add(1);
    }

    if !row.is_empty() {
        rows.push(row);
    }

    rows
}

/// Dumps `len` bytes of memory starting at `from` as hex rows.
pub fn dump<M: MemoryBus + ?Sized>(bus: &M, from: u16, len: usize) -> Vec<String> {
    format_rows(
        from,
        (0..len).map(|i| bus.read(from.wrapping_add(i as u16))),
    )
}
