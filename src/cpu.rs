//! # CPU State and Execution
//!
//! This module contains the `Cpu` struct representing the 6502 processor state,
//! the addressing-mode resolver, and the single-instruction step.
//!
//! ## CPU State
//!
//! The CPU maintains:
//! - **Registers**: Accumulator (A), index registers (X, Y)
//! - **Program counter** (PC): 16-bit address of the current instruction
//! - **Stack pointer** (SP): 8-bit offset into stack page (0x0100-0x01FF)
//! - **Status flags**: N, V, -, B, D, I, Z, C packed in a [`StatusFlags`] byte
//! - **Cycle counter**: u64 monotonically increasing cycle count
//!
//! ## Program Counter Convention
//!
//! While an instruction executes, PC points at the last byte consumed so far:
//! the opcode on entry, then each operand byte as the resolver reads it
//! ([`Cpu::next_byte`] increments first, then reads). Once the handler returns,
//! [`Cpu::step`] adds one to move onto the next opcode. Handlers that jump
//! therefore store `target - 1`.

use std::fmt;

use bitflags::bitflags;
use log::{log_enabled, trace, Level};

use crate::disassembler::{decoder::decode_instruction, formatter::format_instruction};
use crate::{instructions, AddressingMode, ExecutionError, MemoryBus, OPCODE_TABLE};

/// Program counter after reset.
pub const RESET_PC: u16 = 0x0600;

/// Stack pointer after reset.
pub const RESET_SP: u8 = 0xFF;

/// Base address of the stack page.
pub const STACK_BASE: u16 = 0x0100;

bitflags! {
    /// Processor status register (NV-BDIZC).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct StatusFlags: u8 {
        const CARRY = 1 << 0;
        const ZERO = 1 << 1;
        const INTERRUPT_DISABLE = 1 << 2;
        const DECIMAL_MODE = 1 << 3;
        const BREAK = 1 << 4;
        const UNUSED = 1 << 5;
        const OVERFLOW = 1 << 6;
        const NEGATIVE = 1 << 7;
    }
}

impl StatusFlags {
    /// Flags after reset: Break and the unused bit set, everything else clear.
    pub const RESET: StatusFlags = StatusFlags::BREAK.union(StatusFlags::UNUSED);
}

/// 6502 CPU state and execution context.
///
/// The CPU owns its memory bus. It is generic over the memory implementation
/// so tests can run on [`crate::FlatMemory`] while the run loop uses a
/// [`crate::DisplayBus`] over [`crate::SharedMemory`].
///
/// # Examples
///
/// ```
/// use sim6502::{Cpu, FlatMemory, MemoryBus};
///
/// let mut memory = FlatMemory::new();
/// memory.load(0x0600, &[0xA9, 0x05]); // LDA #$05
///
/// let mut cpu = Cpu::new(memory);
/// assert_eq!(cpu.step().unwrap(), 2);
///
/// assert_eq!(cpu.a(), 0x05);
/// assert_eq!(cpu.pc(), 0x0602);
/// assert!(!cpu.flag_z());
/// assert!(!cpu.flag_n());
/// ```
pub struct Cpu<M: MemoryBus> {
    /// Accumulator register
    pub(crate) a: u8,

    /// X index register
    pub(crate) x: u8,

    /// Y index register
    pub(crate) y: u8,

    /// Program counter
    pub(crate) pc: u16,

    /// Stack pointer (0x0100 + sp gives full stack address)
    pub(crate) sp: u8,

    /// Status register
    pub(crate) flags: StatusFlags,

    /// Total CPU cycles executed
    pub(crate) cycles: u64,

    /// Set by BRK and by faults; the run loop stops when it sees it
    pub(crate) halted: bool,

    /// Memory bus implementation
    pub(crate) memory: M,
}

impl<M: MemoryBus> Cpu<M> {
    /// Creates a new CPU in the reset state with the given memory bus.
    ///
    /// - PC = 0x0600, SP = 0xFF
    /// - A, X, Y = 0
    /// - Flags = Break | Unused
    /// - Cycle counter = 0
    pub fn new(memory: M) -> Self {
        Self::with_entry(memory, RESET_PC)
    }

    /// Creates a new CPU in the reset state starting at `entry`.
    pub fn with_entry(memory: M, entry: u16) -> Self {
        let mut cpu = Self {
            a: 0,
            x: 0,
            y: 0,
            pc: entry,
            sp: RESET_SP,
            flags: StatusFlags::RESET,
            cycles: 0,
            halted: false,
            memory,
        };
        cpu.reset(entry);
        cpu
    }

    /// Restores the reset register state without touching memory.
    pub fn reset(&mut self, entry: u16) {
        self.a = 0;
        self.x = 0;
        self.y = 0;
        self.pc = entry;
        self.sp = RESET_SP;
        self.flags = StatusFlags::RESET;
        self.cycles = 0;
        self.halted = false;
    }

    /// Executes one instruction and returns the cycles it took.
    ///
    /// Fetches the opcode at PC, dispatches it through [`OPCODE_TABLE`], then
    /// advances PC by one past whatever the handler consumed.
    ///
    /// An opcode with no table entry halts the CPU and returns
    /// [`ExecutionError::IllegalOpcode`] with the PC it was fetched from.
    ///
    /// A halted CPU stays halted until [`Cpu::reset`]; stepping it does
    /// nothing and takes zero cycles.
    pub fn step(&mut self) -> Result<u8, ExecutionError> {
        if self.halted {
            return Ok(0);
        }

        let pc = self.pc;
        let opcode = self.memory.read(pc);

        let Some(entry) = OPCODE_TABLE[opcode as usize] else {
            self.halted = true;
            return Err(ExecutionError::IllegalOpcode { opcode, pc });
        };

        if log_enabled!(Level::Trace) {
            let bytes = [
                opcode,
                self.memory.read(pc.wrapping_add(1)),
                self.memory.read(pc.wrapping_add(2)),
            ];
            if let Some(instr) = decode_instruction(&bytes, pc) {
                trace!("{:04X}  {:<12} {}", pc, format_instruction(&instr), self.registers());
            }
        }

        let cycles = match instructions::execute(self, entry) {
            Ok(cycles) => cycles,
            Err(err) => {
                self.halted = true;
                return Err(err.at(opcode, pc));
            }
        };

        self.pc = self.pc.wrapping_add(1);
        self.cycles += cycles as u64;

        Ok(cycles)
    }

    /// Runs the CPU until at least `cycle_budget` cycles have elapsed or it halts.
    ///
    /// Returns the number of cycles actually consumed.
    pub fn run_for_cycles(&mut self, cycle_budget: u64) -> Result<u64, ExecutionError> {
        let start_cycles = self.cycles;
        let target_cycles = start_cycles + cycle_budget;

        while self.cycles < target_cycles && !self.halted {
            self.step()?;
        }

        Ok(self.cycles - start_cycles)
    }

    // ========== Program Counter Access ==========

    /// Increments PC, then reads the byte it points at.
    pub fn next_byte(&mut self) -> u8 {
        self.pc = self.pc.wrapping_add(1);
        self.memory.read(self.pc)
    }

    /// Reads the next two instruction bytes as a little-endian word.
    pub fn next_word(&mut self) -> u16 {
        let lo = self.next_byte() as u16;
        let hi = self.next_byte() as u16;
        (hi << 8) | lo
    }

    // ========== Stack ==========

    /// Pushes a byte onto the stack page. SP wraps from 0x00 to 0xFF.
    pub fn push(&mut self, value: u8) {
        self.memory.write(STACK_BASE | self.sp as u16, value);
        self.sp = self.sp.wrapping_sub(1);
    }

    /// Pops a byte from the stack page. SP wraps from 0xFF to 0x00.
    pub fn pop(&mut self) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        self.memory.read(STACK_BASE | self.sp as u16)
    }

    // ========== Addressing-Mode Resolver ==========

    /// Resolves the effective address for `mode`, consuming its operand bytes.
    ///
    /// Immediate and relative operands resolve to the address of the operand
    /// byte itself. Accumulator and implied modes have no address.
    pub(crate) fn operand_address(&mut self, mode: AddressingMode) -> Result<u16, ExecutionError> {
        use AddressingMode::*;

        let addr = match mode {
            Immediate | Relative => {
                self.pc = self.pc.wrapping_add(1);
                self.pc
            }
            ZeroPage => self.next_byte() as u16,
            ZeroPageX => self.next_byte().wrapping_add(self.x) as u16,
            ZeroPageY => self.next_byte().wrapping_add(self.y) as u16,
            Absolute => self.next_word(),
            AbsoluteX => self.next_word().wrapping_add(self.x as u16),
            AbsoluteY => self.next_word().wrapping_add(self.y as u16),
            Indirect => {
                let ptr = self.next_word();
                self.memory.read_word(ptr)
            }
            IndirectX => {
                let zp = self.next_byte().wrapping_add(self.x);
                self.zero_page_word(zp)
            }
            IndirectY => {
                let zp = self.next_byte();
                self.zero_page_word(zp).wrapping_add(self.y as u16)
            }
            Accumulator | Implicit => {
                return Err(ExecutionError::UnsupportedMode {
                    opcode: self.memory.read(self.pc),
                    mode,
                    pc: self.pc,
                });
            }
        };

        Ok(addr)
    }

    /// Reads the operand value for `mode`. Accumulator mode yields A.
    pub(crate) fn read_operand(&mut self, mode: AddressingMode) -> Result<u8, ExecutionError> {
        if mode == AddressingMode::Accumulator {
            return Ok(self.a);
        }

        let addr = self.operand_address(mode)?;
        Ok(self.memory.read(addr))
    }

    /// Little-endian pointer stored in zero page; the high byte wraps within page zero.
    fn zero_page_word(&self, zp: u8) -> u16 {
        let lo = self.memory.read(zp as u16) as u16;
        let hi = self.memory.read(zp.wrapping_add(1) as u16) as u16;
        (hi << 8) | lo
    }

    /// Sets Z and N from a result byte.
    pub(crate) fn set_zn(&mut self, value: u8) {
        self.flags.set(StatusFlags::ZERO, value == 0);
        self.flags.set(StatusFlags::NEGATIVE, value & 0x80 != 0);
    }

    // ========== Register Getters ==========

    /// Returns the accumulator register value.
    pub fn a(&self) -> u8 {
        self.a
    }

    /// Returns the X index register value.
    pub fn x(&self) -> u8 {
        self.x
    }

    /// Returns the Y index register value.
    pub fn y(&self) -> u8 {
        self.y
    }

    /// Returns the program counter value.
    pub fn pc(&self) -> u16 {
        self.pc
    }

    /// Returns the stack pointer value.
    ///
    /// The full stack address is 0x0100 + SP. The stack grows downward from 0x01FF.
    pub fn sp(&self) -> u8 {
        self.sp
    }

    /// Returns the status register.
    pub fn flags(&self) -> StatusFlags {
        self.flags
    }

    /// Returns the status register as a packed byte (NV-BDIZC).
    pub fn status(&self) -> u8 {
        self.flags.bits()
    }

    /// Returns the total number of CPU cycles executed since reset.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Returns true once BRK or a fault has stopped the CPU.
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    // ========== Status Flag Getters ==========

    /// Returns true if the Negative flag is set.
    pub fn flag_n(&self) -> bool {
        self.flags.contains(StatusFlags::NEGATIVE)
    }

    /// Returns true if the Overflow flag is set.
    pub fn flag_v(&self) -> bool {
        self.flags.contains(StatusFlags::OVERFLOW)
    }

    /// Returns true if the Break flag is set.
    pub fn flag_b(&self) -> bool {
        self.flags.contains(StatusFlags::BREAK)
    }

    /// Returns true if the Decimal mode flag is set.
    pub fn flag_d(&self) -> bool {
        self.flags.contains(StatusFlags::DECIMAL_MODE)
    }

    /// Returns true if the Interrupt Disable flag is set.
    pub fn flag_i(&self) -> bool {
        self.flags.contains(StatusFlags::INTERRUPT_DISABLE)
    }

    /// Returns true if the Zero flag is set.
    pub fn flag_z(&self) -> bool {
        self.flags.contains(StatusFlags::ZERO)
    }

    /// Returns true if the Carry flag is set.
    pub fn flag_c(&self) -> bool {
        self.flags.contains(StatusFlags::CARRY)
    }

    // ========== Setters ==========

    /// Sets the accumulator.
    pub fn set_a(&mut self, value: u8) {
        self.a = value;
    }

    /// Sets the X index register.
    pub fn set_x(&mut self, value: u8) {
        self.x = value;
    }

    /// Sets the Y index register.
    pub fn set_y(&mut self, value: u8) {
        self.y = value;
    }

    /// Sets the program counter.
    pub fn set_pc(&mut self, value: u16) {
        self.pc = value;
    }

    /// Sets the stack pointer (offset into page one).
    pub fn set_sp(&mut self, value: u8) {
        self.sp = value;
    }

    /// Overwrites the whole status register.
    pub fn set_status(&mut self, value: u8) {
        self.flags = StatusFlags::from_bits_retain(value);
    }

    /// Sets or clears the Negative flag.
    pub fn set_flag_n(&mut self, value: bool) {
        self.flags.set(StatusFlags::NEGATIVE, value);
    }

    /// Sets or clears the Overflow flag.
    pub fn set_flag_v(&mut self, value: bool) {
        self.flags.set(StatusFlags::OVERFLOW, value);
    }

    /// Sets or clears the Decimal mode flag.
    pub fn set_flag_d(&mut self, value: bool) {
        self.flags.set(StatusFlags::DECIMAL_MODE, value);
    }

    /// Sets or clears the Interrupt Disable flag.
    pub fn set_flag_i(&mut self, value: bool) {
        self.flags.set(StatusFlags::INTERRUPT_DISABLE, value);
    }

    /// Sets or clears the Zero flag.
    pub fn set_flag_z(&mut self, value: bool) {
        self.flags.set(StatusFlags::ZERO, value);
    }

    /// Sets or clears the Carry flag.
    pub fn set_flag_c(&mut self, value: bool) {
        self.flags.set(StatusFlags::CARRY, value);
    }

    // ========== Memory Access ==========

    /// Borrows the memory bus.
    pub fn memory(&self) -> &M {
        &self.memory
    }

    /// Mutably borrows the memory bus.
    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }

    /// Consumes the CPU, returning its memory bus.
    pub fn into_memory(self) -> M {
        self.memory
    }

    /// One-line register summary used in trace output.
    pub fn registers(&self) -> String {
        format!(
            "A={:02X} X={:02X} Y={:02X} SP={:02X} P={:08b}",
            self.a,
            self.x,
            self.y,
            self.sp,
            self.flags.bits()
        )
    }
}

/// Three-line state summary:
///
/// ```text
/// A=$00 X=$00 Y=$00
/// SP=$ff PC=$0600
/// NV-BDIZC
/// 00110000
/// ```
impl<M: MemoryBus> fmt::Display for Cpu<M> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "A=${:02x} X=${:02x} Y=${:02x}", self.a, self.x, self.y)?;
        writeln!(f, "SP=${:02x} PC=${:04x}", self.sp, self.pc)?;
        writeln!(f, "NV-BDIZC")?;
        write!(f, "{:08b}", self.flags.bits())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FlatMemory;

    #[test]
    fn test_cpu_initialization() {
        let cpu = Cpu::new(FlatMemory::new());

        assert_eq!(cpu.pc(), 0x0600);
        assert_eq!(cpu.sp(), 0xFF);
        assert_eq!(cpu.a(), 0x00);
        assert_eq!(cpu.x(), 0x00);
        assert_eq!(cpu.y(), 0x00);
        assert_eq!(cpu.cycles(), 0);

        assert!(cpu.flag_b());
        assert_eq!(cpu.status(), 0b0011_0000);
        assert!(!cpu.flag_i());
        assert!(!cpu.flag_c());
        assert!(!cpu.is_halted());
    }

    #[test]
    fn test_next_byte_and_word() {
        let mut mem = FlatMemory::new();
        mem.load(0x0600, &[0x20, 0x34, 0x12]);

        let mut cpu = Cpu::new(mem);
        assert_eq!(cpu.next_word(), 0x1234);
        assert_eq!(cpu.pc(), 0x0602);
    }

    #[test]
    fn test_push_pop_lifo() {
        let mut cpu = Cpu::new(FlatMemory::new());

        cpu.push(0x11);
        cpu.push(0x22);
        assert_eq!(cpu.sp(), 0xFD);
        assert_eq!(cpu.memory().read(0x01FF), 0x11);

        assert_eq!(cpu.pop(), 0x22);
        assert_eq!(cpu.pop(), 0x11);
        assert_eq!(cpu.sp(), 0xFF);
    }

    #[test]
    fn test_indirect_x_pointer_wraps_in_zero_page() {
        let mut mem = FlatMemory::new();
        mem.write(0x00FF, 0x34);
        mem.write(0x0000, 0x12);
        mem.load(0x0600, &[0xA1, 0xFE]); // operand byte

        let mut cpu = Cpu::new(mem);
        cpu.set_x(0x01);
        let addr = cpu.operand_address(AddressingMode::IndirectX).unwrap();
        assert_eq!(addr, 0x1234);
        assert_eq!(cpu.pc(), 0x0601);
    }

    #[test]
    fn test_indirect_y_adds_without_page_wrap() {
        let mut mem = FlatMemory::new();
        mem.write(0x0010, 0xFF);
        mem.write(0x0011, 0x02);
        mem.load(0x0600, &[0xB1, 0x10]);

        let mut cpu = Cpu::new(mem);
        cpu.set_y(0x02);
        assert_eq!(cpu.operand_address(AddressingMode::IndirectY).unwrap(), 0x0301);
    }

    #[test]
    fn test_zero_page_index_wraps() {
        let mut mem = FlatMemory::new();
        mem.load(0x0600, &[0xB5, 0xF0]);

        let mut cpu = Cpu::new(mem);
        cpu.set_x(0x20);
        assert_eq!(cpu.operand_address(AddressingMode::ZeroPageX).unwrap(), 0x0010);
    }

    #[test]
    fn test_implied_mode_has_no_address() {
        let mut cpu = Cpu::new(FlatMemory::new());
        assert_eq!(
            cpu.operand_address(AddressingMode::Implicit),
            Err(ExecutionError::UnsupportedMode {
                opcode: 0x00,
                mode: AddressingMode::Implicit,
                pc: 0x0600,
            })
        );
    }

    #[test]
    fn test_handler_fault_reports_instruction_start() {
        let err = ExecutionError::UnsupportedMode {
            opcode: 0x00,
            mode: AddressingMode::Implicit,
            pc: 0x0602,
        };

        assert_eq!(
            err.clone().at(0x4C, 0x0600),
            ExecutionError::UnsupportedMode {
                opcode: 0x4C,
                mode: AddressingMode::Implicit,
                pc: 0x0600,
            }
        );
        assert_eq!(
            err.at(0x4C, 0x0600).to_string(),
            "opcode 0x4C at $0600 has no IMP operand"
        );
    }

    #[test]
    fn test_halted_cpu_does_not_step() {
        // BRK; LDA #$42
        let mut mem = FlatMemory::new();
        mem.load(0x0600, &[0x00, 0xA9, 0x42]);

        let mut cpu = Cpu::new(mem);
        cpu.step().unwrap();
        assert!(cpu.is_halted());
        let cycles = cpu.cycles();

        assert_eq!(cpu.step(), Ok(0));
        assert_eq!(cpu.a(), 0x00);
        assert_eq!(cpu.pc(), 0x0601);
        assert_eq!(cpu.cycles(), cycles);

        cpu.reset(0x0601);
        cpu.step().unwrap();
        assert_eq!(cpu.a(), 0x42);
    }

    #[test]
    fn test_illegal_opcode_halts() {
        let mut mem = FlatMemory::new();
        mem.write(0x0600, 0x02);

        let mut cpu = Cpu::new(mem);
        assert_eq!(
            cpu.step(),
            Err(ExecutionError::IllegalOpcode { opcode: 0x02, pc: 0x0600 })
        );
        assert!(cpu.is_halted());
        assert_eq!(cpu.pc(), 0x0600);
    }

    #[test]
    fn test_state_summary() {
        let cpu = Cpu::new(FlatMemory::new());
        let summary = cpu.to_string();
        let lines: Vec<&str> = summary.lines().collect();

        assert_eq!(lines[0], "A=$00 X=$00 Y=$00");
        assert_eq!(lines[1], "SP=$ff PC=$0600");
        assert_eq!(lines[2], "NV-BDIZC");
        assert_eq!(lines[3], "00110000");
    }
}
