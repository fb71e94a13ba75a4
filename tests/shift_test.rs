//! Tests for ASL, LSR, ROL and ROR in accumulator and memory forms.

use std::cell::Cell;

use sim6502::{Cpu, FlatMemory, MemoryBus};

fn setup_cpu(program: &[u8]) -> Cpu<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.load(0x0600, program);
    Cpu::new(memory)
}

// ========== ASL ==========

#[test]
fn test_asl_accumulator() {
    let mut cpu = setup_cpu(&[0x0A]);
    cpu.set_a(0x81);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x02);
    assert!(cpu.flag_c());
    assert!(!cpu.flag_n());
    assert_eq!(cpu.pc(), 0x0601);
    assert_eq!(cpu.cycles(), 2);
}

#[test]
fn test_asl_zero_page_x() {
    let mut cpu = setup_cpu(&[0x16, 0x10]);
    cpu.memory_mut().write(0x0012, 0x40);
    cpu.set_x(0x02);

    cpu.step().unwrap();

    assert_eq!(cpu.memory().read(0x0012), 0x80);
    assert!(!cpu.flag_c());
    assert!(cpu.flag_n());
    assert_eq!(cpu.cycles(), 6);
}

// ========== LSR ==========

#[test]
fn test_lsr_accumulator_is_logical() {
    let mut cpu = setup_cpu(&[0x4A]);
    cpu.set_a(0x81);

    cpu.step().unwrap();

    // Bit 7 is filled with zero, not the old sign bit.
    assert_eq!(cpu.a(), 0x40);
    assert!(cpu.flag_c());
    assert!(!cpu.flag_n());
}

#[test]
fn test_lsr_zero_page() {
    let mut cpu = setup_cpu(&[0x46, 0x10]);
    cpu.memory_mut().write(0x0010, 0x01);

    cpu.step().unwrap();

    assert_eq!(cpu.memory().read(0x0010), 0x00);
    assert!(cpu.flag_c());
    assert!(cpu.flag_z());
    assert_eq!(cpu.cycles(), 5);
}

#[test]
fn test_lsr_absolute_leaves_accumulator() {
    let mut cpu = setup_cpu(&[0x4E, 0x00, 0x03]);
    cpu.memory_mut().write(0x0300, 0x04);
    cpu.set_a(0x77);

    cpu.step().unwrap();

    assert_eq!(cpu.memory().read(0x0300), 0x02);
    assert_eq!(cpu.a(), 0x77);
    assert!(!cpu.flag_c());
}

// ========== ROL / ROR ==========

#[test]
fn test_rol_accumulator_through_carry() {
    let mut cpu = setup_cpu(&[0x2A]);
    cpu.set_a(0x80);
    cpu.set_flag_c(true);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x01);
    assert!(cpu.flag_c());
}

#[test]
fn test_rol_absolute() {
    let mut cpu = setup_cpu(&[0x2E, 0x00, 0x03]);
    cpu.memory_mut().write(0x0300, 0x40);

    cpu.step().unwrap();

    assert_eq!(cpu.memory().read(0x0300), 0x80);
    assert!(!cpu.flag_c());
    assert!(cpu.flag_n());
}

#[test]
fn test_ror_accumulator_through_carry() {
    let mut cpu = setup_cpu(&[0x6A]);
    cpu.set_a(0x01);
    cpu.set_flag_c(true);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x80);
    assert!(cpu.flag_c());
    assert!(cpu.flag_n());
}

#[test]
fn test_ror_zero_page_to_zero() {
    let mut cpu = setup_cpu(&[0x66, 0x10]);
    cpu.memory_mut().write(0x0010, 0x01);

    cpu.step().unwrap();

    assert_eq!(cpu.memory().read(0x0010), 0x00);
    assert!(cpu.flag_c());
    assert!(cpu.flag_z());
}

// ========== Bus access pattern ==========

/// Counts reads and writes of one watched address.
struct CountingBus {
    inner: FlatMemory,
    watched: u16,
    reads: Cell<usize>,
    writes: usize,
}

impl MemoryBus for CountingBus {
    fn read(&self, addr: u16) -> u8 {
        if addr == self.watched {
            self.reads.set(self.reads.get() + 1);
        }
        self.inner.read(addr)
    }

    fn write(&mut self, addr: u16, value: u8) {
        if addr == self.watched {
            self.writes += 1;
        }
        self.inner.write(addr, value);
    }
}

fn counting_cpu(program: &[u8], watched: u16, value: u8) -> Cpu<CountingBus> {
    let mut inner = FlatMemory::new();
    inner.load(0x0600, program);
    inner.write(watched, value);
    Cpu::new(CountingBus {
        inner,
        watched,
        reads: Cell::new(0),
        writes: 0,
    })
}

#[test]
fn test_memory_shifts_read_twice_write_once() {
    // ASL $10, LSR $10, ROL $10, ROR $10
    for opcode in [0x06, 0x46, 0x26, 0x66] {
        let mut cpu = counting_cpu(&[opcode, 0x10], 0x0010, 0x81);

        cpu.step().unwrap();

        assert_eq!(cpu.memory().reads.get(), 2, "opcode {:02X}", opcode);
        assert_eq!(cpu.memory().writes, 1, "opcode {:02X}", opcode);
        assert!(cpu.flag_c(), "opcode {:02X}", opcode);
    }
}

#[test]
fn test_accumulator_shift_leaves_memory_alone() {
    let mut cpu = counting_cpu(&[0x0A], 0x0010, 0x81);
    cpu.set_a(0x01);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x02);
    assert_eq!(cpu.memory().reads.get(), 0);
    assert_eq!(cpu.memory().writes, 0);
}
