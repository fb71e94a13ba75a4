//! Tests for register transfers, flag instructions and NOP.

use sim6502::{Cpu, FlatMemory, MemoryBus, StatusFlags};

fn setup_cpu(program: &[u8]) -> Cpu<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.load(0x0600, program);
    Cpu::new(memory)
}

// ========== Transfers ==========

#[test]
fn test_tax_tay() {
    let mut cpu = setup_cpu(&[0xAA, 0xA8]);
    cpu.set_a(0x80);

    cpu.step().unwrap();
    cpu.step().unwrap();

    assert_eq!(cpu.x(), 0x80);
    assert_eq!(cpu.y(), 0x80);
    assert!(cpu.flag_n());
}

#[test]
fn test_txa_tya_zero() {
    let mut cpu = setup_cpu(&[0x8A, 0x98]);
    cpu.set_a(0x55);
    cpu.set_y(0x01);

    cpu.step().unwrap();
    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_z());

    cpu.step().unwrap();
    assert_eq!(cpu.a(), 0x01);
    assert!(!cpu.flag_z());
}

#[test]
fn test_tsx_loads_x() {
    let mut cpu = setup_cpu(&[0xBA]);
    cpu.set_sp(0xF0);

    cpu.step().unwrap();

    assert_eq!(cpu.x(), 0xF0);
    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_n());
}

#[test]
fn test_txs_leaves_flags() {
    let mut cpu = setup_cpu(&[0x9A]);
    cpu.set_x(0x00);
    let status = cpu.status();

    cpu.step().unwrap();

    assert_eq!(cpu.sp(), 0x00);
    assert_eq!(cpu.status(), status);
}

// ========== Flag Instructions ==========

#[test]
fn test_set_and_clear_flags() {
    // SEC; SEI; SED; CLC; CLI; CLD
    let mut cpu = setup_cpu(&[0x38, 0x78, 0xF8, 0x18, 0x58, 0xD8]);

    for _ in 0..3 {
        cpu.step().unwrap();
    }
    assert!(cpu.flag_c());
    assert!(cpu.flag_i());
    assert!(cpu.flag_d());

    for _ in 0..3 {
        cpu.step().unwrap();
    }
    assert!(!cpu.flag_c());
    assert!(!cpu.flag_i());
    assert!(!cpu.flag_d());
    assert_eq!(cpu.cycles(), 12);
}

#[test]
fn test_clv() {
    let mut cpu = setup_cpu(&[0xB8]);
    cpu.set_flag_v(true);

    cpu.step().unwrap();

    assert!(!cpu.flag_v());
}

#[test]
fn test_decimal_flag_does_not_change_adc() {
    // SED; ADC #$09 with A = $09 stays binary
    let mut cpu = setup_cpu(&[0xF8, 0x69, 0x09]);
    cpu.set_a(0x09);

    cpu.step().unwrap();
    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x12);
}

// ========== NOP / Reset ==========

#[test]
fn test_nop() {
    let mut cpu = setup_cpu(&[0xEA]);
    let status = cpu.status();

    let cycles = cpu.step().unwrap();

    assert_eq!(cycles, 2);
    assert_eq!(cpu.pc(), 0x0601);
    assert_eq!(cpu.status(), status);
}

#[test]
fn test_reset_state() {
    let mut cpu = setup_cpu(&[0xE8]);
    cpu.step().unwrap();
    cpu.set_a(0x12);

    cpu.reset(0x0700);

    assert_eq!(cpu.pc(), 0x0700);
    assert_eq!(cpu.sp(), 0xFF);
    assert_eq!(cpu.a(), 0x00);
    assert_eq!(cpu.x(), 0x00);
    assert_eq!(cpu.cycles(), 0);
    assert_eq!(cpu.flags(), StatusFlags::BREAK | StatusFlags::UNUSED);
    // Memory survives a reset
    assert_eq!(cpu.memory().read(0x0600), 0xE8);
}

#[test]
fn test_state_summary() {
    let cpu = setup_cpu(&[]);

    assert_eq!(
        cpu.to_string(),
        "A=$00 X=$00 Y=$00\nSP=$ff PC=$0600\nNV-BDIZC\n00110000"
    );
}
