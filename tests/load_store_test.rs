//! Tests for the load and store instructions (LDA, LDX, LDY, STA, STX, STY).
//!
//! Tests cover:
//! - Every addressing mode the loads and stores support
//! - Z and N updates on loads, no flag changes on stores
//! - Zero-page index and pointer wraparound
//! - Cycle counts

use sim6502::{assemble, Cpu, FlatMemory, MemoryBus};

/// Helper function to create a CPU at the default entry point (0x0600)
fn setup_cpu() -> Cpu<FlatMemory> {
    Cpu::new(FlatMemory::new())
}

fn load_program(cpu: &mut Cpu<FlatMemory>, bytes: &[u8]) {
    cpu.memory_mut().load(0x0600, bytes);
}

// ========== LDA ==========

#[test]
fn test_lda_immediate_basic() {
    let mut cpu = setup_cpu();

    // LDA #$42
    load_program(&mut cpu, &[0xA9, 0x42]);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x42);
    assert!(!cpu.flag_z());
    assert!(!cpu.flag_n());
    assert_eq!(cpu.pc(), 0x0602);
    assert_eq!(cpu.cycles(), 2);
}

#[test]
fn test_lda_zero_flag() {
    let mut cpu = setup_cpu();
    load_program(&mut cpu, &[0xA9, 0x00]);
    cpu.set_a(0xFF);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_z());
    assert!(!cpu.flag_n());
}

#[test]
fn test_lda_negative_flag() {
    let mut cpu = setup_cpu();
    load_program(&mut cpu, &[0xA9, 0x80]);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x80);
    assert!(!cpu.flag_z());
    assert!(cpu.flag_n());
}

#[test]
fn test_lda_zero_page() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x0010, 0x37);

    // LDA $10
    load_program(&mut cpu, &[0xA5, 0x10]);
    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x37);
    assert_eq!(cpu.cycles(), 3);
}

#[test]
fn test_lda_zero_page_x_wraps() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x0008, 0x5A);
    cpu.set_x(0x10);

    // LDA $F8,X -> $08, not $0108
    load_program(&mut cpu, &[0xB5, 0xF8]);
    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x5A);
}

#[test]
fn test_lda_absolute_x() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x0205, 0x0E);
    cpu.set_x(0x05);

    // LDA $0200,X
    load_program(&mut cpu, &[0xBD, 0x00, 0x02]);
    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x0E);
    assert_eq!(cpu.pc(), 0x0603);
    assert_eq!(cpu.cycles(), 4);
}

#[test]
fn test_lda_absolute_y() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x1234, 0x99);
    cpu.set_y(0x34);

    // LDA $1200,Y
    load_program(&mut cpu, &[0xB9, 0x00, 0x12]);
    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x99);
    assert!(cpu.flag_n());
}

#[test]
fn test_lda_indirect_x() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x0024, 0x00);
    cpu.memory_mut().write(0x0025, 0x03);
    cpu.memory_mut().write(0x0300, 0x66);
    cpu.set_x(0x04);

    // LDA ($20,X)
    load_program(&mut cpu, &[0xA1, 0x20]);
    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x66);
    assert_eq!(cpu.cycles(), 6);
}

#[test]
fn test_lda_indirect_y() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x0040, 0x00);
    cpu.memory_mut().write(0x0041, 0x03);
    cpu.memory_mut().write(0x0310, 0x55);
    cpu.set_y(0x10);

    // LDA ($40),Y
    load_program(&mut cpu, &[0xB1, 0x40]);
    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x55);
    assert_eq!(cpu.cycles(), 5);
}

#[test]
fn test_lda_indirect_y_pointer_wraps_in_zero_page() {
    let mut cpu = setup_cpu();
    // Pointer low byte at $FF, high byte at $00
    cpu.memory_mut().write(0x00FF, 0x00);
    cpu.memory_mut().write(0x0000, 0x04);
    cpu.memory_mut().write(0x0400, 0x11);

    // LDA ($FF),Y
    load_program(&mut cpu, &[0xB1, 0xFF]);
    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x11);
}

#[test]
fn test_lda_indirect_x_pointer_wraps_in_zero_page() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x00FF, 0x10);
    cpu.memory_mut().write(0x0000, 0x04);
    cpu.memory_mut().write(0x0410, 0x22);
    cpu.set_x(0x0F);

    // LDA ($F0,X) -> pointer at $FF/$00
    load_program(&mut cpu, &[0xA1, 0xF0]);
    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x22);
}

// ========== LDX / LDY ==========

#[test]
fn test_ldx_immediate() {
    let mut cpu = setup_cpu();
    load_program(&mut cpu, &[0xA2, 0x00]);
    cpu.set_x(0x12);

    cpu.step().unwrap();

    assert_eq!(cpu.x(), 0x00);
    assert!(cpu.flag_z());
}

#[test]
fn test_ldx_zero_page_y() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x0015, 0xF0);
    cpu.set_y(0x05);

    // LDX $10,Y
    load_program(&mut cpu, &[0xB6, 0x10]);
    cpu.step().unwrap();

    assert_eq!(cpu.x(), 0xF0);
    assert!(cpu.flag_n());
}

#[test]
fn test_ldy_absolute_x() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x0301, 0x07);
    cpu.set_x(0x01);

    // LDY $0300,X
    load_program(&mut cpu, &[0xBC, 0x00, 0x03]);
    cpu.step().unwrap();

    assert_eq!(cpu.y(), 0x07);
    assert_eq!(cpu.pc(), 0x0603);
}

// ========== Stores ==========

#[test]
fn test_sta_absolute_leaves_flags() {
    let mut cpu = setup_cpu();
    cpu.set_a(0x80);
    let status = cpu.status();

    // STA $0200
    load_program(&mut cpu, &[0x8D, 0x00, 0x02]);
    cpu.step().unwrap();

    assert_eq!(cpu.memory().read(0x0200), 0x80);
    assert_eq!(cpu.status(), status);
    assert_eq!(cpu.cycles(), 4);
}

#[test]
fn test_sta_indirect_y() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x0010, 0x00);
    cpu.memory_mut().write(0x0011, 0x02);
    cpu.set_a(0x05);
    cpu.set_y(0x21);

    // STA ($10),Y
    load_program(&mut cpu, &[0x91, 0x10]);
    cpu.step().unwrap();

    assert_eq!(cpu.memory().read(0x0221), 0x05);
    assert_eq!(cpu.cycles(), 6);
}

#[test]
fn test_stx_zero_page_y_wraps() {
    let mut cpu = setup_cpu();
    cpu.set_x(0xAB);
    cpu.set_y(0x02);

    // STX $FF,Y -> $01
    load_program(&mut cpu, &[0x96, 0xFF]);
    cpu.step().unwrap();

    assert_eq!(cpu.memory().read(0x0001), 0xAB);
}

#[test]
fn test_sty_zero_page_x() {
    let mut cpu = setup_cpu();
    cpu.set_y(0x3C);
    cpu.set_x(0x01);

    // STY $20,X
    load_program(&mut cpu, &[0x94, 0x20]);
    cpu.step().unwrap();

    assert_eq!(cpu.memory().read(0x0021), 0x3C);
}

// ========== Assembled Programs ==========

#[test]
fn test_assembled_lda_immediate_runs() {
    let output = assemble("LDA #$05").unwrap();
    assert_eq!(output.bytes, vec![0xA9, 0x05]);

    let mut cpu = setup_cpu();
    load_program(&mut cpu, &output.bytes);
    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x05);
    assert!(!cpu.flag_z());
    assert!(!cpu.flag_n());
}
