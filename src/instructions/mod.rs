//! # 6502 Instruction Implementations
//!
//! This module contains the implementations of all 6502 instructions, organized by category.
//! Each instruction is a standalone function that takes the CPU and the decoded
//! [`Opcode`] entry and returns the cycles it consumed.
//!
//! ## Categories
//!
//! - **alu**: Arithmetic and logic operations (ADC, SBC, AND, ORA, EOR, CMP, CPX, CPY, BIT)
//! - **branches**: Conditional branch instructions (BCC, BCS, BEQ, BNE, BMI, BPL, BVC, BVS)
//! - **shifts**: Shift and rotate operations (ASL, LSR, ROL, ROR)
//! - **load_store**: Load and store instructions (LDA, LDX, LDY, STA, STX, STY)
//! - **inc_dec**: Increment and decrement operations (INC, DEC, INX, INY, DEX, DEY)
//! - **control**: Control flow instructions (JMP, JSR, RTS, RTI, BRK, NOP)
//! - **stack**: Stack operations (PHA, PHP, PLA, PLP)
//! - **flags**: Status flag manipulation (CLC, SEC, CLI, SEI, CLD, SED, CLV)
//! - **transfer**: Register transfer operations (TAX, TAY, TXA, TYA, TSX, TXS)

pub mod alu;
pub mod branches;
pub mod control;
pub mod flags;
pub mod inc_dec;
pub mod load_store;
pub mod shifts;
pub mod stack;
pub mod transfer;

use crate::opcodes::{Mnemonic, Opcode};
use crate::{Cpu, ExecutionError, MemoryBus};

/// Runs the handler for `op`. PC points at the opcode on entry.
pub(crate) fn execute<M: MemoryBus>(cpu: &mut Cpu<M>, op: Opcode) -> Result<u8, ExecutionError> {
    use Mnemonic::*;

    match op.mnemonic {
        Adc => alu::execute_adc(cpu, op),
        Sbc => alu::execute_sbc(cpu, op),
        And => alu::execute_and(cpu, op),
        Ora => alu::execute_ora(cpu, op),
        Eor => alu::execute_eor(cpu, op),
        Cmp => alu::execute_cmp(cpu, op),
        Cpx => alu::execute_cpx(cpu, op),
        Cpy => alu::execute_cpy(cpu, op),
        Bit => alu::execute_bit(cpu, op),

        Bcc | Bcs | Beq | Bne | Bmi | Bpl | Bvc | Bvs => branches::execute_branch(cpu, op),

        Asl => shifts::execute_asl(cpu, op),
        Lsr => shifts::execute_lsr(cpu, op),
        Rol => shifts::execute_rol(cpu, op),
        Ror => shifts::execute_ror(cpu, op),

        Lda => load_store::execute_lda(cpu, op),
        Ldx => load_store::execute_ldx(cpu, op),
        Ldy => load_store::execute_ldy(cpu, op),
        Sta => load_store::execute_sta(cpu, op),
        Stx => load_store::execute_stx(cpu, op),
        Sty => load_store::execute_sty(cpu, op),

        Inc => inc_dec::execute_inc(cpu, op),
        Dec => inc_dec::execute_dec(cpu, op),
        Inx | Iny | Dex | Dey => inc_dec::execute_register_step(cpu, op),

        Jmp => control::execute_jmp(cpu, op),
        Jsr => control::execute_jsr(cpu, op),
        Rts => control::execute_rts(cpu, op),
        Rti => control::execute_rti(cpu, op),
        Brk => control::execute_brk(cpu, op),
        Nop => Ok(op.base_cycles),

        Pha => stack::execute_pha(cpu, op),
        Php => stack::execute_php(cpu, op),
        Pla => stack::execute_pla(cpu, op),
        Plp => stack::execute_plp(cpu, op),

        Clc | Sec | Cli | Sei | Cld | Sed | Clv => flags::execute_flag(cpu, op),

        Tax | Tay | Txa | Tya | Tsx | Txs => transfer::execute_transfer(cpu, op),
    }
}
