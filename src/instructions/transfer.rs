//! # Register Transfer Instructions
//!
//! TAX, TAY, TXA, TYA, TSX and TXS. Every transfer except TXS updates Z and N
//! from the copied value.

use crate::opcodes::{Mnemonic, Opcode};
use crate::{Cpu, ExecutionError, MemoryBus};

pub(crate) fn execute_transfer<M: MemoryBus>(cpu: &mut Cpu<M>, op: Opcode) -> Result<u8, ExecutionError> {
    match op.mnemonic {
        Mnemonic::Tax => {
            cpu.x = cpu.a;
            cpu.set_zn(cpu.x);
        }
        Mnemonic::Tay => {
            cpu.y = cpu.a;
            cpu.set_zn(cpu.y);
        }
        Mnemonic::Txa => {
            cpu.a = cpu.x;
            cpu.set_zn(cpu.a);
        }
        Mnemonic::Tya => {
            cpu.a = cpu.y;
            cpu.set_zn(cpu.a);
        }
        Mnemonic::Tsx => {
            cpu.x = cpu.sp;
            cpu.set_zn(cpu.x);
        }
        Mnemonic::Txs => cpu.sp = cpu.x,
        _ => {
            return Err(ExecutionError::UnsupportedMode {
                opcode: op.code,
                mode: op.addressing_mode,
                pc: cpu.pc,
            })
        }
    }

    Ok(op.base_cycles)
}
