//! Blub virtual machine: interprets assembled programs.
//!
//! The machine has:
//! - 32 signed 32-bit registers, zero-initialized
//! - four condition flags (`n`, `z`, `c`, `v`), written by comparison
//! - a 1-based program counter that runs until it passes the last line
//!
//! Each step looks the mnemonic up in the [`InstructionSet`], validates the
//! operand tokens for its arity, then runs the operation. There is no halt
//! instruction; a run ends by falling off the end or at the first error.
//!
//! # Usage
//!
//! ```
//! use blub_common::{Instruction, Mnemonic, Program};
//! use blub_vm::run;
//!
//! let program = Program::from_instructions([
//!     Instruction::new(Mnemonic::from_token("movi"), &["r0", "42"]),
//!     Instruction::new(Mnemonic::from_token("prnt"), &["r0"]),
//! ])
//! .unwrap();
//!
//! let mut out = Vec::new();
//! let state = run(&program, &mut out).unwrap();
//! assert_eq!(out, b"42\n");
//! assert_eq!(state.register(0), Ok(42));
//! ```

pub mod condition;
pub mod error;
pub mod execute;
pub mod isa;
pub mod machine;

mod validate;

pub use condition::Condition;
pub use error::{RuntimeError, TableError};
pub use isa::{Arity, Handler, InstructionSet, OpDef, Operand, Operands};
pub use machine::{Flags, Machine, MachineState, REGISTER_COUNT};

use std::io::Write;

use blub_common::Program;

/// Execute a program with the built-in instruction set.
///
/// `prnt` output goes to `out`. Returns the final machine state.
///
/// # Errors
///
/// Returns [`RuntimeError`] for the first instruction that cannot be
/// executed (unknown label or condition, invalid operand, unregistered
/// mnemonic, failed write).
pub fn run(program: &Program, out: &mut dyn Write) -> Result<MachineState, RuntimeError> {
    let mut machine = Machine::new(program);
    machine.run(out)?;
    Ok(machine.into_state())
}
