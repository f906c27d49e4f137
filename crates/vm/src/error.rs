//! Errors for the Blub machine.
//!
//! Every runtime error carries the 1-based line (`at`) of the instruction
//! that failed. Execution stops at the first error; nothing is retried.

use blub_common::ProgramError;
use thiserror::Error;

use crate::machine::REGISTER_COUNT;

/// Errors that stop a run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// Empty mnemonic, empty first operand, or a mnemonic with no table entry.
    #[error("line {at}: malformed instruction '{text}'")]
    MalformedInstruction { at: usize, text: String },

    /// Branch target names no label in the program.
    #[error("line {at}: unknown label '{label}'")]
    UnknownLabel { at: usize, label: String },

    /// Branch condition is not one of gt, ge, eq, ne, le, lt.
    #[error("line {at}: unknown condition '{condition}'")]
    UnknownCondition { at: usize, condition: String },

    /// Operand token has the wrong shape for its position, or is missing or
    /// superfluous.
    #[error("line {at}: {mnemonic} operand {position} '{token}': expected {expected}")]
    InvalidOperand {
        at: usize,
        mnemonic: String,
        position: usize,
        token: String,
        expected: &'static str,
    },

    /// Register index outside the register file.
    #[error("line {at}: register '{register}' out of range (r0-r{})", REGISTER_COUNT - 1)]
    RegisterOutOfRange { at: usize, register: String },

    /// A handler received operands of a different arity than it handles.
    #[error("line {at}: operands do not match the instruction's arity")]
    OperandShape { at: usize },

    /// The output sink rejected a write.
    #[error("line {at}: cannot write output: {message}")]
    Output { at: usize, message: String },

    /// Positional access into the program failed.
    #[error(transparent)]
    Program(#[from] ProgramError),
}

/// Errors from editing the instruction table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// Instructions take one to three operands.
    #[error("invalid arity {0} (must be 1-3)")]
    InvalidArity(u8),

    /// The name is empty, belongs to a built-in, or would parse as a branch.
    #[error("mnemonic '{0}' is reserved")]
    ReservedMnemonic(String),
}
