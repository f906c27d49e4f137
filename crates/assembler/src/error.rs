//! Error types for the Blub assembler.

use blub_common::ProgramError;
use thiserror::Error;

/// Errors produced while assembling text into a program.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AsmError {
    /// A source line cannot be decoded into an instruction.
    #[error("line {line}: malformed line '{text}': {reason}")]
    MalformedLine {
        line: usize,
        text: String,
        reason: &'static str,
    },

    /// A label is declared on more than one line.
    #[error("line {line}: label '{label}' already declared")]
    DuplicateLabel { line: usize, label: String },

    /// The program store rejected an instruction.
    #[error(transparent)]
    Program(#[from] ProgramError),
}
