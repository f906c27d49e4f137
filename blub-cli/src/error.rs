//! Errors surfaced by the command-line front end.

use blub_assembler::AsmError;
use blub_vm::RuntimeError;
use thiserror::Error;

/// Everything that can stop a `blub` command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CliError {
    /// The program file could not be read.
    #[error("cannot read '{path}': {message}")]
    Io { path: String, message: String },

    /// The program text did not assemble.
    #[error(transparent)]
    Asm(#[from] AsmError),

    /// The program failed while running.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl CliError {
    /// Process exit code for this error: 1 for input problems, 3 at runtime.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Io { .. } | CliError::Asm(_) => 1,
            CliError::Runtime(_) => 3,
        }
    }
}
