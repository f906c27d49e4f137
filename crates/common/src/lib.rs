//! Blub common types.
//!
//! This crate provides the data structures shared by the assembler and the
//! virtual machine:
//!
//! - [`Mnemonic`]: branch-with-condition or plain operation name
//! - [`Instruction`]: one decoded source line with up to three raw operands
//! - [`Program`]: the 1-indexed, label-indexed, editable instruction store
//! - [`ProgramError`]: errors from positional access, labels and edits

pub mod error;
pub mod instruction;
pub mod program;

// Re-export commonly used types at the crate root.
pub use error::ProgramError;
pub use instruction::{Instruction, Mnemonic, BRANCH_OPCODE, IMMEDIATE_SUFFIX, MAX_OPERANDS};
pub use program::Program;
