//! Blub front end: program loading and logging for the `blub` binary.

pub mod error;
pub mod logger;

pub use error::CliError;

use std::fs;
use std::path::Path;

use blub_common::Program;

/// Read a program file as a sequence of lines.
pub fn read_lines(path: &Path) -> Result<Vec<String>, CliError> {
    let text = fs::read_to_string(path).map_err(|e| CliError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    Ok(text.lines().map(str::to_string).collect())
}

/// Read and assemble a program file.
pub fn load_program(path: &Path) -> Result<Program, CliError> {
    let lines = read_lines(path)?;
    let program = blub_assembler::assemble_lines(lines.iter().map(String::as_str))?;
    log::debug!("loaded {} ({} instructions)", path.display(), program.len());
    Ok(program)
}
