//! Blub assembler: text ↔ program store translation.
//!
//! Each source line becomes exactly one instruction, numbered from 1 in
//! source order, so assembler and runtime errors name the same line. A blank
//! line is malformed.
//!
//! # Usage
//!
//! ```
//! use blub_assembler::{assemble, listing};
//!
//! let program = assemble("start: movi r0, 5\n       prnt r0\n").unwrap();
//! assert_eq!(program.len(), 2);
//! assert_eq!(program.address_of("start"), Ok(1));
//! assert_eq!(listing(&program), "1    start: movi r0, 5\n2        prnt r0\n");
//! ```
//!
//! # Roundtrip Guarantee
//!
//! Parsing the `Display` form of an instruction yields the same instruction,
//! as long as its label and operands contain no `:`, `,` or whitespace.

pub mod error;

mod lexer;
mod listing;
mod parser;

pub use error::AsmError;
pub use listing::listing;
pub use parser::parse_line;

use blub_common::{Program, ProgramError};

/// Assemble text into a program.
///
/// Returns the first error encountered; no partial program is produced.
pub fn assemble(text: &str) -> Result<Program, AsmError> {
    let mut program = Program::new();

    for (idx, line) in text.lines().enumerate() {
        let line_num = idx + 1;
        let instr = parse_line(line, line_num)?;
        program.push(instr).map_err(|e| match e {
            ProgramError::DuplicateLabel { label, .. } => AsmError::DuplicateLabel {
                line: line_num,
                label,
            },
            other => AsmError::Program(other),
        })?;
    }

    log::debug!(
        "assembled {} instructions, {} labels",
        program.len(),
        program.labels().count()
    );
    Ok(program)
}

/// Assemble a sequence of already-split lines.
pub fn assemble_lines<'a, I>(lines: I) -> Result<Program, AsmError>
where
    I: IntoIterator<Item = &'a str>,
{
    let text: Vec<&str> = lines.into_iter().collect();
    assemble(&text.join("\n"))
}
