//! Listing: program → numbered, human-readable text.
//!
//! One line per instruction, prefixed with its 1-based line number.
//! Unlabelled instructions are indented so that mnemonics line up with
//! those following a short label.

use blub_common::Program;

/// Render a program as a numbered listing.
///
/// ```text
/// 1    start: movi r0, 5
/// 2        movi r1, 3
/// ```
pub fn listing(program: &Program) -> String {
    let mut out = String::new();
    for (line, instr) in program.iter() {
        out.push_str(&format!("{line}    {instr}\n"));
    }
    out
}
