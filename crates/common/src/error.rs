//! Errors raised by the program store.

use thiserror::Error;

/// Errors that occur while reading or editing a [`Program`](crate::Program).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProgramError {
    /// Line number outside `1..=len`.
    #[error("line {line} out of range (program has {len} lines)")]
    OutOfRange { line: usize, len: usize },

    /// No line declares this label.
    #[error("unknown label '{0}'")]
    UnknownLabel(String),

    /// The label is already bound to another line.
    #[error("label '{label}' already declared at line {line}")]
    DuplicateLabel { label: String, line: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_out_of_range() {
        assert_eq!(
            ProgramError::OutOfRange { line: 9, len: 4 }.to_string(),
            "line 9 out of range (program has 4 lines)"
        );
    }

    #[test]
    fn display_unknown_label() {
        assert_eq!(
            ProgramError::UnknownLabel("done".to_string()).to_string(),
            "unknown label 'done'"
        );
    }

    #[test]
    fn display_duplicate_label() {
        assert_eq!(
            ProgramError::DuplicateLabel {
                label: "loop".to_string(),
                line: 3
            }
            .to_string(),
            "label 'loop' already declared at line 3"
        );
    }
}
