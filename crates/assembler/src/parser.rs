//! Parser for split Blub lines → instructions.

use crate::error::AsmError;
use crate::lexer::{split_line, SplitLine};
use blub_common::{Instruction, Mnemonic, BRANCH_OPCODE, MAX_OPERANDS};

/// Parse one line of assembly text into an instruction.
///
/// A blank line has no mnemonic and is rejected like any other short line.
/// `line_num` is only used for error reporting.
pub fn parse_line(text: &str, line_num: usize) -> Result<Instruction, AsmError> {
    let malformed = |reason| AsmError::MalformedLine {
        line: line_num,
        text: text.trim().to_string(),
        reason,
    };

    let SplitLine {
        label,
        mnemonic,
        mut operands,
    } = split_line(text);

    let token = mnemonic.ok_or_else(|| malformed("missing mnemonic"))?;
    if operands.is_empty() {
        return Err(malformed("missing operand"));
    }

    let mut mnemonic = Mnemonic::from_token(token);

    // Spaced branch form: `b eq, done` is `beq done`.
    if is_bare_branch(token) && operands.len() >= 2 {
        mnemonic = Mnemonic::branch(operands.remove(0));
    }

    if operands.len() > MAX_OPERANDS {
        return Err(malformed("too many operands"));
    }

    Ok(Instruction::new(mnemonic, &operands).with_label(label))
}

fn is_bare_branch(token: &str) -> bool {
    let mut chars = token.chars();
    chars.next() == Some(BRANCH_OPCODE) && chars.next().is_none()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Instruction {
        parse_line(text, 1).unwrap()
    }

    #[test]
    fn blank_line_is_malformed() {
        for text in ["", "   \t "] {
            let err = parse_line(text, 5).unwrap_err();
            assert!(matches!(
                err,
                AsmError::MalformedLine {
                    line: 5,
                    reason: "missing mnemonic",
                    ..
                }
            ));
        }
    }

    #[test]
    fn move_immediate() {
        let i = parse("movi r0, 5");
        assert_eq!(i.mnemonic(), "movi");
        assert_eq!(i.condition(), "");
        assert_eq!(i.op1(), "r0");
        assert_eq!(i.op2(), "5");
        assert_eq!(i.op3(), "");
        assert_eq!(i.label(), "");
    }

    #[test]
    fn labelled_three_operands() {
        let i = parse("sum:  add r2 , r0,r1");
        assert_eq!(i.label(), "sum");
        assert_eq!(i.mnemonic(), "add");
        assert_eq!(i.operands(), &["r2", "r0", "r1"].map(String::from));
    }

    #[test]
    fn fused_branch_condition() {
        let i = parse("bgt loop");
        assert!(i.is_branch());
        assert_eq!(i.mnemonic(), "b");
        assert_eq!(i.condition(), "gt");
        assert_eq!(i.op1(), "loop");
    }

    #[test]
    fn unconditional_branch() {
        let i = parse("b top");
        assert_eq!(i.mnemonic(), "b");
        assert_eq!(i.condition(), "");
        assert_eq!(i.op1(), "top");
    }

    #[test]
    fn spaced_branch_condition() {
        let spaced = parse("b eq, done");
        assert_eq!(spaced.condition(), "eq");
        assert_eq!(spaced.op1(), "done");
        assert_eq!(spaced.op2(), "");
        assert_eq!(spaced, parse("beq done"));
    }

    #[test]
    fn fused_branch_keeps_extra_operand() {
        // Rejected later by the operand validator, not by the parser.
        let i = parse("beq done, extra");
        assert_eq!(i.condition(), "eq");
        assert_eq!(i.op1(), "done");
        assert_eq!(i.op2(), "extra");
    }

    #[test]
    fn missing_operand() {
        let err = parse_line("prnt", 4).unwrap_err();
        assert_eq!(
            err,
            AsmError::MalformedLine {
                line: 4,
                text: "prnt".to_string(),
                reason: "missing operand"
            }
        );
    }

    #[test]
    fn label_without_instruction() {
        let err = parse_line("loop:", 2).unwrap_err();
        assert!(matches!(
            err,
            AsmError::MalformedLine {
                line: 2,
                reason: "missing mnemonic",
                ..
            }
        ));
    }

    #[test]
    fn too_many_operands() {
        let err = parse_line("add r1, r2, r3, r4", 6).unwrap_err();
        assert!(matches!(
            err,
            AsmError::MalformedLine {
                line: 6,
                reason: "too many operands",
                ..
            }
        ));
    }

    #[test]
    fn empty_label_is_no_label() {
        let i = parse(" : prnt r0");
        assert_eq!(i.label(), "");
    }
}
