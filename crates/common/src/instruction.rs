//! Decoded Blub instructions.
//!
//! An instruction is one source line after parsing: an optional label, a
//! mnemonic, and up to three raw operand tokens. Operands stay textual here.
//! The same token (`5`, say) is an immediate for `movi` and an error for
//! `add`, so interpretation is deferred to the VM's operand validator.
//!
//! ```text
//! [label ':'] mnemonic[condition] operand (',' operand)*
//! ```

use std::fmt;

/// First character of every branch mnemonic. The rest of the token is the
/// branch condition (`beq` = branch if equal, bare `b` = always).
pub const BRANCH_OPCODE: char = 'b';

/// Trailing character marking a mnemonic whose last operand is an immediate.
pub const IMMEDIATE_SUFFIX: char = 'i';

/// Maximum number of operands an instruction may carry.
pub const MAX_OPERANDS: usize = 3;

/// The operation part of an instruction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Mnemonic {
    /// A branch, with its (possibly empty) condition suffix.
    Branch { condition: String },
    /// Any other operation, named by its full token.
    Other(String),
}

impl Mnemonic {
    /// Decode a mnemonic token, splitting a fused branch condition off.
    pub fn from_token(token: &str) -> Self {
        match token.strip_prefix(BRANCH_OPCODE) {
            Some(condition) => Mnemonic::Branch {
                condition: condition.to_string(),
            },
            None => Mnemonic::Other(token.to_string()),
        }
    }

    /// An unconditional or conditional branch.
    pub fn branch(condition: &str) -> Self {
        Mnemonic::Branch {
            condition: condition.to_string(),
        }
    }

    /// The operation name: `"b"` for every branch, the token otherwise.
    pub fn name(&self) -> &str {
        match self {
            Mnemonic::Branch { .. } => "b",
            Mnemonic::Other(name) => name,
        }
    }

    /// The branch condition, or `""` for non-branches and unconditional branches.
    pub fn condition(&self) -> &str {
        match self {
            Mnemonic::Branch { condition } => condition,
            Mnemonic::Other(_) => "",
        }
    }

    /// Returns true if the final operand of this operation is an immediate.
    pub fn is_immediate(&self) -> bool {
        self.name().ends_with(IMMEDIATE_SUFFIX)
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name(), self.condition())
    }
}

/// A single decoded line of a Blub program. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    label: String,
    mnemonic: Mnemonic,
    operands: [String; MAX_OPERANDS],
}

impl Instruction {
    /// Create an unlabelled instruction.
    ///
    /// Missing operands are empty. Passing more than [`MAX_OPERANDS`] is a
    /// caller bug; the parser rejects such lines before building one.
    pub fn new(mnemonic: Mnemonic, operands: &[&str]) -> Self {
        debug_assert!(
            operands.len() <= MAX_OPERANDS,
            "at most {MAX_OPERANDS} operands, got {}",
            operands.len()
        );
        let mut slots: [String; MAX_OPERANDS] = Default::default();
        for (slot, op) in slots.iter_mut().zip(operands) {
            *slot = (*op).to_string();
        }
        Self {
            label: String::new(),
            mnemonic,
            operands: slots,
        }
    }

    /// Attach a label to this instruction. Surrounding whitespace is trimmed.
    pub fn with_label(mut self, label: &str) -> Self {
        self.label = label.trim().to_string();
        self
    }

    /// The label, or `""` if the line declares none.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The operation name (`"b"` for branches).
    pub fn mnemonic(&self) -> &str {
        self.mnemonic.name()
    }

    /// The tagged mnemonic.
    pub fn kind(&self) -> &Mnemonic {
        &self.mnemonic
    }

    /// The branch condition, `""` if none.
    pub fn condition(&self) -> &str {
        self.mnemonic.condition()
    }

    pub fn is_branch(&self) -> bool {
        matches!(self.mnemonic, Mnemonic::Branch { .. })
    }

    pub fn op1(&self) -> &str {
        &self.operands[0]
    }

    pub fn op2(&self) -> &str {
        &self.operands[1]
    }

    pub fn op3(&self) -> &str {
        &self.operands[2]
    }

    /// All three operand slots, left to right. Unused slots are empty.
    pub fn operands(&self) -> &[String; MAX_OPERANDS] {
        &self.operands
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.label.is_empty() {
            f.write_str("    ")?;
        } else {
            write!(f, "{}: ", self.label)?;
        }
        write!(f, "{} {}", self.mnemonic, self.operands[0])?;
        for op in self.operands[1..].iter().filter(|op| !op.is_empty()) {
            write!(f, ", {op}")?;
        }
        Ok(())
    }
}
