//! Operand validation: raw operand tokens → typed [`Operands`].
//!
//! Runs before an operation executes, so a rejected instruction never
//! touches registers or flags.

use crate::condition::Condition;
use crate::error::RuntimeError;
use crate::isa::{Arity, OpDef, Operand, Operands};
use crate::machine::REGISTER_COUNT;
use blub_common::{Instruction, Program};

/// Checks one instruction's operands against its table entry.
pub(crate) struct Validator<'a> {
    instr: &'a Instruction,
    at: usize,
}

impl<'a> Validator<'a> {
    pub(crate) fn new(instr: &'a Instruction, at: usize) -> Self {
        Self { instr, at }
    }

    /// Convert the instruction's operands according to `def`.
    pub(crate) fn check(&self, def: &OpDef, program: &Program) -> Result<Operands, RuntimeError> {
        let [op1, op2, op3] = self.instr.operands();
        match def.arity {
            Arity::One if self.instr.is_branch() => {
                let target = program
                    .address_of(op1)
                    .map_err(|_| RuntimeError::UnknownLabel {
                        at: self.at,
                        label: op1.clone(),
                    })?;
                let condition = self.condition()?;
                self.absent(2, op2)?;
                self.absent(3, op3)?;
                Ok(Operands::Branch { target, condition })
            }
            Arity::One => {
                let reg = self.register(1, op1)?;
                self.absent(2, op2)?;
                self.absent(3, op3)?;
                Ok(Operands::Unary { reg })
            }
            Arity::Two => {
                let dest = self.register(1, op1)?;
                let src = self.source(def, 2, op2)?;
                self.absent(3, op3)?;
                Ok(Operands::Binary { dest, src })
            }
            Arity::Three => {
                let dest = self.register(1, op1)?;
                let lhs = self.register(2, op2)?;
                let rhs = self.source(def, 3, op3)?;
                Ok(Operands::Ternary { dest, lhs, rhs })
            }
        }
    }

    fn condition(&self) -> Result<Option<Condition>, RuntimeError> {
        let name = self.instr.condition();
        if name.is_empty() {
            return Ok(None);
        }
        Condition::from_name(name)
            .map(Some)
            .ok_or_else(|| RuntimeError::UnknownCondition {
                at: self.at,
                condition: name.to_string(),
            })
    }

    /// The last operand: an immediate for `...i` mnemonics, else a register.
    fn source(&self, def: &OpDef, position: usize, token: &str) -> Result<Operand, RuntimeError> {
        if def.immediate {
            self.immediate(position, token).map(Operand::Immediate)
        } else {
            self.register(position, token).map(Operand::Register)
        }
    }

    /// `r<digits>`, within the register file.
    fn register(&self, position: usize, token: &str) -> Result<usize, RuntimeError> {
        let digits = token
            .strip_prefix('r')
            .filter(|d| is_digits(d))
            .ok_or_else(|| self.invalid(position, token, "a register"))?;
        digits
            .parse::<usize>()
            .ok()
            .filter(|&index| index < REGISTER_COUNT)
            .ok_or_else(|| RuntimeError::RegisterOutOfRange {
                at: self.at,
                register: token.to_string(),
            })
    }

    /// `<digits>`, fitting in a register.
    fn immediate(&self, position: usize, token: &str) -> Result<i32, RuntimeError> {
        if !is_digits(token) {
            return Err(self.invalid(position, token, "an immediate"));
        }
        token
            .parse::<i32>()
            .map_err(|_| self.invalid(position, token, "an immediate that fits in 32 bits"))
    }

    fn absent(&self, position: usize, token: &str) -> Result<(), RuntimeError> {
        if token.is_empty() {
            Ok(())
        } else {
            Err(self.invalid(position, token, "no operand"))
        }
    }

    fn invalid(&self, position: usize, token: &str, expected: &'static str) -> RuntimeError {
        RuntimeError::InvalidOperand {
            at: self.at,
            mnemonic: self.instr.kind().to_string(),
            position,
            token: token.to_string(),
            expected,
        }
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
