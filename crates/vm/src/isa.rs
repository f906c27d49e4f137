//! The instruction table and the built-in operations.
//!
//! The table has two tiers. Built-ins are fixed:
//!
//! | mnemonic | arity | operands              | effect                                   |
//! |----------|-------|-----------------------|------------------------------------------|
//! | `b`      | 1     | label (+ condition)   | jump to label if condition holds         |
//! | `prnt`   | 1     | reg                   | write `reg` in decimal, one line         |
//! | `movi`   | 2     | dest, imm             | `dest = imm`                             |
//! | `cmpi`   | 2     | reg, imm              | set `n`, `z` from `reg - imm`            |
//! | `andi`   | 3     | dest, reg, imm        | `dest = reg & imm`                       |
//! | `add`    | 3     | dest, reg, reg        | `dest = reg + reg` (wrapping)            |
//! | `lsri`   | 3     | dest, reg, imm        | `dest = reg >>> imm` (zero fill)         |
//!
//! Extensions live in an overlay and can be added and removed freely. A
//! trailing `i` on a mnemonic makes its last operand an immediate.

use std::collections::HashMap;
use std::io::Write;

use crate::condition::Condition;
use crate::error::{RuntimeError, TableError};
use crate::machine::MachineState;
use blub_common::{BRANCH_OPCODE, IMMEDIATE_SUFFIX};

/// Number of operands an instruction takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arity {
    One = 1,
    Two = 2,
    Three = 3,
}

impl TryFrom<u8> for Arity {
    type Error = TableError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Arity::One),
            2 => Ok(Arity::Two),
            3 => Ok(Arity::Three),
            other => Err(TableError::InvalidArity(other)),
        }
    }
}

/// A validated source operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    /// Register index, already bounds-checked.
    Register(usize),
    /// Non-negative literal.
    Immediate(i32),
}

impl Operand {
    /// The value this operand denotes in `state`.
    pub fn value(self, state: &MachineState) -> Result<i32, RuntimeError> {
        match self {
            Operand::Register(index) => state.register(index),
            Operand::Immediate(value) => Ok(value),
        }
    }
}

/// Operands after validation, shaped by arity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operands {
    /// Arity 1, branch form. `condition` is `None` for an unconditional branch.
    Branch {
        target: usize,
        condition: Option<Condition>,
    },
    /// Arity 1.
    Unary { reg: usize },
    /// Arity 2.
    Binary { dest: usize, src: Operand },
    /// Arity 3.
    Ternary { dest: usize, lhs: usize, rhs: Operand },
}

/// An operation. Receives validated operands and the output sink.
pub type Handler = fn(&mut MachineState, &Operands, &mut dyn Write) -> Result<(), RuntimeError>;

/// One table entry.
#[derive(Debug, Clone, Copy)]
pub struct OpDef {
    pub arity: Arity,
    /// The last operand is an immediate rather than a register.
    pub immediate: bool,
    pub handler: Handler,
}

impl OpDef {
    fn new(name: &str, arity: Arity, handler: Handler) -> Self {
        Self {
            arity,
            immediate: name.ends_with(IMMEDIATE_SUFFIX),
            handler,
        }
    }
}

const BUILTINS: [(&str, Arity, Handler); 7] = [
    ("b", Arity::One, branch),
    ("prnt", Arity::One, print),
    ("movi", Arity::Two, move_immediate),
    ("cmpi", Arity::Two, compare),
    ("andi", Arity::Three, and),
    ("add", Arity::Three, add),
    ("lsri", Arity::Three, shift_right_logical),
];

/// Built-in operations plus an extension overlay.
#[derive(Debug, Clone, Default)]
pub struct InstructionSet {
    extensions: HashMap<String, OpDef>,
}

impl InstructionSet {
    /// A table holding only the built-ins.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a mnemonic. Built-ins take precedence.
    pub fn lookup(&self, name: &str) -> Option<OpDef> {
        builtin(name).or_else(|| self.extensions.get(name).copied())
    }

    /// Returns true if `name` is one of the fixed operations.
    pub fn is_builtin(name: &str) -> bool {
        builtin(name).is_some()
    }

    /// Add or replace an extension instruction.
    ///
    /// Fails with [`TableError::InvalidArity`] outside 1–3, and with
    /// [`TableError::ReservedMnemonic`] for empty names, built-in names, and
    /// names starting with the branch opcode (those always parse as branches).
    pub fn register(&mut self, name: &str, arity: u8, handler: Handler) -> Result<(), TableError> {
        let arity = Arity::try_from(arity)?;
        if name.is_empty() || name.starts_with(BRANCH_OPCODE) || Self::is_builtin(name) {
            return Err(TableError::ReservedMnemonic(name.to_string()));
        }
        log::debug!("registered instruction '{name}' with arity {}", arity as u8);
        self.extensions
            .insert(name.to_string(), OpDef::new(name, arity, handler));
        Ok(())
    }

    /// Remove an extension. Returns false for built-ins and unknown names.
    pub fn unregister(&mut self, name: &str) -> bool {
        self.extensions.remove(name).is_some()
    }

    /// Names of the registered extensions, in no particular order.
    pub fn extensions(&self) -> impl Iterator<Item = &str> + '_ {
        self.extensions.keys().map(String::as_str)
    }
}

fn builtin(name: &str) -> Option<OpDef> {
    BUILTINS
        .iter()
        .find(|(builtin, _, _)| *builtin == name)
        .map(|&(name, arity, handler)| OpDef::new(name, arity, handler))
}

// ---- Built-in operations ----

/// Jump to the target if the condition holds.
pub fn branch(
    state: &mut MachineState,
    ops: &Operands,
    _out: &mut dyn Write,
) -> Result<(), RuntimeError> {
    let &Operands::Branch { target, condition } = ops else {
        return Err(RuntimeError::OperandShape { at: state.pc() });
    };
    if condition.map_or(true, |c| c.holds(state.flags())) {
        state.jump(target);
    }
    Ok(())
}

/// Write a register's value followed by a newline.
pub fn print(
    state: &mut MachineState,
    ops: &Operands,
    out: &mut dyn Write,
) -> Result<(), RuntimeError> {
    let &Operands::Unary { reg } = ops else {
        return Err(RuntimeError::OperandShape { at: state.pc() });
    };
    let value = state.register(reg)?;
    writeln!(out, "{value}").map_err(|e| RuntimeError::Output {
        at: state.pc(),
        message: e.to_string(),
    })
}

/// `dest = src`.
pub fn move_immediate(
    state: &mut MachineState,
    ops: &Operands,
    _out: &mut dyn Write,
) -> Result<(), RuntimeError> {
    let &Operands::Binary { dest, src } = ops else {
        return Err(RuntimeError::OperandShape { at: state.pc() });
    };
    let value = src.value(state)?;
    state.set_register(dest, value)
}

/// Set `n` and `z` from `reg - src`. Carry and overflow are left alone.
pub fn compare(
    state: &mut MachineState,
    ops: &Operands,
    _out: &mut dyn Write,
) -> Result<(), RuntimeError> {
    let &Operands::Binary { dest: reg, src } = ops else {
        return Err(RuntimeError::OperandShape { at: state.pc() });
    };
    // Widened so the difference cannot overflow.
    let diff = i64::from(state.register(reg)?) - i64::from(src.value(state)?);
    let mut flags = state.flags();
    flags.n = diff < 0;
    flags.z = diff == 0;
    state.set_flags(flags);
    Ok(())
}

/// `dest = lhs & rhs`.
pub fn and(
    state: &mut MachineState,
    ops: &Operands,
    _out: &mut dyn Write,
) -> Result<(), RuntimeError> {
    ternary(state, ops, |a, b| a & b)
}

/// `dest = lhs + rhs`, wrapping on overflow.
pub fn add(
    state: &mut MachineState,
    ops: &Operands,
    _out: &mut dyn Write,
) -> Result<(), RuntimeError> {
    ternary(state, ops, i32::wrapping_add)
}

/// `dest = lhs >>> rhs`. Zero-fills from the left; shifting 32 or more
/// bits yields 0.
pub fn shift_right_logical(
    state: &mut MachineState,
    ops: &Operands,
    _out: &mut dyn Write,
) -> Result<(), RuntimeError> {
    ternary(state, ops, |a, bits| {
        (a as u32).checked_shr(bits as u32).unwrap_or(0) as i32
    })
}

fn ternary(
    state: &mut MachineState,
    ops: &Operands,
    op: fn(i32, i32) -> i32,
) -> Result<(), RuntimeError> {
    let &Operands::Ternary { dest, lhs, rhs } = ops else {
        return Err(RuntimeError::OperandShape { at: state.pc() });
    };
    let result = op(state.register(lhs)?, rhs.value(state)?);
    state.set_register(dest, result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::Flags;

    fn exec(handler: Handler, state: &mut MachineState, ops: Operands) -> String {
        let mut out = Vec::new();
        handler(state, &ops, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn noop(_: &mut MachineState, _: &Operands, _: &mut dyn Write) -> Result<(), RuntimeError> {
        Ok(())
    }

    #[test]
    fn arity_from_u8() {
        assert_eq!(Arity::try_from(1), Ok(Arity::One));
        assert_eq!(Arity::try_from(3), Ok(Arity::Three));
        assert_eq!(Arity::try_from(0), Err(TableError::InvalidArity(0)));
        assert_eq!(Arity::try_from(4), Err(TableError::InvalidArity(4)));
    }

    #[test]
    fn builtin_lookup() {
        let set = InstructionSet::new();
        for (name, arity, _) in BUILTINS {
            let def = set.lookup(name).unwrap();
            assert_eq!(def.arity, arity);
        }
        assert!(set.lookup("movi").unwrap().immediate);
        assert!(!set.lookup("add").unwrap().immediate);
        assert!(set.lookup("sub").is_none());
    }

    #[test]
    fn register_extension() {
        let mut set = InstructionSet::new();
        set.register("nopi", 2, noop).unwrap();
        let def = set.lookup("nopi").unwrap();
        assert_eq!(def.arity, Arity::Two);
        assert!(def.immediate);
        assert_eq!(set.extensions().collect::<Vec<_>>(), vec!["nopi"]);
    }

    #[test]
    fn register_rejects_bad_arity() {
        let mut set = InstructionSet::new();
        assert_eq!(set.register("nop", 0, noop), Err(TableError::InvalidArity(0)));
        assert_eq!(set.register("nop", 4, noop), Err(TableError::InvalidArity(4)));
        assert!(set.lookup("nop").is_none());
    }

    #[test]
    fn register_rejects_reserved_names() {
        let mut set = InstructionSet::new();
        for name in ["", "add", "prnt", "b", "bump"] {
            assert_eq!(
                set.register(name, 1, noop),
                Err(TableError::ReservedMnemonic(name.to_string()))
            );
        }
    }

    #[test]
    fn builtins_cannot_be_unregistered() {
        let mut set = InstructionSet::new();
        assert!(!set.unregister("add"));
        assert!(set.lookup("add").is_some());
        set.register("nop", 1, noop).unwrap();
        assert!(set.unregister("nop"));
        assert!(set.lookup("nop").is_none());
    }

    #[test]
    fn compare_sets_flags() {
        let mut state = MachineState::default();
        state.set_register(1, 5).unwrap();
        let cmp = |state: &mut MachineState, value| {
            exec(
                compare,
                state,
                Operands::Binary {
                    dest: 1,
                    src: Operand::Immediate(value),
                },
            );
            state.flags()
        };
        assert_eq!(cmp(&mut state, 5), Flags { z: true, ..Flags::default() });
        assert_eq!(cmp(&mut state, 9), Flags { n: true, ..Flags::default() });
        // Both flags are rewritten on every comparison.
        assert_eq!(cmp(&mut state, 1), Flags::default());
    }

    #[test]
    fn compare_does_not_overflow() {
        let mut state = MachineState::default();
        state.set_register(0, i32::MIN).unwrap();
        exec(
            compare,
            &mut state,
            Operands::Binary {
                dest: 0,
                src: Operand::Immediate(i32::MAX),
            },
        );
        assert!(state.flags().n);
        assert!(!state.flags().z);
    }

    #[test]
    fn branch_taken_and_not_taken() {
        let mut state = MachineState::default();
        let ops = Operands::Branch {
            target: 4,
            condition: Some(Condition::Eq),
        };
        exec(branch, &mut state, ops);
        assert_eq!(state.jump, None);

        state.set_flags(Flags { z: true, ..Flags::default() });
        exec(branch, &mut state, ops);
        assert_eq!(state.jump, Some(4));
    }

    #[test]
    fn unconditional_branch_always_jumps() {
        let mut state = MachineState::default();
        exec(
            branch,
            &mut state,
            Operands::Branch {
                target: 2,
                condition: None,
            },
        );
        assert_eq!(state.jump, Some(2));
    }

    #[test]
    fn print_writes_line() {
        let mut state = MachineState::default();
        state.set_register(7, -12).unwrap();
        assert_eq!(exec(print, &mut state, Operands::Unary { reg: 7 }), "-12\n");
    }

    #[test]
    fn arithmetic() {
        let mut state = MachineState::default();
        state.set_register(1, 0b1110).unwrap();
        state.set_register(2, 3).unwrap();
        exec(
            and,
            &mut state,
            Operands::Ternary {
                dest: 3,
                lhs: 1,
                rhs: Operand::Immediate(0b0110),
            },
        );
        assert_eq!(state.register(3), Ok(0b0110));
        exec(
            add,
            &mut state,
            Operands::Ternary {
                dest: 4,
                lhs: 1,
                rhs: Operand::Register(2),
            },
        );
        assert_eq!(state.register(4), Ok(17));
    }

    #[test]
    fn add_wraps() {
        let mut state = MachineState::default();
        state.set_register(1, i32::MAX).unwrap();
        exec(
            add,
            &mut state,
            Operands::Ternary {
                dest: 0,
                lhs: 1,
                rhs: Operand::Immediate(1),
            },
        );
        assert_eq!(state.register(0), Ok(i32::MIN));
    }

    #[test]
    fn shift_is_logical() {
        let mut state = MachineState::default();
        state.set_register(1, -1).unwrap();
        let shift = |state: &mut MachineState, bits| {
            exec(
                shift_right_logical,
                state,
                Operands::Ternary {
                    dest: 2,
                    lhs: 1,
                    rhs: Operand::Immediate(bits),
                },
            );
            state.register(2).unwrap()
        };
        assert_eq!(shift(&mut state, 1), i32::MAX);
        assert_eq!(shift(&mut state, 28), 0xF);
        assert_eq!(shift(&mut state, 0), -1);
        assert_eq!(shift(&mut state, 32), 0);
    }

    #[test]
    fn wrong_shape_is_an_error() {
        let mut state = MachineState::default();
        let mut out = Vec::new();
        assert_eq!(
            add(&mut state, &Operands::Unary { reg: 0 }, &mut out),
            Err(RuntimeError::OperandShape { at: 1 })
        );
    }
}
