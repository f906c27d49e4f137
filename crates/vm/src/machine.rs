//! Machine state: register file, condition flags, program counter.

use crate::error::{RuntimeError, TableError};
use crate::isa::{Handler, InstructionSet};
use blub_common::Program;

/// Number of general-purpose registers (`r0`..`r31`).
pub const REGISTER_COUNT: usize = 32;

/// Condition flags. Only comparison writes them; only branches read them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags {
    /// Negative.
    pub n: bool,
    /// Zero.
    pub z: bool,
    /// Carry. Never computed.
    pub c: bool,
    /// Overflow. Never computed.
    pub v: bool,
}

/// Everything an instruction handler may read or write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineState {
    registers: [i32; REGISTER_COUNT],
    flags: Flags,
    /// Line of the instruction executing now, or of the next one between steps.
    pc: usize,
    /// Set by a taken branch; replaces the implicit `pc + 1`.
    pub(crate) jump: Option<usize>,
}

impl Default for MachineState {
    fn default() -> Self {
        Self {
            registers: [0; REGISTER_COUNT],
            flags: Flags::default(),
            pc: 1,
            jump: None,
        }
    }
}

impl MachineState {
    /// Read a register.
    pub fn register(&self, index: usize) -> Result<i32, RuntimeError> {
        self.registers
            .get(index)
            .copied()
            .ok_or_else(|| self.out_of_range(index))
    }

    /// Write a register.
    pub fn set_register(&mut self, index: usize, value: i32) -> Result<(), RuntimeError> {
        let at = self.pc;
        let slot = self.registers.get_mut(index).ok_or(RuntimeError::RegisterOutOfRange {
            at,
            register: format!("r{index}"),
        })?;
        *slot = value;
        Ok(())
    }

    /// The whole register file.
    pub fn registers(&self) -> &[i32; REGISTER_COUNT] {
        &self.registers
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    pub fn set_flags(&mut self, flags: Flags) {
        self.flags = flags;
    }

    /// The program counter (1-based).
    pub fn pc(&self) -> usize {
        self.pc
    }

    /// Continue execution at `line` instead of the following one.
    pub fn jump(&mut self, line: usize) {
        self.jump = Some(line);
    }

    pub(crate) fn set_pc(&mut self, line: usize) {
        self.pc = line;
    }

    fn out_of_range(&self, index: usize) -> RuntimeError {
        RuntimeError::RegisterOutOfRange {
            at: self.pc,
            register: format!("r{index}"),
        }
    }
}

/// The Blub register machine.
///
/// Owns its state and instruction table; borrows the program read-only for
/// the whole run.
pub struct Machine<'a> {
    /// The program being executed.
    pub(crate) program: &'a Program,
    /// Built-ins plus any registered extensions.
    pub(crate) instructions: InstructionSet,
    pub(crate) state: MachineState,
}

impl<'a> Machine<'a> {
    /// Create a machine with the built-in instruction set.
    pub fn new(program: &'a Program) -> Self {
        Self::with_instruction_set(program, InstructionSet::default())
    }

    /// Create a machine with a custom instruction set.
    pub fn with_instruction_set(program: &'a Program, instructions: InstructionSet) -> Self {
        Self {
            program,
            instructions,
            state: MachineState::default(),
        }
    }

    pub fn state(&self) -> &MachineState {
        &self.state
    }

    /// Consume the machine, keeping its final state.
    pub fn into_state(self) -> MachineState {
        self.state
    }

    pub fn instruction_set(&self) -> &InstructionSet {
        &self.instructions
    }

    /// Add an instruction to this machine's table. See [`InstructionSet::register`].
    pub fn register_instruction(
        &mut self,
        name: &str,
        arity: u8,
        handler: Handler,
    ) -> Result<(), TableError> {
        self.instructions.register(name, arity, handler)
    }

    /// Remove an extension instruction. Built-ins stay.
    pub fn unregister_instruction(&mut self, name: &str) -> bool {
        self.instructions.unregister(name)
    }

    /// Returns true once the program counter has run past the last line.
    pub fn is_finished(&self) -> bool {
        self.state.pc > self.program.len()
    }

    /// Clear registers and flags and rewind to line 1.
    pub fn reset(&mut self) {
        self.state = MachineState::default();
    }
}
