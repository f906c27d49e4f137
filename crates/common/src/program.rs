//! The program store: a dense, 1-indexed, editable sequence of instructions.
//!
//! Line numbers always run `1..=len()` without gaps. A side index maps every
//! declared label to its line and is relocated on each insert and delete, so
//! `get(address_of(l))?.label() == l` holds for every indexed label.

use std::collections::HashMap;

use crate::error::ProgramError;
use crate::instruction::Instruction;

/// A Blub program.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    /// Line `n` lives at index `n - 1`.
    instructions: Vec<Instruction>,
    /// Label → line number.
    labels: HashMap<String, usize>,
}

impl Program {
    /// Create an empty program.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a program by appending each instruction in order.
    pub fn from_instructions<I>(instructions: I) -> Result<Self, ProgramError>
    where
        I: IntoIterator<Item = Instruction>,
    {
        let mut program = Self::new();
        for instr in instructions {
            program.push(instr)?;
        }
        Ok(program)
    }

    /// Append an instruction at the next line. Returns its line number.
    pub fn push(&mut self, instr: Instruction) -> Result<usize, ProgramError> {
        self.check_new_label(&instr)?;
        self.instructions.push(instr);
        let line = self.instructions.len();
        self.index_label(line);
        Ok(line)
    }

    /// Insert an instruction at `line`, shifting that line and everything
    /// after it one position later.
    ///
    /// A `line` past the end appends instead. Returns the line actually used.
    pub fn insert_at(&mut self, line: usize, instr: Instruction) -> Result<usize, ProgramError> {
        if line == 0 {
            return Err(self.out_of_range(line));
        }
        if line > self.instructions.len() {
            return self.push(instr);
        }
        self.check_new_label(&instr)?;

        self.instructions.insert(line - 1, instr);
        for target in self.labels.values_mut() {
            if *target >= line {
                *target += 1;
            }
        }
        self.index_label(line);
        Ok(line)
    }

    /// Remove the instruction at `line`, shifting everything after it one
    /// position earlier. Returns the removed instruction.
    pub fn delete_at(&mut self, line: usize) -> Result<Instruction, ProgramError> {
        if line == 0 || line > self.instructions.len() {
            return Err(self.out_of_range(line));
        }

        let removed = self.instructions.remove(line - 1);
        self.labels.retain(|_, target| *target != line);
        for target in self.labels.values_mut() {
            if *target > line {
                *target -= 1;
            }
        }
        Ok(removed)
    }

    /// The instruction at `line` (1-based).
    pub fn get(&self, line: usize) -> Result<&Instruction, ProgramError> {
        line.checked_sub(1)
            .and_then(|idx| self.instructions.get(idx))
            .ok_or_else(|| self.out_of_range(line))
    }

    /// The line number a label is bound to.
    pub fn address_of(&self, label: &str) -> Result<usize, ProgramError> {
        self.labels
            .get(label)
            .copied()
            .ok_or_else(|| ProgramError::UnknownLabel(label.to_string()))
    }

    /// Returns true if some line declares `label`.
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.contains_key(label)
    }

    /// Number of instructions.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Returns true if the program has no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Iterate over `(line, instruction)` pairs in line order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Instruction)> + '_ {
        self.instructions
            .iter()
            .enumerate()
            .map(|(idx, instr)| (idx + 1, instr))
    }

    /// Iterate over `(label, line)` pairs in no particular order.
    pub fn labels(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.labels.iter().map(|(label, &line)| (label.as_str(), line))
    }

    fn check_new_label(&self, instr: &Instruction) -> Result<(), ProgramError> {
        match self.labels.get(instr.label()) {
            Some(&line) if !instr.label().is_empty() => Err(ProgramError::DuplicateLabel {
                label: instr.label().to_string(),
                line,
            }),
            _ => Ok(()),
        }
    }

    fn index_label(&mut self, line: usize) {
        let label = self.instructions[line - 1].label();
        if !label.is_empty() {
            self.labels.insert(label.to_string(), line);
        }
    }

    fn out_of_range(&self, line: usize) -> ProgramError {
        ProgramError::OutOfRange {
            line,
            len: self.instructions.len(),
        }
    }
}
