//! Main execution loop for the Blub machine.

use std::io::Write;

use crate::error::RuntimeError;
use crate::machine::Machine;
use crate::validate::Validator;

impl<'a> Machine<'a> {
    /// Run until the program counter passes the last line or an
    /// instruction fails.
    pub fn run(&mut self, out: &mut dyn Write) -> Result<(), RuntimeError> {
        while self.step(out)? {}
        Ok(())
    }

    /// Execute the instruction at the program counter.
    ///
    /// Returns `Ok(true)` while instructions remain, `Ok(false)` once the
    /// program counter has run past the end.
    pub fn step(&mut self, out: &mut dyn Write) -> Result<bool, RuntimeError> {
        if self.is_finished() {
            return Ok(false);
        }

        let at = self.state.pc();
        let instr = self.program.get(at)?;
        let malformed = || RuntimeError::MalformedInstruction {
            at,
            text: instr.to_string().trim().to_string(),
        };

        if instr.mnemonic().is_empty() || instr.op1().is_empty() {
            return Err(malformed());
        }
        let def = self
            .instructions
            .lookup(instr.mnemonic())
            .ok_or_else(malformed)?;
        let operands = Validator::new(instr, at).check(&def, self.program)?;

        log::trace!("{at}: {} {:?}", instr.kind(), operands);
        self.state.jump = None;
        (def.handler)(&mut self.state, &operands, out)?;

        let next = match self.state.jump.take() {
            Some(target) => {
                log::debug!("line {at}: branch to line {target}");
                target
            }
            None => at + 1,
        };
        self.state.set_pc(next);

        Ok(!self.is_finished())
    }
}
