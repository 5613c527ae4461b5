//! The CPU dump used for verbose diagnostics and for logging execution
//! faults: opcode, PC, SP, I, V0..VF, and the live stack.

use std::fmt;

use super::chipset::ChipSet;

impl fmt::Display for ChipSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "opcode: {:#06X}", self.opcode())?;
        writeln!(f, "pc: {:#06X}  sp: {:#04X}  i: {:#06X}", self.pc(), self.sp(), self.index())?;
        writeln!(
            f,
            "delay: {:#04X}  sound: {:#04X}",
            self.delay_timer(),
            self.sound_timer()
        )?;

        write!(f, "registers:")?;
        for (i, v) in self.registers().iter().enumerate() {
            write!(f, " v{:X}={:#04X}", i, v)?;
        }
        writeln!(f)?;

        write!(f, "stack:")?;
        for addr in self.stack() {
            write!(f, " {:#06X}", addr)?;
        }
        writeln!(f)
    }
}
