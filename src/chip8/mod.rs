//! The full CHIP-8 machine: memory and fontset, CPU state, display
//! buffer, keypad state, and the instruction semantics that tie them
//! together.

mod chipset;
mod display;
mod keypad;
mod opcodes;
mod print;

pub use chipset::{ChipSet, Options};
pub use display::Display;
pub use keypad::Keypad;

#[cfg(test)]
mod tests;
