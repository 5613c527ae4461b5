//! A CHIP-8 interpreter core, independent of any particular video, audio,
//! or keyboard backend.
//!
//! [`chip8::ChipSet`] owns memory, registers, the display buffer, and the
//! keypad, and exposes a single-cycle [`chip8::ChipSet::step`]. Everything
//! that talks to the outside world — presenting a frame, gating a tone,
//! reading a terminal — goes through the traits in [`devices`], so the
//! core never depends on a concrete host library.

pub mod chip8;
pub mod definitions;
pub mod devices;
pub mod error;
pub mod opcode;
pub mod resources;
pub mod runner;
pub mod terminal;
