//! The chipset: memory, registers, program counter, stack, timers, and
//! the fetch/decode/execute cycle that ties them together.

use std::convert::TryInto;

use rand::{rngs::ThreadRng, Rng, RngCore};

use crate::definitions::{cpu, display as display_defs, memory};
use crate::error::ExecutionFault;
use crate::opcode::{build_opcode, Opcode, Opcodes};
use crate::resources::Rom;

use super::display::Display;
use super::keypad::Keypad;

/// Dialect and diagnostic switches, set once at construction.
#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    /// Selects the Cowgod dialect for `8XY6`/`8XYE`/`FX55`/`FX65`.
    pub original_impl: bool,
    /// Enables verbose diagnostics (CPU dumps on fault).
    pub verbose: bool,
}

/// The full machine state: memory, CPU registers, display, and keypad.
/// Exclusively owned by whoever constructs it; adapters only ever see
/// transient borrows through [`crate::devices`] calls.
pub struct ChipSet {
    memory: [u8; memory::SIZE],
    registers: [u8; cpu::register::SIZE],
    index: usize,
    pc: usize,
    stack: [usize; cpu::stack::SIZE],
    sp: usize,
    delay_timer: u8,
    sound_timer: u8,
    display: Display,
    keypad: Keypad,
    /// The most recently fetched instruction, kept around for dumps.
    opcode: Opcode,
    options: Options,
    rng: Box<dyn RngCore>,
}

impl ChipSet {
    /// Builds a fresh machine: memory zeroed, font loaded at 0x050, the
    /// ROM copied in starting at 0x200, PC set to 0x200, and the RNG
    /// seeded from the OS.
    pub fn new(rom: &Rom, options: Options) -> Self {
        let mut memory = [0u8; memory::SIZE];

        let font = display_defs::fontset::FONTSET;
        let font_start = display_defs::fontset::LOCATION;
        memory[font_start..font_start + font.len()].copy_from_slice(&font);

        let data = rom.data();
        memory[cpu::PROGRAM_COUNTER..cpu::PROGRAM_COUNTER + data.len()].copy_from_slice(data);

        log::debug!("loaded rom '{}' ({} bytes)", rom.name(), data.len());

        Self {
            memory,
            registers: [0; cpu::register::SIZE],
            index: 0,
            pc: cpu::PROGRAM_COUNTER,
            stack: [0; cpu::stack::SIZE],
            sp: 0,
            delay_timer: 0,
            sound_timer: 0,
            display: Display::default(),
            keypad: Keypad::default(),
            opcode: 0,
            options,
            rng: Box::new(ThreadRng::default()),
        }
    }

    /// Fetches, decodes, and executes one instruction, advancing the
    /// program counter unless the instruction itself jumped.
    pub fn step(&mut self) -> Result<(), ExecutionFault> {
        // A jump target is masked to 12 bits but that alone still allows
        // pc == memory::SIZE - 1 (0x0FFF), one byte short of a full
        // opcode fetch. Reject before indexing rather than letting
        // `build_opcode` read past the end of `memory`.
        if self.pc + 1 >= memory::SIZE {
            return Err(ExecutionFault::ProgramCounterOutOfBounds(self.pc));
        }

        let opcode = build_opcode(&self.memory, self.pc);
        self.opcode = opcode;

        log::trace!("pc={:#06X} opcode={:#06X}", self.pc, opcode);

        let decoded: Opcodes = opcode.try_into()?;

        // FX0A rewinds the PC by re-dispatching to the same instruction
        // when no key is pressed, so the normal "advance by 2" happens
        // for every other instruction, and dispatch() is responsible for
        // overriding it when a jump/call/skip is involved.
        self.dispatch(decoded)
    }

    /// Decrements both timers toward zero. Called at 60 Hz by the loop,
    /// independent of the CPU clock.
    pub fn tick_timers(&mut self) {
        if self.delay_timer > 0 {
            self.delay_timer -= 1;
        }
        if self.sound_timer > 0 {
            self.sound_timer -= 1;
        }
    }

    /// The current framebuffer, for a video adapter to present.
    pub fn display(&self) -> &Display {
        &self.display
    }

    pub(super) fn display_mut(&mut self) -> &mut Display {
        &mut self.display
    }

    /// Marks the framebuffer as presented.
    pub fn clear_dirty(&mut self) {
        self.display.clear_dirty();
    }

    /// Whether the sound timer is nonzero (the tone should be gated on).
    pub fn sound_active(&self) -> bool {
        self.sound_timer > 0
    }

    /// Replaces the keypad state, e.g. after polling the host keyboard.
    pub fn set_keys(&mut self, keys: [bool; crate::definitions::keypad::SIZE]) {
        self.keypad.set_all(keys);
    }

    // -- accessors used by the pretty-printer and by tests --

    pub(super) fn registers(&self) -> &[u8; cpu::register::SIZE] {
        &self.registers
    }
    pub(super) fn index(&self) -> usize {
        self.index
    }
    pub(super) fn pc(&self) -> usize {
        self.pc
    }
    pub(super) fn sp(&self) -> usize {
        self.sp
    }
    pub(super) fn stack(&self) -> &[usize] {
        &self.stack[..self.sp]
    }
    pub(super) fn opcode(&self) -> Opcode {
        self.opcode
    }
    pub(super) fn delay_timer(&self) -> u8 {
        self.delay_timer
    }
    pub(super) fn sound_timer(&self) -> u8 {
        self.sound_timer
    }

    // -- helpers shared by opcodes.rs --

    pub(super) fn advance(&mut self) {
        self.pc += memory::opcodes::SIZE;
    }

    pub(super) fn skip(&mut self) {
        self.pc += 2 * memory::opcodes::SIZE;
    }

    pub(super) fn jump(&mut self, addr: usize) {
        self.pc = addr & memory::MASK_12BIT;
    }

    pub(super) fn push_stack(&mut self, addr: usize) -> Result<(), ExecutionFault> {
        if self.sp >= cpu::stack::SIZE {
            return Err(ExecutionFault::StackOverflow);
        }
        self.stack[self.sp] = addr;
        self.sp += 1;
        Ok(())
    }

    pub(super) fn pop_stack(&mut self) -> Result<usize, ExecutionFault> {
        if self.sp == 0 {
            return Err(ExecutionFault::StackUnderflow);
        }
        self.sp -= 1;
        Ok(self.stack[self.sp])
    }

    pub(super) fn read_mem(&self, addr: usize) -> u8 {
        self.memory[addr]
    }

    pub(super) fn write_mem(&mut self, addr: usize, value: u8) {
        self.memory[addr] = value;
    }

    pub(super) fn key_pressed(&self, key: usize) -> bool {
        self.keypad.is_pressed(key)
    }

    pub(super) fn first_pressed_key(&self) -> Option<usize> {
        self.keypad.first_pressed()
    }

    pub(super) fn random_byte(&mut self) -> u8 {
        self.rng.gen()
    }

    pub(super) fn options(&self) -> Options {
        self.options
    }

    pub(super) fn reg(&self, r: usize) -> u8 {
        self.registers[r]
    }

    pub(super) fn set_reg(&mut self, r: usize, value: u8) {
        self.registers[r] = value;
    }

    pub(super) fn set_index(&mut self, value: usize) {
        self.index = value & memory::MASK_12BIT;
    }

    pub(super) fn set_delay_timer(&mut self, value: u8) {
        self.delay_timer = value;
    }

    pub(super) fn set_sound_timer(&mut self, value: u8) {
        self.sound_timer = value;
    }
}
