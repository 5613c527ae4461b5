//! Abstractions over the host capabilities the emulation loop needs:
//! presenting a frame, gating a tone, and sampling the keypad. THE CORE
//! depends only on these traits, never on a concrete windowing, audio,
//! or input library.

use crate::definitions::{display, keypad};

/// Presents the framebuffer. Implementors own the actual window/surface.
pub trait VideoOutput {
    /// Renders one full frame. Called only when `SCREEN_DIRTY` was set.
    fn present(&mut self, frame: &[bool; display::RESOLUTION]) -> Result<(), String>;
}

/// Gates the CHIP-8 tone on or off. CHIP-8 has no notion of pitch beyond
/// "sound timer nonzero"; synthesis strategy is a host concern.
pub trait AudioGate {
    /// Turns the tone on or off. Called once per loop pass with the
    /// current `sound_timer > 0` state.
    fn set_active(&mut self, on: bool);
}

/// A control event raised by the keyboard adapter, distinct from raw key
/// state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlEvent {
    /// Terminate the emulation loop.
    Quit,
    /// Reload the current ROM from scratch.
    Reload,
    /// Dump CPU state to the log.
    Dump,
}

/// Samples the 16-key hex keypad and surfaces control events.
pub trait KeyboardSource {
    /// Refreshes keypad state and returns it along with any pending
    /// control event. Called once per loop pass, before stepping the CPU.
    fn poll(&mut self) -> Result<([bool; keypad::SIZE], Option<ControlEvent>), String>;
}
