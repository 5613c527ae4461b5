//! Constants shared across the interpreter.

/// Memory layout constants.
pub mod memory {
    /// Total addressable RAM.
    pub const SIZE: usize = 0x1000; // 4096

    /// The largest ROM that fits between `cpu::PROGRAM_COUNTER` and `SIZE`.
    pub const MAX_ROM_SIZE: usize = SIZE - cpu::PROGRAM_COUNTER;

    /// Masks an address down to the 12 bits CHIP-8 memory actually uses.
    pub const MASK_12BIT: usize = 0x0FFF;

    /// Opcode encoding information.
    pub mod opcodes {
        /// Every instruction is this many bytes wide.
        pub const SIZE: usize = 2;
    }
}

/// CPU related constants.
pub mod cpu {
    /// Programs are loaded starting at this address.
    pub const PROGRAM_COUNTER: usize = 0x0200;

    /// Default CPU clock, in Hz, absent a `--cpufreq` override.
    pub const DEFAULT_HERTZ: u64 = 700;

    /// Register file layout.
    pub mod register {
        /// Number of general purpose data registers (V0..VF).
        pub const SIZE: usize = 16;
        /// Index of VF, the flag register.
        pub const FLAG: usize = SIZE - 1;
    }

    /// Call stack layout.
    pub mod stack {
        /// Maximum nesting depth.
        pub const SIZE: usize = 16;
    }
}

/// The 60 Hz delay/sound timer clock.
pub mod timer {
    /// Timer decrement rate, in Hz. Not user-configurable.
    pub const HERTZ: u64 = 60;
}

/// Display related constants.
pub mod display {
    /// Framebuffer width, in pixels.
    pub const WIDTH: usize = 64;
    /// Framebuffer height, in pixels.
    pub const HEIGHT: usize = 32;
    /// Total framebuffer cells.
    pub const RESOLUTION: usize = WIDTH * HEIGHT;

    /// The built in hexadecimal font.
    pub mod fontset {
        /// Where the font table is installed in memory.
        pub const LOCATION: usize = 0x050;
        /// Bytes per glyph (4x5 pixels packed one row per byte).
        pub const GLYPH_SIZE: usize = 5;

        /// The `0`-`F` hexadecimal glyphs, five bytes each.
        pub const FONTSET: [u8; 80] = [
            0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
            0x20, 0x60, 0x20, 0x20, 0x70, // 1
            0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
            0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
            0x90, 0x90, 0xF0, 0x10, 0x10, // 4
            0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
            0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
            0xF0, 0x10, 0x20, 0x40, 0x40, // 7
            0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
            0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
            0xF0, 0x90, 0xF0, 0x90, 0x90, // A
            0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
            0xF0, 0x80, 0x80, 0x80, 0xF0, // C
            0xE0, 0x90, 0x90, 0x90, 0xE0, // D
            0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
            0xF0, 0x80, 0xF0, 0x80, 0x80, // F
        ];
    }
}

/// Keypad related constants.
pub mod keypad {
    /// Number of hex keys, 0x0-0xF.
    pub const SIZE: usize = 16;

    /// The reference CHIP-8 -> host key layout used by `terminal.rs`,
    /// in CHIP-8-key order 0x0..0xF.
    pub const HOST_LAYOUT: [char; SIZE] = [
        'x', '1', '2', '3', 'q', 'w', 'e', 'a', 's', 'd', 'z', 'c', '4', 'r', 'f', 'v',
    ];
}
