//! Reads a ROM file off disk into the byte-for-byte form the chipset
//! loads at 0x200.

use std::fs;
use std::path::Path;

use crate::definitions::memory;
use crate::error::RomError;

/// A loaded ROM, ready to be copied into the chipset's memory.
#[derive(Clone)]
pub struct Rom {
    name: String,
    data: Box<[u8]>,
}

impl Rom {
    /// Reads `path` off disk, rejecting files that would not fit between
    /// `cpu::PROGRAM_COUNTER` and the end of memory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RomError> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|_| RomError::NotFound {
            path: path.display().to_string(),
        })?;

        if data.len() > memory::MAX_ROM_SIZE {
            return Err(RomError::TooLarge {
                size: data.len(),
                max: memory::MAX_ROM_SIZE,
            });
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self {
            name,
            data: data.into_boxed_slice(),
        })
    }

    /// Builds a ROM directly from in-memory bytes, bypassing the
    /// filesystem. Used by tests that want to feed a hand-assembled
    /// instruction sequence straight to the chipset.
    #[cfg(test)]
    pub fn load_bytes(name: &str, data: &[u8]) -> Self {
        Self {
            name: name.to_string(),
            data: data.to_vec().into_boxed_slice(),
        }
    }

    /// The raw program bytes, to be copied starting at 0x200.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// The ROM's file name, used for logging.
    pub fn name(&self) -> &str {
        &self.name
    }
}
