//! Error types shared by the galena crates.

use thiserror::Error;

/// The failure modes of the engine.
///
/// There are deliberately few: bit array access past the backing words and
/// caller-supplied buffers of the wrong size. Lookups that can simply miss
/// (hash grid, world, raycaster) return [`Option`] instead.
#[derive(Error, Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// A bit position past the end of a bit array.
    #[error("bit position {pos} out of range for {bit_len} bits")]
    BitOutOfRange { pos: u32, bit_len: u32 },

    /// A caller-supplied output buffer whose length does not match the
    /// length required by the operation.
    #[error("buffer length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}

pub type Result<T> = core::result::Result<T, Error>;
