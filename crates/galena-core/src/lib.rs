pub mod bit_array;
pub mod bits;
pub mod error;
pub mod float;

pub use bit_array::BitArray32;
pub use error::{Error, Result};

// Re-exports.
pub use approx;
pub use ilattice;
pub use ilattice::glam;
pub use static_assertions;
