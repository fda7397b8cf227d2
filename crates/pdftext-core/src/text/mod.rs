//! Text conversion and cleanup.

pub mod codec;
pub mod normalize;

pub use codec::{utf16_to_utf8, utf16le_bytes_to_utf8, utf8_to_utf16};
pub use normalize::{NormalizeOptions, normalize};
