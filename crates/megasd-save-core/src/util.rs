//! Byte-buffer helpers shared by save formats.
//!
//! Everything in here is a pure function over `&[u8]`. None of it knows about
//! the Mega SD container; the converter in [`crate::flash_cart`] composes them.

pub mod expansion;
pub mod magic;
pub mod padding;

use crate::error::Error;

/// Fill byte used by the canonical raw form.
pub const RAW_FILL_BYTE: u8 = 0x00;

/// `true` for 1, 2, 4, 8, ... and `false` for zero.
pub fn is_power_of_two(n: usize) -> bool {
    n.is_power_of_two()
}

/// Resize a raw save to exactly `new_size` bytes.
///
/// Growing pads at the end with [`RAW_FILL_BYTE`]; shrinking truncates. Raw
/// saves are always zero-filled, so zero padding never changes their meaning.
pub fn resize_raw_save(bytes: &[u8], new_size: usize) -> Result<Vec<u8>, Error> {
    if new_size == 0 {
        return Err(Error::InvalidSize { size: new_size });
    }

    let mut resized = bytes[..bytes.len().min(new_size)].to_vec();
    resized.resize(new_size, RAW_FILL_BYTE);
    Ok(resized)
}
