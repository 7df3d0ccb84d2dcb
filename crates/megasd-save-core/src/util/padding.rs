//! Trailing padding detection and removal.
//!
//! Save files in the wild are padded at the end with either `0x00` or `0xFF`.
//! Any other trailing byte is treated as real data and never stripped.

use tracing::trace;

/// Byte values recognised as end-of-file padding.
pub const PADDING_VALUES: [u8; 2] = [0x00, 0xFF];

/// Padding run found at the end of a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Padding {
    /// The repeated byte. Zero when `count` is zero.
    pub value: u8,
    /// How many trailing bytes equal `value`.
    pub count: usize,
}

/// Detect the padding value and its run length at the end of `bytes`.
pub fn pad_from_end(bytes: &[u8]) -> Padding {
    let Some(&last) = bytes.last() else {
        return Padding { value: 0, count: 0 };
    };

    if !PADDING_VALUES.contains(&last) {
        return Padding { value: 0, count: 0 };
    }

    let count = bytes.iter().rev().take_while(|&&b| b == last).count();
    trace!(value = last, count, len = bytes.len(), "detected end padding");

    Padding { value: last, count }
}

/// Drop the last `count` bytes. Removing more than the buffer holds yields an
/// empty slice.
pub fn remove_padding_from_end(bytes: &[u8], count: usize) -> &[u8] {
    &bytes[..bytes.len().saturating_sub(count)]
}

/// Pad at the end with `fill` until the buffer is at least `min_size` long.
/// Buffers that are already long enough are copied unchanged.
pub fn pad_at_end_to_minimum_size(bytes: &[u8], fill: u8, min_size: usize) -> Vec<u8> {
    let mut padded = bytes.to_vec();
    if padded.len() < min_size {
        padded.resize(min_size, fill);
    }
    padded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_zero_and_ff_runs() {
        assert_eq!(
            pad_from_end(&[1, 2, 0, 0, 0]),
            Padding { value: 0x00, count: 3 }
        );
        assert_eq!(
            pad_from_end(&[1, 0xFF, 0xFF]),
            Padding { value: 0xFF, count: 2 }
        );
    }

    #[test]
    fn other_trailing_values_are_data() {
        assert_eq!(pad_from_end(&[0, 0, 0x42]), Padding { value: 0, count: 0 });
        assert_eq!(pad_from_end(&[]), Padding { value: 0, count: 0 });
    }

    #[test]
    fn whole_buffer_can_be_padding() {
        let padding = pad_from_end(&[0xFF; 16]);
        assert_eq!(padding.count, 16);
        assert!(remove_padding_from_end(&[0xFF; 16], padding.count).is_empty());
    }

    #[test]
    fn remove_saturates() {
        assert_eq!(remove_padding_from_end(&[1, 2, 3], 1), &[1, 2]);
        assert!(remove_padding_from_end(&[1, 2, 3], 10).is_empty());
    }

    #[test]
    fn pads_only_when_short() {
        assert_eq!(pad_at_end_to_minimum_size(&[7], 0xFF, 4), vec![7, 0xFF, 0xFF, 0xFF]);
        assert_eq!(pad_at_end_to_minimum_size(&[7, 8, 9], 0xFF, 2), vec![7, 8, 9]);
    }
}
