//! Genesis save shapes and byte expansion.
//!
//! Genesis SRAM sits on one half of a 16-bit bus, so many tools store it
//! *byte expanded*: every data byte is followed by a fill byte. In this crate
//! the data always lives at even offsets and the fill at odd offsets:
//!
//! ```text
//! collapsed: d0 d1 d2 ...
//! expanded:  d0 ff d1 ff d2 ff ...
//! ```
//!
//! Retrode dumps repeat every byte instead (`d0 d0 d1 d1 ...`). Those count as
//! expanded too, and collapse the same way.
//!
//! EEPROM saves are small serial chips and are never expanded.

/// Largest EEPROM save we expect to see (24C64 and smaller parts).
pub const EEPROM_MAX_SIZE: usize = 8192;

/// Small enough to be an EEPROM save.
pub fn is_eeprom_save(bytes: &[u8]) -> bool {
    bytes.len() <= EEPROM_MAX_SIZE
}

/// Every odd byte is the same fill value, or every byte pair is repeated.
pub fn is_byte_expanded(bytes: &[u8]) -> bool {
    if bytes.is_empty() || bytes.len() % 2 != 0 {
        return false;
    }

    let fill = bytes[1];
    let filled = bytes.chunks_exact(2).all(|pair| pair[1] == fill);
    let repeated = bytes.chunks_exact(2).all(|pair| pair[0] == pair[1]);

    filled || repeated
}

/// Interleave `fill` after every data byte.
pub fn byte_expand(bytes: &[u8], fill: u8) -> Vec<u8> {
    bytes.iter().flat_map(|&b| [b, fill]).collect()
}

/// Keep only the data bytes of an expanded buffer. A trailing odd byte is
/// data and is kept.
pub fn byte_collapse(bytes: &[u8]) -> Vec<u8> {
    bytes.iter().step_by(2).copied().collect()
}

/// Rewrite every fill position of an expanded buffer to `fill`.
pub fn change_fill_byte(bytes: &[u8], fill: u8) -> Vec<u8> {
    let mut out = bytes.to_vec();
    out.iter_mut().skip(1).step_by(2).for_each(|b| *b = fill);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eeprom_threshold() {
        assert!(is_eeprom_save(&[0u8; 64]));
        assert!(is_eeprom_save(&[0u8; EEPROM_MAX_SIZE]));
        assert!(!is_eeprom_save(&[0u8; EEPROM_MAX_SIZE + 1]));
    }

    #[test]
    fn detects_filled_and_repeated_layouts() {
        assert!(is_byte_expanded(&[0x12, 0xFF, 0x34, 0xFF]));
        assert!(is_byte_expanded(&[0x12, 0x00, 0x34, 0x00]));
        assert!(is_byte_expanded(&[0x12, 0x12, 0x34, 0x34]));

        assert!(!is_byte_expanded(&[0x12, 0x00, 0x34, 0xFF]));
        assert!(!is_byte_expanded(&[0x12, 0x00, 0x34]));
        assert!(!is_byte_expanded(&[]));
    }

    #[test]
    fn expand_then_collapse() {
        let data = [0xDE, 0xAD, 0xBE, 0xEF];
        let expanded = byte_expand(&data, 0x00);
        assert_eq!(expanded, vec![0xDE, 0, 0xAD, 0, 0xBE, 0, 0xEF, 0]);
        assert_eq!(byte_collapse(&expanded), data);
    }

    #[test]
    fn collapse_retrode_layout() {
        assert_eq!(byte_collapse(&[1, 1, 2, 2, 3, 3]), vec![1, 2, 3]);
    }

    #[test]
    fn change_fill_keeps_data() {
        let old = [0x11, 0xFF, 0x22, 0xFF, 0x33];
        assert_eq!(change_fill_byte(&old, 0x00), vec![0x11, 0, 0x22, 0, 0x33]);
    }
}
