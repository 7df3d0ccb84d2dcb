//! Flash-cart save containers.
//!
//! A flash cart writes battery saves in its own on-device layout. Each
//! supported cart gets a type implementing [`FlashCartSaveData`] that holds
//! the cart's bytes together with the equivalent raw save, so a caller can
//! write out either side.

use strum::Display;

use crate::error::Error;
use crate::util::expansion::{is_byte_expanded, is_eeprom_save};

pub mod mega_sd;

pub use mega_sd::{Encoding, MegaSdSave, detect};

/// Which representation a buffer claims to be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Form {
    /// On-device layout written by the flash cart.
    FlashCart,
    /// Canonical zero-filled layout used by emulators.
    Raw,
}

/// Kind of save memory, inferred from the buffer shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum SaveKind {
    /// Small serial EEPROM, never byte expanded.
    Eeprom,
    /// Battery-backed SRAM, byte expanded.
    Sram,
}

impl SaveKind {
    /// Classify a buffer by shape alone. EEPROM wins when both tests pass.
    pub fn classify(bytes: &[u8]) -> Option<Self> {
        if is_eeprom_save(bytes) {
            Some(Self::Eeprom)
        } else if is_byte_expanded(bytes) {
            Some(Self::Sram)
        } else {
            None
        }
    }
}

/// A save converted between a flash cart's layout and the raw layout.
///
/// Implementors are only constructed through the factory functions, so the
/// two buffers always agree with each other.
pub trait FlashCartSaveData: Sized {
    /// File extension the flash cart uses for its save files.
    const FLASH_CART_FILE_EXTENSION: &'static str;

    /// File extension of the raw side, when the format implies one.
    const RAW_FILE_EXTENSION: Option<&'static str>;

    /// Parse bytes read from the flash cart.
    fn from_flash_cart_data(bytes: &[u8]) -> Result<Self, Error>;

    /// Build the flash-cart layout from a raw save.
    fn from_raw_data(bytes: &[u8]) -> Result<Self, Error>;

    /// Resize the raw save and re-encode it.
    fn with_new_size(&self, new_size: usize) -> Result<Self, Error>;

    fn flash_cart_data(&self) -> &[u8];

    fn raw_data(&self) -> &[u8];

    /// ROM class the conversion needs to know about, if any.
    fn requires_rom_class() -> Option<&'static str> {
        None
    }

    /// Platform whose output sizes the caller should adjust, if any.
    fn adjust_output_sizes_platform() -> Option<&'static str> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_prefers_eeprom() {
        // Small expanded buffers are still EEPROM-shaped.
        assert_eq!(SaveKind::classify(&[1, 0, 2, 0]), Some(SaveKind::Eeprom));
        assert_eq!(SaveKind::classify(&[0x5A; 2048]), Some(SaveKind::Eeprom));
        assert_eq!(SaveKind::classify(&[0u8; 16384]), Some(SaveKind::Sram));
        assert_eq!(SaveKind::classify(&[0x5A; 8193]), None);
    }

    #[test]
    fn display_names() {
        assert_eq!(Form::FlashCart.to_string(), "flash-cart");
        assert_eq!(Form::Raw.to_string(), "raw");
        assert_eq!(SaveKind::Sram.to_string(), "SRAM");
    }
}
