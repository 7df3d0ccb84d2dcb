//! Mega SD save files.
//!
//! The Mega SD has written two layouts over its firmware history:
//!
//! - **Old style**: byte expanded with `0xFF` fill, no header, total length a
//!   power of two.
//! - **New style**: not expanded, prefixed with the ASCII magic `BUP2`, and
//!   padded out to [`NEW_STYLE_PADDED_SIZE`] bytes after the magic.
//!
//! ```text
//! offset 0      "BUP2"
//! offset 4      payload (EEPROM data padded with 0xFF,
//!                        or collapsed SRAM data padded with 0x00)
//! offset 32772  end of file
//! ```
//!
//! Both layouts are accepted as input. Output is always new style, so old
//! saves keep working without the user having to pick a layout.
//!
//! # Detection order
//! Flash-cart buffers are tested for new style first, then old style. The
//! old-style test is shape only and would also accept some magic-prefixed
//! buffers (for example `BUP2` followed by four bytes), so the order must not
//! change.

use strum::Display;
use tracing::debug;

use crate::error::Error;
use crate::flash_cart::{FlashCartSaveData, Form, SaveKind};
use crate::util::expansion::{
    byte_collapse, byte_expand, change_fill_byte, is_byte_expanded, is_eeprom_save,
};
use crate::util::magic::check_magic;
use crate::util::padding::{pad_at_end_to_minimum_size, pad_from_end, remove_padding_from_end};
use crate::util::{RAW_FILL_BYTE, is_power_of_two, resize_raw_save};

/// Signature at the start of every new-style file.
pub const MAGIC: &[u8; 4] = b"BUP2";
pub const MAGIC_OFFSET: usize = 0;

/// Payload size of a new-style file, excluding the magic. SRAM and EEPROM
/// saves are both padded out to this size.
pub const NEW_STYLE_PADDED_SIZE: usize = 32768;

/// Padding after SRAM data in new-style files. Most sample files used `0x00`,
/// though one used `0xFF`; both are accepted on input.
pub const NEW_STYLE_PADDING_BYTE_SRAM: u8 = 0x00;
/// Padding after EEPROM data in new-style files.
pub const NEW_STYLE_PADDING_BYTE_EEPROM: u8 = 0xFF;

/// Fill byte of old-style byte-expanded files.
pub const OLD_STYLE_FILL_BYTE: u8 = 0xFF;

/// Minimum raw EEPROM size. The Mega SD only writes 64 bytes for some games,
/// but other tools and emulators expect 128.
pub const RAW_EEPROM_MIN_SIZE: usize = 128;
/// Minimum raw SRAM size: 8 KiB of data, byte expanded.
pub const RAW_SRAM_MIN_SIZE: usize = 16384;

/// Layout detected for a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Encoding {
    /// `BUP2`-prefixed, collapsed, padded.
    NewStyle,
    /// Unprefixed, byte expanded with `0xFF`.
    OldStyle,
    /// Canonical raw save.
    Raw,
    Unrecognized,
}

/// Run the ordered predicate chain for `form`.
///
/// For [`Form::FlashCart`] the result is [`Encoding::NewStyle`],
/// [`Encoding::OldStyle`] or [`Encoding::Unrecognized`], tested in that order.
/// For [`Form::Raw`] it is [`Encoding::Raw`] or [`Encoding::Unrecognized`].
pub fn detect(bytes: &[u8], form: Form) -> Encoding {
    let encoding = match form {
        Form::FlashCart if is_new_style(bytes) => Encoding::NewStyle,
        Form::FlashCart if is_old_style(bytes) => Encoding::OldStyle,
        Form::Raw if is_raw(bytes) => Encoding::Raw,
        _ => Encoding::Unrecognized,
    };
    debug!(%form, %encoding, len = bytes.len(), "detected save encoding");
    encoding
}

fn is_new_style(bytes: &[u8]) -> bool {
    if check_magic(bytes, MAGIC_OFFSET, MAGIC).is_err() {
        return false;
    }

    bytes.len() > MAGIC.len() && is_power_of_two(bytes.len() - MAGIC.len())
}

// The EEPROM half of this test is a guess: no old-style EEPROM sample has
// been seen. See `old_style_to_raw`.
fn is_old_style(bytes: &[u8]) -> bool {
    SaveKind::classify(bytes).is_some() && is_power_of_two(bytes.len())
}

fn is_raw(bytes: &[u8]) -> bool {
    SaveKind::classify(bytes).is_some() && is_power_of_two(bytes.len())
}

/// Kind of an unprefixed (old-style or raw) save.
///
/// An expanded buffer of at least [`RAW_SRAM_MIN_SIZE`] bytes is SRAM even
/// when little of it is in use; otherwise `unpadded` decides by length.
fn save_kind(bytes: &[u8], unpadded: &[u8]) -> SaveKind {
    if bytes.len() >= RAW_SRAM_MIN_SIZE && is_byte_expanded(bytes) {
        SaveKind::Sram
    } else if is_eeprom_save(unpadded) {
        SaveKind::Eeprom
    } else {
        SaveKind::Sram
    }
}

/// Classify a raw save, returning the bytes left after removing end padding.
fn raw_kind(raw: &[u8]) -> (SaveKind, &[u8]) {
    let padding = pad_from_end(raw);
    let unpadded = remove_padding_from_end(raw, padding.count);

    (save_kind(raw, unpadded), unpadded)
}

/// Old style to raw.
///
/// SRAM saves have their trailing `0xFF` run dropped and their fill rewritten
/// to zero, then are zero padded back to the file's original length so the raw
/// save keeps a power-of-two size.
///
/// The EEPROM branch is provisional: it assumes an old-style EEPROM save is
/// the bare EEPROM contents, which has not been checked against real files.
fn old_style_to_raw(bytes: &[u8]) -> Vec<u8> {
    if save_kind(bytes, bytes) == SaveKind::Eeprom {
        debug!(len = bytes.len(), "old-style EEPROM save (unverified layout)");
        return pad_at_end_to_minimum_size(bytes, RAW_FILL_BYTE, RAW_EEPROM_MIN_SIZE);
    }

    let padding = pad_from_end(bytes);
    let unpadded = remove_padding_from_end(bytes, padding.count);
    debug!(
        len = bytes.len(),
        padding = padding.count,
        "old-style SRAM save"
    );

    pad_at_end_to_minimum_size(
        &change_fill_byte(unpadded, RAW_FILL_BYTE),
        RAW_FILL_BYTE,
        bytes.len(),
    )
}

/// New style to raw. Files have been seen padded with both `0x00` and `0xFF`,
/// so the padding value is detected rather than assumed.
///
/// Collapsed SRAM and the larger EEPROMs overlap in length, so a payload is
/// only EEPROM when it fits an EEPROM *and* is followed by the EEPROM padding
/// byte. An SRAM save of at most 8 KiB padded with `0xFF` therefore decodes
/// as EEPROM.
fn new_style_to_raw(bytes: &[u8]) -> Vec<u8> {
    let payload = &bytes[MAGIC.len()..];
    let padding = pad_from_end(payload);
    let unpadded = remove_padding_from_end(payload, padding.count);

    if is_eeprom_save(unpadded) && padding.value == NEW_STYLE_PADDING_BYTE_EEPROM {
        debug!(len = unpadded.len(), "new-style EEPROM save");
        return pad_at_end_to_minimum_size(unpadded, RAW_FILL_BYTE, RAW_EEPROM_MIN_SIZE);
    }

    debug!(len = unpadded.len(), "new-style SRAM save");
    pad_at_end_to_minimum_size(
        &byte_expand(unpadded, RAW_FILL_BYTE),
        RAW_FILL_BYTE,
        RAW_SRAM_MIN_SIZE,
    )
}

/// Raw to new style.
///
/// The raw input may be zero filled (emulators, Mega EverDrive Pro) or have
/// repeated bytes (Retrode). The SRAM branch collapses the raw buffer as
/// given, before padding removal, so an odd-length padding run cannot shift
/// the byte pairs.
fn raw_to_new_style(raw: &[u8]) -> Vec<u8> {
    let (kind, unpadded) = raw_kind(raw);

    let (payload, padding_byte) = match kind {
        SaveKind::Eeprom => (unpadded.to_vec(), NEW_STYLE_PADDING_BYTE_EEPROM),
        SaveKind::Sram => (byte_collapse(raw), NEW_STYLE_PADDING_BYTE_SRAM),
    };
    debug!(%kind, len = payload.len(), "encoding new-style save");

    let mut out = Vec::with_capacity(MAGIC.len() + payload.len().max(NEW_STYLE_PADDED_SIZE));
    out.extend_from_slice(MAGIC);
    out.extend(pad_at_end_to_minimum_size(
        &payload,
        padding_byte,
        NEW_STYLE_PADDED_SIZE,
    ));
    out
}

/// A Mega SD save: the flash-cart bytes and the matching raw save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MegaSdSave {
    flash_cart: Vec<u8>,
    raw: Vec<u8>,
}

impl MegaSdSave {
    /// Parse a file written by the Mega SD, in either layout.
    pub fn from_flash_cart_data(bytes: &[u8]) -> Result<Self, Error> {
        let raw = match detect(bytes, Form::FlashCart) {
            Encoding::NewStyle => new_style_to_raw(bytes),
            Encoding::OldStyle => old_style_to_raw(bytes),
            _ => {
                return Err(Error::UnrecognizedFormat {
                    form: Form::FlashCart,
                });
            }
        };

        Ok(Self {
            flash_cart: bytes.to_vec(),
            raw,
        })
    }

    /// Encode a raw save as a new-style Mega SD file.
    pub fn from_raw_data(bytes: &[u8]) -> Result<Self, Error> {
        if detect(bytes, Form::Raw) != Encoding::Raw {
            return Err(Error::UnrecognizedFormat { form: Form::Raw });
        }

        Ok(Self {
            flash_cart: raw_to_new_style(bytes),
            raw: bytes.to_vec(),
        })
    }

    /// Resize the raw save to `new_size` bytes and re-encode it.
    ///
    /// The result is always new style, whatever layout `self` was parsed from.
    pub fn with_new_size(&self, new_size: usize) -> Result<Self, Error> {
        let raw = resize_raw_save(&self.raw, new_size)?;
        Self::from_raw_data(&raw)
    }

    pub fn flash_cart_data(&self) -> &[u8] {
        &self.flash_cart
    }

    pub fn raw_data(&self) -> &[u8] {
        &self.raw
    }

    /// EEPROM or SRAM, judged from the raw save the same way encoding does.
    pub fn kind(&self) -> SaveKind {
        raw_kind(&self.raw).0
    }

    /// Consume the save, returning `(flash_cart, raw)`.
    pub fn into_parts(self) -> (Vec<u8>, Vec<u8>) {
        (self.flash_cart, self.raw)
    }
}

impl FlashCartSaveData for MegaSdSave {
    const FLASH_CART_FILE_EXTENSION: &'static str = "srm";
    const RAW_FILE_EXTENSION: Option<&'static str> = None;

    fn from_flash_cart_data(bytes: &[u8]) -> Result<Self, Error> {
        MegaSdSave::from_flash_cart_data(bytes)
    }

    fn from_raw_data(bytes: &[u8]) -> Result<Self, Error> {
        MegaSdSave::from_raw_data(bytes)
    }

    fn with_new_size(&self, new_size: usize) -> Result<Self, Error> {
        MegaSdSave::with_new_size(self, new_size)
    }

    fn flash_cart_data(&self) -> &[u8] {
        MegaSdSave::flash_cart_data(self)
    }

    fn raw_data(&self) -> &[u8] {
        MegaSdSave::raw_data(self)
    }
}
