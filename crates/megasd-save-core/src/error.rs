use thiserror::Error;

use crate::flash_cart::Form;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The buffer matches none of the shapes accepted for the requested form.
    #[error("this does not appear to be a Mega SD {form} save file")]
    UnrecognizedFormat { form: Form },

    /// Signature bytes at `offset` differ from the expected magic.
    #[error("magic mismatch at offset {offset}: expected {expected:02X?}, found {found:02X?}")]
    MagicMismatch {
        offset: usize,
        expected: Vec<u8>,
        found: Vec<u8>,
    },

    /// A raw save cannot be resized to this many bytes.
    #[error("invalid raw save size: {size}")]
    InvalidSize { size: usize },
}
