//! Conversion between Mega SD flash-cart saves and raw Genesis saves.
//!
//! ```no_run
//! use megasd_save_core::MegaSdSave;
//!
//! # fn demo(bytes: &[u8]) -> Result<(), megasd_save_core::Error> {
//! let save = MegaSdSave::from_flash_cart_data(bytes)?;
//! let raw = save.raw_data();
//! let back = MegaSdSave::from_raw_data(raw)?;
//! assert!(back.flash_cart_data().starts_with(b"BUP2"));
//! # Ok(())
//! # }
//! ```
//!
//! Every conversion is a pure function over byte slices. File handling is left
//! to the caller.

pub mod error;
pub mod flash_cart;
pub mod util;

pub use error::Error;
pub use flash_cart::{Encoding, FlashCartSaveData, Form, MegaSdSave, SaveKind, detect};
