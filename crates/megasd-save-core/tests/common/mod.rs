#![allow(dead_code)]

use ctor::ctor;
use megasd_save_core::flash_cart::mega_sd::{MAGIC, NEW_STYLE_PADDED_SIZE};
use megasd_save_core::util::expansion::byte_expand;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[ctor]
fn init_tracing() {
    let subscriber = FmtSubscriber::builder()
        .with_file(true)
        .with_line_number(true)
        .with_max_level(Level::DEBUG)
        .pretty()
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");
}

/// Deterministic SRAM contents with no `0x00` or `0xFF` bytes.
pub fn sram_data(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 7 % 253) as u8 + 1).collect()
}

/// Zero-filled byte-expanded raw save of `data`.
pub fn raw_sram(data: &[u8]) -> Vec<u8> {
    byte_expand(data, 0x00)
}

/// New-style file with `payload` padded by `padding`.
pub fn new_style_file(payload: &[u8], padding: u8) -> Vec<u8> {
    let mut file = MAGIC.to_vec();
    file.extend_from_slice(payload);
    file.resize(MAGIC.len() + NEW_STYLE_PADDED_SIZE.max(payload.len()), padding);
    file
}
