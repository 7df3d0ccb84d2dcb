use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use megasd_save_core::{FlashCartSaveData, Form, MegaSdSave, detect};
use tracing::info;

use crate::args::Command;

/// Extension used for raw saves when the flash-cart format has none of its own.
const DEFAULT_RAW_EXTENSION: &str = "raw";

pub fn run(command: Command) -> Result<()> {
    match command {
        Command::Detect { input, raw } => run_detect(&input, raw),
        Command::ToRaw { input, output } => run_to_raw(&input, output),
        Command::ToFlashCart {
            input,
            output,
            size,
        } => run_to_flash_cart(&input, output, size),
        Command::Resize {
            input,
            size,
            output,
        } => run_resize(&input, size, output),
    }
}

fn run_detect(input: &Path, raw: bool) -> Result<()> {
    let bytes = read(input)?;
    let form = if raw { Form::Raw } else { Form::FlashCart };

    let encoding = detect(&bytes, form);
    let save = match form {
        Form::FlashCart => MegaSdSave::from_flash_cart_data(&bytes),
        Form::Raw => MegaSdSave::from_raw_data(&bytes),
    };

    match save {
        Ok(save) => println!(
            "{}: {encoding} {} save, {} raw bytes",
            input.display(),
            save.kind(),
            save.raw_data().len()
        ),
        Err(_) => println!("{}: {encoding}", input.display()),
    }
    Ok(())
}

fn run_to_raw(input: &Path, output: Option<PathBuf>) -> Result<()> {
    let save = MegaSdSave::from_flash_cart_data(&read(input)?)
        .with_context(|| format!("converting {}", input.display()))?;

    let extension = MegaSdSave::RAW_FILE_EXTENSION.unwrap_or(DEFAULT_RAW_EXTENSION);
    let output = output_path(input, output, extension)?;
    write(&output, save.raw_data())
}

fn run_to_flash_cart(input: &Path, output: Option<PathBuf>, size: Option<usize>) -> Result<()> {
    let mut save = MegaSdSave::from_raw_data(&read(input)?)
        .with_context(|| format!("converting {}", input.display()))?;
    if let Some(size) = size {
        save = save
            .with_new_size(size)
            .with_context(|| format!("resizing {} to {size} bytes", input.display()))?;
    }

    let output = output_path(input, output, MegaSdSave::FLASH_CART_FILE_EXTENSION)?;
    write(&output, save.flash_cart_data())
}

fn run_resize(input: &Path, size: usize, output: Option<PathBuf>) -> Result<()> {
    let save = MegaSdSave::from_flash_cart_data(&read(input)?)
        .with_context(|| format!("converting {}", input.display()))?
        .with_new_size(size)
        .with_context(|| format!("resizing {} to {size} bytes", input.display()))?;

    let output = match output {
        Some(output) => output,
        None => resized_path(input, MegaSdSave::FLASH_CART_FILE_EXTENSION)?,
    };
    write(&output, save.flash_cart_data())
}

/// Pick the output path, refusing to overwrite the input by default.
fn output_path(input: &Path, output: Option<PathBuf>, extension: &str) -> Result<PathBuf> {
    if let Some(output) = output {
        return Ok(output);
    }

    let output = input.with_extension(extension);
    if output == input {
        bail!(
            "{} already has a .{extension} extension; pass --output",
            input.display()
        );
    }
    Ok(output)
}

fn resized_path(input: &Path, extension: &str) -> Result<PathBuf> {
    let Some(stem) = input.file_stem() else {
        bail!("{} has no file name", input.display());
    };
    let name = format!("{}-resized.{extension}", stem.to_string_lossy());
    Ok(input.with_file_name(name))
}

fn read(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("reading {}", path.display()))
}

fn write(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
    info!("wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}
