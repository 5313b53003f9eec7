//! Netlist and ROM image loading from disk.
//!
//! This module reads the two input files of a simulation session. It performs:
//! 1. **Netlist loading:** Reads and parses a JSON netlist description.
//! 2. **ROM loading:** Reads and parses a hexadecimal ROM image.
//!
//! Both return the parsed data only; compiling the netlist and filling ROM blocks are
//! separate steps so callers can report each failure on its own.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

use tracing::info;

use crate::common::error::{NetlistError, RomError};
use crate::netlist::desc::NetlistDesc;
use crate::rom::{RomImage, RomStore};

/// Reads a netlist description from a JSON file.
///
/// # Arguments
///
/// * `path` - Path to the description file.
///
/// # Errors
///
/// Returns [`NetlistError::Io`] if the file cannot be read and [`NetlistError::Parse`]
/// if its contents are not a valid description.
pub fn load_netlist(path: impl AsRef<Path>) -> Result<NetlistDesc, NetlistError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| NetlistError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let desc = NetlistDesc::from_json(&text)?;
    info!(path = %path.display(), netlist = %desc.name, "read netlist description");
    Ok(desc)
}

/// Reads a ROM image file.
///
/// # Arguments
///
/// * `path` - Path to the image file.
///
/// # Errors
///
/// Returns [`RomError::Io`] if the file cannot be opened, [`RomError::Read`] if reading
/// fails part way and [`RomError::Parse`] for malformed words.
pub fn load_rom_image(path: impl AsRef<Path>) -> Result<RomImage, RomError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| RomError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let image = RomImage::from_reader(BufReader::new(file))?;
    info!(path = %path.display(), words = image.len(), "read ROM image");
    Ok(image)
}

/// Opens a ROM image file and fills `rom` from it.
///
/// The file must exist even when the netlist has no ROM blocks, but it is only read as
/// far as the blocks need.
///
/// # Errors
///
/// Returns [`RomError::Io`] if the file cannot be opened, otherwise any error of
/// [`RomStore::load_from_reader`].
pub fn load_rom_into(path: impl AsRef<Path>, rom: &mut RomStore) -> Result<(), RomError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| RomError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    rom.load_from_reader(BufReader::new(file))?;
    info!(path = %path.display(), blocks = rom.len(), loaded = rom.is_loaded(), "applied ROM image");
    Ok(())
}
