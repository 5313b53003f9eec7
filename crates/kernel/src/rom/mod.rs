//! Read-only memory.
//!
//! This module owns the contents of every ROM block. It provides:
//! 1. **Images:** Parsing of hexadecimal word images from text or readers.
//! 2. **Storage:** Per-block word storage filled from an image, with total reads that
//!    fall back to a default word.

/// ROM image text format.
pub mod image;

/// Per-block ROM storage.
pub mod store;

pub use image::RomImage;
pub use store::RomStore;
