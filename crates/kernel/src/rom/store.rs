//! ROM block storage.
//!
//! Every `rom` equation of a netlist owns one block of `2^addr_width` words. A single
//! image file feeds all of them: blocks are filled in ascending order of their names,
//! each taking as many words as it can address before the next block starts. Words the
//! image does not supply read as the configured default word.

use std::io::BufRead;

use tracing::{debug, info, warn};

use crate::common::error::RomError;
use crate::common::value::{address_space, fits};
use crate::config::Config;
use crate::netlist::graph::NetlistGraph;
use crate::rom::image::RomImage;

/// Contents of one ROM block.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Block {
    name: String,
    addr_width: u32,
    word_width: u32,
    words: Vec<u64>,
}

impl Block {
    fn capacity(&self) -> usize {
        address_space(self.addr_width)
    }

    /// Checks `words` against the block word width and capacity, returning what to store.
    fn accept(&self, words: &[u64]) -> Result<Vec<u64>, RomError> {
        let take = words.len().min(self.capacity());
        if let Some((index, &value)) = words[..take]
            .iter()
            .enumerate()
            .find(|&(_, &w)| !fits(w, self.word_width))
        {
            return Err(RomError::WordTooWide {
                block: self.name.clone(),
                index,
                value,
                width: self.word_width,
            });
        }
        Ok(words[..take].to_vec())
    }
}

/// Read-only memory contents for every ROM block of a netlist.
///
/// Block indices match [`NetlistGraph::roms`], so a compiled `RomRead` gate can address
/// its block directly.
#[derive(Debug, Clone)]
pub struct RomStore {
    blocks: Vec<Block>,
    default_word: u64,
    strict: bool,
    loaded: bool,
}

impl RomStore {
    /// Creates an empty store with one block per ROM of `graph`.
    ///
    /// # Arguments
    ///
    /// * `graph` - Compiled netlist whose ROM blocks to allocate.
    /// * `config` - Supplies the default word and the strict image length flag.
    pub fn for_graph(graph: &NetlistGraph, config: &Config) -> Self {
        let blocks = graph
            .roms()
            .iter()
            .map(|rom| Block {
                name: rom.name.clone(),
                addr_width: rom.addr_width,
                word_width: rom.word_width,
                words: Vec::new(),
            })
            .collect();
        Self {
            blocks,
            default_word: config.rom.default_word,
            strict: config.rom.strict_image_length,
            loaded: false,
        }
    }

    /// Fills every block from one image, in ascending block-name order.
    ///
    /// The store is only modified if the whole image is accepted.
    ///
    /// # Errors
    ///
    /// * [`RomError::ImageTooShort`] - in strict mode, when the image holds fewer words
    ///   than the blocks can address.
    /// * [`RomError::WordTooWide`] - when a word exceeds its block's word width.
    pub fn load(&mut self, image: &RomImage) -> Result<(), RomError> {
        let capacity = self.capacity();
        let words = image.words();
        if words.len() < capacity {
            if self.strict {
                return Err(RomError::ImageTooShort {
                    expected: capacity,
                    found: words.len(),
                });
            }
            warn!(
                expected = capacity,
                found = words.len(),
                "ROM image is shorter than the ROM blocks; missing words read the default"
            );
        }

        let mut order: Vec<usize> = (0..self.blocks.len()).collect();
        order.sort_by(|&a, &b| self.blocks[a].name.cmp(&self.blocks[b].name));

        let mut filled = Vec::with_capacity(order.len());
        let mut offset = 0;
        for &index in &order {
            let block = &self.blocks[index];
            let contents = block.accept(&words[offset.min(words.len())..])?;
            offset = offset.saturating_add(block.capacity());
            debug!(block = %block.name, words = contents.len(), "filled ROM block");
            filled.push((index, contents));
        }
        if words.len() > capacity || image.is_truncated() {
            warn!(capacity, "ROM image is longer than the ROM blocks; surplus words ignored");
        }

        for (index, contents) in filled {
            self.blocks[index].words = contents;
        }
        self.loaded = true;
        info!(blocks = self.blocks.len(), words = words.len().min(capacity), "loaded ROM image");
        Ok(())
    }

    /// Reads an image from `reader` and fills every block from it.
    ///
    /// Nothing is read when the netlist has no ROM blocks, and never more words than
    /// the blocks can hold, so an endless source such as `/dev/zero` is safe to pass.
    ///
    /// # Errors
    ///
    /// Any error of [`RomImage::from_reader_limited`] or [`RomStore::load`].
    pub fn load_from_reader<R: BufRead>(&mut self, reader: R) -> Result<(), RomError> {
        if self.is_empty() {
            debug!("netlist has no ROM blocks; ROM image not read");
            return Ok(());
        }
        let image = RomImage::from_reader_limited(reader, self.capacity())?;
        self.load(&image)
    }

    /// Fills a single block by name, leaving the others untouched.
    ///
    /// # Errors
    ///
    /// * [`RomError::UnknownBlock`] - no ROM block is called `name`.
    /// * [`RomError::ImageTooShort`] - in strict mode, when `words` does not cover the block.
    /// * [`RomError::WordTooWide`] - when a word exceeds the block's word width.
    pub fn load_block(&mut self, name: &str, words: &[u64]) -> Result<(), RomError> {
        let index = self
            .blocks
            .iter()
            .position(|b| b.name == name)
            .ok_or_else(|| RomError::UnknownBlock(name.to_owned()))?;
        let block = &self.blocks[index];
        if self.strict && words.len() < block.capacity() {
            return Err(RomError::ImageTooShort {
                expected: block.capacity(),
                found: words.len(),
            });
        }
        if words.len() > block.capacity() {
            warn!(block = name, surplus = words.len() - block.capacity(), "surplus ROM words ignored");
        }
        let contents = block.accept(words)?;
        self.blocks[index].words = contents;
        self.loaded = true;
        Ok(())
    }

    /// Reads a word. Addresses the block holds no word for read the default word.
    #[inline]
    pub fn read(&self, block: usize, address: u64) -> u64 {
        self.blocks
            .get(block)
            .and_then(|b| usize::try_from(address).ok().and_then(|a| b.words.get(a)))
            .copied()
            .unwrap_or(self.default_word)
    }

    /// Returns `true` once any image or block has been loaded.
    pub const fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Total number of words all blocks can address, saturating at `usize::MAX`.
    pub fn capacity(&self) -> usize {
        self.blocks
            .iter()
            .fold(0usize, |acc, b| acc.saturating_add(b.capacity()))
    }

    /// Number of ROM blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Returns `true` if the netlist has no ROM blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
