//! ROM image parsing.
//!
//! A ROM image is plain text: hexadecimal words separated by any whitespace, with an
//! optional `0x` prefix on each word. A `#` starts a comment that runs to the end of
//! the line. The words form one flat stream; [`RomStore::load`](super::RomStore::load)
//! decides which block each word lands in.
//!
//! The image ends at end of input or at the first NUL byte, so `/dev/zero` reads as an
//! empty image. Input is scanned a byte at a time and never buffered whole.

use std::io::{BufRead, Read};

use crate::common::error::RomError;

/// Longest token kept verbatim in a parse error.
const MAX_TOKEN_LEN: usize = 32;

/// A parsed ROM image: a flat sequence of words.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RomImage {
    words: Vec<u64>,
    truncated: bool,
}

impl RomImage {
    /// Wraps an already decoded word sequence.
    pub const fn new(words: Vec<u64>) -> Self {
        Self {
            words,
            truncated: false,
        }
    }

    /// Parses an image from text.
    ///
    /// # Errors
    ///
    /// Returns [`RomError::Parse`] with the one-based line number of the first token
    /// that is not a 64-bit hexadecimal word.
    pub fn parse(text: &str) -> Result<Self, RomError> {
        Self::from_reader(text.as_bytes())
    }

    /// Parses an image from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns [`RomError::Read`] if the reader fails and [`RomError::Parse`] for
    /// malformed words.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, RomError> {
        Self::from_reader_limited(reader, usize::MAX)
    }

    /// Parses at most `limit` words from a buffered reader.
    ///
    /// Reading stops as soon as a word beyond the limit starts; the image is then
    /// marked [truncated](Self::is_truncated) and the rest of the input is left unread.
    ///
    /// # Errors
    ///
    /// Returns [`RomError::Read`] if the reader fails and [`RomError::Parse`] for
    /// malformed words.
    pub fn from_reader_limited<R: BufRead>(reader: R, limit: usize) -> Result<Self, RomError> {
        let mut scanner = Scanner::new(limit);
        for byte in reader.bytes() {
            if !scanner.feed(byte?)? {
                break;
            }
        }
        scanner.finish()
    }

    /// Words of the image, in file order.
    pub fn words(&self) -> &[u64] {
        &self.words
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns `true` if the image holds no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Returns `true` if reading stopped at a word limit with more words left.
    pub const fn is_truncated(&self) -> bool {
        self.truncated
    }
}

/// Incremental tokenizer over image bytes.
struct Scanner {
    words: Vec<u64>,
    limit: usize,
    token: Vec<u8>,
    line: usize,
    in_comment: bool,
    truncated: bool,
}

impl Scanner {
    const fn new(limit: usize) -> Self {
        Self {
            words: Vec::new(),
            limit,
            token: Vec::new(),
            line: 1,
            in_comment: false,
            truncated: false,
        }
    }

    /// Consumes one byte. Returns `false` once no more input is wanted.
    fn feed(&mut self, byte: u8) -> Result<bool, RomError> {
        match byte {
            0 => {
                self.end_token()?;
                return Ok(false);
            }
            b'\n' => {
                self.end_token()?;
                self.line += 1;
                self.in_comment = false;
            }
            b'#' => {
                self.end_token()?;
                self.in_comment = true;
            }
            _ if self.in_comment => {}
            b if b.is_ascii_whitespace() => self.end_token()?,
            b => {
                if self.token.is_empty() && self.words.len() >= self.limit {
                    self.truncated = true;
                    return Ok(false);
                }
                if self.token.len() == MAX_TOKEN_LEN {
                    return Err(self.bad_token(true));
                }
                self.token.push(b);
            }
        }
        Ok(true)
    }

    fn end_token(&mut self) -> Result<(), RomError> {
        if self.token.is_empty() {
            return Ok(());
        }
        let word = std::str::from_utf8(&self.token)
            .ok()
            .and_then(parse_word)
            .ok_or_else(|| self.bad_token(false))?;
        self.token.clear();
        self.words.push(word);
        Ok(())
    }

    fn bad_token(&self, cut: bool) -> RomError {
        let mut token = String::from_utf8_lossy(&self.token).into_owned();
        if cut {
            token.push_str("...");
        }
        RomError::Parse {
            line: self.line,
            token,
        }
    }

    fn finish(mut self) -> Result<RomImage, RomError> {
        self.end_token()?;
        Ok(RomImage {
            words: self.words,
            truncated: self.truncated,
        })
    }
}

fn parse_word(token: &str) -> Option<u64> {
    let digits = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        .unwrap_or(token);
    u64::from_str_radix(digits, 16).ok()
}
