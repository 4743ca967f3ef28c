#![deny(missing_docs)]

//! # Flash image packer
//!
//! Converts a linked firmware, dumped as `$readmemh`-style text, into the
//! image the iCEBreaker boot loader reads from SPI flash.
//!
//! ## Input
//!
//! ```text
//! @00010000
//! 13 01 01 ff 23 26 11 00
//! ...
//! ```
//!
//! A line starting with `@` opens a block at the given hex address; every
//! other non-blank line adds hex bytes to the current block.
//!
//! ## Output
//!
//! Every block becomes a little-endian `len`, `start` header followed by
//! its data, zero-padded to a multiple of four bytes. A header with length
//! zero ends the image; its address field holds the entry point.

use std::fmt::Write as _;

use thiserror::Error;
use tracing::debug;

/// First RAM address the boot loader may copy into.
pub const RAM_START: u32 = 0x0001_0000;

/// End (exclusive) of the RAM the boot loader may copy into.
pub const RAM_END: u32 = 0x0003_0000;

/// Flash offset the image is programmed at; first line of the hex output.
pub const FLASH_OFFSET: u32 = 0x0010_0000;

/// File name of the raw image.
pub const BIN_FILE_NAME: &str = "firmware.bin";

/// File name of the hex-text image.
pub const HEX_FILE_NAME: &str = "firmware.hex";

/// Errors that can occur while packing an image.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ImageError {
    /// A data line appeared before any `@address` line.
    #[error("line {line}: data before the first @address line")]
    DataBeforeAddress {
        /// 1-based input line.
        line: usize,
    },
    /// A token is not a valid hex byte or address.
    #[error("line {line}: invalid hex token '{token}'")]
    InvalidToken {
        /// 1-based input line.
        line: usize,
        /// The offending token.
        token: String,
    },
    /// A block does not fit in the loader's RAM window.
    #[error(
        "block at {start:#x} ({len} bytes) does not fit in RAM {lo:#x}..{hi:#x}",
        lo = RAM_START,
        hi = RAM_END
    )]
    BlockOutOfRange {
        /// Block start address.
        start: u32,
        /// Unpadded block length in bytes.
        len: usize,
    },
    /// The entry point argument is not a hex address.
    #[error("invalid entry address '{0}'")]
    InvalidAddress(String),
}

/// Result type for image packing operations.
pub type Result<T> = std::result::Result<T, ImageError>;

/// A contiguous run of bytes destined for `start`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Load address.
    pub start: u32,
    /// Contents, already padded to a multiple of four bytes.
    pub data: Vec<u8>,
}

/// Parse a hex address with an optional `0x`/`0X` prefix.
pub fn parse_address(s: &str) -> Result<u32> {
    let trimmed = s.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    u32::from_str_radix(digits, 16).map_err(|_| ImageError::InvalidAddress(s.to_string()))
}

/// Check bounds, pad and keep a finished block. Empty blocks are dropped
/// after the bounds check.
fn finish_block(start: u32, mut data: Vec<u8>, blocks: &mut Vec<Block>) -> Result<()> {
    let fits = start >= RAM_START
        && u64::from(start) + data.len() as u64 <= u64::from(RAM_END);
    if !fits {
        return Err(ImageError::BlockOutOfRange {
            start,
            len: data.len(),
        });
    }

    if data.is_empty() {
        debug!("dropping empty block at {:#x}", start);
        return Ok(());
    }

    while data.len() % 4 != 0 {
        data.push(0);
    }
    debug!("block at {:#x}: {} bytes", start, data.len());
    blocks.push(Block { start, data });
    Ok(())
}

/// Parse a hex dump into blocks.
///
/// # Errors
///
/// * [`ImageError::DataBeforeAddress`] for bytes preceding any `@` line.
/// * [`ImageError::InvalidToken`] for malformed addresses or bytes.
/// * [`ImageError::BlockOutOfRange`] for blocks outside RAM.
pub fn parse_hex_dump(input: &str) -> Result<Vec<Block>> {
    let mut blocks = Vec::new();
    let mut current: Option<(u32, Vec<u8>)> = None;

    for (index, line) in input.lines().enumerate() {
        let line_no = index + 1;
        let mut tokens = line.split_whitespace().peekable();

        let Some(first) = tokens.peek().copied() else {
            continue;
        };

        if let Some(address) = first.strip_prefix('@') {
            let start = u32::from_str_radix(address, 16).map_err(|_| ImageError::InvalidToken {
                line: line_no,
                token: first.to_string(),
            })?;
            if let Some((start, data)) = current.take() {
                finish_block(start, data, &mut blocks)?;
            }
            current = Some((start, Vec::new()));
            continue;
        }

        let Some((_, data)) = current.as_mut() else {
            return Err(ImageError::DataBeforeAddress { line: line_no });
        };
        for token in tokens {
            let byte = u8::from_str_radix(token, 16).map_err(|_| ImageError::InvalidToken {
                line: line_no,
                token: token.to_string(),
            })?;
            data.push(byte);
        }
    }

    if let Some((start, data)) = current {
        finish_block(start, data, &mut blocks)?;
    }

    Ok(blocks)
}

/// A packed flash image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashImage {
    bytes: Vec<u8>,
}

impl FlashImage {
    /// Lay out `blocks` followed by the terminator carrying `entry`.
    pub fn build(blocks: &[Block], entry: u32) -> Self {
        let size = blocks.iter().map(|b| 8 + b.data.len()).sum::<usize>() + 8;
        let mut bytes = Vec::with_capacity(size);

        for block in blocks {
            bytes.extend_from_slice(&(block.data.len() as u32).to_le_bytes());
            bytes.extend_from_slice(&block.start.to_le_bytes());
            bytes.extend_from_slice(&block.data);
        }

        bytes.extend_from_slice(&0u32.to_le_bytes());
        bytes.extend_from_slice(&entry.to_le_bytes());

        Self { bytes }
    }

    /// Raw image bytes, as written to `firmware.bin`.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Hex-text image, as written to `firmware.hex`: the flash offset on
    /// the first line, then every byte as two lowercase hex digits on one
    /// space-separated line.
    pub fn to_hex_dump(&self) -> String {
        let mut out = String::with_capacity(16 + self.bytes.len() * 3);
        // Writing into a String cannot fail.
        let _ = writeln!(out, "@{:x}", FLASH_OFFSET);
        for (i, byte) in self.bytes.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            let _ = write!(out, "{:02x}", byte);
        }
        out.push('\n');
        out
    }
}

/// Parse `input` and pack it with entry point `entry`.
pub fn pack(input: &str, entry: u32) -> Result<FlashImage> {
    let blocks = parse_hex_dump(input)?;
    Ok(FlashImage::build(&blocks, entry))
}
