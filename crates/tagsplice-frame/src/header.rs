//! The 10-byte tag header.
//!
//! Layout:
//! - `[0..3]`  magic: `ID3`
//! - `[3]`     major version
//! - `[4]`     minor version (revision)
//! - `[5]`     flags
//! - `[6..10]` declared tag size, big-endian

use std::io::{Read, Write};

use tracing::debug;

use crate::endian::to_host_order;
use crate::error::{FormatError, Result, TagError};

/// Tag marker at offset 0.
pub const MAGIC: [u8; 3] = *b"ID3";

/// Size of the fixed header in bytes.
pub const HEADER_SIZE: usize = 10;

/// A validated tag header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagHeader {
    pub major_version: u8,
    pub minor_version: u8,
    pub flags: u8,
    /// Tag size as stored. Not recomputed after an edit.
    pub declared_size: u32,
    raw: [u8; HEADER_SIZE],
}

impl TagHeader {
    /// Parse a header from its raw bytes, rejecting a missing magic.
    pub fn parse(raw: [u8; HEADER_SIZE]) -> Result<Self> {
        if raw[..MAGIC.len()] != MAGIC {
            return Err(FormatError::MissingMagic {
                found: raw[..MAGIC.len()].to_vec(),
            }
            .into());
        }

        Ok(Self {
            major_version: raw[3],
            minor_version: raw[4],
            flags: raw[5],
            declared_size: to_host_order([raw[6], raw[7], raw[8], raw[9]]),
            raw,
        })
    }

    /// The header exactly as it appeared in the stream.
    pub fn as_bytes(&self) -> &[u8; HEADER_SIZE] {
        &self.raw
    }

    /// `(major, minor)` version pair.
    pub fn version(&self) -> (u8, u8) {
        (self.major_version, self.minor_version)
    }

    /// Offset one past the last tag byte, according to the declared size.
    pub fn tag_end(&self) -> u64 {
        HEADER_SIZE as u64 + u64::from(self.declared_size)
    }
}

/// Read and validate the tag header, leaving the source at the first frame.
pub fn read_header<R: Read>(source: &mut R) -> Result<TagHeader> {
    let mut raw = [0u8; HEADER_SIZE];
    let read = read_up_to(source, &mut raw)?;

    if read < MAGIC.len() || raw[..MAGIC.len()] != MAGIC {
        if read < MAGIC.len() && MAGIC.starts_with(&raw[..read]) {
            return Err(TagError::TruncatedStream {
                needed: HEADER_SIZE as u64,
                available: read as u64,
            });
        }
        return Err(FormatError::MissingMagic {
            found: raw[..read.min(MAGIC.len())].to_vec(),
        }
        .into());
    }
    if read < HEADER_SIZE {
        return Err(TagError::TruncatedStream {
            needed: HEADER_SIZE as u64,
            available: read as u64,
        });
    }

    let header = TagHeader::parse(raw)?;
    debug!(
        major = header.major_version,
        minor = header.minor_version,
        declared_size = header.declared_size,
        "read tag header"
    );
    Ok(header)
}

/// Copy the raw header from `source` to `dest` without reinterpreting it.
///
/// The magic is still checked, so nothing reaches `dest` for a stream that
/// is not a tag.
pub fn copy_header<R: Read, W: Write>(source: &mut R, dest: &mut W) -> Result<TagHeader> {
    let header = read_header(source)?;
    dest.write_all(header.as_bytes())?;
    Ok(header)
}

/// Read the `(major, minor)` version pair from the header.
pub fn read_version<R: Read>(source: &mut R) -> Result<(u8, u8)> {
    read_header(source).map(|header| header.version())
}

fn read_up_to<R: Read>(source: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match source.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(err) if err.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(TagError::Io(err)),
        }
    }
    Ok(filled)
}
