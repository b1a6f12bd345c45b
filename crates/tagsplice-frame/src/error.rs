use std::path::PathBuf;

use crate::codec::FrameId;

/// Errors that can occur while reading or splicing a tag.
#[derive(Debug, thiserror::Error)]
pub enum TagError {
    /// The tagged file could not be opened.
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The byte stream is not a well-formed tag.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// A declared size asks for more bytes than the stream still holds.
    #[error("truncated stream (needed {needed} bytes, {available} available)")]
    TruncatedStream { needed: u64, available: u64 },

    /// An edit named a field outside the known frame catalog.
    #[error("unknown field {0:?} (expected one of TITLE, ARTIST, ALBUM, YEAR, GENRE, COMMENT)")]
    UnknownField(String),

    /// The scan ended without meeting the target frame.
    #[error("frame {frame_id} not found in the first {scanned} frames")]
    FrameNotFound { frame_id: FrameId, scanned: usize },

    /// Replacement content does not fit a 32-bit frame size.
    #[error("replacement content too large ({len} bytes)")]
    ContentTooLarge { len: usize },

    /// Splice-back wrote a different number of bytes than the replacement holds.
    #[error("splice-back wrote {written} bytes, expected {expected}")]
    SpliceMismatch { expected: u64, written: u64 },

    /// An I/O error occurred on the source or the storage.
    #[error("tag I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Structural problems in the tag header or a frame record.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    /// The stream does not start with the `ID3` marker.
    #[error("missing tag magic (expected \"ID3\", found {found:02x?})")]
    MissingMagic { found: Vec<u8> },

    /// A frame declares size zero, leaving no room for the encoding marker.
    #[error("frame {frame_id} declares size 0")]
    ZeroSizeFrame { frame_id: FrameId },

    /// A frame's content exceeds the configured maximum.
    #[error("frame {frame_id} too large ({size} bytes, max {max})")]
    FrameTooLarge {
        frame_id: FrameId,
        size: usize,
        max: usize,
    },
}

pub type Result<T> = std::result::Result<T, TagError>;

impl TagError {
    /// Map a short read onto [`TagError::TruncatedStream`].
    pub(crate) fn from_read(err: std::io::Error, needed: u64, available: u64) -> Self {
        if err.kind() == std::io::ErrorKind::UnexpectedEof {
            TagError::TruncatedStream { needed, available }
        } else {
            TagError::Io(err)
        }
    }
}
