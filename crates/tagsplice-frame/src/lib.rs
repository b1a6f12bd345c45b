//! Frame-level codec for ID3v2-style tags.
//!
//! A tag starts with a 10-byte header followed by frame records:
//! - A 4-byte ASCII frame id (`TIT2`, `TPE1`, ...)
//! - A 4-byte big-endian size (content length plus one)
//! - 3 opaque flag bytes, carried through untouched
//! - `size - 1` content bytes
//!
//! Reading walks the first six frames and decodes the known ones. Editing
//! rebuilds the whole stream with one frame resized, then writes it back
//! over the original storage.

pub mod catalog;
pub mod codec;
pub mod config;
pub mod cursor;
pub mod endian;
pub mod error;
pub mod extract;
pub mod header;
pub mod ops;
pub mod splice;
pub mod storage;

pub use catalog::{Field, FieldSpec, CATALOG, KNOWN_FRAME_COUNT};
pub use codec::{FrameFlags, FrameHeader, FrameId, FRAME_HEADER_SIZE};
pub use config::{ScanConfig, ScanLimit, DEFAULT_MAX_CONTENT};
pub use cursor::FrameCursor;
pub use error::{FormatError, Result, TagError};
pub use extract::{extract_known_frames, TagMap};
pub use header::{read_header, TagHeader, HEADER_SIZE, MAGIC};
pub use ops::{
    edit_tag, edit_tag_at, edit_tag_with, read_all_tags, read_all_tags_at, read_all_tags_with,
    read_version, read_version_at,
};
pub use splice::{EditOutcome, EditRequest, FrameSplicer};
pub use storage::{splice_back, TagStorage};
