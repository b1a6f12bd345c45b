use std::io::{Read, Seek};

use bytes::{BufMut, Bytes, BytesMut};
use tracing::{debug, trace};

use crate::catalog::Field;
use crate::codec::{FrameHeader, FrameId};
use crate::config::ScanConfig;
use crate::cursor::FrameCursor;
use crate::error::{Result, TagError};
use crate::header::TagHeader;

const INITIAL_SCRATCH_CAPACITY: usize = 64 * 1024;

/// Replacement content for one known field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRequest {
    field: Field,
    content: Bytes,
}

impl EditRequest {
    /// Content is raw text; no encoding marker is expected or added.
    pub fn new(field: Field, content: impl Into<Bytes>) -> Self {
        Self {
            field,
            content: content.into(),
        }
    }

    /// Build a request from a field label or frame id such as `artist` or `TPE1`.
    pub fn parse(field: &str, content: impl Into<Bytes>) -> Result<Self> {
        Ok(Self::new(field.parse()?, content))
    }

    pub fn field(&self) -> Field {
        self.field
    }

    pub fn frame_id(&self) -> FrameId {
        self.field.frame_id()
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }
}

/// What a successful edit changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditOutcome {
    pub frame_id: FrameId,
    /// Position of the edited frame in scan order, from zero.
    pub frame_index: usize,
    /// Byte offset of the edited frame's id.
    pub frame_offset: u64,
    pub old_size: u32,
    pub new_size: u32,
    pub original_len: u64,
    pub spliced_len: u64,
}

/// Builds a replacement stream with one frame rewritten.
///
/// The source is only read. Output accumulates in a scratch buffer that the
/// caller writes back with [`splice_back`](crate::storage::splice_back) once
/// the whole stream is materialized.
pub struct FrameSplicer<T> {
    cursor: FrameCursor<T>,
    scratch: BytesMut,
    frames_seen: usize,
}

impl<T: Read + Seek> FrameSplicer<T> {
    /// Create a splicer with default configuration.
    pub fn new(source: T) -> Result<Self> {
        Self::with_config(source, ScanConfig::default())
    }

    /// Create a splicer with explicit configuration.
    pub fn with_config(source: T, config: ScanConfig) -> Result<Self> {
        let cursor = FrameCursor::with_config(source, config)?;
        let capacity = usize::try_from(cursor.stream_len())
            .unwrap_or(INITIAL_SCRATCH_CAPACITY)
            .max(INITIAL_SCRATCH_CAPACITY);
        Ok(Self {
            cursor,
            scratch: BytesMut::with_capacity(capacity),
            frames_seen: 0,
        })
    }

    /// Copy the tag header into the scratch stream unchanged.
    pub fn copy_header(&mut self) -> Result<TagHeader> {
        let mut dest = (&mut self.scratch).writer();
        self.cursor.copy_header(&mut dest)
    }

    /// Copy the current frame verbatim.
    ///
    /// The cursor must sit just past the frame id read for the identity check.
    pub fn skip_frame(&mut self) -> Result<FrameHeader> {
        self.cursor.rewind_frame_id()?;
        let header = self.cursor.next_frame_header()?;
        let rollback = self.scratch.len();

        header.encode(&mut self.scratch);
        if let Err(err) = self.cursor.copy_content_into(&header, &mut self.scratch) {
            self.scratch.truncate(rollback);
            return Err(err);
        }
        self.frames_seen += 1;
        Ok(header)
    }

    /// Replace the current frame's content, then copy the rest of the source.
    ///
    /// Id and flags are kept; the size becomes `new_content.len() + 1`.
    pub fn edit_frame(&mut self, new_content: &[u8]) -> Result<EditOutcome> {
        self.cursor.rewind_frame_id()?;
        let frame_offset = self.cursor.position()?;
        let old = self.cursor.next_frame_header()?;
        let replacement = FrameHeader::for_content(old.id, old.flags, new_content.len())
            .ok_or(TagError::ContentTooLarge {
                len: new_content.len(),
            })?;
        self.cursor.skip_content(&old)?;

        replacement.encode(&mut self.scratch);
        self.scratch.put_slice(new_content);
        let frame_index = self.frames_seen;
        self.frames_seen += 1;

        let copied = self.copy_remainder()?;
        debug!(
            frame = %old.id,
            frame_index,
            old_size = old.declared_size,
            new_size = replacement.declared_size,
            remainder = copied,
            "rewrote frame"
        );

        Ok(EditOutcome {
            frame_id: old.id,
            frame_index,
            frame_offset,
            old_size: old.declared_size,
            new_size: replacement.declared_size,
            original_len: self.cursor.stream_len(),
            spliced_len: self.scratch.len() as u64,
        })
    }

    /// Copy every remaining source byte (later frames, padding, audio) unchanged.
    pub fn copy_remainder(&mut self) -> Result<u64> {
        self.cursor.copy_rest_into(&mut self.scratch)
    }

    /// Scan up to `max_frames` frames and rewrite the one `request` targets.
    ///
    /// Frames before the target are copied verbatim. A scan that ends without
    /// meeting the target yields [`TagError::FrameNotFound`].
    pub fn compare_and_edit(&mut self, request: &EditRequest) -> Result<EditOutcome> {
        let target = request.frame_id();
        let max_frames = self.cursor.config().max_frames;
        let mut scanned = 0;

        while scanned < max_frames {
            if self.cursor.at_scan_boundary()? {
                break;
            }
            let id = self.cursor.read_frame_id()?;
            scanned += 1;
            if id == target {
                return self.edit_frame(request.content());
            }
            trace!(frame = %id, target = %target, "copying frame");
            self.skip_frame()?;
        }

        Err(TagError::FrameNotFound {
            frame_id: target,
            scanned,
        })
    }

    /// Bytes materialized so far.
    pub fn scratch(&self) -> &[u8] {
        &self.scratch
    }

    /// Consume the splicer and return the replacement stream.
    pub fn finish(self) -> BytesMut {
        self.scratch
    }

    /// Consume the splicer and return the source.
    pub fn into_source(self) -> T {
        self.cursor.into_inner()
    }
}
