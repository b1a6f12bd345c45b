use std::io::{self, ErrorKind, Read, Seek, SeekFrom, Write};

use bytes::{BufMut, Bytes, BytesMut};
use tracing::trace;

use crate::codec::{FrameHeader, FrameId, FRAME_HEADER_SIZE, FRAME_ID_LEN};
use crate::config::{ScanConfig, ScanLimit};
use crate::error::{FormatError, Result, TagError};
use crate::header::{self, TagHeader};

const READ_CHUNK_SIZE: usize = 8 * 1024;

/// Walks frame records in a seekable byte source.
///
/// Every declared size is checked against the bytes left in the source
/// before anything is read or allocated.
pub struct FrameCursor<T> {
    inner: T,
    end: u64,
    tag_end: Option<u64>,
    config: ScanConfig,
}

impl<T: Read + Seek> FrameCursor<T> {
    /// Create a cursor with default configuration.
    pub fn new(inner: T) -> Result<Self> {
        Self::with_config(inner, ScanConfig::default())
    }

    /// Create a cursor with explicit configuration, starting at the current
    /// source position.
    pub fn with_config(mut inner: T, config: ScanConfig) -> Result<Self> {
        let start = inner.stream_position()?;
        let end = inner.seek(SeekFrom::End(0))?;
        inner.seek(SeekFrom::Start(start))?;
        Ok(Self {
            inner,
            end,
            tag_end: None,
            config,
        })
    }

    /// Read and validate the tag header.
    pub fn read_header(&mut self) -> Result<TagHeader> {
        let header = header::read_header(&mut self.inner)?;
        self.tag_end = Some(header.tag_end());
        Ok(header)
    }

    /// Copy the raw tag header to `dest`, validating the magic on the way.
    pub fn copy_header<W: Write>(&mut self, dest: &mut W) -> Result<TagHeader> {
        let header = header::copy_header(&mut self.inner, dest)?;
        self.tag_end = Some(header.tag_end());
        Ok(header)
    }

    /// Read the next frame's id only, for an identity check.
    ///
    /// Follow with [`rewind_frame_id`](Self::rewind_frame_id) before handing
    /// the frame to a skip or edit.
    pub fn read_frame_id(&mut self) -> Result<FrameId> {
        let raw = self.read_array::<FRAME_ID_LEN>()?;
        Ok(FrameId(raw))
    }

    /// Step back over a frame id consumed by [`read_frame_id`](Self::read_frame_id).
    pub fn rewind_frame_id(&mut self) -> Result<()> {
        self.inner.seek(SeekFrom::Current(-(FRAME_ID_LEN as i64)))?;
        Ok(())
    }

    /// Read the next frame's id, size, and flags. Content is left in place.
    pub fn next_frame_header(&mut self) -> Result<FrameHeader> {
        let raw = self.read_array::<FRAME_HEADER_SIZE>()?;
        let header = FrameHeader::decode(&raw);
        trace!(
            frame = %header.id,
            declared_size = header.declared_size,
            "read frame header"
        );
        Ok(header)
    }

    /// Read the content that belongs to `header`.
    ///
    /// This is the only path that buffers a whole frame, so it alone is held
    /// to `max_content_size`.
    pub fn read_content(&mut self, header: &FrameHeader) -> Result<Bytes> {
        let (len, available) = self.present_content_len(header)?;
        if len > self.config.max_content_size {
            return Err(FormatError::FrameTooLarge {
                frame_id: header.id,
                size: len,
                max: self.config.max_content_size,
            }
            .into());
        }
        let mut buf = BytesMut::zeroed(len);
        self.inner
            .read_exact(&mut buf)
            .map_err(|err| TagError::from_read(err, len as u64, available))?;
        Ok(buf.freeze())
    }

    /// Move past the content that belongs to `header` without reading it.
    pub fn skip_content(&mut self, header: &FrameHeader) -> Result<()> {
        let (len, _) = self.present_content_len(header)?;
        self.inner.seek(SeekFrom::Current(len as i64))?;
        Ok(())
    }

    /// Append the content that belongs to `header` to `dst` in chunks.
    pub fn copy_content_into(&mut self, header: &FrameHeader, dst: &mut BytesMut) -> Result<u64> {
        let (len, _) = self.present_content_len(header)?;
        let needed = len as u64;
        let copied = io::copy(&mut (&mut self.inner).take(needed), &mut (&mut *dst).writer())?;
        if copied < needed {
            return Err(TagError::TruncatedStream {
                needed,
                available: copied,
            });
        }
        Ok(copied)
    }

    /// Append every remaining source byte to `dst`. Returns the byte count.
    pub fn copy_rest_into(&mut self, dst: &mut BytesMut) -> Result<u64> {
        let mut chunk = [0u8; READ_CHUNK_SIZE];
        let mut copied = 0u64;
        loop {
            let read = match self.inner.read(&mut chunk) {
                Ok(0) => return Ok(copied),
                Ok(n) => n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(TagError::Io(err)),
            };
            dst.extend_from_slice(&chunk[..read]);
            copied += read as u64;
        }
    }

    /// True when a bounded scan should stop before the next frame.
    ///
    /// Always false for [`ScanLimit::FixedCount`].
    pub fn at_scan_boundary(&mut self) -> Result<bool> {
        if self.config.limit == ScanLimit::FixedCount {
            return Ok(false);
        }

        let region_end = self.tag_end.map_or(self.end, |end| end.min(self.end));
        if self.position()? + FRAME_HEADER_SIZE as u64 > region_end {
            return Ok(true);
        }

        let id = self.read_frame_id()?;
        self.rewind_frame_id()?;
        Ok(id.is_padding())
    }

    /// Current byte offset in the source.
    pub fn position(&mut self) -> Result<u64> {
        Ok(self.inner.stream_position()?)
    }

    /// Bytes between the current position and the end of the source.
    pub fn remaining(&mut self) -> Result<u64> {
        Ok(self.end.saturating_sub(self.position()?))
    }

    /// Total length of the source.
    pub fn stream_len(&self) -> u64 {
        self.end
    }

    /// Current scan configuration.
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Borrow the underlying source.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying source.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the cursor and return the inner source.
    pub fn into_inner(self) -> T {
        self.inner
    }

    fn present_content_len(&mut self, header: &FrameHeader) -> Result<(usize, u64)> {
        let len = header.content_len()?;
        let available = self.ensure_available(len as u64)?;
        Ok((len, available))
    }

    fn ensure_available(&mut self, needed: u64) -> Result<u64> {
        let available = self.remaining()?;
        if needed > available {
            return Err(TagError::TruncatedStream { needed, available });
        }
        Ok(available)
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let available = self.ensure_available(N as u64)?;
        let mut buf = [0u8; N];
        self.inner
            .read_exact(&mut buf)
            .map_err(|err| TagError::from_read(err, N as u64, available))?;
        Ok(buf)
    }
}
