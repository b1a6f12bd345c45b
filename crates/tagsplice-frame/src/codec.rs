use std::fmt;

use bytes::BufMut;

use crate::endian::{to_host_order, to_wire_order, SIZE_FIELD_LEN};
use crate::error::{FormatError, Result};

/// Width of a frame id.
pub const FRAME_ID_LEN: usize = 4;

/// Width of the opaque flag field.
pub const FLAGS_LEN: usize = 3;

/// Frame record header: id (4) + size (4) + flags (3) = 11 bytes.
pub const FRAME_HEADER_SIZE: usize = FRAME_ID_LEN + SIZE_FIELD_LEN + FLAGS_LEN;

/// Four-character frame code such as `TIT2`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId(pub [u8; FRAME_ID_LEN]);

impl FrameId {
    /// Build an id from a static code.
    pub const fn new(code: &[u8; FRAME_ID_LEN]) -> Self {
        Self(*code)
    }

    pub fn as_bytes(&self) -> &[u8; FRAME_ID_LEN] {
        &self.0
    }

    /// True for the all-zero id that marks tag padding.
    pub fn is_padding(&self) -> bool {
        self.0 == [0; FRAME_ID_LEN]
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            if b.is_ascii_graphic() {
                write!(f, "{}", b as char)?;
            } else {
                write!(f, "\\x{b:02x}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FrameId({self})")
    }
}

/// Frame flag bytes. Never interpreted, only carried through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameFlags(pub [u8; FLAGS_LEN]);

/// A decoded frame record header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    pub id: FrameId,
    /// Wire size: content length plus one.
    pub declared_size: u32,
    pub flags: FrameFlags,
}

impl FrameHeader {
    /// Build the header for `content`, reserving one byte for the encoding marker.
    pub fn for_content(id: FrameId, flags: FrameFlags, content_len: usize) -> Option<Self> {
        let declared_size = u32::try_from(content_len).ok()?.checked_add(1)?;
        Some(Self {
            id,
            declared_size,
            flags,
        })
    }

    /// Number of content bytes that follow this header.
    pub fn content_len(&self) -> Result<usize> {
        if self.declared_size == 0 {
            return Err(FormatError::ZeroSizeFrame { frame_id: self.id }.into());
        }
        Ok((self.declared_size - 1) as usize)
    }

    /// Decode a header from its 11 wire bytes.
    pub fn decode(raw: &[u8; FRAME_HEADER_SIZE]) -> Self {
        let mut id = [0u8; FRAME_ID_LEN];
        id.copy_from_slice(&raw[..FRAME_ID_LEN]);
        let mut size = [0u8; SIZE_FIELD_LEN];
        size.copy_from_slice(&raw[FRAME_ID_LEN..FRAME_ID_LEN + SIZE_FIELD_LEN]);
        let mut flags = [0u8; FLAGS_LEN];
        flags.copy_from_slice(&raw[FRAME_ID_LEN + SIZE_FIELD_LEN..]);

        Self {
            id: FrameId(id),
            declared_size: to_host_order(size),
            flags: FrameFlags(flags),
        }
    }

    /// Encode the header into the wire format.
    ///
    /// ```text
    /// ┌───────────┬────────────┬───────────┬──────────────────┐
    /// │ Id (4B)   │ Size (4B)  │ Flags     │ Content          │
    /// │ ASCII     │ big-endian │ (3B)      │ (Size - 1 bytes) │
    /// └───────────┴────────────┴───────────┴──────────────────┘
    /// ```
    pub fn encode<B: BufMut>(&self, dst: &mut B) {
        dst.put_slice(self.id.as_bytes());
        dst.put_slice(&to_wire_order(self.declared_size));
        dst.put_slice(&self.flags.0);
    }
}

#[cfg(test)]
mod tests {
    use bytes::BytesMut;

    use super::*;
    use crate::error::TagError;

    #[test]
    fn decode_reads_id_size_and_flags() {
        let raw = *b"TPE1\x00\x00\x00\x06\x01\x02\x03";
        let header = FrameHeader::decode(&raw);

        assert_eq!(header.id, FrameId::new(b"TPE1"));
        assert_eq!(header.declared_size, 6);
        assert_eq!(header.flags, FrameFlags([1, 2, 3]));
        assert_eq!(header.content_len().unwrap(), 5);
    }

    #[test]
    fn encode_reproduces_wire_bytes() {
        let raw = *b"COMM\x00\x00\x01\x00\x00\x00\x00";
        let mut buf = BytesMut::new();
        FrameHeader::decode(&raw).encode(&mut buf);
        assert_eq!(buf.as_ref(), &raw[..]);
    }

    #[test]
    fn zero_size_is_malformed() {
        let header = FrameHeader::decode(b"TIT2\x00\x00\x00\x00\x00\x00\x00");
        let err = header.content_len().unwrap_err();
        assert!(matches!(
            err,
            TagError::Format(FormatError::ZeroSizeFrame { .. })
        ));
    }

    #[test]
    fn for_content_adds_marker_byte() {
        let header = FrameHeader::for_content(FrameId::new(b"TALB"), FrameFlags::default(), 3)
            .expect("small content fits");
        assert_eq!(header.declared_size, 4);
        assert!(
            FrameHeader::for_content(FrameId::new(b"TALB"), FrameFlags::default(), u32::MAX as usize)
                .is_none()
        );
    }

    #[test]
    fn display_escapes_non_printable_ids() {
        assert_eq!(FrameId::new(b"TYER").to_string(), "TYER");
        assert_eq!(FrameId([0, b'A', 0xff, b'B']).to_string(), "\\x00A\\xffB");
        assert!(FrameId([0; 4]).is_padding());
    }
}
