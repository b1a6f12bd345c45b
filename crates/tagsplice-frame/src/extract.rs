use std::collections::BTreeMap;
use std::io::{Read, Seek};

use tracing::trace;

use crate::catalog::Field;
use crate::cursor::FrameCursor;
use crate::error::Result;

/// Display values keyed by field, in catalog order.
pub type TagMap = BTreeMap<Field, String>;

/// Decode the known frames among the first `max_frames` frames.
///
/// The cursor must sit at the first frame. Frames with ids outside the
/// catalog are dropped; if a field repeats, its first occurrence wins.
pub fn extract_known_frames<T: Read + Seek>(cursor: &mut FrameCursor<T>) -> Result<TagMap> {
    let mut tags = TagMap::new();
    let max_frames = cursor.config().max_frames;

    for _ in 0..max_frames {
        if cursor.at_scan_boundary()? {
            break;
        }
        let header = cursor.next_frame_header()?;
        let content = cursor.read_content(&header)?;

        match Field::from_frame_id(&header.id) {
            Some(field) => {
                tags.entry(field).or_insert_with(|| decode_text(&content));
            }
            None => trace!(frame = %header.id, "dropping unknown frame"),
        }
    }

    Ok(tags)
}

/// Frame content as display text: up to the first NUL, lossy UTF-8.
pub fn decode_text(content: &[u8]) -> String {
    let end = content
        .iter()
        .position(|&b| b == 0)
        .unwrap_or(content.len());
    String::from_utf8_lossy(&content[..end]).into_owned()
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use bytes::{BufMut, BytesMut};

    use super::*;
    use crate::codec::{FrameFlags, FrameHeader, FrameId};
    use crate::config::ScanConfig;
    use crate::error::TagError;

    fn frame(id: &[u8; 4], content: &[u8]) -> Vec<u8> {
        let mut buf = BytesMut::new();
        FrameHeader::for_content(FrameId::new(id), FrameFlags([0, 0, 1]), content.len())
            .unwrap()
            .encode(&mut buf);
        buf.put_slice(content);
        buf.to_vec()
    }

    fn cursor_over(frames: &[Vec<u8>], tail: &[u8], config: ScanConfig) -> FrameCursor<Cursor<Vec<u8>>> {
        let mut bytes = b"ID3\x03\x00\x00".to_vec();
        let region: usize = frames.iter().map(Vec::len).sum();
        bytes.extend_from_slice(&(region as u32).to_be_bytes());
        for f in frames {
            bytes.extend_from_slice(f);
        }
        bytes.extend_from_slice(tail);

        let mut cursor = FrameCursor::with_config(Cursor::new(bytes), config).unwrap();
        cursor.read_header().unwrap();
        cursor
    }

    #[test]
    fn decodes_six_known_frames() {
        let frames = vec![
            frame(b"TIT2", b"Song"),
            frame(b"TPE1", b"AB\0\0"),
            frame(b"TALB", b"Record"),
            frame(b"TYER", b"2004"),
            frame(b"TCON", b"Jazz"),
            frame(b"COMM", b"fine"),
        ];
        let mut cursor = cursor_over(&frames, b"\xff\xfbaudio", ScanConfig::default());
        let tags = extract_known_frames(&mut cursor).unwrap();

        assert_eq!(tags.len(), 6);
        assert_eq!(tags[&Field::Title], "Song");
        assert_eq!(tags[&Field::Artist], "AB");
        assert_eq!(tags[&Field::Album], "Record");
        assert_eq!(tags[&Field::Year], "2004");
        assert_eq!(tags[&Field::Genre], "Jazz");
        assert_eq!(tags[&Field::Comment], "fine");
        assert_eq!(
            tags.keys().copied().collect::<Vec<_>>(),
            Field::ALL.to_vec()
        );
    }

    #[test]
    fn drops_unknown_ids_and_stops_after_six() {
        let frames = vec![
            frame(b"TIT2", b"Song"),
            frame(b"TRCK", b"3"),
            frame(b"TPE1", b"Band"),
            frame(b"TPOS", b"1"),
            frame(b"TBPM", b"90"),
            frame(b"TIT2", b"Second title"),
            frame(b"COMM", b"never read"),
        ];
        let mut cursor = cursor_over(&frames, b"", ScanConfig::default());
        let tags = extract_known_frames(&mut cursor).unwrap();

        assert_eq!(tags.len(), 2);
        assert_eq!(tags[&Field::Title], "Song");
        assert_eq!(tags[&Field::Artist], "Band");
        assert!(!tags.contains_key(&Field::Comment));
    }

    #[test]
    fn fixed_scan_with_few_frames_hits_truncation() {
        let frames = vec![frame(b"TIT2", b"Song")];
        let mut cursor = cursor_over(&frames, b"", ScanConfig::default());
        assert!(matches!(
            extract_known_frames(&mut cursor),
            Err(TagError::TruncatedStream { .. })
        ));
    }

    #[test]
    fn bounded_scan_stops_at_tag_end() {
        let frames = vec![frame(b"TIT2", b"Song"), frame(b"TYER", b"1980")];
        let mut cursor = cursor_over(&frames, b"\xff\xfb\x90\x64 audio frames", ScanConfig::bounded());
        let tags = extract_known_frames(&mut cursor).unwrap();

        assert_eq!(tags.len(), 2);
        assert_eq!(tags[&Field::Year], "1980");
    }

    #[test]
    fn text_stops_at_nul_and_tolerates_bad_utf8() {
        assert_eq!(decode_text(b"abc\0def"), "abc");
        assert_eq!(decode_text(b""), "");
        assert_eq!(decode_text(b"\0abc"), "");
        assert_eq!(decode_text(b"caf\xe9"), "caf\u{fffd}");
    }
}
