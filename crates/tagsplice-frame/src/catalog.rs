//! The known frame catalog.
//!
//! Exactly six text frames are understood. The table below is the single
//! source for frame id, field, display label, and command-line flag.

use std::fmt;
use std::str::FromStr;

use crate::codec::FrameId;
use crate::error::TagError;

/// Number of frames the scan inspects.
pub const KNOWN_FRAME_COUNT: usize = 6;

/// A semantic field backed by one known frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Title,
    Artist,
    Album,
    Year,
    Genre,
    Comment,
}

/// One catalog row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub field: Field,
    pub frame_id: FrameId,
    pub label: &'static str,
    pub flag: char,
}

/// Catalog rows in the order a well-formed tag stores them.
pub const CATALOG: [FieldSpec; KNOWN_FRAME_COUNT] = [
    FieldSpec {
        field: Field::Title,
        frame_id: FrameId::new(b"TIT2"),
        label: "TITLE",
        flag: 't',
    },
    FieldSpec {
        field: Field::Artist,
        frame_id: FrameId::new(b"TPE1"),
        label: "ARTIST",
        flag: 'a',
    },
    FieldSpec {
        field: Field::Album,
        frame_id: FrameId::new(b"TALB"),
        label: "ALBUM",
        flag: 'A',
    },
    FieldSpec {
        field: Field::Year,
        frame_id: FrameId::new(b"TYER"),
        label: "YEAR",
        flag: 'y',
    },
    FieldSpec {
        field: Field::Genre,
        frame_id: FrameId::new(b"TCON"),
        label: "GENRE",
        flag: 'g',
    },
    FieldSpec {
        field: Field::Comment,
        frame_id: FrameId::new(b"COMM"),
        label: "COMMENT",
        flag: 'c',
    },
];

impl Field {
    /// All fields in catalog order.
    pub const ALL: [Field; KNOWN_FRAME_COUNT] = [
        Field::Title,
        Field::Artist,
        Field::Album,
        Field::Year,
        Field::Genre,
        Field::Comment,
    ];

    pub fn spec(self) -> &'static FieldSpec {
        match self {
            Field::Title => &CATALOG[0],
            Field::Artist => &CATALOG[1],
            Field::Album => &CATALOG[2],
            Field::Year => &CATALOG[3],
            Field::Genre => &CATALOG[4],
            Field::Comment => &CATALOG[5],
        }
    }

    pub fn frame_id(self) -> FrameId {
        self.spec().frame_id
    }

    pub fn label(self) -> &'static str {
        self.spec().label
    }

    pub fn flag(self) -> char {
        self.spec().flag
    }

    /// Look up the field stored under a frame id.
    pub fn from_frame_id(id: &FrameId) -> Option<Field> {
        CATALOG
            .iter()
            .find(|spec| spec.frame_id == *id)
            .map(|spec| spec.field)
    }

    /// Look up the field selected by a short flag character.
    pub fn from_flag(flag: char) -> Option<Field> {
        CATALOG
            .iter()
            .find(|spec| spec.flag == flag)
            .map(|spec| spec.field)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Accepts a label (`artist`, `ARTIST`) or a frame id (`TPE1`).
impl FromStr for Field {
    type Err = TagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        CATALOG
            .iter()
            .find(|spec| {
                spec.label.eq_ignore_ascii_case(wanted)
                    || spec.frame_id.as_bytes().as_slice() == wanted.as_bytes()
            })
            .map(|spec| spec.field)
            .ok_or_else(|| TagError::UnknownField(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_rows_match_their_field() {
        for field in Field::ALL {
            assert_eq!(field.spec().field, field);
        }
    }

    #[test]
    fn ids_and_flags_are_unique() {
        for (i, a) in CATALOG.iter().enumerate() {
            for b in &CATALOG[i + 1..] {
                assert_ne!(a.frame_id, b.frame_id);
                assert_ne!(a.flag, b.flag);
                assert_ne!(a.label, b.label);
            }
        }
    }

    #[test]
    fn lookups() {
        assert_eq!(
            Field::from_frame_id(&FrameId::new(b"TCON")),
            Some(Field::Genre)
        );
        assert_eq!(Field::from_frame_id(&FrameId::new(b"TRCK")), None);
        assert_eq!(Field::from_flag('A'), Some(Field::Album));
        assert_eq!(Field::from_flag('a'), Some(Field::Artist));
        assert_eq!(Field::from_flag('x'), None);
    }

    #[test]
    fn parses_labels_and_ids() {
        assert_eq!("comment".parse::<Field>().unwrap(), Field::Comment);
        assert_eq!("YEAR".parse::<Field>().unwrap(), Field::Year);
        assert_eq!("TIT2".parse::<Field>().unwrap(), Field::Title);
        assert!(matches!(
            "composer".parse::<Field>(),
            Err(TagError::UnknownField(ref name)) if name == "composer"
        ));
    }
}
