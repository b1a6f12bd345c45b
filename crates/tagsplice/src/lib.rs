//! Read and rewrite the text frames of an MP3's ID3v2 tag.
//!
//! The library half of this crate is a thin facade over [`frame`]. The
//! `tagsplice` binary (behind the `cli` feature) adds `view`, `edit`, and
//! `tag-version` commands on top of it.

/// Re-export frame codec types and tag operations.
pub mod frame {
    pub use tagsplice_frame::*;
}
