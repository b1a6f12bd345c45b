//! Whole-stream operations: version, view, and edit.
//!
//! Stream functions rewind to offset 0 first. The `*_at` variants open the
//! file themselves and report open failures as [`TagError::Open`].

use std::fs::{File, OpenOptions};
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use bytes::Bytes;
use tracing::debug;

use crate::catalog::Field;
use crate::config::ScanConfig;
use crate::cursor::FrameCursor;
use crate::error::{Result, TagError};
use crate::extract::{extract_known_frames, TagMap};
use crate::header;
use crate::splice::{EditOutcome, EditRequest, FrameSplicer};
use crate::storage::{splice_back, TagStorage};

/// Read the `(major, minor)` tag version.
pub fn read_version<R: Read + Seek>(stream: &mut R) -> Result<(u8, u8)> {
    stream.seek(SeekFrom::Start(0))?;
    header::read_version(stream)
}

/// Read the known fields with default configuration.
pub fn read_all_tags<R: Read + Seek>(stream: R) -> Result<TagMap> {
    read_all_tags_with(stream, &ScanConfig::default())
}

/// Read the known fields.
pub fn read_all_tags_with<R: Read + Seek>(mut stream: R, config: &ScanConfig) -> Result<TagMap> {
    stream.seek(SeekFrom::Start(0))?;
    let mut cursor = FrameCursor::with_config(stream, config.clone())?;
    cursor.read_header()?;
    extract_known_frames(&mut cursor)
}

/// Replace one field's content with default configuration.
pub fn edit_tag<S: TagStorage>(
    storage: &mut S,
    field: Field,
    value: impl Into<Bytes>,
) -> Result<EditOutcome> {
    edit_tag_with(storage, &EditRequest::new(field, value), &ScanConfig::default())
}

/// Replace one field's content and write the spliced stream back.
///
/// Nothing is written to `storage` unless the whole replacement stream was
/// built successfully. The header's declared tag size is copied unchanged.
pub fn edit_tag_with<S: TagStorage>(
    storage: &mut S,
    request: &EditRequest,
    config: &ScanConfig,
) -> Result<EditOutcome> {
    storage.seek(SeekFrom::Start(0))?;
    let mut splicer = FrameSplicer::with_config(&mut *storage, config.clone())?;
    splicer.copy_header()?;
    let outcome = splicer.compare_and_edit(request)?;
    let replacement = splicer.finish();

    splice_back(storage, &replacement)?;
    debug!(
        field = %request.field(),
        original_len = outcome.original_len,
        spliced_len = outcome.spliced_len,
        "edited tag"
    );
    Ok(outcome)
}

/// Open a tagged file for reading.
pub fn open_for_read(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| TagError::Open {
        path: path.to_path_buf(),
        source,
    })
}

/// Open a tagged file for reading and rewriting.
pub fn open_for_edit(path: &Path) -> Result<File> {
    OpenOptions::new()
        .read(true)
        .write(true)
        .open(path)
        .map_err(|source| TagError::Open {
            path: path.to_path_buf(),
            source,
        })
}

/// [`read_version`] on a file path.
pub fn read_version_at(path: impl AsRef<Path>) -> Result<(u8, u8)> {
    let mut reader = BufReader::new(open_for_read(path.as_ref())?);
    read_version(&mut reader)
}

/// [`read_all_tags_with`] on a file path.
pub fn read_all_tags_at(path: impl AsRef<Path>, config: &ScanConfig) -> Result<TagMap> {
    let reader = BufReader::new(open_for_read(path.as_ref())?);
    read_all_tags_with(reader, config)
}

/// [`edit_tag_with`] on a file path.
pub fn edit_tag_at(
    path: impl AsRef<Path>,
    request: &EditRequest,
    config: &ScanConfig,
) -> Result<EditOutcome> {
    let mut file = open_for_edit(path.as_ref())?;
    edit_tag_with(&mut file, request, config)
}
