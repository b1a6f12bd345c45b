use std::fs::File;
use std::io::{Cursor, Read, Seek, SeekFrom, Write};

use tracing::debug;

use crate::error::{Result, TagError};

/// Storage that holds a tagged stream and can be rewritten in place.
///
/// Implemented for files and in-memory cursors.
pub trait TagStorage: Read + Write + Seek {
    /// Truncate or extend the storage to exactly `len` bytes.
    fn set_len(&mut self, len: u64) -> std::io::Result<()>;
}

impl TagStorage for File {
    fn set_len(&mut self, len: u64) -> std::io::Result<()> {
        File::set_len(self, len)
    }
}

impl TagStorage for Cursor<Vec<u8>> {
    fn set_len(&mut self, len: u64) -> std::io::Result<()> {
        let len = usize::try_from(len).map_err(std::io::Error::other)?;
        self.get_mut().resize(len, 0);
        Ok(())
    }
}

impl<S: TagStorage + ?Sized> TagStorage for &mut S {
    fn set_len(&mut self, len: u64) -> std::io::Result<()> {
        (**self).set_len(len)
    }
}

/// Overwrite `storage` from offset 0 with `replacement` and cut it to length.
///
/// This is the only step that mutates the original storage. It is not
/// transactional: an interruption part way leaves mixed old and new bytes.
pub fn splice_back<S: TagStorage>(storage: &mut S, replacement: &[u8]) -> Result<u64> {
    storage.seek(SeekFrom::Start(0))?;
    storage.write_all(replacement)?;
    storage.flush()?;

    let expected = replacement.len() as u64;
    let written = storage.stream_position()?;
    if written != expected {
        return Err(TagError::SpliceMismatch { expected, written });
    }

    storage.set_len(expected)?;
    debug!(bytes = expected, "spliced replacement over storage");
    Ok(expected)
}
