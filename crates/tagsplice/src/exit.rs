use std::fmt;
use std::io;

use tagsplice_frame::TagError;

// Process exit codes returned from `main`.
pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

fn io_code(kind: io::ErrorKind) -> i32 {
    match kind {
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::NotFound => FAILURE,
        _ => INTERNAL,
    }
}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    CliError::new(io_code(err.kind()), format!("{context}: {err}"))
}

pub fn tag_error(context: &str, err: TagError) -> CliError {
    match err {
        TagError::Io(source) => io_error(context, source),
        TagError::Open { ref source, .. } => {
            CliError::new(io_code(source.kind()), format!("{context}: {err}"))
        }
        TagError::Format(_) | TagError::TruncatedStream { .. } => {
            CliError::new(DATA_INVALID, format!("{context}: {err}"))
        }
        TagError::UnknownField(_) | TagError::ContentTooLarge { .. } => {
            CliError::new(USAGE, format!("{context}: {err}"))
        }
        TagError::FrameNotFound { .. } => CliError::new(FAILURE, format!("{context}: {err}")),
        other => CliError::new(INTERNAL, format!("{context}: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use tagsplice_frame::{FormatError, FrameId};

    use super::*;

    #[test]
    fn maps_tag_errors_to_exit_codes() {
        let format = TagError::Format(FormatError::MissingMagic {
            found: b"xyz".to_vec(),
        });
        assert_eq!(tag_error("view failed", format).code, DATA_INVALID);

        let truncated = TagError::TruncatedStream {
            needed: 10,
            available: 2,
        };
        assert_eq!(tag_error("view failed", truncated).code, DATA_INVALID);

        let not_found = TagError::FrameNotFound {
            frame_id: FrameId::new(b"TCON"),
            scanned: 6,
        };
        let err = tag_error("edit failed", not_found);
        assert_eq!(err.code, FAILURE);
        assert!(err.message.starts_with("edit failed: frame TCON not found"));

        let mismatch = TagError::SpliceMismatch {
            expected: 4,
            written: 3,
        };
        assert_eq!(tag_error("edit failed", mismatch).code, INTERNAL);
    }

    #[test]
    fn open_errors_keep_path_and_classify_kind() {
        let err = TagError::Open {
            path: PathBuf::from("/tmp/song.mp3"),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        };
        let cli = tag_error("view failed", err);
        assert_eq!(cli.code, PERMISSION_DENIED);
        assert!(cli.message.contains("/tmp/song.mp3"));

        let err = TagError::Open {
            path: PathBuf::from("/tmp/missing.mp3"),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        assert_eq!(tag_error("view failed", err).code, FAILURE);
    }
}
