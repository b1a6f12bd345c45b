use crate::catalog::KNOWN_FRAME_COUNT;

/// Default cap on a single frame's content: 16 MiB.
pub const DEFAULT_MAX_CONTENT: usize = 16 * 1024 * 1024;

/// How far a frame scan may walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanLimit {
    /// Always attempt `max_frames` frames, whatever the tag holds.
    #[default]
    FixedCount,
    /// Also stop at padding or at the end of the declared tag region.
    DeclaredTagSize,
}

/// Controls frame scanning for both the read and the edit path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    pub limit: ScanLimit,
    /// Maximum number of frames inspected. Default: 6.
    pub max_frames: usize,
    /// Maximum content bytes for one frame. Default: 16 MiB.
    pub max_content_size: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            limit: ScanLimit::FixedCount,
            max_frames: KNOWN_FRAME_COUNT,
            max_content_size: DEFAULT_MAX_CONTENT,
        }
    }
}

impl ScanConfig {
    /// Default configuration bounded by the declared tag size.
    pub fn bounded() -> Self {
        Self {
            limit: ScanLimit::DeclaredTagSize,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scans_six_frames_with_cap() {
        let cfg = ScanConfig::default();
        assert_eq!(cfg.limit, ScanLimit::FixedCount);
        assert_eq!(cfg.max_frames, 6);
        assert_eq!(cfg.max_content_size, 16 * 1024 * 1024);
    }

    #[test]
    fn bounded_only_changes_the_limit() {
        let cfg = ScanConfig::bounded();
        assert_eq!(cfg.limit, ScanLimit::DeclaredTagSize);
        assert_eq!(
            ScanConfig {
                limit: ScanLimit::FixedCount,
                ..cfg
            },
            ScanConfig::default()
        );
    }
}
