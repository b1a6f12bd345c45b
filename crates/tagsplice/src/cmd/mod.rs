use std::path::{Path, PathBuf};

use clap::{ArgGroup, Args, Subcommand, ValueEnum};
use tagsplice_frame::{Field, ScanConfig, ScanLimit};

use crate::exit::{CliError, CliResult, USAGE};
use crate::output::OutputFormat;

pub mod edit;
pub mod fields;
pub mod tag_version;
pub mod version;
pub mod view;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the title, artist, album, year, genre, and comment frames.
    View(ViewArgs),
    /// Replace the content of one known frame.
    Edit(EditArgs),
    /// Show the ID3v2 version stored in a file's tag header.
    TagVersion(TagVersionArgs),
    /// List the known frames and their edit flags.
    Fields(FieldsArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat, scan: &ScanConfig) -> CliResult<i32> {
    match command {
        Command::View(args) => view::run(args, format, scan),
        Command::Edit(args) => edit::run(args, format, scan),
        Command::TagVersion(args) => tag_version::run(args, format),
        Command::Fields(args) => fields::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

/// How far frame scans may walk.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ScanLimitArg {
    /// Always scan six frames.
    Fixed,
    /// Stop at padding or at the tag's declared size.
    Declared,
}

impl From<ScanLimitArg> for ScanConfig {
    fn from(arg: ScanLimitArg) -> Self {
        let limit = match arg {
            ScanLimitArg::Fixed => ScanLimit::FixedCount,
            ScanLimitArg::Declared => ScanLimit::DeclaredTagSize,
        };
        ScanConfig {
            limit,
            ..ScanConfig::default()
        }
    }
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    /// MP3 file to read.
    pub path: PathBuf,
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("field").required(true).multiple(false)))]
pub struct EditArgs {
    /// MP3 file to edit in place.
    pub path: PathBuf,
    /// New title (TIT2).
    #[arg(short = 't', long, value_name = "TEXT", group = "field")]
    pub title: Option<String>,
    /// New artist (TPE1).
    #[arg(short = 'a', long, value_name = "TEXT", group = "field")]
    pub artist: Option<String>,
    /// New album (TALB).
    #[arg(short = 'A', long, value_name = "TEXT", group = "field")]
    pub album: Option<String>,
    /// New year (TYER).
    #[arg(short = 'y', long, value_name = "TEXT", group = "field")]
    pub year: Option<String>,
    /// New genre (TCON).
    #[arg(short = 'g', long, value_name = "TEXT", group = "field")]
    pub genre: Option<String>,
    /// New comment (COMM).
    #[arg(short = 'c', long, value_name = "TEXT", group = "field")]
    pub comment: Option<String>,
}

impl EditArgs {
    /// The single field selected on the command line and its new value.
    pub fn selection(&self) -> Option<(Field, &str)> {
        [
            (Field::Title, &self.title),
            (Field::Artist, &self.artist),
            (Field::Album, &self.album),
            (Field::Year, &self.year),
            (Field::Genre, &self.genre),
            (Field::Comment, &self.comment),
        ]
        .into_iter()
        .find_map(|(field, value)| value.as_deref().map(|v| (field, v)))
    }
}

#[derive(Args, Debug)]
pub struct TagVersionArgs {
    /// MP3 file to inspect.
    pub path: PathBuf,
}

#[derive(Args, Debug, Default)]
pub struct FieldsArgs {}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

/// Reject paths that cannot name an MP3 before anything is opened.
pub fn validate_mp3_path(path: &Path) -> CliResult<()> {
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| CliError::new(USAGE, format!("invalid file path: {}", path.display())))?;

    if name.starts_with('.') {
        return Err(CliError::new(
            USAGE,
            format!("invalid source file without filename: {}", path.display()),
        ));
    }

    let is_mp3 = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("mp3"));
    if !is_mp3 {
        return Err(CliError::new(
            USAGE,
            format!("invalid source file without .mp3 extension: {}", path.display()),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_mp3_paths() {
        assert!(validate_mp3_path(Path::new("song.mp3")).is_ok());
        assert!(validate_mp3_path(Path::new("/music/Album/01 Song.MP3")).is_ok());
    }

    #[test]
    fn rejects_hidden_and_foreign_paths() {
        for bad in [".mp3", "dir/.hidden.mp3", "song.wav", "song", "song.mp3.bak"] {
            let err = validate_mp3_path(Path::new(bad)).expect_err(bad);
            assert_eq!(err.code, USAGE, "{bad}");
        }
    }

    #[test]
    fn scan_limit_arg_maps_to_config() {
        assert_eq!(ScanConfig::from(ScanLimitArg::Fixed), ScanConfig::default());
        assert_eq!(
            ScanConfig::from(ScanLimitArg::Declared).limit,
            ScanLimit::DeclaredTagSize
        );
    }
}
