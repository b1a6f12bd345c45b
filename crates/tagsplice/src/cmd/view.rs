use tagsplice_frame::{read_all_tags_at, ScanConfig};

use crate::cmd::{validate_mp3_path, ViewArgs};
use crate::exit::{tag_error, CliResult, SUCCESS};
use crate::output::{print_tags, OutputFormat};

pub fn run(args: ViewArgs, format: OutputFormat, scan: &ScanConfig) -> CliResult<i32> {
    validate_mp3_path(&args.path)?;
    let tags =
        read_all_tags_at(&args.path, scan).map_err(|err| tag_error("view failed", err))?;
    tracing::debug!(fields = tags.len(), "decoded known frames");

    print_tags(&args.path, &tags, format);
    Ok(SUCCESS)
}
