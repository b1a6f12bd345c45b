use serde::Serialize;
use tagsplice_frame::read_version_at;

use crate::cmd::{validate_mp3_path, TagVersionArgs};
use crate::exit::{tag_error, CliResult, SUCCESS};
use crate::output::{new_table, print_json, schema_id, OutputFormat};

#[derive(Serialize)]
struct TagVersionOutput {
    schema_id: String,
    file: String,
    major: u8,
    minor: u8,
    version: String,
}

pub fn run(args: TagVersionArgs, format: OutputFormat) -> CliResult<i32> {
    validate_mp3_path(&args.path)?;
    let (major, minor) =
        read_version_at(&args.path).map_err(|err| tag_error("tag-version failed", err))?;

    let out = TagVersionOutput {
        schema_id: schema_id("tag-version"),
        file: args.path.display().to_string(),
        major,
        minor,
        version: version_label(major, minor),
    };

    match format {
        OutputFormat::Json => print_json(&out),
        OutputFormat::Table => {
            let mut table = new_table(vec!["FILE", "VERSION"]);
            table.add_row(vec![out.file.clone(), out.version.clone()]);
            println!("{table}");
        }
        OutputFormat::Pretty => println!("{}: {}", out.file, out.version),
        OutputFormat::Raw => println!("{}", out.version),
    }
    Ok(SUCCESS)
}

fn version_label(major: u8, minor: u8) -> String {
    format!("ID3v2.{major}.{minor}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_major_and_revision() {
        assert_eq!(version_label(3, 0), "ID3v2.3.0");
        assert_eq!(version_label(4, 1), "ID3v2.4.1");
    }
}
