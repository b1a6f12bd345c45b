use serde::Serialize;
use tagsplice_frame::{edit_tag_at, EditOutcome, EditRequest, Field, ScanConfig};

use crate::cmd::{validate_mp3_path, EditArgs};
use crate::exit::{tag_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::{new_table, print_json, schema_id, OutputFormat};

#[derive(Serialize)]
struct EditOutput {
    schema_id: String,
    file: String,
    field: &'static str,
    frame_id: String,
    frame_index: usize,
    old_size: u32,
    new_size: u32,
    original_len: u64,
    spliced_len: u64,
    edited: bool,
}

pub fn run(args: EditArgs, format: OutputFormat, scan: &ScanConfig) -> CliResult<i32> {
    validate_mp3_path(&args.path)?;
    let (field, value) = args
        .selection()
        .ok_or_else(|| CliError::new(USAGE, "exactly one field flag is required"))?;

    tracing::info!(field = %field, path = %args.path.display(), "selected for editing");
    let request = EditRequest::new(field, value.as_bytes().to_vec());
    let outcome =
        edit_tag_at(&args.path, &request, scan).map_err(|err| tag_error("edit failed", err))?;

    let out = edit_output(&args.path.display().to_string(), field, &outcome);
    print_edit(&out, format);
    Ok(SUCCESS)
}

fn edit_output(file: &str, field: Field, outcome: &EditOutcome) -> EditOutput {
    EditOutput {
        schema_id: schema_id("tag-edited"),
        file: file.to_string(),
        field: field.label(),
        frame_id: outcome.frame_id.to_string(),
        frame_index: outcome.frame_index,
        old_size: outcome.old_size,
        new_size: outcome.new_size,
        original_len: outcome.original_len,
        spliced_len: outcome.spliced_len,
        edited: true,
    }
}

fn print_edit(out: &EditOutput, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(out),
        OutputFormat::Table => {
            let mut table = new_table(vec!["FIELD", "FRAME", "OLD SIZE", "NEW SIZE", "FILE BYTES"]);
            table.add_row(vec![
                out.field.to_string(),
                out.frame_id.clone(),
                out.old_size.to_string(),
                out.new_size.to_string(),
                format!("{} -> {}", out.original_len, out.spliced_len),
            ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!("Selected for editing: {}", out.field);
            println!(
                "Tag edited successfully ({} size {} -> {}, file {} -> {} bytes)",
                out.frame_id, out.old_size, out.new_size, out.original_len, out.spliced_len
            );
        }
        OutputFormat::Raw => println!("{}", out.field),
    }
}

#[cfg(test)]
mod tests {
    use tagsplice_frame::FrameId;

    use super::*;

    #[test]
    fn output_reports_size_change() {
        let outcome = EditOutcome {
            frame_id: FrameId::new(b"TPE1"),
            frame_index: 1,
            frame_offset: 27,
            old_size: 6,
            new_size: 4,
            original_len: 120,
            spliced_len: 118,
        };
        let out = edit_output("song.mp3", Field::Artist, &outcome);
        let json = serde_json::to_value(&out).unwrap();

        assert_eq!(json["field"], "ARTIST");
        assert_eq!(json["frame_id"], "TPE1");
        assert_eq!(json["new_size"], 4);
        assert_eq!(json["spliced_len"], 118);
        assert!(json["schema_id"]
            .as_str()
            .is_some_and(|s| s.ends_with("tag-edited.schema.json")));
    }
}
