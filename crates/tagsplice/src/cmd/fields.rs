use serde::Serialize;
use tagsplice_frame::CATALOG;

use crate::cmd::FieldsArgs;
use crate::exit::{CliResult, SUCCESS};
use crate::output::{new_table, print_json, schema_id, OutputFormat};

#[derive(Serialize)]
struct FieldEntry {
    field: &'static str,
    frame_id: String,
    flag: String,
}

#[derive(Serialize)]
struct FieldsOutput {
    schema_id: String,
    fields: Vec<FieldEntry>,
}

pub fn run(_args: FieldsArgs, format: OutputFormat) -> CliResult<i32> {
    let out = FieldsOutput {
        schema_id: schema_id("fields"),
        fields: CATALOG
            .iter()
            .map(|spec| FieldEntry {
                field: spec.label,
                frame_id: spec.frame_id.to_string(),
                flag: format!("-{}", spec.flag),
            })
            .collect(),
    };

    match format {
        OutputFormat::Json => print_json(&out),
        OutputFormat::Table => {
            let mut table = new_table(vec!["FIELD", "FRAME", "FLAG"]);
            for entry in &out.fields {
                table.add_row(vec![
                    entry.field.to_string(),
                    entry.frame_id.clone(),
                    entry.flag.clone(),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty | OutputFormat::Raw => {
            for entry in &out.fields {
                println!("{} {} {}", entry.flag, entry.frame_id, entry.field);
            }
        }
    }
    Ok(SUCCESS)
}
