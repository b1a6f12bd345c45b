use std::io::IsTerminal;
use std::path::Path;

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;
use tagsplice_frame::{Field, TagMap};

const SCHEMA_BASE: &str = "https://schemas.3leaps.dev/tagsplice/cli/v1";

#[derive(Clone, Debug, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

/// Schema URL for a CLI document kind.
pub fn schema_id(kind: &str) -> String {
    format!("{SCHEMA_BASE}/{kind}.schema.json")
}

pub fn print_json<T: Serialize>(value: &T) {
    println!(
        "{}",
        serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
    );
}

pub fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

#[derive(Serialize)]
struct FieldValue<'a> {
    field: &'static str,
    frame_id: String,
    value: Option<&'a str>,
}

#[derive(Serialize)]
struct TagsOutput<'a> {
    schema_id: String,
    file: String,
    fields: Vec<FieldValue<'a>>,
}

fn field_rows(tags: &TagMap) -> Vec<FieldValue<'_>> {
    Field::ALL
        .iter()
        .map(|field| FieldValue {
            field: field.label(),
            frame_id: field.frame_id().to_string(),
            value: tags.get(field).map(String::as_str),
        })
        .collect()
}

/// Print the six known fields in catalog order. Absent fields stay visible.
pub fn print_tags(path: &Path, tags: &TagMap, format: OutputFormat) {
    let rows = field_rows(tags);

    match format {
        OutputFormat::Json => print_json(&TagsOutput {
            schema_id: schema_id("tags"),
            file: path.display().to_string(),
            fields: rows,
        }),
        OutputFormat::Table => {
            let mut table = new_table(vec!["FIELD", "FRAME", "VALUE"]);
            for row in &rows {
                table.add_row(vec![
                    row.field.to_string(),
                    row.frame_id.clone(),
                    row.value.unwrap_or("-").to_string(),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!("MP3 Tag Reader and Editor: {}", path.display());
            for row in &rows {
                println!("  {:<8} : {}", row.field, row.value.unwrap_or(""));
            }
        }
        OutputFormat::Raw => {
            for row in &rows {
                println!("{}", row.value.unwrap_or(""));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_ids_share_base() {
        assert_eq!(
            schema_id("tags"),
            "https://schemas.3leaps.dev/tagsplice/cli/v1/tags.schema.json"
        );
    }

    #[test]
    fn tags_json_lists_every_field_in_order() {
        let mut tags = TagMap::new();
        tags.insert(Field::Artist, "Band".to_string());

        let out = TagsOutput {
            schema_id: schema_id("tags"),
            file: "song.mp3".to_string(),
            fields: field_rows(&tags),
        };
        let json: serde_json::Value = serde_json::to_value(&out).unwrap();

        let fields = json["fields"].as_array().unwrap();
        assert_eq!(fields.len(), 6);
        assert_eq!(fields[0]["field"], "TITLE");
        assert!(fields[0]["value"].is_null());
        assert_eq!(fields[1]["frame_id"], "TPE1");
        assert_eq!(fields[1]["value"], "Band");
    }
}
