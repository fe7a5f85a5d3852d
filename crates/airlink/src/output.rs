use std::io::{IsTerminal, Write};

use airlink_frame::Frame;
use airlink_record::TelemetryRecord;
use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
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

#[derive(Serialize)]
struct RecordOutput<'a> {
    packet_id: u8,
    packet_name: &'static str,
    payload_size: usize,
    record: &'a TelemetryRecord,
}

pub fn print_record(frame: &Frame, record: &TelemetryRecord, format: OutputFormat) {
    let kind = record.kind();
    match format {
        OutputFormat::Json => {
            let out = RecordOutput {
                packet_id: frame.packet_id,
                packet_name: kind.packet_name(),
                payload_size: frame.payload.len(),
                record,
            };
            print_json(&out);
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["RECORD", "ID", "SIZE", "FIELDS"])
                .add_row(vec![
                    kind.to_string(),
                    frame.packet_id.to_string(),
                    frame.payload.len().to_string(),
                    fields(record),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => println!("{record}"),
        OutputFormat::Raw => print_raw(frame.payload.as_ref()),
    }
}

/// Print a two-column key/value table, or the JSON value for other formats.
pub fn print_summary<T: Serialize>(value: &T, rows: &[(&str, String)], format: OutputFormat) {
    match format {
        OutputFormat::Json | OutputFormat::Raw => print_json(value),
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["FIELD", "VALUE"]);
            for (key, val) in rows {
                table.add_row(vec![key.to_string(), val.clone()]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            for (key, val) in rows {
                println!("{key}: {val}");
            }
        }
    }
}

pub fn print_json<T: Serialize>(value: &T) {
    println!(
        "{}",
        serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
    );
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

/// Record fields without the packet-name prefix the record's `Display` adds.
fn fields(record: &TelemetryRecord) -> String {
    let text = record.to_string();
    match text.split_once(' ') {
        Some((_, rest)) => rest.trim_start().to_string(),
        None => text,
    }
}
