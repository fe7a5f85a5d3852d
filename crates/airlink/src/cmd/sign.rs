use airlink_remote::{nmea_checksum, sign};
use serde::Serialize;

use crate::cmd::SignArgs;
use crate::exit::{CliResult, SUCCESS};
use crate::output::{print_json, OutputFormat};

#[derive(Serialize)]
struct SignOutput<'a> {
    body: &'a str,
    checksum: String,
    line: String,
}

pub fn run(args: SignArgs, format: OutputFormat) -> CliResult<i32> {
    let line = sign(&args.body);
    match format {
        OutputFormat::Json => print_json(&SignOutput {
            body: &args.body,
            checksum: format!("{:02X}", nmea_checksum(args.body.as_bytes())),
            line,
        }),
        _ => println!("{line}"),
    }
    Ok(SUCCESS)
}
