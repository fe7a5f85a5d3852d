use airlink_remote::envelope;
use airlink_remote::Command;
use serde::Serialize;

use crate::cmd::CheckArgs;
use crate::exit::{CliResult, DATA_INVALID, SUCCESS};
use crate::output::{print_summary, OutputFormat};

#[derive(Serialize)]
struct CheckOutput {
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    sequence: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    command: Option<Command>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn inspect(line: &str) -> CheckOutput {
    let line = line.trim_end_matches(['\r', '\n']);
    let envelope = match envelope::open(line.as_bytes()) {
        Ok(envelope) => envelope,
        Err(err) => {
            return CheckOutput {
                valid: false,
                sequence: None,
                command: None,
                error: Some(err.to_string()),
            }
        }
    };

    match Command::parse(envelope.command) {
        Ok(command) => CheckOutput {
            valid: true,
            sequence: Some(envelope.sequence),
            command: Some(command),
            error: None,
        },
        Err(err) => CheckOutput {
            valid: false,
            sequence: Some(envelope.sequence),
            command: None,
            error: Some(err.to_string()),
        },
    }
}

pub fn run(args: CheckArgs, format: OutputFormat) -> CliResult<i32> {
    let out = inspect(&args.line);

    let mut rows = vec![("valid", out.valid.to_string())];
    if let Some(sequence) = out.sequence {
        rows.push(("sequence", sequence.to_string()));
    }
    if let Some(command) = &out.command {
        rows.push(("command", command.keyword().to_string()));
        rows.push((
            "arguments",
            serde_json::to_string(command).unwrap_or_default(),
        ));
    }
    if let Some(error) = &out.error {
        rows.push(("error", error.clone()));
    }
    print_summary(&out, &rows, format);

    Ok(if out.valid { SUCCESS } else { DATA_INVALID })
}

#[cfg(test)]
mod tests {
    use airlink_remote::sign;

    use super::*;

    #[test]
    fn valid_line_reports_command() {
        let out = inspect(&format!("{}\r\n", sign("9,route_end")));
        assert!(out.valid);
        assert_eq!(out.sequence, Some(9));
        assert_eq!(out.command, Some(Command::RouteEnd));
    }

    #[test]
    fn bad_checksum_has_no_sequence() {
        let out = inspect("9,route_end*00");
        assert!(!out.valid);
        assert_eq!(out.sequence, None);
        assert!(out.error.unwrap().contains("checksum"));
    }

    #[test]
    fn unknown_command_keeps_sequence() {
        let out = inspect(&sign("9,fly"));
        assert!(!out.valid);
        assert_eq!(out.sequence, Some(9));
    }
}
