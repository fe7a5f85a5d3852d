mod cmd;
mod exit;
mod logging;
mod output;

use clap::Parser;

use crate::cmd::Command;
use crate::logging::{command_span, init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "airlink", version, about = "UAV telemetry link diagnostics")]
struct Cli {
    /// Output format.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "info", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    let result = {
        let _span = command_span(cli.command.name()).entered();
        cmd::run(cli.command, format)
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

#[cfg(test)]
mod tests {
    use airlink_record::RecordKind;

    use super::*;

    #[test]
    fn parses_decode_with_kind_filter() {
        let cli = Cli::try_parse_from([
            "airlink",
            "decode",
            "capture.bin",
            "--kind",
            "gps,airdata",
            "--count",
            "10",
        ])
        .expect("decode args should parse");

        let Command::Decode(args) = cli.command else {
            panic!("expected decode");
        };
        assert_eq!(
            args.kinds,
            Some(vec![RecordKind::Gps, RecordKind::AirData])
        );
        assert_eq!(args.count, Some(10));
    }

    #[test]
    fn rejects_unknown_record_kind() {
        let err = Cli::try_parse_from(["airlink", "decode", "--kind", "sonar"])
            .expect_err("unknown kind should fail");
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn log_level_off_parses() {
        let cli = Cli::try_parse_from(["airlink", "--log-level", "off", "version"])
            .expect("off is a valid level");
        assert_eq!(cli.log_level, LogLevel::Off);
        assert_eq!(cli.command.name(), "version");
    }

    #[test]
    fn parses_global_format_after_subcommand() {
        let cli = Cli::try_parse_from(["airlink", "sign", "3,hb", "--format", "json"])
            .expect("sign args should parse");
        assert!(matches!(cli.format, Some(OutputFormat::Json)));
        assert!(matches!(cli.command, Command::Sign(_)));
    }
}
