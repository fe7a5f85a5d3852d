use airlink_record::RecordKind;
use airlink_remote::RemoteLinkConfig;
use airlink_transport::{LinkKind, SERIAL_BAUD};

use crate::cmd::ConfigArgs;
use crate::exit::{remote_error, CliResult, SUCCESS};
use crate::output::{print_summary, OutputFormat};

fn cadence(skip: i32) -> String {
    format!("send 1 in {}", skip.max(0).saturating_add(1))
}

pub fn run(args: ConfigArgs, format: OutputFormat) -> CliResult<i32> {
    let config = RemoteLinkConfig::load(&args.path)
        .map_err(|err| remote_error(&format!("cannot load {}", args.path.display()), err))?;

    let transport = &config.transport;
    let mut rows = vec![("link", transport.kind.to_string())];
    match transport.kind {
        LinkKind::Uart => {
            rows.push(("device", transport.device.clone()));
            rows.push(("baud", SERIAL_BAUD.to_string()));
            rows.push(("bytes_per_flush", transport.bytes_per_frame().to_string()));
        }
        LinkKind::UartServer => {
            rows.push(("relay", format!("{}:{}", transport.host, transport.port)));
        }
    }
    for kind in RecordKind::ALL {
        rows.push((kind.as_str(), cadence(config.skip.get(kind))));
    }
    rows.push(("max_command_len", config.max_command_len.to_string()));

    print_summary(&config, &rows, format);
    Ok(SUCCESS)
}
