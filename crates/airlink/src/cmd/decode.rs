use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use airlink_frame::{packet, FrameError, FrameReader};
use airlink_record::TelemetryRecord;
use tracing::{debug, info, warn};

use crate::cmd::DecodeArgs;
use crate::exit::{frame_error, io_error, CliResult, DATA_INVALID, SUCCESS};
use crate::output::{print_record, OutputFormat};

fn open_input(path: Option<&Path>) -> CliResult<Box<dyn Read>> {
    match path {
        None => Ok(Box::new(io::stdin().lock())),
        Some(path) if path == Path::new("-") => Ok(Box::new(io::stdin().lock())),
        Some(path) => {
            let file = File::open(path)
                .map_err(|err| io_error(&format!("cannot open {}", path.display()), err))?;
            Ok(Box::new(BufReader::new(file)))
        }
    }
}

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    let mut reader = FrameReader::new(open_input(args.input.as_deref())?);
    let mut printed = 0usize;
    let mut unknown = 0u64;
    let mut undecodable = 0u64;

    loop {
        let frame = match reader.read_frame() {
            Ok(frame) => frame,
            Err(FrameError::ConnectionClosed) => break,
            Err(err) => return Err(frame_error("read failed", err)),
        };

        if !packet::is_known(frame.packet_id) {
            unknown += 1;
            debug!(packet_id = frame.packet_id, "skipping unknown packet id");
            continue;
        }

        let record = match TelemetryRecord::decode(frame.packet_id, &frame.payload) {
            Ok(record) => record,
            Err(err) => {
                undecodable += 1;
                warn!(packet_id = frame.packet_id, %err, "malformed record payload");
                continue;
            }
        };

        if let Some(kinds) = &args.kinds {
            if !kinds.contains(&record.kind()) {
                continue;
            }
        }

        print_record(&frame, &record, format);
        printed = printed.saturating_add(1);

        if let Some(count) = args.count {
            if printed >= count {
                break;
            }
        }
    }

    let dropped = reader.dropped();
    info!(printed, dropped, unknown, undecodable, "decode finished");

    if args.strict && (dropped > 0 || unknown > 0 || undecodable > 0) {
        return Ok(DATA_INVALID);
    }
    Ok(SUCCESS)
}
