use airlink_frame::{Checksum, DefaultChecksum, FRAME_OVERHEAD, MAX_PAYLOAD, SYNC};
use airlink_record::RecordKind;
use serde::Serialize;

use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};
use crate::output::{print_summary, OutputFormat};

#[derive(Serialize)]
struct PacketInfo {
    record: &'static str,
    packet_id: u8,
    payload_size: usize,
}

#[derive(Serialize)]
struct VersionInfo {
    name: &'static str,
    version: &'static str,
    target: &'static str,
    profile: &'static str,
    sync: String,
    checksum: &'static str,
    frame_overhead: usize,
    max_payload: usize,
    packets: Vec<PacketInfo>,
}

fn version_info() -> VersionInfo {
    VersionInfo {
        name: "airlink",
        version: env!("CARGO_PKG_VERSION"),
        target: option_env!("AIRLINK_BUILD_TARGET").unwrap_or("unknown"),
        profile: option_env!("AIRLINK_BUILD_PROFILE").unwrap_or("unknown"),
        sync: format!("{:02X} {:02X}", SYNC[0], SYNC[1]),
        checksum: DefaultChecksum::NAME,
        frame_overhead: FRAME_OVERHEAD,
        max_payload: MAX_PAYLOAD,
        packets: RecordKind::ALL
            .iter()
            .map(|kind| PacketInfo {
                record: kind.as_str(),
                packet_id: kind.packet_id(),
                payload_size: kind.payload_len(),
            })
            .collect(),
    }
}

pub fn run(args: VersionArgs, format: OutputFormat) -> CliResult<i32> {
    if !args.extended {
        println!("airlink {}", env!("CARGO_PKG_VERSION"));
        return Ok(SUCCESS);
    }

    let info = version_info();
    let mut rows = vec![
        ("version", info.version.to_string()),
        ("target", info.target.to_string()),
        ("profile", info.profile.to_string()),
        ("sync", info.sync.clone()),
        ("checksum", info.checksum.to_string()),
        ("max_payload", info.max_payload.to_string()),
    ];
    for packet in &info.packets {
        rows.push((
            packet.record,
            format!("id {} ({} bytes)", packet.packet_id, packet.payload_size),
        ));
    }
    print_summary(&info, &rows, format);

    Ok(SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_every_packet_layout() {
        let info = version_info();
        assert_eq!(info.sync, "93 E0");
        assert_eq!(info.packets.len(), RecordKind::ALL.len());

        let imu = info
            .packets
            .iter()
            .find(|p| p.record == "imu")
            .expect("imu is listed");
        assert_eq!((imu.packet_id, imu.payload_size), (15, 47));
    }
}
