//! Telemetry cycle against a local TCP relay.
//!
//! Starts a relay on a loopback port, connects the remote link to it, runs a
//! few cycles of downlink and prints what the relay sees. The relay uplinks
//! an AGL target halfway through, which then shows up in the autopilot
//! status record's MSL target. GPS starts decimated and goes to full rate
//! once the command lands.
//!
//! Run with:
//!   cargo run --example relay-cycle

use std::collections::HashMap;
use std::io::Write;
use std::net::TcpListener;
use std::thread;
use std::time::Duration;

use airlink::frame::FrameReader;
use airlink::record::{AutopilotStatus, GpsFix, NavSolution, RecordKind, TelemetryRecord};
use airlink::remote::{
    effectors::paths, sign, CommandOutcome, Effectors, PropertyStore, RemoteLink, RemoteLinkConfig,
    SkipConfig,
};
use airlink::transport::TransportConfig;

#[derive(Default)]
struct Properties(HashMap<String, String>);

impl PropertyStore for Properties {
    fn get_f64(&self, path: &str) -> Option<f64> {
        self.0.get(path).and_then(|v| v.parse().ok())
    }

    fn set_f64(&mut self, path: &str, value: f64) {
        self.0.insert(path.to_string(), value.to_string());
    }

    fn set_bool(&mut self, path: &str, value: bool) {
        self.0.insert(path.to_string(), value.to_string());
    }

    fn set_string(&mut self, path: &str, value: &str) {
        self.0.insert(path.to_string(), value.to_string());
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let port = listener.local_addr()?.port();

    let relay = thread::spawn(move || -> std::io::Result<()> {
        let (stream, peer) = listener.accept()?;
        eprintln!("relay: vehicle connected from {peer}");
        let mut uplink = stream.try_clone()?;
        let mut downlink = FrameReader::new(stream);

        for n in 0.. {
            let frame = match downlink.read_frame() {
                Ok(frame) => frame,
                Err(err) => {
                    eprintln!("relay: {err}");
                    break;
                }
            };
            match TelemetryRecord::decode(frame.packet_id, &frame.payload) {
                Ok(record) => println!("{record}"),
                Err(err) => eprintln!("relay: {err}"),
            }
            if n == 4 {
                uplink.write_all(format!("{}\n", sign("1,ap,agl-ft,400")).as_bytes())?;
            }
        }
        Ok(())
    });

    let mut skip = SkipConfig::default();
    skip.gps = 1;
    let config = RemoteLinkConfig {
        transport: TransportConfig::uart_server("127.0.0.1", port),
        skip,
        ..RemoteLinkConfig::default()
    };
    let mut remote = RemoteLink::open(&config)?;
    let mut properties = Properties::default();

    for cycle in 0..10 {
        let time = f64::from(cycle) * 0.1;
        remote.send(
            &GpsFix {
                time,
                latitude_deg: 44.98,
                longitude_deg: -93.27,
                satellites: 10,
                ..GpsFix::default()
            }
            .into(),
        );
        remote.send(
            &NavSolution {
                time,
                latitude_deg: 44.98,
                longitude_deg: -93.27,
                ..NavSolution::default()
            }
            .into(),
        );

        let target_agl_ft = properties.get_f64(paths::TARGET_AGL_FT).unwrap_or(0.0);
        remote.send(
            &AutopilotStatus {
                time,
                route_size: 1,
                ..AutopilotStatus::default()
            }
            .with_msl_target(256.0, 1.5, target_agl_ft)
            .into(),
        );

        if let Some(outcome) = remote.poll_command(&mut Effectors::new(&mut properties)) {
            eprintln!("vehicle: {outcome:?}");
            if matches!(outcome, CommandOutcome::Executed { .. }) {
                remote.telemetry_mut().set_skip_count(RecordKind::Gps, 0);
            }
        }
        remote.service();
        thread::sleep(Duration::from_millis(50));
    }

    eprintln!("vehicle: {:?}", remote.telemetry().stats());
    eprintln!("vehicle: properties {:?}", properties.0);
    drop(remote);
    let _ = relay.join();
    Ok(())
}
