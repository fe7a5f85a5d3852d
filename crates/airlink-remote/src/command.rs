use std::str::FromStr;

use serde::Serialize;
use tracing::{debug, warn};

use crate::effectors::{paths, Effectors, PiGains, PidGains};
use crate::error::CommandError;

/// Waypoint altitude meaning "no altitude given".
pub const AGL_UNSET_M: f64 = -9999.9;

const FEET_TO_METER: f64 = 0.3048;

/// One route waypoint as uplinked. How `field1`/`field2` are interpreted
/// (longitude/latitude, or distance/bearing) depends on `mode`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Waypoint {
    pub mode: i32,
    pub field1: f64,
    pub field2: f64,
    /// Metres above ground; `None` for a `-` altitude token.
    pub agl_m: Option<f64>,
}

impl Waypoint {
    /// Altitude as handed to the route manager.
    pub fn agl_m_or_unset(&self) -> f64 {
        self.agl_m.unwrap_or(AGL_UNSET_M)
    }
}

/// Autopilot setpoint selected by an `ap` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ApTarget {
    AglFt,
    MslFt,
    SpeedKt,
}

impl ApTarget {
    pub fn property(self) -> &'static str {
        match self {
            ApTarget::AglFt => paths::TARGET_AGL_FT,
            ApTarget::MslFt => paths::TARGET_MSL_FT,
            ApTarget::SpeedKt => paths::TARGET_SPEED_KT,
        }
    }
}

impl FromStr for ApTarget {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "agl-ft" => Ok(ApTarget::AglFt),
            "msl-ft" => Ok(ApTarget::MslFt),
            "speed-kt" => Ok(ApTarget::SpeedKt),
            other => Err(CommandError::UnknownTarget(other.to_string())),
        }
    }
}

/// Controller gains carried by `fcs-update`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "controller", rename_all = "snake_case")]
pub enum GainUpdate {
    Pid { index: usize, gains: PidGains },
    Pi { index: usize, gains: PiGains },
}

/// Camera/pointing look-at target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum LookAt {
    Ned { north: f64, east: f64, down: f64 },
    Wgs84 { longitude_deg: f64, latitude_deg: f64 },
}

/// A parsed uplink command.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    Heartbeat,
    Home {
        longitude_deg: f64,
        latitude_deg: f64,
        azimuth_deg: f64,
    },
    /// Replace the standby route.
    Route { waypoints: Vec<Waypoint> },
    /// Extend the standby route.
    RouteContinue { waypoints: Vec<Waypoint> },
    /// Activate the standby route.
    RouteEnd,
    /// Forwarded verbatim to the task subsystem.
    Task { request: String },
    AutopilotTarget { target: ApTarget, value: f64 },
    FcsUpdate { update: GainUpdate },
    Set { path: String, value: String },
    LookAt { target: LookAt },
}

fn number<T: FromStr>(token: &str) -> Result<T, CommandError> {
    token
        .trim()
        .parse()
        .map_err(|_| CommandError::InvalidNumber {
            token: token.to_string(),
        })
}

fn arity(
    keyword: &'static str,
    expected: &'static str,
    ok: bool,
    actual: usize,
) -> Result<(), CommandError> {
    if ok {
        Ok(())
    } else {
        Err(CommandError::Arity {
            keyword,
            expected,
            actual,
        })
    }
}

fn waypoints(tokens: &[&str]) -> Result<Vec<Waypoint>, CommandError> {
    // A trailing partial group is ignored.
    tokens
        .chunks_exact(4)
        .map(|group| {
            let agl_m = match group[3] {
                "-" => None,
                feet => Some(number::<f64>(feet)? * FEET_TO_METER),
            };
            Ok(Waypoint {
                mode: number(group[0])?,
                field1: number(group[1])?,
                field2: number(group[2])?,
                agl_m,
            })
        })
        .collect()
}

impl Command {
    /// Parse the command text that follows the sequence number.
    ///
    /// Argument counts include the keyword itself, except that `task` takes
    /// anything.
    pub fn parse(text: &str) -> Result<Self, CommandError> {
        if text.is_empty() {
            return Err(CommandError::Empty);
        }
        let tokens: Vec<&str> = text.split(',').collect();
        let n = tokens.len();

        match tokens[0] {
            "hb" => {
                arity("hb", "1", n == 1, n)?;
                Ok(Command::Heartbeat)
            }
            "home" => {
                // tokens[3] is an altitude the home position does not use.
                arity("home", "5", n == 5, n)?;
                Ok(Command::Home {
                    longitude_deg: number(tokens[1])?,
                    latitude_deg: number(tokens[2])?,
                    azimuth_deg: number(tokens[4])?,
                })
            }
            "route" => {
                arity("route", "at least 5", n >= 5, n)?;
                Ok(Command::Route {
                    waypoints: waypoints(&tokens[1..])?,
                })
            }
            "route_cont" => {
                arity("route_cont", "at least 5", n >= 5, n)?;
                Ok(Command::RouteContinue {
                    waypoints: waypoints(&tokens[1..])?,
                })
            }
            "route_end" => {
                arity("route_end", "1", n == 1, n)?;
                Ok(Command::RouteEnd)
            }
            "task" => Ok(Command::Task {
                request: text.to_string(),
            }),
            "ap" => {
                arity("ap", "3", n == 3, n)?;
                Ok(Command::AutopilotTarget {
                    target: tokens[1].parse()?,
                    value: number(tokens[2])?,
                })
            }
            "fcs-update" => {
                let args = &tokens[1..];
                let update = match args.len() {
                    9 => GainUpdate::Pid {
                        index: number(args[0])?,
                        gains: PidGains {
                            kp: number(args[1])?,
                            beta: number(args[2])?,
                            alpha: number(args[3])?,
                            gamma: number(args[4])?,
                            ti: number(args[5])?,
                            td: number(args[6])?,
                            u_min: number(args[7])?,
                            u_max: number(args[8])?,
                        },
                    },
                    5 => GainUpdate::Pi {
                        index: number(args[0])?,
                        gains: PiGains {
                            kp: number(args[1])?,
                            ki: number(args[2])?,
                            u_min: number(args[3])?,
                            u_max: number(args[4])?,
                        },
                    },
                    _ => {
                        return Err(CommandError::Arity {
                            keyword: "fcs-update",
                            expected: "10 or 6",
                            actual: n,
                        })
                    }
                };
                Ok(Command::FcsUpdate { update })
            }
            "set" => {
                arity("set", "3", n == 3, n)?;
                Ok(Command::Set {
                    path: tokens[1].to_string(),
                    value: tokens[2].to_string(),
                })
            }
            "la" => {
                arity("la", "5", n == 5, n)?;
                let target = match tokens[1] {
                    "ned" => LookAt::Ned {
                        north: number(tokens[2])?,
                        east: number(tokens[3])?,
                        down: number(tokens[4])?,
                    },
                    // tokens[4] is unused: altitude comes from the ground model.
                    "wgs84" => LookAt::Wgs84 {
                        longitude_deg: number(tokens[2])?,
                        latitude_deg: number(tokens[3])?,
                    },
                    other => return Err(CommandError::UnknownTarget(other.to_string())),
                };
                Ok(Command::LookAt { target })
            }
            other => Err(CommandError::UnknownKeyword(other.to_string())),
        }
    }

    /// Keyword naming this command on the wire.
    pub fn keyword(&self) -> &'static str {
        match self {
            Command::Heartbeat => "hb",
            Command::Home { .. } => "home",
            Command::Route { .. } => "route",
            Command::RouteContinue { .. } => "route_cont",
            Command::RouteEnd => "route_end",
            Command::Task { .. } => "task",
            Command::AutopilotTarget { .. } => "ap",
            Command::FcsUpdate { .. } => "fcs-update",
            Command::Set { .. } => "set",
            Command::LookAt { .. } => "la",
        }
    }

    /// Apply the command to the vehicle.
    pub fn execute(&self, fx: &mut Effectors<'_>) {
        match self {
            Command::Heartbeat => {}
            Command::Home {
                longitude_deg,
                latitude_deg,
                azimuth_deg,
            } => {
                fx.properties.set_f64(paths::HOME_LONGITUDE, *longitude_deg);
                fx.properties.set_f64(paths::HOME_LATITUDE, *latitude_deg);
                fx.properties.set_f64(paths::HOME_AZIMUTH, *azimuth_deg);
                fx.properties.set_bool(paths::HOME_VALID, true);
            }
            Command::Route { waypoints } | Command::RouteContinue { waypoints } => {
                let Some(route) = fx.route.as_deref_mut() else {
                    warn!(command = self.keyword(), "no route manager; route ignored");
                    return;
                };
                if matches!(self, Command::Route { .. }) {
                    route.clear_standby();
                }
                for wp in waypoints {
                    route.new_waypoint(wp.field1, wp.field2, wp.agl_m_or_unset(), wp.mode);
                }
            }
            Command::RouteEnd => {
                let Some(route) = fx.route.as_deref_mut() else {
                    warn!(command = self.keyword(), "no route manager; route ignored");
                    return;
                };
                route.swap();
                route.reposition();
            }
            Command::Task { request } => {
                fx.properties.set_string(paths::TASK_REQUEST, request);
            }
            Command::AutopilotTarget { target, value } => {
                fx.properties.set_f64(target.property(), *value);
            }
            Command::FcsUpdate { update } => {
                let Some(gains) = fx.gains.as_deref_mut() else {
                    warn!("no gain store; fcs-update ignored");
                    return;
                };
                let (kind, index, found) = match update {
                    GainUpdate::Pid { index, gains: pid } => {
                        ("pid", *index, gains.update_pid(*index, pid))
                    }
                    GainUpdate::Pi { index, gains: pi } => {
                        ("pi", *index, gains.update_pi(*index, pi))
                    }
                };
                if !found {
                    warn!(kind, index, "fcs-update for unknown controller");
                }
            }
            Command::Set { path, value } => {
                fx.properties.set_string(path, value);
            }
            Command::LookAt { target } => match target {
                LookAt::Ned { north, east, down } => {
                    fx.properties.set_string(paths::LOOKAT_MODE, "ned-vector");
                    fx.properties.set_f64(paths::LOOKAT_NORTH, *north);
                    fx.properties.set_f64(paths::LOOKAT_EAST, *east);
                    fx.properties.set_f64(paths::LOOKAT_DOWN, *down);
                }
                LookAt::Wgs84 {
                    longitude_deg,
                    latitude_deg,
                } => {
                    let ground = fx.properties.get_f64(paths::GROUND_ALTITUDE).unwrap_or(0.0);
                    fx.properties.set_string(paths::LOOKAT_MODE, "wgs84");
                    fx.properties.set_f64(paths::LOOKAT_LONGITUDE, *longitude_deg);
                    fx.properties.set_f64(paths::LOOKAT_LATITUDE, *latitude_deg);
                    fx.properties.set_f64(paths::LOOKAT_ALTITUDE, ground);
                }
            },
        }
        debug!(command = self.keyword(), "command executed");
    }
}
