//! Interfaces through which uplinked commands act on the vehicle.

use serde::Serialize;

/// Property tree paths written by the command table.
pub mod paths {
    pub const HOME_LONGITUDE: &str = "/task/home/longitude-deg";
    pub const HOME_LATITUDE: &str = "/task/home/latitude-deg";
    pub const HOME_AZIMUTH: &str = "/task/home/azimuth-deg";
    pub const HOME_VALID: &str = "/task/home/valid";

    pub const TASK_REQUEST: &str = "/task/command-request";

    pub const TARGET_AGL_FT: &str = "/autopilot/settings/target-agl-ft";
    pub const TARGET_MSL_FT: &str = "/autopilot/settings/target-msl-ft";
    pub const TARGET_SPEED_KT: &str = "/autopilot/settings/target-speed-kt";

    pub const LOOKAT_MODE: &str = "/pointing/lookat-mode";
    pub const LOOKAT_NORTH: &str = "/pointing/vector/north";
    pub const LOOKAT_EAST: &str = "/pointing/vector/east";
    pub const LOOKAT_DOWN: &str = "/pointing/vector/down";
    pub const LOOKAT_LONGITUDE: &str = "/pointing/wgs84/longitude-deg";
    pub const LOOKAT_LATITUDE: &str = "/pointing/wgs84/latitude-deg";
    pub const LOOKAT_ALTITUDE: &str = "/pointing/wgs84/altitude-m";

    pub const GROUND_ALTITUDE: &str = "/position/altitude-ground-m";
}

/// Named-property access to vehicle state.
pub trait PropertyStore {
    /// Current value of a numeric property, if it exists.
    fn get_f64(&self, path: &str) -> Option<f64>;

    fn set_f64(&mut self, path: &str, value: f64);

    fn set_bool(&mut self, path: &str, value: bool);

    fn set_string(&mut self, path: &str, value: &str);
}

/// The route manager's standby/active route pair.
pub trait RouteManager {
    /// Empty the standby route.
    fn clear_standby(&mut self);

    /// Append a waypoint to the standby route. `agl_m` is
    /// [`AGL_UNSET_M`](crate::command::AGL_UNSET_M) when the waypoint
    /// carries no altitude.
    fn new_waypoint(&mut self, field1: f64, field2: f64, agl_m: f64, mode: i32);

    /// Make the standby route active.
    fn swap(&mut self);

    /// Re-establish the route relative to the current position.
    fn reposition(&mut self);
}

/// Gains for a full PID controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PidGains {
    pub kp: f64,
    pub beta: f64,
    pub alpha: f64,
    pub gamma: f64,
    pub ti: f64,
    pub td: f64,
    pub u_min: f64,
    pub u_max: f64,
}

/// Gains for a simple PI controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PiGains {
    pub kp: f64,
    pub ki: f64,
    pub u_min: f64,
    pub u_max: f64,
}

/// Controller gain storage, addressed by controller index.
///
/// Both methods return `false` when no controller of that kind exists at
/// `index`.
pub trait GainStore {
    fn update_pid(&mut self, index: usize, gains: &PidGains) -> bool;

    fn update_pi(&mut self, index: usize, gains: &PiGains) -> bool;
}

/// The set of interfaces a command may act on.
///
/// Only the property store is mandatory. Route and gain commands are
/// ignored (and logged) when their target is absent.
pub struct Effectors<'a> {
    pub properties: &'a mut dyn PropertyStore,
    pub route: Option<&'a mut dyn RouteManager>,
    pub gains: Option<&'a mut dyn GainStore>,
}

impl<'a> Effectors<'a> {
    pub fn new(properties: &'a mut dyn PropertyStore) -> Self {
        Self {
            properties,
            route: None,
            gains: None,
        }
    }

    pub fn with_route(mut self, route: &'a mut dyn RouteManager) -> Self {
        self.route = Some(route);
        self
    }

    pub fn with_gains(mut self, gains: &'a mut dyn GainStore) -> Self {
        self.gains = Some(gains);
        self
    }
}
