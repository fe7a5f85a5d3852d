#![allow(dead_code)]

use std::collections::HashMap;

use airlink_remote::{Effectors, GainStore, PiGains, PidGains, PropertyStore, RouteManager};
use airlink_transport::Transport;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Flag(bool),
    Text(String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannedWaypoint {
    pub field1: f64,
    pub field2: f64,
    pub agl_m: f64,
    pub mode: i32,
}

/// In-memory stand-ins for the vehicle's property tree, route manager and
/// controller configuration.
pub struct Vehicle {
    pub properties: Properties,
    pub route: Route,
    pub gains: Gains,
}

#[derive(Debug, Default)]
pub struct Properties(pub HashMap<String, Value>);

#[derive(Debug, Default)]
pub struct Route {
    pub standby: Vec<PlannedWaypoint>,
    pub active: Vec<PlannedWaypoint>,
    pub repositions: usize,
}

#[derive(Debug, Default)]
pub struct Gains {
    pub pid: Vec<PidGains>,
    pub pi: Vec<PiGains>,
}

impl Vehicle {
    pub fn new(pid_controllers: usize, pi_controllers: usize) -> Self {
        Self {
            properties: Properties::default(),
            route: Route::default(),
            gains: Gains {
                pid: vec![PidGains::default(); pid_controllers],
                pi: vec![PiGains::default(); pi_controllers],
            },
        }
    }

    pub fn effectors(&mut self) -> Effectors<'_> {
        Effectors::new(&mut self.properties)
            .with_route(&mut self.route)
            .with_gains(&mut self.gains)
    }
}

impl Properties {
    pub fn number(&self, path: &str) -> Option<f64> {
        match self.0.get(path) {
            Some(Value::Number(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn flag(&self, path: &str) -> Option<bool> {
        match self.0.get(path) {
            Some(Value::Flag(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn text(&self, path: &str) -> Option<&str> {
        match self.0.get(path) {
            Some(Value::Text(value)) => Some(value),
            _ => None,
        }
    }
}

impl PropertyStore for Properties {
    fn get_f64(&self, path: &str) -> Option<f64> {
        self.number(path)
    }

    fn set_f64(&mut self, path: &str, value: f64) {
        self.0.insert(path.to_string(), Value::Number(value));
    }

    fn set_bool(&mut self, path: &str, value: bool) {
        self.0.insert(path.to_string(), Value::Flag(value));
    }

    fn set_string(&mut self, path: &str, value: &str) {
        self.0.insert(path.to_string(), Value::Text(value.to_string()));
    }
}

impl RouteManager for Route {
    fn clear_standby(&mut self) {
        self.standby.clear();
    }

    fn new_waypoint(&mut self, field1: f64, field2: f64, agl_m: f64, mode: i32) {
        self.standby.push(PlannedWaypoint {
            field1,
            field2,
            agl_m,
            mode,
        });
    }

    fn swap(&mut self) {
        std::mem::swap(&mut self.standby, &mut self.active);
    }

    fn reposition(&mut self) {
        self.repositions += 1;
    }
}

impl GainStore for Gains {
    fn update_pid(&mut self, index: usize, gains: &PidGains) -> bool {
        match self.pid.get_mut(index) {
            Some(slot) => {
                *slot = *gains;
                true
            }
            None => false,
        }
    }

    fn update_pi(&mut self, index: usize, gains: &PiGains) -> bool {
        match self.pi.get_mut(index) {
            Some(slot) => {
                *slot = *gains;
                true
            }
            None => false,
        }
    }
}

/// Transport that keeps everything written to it and never has input.
#[derive(Debug, Default)]
pub struct Sink {
    pub bytes: Vec<u8>,
}

impl Transport for Sink {
    fn write(&mut self, bytes: &[u8]) -> airlink_transport::Result<usize> {
        self.bytes.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn read(&mut self, _: &mut [u8]) -> airlink_transport::Result<usize> {
        Ok(0)
    }

    fn is_open(&self) -> bool {
        true
    }
}
