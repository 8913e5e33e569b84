//! # Introspection
//!
//! Numeric health values extracted from the status entries of a system,
//! matching the fields of the server's introspection records.

use super::entries::RunnerEntries;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::skip_serializing_none;
use std::collections::BTreeMap;

/// Health values of a system. Unset when no runner reported them.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntrospectionDict {
    pub cpu_temperature: Option<i64>,
    pub camera_temperature: Option<i64>,
    pub camera_target_temperature: Option<i64>,
    pub outside_temperature: Option<i64>,
    pub cooler_on: Option<bool>,
    pub upload_speed: Option<f64>,
    pub free_space: Option<f64>,
}

// camera info values are numbers or flags, or their text form ("-9.5", "True")
fn parse_temperature(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|v| v.round() as i64)),
        Value::String(text) => {
            let text = text.trim();
            text.parse::<i64>()
                .ok()
                .or_else(|| text.parse::<f64>().ok().map(|v| v.round() as i64))
        }
        _ => None,
    }
}

fn parse_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(flag) => Some(*flag),
        Value::Number(number) => number.as_i64().map(|n| n != 0),
        Value::String(text) => match text.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Some(true),
            "false" | "0" | "no" | "off" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn read_camera_info(info: &BTreeMap<String, Value>, intro: &mut IntrospectionDict) {
    if let Some(t) = info.get("camera_temperature").and_then(parse_temperature) {
        intro.camera_temperature = Some(t);
    }
    if let Some(t) = info
        .get("camera_target_temperature")
        .and_then(parse_temperature)
    {
        intro.camera_target_temperature = Some(t);
    }
    if let Some(on) = info.get("cooler_on").and_then(parse_flag) {
        intro.cooler_on = Some(on);
    }
}

/// Collects the introspection values from the entries of all runners.
///
/// Camera health is read from the AsiCamRunner only, the one camera
/// reporting cooler and sensor temperatures.
pub fn get_introspection_dict<'a, I>(all_entries: I) -> IntrospectionDict
where
    I: IntoIterator<Item = &'a RunnerEntries>,
{
    let mut intro = IntrospectionDict::default();
    for entries in all_entries {
        match entries {
            RunnerEntries::AsiCamRunner(cam) => {
                if let Some(info) = &cam.camera_info {
                    read_camera_info(info, &mut intro);
                }
            }
            RunnerEntries::LocationInfoRunner(location) => {
                if location.cpu_temperature.is_some() {
                    intro.cpu_temperature = location.cpu_temperature;
                }
                if location.temperature.is_some() {
                    intro.outside_temperature = location.temperature;
                }
            }
            RunnerEntries::FtpRunner(ftp) => {
                if ftp.upload_speed.is_some() {
                    intro.upload_speed = ftp.upload_speed;
                }
            }
            RunnerEntries::SpaceKeeperRunner(space) => {
                if space.free_space.is_some() {
                    intro.free_space = space.free_space;
                }
            }
            _ => {}
        }
    }
    intro
}
