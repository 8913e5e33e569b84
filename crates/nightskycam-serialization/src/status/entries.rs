//! # Runner Status Entries
//!
//! Typed views over the free-form `entries` mapping of a
//! [`StatusDict`](super::StatusDict). Each runner class reports its own set
//! of entries; every field is optional, as a runner may report any subset.

use super::runner_class::RunnerClass;
use crate::codec::Envelope;
use crate::errors::{Result, SerializationError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::skip_serializing_none;
use std::collections::BTreeMap;

/// Entries of the camera runners (CamRunner, AsiCamRunner, USBCamRunner).
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CamRunnerEntries {
    pub time_window: Option<String>,
    pub use_sun_alt: Option<bool>,
    pub use_weather: Option<bool>,
    pub active: Option<String>,
    pub picture: Option<String>,
    pub number_of_pictures_taken: Option<i64>,
    pub latest_picture: Option<String>,
    /// Camera driver values: numbers, flags or text.
    pub camera_info: Option<BTreeMap<String, Value>>,
    pub pause: Option<bool>,
}

/// Entries of the ApertureRunner.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApertureRunnerEntries {
    #[serde(rename = "use")]
    pub use_aperture: Option<bool>,
    pub focus: Option<i64>,
    pub status: Option<String>,
    pub reason: Option<String>,
    pub use_zwo_camera: Option<bool>,
    pub time_window: Option<String>,
}

/// Entries of the CommandRunner.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommandRunnerEntries {
    pub queued_commands: Option<Vec<i64>>,
    pub active_command: Option<String>,
    pub executed_commands: Option<Vec<i64>>,
}

/// Entries of the FtpRunner.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FtpRunnerEntries {
    pub uploading: Option<bool>,
    pub number_uploaded_files: Option<String>,
    pub total_uploaded_files: Option<String>,
    pub upload_speed: Option<f64>,
    pub files_to_upload: Option<String>,
    pub latest_uploaded: Option<String>,
}

/// Entries of the LocationInfoRunner.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationInfoRunnerEntries {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub name: Option<String>,
    pub country: Option<String>,
    pub timezone: Option<String>,
    #[serde(rename = "IPs")]
    pub ips: Option<String>,
    pub local_time: Option<String>,
    pub sun_alt: Option<f64>,
    pub sun_alt_threshold: Option<f64>,
    pub night: Option<bool>,
    pub cloud_cover: Option<i64>,
    pub weather: Option<String>,
    pub temperature: Option<i64>,
    pub time_stamp: Option<f64>,
    pub cpu_temperature: Option<i64>,
}

/// Entries of the ImageProcessRunner.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageProcessRunnerEntries {
    pub number_of_processed_pictures: Option<i64>,
    pub processes_applied: Option<Vec<String>>,
    pub file_format: Option<String>,
    pub last_processed_picture: Option<String>,
}

/// Entries of the SleepyPiRunner.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SleepyPiRunnerEntries {
    pub configured_to_sleep: Option<bool>,
    pub start_sleep: Option<String>,
    pub stop_sleep: Option<String>,
    pub wait_for_ftp: Option<bool>,
    pub status: Option<String>,
}

/// Entries of the SpaceKeeperRunner.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpaceKeeperRunnerEntries {
    pub folder: Option<String>,
    pub disk: Option<String>,
    pub threshold: Option<String>,
    pub deleting: Option<bool>,
    pub free_space: Option<f64>,
}

/// Entries of the StatusRunner.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusRunnerEntries {
    pub update: Option<String>,
}

/// Entries of the ConfigRunner.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigRunnerEntries {
    pub updates: Option<BTreeMap<String, String>>,
}

/// Status entries tagged with the class of the runner that produced them.
#[derive(Debug, Clone, PartialEq)]
pub enum RunnerEntries {
    CamRunner(CamRunnerEntries),
    AsiCamRunner(CamRunnerEntries),
    UsbCamRunner(CamRunnerEntries),
    ImageProcessRunner(ImageProcessRunnerEntries),
    SpaceKeeperRunner(SpaceKeeperRunnerEntries),
    FtpRunner(FtpRunnerEntries),
    LocationInfoRunner(LocationInfoRunnerEntries),
    SleepyPiRunner(SleepyPiRunnerEntries),
    CommandRunner(CommandRunnerEntries),
    StatusRunner(StatusRunnerEntries),
    ConfigRunner(ConfigRunnerEntries),
    ApertureRunner(ApertureRunnerEntries),
}

fn parse<T: DeserializeOwned>(runner_class: RunnerClass, entries: &Envelope) -> Result<T> {
    serde_json::from_value(Value::Object(entries.clone())).map_err(|e| {
        SerializationError::InvalidEntries {
            runner_class: runner_class.to_string(),
            reason: e.to_string(),
        }
    })
}

fn to_envelope<T: Serialize>(entries: &T) -> Envelope {
    // structs of optional plain fields always serialize to a mapping
    match serde_json::to_value(entries) {
        Ok(Value::Object(map)) => map,
        _ => Envelope::new(),
    }
}

impl RunnerEntries {
    /// Reads the free-form `entries` of a runner of class `runner_class`.
    ///
    /// Unknown keys are ignored.
    ///
    /// # Errors
    ///
    /// [`SerializationError::InvalidEntries`] if a known key holds a value of
    /// the wrong type.
    pub fn from_entries(runner_class: RunnerClass, entries: &Envelope) -> Result<Self> {
        Ok(match runner_class {
            RunnerClass::CamRunner => Self::CamRunner(parse(runner_class, entries)?),
            RunnerClass::AsiCamRunner => Self::AsiCamRunner(parse(runner_class, entries)?),
            RunnerClass::UsbCamRunner => Self::UsbCamRunner(parse(runner_class, entries)?),
            RunnerClass::ImageProcessRunner => {
                Self::ImageProcessRunner(parse(runner_class, entries)?)
            }
            RunnerClass::SpaceKeeperRunner => Self::SpaceKeeperRunner(parse(runner_class, entries)?),
            RunnerClass::FtpRunner => Self::FtpRunner(parse(runner_class, entries)?),
            RunnerClass::LocationInfoRunner => {
                Self::LocationInfoRunner(parse(runner_class, entries)?)
            }
            RunnerClass::SleepyPiRunner => Self::SleepyPiRunner(parse(runner_class, entries)?),
            RunnerClass::CommandRunner => Self::CommandRunner(parse(runner_class, entries)?),
            RunnerClass::StatusRunner => Self::StatusRunner(parse(runner_class, entries)?),
            RunnerClass::ConfigRunner => Self::ConfigRunner(parse(runner_class, entries)?),
            RunnerClass::ApertureRunner => Self::ApertureRunner(parse(runner_class, entries)?),
        })
    }

    /// The free-form mapping, as set in a [`StatusDict`](super::StatusDict).
    /// Unset fields are left out.
    pub fn to_entries(&self) -> Envelope {
        match self {
            Self::CamRunner(e) | Self::AsiCamRunner(e) | Self::UsbCamRunner(e) => to_envelope(e),
            Self::ImageProcessRunner(e) => to_envelope(e),
            Self::SpaceKeeperRunner(e) => to_envelope(e),
            Self::FtpRunner(e) => to_envelope(e),
            Self::LocationInfoRunner(e) => to_envelope(e),
            Self::SleepyPiRunner(e) => to_envelope(e),
            Self::CommandRunner(e) => to_envelope(e),
            Self::StatusRunner(e) => to_envelope(e),
            Self::ConfigRunner(e) => to_envelope(e),
            Self::ApertureRunner(e) => to_envelope(e),
        }
    }

    /// The class of the runner these entries belong to.
    pub fn runner_class(&self) -> RunnerClass {
        match self {
            Self::CamRunner(_) => RunnerClass::CamRunner,
            Self::AsiCamRunner(_) => RunnerClass::AsiCamRunner,
            Self::UsbCamRunner(_) => RunnerClass::UsbCamRunner,
            Self::ImageProcessRunner(_) => RunnerClass::ImageProcessRunner,
            Self::SpaceKeeperRunner(_) => RunnerClass::SpaceKeeperRunner,
            Self::FtpRunner(_) => RunnerClass::FtpRunner,
            Self::LocationInfoRunner(_) => RunnerClass::LocationInfoRunner,
            Self::SleepyPiRunner(_) => RunnerClass::SleepyPiRunner,
            Self::CommandRunner(_) => RunnerClass::CommandRunner,
            Self::StatusRunner(_) => RunnerClass::StatusRunner,
            Self::ConfigRunner(_) => RunnerClass::ConfigRunner,
            Self::ApertureRunner(_) => RunnerClass::ApertureRunner,
        }
    }

    /// Number of fields that are set.
    pub fn len(&self) -> usize {
        self.to_entries().len()
    }

    /// True if no field is set.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
