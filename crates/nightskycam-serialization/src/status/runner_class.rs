//! # Runner Classes
//!
//! The runner classes defined and used by nightskycam.

use crate::errors::SerializationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Names of the runner classes, as used by the runner framework.
///
/// Must stay in 1:1 correspondence with [`RunnerClass`] (unit tested).
pub const NIGHTSKYCAM_RUNNERS: [&str; 12] = [
    "CamRunner",
    "AsiCamRunner",
    "USBCamRunner",
    "ImageProcessRunner",
    "SpaceKeeperRunner",
    "FtpRunner",
    "LocationInfoRunner",
    "SleepyPiRunner",
    "CommandRunner",
    "StatusRunner",
    "ConfigRunner",
    "ApertureRunner",
];

/// All known runner classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RunnerClass {
    /// Generic camera.
    CamRunner,
    /// ZWO ASI camera.
    AsiCamRunner,
    /// USB (webcam) camera.
    #[serde(rename = "USBCamRunner")]
    UsbCamRunner,
    /// Post-processing of pictures.
    ImageProcessRunner,
    /// Deletes old files when the disk fills up.
    SpaceKeeperRunner,
    /// Uploads pictures to the server.
    FtpRunner,
    /// Location, weather and sun altitude.
    LocationInfoRunner,
    /// Sleep schedule of the SleepyPi power board.
    SleepyPiRunner,
    /// Executes remote commands.
    CommandRunner,
    /// Sends status reports to the server.
    StatusRunner,
    /// Applies configuration updates.
    ConfigRunner,
    /// Camera aperture (focus) control.
    ApertureRunner,
}

impl RunnerClass {
    /// Every runner class, in declaration order.
    pub const ALL: [RunnerClass; 12] = [
        RunnerClass::CamRunner,
        RunnerClass::AsiCamRunner,
        RunnerClass::UsbCamRunner,
        RunnerClass::ImageProcessRunner,
        RunnerClass::SpaceKeeperRunner,
        RunnerClass::FtpRunner,
        RunnerClass::LocationInfoRunner,
        RunnerClass::SleepyPiRunner,
        RunnerClass::CommandRunner,
        RunnerClass::StatusRunner,
        RunnerClass::ConfigRunner,
        RunnerClass::ApertureRunner,
    ];

    /// The runner class name.
    pub const fn as_str(self) -> &'static str {
        match self {
            RunnerClass::CamRunner => "CamRunner",
            RunnerClass::AsiCamRunner => "AsiCamRunner",
            RunnerClass::UsbCamRunner => "USBCamRunner",
            RunnerClass::ImageProcessRunner => "ImageProcessRunner",
            RunnerClass::SpaceKeeperRunner => "SpaceKeeperRunner",
            RunnerClass::FtpRunner => "FtpRunner",
            RunnerClass::LocationInfoRunner => "LocationInfoRunner",
            RunnerClass::SleepyPiRunner => "SleepyPiRunner",
            RunnerClass::CommandRunner => "CommandRunner",
            RunnerClass::StatusRunner => "StatusRunner",
            RunnerClass::ConfigRunner => "ConfigRunner",
            RunnerClass::ApertureRunner => "ApertureRunner",
        }
    }
}

impl fmt::Display for RunnerClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RunnerClass {
    type Err = SerializationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RunnerClass::ALL
            .into_iter()
            .find(|class| class.as_str() == s)
            .ok_or_else(|| SerializationError::UnknownRunnerClass(s.to_string()))
    }
}
