//! # Runner Status Registry
//!
//! Static table describing, for each [`RunnerClass`], the shape of its
//! status entries and the function (if any) summarizing them into a report.
//!
//! The table is the single authority used by [`has_runner_status_dict`],
//! [`has_status_entries_report_function`], the random entries generator and
//! the report aggregation. It is never mutated.

use super::entries::RunnerEntries;
use super::report::{self, Report};
use super::runner_class::RunnerClass;
use crate::errors::{Result, SerializationError};

/// Type of the value held by an entries field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Int,
    Float,
    Bool,
    Str,
    /// Mapping of strings to strings.
    StrMap,
    IntList,
    StrList,
}

/// One field of an entries shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntriesField {
    pub name: &'static str,
    pub kind: FieldKind,
}

const fn field(name: &'static str, kind: FieldKind) -> EntriesField {
    EntriesField { name, kind }
}

/// Reduces the entries of a runner to a summary report.
pub type ReportFn = fn(&RunnerEntries) -> Report;

/// Registry row of one runner class.
#[derive(Debug, Clone, Copy)]
pub struct RunnerStatusDictClass {
    /// The runner class described by this row.
    pub runner_class: RunnerClass,
    /// Shape of the entries reported by the runner.
    pub fields: &'static [EntriesField],
    report: Option<ReportFn>,
}

impl RunnerStatusDictClass {
    /// True if the runner class can summarize its entries.
    pub fn has_report(&self) -> bool {
        self.report.is_some()
    }

    /// Summarizes the entries, `None` if this class has no report function.
    pub fn report(&self, entries: &RunnerEntries) -> Option<Report> {
        self.report.map(|report_fn| report_fn(entries))
    }
}

// =============================================================================
// ENTRIES SHAPES
// =============================================================================

use FieldKind::{Bool, Float, Int, IntList, Str, StrList, StrMap};

const CAM_RUNNER_FIELDS: &[EntriesField] = &[
    field("time_window", Str),
    field("use_sun_alt", Bool),
    field("use_weather", Bool),
    field("active", Str),
    field("picture", Str),
    field("number_of_pictures_taken", Int),
    field("latest_picture", Str),
    field("camera_info", StrMap),
    field("pause", Bool),
];

const APERTURE_RUNNER_FIELDS: &[EntriesField] = &[
    field("use", Bool),
    field("focus", Int),
    field("status", Str),
    field("reason", Str),
    field("use_zwo_camera", Bool),
    field("time_window", Str),
];

const COMMAND_RUNNER_FIELDS: &[EntriesField] = &[
    field("queued_commands", IntList),
    field("active_command", Str),
    field("executed_commands", IntList),
];

const FTP_RUNNER_FIELDS: &[EntriesField] = &[
    field("uploading", Bool),
    field("number_uploaded_files", Str),
    field("total_uploaded_files", Str),
    field("upload_speed", Float),
    field("files_to_upload", Str),
    field("latest_uploaded", Str),
];

const LOCATION_INFO_RUNNER_FIELDS: &[EntriesField] = &[
    field("latitude", Float),
    field("longitude", Float),
    field("name", Str),
    field("country", Str),
    field("timezone", Str),
    field("IPs", Str),
    field("local_time", Str),
    field("sun_alt", Float),
    field("sun_alt_threshold", Float),
    field("night", Bool),
    field("cloud_cover", Int),
    field("weather", Str),
    field("temperature", Int),
    field("time_stamp", Float),
    field("cpu_temperature", Int),
];

const IMAGE_PROCESS_RUNNER_FIELDS: &[EntriesField] = &[
    field("number_of_processed_pictures", Int),
    field("processes_applied", StrList),
    field("file_format", Str),
    field("last_processed_picture", Str),
];

const SLEEPY_PI_RUNNER_FIELDS: &[EntriesField] = &[
    field("configured_to_sleep", Bool),
    field("start_sleep", Str),
    field("stop_sleep", Str),
    field("wait_for_ftp", Bool),
    field("status", Str),
];

const SPACE_KEEPER_RUNNER_FIELDS: &[EntriesField] = &[
    field("folder", Str),
    field("disk", Str),
    field("threshold", Str),
    field("deleting", Bool),
    field("free_space", Float),
];

const STATUS_RUNNER_FIELDS: &[EntriesField] = &[field("update", Str)];

const CONFIG_RUNNER_FIELDS: &[EntriesField] = &[field("updates", StrMap)];

// =============================================================================
// REGISTRY
// =============================================================================

const fn row(
    runner_class: RunnerClass,
    fields: &'static [EntriesField],
    report: Option<ReportFn>,
) -> RunnerStatusDictClass {
    RunnerStatusDictClass {
        runner_class,
        fields,
        report,
    }
}

static REGISTRY: [RunnerStatusDictClass; 12] = [
    row(RunnerClass::CamRunner, CAM_RUNNER_FIELDS, Some(report::camera_report)),
    row(RunnerClass::AsiCamRunner, CAM_RUNNER_FIELDS, Some(report::camera_report)),
    row(RunnerClass::UsbCamRunner, CAM_RUNNER_FIELDS, Some(report::camera_report)),
    row(
        RunnerClass::ImageProcessRunner,
        IMAGE_PROCESS_RUNNER_FIELDS,
        Some(report::image_process_report),
    ),
    row(
        RunnerClass::SpaceKeeperRunner,
        SPACE_KEEPER_RUNNER_FIELDS,
        Some(report::space_keeper_report),
    ),
    row(RunnerClass::FtpRunner, FTP_RUNNER_FIELDS, Some(report::ftp_report)),
    row(
        RunnerClass::LocationInfoRunner,
        LOCATION_INFO_RUNNER_FIELDS,
        Some(report::location_info_report),
    ),
    row(
        RunnerClass::SleepyPiRunner,
        SLEEPY_PI_RUNNER_FIELDS,
        Some(report::sleepy_pi_report),
    ),
    row(
        RunnerClass::CommandRunner,
        COMMAND_RUNNER_FIELDS,
        Some(report::command_report),
    ),
    row(RunnerClass::StatusRunner, STATUS_RUNNER_FIELDS, None),
    row(RunnerClass::ConfigRunner, CONFIG_RUNNER_FIELDS, None),
    row(
        RunnerClass::ApertureRunner,
        APERTURE_RUNNER_FIELDS,
        Some(report::aperture_report),
    ),
];

/// All registry rows.
pub fn registry() -> &'static [RunnerStatusDictClass] {
    &REGISTRY
}

/// Registry row of a runner class.
pub fn lookup(runner_class: RunnerClass) -> Option<&'static RunnerStatusDictClass> {
    REGISTRY.iter().find(|row| row.runner_class == runner_class)
}

/// Returns the registry row for a runner class name.
///
/// # Errors
///
/// [`SerializationError::UnknownRunnerClass`]
/// if no entries shape is registered under this name.
pub fn get_runner_status_dict_class(runner_class_name: &str) -> Result<&'static RunnerStatusDictClass> {
    let runner_class: RunnerClass = runner_class_name.parse()?;
    lookup(runner_class)
        .ok_or_else(|| SerializationError::UnknownRunnerClass(runner_class_name.to_string()))
}

/// True if an entries shape is registered for the runner class name.
pub fn has_runner_status_dict(runner_class_name: &str) -> bool {
    get_runner_status_dict_class(runner_class_name).is_ok()
}

/// True if the runner class name has a report function.
pub fn has_status_entries_report_function(runner_class_name: &str) -> bool {
    get_runner_status_dict_class(runner_class_name)
        .map(|row| row.has_report())
        .unwrap_or(false)
}
