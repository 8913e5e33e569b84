//! # Status Entries Reports
//!
//! Human readable summaries of runner status entries, as displayed by the
//! nightskycam server. Only some runner classes can be summarized; those
//! implement [`EntriesReport`] and have a report function registered in the
//! [registry](super::registry).

use super::entries::{
    ApertureRunnerEntries, CamRunnerEntries, CommandRunnerEntries, FtpRunnerEntries,
    ImageProcessRunnerEntries, LocationInfoRunnerEntries, RunnerEntries, SleepyPiRunnerEntries,
    SpaceKeeperRunnerEntries,
};
use super::registry;
use serde_json::Value;
use std::collections::BTreeMap;

/// Summary lines keyed by topic (e.g. "camera", "ftp", "disk").
pub type Report = BTreeMap<String, String>;

/// Entries that can be reduced to a summary report.
pub trait EntriesReport {
    /// Returns the summary of selected information. May be empty when none
    /// of the summarized fields are set.
    fn report(&self) -> Report;
}

fn single(topic: &str, summary: impl Into<String>) -> Report {
    Report::from([(topic.to_string(), summary.into())])
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn join_lines(lines: &[(&str, String)]) -> String {
    lines
        .iter()
        .map(|(label, value)| format!("{label}: {value}"))
        .collect::<Vec<_>>()
        .join("\n")
}

impl CamRunnerEntries {
    /// Report under the topic `camera_type` (e.g. "ASI camera").
    pub fn report_as(&self, camera_type: &str) -> Report {
        if self.pause.unwrap_or(false) {
            return single(camera_type, "paused - visit 'snapshots' to reactivate");
        }

        let mut lines: Vec<(&str, String)> = Vec::new();
        if let Some(active) = &self.active {
            lines.push(("active", active.clone()));
        }
        lines.push((
            "use sun altitude",
            yes_no(self.use_sun_alt.unwrap_or(false)).to_string(),
        ));
        lines.push((
            "use weather",
            yes_no(self.use_weather.unwrap_or(false)).to_string(),
        ));
        if let Some(temperature) = self
            .camera_info
            .as_ref()
            .and_then(|info| info.get("camera_temperature"))
        {
            lines.push(("camera temperature", scalar_text(temperature)));
        }
        if let Some(taken) = self.number_of_pictures_taken {
            lines.push(("number of pictures taken (since boot)", taken.to_string()));
        }

        single(camera_type, join_lines(&lines))
    }
}

impl EntriesReport for CamRunnerEntries {
    fn report(&self) -> Report {
        self.report_as("camera")
    }
}

impl EntriesReport for ApertureRunnerEntries {
    fn report(&self) -> Report {
        if !self.use_aperture.unwrap_or(false) {
            return single("aperture", "used: no");
        }

        let focus = self
            .focus
            .map(|focus| focus.to_string())
            .unwrap_or_else(|| "not set".to_string());
        let mut lines = vec![("focus", focus)];
        if let Some(status) = &self.status {
            let status = match &self.reason {
                Some(reason) => format!("{status} ({reason})"),
                None => status.clone(),
            };
            lines.push(("status", status));
        }
        let use_camera = self.use_zwo_camera.unwrap_or(false);
        lines.push(("using camera activity", yes_no(use_camera).to_string()));
        if !use_camera {
            if let Some(time_window) = &self.time_window {
                lines.push(("time window", time_window.clone()));
            }
        }

        single("aperture", join_lines(&lines))
    }
}

impl EntriesReport for CommandRunnerEntries {
    fn report(&self) -> Report {
        match &self.active_command {
            Some(command) => single("running command", command.clone()),
            None => Report::new(),
        }
    }
}

impl EntriesReport for FtpRunnerEntries {
    fn report(&self) -> Report {
        let mut infos: Vec<String> = Vec::new();
        if let Some(uploading) = self.uploading {
            infos.push(format!("currently uploading: {}", yes_no(uploading)));
        }
        if let (Some(number), Some(total)) =
            (&self.number_uploaded_files, &self.total_uploaded_files)
        {
            infos.push(format!("uploaded files: {number} file(s) ({total})"));
        }
        if let Some(files_to_upload) = &self.files_to_upload {
            if files_to_upload.is_empty() {
                infos.push("no file to upload".to_string());
            } else {
                infos.push(format!("files to upload: {files_to_upload}"));
            }
        }

        if infos.is_empty() {
            return Report::new();
        }
        single("ftp", infos.join("\n"))
    }
}

impl EntriesReport for LocationInfoRunnerEntries {
    fn report(&self) -> Report {
        let mut local_info: Vec<(&str, String)> = Vec::new();
        if let Some(local_time) = &self.local_time {
            local_info.push(("local time", local_time.clone()));
        }
        if let (Some(sun_alt), Some(threshold)) = (self.sun_alt, self.sun_alt_threshold) {
            local_info.push((
                "sun altitude",
                format!("{sun_alt:.2} (threshold: {threshold:.2})"),
            ));
        }
        if let (Some(weather), Some(cloud_cover)) = (&self.weather, self.cloud_cover) {
            local_info.push(("weather", format!("{weather} (cloud cover: {cloud_cover})")));
        }

        let mut report = Report::new();
        if !local_info.is_empty() {
            report.insert("local info".to_string(), join_lines(&local_info));
        }
        if let Some(ips) = &self.ips {
            report.insert("IP(s)".to_string(), ips.clone());
        }
        report
    }
}

impl EntriesReport for ImageProcessRunnerEntries {
    fn report(&self) -> Report {
        let (Some(processed), Some(file_format)) =
            (self.number_of_processed_pictures, &self.file_format)
        else {
            return Report::new();
        };
        let processes = match &self.processes_applied {
            Some(processes) if !processes.is_empty() => format!("{}, ", processes.join(", ")),
            _ => String::new(),
        };
        single(
            "image process",
            format!("{processed} image(s) processed ({processes}format: {file_format})"),
        )
    }
}

impl EntriesReport for SleepyPiRunnerEntries {
    fn report(&self) -> Report {
        if !self.configured_to_sleep.unwrap_or(false) {
            return single("sleep mode", "no");
        }
        match (&self.start_sleep, &self.stop_sleep, &self.status) {
            (Some(start), Some(stop), Some(status)) => {
                single("sleep mode", format!("from {start} to {stop}\n{status}"))
            }
            _ => Report::new(),
        }
    }
}

impl EntriesReport for SpaceKeeperRunnerEntries {
    fn report(&self) -> Report {
        let deleting = self.deleting.unwrap_or(false);
        if self.disk.is_none() && !deleting {
            return Report::new();
        }

        let mut lines: Vec<String> = Vec::new();
        if let Some(disk) = self.disk.as_ref().filter(|disk| !disk.is_empty()) {
            lines.push(disk.clone());
        }
        if deleting {
            let threshold = self.threshold.as_deref().unwrap_or("unknown");
            lines.push(format!("*deleting older files (threshold={threshold})*"));
        }
        single("disk", lines.join("\n"))
    }
}

// =============================================================================
// REGISTERED REPORT FUNCTIONS
// =============================================================================

pub(crate) fn camera_report(entries: &RunnerEntries) -> Report {
    match entries {
        RunnerEntries::CamRunner(e) => e.report_as("camera"),
        RunnerEntries::AsiCamRunner(e) => e.report_as("ASI camera"),
        RunnerEntries::UsbCamRunner(e) => e.report_as("USB camera"),
        _ => Report::new(),
    }
}

pub(crate) fn aperture_report(entries: &RunnerEntries) -> Report {
    let RunnerEntries::ApertureRunner(e) = entries else {
        return Report::new();
    };
    e.report()
}

pub(crate) fn command_report(entries: &RunnerEntries) -> Report {
    let RunnerEntries::CommandRunner(e) = entries else {
        return Report::new();
    };
    e.report()
}

pub(crate) fn ftp_report(entries: &RunnerEntries) -> Report {
    let RunnerEntries::FtpRunner(e) = entries else {
        return Report::new();
    };
    e.report()
}

pub(crate) fn location_info_report(entries: &RunnerEntries) -> Report {
    let RunnerEntries::LocationInfoRunner(e) = entries else {
        return Report::new();
    };
    e.report()
}

pub(crate) fn image_process_report(entries: &RunnerEntries) -> Report {
    let RunnerEntries::ImageProcessRunner(e) = entries else {
        return Report::new();
    };
    e.report()
}

pub(crate) fn sleepy_pi_report(entries: &RunnerEntries) -> Report {
    let RunnerEntries::SleepyPiRunner(e) = entries else {
        return Report::new();
    };
    e.report()
}

pub(crate) fn space_keeper_report(entries: &RunnerEntries) -> Report {
    let RunnerEntries::SpaceKeeperRunner(e) = entries else {
        return Report::new();
    };
    e.report()
}

impl RunnerEntries {
    /// Summary report of these entries, `None` if the runner class has no
    /// report function.
    pub fn report(&self) -> Option<Report> {
        registry::lookup(self.runner_class()).and_then(|row| row.report(self))
    }
}

/// Merges the reports of all entries whose runner class has a report
/// function. Empty entries, and entries of classes without a report
/// function, contribute nothing.
pub fn get_status_entries_report<'a, I>(all_entries: I) -> Report
where
    I: IntoIterator<Item = &'a RunnerEntries>,
{
    let mut report = Report::new();
    for entries in all_entries {
        if entries.is_empty() {
            continue;
        }
        if let Some(entries_report) = entries.report() {
            report.extend(entries_report);
        }
    }
    report
}
