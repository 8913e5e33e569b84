//! # Status Channel
//!
//! Status reports sent by a nightskycam system: one [`StatusDict`] per
//! runner, batched under the name of the system.
//!
//! ## Components
//!
//! | Module | Content |
//! |--------|---------|
//! | `runner_class` | [`RunnerClass`] and the runner names literal set |
//! | `entries` | Typed entries of each runner class ([`RunnerEntries`]) |
//! | `registry` | Static entries shape / report function table |
//! | `report` | Entries summaries and their aggregation |
//! | `random` | Random entries generation |
//! | `introspection` | Numeric health values |
//!
//! ## Duplicate Names
//!
//! Status names are the keys of the decoded mapping. When several statuses
//! share a name, the last one wins.

pub mod entries;
pub mod introspection;
pub mod random;
pub mod registry;
pub mod report;
pub mod runner_class;

pub use entries::RunnerEntries;
pub use introspection::{get_introspection_dict, IntrospectionDict};
pub use random::{get_random_status_dict, random_entries};
pub use registry::{
    get_runner_status_dict_class, has_runner_status_dict, has_status_entries_report_function,
    RunnerStatusDictClass,
};
pub use report::{get_status_entries_report, EntriesReport, Report};
pub use runner_class::{RunnerClass, NIGHTSKYCAM_RUNNERS};

use crate::codec::{deserialize, serialize, Envelope, Message};
use crate::errors::{Result, SerializationError};
use crate::fix::{deserialize_fix_dict, serialize_fix_dict};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::warn;

const SYSTEM: &str = "system";
const STATUS: &str = "status";

/// Status of a single runner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusDict {
    /// Name of the runner.
    pub name: String,
    /// Runner class specific entries, see [`RunnerEntries`].
    pub entries: Envelope,
    /// What the runner is currently doing.
    pub activity: String,
    /// Runner state (e.g. "running", "sleeping").
    pub state: String,
    /// Human readable uptime of the runner.
    pub running_for: String,
}

impl StatusDict {
    /// Typed view over the entries, read as entries of `runner_class`.
    pub fn runner_entries(&self, runner_class: RunnerClass) -> Result<RunnerEntries> {
        RunnerEntries::from_entries(runner_class, &self.entries)
    }

    fn to_envelope(&self) -> Envelope {
        let mut envelope = Envelope::new();
        envelope.insert("name".to_string(), Value::from(self.name.as_str()));
        envelope.insert("entries".to_string(), Value::Object(self.entries.clone()));
        envelope.insert("activity".to_string(), Value::from(self.activity.as_str()));
        envelope.insert("state".to_string(), Value::from(self.state.as_str()));
        envelope.insert(
            "running_for".to_string(),
            Value::from(self.running_for.as_str()),
        );
        envelope
    }
}

/// Serializes the statuses of all the runners of `system`.
///
/// Counterpart: [`deserialize_status`].
pub fn serialize_status<'a, I>(system: &str, statuses: I, token: Option<&str>) -> Message
where
    I: IntoIterator<Item = &'a StatusDict>,
{
    let mut all_status = Envelope::new();
    for status in statuses {
        let fixed = serialize_fix_dict(&status.to_envelope());
        if all_status
            .insert(status.name.clone(), Value::Object(fixed))
            .is_some()
        {
            warn!(
                "[Status] Duplicate status name '{}' for system {}, keeping the last one",
                status.name, system
            );
        }
    }

    let mut envelope = Envelope::new();
    envelope.insert(SYSTEM.to_string(), Value::from(system));
    envelope.insert(STATUS.to_string(), Value::Object(all_status));
    serialize(&envelope, token)
}

/// Returns the name of the system and the status of each of its runners,
/// keyed by runner name.
pub fn deserialize_status(
    message: &str,
    token: Option<&str>,
) -> Result<(String, BTreeMap<String, StatusDict>)> {
    let envelope = deserialize(message, &[SYSTEM, STATUS], token)?;

    let system = envelope[SYSTEM]
        .as_str()
        .ok_or_else(|| SerializationError::improper("'system' is not a string"))?;
    let all_status = envelope[STATUS]
        .as_object()
        .ok_or_else(|| SerializationError::improper("'status' is not a mapping"))?;

    let mut statuses = BTreeMap::new();
    for (name, status) in all_status {
        let fixed = status.as_object().ok_or_else(|| {
            SerializationError::improper(format!("status of '{name}' is not a mapping"))
        })?;
        let status: StatusDict = serde_json::from_value(Value::Object(deserialize_fix_dict(fixed)))
            .map_err(|e| SerializationError::improper(format!("invalid status '{name}': {e}")))?;
        statuses.insert(name.clone(), status);
    }

    Ok((system.to_string(), statuses))
}
