//! # Random Status Entries
//!
//! Generates entries with every field of the runner class shape set to a
//! random value. Used to exercise the status channel and the reports.

use super::entries::RunnerEntries;
use super::registry::{self, FieldKind};
use super::runner_class::RunnerClass;
use crate::codec::Envelope;
use crate::errors::{Result, SerializationError};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde_json::{Map, Value};

const MAX_INT: i64 = 20;
const STR_LENGTH: usize = 10;
const MAP_LENGTH: usize = 5;

fn random_int<R: Rng + ?Sized>(rng: &mut R) -> i64 {
    rng.gen_range(0..=MAX_INT)
}

fn random_float<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let value: f64 = rng.gen_range(0.0..=1.0);
    (value * 100.0).round() / 100.0
}

fn random_str<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..STR_LENGTH)
        .map(|_| char::from(rng.sample(Alphanumeric)))
        .collect()
}

fn random_value<R: Rng + ?Sized>(kind: FieldKind, rng: &mut R) -> Value {
    match kind {
        FieldKind::Int => Value::from(random_int(rng)),
        FieldKind::Float => Value::from(random_float(rng)),
        FieldKind::Bool => Value::from(rng.gen_bool(0.5)),
        FieldKind::Str => Value::from(random_str(rng)),
        FieldKind::StrMap => {
            let mut map = Map::new();
            while map.len() < MAP_LENGTH {
                map.insert(random_str(rng), Value::from(random_str(rng)));
            }
            Value::Object(map)
        }
        FieldKind::IntList => {
            let length = random_int(rng);
            Value::from((0..length).map(|_| random_int(rng)).collect::<Vec<_>>())
        }
        FieldKind::StrList => {
            let length = random_int(rng);
            Value::from((0..length).map(|_| random_str(rng)).collect::<Vec<_>>())
        }
    }
}

/// Random entries for `runner_class`, every field of its shape set.
pub fn random_entries<R: Rng + ?Sized>(runner_class: RunnerClass, rng: &mut R) -> Result<RunnerEntries> {
    let row = registry::lookup(runner_class)
        .ok_or_else(|| SerializationError::UnknownRunnerClass(runner_class.to_string()))?;

    let entries: Envelope = row
        .fields
        .iter()
        .map(|field| (field.name.to_string(), random_value(field.kind, rng)))
        .collect();

    RunnerEntries::from_entries(runner_class, &entries)
}

/// Random entries for the runner class named `runner_class_name`.
///
/// # Errors
///
/// [`SerializationError::UnknownRunnerClass`] if no entries shape is
/// registered for this name.
pub fn get_random_status_dict(runner_class_name: &str) -> Result<RunnerEntries> {
    let runner_class: RunnerClass = runner_class_name.parse()?;
    random_entries(runner_class, &mut rand::thread_rng())
}
