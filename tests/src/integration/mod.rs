//! Cross-channel integration tests.

pub mod flows;
pub mod reports;
