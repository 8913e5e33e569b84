//! # Nightskycam Serialization Test Suite
//!
//! Unified test crate exercising the channels the way a nightskycam system
//! and the nightskycam server use them.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/      # System <-> server message flows
//!     ├── flows.rs      # Command, config and status round trips
//!     └── reports.rs    # Status aggregation over random runner sets
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p nightskycam-tests
//! cargo test -p nightskycam-tests integration::reports
//! ```

pub mod integration;
