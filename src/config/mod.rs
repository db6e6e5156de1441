//! Configuration management for portprobe.
//!
//! Holds the host and port lists swept by default, each port tagged with
//! the protocol label that routes it to a probe.

mod settings;

pub use settings::{AppSettings, Paths, PortConfig};
