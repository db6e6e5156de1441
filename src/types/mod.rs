//! Core type definitions using newtype patterns for type safety.

mod port;
mod target;

pub use port::{Port, PortError, PortRange, PortSpec};
pub use target::{resolve_ipv4, ProbeTarget, TargetError, DEFAULT_TIMEOUT};
