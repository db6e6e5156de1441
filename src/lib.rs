//! # portprobe - TCP Reachability and TLS Certificate Probe
//!
//! portprobe classifies TCP ports as open, closed or filtered and, on TLS
//! ports, performs a real handshake to report who the leaf certificate
//! says the server is, who issued it, when it expires and whether it
//! signed itself.
//!
//! ## Features
//!
//! - **Three-way TCP classification**: refused and timed-out connects are told apart
//! - **Certificate inspection**: subject, issuer, expiry and self-signed flag
//! - **Bounded probes**: one deadline covers resolution, connect and handshake
//! - **Configurable sweeps**: host and port lists with protocol labels
//! - **Multiple Output Formats**: Plain text, JSON, and CSV
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use portprobe::probe::{probe_tcp, probe_tls};
//! use portprobe::types::Port;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() {
//!     let timeout = Duration::from_secs(3);
//!
//!     let status = probe_tcp("127.0.0.1", Port::new(22).unwrap(), timeout).await;
//!     println!("ssh is {}", status);
//!
//!     let cert = probe_tls("example.com", Port::new(443).unwrap(), timeout).await;
//!     println!("issued by {} until {}", cert.issuer, cert.not_after);
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`types`] - Validated ports, port lists and probe targets
//! - [`probe`] - The TCP and TLS probes and the `Probe` trait
//! - [`config`] - Settings file with hosts, ports and timeout
//! - [`error`] - Error types
//! - [`output`] - Output formatting utilities
//! - [`cli`] - Command-line front end

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod probe;
pub mod types;

// Re-export commonly used types
pub use error::{CliError, ConnectError, TlsError};
pub use probe::{probe_tcp, probe_tls, CertificateInfo, PortStatus, Probe, ProbeKind};
pub use types::{Port, PortSpec, ProbeTarget};
