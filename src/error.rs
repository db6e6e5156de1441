//! Error types for portprobe.
//!
//! Uses `thiserror` for ergonomic error definitions. The probe errors are
//! never handed to probe callers: they classify what went wrong so the
//! probes can pick a result value and decide whether the failure is worth
//! a diagnostic.

use openssl::error::ErrorStack;
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::types::{PortError, TargetError};

/// Failure while establishing a TCP connection to a probe target.
#[derive(Error, Debug)]
pub enum ConnectError {
    #[error(transparent)]
    Resolve(#[from] TargetError),

    #[error("socket setup failed: {0}")]
    Socket(#[source] io::Error),

    /// The peer answered but did not accept (RST, ICMP unreachable, ...).
    #[error("connection refused: {0}")]
    Refused(#[source] io::Error),

    #[error("no response within {0:?}")]
    TimedOut(Duration),

    #[error("readiness wait failed: {0}")]
    Wait(#[source] io::Error),
}

impl ConnectError {
    /// Whether this failure says something about the probing machinery
    /// rather than about the target.
    pub fn is_mechanical(&self) -> bool {
        matches!(self, Self::Resolve(_) | Self::Socket(_) | Self::Wait(_))
    }
}

/// Failure at one of the stages of a TLS probe.
#[derive(Error, Debug)]
pub enum TlsError {
    #[error("TLS context setup failed: {0}")]
    Context(#[source] ErrorStack),

    #[error("could not prepare TLS session for '{host}': {source}")]
    Session {
        host: String,
        #[source]
        source: ErrorStack,
    },

    #[error(transparent)]
    Connect(#[from] ConnectError),

    #[error("TLS handshake failed: {0}")]
    Handshake(#[source] openssl::ssl::Error),

    #[error("TLS handshake did not complete within {0:?}")]
    HandshakeTimedOut(Duration),

    #[error("peer completed the handshake without presenting a certificate")]
    NoCertificate,

    #[error("could not render certificate expiry")]
    ExpiryRender,
}

impl TlsError {
    /// Connect-stage failures are ordinary scan outcomes and stay quiet.
    pub fn is_silent(&self) -> bool {
        matches!(self, Self::Connect(_))
    }
}

/// Errors related to configuration loading and saving.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not determine configuration directory")]
    DirectoryNotFound,

    #[error("failed to read {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("failed to write {path}: {reason}")]
    WriteFailed { path: PathBuf, reason: String },

    #[error("{0} already exists (use --force to overwrite)")]
    AlreadyExists(PathBuf),

    #[error("invalid configuration format: {0}")]
    InvalidFormat(String),

    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error(transparent)]
    Serialize(#[from] serde_json::Error),
}

/// Errors surfaced by the command-line layer.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Port(#[from] PortError),

    #[error(transparent)]
    Target(#[from] TargetError),

    #[error("no valid ports specified")]
    NoPorts,

    #[error("output failed: {0}")]
    Io(#[from] io::Error),

    #[error("CSV output failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON output failed: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ConnectResult<T> = Result<T, ConnectError>;
pub type TlsResult<T> = Result<T, TlsError>;
pub type ConfigResult<T> = Result<T, ConfigError>;
pub type CliResult<T> = Result<T, CliError>;
