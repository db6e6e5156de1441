//! A finished sweep, ready for rendering.

use crate::probe::{PortStatus, ProbeReport};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Results of one run over a set of (host, port) pairs.
#[derive(Debug, Clone, Serialize)]
pub struct SweepRecord {
    /// When probing started.
    pub started_at: DateTime<Utc>,
    /// When the last probe returned.
    pub completed_at: DateTime<Utc>,
    /// Total duration in milliseconds.
    pub duration_ms: u64,
    /// Number of (host, port) pairs probed.
    pub probed: usize,
    /// TCP probes that found the port open.
    pub open_ports: usize,
    /// TCP probes that found the port closed.
    pub closed_ports: usize,
    /// TCP probes that timed out.
    pub filtered_ports: usize,
    /// TLS probes that returned a certificate.
    pub valid_certificates: usize,
    /// Individual reports, in probe order.
    pub reports: Vec<ProbeReport>,
}

impl SweepRecord {
    /// Start a record; the clock runs until [`finalize`](Self::finalize).
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            started_at: now,
            completed_at: now,
            duration_ms: 0,
            probed: 0,
            open_ports: 0,
            closed_ports: 0,
            filtered_ports: 0,
            valid_certificates: 0,
            reports: Vec::new(),
        }
    }

    /// Close the record over `reports` and tally them.
    pub fn finalize(mut self, reports: Vec<ProbeReport>) -> Self {
        self.completed_at = Utc::now();
        self.duration_ms = (self.completed_at - self.started_at)
            .num_milliseconds()
            .max(0) as u64;
        self.probed = reports.len();

        for report in &reports {
            match report.status() {
                Some(PortStatus::Open) => self.open_ports += 1,
                Some(PortStatus::Closed) => self.closed_ports += 1,
                Some(PortStatus::Filtered) => self.filtered_ports += 1,
                None => {}
            }
            if report.certificate().is_some_and(|cert| cert.valid) {
                self.valid_certificates += 1;
            }
        }

        self.reports = reports;
        self
    }
}

impl Default for SweepRecord {
    fn default() -> Self {
        Self::new()
    }
}
