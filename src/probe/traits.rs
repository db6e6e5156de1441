//! Probe trait abstraction and the values probes produce.

use crate::probe::cert::CertificateInfo;
use crate::types::{Port, ProbeTarget};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reachability of a TCP port.
///
/// Produced once per TCP probe and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PortStatus {
    /// A connection was established and immediately released.
    Open,
    /// The peer actively refused, or the probe could not be carried out
    /// (unresolvable name, socket setup failure).
    Closed,
    /// Nothing came back before the timeout, typical of a firewall
    /// silently dropping SYNs.
    Filtered,
}

impl PortStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Closed => "CLOSED",
            Self::Filtered => "FILTERED",
        }
    }
}

impl fmt::Display for PortStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which probe a port is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeKind {
    /// The port speaks TLS; inspect its certificate.
    Tls,
    /// Plain reachability check.
    PlainTcp,
}

impl ProbeKind {
    /// Label that routes a port to the TLS probe.
    pub const TLS_LABEL: &'static str = "HTTPS";

    /// Map a configured protocol label onto a probe kind.
    ///
    /// Only the exact label `HTTPS` selects the TLS probe.
    pub fn from_label(label: &str) -> Self {
        if label == Self::TLS_LABEL {
            Self::Tls
        } else {
            Self::PlainTcp
        }
    }
}

impl fmt::Display for ProbeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tls => write!(f, "tls"),
            Self::PlainTcp => write!(f, "tcp"),
        }
    }
}

/// What a single probe found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "probe", rename_all = "lowercase")]
pub enum ProbeOutcome {
    Tcp { status: PortStatus },
    Tls { certificate: CertificateInfo },
}

/// One probed (host, port) pair, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeReport {
    pub host: String,
    pub port: Port,
    /// Protocol label from configuration, when the port came from one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(flatten)]
    pub outcome: ProbeOutcome,
}

impl ProbeReport {
    pub fn new(target: &ProbeTarget, outcome: ProbeOutcome) -> Self {
        Self {
            host: target.host().to_string(),
            port: target.port(),
            protocol: None,
            outcome,
        }
    }

    pub fn with_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = Some(protocol.into());
        self
    }

    /// TCP status, if this report came from the TCP probe.
    pub fn status(&self) -> Option<PortStatus> {
        match &self.outcome {
            ProbeOutcome::Tcp { status } => Some(*status),
            ProbeOutcome::Tls { .. } => None,
        }
    }

    /// Certificate details, if this report came from the TLS probe.
    pub fn certificate(&self) -> Option<&CertificateInfo> {
        match &self.outcome {
            ProbeOutcome::Tcp { .. } => None,
            ProbeOutcome::Tls { certificate } => Some(certificate),
        }
    }
}

/// Trait for probe implementations.
///
/// A probe never fails from the caller's point of view: every failure is
/// folded into its `Output` value.
///
/// # Example
///
/// ```ignore
/// use portprobe::probe::{Probe, TcpProbe};
///
/// async fn check<P: Probe>(probe: &P, target: &ProbeTarget) -> P::Output {
///     probe.probe(target).await
/// }
/// ```
#[async_trait]
pub trait Probe: Send + Sync {
    type Output: Send;

    /// The kind of port this probe handles.
    fn kind(&self) -> ProbeKind;

    /// Probe a single target.
    async fn probe(&self, target: &ProbeTarget) -> Self::Output;

    /// Probe targets one after another, in order.
    async fn probe_all(&self, targets: &[ProbeTarget]) -> Vec<Self::Output> {
        let mut results = Vec::with_capacity(targets.len());
        for target in targets {
            results.push(self.probe(target).await);
        }
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DEFAULT_TIMEOUT;

    #[test]
    fn test_port_status_display() {
        assert_eq!(PortStatus::Open.to_string(), "OPEN");
        assert_eq!(PortStatus::Closed.to_string(), "CLOSED");
        assert_eq!(PortStatus::Filtered.to_string(), "FILTERED");
    }

    #[test]
    fn test_port_status_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&PortStatus::Filtered).unwrap(), "\"FILTERED\"");
    }

    #[test]
    fn test_probe_kind_from_label() {
        assert_eq!(ProbeKind::from_label("HTTPS"), ProbeKind::Tls);
        assert_eq!(ProbeKind::from_label("SSH"), ProbeKind::PlainTcp);
        assert_eq!(ProbeKind::from_label("RDP"), ProbeKind::PlainTcp);
        assert_eq!(ProbeKind::from_label("https"), ProbeKind::PlainTcp);
        assert_eq!(ProbeKind::from_label(""), ProbeKind::PlainTcp);
    }

    #[test]
    fn test_report_json_shape() {
        let target = ProbeTarget::new("10.0.0.1", Port::new(22).unwrap(), DEFAULT_TIMEOUT).unwrap();
        let report = ProbeReport::new(
            &target,
            ProbeOutcome::Tcp {
                status: PortStatus::Open,
            },
        )
        .with_protocol("SSH");

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["host"], "10.0.0.1");
        assert_eq!(json["port"], 22);
        assert_eq!(json["protocol"], "SSH");
        assert_eq!(json["probe"], "tcp");
        assert_eq!(json["status"], "OPEN");
        assert_eq!(report.status(), Some(PortStatus::Open));
        assert!(report.certificate().is_none());
    }
}
