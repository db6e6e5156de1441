//! Probe module - TCP reachability and TLS certificate probes.
//!
//! Both probes are leaves: they share the connect machinery in
//! [`connect`] but not each other. [`Dispatcher`] routes a target to one
//! of them according to its [`ProbeKind`].

pub mod cert;
pub mod connect;
pub mod tcp;
pub mod tls;
pub mod traits;

#[cfg(test)]
pub(crate) mod testutil;

pub use cert::CertificateInfo;
pub use tcp::{probe_tcp, TcpProbe};
pub use tls::{probe_tls, TlsEngine, TlsProbe};
pub use traits::{PortStatus, Probe, ProbeKind, ProbeOutcome, ProbeReport};

use crate::types::ProbeTarget;
use tracing::{debug, error};

/// Routes targets to the TCP or TLS probe.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    tcp: TcpProbe,
    tls: Option<TlsProbe>,
}

impl Dispatcher {
    /// Create a dispatcher. Without an engine, TLS targets report an
    /// invalid certificate.
    pub fn new(engine: Option<&TlsEngine>) -> Self {
        Self {
            tcp: TcpProbe::new(),
            tls: engine.map(TlsProbe::new),
        }
    }

    /// Probe `target` with the probe selected by `kind`.
    pub async fn dispatch(&self, target: &ProbeTarget, kind: ProbeKind) -> ProbeReport {
        debug!(target = %target, kind = %kind, "probing");
        let outcome = match kind {
            ProbeKind::PlainTcp => ProbeOutcome::Tcp {
                status: self.tcp.probe(target).await,
            },
            ProbeKind::Tls => {
                let certificate = match &self.tls {
                    Some(tls) => tls.probe(target).await,
                    None => {
                        error!(target = %target, "TLS engine unavailable, skipping handshake");
                        CertificateInfo::invalid()
                    }
                };
                ProbeOutcome::Tls { certificate }
            }
        };
        ProbeReport::new(target, outcome)
    }
}
