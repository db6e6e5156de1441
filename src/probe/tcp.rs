//! TCP connect probe.
//!
//! Completes a real three-way handshake and classifies the port as OPEN,
//! CLOSED or FILTERED. A refusal and a silent drop are kept apart: only
//! the latter runs into the timeout.

use crate::error::{ConnectError, ConnectResult};
use crate::probe::connect::connect_host;
use crate::probe::traits::{PortStatus, Probe, ProbeKind};
use crate::types::{Port, ProbeTarget};
use async_trait::async_trait;
use std::time::Duration;
use tokio::net::TcpStream;
use tracing::warn;

/// TCP connect prober.
///
/// Does not require elevated privileges. Holds no state between probes:
/// every call resolves and connects from scratch.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpProbe;

impl TcpProbe {
    pub fn new() -> Self {
        Self
    }

    /// Run the connect stage and hand back the raw outcome.
    pub async fn connect(&self, target: &ProbeTarget) -> ConnectResult<TcpStream> {
        connect_host(target.host(), target.port().as_u16(), target.deadline()).await
    }
}

impl PortStatus {
    /// Classify a failed connect attempt.
    pub fn from_connect_error(err: &ConnectError) -> Self {
        match err {
            ConnectError::TimedOut(_) => Self::Filtered,
            _ => Self::Closed,
        }
    }
}

#[async_trait]
impl Probe for TcpProbe {
    type Output = PortStatus;

    fn kind(&self) -> ProbeKind {
        ProbeKind::PlainTcp
    }

    async fn probe(&self, target: &ProbeTarget) -> PortStatus {
        match self.connect(target).await {
            Ok(stream) => {
                drop(stream);
                PortStatus::Open
            }
            Err(err) => {
                if err.is_mechanical() {
                    warn!(target = %target, error = %err, "TCP probe could not run");
                }
                PortStatus::from_connect_error(&err)
            }
        }
    }
}

/// Probe `host:port`, waiting at most `timeout` for an answer.
///
/// Never fails: an empty host is reported as CLOSED like any other name
/// that cannot be resolved.
pub async fn probe_tcp(host: &str, port: Port, timeout: Duration) -> PortStatus {
    match ProbeTarget::new(host, port, timeout) {
        Ok(target) => TcpProbe::new().probe(&target).await,
        Err(err) => {
            warn!(error = %ConnectError::Resolve(err), "TCP probe could not run");
            PortStatus::Closed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{TargetError, DEFAULT_TIMEOUT};
    use std::io;
    use std::time::Instant;
    use tokio::net::TcpListener;

    fn target(host: &str, port: u16, timeout: Duration) -> ProbeTarget {
        ProbeTarget::new(host, Port::new(port).unwrap(), timeout).unwrap()
    }

    #[test]
    fn test_probe_kind() {
        assert_eq!(TcpProbe::new().kind(), ProbeKind::PlainTcp);
    }

    #[test]
    fn test_classification() {
        let refused = ConnectError::Refused(io::Error::from(io::ErrorKind::ConnectionRefused));
        assert_eq!(PortStatus::from_connect_error(&refused), PortStatus::Closed);
        assert_eq!(
            PortStatus::from_connect_error(&ConnectError::TimedOut(DEFAULT_TIMEOUT)),
            PortStatus::Filtered
        );
        assert_eq!(
            PortStatus::from_connect_error(&ConnectError::Resolve(TargetError::EmptyHost)),
            PortStatus::Closed
        );
        let wait = ConnectError::Wait(io::Error::from(io::ErrorKind::Interrupted));
        assert_eq!(PortStatus::from_connect_error(&wait), PortStatus::Closed);
    }

    #[tokio::test]
    async fn test_open_then_closed() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let target = target("127.0.0.1", port, Duration::from_secs(2));

        assert_eq!(TcpProbe::new().probe(&target).await, PortStatus::Open);

        drop(listener);
        assert_eq!(TcpProbe::new().probe(&target).await, PortStatus::Closed);
    }

    #[tokio::test]
    async fn test_repeated_probes_agree() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let target = target("127.0.0.1", port, Duration::from_secs(2));

        let results = TcpProbe::new().probe_all(&[target.clone(), target]).await;
        assert_eq!(results, vec![PortStatus::Open, PortStatus::Open]);
    }

    #[tokio::test]
    async fn test_unbounded_timeout_does_not_overflow() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = Port::new(listener.local_addr().unwrap().port()).unwrap();

        assert_eq!(probe_tcp("127.0.0.1", port, Duration::MAX).await, PortStatus::Open);
    }

    #[tokio::test]
    async fn test_unresolvable_host_is_closed() {
        let status = probe_tcp("::1", Port::new(80).unwrap(), Duration::from_millis(200)).await;
        assert_eq!(status, PortStatus::Closed);

        let status = probe_tcp("", Port::new(80).unwrap(), Duration::from_millis(200)).await;
        assert_eq!(status, PortStatus::Closed);
    }

    /// A listener whose accept queue is full: it never accepts and one
    /// client already occupies the only backlog slot, so further SYNs are
    /// dropped without an answer.
    fn saturated_listener() -> (socket2::Socket, std::net::TcpStream, u16) {
        use socket2::{Domain, SockAddr, Socket, Type};
        use std::net::{Ipv4Addr, SocketAddr};

        let listener = Socket::new(Domain::IPV4, Type::STREAM, None).unwrap();
        let addr = SocketAddr::from((Ipv4Addr::LOCALHOST, 0));
        listener.bind(&SockAddr::from(addr)).unwrap();
        listener.listen(0).unwrap();

        let port = listener.local_addr().unwrap().as_socket().unwrap().port();
        let held = std::net::TcpStream::connect((Ipv4Addr::LOCALHOST, port)).unwrap();
        (listener, held, port)
    }

    #[tokio::test]
    async fn test_dropped_syn_is_filtered_after_timeout() {
        let (_listener, _held, port) = saturated_listener();
        let timeout = Duration::from_millis(400);

        let started = Instant::now();
        let status = TcpProbe::new()
            .probe(&target("127.0.0.1", port, timeout))
            .await;
        let elapsed = started.elapsed();

        assert_eq!(status, PortStatus::Filtered);
        assert!(elapsed >= timeout, "took {elapsed:?}");
        assert!(elapsed < timeout + Duration::from_millis(500), "took {elapsed:?}");
    }

    #[tokio::test]
    async fn test_unroutable_target_is_bounded() {
        // TEST-NET-1 is never routed; depending on the sandbox the SYN is
        // either dropped (FILTERED) or rejected at once (CLOSED).
        let timeout = Duration::from_millis(300);
        let started = Instant::now();
        let status = probe_tcp("192.0.2.1", Port::new(81).unwrap(), timeout).await;
        let elapsed = started.elapsed();

        assert!(matches!(status, PortStatus::Filtered | PortStatus::Closed));
        assert!(elapsed < timeout + Duration::from_secs(1), "took {elapsed:?}");
        if status == PortStatus::Filtered {
            assert!(elapsed >= timeout - Duration::from_millis(20), "took {elapsed:?}");
        }
    }
}
