//! Probe targets and IPv4 name resolution.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;
use tokio::time::{timeout_at, Instant};
use trust_dns_resolver::config::{ResolverConfig, ResolverOpts};
use trust_dns_resolver::TokioAsyncResolver;

use super::Port;

/// Timeout applied to a probe when the caller does not choose one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

/// Cap on a deadline whose timeout would overflow the clock.
const FAR_FUTURE: Duration = Duration::from_secs(86400 * 365 * 30);

/// A single (host, port) pair to probe, with its time budget.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProbeTarget {
    host: String,
    port: Port,
    timeout: Duration,
}

impl ProbeTarget {
    /// Create a new target. The host may be a name or an IPv4 literal.
    pub fn new(host: impl Into<String>, port: Port, timeout: Duration) -> Result<Self, TargetError> {
        let host = host.into();
        let trimmed = host.trim();
        if trimmed.is_empty() {
            return Err(TargetError::EmptyHost);
        }
        Ok(Self {
            host: trimmed.to_string(),
            port,
            timeout,
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> Port {
        self.port
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Deadline for a probe of this target starting now.
    ///
    /// Timeouts too large for the clock saturate at roughly thirty years.
    pub fn deadline(&self) -> Instant {
        let now = Instant::now();
        now.checked_add(self.timeout).unwrap_or_else(|| now + FAR_FUTURE)
    }
}

impl fmt::Display for ProbeTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Error type for target construction and resolution.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TargetError {
    #[error("host must not be empty")]
    EmptyHost,
    #[error("'{0}' is an IPv6 address; only IPv4 targets are probed")]
    Ipv6Literal(String),
    #[error("failed to resolve hostname '{0}': {1}")]
    DnsResolutionFailed(String, String),
    #[error("no IPv4 address found for hostname '{0}'")]
    NoIpv4Address(String),
    #[error("resolving '{0}' did not finish before the deadline")]
    ResolutionTimedOut(String),
}

/// Resolve `host` to a single IPv4 address before `deadline`.
///
/// IPv4 literals are returned without touching the resolver. Names are
/// looked up fresh on every call and the first IPv4 answer wins.
pub async fn resolve_ipv4(host: &str, deadline: Instant) -> Result<Ipv4Addr, TargetError> {
    match host.parse::<IpAddr>() {
        Ok(IpAddr::V4(ip)) => return Ok(ip),
        Ok(IpAddr::V6(_)) => return Err(TargetError::Ipv6Literal(host.to_string())),
        Err(_) => {}
    }

    let resolver = TokioAsyncResolver::tokio_from_system_conf().unwrap_or_else(|_| {
        TokioAsyncResolver::tokio(ResolverConfig::default(), ResolverOpts::default())
    });

    let response = timeout_at(deadline, resolver.lookup_ip(host))
        .await
        .map_err(|_| TargetError::ResolutionTimedOut(host.to_string()))?
        .map_err(|e| TargetError::DnsResolutionFailed(host.to_string(), e.to_string()))?;

    response
        .iter()
        .find_map(|ip| match ip {
            IpAddr::V4(v4) => Some(v4),
            IpAddr::V6(_) => None,
        })
        .ok_or_else(|| TargetError::NoIpv4Address(host.to_string()))
}
