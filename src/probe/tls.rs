//! TLS handshake probe.
//!
//! Connects, performs a real handshake with SNI set to the target host,
//! and reports identity and validity signals from the peer's leaf
//! certificate. Chains are not validated: the peer's certificate is
//! inspected whatever its trust status, which is what lets self-signed
//! endpoints be reported at all.
//!
//! # Stages
//!
//! 1. Client context (shared [`TlsEngine`])
//! 2. TCP connect (same machinery as the TCP probe)
//! 3. Session setup with SNI
//! 4. Handshake
//! 5. Leaf certificate retrieval and field extraction
//!
//! One deadline covers connect and handshake together.

use crate::error::{TlsError, TlsResult};
use crate::probe::cert::CertificateInfo;
use crate::probe::connect::connect_host;
use crate::probe::traits::{Probe, ProbeKind};
use crate::types::{Port, ProbeTarget};
use async_trait::async_trait;
use openssl::ssl::{Ssl, SslConnector, SslMethod, SslVerifyMode};
use std::fmt;
use std::pin::Pin;
use std::sync::OnceLock;
use std::time::Duration;
use tokio::time::timeout_at;
use tokio_openssl::SslStream;
use tracing::{error, warn};

/// Process-wide TLS engine.
static ENGINE: OnceLock<TlsEngine> = OnceLock::new();

/// Client-side TLS context shared by TLS probes.
///
/// Built once per process through [`TlsEngine::shared`]; tests may build
/// private instances with [`TlsEngine::new`].
#[derive(Clone)]
pub struct TlsEngine {
    connector: SslConnector,
}

impl TlsEngine {
    /// Initialize the TLS library and build a client context with the
    /// library's default settings and peer verification switched off.
    pub fn new() -> TlsResult<Self> {
        openssl::init();
        let mut builder =
            SslConnector::builder(SslMethod::tls_client()).map_err(TlsError::Context)?;
        builder.set_verify(SslVerifyMode::NONE);
        Ok(Self {
            connector: builder.build(),
        })
    }

    /// The process-wide engine, built on first use.
    pub fn shared() -> TlsResult<&'static TlsEngine> {
        if let Some(engine) = ENGINE.get() {
            return Ok(engine);
        }
        let engine = Self::new()?;
        Ok(ENGINE.get_or_init(|| engine))
    }
}

impl fmt::Debug for TlsEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TlsEngine").finish_non_exhaustive()
    }
}

/// TLS certificate prober.
#[derive(Debug, Clone)]
pub struct TlsProbe {
    engine: TlsEngine,
}

impl TlsProbe {
    pub fn new(engine: &TlsEngine) -> Self {
        Self {
            engine: engine.clone(),
        }
    }

    /// Run every stage and report which one failed, if any.
    pub async fn inspect(&self, target: &ProbeTarget) -> TlsResult<CertificateInfo> {
        let deadline = target.deadline();
        let tcp = connect_host(target.host(), target.port().as_u16(), deadline).await?;

        let ssl = self.session(target.host())?;
        let mut stream = SslStream::new(ssl, tcp).map_err(|source| TlsError::Session {
            host: target.host().to_string(),
            source,
        })?;

        match timeout_at(deadline, Pin::new(&mut stream).connect()).await {
            Err(_) => return Err(TlsError::HandshakeTimedOut(target.timeout())),
            Ok(Err(e)) => return Err(TlsError::Handshake(e)),
            Ok(Ok(())) => {}
        }

        let cert = stream
            .ssl()
            .peer_certificate()
            .ok_or(TlsError::NoCertificate)?;
        CertificateInfo::from_certificate(&cert)
    }

    /// Per-connection session with SNI set to `host`.
    ///
    /// OpenSSL leaves SNI out for IP literals, as RFC 6066 requires.
    fn session(&self, host: &str) -> TlsResult<Ssl> {
        self.engine
            .connector
            .configure()
            .and_then(|config| {
                config
                    .use_server_name_indication(true)
                    .verify_hostname(false)
                    .into_ssl(host)
            })
            .map_err(|source| TlsError::Session {
                host: host.to_string(),
                source,
            })
    }
}

#[async_trait]
impl Probe for TlsProbe {
    type Output = CertificateInfo;

    fn kind(&self) -> ProbeKind {
        ProbeKind::Tls
    }

    async fn probe(&self, target: &ProbeTarget) -> CertificateInfo {
        match self.inspect(target).await {
            Ok(info) => info,
            Err(err) => {
                if !err.is_silent() {
                    warn!(target = %target, error = %err, "TLS probe failed");
                }
                CertificateInfo::invalid()
            }
        }
    }
}

/// Probe the certificate served on `host:port`, allowing `timeout` for
/// connect and handshake together.
///
/// Never fails: every failure yields [`CertificateInfo::invalid`].
pub async fn probe_tls(host: &str, port: Port, timeout: Duration) -> CertificateInfo {
    let engine = match TlsEngine::shared() {
        Ok(engine) => engine,
        Err(err) => {
            error!(error = %err, "TLS engine unavailable");
            return CertificateInfo::invalid();
        }
    };

    match ProbeTarget::new(host, port, timeout) {
        Ok(target) => TlsProbe::new(engine).probe(&target).await,
        Err(_) => CertificateInfo::invalid(),
    }
}
