//! Non-blocking TCP connect with a bounded wait.
//!
//! The socket is switched to non-blocking mode before `connect()` is
//! issued, so the call returns at once with "in progress". Completion is
//! then signalled by the socket becoming writable; the pending socket
//! error (`SO_ERROR`) tells success from refusal. Waiting for writability
//! is the only suspension point and it is bounded by the caller's deadline.

use crate::error::{ConnectError, ConnectResult};
use crate::types::resolve_ipv4;
use socket2::{Domain, Protocol, SockAddr, Socket, Type};
use std::io;
use std::net::{SocketAddr, SocketAddrV4};
use tokio::net::TcpStream;
use tokio::time::{timeout_at, Instant};

/// Resolve `host` and connect to it on `port`, all before `deadline`.
pub async fn connect_host(host: &str, port: u16, deadline: Instant) -> ConnectResult<TcpStream> {
    let ip = resolve_ipv4(host, deadline).await?;
    connect(SocketAddrV4::new(ip, port), deadline).await
}

/// Connect to `addr`, waiting for the handshake no later than `deadline`.
///
/// Dropping the returned stream (or any early return) closes the socket.
pub async fn connect(addr: SocketAddrV4, deadline: Instant) -> ConnectResult<TcpStream> {
    let socket = Socket::new(Domain::IPV4, Type::STREAM, Some(Protocol::TCP))
        .map_err(ConnectError::Socket)?;
    socket.set_nonblocking(true).map_err(ConnectError::Socket)?;

    match socket.connect(&SockAddr::from(SocketAddr::V4(addr))) {
        Ok(()) => {}
        Err(e) if is_in_progress(&e) => {}
        Err(e) => return Err(ConnectError::Refused(e)),
    }

    let stream = TcpStream::from_std(std::net::TcpStream::from(socket))
        .map_err(ConnectError::Socket)?;

    let budget = deadline.saturating_duration_since(Instant::now());
    match timeout_at(deadline, stream.writable()).await {
        Err(_) => Err(ConnectError::TimedOut(budget)),
        Ok(Err(e)) => Err(ConnectError::Wait(e)),
        Ok(Ok(())) => match stream.take_error() {
            Ok(None) => Ok(stream),
            Ok(Some(e)) => Err(ConnectError::Refused(e)),
            Err(e) => Err(ConnectError::Wait(e)),
        },
    }
}

#[cfg(unix)]
fn is_in_progress(err: &io::Error) -> bool {
    err.raw_os_error() == Some(libc::EINPROGRESS) || err.kind() == io::ErrorKind::WouldBlock
}

#[cfg(not(unix))]
fn is_in_progress(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::WouldBlock
}
