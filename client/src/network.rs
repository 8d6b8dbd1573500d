//! UDP round trip for the status query.

use log::{debug, error, info, warn};
use shared::{
    decode_reply, encode_request, interpret, AddressParseError, KeyValueTable, QueryTarget,
    ServerStatus, MAX_REPLY_SIZE,
};
use std::io;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::net::{lookup_host, UdpSocket};
use tokio::time::timeout;

/// Reply deadline used by the front-ends.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("no reply within the deadline")]
    Timeout,

    #[error("network error: {0}")]
    Network(String),

    #[error("invalid address: {0}")]
    Address(#[from] AddressParseError),
}

impl From<io::Error> for QueryError {
    fn from(e: io::Error) -> Self {
        QueryError::Network(e.to_string())
    }
}

/// Sends one status request to `target` and decodes the single reply.
///
/// Name resolution, send and receive all share `deadline`. The socket is
/// owned by the returned future, so it is closed on every exit path,
/// including when the caller drops the future.
pub async fn query(target: &QueryTarget, deadline: Duration) -> Result<KeyValueTable, QueryError> {
    let started = Instant::now();

    match timeout(deadline, exchange(target)).await {
        Ok(Ok(payload)) => {
            debug!(
                "Reply from {} ({} bytes) in {:?}",
                target,
                payload.len(),
                started.elapsed()
            );
            Ok(decode_reply(&payload))
        }
        Ok(Err(e)) => {
            error!("Query to {} failed: {}", target, e);
            Err(e)
        }
        Err(_) => {
            warn!("Query to {} timed out after {:?}", target, deadline);
            Err(QueryError::Timeout)
        }
    }
}

/// Queries `target` and interprets the reply.
pub async fn query_server(
    target: &QueryTarget,
    deadline: Duration,
) -> Result<ServerStatus, QueryError> {
    let table = query(target, deadline).await?;
    Ok(interpret(&table))
}

async fn exchange(target: &QueryTarget) -> Result<Vec<u8>, QueryError> {
    let server_addr = resolve(target).await?;

    let bind_addr: SocketAddr = if server_addr.is_ipv4() {
        (Ipv4Addr::UNSPECIFIED, 0).into()
    } else {
        (Ipv6Addr::UNSPECIFIED, 0).into()
    };

    let socket = UdpSocket::bind(bind_addr).await?;
    // Connected so that ICMP port-unreachable comes back as an error.
    socket.connect(server_addr).await?;

    socket.send(encode_request()).await?;
    info!("Sent status request to {} ({})", target, server_addr);

    let mut buffer = [0u8; MAX_REPLY_SIZE];
    let len = socket.recv(&mut buffer).await?;

    Ok(buffer[..len].to_vec())
}

async fn resolve(target: &QueryTarget) -> Result<SocketAddr, QueryError> {
    let mut addrs = lookup_host((target.host.as_str(), target.port))
        .await
        .map_err(|e| QueryError::Network(format!("cannot resolve {}: {}", target.host, e)))?;

    addrs
        .next()
        .ok_or_else(|| QueryError::Network(format!("no address found for {}", target.host)))
}
