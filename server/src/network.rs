//! UDP responder answering status requests with a fixed reply

use log::{debug, error, info, warn};
use shared::{encode_reply, is_query_request, KeyValueTable, ServerStatus, MAX_REPLY_SIZE};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::UdpSocket;

/// Stub game server for exercising query clients.
pub struct Responder {
    socket: UdpSocket,
    reply: Vec<u8>,
    silent: bool,
}

impl Responder {
    /// Binds `addr` and prepares the reply for `status`, teams named by
    /// `teams` (ids 0 and 1).
    pub async fn bind(
        addr: &str,
        status: &ServerStatus,
        teams: &[&str; 2],
    ) -> Result<Self, Box<dyn std::error::Error>> {
        Self::bind_with_table(addr, &status.to_table(teams)).await
    }

    /// Binds `addr` and answers with an arbitrary table, for replies no
    /// well-behaved server would produce.
    pub async fn bind_with_table(
        addr: &str,
        table: &KeyValueTable,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        Self::bind_with_payload(addr, encode_reply(table)).await
    }

    /// Binds `addr` and answers with raw bytes.
    pub async fn bind_with_payload(
        addr: &str,
        reply: Vec<u8>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let socket = UdpSocket::bind(addr).await?;
        info!("Responder listening on {}", socket.local_addr()?);

        if reply.len() > MAX_REPLY_SIZE {
            warn!(
                "Reply is {} bytes, clients read at most {}",
                reply.len(),
                MAX_REPLY_SIZE
            );
        }

        Ok(Responder {
            socket,
            reply,
            silent: false,
        })
    }

    /// Never answer; requests are still read and logged.
    pub fn silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    /// Serves requests until the task is dropped.
    pub async fn run(self) {
        let mut buffer = [0u8; 2048];

        loop {
            match self.socket.recv_from(&mut buffer).await {
                Ok((len, addr)) => self.handle_datagram(&buffer[..len], addr).await,
                Err(e) => {
                    error!("Error receiving datagram: {}", e);
                    tokio::time::sleep(Duration::from_millis(10)).await;
                }
            }
        }
    }

    async fn handle_datagram(&self, data: &[u8], addr: SocketAddr) {
        if !is_query_request(data) {
            warn!(
                "Ignoring {} byte datagram from {}: {:?}",
                data.len(),
                addr,
                String::from_utf8_lossy(data)
            );
            return;
        }

        if self.silent {
            debug!("Status request from {} left unanswered", addr);
            return;
        }

        match self.socket.send_to(&self.reply, addr).await {
            Ok(sent) => debug!("Answered {} with {} bytes", addr, sent),
            Err(e) => error!("Failed to answer {}: {}", addr, e),
        }
    }
}
