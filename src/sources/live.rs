//! Live UDP source for OSC-carried cursor messages

use std::collections::VecDeque;
use std::net::SocketAddr;

use tokio::net::UdpSocket;
use tracing::{debug, info, trace, warn};

use crate::osc;
use crate::source::MessageSource;
use crate::types::CursorMessage;
use crate::{Result, TuioError};

/// Maximum UDP datagram size we'll receive.
const MAX_DATAGRAM_SIZE: usize = 65535;

/// Live source reading OSC packets from a bound UDP socket.
///
/// One datagram usually carries a whole bundle (alive, set per contact,
/// fseq), so decoded messages are queued and handed out one at a time.
/// Undecodable datagrams and malformed messages are dropped with a log
/// line; only socket-level faults surface as errors.
pub struct UdpSource {
    socket: UdpSocket,

    /// OSC address the cursor profile is expected on
    profile: String,

    /// Reusable buffer for receiving datagrams
    recv_buf: Vec<u8>,

    /// Messages decoded from the current datagram, not yet handed out
    queue: VecDeque<CursorMessage>,
}

impl UdpSource {
    /// Bind a UDP listener for cursor traffic.
    pub async fn bind(addr: SocketAddr, profile: impl Into<String>) -> Result<Self> {
        let profile = profile.into();
        let socket = UdpSocket::bind(addr)
            .await
            .map_err(|err| TuioError::socket(format!("binding UDP listener on {addr}"), err))?;

        let local = socket.local_addr().map_err(|err| {
            TuioError::socket("resolving local address of UDP listener", err)
        })?;
        info!(addr = %local, profile = %profile, "listening for TUIO cursor traffic");

        Ok(Self {
            socket,
            profile,
            recv_buf: vec![0u8; MAX_DATAGRAM_SIZE],
            queue: VecDeque::new(),
        })
    }

    /// Address the listener is actually bound to.
    ///
    /// Useful when binding port 0 to let the OS pick.
    pub fn local_addr(&self) -> Result<SocketAddr> {
        self.socket
            .local_addr()
            .map_err(|err| TuioError::socket("resolving local address of UDP listener", err))
    }
}

#[async_trait::async_trait]
impl MessageSource for UdpSource {
    async fn next_message(&mut self) -> Result<Option<CursorMessage>> {
        loop {
            if let Some(msg) = self.queue.pop_front() {
                return Ok(Some(msg));
            }

            let (len, from) = self
                .socket
                .recv_from(&mut self.recv_buf)
                .await
                .map_err(|err| TuioError::socket("receiving datagram", err))?;
            trace!(bytes = len, %from, "datagram received");

            let packet = match rosc::decoder::decode_udp(&self.recv_buf[..len]) {
                Ok((_, packet)) => packet,
                Err(err) => {
                    // Garbage on the wire is not fatal; the next datagram
                    // may be fine.
                    warn!(%from, error = %err, "dropping undecodable datagram");
                    continue;
                }
            };

            let mut decoded = Vec::new();
            osc::collect_packet(packet, &self.profile, &mut decoded);
            if decoded.is_empty() {
                debug!(%from, "datagram carried no cursor messages");
                continue;
            }
            self.queue.extend(decoded);
        }
    }

    fn describe(&self) -> String {
        match self.socket.local_addr() {
            Ok(addr) => format!("udp://{addr}{}", self.profile),
            Err(_) => format!("udp://?{}", self.profile),
        }
    }
}
