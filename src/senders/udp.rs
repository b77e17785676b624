//! UDP sender for GELF datagrams
//!
//! Messages are gzip-compressed. A payload that does not fit in one datagram
//! is split into GELF chunks, each prefixed with a 12 byte header:
//!
//! ```text
//! 0x1e 0x0f | message id (8 bytes) | sequence number | sequence count
//! ```

use super::GelfSender;
use crate::core::{GelfError, GelfMessage, Result};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::Write;
use std::net::{SocketAddr, ToSocketAddrs, UdpSocket};

/// Magic bytes opening every chunked datagram
pub const CHUNK_MAGIC: [u8; 2] = [0x1e, 0x0f];
/// Largest payload carried by a single datagram
pub const MAX_CHUNK_PAYLOAD: usize = 1420;
/// Most chunks a receiver will reassemble
pub const MAX_CHUNKS: usize = 128;

const CHUNK_HEADER_LEN: usize = 12;

/// Sender that delivers GELF messages as UDP datagrams
///
/// # Example
///
/// ```no_run
/// use rust_gelf_appender::senders::{GelfSender, UdpSender};
///
/// let mut sender = UdpSender::new("graylog.local:12201")
///     .expect("Failed to resolve Graylog host");
/// sender.close();
/// ```
pub struct UdpSender {
    socket: Option<UdpSocket>,
    address: String,
    compress: bool,
}

impl UdpSender {
    /// Create a sender for the GELF UDP input at `addr`
    ///
    /// # Errors
    ///
    /// Returns error if `addr` does not resolve or no local socket can be bound
    pub fn new(addr: impl ToSocketAddrs + ToString) -> Result<Self> {
        let address = addr.to_string();
        let remote = addr
            .to_socket_addrs()
            .map_err(|e| GelfError::io_operation("resolving Graylog host", address.clone(), e))?
            .next()
            .ok_or_else(|| GelfError::transport("udp", address.clone(), "host did not resolve"))?;

        let local: SocketAddr = if remote.is_ipv4() {
            ([0, 0, 0, 0], 0).into()
        } else {
            ([0u16; 8], 0).into()
        };
        let socket = UdpSocket::bind(local)?;
        socket.connect(remote)?;

        Ok(Self {
            socket: Some(socket),
            address,
            compress: true,
        })
    }

    /// Enable or disable gzip compression of the payload
    ///
    /// Default: enabled
    #[must_use]
    pub fn with_compression(mut self, enable: bool) -> Self {
        self.compress = enable;
        self
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Encode `message` into the datagrams that carry it.
    pub fn encode(&self, message: &GelfMessage) -> Result<Vec<Vec<u8>>> {
        let json = message.to_json_bytes()?;
        let payload = if self.compress { gzip(&json)? } else { json };

        if payload.len() <= MAX_CHUNK_PAYLOAD {
            return Ok(vec![payload]);
        }
        chunk_payload(&payload, rand::random::<[u8; 8]>())
    }
}

fn gzip(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::with_capacity(bytes.len() / 2), Compression::default());
    encoder.write_all(bytes)?;
    Ok(encoder.finish()?)
}

/// Split `payload` into GELF chunks sharing `message_id`.
pub fn chunk_payload(payload: &[u8], message_id: [u8; 8]) -> Result<Vec<Vec<u8>>> {
    let count = payload.len().div_ceil(MAX_CHUNK_PAYLOAD);
    if count > MAX_CHUNKS {
        return Err(GelfError::message_too_large(count, MAX_CHUNKS));
    }

    Ok(payload
        .chunks(MAX_CHUNK_PAYLOAD)
        .enumerate()
        .map(|(seq, body)| {
            let mut datagram = Vec::with_capacity(CHUNK_HEADER_LEN + body.len());
            datagram.extend_from_slice(&CHUNK_MAGIC);
            datagram.extend_from_slice(&message_id);
            // Both fit in a byte: count <= MAX_CHUNKS
            datagram.push(seq as u8);
            datagram.push(count as u8);
            datagram.extend_from_slice(body);
            datagram
        })
        .collect())
}

impl GelfSender for UdpSender {
    fn try_send(&mut self, message: &GelfMessage) -> Result<()> {
        message.validate()?;

        let datagrams = self.encode(message)?;
        let socket = self
            .socket
            .as_ref()
            .ok_or_else(|| GelfError::transport("udp", self.address.clone(), "sender closed"))?;

        for datagram in &datagrams {
            socket.send(datagram).map_err(|e| {
                GelfError::io_operation("sending GELF datagram", self.address.clone(), e)
            })?;
        }
        Ok(())
    }

    fn close(&mut self) {
        self.socket = None;
    }

    fn name(&self) -> &str {
        "udp"
    }
}
