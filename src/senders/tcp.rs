//! TCP sender for GELF messages
//!
//! Sends uncompressed JSON, each message terminated by a NUL byte, over one
//! long-lived connection.
//!
//! A write into a socket whose peer has already closed usually succeeds
//! locally, so the sender checks the connection before each frame and
//! reconnects when the peer is gone.

use super::GelfSender;
use crate::core::{GelfError, GelfMessage, Result};
use std::io::{ErrorKind, Write};
use std::net::{Shutdown, TcpStream, ToSocketAddrs};
use std::time::Duration;

/// Frame delimiter of the GELF TCP input
pub const FRAME_DELIMITER: u8 = 0;

const WRITE_TIMEOUT: Duration = Duration::from_secs(5);

/// Sender that delivers GELF messages over TCP
///
/// # Example
///
/// ```no_run
/// use rust_gelf_appender::senders::TcpSender;
///
/// let sender = TcpSender::new("graylog.local:12201")
///     .expect("Failed to connect to Graylog")
///     .with_reconnect(false);
/// ```
pub struct TcpSender {
    stream: Option<TcpStream>,
    address: String,
    reconnect_on_error: bool,
    closed: bool,
}

impl TcpSender {
    /// Connect to the GELF TCP input at `addr`
    ///
    /// # Errors
    ///
    /// Returns error if connection fails
    pub fn new(addr: impl ToSocketAddrs + ToString) -> Result<Self> {
        let address = addr.to_string();
        let stream = Self::connect(&address)?;

        Ok(Self {
            stream: Some(stream),
            address,
            reconnect_on_error: true,
            closed: false,
        })
    }

    /// Enable or disable a single reconnect-and-resend after a write failure
    ///
    /// Default: enabled
    #[must_use]
    pub fn with_reconnect(mut self, enable: bool) -> Self {
        self.reconnect_on_error = enable;
        self
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    fn connect(address: &str) -> Result<TcpStream> {
        let stream = TcpStream::connect(address)
            .map_err(|e| GelfError::transport("tcp", address, e.to_string()))?;
        stream.set_write_timeout(Some(WRITE_TIMEOUT))?;
        stream.set_nodelay(true)?;
        Ok(stream)
    }

    /// True when the peer has closed or reset the connection.
    ///
    /// Peeks without blocking: end of stream or a hard error means the peer
    /// is gone, pending data or `WouldBlock` means it is still there.
    fn peer_closed(stream: &TcpStream) -> bool {
        if stream.set_nonblocking(true).is_err() {
            return true;
        }
        let mut probe = [0u8; 1];
        let closed = match stream.peek(&mut probe) {
            Ok(0) => true,
            Ok(_) => false,
            Err(e) if e.kind() == ErrorKind::WouldBlock => false,
            Err(e) if e.kind() == ErrorKind::Interrupted => false,
            Err(_) => true,
        };
        closed || stream.set_nonblocking(false).is_err()
    }

    /// Replace a connection the peer has closed before writing into it.
    fn ensure_connected(&mut self) -> Result<()> {
        if !self.stream.as_ref().is_some_and(Self::peer_closed) {
            return Ok(());
        }
        self.stream = None;
        if !self.reconnect_on_error {
            return Err(GelfError::transport("tcp", self.address.clone(), "connection closed by peer"));
        }

        tracing::debug!(address = %self.address, "GELF TCP peer closed the connection, reconnecting");
        self.stream = Some(Self::connect(&self.address)?);
        Ok(())
    }

    fn write_frame(&mut self, frame: &[u8]) -> Result<()> {
        let stream = self
            .stream
            .as_mut()
            .ok_or_else(|| GelfError::transport("tcp", self.address.clone(), "not connected"))?;
        stream
            .write_all(frame)
            .map_err(|e| GelfError::io_operation("sending GELF frame", self.address.clone(), e))
    }
}

impl GelfSender for TcpSender {
    fn try_send(&mut self, message: &GelfMessage) -> Result<()> {
        if self.closed {
            return Err(GelfError::transport("tcp", self.address.clone(), "sender closed"));
        }
        message.validate()?;

        let mut frame = message.to_json_bytes()?;
        frame.push(FRAME_DELIMITER);
        self.ensure_connected()?;

        match self.write_frame(&frame) {
            Ok(()) => Ok(()),
            Err(err) => {
                self.stream = None;
                if !self.reconnect_on_error {
                    return Err(err);
                }

                tracing::warn!(address = %self.address, error = %err, "GELF TCP connection lost, reconnecting");
                match Self::connect(&self.address) {
                    Ok(stream) => {
                        self.stream = Some(stream);
                        self.write_frame(&frame)
                    }
                    Err(reconnect_err) => Err(GelfError::transport(
                        "tcp",
                        self.address.clone(),
                        format!("{} (reconnect: {})", err, reconnect_err),
                    )),
                }
            }
        }
    }

    fn close(&mut self) {
        if let Some(stream) = self.stream.take() {
            let _ = stream.shutdown(Shutdown::Both);
        }
        self.closed = true;
    }

    fn name(&self) -> &str {
        "tcp"
    }
}

impl Drop for TcpSender {
    fn drop(&mut self) {
        self.close();
    }
}
