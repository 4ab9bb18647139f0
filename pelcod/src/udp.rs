//! Transport for Pelco-D over UDP.
//!
//! Many IP cameras and encoders accept Pelco-D frames over UDP, with one frame
//! per datagram. There is no standard port number.
use crate::{Error, Result, Transport};
use std::{
    io::{Error as IoError, ErrorKind},
    net::{Ipv4Addr, SocketAddrV4, ToSocketAddrs, UdpSocket},
};

#[derive(Debug, Default)]
pub struct PelcoDUdpChannel {
    sock: Option<UdpSocket>,
}

impl PelcoDUdpChannel {
    pub fn new() -> Self {
        Self { sock: None }
    }

    /// Binds an ephemeral local port, and connects it to `addr`.
    pub fn connect<A: ToSocketAddrs>(&mut self, addr: A) -> Result {
        let sock = UdpSocket::bind(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 0))?;
        sock.connect(addr)?;
        debug!("connected UDP socket to {:?}", sock.peer_addr()?);
        self.sock = Some(sock);
        Ok(())
    }

    /// Wraps an existing socket, which must already be connected.
    pub fn from_socket(sock: UdpSocket) -> Self {
        Self { sock: Some(sock) }
    }

    /// Extracts the inner [UdpSocket] from this channel.
    ///
    /// This renders the [PelcoDUdpChannel] unusable.
    pub fn take_socket(&mut self) -> Result<UdpSocket> {
        self.sock.take().ok_or(Error::ChannelUnavailable)
    }
}

/// Datagrams are sent whole, or not at all.
fn check_sent(sent: usize, len: usize) -> Result {
    if sent != len {
        warn!("short UDP send: {sent} of {len} bytes");
        return Err(IoError::new(ErrorKind::WriteZero, "short UDP send").into());
    }
    Ok(())
}

impl Transport for PelcoDUdpChannel {
    fn send(&self, data: &[u8]) -> Result {
        let sock = self.sock.as_ref().ok_or(Error::ChannelUnavailable)?;
        check_sent(sock.send(data)?, data.len())
    }

    fn receive(&self, buf: &mut [u8]) -> Result<usize> {
        let sock = self.sock.as_ref().ok_or(Error::ChannelUnavailable)?;
        Ok(sock.recv(buf)?)
    }
}
