//! Transport for Pelco-D over TCP.
//!
//! This is typically a serial device server, which forwards the byte stream
//! to an RS-485 bus.
use crate::{Error, Result, Transport};
use std::{
    io::{Read, Write},
    net::{Shutdown, TcpStream, ToSocketAddrs},
};

#[derive(Debug, Default)]
pub struct PelcoDTcpChannel {
    stream: Option<TcpStream>,
}

impl PelcoDTcpChannel {
    pub fn new() -> Self {
        Self { stream: None }
    }

    pub fn connect<A: ToSocketAddrs>(&mut self, addr: A) -> Result {
        let stream = TcpStream::connect(addr)?;
        // Frames are tiny, and shouldn't wait for more data.
        stream.set_nodelay(true)?;
        debug!("connected TCP stream to {:?}", stream.peer_addr()?);
        self.stream = Some(stream);
        Ok(())
    }

    /// Wraps an existing, connected stream.
    pub fn from_stream(stream: TcpStream) -> Self {
        Self {
            stream: Some(stream),
        }
    }

    /// Shuts down and drops the stream.
    pub fn disconnect(&mut self) -> Result {
        let stream = self.stream.take().ok_or(Error::ChannelUnavailable)?;
        stream.shutdown(Shutdown::Both)?;
        Ok(())
    }
}

impl Transport for PelcoDTcpChannel {
    fn send(&self, data: &[u8]) -> Result {
        let mut stream = self.stream.as_ref().ok_or(Error::ChannelUnavailable)?;
        stream.write_all(data)?;
        Ok(())
    }

    fn receive(&self, buf: &mut [u8]) -> Result<usize> {
        let mut stream = self.stream.as_ref().ok_or(Error::ChannelUnavailable)?;
        Ok(stream.read(buf)?)
    }
}
