//! Transport capability for [PelcoD][crate::PelcoD].
use crate::{Error, Result};
use std::{rc::Rc, sync::Arc};

/// Something which can carry Pelco-D frames to a device.
///
/// Transports are *sinks*: each call to [`send`][Self::send] is a single,
/// blocking hand-off of a complete buffer. Transports must not retry, queue or
/// reorder data; failures are returned to the caller unchanged.
///
/// Methods take `&self` so that a transport can be shared between threads.
/// Transports which need exclusive access to the underlying handle (such as a
/// serial port) are responsible for their own locking, and therefore for the
/// order in which concurrent frames are transmitted.
pub trait Transport {
    /// Transmits `data` to the device.
    ///
    /// For [`PelcoD`][crate::PelcoD] commands, this is always a complete
    /// 7-byte frame. [`PelcoD::send_raw`][crate::PelcoD::send_raw] passes
    /// through whatever the caller provided.
    fn send(&self, data: &[u8]) -> Result;

    /// Receives bytes from the device into `buf`, returning the number of
    /// bytes read.
    ///
    /// No parsing is done on received data.
    ///
    /// The default implementation returns [`Error::Unsupported`].
    fn receive(&self, buf: &mut [u8]) -> Result<usize> {
        let _ = buf;
        Err(Error::Unsupported)
    }
}

/// A [Transport] which isn't connected to anything.
///
/// Every operation fails with [`Error::TransportUnavailable`], so frames are
/// never sent to an undefined destination.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Detached;

impl Transport for Detached {
    fn send(&self, data: &[u8]) -> Result {
        error!(
            "cannot send {}: no transport attached",
            hex::encode(data)
        );
        Err(Error::TransportUnavailable)
    }

    fn receive(&self, _: &mut [u8]) -> Result<usize> {
        error!("cannot receive: no transport attached");
        Err(Error::TransportUnavailable)
    }
}

macro_rules! forward_transport {
    (
        $($wrapper:ident)*
    ) => {
        $(
            impl<T: Transport + ?Sized> Transport for $wrapper<T> {
                fn send(&self, data: &[u8]) -> Result {
                    (**self).send(data)
                }

                fn receive(&self, buf: &mut [u8]) -> Result<usize> {
                    (**self).receive(buf)
                }
            }
        )*
    };
}

forward_transport!(Box Rc Arc);

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, data: &[u8]) -> Result {
        (**self).send(data)
    }

    fn receive(&self, buf: &mut [u8]) -> Result<usize> {
        (**self).receive(buf)
    }
}
