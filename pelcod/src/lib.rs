#![doc = include_str!("../README.md")]

#[macro_use]
extern crate tracing;

mod controller;
mod error;
#[cfg(feature = "serial")]
mod serial;
mod tcp;
mod transport;
mod udp;

#[cfg(feature = "serial")]
pub use crate::serial::{PelcoDSerialChannel, DEFAULT_BAUD_RATE};
pub use {
    crate::{
        controller::PelcoD,
        error::Error,
        tcp::PelcoDTcpChannel,
        transport::{Detached, Transport},
        udp::PelcoDUdpChannel,
    },
    pelcod_protocol as protocol,
};
pub type Result<T = ()> = std::result::Result<T, Error>;
