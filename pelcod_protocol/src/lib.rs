#![doc = include_str!("../README.md")]

#[macro_use]
extern crate num_derive;

#[macro_use]
extern crate tracing;

pub mod checksum;
pub mod command;
mod direction;
mod error;
pub mod frame;
pub mod scale;

pub use crate::{
    command::{Command, CommandFlags, Opcode},
    direction::Direction,
    error::Error,
    frame::{Frame, FRAME_LENGTH, SYNC},
};

/// Result type.
pub type Result<T = ()> = std::result::Result<T, Error>;
