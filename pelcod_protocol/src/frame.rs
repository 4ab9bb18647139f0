use crate::{checksum::checksum, Command, Error, Result};
use binrw::{binrw, BinRead, BinWrite};
use std::{fmt, io::Cursor};

/// Sync byte at the start of every frame.
pub const SYNC: u8 = 0xff;

/// Length of a [Frame], in bytes.
pub const FRAME_LENGTH: usize = 7;

/// [Frame] is the basic unit of communication with a Pelco-D device.
///
/// ## Frame format
///
/// * `u8`: sync byte (`0xff`)
/// * `u8`: [device address]
/// * `u8[4]`: [command and data fields][command]
/// * `u8`: checksum: sum of the address, command and data fields, modulo 256
///
/// The checksum is not stored; it is calculated whenever the frame is written,
/// and checked whenever the frame is read.
///
/// [device address]: Self::address
/// [command]: Self::command
#[binrw]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[brw(big, magic = 0xffu8)]
pub struct Frame {
    /// Device address, `0..=255`.
    pub address: u8,

    pub command: Command,

    #[br(temp, assert(command.checksum(address).is_ok_and(|c| c == checksum)))]
    #[bw(try_calc(command.checksum(*address)))]
    checksum: u8,
}

impl Frame {
    pub const fn new(address: u8, command: Command) -> Self {
        Self { address, command }
    }

    /// Calculates the checksum byte for this frame.
    pub fn checksum(&self) -> Result<u8> {
        self.command.checksum(self.address)
    }

    /// Encodes the frame.
    ///
    /// This either returns a complete frame, with the checksum calculated
    /// after every other field, or an error.
    pub fn to_bytes(&self) -> Result<[u8; FRAME_LENGTH]> {
        let mut out = Cursor::new([0; FRAME_LENGTH]);
        self.write(&mut out)?;
        if out.position() != FRAME_LENGTH as u64 {
            error!("frame encoded to {} bytes", out.position());
            return Err(Error::InvalidLength);
        }
        Ok(out.into_inner())
    }

    /// Decodes a frame, checking the sync byte and checksum.
    ///
    /// This is intended for checking frames sent *to* a device. Devices may
    /// reply to queries with frames that aren't valid commands.
    pub fn from_bytes(b: &[u8]) -> Result<Self> {
        let Ok(b) = <&[u8; FRAME_LENGTH]>::try_from(b) else {
            return Err(Error::InvalidLength);
        };

        if b[0] != SYNC {
            return Err(Error::InvalidSync(b[0]));
        }

        let expected = checksum(&b[1..FRAME_LENGTH - 1]);
        let actual = b[FRAME_LENGTH - 1];
        if expected != actual {
            warn!("checksum mismatch in frame {}", hex::encode(b));
            return Err(Error::ChecksumMismatch { expected, actual });
        }

        Ok(Self::read(&mut Cursor::new(b))?)
    }
}

impl fmt::Display for Frame {
    /// Formats the frame as hex bytes, or `<invalid>` if it can't be encoded.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_bytes() {
            Ok(b) => f.write_str(&hex::encode(b)),
            Err(_) => f.write_str("<invalid>"),
        }
    }
}

impl TryFrom<&[u8]> for Frame {
    type Error = Error;

    fn try_from(value: &[u8]) -> Result<Self> {
        Self::from_bytes(value)
    }
}
