use crate::CommandFlags;
#[cfg(feature = "clap")]
use clap::ValueEnum;
use num_traits::FromPrimitive;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Direction of pan/tilt motion.
///
/// The discriminant is the direction's bits in
/// [Command 2][CommandFlags::command_bytes].
#[derive(Default, Debug, FromPrimitive, ToPrimitive, PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "clap", derive(ValueEnum))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum Direction {
    #[default]
    Stop = 0x00,
    Right = 0x02,
    Left = 0x04,
    Up = 0x08,
    Down = 0x10,
    RightUp = 0x0a,
    LeftUp = 0x0c,
    RightDown = 0x12,
    LeftDown = 0x14,
}

impl Direction {
    /// Mask of the direction bits in Command 2.
    const MASK: u8 = 0x1e;

    /// Returns `true` if this direction moves on the pan axis.
    pub const fn pans(self) -> bool {
        (self as u8) & (Self::Left as u8 | Self::Right as u8) != 0
    }

    /// Returns `true` if this direction moves on the tilt axis.
    pub const fn tilts(self) -> bool {
        (self as u8) & (Self::Up as u8 | Self::Down as u8) != 0
    }

    /// Motion flags for this direction.
    pub fn flags(self) -> CommandFlags {
        let b = self as u8;
        CommandFlags::new()
            .with_right(b & Self::Right as u8 != 0)
            .with_left(b & Self::Left as u8 != 0)
            .with_up(b & Self::Up as u8 != 0)
            .with_down(b & Self::Down as u8 != 0)
    }

    /// Gets the direction described by `flags`.
    ///
    /// Returns [None] if the flags describe an impossible direction (for
    /// example, both left and right).
    pub fn from_flags(flags: CommandFlags) -> Option<Self> {
        let (_, command2) = flags.command_bytes();
        Self::from_u8(command2 & Self::MASK)
    }
}
