//! Command bytes and data fields of a [Frame][crate::Frame].
//!
//! Pelco-D commands take two forms:
//!
//! * *Standard* commands: the two command bytes are a [bitfield][CommandFlags]
//!   of motion and lens flags, and the data bytes are the pan and tilt speeds.
//!
//! * *Extended* commands: Command 1 is `0x00`, Command 2 is an (odd)
//!   [opcode][Opcode], and the data bytes are a big-endian `u16` payload.
//!
//! [Command] is an `enum`, so a single command can never set both bitfield
//! flags and an opcode.
//!
//! ## Constructors
//!
//! The `Command::*` constructor functions (such as [Command::pan_left] and
//! [Command::set_pan_angle]) clamp their inputs to the valid range for the
//! field, using the functions in [crate::scale]. Building the enum variants
//! directly does *not* clamp anything.
use crate::{checksum::checksum, scale, Direction, Error, Result};
use binrw::{binrw, BinRead, BinWrite};
use modular_bitfield::{bitfield, specifiers::B2};
use num_traits::FromPrimitive;
use std::io::Cursor;

/// Length of the command and data fields in a frame.
pub const COMMAND_LENGTH: usize = 4;

/// Standard command bitfield (Command 1 and Command 2).
///
/// ## Format
///
/// This is a big-endian `u16` bitfield, with Command 1 in the high byte and
/// Command 2 in the low byte. Fields from LSB to MSB:
///
/// Command 2:
///
/// * `bit 0x0001`: always zero
/// * `bit 0x0002`: pan right
/// * `bit 0x0004`: pan left
/// * `bit 0x0008`: tilt up
/// * `bit 0x0010`: tilt down
/// * `bit 0x0020`: zoom tele
/// * `bit 0x0040`: zoom wide
/// * `bit 0x0080`: focus far
///
/// Command 1:
///
/// * `bit 0x0100`: focus near
/// * `bit 0x0200`: iris open
/// * `bit 0x0400`: iris close
/// * `bit 0x0800`: camera on/off
/// * `bit 0x1000`: auto/manual scan
/// * `u2 0x6000`: reserved
/// * `bit 0x8000`: sense
#[bitfield(bits = 16)]
#[repr(u16)]
#[derive(BinRead, BinWrite, Debug, Default, PartialEq, Eq, Clone, Copy)]
#[brw(big)]
#[br(map = From::<u16>::from)]
#[bw(map = |&x| Into::<u16>::into(x))]
pub struct CommandFlags {
    /// Always zero for standard commands.
    ///
    /// When set, the frame is an extended command.
    #[skip(setters)]
    pub always_zero: bool,
    pub right: bool,
    pub left: bool,
    pub up: bool,
    pub down: bool,
    /// Zoom in.
    pub zoom_tele: bool,
    /// Zoom out.
    pub zoom_wide: bool,
    pub focus_far: bool,

    pub focus_near: bool,
    pub iris_open: bool,
    pub iris_close: bool,

    /// Camera power. The state is set by [`sense`][Self::sense].
    pub camera: bool,

    /// Auto (when [`sense`][Self::sense] is set) or manual scan.
    pub scan: bool,

    #[skip]
    __: B2,

    /// Selects the on/auto state for [`camera`][Self::camera] and
    /// [`scan`][Self::scan].
    pub sense: bool,
}

impl CommandFlags {
    /// Gets these flags with [`always_zero`][Self::always_zero] cleared.
    pub fn without_opcode_bit(self) -> Self {
        Self::from(u16::from(self) & !1)
    }

    /// Gets the flags as `(command1, command2)`.
    pub fn command_bytes(self) -> (u8, u8) {
        let [command1, command2] = u16::from(self).to_be_bytes();
        (command1, command2)
    }
}

/// Extended command opcodes, sent in Command 2 with Command 1 set to `0x00`.
///
/// All extended opcodes are odd, which sets
/// [`CommandFlags::always_zero`].
#[derive(Debug, FromPrimitive, ToPrimitive, PartialEq, Eq, Clone, Copy, Hash)]
#[repr(u8)]
pub enum Opcode {
    SetPreset = 0x03,
    ClearPreset = 0x05,
    CallPreset = 0x07,
    SetAuxiliary = 0x09,
    ClearAuxiliary = 0x0b,
    RemoteReset = 0x0f,
    SetZoomSpeed = 0x25,
    SetFocusSpeed = 0x27,
    SetPanPosition = 0x4b,
    SetTiltPosition = 0x4d,
    SetZoomPosition = 0x4f,
    QueryPanPosition = 0x51,
    QueryTiltPosition = 0x53,
    QueryZoomPosition = 0x55,
}

/// Command and data fields of a [Frame][crate::Frame].
///
/// ## Format
///
/// * `u8`: Command 1
/// * `u8`: Command 2
/// * `u8`: Data 1
/// * `u8`: Data 2
#[binrw]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[brw(big)]
pub enum Command {
    /// Store the current position as a preset.
    #[brw(magic = b"\x00\x03\x00")]
    SetPreset(u8),

    #[brw(magic = b"\x00\x05\x00")]
    ClearPreset(u8),

    /// Move to a previously-stored preset.
    #[brw(magic = b"\x00\x07\x00")]
    CallPreset(u8),

    #[brw(magic = b"\x00\x09\x00")]
    SetAuxiliary(u8),

    #[brw(magic = b"\x00\x0b\x00")]
    ClearAuxiliary(u8),

    #[brw(magic = 0x000f_0000u32)]
    RemoteReset,

    /// Zoom speed, `0..=3`.
    #[brw(magic = b"\x00\x25\x00")]
    SetZoomSpeed(u8),

    /// Focus speed, `0..=3`.
    #[brw(magic = b"\x00\x27\x00")]
    SetFocusSpeed(u8),

    /// Absolute pan position, in hundredths of a degree.
    #[brw(magic = 0x004bu16)]
    SetPanPosition(u16),

    /// Absolute tilt position, in hundredths of a degree.
    ///
    /// See [crate::scale] for how angles above the horizon are represented.
    #[brw(magic = 0x004du16)]
    SetTiltPosition(u16),

    /// Absolute zoom position.
    #[brw(magic = 0x004fu16)]
    SetZoomPosition(u16),

    #[brw(magic = 0x0051_0000u32)]
    QueryPanPosition,

    #[brw(magic = 0x0053_0000u32)]
    QueryTiltPosition,

    #[brw(magic = 0x0055_0000u32)]
    QueryZoomPosition,

    /// Any other extended command.
    ///
    /// `opcode` must be odd, otherwise the frame would be interpreted as a
    /// [standard command][Command::Standard].
    #[brw(magic = 0x00u8)]
    #[br(assert(opcode & 1 == 1))]
    #[bw(assert(opcode & 1 == 1))]
    Extended { opcode: u8, data: u16 },

    /// Motion and lens control.
    ///
    /// Speeds are `0..=0x3f`. [`CommandFlags::always_zero`] must not be set,
    /// otherwise the frame would be interpreted as an extended command.
    #[br(assert(!flags.always_zero()))]
    #[bw(assert(!flags.always_zero()))]
    Standard {
        flags: CommandFlags,
        pan_speed: u8,
        tilt_speed: u8,
    },
}

impl Command {
    /// Builds a standard command with motion speeds.
    ///
    /// Speeds are clamped to [`scale::MAX_SPEED`], and
    /// [`CommandFlags::always_zero`] is cleared.
    pub fn standard(flags: CommandFlags, pan_speed: u8, tilt_speed: u8) -> Self {
        Self::Standard {
            flags: flags.without_opcode_bit(),
            pan_speed: scale::clamp_speed(pan_speed),
            tilt_speed: scale::clamp_speed(tilt_speed),
        }
    }

    /// Builds a standard command with only flags set, and zero speeds.
    pub fn flags(flags: CommandFlags) -> Self {
        Self::Standard {
            flags: flags.without_opcode_bit(),
            pan_speed: 0,
            tilt_speed: 0,
        }
    }

    /// Builds an extended command from an [Opcode] and a raw payload.
    ///
    /// The payload is not clamped. Payloads which don't fit the named variant
    /// for `opcode` are kept verbatim as [Command::Extended].
    pub fn extended(opcode: Opcode, data: u16) -> Self {
        use Opcode::*;
        let [hi, lo] = data.to_be_bytes();
        match opcode {
            SetPanPosition => Self::SetPanPosition(data),
            SetTiltPosition => Self::SetTiltPosition(data),
            SetZoomPosition => Self::SetZoomPosition(data),
            SetPreset if hi == 0 => Self::SetPreset(lo),
            ClearPreset if hi == 0 => Self::ClearPreset(lo),
            CallPreset if hi == 0 => Self::CallPreset(lo),
            SetAuxiliary if hi == 0 => Self::SetAuxiliary(lo),
            ClearAuxiliary if hi == 0 => Self::ClearAuxiliary(lo),
            SetZoomSpeed if hi == 0 => Self::SetZoomSpeed(lo),
            SetFocusSpeed if hi == 0 => Self::SetFocusSpeed(lo),
            RemoteReset if data == 0 => Self::RemoteReset,
            QueryPanPosition if data == 0 => Self::QueryPanPosition,
            QueryTiltPosition if data == 0 => Self::QueryTiltPosition,
            QueryZoomPosition if data == 0 => Self::QueryZoomPosition,
            _ => Self::Extended {
                opcode: opcode as u8,
                data,
            },
        }
    }

    /// Gets the extended [Opcode] for this command.
    ///
    /// Returns [None] for [standard commands][Command::Standard], and for
    /// [Command::Extended] with an unknown opcode.
    pub fn opcode(&self) -> Option<Opcode> {
        use Command::*;
        Some(match self {
            SetPreset(_) => Opcode::SetPreset,
            ClearPreset(_) => Opcode::ClearPreset,
            CallPreset(_) => Opcode::CallPreset,
            SetAuxiliary(_) => Opcode::SetAuxiliary,
            ClearAuxiliary(_) => Opcode::ClearAuxiliary,
            RemoteReset => Opcode::RemoteReset,
            SetZoomSpeed(_) => Opcode::SetZoomSpeed,
            SetFocusSpeed(_) => Opcode::SetFocusSpeed,
            SetPanPosition(_) => Opcode::SetPanPosition,
            SetTiltPosition(_) => Opcode::SetTiltPosition,
            SetZoomPosition(_) => Opcode::SetZoomPosition,
            QueryPanPosition => Opcode::QueryPanPosition,
            QueryTiltPosition => Opcode::QueryTiltPosition,
            QueryZoomPosition => Opcode::QueryZoomPosition,
            Extended { opcode, .. } => return Opcode::from_u8(*opcode),
            Standard { .. } => return None,
        })
    }

    /// Moves in `direction` at `speed`.
    ///
    /// The speed is used for every axis the direction moves on; axes which
    /// are not moving get a speed of `0`. [Direction::Stop] ignores `speed`.
    pub fn move_direction(direction: Direction, speed: u8) -> Self {
        let speed = scale::clamp_speed(speed);
        Self::Standard {
            flags: direction.flags(),
            pan_speed: if direction.pans() { speed } else { 0 },
            tilt_speed: if direction.tilts() { speed } else { 0 },
        }
    }

    pub fn pan_left(speed: u8) -> Self {
        Self::move_direction(Direction::Left, speed)
    }

    pub fn pan_right(speed: u8) -> Self {
        Self::move_direction(Direction::Right, speed)
    }

    pub fn tilt_up(speed: u8) -> Self {
        Self::move_direction(Direction::Up, speed)
    }

    pub fn tilt_down(speed: u8) -> Self {
        Self::move_direction(Direction::Down, speed)
    }

    pub fn move_left_up(speed: u8) -> Self {
        Self::move_direction(Direction::LeftUp, speed)
    }

    pub fn move_right_up(speed: u8) -> Self {
        Self::move_direction(Direction::RightUp, speed)
    }

    pub fn move_left_down(speed: u8) -> Self {
        Self::move_direction(Direction::LeftDown, speed)
    }

    pub fn move_right_down(speed: u8) -> Self {
        Self::move_direction(Direction::RightDown, speed)
    }

    /// Stops all motion and lens movement.
    pub fn stop() -> Self {
        Self::flags(CommandFlags::new())
    }

    pub fn zoom_tele() -> Self {
        Self::flags(CommandFlags::new().with_zoom_tele(true))
    }

    pub fn zoom_wide() -> Self {
        Self::flags(CommandFlags::new().with_zoom_wide(true))
    }

    pub fn focus_near() -> Self {
        Self::flags(CommandFlags::new().with_focus_near(true))
    }

    pub fn focus_far() -> Self {
        Self::flags(CommandFlags::new().with_focus_far(true))
    }

    pub fn iris_open() -> Self {
        Self::flags(CommandFlags::new().with_iris_open(true))
    }

    pub fn iris_close() -> Self {
        Self::flags(CommandFlags::new().with_iris_close(true))
    }

    /// Switches the camera on (`true`) or off (`false`).
    pub fn camera(on: bool) -> Self {
        Self::flags(CommandFlags::new().with_camera(true).with_sense(on))
    }

    /// Switches to automatic (`true`) or manual (`false`) scanning.
    pub fn scan(auto: bool) -> Self {
        Self::flags(CommandFlags::new().with_scan(true).with_sense(auto))
    }

    pub const fn set_preset(id: u8) -> Self {
        Self::SetPreset(id)
    }

    pub const fn clear_preset(id: u8) -> Self {
        Self::ClearPreset(id)
    }

    pub const fn call_preset(id: u8) -> Self {
        Self::CallPreset(id)
    }

    pub const fn set_auxiliary(id: u8) -> Self {
        Self::SetAuxiliary(id)
    }

    pub const fn clear_auxiliary(id: u8) -> Self {
        Self::ClearAuxiliary(id)
    }

    pub const fn remote_reset() -> Self {
        Self::RemoteReset
    }

    /// Sets the zoom speed, clamped to [`scale::MAX_LENS_SPEED`].
    pub const fn set_zoom_speed(speed: u8) -> Self {
        Self::SetZoomSpeed(scale::clamp_lens_speed(speed))
    }

    /// Sets the focus speed, clamped to [`scale::MAX_LENS_SPEED`].
    pub const fn set_focus_speed(speed: u8) -> Self {
        Self::SetFocusSpeed(scale::clamp_lens_speed(speed))
    }

    /// Sets the absolute pan position, clamped to [`scale::MAX_POSITION`].
    pub const fn set_pan_position(position: u16) -> Self {
        Self::SetPanPosition(scale::clamp_position(position))
    }

    /// Sets the absolute tilt position, clamped to [`scale::MAX_POSITION`].
    pub const fn set_tilt_position(position: u16) -> Self {
        Self::SetTiltPosition(scale::clamp_position(position))
    }

    /// Sets the absolute zoom position.
    ///
    /// Zoom positions use the whole `u16` range, so this is never clamped.
    pub const fn set_zoom_position(position: u16) -> Self {
        Self::SetZoomPosition(position)
    }

    /// Sets the absolute pan position in degrees (`0.0..=360.0`).
    pub fn set_pan_angle(degrees: f32) -> Self {
        Self::SetPanPosition(scale::pan_angle_to_position(degrees))
    }

    /// Sets the absolute tilt position in degrees (`-90.0..=90.0`, positive
    /// is above the horizon).
    pub fn set_tilt_angle(degrees: f32) -> Self {
        Self::SetTiltPosition(scale::tilt_angle_to_position(degrees))
    }

    /// Sets the absolute zoom position as a ratio (`0.0..=1.0`).
    pub fn set_zoom_ratio(ratio: f32) -> Self {
        Self::SetZoomPosition(scale::zoom_ratio_to_position(ratio))
    }

    pub const fn query_pan_position() -> Self {
        Self::QueryPanPosition
    }

    pub const fn query_tilt_position() -> Self {
        Self::QueryTiltPosition
    }

    pub const fn query_zoom_position() -> Self {
        Self::QueryZoomPosition
    }

    /// Encodes the command and data fields.
    pub fn to_bytes(&self) -> Result<[u8; COMMAND_LENGTH]> {
        let mut out = Cursor::new([0; COMMAND_LENGTH]);
        self.write(&mut out)?;
        if out.position() != COMMAND_LENGTH as u64 {
            error!("command encoded to {} bytes", out.position());
            return Err(Error::InvalidLength);
        }
        Ok(out.into_inner())
    }

    /// Decodes command and data fields.
    pub fn from_bytes(b: &[u8]) -> Result<Self> {
        if b.len() != COMMAND_LENGTH {
            return Err(Error::InvalidLength);
        }
        Ok(Self::read(&mut Cursor::new(b))?)
    }

    /// Checksum of a [Frame][crate::Frame] sending this command to `address`.
    pub(crate) fn checksum(&self, address: u8) -> Result<u8> {
        let [command1, command2, data1, data2] = self.to_bytes()?;
        Ok(checksum(&[address, command1, command2, data1, data2]))
    }
}

impl From<Direction> for Command {
    /// Moves in `direction` at [full speed][scale::MAX_SPEED].
    fn from(direction: Direction) -> Self {
        Self::move_direction(direction, scale::MAX_SPEED)
    }
}
