//! Conversion of human units into protocol integer fields.
//!
//! Every conversion here *saturates*: out of range inputs are clamped to the
//! nearest valid value, and never wrap or fail. `NaN` inputs clamp to `0`.
//!
//! ## Position units
//!
//! Pan and tilt positions are expressed in hundredths of a degree, in the
//! range `0..=35999`.
//!
//! Pan is measured clockwise from the device's home position.
//!
//! Tilt is measured from the horizon:
//!
//! * 45 degrees *below* the horizon is `4500`
//! * 30 degrees *above* the horizon is `33000` (ie: it wraps around towards
//!   360 degrees, rather than being a signed value)
//! * the horizon itself is `0`
//!
//! Zoom positions use the full `u16` range, from `0` (widest) to `0xffff`
//! (most telephoto).

/// Maximum pan or tilt speed.
///
/// Speed fields are a 6-bit magnitude; the upper bits are always zero.
pub const MAX_SPEED: u8 = 0x3f;

/// Maximum zoom or focus speed, used by [`Command::set_zoom_speed`] and
/// [`Command::set_focus_speed`].
///
/// [`Command::set_zoom_speed`]: crate::Command::set_zoom_speed
/// [`Command::set_focus_speed`]: crate::Command::set_focus_speed
pub const MAX_LENS_SPEED: u8 = 0x03;

/// Maximum absolute pan or tilt position, in hundredths of a degree.
pub const MAX_POSITION: u16 = 35999;

const MAX_PAN_DEGREES: f32 = 360.;
const MAX_TILT_DEGREES: f32 = 90.;

/// Number of position units in a full turn.
const FULL_TURN: f32 = 36000.;

/// Clamps a pan or tilt speed to [`MAX_SPEED`].
pub const fn clamp_speed(speed: u8) -> u8 {
    if speed > MAX_SPEED {
        MAX_SPEED
    } else {
        speed
    }
}

/// Clamps a zoom or focus speed to [`MAX_LENS_SPEED`].
pub const fn clamp_lens_speed(speed: u8) -> u8 {
    if speed > MAX_LENS_SPEED {
        MAX_LENS_SPEED
    } else {
        speed
    }
}

/// Clamps an absolute pan or tilt position to [`MAX_POSITION`].
pub const fn clamp_position(position: u16) -> u16 {
    if position > MAX_POSITION {
        MAX_POSITION
    } else {
        position
    }
}

/// Converts a pan angle in degrees (`0.0..=360.0`) to a pan position.
///
/// ```
/// use pelcod_protocol::scale::pan_angle_to_position;
///
/// assert_eq!(pan_angle_to_position(45.), 4500);
/// // 360 degrees is 36000 units, which is then clamped.
/// assert_eq!(pan_angle_to_position(400.), 35999);
/// ```
pub fn pan_angle_to_position(degrees: f32) -> u16 {
    let degrees = degrees.clamp(0., MAX_PAN_DEGREES);
    clamp_position(to_units(degrees * 100.))
}

/// Converts a tilt angle in degrees (`-90.0..=90.0`, positive is *above* the
/// horizon) to a tilt position.
///
/// ```
/// use pelcod_protocol::scale::tilt_angle_to_position;
///
/// assert_eq!(tilt_angle_to_position(-45.), 4500);
/// assert_eq!(tilt_angle_to_position(30.), 33000);
/// assert_eq!(tilt_angle_to_position(0.), 0);
/// ```
pub fn tilt_angle_to_position(degrees: f32) -> u16 {
    let degrees = degrees.clamp(-MAX_TILT_DEGREES, MAX_TILT_DEGREES);
    let units = if degrees < 0. {
        -degrees * 100.
    } else if degrees > 0. {
        FULL_TURN - degrees * 100.
    } else {
        // Also catches NaN
        0.
    };

    clamp_position(to_units(units))
}

/// Converts a zoom ratio (`0.0` is widest, `1.0` is most telephoto) to a zoom
/// position.
pub fn zoom_ratio_to_position(ratio: f32) -> u16 {
    let ratio = ratio.clamp(0., 1.);
    to_units(ratio * f32::from(u16::MAX))
}

/// Rounds to the nearest integer, saturating at the bounds of `u16`.
fn to_units(v: f32) -> u16 {
    // `as` casts from floats saturate, and map NaN to 0.
    v.round() as u16
}
