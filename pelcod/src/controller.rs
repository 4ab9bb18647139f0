use crate::{
    protocol::{Command, Direction, Frame},
    transport::{Detached, Transport},
    Error, Result,
};

/// [PelcoD] encodes camera control intents as Pelco-D frames, and hands each
/// frame to a [Transport].
///
/// ## General design
///
/// Every operation builds exactly one complete frame for the device
/// [address][Self::address], and makes exactly one call to
/// [`Transport::send`]. There is no session or connection state: the same
/// call with the same arguments always sends the same bytes.
///
/// Out of range inputs (speeds, angles, positions) are clamped to the nearest
/// valid value, and never cause an error. Errors only come from encoding or
/// from the transport, and are returned unchanged. Nothing is retried.
///
/// All operations take `&self`, so a [PelcoD] can be shared between threads
/// (eg: in an [Arc][std::sync::Arc]) if its transport can.
///
/// ## Example
///
/// ```
/// use pelcod::{PelcoD, Result, Transport};
/// use std::sync::Mutex;
///
/// #[derive(Default)]
/// struct Recorder(Mutex<Vec<Vec<u8>>>);
///
/// impl Transport for Recorder {
///     fn send(&self, data: &[u8]) -> Result {
///         self.0.lock().unwrap().push(data.to_vec());
///         Ok(())
///     }
/// }
///
/// let camera = PelcoD::with_transport(0x01, Recorder::default());
/// camera.pan_left(32)?;
/// camera.stop_motion()?;
///
/// let sent = camera.into_transport().0.into_inner().unwrap();
/// assert_eq!(sent[0], [0xff, 0x01, 0x00, 0x04, 0x20, 0x00, 0x25]);
/// assert_eq!(sent[1], [0xff, 0x01, 0x00, 0x00, 0x00, 0x00, 0x01]);
/// # Ok::<(), pelcod::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct PelcoD<T = Detached> {
    address: u8,
    transport: T,
}

impl PelcoD {
    /// Creates an encoder for the device at `address` without a transport.
    ///
    /// Every operation will fail with
    /// [`Error::TransportUnavailable`][crate::Error::TransportUnavailable]
    /// until a transport is attached with [`PelcoD::attach`].
    pub const fn new(address: u8) -> Self {
        Self {
            address,
            transport: Detached,
        }
    }

    /// Attaches a transport to this encoder.
    pub fn attach<T: Transport>(self, transport: T) -> PelcoD<T> {
        PelcoD::with_transport(self.address, transport)
    }
}

impl<T: Transport> PelcoD<T> {
    /// Creates an encoder for the device at `address`, sending frames with
    /// `transport`.
    pub const fn with_transport(address: u8, transport: T) -> Self {
        Self { address, transport }
    }

    /// The device address, written into every frame.
    pub const fn address(&self) -> u8 {
        self.address
    }

    pub const fn transport(&self) -> &T {
        &self.transport
    }

    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Builds the [Frame] which would be sent for `command`, without sending
    /// it.
    pub const fn frame(&self, command: Command) -> Frame {
        Frame::new(self.address, command)
    }

    /// Sends an arbitrary [Command] to the device.
    ///
    /// The frame is completely encoded before it is handed to the transport.
    pub fn send(&self, command: Command) -> Result {
        let frame = self.frame(command).to_bytes()?;
        trace!("{:?} -> {}", command, hex::encode(frame));
        self.transport.send(&frame)
    }

    /// Sends `data` to the transport as-is, without any framing.
    pub fn send_raw(&self, data: &[u8]) -> Result {
        trace!("raw -> {}", hex::encode(data));
        self.transport.send(data)
    }

    /// Receives bytes from the transport into `buf`, returning the number of
    /// bytes read.
    ///
    /// Responses are not parsed.
    pub fn receive(&self, buf: &mut [u8]) -> Result<usize> {
        let l = self.transport.receive(buf)?;
        if l > buf.len() {
            error!("transport read {l} bytes into a {} byte buffer", buf.len());
            return Err(Error::Internal);
        }
        trace!("<- {}", hex::encode(&buf[..l]));
        Ok(l)
    }

    /// Moves in `direction` at `speed` (`0..=0x3f`).
    pub fn move_direction(&self, direction: Direction, speed: u8) -> Result {
        self.send(Command::move_direction(direction, speed))
    }

    /// Pans left at `speed` (`0..=0x3f`).
    pub fn pan_left(&self, speed: u8) -> Result {
        self.send(Command::pan_left(speed))
    }

    /// Pans right at `speed` (`0..=0x3f`).
    pub fn pan_right(&self, speed: u8) -> Result {
        self.send(Command::pan_right(speed))
    }

    /// Tilts up at `speed` (`0..=0x3f`).
    pub fn tilt_up(&self, speed: u8) -> Result {
        self.send(Command::tilt_up(speed))
    }

    /// Tilts down at `speed` (`0..=0x3f`).
    pub fn tilt_down(&self, speed: u8) -> Result {
        self.send(Command::tilt_down(speed))
    }

    /// Pans left and tilts up, both at `speed`.
    pub fn move_left_up(&self, speed: u8) -> Result {
        self.send(Command::move_left_up(speed))
    }

    /// Pans right and tilts up, both at `speed`.
    pub fn move_right_up(&self, speed: u8) -> Result {
        self.send(Command::move_right_up(speed))
    }

    /// Pans left and tilts down, both at `speed`.
    pub fn move_left_down(&self, speed: u8) -> Result {
        self.send(Command::move_left_down(speed))
    }

    /// Pans right and tilts down, both at `speed`.
    pub fn move_right_down(&self, speed: u8) -> Result {
        self.send(Command::move_right_down(speed))
    }

    /// Stops all pan, tilt and lens motion.
    pub fn stop_motion(&self) -> Result {
        self.send(Command::stop())
    }

    /// Zooms in (tele).
    pub fn zoom_in(&self) -> Result {
        self.send(Command::zoom_tele())
    }

    /// Zooms out (wide).
    pub fn zoom_out(&self) -> Result {
        self.send(Command::zoom_wide())
    }

    /// Focuses nearer.
    pub fn focus_in(&self) -> Result {
        self.send(Command::focus_near())
    }

    /// Focuses further away.
    pub fn focus_out(&self) -> Result {
        self.send(Command::focus_far())
    }

    /// Opens the iris.
    pub fn iris_in(&self) -> Result {
        self.send(Command::iris_open())
    }

    /// Closes the iris.
    pub fn iris_out(&self) -> Result {
        self.send(Command::iris_close())
    }

    pub fn camera_on(&self) -> Result {
        self.send(Command::camera(true))
    }

    pub fn camera_off(&self) -> Result {
        self.send(Command::camera(false))
    }

    pub fn auto_scan(&self) -> Result {
        self.send(Command::scan(true))
    }

    pub fn manual_scan(&self) -> Result {
        self.send(Command::scan(false))
    }

    /// Stores the current position as preset `id`.
    pub fn set_preset(&self, id: u8) -> Result {
        self.send(Command::set_preset(id))
    }

    pub fn clear_preset(&self, id: u8) -> Result {
        self.send(Command::clear_preset(id))
    }

    /// Moves to preset `id`.
    pub fn call_preset(&self, id: u8) -> Result {
        self.send(Command::call_preset(id))
    }

    pub fn set_auxiliary(&self, id: u8) -> Result {
        self.send(Command::set_auxiliary(id))
    }

    pub fn clear_auxiliary(&self, id: u8) -> Result {
        self.send(Command::clear_auxiliary(id))
    }

    pub fn remote_reset(&self) -> Result {
        self.send(Command::remote_reset())
    }

    /// Sets the zoom speed (`0..=3`).
    pub fn set_zoom_speed(&self, speed: u8) -> Result {
        self.send(Command::set_zoom_speed(speed))
    }

    /// Sets the focus speed (`0..=3`).
    pub fn set_focus_speed(&self, speed: u8) -> Result {
        self.send(Command::set_focus_speed(speed))
    }

    /// Sets the absolute pan position, in hundredths of a degree
    /// (`0..=35999`).
    pub fn set_pan_position(&self, position: u16) -> Result {
        self.send(Command::set_pan_position(position))
    }

    /// Sets the absolute tilt position, in hundredths of a degree
    /// (`0..=35999`).
    ///
    /// See [`protocol::scale`][crate::protocol::scale] for how angles above
    /// the horizon are represented.
    pub fn set_tilt_position(&self, position: u16) -> Result {
        self.send(Command::set_tilt_position(position))
    }

    /// Sets the absolute zoom position (`0..=0xffff`).
    pub fn set_zoom_position(&self, position: u16) -> Result {
        self.send(Command::set_zoom_position(position))
    }

    /// Sets the absolute pan position in degrees (`0.0..=360.0`).
    pub fn set_pan_angle(&self, degrees: f32) -> Result {
        self.send(Command::set_pan_angle(degrees))
    }

    /// Sets the absolute tilt position in degrees (`-90.0..=90.0`), where
    /// positive angles are above the horizon.
    pub fn set_tilt_angle(&self, degrees: f32) -> Result {
        self.send(Command::set_tilt_angle(degrees))
    }

    /// Sets the absolute zoom position as a ratio (`0.0..=1.0`).
    pub fn set_zoom_ratio(&self, ratio: f32) -> Result {
        self.send(Command::set_zoom_ratio(ratio))
    }

    /// Asks the device to report its pan position.
    ///
    /// The reply must be read with [`PelcoD::receive`].
    pub fn query_pan_position(&self) -> Result {
        self.send(Command::query_pan_position())
    }

    pub fn query_tilt_position(&self) -> Result {
        self.send(Command::query_tilt_position())
    }

    pub fn query_zoom_position(&self) -> Result {
        self.send(Command::query_zoom_position())
    }
}
