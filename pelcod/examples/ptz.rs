use clap::{Parser, Subcommand, ValueEnum};
use pelcod::{
    protocol::Direction, Error, PelcoD, PelcoDTcpChannel, PelcoDUdpChannel, Result, Transport,
};
use std::net::SocketAddr;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::EnvFilter;

/// Pelco-D PTZ camera control.
///
/// Sends a single command to a camera. Without a transport option, frames are
/// only logged as hex:
///
///   ptz --address 1 move left 32
///   ptz --udp 192.0.2.1:6000 preset call 3
#[derive(Debug, Parser)]
#[clap(verbatim_doc_comment)]
struct CliParser {
    /// Device address of the camera.
    #[clap(short, long, default_value_t = 1)]
    pub address: u8,

    /// Send frames over UDP to HOST:PORT.
    #[clap(long, group = "transport")]
    pub udp: Option<SocketAddr>,

    /// Send frames over TCP to HOST:PORT.
    #[clap(long, group = "transport")]
    pub tcp: Option<SocketAddr>,

    /// Send frames to a serial port.
    #[cfg(feature = "serial")]
    #[clap(long, group = "transport")]
    pub serial: Option<String>,

    /// Serial port baud rate.
    #[cfg(feature = "serial")]
    #[clap(long, default_value_t = pelcod::DEFAULT_BAUD_RATE)]
    pub baud: u32,

    #[clap(subcommand)]
    pub command: Cmd,
}

#[derive(Debug, Subcommand)]
enum Cmd {
    /// Move in a direction at a speed (0 - 63).
    Move {
        #[clap(value_enum)]
        direction: Direction,
        speed: u8,
    },
    /// Stop all motion.
    Stop,
    Zoom {
        #[clap(value_enum)]
        action: Lens,
    },
    Focus {
        #[clap(value_enum)]
        action: Lens,
    },
    Iris {
        #[clap(value_enum)]
        action: Lens,
    },
    Preset {
        #[clap(value_enum)]
        action: PresetAction,
        id: u8,
    },
    /// Pan to an absolute angle, in degrees.
    Pan { degrees: f32 },
    /// Tilt to an absolute angle, in degrees (positive is up).
    Tilt {
        #[clap(allow_negative_numbers = true)]
        degrees: f32,
    },
    /// Zoom to an absolute ratio (0.0 - 1.0).
    ZoomTo { ratio: f32 },
    /// Ask the camera for its position, and print the reply.
    Query {
        #[clap(value_enum)]
        axis: Axis,
    },
    /// Send hex-encoded bytes without framing.
    Raw {
        #[clap(value_parser = parse_hex)]
        bytes: RawBytes,
    },
}

/// Bytes given on the command line as hex.
#[derive(Debug, Clone)]
struct RawBytes(Vec<u8>);

fn parse_hex(s: &str) -> std::result::Result<RawBytes, hex::FromHexError> {
    hex::decode(s).map(RawBytes)
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Lens {
    In,
    Out,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PresetAction {
    Set,
    Clear,
    Call,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Axis {
    Pan,
    Tilt,
    Zoom,
}

/// Logs frames instead of sending them.
struct HexDump;

impl Transport for HexDump {
    fn send(&self, data: &[u8]) -> Result {
        info!("{}", hex::encode(data));
        Ok(())
    }
}

impl CliParser {
    fn transport(&self) -> Result<Box<dyn Transport>> {
        if let Some(addr) = self.udp {
            let mut chan = PelcoDUdpChannel::new();
            chan.connect(addr)?;
            return Ok(Box::new(chan));
        }

        if let Some(addr) = self.tcp {
            let mut chan = PelcoDTcpChannel::new();
            chan.connect(addr)?;
            return Ok(Box::new(chan));
        }

        #[cfg(feature = "serial")]
        if let Some(path) = &self.serial {
            return Ok(Box::new(pelcod::PelcoDSerialChannel::open(
                path, self.baud,
            )?));
        }

        info!("no transport given, dry run");
        Ok(Box::new(HexDump))
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .compact()
        .init();
    let opts = CliParser::parse();
    let camera = PelcoD::with_transport(opts.address, opts.transport()?);

    match opts.command {
        Cmd::Move { direction, speed } => camera.move_direction(direction, speed)?,
        Cmd::Stop => camera.stop_motion()?,
        Cmd::Zoom { action: Lens::In } => camera.zoom_in()?,
        Cmd::Zoom { action: Lens::Out } => camera.zoom_out()?,
        Cmd::Focus { action: Lens::In } => camera.focus_in()?,
        Cmd::Focus { action: Lens::Out } => camera.focus_out()?,
        Cmd::Iris { action: Lens::In } => camera.iris_in()?,
        Cmd::Iris { action: Lens::Out } => camera.iris_out()?,
        Cmd::Preset { action, id } => match action {
            PresetAction::Set => camera.set_preset(id)?,
            PresetAction::Clear => camera.clear_preset(id)?,
            PresetAction::Call => camera.call_preset(id)?,
        },
        Cmd::Pan { degrees } => camera.set_pan_angle(degrees)?,
        Cmd::Tilt { degrees } => camera.set_tilt_angle(degrees)?,
        Cmd::ZoomTo { ratio } => camera.set_zoom_ratio(ratio)?,
        Cmd::Query { axis } => {
            match axis {
                Axis::Pan => camera.query_pan_position()?,
                Axis::Tilt => camera.query_tilt_position()?,
                Axis::Zoom => camera.query_zoom_position()?,
            }
            let mut buf = [0; 18];
            match camera.receive(&mut buf) {
                Ok(l) => info!("reply: {}", hex::encode(&buf[..l])),
                Err(Error::Unsupported) => info!("transport can't receive replies"),
                Err(e) => return Err(e),
            }
        }
        Cmd::Raw { bytes } => camera.send_raw(&bytes.0)?,
    }

    Ok(())
}
