use pelcod::{
    protocol::{checksum::checksum, Direction, Frame, FRAME_LENGTH, SYNC},
    Error, PelcoD, Result, Transport,
};
use std::{
    io::{Error as IoError, ErrorKind},
    sync::{Arc, Mutex},
    thread,
};

/// Records every buffer it is given.
#[derive(Default)]
struct Recorder {
    sent: Mutex<Vec<Vec<u8>>>,
}

impl Recorder {
    fn take(&self) -> Vec<Vec<u8>> {
        std::mem::take(&mut *self.sent.lock().unwrap())
    }

    fn last(&self) -> Vec<u8> {
        self.sent.lock().unwrap().last().cloned().expect("nothing sent")
    }
}

impl Transport for Recorder {
    fn send(&self, data: &[u8]) -> Result {
        self.sent.lock().unwrap().push(data.to_vec());
        Ok(())
    }

    fn receive(&self, buf: &mut [u8]) -> Result<usize> {
        let reply = [0xff, 0x01, 0x00, 0x59, 0x11, 0x94, 0xff];
        let l = reply.len().min(buf.len());
        buf[..l].copy_from_slice(&reply[..l]);
        Ok(l)
    }
}

/// Fails every send.
struct Broken;

impl Transport for Broken {
    fn send(&self, _: &[u8]) -> Result {
        Err(IoError::new(ErrorKind::BrokenPipe, "cable unplugged").into())
    }
}

type Op = fn(&PelcoD<&Recorder>) -> Result;

/// Every framed operation, with its expected command and data bytes.
fn operations() -> Vec<(&'static str, Op, [u8; 4])> {
    vec![
        ("pan_left", |c| c.pan_left(0x20), [0x00, 0x04, 0x20, 0x00]),
        ("pan_right", |c| c.pan_right(0x20), [0x00, 0x02, 0x20, 0x00]),
        ("tilt_up", |c| c.tilt_up(0x20), [0x00, 0x08, 0x00, 0x20]),
        ("tilt_down", |c| c.tilt_down(0x20), [0x00, 0x10, 0x00, 0x20]),
        ("move_left_up", |c| c.move_left_up(0x11), [0x00, 0x0c, 0x11, 0x11]),
        ("move_right_up", |c| c.move_right_up(0x11), [0x00, 0x0a, 0x11, 0x11]),
        ("move_left_down", |c| c.move_left_down(0x11), [0x00, 0x14, 0x11, 0x11]),
        ("move_right_down", |c| c.move_right_down(0x11), [0x00, 0x12, 0x11, 0x11]),
        ("move_direction", |c| c.move_direction(Direction::Up, 0x05), [0x00, 0x08, 0x00, 0x05]),
        ("stop_motion", |c| c.stop_motion(), [0x00, 0x00, 0x00, 0x00]),
        ("zoom_in", |c| c.zoom_in(), [0x00, 0x20, 0x00, 0x00]),
        ("zoom_out", |c| c.zoom_out(), [0x00, 0x40, 0x00, 0x00]),
        ("focus_in", |c| c.focus_in(), [0x01, 0x00, 0x00, 0x00]),
        ("focus_out", |c| c.focus_out(), [0x00, 0x80, 0x00, 0x00]),
        ("iris_in", |c| c.iris_in(), [0x02, 0x00, 0x00, 0x00]),
        ("iris_out", |c| c.iris_out(), [0x04, 0x00, 0x00, 0x00]),
        ("camera_on", |c| c.camera_on(), [0x88, 0x00, 0x00, 0x00]),
        ("camera_off", |c| c.camera_off(), [0x08, 0x00, 0x00, 0x00]),
        ("auto_scan", |c| c.auto_scan(), [0x90, 0x00, 0x00, 0x00]),
        ("manual_scan", |c| c.manual_scan(), [0x10, 0x00, 0x00, 0x00]),
        ("set_preset", |c| c.set_preset(10), [0x00, 0x03, 0x00, 0x0a]),
        ("clear_preset", |c| c.clear_preset(10), [0x00, 0x05, 0x00, 0x0a]),
        ("call_preset", |c| c.call_preset(10), [0x00, 0x07, 0x00, 0x0a]),
        ("set_auxiliary", |c| c.set_auxiliary(1), [0x00, 0x09, 0x00, 0x01]),
        ("clear_auxiliary", |c| c.clear_auxiliary(1), [0x00, 0x0b, 0x00, 0x01]),
        ("remote_reset", |c| c.remote_reset(), [0x00, 0x0f, 0x00, 0x00]),
        ("set_zoom_speed", |c| c.set_zoom_speed(2), [0x00, 0x25, 0x00, 0x02]),
        ("set_focus_speed", |c| c.set_focus_speed(7), [0x00, 0x27, 0x00, 0x03]),
        ("set_pan_position", |c| c.set_pan_position(4500), [0x00, 0x4b, 0x11, 0x94]),
        ("set_tilt_position", |c| c.set_tilt_position(33000), [0x00, 0x4d, 0x80, 0xe8]),
        ("set_zoom_position", |c| c.set_zoom_position(0x1234), [0x00, 0x4f, 0x12, 0x34]),
        ("set_pan_angle", |c| c.set_pan_angle(400.), [0x00, 0x4b, 0x8c, 0x9f]),
        ("set_tilt_angle", |c| c.set_tilt_angle(-45.), [0x00, 0x4d, 0x11, 0x94]),
        ("set_zoom_ratio", |c| c.set_zoom_ratio(1.), [0x00, 0x4f, 0xff, 0xff]),
        ("query_pan_position", |c| c.query_pan_position(), [0x00, 0x51, 0x00, 0x00]),
        ("query_tilt_position", |c| c.query_tilt_position(), [0x00, 0x53, 0x00, 0x00]),
        ("query_zoom_position", |c| c.query_zoom_position(), [0x00, 0x55, 0x00, 0x00]),
    ]
}

#[test]
fn known_frames() -> Result {
    let _ = tracing_subscriber::fmt().try_init();
    let recorder = Recorder::default();
    let camera = PelcoD::with_transport(0x01, &recorder);

    camera.pan_left(32)?;
    camera.pan_right(32)?;
    camera.tilt_up(32)?;
    camera.tilt_down(32)?;

    assert_eq!(
        recorder.take(),
        [
            [0xff, 0x01, 0x00, 0x04, 0x20, 0x00, 0x25],
            [0xff, 0x01, 0x00, 0x02, 0x20, 0x00, 0x23],
            [0xff, 0x01, 0x00, 0x08, 0x00, 0x20, 0x29],
            [0xff, 0x01, 0x00, 0x10, 0x00, 0x20, 0x31],
        ]
    );
    Ok(())
}

#[test]
fn every_operation_every_address() -> Result {
    let recorder = Recorder::default();

    let operations = operations();

    for address in 0..=u8::MAX {
        let camera = PelcoD::with_transport(address, &recorder);
        for (name, op, expected) in &operations {
            op(&camera)?;
            let sent = recorder.take();
            assert_eq!(1, sent.len(), "{name} must send exactly one frame");

            let frame = &sent[0];
            assert_eq!(FRAME_LENGTH, frame.len(), "{name}");
            assert_eq!(SYNC, frame[0], "{name}");
            assert_eq!(address, frame[1], "{name}");
            assert_eq!(expected, &frame[2..6], "{name} @ {address}");
            assert_eq!(checksum(&frame[1..6]), frame[6], "{name} @ {address}");

            // It should also decode cleanly
            let decoded = Frame::from_bytes(frame)?;
            assert_eq!(address, decoded.address);
        }
    }
    Ok(())
}

#[test]
fn idempotent() -> Result {
    let recorder = Recorder::default();
    let camera = PelcoD::with_transport(0x42, &recorder);

    for (name, op, _) in operations() {
        op(&camera)?;
        op(&camera)?;
        let sent = recorder.take();
        assert_eq!(sent[0], sent[1], "{name}");
    }
    Ok(())
}

#[test]
fn stop_has_no_memory() -> Result {
    let recorder = Recorder::default();
    let camera = PelcoD::with_transport(0x01, &recorder);

    camera.stop_motion()?;
    let first = recorder.last();

    camera.move_right_down(0x3f)?;
    camera.zoom_in()?;
    camera.set_pan_angle(90.)?;
    camera.stop_motion()?;
    assert_eq!(first, recorder.last());
    assert_eq!([0xff, 0x01, 0x00, 0x00, 0x00, 0x00, 0x01], first[..]);
    Ok(())
}

#[test]
fn clamping() -> Result {
    let recorder = Recorder::default();
    let camera = PelcoD::with_transport(0x01, &recorder);

    // Speeds saturate at 0x3f rather than wrapping.
    camera.pan_left(255)?;
    assert_eq!([0x3f, 0x00], recorder.last()[4..6]);
    camera.tilt_up(0x40)?;
    assert_eq!([0x00, 0x3f], recorder.last()[4..6]);
    camera.move_left_down(0x80)?;
    assert_eq!([0x3f, 0x3f], recorder.last()[4..6]);

    // 400 degrees clamps to 360, which is then 35999 units
    camera.set_pan_angle(400.)?;
    assert_eq!([0x8c, 0x9f], recorder.last()[4..6]);
    camera.set_pan_position(u16::MAX)?;
    assert_eq!([0x8c, 0x9f], recorder.last()[4..6]);

    camera.set_tilt_angle(30.)?;
    assert_eq!(33000u16.to_be_bytes(), recorder.last()[4..6]);
    camera.set_tilt_angle(-45.)?;
    assert_eq!(4500u16.to_be_bytes(), recorder.last()[4..6]);
    camera.set_tilt_angle(0.)?;
    assert_eq!([0, 0], recorder.last()[4..6]);
    camera.set_tilt_angle(-200.)?;
    assert_eq!(9000u16.to_be_bytes(), recorder.last()[4..6]);

    // Assumption: zoom positions span the full u16 range, so aren't clamped
    // like pan and tilt.
    camera.set_zoom_position(u16::MAX)?;
    assert_eq!([0xff, 0xff], recorder.last()[4..6]);
    camera.set_zoom_position(36000)?;
    assert_eq!(36000u16.to_be_bytes(), recorder.last()[4..6]);
    camera.set_zoom_ratio(7.)?;
    assert_eq!([0xff, 0xff], recorder.last()[4..6]);
    Ok(())
}

#[test]
fn send_raw_is_unframed() -> Result {
    let recorder = Recorder::default();
    let camera = PelcoD::with_transport(0x01, &recorder);

    camera.send_raw(&[0x01, 0x02, 0x03])?;
    camera.send_raw(&[])?;
    assert_eq!(recorder.take(), [vec![0x01u8, 0x02, 0x03], vec![]]);
    Ok(())
}

#[test]
fn receive() -> Result {
    let camera = PelcoD::with_transport(0x01, Recorder::default());
    let mut b = [0; 16];
    assert_eq!(7, camera.receive(&mut b)?);
    assert_eq!(0x59, b[3]);

    let mut b = [0; 3];
    assert_eq!(3, camera.receive(&mut b)?);
    Ok(())
}

/// Claims to have read more than it was given room for.
struct Overread;

impl Transport for Overread {
    fn send(&self, _: &[u8]) -> Result {
        Ok(())
    }

    fn receive(&self, buf: &mut [u8]) -> Result<usize> {
        Ok(buf.len() + 1)
    }
}

#[test]
fn receive_overread() {
    let _ = tracing_subscriber::fmt().try_init();
    let camera = PelcoD::with_transport(0x01, Overread);
    assert!(matches!(
        camera.receive(&mut [0; 7]),
        Err(Error::Internal)
    ));
}

#[test]
fn detached() -> Result {
    let _ = tracing_subscriber::fmt().try_init();
    let camera = PelcoD::new(0x01);
    assert_eq!(0x01, camera.address());
    assert!(matches!(camera.pan_left(1), Err(Error::TransportUnavailable)));
    assert!(matches!(camera.send_raw(&[1]), Err(Error::TransportUnavailable)));
    assert!(matches!(
        camera.receive(&mut [0; 7]),
        Err(Error::TransportUnavailable)
    ));

    // Frames can still be built without a transport.
    assert_eq!(
        [0xff, 0x01, 0x00, 0x07, 0x00, 0x05, 0x0d],
        camera.frame(pelcod::protocol::Command::call_preset(5)).to_bytes()?
    );

    let recorder = Recorder::default();
    let camera = camera.attach(&recorder);
    camera.call_preset(5)?;
    assert_eq!([0xff, 0x01, 0x00, 0x07, 0x00, 0x05, 0x0d], recorder.last()[..]);
    Ok(())
}

#[test]
fn transport_errors_propagate() {
    let camera = PelcoD::with_transport(0x01, Broken);
    let Err(Error::IoError(e)) = camera.zoom_in() else {
        panic!("expected I/O error");
    };
    assert_eq!(ErrorKind::BrokenPipe, e.kind());

    // The default receive is unsupported
    assert!(matches!(
        camera.receive(&mut [0; 7]),
        Err(Error::Unsupported)
    ));
}

#[test]
fn shared_between_threads() -> Result {
    let recorder = Arc::new(Recorder::default());
    let camera = Arc::new(PelcoD::with_transport(0x07, recorder.clone()));

    let handles: Vec<_> = (0..8u8)
        .map(|i| {
            let camera = camera.clone();
            thread::spawn(move || {
                for _ in 0..50 {
                    camera.call_preset(i).expect("send failed");
                }
            })
        })
        .collect();

    for h in handles {
        h.join().expect("thread panicked");
    }

    let sent = recorder.take();
    assert_eq!(8 * 50, sent.len());
    for frame in sent {
        // Every frame is complete and internally consistent.
        let decoded = Frame::from_bytes(&frame)?;
        assert_eq!(0x07, decoded.address);
    }
    Ok(())
}
