//! Tello SDK text-protocol link: commands over UDP to the drone, state
//! datagrams received on a second socket by a background listener.

use std::io::ErrorKind;
use std::net::UdpSocket;
use std::sync::{mpsc, Arc, RwLock};
use std::thread::JoinHandle;
use std::time::Duration;

use remote::{AxisCommand, Direction, DroneLink, FlightTelemetry, LinkError, StickFrame};

mod state;

pub use state::{parse_state, StateReport};

const DRONE_ADDR: &str = "192.168.10.1:8889";
const STATE_BIND_ADDR: &str = "0.0.0.0:8890";

const REPLY_TIMEOUT: Duration = Duration::from_secs(5);
const STATE_POLL_TIMEOUT: Duration = Duration::from_millis(200);

const BATTERY_LOW_PCT: u8 = 20;
const BATTERY_CRITICAL_PCT: u8 = 10;

#[derive(Default)]
struct SharedState {
    // Set by takeoff/land acks, overridden by reported height when present.
    flying: bool,
    battery: Option<u8>,
    height_dm: Option<i32>,
}

enum ListenerCommand {
    Stop,
}

/// Control link to a Tello over its SDK text protocol.
///
/// Directional primitives are realized by folding each one into a held
/// four-channel `rc` state and resending the full `rc` datagram, so split
/// and packed dispatch both end up on the same wire command.
pub struct TelloLink {
    drone_addr: String,
    command_socket: Option<UdpSocket>,
    shared: Arc<RwLock<SharedState>>,
    to_listener_tx: Option<mpsc::Sender<ListenerCommand>>,
    listener_thread: Option<JoinHandle<()>>,
    // left/right, forward/backward, up/down, yaw; each -100..=100.
    rc: [i8; 4],
}

impl Default for TelloLink {
    fn default() -> Self {
        Self::new()
    }
}

impl TelloLink {
    pub fn new() -> Self {
        Self::with_address(DRONE_ADDR)
    }

    pub fn with_address(drone_addr: impl Into<String>) -> Self {
        TelloLink {
            drone_addr: drone_addr.into(),
            command_socket: None,
            shared: Arc::new(RwLock::new(SharedState::default())),
            to_listener_tx: None,
            listener_thread: None,
            rc: [0; 4],
        }
    }

    fn send_expect_ok(&mut self, command: &str) -> Result<(), LinkError> {
        let socket = self.command_socket.as_ref().ok_or(LinkError::NotConnected)?;
        socket.send(command.as_bytes())?;

        let mut buf = [0u8; 256];
        let len = match socket.recv(&mut buf) {
            Ok(len) => len,
            Err(err) if matches!(err.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => {
                return Err(LinkError::Timeout);
            }
            Err(err) => return Err(err.into()),
        };
        let reply = String::from_utf8_lossy(&buf[..len]).trim().to_string();
        if reply == "ok" {
            Ok(())
        } else {
            Err(LinkError::Rejected(reply))
        }
    }

    // `rc` datagrams get no reply per the SDK.
    fn send_rc(&mut self) -> Result<(), LinkError> {
        let socket = self.command_socket.as_ref().ok_or(LinkError::NotConnected)?;
        let [lr, fb, ud, yaw] = self.rc;
        socket.send(format!("rc {lr} {fb} {ud} {yaw}").as_bytes())?;
        Ok(())
    }

    fn start_listener(&mut self) {
        let socket = match UdpSocket::bind(STATE_BIND_ADDR) {
            Ok(socket) => socket,
            Err(err) => {
                // Telemetry is best-effort; the command channel still works.
                log::warn!("state socket bind failed, telemetry disabled: {err}");
                return;
            }
        };
        if let Err(err) = socket.set_read_timeout(Some(STATE_POLL_TIMEOUT)) {
            log::warn!("state socket setup failed, telemetry disabled: {err}");
            return;
        }

        let (tx, rx) = mpsc::channel();
        let shared = self.shared.clone();
        self.listener_thread = Some(std::thread::spawn(move || {
            listener_loop(socket, shared, rx);
        }));
        self.to_listener_tx = Some(tx);
    }

    fn stop_listener(&mut self) {
        if let Some(tx) = self.to_listener_tx.take() {
            let _ = tx.send(ListenerCommand::Stop);
        }
        if let Some(handle) = self.listener_thread.take() {
            let _ = handle.join();
        }
    }
}

fn listener_loop(
    socket: UdpSocket,
    shared: Arc<RwLock<SharedState>>,
    rx: mpsc::Receiver<ListenerCommand>,
) {
    let mut buf = [0u8; 1024];
    loop {
        match rx.try_recv() {
            Ok(ListenerCommand::Stop) | Err(mpsc::TryRecvError::Disconnected) => return,
            Err(mpsc::TryRecvError::Empty) => {}
        }
        let len = match socket.recv(&mut buf) {
            Ok(len) => len,
            Err(err) if matches!(err.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => {
                continue;
            }
            Err(err) => {
                log::warn!("state receive failed: {err}");
                std::thread::sleep(Duration::from_secs(3));
                continue;
            }
        };
        let report = parse_state(&String::from_utf8_lossy(&buf[..len]));
        let mut shared = shared.write().unwrap();
        if report.battery.is_some() {
            shared.battery = report.battery;
        }
        if report.height_dm.is_some() {
            shared.height_dm = report.height_dm;
        }
    }
}

impl DroneLink for TelloLink {
    fn connect(&mut self) -> Result<(), LinkError> {
        let socket = UdpSocket::bind("0.0.0.0:0")?;
        socket.connect(&self.drone_addr)?;
        socket.set_read_timeout(Some(REPLY_TIMEOUT))?;
        self.command_socket = Some(socket);

        // Switch the drone into SDK mode before anything else.
        self.send_expect_ok("command")?;
        self.start_listener();
        log::info!("connected to drone at {}", self.drone_addr);
        Ok(())
    }

    fn disconnect(&mut self) {
        self.stop_listener();
        self.command_socket = None;
        self.rc = [0; 4];
        log::info!("drone link closed");
    }

    fn take_off(&mut self) -> Result<(), LinkError> {
        self.send_expect_ok("takeoff")?;
        self.shared.write().unwrap().flying = true;
        Ok(())
    }

    fn land(&mut self) -> Result<(), LinkError> {
        self.send_expect_ok("land")?;
        self.shared.write().unwrap().flying = false;
        Ok(())
    }

    fn hover(&mut self) -> Result<(), LinkError> {
        self.rc = [0; 4];
        self.send_rc()?;
        self.send_expect_ok("stop")
    }

    fn update_sticks(&mut self, sticks: StickFrame) -> Result<(), LinkError> {
        self.rc = [
            rc_channel(sticks.roll),
            rc_channel(sticks.pitch),
            rc_channel(sticks.throttle),
            rc_channel(sticks.yaw),
        ];
        self.send_rc()
    }

    fn steer(&mut self, command: AxisCommand) -> Result<(), LinkError> {
        let magnitude = command.magnitude.min(100) as i8;
        let (channel, value) = match command.direction {
            Direction::Right => (0, magnitude),
            Direction::Left => (0, -magnitude),
            Direction::Forward => (1, magnitude),
            Direction::Backward => (1, -magnitude),
            Direction::Up => (2, magnitude),
            Direction::Down => (2, -magnitude),
            Direction::Clockwise => (3, magnitude),
            Direction::CounterClockwise => (3, -magnitude),
        };
        self.rc[channel] = value;
        self.send_rc()
    }

    fn telemetry(&self) -> FlightTelemetry {
        let shared = self.shared.read().unwrap();
        let battery = shared.battery.unwrap_or(100);
        FlightTelemetry {
            // Reported height is fresher than our ack-derived flag.
            flying: match shared.height_dm {
                Some(height) => height > 0,
                None => shared.flying,
            },
            battery_low: battery <= BATTERY_LOW_PCT,
            battery_critical: battery <= BATTERY_CRITICAL_PCT,
        }
    }
}

/// Rescale a packed stick value to the -100..=100 `rc` channel range.
fn rc_channel(value: i16) -> i8 {
    (value as i32 * 100 / i16::MAX as i32) as i8
}
