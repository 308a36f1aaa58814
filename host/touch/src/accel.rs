use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Arc, RwLock};
use std::thread::JoinHandle;
use std::time::Duration;

use remote::AccelSample;

const IIO_DEVICE: &str = "/sys/bus/iio/devices/iio:device0";
const SAMPLE_PERIOD: Duration = Duration::from_millis(20);
const RETRY_BACKOFF: Duration = Duration::from_secs(3);

enum FeedCommand {
    Stop,
}

/// Accelerometer feed from the Linux IIO sysfs interface.
///
/// A worker thread samples the device every 20 ms and keeps only the latest
/// reading; the UI thread picks it up on its own cadence.
pub struct AccelFeed {
    device: PathBuf,
    sample: Arc<RwLock<Option<AccelSample>>>,
    to_worker_tx: Option<mpsc::Sender<FeedCommand>>,
    worker_thread: Option<JoinHandle<()>>,
}

impl AccelFeed {
    pub fn new() -> Self {
        Self::with_device(IIO_DEVICE)
    }

    pub fn with_device(device: impl Into<PathBuf>) -> Self {
        AccelFeed {
            device: device.into(),
            sample: Arc::new(RwLock::new(None)),
            to_worker_tx: None,
            worker_thread: None,
        }
    }

    pub fn latest(&self) -> Option<AccelSample> {
        *self.sample.read().unwrap()
    }

    pub fn start(&mut self) {
        let (tx, rx) = mpsc::channel();
        let device = self.device.clone();
        let sample = self.sample.clone();
        self.worker_thread = Some(std::thread::spawn(move || worker_loop(device, sample, rx)));
        self.to_worker_tx = Some(tx);
    }

    pub fn stop(&mut self) {
        if let Some(tx) = self.to_worker_tx.take() {
            let _ = tx.send(FeedCommand::Stop);
        }
        if let Some(handle) = self.worker_thread.take() {
            let _ = handle.join();
        }
    }
}

fn worker_loop(
    device: PathBuf,
    sample: Arc<RwLock<Option<AccelSample>>>,
    rx: mpsc::Receiver<FeedCommand>,
) {
    loop {
        match rx.try_recv() {
            Ok(FeedCommand::Stop) | Err(mpsc::TryRecvError::Disconnected) => return,
            Err(mpsc::TryRecvError::Empty) => {}
        }
        match read_sample(&device) {
            Ok(reading) => {
                *sample.write().unwrap() = Some(reading);
                std::thread::sleep(SAMPLE_PERIOD);
            }
            Err(err) => {
                log::warn!("accelerometer read failed: {err}");
                std::thread::sleep(RETRY_BACKOFF);
            }
        }
    }
}

fn read_sample(device: &Path) -> std::io::Result<AccelSample> {
    // Raw counts times the device scale gives m/s².
    let scale = read_value(&device.join("in_accel_scale"))?;
    Ok(AccelSample {
        x: scale * read_value(&device.join("in_accel_x_raw"))?,
        y: scale * read_value(&device.join("in_accel_y_raw"))?,
        z: scale * read_value(&device.join("in_accel_z_raw"))?,
    })
}

fn read_value(path: &Path) -> std::io::Result<f32> {
    let text = fs::read_to_string(path)?;
    text.trim().parse().map_err(|err| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("{}: {err}", path.display()),
        )
    })
}
