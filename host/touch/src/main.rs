use app::TouchApp;

mod accel;
mod app;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "tilt-remote",
        options,
        Box::new(|cc| Ok(Box::new(TouchApp::new(cc)))),
    )
    .map_err(|err| anyhow::anyhow!("host runtime exited with error: {err}"))
}
