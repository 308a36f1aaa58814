use std::time::{Duration, Instant};

use remote::{Controller, StickEncoding, TouchPhase, Viewport};
use tello_link::TelloLink;

use crate::accel::AccelFeed;

// Matches the accelerometer sample period.
const UPDATE_PERIOD: Duration = Duration::from_millis(20);

pub struct TouchApp {
    controller: Controller<TelloLink>,
    accel: AccelFeed,
    touch_down: bool,
}

impl TouchApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let mut controller = Controller::new(TelloLink::new(), StickEncoding::Split);
        controller.on_visible();

        let mut accel = AccelFeed::new();
        accel.start();

        TouchApp {
            controller,
            accel,
            touch_down: false,
        }
    }

    fn handle_pointer(&mut self, ctx: &egui::Context) {
        let (down, pos, rect) = ctx.input(|i| {
            (
                i.pointer.primary_down(),
                i.pointer.interact_pos(),
                i.screen_rect(),
            )
        });
        let viewport = Viewport {
            width: rect.width(),
            height: rect.height(),
        };
        match (self.touch_down, down, pos) {
            (false, true, Some(pos)) => {
                self.touch_down = true;
                self.controller
                    .on_touch(TouchPhase::Began, pos.x, pos.y, viewport);
            }
            (true, true, Some(pos)) => {
                self.controller
                    .on_touch(TouchPhase::Moved, pos.x, pos.y, viewport);
            }
            (true, false, _) => {
                self.touch_down = false;
                self.controller.on_touch(TouchPhase::Ended, 0.0, 0.0, viewport);
            }
            _ => {}
        }
    }

    fn background_color(&self) -> egui::Color32 {
        let telemetry = self.controller.telemetry();
        if telemetry.battery_critical {
            egui::Color32::from_rgb(128, 0, 0)
        } else if telemetry.battery_low {
            egui::Color32::from_rgb(128, 128, 0)
        } else if telemetry.flying || self.controller.is_flying() {
            egui::Color32::from_rgb(0, 64, 0)
        } else {
            egui::Color32::from_rgb(0, 0, 64)
        }
    }

    fn draw_crosshair(&self, ui: &egui::Ui) {
        let rect = ui.max_rect();
        let center = rect.center();
        let half = 0.25 * rect.width().min(rect.height());
        let horizontal = [
            egui::pos2(center.x - half, center.y),
            egui::pos2(center.x + half, center.y),
        ];
        let vertical = [
            egui::pos2(center.x, center.y - half),
            egui::pos2(center.x, center.y + half),
        ];

        let painter = ui.painter();
        // Thick dark pass under a thin light one keeps it visible on any
        // background color.
        for stroke in [
            egui::Stroke::new(3.0, egui::Color32::BLACK),
            egui::Stroke::new(1.0, egui::Color32::WHITE),
        ] {
            painter.line_segment(horizontal, stroke);
            painter.line_segment(vertical, stroke);
        }
    }
}

impl eframe::App for TouchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.request_repaint_after(UPDATE_PERIOD);

        if let Some(sample) = self.accel.latest() {
            self.controller.on_accel(sample, Instant::now());
        }
        self.handle_pointer(ctx);

        egui::CentralPanel::default()
            .frame(egui::Frame::default().fill(self.background_color()))
            .show(ctx, |ui| {
                self.draw_crosshair(ui);
            });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.accel.stop();
        self.controller.on_hidden();
    }
}
