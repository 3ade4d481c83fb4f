use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::{Local, Timelike};
use eframe::egui::{self, Color32, ComboBox, RichText, TextEdit, Ui};

use crate::alarm::config::{AlarmInput, AlarmMode, BlinkInterval, Rgb};
use crate::alarm::scheduler::{AlarmScheduler, AlarmState};
use crate::blink::BlinkController;

const STATUS_TTL: Duration = Duration::from_secs(4);
const ARMED_REPAINT_STEP: Duration = Duration::from_millis(100);

pub fn run_gui(initial: AlarmInput) -> Result<()> {
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("BlinkAlarm")
            .with_inner_size([420.0, 360.0])
            .with_min_inner_size([360.0, 320.0]),
        ..Default::default()
    };

    let app = BlinkAlarmApp::new(initial);

    eframe::run_native(
        "BlinkAlarm",
        native_options,
        Box::new(move |cc| {
            configure_theme(&cc.egui_ctx);
            Ok(Box::new(app))
        }),
    )
    .map_err(|err| anyhow::anyhow!("failed to launch BlinkAlarm GUI: {err}"))?;

    Ok(())
}

fn configure_theme(ctx: &egui::Context) {
    let mut visuals = egui::Visuals::dark();
    visuals.override_text_color = Some(Color32::from_rgb(228, 232, 240));
    visuals.panel_fill = Color32::from_rgb(18, 22, 30);
    visuals.window_fill = Color32::from_rgb(24, 28, 38);
    visuals.selection.bg_fill = Color32::from_rgb(64, 120, 180);
    ctx.set_visuals(visuals);
}

struct BlinkAlarmApp {
    scheduler: AlarmScheduler,
    blink: BlinkController,
    mode: AlarmMode,
    time_input: String,
    seconds_input: String,
    color: [u8; 3],
    interval: BlinkInterval,
    status_message: Option<(String, Instant)>,
}

impl BlinkAlarmApp {
    fn new(initial: AlarmInput) -> Self {
        Self {
            scheduler: AlarmScheduler::new(),
            blink: BlinkController::new(),
            mode: initial.mode,
            time_input: initial.time_text,
            seconds_input: initial.seconds_text,
            color: initial.color.to_array(),
            interval: initial.interval,
            status_message: None,
        }
    }

    fn set_status(&mut self, text: impl Into<String>) {
        self.status_message = Some((text.into(), Instant::now() + STATUS_TTL));
    }

    fn current_input(&self) -> AlarmInput {
        AlarmInput {
            mode: self.mode,
            time_text: self.time_input.clone(),
            seconds_text: self.seconds_input.clone(),
            color: Rgb::from_array(self.color),
            interval: self.interval,
        }
    }

    fn start_alarm(&mut self) {
        let input = self.current_input();
        match self.scheduler.start(&input, Local::now()) {
            Ok(fire_at) => {
                self.set_status(format!("Armed, fires at {}.", fire_at.format("%H:%M:%S")));
            }
            Err(err) => self.set_status(err.to_string()),
        }
    }

    /// Stop is shared by the Stop button and the alert window close; both
    /// paths are idempotent.
    fn stop_alarm(&mut self) {
        self.blink.stop();
        self.scheduler.cancel();
        self.set_status("Stopped.");
    }

    fn show_settings(&mut self, ui: &mut Ui) {
        let now_local = Local::now();
        ui.horizontal(|ui| {
            ui.label(
                RichText::new("BlinkAlarm")
                    .size(22.0)
                    .color(Color32::from_rgb(120, 205, 192))
                    .strong(),
            );
            ui.separator();
            ui.label(
                RichText::new(format!(
                    "{:02}:{:02}:{:02}",
                    now_local.hour(),
                    now_local.minute(),
                    now_local.second()
                ))
                .size(22.0)
                .color(Color32::from_rgb(255, 214, 117))
                .monospace(),
            );
        });
        ui.separator();

        let idle = self.scheduler.is_idle();
        ui.add_enabled_ui(idle, |ui| {
            ui.horizontal(|ui| {
                ui.radio_value(&mut self.mode, AlarmMode::AbsoluteTime, "On time (HH:MM:SS)");
                ui.add(TextEdit::singleline(&mut self.time_input).desired_width(90.0));
            });
            ui.horizontal(|ui| {
                ui.radio_value(
                    &mut self.mode,
                    AlarmMode::CountdownSeconds,
                    "Countdown (seconds)",
                );
                ui.add(TextEdit::singleline(&mut self.seconds_input).desired_width(90.0));
            });
            ui.horizontal(|ui| {
                ui.label("Blink color");
                ui.color_edit_button_srgb(&mut self.color);
                let [r, g, b] = self.color;
                ui.colored_label(
                    Color32::from_rgb(r, g, b),
                    RichText::new(format!("RGB: {r}, {g}, {b}")).monospace(),
                );
            });
            ui.horizontal(|ui| {
                ui.label("Blink speed");
                ComboBox::from_id_salt("blink_speed")
                    .selected_text(self.interval.label())
                    .show_ui(ui, |ui| {
                        for interval in BlinkInterval::ALL {
                            ui.selectable_value(&mut self.interval, interval, interval.label());
                        }
                    });
            });
        });

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            if ui
                .add_enabled(idle, egui::Button::new("Start"))
                .clicked()
            {
                self.start_alarm();
            }
            if ui
                .add_enabled(!idle, egui::Button::new("Stop"))
                .clicked()
            {
                self.stop_alarm();
            }
            if ui.button("Close").clicked() {
                ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });

        if let Some(remaining) = self.scheduler.remaining(now_local) {
            let total_secs = remaining.num_seconds().max(0);
            ui.label(
                RichText::new(format!(
                    "Fires in {:02}:{:02}:{:02}",
                    total_secs / 3600,
                    (total_secs % 3600) / 60,
                    total_secs % 60
                ))
                .color(Color32::from_rgb(108, 228, 138))
                .monospace(),
            );
        } else if matches!(self.scheduler.state(), AlarmState::Blinking) {
            ui.label(
                RichText::new("Alarm ringing")
                    .color(Color32::from_rgb(255, 124, 124))
                    .strong(),
            );
        }

        if let Some((msg, _)) = &self.status_message {
            ui.label(
                RichText::new(msg)
                    .color(Color32::from_rgb(255, 183, 95))
                    .strong(),
            );
        }
    }

    fn show_alert_viewport(&mut self, ctx: &egui::Context) {
        let Some(color) = self.blink.displayed_color() else {
            return;
        };
        let fill = Color32::from_rgb(color.r, color.g, color.b);

        let close_requested = ctx.show_viewport_immediate(
            egui::ViewportId::from_hash_of("blink_alert"),
            egui::ViewportBuilder::default()
                .with_title("Timer Alert")
                .with_inner_size([300.0, 200.0]),
            |ctx, _class| {
                egui::CentralPanel::default()
                    .frame(egui::Frame {
                        fill,
                        ..Default::default()
                    })
                    .show(ctx, |_ui| {});
                ctx.input(|i| i.viewport().close_requested())
            },
        );

        if close_requested {
            self.stop_alarm();
        }
    }
}

impl eframe::App for BlinkAlarmApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some((_, expires_at)) = &self.status_message
            && Instant::now() >= *expires_at
        {
            self.status_message = None;
        }

        if let Some((color, interval)) = self.scheduler.tick(Local::now()) {
            self.blink.start(color, interval, Instant::now());
            self.set_status("Alarm fired.");
        }
        self.blink.tick(Instant::now());

        egui::CentralPanel::default().show(ctx, |ui| self.show_settings(ui));

        self.show_alert_viewport(ctx);

        // Wake up for the nearest pending deadline; idle repaints stay
        // input-driven.
        if let Some(deadline) = self.blink.next_deadline() {
            ctx.request_repaint_after(deadline.saturating_duration_since(Instant::now()));
        } else if let Some(remaining) = self.scheduler.remaining(Local::now()) {
            let wait = remaining
                .to_std()
                .unwrap_or(Duration::ZERO)
                .min(ARMED_REPAINT_STEP);
            ctx.request_repaint_after(wait);
        } else if self.status_message.is_some() {
            ctx.request_repaint_after(STATUS_TTL);
        }
    }
}
