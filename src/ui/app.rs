use chrono::{Datelike, Local, Weekday};
use eframe::egui;

use crate::schedule::{layout_entries, EntryLayout, ScheduleSet};
use super::views;

pub struct TimetableApp {
    layouts: Vec<EntryLayout>,
    font_range: (f32, f32),
    today: Weekday,
}

impl TimetableApp {
    pub fn new(cc: &eframe::CreationContext<'_>, set: &ScheduleSet, font_range: (f32, f32)) -> Self {
        super::setup_theme(&cc.egui_ctx);

        let layouts = layout_entries(set);
        tracing::info!(entries = set.len(), drawn = layouts.len(), "opening timetable window");

        Self {
            layouts,
            font_range,
            today: Local::now().weekday(),
        }
    }
}

impl eframe::App for TimetableApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let (bg, _, _) = super::theme::grid_colors();
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(bg))
            .show(ctx, |ui| {
                views::render_timetable(ui, &self.layouts, self.font_range, Some(self.today));
            });
    }
}
