use egui::{Color32, Visuals};

use crate::models::event::SessionKind;
use crate::models::room::RoomCategory;
use crate::services::advisor::LoadLevel;

pub(crate) fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

fn blend(a: Color32, b: Color32, t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let lerp = |c1: u8, c2: u8| -> u8 { ((c1 as f32 * (1.0 - t)) + (c2 as f32 * t)).round() as u8 };
    Color32::from_rgb(lerp(a.r(), b.r()), lerp(a.g(), b.g()), lerp(a.b(), b.b()))
}

#[derive(Clone, Copy)]
pub(crate) struct RoomGridPalette {
    pub is_dark: bool,
    pub lecture_bg: Color32,
    pub lab_bg: Color32,
    pub header_bg: Color32,
    pub header_text: Color32,
    pub hour_line: Color32,
    pub slot_line: Color32,
    pub divider: Color32,
    pub hover_overlay: Color32,
    pub drop_highlight: Color32,
    pub time_label: Color32,
    /// Outline for sessions sitting in the wrong kind of room.
    pub mismatch: Color32,
}

impl RoomGridPalette {
    pub fn from_visuals(visuals: &Visuals) -> Self {
        let base = visuals.extreme_bg_color;
        let border = visuals.widgets.noninteractive.bg_stroke.color;
        let accent = visuals.selection.bg_fill;
        Self {
            is_dark: visuals.dark_mode,
            lecture_bg: base,
            lab_bg: blend(base, Color32::from_rgb(120, 170, 140), 0.08),
            header_bg: visuals.faint_bg_color,
            header_text: visuals.strong_text_color(),
            hour_line: border,
            slot_line: with_alpha(border, 110),
            divider: with_alpha(border, 220),
            hover_overlay: with_alpha(accent, if visuals.dark_mode { 80 } else { 50 }),
            drop_highlight: with_alpha(accent, 140),
            time_label: Color32::GRAY,
            mismatch: Color32::from_rgb(220, 90, 60),
        }
    }

    pub fn room_bg(&self, category: Option<RoomCategory>) -> Color32 {
        match category {
            Some(RoomCategory::Lab) => self.lab_bg,
            _ => self.lecture_bg,
        }
    }
}

pub(crate) fn session_color(kind: SessionKind) -> Color32 {
    match kind {
        SessionKind::Lecture => Color32::from_rgb(100, 150, 200),
        SessionKind::Laboratory => Color32::from_rgb(90, 160, 110),
    }
}

pub(crate) fn load_color(level: LoadLevel, is_dark: bool) -> Color32 {
    if is_dark {
        match level {
            LoadLevel::Green => Color32::from_rgb(100, 220, 120),
            LoadLevel::Yellow => Color32::from_rgb(255, 200, 80),
            LoadLevel::Red => Color32::from_rgb(255, 120, 120),
        }
    } else {
        match level {
            LoadLevel::Green => Color32::from_rgb(30, 120, 50),
            LoadLevel::Yellow => Color32::from_rgb(150, 100, 0),
            LoadLevel::Red => Color32::from_rgb(180, 40, 40),
        }
    }
}
