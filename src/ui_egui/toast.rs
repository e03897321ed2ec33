//! Toast rendering for the notice board.
//!
//! Notices are posted by the service layer; this module only decides how they
//! look. They stack upward from the bottom-right corner and fade out.

use egui::{Color32, Context, Pos2, RichText};

use crate::services::notice::{NoticeBoard, NoticeLevel};

const TOAST_WIDTH: f32 = 320.0;
const TOAST_HEIGHT: f32 = 40.0;
const MARGIN: f32 = 10.0;
const SPACING: f32 = 5.0;

pub fn background_color(level: NoticeLevel, is_dark_theme: bool) -> Color32 {
    if is_dark_theme {
        match level {
            NoticeLevel::Success => Color32::from_rgb(30, 70, 40),
            NoticeLevel::Info => Color32::from_rgb(30, 50, 80),
            NoticeLevel::Warning => Color32::from_rgb(80, 60, 20),
            NoticeLevel::Error => Color32::from_rgb(80, 30, 30),
        }
    } else {
        match level {
            NoticeLevel::Success => Color32::from_rgb(220, 255, 220),
            NoticeLevel::Info => Color32::from_rgb(220, 235, 255),
            NoticeLevel::Warning => Color32::from_rgb(255, 245, 200),
            NoticeLevel::Error => Color32::from_rgb(255, 220, 220),
        }
    }
}

pub fn text_color(level: NoticeLevel, is_dark_theme: bool) -> Color32 {
    if is_dark_theme {
        match level {
            NoticeLevel::Success => Color32::from_rgb(100, 220, 120),
            NoticeLevel::Info => Color32::from_rgb(100, 180, 255),
            NoticeLevel::Warning => Color32::from_rgb(255, 200, 80),
            NoticeLevel::Error => Color32::from_rgb(255, 120, 120),
        }
    } else {
        match level {
            NoticeLevel::Success => Color32::from_rgb(30, 120, 50),
            NoticeLevel::Info => Color32::from_rgb(30, 80, 150),
            NoticeLevel::Warning => Color32::from_rgb(150, 100, 0),
            NoticeLevel::Error => Color32::from_rgb(180, 40, 40),
        }
    }
}

fn fade(color: Color32, max_alpha: f32, opacity: f32) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), (max_alpha * opacity) as u8)
}

/// Drop expired notices and draw the rest.
pub fn render_notices(ctx: &Context, notices: &mut NoticeBoard, is_dark_theme: bool) {
    notices.cleanup();
    if !notices.has_notices() {
        return;
    }

    // Keep repainting while anything is fading.
    ctx.request_repaint();

    let screen_rect = ctx.screen_rect();

    for (i, notice) in notices.notices().iter().enumerate() {
        let opacity = notice.opacity();
        if opacity <= 0.0 {
            continue;
        }

        let y_offset = (i as f32) * (TOAST_HEIGHT + SPACING);
        let pos = Pos2::new(
            screen_rect.right() - TOAST_WIDTH - MARGIN,
            screen_rect.bottom() - TOAST_HEIGHT - MARGIN - y_offset,
        );

        egui::Area::new(egui::Id::new(("notice_toast", i)))
            .fixed_pos(pos)
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                let bg = fade(background_color(notice.level, is_dark_theme), 230.0, opacity);
                let fg = fade(text_color(notice.level, is_dark_theme), 255.0, opacity);

                egui::Frame::none()
                    .fill(bg)
                    .rounding(6.0)
                    .inner_margin(egui::Margin::symmetric(12.0, 8.0))
                    .stroke(egui::Stroke::new(1.0, fg.gamma_multiply(0.3)))
                    .show(ui, |ui| {
                        ui.set_min_width(TOAST_WIDTH - 24.0);
                        ui.horizontal(|ui| {
                            ui.label(RichText::new(notice.level.icon()).color(fg).strong());
                            ui.label(RichText::new(&notice.message).color(fg));
                        });
                    });
            });
    }
}
