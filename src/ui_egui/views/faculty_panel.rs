//! Side panel with faculty teaching loads and advisory conflicts.

use egui::RichText;

use super::palette::load_color;
use crate::services::advisor::{ConflictKind, ScheduleConflict};
use crate::services::load::FacultyLoad;

pub fn render_faculty_panel(
    ui: &mut egui::Ui,
    loads: &[FacultyLoad],
    conflicts: &[ScheduleConflict],
    unplaced: usize,
    is_dark: bool,
) {
    ui.label(RichText::new("👥 Faculty Load").strong());
    ui.add_space(4.0);

    if loads.is_empty() {
        ui.label(RichText::new("No faculty loaded").weak().italics());
    } else {
        egui::ScrollArea::vertical()
            .max_height(260.0)
            .id_source("faculty_load_scroll")
            .show(ui, |ui| {
                egui::Grid::new("faculty_load_grid")
                    .num_columns(2)
                    .striped(true)
                    .show(ui, |ui| {
                        for load in loads {
                            ui.label(&load.name);
                            ui.label(
                                RichText::new(format!("{:.1}", load.units))
                                    .color(load_color(load.level, is_dark))
                                    .strong(),
                            )
                            .on_hover_text(format!("Load level: {}", load.level.as_str()));
                            ui.end_row();
                        }
                    });
            });
    }

    ui.add_space(8.0);
    ui.separator();
    ui.label(RichText::new("⚠ Conflicts").strong());
    ui.add_space(4.0);

    if conflicts.is_empty() {
        ui.label(RichText::new("No overlapping sessions").weak().italics());
    } else {
        egui::ScrollArea::vertical()
            .max_height(200.0)
            .id_source("conflict_scroll")
            .show(ui, |ui| {
                for conflict in conflicts {
                    ui.label(RichText::new(describe_conflict(conflict)).small());
                }
            });
    }

    if unplaced > 0 {
        ui.add_space(8.0);
        ui.label(
            RichText::new(format!("{} session(s) not shown on the grid", unplaced))
                .weak()
                .small(),
        );
    }
}

pub fn describe_conflict(conflict: &ScheduleConflict) -> String {
    let what = match conflict.kind {
        ConflictKind::Room => "Room",
        ConflictKind::Faculty => "Faculty",
    };
    format!(
        "{}: #{} and #{} overlap {} min on {}",
        what, conflict.first_id, conflict.second_id, conflict.overlap_minutes, conflict.day
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_conflict() {
        let conflict = ScheduleConflict {
            kind: ConflictKind::Faculty,
            first_id: "3".into(),
            second_id: "9".into(),
            day: "Monday".into(),
            overlap_minutes: 30,
        };
        assert_eq!(
            describe_conflict(&conflict),
            "Faculty: #3 and #9 overlap 30 min on Monday"
        );
    }
}
