//! Room x time-slot grid for a single day.
//!
//! Rooms run across, 30-minute slots run down. Each placed event is painted as
//! one block from its start cell over its span. Grabbing any cell of a block
//! starts a drag; releasing over a cell yields a [`DropTarget`] for the caller
//! to submit.

use std::collections::HashSet;

use egui::{pos2, vec2, Align2, CursorIcon, FontId, Pos2, Rect, Rounding, Sense, Stroke};

use super::palette::{session_color, with_alpha, RoomGridPalette};
use crate::models::event::ScheduleEvent;
use crate::models::room::RoomAxis;
use crate::models::time_slot::TimeSlot;
use crate::services::advisor::room_category_matches;
use crate::services::drag_drop::{DragDropController, DropTarget};
use crate::services::grid::{CellKey, OccupancyGrid};
use crate::services::load::compute_event_units;
use crate::utils::time::MINUTES_PER_HOUR;

pub const SLOT_HEIGHT: f32 = 26.0;
pub const TIME_LABEL_WIDTH: f32 = 72.0;
pub const HEADER_HEIGHT: f32 = 28.0;
pub const MIN_COLUMN_WIDTH: f32 = 110.0;

/// What happened in the grid this frame.
#[derive(Debug, Default)]
pub struct GridInteraction {
    pub drop: Option<DropTarget>,
    pub hovered: Option<CellKey>,
}

struct GridGeometry {
    area: Rect,
    col_width: f32,
}

impl GridGeometry {
    fn cell_rect(&self, slot: usize, room: usize) -> Rect {
        Rect::from_min_size(
            pos2(
                self.area.left() + TIME_LABEL_WIDTH + room as f32 * self.col_width,
                self.area.top() + HEADER_HEIGHT + slot as f32 * SLOT_HEIGHT,
            ),
            vec2(self.col_width, SLOT_HEIGHT),
        )
    }

    fn header_rect(&self, room: usize) -> Rect {
        Rect::from_min_size(
            pos2(
                self.area.left() + TIME_LABEL_WIDTH + room as f32 * self.col_width,
                self.area.top(),
            ),
            vec2(self.col_width, HEADER_HEIGHT),
        )
    }

    /// Block covering `span` slots from `key`, clipped to the last slot.
    fn block_rect(&self, key: CellKey, span: usize, slot_count: usize) -> Rect {
        let last = (key.slot + span.max(1)).min(slot_count).saturating_sub(1);
        let top = self.cell_rect(key.slot, key.room);
        let bottom = self.cell_rect(last.max(key.slot), key.room);
        Rect::from_min_max(top.min, bottom.max).shrink(1.5)
    }
}

#[allow(clippy::too_many_arguments)]
pub fn render_room_grid(
    ui: &mut egui::Ui,
    grid: &OccupancyGrid<'_>,
    rooms: &RoomAxis,
    slots: &[TimeSlot],
    day: &str,
    split_codes: &HashSet<String>,
    controller: &mut DragDropController,
    palette: &RoomGridPalette,
) -> GridInteraction {
    let mut interaction = GridInteraction::default();
    if rooms.is_empty() || slots.is_empty() {
        ui.label("No rooms or time slots configured.");
        return interaction;
    }

    let room_count = rooms.len();
    let col_width = ((ui.available_width() - TIME_LABEL_WIDTH) / room_count as f32).max(MIN_COLUMN_WIDTH);
    let size = vec2(
        TIME_LABEL_WIDTH + col_width * room_count as f32,
        HEADER_HEIGHT + SLOT_HEIGHT * slots.len() as f32,
    );
    let (area, _) = ui.allocate_exact_size(size, Sense::hover());
    let geometry = GridGeometry { area, col_width };
    let painter = ui.painter_at(area);
    let pointer = ui.input(|i| i.pointer.hover_pos());

    // Room headers
    for (room_idx, name) in rooms.names().enumerate() {
        let rect = geometry.header_rect(room_idx);
        painter.rect_filled(rect, 0.0, palette.header_bg);
        painter.text(
            rect.center(),
            Align2::CENTER_CENTER,
            name,
            FontId::proportional(12.0),
            palette.header_text,
        );
    }

    let mut drag_stopped = false;

    for (slot_idx, slot) in slots.iter().enumerate() {
        let is_hour_start = slot.minutes % MINUTES_PER_HOUR == 0;
        let row_top = area.top() + HEADER_HEIGHT + slot_idx as f32 * SLOT_HEIGHT;

        if is_hour_start {
            painter.text(
                pos2(area.left() + TIME_LABEL_WIDTH - 6.0, row_top + SLOT_HEIGHT / 2.0),
                Align2::RIGHT_CENTER,
                &slot.label,
                FontId::proportional(11.0),
                palette.time_label,
            );
        }

        for room_idx in 0..room_count {
            let rect = geometry.cell_rect(slot_idx, room_idx);
            painter.rect_filled(rect, 0.0, palette.room_bg(rooms.category(room_idx)));

            let line_color = if is_hour_start {
                palette.hour_line
            } else {
                palette.slot_line
            };
            painter.line_segment(
                [rect.left_top(), rect.right_top()],
                Stroke::new(1.0, line_color),
            );
            painter.line_segment(
                [rect.right_top(), rect.right_bottom()],
                Stroke::new(1.0, palette.divider),
            );

            let id = ui.id().with(("room_grid_cell", day, slot_idx, room_idx));
            let response = ui.interact(rect, id, Sense::click_and_drag());

            if pointer.map_or(false, |pos| rect.contains(pos)) {
                interaction.hovered = Some(CellKey::new(slot_idx, room_idx));
            }

            if response.drag_started() {
                if let Some(record) = grid.cell(slot_idx, room_idx) {
                    match controller.begin(record.event) {
                        Ok(()) => ui.ctx().set_cursor_icon(CursorIcon::Grabbing),
                        Err(err) => log::warn!("Cannot start drag: {}", err),
                    }
                }
            }
            if response.drag_stopped() {
                drag_stopped = true;
            }

            if controller.is_dragging() {
                if response.dragged() {
                    ui.ctx().set_cursor_icon(CursorIcon::Grabbing);
                }
            } else if let Some(record) = grid.cell(slot_idx, room_idx) {
                if response.hovered() {
                    ui.ctx().set_cursor_icon(CursorIcon::Grab);
                }
                response.on_hover_text(format_event_tooltip(record.event));
            }
        }
    }

    // Event blocks
    let held_id = controller.held().map(|held| held.schedule_id.clone());
    for (key, record) in grid.starts() {
        let rect = geometry.block_rect(key, record.span, slots.len());
        let is_held = held_id.as_deref() == Some(record.event.schedule_id.as_str());
        paint_event_block(&painter, rect, record.event, split_codes, is_held);
        if room_category_matches(record.event, rooms, key.room) == Some(false) {
            painter.rect_stroke(rect, Rounding::same(3.0), Stroke::new(2.0, palette.mismatch));
        }
    }

    // Drop highlight
    if controller.is_dragging() {
        if let Some(key) = interaction.hovered {
            let rect = geometry.cell_rect(key.slot, key.room);
            painter.rect_filled(rect, 0.0, palette.hover_overlay);
            painter.rect_stroke(rect, 0.0, Stroke::new(2.0, palette.drop_highlight));
        }
        if let (Some(pos), Some(held)) = (pointer, controller.held()) {
            paint_drag_ghost(ui, pos, &held.course_code);
        }
    }

    // Release: anywhere over the grid drops on the hovered cell, outside cancels.
    let released = drag_stopped || ui.input(|i| i.pointer.any_released());
    if released && controller.is_dragging() {
        match interaction.hovered.and_then(|key| drop_target(key, rooms, slots, day)) {
            Some(target) => interaction.drop = Some(target),
            None => {
                if let Some(held) = controller.cancel() {
                    log::debug!("Drag of event {} released outside the grid", held.schedule_id);
                }
            }
        }
    }

    interaction
}

fn drop_target(key: CellKey, rooms: &RoomAxis, slots: &[TimeSlot], day: &str) -> Option<DropTarget> {
    let room = rooms.name(key.room)?;
    let slot = slots.get(key.slot)?;
    Some(DropTarget::new(room, day, slot.clone()))
}

fn paint_event_block(
    painter: &egui::Painter,
    rect: Rect,
    event: &ScheduleEvent,
    split_codes: &HashSet<String>,
    is_held: bool,
) {
    let base_color = session_color(event.session);
    let fill = if is_held {
        with_alpha(base_color, 90)
    } else {
        base_color
    };
    painter.rect_filled(rect, Rounding::same(3.0), fill);

    let text_color = if is_held {
        with_alpha(egui::Color32::WHITE, 160)
    } else {
        egui::Color32::WHITE
    };
    painter.text(
        rect.left_top() + vec2(5.0, 4.0),
        Align2::LEFT_TOP,
        event.display_code(split_codes),
        FontId::proportional(11.0),
        text_color,
    );

    if rect.height() > SLOT_HEIGHT {
        let section = format!("{} {}-{}", event.program, event.year, event.block);
        painter.text(
            rect.left_top() + vec2(5.0, 18.0),
            Align2::LEFT_TOP,
            section,
            FontId::proportional(10.0),
            text_color,
        );
    }
}

fn paint_drag_ghost(ui: &egui::Ui, pointer: Pos2, label: &str) {
    let painter = ui.ctx().layer_painter(egui::LayerId::new(
        egui::Order::Tooltip,
        egui::Id::new("room_grid_drag_ghost"),
    ));
    let rect = Rect::from_min_size(pointer + vec2(12.0, 8.0), vec2(90.0, 22.0));
    painter.rect_filled(rect, Rounding::same(3.0), with_alpha(egui::Color32::from_rgb(100, 150, 200), 200));
    painter.text(
        rect.center(),
        Align2::CENTER_CENTER,
        label,
        FontId::proportional(11.0),
        egui::Color32::WHITE,
    );
}

pub fn format_event_tooltip(event: &ScheduleEvent) -> String {
    let mut lines = vec![format!("{} ({})", event.course_code, event.session.as_str())];
    if !event.title.is_empty() {
        lines.push(event.title.clone());
    }
    lines.push(format!("{} {}-{}", event.program, event.year, event.block));
    lines.push(format!("{} {}", event.day, event.period));
    lines.push(format!("Room: {}", event.room));
    lines.push(format!("Units: {:.1}", compute_event_units(event)));
    if let Some(faculty) = &event.faculty {
        lines.push(format!("Faculty: {}", faculty));
    }
    lines.join("\n")
}
