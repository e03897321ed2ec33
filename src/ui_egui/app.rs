use egui::RichText;

use crate::models::event::split_course_codes;
use crate::models::faculty::Faculty;
use crate::models::settings::AppConfig;
use crate::models::time_slot::TimeSlot;
use crate::services::advisor::{find_faculty_conflicts, find_room_conflicts};
use crate::services::bootstrap::{GridConfig, CONFIG_LOAD_FAILURE_MESSAGE};
use crate::services::drag_drop::{DragDropController, DropOutcome, DropTarget};
use crate::services::grid::OccupancyGrid;
use crate::services::load::faculty_load_summary;
use crate::services::notice::NoticeBoard;
use crate::services::remote::{AuthorityWorker, ScheduleAuthority};
use crate::services::schedule::ScheduleMirror;
use crate::ui_egui::toast::render_notices;
use crate::ui_egui::views::faculty_panel::render_faculty_panel;
use crate::ui_egui::views::room_grid::render_room_grid;
use crate::ui_egui::views::RoomGridPalette;
use crate::utils::time::format_time;

pub struct SchedulerApp {
    backend_url: String,
    default_day: Option<String>,
    /// Set until the start-up data arrives from the worker.
    loading: bool,
    grid_config: GridConfig,
    /// Regenerated only when the window changes, which happens once after start-up.
    slots: Vec<TimeSlot>,
    selected_day: Option<String>,
    mirror: ScheduleMirror,
    faculty: Vec<Faculty>,
    controller: DragDropController,
    notices: NoticeBoard,
    worker: AuthorityWorker,
    /// Overrides submitted but not yet answered.
    pending: usize,
    show_faculty_panel: bool,
}

impl SchedulerApp {
    /// Hand `authority` to a background worker and start loading from it.
    /// The grid shows the configured fallback window until the data arrives.
    pub fn new<A>(cc: &eframe::CreationContext<'_>, config: AppConfig, authority: A) -> Self
    where
        A: ScheduleAuthority + Send + 'static,
    {
        let repaint_ctx = cc.egui_ctx.clone();
        let worker = AuthorityWorker::spawn(authority, move || repaint_ctx.request_repaint());

        let mut notices = NoticeBoard::new();
        let loading = match worker.load_initial(config.clone()) {
            Ok(()) => true,
            Err(err) => {
                log::error!("Cannot start loading the schedule: {}", err);
                notices.error(CONFIG_LOAD_FAILURE_MESSAGE);
                false
            }
        };

        let refresh_ctx = cc.egui_ctx.clone();
        let controller = DragDropController::new().with_refresh_hook(move |event| {
            log::debug!("Refreshing grid after event {} moved", event.schedule_id);
            refresh_ctx.request_repaint();
        });

        let grid_config = GridConfig::fallback(&config);
        Self {
            backend_url: config.backend_url,
            default_day: config.default_day,
            loading,
            slots: grid_config.slots(),
            grid_config,
            selected_day: None,
            mirror: ScheduleMirror::default(),
            faculty: Vec::new(),
            controller,
            notices,
            worker,
            pending: 0,
            show_faculty_panel: true,
        }
    }

    fn apply_initial_load(&mut self) {
        let Some(loaded) = self.worker.poll_initial() else {
            return;
        };
        self.loading = false;

        let data = loaded.data;
        self.selected_day = data.grid.initial_day(self.default_day.as_deref());
        self.slots = data.grid.slots();
        self.grid_config = data.grid;
        self.mirror = data.schedule;
        self.faculty = data.faculty;
        self.notices.extend(loaded.notices);
    }

    /// Fold in every override answer that arrived since the last frame.
    fn apply_completions(&mut self) {
        for completion in self.worker.poll() {
            self.pending = self.pending.saturating_sub(1);
            self.controller.resolve(
                &mut self.mirror,
                &mut self.notices,
                &completion.request,
                completion.result,
            );
        }
    }

    fn submit_drop(&mut self, target: DropTarget) {
        let request = match self.controller.drop_on(&target) {
            DropOutcome::Submit(request) => request,
            DropOutcome::Cancelled | DropOutcome::NothingHeld => return,
        };

        match self.worker.submit(request.clone()) {
            Ok(()) => self.pending += 1,
            Err(err) => {
                self.controller
                    .resolve(&mut self.mirror, &mut self.notices, &request, Err(err));
            }
        }
    }

    fn render_toolbar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("🏫 Room Schedule").strong());
                ui.separator();

                if self.loading {
                    ui.spinner();
                    ui.label(RichText::new("Loading schedule...").weak().italics());
                } else if self.grid_config.days.is_empty() {
                    ui.label(RichText::new("No days configured").weak().italics());
                }
                for day in &self.grid_config.days {
                    let selected = self.selected_day.as_deref() == Some(day.as_str());
                    if ui.selectable_label(selected, day).clicked() && !selected {
                        log::debug!("Switched to {}", day);
                        self.selected_day = Some(day.clone());
                    }
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.checkbox(&mut self.show_faculty_panel, "Faculty panel");
                    let window = self.grid_config.window;
                    ui.label(
                        RichText::new(format!(
                            "{} - {}",
                            format_time(window.start_hour, 0),
                            format_time(window.end_hour, 0)
                        ))
                        .small()
                        .weak(),
                    );
                });
            });
        });
    }
}

impl eframe::App for SchedulerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_initial_load();
        self.apply_completions();

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            if let Some(held) = self.controller.cancel() {
                log::debug!("Drag of event {} cancelled", held.schedule_id);
            }
        }

        self.render_toolbar(ctx);

        let palette = RoomGridPalette::from_visuals(&ctx.style().visuals);
        let day = self.selected_day.clone().unwrap_or_default();
        let events = self.mirror.events();
        let grid = OccupancyGrid::build(events, &day, &self.grid_config.rooms, &self.slots);
        let split_codes = split_course_codes(events);

        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(24.0)
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(RichText::new(format!("{} sessions on {}", grid.starts().len(), day)).small());
                    if !grid.collisions().is_empty() {
                        ui.separator();
                        ui.label(
                            RichText::new(format!("{} overlapping cell(s)", grid.collisions().len()))
                                .small()
                                .color(palette.mismatch),
                        );
                    }
                    if self.pending > 0 {
                        ui.separator();
                        ui.label(RichText::new(format!("Saving {} move(s)...", self.pending)).small());
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(RichText::new(&self.backend_url).small().weak());
                        if self.controller.is_dragging() {
                            ui.label(RichText::new("Esc to cancel").small().weak());
                        }
                    });
                });
            });

        if self.show_faculty_panel {
            let loads = faculty_load_summary(&self.faculty, events);
            let mut conflicts = find_room_conflicts(events);
            conflicts.extend(find_faculty_conflicts(events));

            egui::SidePanel::right("faculty_panel")
                .default_width(260.0)
                .show(ctx, |ui| {
                    render_faculty_panel(ui, &loads, &conflicts, grid.unplaced().len(), palette.is_dark);
                });
        }

        let controller = &mut self.controller;
        let rooms = &self.grid_config.rooms;
        let slots = &self.slots;
        let interaction = egui::CentralPanel::default()
            .show(ctx, |ui| {
                egui::ScrollArea::both()
                    .id_source("room_grid_scroll")
                    .show(ui, |ui| {
                        render_room_grid(ui, &grid, rooms, slots, &day, &split_codes, controller, &palette)
                    })
                    .inner
            })
            .inner;
        drop(grid);

        if let Some(target) = interaction.drop {
            self.submit_drop(target);
        }

        render_notices(ctx, &mut self.notices, palette.is_dark);
    }
}
