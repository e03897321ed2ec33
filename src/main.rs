// Room Scheduler Application
// Main entry point

use room_scheduler::services::remote::HttpAuthority;
use room_scheduler::services::settings::SettingsService;
use room_scheduler::ui_egui::SchedulerApp;

fn main() -> eframe::Result<()> {
    // Initialize logging
    env_logger::init();

    log::info!("Starting Room Scheduler");

    let settings = SettingsService::with_default_path();
    log::info!("Using configuration at {}", settings.path().display());
    let config = settings.load_or_default();

    let authority = match HttpAuthority::new(&config) {
        Ok(authority) => authority,
        Err(err) => {
            log::error!("Cannot reach schedule backend: {:#}", err);
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Room Scheduler")
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Room Scheduler",
        options,
        Box::new(move |cc| Ok(Box::new(SchedulerApp::new(cc, config, authority)))),
    )
}
