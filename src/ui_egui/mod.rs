mod app;
pub mod toast;
pub mod views;

pub use app::SchedulerApp;
