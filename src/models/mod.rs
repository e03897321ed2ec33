// Module exports for models

pub mod event;
pub mod faculty;
pub mod room;
pub mod settings;
pub mod time_slot;
