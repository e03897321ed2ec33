pub mod faculty_panel;
mod palette;
pub mod room_grid;

pub(crate) use palette::RoomGridPalette;
