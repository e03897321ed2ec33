// Utility modules
// Time-of-day grammar and period arithmetic shared by the grid, loads and advisor

pub mod period;
pub mod time;
