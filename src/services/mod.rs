// Service module exports

pub mod advisor;
pub mod bootstrap;
pub mod drag_drop;
pub mod grid;
pub mod load;
pub mod notice;
pub mod remote;
pub mod schedule;
pub mod settings;
