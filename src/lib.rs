pub mod config;
pub mod engine;
pub mod events;
pub mod grid;
pub mod io;
pub mod noise;
pub mod pace;
pub mod pattern;
pub mod render;
pub mod rule_set;

pub type ScreenSize = u16;
