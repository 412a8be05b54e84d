pub mod config;
pub mod game;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod renderer;
pub mod replay;
pub mod session;
pub mod terminal_runtime;
pub mod ticker;
pub mod ui;
