pub mod app;
pub mod grid;
pub mod layout;
pub mod renderer;
pub mod terminal;

pub use {app::App, grid::TuiGrid, terminal::run_ui};
