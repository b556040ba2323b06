//! Ratatui front-end. Three content views (query prompt, suggestion list,
//! chord sheet) plus no-results and error panels, all driven by the
//! [`Pipeline`](crate::pipeline::Pipeline) state.

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
