//! Terminal front end: configuration, logging, the dispatch loop and display surfaces.
mod app;
mod config;
mod effects;
mod logging;
mod ui;

pub use app::run_app;
