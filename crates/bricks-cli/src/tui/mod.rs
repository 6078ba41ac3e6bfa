//! Minimal application runtime on top of ratatui.
//!
//! Multiplexes three event sources onto one loop: the application's tick
//! deadline, render requests and crossterm terminal events.

pub(crate) use self::{app::App, event_loop::RenderMode, runner::Tui};

mod app;
mod event;
mod event_loop;
mod runner;
