//! Top-level application state.
//!
//! Implements `winit::application::ApplicationHandler` to drive the main
//! event loop: one window, one bridged document view.

mod bounds;
mod core;
mod event_handler;
mod init;
mod polling;

pub use core::SelbridgeApp;
