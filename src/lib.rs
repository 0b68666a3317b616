//! serial-watch: serial port presence watcher
//!
//! A library for tracking which serial ports are attached, polling on an
//! adaptive schedule and raising one notification per port plugged in or
//! removed.

pub mod config;
pub mod event_loop;
pub mod menu;
pub mod monitor;
pub mod notify;
pub mod port;
