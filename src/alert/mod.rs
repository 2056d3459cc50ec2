// src/alert/mod.rs

//! Alert dispatch: fan-out of notification events to the transports.
//!
//! The dispatcher runs as its own loop behind an mpsc sender; both channels
//! send into it and never wait on transport completion. The console banner is
//! the transport of last resort and always fires; clipboard and desktop toast
//! are best-effort and degrade to a log line.

pub mod dispatcher;
pub mod transports;

pub use dispatcher::{
    compose_prompt, deliver_all, spawn_dispatcher, AlertChannel, AlertEvent,
};
pub use transports::{
    ClipboardProvider, ClipboardTransport, DesktopToastTransport, Transport,
};
