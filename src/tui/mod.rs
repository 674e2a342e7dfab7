//! Terminal user interface.
//!
//! Owns the terminal and the event loop; everything it draws comes from
//! [`crate::dashboard::Dashboard`].

mod app;
mod event;
mod input;
mod render;
mod style;

pub use app::{App, drive};
pub use event::Event;
pub use input::{KeyAction, handle_key};
