//! Event sources for the TUI.
//!
//! A timer thread and an input thread feed one channel; the main loop is the
//! only consumer, so refreshes and key handling never overlap.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};
use tracing::warn;

/// Application events.
#[derive(Debug)]
pub enum Event {
    /// Refresh timer fired.
    Tick,
    /// Key press.
    Key(KeyEvent),
    /// Terminal resize (width, height).
    Resize(u16, u16),
    /// Input became unreadable; the loop should stop.
    Quit,
}

/// Owns the receiving end of the event channel.
pub struct EventHandler {
    rx: Receiver<Event>,
}

impl EventHandler {
    /// Starts the timer and input threads.
    ///
    /// The first tick is sent immediately, then one every `interval`. Ticks
    /// queue up if a refresh takes longer than the interval.
    pub fn new(interval: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        spawn_timer(tx.clone(), interval);
        spawn_input(tx);
        Self { rx }
    }

    /// Blocking iterator over events; ends when both threads are gone.
    pub fn iter(&self) -> impl Iterator<Item = Event> + '_ {
        self.rx.iter()
    }
}

fn spawn_timer(tx: Sender<Event>, interval: Duration) {
    thread::spawn(move || {
        while tx.send(Event::Tick).is_ok() {
            thread::sleep(interval);
        }
    });
}

fn spawn_input(tx: Sender<Event>) {
    thread::spawn(move || {
        loop {
            let event = match event::read() {
                Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => Event::Key(key),
                Ok(CrosstermEvent::Resize(w, h)) => Event::Resize(w, h),
                Ok(_) => continue,
                Err(e) => {
                    warn!(error = %e, "terminal input failed");
                    let _ = tx.send(Event::Quit);
                    break;
                }
            };
            if tx.send(event).is_err() {
                break;
            }
        }
    });
}
