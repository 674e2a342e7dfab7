//! Main TUI application.

use std::io;
use std::time::{Duration, Instant};

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::info;

use crate::client::SnapshotSource;
use crate::dashboard::Dashboard;

use super::event::{Event, EventHandler};
use super::input::{KeyAction, handle_key};
use super::render::render;

/// Main TUI application.
pub struct App {
    dashboard: Dashboard,
    source: Box<dyn SnapshotSource>,
}

impl App {
    pub fn new(dashboard: Dashboard, source: Box<dyn SnapshotSource>) -> Self {
        Self { dashboard, source }
    }

    /// Runs the dashboard until the user quits, refreshing every `interval`.
    pub fn run(mut self, interval: Duration) -> io::Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let events = EventHandler::new(interval);
        let result = drive(
            events.iter(),
            &mut self.dashboard,
            self.source.as_ref(),
            |dashboard| {
                terminal.draw(|frame| render(frame, dashboard))?;
                Ok(())
            },
        );

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }
}

/// Consumes events until quit, refreshing on every tick and redrawing after
/// every handled event.
///
/// Events are handled one at a time; a tick that arrives during a refresh
/// waits for it to finish.
pub fn drive<I, F>(
    events: I,
    dashboard: &mut Dashboard,
    source: &dyn SnapshotSource,
    mut draw: F,
) -> io::Result<()>
where
    I: IntoIterator<Item = Event>,
    F: FnMut(&Dashboard) -> io::Result<()>,
{
    draw(dashboard)?;
    for event in events {
        match event {
            Event::Tick => {
                // Errors are already shown in the owning panel.
                let _ = dashboard.refresh(source, Instant::now());
            }
            Event::Key(key) => match handle_key(key) {
                KeyAction::Quit => break,
                KeyAction::Toggle(panel) => dashboard.toggle(panel),
                KeyAction::ToggleHidden => dashboard.toggle_hidden(),
                KeyAction::None => continue,
            },
            Event::Resize(..) => {}
            Event::Quit => break,
        }
        draw(dashboard)?;
    }
    info!(cycles = dashboard.cycles(), "dashboard stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::EvictionPolicy;
    use crate::client::{Endpoint, FetchError, Payload, ReleaseLookup, VersionCache};
    use crate::layout::Panel;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
    use std::cell::Cell;

    struct Offline;

    impl ReleaseLookup for Offline {
        fn latest_release(&self) -> Result<String, FetchError> {
            Err(FetchError::Transport("offline".to_string()))
        }
    }

    /// Fails every fetch, counting the attempts.
    struct CountingSource {
        fetches: Cell<u32>,
    }

    impl SnapshotSource for CountingSource {
        fn fetch(&self, _endpoint: Endpoint) -> Result<Payload, FetchError> {
            self.fetches.set(self.fetches.get() + 1);
            Err(FetchError::Transport("connection refused".to_string()))
        }
    }

    fn key(c: char) -> Event {
        Event::Key(KeyEvent {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    fn dashboard() -> Dashboard {
        Dashboard::new(EvictionPolicy::Never, VersionCache::new(Box::new(Offline)))
    }

    #[test]
    fn test_events_after_quit_are_ignored() {
        let source = CountingSource {
            fetches: Cell::new(0),
        };
        let mut d = dashboard();
        let mut draws = 0;
        let events = vec![Event::Tick, key('q'), Event::Tick, Event::Tick];
        drive(events, &mut d, &source, |_| {
            draws += 1;
            Ok(())
        })
        .unwrap();

        assert_eq!(d.cycles(), 1);
        assert_eq!(source.fetches.get(), 1);
        assert_eq!(draws, 2);
    }

    #[test]
    fn test_ticks_are_not_coalesced() {
        let source = CountingSource {
            fetches: Cell::new(0),
        };
        let mut d = dashboard();
        drive(
            vec![Event::Tick, Event::Tick, Event::Tick, Event::Quit],
            &mut d,
            &source,
            |_| Ok(()),
        )
        .unwrap();
        assert_eq!(d.cycles(), 3);
    }

    #[test]
    fn test_toggle_keys_update_dashboard() {
        let source = CountingSource {
            fetches: Cell::new(0),
        };
        let mut d = dashboard();
        drive(vec![key('3'), key('h')], &mut d, &source, |_| Ok(())).unwrap();
        assert!(!d.visibility().roles);
        assert!(d.visibility().hidden_indices);
        assert!(d.geometry().placement(Panel::Roles).is_none());
        assert_eq!(source.fetches.get(), 0);
    }

    #[test]
    fn test_draw_error_stops_loop() {
        let source = CountingSource {
            fetches: Cell::new(0),
        };
        let mut d = dashboard();
        let mut calls = 0;
        let err = drive(vec![Event::Tick, Event::Tick], &mut d, &source, |_| {
            calls += 1;
            if calls > 1 {
                Err(io::Error::other("terminal gone"))
            } else {
                Ok(())
            }
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "terminal gone");
        assert_eq!(d.cycles(), 1);
    }
}
