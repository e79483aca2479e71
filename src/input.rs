// Copyright (c) 2026 rezky_nightky

use std::io::Result;
use std::thread;
use std::time::Duration;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::geometry::Direction;
use crate::runtime::Options;
use crate::surface::Extent;
use crate::terminal::Terminal;

/// One state change requested from the keyboard or the terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Resize(Extent),
    Move(Direction),
    /// `q`; honors no-quit.
    Quit,
    /// Ctrl-C; stops even with no-quit, like the signal it stands in for.
    Interrupt,
    ToggleSeconds,
    ToggleCenter,
    ToggleBold,
    ToggleRebound,
    ToggleBox,
    Color(u8),
}

/// Where input comes from. The terminal in production, a script in tests.
pub trait EventSource {
    /// Wait up to `timeout` for input without consuming it.
    fn poll(&mut self, timeout: Duration) -> Result<bool>;
    fn read(&mut self) -> Result<Event>;
    fn sleep(&mut self, d: Duration);
    fn size(&mut self) -> Result<Extent>;
}

pub struct TerminalEvents;

impl EventSource for TerminalEvents {
    fn poll(&mut self, timeout: Duration) -> Result<bool> {
        Terminal::poll_event(timeout)
    }

    fn read(&mut self) -> Result<Event> {
        Terminal::read_event()
    }

    fn sleep(&mut self, d: Duration) {
        thread::sleep(d);
    }

    fn size(&mut self) -> Result<Extent> {
        Terminal::size()
    }
}

fn is_interrupt(k: &KeyEvent) -> bool {
    k.modifiers.contains(KeyModifiers::CONTROL) && matches!(k.code, KeyCode::Char('c' | 'C'))
}

fn color_key(code: KeyCode) -> Option<u8> {
    match code {
        KeyCode::Char(c @ '0'..='7') => Some(c as u8 - b'0'),
        _ => None,
    }
}

/// Map an event to a command under the normal key table.
pub fn command_for(ev: &Event) -> Option<Command> {
    let k = match ev {
        Event::Resize(cols, rows) => return Some(Command::Resize(Extent::new(*cols, *rows))),
        Event::Key(k) if k.kind == KeyEventKind::Press => k,
        _ => return None,
    };
    if is_interrupt(k) {
        return Some(Command::Interrupt);
    }
    if let Some(c) = color_key(k.code) {
        return Some(Command::Color(c));
    }

    let cmd = match k.code {
        KeyCode::Up | KeyCode::Char('k' | 'K') => Command::Move(Direction::Up),
        KeyCode::Down | KeyCode::Char('j' | 'J') => Command::Move(Direction::Down),
        KeyCode::Left | KeyCode::Char('h' | 'H') => Command::Move(Direction::Left),
        KeyCode::Right | KeyCode::Char('l' | 'L') => Command::Move(Direction::Right),
        KeyCode::Char('q' | 'Q') => Command::Quit,
        KeyCode::Char('s' | 'S') => Command::ToggleSeconds,
        KeyCode::Char('c' | 'C') => Command::ToggleCenter,
        KeyCode::Char('b' | 'B') => Command::ToggleBold,
        KeyCode::Char('r' | 'R') => Command::ToggleRebound,
        KeyCode::Char('x' | 'X') => Command::ToggleBox,
        _ => return None,
    };
    Some(cmd)
}

/// Screensaver mode: any key quits unless no-quit is set, in which case only
/// the color keys do anything.
pub fn screensaver_command_for(ev: &Event, opts: &Options) -> Option<Command> {
    let k = match ev {
        Event::Resize(cols, rows) => return Some(Command::Resize(Extent::new(*cols, *rows))),
        Event::Key(k) if k.kind == KeyEventKind::Press => k,
        _ => return None,
    };
    if is_interrupt(k) {
        return Some(Command::Interrupt);
    }
    if !opts.no_quit {
        return Some(Command::Quit);
    }
    color_key(k.code).map(Command::Color)
}

/// Outcome of one bounded poll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Polled {
    /// Nothing recognized arrived; the configured delay was spent waiting.
    Idle,
    /// A command arrived and should be applied right away.
    Command(Command),
}

/// Wait for at most `opts.poll_delay()` for one command.
///
/// A pending event is read without waiting. Recognized keys return
/// immediately so the next tick redraws at once. Anything else, including no
/// input at all, waits out the delay (returning early if more input shows up,
/// which is then handled on the next tick).
pub fn poll<E: EventSource>(events: &mut E, opts: &Options) -> Result<Polled> {
    let delay = opts.poll_delay();

    if opts.screensaver {
        let cmd = if events.poll(Duration::ZERO)? {
            screensaver_command_for(&events.read()?, opts)
        } else {
            None
        };
        return Ok(match cmd {
            Some(c @ (Command::Quit | Command::Interrupt | Command::Resize(_))) => {
                Polled::Command(c)
            }
            other => {
                events.sleep(delay);
                other.map_or(Polled::Idle, Polled::Command)
            }
        });
    }

    if !events.poll(Duration::ZERO)? {
        events.poll(delay)?;
        return Ok(Polled::Idle);
    }
    match command_for(&events.read()?) {
        Some(c) => Ok(Polled::Command(c)),
        None => {
            events.poll(delay)?;
            Ok(Polled::Idle)
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::VecDeque;

    use pretty_assertions::assert_eq;

    use super::*;

    /// Scripted input. `poll` reports whether an event is queued and records
    /// every wait it was asked to do.
    #[derive(Default)]
    pub(crate) struct FakeEvents {
        pub queue: VecDeque<Event>,
        pub waits: Vec<Duration>,
        pub sleeps: Vec<Duration>,
        pub extent: Option<Extent>,
    }

    impl FakeEvents {
        pub fn with(events: impl IntoIterator<Item = Event>) -> Self {
            Self {
                queue: events.into_iter().collect(),
                ..Self::default()
            }
        }
    }

    impl EventSource for FakeEvents {
        fn poll(&mut self, timeout: Duration) -> Result<bool> {
            self.waits.push(timeout);
            Ok(!self.queue.is_empty())
        }

        fn read(&mut self) -> Result<Event> {
            Ok(self.queue.pop_front().unwrap_or(Event::FocusGained))
        }

        fn sleep(&mut self, d: Duration) {
            self.sleeps.push(d);
        }

        fn size(&mut self) -> Result<Extent> {
            Ok(self.extent.unwrap_or(Extent::new(80, 24)))
        }
    }

    pub(crate) fn key(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    fn ctrl_c() -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
    }

    #[test]
    fn key_table_maps_vi_and_arrow_keys() {
        assert_eq!(command_for(&key('k')), Some(Command::Move(Direction::Up)));
        assert_eq!(
            command_for(&Event::Key(KeyEvent::from(KeyCode::Right))),
            Some(Command::Move(Direction::Right))
        );
        assert_eq!(command_for(&key('X')), Some(Command::ToggleBox));
        assert_eq!(command_for(&key('7')), Some(Command::Color(7)));
        assert_eq!(command_for(&key('8')), None);
        assert_eq!(command_for(&key('z')), None);
        assert_eq!(command_for(&ctrl_c()), Some(Command::Interrupt));
        assert_eq!(
            command_for(&Event::Resize(100, 40)),
            Some(Command::Resize(Extent::new(100, 40)))
        );
    }

    #[test]
    fn no_input_waits_full_delay() {
        let mut ev = FakeEvents::default();
        let opts = Options::default();
        assert_eq!(poll(&mut ev, &opts).unwrap(), Polled::Idle);
        assert_eq!(ev.waits, vec![Duration::ZERO, Duration::from_secs(1)]);
    }

    #[test]
    fn recognized_key_returns_without_waiting() {
        let mut ev = FakeEvents::with([key('s')]);
        let opts = Options::default();
        assert_eq!(
            poll(&mut ev, &opts).unwrap(),
            Polled::Command(Command::ToggleSeconds)
        );
        assert_eq!(ev.waits, vec![Duration::ZERO]);
    }

    #[test]
    fn unrecognized_key_falls_through_to_wait() {
        let mut ev = FakeEvents::with([key('z')]);
        let opts = {
            let mut o = Options::default();
            o.delay_secs = 0;
            o.delay_nanos = 250_000_000;
            o
        };
        assert_eq!(poll(&mut ev, &opts).unwrap(), Polled::Idle);
        assert_eq!(ev.waits, vec![Duration::ZERO, Duration::from_millis(250)]);
    }

    #[test]
    fn screensaver_quits_on_any_key() {
        let mut ev = FakeEvents::with([key('z')]);
        let opts = {
            let mut o = Options::default();
            o.screensaver = true;
            o
        };
        assert_eq!(poll(&mut ev, &opts).unwrap(), Polled::Command(Command::Quit));
        assert!(ev.sleeps.is_empty());
    }

    #[test]
    fn screensaver_with_noquit_only_changes_color() {
        let opts = {
            let mut o = Options::default();
            o.screensaver = true;
            o.no_quit = true;
            o
        };

        let mut ev = FakeEvents::with([key('q')]);
        assert_eq!(poll(&mut ev, &opts).unwrap(), Polled::Idle);
        assert_eq!(ev.sleeps, vec![Duration::from_secs(1)]);

        let mut ev = FakeEvents::with([key('4')]);
        assert_eq!(poll(&mut ev, &opts).unwrap(), Polled::Command(Command::Color(4)));
        assert_eq!(ev.sleeps, vec![Duration::from_secs(1)]);
    }

    #[test]
    fn key_release_is_ignored() {
        let mut release = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(command_for(&Event::Key(release)), None);
    }
}
