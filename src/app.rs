// Copyright (c) 2026 rezky_nightky

use std::io::Result;
use std::sync::atomic::{AtomicBool, Ordering};

use log::info;

use crate::countdown::{unix_now, TimeState};
use crate::geometry::{width_for, Geometry, Rect, HEIGHT};
use crate::input::{self, Command, EventSource, Polled};
use crate::render::Renderer;
use crate::runtime::Options;
use crate::surface::{Extent, Surface};
use crate::terminal::Screen;

/// All state of a running timer. Owned by the main loop and handed by
/// reference to each component.
pub struct Timer {
    pub options: Options,
    pub geometry: Geometry,
    pub time: TimeState,
    pub surface: Surface,
    renderer: Renderer,
    running: bool,
}

impl Timer {
    pub fn new(
        options: Options,
        initial_seconds: u64,
        renderer: Renderer,
        extent: Extent,
        now: u64,
    ) -> Self {
        let mut timer = Self {
            geometry: Geometry::new(options.show_seconds),
            surface: Surface::new(extent, options.bg),
            time: TimeState::new(initial_seconds, now),
            options,
            renderer,
            running: true,
        };
        timer.init(extent, now);
        timer
    }

    /// (Re)build the drawing surface and settle the window on it. Runs at
    /// startup and after every terminal resize. The position survives a
    /// resize and the countdown keeps its remaining time.
    pub fn init(&mut self, extent: Extent, now: u64) {
        self.surface = Surface::new(extent, self.options.bg);
        let border = self.renderer.border(&self.options);

        let r = self.geometry.rect();
        let to = Rect {
            width: width_for(self.options.show_seconds),
            height: HEIGHT,
            ..r
        };
        self.geometry.move_resize(&mut self.surface, to, border);
        self.geometry
            .apply_center(&mut self.options, extent, &mut self.surface, border);

        self.time.rebase(now);
        self.draw(now);
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    fn draw(&mut self, now: u64) {
        self.renderer.draw_frame(
            &mut self.surface,
            self.geometry.rect(),
            &self.options,
            &self.time,
            now,
        );
    }

    /// Everything a tick does before waiting for input.
    pub fn tick(&mut self, extent: Extent, now: u64) {
        let border = self.renderer.border(&self.options);
        self.geometry
            .apply_rebound(&self.options, extent, &mut self.surface, border);
        self.time.advance(now);
        self.draw(now);
    }

    pub fn apply(&mut self, cmd: Command, extent: Extent, now: u64) {
        let border = self.renderer.border(&self.options);
        let opts = &mut self.options;
        let surface = &mut self.surface;

        match cmd {
            Command::Resize(new_extent) => {
                info!("terminal resized to {}x{}", new_extent.cols, new_extent.rows);
                self.init(new_extent, now);
            }
            Command::Move(dir) => self.geometry.nudge(dir, opts, extent, surface, border),
            Command::Quit => {
                if !opts.no_quit {
                    self.running = false;
                }
            }
            Command::Interrupt => self.running = false,
            Command::ToggleSeconds => {
                self.geometry
                    .toggle_seconds_width(opts, extent, surface, border);
                info!("seconds display {}", on_off(opts.show_seconds));
            }
            Command::ToggleCenter => {
                opts.set_center(!opts.center());
                self.geometry.apply_center(opts, extent, surface, border);
                info!("center mode {}", on_off(opts.center()));
            }
            Command::ToggleBold => opts.bold = !opts.bold,
            Command::ToggleRebound => {
                opts.set_rebound(!opts.rebound());
                info!("rebound mode {}", on_off(opts.rebound()));
            }
            Command::ToggleBox => {
                let on = !opts.boxed;
                self.renderer
                    .set_box(opts, on, surface, self.geometry.rect());
            }
            Command::Color(c) => opts.set_color(c),
        }
    }
}

fn on_off(b: bool) -> &'static str {
    if b {
        "on"
    } else {
        "off"
    }
}

/// Drive the timer until a quit key or `stop` is raised. Each tick bounces
/// the window, advances the countdown, draws, then waits for input.
pub fn run<S: Screen, E: EventSource>(
    timer: &mut Timer,
    screen: &mut S,
    events: &mut E,
    stop: &AtomicBool,
) -> Result<()> {
    while timer.is_running() {
        if stop.load(Ordering::Relaxed) {
            info!("termination signal received");
            timer.stop();
            break;
        }

        let extent = events.size()?;
        timer.tick(extent, unix_now());
        screen.present(&mut timer.surface)?;

        if let Polled::Command(cmd) = input::poll(events, &timer.options)? {
            let extent = events.size()?;
            timer.apply(cmd, extent, unix_now());
        }
    }
    info!("stopped with {}s remaining", timer.time.remaining_seconds());
    Ok(())
}

#[cfg(test)]
mod tests {
    use crossterm::event::Event;
    use crossterm::style::Color;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::geometry::{Direction, WIDTH_NO_SECONDS, WIDTH_WITH_SECONDS};
    use crate::input::tests::{key, FakeEvents};
    use crate::render::BorderChars;

    const T0: u64 = 10_000;

    fn timer_with(options: Options, secs: u64) -> Timer {
        Timer::new(
            options,
            secs,
            Renderer::new(BorderChars::ascii()),
            Extent::new(100, 30),
            T0,
        )
    }

    fn extent() -> Extent {
        Extent::new(100, 30)
    }

    fn drive(timer: &mut Timer, ev: &mut FakeEvents, now: u64) {
        timer.tick(extent(), now);
        if let Polled::Command(cmd) = input::poll(ev, &timer.options).unwrap() {
            timer.apply(cmd, extent(), now);
        }
    }

    /// Counts frames and optionally raises `stop` once `stop_after` frames
    /// have been shown.
    #[derive(Default)]
    struct FrameLog<'a> {
        frames: Vec<Extent>,
        stop: Option<(&'a AtomicBool, usize)>,
    }

    impl Screen for FrameLog<'_> {
        fn present(&mut self, surface: &mut Surface) -> Result<()> {
            self.frames.push(surface.extent());
            surface.clear_dirty();
            if let Some((flag, after)) = self.stop {
                if self.frames.len() >= after {
                    flag.store(true, Ordering::Relaxed);
                }
            }
            Ok(())
        }
    }

    fn live_timer(options: Options) -> Timer {
        Timer::new(
            options,
            600,
            Renderer::new(BorderChars::ascii()),
            Extent::new(80, 24),
            unix_now(),
        )
    }

    #[test]
    fn run_exits_before_ticking_when_stop_is_already_raised() {
        let mut t = live_timer(Options::default());
        let mut screen = FrameLog::default();
        let mut ev = FakeEvents::with([key('q')]);
        let stop = AtomicBool::new(true);

        run(&mut t, &mut screen, &mut ev, &stop).unwrap();
        assert!(!t.is_running());
        assert!(screen.frames.is_empty());
        assert!(ev.waits.is_empty());
        assert_eq!(ev.queue.len(), 1);
    }

    #[test]
    fn run_presents_one_frame_then_quits_on_q() {
        let mut t = live_timer(Options::default());
        let mut screen = FrameLog::default();
        let mut ev = FakeEvents::with([key('q')]);
        let stop = AtomicBool::new(false);

        run(&mut t, &mut screen, &mut ev, &stop).unwrap();
        assert!(!t.is_running());
        assert_eq!(screen.frames, vec![Extent::new(80, 24)]);
        assert!(ev.queue.is_empty());
    }

    #[test]
    fn run_checks_stop_at_the_top_of_each_tick() {
        let opts = {
            let mut o = Options::default();
            o.no_quit = true;
            o
        };
        let mut t = live_timer(opts);
        let stop = AtomicBool::new(false);
        let mut screen = FrameLog {
            stop: Some((&stop, 2)),
            ..FrameLog::default()
        };
        let mut ev = FakeEvents::default();

        run(&mut t, &mut screen, &mut ev, &stop).unwrap();
        assert!(!t.is_running());
        assert_eq!(screen.frames.len(), 2);
        // Each frame is followed by an idle poll: an instant check, then the delay.
        assert_eq!(ev.waits.len(), 4);
    }

    #[test]
    fn run_rebuilds_the_surface_on_resize() {
        let mut t = live_timer(Options::default());
        let mut screen = FrameLog::default();
        let mut ev = FakeEvents::with([Event::Resize(60, 20), key('q')]);
        ev.extent = Some(Extent::new(60, 20));
        let stop = AtomicBool::new(false);

        run(&mut t, &mut screen, &mut ev, &stop).unwrap();
        assert!(!t.is_running());
        assert_eq!(
            screen.frames,
            vec![Extent::new(80, 24), Extent::new(60, 20)]
        );
        assert_eq!(t.surface.extent(), Extent::new(60, 20));
    }

    #[test]
    fn ticks_count_down_and_draw() {
        let mut t = timer_with(Options::default(), 5);
        let mut seen = vec![t.time.remaining_seconds()];
        for now in [T0 + 1, T0 + 2] {
            t.tick(extent(), now);
            seen.push(t.time.remaining_seconds());
        }
        assert_eq!(seen, vec![5, 4, 3]);
        assert_eq!(t.time.digits().second, [0, 3]);
        // Seconds ones digit "3": top row lit, left column of row two dark.
        assert_eq!(t.surface.get(1, 46).and_then(|c| c.bg), Some(Color::DarkGreen));
        assert_eq!(t.surface.get(2, 46).and_then(|c| c.bg), None);
    }

    #[test]
    fn center_then_rebound_starts_moving() {
        let opts = {
            let mut o = Options::default();
            o.set_center(true);
            o
        };
        let mut t = timer_with(opts, 60);
        let centered = t.geometry.rect();
        assert_eq!(centered.col, 50 - WIDTH_WITH_SECONDS as i32 / 2);

        t.apply(Command::ToggleRebound, extent(), T0);
        assert!(!t.options.center());
        assert!(t.options.rebound());

        t.tick(extent(), T0 + 1);
        let moved = t.geometry.rect();
        assert_eq!((moved.row - centered.row).abs(), 1);
        assert_eq!((moved.col - centered.col).abs(), 1);
    }

    #[test]
    fn quit_key_stops_unless_noquit() {
        let mut t = timer_with(Options::default(), 60);
        drive(&mut t, &mut FakeEvents::with([key('q')]), T0);
        assert!(!t.is_running());

        let opts = {
            let mut o = Options::default();
            o.no_quit = true;
            o
        };
        let mut t = timer_with(opts, 60);
        drive(&mut t, &mut FakeEvents::with([key('q')]), T0);
        assert!(t.is_running());
        t.apply(Command::Interrupt, extent(), T0);
        assert!(!t.is_running());
    }

    #[test]
    fn keys_toggle_options() {
        let mut t = timer_with(Options::default(), 60);
        for c in ['b', 'x', 's', '5'] {
            drive(&mut t, &mut FakeEvents::with([key(c)]), T0);
        }
        assert!(t.options.bold);
        assert!(t.options.boxed);
        assert!(!t.options.show_seconds);
        assert_eq!(t.options.color, 5);
        assert_eq!(t.geometry.rect().width, WIDTH_NO_SECONDS);
    }

    #[test]
    fn arrow_moves_are_ignored_while_centered() {
        let mut o = Options::default();
        o.set_center(true);
        let mut t = timer_with(o, 60);
        let before = t.geometry.rect();
        t.apply(Command::Move(Direction::Down), extent(), T0);
        assert_eq!(t.geometry.rect(), before);

        t.apply(Command::ToggleCenter, extent(), T0);
        t.apply(Command::Move(Direction::Down), extent(), T0);
        assert_eq!(t.geometry.rect().row, before.row + 1);
    }

    #[test]
    fn resize_rebuilds_surface_and_keeps_remaining_time() {
        let mut o = Options::default();
        o.set_center(true);
        let mut t = timer_with(o, 100);
        t.tick(extent(), T0 + 30);

        t.apply(Command::Resize(Extent::new(60, 20)), Extent::new(60, 20), T0 + 30);
        assert_eq!(t.surface.extent(), Extent::new(60, 20));
        assert_eq!(t.geometry.rect().col, 30 - WIDTH_WITH_SECONDS as i32 / 2);
        assert!(t.surface.is_dirty_all());

        t.tick(Extent::new(60, 20), T0 + 31);
        assert_eq!(t.time.remaining_seconds(), 69);
    }

    #[test]
    fn zero_seconds_flashes_time_up() {
        let mut t = timer_with(Options::default(), 0);
        assert!(t.time.is_time_up());
        t.tick(extent(), T0);
        assert_eq!(t.surface.get(1, 1).and_then(|c| c.bg), Some(Color::DarkRed));
        t.tick(extent(), T0 + 1);
        assert_eq!(t.surface.get(1, 1).and_then(|c| c.bg), Some(Color::DarkGreen));
    }
}
