// Copyright (c) 2026 rezky_nightky

use std::time::Duration;

use crossterm::style::Color;

use crate::palette::{Palette, COLOR_COUNT};

/// Interactive settings. Everything here can change while the timer runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
    pub color: u8,
    pub time_up_color: u8,
    pub bg: Option<Color>,
    pub bold: bool,
    pub blink_colon: bool,
    pub boxed: bool,
    pub screensaver: bool,
    pub no_quit: bool,
    pub show_seconds: bool,
    center: bool,
    rebound: bool,
    pub delay_secs: u64,
    pub delay_nanos: u32,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            color: 2,
            time_up_color: 1,
            bg: None,
            bold: false,
            blink_colon: false,
            boxed: false,
            screensaver: false,
            no_quit: false,
            show_seconds: true,
            center: false,
            rebound: false,
            delay_secs: 1,
            delay_nanos: 0,
        }
    }
}

impl Options {
    pub fn center(&self) -> bool {
        self.center
    }

    pub fn rebound(&self) -> bool {
        self.rebound
    }

    /// Centering pins the window, so it turns rebound off.
    pub fn set_center(&mut self, on: bool) {
        self.center = on;
        if on {
            self.rebound = false;
        }
    }

    /// Bouncing moves the window, so it turns centering off.
    pub fn set_rebound(&mut self, on: bool) {
        self.rebound = on;
        if on {
            self.center = false;
        }
    }

    pub fn set_color(&mut self, color: u8) {
        if color < COLOR_COUNT {
            self.color = color;
        }
    }

    pub fn poll_delay(&self) -> Duration {
        Duration::new(self.delay_secs, self.delay_nanos)
    }

    pub fn palette(&self) -> Palette {
        Palette::new(self.color, self.time_up_color, self.bg)
    }
}
