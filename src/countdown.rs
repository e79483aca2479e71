// Copyright (c) 2026 rezky_nightky

use std::time::{SystemTime, UNIX_EPOCH};

/// Wall-clock seconds since the unix epoch.
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Display digits for HH:MM:SS, tens first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Digits {
    pub hour: [u8; 2],
    pub minute: [u8; 2],
    pub second: [u8; 2],
}

impl Digits {
    /// Hours past 99 wrap: only the last two hour digits are shown.
    pub fn from_seconds(total: u64) -> Self {
        let hours = total / 3600;
        let minutes = total % 3600 / 60;
        let seconds = total % 60;
        Self {
            hour: [(hours / 10 % 10) as u8, (hours % 10) as u8],
            minute: [(minutes / 10) as u8, (minutes % 10) as u8],
            second: [(seconds / 10) as u8, (seconds % 10) as u8],
        }
    }
}

#[derive(Clone, Debug)]
pub struct TimeState {
    start_time: u64,
    initial_seconds: u64,
    remaining_seconds: u64,
    digits: Digits,
}

impl TimeState {
    pub fn new(initial_seconds: u64, now: u64) -> Self {
        let mut t = Self {
            start_time: now,
            initial_seconds,
            remaining_seconds: initial_seconds,
            digits: Digits::default(),
        };
        t.advance(now);
        t
    }

    /// Recompute the remaining time from the wall clock. A clock that steps
    /// backwards counts as no time elapsed.
    pub fn advance(&mut self, now: u64) {
        let elapsed = now.saturating_sub(self.start_time);
        self.remaining_seconds = self.initial_seconds.saturating_sub(elapsed);
        self.digits = Digits::from_seconds(self.remaining_seconds);
    }

    /// Restart the clock at `now` without losing progress: the countdown
    /// continues from whatever is currently left.
    pub fn rebase(&mut self, now: u64) {
        self.advance(now);
        self.initial_seconds = self.remaining_seconds;
        self.start_time = now;
    }

    pub fn is_time_up(&self) -> bool {
        self.remaining_seconds == 0
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.remaining_seconds
    }

    pub fn digits(&self) -> Digits {
        self.digits
    }
}

/// True on even wall-clock seconds. Drives the time-up flash and the
/// blinking colon.
pub fn blink_phase(now: u64) -> bool {
    now % 2 == 0
}
