// Copyright (c) 2026 rezky_nightky

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Problems found before the terminal is touched. Each one ends the process
/// with a failure status.
#[derive(Debug)]
pub enum SetupError {
    MissingTime,
    TimeNotNumeric(String),
    DeviceStat { path: PathBuf, source: io::Error },
    NotCharDevice(PathBuf),
    DeviceOpen { path: PathBuf, source: io::Error },
    OutOfRange {
        flag: &'static str,
        value: u64,
        min: u64,
        max: u64,
    },
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingTime => write!(f, "tty-timer: error: time must be inputted."),
            Self::TimeNotNumeric(s) => write!(f, "tty-timer: error: time ('{}') isn't a number.", s),
            Self::DeviceStat { path, source } => write!(
                f,
                "tty-timer: error: couldn't stat '{}': {}.",
                path.display(),
                source
            ),
            Self::NotCharDevice(path) => write!(
                f,
                "tty-timer: error: '{}' doesn't appear to be a character device.",
                path.display()
            ),
            Self::DeviceOpen { path, source } => write!(
                f,
                "tty-timer: error: '{}' couldn't be opened: {}.",
                path.display(),
                source
            ),
            Self::OutOfRange {
                flag,
                value,
                min,
                max,
            } => write!(
                f,
                "failed to apply {} {} (min {} max {})",
                flag, value, min, max
            ),
        }
    }
}

impl std::error::Error for SetupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::DeviceStat { source, .. } | Self::DeviceOpen { source, .. } => Some(source),
            _ => None,
        }
    }
}
