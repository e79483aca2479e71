// Copyright (c) 2026 rezky_nightky

use std::fs::{self, File, OpenOptions};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use clap::Parser;
use crossterm::style::Color;
use log::LevelFilter;

use crate::error::SetupError;
use crate::palette::COLOR_COUNT;
use crate::runtime::Options;

pub const KEYS_HELP: &str = "\
KEYS:
  k j h l, arrows   Move the timer (not while centered)
  s                 Toggle seconds
  c                 Toggle centering
  r                 Toggle rebound
  x                 Toggle box
  b                 Toggle bold
  0-7               Set color
  q                 Quit (ignored with -n)";

pub fn color_enabled_stdout() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if matches!(std::env::var("CLICOLOR").ok().as_deref(), Some("0")) {
        return false;
    }
    std::io::stdout().is_terminal()
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorBg {
    #[value(name = "default-background")]
    DefaultBackground,
    #[value(name = "black")]
    Black,
}

impl ColorBg {
    pub fn color(self) -> Option<Color> {
        match self {
            ColorBg::DefaultBackground => None,
            ColorBg::Black => Some(Color::Black),
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(name = "tty-timer", version, disable_version_flag = true)]
pub struct Args {
    #[arg(value_name = "TIME", help = "Countdown length in whole seconds")]
    pub time: Option<String>,

    #[arg(
        short = 'S',
        long = "screensaver",
        help_heading = "GENERAL",
        help = "Screensaver mode (exit on any keypress)"
    )]
    pub screensaver: bool,

    #[arg(
        short = 'n',
        long = "noquit",
        help_heading = "GENERAL",
        help = "Don't quit on keypress"
    )]
    pub noquit: bool,

    #[arg(
        short = 'T',
        long = "tty",
        value_name = "DEVICE",
        help_heading = "GENERAL",
        help = "Display the timer on the given character device"
    )]
    pub tty: Option<PathBuf>,

    #[arg(
        short = 'x',
        long = "box",
        help_heading = "APPEARANCE",
        help = "Draw a box around the timer"
    )]
    pub boxed: bool,

    #[arg(
        short = 'c',
        long = "center",
        help_heading = "APPEARANCE",
        help = "Keep the timer centered in the terminal"
    )]
    pub center: bool,

    #[arg(
        short = 'r',
        long = "rebound",
        help_heading = "APPEARANCE",
        help = "Bounce the timer around the terminal"
    )]
    pub rebound: bool,

    #[arg(
        short = 'C',
        long = "color",
        default_value_t = 2,
        help_heading = "APPEARANCE",
        help = "Timer color (min 0 max 7)"
    )]
    pub color: u64,

    #[arg(
        short = 'u',
        long = "timeup-color",
        default_value_t = 1,
        help_heading = "APPEARANCE",
        help = "Timer color once time is up (min 0 max 7)"
    )]
    pub timeup_color: u64,

    #[arg(
        short = 'b',
        long = "bold",
        help_heading = "APPEARANCE",
        help = "Use bold colors"
    )]
    pub bold: bool,

    #[arg(
        short = 'B',
        long = "blink",
        help_heading = "APPEARANCE",
        help = "Blink the colons"
    )]
    pub blink: bool,

    #[arg(
        long = "color-bg",
        default_value_t = ColorBg::DefaultBackground,
        value_enum,
        help_heading = "APPEARANCE",
        help = "Background (default-background, black)"
    )]
    pub color_bg: ColorBg,

    #[arg(
        short = 'd',
        long = "delay",
        default_value_t = 1,
        help_heading = "TIMING",
        help = "Seconds between redraws (min 0 max 99)"
    )]
    pub delay: u64,

    #[arg(
        short = 'a',
        long = "nsdelay",
        default_value_t = 0,
        help_heading = "TIMING",
        help = "Extra nanoseconds between redraws (min 0 max 999999999)"
    )]
    pub nsdelay: u64,

    #[arg(
        long = "log-file",
        value_name = "PATH",
        help_heading = "LOGGING",
        help = "Write a log to PATH"
    )]
    pub log_file: Option<PathBuf>,

    #[arg(
        long = "log-level",
        default_value_t = LevelFilter::Info,
        help_heading = "LOGGING",
        help = "Log level (off, error, warn, info, debug, trace)"
    )]
    pub log_level: LevelFilter,

    #[arg(
        long = "info",
        short = 'i',
        help_heading = "HELP",
        help = "Print some info about tty-timer and exit"
    )]
    pub info: bool,

    #[arg(
        long = "version",
        short = 'v',
        help_heading = "HELP",
        help = "Print version and exit"
    )]
    pub version: bool,
}

/// Validated startup parameters.
#[derive(Debug)]
pub struct Setup {
    pub options: Options,
    pub initial_seconds: u64,
    pub device: Option<PathBuf>,
}

fn require_range(flag: &'static str, value: u64, min: u64, max: u64) -> Result<u64, SetupError> {
    if value < min || value > max {
        return Err(SetupError::OutOfRange {
            flag,
            value,
            min,
            max,
        });
    }
    Ok(value)
}

/// The countdown must be non-empty and made of ASCII digits only.
pub fn parse_time(arg: Option<&str>) -> Result<u64, SetupError> {
    let s = arg.ok_or(SetupError::MissingTime)?;
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SetupError::TimeNotNumeric(s.to_string()));
    }
    s.parse()
        .map_err(|_| SetupError::TimeNotNumeric(s.to_string()))
}

/// Check that `path` exists and is a character device.
pub fn validate_device(path: &Path) -> Result<(), SetupError> {
    let meta = fs::metadata(path).map_err(|source| SetupError::DeviceStat {
        path: path.to_path_buf(),
        source,
    })?;
    if !is_char_device(&meta) {
        return Err(SetupError::NotCharDevice(path.to_path_buf()));
    }
    Ok(())
}

#[cfg(unix)]
fn is_char_device(meta: &fs::Metadata) -> bool {
    use std::os::unix::fs::FileTypeExt;
    meta.file_type().is_char_device()
}

#[cfg(not(unix))]
fn is_char_device(_meta: &fs::Metadata) -> bool {
    false
}

pub fn open_device(path: &Path) -> Result<File, SetupError> {
    OpenOptions::new()
        .read(true)
        .write(true)
        .open(path)
        .map_err(|source| SetupError::DeviceOpen {
            path: path.to_path_buf(),
            source,
        })
}

impl Args {
    pub fn into_setup(self) -> Result<Setup, SetupError> {
        let max_color = (COLOR_COUNT - 1) as u64;
        let color = require_range("--color", self.color, 0, max_color)? as u8;
        let timeup_color =
            require_range("--timeup-color", self.timeup_color, 0, max_color)? as u8;
        let delay_secs = require_range("--delay", self.delay, 0, 99)?;
        let delay_nanos = require_range("--nsdelay", self.nsdelay, 0, 999_999_999)? as u32;

        if let Some(path) = &self.tty {
            validate_device(path)?;
        }
        let initial_seconds = parse_time(self.time.as_deref())?;

        let mut options = Options::default();
        options.color = color;
        options.time_up_color = timeup_color;
        options.bg = self.color_bg.color();
        options.bold = self.bold;
        options.blink_colon = self.blink;
        options.boxed = self.boxed;
        options.screensaver = self.screensaver;
        options.no_quit = self.noquit;
        options.delay_secs = delay_secs;
        options.delay_nanos = delay_nanos;
        // Centering wins when both are asked for.
        options.set_rebound(self.rebound);
        options.set_center(self.center);

        Ok(Setup {
            options,
            initial_seconds,
            device: self.tty,
        })
    }
}

pub fn print_info() {
    println!("tty-timer v{}", env!("CARGO_PKG_VERSION"));
    println!("A big countdown timer for the terminal, after TTY-Clock by Martin Duquesnoy.");
    println!("Copyright: (c) 2026 {}", env!("CARGO_PKG_AUTHORS"));
    println!("License: {}", env!("CARGO_PKG_LICENSE"));
}
