// Copyright (c) 2026 rezky_nightky

mod app;
mod cell;
mod config;
mod countdown;
mod error;
mod geometry;
mod glyph;
mod input;
mod palette;
mod render;
mod runtime;
mod surface;
mod terminal;

use std::fs::File;
use std::path::Path;
use std::sync::atomic::AtomicBool;
#[cfg(windows)]
use std::sync::atomic::Ordering;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::builder::styling::{AnsiColor as ClapAnsiColor, Color as ClapColor};
use clap::builder::styling::{Effects as ClapEffects, Style as ClapStyle};
use clap::builder::Styles as ClapStyles;
use clap::{CommandFactory, FromArgMatches};
use log::{error, info, LevelFilter};
use simplelog::{Config as LogConfig, WriteLogger};

#[cfg(unix)]
use signal_hook::consts::{SIGHUP, SIGINT, SIGTERM};

use crate::app::Timer;
use crate::config::{color_enabled_stdout, open_device, print_info, Args, KEYS_HELP};
use crate::countdown::unix_now;
use crate::input::TerminalEvents;
use crate::render::{BorderChars, Renderer};
use crate::terminal::{restore_terminal_best_effort, Terminal};

const HELP_TEMPLATE_PLAIN: &str = "\
{before-help}{about-with-newline}
USAGE:
  {usage}

{all-args}{after-help}";

const HELP_TEMPLATE_COLOR: &str = "\
{before-help}{about-with-newline}
\x1b[1;36mUSAGE:\x1b[0m
  {usage}

{all-args}{after-help}";

fn clap_styles() -> ClapStyles {
    ClapStyles::styled()
        .header(
            ClapStyle::new()
                .effects(ClapEffects::BOLD)
                .fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Cyan))),
        )
        .usage(
            ClapStyle::new()
                .effects(ClapEffects::BOLD)
                .fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Green))),
        )
        .literal(ClapStyle::new().fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Yellow))))
        .placeholder(ClapStyle::new().fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Magenta))))
}

fn init_logging(path: &Path, level: LevelFilter) {
    let file = match File::create(path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("warning: could not create log file '{}': {}", path.display(), e);
            return;
        }
    };
    if let Err(e) = WriteLogger::init(level, LogConfig::default(), file) {
        eprintln!("warning: could not initialize logger: {}", e);
    }
}

/// Raise `stop` on SIGINT, SIGTERM and SIGHUP. The main loop checks it at
/// the top of every tick.
#[cfg(unix)]
fn install_stop_signals(stop: &Arc<AtomicBool>) {
    for sig in [SIGINT, SIGTERM, SIGHUP] {
        if let Err(e) = signal_hook::flag::register(sig, Arc::clone(stop)) {
            eprintln!("failed to install handler for signal {}: {}", sig, e);
        }
    }
}

#[cfg(windows)]
fn install_stop_signals(stop: &Arc<AtomicBool>) {
    let stop = Arc::clone(stop);
    if let Err(e) = ctrlc::set_handler(move || stop.store(true, Ordering::Relaxed)) {
        eprintln!("failed to install Ctrl-C handler: {}", e);
    }
}

fn main() -> Result<()> {
    std::panic::set_hook(Box::new(|info| {
        restore_terminal_best_effort();
        error!("fatal: {}", info);
        eprintln!("tty-timer: fatal error, terminal restored.");
        eprintln!("{}", info);
    }));

    let mut cmd = Args::command();
    cmd = cmd.styles(clap_styles());
    cmd = cmd.after_help(KEYS_HELP);
    let help_template = if color_enabled_stdout() {
        HELP_TEMPLATE_COLOR
    } else {
        HELP_TEMPLATE_PLAIN
    };
    cmd = cmd.help_template(help_template);

    let matches = cmd.get_matches();
    let args = Args::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    if args.version {
        println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    if args.info {
        print_info();
        return Ok(());
    }

    if let Some(path) = &args.log_file {
        init_logging(path, args.log_level);
    }

    let setup = match args.into_setup() {
        Ok(s) => s,
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let device = match setup.device.as_deref().map(open_device).transpose() {
        Ok(d) => d,
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    info!(
        "starting {}s countdown ({:?}) on {}",
        setup.initial_seconds,
        setup.options,
        setup
            .device
            .as_deref()
            .map_or("stdout".into(), |p| p.display().to_string())
    );

    let stop = Arc::new(AtomicBool::new(false));
    install_stop_signals(&stop);

    let mut term = Terminal::new(device).context("failed to set up the terminal")?;
    let extent = Terminal::size().context("failed to query the terminal size")?;

    let mut timer = Timer::new(
        setup.options,
        setup.initial_seconds,
        Renderer::new(BorderChars::from_env()),
        extent,
        unix_now(),
    );

    app::run(&mut timer, &mut term, &mut TerminalEvents, &stop)?;

    Ok(())
}
