// Copyright (c) 2026 rezky_nightky

use std::fs::File;
use std::io::{stdout, Result, Write};
use std::sync::Mutex;
use std::time::Duration;

use crossterm::{
    cursor, event,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, ExecutableCommand, QueueableCommand,
};

use crate::cell::Cell;
use crate::surface::{Extent, Surface};

// Second handle on the `-T` device so a panic can restore it even when
// `Terminal::drop` never runs.
static RESTORE_DEVICE: Mutex<Option<File>> = Mutex::new(None);

fn remember_device(f: &File) {
    if let Ok(clone) = f.try_clone() {
        let mut slot = RESTORE_DEVICE.lock().unwrap_or_else(|e| e.into_inner());
        *slot = Some(clone);
    }
}

#[derive(Default)]
struct Pen {
    fg: Option<Color>,
    bg: Option<Color>,
    bold: bool,
    pos: Option<(u16, u16)>,
}

impl Pen {
    fn style<W: Write + ?Sized>(&mut self, out: &mut W, cell: &Cell) -> Result<()> {
        if cell.fg != self.fg {
            out.queue(SetForegroundColor(cell.fg.unwrap_or(Color::Reset)))?;
            self.fg = cell.fg;
        }
        if cell.bg != self.bg {
            out.queue(SetBackgroundColor(cell.bg.unwrap_or(Color::Reset)))?;
            self.bg = cell.bg;
        }
        if cell.bold != self.bold {
            out.queue(SetAttribute(if cell.bold {
                Attribute::Bold
            } else {
                Attribute::NormalIntensity
            }))?;
            self.bold = cell.bold;
        }
        Ok(())
    }
}

/// Where finished frames go. The main loop only needs to hand a surface
/// over once per tick.
pub trait Screen {
    fn present(&mut self, surface: &mut Surface) -> Result<()>;
}

/// The crossterm session. Output goes to stdout or to the device given with
/// `-T`; keys and the terminal size always come from the controlling tty.
pub struct Terminal {
    out: Box<dyn Write>,
    run_buf: String,
    dirty_sorted: Vec<usize>,
}

impl Terminal {
    pub fn new(device: Option<File>) -> Result<Self> {
        let mut out: Box<dyn Write> = match device {
            Some(f) => {
                remember_device(&f);
                Box::new(f)
            }
            None => Box::new(stdout()),
        };
        terminal::enable_raw_mode()?;
        let init_res: Result<()> = (|| {
            out.execute(terminal::EnterAlternateScreen)?;
            out.execute(cursor::Hide)?;
            let _ = out.execute(terminal::DisableLineWrap);
            out.execute(SetAttribute(Attribute::Reset))?;
            out.execute(ResetColor)?;
            out.execute(terminal::Clear(terminal::ClearType::All))?;
            out.flush()?;
            Ok(())
        })();
        if let Err(e) = init_res {
            restore(&mut out);
            return Err(e);
        }
        Ok(Self {
            out,
            run_buf: String::with_capacity(64),
            dirty_sorted: Vec::new(),
        })
    }

    pub fn size() -> Result<Extent> {
        let (cols, rows) = terminal::size()?;
        Ok(Extent::new(cols, rows))
    }

    pub fn poll_event(timeout: Duration) -> Result<bool> {
        event::poll(timeout)
    }

    pub fn read_event() -> Result<event::Event> {
        event::read()
    }

    /// Flush every changed cell of `surface` to the screen.
    pub fn draw(&mut self, surface: &mut Surface) -> Result<()> {
        if !surface.has_changes() {
            return Ok(());
        }

        let mut pen = Pen::default();
        self.out.queue(SetAttribute(Attribute::Reset))?;
        self.out.queue(ResetColor)?;

        if surface.is_dirty_all() {
            self.out.queue(terminal::Clear(terminal::ClearType::All))?;
            for y in 0..surface.height {
                self.out.queue(cursor::MoveTo(0, y))?;
                for x in 0..surface.width {
                    let idx = y as usize * surface.width as usize + x as usize;
                    let cell = surface.cell_at_index(idx);
                    pen.style(&mut self.out, &cell)?;
                    self.out.queue(Print(cell.ch))?;
                }
            }
        } else {
            self.dirty_sorted.clear();
            self.dirty_sorted.extend_from_slice(surface.dirty_indices());
            self.dirty_sorted.sort_unstable();
            self.draw_runs(surface, &mut pen)?;
        }

        self.out.queue(SetAttribute(Attribute::Reset))?;
        self.out.queue(ResetColor)?;
        self.out.flush()?;
        surface.clear_dirty();
        Ok(())
    }

    // Coalesce horizontally adjacent dirty cells sharing a style into one print.
    fn draw_runs(&mut self, surface: &Surface, pen: &mut Pen) -> Result<()> {
        let width = surface.width as usize;
        let mut i = 0usize;
        while i < self.dirty_sorted.len() {
            let idx0 = self.dirty_sorted[i];
            let cell0 = surface.cell_at_index(idx0);
            let x0 = (idx0 % width) as u16;
            let y0 = (idx0 / width) as u16;

            self.run_buf.clear();
            self.run_buf.push(cell0.ch);
            let mut last = idx0;
            let mut j = i + 1;
            while j < self.dirty_sorted.len() {
                let idx1 = self.dirty_sorted[j];
                if idx1 != last + 1 || idx1 % width == 0 {
                    break;
                }
                let cell1 = surface.cell_at_index(idx1);
                if cell1.fg != cell0.fg || cell1.bg != cell0.bg || cell1.bold != cell0.bold {
                    break;
                }
                self.run_buf.push(cell1.ch);
                last = idx1;
                j += 1;
            }

            if pen.pos != Some((x0, y0)) {
                self.out.queue(cursor::MoveTo(x0, y0))?;
            }
            pen.style(&mut self.out, &cell0)?;
            self.out.queue(Print(self.run_buf.as_str()))?;
            let next_x = x0.saturating_add((j - i) as u16);
            pen.pos = (next_x < surface.width).then_some((next_x, y0));

            i = j;
        }
        Ok(())
    }
}

fn restore<W: Write + ?Sized>(out: &mut W) {
    let _ = out.execute(SetAttribute(Attribute::Reset));
    let _ = out.execute(ResetColor);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::EnableLineWrap);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
    let _ = out.flush();
}

impl Screen for Terminal {
    fn present(&mut self, surface: &mut Surface) -> Result<()> {
        self.draw(surface)
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        restore(&mut self.out);
    }
}

/// Leave raw mode and the alternate screen on the output device, or stdout
/// when there is none. Safe to call from a panic hook when the `Terminal`
/// itself is out of reach.
pub fn restore_terminal_best_effort() {
    let mut slot = RESTORE_DEVICE.lock().unwrap_or_else(|e| e.into_inner());
    match slot.as_mut() {
        Some(f) => restore(f),
        None => restore(&mut stdout()),
    }
}
