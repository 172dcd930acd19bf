//! TerminalRenderer: pushes framebuffers to the terminal.
//!
//! Each frame is compared row by row with the one on screen and only runs of
//! differing cells are rewritten. Without a matching frame on screen (first
//! draw, resize, `invalidate`) the screen is cleared and every row becomes a
//! single run.

use std::io::{self, Write};
use std::ops::Range;

use anyhow::Result;

use crossterm::{
    cursor,
    style::{Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    /// Frame currently on screen.
    shown: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            shown: None,
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    /// Switch to raw mode on the alternate screen.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf
            .queue(terminal::EnterAlternateScreen)?
            .queue(cursor::Hide)?
            .queue(terminal::DisableLineWrap)?;
        self.flush()
    }

    /// Restore the terminal. Safe to call after a failed draw.
    pub fn exit(&mut self) -> Result<()> {
        self.shown = None;
        self.buf.clear();
        self.buf
            .queue(SetAttribute(Attribute::Reset))?
            .queue(terminal::EnableLineWrap)?
            .queue(cursor::Show)?
            .queue(terminal::LeaveAlternateScreen)?;
        self.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Forget what is on screen so the next draw repaints everything.
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    /// Draw `fb`, then keep it as the on-screen frame.
    ///
    /// `fb` receives the previously shown buffer in exchange, so the caller
    /// can render the next frame into it without allocating.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        encode_frame_into(self.shown.as_ref(), fb, &mut self.buf)?;
        self.flush()?;

        let mut spare = self
            .shown
            .take()
            .unwrap_or_else(|| FrameBuffer::new(0, 0));
        std::mem::swap(&mut spare, fb);
        self.shown = Some(spare);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Encode the commands that turn `prev` into `next` on screen.
///
/// A `prev` of another size counts as no previous frame.
pub fn encode_frame_into(
    prev: Option<&FrameBuffer>,
    next: &FrameBuffer,
    out: &mut Vec<u8>,
) -> Result<()> {
    let prev = prev.filter(|p| p.width() == next.width() && p.height() == next.height());
    if prev.is_none() {
        out.queue(terminal::Clear(terminal::ClearType::All))?;
    }

    let mut pen = Pen::new(out);
    for y in 0..next.height() {
        let row = next.row(y);
        match prev {
            Some(prev) => {
                for run in changed_runs(prev.row(y), row) {
                    let x = run.start as u16;
                    pen.write_run(x, y, &row[run])?;
                }
            }
            None => pen.write_run(0, y, row)?,
        }
    }
    pen.finish()
}

/// Writes cells, emitting only the style changes between consecutive cells.
struct Pen<'a> {
    out: &'a mut Vec<u8>,
    style: Option<CellStyle>,
}

impl<'a> Pen<'a> {
    fn new(out: &'a mut Vec<u8>) -> Self {
        Self { out, style: None }
    }

    fn write_run(&mut self, x: u16, y: u16, cells: &[Cell]) -> Result<()> {
        self.out.queue(cursor::MoveTo(x, y))?;
        for cell in cells {
            self.set_style(cell.style)?;
            self.out.queue(Print(cell.ch))?;
        }
        Ok(())
    }

    fn set_style(&mut self, style: CellStyle) -> Result<()> {
        let prev = self.style.replace(style);
        if prev == Some(style) {
            return Ok(());
        }
        if prev.map(|p| p.fg) != Some(style.fg) {
            self.out.queue(SetForegroundColor(truecolor(style.fg)))?;
        }
        if prev.map(|p| p.bg) != Some(style.bg) {
            self.out.queue(SetBackgroundColor(truecolor(style.bg)))?;
        }
        if prev.map(|p| p.bold) != Some(style.bold) {
            let weight = if style.bold {
                Attribute::Bold
            } else {
                Attribute::NormalIntensity
            };
            self.out.queue(SetAttribute(weight))?;
        }
        Ok(())
    }

    /// Leave the terminal in its default style if anything was written.
    fn finish(self) -> Result<()> {
        if self.style.is_some() {
            self.out.queue(SetAttribute(Attribute::Reset))?;
        }
        Ok(())
    }
}

fn truecolor(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Column ranges where two rows differ, adjacent differing cells merged.
fn changed_runs<'a>(prev: &'a [Cell], next: &'a [Cell]) -> impl Iterator<Item = Range<usize>> + 'a {
    let mut x = 0;
    std::iter::from_fn(move || {
        let differs = |i: usize| prev.get(i) != next.get(i);
        let start = (x..next.len()).find(|&i| differs(i))?;
        let end = (start..next.len())
            .find(|&i| !differs(i))
            .unwrap_or(next.len());
        x = end;
        Some(start..end)
    })
}
