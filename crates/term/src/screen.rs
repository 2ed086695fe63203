//! Screen: puts canvases on a real terminal.
//!
//! The first frame (and any frame after a resize or [`Screen::invalidate`])
//! is a full repaint; later frames only rewrite runs of changed glyphs.

use std::io::{self, Stdout, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::canvas::{Canvas, Glyph, Rgb, Style};

pub struct Screen<W: Write = Stdout> {
    out: W,
    shown: Option<Canvas>,
    buf: Vec<u8>,
}

impl Screen<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Screen<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            shown: None,
            buf: Vec::with_capacity(32 * 1024),
        }
    }

    /// Raw mode, alternate screen, hidden cursor, focus reporting
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.buf.queue(crossterm::event::EnableFocusChange)?;
        self.flush()
    }

    /// Undo everything [`Screen::enter`] changed
    pub fn leave(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(crossterm::event::DisableFocusChange)?;
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Make the next [`Screen::present`] a full repaint
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    /// Show `canvas`.
    ///
    /// The canvas is swapped with the one shown before, so callers keep
    /// drawing into a single buffer without cloning.
    pub fn present(&mut self, canvas: &mut Canvas) -> Result<()> {
        self.buf.clear();
        let mut shown = match self.shown.take() {
            Some(prev) if prev.width() == canvas.width() && prev.height() == canvas.height() => {
                encode_changes(&prev, canvas, &mut self.buf)?;
                prev
            }
            _ => {
                encode_full(canvas, &mut self.buf)?;
                Canvas::new(canvas.width(), canvas.height())
            }
        };
        self.flush()?;

        std::mem::swap(&mut shown, canvas);
        self.shown = Some(shown);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.out.write_all(&self.buf)?;
        self.out.flush()?;
        Ok(())
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }
}

/// Encode a full repaint of `canvas` into `out`.
pub fn encode_full(canvas: &Canvas, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut pen = Pen::default();
    for y in 0..canvas.height() {
        out.queue(cursor::MoveTo(0, y))?;
        for glyph in canvas.row(y) {
            pen.draw(out, glyph)?;
        }
    }
    pen.finish(out)
}

/// Encode only the runs of glyphs that differ between `prev` and `next`.
///
/// Both canvases must have the same size.
pub fn encode_changes(prev: &Canvas, next: &Canvas, out: &mut Vec<u8>) -> Result<()> {
    let mut pen = Pen::default();
    for y in 0..next.height() {
        for (start, run) in changed_runs(prev.row(y), next.row(y)) {
            out.queue(cursor::MoveTo(start as u16, y))?;
            for glyph in run {
                pen.draw(out, glyph)?;
            }
        }
    }
    pen.finish(out)
}

/// Maximal runs where `next` differs from `prev`, as (start column, glyphs)
fn changed_runs<'a>(prev: &'a [Glyph], next: &'a [Glyph]) -> Vec<(usize, &'a [Glyph])> {
    let mut runs = Vec::new();
    let mut x = 0;
    while x < next.len() {
        if prev.get(x) == Some(&next[x]) {
            x += 1;
            continue;
        }
        let start = x;
        while x < next.len() && prev.get(x) != Some(&next[x]) {
            x += 1;
        }
        runs.push((start, &next[start..x]));
    }
    runs
}

/// Tracks the active terminal style so it is only re-sent on change
#[derive(Default)]
struct Pen {
    style: Option<Style>,
}

impl Pen {
    fn draw(&mut self, out: &mut Vec<u8>, glyph: &Glyph) -> Result<()> {
        if self.style != Some(glyph.style) {
            let style = glyph.style;
            out.queue(SetAttribute(Attribute::Reset))?;
            out.queue(SetForegroundColor(to_color(style.fg)))?;
            out.queue(SetBackgroundColor(to_color(style.bg)))?;
            if style.bold {
                out.queue(SetAttribute(Attribute::Bold))?;
            }
            if style.dim {
                out.queue(SetAttribute(Attribute::Dim))?;
            }
            self.style = Some(style);
        }
        out.queue(Print(glyph.ch))?;
        Ok(())
    }

    fn finish(self, out: &mut Vec<u8>) -> Result<()> {
        out.queue(ResetColor)?;
        out.queue(SetAttribute(Attribute::Reset))?;
        Ok(())
    }
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyphs(text: &str) -> Vec<Glyph> {
        text.chars().map(|ch| Glyph::new(ch, Style::default())).collect()
    }

    #[test]
    fn changed_runs_coalesce_neighbours() {
        let prev = glyphs("aaaaa");
        let next = glyphs("aXXaX");
        let runs: Vec<(usize, usize)> = changed_runs(&prev, &next)
            .into_iter()
            .map(|(start, run)| (start, run.len()))
            .collect();
        assert_eq!(runs, vec![(1, 2), (4, 1)]);
    }

    #[test]
    fn identical_rows_have_no_runs() {
        let row = glyphs("same");
        assert!(changed_runs(&row, &row).is_empty());
    }

    #[test]
    fn second_present_writes_less() {
        let mut screen = Screen::new(Vec::new());
        let mut canvas = Canvas::new(8, 2);
        canvas.put_str(0, 0, "SCORE", Style::default());
        screen.present(&mut canvas).expect("vec writer");
        let full = screen.get_ref().len();

        canvas.put_str(0, 0, "SCORE", Style::default());
        canvas.put_str(0, 1, "1", Style::default());
        screen.present(&mut canvas).expect("vec writer");
        let diff = screen.get_ref().len() - full;
        assert!(diff > 0);
        assert!(diff < full);
    }
}
