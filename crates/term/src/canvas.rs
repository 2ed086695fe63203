//! Off-screen character canvas.
//!
//! Views draw into a [`Canvas`]; the [`crate::screen::Screen`] diffs two
//! canvases and writes only what changed.

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Scale every channel by `num / den`, for shaded variants of a color
    pub const fn scaled(self, num: u16, den: u16) -> Self {
        Self {
            r: (self.r as u16 * num / den) as u8,
            g: (self.g as u16 * num / den) as u8,
            b: (self.b as u16 * num / den) as u8,
        }
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self { r, g, b }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
    pub dim: bool,
}

impl Style {
    pub const fn new(fg: Rgb, bg: Rgb) -> Self {
        Self {
            fg,
            bg,
            bold: false,
            dim: false,
        }
    }

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub const fn dim(mut self) -> Self {
        self.dim = true;
        self
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::new(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0))
    }
}

/// One character cell of the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub style: Style,
}

impl Glyph {
    pub const fn new(ch: char, style: Style) -> Self {
        Self { ch, style }
    }
}

impl Default for Glyph {
    fn default() -> Self {
        Self::new(' ', Style::default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u16,
    height: u16,
    glyphs: Vec<Glyph>,
}

impl Canvas {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            glyphs: vec![Glyph::default(); width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Change the size, keeping the allocation when it is large enough
    pub fn resize(&mut self, width: u16, height: u16) {
        if (self.width, self.height) == (width, height) {
            return;
        }
        self.width = width;
        self.height = height;
        self.glyphs
            .resize(width as usize * height as usize, Glyph::default());
    }

    /// One row of glyphs; empty outside the canvas
    pub fn row(&self, y: u16) -> &[Glyph] {
        if y >= self.height {
            return &[];
        }
        let start = y as usize * self.width as usize;
        &self.glyphs[start..start + self.width as usize]
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Glyph> {
        self.row(y).get(x as usize).copied()
    }

    pub fn put(&mut self, x: u16, y: u16, glyph: Glyph) {
        if x < self.width && y < self.height {
            self.glyphs[y as usize * self.width as usize + x as usize] = glyph;
        }
    }

    pub fn fill(&mut self, glyph: Glyph) {
        self.glyphs.fill(glyph);
    }

    /// Write `text` left to right, clipped at the right edge
    pub fn put_str(&mut self, x: u16, y: u16, text: &str, style: Style) {
        for (i, ch) in text.chars().enumerate() {
            let Some(cx) = x.checked_add(i as u16) else {
                break;
            };
            if cx >= self.width {
                break;
            }
            self.put(cx, y, Glyph::new(ch, style));
        }
    }

    pub fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, glyph: Glyph) {
        for dy in 0..h {
            for dx in 0..w {
                self.put(x.saturating_add(dx), y.saturating_add(dy), glyph);
            }
        }
    }

    /// Box-drawing outline of a `w` x `h` rectangle
    pub fn outline(&mut self, x: u16, y: u16, w: u16, h: u16, style: Style) {
        if w < 2 || h < 2 {
            return;
        }
        let (right, bottom) = (x + w - 1, y + h - 1);

        for cx in x + 1..right {
            self.put(cx, y, Glyph::new('─', style));
            self.put(cx, bottom, Glyph::new('─', style));
        }
        for cy in y + 1..bottom {
            self.put(x, cy, Glyph::new('│', style));
            self.put(right, cy, Glyph::new('│', style));
        }
        self.put(x, y, Glyph::new('┌', style));
        self.put(right, y, Glyph::new('┐', style));
        self.put(x, bottom, Glyph::new('└', style));
        self.put(right, bottom, Glyph::new('┘', style));
    }

    /// Text of one row, for tests and debugging
    pub fn row_text(&self, y: u16) -> String {
        self.row(y).iter().map(|g| g.ch).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_str_clips_at_edge() {
        let mut canvas = Canvas::new(4, 1);
        canvas.put_str(2, 0, "abc", Style::default());
        assert_eq!(canvas.row_text(0), "  ab");
    }

    #[test]
    fn outline_draws_corners() {
        let mut canvas = Canvas::new(3, 3);
        canvas.outline(0, 0, 3, 3, Style::default());
        assert_eq!(canvas.row_text(0), "┌─┐");
        assert_eq!(canvas.row_text(1), "│ │");
        assert_eq!(canvas.row_text(2), "└─┘");
    }

    #[test]
    fn resize_keeps_glyph_count_consistent() {
        let mut canvas = Canvas::new(2, 2);
        canvas.resize(5, 3);
        assert_eq!(canvas.row(2).len(), 5);
        assert!(canvas.get(4, 2).is_some());
        assert!(canvas.get(5, 2).is_none());
        assert!(canvas.row(3).is_empty());
    }

    #[test]
    fn scaled_darkens_color() {
        assert_eq!(Rgb::new(200, 100, 50).scaled(1, 2), Rgb::new(100, 50, 25));
    }
}
