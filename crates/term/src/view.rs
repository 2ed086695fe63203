//! BoardView: draws a [`GameSnapshot`] onto a [`Canvas`].
//!
//! Pure; no terminal I/O.

use crate::canvas::{Canvas, Glyph, Rgb, Style};
use crate::core::grid::{COLUMNS, ROWS};
use crate::core::{definition, ActiveSnapshot, GameSnapshot, Shape};
use crate::types::{Cell, Phase, PieceKind, Side, EDGE_ROW};

const WELL_BG: Rgb = Rgb::new(24, 24, 32);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);
const BORDER: Rgb = Rgb::new(200, 200, 200);
const BORDER_ON_EDGE: Rgb = Rgb::new(230, 60, 60);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Front-end state that is not part of the game itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Hud {
    /// The session has been started (the play prompt is gone)
    pub started: bool,
    /// Show the level-up banner
    pub level_up: bool,
}

/// Text shown over the well, if any
pub fn banner(snap: &GameSnapshot, hud: Hud) -> Option<String> {
    if !hud.started {
        return Some("PRESS ENTER".to_string());
    }
    if let (Phase::New | Phase::Running, Some(digit)) = (snap.phase, snap.countdown_digit) {
        return Some(digit.to_string());
    }
    match snap.phase {
        Phase::New => None,
        Phase::Paused => Some("PAUSED".to_string()),
        Phase::Ending | Phase::Ended => Some("GAME OVER".to_string()),
        Phase::Running if hud.level_up => Some("LEVEL UP!".to_string()),
        Phase::Running => None,
    }
}

/// Whether the stack has reached the warning zone near the top
pub fn on_edge(snap: &GameSnapshot) -> bool {
    snap.top_occupied_row.is_some_and(|row| row <= EDGE_ROW)
}

pub struct BoardView {
    /// Terminal columns per grid cell
    cell_w: u16,
}

impl Default for BoardView {
    fn default() -> Self {
        // Two columns per cell keeps cells roughly square.
        Self { cell_w: 2 }
    }
}

impl BoardView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
        }
    }

    /// Size of the bordered well in terminal cells
    pub fn well_size(&self) -> (u16, u16) {
        (COLUMNS as u16 * self.cell_w + 2, ROWS as u16 + 2)
    }

    /// Draw `snap` into `canvas`, resizing it to `viewport`
    pub fn render_into(&self, snap: &GameSnapshot, hud: Hud, viewport: Viewport, canvas: &mut Canvas) {
        canvas.resize(viewport.width, viewport.height);
        canvas.fill(Glyph::new(' ', Style::new(BORDER, PANEL_BG)));

        let (well_w, well_h) = self.well_size();
        let left = viewport.width.saturating_sub(well_w + 16) / 2;
        let top = viewport.height.saturating_sub(well_h) / 2;
        let inner = (left + 1, top + 1);

        canvas.fill_rect(
            inner.0,
            inner.1,
            well_w - 2,
            well_h - 2,
            Glyph::new(' ', Style::new(BORDER, WELL_BG)),
        );
        let border = if on_edge(snap) { BORDER_ON_EDGE } else { BORDER };
        canvas.outline(left, top, well_w, well_h, Style::new(border, PANEL_BG));

        self.draw_grid(canvas, snap, inner);

        if let Some(active) = snap.active {
            if snap.display_ghost {
                if let Some(ghost_y) = snap.ghost_y {
                    let ghost = Style::new(Rgb::from(active.color.rgb()).scaled(1, 2), WELL_BG).dim();
                    self.draw_piece(canvas, inner, &active, ghost_y, Glyph::new('░', ghost));
                }
            }
            let solid = Style::new(Rgb::from(active.color.rgb()), WELL_BG).bold();
            self.draw_piece(canvas, inner, &active, active.y, Glyph::new('█', solid));
        }

        self.draw_panel(canvas, snap, viewport, left + well_w + 2, top);

        if let Some(text) = banner(snap, hud) {
            let style = Style::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
            let text_w = text.chars().count() as u16;
            let x = left + well_w.saturating_sub(text_w) / 2;
            canvas.put_str(x, top + well_h / 2, &text, style);
        }
    }

    /// Allocating convenience wrapper around [`BoardView::render_into`]
    pub fn render(&self, snap: &GameSnapshot, hud: Hud, viewport: Viewport) -> Canvas {
        let mut canvas = Canvas::new(viewport.width, viewport.height);
        self.render_into(snap, hud, viewport, &mut canvas);
        canvas
    }

    fn draw_grid(&self, canvas: &mut Canvas, snap: &GameSnapshot, inner: (u16, u16)) {
        let dot = Glyph::new('·', Style::new(Rgb::new(70, 70, 80), WELL_BG).dim());
        for (y, row) in snap.grid.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                let glyph = match cell {
                    Cell::Filled(color) => Glyph::new('█', Style::new(Rgb::from(color.rgb()), WELL_BG)),
                    Cell::Empty => {
                        // One dot per cell is enough texture.
                        let px = inner.0 + x as u16 * self.cell_w;
                        canvas.put(px, inner.1 + y as u16, dot);
                        continue;
                    }
                };
                self.put_cell(canvas, inner, x as i8, y as i8, glyph);
            }
        }
    }

    fn draw_piece(
        &self,
        canvas: &mut Canvas,
        inner: (u16, u16),
        piece: &ActiveSnapshot,
        origin_y: i8,
        glyph: Glyph,
    ) {
        for (row, col) in piece.shape.solid_cells() {
            self.put_cell(canvas, inner, piece.x + col as i8, origin_y + row as i8, glyph);
        }
    }

    /// Paint one grid cell; cells above or outside the grid are skipped
    fn put_cell(&self, canvas: &mut Canvas, inner: (u16, u16), x: i8, y: i8, glyph: Glyph) {
        if x < 0 || y < 0 || x as usize >= COLUMNS || y as usize >= ROWS {
            return;
        }
        let px = inner.0 + x as u16 * self.cell_w;
        canvas.fill_rect(px, inner.1 + y as u16, self.cell_w, 1, glyph);
    }

    fn draw_panel(&self, canvas: &mut Canvas, snap: &GameSnapshot, viewport: Viewport, x: u16, top: u16) {
        if x.saturating_add(10) > viewport.width {
            return;
        }
        let label = Style::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = Style::new(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = top;
        for (name, number) in [
            ("SCORE", snap.points),
            ("LEVEL", snap.level),
            ("LINES", snap.cleared_rows),
        ] {
            canvas.put_str(x, y, name, label);
            canvas.put_str(x, y + 1, &format!("{:06}", number), value);
            y += 3;
        }

        if snap.hold_allowed {
            let style = if snap.can_hold { label } else { label.dim() };
            canvas.put_str(x, y, "HOLD", style);
            if let Some(kind) = snap.held {
                self.draw_preview(canvas, kind, x, y + 1, !snap.can_hold);
            }
            y += 4;
        }

        if snap.display_next {
            canvas.put_str(x, y, "NEXT", label);
            y += 1;
            for kind in snap.lookahead {
                if y + 2 > viewport.height {
                    break;
                }
                self.draw_preview(canvas, kind, x, y, false);
                y += 3;
            }
        }
    }

    /// Spawn orientation of `kind`, trimmed to its solid rows
    fn draw_preview(&self, canvas: &mut Canvas, kind: PieceKind, x: u16, y: u16, dim: bool) {
        let def = definition(kind);
        let mut style = Style::new(Rgb::from(def.color.rgb()), PANEL_BG);
        if dim {
            style = style.dim();
        }
        let shape: &Shape = &def.shape;
        let (top, left) = (shape.solid_edge(Side::Up), shape.solid_edge(Side::Left));
        for (row, col) in shape.solid_cells() {
            let px = x + (col - left) as u16 * self.cell_w;
            canvas.fill_rect(px, y + (row - top) as u16, self.cell_w, 1, Glyph::new('█', style));
        }
    }
}
