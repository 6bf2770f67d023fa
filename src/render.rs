use std::iter;

use crate::engine::Engine;
use crate::grid::Grid;
use crate::pace::Pacer;

/// Glyph of a live cell, a full block
pub const ALIVE: char = '\u{2588}';

/// Glyph of a dead cell, a medium shade
pub const DEAD: char = '\u{2592}';

const HELP: [&str; 2] = [
    "Press Q to Quit.  Press P to Pause.  Press S to Step.",
    "Press R to Cycle Rule.  Press [ / ] to Change Speed.",
];

/// Text frame of the grid followed by a status area, one cell per character.
pub struct Frame {
    /// The frame buffer.
    fb: String,

    /// Lines of help and statistics drawn below the grid
    status_lines: usize,
}

impl Frame {
    pub fn new(status_lines: usize) -> Self {
        Self {
            fb: String::new(),
            status_lines,
        }
    }

    /// Redraws the frame buffer from the engine's current generation.
    ///
    /// The status area holds a statistics line followed by the help lines. Every status
    /// line is clipped to the grid's width so the terminal never wraps it.
    pub fn render(&mut self, engine: &Engine, pacer: &Pacer) -> &str {
        self.fb.clear();

        let grid = engine.grid();
        draw_grid(&mut self.fb, grid);

        let stats = format!(
            "generation {}  alive {} ({:+})  rule {}{}",
            engine.generation(),
            engine.total_living(),
            engine.living_delta(),
            engine.rule_name(),
            if pacer.is_paused() { "  [paused]" } else { "" },
        );

        for line in iter::once(stats.as_str()).chain(HELP).take(self.status_lines) {
            self.fb.extend(line.chars().take(grid.cols()));
            self.fb.push('\n');
        }

        &self.fb
    }
}

/// Appends one line per grid row.
pub fn draw_grid(fb: &mut String, grid: &Grid) {
    fb.reserve(grid.rows() * (grid.cols() * ALIVE.len_utf8() + 1));

    for row in grid.rows_iter() {
        fb.extend(row.iter().map(|&alive| if alive { ALIVE } else { DEAD }));
        fb.push('\n');
    }
}
