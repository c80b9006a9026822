use crate::escape;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub glyph: char,
    /// Foreground color encoded as RGB bytes.
    pub color: Option<[u8; 3]>,
}

impl Cell {
    pub fn new(glyph: char) -> Self {
        Self { glyph, color: None }
    }

    pub fn colored(glyph: char, color: [u8; 3]) -> Self {
        Self { glyph, color: Some(color) }
    }

    /// Appends the cell to `out`, wrapped in a 24-bit color escape when it
    /// carries a color and `color` is requested.
    pub fn write_to(&self, out: &mut String, color: bool) {
        match self.color {
            Some(rgb) if color => escape::write_colored(out, self.glyph, rgb),
            _ => out.push(self.glyph),
        }
    }
}

/// Rows of rendered cells.
///
/// Renderer output is always rectangular; trimmed or parsed grids may be
/// ragged, so `width` reports the longest row.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GlyphGrid {
    rows: Vec<Vec<Cell>>,
}

impl GlyphGrid {
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Parses text rows, recovering colors from 24-bit escapes.
    pub fn from_text<S: AsRef<str>>(lines: &[S]) -> Self {
        Self { rows: lines.iter().map(|line| escape::parse_row(line.as_ref())).collect() }
    }

    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn lines(&self, color: bool) -> impl Iterator<Item = String> + '_ {
        self.rows.iter().map(move |row| {
            let mut line = String::with_capacity(row.len());
            for cell in row {
                cell.write_to(&mut line, color);
            }
            line
        })
    }

    pub fn plain_lines(&self) -> impl Iterator<Item = String> + '_ {
        self.lines(false)
    }

    pub fn ansi_lines(&self) -> impl Iterator<Item = String> + '_ {
        self.lines(true)
    }

    /// All rows, each terminated by a newline.
    pub fn to_text(&self, color: bool) -> String {
        let mut text = String::new();
        for line in self.lines(color) {
            text.push_str(&line);
            text.push('\n');
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_is_longest_row() {
        let grid = GlyphGrid::from_text(&["@", "@@@", ""]);
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.rows()[1][2], Cell::new('@'));
        assert!(grid.rows()[2].is_empty());
    }

    #[test]
    fn colored_cells_only_escape_when_requested() {
        let grid = GlyphGrid::new(vec![vec![Cell::colored('#', [1, 2, 3]), Cell::new(' ')]]);
        assert_eq!(grid.to_text(false), "# \n");
        assert_eq!(grid.to_text(true), "\x1b[38;2;1;2;3m#\x1b[0m \n");
    }

    #[test]
    fn empty_grid_has_no_text() {
        let grid = GlyphGrid::empty();
        assert!(grid.is_empty());
        assert_eq!(grid.width(), 0);
        assert_eq!(grid.to_text(true), "");
    }
}
