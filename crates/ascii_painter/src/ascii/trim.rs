use super::{
    grid::{Cell, GlyphGrid},
    ramp::DensityRamp,
};

/// Crops a grid to the bounding box of its non-background glyphs.
///
/// Only glyphs take part in the decision; cell colors are carried through
/// untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackgroundTrimmer {
    background: Vec<char>,
}

impl BackgroundTrimmer {
    pub fn new(background: impl IntoIterator<Item = char>) -> Self {
        let mut glyphs: Vec<char> = background.into_iter().collect();
        glyphs.sort_unstable();
        glyphs.dedup();
        Self { background: glyphs }
    }

    /// Treats the two lightest glyphs of `ramp` as background.
    pub fn for_ramp(ramp: &DensityRamp) -> Self {
        Self::new(ramp.background_glyphs())
    }

    pub fn background_glyphs(&self) -> &[char] {
        &self.background
    }

    pub fn is_background(&self, glyph: char) -> bool {
        self.background.contains(&glyph)
    }

    /// Whitespace never counts as content, whether or not it is in the
    /// background set.
    fn is_content(&self, glyph: char) -> bool {
        !glyph.is_whitespace() && !self.is_background(glyph)
    }

    /// True when the row holds nothing but background and whitespace.
    pub fn is_background_row(&self, row: &[Cell]) -> bool {
        !row.iter().any(|cell| self.is_content(cell.glyph))
    }

    fn column_has_content(&self, rows: &[Vec<Cell>], column: usize) -> bool {
        rows.iter().filter_map(|row| row.get(column)).any(|cell| self.is_content(cell.glyph))
    }

    pub fn trim(&self, grid: &GlyphGrid) -> GlyphGrid {
        let rows = grid.rows();

        let Some(start_row) = rows.iter().position(|row| !self.is_background_row(row)) else {
            return GlyphGrid::empty();
        };
        let end_row =
            rows.iter().rposition(|row| !self.is_background_row(row)).unwrap_or(start_row);
        let kept = &rows[start_row..=end_row];

        // Short rows don't constrain columns they never reach.
        let max_width = kept.iter().map(Vec::len).max().unwrap_or(0);
        let Some(start_col) = (0..max_width).find(|&col| self.column_has_content(kept, col)) else {
            return GlyphGrid::empty();
        };
        let end_col = (start_col..max_width)
            .rev()
            .find(|&col| self.column_has_content(kept, col))
            .unwrap_or(start_col);

        let trimmed = kept
            .iter()
            .map(|row| {
                let mut cells = if start_col < row.len() {
                    row[start_col..row.len().min(end_col + 1)].to_vec()
                } else {
                    Vec::new()
                };
                while cells.last().is_some_and(|cell| self.is_background(cell.glyph)) {
                    cells.pop();
                }
                cells
            })
            .collect();

        GlyphGrid::new(trimmed)
    }

    /// Trims text rows, which may carry 24-bit color escapes. Escapes never
    /// influence the crop and are written back for the cells that kept them.
    pub fn trim_lines<S: AsRef<str>>(&self, lines: &[S]) -> Vec<String> {
        self.trim(&GlyphGrid::from_text(lines)).ansi_lines().collect()
    }
}

impl Default for BackgroundTrimmer {
    fn default() -> Self {
        Self::for_ramp(&DensityRamp::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(grid: &GlyphGrid) -> Vec<String> {
        grid.plain_lines().collect()
    }

    #[test]
    fn background_row_ignores_surrounding_whitespace() {
        let trimmer = BackgroundTrimmer::default();
        let row = |text: &str| GlyphGrid::from_text(&[text]).rows()[0].clone();
        assert!(trimmer.is_background_row(&row("   ")));
        assert!(trimmer.is_background_row(&row(" . . ")));
        assert!(trimmer.is_background_row(&row("")));
        assert!(trimmer.is_background_row(&row(".\t.")));
        assert!(!trimmer.is_background_row(&row(" .#. ")));
    }

    #[test]
    fn whitespace_outside_the_set_is_never_content() {
        let trimmer = BackgroundTrimmer::new(['.', '-']);
        let grid = GlyphGrid::from_text(&[".#", " .", "#."]);
        // The space survives inside the box but does not widen it.
        assert_eq!(lines(&trimmer.trim(&grid)), vec![".#", " ", "#"]);
        assert_eq!(lines(&trimmer.trim(&GlyphGrid::from_text(&["  #"]))), vec!["#"]);

        let tabbed = GlyphGrid::from_text(&[".\t."]);
        assert!(BackgroundTrimmer::default().trim(&tabbed).is_empty());
    }

    #[test]
    fn duplicate_background_glyphs_collapse() {
        let trimmer = BackgroundTrimmer::new([' ', ' ', '.']);
        assert_eq!(trimmer.background_glyphs(), &[' ', '.']);
    }

    #[test]
    fn crops_to_bounding_box() {
        let grid = GlyphGrid::from_text(&["      ", "  .@  ", "  #.  ", "      "]);
        let trimmed = BackgroundTrimmer::default().trim(&grid);
        assert_eq!(lines(&trimmed), vec![".@", "#"]);
    }
}
