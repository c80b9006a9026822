use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use ascii_painter::GlyphGrid;
use copypasta::{ClipboardContext, ClipboardProvider};
use log::info;

pub fn write_grid<W: Write>(out: &mut W, grid: &GlyphGrid, color: bool) -> io::Result<()> {
    for line in grid.lines(color) {
        writeln!(out, "{line}")?;
    }
    out.flush()
}

pub fn print(grid: &GlyphGrid, color: bool) -> Result<()> {
    let stdout = io::stdout();
    write_grid(&mut stdout.lock(), grid, color).context("failed to write to stdout")
}

pub fn save(path: &Path, grid: &GlyphGrid, color: bool) -> Result<()> {
    let file = File::create(path).with_context(|| format!("failed to create {path:?}"))?;
    write_grid(&mut BufWriter::new(file), grid, color)
        .with_context(|| format!("failed to write {path:?}"))?;
    info!("wrote {} rows to {}", grid.height(), path.display());
    Ok(())
}

/// Copies the plain rendering; escapes don't survive chat clients.
pub fn copy_to_clipboard(grid: &GlyphGrid) -> Result<()> {
    let mut clipboard =
        ClipboardContext::new().map_err(|err| anyhow!("failed to open clipboard: {err}"))?;
    clipboard
        .set_contents(grid.to_text(false))
        .map_err(|err| anyhow!("failed to copy to clipboard: {err}"))?;
    info!("copied {} rows to the clipboard", grid.height());
    Ok(())
}

#[cfg(test)]
mod tests {
    use ascii_painter::Cell;

    use super::*;

    fn sample() -> GlyphGrid {
        GlyphGrid::new(vec![vec![Cell::colored('@', [1, 2, 3]), Cell::new(' ')], vec![]])
    }

    #[test]
    fn writes_one_line_per_row() {
        let mut out = Vec::new();
        write_grid(&mut out, &sample(), false).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "@ \n\n");
    }

    #[test]
    fn keeps_escapes_when_coloring() {
        let mut out = Vec::new();
        write_grid(&mut out, &sample(), true).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "\x1b[38;2;1;2;3m@\x1b[0m \n\n");
    }

    #[test]
    fn saves_plain_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("art.txt");
        save(&path, &sample(), false).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "@ \n\n");
    }
}
