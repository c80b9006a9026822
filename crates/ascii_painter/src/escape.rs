//! 24-bit terminal color escapes for rendered rows.
//!
//! A colored cell is written as `ESC[38;2;R;G;Bm`, the glyph, then `ESC[0m`.
//! [`strip_escapes`] recovers the plain text of any row, and [`parse_row`]
//! turns a row back into cells.

use std::sync::OnceLock;

use regex::Regex;

use crate::Cell;

pub const RESET: &str = "\x1b[0m";

fn csi() -> &'static Regex {
    static CSI: OnceLock<Regex> = OnceLock::new();
    CSI.get_or_init(|| Regex::new(r"\x1b\[[0-9;?]*[ -/]*[@-~]").expect("valid CSI pattern"))
}

fn truecolor() -> &'static Regex {
    static TRUECOLOR: OnceLock<Regex> = OnceLock::new();
    TRUECOLOR.get_or_init(|| {
        Regex::new(r"^\x1b\[38;2;(\d{1,3});(\d{1,3});(\d{1,3})m$").expect("valid color pattern")
    })
}

pub fn foreground(rgb: [u8; 3]) -> String {
    let [r, g, b] = rgb;
    format!("\x1b[38;2;{r};{g};{b}m")
}

pub fn write_colored(out: &mut String, glyph: char, rgb: [u8; 3]) {
    out.push_str(&foreground(rgb));
    out.push(glyph);
    out.push_str(RESET);
}

/// Removes every CSI escape sequence from `line`.
pub fn strip_escapes(line: &str) -> String {
    csi().replace_all(line, "").into_owned()
}

/// Splits `line` into cells. Glyphs following a truecolor escape carry that
/// color until the next reset; other escapes are dropped.
pub fn parse_row(line: &str) -> Vec<Cell> {
    let mut cells = Vec::with_capacity(line.len());
    let mut color = None;
    let mut cursor = 0;

    for found in csi().find_iter(line) {
        push_glyphs(&mut cells, &line[cursor..found.start()], color);
        cursor = found.end();

        let sequence = found.as_str();
        if sequence == RESET || sequence == "\x1b[m" {
            color = None;
        } else if let Some(rgb) = parse_truecolor(sequence) {
            color = Some(rgb);
        }
    }
    push_glyphs(&mut cells, &line[cursor..], color);

    cells
}

fn parse_truecolor(sequence: &str) -> Option<[u8; 3]> {
    let captures = truecolor().captures(sequence)?;
    let channel = |index: usize| captures.get(index)?.as_str().parse::<u8>().ok();
    Some([channel(1)?, channel(2)?, channel(3)?])
}

fn push_glyphs(cells: &mut Vec<Cell>, text: &str, color: Option<[u8; 3]>) {
    cells.extend(text.chars().map(|glyph| Cell { glyph, color }));
}
