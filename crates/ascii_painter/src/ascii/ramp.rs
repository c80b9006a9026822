use serde::Deserialize;

use crate::AsciiError;

const SLACK: &str = "@#%*+=:-. ";
const STANDARD: &str = "@%#*+=-:. ";
const DETAILED: &str =
    "$@B%8&WM#*oahkbdpqwmZO0QLCJUYXzcvunxrjft/\\|()1{}[]?-_+~<>i!lI;:,\"^`'. ";
const BLOCKS: &str = "█▓▒░ ";

/// Glyphs ordered from darkest (index 0) to lightest.
///
/// The two lightest entries double as the background glyphs used when
/// trimming a rendered grid.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct DensityRamp {
    glyphs: Vec<char>,
}

impl DensityRamp {
    pub fn new(glyphs: impl Into<String>) -> Result<Self, AsciiError> {
        let glyphs: Vec<char> = glyphs.into().chars().collect();
        if glyphs.len() < 2 {
            return Err(AsciiError::InvalidRamp(glyphs.len()));
        }
        Ok(Self { glyphs })
    }

    /// Resolves a preset name, falling back to treating `value` as a literal ramp.
    pub fn parse(value: &str) -> Result<Self, AsciiError> {
        match value {
            "slack" => Ok(Self::slack()),
            "standard" => Ok(Self::standard()),
            "detailed" => Ok(Self::detailed()),
            "blocks" => Ok(Self::blocks()),
            literal => Self::new(literal),
        }
    }

    /// Short ramp that renders consistently inside chat code blocks.
    pub fn slack() -> Self {
        Self::preset(SLACK)
    }

    pub fn standard() -> Self {
        Self::preset(STANDARD)
    }

    pub fn detailed() -> Self {
        Self::preset(DETAILED)
    }

    pub fn blocks() -> Self {
        Self::preset(BLOCKS)
    }

    fn preset(glyphs: &str) -> Self {
        Self { glyphs: glyphs.chars().collect() }
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn glyphs(&self) -> &[char] {
        &self.glyphs
    }

    pub fn glyph(&self, index: usize) -> char {
        self.glyphs[index.min(self.glyphs.len() - 1)]
    }

    /// The lightest and second-lightest glyphs.
    pub fn background_glyphs(&self) -> [char; 2] {
        let n = self.glyphs.len();
        [self.glyphs[n - 1], self.glyphs[n - 2]]
    }
}

impl Default for DensityRamp {
    fn default() -> Self {
        Self::slack()
    }
}

impl TryFrom<String> for DensityRamp {
    type Error = AsciiError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl std::fmt::Display for DensityRamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.glyphs.iter().try_for_each(|glyph| write!(f, "{glyph}"))
    }
}
