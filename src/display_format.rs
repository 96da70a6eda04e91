use crate::piece::Side;

/// Characters used to draw pieces.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Glyphs {
    /// One double-width character per piece, e.g. 俥 / 車.
    Chinese,
    /// The FEN letter doubled, e.g. `RR` / `rr`, so cells keep the same width.
    Letters,
}

/// Rendering options for boards, pieces and rankings. Built once by the controller
/// from its command line and passed down explicitly.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct DisplayFormat {
    pub glyphs: Glyphs,
    /// Red pieces wrapped in ANSI colour codes.
    pub colour: bool,
    /// Row and column numbers around the grid, matching the `r1 c1 r2 c2` move input.
    pub labels: bool,
    /// Single-line FEN instead of a grid.
    pub concise: bool,
}

impl DisplayFormat {
    /// Two columns wide, like every piece cell.
    pub const EMPTY_CELL: &'static str = " ·";

    pub fn new(glyphs: Glyphs, colour: bool) -> Self {
        Self {
            glyphs,
            colour,
            labels: true,
            concise: false,
        }
    }

    pub fn pretty() -> Self {
        Self::new(Glyphs::Chinese, true)
    }

    /// Single-line FEN without escape codes, suitable for logs.
    pub fn string() -> Self {
        Self {
            glyphs: Glyphs::Letters,
            colour: false,
            labels: false,
            concise: true,
        }
    }

    pub fn with_concise(&self, concise: bool) -> Self {
        Self { concise, ..*self }
    }

    /// Applies the side's colour to already rendered text.
    pub fn paint(&self, side: Side, text: &str) -> String {
        match (self.colour, side) {
            (true, Side::Red) => format!("\x1B[31m{text}\x1B[0m"),
            _ => text.to_owned(),
        }
    }
}
