use crate::display_format::DisplayFormat;
use crate::location::Location;
use crate::piece::{Piece, PieceKind, Side};
use std::fmt::{Display, Formatter};
use std::ops::{Index, IndexMut};

/// Fixed 10x9 grid. Cloning yields a fully independent copy.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Board {
    pieces: Vec<Option<Piece>>,
}

impl Board {
    pub const WIDTH: i8 = 9;
    pub const HEIGHT: i8 = 10;
    pub const SIZE: usize = (Self::WIDTH as usize) * (Self::HEIGHT as usize);

    pub const OPENING_FEN: &'static str = "rheakaehr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RHEAKAEHR";

    pub fn new() -> Self {
        Self { pieces: vec![None; Self::SIZE] }
    }

    /// Reads ranks starting from row 0, black's back rank.
    pub fn from_fen(fen: &str) -> Option<Self> {
        let mut board = Self::new();
        let mut row = 0;
        let mut col = 0;

        for current in fen.chars() {
            match current {
                ' ' => break,
                '/' => {
                    if col != Self::WIDTH || row == Self::HEIGHT - 1 {
                        return None;
                    }
                    col = 0;
                    row += 1;
                }
                '1'..='9' => {
                    col += current.to_digit(10)? as i8;
                    if col > Self::WIDTH {
                        return None;
                    }
                }
                _ => {
                    let piece = Piece::from_fen_char(current)?;
                    board[Location::new(row, col)?] = Some(piece);
                    col += 1;
                }
            }
        }

        if row != Self::HEIGHT - 1 || col != Self::WIDTH {
            return None;
        }
        Some(board)
    }

    pub fn opening() -> Self {
        Self::from_fen(Self::OPENING_FEN).unwrap()
    }

    pub fn fen(&self) -> String {
        let mut fen = String::new();

        for row in 0..Self::HEIGHT {
            if row > 0 {
                fen.push('/');
            }

            let mut empty = 0;
            for col in 0..Self::WIDTH {
                match Location::new(row, col).and_then(|location| self[location]) {
                    Some(piece) => {
                        if empty > 0 {
                            fen.push_str(&empty.to_string());
                            empty = 0;
                        }
                        fen.push(piece.fen_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                fen.push_str(&empty.to_string());
            }
        }

        fen
    }

    /// Cell contents, or `None` when the coordinates are off the board.
    pub fn get(&self, row: i8, col: i8) -> Option<Option<Piece>> {
        Location::new(row, col).map(|location| self[location])
    }

    pub fn iter_pieces(&self) -> impl Iterator<Item = (Location, Piece)> + '_ {
        Location::iter().filter_map(|location| self[location].map(|piece| (location, piece)))
    }

    pub fn find_king(&self, side: Side) -> Option<Location> {
        self.iter_pieces()
            .find(|&(_, piece)| piece.side() == side && piece.kind() == PieceKind::King)
            .map(|(location, _)| location)
    }

    /// Material balance, positive when red is ahead.
    pub fn evaluate(&self) -> i32 {
        self.iter_pieces().map(|(_, piece)| piece.value()).sum()
    }

    pub fn display(&self, format: DisplayFormat) -> impl Display + '_ {
        struct Impl<'a>(&'a Board, DisplayFormat);
        return Impl(self, format);

        impl Display for Impl<'_> {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                let &Self(board, format) = self;

                if format.concise {
                    return write!(f, "{}", board.fen());
                }

                if format.labels {
                    write!(f, "  ")?;
                    for col in 0..Board::WIDTH {
                        if col > 0 {
                            write!(f, " ")?;
                        }
                        write!(f, " {col}")?;
                    }
                    writeln!(f)?;
                }

                for row in 0..Board::HEIGHT {
                    if format.labels {
                        write!(f, "{row} ")?;
                    }
                    for col in 0..Board::WIDTH {
                        if col > 0 {
                            write!(f, " ")?;
                        }
                        match board.get(row, col).flatten() {
                            Some(piece) => write!(f, "{}", piece.display(format))?,
                            None => write!(f, "{}", DisplayFormat::EMPTY_CELL)?,
                        }
                    }
                    writeln!(f)?;
                }

                Ok(())
            }
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<Location> for Board {
    type Output = Option<Piece>;
    fn index(&self, index: Location) -> &Self::Output {
        &self.pieces[index.index()]
    }
}

impl IndexMut<Location> for Board {
    fn index_mut(&mut self, index: Location) -> &mut Self::Output {
        &mut self.pieces[index.index()]
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display(DisplayFormat::pretty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn piece(row: i8, col: i8) -> Option<Piece> {
        Board::opening().get(row, col).flatten()
    }

    #[test]
    fn opening_layout() {
        let red = |kind| Some(Piece::new(kind, Side::Red));
        let black = |kind| Some(Piece::new(kind, Side::Black));

        assert_eq!(piece(0, 0), black(PieceKind::Chariot));
        assert_eq!(piece(0, 4), black(PieceKind::King));
        assert_eq!(piece(2, 1), black(PieceKind::Cannon));
        assert_eq!(piece(3, 8), black(PieceKind::Pawn));
        assert_eq!(piece(6, 0), red(PieceKind::Pawn));
        assert_eq!(piece(7, 7), red(PieceKind::Cannon));
        assert_eq!(piece(9, 1), red(PieceKind::Horse));
        assert_eq!(piece(9, 4), red(PieceKind::King));
        assert_eq!(piece(4, 4), None);
        assert_eq!(Board::opening().iter_pieces().count(), 32);
    }

    #[test]
    fn fen_round_trips_opening() {
        assert_eq!(Board::opening().fen(), Board::OPENING_FEN);
    }

    #[test]
    fn rejects_malformed_fen() {
        assert!(Board::from_fen("9/9/9").is_none());
        assert!(Board::from_fen("rheakaehrr/9/9/9/9/9/9/9/9/9").is_none());
        assert!(Board::from_fen("8/9/9/9/9/9/9/9/9/9").is_none());
        assert!(Board::from_fen("x8/9/9/9/9/9/9/9/9/9").is_none());
        assert!(Board::from_fen("9/9/9/9/9/9/9/9/9/9/9").is_none());
        assert!(Board::from_fen("9/9/9/9/9/9/9/9/9/9").is_some());
    }

    #[test]
    fn rejects_far_too_many_ranks() {
        assert!(Board::from_fen(&vec!["9"; 200].join("/")).is_none());
        assert!(Board::from_fen(&vec!["9"; 11].join("/")).is_none());
    }

    #[test]
    fn opening_is_balanced() {
        assert_eq!(Board::opening().evaluate(), 0);
    }

    #[test]
    fn evaluation_sums_signed_values() {
        let board = Board::from_fen("9/9/9/4p4/9/9/9/9/9/R8").unwrap();
        assert_eq!(board.evaluate(), 50 - 10);

        // Cannons, advisors and elephants carry no weight.
        let board = Board::from_fen("9/9/1c5c1/9/9/9/9/9/9/2EA1AE2").unwrap();
        assert_eq!(board.evaluate(), 0);
    }

    #[test]
    fn out_of_bounds_cells_are_none() {
        let board = Board::opening();
        assert_eq!(board.get(10, 0), None);
        assert_eq!(board.get(0, -1), None);
        assert_eq!(board.get(1, 1), Some(None));
    }

    #[test]
    fn finds_kings() {
        let board = Board::opening();
        assert_eq!(board.find_king(Side::Red), Location::new(9, 4));
        assert_eq!(board.find_king(Side::Black), Location::new(0, 4));
        assert_eq!(Board::new().find_king(Side::Red), None);
    }
}
