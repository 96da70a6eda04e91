use crate::board::Board;
use crate::display_format::DisplayFormat;
use crate::location::Move;
use crate::piece::{Piece, PieceKind, Side};
use std::fmt::{Display, Formatter};

/// A board together with the side to move. States are never mutated once built;
/// [`GameState::apply`] returns a new, independent state.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct GameState {
    board: Board,
    side: Side,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Outcome {
    RedWon,
    BlackWon,
    /// The side to move has no pseudo-legal move.
    NoMoves(Side),
}

impl Outcome {
    pub fn display(&self, format: DisplayFormat) -> impl Display {
        let king = |side| Piece::new(PieceKind::King, side);
        let format = format.with_concise(false);
        match self {
            Self::RedWon => format!("{} won by capturing the black king", king(Side::Red).display(format)),
            Self::BlackWon => format!("{} won by capturing the red king", king(Side::Black).display(format)),
            Self::NoMoves(side) => format!("{} has no moves left", king(*side).display(format)),
        }
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display(DisplayFormat::string()))
    }
}

impl GameState {
    pub fn new(board: Board, side: Side) -> Self {
        Self { board, side }
    }

    /// Standard opening layout with red to move.
    pub fn initial() -> Self {
        Self::new(Board::opening(), Side::Red)
    }

    pub fn from_fen(fen: &str, side: Side) -> Option<Self> {
        Some(Self::new(Board::from_fen(fen)?, side))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Side {
        self.side
    }

    pub fn legal_moves(&self, side: Side) -> Vec<Move> {
        self.board.legal_moves(side)
    }

    /// Moves the piece at `mv.from` onto `mv.to` and hands the turn over.
    /// The move is not checked; an empty origin simply clears the destination.
    pub fn apply(&self, mv: Move) -> Self {
        let mut board = self.board.clone();
        let piece = board[mv.from].take();
        board[mv.to] = piece;
        Self::new(board, self.side.opponent())
    }

    pub fn evaluate(&self) -> i32 {
        self.board.evaluate()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match (self.board.find_king(Side::Red), self.board.find_king(Side::Black)) {
            (None, _) => return Some(Outcome::BlackWon),
            (_, None) => return Some(Outcome::RedWon),
            _ => {}
        }

        if self.legal_moves(self.side).is_empty() {
            return Some(Outcome::NoMoves(self.side));
        }
        None
    }

    pub fn display(&self, format: DisplayFormat) -> impl Display + '_ {
        struct Impl<'a>(&'a GameState, DisplayFormat);
        return Impl(self, format);

        impl Display for Impl<'_> {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                let &Self(state, format) = self;
                write!(f, "{}", state.board.display(format))?;

                if format.concise {
                    return write!(f, " {}", state.side);
                }

                if let Some(outcome) = state.outcome() {
                    return writeln!(f, "{}", outcome.display(format));
                }

                let king = Piece::new(PieceKind::King, state.side);
                let count = state.legal_moves(state.side).len();
                writeln!(
                    f,
                    "{} to play - {count} moves - material {}",
                    king.display(format),
                    state.evaluate()
                )
            }
        }
    }
}

impl Display for GameState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display(DisplayFormat::string()))
    }
}
