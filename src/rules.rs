use crate::board::Board;
use crate::location::{Location, Move};
use crate::piece::{Piece, PieceKind, Side};

const RED_PAWN_STEPS: [(i8, i8); 3] = [(Side::Red.forward(), 0), (0, 1), (0, -1)];
const BLACK_PAWN_STEPS: [(i8, i8); 3] = [(Side::Black.forward(), 0), (0, 1), (0, -1)];
const CHARIOT_STEPS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const HORSE_JUMPS: [(i8, i8); 8] = [(-2, -1), (-2, 1), (2, -1), (2, 1), (-1, -2), (-1, 2), (1, -2), (1, 2)];

/// How a piece kind generates moves. Offsets are `(row, col)` deltas tried in order.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum MoveRule {
    /// One step along each offset.
    Step(&'static [(i8, i8)]),
    /// A jump along each offset, suppressed when the leg cell next to the origin is occupied.
    Jump(&'static [(i8, i8)]),
    /// Generates nothing.
    Inert,
}

impl MoveRule {
    pub fn of(piece: Piece) -> Self {
        match (piece.kind(), piece.side()) {
            (PieceKind::Pawn, Side::Red) => MoveRule::Step(&RED_PAWN_STEPS),
            (PieceKind::Pawn, Side::Black) => MoveRule::Step(&BLACK_PAWN_STEPS),
            (PieceKind::Chariot, _) => MoveRule::Step(&CHARIOT_STEPS),
            (PieceKind::Horse, _) => MoveRule::Jump(&HORSE_JUMPS),
            (PieceKind::Elephant | PieceKind::Advisor | PieceKind::King | PieceKind::Cannon, _) => {
                MoveRule::Inert
            }
        }
    }
}

/// The orthogonal neighbour of `from` along the longer axis of a horse jump.
fn leg(from: Location, (row, col): (i8, i8)) -> Option<Location> {
    if row.abs() == 2 {
        from.shift(row / 2, 0)
    } else {
        from.shift(0, col / 2)
    }
}

impl Board {
    fn can_land(&self, to: Location, side: Side) -> bool {
        self[to].is_none_or(|target| target.side() != side)
    }

    /// Appends the pseudo-legal moves of the piece at `from`, if any.
    pub fn fill_piece_moves(&self, from: Location, moves: &mut Vec<Move>) {
        let Some(piece) = self[from] else { return };
        let side = piece.side();

        match MoveRule::of(piece) {
            MoveRule::Step(offsets) => {
                for &(row, col) in offsets {
                    if let Some(to) = from.shift(row, col) {
                        if self.can_land(to, side) {
                            moves.push(Move::new(from, to));
                        }
                    }
                }
            }
            MoveRule::Jump(offsets) => {
                for &offset in offsets {
                    let Some(to) = from.shift(offset.0, offset.1) else { continue };
                    if leg(from, offset).is_some_and(|leg| self[leg].is_some()) {
                        continue;
                    }
                    if self.can_land(to, side) {
                        moves.push(Move::new(from, to));
                    }
                }
            }
            MoveRule::Inert => {}
        }
    }

    /// Pseudo-legal moves for `side` in row-major scan order. Moves that leave the
    /// mover's own king exposed are included.
    pub fn fill_moves(&self, side: Side, moves: &mut Vec<Move>) {
        for (from, piece) in self.iter_pieces() {
            if piece.side() == side {
                self.fill_piece_moves(from, moves);
            }
        }
    }

    pub fn legal_moves(&self, side: Side) -> Vec<Move> {
        let mut moves = Vec::new();
        self.fill_moves(side, &mut moves);
        moves
    }
}
