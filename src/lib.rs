//! Co Tuong (Xiangqi) engine with a partial move set and a material-only alpha-beta search.
//!
//! Only pawns, chariots and horses move. Pawns step forward or sideways, chariots
//! take a single orthogonal step and horses jump unless their leg is blocked.
//! Elephants, advisors, kings and cannons never move. There is no check detection.

pub mod board;
pub mod display_format;
pub mod game;
pub mod location;
pub mod piece;
pub mod ranker;
pub mod rules;

pub use game::GameState;
pub use location::{Location, Move};
pub use piece::Side;
pub use ranker::{search_best_move, Role};

/// Opening position, red to move.
pub fn initial_state() -> GameState {
    GameState::initial()
}

/// Pseudo-legal moves of `side` in board scan order; possibly empty.
pub fn legal_moves(state: &GameState, side: Side) -> Vec<Move> {
    state.legal_moves(side)
}

/// New state with `mv` played and the turn handed over. `state` is left as it was;
/// the move is not validated.
pub fn apply(state: &GameState, mv: Move) -> GameState {
    state.apply(mv)
}

/// Material balance of the board, positive when red is ahead.
pub fn evaluate(state: &GameState) -> i32 {
    state.evaluate()
}
