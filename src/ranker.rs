use crate::display_format::DisplayFormat;
use crate::game::GameState;
use crate::location::Move;
use log::{debug, trace};
use std::fmt::{Display, Formatter};

/// Sentinel score; a node with no moves reports `-INFINITY` when maximizing and
/// `INFINITY` when minimizing.
pub const INFINITY: i32 = i32::MAX;

pub const DEFAULT_DEPTH: u32 = 3;

/// Which way a search node pushes the red-positive score.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Role {
    Maximizer,
    Minimizer,
}

impl Role {
    /// The computer opponent always minimizes, whichever side it actually plays.
    pub const OPPONENT: Role = Role::Minimizer;

    pub fn flip(self) -> Self {
        match self {
            Role::Maximizer => Role::Minimizer,
            Role::Minimizer => Role::Maximizer,
        }
    }

    fn worst(self) -> i32 {
        match self {
            Role::Maximizer => -INFINITY,
            Role::Minimizer => INFINITY,
        }
    }

    fn improves(self, value: i32, best: i32) -> bool {
        match self {
            Role::Maximizer => value > best,
            Role::Minimizer => value < best,
        }
    }
}

/// Depth-first search over freshly applied states. Counts every state it visits.
#[derive(Default, Debug)]
pub struct Search {
    nodes: u64,
}

impl Search {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Minimax with alpha-beta pruning. Moves come from the side to move in `state`;
    /// `role` only decides whether the score is maximized or minimized.
    pub fn alpha_beta(
        &mut self,
        state: &GameState,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        role: Role,
    ) -> (i32, Option<Move>) {
        self.nodes += 1;
        if depth == 0 {
            return (state.evaluate(), None);
        }

        let mut best = role.worst();
        let mut best_move = None;

        for mv in state.legal_moves(state.side_to_move()) {
            let (value, _) = self.alpha_beta(&state.apply(mv), depth - 1, alpha, beta, role.flip());

            if role.improves(value, best) {
                best = value;
                best_move = Some(mv);
            }

            match role {
                Role::Maximizer => alpha = alpha.max(value),
                Role::Minimizer => beta = beta.min(value),
            }

            if beta <= alpha {
                break;
            }
        }

        (best, best_move)
    }

    /// Exhaustive minimax with the same move order and sentinels as [`Search::alpha_beta`].
    pub fn minimax(&mut self, state: &GameState, depth: u32, role: Role) -> (i32, Option<Move>) {
        self.nodes += 1;
        if depth == 0 {
            return (state.evaluate(), None);
        }

        let mut best = role.worst();
        let mut best_move = None;

        for mv in state.legal_moves(state.side_to_move()) {
            let (value, _) = self.minimax(&state.apply(mv), depth - 1, role.flip());
            if role.improves(value, best) {
                best = value;
                best_move = Some(mv);
            }
        }

        (best, best_move)
    }
}

/// Full-window alpha-beta search from `state` in the given role.
pub fn search(state: &GameState, depth: u32, role: Role) -> (i32, Option<Move>) {
    let mut search = Search::new();
    let (score, mv) = search.alpha_beta(state, depth, -INFINITY, INFINITY, role);

    match mv {
        Some(mv) => debug!(
            "{role:?} searched {} nodes at depth {depth}: {mv} scores {score}",
            search.nodes()
        ),
        None => debug!(
            "{role:?} searched {} nodes at depth {depth}: no move, score {score}",
            search.nodes()
        ),
    }

    (score, mv)
}

/// Best move for the computer opponent. Returns no move at depth zero or when the
/// side to move has nothing to play.
pub fn search_best_move(state: &GameState, depth: u32) -> (i32, Option<Move>) {
    search(state, depth, Role::OPPONENT)
}

/// Scores each root move separately, for presenting hints.
pub struct Ranker {
    state: GameState,
    role: Role,
    entries: Vec<Entry>,
}

#[derive(Clone, Debug)]
struct Entry {
    mv: Move,
    value: i32,
    checked: u64,
}

impl Ranker {
    pub fn new(state: GameState, role: Role) -> Ranker {
        let entries = state
            .legal_moves(state.side_to_move())
            .into_iter()
            .map(|mv| Entry {
                mv,
                value: role.worst(),
                checked: 0,
            })
            .collect();
        Ranker { state, role, entries }
    }

    /// Scores every root move by searching `depth` further plies after it, so a
    /// depth of zero ranks moves by the material they leave on the board.
    pub fn rank(&mut self, depth: u32) {
        for entry in &mut self.entries {
            let mut search = Search::new();
            let child = self.state.apply(entry.mv);
            let (value, _) = search.alpha_beta(&child, depth, -INFINITY, INFINITY, self.role.flip());

            entry.value = value;
            entry.checked = search.nodes();
            trace!("ranked {} at {} after {} nodes", entry.mv, entry.value, entry.checked);
        }
    }

    /// First move in generation order with the best value.
    pub fn best(&self) -> Option<(Move, i32)> {
        let mut best: Option<&Entry> = None;
        for entry in &self.entries {
            if best.is_none_or(|best| self.role.improves(entry.value, best.value)) {
                best = Some(entry);
            }
        }
        best.map(|entry| (entry.mv, entry.value))
    }

    /// Moves ordered best first; ties keep generation order.
    pub fn ranked(&self) -> Vec<(Move, i32)> {
        let mut entries = self.entries.clone();
        match self.role {
            Role::Maximizer => entries.sort_by_key(|e| std::cmp::Reverse(e.value)),
            Role::Minimizer => entries.sort_by_key(|e| e.value),
        }
        entries.into_iter().map(|e| (e.mv, e.value)).collect()
    }

    pub fn display(&self, format: DisplayFormat) -> impl Display + '_ {
        struct Impl<'a>(&'a Ranker, DisplayFormat);
        return Impl(self, format);

        impl Display for Impl<'_> {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                let &Self(ranker, format) = self;
                let checked = |mv: Move| {
                    ranker
                        .entries
                        .iter()
                        .find(|e| e.mv == mv)
                        .map_or(0, |e| e.checked)
                };

                for (mv, value) in ranker.ranked() {
                    let piece = ranker.state.board()[mv.from];
                    match piece {
                        Some(piece) if !format.concise => {
                            write!(f, "{} ", piece.display(format))?;
                        }
                        _ => {}
                    }
                    writeln!(f, "{mv}  {value}  ({} nodes)", checked(mv))?;
                }

                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::Side;

    fn state(fen: &str, side: Side) -> GameState {
        GameState::from_fen(fen, side).unwrap()
    }

    #[test]
    fn depth_zero_is_static_evaluation() {
        let state = state("9/9/9/4p4/9/9/9/9/9/R8", Side::Red);
        for role in [Role::Maximizer, Role::Minimizer] {
            assert_eq!(search(&state, 0, role), (40, None));
        }
        assert_eq!(search_best_move(&GameState::initial(), 0), (0, None));
    }

    #[test]
    fn no_moves_keeps_the_sentinel() {
        let state = state("4k4/9/9/9/9/9/9/9/9/4K4", Side::Red);
        assert_eq!(search(&state, 2, Role::Maximizer), (-INFINITY, None));
        assert_eq!(search(&state, 2, Role::Minimizer), (INFINITY, None));
    }

    #[test]
    fn maximizer_takes_a_hanging_piece() {
        // Red chariot next to a black horse; black can only shuffle a pawn.
        let state = state("9/9/9/9/9/3hR4/9/9/p8/9", Side::Red);
        let (score, mv) = search(&state, 1, Role::Maximizer);
        assert_eq!(mv.map(|mv| mv.to_string()), Some("5 4 5 3".to_owned()));
        assert_eq!(score, 50 - 10);
    }

    #[test]
    fn minimizer_takes_a_hanging_piece() {
        let state = state("9/9/9/9/9/3hR4/9/9/9/9", Side::Black);
        let (score, mv) = search_best_move(&state, 1);
        // The horse cannot reach the chariot, so black keeps material.
        assert_eq!(score, 50 - 30);
        assert!(mv.is_some());

        let state = self::state("9/9/9/9/4p4/4R4/9/9/9/9", Side::Black);
        let (score, mv) = search_best_move(&state, 1);
        assert_eq!(mv.map(|mv| mv.to_string()), Some("4 4 5 4".to_owned()));
        assert_eq!(score, -10);
    }

    #[test]
    fn pruning_matches_exhaustive_minimax() {
        let start = GameState::initial();
        let states = [
            start.clone(),
            start.apply("6 4 5 4".parse().unwrap()),
            state("2h1k4/9/9/p3p4/4R4/2H6/P8/9/9/4K4", Side::Red),
        ];

        for state in &states {
            for depth in 1..=3 {
                for role in [Role::Maximizer, Role::Minimizer] {
                    let mut pruned = Search::new();
                    let mut full = Search::new();
                    let (a, _) = pruned.alpha_beta(state, depth, -INFINITY, INFINITY, role);
                    let (b, _) = full.minimax(state, depth, role);
                    assert_eq!(a, b, "depth {depth} {role:?}");
                    assert!(pruned.nodes() <= full.nodes());
                }
            }
        }
    }

    #[test]
    fn ranker_agrees_with_search() {
        for role in [Role::Maximizer, Role::Minimizer] {
            let state = GameState::initial();
            let mut ranker = Ranker::new(state.clone(), role);
            ranker.rank(1);

            let (score, mv) = search(&state, 2, role);
            assert_eq!(ranker.best(), mv.map(|mv| (mv, score)));
            assert_eq!(ranker.ranked().len(), 19);
            assert_eq!(ranker.ranked()[0].1, score);
        }
    }

    #[test]
    fn ranker_at_depth_zero_uses_material() {
        let state = state("9/9/9/9/4p4/4R4/9/9/9/9", Side::Red);
        let mut ranker = Ranker::new(state, Role::Maximizer);
        ranker.rank(0);

        let best = ranker.best().map(|(mv, value)| (mv.to_string(), value));
        assert_eq!(best, Some(("5 4 4 4".to_owned(), 50)));
        let values: Vec<i32> = ranker.ranked().iter().map(|&(_, value)| value).collect();
        assert_eq!(values, vec![50, 40, 40, 40]);
    }

    #[test]
    fn opponent_minimizes_even_with_red_to_move() {
        // Red to move: the maximizer would take the pawn, the opponent's role must not.
        let state = state("9/9/9/9/4p4/4R4/9/9/9/9", Side::Red);

        let opponent = search_best_move(&state, 1);
        assert_eq!(opponent, search(&state, 1, Role::Minimizer));
        assert_ne!(opponent, search(&state, 1, Role::Maximizer));
        assert_eq!(opponent.0, 40);
        assert_eq!(opponent.1.map(|mv| mv.to_string()), Some("5 4 6 4".to_owned()));

        let deeper = search_best_move(&state, 3);
        assert_eq!(deeper, search(&state, 3, Role::Minimizer));
    }

    #[test]
    fn ranker_without_moves() {
        let state = state("4k4/9/9/9/9/9/9/9/9/4K4", Side::Red);
        let mut ranker = Ranker::new(state, Role::Maximizer);
        ranker.rank(3);
        assert_eq!(ranker.best(), None);
        assert_eq!(ranker.display(DisplayFormat::string()).to_string(), "");
    }
}
