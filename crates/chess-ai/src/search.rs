//! Minimax search with alpha-beta pruning.
//!
//! The search walks the one position in place: every child is visited through
//! a [`Probe`](chess_engine::Probe), which restores the board when it drops.

use chess_core::{Color, Move};
use chess_engine::{is_king_attacked, legal_moves, Position};
use tracing::debug;

use crate::evaluation::evaluate;
use crate::ordering::order_moves;

/// Score of a mated side. Larger than any reachable material sum.
pub const INFINITY: i32 = 1_000_000;

/// Search state
#[derive(Debug, Clone)]
pub struct Searcher {
    /// The side the maximizing player plays.
    perspective: Color,
    nodes: u64,
    node_limit: Option<u64>,
}

impl Searcher {
    /// Creates an unbounded searcher maximizing for `perspective`.
    pub fn new(perspective: Color) -> Self {
        Searcher {
            perspective,
            nodes: 0,
            node_limit: None,
        }
    }

    /// Stops expanding nodes once `limit` nodes were visited; further nodes
    /// are scored statically. The root is always expanded.
    pub fn with_node_limit(mut self, limit: u64) -> Self {
        self.node_limit = Some(limit.max(1));
        self
    }

    /// Nodes visited so far.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    fn budget_exhausted(&self) -> bool {
        self.node_limit.is_some_and(|limit| self.nodes > limit)
    }

    /// Searches `depth` plies from the root with a full window.
    pub fn search(&mut self, position: &mut Position, depth: u32) -> (i32, Option<Move>) {
        let (score, best) = self.minimax(position, depth, -INFINITY, INFINITY, true);
        debug!(
            depth,
            nodes = self.nodes,
            score,
            best = ?best,
            color = %self.perspective,
            "search finished"
        );
        (score, best)
    }

    /// Alpha-beta minimax.
    ///
    /// The maximizer plays the searcher's perspective color. Returns the score
    /// and the best move at this node, or `None` at leaves and terminal nodes.
    pub fn minimax(
        &mut self,
        position: &mut Position,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> (i32, Option<Move>) {
        self.nodes += 1;
        let side = if maximizing {
            self.perspective
        } else {
            self.perspective.opposite()
        };

        if depth == 0 || self.budget_exhausted() {
            return (evaluate(position, self.perspective, side), None);
        }

        let mut moves = legal_moves(position, side);
        if moves.is_empty() {
            let score = if !is_king_attacked(position, side) {
                0
            } else if maximizing {
                -INFINITY
            } else {
                INFINITY
            };
            return (score, None);
        }

        order_moves(position, &mut moves);
        let mut best_move = moves[0];

        if maximizing {
            let mut max_eval = -INFINITY;
            for &mv in &moves {
                let (score, _) = {
                    let mut child = position.probe(mv);
                    self.minimax(&mut child, depth - 1, alpha, beta, false)
                };
                if score > max_eval {
                    max_eval = score;
                    best_move = mv;
                }
                alpha = alpha.max(score);
                if beta <= alpha {
                    break;
                }
            }
            (max_eval, Some(best_move))
        } else {
            let mut min_eval = INFINITY;
            for &mv in &moves {
                let (score, _) = {
                    let mut child = position.probe(mv);
                    self.minimax(&mut child, depth - 1, alpha, beta, true)
                };
                if score < min_eval {
                    min_eval = score;
                    best_move = mv;
                }
                beta = beta.min(score);
                if beta <= alpha {
                    break;
                }
            }
            (min_eval, Some(best_move))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mv(from: &str, to: &str) -> Move {
        Move::from_algebraic_pair(from, to).unwrap()
    }

    /// Plain minimax without pruning or ordering.
    fn full_width(
        position: &mut Position,
        perspective: Color,
        depth: u32,
        maximizing: bool,
    ) -> i32 {
        let side = if maximizing {
            perspective
        } else {
            perspective.opposite()
        };
        if depth == 0 {
            return evaluate(position, perspective, side);
        }
        let moves = legal_moves(position, side);
        if moves.is_empty() {
            return match (is_king_attacked(position, side), maximizing) {
                (false, _) => 0,
                (true, true) => -INFINITY,
                (true, false) => INFINITY,
            };
        }
        let mut scores = Vec::with_capacity(moves.len());
        for &m in &moves {
            let mut child = position.probe(m);
            scores.push(full_width(&mut child, perspective, depth - 1, !maximizing));
        }
        if maximizing {
            scores.into_iter().max().unwrap_or(-INFINITY)
        } else {
            scores.into_iter().min().unwrap_or(INFINITY)
        }
    }

    #[test]
    fn finds_back_rank_mate() {
        let mut pos = Position::from_placement("6k1/5ppp/8/8/8/8/8/R5K1 w").unwrap();
        let mut searcher = Searcher::new(Color::White);
        let (score, best) = searcher.search(&mut pos, 2);
        assert_eq!(best, Some(mv("a1", "a8")));
        assert_eq!(score, INFINITY);
        assert!(searcher.nodes() > 1);
    }

    #[test]
    fn mated_root_has_no_move() {
        let mut pos = Position::from_placement("R5k1/5ppp/8/8/8/8/8/6K1 b").unwrap();
        let mut searcher = Searcher::new(Color::Black);
        assert_eq!(searcher.search(&mut pos, 2), (-INFINITY, None));
    }

    #[test]
    fn stalemate_scores_zero() {
        let mut pos = Position::from_placement("8/8/8/8/8/1q6/2k5/K7 w").unwrap();
        let mut searcher = Searcher::new(Color::White);
        assert_eq!(searcher.search(&mut pos, 3), (0, None));
    }

    #[test]
    fn depth_zero_is_static_evaluation() {
        let mut pos = Position::standard();
        let mut searcher = Searcher::new(Color::White);
        let (score, best) = searcher.search(&mut pos, 0);
        assert_eq!(score, evaluate(&pos, Color::White, Color::White));
        assert_eq!(best, None);
        assert_eq!(searcher.nodes(), 1);
    }

    #[test]
    fn grabs_hanging_queen() {
        let mut pos = Position::from_placement("4k3/8/8/3q4/4P3/8/8/4K3 w").unwrap();
        let mut searcher = Searcher::new(Color::White);
        let (_, best) = searcher.search(&mut pos, 2);
        assert_eq!(best, Some(mv("e4", "d5")));
    }

    #[test]
    fn search_restores_position() {
        let mut pos = Position::standard();
        let before = pos.clone();
        Searcher::new(Color::White).search(&mut pos, 3);
        assert_eq!(pos, before);
    }

    #[test]
    fn pruning_matches_full_width() {
        let placements = [
            ("6k1/5ppp/8/8/8/8/8/R5K1 w", Color::White),
            ("4k3/8/8/3q4/4P3/8/8/4K3 w", Color::White),
            ("r3k3/1p6/8/3n4/8/2B5/5PP1/4K2R b", Color::Black),
            ("8/8/8/8/8/1q6/2k5/K7 w", Color::White),
        ];
        for (placement, color) in placements {
            for depth in 1..=3 {
                let mut pos = Position::from_placement(placement).unwrap();
                let expected = full_width(&mut pos, color, depth, true);
                let (score, _) = Searcher::new(color).search(&mut pos, depth);
                assert_eq!(score, expected, "{} at depth {}", placement, depth);
            }
        }
    }

    #[test]
    fn node_limit_bounds_expansion() {
        let mut pos = Position::standard();
        let mut unbounded = Searcher::new(Color::White);
        unbounded.search(&mut pos, 3);

        let mut bounded = Searcher::new(Color::White).with_node_limit(50);
        let (_, best) = bounded.search(&mut pos, 3);
        assert!(best.is_some());
        assert!(bounded.nodes() < unbounded.nodes());
    }

    #[test]
    fn node_limit_never_skips_the_root() {
        let mut pos = Position::standard();
        let mut searcher = Searcher::new(Color::White).with_node_limit(0);
        let (_, best) = searcher.search(&mut pos, 2);
        assert!(best.is_some());
    }
}
