use rustc_hash::FxHashSet;

use crate::board::{Board, Move};
use crate::debruijn::de_bruijn_solvable;

/// Search counters, for progress reporting and tests. Cumulative over the
/// lifetime of a [`Solver`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    /// Positions visited by the recursive search.
    pub calls: u64,
    /// Positions skipped because they were already known to be losing.
    pub memo_hits: u64,
}

/// Depth-first backtracking search over a board's legal moves.
///
/// Dead-end configurations are memoized under all eight symmetric
/// serializations, so any rotation or reflection of a known-losing position
/// is recognized without revisiting it. The set persists across calls to
/// [`Solver::solve`]; a losing position only ever stays losing.
pub struct Solver {
    board: Board,
    known_losing_positions: FxHashSet<String>,
    stats: SearchStats,
}

impl Solver {
    pub fn new(board: Board) -> Self {
        Solver {
            board,
            known_losing_positions: FxHashSet::default(),
            stats: SearchStats::default(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Number of distinct serializations recorded as losing so far.
    pub fn known_losing_positions(&self) -> usize {
        self.known_losing_positions.len()
    }

    /// Search for a move sequence that leaves a single peg on the center.
    ///
    /// Returns the first winning sequence in [`Board::legal_moves`] order,
    /// first move first, or `None` if none exists. The board is left in its
    /// pre-search configuration either way.
    pub fn solve(&mut self) -> Option<Vec<Move>> {
        if !de_bruijn_solvable(&self.board) {
            log::info!("configuration fails the de Bruijn feasibility check");
            return None;
        }

        let mut moves = self.solve_inner()?;
        moves.reverse();
        Some(moves)
    }

    fn solve_inner(&mut self) -> Option<Vec<Move>> {
        self.stats.calls += 1;
        if self.stats.calls & 0xfff == 0 {
            log::debug!(
                "{} calls, {} memo hits, {} losing positions recorded",
                self.stats.calls,
                self.stats.memo_hits,
                self.known_losing_positions.len()
            );
        }

        if self.known_losing_positions.contains(&self.board.serialization()) {
            self.stats.memo_hits += 1;
            return None;
        }

        if self.board.is_winning() {
            return Some(Vec::new());
        }

        let snapshot = self.board.snapshot();
        for mv in self.board.legal_moves() {
            self.board.restore(&snapshot);
            self.board.apply_move(mv);

            if let Some(mut moves) = self.solve_inner() {
                self.board.restore(&snapshot);
                moves.push(mv);
                return Some(moves);
            }
        }

        self.board.restore(&snapshot);
        for serialization in self.board.symmetric_serializations() {
            self.known_losing_positions.insert(serialization);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use crate::board::Cell;

    use super::*;

    const ENGLISH: [usize; 7] = [3, 3, 7, 7, 7, 3, 3];

    fn cleared(mut board: Board) -> Board {
        for row in 0..board.height() {
            for col in 0..board.width() {
                if let Cell::Active { row, col } = board.cell(row as isize, col as isize) {
                    board.set_occupancy(row, col, false);
                }
            }
        }
        board
    }

    #[test]
    fn test_trivial_board() {
        // The 1x1 board starts with its only hole (the center) empty, and
        // the winning peg can never appear.
        let mut solver = Solver::new(Board::new(&[1]).unwrap());
        assert_eq!(solver.solve(), None);

        // With the center occupied the board is already won.
        let mut board = Board::new(&[1]).unwrap();
        board.set_occupancy(0, 0, true);
        let mut solver = Solver::new(board);
        assert_eq!(solver.solve(), Some(vec![]));
    }

    #[test]
    fn test_three_by_three_is_a_dead_end() {
        // No jump can land on the center of a 3x3 board, so the start
        // position has no legal moves at all.
        let board = Board::new(&[3, 3, 3]).unwrap();
        assert!(board.legal_moves().is_empty());

        let mut solver = Solver::new(board);
        assert_eq!(solver.solve(), None);
        assert_eq!(solver.stats().calls, 1);
        // the start position is symmetric, so its eight images collapse
        // into a single serialization
        assert_eq!(solver.known_losing_positions(), 1);
    }

    #[test]
    fn test_losing_positions_are_memoized() {
        let mut solver = Solver::new(Board::new(&[3, 3, 3]).unwrap());
        assert_eq!(solver.solve(), None);
        let first = solver.stats();
        assert_eq!(first.memo_hits, 0);

        // the second call hits the memo immediately, no further search
        assert_eq!(solver.solve(), None);
        let second = solver.stats();
        assert_eq!(second.calls, first.calls + 1);
        assert_eq!(second.memo_hits, 1);
    }

    #[test]
    fn test_infeasible_shape_is_rejected_without_search() {
        // Plus-shaped board: four pegs around an empty center, and no peg
        // can ever reach it. The GF(4) pre-check catches this outright.
        let mut solver = Solver::new(Board::new(&[1, 3, 1]).unwrap());
        assert_eq!(solver.solve(), None);
        assert_eq!(solver.stats().calls, 0);
    }

    #[test]
    fn test_single_jump_win() {
        let mut board = cleared(Board::new(&ENGLISH).unwrap());
        board.set_occupancy(3, 1, true);
        board.set_occupancy(3, 2, true);

        let mut solver = Solver::new(board);
        assert_eq!(
            solver.solve(),
            Some(vec![Move {
                src: (3, 1),
                dst: (3, 3),
            }])
        );
    }

    #[test]
    fn test_english_board_solution() {
        let mut solver = Solver::new(Board::new(&ENGLISH).unwrap());
        let moves = solver.solve().expect("the English board is solvable");

        // 32 pegs at the start, one left at the end
        assert_eq!(moves.len(), 31);

        // the search tries the first legal move first, and by symmetry the
        // board stays solvable after it
        assert_eq!(
            moves[0],
            Move {
                src: (1, 3),
                dst: (3, 3),
            }
        );

        // the sequence replays as legal moves and ends in a win
        let mut board = Board::new(&ENGLISH).unwrap();
        for &mv in &moves {
            assert!(board.legal_moves().contains(&mv));
            board.apply_move(mv);
        }
        assert!(board.is_winning());

        // the solver's board is back in its start configuration
        assert_eq!(
            solver.board().serialization(),
            Board::new(&ENGLISH).unwrap().serialization()
        );
    }

    #[test]
    fn test_solve_is_deterministic() {
        let mut first = Solver::new(Board::new(&ENGLISH).unwrap());
        let mut second = Solver::new(Board::new(&ENGLISH).unwrap());
        assert_eq!(first.solve(), second.solve());
    }
}
