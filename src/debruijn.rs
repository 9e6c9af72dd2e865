use std::ops::{Add, AddAssign, Mul, MulAssign};

use crate::board::{Board, Cell};

/// Galois Field with four elements.
///
/// We follow the naming conventions used by de Bruijn
#[derive(PartialEq, Eq, Debug, Clone, Copy, Default)]
pub enum GF4 {
    #[default]
    Zero,
    One,
    P,
    Q,
}

impl AddAssign for GF4 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl MulAssign for GF4 {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl Add for GF4 {
    type Output = GF4;

    fn add(self, rhs: GF4) -> Self::Output {
        match (self, rhs) {
            (GF4::Zero, other) => other,
            (other, GF4::Zero) => other,
            (GF4::One, GF4::One) => GF4::Zero,
            (GF4::One, GF4::P) => GF4::Q,
            (GF4::One, GF4::Q) => GF4::P,
            (GF4::P, GF4::One) => GF4::Q,
            (GF4::P, GF4::P) => GF4::Zero,
            (GF4::P, GF4::Q) => GF4::One,
            (GF4::Q, GF4::One) => GF4::P,
            (GF4::Q, GF4::P) => GF4::One,
            (GF4::Q, GF4::Q) => GF4::Zero,
        }
    }
}

impl Mul for GF4 {
    type Output = GF4;

    fn mul(self, rhs: GF4) -> Self::Output {
        match (self, rhs) {
            (GF4::Zero, _) => GF4::Zero,
            (_, GF4::Zero) => GF4::Zero,
            (GF4::One, other) => other,
            (other, GF4::One) => other,
            (GF4::P, GF4::P) => GF4::Q,
            (GF4::P, GF4::Q) => GF4::One,
            (GF4::Q, GF4::P) => GF4::One,
            (GF4::Q, GF4::Q) => GF4::P,
        }
    }
}

impl GF4 {
    /// Raise the element to a given whole-number power
    fn pow(self, exp: isize) -> Self {
        let exp = exp.rem_euclid(3);

        let mut out = GF4::One;
        for _ in 0..exp {
            out *= self;
        }

        out
    }
}

/// The values of de Bruijn's functions A and B for the current
/// configuration, with coordinates taken relative to the board center.
///
/// A jump replaces p^k + p^(k+1) by p^(k+2) along its axis, and since
/// p^2 = p + 1 in GF(4) both sums are invariant under every jump. This
/// holds for any board shape, not just the standard 33-hole cross.
pub fn de_bruijn_class(board: &Board) -> (GF4, GF4) {
    let (center_row, center_col) = board.center();

    let mut a = GF4::Zero;
    let mut b = GF4::Zero;

    for row in 0..board.height() {
        for col in 0..board.width() {
            let Cell::Active { row, col } = board.cell(row as isize, col as isize) else {
                continue;
            };
            if !board.is_occupied(row, col) {
                continue;
            }

            let x = col as isize - center_col as isize;
            let y = row as isize - center_row as isize;

            a += GF4::P.pow(x + y);
            b += GF4::P.pow(x - y);
        }
    }

    (a, b)
}

/// A necessary, but not sufficient, condition that the current configuration
/// can be reduced to a single peg on the center.
///
/// A lone center peg has class (One, One), so any configuration with a
/// different class can be rejected without searching.
pub fn de_bruijn_solvable(board: &Board) -> bool {
    de_bruijn_class(board) == (GF4::One, GF4::One)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn english() -> Board {
        Board::new(&[3, 3, 7, 7, 7, 3, 3]).unwrap()
    }

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

    // Check that equation (1) from "A solitaire game and its relations to a finite field" holds
    #[test]
    fn eq_one() {
        assert_eq!(GF4::One + GF4::P, GF4::P * GF4::P);
        assert_eq!(GF4::P + GF4::P * GF4::P, GF4::One);
    }

    #[test]
    fn exponents_from_paper() {
        assert_eq!(GF4::P.pow(-1 + 1), GF4::One);
        assert_eq!(GF4::P.pow(0 + 2), GF4::Q);
        assert_eq!(GF4::P.pow(0 - 2), GF4::P);
        assert_eq!(GF4::P.pow(1 + 1), GF4::Q);
        assert_eq!(GF4::P.pow(2 + 1), GF4::One);
        assert_eq!(GF4::P.pow(3 + 2), GF4::Q);
    }

    #[test]
    fn start_and_end_classes() {
        assert_eq!(de_bruijn_class(&english()), (GF4::One, GF4::One));

        let mut end = cleared(english());
        end.set_occupancy(3, 3, true);
        assert_eq!(de_bruijn_class(&end), (GF4::One, GF4::One));
    }

    #[test]
    fn empty_board() {
        assert_eq!(de_bruijn_class(&cleared(english())), (GF4::Zero, GF4::Zero));
    }

    #[test]
    fn three_in_line_have_no_effect() {
        let mut board = cleared(english());
        board.set_occupancy(3, 1, true);
        board.set_occupancy(3, 2, true);
        board.set_occupancy(3, 3, true);
        assert_eq!(de_bruijn_class(&board), (GF4::Zero, GF4::Zero));
    }

    #[test]
    fn class_is_invariant_under_jumps() {
        let mut board = english();
        let before = de_bruijn_class(&board);
        for mv in board.legal_moves() {
            board.apply_move(mv);
            assert_eq!(de_bruijn_class(&board), before);
            board.undo_move(mv);
        }
    }

    #[test]
    fn plus_shape_start_is_infeasible() {
        let board = Board::new(&[1, 3, 1]).unwrap();
        assert!(!de_bruijn_solvable(&board));
    }
}
