//! Peg solitaire solver for cross-shaped boards.
//!
//! A board is described by a list of odd row widths (an odd number of them),
//! each row's active span centered on the grid. The start configuration has
//! every hole occupied except the center; the goal is a sequence of jumps
//! leaving a single peg on the center.
//!
//! [`Solver`] runs a depth-first backtracking search over [`Board`]'s legal
//! moves, memoizing dead-end configurations together with their eight
//! symmetric images and rejecting infeasible configurations up front with
//! de Bruijn's GF(4) resource count.

pub mod board;
pub mod debruijn;
pub mod solver;

pub use board::{Board, Cell, InactiveCellError, Move, ShapeError, Symmetry};
pub use solver::{SearchStats, Solver};
