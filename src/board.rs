use bitvec::{bitvec, vec::BitVec};
use thiserror::Error;

/// Rejected row-width lists. The shape must have a unique center hole,
/// which requires an odd number of rows and odd widths throughout.
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum ShapeError {
    #[error("board needs at least one row")]
    Empty,
    #[error("row count must be odd, got {0}")]
    EvenRowCount(usize),
    #[error("row widths must be odd, got {0}")]
    EvenRowWidth(usize),
}

/// Occupancy access through an [`Cell::Inactive`] variant. Correct move
/// generation never produces one of these; it exists to keep such bugs loud.
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
#[error("occupancy access on an inactive cell")]
pub struct InactiveCellError;

/// One grid position. Inactive cells lie outside the playable cross and
/// carry no occupancy; the variant and coordinates never change after
/// construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Inactive,
    Active { row: usize, col: usize },
}

/// A single peg jump: the source peg moves two holes along one axis,
/// removing the peg it jumped over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub src: (usize, usize),
    pub dst: (usize, usize),
}

impl Move {
    /// Coordinates of the jumped peg. Valid because every move spans
    /// exactly two holes, so the midpoint is a grid position.
    pub fn jumped(self) -> (usize, usize) {
        (
            (self.src.0 + self.dst.0) / 2,
            (self.src.1 + self.dst.1) / 2,
        )
    }
}

/// The eight coordinate remaps of the dihedral group of the square, in the
/// order they are applied for [`Board::symmetric_serializations`]. Identity
/// comes first so that the untransformed serialization is entry 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symmetry {
    Identity,
    Diagonal,
    FlipHorizontal,
    Rotate90,
    FlipVertical,
    Rotate270,
    Rotate180,
    AntiDiagonal,
}

impl Symmetry {
    pub const ALL: [Symmetry; 8] = [
        Symmetry::Identity,
        Symmetry::Diagonal,
        Symmetry::FlipHorizontal,
        Symmetry::Rotate90,
        Symmetry::FlipVertical,
        Symmetry::Rotate270,
        Symmetry::Rotate180,
        Symmetry::AntiDiagonal,
    ];

    /// Remap grid coordinates on a square of side `m + 1`.
    pub fn apply(self, i: usize, j: usize, m: usize) -> (usize, usize) {
        match self {
            Symmetry::Identity => (i, j),
            Symmetry::Diagonal => (j, i),
            Symmetry::FlipHorizontal => (i, m - j),
            Symmetry::Rotate90 => (j, m - i),
            Symmetry::FlipVertical => (m - i, j),
            Symmetry::Rotate270 => (m - j, i),
            Symmetry::Rotate180 => (m - i, m - j),
            Symmetry::AntiDiagonal => (m - j, m - i),
        }
    }
}

/// A cross-shaped board: the fixed grid of cells plus the current occupancy
/// configuration.
///
/// The configuration is the entire mutable state. It has one bit per grid
/// slot, including inactive slots, which are initialized occupied but never
/// read. The solver snapshots and restores it around trial moves.
#[derive(Debug, Clone)]
pub struct Board {
    width: usize,
    height: usize,
    center: (usize, usize),
    cells: Vec<Cell>,
    configuration: BitVec,
}

impl Board {
    /// Build a board from its row widths, outermost row first. Each row's
    /// active span is centered. The start configuration has every active
    /// cell occupied except the center.
    pub fn new(row_widths: &[usize]) -> Result<Board, ShapeError> {
        let height = row_widths.len();
        if height == 0 {
            return Err(ShapeError::Empty);
        }
        if height % 2 == 0 {
            return Err(ShapeError::EvenRowCount(height));
        }
        // All widths are odd, so their maximum is odd as well.
        let mut width = 0;
        for &row_width in row_widths {
            if row_width % 2 == 0 {
                return Err(ShapeError::EvenRowWidth(row_width));
            }
            width = width.max(row_width);
        }

        let mut cells = Vec::with_capacity(width * height);
        for (row, &row_width) in row_widths.iter().enumerate() {
            let padding = (width - row_width) / 2;
            for col in 0..width {
                let active = padding <= col && col < width - padding;
                cells.push(if active {
                    Cell::Active { row, col }
                } else {
                    Cell::Inactive
                });
            }
        }

        let center = (height / 2, width / 2);
        let mut configuration = bitvec![1; width * height];
        configuration.set(center.0 * width + center.1, false);

        Ok(Board {
            width,
            height,
            center,
            cells,
            configuration,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// The unique hole that must hold the final peg.
    pub fn center(&self) -> (usize, usize) {
        self.center
    }

    /// Cell lookup with an inactive sentinel for out-of-range coordinates.
    /// Move generation relies on this instead of explicit bounds checks.
    pub fn cell(&self, row: isize, col: isize) -> Cell {
        if row < 0 || col < 0 || row >= self.height as isize || col >= self.width as isize {
            return Cell::Inactive;
        }
        self.cells[row as usize * self.width + col as usize]
    }

    /// Raw configuration read. Only meaningful for active coordinates.
    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        self.configuration[row * self.width + col]
    }

    /// Raw configuration write. Only meaningful for active coordinates.
    pub fn set_occupancy(&mut self, row: usize, col: usize, value: bool) {
        self.configuration.set(row * self.width + col, value);
    }

    /// Occupancy read guarded by the cell variant.
    pub fn occupied(&self, cell: Cell) -> Result<bool, InactiveCellError> {
        match cell {
            Cell::Inactive => Err(InactiveCellError),
            Cell::Active { row, col } => Ok(self.is_occupied(row, col)),
        }
    }

    /// Occupancy write guarded by the cell variant.
    pub fn set_occupied(&mut self, cell: Cell, value: bool) -> Result<(), InactiveCellError> {
        match cell {
            Cell::Inactive => Err(InactiveCellError),
            Cell::Active { row, col } => {
                self.set_occupancy(row, col, value);
                Ok(())
            }
        }
    }

    /// Number of pegs on the board.
    pub fn peg_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|cell| matches!(self.occupied(**cell), Ok(true)))
            .count()
    }

    /// All legal jumps from the current configuration.
    ///
    /// The order is part of the contract: cells in row-major order, each
    /// occupied cell acting as the jumped peg, vertical axis before
    /// horizontal. The search visits moves in this order, which determines
    /// which of several solutions is found first.
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::new();

        for cell in &self.cells {
            let Cell::Active { row, col } = *cell else {
                continue;
            };
            if !self.is_occupied(row, col) {
                continue;
            }

            let (row, col) = (row as isize, col as isize);
            for (dr, dc) in [(1, 0), (0, 1)] {
                let before = self.cell(row - dr, col - dc);
                let after = self.cell(row + dr, col + dc);
                let (Cell::Active { row: br, col: bc }, Cell::Active { row: ar, col: ac }) =
                    (before, after)
                else {
                    // the axis runs off the cross, no jump possible here
                    continue;
                };

                if self.is_occupied(br, bc) {
                    if !self.is_occupied(ar, ac) {
                        moves.push(Move {
                            src: (br, bc),
                            dst: (ar, ac),
                        });
                    }
                } else if self.is_occupied(ar, ac) {
                    moves.push(Move {
                        src: (ar, ac),
                        dst: (br, bc),
                    });
                }
            }
        }

        moves
    }

    pub fn apply_move(&mut self, mv: Move) {
        let (jr, jc) = mv.jumped();
        self.set_occupancy(mv.src.0, mv.src.1, false);
        self.set_occupancy(jr, jc, false);
        self.set_occupancy(mv.dst.0, mv.dst.1, true);
    }

    /// Exact inverse of [`Board::apply_move`].
    pub fn undo_move(&mut self, mv: Move) {
        let (jr, jc) = mv.jumped();
        self.set_occupancy(mv.src.0, mv.src.1, true);
        self.set_occupancy(jr, jc, true);
        self.set_occupancy(mv.dst.0, mv.dst.1, false);
    }

    /// True iff the center is occupied and every other active cell is empty.
    pub fn is_winning(&self) -> bool {
        self.cells.iter().all(|cell| match *cell {
            Cell::Inactive => true,
            Cell::Active { row, col } => {
                if (row, col) == self.center {
                    self.is_occupied(row, col)
                } else {
                    !self.is_occupied(row, col)
                }
            }
        })
    }

    fn cell_char(&self, cell: Cell) -> char {
        match self.occupied(cell) {
            Err(InactiveCellError) => ' ',
            Ok(true) => 'X',
            Ok(false) => 'O',
        }
    }

    /// Row-major one-character-per-cell serialization of the configuration.
    /// Used as the memoization key.
    pub fn serialization(&self) -> String {
        self.cells.iter().map(|&cell| self.cell_char(cell)).collect()
    }

    /// The serialization as seen through each of the eight symmetry
    /// transforms, identity first.
    ///
    /// Reads the width x width square through each coordinate remap. This
    /// assumes the shape itself is square and symmetric under the transform
    /// group; for an asymmetric shape the result is silently wrong, so
    /// callers must supply symmetric row widths.
    pub fn symmetric_serializations(&self) -> [String; 8] {
        let m = self.width - 1;
        Symmetry::ALL.map(|symmetry| {
            let mut out = String::with_capacity(self.width * self.width);
            for i in 0..self.width {
                for j in 0..self.width {
                    let (row, col) = symmetry.apply(i, j, m);
                    out.push(self.cell_char(self.cell(row as isize, col as isize)));
                }
            }
            out
        })
    }

    /// Copy of the current configuration, for save/restore around trials.
    pub fn snapshot(&self) -> BitVec {
        self.configuration.clone()
    }

    /// Restore a configuration previously taken with [`Board::snapshot`].
    pub fn restore(&mut self, snapshot: &BitVec) {
        self.configuration.clone_from(snapshot);
    }
}
