use arrayvec::ArrayVec;
use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Largest supported side length; a 16×16 board has 256 cells, the most whose values fit in a `u8`.
pub const MAX_DIMENSION: u8 = 16;

/// Direction in which the blank slides; the tile on that side moves into the blank's cell.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// All directions in the canonical expansion order.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// Returns the move that undoes `self`.
    #[inline]
    pub fn opposite(self) -> Move {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Move::Up => "up",
            Move::Down => "down",
            Move::Left => "left",
            Move::Right => "right",
        })
    }
}

/// Board state of an N×N sliding-tile puzzle.
///
/// Cells hold a permutation of `0..N²` in row-major order, `0` being the blank.
/// The blank's coordinates are cached and kept consistent by every mutation.
#[derive(Clone, Debug)]
pub struct Board {
    dimension: u8,
    blank_row: u8,
    blank_col: u8,
    cells: Vec<u8>,
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        if self.dimension != other.dimension {
            return false;
        }
        // cheap reject before the full cell comparison
        if self.blank_row != other.blank_row || self.blank_col != other.blank_col {
            return false;
        }
        self.cells == other.cells
    }
}

impl Eq for Board {}

impl Hash for Board {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.dimension.hash(state);
        self.cells.hash(state);
    }
}

impl Default for Board {
    /// The solved 4×4 board.
    fn default() -> Self {
        Self::new(4)
    }
}

impl Board {
    /// Constructs the solved board of the given side length (`1..=MAX_DIMENSION`).
    pub fn new(dimension: u8) -> Self {
        assert!(dimension >= 1 && dimension <= MAX_DIMENSION);
        let mut board = Self {
            dimension,
            blank_row: 0,
            blank_col: 0,
            cells: vec![0; dimension as usize * dimension as usize],
        };
        board.reset();
        board
    }

    /// Constructs a board from row-major cell values, or `None` if they are not
    /// a permutation of `0..dimension²`. This is the validated deserialize path.
    pub fn from_cells(dimension: u8, cells: &[u8]) -> Option<Self> {
        if dimension < 1 || dimension > MAX_DIMENSION {
            return None;
        }
        let size = dimension as usize * dimension as usize;
        if cells.len() != size {
            return None;
        }
        let mut seen = [false; MAX_DIMENSION as usize * MAX_DIMENSION as usize];
        for &value in cells {
            if value as usize >= size || seen[value as usize] {
                return None;
            }
            seen[value as usize] = true;
        }
        let blank = cells.iter().position(|&value| value == 0)?;
        Some(Self {
            dimension,
            blank_row: (blank / dimension as usize) as u8,
            blank_col: (blank % dimension as usize) as u8,
            cells: cells.to_vec(),
        })
    }

    /// Side length of the board.
    #[inline]
    pub fn dimension(&self) -> u8 {
        self.dimension
    }

    /// Number of cells.
    #[inline]
    pub fn size(&self) -> usize {
        self.dimension as usize * self.dimension as usize
    }

    /// Value at the given row-major `index`.
    #[inline]
    pub fn tile(&self, index: usize) -> u8 {
        self.cells[index]
    }

    /// Value at (`row`, `col`).
    #[inline]
    pub fn tile_at(&self, row: u8, col: u8) -> u8 {
        self.cells[self.index_of(row, col)]
    }

    /// All cells in row-major order.
    #[inline]
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    #[inline]
    pub fn blank_row(&self) -> u8 {
        self.blank_row
    }

    #[inline]
    pub fn blank_col(&self) -> u8 {
        self.blank_col
    }

    /// Row-major index of the blank.
    #[inline]
    pub fn blank_index(&self) -> usize {
        self.index_of(self.blank_row, self.blank_col)
    }

    #[inline]
    fn index_of(&self, row: u8, col: u8) -> usize {
        row as usize * self.dimension as usize + col as usize
    }

    /// Writes `value` at `index`, refreshing the blank cache when a zero lands.
    ///
    /// Returns `false` (and writes nothing) when `index` or `value` is out of
    /// range; the load path relies on this as its bounds validation.
    pub fn set(&mut self, index: usize, value: u8) -> bool {
        if index >= self.size() || value as usize >= self.size() {
            return false;
        }
        if value == 0 {
            self.blank_row = (index / self.dimension as usize) as u8;
            self.blank_col = (index % self.dimension as usize) as u8;
        }
        self.cells[index] = value;
        true
    }

    /// Slides the adjacent tile into the blank, moving the blank in the given
    /// direction. Returns `false` without mutating when the blank is at the edge.
    pub fn apply_move(&mut self, mv: Move) -> bool {
        let (row, col) = (self.blank_row, self.blank_col);
        let (new_row, new_col) = match mv {
            Move::Up if row > 0 => (row - 1, col),
            Move::Down if row + 1 < self.dimension => (row + 1, col),
            Move::Left if col > 0 => (row, col - 1),
            Move::Right if col + 1 < self.dimension => (row, col + 1),
            _ => return false,
        };
        let blank = self.index_of(row, col);
        let target = self.index_of(new_row, new_col);
        self.cells.swap(blank, target);
        self.blank_row = new_row;
        self.blank_col = new_col;
        true
    }

    /// Slides the clicked cell into the blank if it is orthogonally adjacent.
    ///
    /// Clicking a non-adjacent cell, the blank itself, or an out-of-range index
    /// is a no-op returning `false`.
    pub fn apply_move_at(&mut self, index: usize) -> bool {
        if index >= self.size() {
            return false;
        }
        let row = (index / self.dimension as usize) as u8;
        let col = (index % self.dimension as usize) as u8;
        let mv = if row == self.blank_row && col + 1 == self.blank_col {
            Move::Left
        } else if row == self.blank_row && col == self.blank_col + 1 {
            Move::Right
        } else if col == self.blank_col && row + 1 == self.blank_row {
            Move::Up
        } else if col == self.blank_col && row == self.blank_row + 1 {
            Move::Down
        } else {
            return false;
        };
        self.apply_move(mv)
    }

    /// Legal moves for the current blank position, in `Move::ALL` order.
    pub fn valid_moves(&self) -> ArrayVec<Move, 4> {
        let mut moves = ArrayVec::new();
        if self.blank_row > 0 {
            moves.push(Move::Up);
        }
        if self.blank_row + 1 < self.dimension {
            moves.push(Move::Down);
        }
        if self.blank_col > 0 {
            moves.push(Move::Left);
        }
        if self.blank_col + 1 < self.dimension {
            moves.push(Move::Right);
        }
        moves
    }

    /// Applies `(size+1)*4` uniformly random legal moves using the thread RNG.
    ///
    /// A solvable board stays solvable; the result is not reproducible.
    pub fn shuffle(&mut self) {
        self.shuffle_with(&mut rand::thread_rng());
    }

    /// Like [`shuffle`](Self::shuffle), but draws from the given RNG.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let times = (self.size() + 1) * 4;
        for _ in 0..times {
            let moves = self.valid_moves();
            if let Some(&mv) = moves.choose(rng) {
                self.apply_move(mv);
            }
        }
    }

    /// Restores the canonical solved configuration `1, 2, ..., N²-1, 0`.
    pub fn reset(&mut self) {
        let size = self.size();
        for (index, cell) in self.cells.iter_mut().enumerate() {
            *cell = ((index + 1) % size) as u8;
        }
        self.blank_row = self.dimension - 1;
        self.blank_col = self.dimension - 1;
    }

    /// Number of non-blank pairs out of ascending order in the row-major scan.
    pub fn inversion_count(&self) -> u32 {
        let mut count = 0;
        for (index, &value) in self.cells.iter().enumerate() {
            if value == 0 {
                continue;
            }
            for &later in &self.cells[index + 1..] {
                if later != 0 && value > later {
                    count += 1;
                }
            }
        }
        count
    }

    /// Standard parity test: on odd boards solvable iff the inversion count is
    /// even; on even boards the blank's row from the top flips the rule.
    pub fn is_solvable(&self) -> bool {
        let inversions = self.inversion_count();
        if self.dimension % 2 == 0 {
            if self.blank_row % 2 == 0 {
                inversions % 2 != 0
            } else {
                inversions % 2 == 0
            }
        } else {
            inversions % 2 == 0
        }
    }

    /// True iff the blank is bottom-right and the tiles are in ascending order.
    pub fn is_solved(&self) -> bool {
        if self.blank_row + 1 != self.dimension || self.blank_col + 1 != self.dimension {
            return false;
        }
        self.inversion_count() == 0
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.dimension {
            for col in 0..self.dimension {
                if col != 0 {
                    f.write_str(" ")?;
                }
                match self.tile_at(row, col) {
                    0 => write!(f, "{:>3}", ".")?,
                    tile => write!(f, "{:>3}", tile)?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_canonical() {
        let board = Board::new(3);
        assert_eq!(board.cells(), &[1, 2, 3, 4, 5, 6, 7, 8, 0]);
        assert_eq!(board.blank_row(), 2);
        assert_eq!(board.blank_col(), 2);
        assert_eq!(board.blank_index(), 8);
        assert!(board.is_solved());
        assert!(board.is_solvable());
        assert_eq!(board.inversion_count(), 0);
    }

    #[test]
    fn test_moves_and_cache() {
        let mut board = Board::new(3);
        assert!(board.apply_move(Move::Up));
        assert_eq!(board.cells(), &[1, 2, 3, 4, 5, 0, 7, 8, 6]);
        assert_eq!(board.blank_row(), 1);
        assert_eq!(board.blank_col(), 2);
        assert!(board.apply_move(Move::Left));
        assert_eq!(board.cells(), &[1, 2, 3, 4, 0, 5, 7, 8, 6]);
        assert_eq!(board.blank_index(), 4);
        // the blank cache always points at the zero cell
        assert_eq!(board.tile(board.blank_index()), 0);
    }

    #[test]
    fn test_edge_moves_rejected() {
        let mut board = Board::new(2);
        // blank starts bottom-right: only Up and Left are legal
        assert!(!board.apply_move(Move::Down));
        assert!(!board.apply_move(Move::Right));
        let before = board.clone();
        assert!(!board.apply_move(Move::Down));
        assert_eq!(board, before);
    }

    #[test]
    fn test_move_reversibility() {
        let original = Board::new(4);
        for mv in Move::ALL {
            let mut board = original.clone();
            board.apply_move(Move::Up);
            board.apply_move(Move::Left);
            let reference = board.clone();
            if board.apply_move(mv) {
                assert!(board.apply_move(mv.opposite()));
                assert_eq!(board, reference);
            }
        }
    }

    #[test]
    fn test_valid_moves_order() {
        let mut board = Board::new(3);
        // bottom-right corner
        assert_eq!(board.valid_moves().as_slice(), &[Move::Up, Move::Left]);
        board.apply_move(Move::Up);
        // right edge, middle row
        assert_eq!(
            board.valid_moves().as_slice(),
            &[Move::Up, Move::Down, Move::Left]
        );
        board.apply_move(Move::Left);
        // center: all four, canonical order
        assert_eq!(
            board.valid_moves().as_slice(),
            &[Move::Up, Move::Down, Move::Left, Move::Right]
        );
    }

    #[test]
    fn test_apply_move_at() {
        let mut board = Board::from_cells(3, &[1, 2, 3, 4, 0, 6, 7, 5, 8]).unwrap();
        // clicking the blank itself does nothing
        assert!(!board.apply_move_at(4));
        // clicking a non-adjacent (diagonal) cell does nothing
        assert!(!board.apply_move_at(0));
        assert!(!board.apply_move_at(8));
        // out of range
        assert!(!board.apply_move_at(9));
        let reference = board.clone();
        assert_eq!(board, reference);
        // clicking the cell above the blank slides it down (blank moves up)
        assert!(board.apply_move_at(1));
        assert_eq!(board.cells(), &[1, 0, 3, 4, 2, 6, 7, 5, 8]);
        assert!(board.apply_move_at(4));
        assert_eq!(board.cells(), &[1, 2, 3, 4, 0, 6, 7, 5, 8]);
    }

    #[test]
    fn test_permutation_invariant() {
        use rand::SeedableRng;
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        let mut board = Board::new(4);
        board.shuffle_with(&mut rng);
        let mut sorted: Vec<u8> = board.cells().to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..16).collect::<Vec<u8>>());
        assert_eq!(board.tile(board.blank_index()), 0);
        assert!(board.is_solvable());
    }

    #[test]
    fn test_set_updates_blank_cache() {
        let mut board = Board::new(3);
        assert!(board.set(8, 5));
        assert!(board.set(7, 0));
        assert_eq!(board.blank_index(), 7);
        assert!(board.set(4, 0));
        assert_eq!(board.blank_row(), 1);
        assert_eq!(board.blank_col(), 1);
        // out-of-range index and value are rejected
        assert!(!board.set(9, 1));
        assert!(!board.set(0, 9));
    }

    #[test]
    fn test_from_cells_validation() {
        assert!(Board::from_cells(3, &[1, 2, 3, 4, 0, 6, 7, 5, 8]).is_some());
        // wrong length
        assert!(Board::from_cells(3, &[1, 2, 3]).is_none());
        // duplicate value
        assert!(Board::from_cells(3, &[1, 1, 3, 4, 0, 6, 7, 5, 8]).is_none());
        // out-of-range value
        assert!(Board::from_cells(3, &[1, 2, 3, 4, 0, 6, 7, 5, 9]).is_none());
        let board = Board::from_cells(3, &[1, 2, 3, 4, 0, 6, 7, 5, 8]).unwrap();
        assert_eq!(board.blank_index(), 4);
    }

    #[test]
    fn test_solvability_parity_3x3() {
        let solved = Board::new(3);
        assert!(solved.is_solvable());
        // single adjacent swap of non-blank tiles flips parity
        let swapped = Board::from_cells(3, &[2, 1, 3, 4, 5, 6, 7, 8, 0]).unwrap();
        assert_eq!(swapped.inversion_count(), 1);
        assert!(!swapped.is_solvable());
    }

    #[test]
    fn test_solvability_parity_4x4() {
        let solved = Board::new(4);
        assert_eq!(solved.inversion_count(), 0);
        assert!(solved.is_solvable());
        // swapping any two non-blank tiles flips solvability
        let mut cells: Vec<u8> = solved.cells().to_vec();
        cells.swap(0, 5);
        let swapped = Board::from_cells(4, &cells).unwrap();
        assert!(!swapped.is_solvable());
        // a legal move keeps the board solvable
        let mut moved = solved.clone();
        moved.apply_move(Move::Up);
        assert!(moved.is_solvable());
        assert!(!moved.is_solved());
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut board = Board::new(4);
        board.shuffle();
        board.reset();
        let reference = Board::new(4);
        assert_eq!(board, reference);
        board.reset();
        assert_eq!(board, reference);
    }

    #[test]
    fn test_degenerate_1x1() {
        let mut board = Board::new(1);
        assert_eq!(board.cells(), &[0]);
        assert!(board.valid_moves().is_empty());
        assert!(board.is_solved());
        assert!(board.is_solvable());
        board.shuffle();
        assert!(board.is_solved());
    }

    #[test]
    fn test_equality_is_cell_exact() {
        let a = Board::from_cells(3, &[1, 2, 3, 4, 0, 6, 7, 5, 8]).unwrap();
        // same blank position, different tiles
        let b = Board::from_cells(3, &[1, 2, 3, 5, 0, 6, 7, 4, 8]).unwrap();
        assert_eq!(a.blank_index(), b.blank_index());
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }
}
