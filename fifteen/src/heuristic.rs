use crate::board::Board;

/// Lower-bound estimate of the number of moves left to reach the goal.
///
/// Implementations must be admissible (never overestimate) for unweighted
/// IDA* to return shortest paths; the solver may additionally inflate the
/// estimate by a weight, deliberately trading optimality for speed.
pub trait Heuristic {
    /// Estimated remaining moves for `board`; `0` iff `board` is the goal.
    fn estimate(&self, board: &Board) -> u32;
}

/// Sum over all non-blank tiles of the row plus column distance between the
/// tile's current cell and its goal cell.
pub struct ManhattanDistance;

impl Heuristic for ManhattanDistance {
    fn estimate(&self, board: &Board) -> u32 {
        let dimension = board.dimension() as usize;
        let mut distance = 0;
        for (index, &tile) in board.cells().iter().enumerate() {
            if tile == 0 {
                continue;
            }
            let goal = tile as usize - 1;
            if goal == index {
                continue;
            }
            distance += ((goal / dimension).abs_diff(index / dimension)
                + (goal % dimension).abs_diff(index % dimension)) as u32;
        }
        distance
    }
}
