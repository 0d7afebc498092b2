use crate::board::Board;
use crate::heuristic::Heuristic;
use crate::stats::SearchObserver;
use arrayvec::ArrayVec;
use std::time::{Duration, Instant};

/// Heuristic inflation applied by [`Solver::new`]; trades path optimality for speed.
pub const DEFAULT_WEIGHT: f32 = 1.5;

/// Terminal outcome of a solve.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SolveResult {
    /// A path to the goal was found and stored in the session.
    Solved,
    /// The parity test failed; no search was performed.
    NotSolvable,
    /// The search space was exhausted (or the observer abandoned the search)
    /// without reaching the goal. Not expected for well-formed boards.
    NoSolutionFound,
}

/// Result of one bounded depth-first iteration.
enum Search {
    /// The goal is on the path; no frame pops on the way out.
    Found,
    /// Smallest evaluation that exceeded the threshold, `u32::MAX` on a dead end.
    Bounded(u32),
}

/// An IDA* solve session over a [`Board`].
///
/// The session is seeded with the board to solve, runs [`solve`](Self::solve)
/// to one terminal [`SolveResult`], and then exposes the discovered path
/// (initial state through goal, one move apart) and the wall-clock duration.
pub struct Solver {
    board: Board,
    weight: f32,
    result: Option<SolveResult>,
    solved: bool,
    elapsed: Duration,
    path: Vec<Board>,
}

impl Solver {
    /// Session for `board` with the default heuristic inflation.
    pub fn new(board: Board) -> Self {
        Self::with_weight(board, DEFAULT_WEIGHT)
    }

    /// Session for `board` with the given heuristic weight; `1.0` keeps the
    /// heuristic admissible and the returned paths shortest.
    pub fn with_weight(board: Board, weight: f32) -> Self {
        Self {
            board,
            weight,
            result: None,
            solved: false,
            elapsed: Duration::ZERO,
            path: Vec::new(),
        }
    }

    /// Discards any previous outcome and seeds the session with `board`.
    pub fn reset(&mut self, board: Board) {
        self.board = board;
        self.result = None;
        self.solved = false;
        self.elapsed = Duration::ZERO;
        self.path.clear();
    }

    /// The board this session solves from.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// True iff the last solve found a path.
    pub fn is_solved(&self) -> bool {
        self.solved
    }

    /// Outcome of the last solve, `None` before the first one.
    pub fn result(&self) -> Option<SolveResult> {
        self.result
    }

    /// States from the initial board to the goal inclusive, in move order.
    /// Empty unless the last solve ended in [`SolveResult::Solved`].
    pub fn path(&self) -> &[Board] {
        &self.path
    }

    /// Wall-clock duration of the last solve.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Runs IDA* to a terminal outcome.
    pub fn solve(&mut self, heuristic: &dyn Heuristic) -> SolveResult {
        self.solve_with_stats(heuristic, &mut ())
    }

    /// Like [`solve`](Self::solve), reporting progress to `observer`.
    ///
    /// An observer whose `leaf` returns `false` abandons the search, which then
    /// finishes as [`SolveResult::NoSolutionFound`].
    pub fn solve_with_stats<S: SearchObserver>(
        &mut self,
        heuristic: &dyn Heuristic,
        observer: &mut S,
    ) -> SolveResult {
        let started = Instant::now();
        self.result = None;
        self.solved = false;
        self.path.clear();

        if !self.board.is_solvable() {
            self.elapsed = started.elapsed();
            self.result = Some(SolveResult::NotSolvable);
            return SolveResult::NotSolvable;
        }

        let mut path = vec![self.board.clone()];
        let mut threshold = heuristic.estimate(&self.board);
        let result = loop {
            match Self::search(&mut path, 0, threshold, heuristic, self.weight, observer) {
                Search::Found => {
                    self.path = path;
                    self.solved = true;
                    break SolveResult::Solved;
                }
                Search::Bounded(u32::MAX) => break SolveResult::NoSolutionFound,
                Search::Bounded(bound) => threshold = bound,
            }
        };
        self.elapsed = started.elapsed();
        self.result = Some(result);
        result
    }

    /// One depth-first iteration bounded by `threshold` from the last state on `path`.
    ///
    /// The evaluation mixes the integer move count with the float-scaled
    /// heuristic and truncates back to the move-cost domain; the exact
    /// escalation sequence (and thus the exact path found) depends on it.
    fn search<S: SearchObserver>(
        path: &mut Vec<Board>,
        move_cost: u32,
        threshold: u32,
        heuristic: &dyn Heuristic,
        weight: f32,
        observer: &mut S,
    ) -> Search {
        let state = &path[path.len() - 1];
        let h = heuristic.estimate(state);
        if h == 0 {
            observer.leaf();
            return Search::Found;
        }

        let f = (move_cost as f32 + h as f32 * weight) as u32;
        if f > threshold {
            if !observer.leaf() {
                return Search::Bounded(u32::MAX);
            }
            return Search::Bounded(f);
        }
        observer.expanded();

        // a neighbor equal to any ancestor on the path would close a cycle
        let mut neighbors: ArrayVec<Board, 4> = ArrayVec::new();
        for mv in state.valid_moves() {
            let mut next = state.clone();
            next.apply_move(mv);
            if !path.contains(&next) {
                neighbors.push(next);
            }
        }

        let mut min = u32::MAX;
        for next in neighbors {
            path.push(next);
            match Self::search(path, move_cost + 1, threshold, heuristic, weight, observer) {
                // the successful frame stays on the path
                Search::Found => return Search::Found,
                Search::Bounded(bound) => {
                    path.pop();
                    if bound < min {
                        min = bound;
                    }
                }
            }
        }
        Search::Bounded(min)
    }
}
