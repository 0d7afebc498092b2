use crate::board::Board;
use crate::heuristic::Heuristic;
use crate::solver::Solver;
use std::sync::mpsc::{self, Receiver};
use std::thread;

/// Handle to a solve running on a background thread.
///
/// The finished [`Solver`] session travels over a single-producer,
/// single-consumer channel; no state is shared while the search runs.
/// Dropping the handle abandons interest in the result — the in-flight
/// computation still runs to completion, its send then fails harmlessly.
pub struct BackgroundSolve {
    receiver: Receiver<Solver>,
}

/// Solves `board` with `heuristic` and the given weight on a new thread.
pub fn spawn<H>(board: Board, heuristic: H, weight: f32) -> BackgroundSolve
where
    H: Heuristic + Send + 'static,
{
    let (sender, receiver) = mpsc::channel();
    thread::spawn(move || {
        let mut solver = Solver::with_weight(board, weight);
        solver.solve(&heuristic);
        let _ = sender.send(solver);
    });
    BackgroundSolve { receiver }
}

impl BackgroundSolve {
    /// Returns the finished session if the solve has completed, without blocking.
    pub fn try_finish(&self) -> Option<Solver> {
        self.receiver.try_recv().ok()
    }

    /// Blocks until the solve completes and returns the session.
    pub fn wait(self) -> Option<Solver> {
        self.receiver.recv().ok()
    }
}
