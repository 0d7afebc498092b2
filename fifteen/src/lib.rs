#![doc = include_str!("../README.md")]

pub mod background;
pub mod board;
pub mod heuristic;
pub mod solver;
pub mod stats;
