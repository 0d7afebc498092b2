#![doc = include_str!("../README.md")]

use cpu_time::ProcessTime;
use fifteen::board::Board;
use fifteen::heuristic::ManhattanDistance;
use fifteen::solver::{SolveResult, Solver, DEFAULT_WEIGHT};
use fifteen::stats::SearchCounts;
use std::env;
use std::process::exit;

struct Args {
    dimension: u8,
    states: usize,
    seed: u64,
    weight: f32,
}

impl Args {
    fn parse() -> Self {
        let mut result = Self {
            dimension: 4,
            states: 1,
            seed: 123,
            weight: DEFAULT_WEIGHT,
        };
        let args: Vec<String> = env::args().skip(1).collect();
        if args.iter().any(|a| a == "-h" || a == "--help") || args.len() > 4 {
            usage();
        }
        if let Some(arg) = args.first() {
            result.dimension = parse_or_usage(arg, "dimension");
        }
        if let Some(arg) = args.get(1) {
            result.states = parse_or_usage(arg, "states");
        }
        if let Some(arg) = args.get(2) {
            result.seed = parse_or_usage(arg, "seed");
        }
        if let Some(arg) = args.get(3) {
            result.weight = parse_or_usage(arg, "weight");
        }
        result
    }
}

fn parse_or_usage<T: std::str::FromStr>(arg: &str, name: &str) -> T {
    arg.parse().unwrap_or_else(|_| {
        eprintln!("cannot parse {} from {:?}", name, arg);
        usage()
    })
}

fn usage() -> ! {
    eprintln!("usage: ida_benchmark [dimension] [states] [seed] [weight]");
    eprintln!("defaults: dimension=4 states=1 seed=123 weight={}", DEFAULT_WEIGHT);
    exit(1)
}

fn main() {
    use rand::SeedableRng;

    let args = Args::parse();
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(args.seed);
    let mut total = SearchCounts::default();
    let mut solved = 0usize;
    let cpu = ProcessTime::now();

    for state_nr in 0..args.states {
        let mut board = Board::new(args.dimension);
        board.shuffle_with(&mut rng);

        let mut counts = SearchCounts::default();
        let mut solver = Solver::with_weight(board, args.weight);
        let result = solver.solve_with_stats(&ManhattanDistance, &mut counts);
        match result {
            SolveResult::Solved => {
                solved += 1;
                println!(
                    "state {}: {} moves, {} expanded + {} leaves, {:.3?}",
                    state_nr,
                    solver.path().len() - 1,
                    counts.expanded,
                    counts.leaves,
                    solver.elapsed()
                );
                if args.states == 1 {
                    for (step, state) in solver.path().iter().enumerate() {
                        println!("step {}:\n{}", step, state);
                    }
                }
            }
            other => println!("state {}: {:?}", state_nr, other),
        }
        total += counts;
    }

    println!(
        "solved {}/{} states, {} visited states total, cpu time {:.3?}",
        solved,
        args.states,
        total.visits(),
        cpu.elapsed()
    );
}
