//! A Rubik's Cube solver using Kociemba's two-phase algorithm.
//!
//! ```no_run
//! use std::sync::Arc;
//! use twophase::prelude::*;
//!
//! let cube = CubieCube::new().apply_turns(&parse_turns("R U R' U' F2 D").unwrap());
//!
//! let solver = Solver::new(Arc::new(Tables::load_or_generate("data/twophase.bin")));
//! let outcome = solver.solve(&cube, &SearchConfig::default()).unwrap();
//!
//! if let SolveOutcome::Solved(solution) = outcome {
//!     assert!(cube.apply_turns(&solution.turns).is_solved());
//! }
//! ```
//!
//! Generating the tables takes a few seconds, `Tables::load_or_generate` caches them on disk.

pub mod cube;
pub mod math;
pub mod solve;

pub mod prelude {
	pub use crate::cube::{cubiecube::*, facecube::*, turn::*, *};
	pub use crate::solve::kociemba::{SearchConfig, Solution, SolveOutcome, Solver, TableError, Tables};
}
