//! Kociemba's two-phase algorithm.
//!
//! The cube is reduced to coordinates, turned through move tables and the
//! search is pruned by pruning tables. All tables live in [`Tables`], which
//! is built once and shared read-only between solvers.

pub mod coordcube;
pub mod movetable;
pub mod pruning;
pub mod search;
pub mod tables;

pub use search::{SearchConfig, Solution, SolveOutcome, Solver};
pub use tables::{TableError, Tables};

/// The tables are generated only once per test binary
#[cfg(test)]
pub(crate) fn test_tables() -> std::sync::Arc<Tables> {
	use std::sync::{Arc, OnceLock};

	static TABLES: OnceLock<Arc<Tables>> = OnceLock::new();
	TABLES.get_or_init(|| Arc::new(Tables::generate())).clone()
}
