use std::{
	ops::ControlFlow,
	sync::Arc,
	time::{Duration, Instant},
};

use log::{debug, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
	cube::{cubiecube::CubieCube, turn::Turn, CubeError},
	solve::kociemba::{
		coordcube::{CoordCube, Phase2Cube},
		movetable::MoveSet,
		tables::Tables,
	},
};

/// The limits of a single search.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
	/// No solution longer than this is accepted
	pub max_depth: usize,
	/// Give up after this time, keeping the best solution found so far
	pub timeout: Option<Duration>,
	/// Keep searching for shorter solutions after the first one
	pub optimize: bool,
	/// The longest phase 2 tried for each end of phase 1
	pub max_phase2_depth: usize,
}

impl Default for SearchConfig {
	fn default() -> Self {
		Self {
			max_depth: 24,
			timeout: Some(Duration::from_secs(10)),
			optimize: false,
			max_phase2_depth: 10,
		}
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
	pub turns: Vec<Turn>,
	/// The first `phase1_len` turns bring the cube into H
	pub phase1_len: usize,
	/// Nodes visited until this solution was found
	pub nodes: u64,
	pub elapsed: Duration,
}

impl Solution {
	pub fn len(&self) -> usize {
		self.turns.len()
	}

	pub fn is_empty(&self) -> bool {
		self.turns.is_empty()
	}
}

impl std::fmt::Display for Solution {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		let turns: Vec<String> = self.turns.iter().map(|t| t.to_string()).collect();
		write!(f, "{}", turns.join(" "))
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SolveOutcome {
	Solved(Solution),
	/// No solution within `max_depth`, or none before the timeout
	NotFound { timed_out: bool },
}

impl SolveOutcome {
	pub fn solution(&self) -> Option<&Solution> {
		match self {
			SolveOutcome::Solved(solution) => Some(solution),
			SolveOutcome::NotFound { .. } => None,
		}
	}

	pub fn into_solution(self) -> Option<Solution> {
		match self {
			SolveOutcome::Solved(solution) => Some(solution),
			SolveOutcome::NotFound { .. } => None,
		}
	}
}

/// Solves cubes with Kociemba's two-phase algorithm.
///
/// Phase 1 searches turn sequences which bring the cube into the subgroup H
/// (no twist, no flip, UD-slice edges inside the UD-slice). From every end of
/// phase 1, phase 2 solves the cube using only the turns which stay in H.
/// Both are iterative deepening searches, pruned by the pruning tables.
pub struct Solver {
	tables: Arc<Tables>,
	phase1_moves: MoveSet,
	phase2_moves: MoveSet,
}

impl Solver {
	pub fn new(tables: Arc<Tables>) -> Self {
		Self {
			tables,
			phase1_moves: MoveSet::all(),
			phase2_moves: MoveSet::phase2(),
		}
	}

	/// Search a solution for the cube.
	/// Fails if the cube can not be solved at all.
	pub fn solve(&self, cube: &CubieCube, config: &SearchConfig) -> Result<SolveOutcome, CubeError> {
		cube.verify()?;

		let start = Instant::now();
		let mut search = Search {
			tables: &self.tables,
			config,
			phase1_moves: &self.phase1_moves,
			phase2_moves: &self.phase2_moves,
			start,
			deadline: config.timeout.map(|t| start + t),
			path: Vec::with_capacity(config.max_depth),
			bound: config.max_depth,
			phase1_len: 0,
			nodes: 0,
			best: None,
		};

		let flow = search.run(CoordCube::new(cube));
		let timed_out = matches!(flow, ControlFlow::Break(Halt::OutOfTime));

		match search.best {
			Some(solution) => {
				debug_assert!(cube.apply_turns(&solution.turns).is_solved());
				Ok(SolveOutcome::Solved(solution))
			}
			None => {
				info!("No solution found after {} nodes, timed out: {timed_out}", search.nodes);
				Ok(SolveOutcome::NotFound { timed_out })
			}
		}
	}

	/// Solve several cubes in parallel
	pub fn solve_all(&self, cubes: &[CubieCube], config: &SearchConfig) -> Vec<Result<SolveOutcome, CubeError>> {
		cubes.par_iter().map(|cube| self.solve(cube, config)).collect()
	}
}

/// Why the search stopped early
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Halt {
	Solved,
	OutOfTime,
}

/// The state of one search
struct Search<'a> {
	tables: &'a Tables,
	config: &'a SearchConfig,
	phase1_moves: &'a MoveSet,
	phase2_moves: &'a MoveSet,
	start: Instant,
	deadline: Option<Instant>,
	/// The turns from the root to the current node
	path: Vec<Turn>,
	/// The longest solution still of interest
	bound: usize,
	/// The length of phase 1 of the current path
	phase1_len: usize,
	nodes: u64,
	best: Option<Solution>,
}

impl Search<'_> {
	fn run(&mut self, cube: CoordCube) -> ControlFlow<Halt> {
		for depth1 in 0..=self.config.max_depth {
			if depth1 > self.bound {
				break;
			}
			debug!("Phase 1 depth {depth1}, {} nodes so far", self.nodes);
			self.phase1(cube, depth1)?;
		}

		ControlFlow::Continue(())
	}

	/// Count the node and check the clock
	fn tick(&mut self) -> ControlFlow<Halt> {
		self.nodes += 1;

		match self.deadline {
			Some(deadline) if Instant::now() >= deadline => ControlFlow::Break(Halt::OutOfTime),
			_ => ControlFlow::Continue(()),
		}
	}

	fn may_follow(&self, turn: Turn) -> bool {
		self.path.last().map_or(true, |last| last.may_precede(turn))
	}

	fn phase1(&mut self, cube: CoordCube, togo: usize) -> ControlFlow<Halt> {
		self.tick()?;

		// Below the root, a node already in H is the end of a shorter phase 1
		let h = cube.phase1_distance(self.tables) as usize;
		if h > togo || (h == 0 && togo > 0 && !self.path.is_empty()) {
			return ControlFlow::Continue(());
		}

		match togo {
			0 => match cube.phase2() {
				Some(cube) => self.phase2_start(cube),
				None => ControlFlow::Continue(()),
			},
			1 => self.phase1_ends(cube),
			_ => {
				let moves = self.phase1_moves;
				for turn in moves.iter() {
					if !self.may_follow(turn) {
						continue;
					}
					self.path.push(turn);
					let flow = self.phase1(cube.apply_turn(self.tables, turn), togo - 1);
					self.path.pop();
					flow?;
				}
				ControlFlow::Continue(())
			}
		}
	}

	/// The last turn of phase 1. The ends in H are tried in the order of their
	/// phase 2 distance, the closest first.
	fn phase1_ends(&mut self, cube: CoordCube) -> ControlFlow<Halt> {
		let tables = self.tables;

		let mut ends: Vec<(u8, Turn, Phase2Cube)> = self
			.phase1_moves
			.iter()
			.filter(|t| self.may_follow(*t))
			.filter_map(|turn| {
				let end = cube.apply_turn(tables, turn).phase2()?;
				Some((end.distance(tables), turn, end))
			})
			.collect();
		ends.sort_by_key(|(h, _, _)| *h);

		for (_, turn, end) in ends {
			self.path.push(turn);
			let flow = self.phase2_start(end);
			self.path.pop();
			flow?;
		}

		ControlFlow::Continue(())
	}

	/// Iterative deepening of phase 2 from one end of phase 1
	fn phase2_start(&mut self, cube: Phase2Cube) -> ControlFlow<Halt> {
		let depth1 = self.path.len();
		let Some(room) = self.bound.checked_sub(depth1) else {
			return ControlFlow::Continue(());
		};
		let max2 = room.min(self.config.max_phase2_depth);
		self.phase1_len = depth1;

		for depth2 in cube.distance(self.tables) as usize..=max2 {
			match self.phase2(cube, depth2) {
				// Every other end of phase 1 might still lead to something shorter
				ControlFlow::Break(Halt::Solved) if self.keep_searching(depth1) => {
					return ControlFlow::Continue(());
				}
				flow => flow?,
			}
		}

		ControlFlow::Continue(())
	}

	fn phase2(&mut self, cube: Phase2Cube, togo: usize) -> ControlFlow<Halt> {
		self.tick()?;

		let h = cube.distance(self.tables) as usize;
		if h > togo {
			return ControlFlow::Continue(());
		}
		if h == 0 {
			// The cube is solved, longer paths through it are of no use
			return match togo {
				0 => self.found(),
				_ => ControlFlow::Continue(()),
			};
		}

		let moves = self.phase2_moves;
		for turn in moves.iter() {
			if !self.may_follow(turn) {
				continue;
			}
			self.path.push(turn);
			let flow = self.phase2(cube.apply_turn(self.tables, turn), togo - 1);
			self.path.pop();
			flow?;
		}

		ControlFlow::Continue(())
	}

	fn found(&mut self) -> ControlFlow<Halt> {
		let solution = Solution {
			turns: self.path.clone(),
			phase1_len: self.phase1_len,
			nodes: self.nodes,
			elapsed: self.start.elapsed(),
		};
		info!(
			"Found a solution with {} turns ({} + {}) after {:.2?}",
			solution.len(),
			solution.phase1_len,
			solution.len() - solution.phase1_len,
			solution.elapsed
		);

		self.bound = solution.len().saturating_sub(1);
		self.best = Some(solution);
		ControlFlow::Break(Halt::Solved)
	}

	/// Whether a shorter solution may still exist with a phase 1 of `depth1` turns
	fn keep_searching(&self, depth1: usize) -> bool {
		self.config.optimize && self.best.as_ref().is_some_and(|best| best.len() > depth1)
	}
}

#[cfg(test)]
mod tests {
	use rand::{rngs::StdRng, Rng, SeedableRng};

	use super::*;
	use crate::{cube::turn::parse_turns, solve::kociemba::test_tables};

	fn solver() -> Solver {
		Solver::new(test_tables())
	}

	fn solve(cube: &CubieCube, config: &SearchConfig) -> Result<Solution, Box<dyn std::error::Error>> {
		let solution = solver().solve(cube, config)?.into_solution().ok_or("no solution found")?;
		assert!(cube.apply_turns(&solution.turns).is_solved());
		Ok(solution)
	}

	#[test]
	fn solved_cube() -> Result<(), Box<dyn std::error::Error>> {
		let solution = solve(&CubieCube::new(), &SearchConfig::default())?;
		assert!(solution.is_empty());
		assert_eq!(solution.phase1_len, 0);
		Ok(())
	}

	#[test]
	fn single_quarter_turns() -> Result<(), Box<dyn std::error::Error>> {
		for turn in Turn::all() {
			let cube = CubieCube::new().apply_turn(turn);
			let solution = solve(&cube, &SearchConfig::default())?;
			assert_eq!(solution.turns, vec![turn.inverse()], "scrambled with {turn}");
		}

		let cube = CubieCube::new().apply_turns(&parse_turns("R")?);
		assert_eq!(solve(&cube, &SearchConfig::default())?.to_string(), "R'");
		Ok(())
	}

	#[test]
	fn random_scrambles() -> Result<(), Box<dyn std::error::Error>> {
		let mut rng = StdRng::seed_from_u64(20);
		let turns: Vec<Turn> = Turn::all().collect();

		for _ in 0..5 {
			let scramble: Vec<Turn> = (0..20).map(|_| turns[rng.gen_range(0..turns.len())]).collect();
			let cube = CubieCube::new().apply_turns(&scramble);

			let solution = solve(&cube, &SearchConfig::default())?;
			assert!(solution.len() <= 24);
			assert!(solution.turns[solution.phase1_len..].iter().all(|t| MoveSet::phase2().contains(*t)));
		}
		Ok(())
	}

	#[test]
	fn random_cubes() -> Result<(), Box<dyn std::error::Error>> {
		let mut rng = StdRng::seed_from_u64(21);
		let cubes: Vec<CubieCube> = (0..8).map(|_| CubieCube::random_with(&mut rng)).collect();

		for (cube, outcome) in cubes.iter().zip(solver().solve_all(&cubes, &SearchConfig::default())) {
			let solution = outcome?.into_solution().ok_or("no solution found")?;
			assert!(solution.len() <= 24);
			assert!(cube.apply_turns(&solution.turns).is_solved());
		}
		Ok(())
	}

	#[test]
	fn superflip() -> Result<(), Box<dyn std::error::Error>> {
		let mut cube = CubieCube::new();
		for edge in cube.edges.iter_mut() {
			edge.1 = 1;
		}

		let config = SearchConfig {
			max_depth: 30,
			timeout: Some(Duration::from_secs(60)),
			..Default::default()
		};
		let solution = solve(&cube, &config)?;
		assert!(solution.len() >= 20);
		Ok(())
	}

	#[test]
	fn optimize_finds_shorter_solutions() -> Result<(), Box<dyn std::error::Error>> {
		let mut rng = StdRng::seed_from_u64(25);
		let turns: Vec<Turn> = Turn::all().collect();
		let cubes: Vec<CubieCube> = (0..6)
			.map(|_| {
				let scramble: Vec<Turn> = (0..25).map(|_| turns[rng.gen_range(0..turns.len())]).collect();
				CubieCube::new().apply_turns(&scramble)
			})
			.collect();

		let first = SearchConfig {
			max_depth: 30,
			..Default::default()
		};
		let optimize = SearchConfig {
			max_depth: 30,
			timeout: Some(Duration::from_secs(3)),
			optimize: true,
			..Default::default()
		};

		let solver = solver();
		let firsts = solver.solve_all(&cubes, &first);
		let optimized = solver.solve_all(&cubes, &optimize);

		let mut improved = 0;
		for ((cube, first), optimized) in cubes.iter().zip(firsts).zip(optimized) {
			let first = first?.into_solution().ok_or("no solution found")?;
			let optimized = optimized?.into_solution().ok_or("no solution found")?;
			assert!(cube.apply_turns(&optimized.turns).is_solved());
			assert!(optimized.len() <= first.len());

			// A later solution was found after the first one
			if optimized.len() < first.len() {
				assert!(optimized.nodes > first.nodes);
				improved += 1;
			}
		}

		// The first solutions of random cubes are rarely the shortest ones
		assert!(improved > 0, "no solution was shortened");
		Ok(())
	}

	#[test]
	fn timeout_without_solution() {
		let mut cube = CubieCube::new();
		for edge in cube.edges.iter_mut() {
			edge.1 = 1;
		}

		// The superflip needs 20 turns, so nothing is found before the timeout
		let config = SearchConfig {
			max_depth: 18,
			timeout: Some(Duration::from_millis(50)),
			..Default::default()
		};
		let start = Instant::now();
		assert_eq!(solver().solve(&cube, &config), Ok(SolveOutcome::NotFound { timed_out: true }));
		assert!(start.elapsed() < Duration::from_secs(5));
	}

	#[test]
	fn timeout_keeps_the_best_solution() -> Result<(), Box<dyn std::error::Error>> {
		let mut rng = StdRng::seed_from_u64(26);
		let cube = CubieCube::random_with(&mut rng);

		let config = SearchConfig {
			max_depth: 30,
			timeout: Some(Duration::from_millis(500)),
			optimize: true,
			..Default::default()
		};
		let start = Instant::now();
		let outcome = solver().solve(&cube, &config)?;
		assert!(start.elapsed() < Duration::from_secs(10));

		let solution = outcome.into_solution().ok_or("no solution kept")?;
		assert!(cube.apply_turns(&solution.turns).is_solved());
		assert!(solution.len() <= 30);
		Ok(())
	}

	#[test]
	fn depth_limit() -> Result<(), Box<dyn std::error::Error>> {
		let cube = CubieCube::new().apply_turns(&parse_turns("R U F")?);
		let config = SearchConfig {
			max_depth: 2,
			..Default::default()
		};
		let outcome = solver().solve(&cube, &config)?;
		assert_eq!(outcome, SolveOutcome::NotFound { timed_out: false });
		Ok(())
	}

	#[test]
	fn impossible_cubes() {
		let config = SearchConfig::default();

		let mut swapped = CubieCube::new();
		swapped.edges.swap(0, 1);
		assert_eq!(solver().solve(&swapped, &config), Err(CubeError::Parity));

		let mut flipped = CubieCube::new();
		flipped.edges[0].1 = 1;
		assert_eq!(solver().solve(&flipped, &config), Err(CubeError::EdgeOrientation));

		let mut twisted = CubieCube::new();
		twisted.corners[0].1 = 2;
		assert_eq!(solver().solve(&twisted, &config), Err(CubeError::CornerOrientation(2)));
	}
}
