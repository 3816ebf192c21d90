use std::{error::Error, io::Write, str::FromStr, sync::Arc, time::Duration};

use clap::Parser;
use env_logger::TimestampPrecision;
use log::{info, LevelFilter};

use twophase::prelude::*;

/// Rubik's Cube solver using Kociemba's two-phase algorithm
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Use a sequence to apply on the solved cube, e.g. "R U2 F'"
	#[arg(short, long, default_value_t = String::new())]
	sequence: String,

	/// Set the cube from its 54 facelets, in the order U, R, F, D, L, B
	#[arg(long, default_value_t = String::new())]
	facelets: String,

	/// Start from a random cube
	#[arg(short, long, default_value_t = false)]
	random: bool,

	/// Solve the cube (the output is a sequence)
	#[arg(long, default_value_t = false)]
	solve: bool,

	/// Output length of sequence (if --solve is used)
	#[arg(short, long, default_value_t = false)]
	length: bool,

	/// Longest solution to accept
	#[arg(long, default_value_t = SearchConfig::default().max_depth)]
	max_depth: usize,

	/// Give up after this many seconds, 0 for no limit
	#[arg(long, default_value_t = 10.0)]
	timeout: f64,

	/// Keep searching for shorter solutions until the timeout
	#[arg(long, default_value_t = false)]
	optimize: bool,

	/// Longest phase 2 to try after each phase 1
	#[arg(long, default_value_t = SearchConfig::default().max_phase2_depth)]
	max_phase2_depth: usize,

	/// Where the tables are cached
	#[arg(long, default_value_t = String::from("data/twophase.bin"))]
	tables: String,

	/// Print the output to a file rather to the stdout
	#[arg(short, long, default_value_t = String::new())]
	output: String,

	/// Log more, can be repeated
	#[arg(short, long, action = clap::ArgAction::Count)]
	verbose: u8,
}

impl Args {
	fn search_config(&self) -> SearchConfig {
		SearchConfig {
			max_depth: self.max_depth,
			timeout: (self.timeout > 0.0).then(|| Duration::from_secs_f64(self.timeout)),
			optimize: self.optimize,
			max_phase2_depth: self.max_phase2_depth,
		}
	}

	/// The cube described by the arguments, later ones are applied on top
	fn cube(&self) -> Result<CubieCube, Box<dyn Error>> {
		let mut cube = CubieCube::new();

		if self.random {
			cube = CubieCube::random();
		}

		if !self.facelets.is_empty() {
			let face = FaceCube::from_str(&self.facelets)?;
			cube = CubieCube::try_from(&face)?;
		}

		Ok(cube.apply_turns(&parse_turns(&self.sequence)?))
	}
}

fn main() -> Result<(), Box<dyn Error>> {
	let args = Args::parse();

	env_logger::Builder::new()
		.filter_level(match args.verbose {
			0 => LevelFilter::Warn,
			1 => LevelFilter::Info,
			2 => LevelFilter::Debug,
			_ => LevelFilter::Trace,
		})
		.format_timestamp(Some(TimestampPrecision::Millis))
		.init();

	// Whether to redirect it to the stdout or a file
	let mut out: Box<dyn Write> = if args.output.is_empty() {
		Box::new(std::io::stdout())
	} else {
		Box::new(std::fs::File::create(&args.output)?)
	};

	let cube = args.cube()?;

	if !args.solve {
		writeln!(out, "{}", FaceCube::from(&cube))?;
		return Ok(());
	}

	if let Err(e) = cube.verify() {
		return Err(format!("Unsolvable cube: {}", e).into());
	}

	let solver = Solver::new(Arc::new(Tables::load_or_generate(&args.tables)));

	match solver.solve(&cube, &args.search_config())? {
		SolveOutcome::Solved(solution) => {
			info!(
				"{} turns ({} in phase 1), {} nodes in {:.2?}",
				solution.len(),
				solution.phase1_len,
				solution.nodes,
				solution.elapsed
			);

			if args.length {
				writeln!(out, "{} (len={})", solution, solution.len())?;
			} else {
				writeln!(out, "{}", solution)?;
			}
			Ok(())
		}
		SolveOutcome::NotFound { timed_out: true } => Err("No solution found before the timeout".into()),
		SolveOutcome::NotFound { timed_out: false } => {
			Err(format!("No solution with at most {} turns", args.max_depth).into())
		}
	}
}
