use std::{
	fs::File,
	io::{BufReader, BufWriter, Write},
	path::Path,
	time::Instant,
};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::solve::kociemba::{
	movetable::{MergeTable, MoveTables},
	pruning::PruningTables,
};

/// Bumped whenever the layout of the tables changes
const FORMAT_VERSION: u32 = 1;

#[derive(thiserror::Error, Debug)]
pub enum TableError {
	#[error("Could not access the table file: {0}")]
	Io(#[from] std::io::Error),
	#[error("Could not encode or decode the tables: {0}")]
	Encoding(#[from] bincode::Error),
	#[error("The table file has version {found}, expected {expected}")]
	Version { found: u32, expected: u32 },
}

/// Everything the search looks up, built once and only read afterwards.
/// Share it between solvers with an `Arc`.
#[derive(Clone, Serialize, Deserialize)]
pub struct Tables {
	pub moves: MoveTables,
	pub merge: MergeTable,
	pub pruning: PruningTables,
}

impl Tables {
	/// Generate all tables. This takes a few seconds.
	pub fn generate() -> Self {
		let start = Instant::now();

		let moves = MoveTables::generate();
		let merge = MergeTable::generate();
		info!("Generated the move tables in {:.2?}", start.elapsed());

		let pruning = PruningTables::generate(&moves);
		info!("Generated the pruning tables in {:.2?}", start.elapsed());

		Self { moves, merge, pruning }
	}

	pub fn save(&self, path: impl AsRef<Path>) -> Result<(), TableError> {
		let path = path.as_ref();
		if let Some(dir) = path.parent() {
			std::fs::create_dir_all(dir)?;
		}

		let mut file = BufWriter::new(File::create(path)?);
		bincode::serialize_into(&mut file, &FORMAT_VERSION)?;
		bincode::serialize_into(&mut file, self)?;
		file.flush()?;
		Ok(())
	}

	pub fn load(path: impl AsRef<Path>) -> Result<Self, TableError> {
		let start = Instant::now();
		let mut file = BufReader::new(File::open(path.as_ref())?);

		let version: u32 = bincode::deserialize_from(&mut file)?;
		if version != FORMAT_VERSION {
			return Err(TableError::Version {
				found: version,
				expected: FORMAT_VERSION,
			});
		}

		let tables = bincode::deserialize_from(&mut file)?;
		info!("Loaded the tables from {} in {:.2?}", path.as_ref().display(), start.elapsed());
		Ok(tables)
	}

	/// Load the tables from `path`, or generate them and try to save them there.
	pub fn load_or_generate(path: impl AsRef<Path>) -> Self {
		let path = path.as_ref();

		match Self::load(path) {
			Ok(tables) => return tables,
			Err(TableError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
				info!("No tables at {}, generating them", path.display());
			}
			Err(e) => warn!("Could not load the tables from {}: {e}", path.display()),
		}

		let tables = Self::generate();
		if let Err(e) = tables.save(path) {
			warn!("Could not save the tables to {}: {e}", path.display());
		}
		tables
	}
}
