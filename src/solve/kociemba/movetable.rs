use bit_set::BitSet;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::cube::{cubiecube::*, turn::*};

/// `table[coord][turn]` is the coordinate of the cube after applying `turn`
/// to a cube with coordinate `coord`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveTable<T> {
	table: Vec<[T; NUM_TURNS]>,
}

/// Build a cube with the given coordinate
type FromCoord = fn(usize) -> CubieCube;
/// Read the coordinate of a cube
type ToCoord<T> = fn(&CubieCube) -> T;
/// Multiplication which only touches the pieces a coordinate looks at
type Multiply = fn(&CubieCube, &CubieCube) -> CubieCube;

impl<T> MoveTable<T>
where
	T: Copy + Default + Send + Sync,
{
	/// Create a movetable
	///
	/// Every coordinate value is turned into a cube, which is multiplied three
	/// times with the generator of each face. After each multiplication the
	/// coordinate is recorded as the result of the clockwise, double and
	/// counter clockwise turn.
	pub fn generate(num_states: usize, from_coord: FromCoord, to_coord: ToCoord<T>, mul: Multiply) -> Self {
		let table = (0..num_states)
			.into_par_iter()
			.map(|coord| {
				let cube = from_coord(coord);
				let mut row = [T::default(); NUM_TURNS];

				for face in Face::iter() {
					let generator = CubieCube::generator(face);
					let mut next = cube;
					for wise in TurnWise::iter() {
						next = mul(&next, &generator);
						row[Turn::new(face, wise).index()] = to_coord(&next);
					}
				}

				row
			})
			.collect();

		Self { table }
	}

	#[inline]
	pub fn get(&self, coord: usize, turn: Turn) -> T {
		self.table[coord][turn.index()]
	}

	pub fn len(&self) -> usize {
		self.table.len()
	}

	pub fn is_empty(&self) -> bool {
		self.table.is_empty()
	}
}

/// All the move tables the two phases need.
#[derive(Clone, Serialize, Deserialize)]
pub struct MoveTables {
	pub twist: MoveTable<u16>,
	pub flip: MoveTable<u16>,
	pub parity: MoveTable<u8>,
	pub fr_to_br: MoveTable<u16>,
	pub urf_to_dlf: MoveTable<u16>,
	/// Only meaningful for the phase 2 turns, the other turns may move
	/// the edges into the UD-slice, hence the wider type.
	pub ur_to_df: MoveTable<u32>,
	pub ur_to_ul: MoveTable<u16>,
	pub ub_to_df: MoveTable<u16>,
}

impl MoveTables {
	pub fn generate() -> Self {
		Self {
			twist: MoveTable::generate(
				N_TWIST,
				|c| CubieCube::new().with_twist(c),
				CubieCube::twist,
				CubieCube::corner_multiply,
			),
			flip: MoveTable::generate(
				N_FLIP,
				|c| CubieCube::new().with_flip(c),
				CubieCube::flip,
				CubieCube::edge_multiply,
			),
			parity: MoveTable::generate(
				N_PARITY,
				|c| CubieCube::new().with_corner_parity(c),
				CubieCube::corner_parity,
				CubieCube::corner_multiply,
			),
			fr_to_br: MoveTable::generate(
				N_FR_TO_BR,
				|c| CubieCube::new().with_fr_to_br(c),
				CubieCube::fr_to_br,
				CubieCube::edge_multiply,
			),
			urf_to_dlf: MoveTable::generate(
				N_URF_TO_DLF,
				|c| CubieCube::new().with_urf_to_dlf(c),
				CubieCube::urf_to_dlf,
				CubieCube::corner_multiply,
			),
			ur_to_df: MoveTable::generate(
				N_UR_TO_DF,
				|c| CubieCube::new().with_ur_to_df(c),
				CubieCube::ur_to_df,
				CubieCube::edge_multiply,
			),
			ur_to_ul: MoveTable::generate(
				N_UR_TO_UL,
				|c| CubieCube::new().with_ur_to_ul(c),
				CubieCube::ur_to_ul,
				CubieCube::edge_multiply,
			),
			ub_to_df: MoveTable::generate(
				N_UB_TO_DF,
				|c| CubieCube::new().with_ub_to_df(c),
				CubieCube::ub_to_df,
				CubieCube::edge_multiply,
			),
		}
	}
}

/// `ur_to_df` for every pair of `ur_to_ul` and `ub_to_df` below `N_MERGE`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeTable {
	table: Vec<u16>,
}

/// Both coordinates put an edge at the same position
const COLLISION: u16 = u16::MAX;

impl MergeTable {
	pub fn generate() -> Self {
		let table = (0..N_MERGE * N_MERGE)
			.into_par_iter()
			.map(|idx| {
				CubieCube::merge_ur_to_df(idx / N_MERGE, idx % N_MERGE)
					.map_or(COLLISION, |coord| coord as u16)
			})
			.collect();

		Self { table }
	}

	/// Returns None if one of the coordinates is not below `N_MERGE`
	/// or if they don't describe a valid cube together.
	pub fn get(&self, ur_to_ul: usize, ub_to_df: usize) -> Option<u16> {
		if ur_to_ul >= N_MERGE || ub_to_df >= N_MERGE {
			return None;
		}

		match self.table[ur_to_ul * N_MERGE + ub_to_df] {
			COLLISION => None,
			coord => Some(coord),
		}
	}
}

/// A set of turns, e.g. those a search phase may use.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct MoveSet(BitSet);

impl MoveSet {
	/// All 18 face turns
	pub fn all() -> Self {
		Turn::all().collect()
	}

	/// The turns which keep a cube inside the subgroup H, i.e. the solved
	/// cube stays without twist, without flip and with the UD-slice edges
	/// inside the UD-slice.
	pub fn phase2() -> Self {
		Turn::all()
			.filter(|turn| {
				let cube = CubieCube::new().apply_turn(*turn);
				cube.twist() == 0 && cube.flip() == 0 && cube.slice() == 0
			})
			.collect()
	}

	pub fn contains(&self, turn: Turn) -> bool {
		self.0.contains(turn.index())
	}

	/// The turns in index order
	pub fn iter(&self) -> impl Iterator<Item = Turn> + '_ {
		self.0.iter().filter_map(Turn::from_index)
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl FromIterator<Turn> for MoveSet {
	fn from_iter<I: IntoIterator<Item = Turn>>(iter: I) -> Self {
		let mut set = BitSet::with_capacity(NUM_TURNS);
		for turn in iter {
			set.insert(turn.index());
		}
		Self(set)
	}
}
