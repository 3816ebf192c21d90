use crate::{
	cube::{cubiecube::*, turn::Turn},
	solve::kociemba::{pruning::PruningTables, tables::Tables},
};

/// A cube described only by the coordinates the search needs.
/// Turns are applied through the move tables.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct CoordCube {
	pub twist: u16,
	pub flip: u16,
	pub parity: u8,
	pub fr_to_br: u16,
	pub urf_to_dlf: u16,
	pub ur_to_ul: u16,
	pub ub_to_df: u16,
	/// Only known while none of the edges UR..DF is in the UD-slice
	pub ur_to_df: Option<u16>,
}

/// A cube inside the subgroup H, described by the phase 2 coordinates.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Phase2Cube {
	pub urf_to_dlf: u16,
	/// Below `N_SLICE2`, all UD-slice edges are inside the slice
	pub fr_to_br: u16,
	pub parity: u8,
	pub ur_to_df: u16,
}

impl CoordCube {
	pub fn new(cube: &CubieCube) -> Self {
		let ur_to_df = cube.ur_to_df();

		Self {
			twist: cube.twist(),
			flip: cube.flip(),
			parity: cube.corner_parity(),
			fr_to_br: cube.fr_to_br(),
			urf_to_dlf: cube.urf_to_dlf(),
			ur_to_ul: cube.ur_to_ul(),
			ub_to_df: cube.ub_to_df(),
			ur_to_df: (ur_to_df < N_UR_TO_DF as u32).then_some(ur_to_df as u16),
		}
	}

	pub fn apply_turn(&self, tables: &Tables, turn: Turn) -> Self {
		let moves = &tables.moves;

		let ur_to_ul = moves.ur_to_ul.get(self.ur_to_ul as usize, turn);
		let ub_to_df = moves.ub_to_df.get(self.ub_to_df as usize, turn);

		Self {
			twist: moves.twist.get(self.twist as usize, turn),
			flip: moves.flip.get(self.flip as usize, turn),
			parity: moves.parity.get(self.parity as usize, turn),
			fr_to_br: moves.fr_to_br.get(self.fr_to_br as usize, turn),
			urf_to_dlf: moves.urf_to_dlf.get(self.urf_to_dlf as usize, turn),
			ur_to_ul,
			ub_to_df,
			ur_to_df: tables.merge.get(ur_to_ul as usize, ub_to_df as usize),
		}
	}

	/// The position of the UD-slice edges
	pub fn slice(&self) -> u16 {
		self.fr_to_br / N_SLICE2 as u16
	}

	/// Whether the cube is in the subgroup H
	pub fn in_h(&self) -> bool {
		self.twist == 0 && self.flip == 0 && self.slice() == 0
	}

	/// Lower bound of the turns needed to reach H
	pub fn phase1_distance(&self, tables: &Tables) -> u8 {
		let pruning = &tables.pruning;
		let slice = self.slice() as usize;

		let twist = pruning.slice_twist.get(PruningTables::slice_twist_index(slice, self.twist as usize));
		let flip = pruning.slice_flip.get(PruningTables::slice_flip_index(slice, self.flip as usize));
		twist.max(flip)
	}

	/// The phase 2 coordinates, if the cube is in H
	pub fn phase2(&self) -> Option<Phase2Cube> {
		if !self.in_h() {
			return None;
		}

		Some(Phase2Cube {
			urf_to_dlf: self.urf_to_dlf,
			fr_to_br: self.fr_to_br,
			parity: self.parity,
			ur_to_df: self.ur_to_df?,
		})
	}
}

impl Phase2Cube {
	/// Only defined for the turns which keep the cube in H
	pub fn apply_turn(&self, tables: &Tables, turn: Turn) -> Self {
		let moves = &tables.moves;

		let ur_to_df = moves.ur_to_df.get(self.ur_to_df as usize, turn);
		debug_assert!((ur_to_df as usize) < N_UR_TO_DF);

		Self {
			urf_to_dlf: moves.urf_to_dlf.get(self.urf_to_dlf as usize, turn),
			fr_to_br: moves.fr_to_br.get(self.fr_to_br as usize, turn),
			parity: moves.parity.get(self.parity as usize, turn),
			ur_to_df: ur_to_df as u16,
		}
	}

	/// Lower bound of the turns needed to solve the cube inside H.
	/// Zero only for the solved cube.
	pub fn distance(&self, tables: &Tables) -> u8 {
		let pruning = &tables.pruning;
		let (fr_to_br, parity) = (self.fr_to_br as usize, self.parity as usize);

		let corners = pruning
			.slice_urf_to_dlf_parity
			.get(PruningTables::phase2_index(fr_to_br, self.urf_to_dlf as usize, parity));
		let edges = pruning
			.slice_ur_to_df_parity
			.get(PruningTables::phase2_index(fr_to_br, self.ur_to_df as usize, parity));
		corners.max(edges)
	}
}
