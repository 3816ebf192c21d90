use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
	cube::{cubiecube::*, turn::Turn},
	solve::kociemba::movetable::{MoveSet, MoveTables},
};

/// An entry which the layered fill has not reached yet
const UNKNOWN: u8 = 0x0f;

/// A lower bound on the number of turns needed to solve a pair of coordinates.
/// Two entries are packed into each byte, the even index in the low nibble.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PruningTable {
	data: Vec<u8>,
	len: usize,
}

impl PruningTable {
	/// A table with `len` entries, all unknown
	fn new(len: usize) -> Self {
		Self {
			data: vec![0xff; len / 2 + 1],
			len,
		}
	}

	#[inline]
	pub fn get(&self, idx: usize) -> u8 {
		let byte = self.data[idx / 2];
		if idx & 1 == 0 {
			byte & 0x0f
		} else {
			byte >> 4
		}
	}

	#[inline]
	pub fn set(&mut self, idx: usize, value: u8) {
		debug_assert!(value <= UNKNOWN);

		let byte = &mut self.data[idx / 2];
		if idx & 1 == 0 {
			*byte = (*byte & 0xf0) | value;
		} else {
			*byte = (*byte & 0x0f) | (value << 4);
		}
	}

	pub fn len(&self) -> usize {
		self.len
	}

	pub fn is_empty(&self) -> bool {
		self.len == 0
	}

	/// Fill the table by depth, starting with the solved state at index 0.
	/// Every entry at the current depth is expanded with each turn in `moves`,
	/// unknown successors get the next depth. The fill stops once a whole layer
	/// adds nothing.
	pub fn generate<F>(name: &str, len: usize, moves: &MoveSet, successor: F) -> Self
	where
		F: Fn(usize, Turn) -> usize,
	{
		let mut table = Self::new(len);
		table.set(0, 0);

		let mut depth = 0;
		let mut done = 1;

		loop {
			let mut added = 0;

			for idx in 0..len {
				if table.get(idx) != depth {
					continue;
				}

				for turn in moves.iter() {
					let next = successor(idx, turn);
					if table.get(next) == UNKNOWN {
						table.set(next, depth + 1);
						added += 1;
					}
				}
			}

			if added == 0 {
				break;
			}

			done += added;
			depth += 1;
			debug_assert!(depth < UNKNOWN);
			debug!("{name}: depth {depth}, {done}/{len} entries");
		}

		table
	}
}

/// The four pruning tables of the search, two per phase.
#[derive(Clone, Serialize, Deserialize)]
pub struct PruningTables {
	pub slice_twist: PruningTable,
	pub slice_flip: PruningTable,
	pub slice_urf_to_dlf_parity: PruningTable,
	pub slice_ur_to_df_parity: PruningTable,
}

impl PruningTables {
	pub const fn slice_twist_index(slice: usize, twist: usize) -> usize {
		N_SLICE1 * twist + slice
	}

	pub const fn slice_flip_index(slice: usize, flip: usize) -> usize {
		N_SLICE1 * flip + slice
	}

	/// `fr_to_br` has to be below `N_SLICE2`, which holds inside H
	pub const fn phase2_index(fr_to_br: usize, perm: usize, parity: usize) -> usize {
		(N_SLICE2 * perm + fr_to_br) * N_PARITY + parity
	}

	pub fn generate(moves: &MoveTables) -> Self {
		let all = MoveSet::all();
		let phase2 = MoveSet::phase2();

		let slice_successor = |slice: usize, turn: Turn| {
			moves.fr_to_br.get(slice * N_SLICE2, turn) as usize / N_SLICE2
		};

		let ((slice_twist, slice_flip), (slice_urf_to_dlf_parity, slice_ur_to_df_parity)) = rayon::join(
			|| {
				rayon::join(
					|| {
						PruningTable::generate("slice_twist", N_SLICE1 * N_TWIST, &all, |idx, turn| {
							let twist = moves.twist.get(idx / N_SLICE1, turn) as usize;
							Self::slice_twist_index(slice_successor(idx % N_SLICE1, turn), twist)
						})
					},
					|| {
						PruningTable::generate("slice_flip", N_SLICE1 * N_FLIP, &all, |idx, turn| {
							let flip = moves.flip.get(idx / N_SLICE1, turn) as usize;
							Self::slice_flip_index(slice_successor(idx % N_SLICE1, turn), flip)
						})
					},
				)
			},
			|| {
				rayon::join(
					|| {
						let len = N_SLICE2 * N_URF_TO_DLF * N_PARITY;
						PruningTable::generate("slice_urf_to_dlf_parity", len, &phase2, |idx, turn| {
							let parity = moves.parity.get(idx % N_PARITY, turn) as usize;
							let rest = idx / N_PARITY;
							let fr_to_br = moves.fr_to_br.get(rest % N_SLICE2, turn) as usize;
							let urf_to_dlf = moves.urf_to_dlf.get(rest / N_SLICE2, turn) as usize;
							Self::phase2_index(fr_to_br, urf_to_dlf, parity)
						})
					},
					|| {
						let len = N_SLICE2 * N_UR_TO_DF * N_PARITY;
						PruningTable::generate("slice_ur_to_df_parity", len, &phase2, |idx, turn| {
							let parity = moves.parity.get(idx % N_PARITY, turn) as usize;
							let rest = idx / N_PARITY;
							let fr_to_br = moves.fr_to_br.get(rest % N_SLICE2, turn) as usize;
							let ur_to_df = moves.ur_to_df.get(rest / N_SLICE2, turn) as usize;
							Self::phase2_index(fr_to_br, ur_to_df, parity)
						})
					},
				)
			},
		);

		Self {
			slice_twist,
			slice_flip,
			slice_urf_to_dlf_parity,
			slice_ur_to_df_parity,
		}
	}
}
