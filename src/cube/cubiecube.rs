use const_for::const_for;
use rand::{seq::SliceRandom, Rng};
use strum::IntoEnumIterator;

use crate::{
	cube::{turn::*, *},
	math::*,
};

pub type Ori = u8;

type CornerList = [(Corner, Ori); NUM_CORNERS];
type EdgeList = [(Edge, Ori); NUM_EDGES];

/// The cube on the cubie level, as Kociemba published it in
/// https://kociemba.org/math/cubielevel.htm
///
/// `corners[i]` is the corner sitting at position `i` together with its twist,
/// `edges[i]` the edge at position `i` together with its flip.
///
/// All operations return a new cube; a `CubieCube` is never changed in place
/// by the library.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct CubieCube {
	pub corners: CornerList,
	pub edges: EdgeList,
}

// ===== Tranformation-Corners =====
#[rustfmt::skip]
const TC_BASE: CornerList = [
	(Corner::URF, 0), (Corner::UFL, 0), (Corner::ULB, 0), (Corner::UBR, 0),
	(Corner::DFR, 0), (Corner::DLF, 0), (Corner::DBL, 0), (Corner::DRB, 0),
];
#[rustfmt::skip]
const TC_UP: CornerList = [
	(Corner::UBR, 0), (Corner::URF, 0), (Corner::UFL, 0), (Corner::ULB, 0),
	(Corner::DFR, 0), (Corner::DLF, 0), (Corner::DBL, 0), (Corner::DRB, 0),
];
#[rustfmt::skip]
const TC_RIGHT: CornerList = [
	(Corner::DFR, 2), (Corner::UFL, 0), (Corner::ULB, 0), (Corner::URF, 1),
	(Corner::DRB, 1), (Corner::DLF, 0), (Corner::DBL, 0), (Corner::UBR, 2),
];
#[rustfmt::skip]
const TC_FRONT: CornerList = [
	(Corner::UFL, 1), (Corner::DLF, 2), (Corner::ULB, 0), (Corner::UBR, 0),
	(Corner::URF, 2), (Corner::DFR, 1), (Corner::DBL, 0), (Corner::DRB, 0),
];
#[rustfmt::skip]
const TC_DOWN: CornerList = [
	(Corner::URF, 0), (Corner::UFL, 0), (Corner::ULB, 0), (Corner::UBR, 0),
	(Corner::DLF, 0), (Corner::DBL, 0), (Corner::DRB, 0), (Corner::DFR, 0),
];
#[rustfmt::skip]
const TC_LEFT: CornerList = [
	(Corner::URF, 0), (Corner::ULB, 1), (Corner::DBL, 2), (Corner::UBR, 0),
	(Corner::DFR, 0), (Corner::UFL, 2), (Corner::DLF, 1), (Corner::DRB, 0),
];
#[rustfmt::skip]
const TC_BACK: CornerList = [
	(Corner::URF, 0), (Corner::UFL, 0), (Corner::UBR, 1), (Corner::DRB, 2),
	(Corner::DFR, 0), (Corner::DLF, 0), (Corner::ULB, 2), (Corner::DBL, 1),
];

/// Chain two corner transformations: first t1, then t2.
const fn chain_corners(t1: CornerList, t2: CornerList) -> CornerList {
	let mut out = TC_BASE;

	const_for!(i in 0..NUM_CORNERS => {
		let (c2, o2) = t2[i];
		let (c1, o1) = t1[c2 as usize];

		out[i] = (c1, (o1 + o2) % 3);
	});

	out
}

const fn generate_corner_transform_table() -> [[CornerList; NUM_TURNWISES]; NUM_FACES] {
	const BASE: [CornerList; NUM_FACES] = [TC_UP, TC_RIGHT, TC_FRONT, TC_DOWN, TC_LEFT, TC_BACK];

	let mut out = [[TC_BASE; NUM_TURNWISES]; NUM_FACES];

	const_for!(i in 0..NUM_FACES => {
		out[i][0] = BASE[i];
		out[i][1] = chain_corners(out[i][0], BASE[i]);
		out[i][2] = chain_corners(out[i][1], BASE[i]);
	});

	out
}

const CORNER_TRANSFORM: [[CornerList; NUM_TURNWISES]; NUM_FACES] =
	generate_corner_transform_table();

// ===== Edge Transformations =====
#[rustfmt::skip]
const TE_BASE: EdgeList = [
	(Edge::UR,0), (Edge::UF,0), (Edge::UL,0), (Edge::UB,0),
	(Edge::DR,0), (Edge::DF,0), (Edge::DL,0), (Edge::DB,0),
	(Edge::FR,0), (Edge::FL,0), (Edge::BL,0), (Edge::BR,0),
];
#[rustfmt::skip]
const TE_UP: EdgeList = [
	(Edge::UB,0), (Edge::UR,0), (Edge::UF,0), (Edge::UL,0),
	(Edge::DR,0), (Edge::DF,0), (Edge::DL,0), (Edge::DB,0),
	(Edge::FR,0), (Edge::FL,0), (Edge::BL,0), (Edge::BR,0),
];
#[rustfmt::skip]
const TE_RIGHT: EdgeList = [
	(Edge::FR,0), (Edge::UF,0), (Edge::UL,0), (Edge::UB,0),
	(Edge::BR,0), (Edge::DF,0), (Edge::DL,0), (Edge::DB,0),
	(Edge::DR,0), (Edge::FL,0), (Edge::BL,0), (Edge::UR,0),
];
#[rustfmt::skip]
const TE_FRONT: EdgeList = [
	(Edge::UR,0), (Edge::FL,1), (Edge::UL,0), (Edge::UB,0),
	(Edge::DR,0), (Edge::FR,1), (Edge::DL,0), (Edge::DB,0),
	(Edge::UF,1), (Edge::DF,1), (Edge::BL,0), (Edge::BR,0),
];
#[rustfmt::skip]
const TE_DOWN: EdgeList = [
	(Edge::UR,0), (Edge::UF,0), (Edge::UL,0), (Edge::UB,0),
	(Edge::DF,0), (Edge::DL,0), (Edge::DB,0), (Edge::DR,0),
	(Edge::FR,0), (Edge::FL,0), (Edge::BL,0), (Edge::BR,0),
];
#[rustfmt::skip]
const TE_LEFT: EdgeList = [
	(Edge::UR,0), (Edge::UF,0), (Edge::BL,0), (Edge::UB,0),
	(Edge::DR,0), (Edge::DF,0), (Edge::FL,0), (Edge::DB,0),
	(Edge::FR,0), (Edge::UL,0), (Edge::DL,0), (Edge::BR,0),
];
#[rustfmt::skip]
const TE_BACK: EdgeList = [
	(Edge::UR,0), (Edge::UF,0), (Edge::UL,0), (Edge::BR,1),
	(Edge::DR,0), (Edge::DF,0), (Edge::DL,0), (Edge::BL,1),
	(Edge::FR,0), (Edge::FL,0), (Edge::UB,1), (Edge::DB,1),
];

/// Chain two edge transformations: first t1, then t2.
const fn chain_edges(t1: EdgeList, t2: EdgeList) -> EdgeList {
	let mut out = TE_BASE;

	const_for!(i in 0..NUM_EDGES => {
		let (e2, o2) = t2[i];
		let (e1, o1) = t1[e2 as usize];

		out[i] = (e1, (o1 + o2) & 1);
	});

	out
}

const fn generate_edge_transform_table() -> [[EdgeList; NUM_TURNWISES]; NUM_FACES] {
	const BASE: [EdgeList; NUM_FACES] = [TE_UP, TE_RIGHT, TE_FRONT, TE_DOWN, TE_LEFT, TE_BACK];

	let mut out = [[TE_BASE; NUM_TURNWISES]; NUM_FACES];

	const_for!(i in 0..NUM_FACES => {
		out[i][0] = BASE[i];
		out[i][1] = chain_edges(out[i][0], BASE[i]);
		out[i][2] = chain_edges(out[i][1], BASE[i]);
	});

	out
}

const EDGE_TRANSFORM: [[EdgeList; NUM_TURNWISES]; NUM_FACES] = generate_edge_transform_table();

// ===== Coordinate ranges =====

/// 3^7 possible corner orientations
pub const N_TWIST: usize = 2187;
/// 2^11 possible edge flips
pub const N_FLIP: usize = 2048;
/// 12 choose 4 possible positions of the UD-slice edges
pub const N_SLICE1: usize = 495;
/// 4! permutations of the UD-slice edges inside the slice
pub const N_SLICE2: usize = 24;
/// 2 possible corner parities
pub const N_PARITY: usize = 2;
/// 8!/(8-6)! permutations of the corners URF..DLF
pub const N_URF_TO_DLF: usize = 20160;
/// 12!/(12-4)! permutations of the UD-slice edges
pub const N_FR_TO_BR: usize = 11880;
/// 12!/(12-3)! permutations of the edges UR, UF, UL
pub const N_UR_TO_UL: usize = 1320;
/// 12!/(12-3)! permutations of the edges UB, DR, DF
pub const N_UB_TO_DF: usize = 1320;
/// 8!/(8-6)! permutations of the edges UR..DF, once they left the UD-slice
pub const N_UR_TO_DF: usize = 20160;

/// `ur_to_ul` and `ub_to_df` are below this bound iff their edges are outside the UD-slice.
pub const N_MERGE: usize = 336;

const CORNER_PIECES: std::ops::Range<usize> = 0..6;
const SLICE_PIECES: std::ops::Range<usize> = 8..12;
const UD_EDGE_PIECES: std::ops::Range<usize> = 0..6;
const UR_TO_UL_PIECES: std::ops::Range<usize> = 0..3;
const UB_TO_DF_PIECES: std::ops::Range<usize> = 3..6;

impl Default for CubieCube {
	fn default() -> Self {
		Self::new()
	}
}

impl CubieCube {
	/// The solved cube
	pub const fn new() -> Self {
		CubieCube {
			corners: TC_BASE,
			edges: TE_BASE,
		}
	}

	/// Build a cube from raw permutation and orientation vectors.
	/// `cp[i]`/`ep[i]` is the label of the piece at position `i`.
	///
	/// Only ranges are checked here, use `verify` to check solvability.
	pub fn from_raw(
		cp: [usize; NUM_CORNERS],
		co: [Ori; NUM_CORNERS],
		ep: [usize; NUM_EDGES],
		eo: [Ori; NUM_EDGES],
	) -> Result<Self, CubeError> {
		let mut out = Self::new();

		for i in 0..NUM_CORNERS {
			let corner = Corner::from_repr(cp[i] as u8).filter(|_| cp[i] < NUM_CORNERS);
			match corner {
				Some(c) if co[i] < 3 => out.corners[i] = (c, co[i]),
				_ => return Err(CubeError::OutOfRange),
			}
		}

		for i in 0..NUM_EDGES {
			let edge = Edge::from_repr(ep[i] as u8).filter(|_| ep[i] < NUM_EDGES);
			match edge {
				Some(e) if eo[i] < 2 => out.edges[i] = (e, eo[i]),
				_ => return Err(CubeError::OutOfRange),
			}
		}

		Ok(out)
	}

	/// A uniformly distributed random cube which is solvable.
	pub fn random() -> Self {
		Self::random_with(&mut rand::thread_rng())
	}

	pub fn random_with<R: Rng>(rng: &mut R) -> Self {
		let mut cube = Self::new()
			.with_twist(rng.gen_range(0..N_TWIST))
			.with_flip(rng.gen_range(0..N_FLIP));

		let mut corners: Vec<Corner> = Corner::iter().collect();
		let mut edges: Vec<Edge> = Edge::iter().collect();
		corners.shuffle(rng);
		edges.shuffle(rng);

		for (i, c) in corners.into_iter().enumerate() {
			cube.corners[i].0 = c;
		}
		for (i, e) in edges.into_iter().enumerate() {
			cube.edges[i].0 = e;
		}

		// Fix the parity by swapping two edges
		if cube.corner_parity() != cube.edge_parity() {
			let first = cube.edges[0].0;
			cube.edges[0].0 = cube.edges[1].0;
			cube.edges[1].0 = first;
		}

		cube
	}

	/// The cube of a single clockwise quarter turn of `face`.
	pub const fn generator(face: Face) -> Self {
		Self {
			corners: CORNER_TRANSFORM[face as usize][0],
			edges: EDGE_TRANSFORM[face as usize][0],
		}
	}

	/// Get the corner and orientation at position 'c'
	pub const fn corner(&self, c: Corner) -> (Corner, Ori) {
		self.corners[c as usize]
	}

	/// Get the edge and orientation at position 'e'
	pub const fn edge(&self, e: Edge) -> (Edge, Ori) {
		self.edges[e as usize]
	}

	// ===== Group operations =====

	/// Compose the corners with those of `other`, keeping the edges.
	pub const fn corner_multiply(&self, other: &CubieCube) -> Self {
		Self {
			corners: chain_corners(self.corners, other.corners),
			edges: self.edges,
		}
	}

	/// Compose the edges with those of `other`, keeping the corners.
	pub const fn edge_multiply(&self, other: &CubieCube) -> Self {
		Self {
			corners: self.corners,
			edges: chain_edges(self.edges, other.edges),
		}
	}

	/// First apply `self`, then `other`.
	pub const fn multiply(&self, other: &CubieCube) -> Self {
		Self {
			corners: chain_corners(self.corners, other.corners),
			edges: chain_edges(self.edges, other.edges),
		}
	}

	pub fn inverse(&self) -> Self {
		let mut out = Self::new();

		for (i, (c, o)) in self.corners.iter().enumerate() {
			out.corners[*c as usize] = (TC_BASE[i].0, (3 - o) % 3);
		}
		for (i, (e, o)) in self.edges.iter().enumerate() {
			out.edges[*e as usize] = (TE_BASE[i].0, *o);
		}

		out
	}

	pub fn apply_turn(&self, turn: Turn) -> Self {
		let tc = CORNER_TRANSFORM[turn.face as usize][turn.wise as usize];
		let te = EDGE_TRANSFORM[turn.face as usize][turn.wise as usize];
		Self {
			corners: chain_corners(self.corners, tc),
			edges: chain_edges(self.edges, te),
		}
	}

	/// Apply the given sequence of turns.
	pub fn apply_turns<'a>(&self, turns: impl IntoIterator<Item = &'a Turn>) -> Self {
		turns.into_iter().fold(*self, |cube, turn| cube.apply_turn(*turn))
	}

	pub fn is_solved(&self) -> bool {
		self.edges == TE_BASE && self.corners == TC_BASE
	}

	// ===== Coordinate get functions =====
	// The ranges below only hold for a cube which passes `verify`.

	fn corner_labels(&self) -> [usize; NUM_CORNERS] {
		self.corners.map(|(c, _)| c as usize)
	}

	fn edge_labels(&self) -> [usize; NUM_EDGES] {
		self.edges.map(|(e, _)| e as usize)
	}

	/// The corner orientation coordinate, `0..N_TWIST`
	pub fn twist(&self) -> u16 {
		rank_orientation(&self.corners.map(|(_, o)| o), 3) as u16
	}

	/// The edge orientation coordinate, `0..N_FLIP`
	pub fn flip(&self) -> u16 {
		rank_orientation(&self.edges.map(|(_, o)| o), 2) as u16
	}

	/// Parity of the corner permutation, 0 or 1
	pub fn corner_parity(&self) -> u8 {
		permutation_parity(&self.corner_labels()) as u8
	}

	/// Parity of the edge permutation, 0 or 1
	pub fn edge_parity(&self) -> u8 {
		permutation_parity(&self.edge_labels()) as u8
	}

	/// The permutation of the UD-slice edges FR, FL, BL and BR, `0..N_FR_TO_BR`.
	/// `fr_to_br / 24` is the position of the slice edges alone,
	/// `fr_to_br < 24` iff they are all inside the slice.
	pub fn fr_to_br(&self) -> u16 {
		rank_partial_permutation(&self.edge_labels(), SLICE_PIECES, true) as u16
	}

	/// The position of the UD-slice edges, ignoring their order, `0..N_SLICE1`
	pub fn slice(&self) -> u16 {
		self.fr_to_br() / N_SLICE2 as u16
	}

	/// The permutation of the corners URF, UFL, ULB, UBR, DFR and DLF, `0..N_URF_TO_DLF`
	pub fn urf_to_dlf(&self) -> u16 {
		rank_partial_permutation(&self.corner_labels(), CORNER_PIECES, false) as u16
	}

	/// The permutation of the edges UR, UF, UL, UB, DR and DF.
	/// It is below `N_UR_TO_DF` iff none of them is in the UD-slice.
	pub fn ur_to_df(&self) -> u32 {
		rank_partial_permutation(&self.edge_labels(), UD_EDGE_PIECES, false) as u32
	}

	/// The permutation of the edges UR, UF and UL, `0..N_UR_TO_UL`
	pub fn ur_to_ul(&self) -> u16 {
		rank_partial_permutation(&self.edge_labels(), UR_TO_UL_PIECES, false) as u16
	}

	/// The permutation of the edges UB, DR and DF, `0..N_UB_TO_DF`
	pub fn ub_to_df(&self) -> u16 {
		rank_partial_permutation(&self.edge_labels(), UB_TO_DF_PIECES, false) as u16
	}

	// ===== Coordinate set functions =====

	fn with_corner_labels(mut self, labels: &[usize]) -> Self {
		for (i, l) in labels.iter().enumerate() {
			self.corners[i].0 = TC_BASE[*l].0;
		}
		self
	}

	fn with_edge_labels(mut self, labels: &[usize]) -> Self {
		for (i, l) in labels.iter().enumerate() {
			self.edges[i].0 = TE_BASE[*l].0;
		}
		self
	}

	/// Replace the corner orientations by those of the given coordinate
	pub fn with_twist(mut self, coord: usize) -> Self {
		debug_assert!(coord < N_TWIST);

		let ori = unrank_orientation::<NUM_CORNERS>(coord, 3);
		for (c, o) in self.corners.iter_mut().zip(ori) {
			c.1 = o;
		}
		self
	}

	/// Replace the edge orientations by those of the given coordinate
	pub fn with_flip(mut self, coord: usize) -> Self {
		debug_assert!(coord < N_FLIP);

		let ori = unrank_orientation::<NUM_EDGES>(coord, 2);
		for (e, o) in self.edges.iter_mut().zip(ori) {
			e.1 = o;
		}
		self
	}

	/// Replace the corner permutation by an even or odd one
	pub fn with_corner_parity(self, parity: usize) -> Self {
		debug_assert!(parity < N_PARITY);

		let mut labels: Vec<usize> = (0..NUM_CORNERS).collect();
		if parity == 1 {
			labels.swap(NUM_CORNERS - 2, NUM_CORNERS - 1);
		}
		self.with_corner_labels(&labels)
	}

	pub fn with_fr_to_br(self, coord: usize) -> Self {
		debug_assert!(coord < N_FR_TO_BR);
		self.with_edge_labels(&unrank_partial_permutation(coord, NUM_EDGES, SLICE_PIECES, true))
	}

	pub fn with_urf_to_dlf(self, coord: usize) -> Self {
		debug_assert!(coord < N_URF_TO_DLF);
		self.with_corner_labels(&unrank_partial_permutation(coord, NUM_CORNERS, CORNER_PIECES, false))
	}

	pub fn with_ur_to_df(self, coord: usize) -> Self {
		self.with_edge_labels(&unrank_partial_permutation(coord, NUM_EDGES, UD_EDGE_PIECES, false))
	}

	pub fn with_ur_to_ul(self, coord: usize) -> Self {
		debug_assert!(coord < N_UR_TO_UL);
		self.with_edge_labels(&unrank_partial_permutation(coord, NUM_EDGES, UR_TO_UL_PIECES, false))
	}

	pub fn with_ub_to_df(self, coord: usize) -> Self {
		debug_assert!(coord < N_UB_TO_DF);
		self.with_edge_labels(&unrank_partial_permutation(coord, NUM_EDGES, UB_TO_DF_PIECES, false))
	}

	/// Combine the `ur_to_ul` and `ub_to_df` coordinates into `ur_to_df`.
	/// Returns None if both place an edge at the same position.
	pub fn merge_ur_to_df(ur_to_ul: usize, ub_to_df: usize) -> Option<u32> {
		let a = unrank_partial_permutation(ur_to_ul, NUM_EDGES, UR_TO_UL_PIECES, false);
		let b = unrank_partial_permutation(ub_to_df, NUM_EDGES, UB_TO_DF_PIECES, false);

		let mut slots = [None; NUM_EDGES];
		for i in 0..NUM_EDGES {
			if UR_TO_UL_PIECES.contains(&a[i]) {
				slots[i] = Some(a[i]);
			}
			if UB_TO_DF_PIECES.contains(&b[i]) {
				if slots[i].is_some() {
					return None;
				}
				slots[i] = Some(b[i]);
			}
		}

		let mut others = UD_EDGE_PIECES.end..NUM_EDGES;
		let labels: Vec<usize> = slots
			.into_iter()
			.map(|s| s.or_else(|| others.next()).unwrap_or_default())
			.collect();

		Some(rank_partial_permutation(&labels, UD_EDGE_PIECES, false) as u32)
	}

	// ===== Utility functions =====

	/// Check that the cube can be solved.
	pub fn verify(&self) -> Result<(), CubeError> {
		// Check that all edges are there once
		let mut contains = [false; NUM_EDGES];
		for (e, _) in self.edges.iter() {
			contains[*e as usize] = true;
		}
		if contains.into_iter().any(|b| !b) {
			return Err(CubeError::MissingEdges);
		}

		// The sum of the edge orientations have to be divisible by 2
		let eori = self.edges.iter().map(|(_, o)| *o as u32).sum::<u32>();
		if eori % 2 != 0 {
			return Err(CubeError::EdgeOrientation);
		}

		// Check that all corners are there once
		let mut contains = [false; NUM_CORNERS];
		for (c, _) in self.corners.iter() {
			contains[*c as usize] = true;
		}
		if contains.into_iter().any(|b| !b) {
			return Err(CubeError::MissingCorners);
		}

		// The sum of the corner orientations have to be divisible by 3
		let cori = self.corners.iter().map(|(_, o)| *o as u32).sum::<u32>();
		if cori % 3 != 0 {
			return Err(CubeError::CornerOrientation(cori % 3));
		}

		// There must be an even number of swaps throughout the permutations
		if self.corner_parity() != self.edge_parity() {
			return Err(CubeError::Parity);
		}

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use rand::{rngs::StdRng, SeedableRng};

	use super::*;

	fn scramble() -> CubieCube {
		let turns = parse_turns("L B R2 U D' R D2 L U' R' B2 F").unwrap();
		CubieCube::new().apply_turns(&turns)
	}

	#[test]
	/// Check that all basic turnings result to neutral after 4 turns
	fn four_quarter_turns_are_neutral() {
		for start in [CubieCube::new(), scramble()] {
			for face in Face::iter() {
				let turn = Turn::new(face, TurnWise::Clockwise);
				let mut cube = start;
				for _ in 0..4 {
					cube = cube.apply_turn(turn);
				}
				assert_eq!(cube, start, "Turn {} doesn't result to neutral element after 4 turns.", turn);
			}
		}
	}

	#[test]
	fn turnwises_are_powers_of_the_generator() {
		let cube = scramble();
		for face in Face::iter() {
			let g = CubieCube::generator(face);
			let once = cube.multiply(&g);
			let twice = once.multiply(&g);
			let thrice = twice.multiply(&g);

			assert_eq!(cube.apply_turn(Turn::new(face, TurnWise::Clockwise)), once);
			assert_eq!(cube.apply_turn(Turn::new(face, TurnWise::Double)), twice);
			assert_eq!(cube.apply_turn(Turn::new(face, TurnWise::CounterClockwise)), thrice);
			assert_eq!(once.corner_multiply(&g).edge_multiply(&g), twice);
		}
	}

	#[test]
	fn inverse() {
		let cube = scramble();
		assert!(cube.multiply(&cube.inverse()).is_solved());
		assert!(cube.inverse().multiply(&cube).is_solved());

		let turns = parse_turns("R U F'").unwrap();
		let undo = parse_turns("F U' R'").unwrap();
		assert_eq!(CubieCube::new().apply_turns(&turns).inverse(), CubieCube::new().apply_turns(&undo));
	}

	#[test]
	fn solved_coordinates() {
		let cube = CubieCube::new();
		assert_eq!(cube.twist(), 0);
		assert_eq!(cube.flip(), 0);
		assert_eq!(cube.corner_parity(), 0);
		assert_eq!(cube.fr_to_br(), 0);
		assert_eq!(cube.urf_to_dlf(), 0);
		assert_eq!(cube.ur_to_ul(), 0);
		assert_eq!(cube.ub_to_df(), 114);
		assert_eq!(cube.ur_to_df(), 0);
	}

	#[test]
	fn coordinate_roundtrips() {
		let base = scramble();

		for i in 0..N_TWIST {
			assert_eq!(base.with_twist(i).twist() as usize, i);
		}
		for i in 0..N_FLIP {
			assert_eq!(base.with_flip(i).flip() as usize, i);
		}
		for i in 0..N_PARITY {
			assert_eq!(base.with_corner_parity(i).corner_parity() as usize, i);
		}
		for i in 0..N_FR_TO_BR {
			assert_eq!(base.with_fr_to_br(i).fr_to_br() as usize, i);
		}
		for i in 0..N_URF_TO_DLF {
			assert_eq!(base.with_urf_to_dlf(i).urf_to_dlf() as usize, i);
		}
		for i in 0..N_UR_TO_DF {
			assert_eq!(base.with_ur_to_df(i).ur_to_df() as usize, i);
		}
		for i in 0..N_UR_TO_UL {
			assert_eq!(base.with_ur_to_ul(i).ur_to_ul() as usize, i);
		}
		for i in 0..N_UB_TO_DF {
			assert_eq!(base.with_ub_to_df(i).ub_to_df() as usize, i);
		}
	}

	#[test]
	fn arrays_survive_ranking() {
		let mut rng = StdRng::seed_from_u64(7);

		for _ in 0..100 {
			let cube = CubieCube::random_with(&mut rng);
			let plain = CubieCube::new();

			let oriented = plain.with_twist(cube.twist() as usize).with_flip(cube.flip() as usize);
			assert!(oriented.corners.iter().zip(cube.corners).all(|(a, b)| a.1 == b.1));
			assert!(oriented.edges.iter().zip(cube.edges).all(|(a, b)| a.1 == b.1));

			let corners = plain.with_urf_to_dlf(cube.urf_to_dlf() as usize);
			for (i, (c, _)) in cube.corners.iter().enumerate() {
				if (*c as usize) < 6 {
					assert_eq!(corners.corners[i].0, *c);
				}
			}

			let slice = plain.with_fr_to_br(cube.fr_to_br() as usize);
			for (i, (e, _)) in cube.edges.iter().enumerate() {
				if e.is_slice() {
					assert_eq!(slice.edges[i].0, *e);
				}
			}
		}
	}

	#[test]
	fn merge_matches_direct_coordinate() {
		let mut rng = StdRng::seed_from_u64(11);
		let phase2 = parse_turns("U U2 U' D D2 D' R2 F2 L2 B2").unwrap();

		for _ in 0..200 {
			let mut cube = CubieCube::new();
			for _ in 0..30 {
				cube = cube.apply_turn(phase2[rng.gen_range(0..phase2.len())]);
			}

			assert!((cube.ur_to_ul() as usize) < N_MERGE);
			assert!((cube.ub_to_df() as usize) < N_MERGE);
			let merged = CubieCube::merge_ur_to_df(cube.ur_to_ul() as usize, cube.ub_to_df() as usize);
			assert_eq!(merged, Some(cube.ur_to_df()));
		}

		// UR and UB both at position UR
		let ur_to_ul = CubieCube::new().ur_to_ul() as usize;
		let ub_to_df = CubieCube::new().with_ub_to_df(0).ub_to_df() as usize;
		assert_eq!(CubieCube::merge_ur_to_df(ur_to_ul, ub_to_df), None);
	}

	#[test]
	fn random_cubes_are_solvable() {
		let mut rng = StdRng::seed_from_u64(3);
		for _ in 0..1000 {
			assert_eq!(CubieCube::random_with(&mut rng).verify(), Ok(()));
		}
	}

	#[test]
	fn verify_rejects_impossible_cubes() {
		assert_eq!(scramble().verify(), Ok(()));

		let mut swapped = CubieCube::new();
		swapped.edges.swap(0, 1);
		assert_eq!(swapped.verify(), Err(CubeError::Parity));

		let mut flipped = CubieCube::new();
		flipped.edges[0].1 = 1;
		assert_eq!(flipped.verify(), Err(CubeError::EdgeOrientation));

		let mut twisted = CubieCube::new();
		twisted.corners[0].1 = 1;
		assert_eq!(twisted.verify(), Err(CubeError::CornerOrientation(1)));

		let mut doubled = CubieCube::new();
		doubled.edges[0].0 = Edge::UF;
		assert_eq!(doubled.verify(), Err(CubeError::MissingEdges));

		let mut doubled = CubieCube::new();
		doubled.corners[0].0 = Corner::UFL;
		assert_eq!(doubled.verify(), Err(CubeError::MissingCorners));
	}

	#[test]
	fn coordinates_of_unverified_cubes() {
		let mut doubled = CubieCube::new();
		doubled.edges[0].0 = Edge::UF;
		doubled.edges[8].0 = Edge::UF;
		doubled.corners[0].0 = Corner::UFL;

		// Only has to terminate, the values mean nothing
		let _ = (doubled.fr_to_br(), doubled.urf_to_dlf(), doubled.ur_to_df());
		let _ = (doubled.ur_to_ul(), doubled.ub_to_df(), doubled.corner_parity());
		assert!(doubled.verify().is_err());
	}

	#[test]
	fn from_raw_checks_ranges() {
		let cp = [0, 1, 2, 3, 4, 5, 6, 7];
		let ep = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11];
		assert_eq!(CubieCube::from_raw(cp, [0; 8], ep, [0; 12]), Ok(CubieCube::new()));

		let mut bad = ep;
		bad[3] = 12;
		assert_eq!(CubieCube::from_raw(cp, [0; 8], bad, [0; 12]), Err(CubeError::OutOfRange));

		let mut co = [0; 8];
		co[0] = 3;
		assert_eq!(CubieCube::from_raw(cp, co, ep, [0; 12]), Err(CubeError::OutOfRange));
	}
}
