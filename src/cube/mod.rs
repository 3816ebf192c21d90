pub mod cubiecube;
pub mod facecube;
pub mod turn;

use strum::EnumCount;

/// The number of facelets per side
pub const CUBE_AREA: usize = 9;

/// The number of sides of a cube
pub const NUM_SIDES: usize = 6;

/// The number of facelets of the whole cube
pub const NUM_FACELETS: usize = CUBE_AREA * NUM_SIDES;

/// The colors of the facelets, named after the side they belong to
/// in the solved cube.
#[derive(
	Clone, Copy, PartialEq, Eq, Hash, Debug, strum::EnumIter, strum::EnumCount, strum::Display, strum::FromRepr,
)]
#[repr(u8)]
#[rustfmt::skip]
pub enum Color {
	U, R, F, D, L, B,
}

impl TryFrom<char> for Color {
	type Error = char;

	fn try_from(c: char) -> Result<Self, Self::Error> {
		let res = match c {
			'U' => Self::U,
			'R' => Self::R,
			'F' => Self::F,
			'D' => Self::D,
			'L' => Self::L,
			'B' => Self::B,
			_ => return Err(c),
		};
		Ok(res)
	}
}

// ===== Edge Piece =====

/// All the different position names for an Edge
/// The first eight are the up and down edges, the last four the UD-slice.
#[derive(
	Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Debug,
	strum::EnumIter, strum::EnumCount, strum::Display, strum::FromRepr,
)]
#[repr(u8)]
#[rustfmt::skip]
pub enum Edge {
	#[default]
	UR, UF, UL, UB, // up edges
	DR, DF, DL, DB, // down edges
	FR, FL, BL, BR, // ud-slice (middle edges)
}

pub const NUM_EDGES: usize = Edge::COUNT;

impl Edge {
	/// Whether the edge belongs to the UD-slice
	pub const fn is_slice(self) -> bool {
		self as u8 >= Edge::FR as u8
	}
}

// ===== Corner Piece =====

/// A corner piece
/// The letters are listed clockwise, starting with the U or D facelet.
#[derive(
	Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Debug,
	strum::EnumIter, strum::EnumCount, strum::Display, strum::FromRepr,
)]
#[allow(clippy::upper_case_acronyms)]
#[repr(u8)]
#[rustfmt::skip]
pub enum Corner {
	#[default]
	URF, UFL, ULB, UBR,
	DFR, DLF, DBL, DRB,
}

pub const NUM_CORNERS: usize = Corner::COUNT;

/// It contains all the different ways a cube configuration
/// can be illegal.
/// From it, you are able to know how to fix the cube.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CubeError {
	#[error("A cubie label or orientation is out of range")]
	OutOfRange,
	#[error("Not all edges are present on the cube exactly once")]
	MissingEdges,
	#[error("The orientation-parity of the edges is off by 1")]
	EdgeOrientation,
	#[error("Not all corners are present on the cube exactly once")]
	MissingCorners,
	#[error("The orientation-parity of the corners is off by +{0}")]
	CornerOrientation(u32),
	#[error("The corner and edge permutations have different parity")]
	Parity,
}
