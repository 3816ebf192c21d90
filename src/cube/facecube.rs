use std::str::FromStr;

use strum::IntoEnumIterator;

use crate::cube::{cubiecube::CubieCube, *};

/// A cube on the facelet level, as it is read off a physical cube.
///
/// The facelets are numbered U1..U9, R1..R9, F1..F9, D1..D9, L1..L9, B1..B9,
/// each side row by row when looking at it with U on top (or B, for U and D).
/// ```text
///              |U1 U2 U3|
///              |U4 U5 U6|
///              |U7 U8 U9|
///     |L1 L2 L3|F1 F2 F3|R1 R2 R3|B1 B2 B3|
///     |L4 L5 L6|F4 F5 F6|R4 R5 R6|B4 B5 B6|
///     |L7 L8 L9|F7 F8 F9|R7 R8 R9|B7 B8 B9|
///              |D1 D2 D3|
///              |D4 D5 D6|
///              |D7 D8 D9|
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct FaceCube {
	pub facelets: [Color; NUM_FACELETS],
}

/// The facelet indices of every corner position, listed clockwise
/// starting with the U or D facelet.
#[rustfmt::skip]
const CORNER_FACELETS: [[usize; 3]; NUM_CORNERS] = [
	[8, 9, 20],   // URF
	[6, 18, 38],  // UFL
	[0, 36, 47],  // ULB
	[2, 45, 11],  // UBR
	[29, 26, 15], // DFR
	[27, 44, 24], // DLF
	[33, 53, 42], // DBL
	[35, 17, 51], // DRB
];

/// The facelet indices of every edge position.
/// The first facelet is the one an unflipped edge shows its first color on.
#[rustfmt::skip]
const EDGE_FACELETS: [[usize; 2]; NUM_EDGES] = [
	[5, 10],  // UR
	[7, 19],  // UF
	[3, 37],  // UL
	[1, 46],  // UB
	[32, 16], // DR
	[28, 25], // DF
	[30, 43], // DL
	[34, 52], // DB
	[23, 12], // FR
	[21, 41], // FL
	[50, 39], // BL
	[48, 14], // BR
];

#[rustfmt::skip]
const CORNER_COLORS: [[Color; 3]; NUM_CORNERS] = [
	[Color::U, Color::R, Color::F], [Color::U, Color::F, Color::L],
	[Color::U, Color::L, Color::B], [Color::U, Color::B, Color::R],
	[Color::D, Color::F, Color::R], [Color::D, Color::L, Color::F],
	[Color::D, Color::B, Color::L], [Color::D, Color::R, Color::B],
];

#[rustfmt::skip]
const EDGE_COLORS: [[Color; 2]; NUM_EDGES] = [
	[Color::U, Color::R], [Color::U, Color::F], [Color::U, Color::L], [Color::U, Color::B],
	[Color::D, Color::R], [Color::D, Color::F], [Color::D, Color::L], [Color::D, Color::B],
	[Color::F, Color::R], [Color::F, Color::L], [Color::B, Color::L], [Color::B, Color::R],
];

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceletError {
	#[error("A cube needs exactly 54 facelets")]
	Length,
	#[error("'{0}' is not one of the colors U, R, F, D, L, B")]
	Color(char),
	#[error("The color {0} does not appear exactly 9 times")]
	ColorCount(Color),
	#[error("The colors at corner position {0} don't form a corner")]
	Corner(Corner),
	#[error("The colors at edge position {0} don't form an edge")]
	Edge(Edge),
}

impl Default for FaceCube {
	/// The solved cube
	fn default() -> Self {
		FaceCube::from(&CubieCube::new())
	}
}

impl FromStr for FaceCube {
	type Err = FaceletError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		if s.chars().count() != NUM_FACELETS {
			return Err(FaceletError::Length);
		}

		let mut facelets = [Color::U; NUM_FACELETS];
		let mut count = [0; NUM_SIDES];
		for (i, c) in s.chars().enumerate() {
			facelets[i] = Color::try_from(c).map_err(FaceletError::Color)?;
			count[facelets[i] as usize] += 1;
		}

		if let Some(col) = Color::iter().find(|col| count[*col as usize] != CUBE_AREA) {
			return Err(FaceletError::ColorCount(col));
		}

		Ok(Self { facelets })
	}
}

impl std::fmt::Display for FaceCube {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		self.facelets.iter().try_for_each(|col| write!(f, "{}", col))
	}
}

impl From<&FaceCube> for String {
	fn from(val: &FaceCube) -> Self {
		val.to_string()
	}
}

impl From<&CubieCube> for FaceCube {
	fn from(cube: &CubieCube) -> Self {
		let mut facelets = [Color::U; NUM_FACELETS];

		// The centers never move
		for col in Color::iter() {
			facelets[col as usize * CUBE_AREA + 4] = col;
		}

		for pos in Corner::iter() {
			let (c, o) = cube.corner(pos);
			for n in 0..3 {
				facelets[CORNER_FACELETS[pos as usize][(n + o as usize) % 3]] = CORNER_COLORS[c as usize][n];
			}
		}

		for pos in Edge::iter() {
			let (e, o) = cube.edge(pos);
			for n in 0..2 {
				facelets[EDGE_FACELETS[pos as usize][(n + o as usize) % 2]] = EDGE_COLORS[e as usize][n];
			}
		}

		Self { facelets }
	}
}

impl TryFrom<&FaceCube> for CubieCube {
	type Error = FaceletError;

	/// Identify every corner and edge by its colors.
	/// The result is not verified to be solvable.
	fn try_from(face: &FaceCube) -> Result<Self, Self::Error> {
		let f = &face.facelets;
		let mut cube = CubieCube::new();

		for pos in Corner::iter() {
			let idx = CORNER_FACELETS[pos as usize];

			// The orientation is where the U or D facelet points to
			let ori = (0..3)
				.find(|o| matches!(f[idx[*o]], Color::U | Color::D))
				.ok_or(FaceletError::Corner(pos))?;
			let col1 = f[idx[(ori + 1) % 3]];
			let col2 = f[idx[(ori + 2) % 3]];

			let corner = Corner::iter()
				.find(|c| {
					let cols = CORNER_COLORS[*c as usize];
					cols[1] == col1 && cols[2] == col2
				})
				.ok_or(FaceletError::Corner(pos))?;

			cube.corners[pos as usize] = (corner, ori as u8);
		}

		for pos in Edge::iter() {
			let [a, b] = EDGE_FACELETS[pos as usize].map(|i| f[i]);

			cube.edges[pos as usize] = Edge::iter()
				.find_map(|e| match EDGE_COLORS[e as usize] {
					[x, y] if x == a && y == b => Some((e, 0)),
					[x, y] if x == b && y == a => Some((e, 1)),
					_ => None,
				})
				.ok_or(FaceletError::Edge(pos))?;
		}

		Ok(cube)
	}
}
