use std::str::FromStr;

use strum::{EnumCount, IntoEnumIterator};

/// Total number of faces you can turn
pub const NUM_FACES: usize = Face::COUNT;
/// Total number of ways to adjust your turn
pub const NUM_TURNWISES: usize = TurnWise::COUNT;
/// Total number of face turns
pub const NUM_TURNS: usize = NUM_FACES * NUM_TURNWISES;

/// The faces you can turn.
/// Opposite faces are three apart, so `face % 3` is the axis.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[derive(strum::EnumIter, strum::EnumCount, strum::Display, strum::FromRepr)]
#[repr(u8)]
pub enum Face {
	U,
	R,
	F,
	D,
	L,
	B,
}

impl Face {
	pub const fn axis(self) -> u8 {
		self as u8 % 3
	}
}

/// You can either turn a side in (Counter-)Clockwise and Half turns
/// This is the enum for that
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[derive(strum::EnumIter, strum::EnumCount, strum::FromRepr)]
#[repr(u8)]
pub enum TurnWise {
	Clockwise,
	Double,
	CounterClockwise,
}

impl std::fmt::Display for TurnWise {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			TurnWise::Clockwise => write!(f, ""),
			TurnWise::Double => write!(f, "2"),
			TurnWise::CounterClockwise => write!(f, "'"),
		}
	}
}

/// A single face turn
///
/// face: The face to turn
/// wise: See the definiton of TurnWise
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Turn {
	pub face: Face,
	pub wise: TurnWise,
}

impl Turn {
	pub const fn new(face: Face, wise: TurnWise) -> Self {
		Self { face, wise }
	}

	/// The index of the turn in the move tables, `3 * face + wise`.
	pub const fn index(self) -> usize {
		self.face as usize * NUM_TURNWISES + self.wise as usize
	}

	pub fn from_index(idx: usize) -> Option<Self> {
		let face = Face::from_repr((idx / NUM_TURNWISES) as u8)?;
		let wise = TurnWise::from_repr((idx % NUM_TURNWISES) as u8)?;
		Some(Self { face, wise })
	}

	/// All 18 face turns in index order
	pub fn all() -> impl Iterator<Item = Turn> {
		Face::iter().flat_map(|face| TurnWise::iter().map(move |wise| Turn { face, wise }))
	}

	/// The turn which undoes this one.
	pub const fn inverse(self) -> Self {
		let wise = match self.wise {
			TurnWise::Clockwise => TurnWise::CounterClockwise,
			TurnWise::CounterClockwise => TurnWise::Clockwise,
			TurnWise::Double => TurnWise::Double,
		};
		Self { face: self.face, wise }
	}

	/// Whether `next` may directly follow `self` in a search path.
	/// Two turns of the same face can always be merged, and turns of
	/// opposite faces commute, so only one of their orders is kept.
	pub fn may_precede(self, next: Turn) -> bool {
		self.face != next.face && !(self.face.axis() == next.face.axis() && self.face > next.face)
	}
}

impl std::fmt::Display for Turn {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "{}{}", self.face, self.wise)
	}
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("\"{0}\" is not a face turn")]
pub struct TurnParseError(pub String);

impl FromStr for Turn {
	type Err = TurnParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let err = || TurnParseError(s.to_string());
		let mut chars = s.chars();

		let face = match chars.next().ok_or_else(err)? {
			'U' => Face::U,
			'R' => Face::R,
			'F' => Face::F,
			'D' => Face::D,
			'L' => Face::L,
			'B' => Face::B,
			_ => return Err(err()),
		};

		let wise = match chars.next() {
			None => TurnWise::Clockwise,
			Some('2') => TurnWise::Double,
			Some('\'') => TurnWise::CounterClockwise,
			Some(_) => return Err(err()),
		};

		if chars.next().is_some() {
			return Err(err());
		}

		Ok(Self { face, wise })
	}
}

/// Parse whitespace separated turns like "R U2 F'".
pub fn parse_turns<T>(string: T) -> Result<Vec<Turn>, TurnParseError>
where
	T: AsRef<str>,
{
	string.as_ref().split_whitespace().map(Turn::from_str).collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn index_roundtrip() {
		for (i, turn) in Turn::all().enumerate() {
			assert_eq!(turn.index(), i);
			assert_eq!(Turn::from_index(i), Some(turn));
		}
		assert_eq!(Turn::from_index(NUM_TURNS), None);
	}

	#[test]
	fn parse_and_print() -> Result<(), Box<dyn std::error::Error>> {
		let turns = parse_turns("R U2 F' D")?;
		let printed: Vec<String> = turns.iter().map(|t| t.to_string()).collect();
		assert_eq!(printed, vec!["R", "U2", "F'", "D"]);

		assert!(parse_turns("R X").is_err());
		assert!(parse_turns("R3").is_err());
		assert!(parse_turns("R2'").is_err());
		Ok(())
	}

	#[test]
	fn successor_rules() -> Result<(), Box<dyn std::error::Error>> {
		let r: Turn = "R".parse()?;
		let r2: Turn = "R2".parse()?;
		let l: Turn = "L".parse()?;
		let u: Turn = "U".parse()?;

		assert!(!r.may_precede(r2));
		assert!(r.may_precede(l));
		assert!(!l.may_precede(r));
		assert!(l.may_precede(u));
		assert_eq!(r.inverse().to_string(), "R'");
		assert_eq!(r2.inverse(), r2);
		Ok(())
	}
}
