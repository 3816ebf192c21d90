//! Combinatorial ranking used by the coordinate level.
//!
//! Every function here is pure: it maps between small arrays of labels
//! (or orientations) and a dense integer rank and back.

use std::ops::Range;

use const_for::const_for;

/// The largest `n` any cube coordinate needs (12 edges).
const MAX_N: usize = 12;

const fn generate_binomials() -> [[usize; MAX_N + 1]; MAX_N + 1] {
	let mut out = [[0; MAX_N + 1]; MAX_N + 1];

	const_for!(n in 0..(MAX_N + 1) => {
		out[n][0] = 1;
		const_for!(k in 1..(n + 1) => {
			out[n][k] = out[n - 1][k - 1] + if k < n { out[n - 1][k] } else { 0 };
		});
	});

	out
}

const fn generate_factorials() -> [usize; MAX_N + 1] {
	let mut out = [1; MAX_N + 1];
	const_for!(i in 1..(MAX_N + 1) => { out[i] = out[i - 1] * i; });
	out
}

const BINOMIAL: [[usize; MAX_N + 1]; MAX_N + 1] = generate_binomials();
const FACTORIAL: [usize; MAX_N + 1] = generate_factorials();

/// n choose k, zero when k > n.
pub const fn binomial(n: usize, k: usize) -> usize {
	if k > n {
		0
	} else {
		BINOMIAL[n][k]
	}
}

pub const fn factorial(n: usize) -> usize {
	FACTORIAL[n]
}

/// Number of inversions modulo 2 of the given permutation.
pub fn permutation_parity(perm: &[usize]) -> usize {
	let mut inversions = 0;
	for i in 0..perm.len() {
		for j in (i + 1)..perm.len() {
			if perm[i] > perm[j] {
				inversions += 1;
			}
		}
	}
	inversions & 1
}

// ===== Orientations =====

/// Rank the orientations as a mixed-radix number `sum(ori[i] * base^i)`.
/// The last orientation is left out, it is implied by the others.
pub fn rank_orientation(ori: &[u8], base: u8) -> usize {
	ori[..ori.len() - 1]
		.iter()
		.rev()
		.fold(0, |acc, o| acc * base as usize + *o as usize)
}

/// Inverse of `rank_orientation`. The last orientation is chosen
/// so that the total is divisible by `base`.
pub fn unrank_orientation<const N: usize>(mut coord: usize, base: u8) -> [u8; N] {
	let mut out = [0; N];
	let mut sum = 0;

	for o in out.iter_mut().take(N - 1) {
		*o = (coord % base as usize) as u8;
		sum += *o as usize;
		coord /= base as usize;
	}
	out[N - 1] = ((base as usize - sum % base as usize) % base as usize) as u8;

	out
}

// ===== Permutations =====

/// Rank a permutation of `0..n` in `0..n!`.
///
/// For each position from the back, count how often the prefix must be
/// rotated left until the right element sits there. The counts are the
/// digits of the rank in the factorial number system.
/// The slice is left sorted afterwards.
///
/// Any other input still gets some rank, which is meaningless.
pub fn rank_permutation(perm: &mut [usize]) -> usize {
	let mut rank = 0;

	for j in (1..perm.len()).rev() {
		let k = perm[..=j].iter().position(|x| *x == j).map_or(0, |p| (p + 1) % (j + 1));
		perm[..=j].rotate_left(k);
		rank = (j + 1) * rank + k;
	}

	rank
}

/// Inverse of `rank_permutation`, applied to whatever elements `perm` holds.
pub fn unrank_permutation<T>(perm: &mut [T], mut rank: usize) {
	for j in 1..perm.len() {
		let k = rank % (j + 1);
		rank /= j + 1;
		perm[..=j].rotate_right(k);
	}
}

// ===== Partial permutations =====

/// Rank the placement of the pieces `pieces` among the slots in `labels`.
///
/// The rank is `combination * k! + permutation`, where `combination` is the
/// colexicographic rank of the occupied slots and `permutation` the rank of
/// the order in which the pieces occupy them. With `from_end`, slots are
/// counted from the back so that pieces sitting in the last `k` slots rank 0.
pub fn rank_partial_permutation(labels: &[usize], pieces: Range<usize>, from_end: bool) -> usize {
	let n = labels.len();
	let k = pieces.len();

	let mut combination = 0;
	let mut order = Vec::with_capacity(k);

	for j in 0..n {
		let slot = if from_end { n - 1 - j } else { j };
		let label = labels[slot];
		if pieces.contains(&label) {
			order.push(label - pieces.start);
			combination += binomial(j, order.len());
		}
	}

	if from_end {
		order.reverse();
	}

	combination * factorial(k) + rank_permutation(&mut order)
}

/// Inverse of `rank_partial_permutation` for `n` slots.
/// The slots not taken by `pieces` receive the remaining labels in ascending order.
pub fn unrank_partial_permutation(
	coord: usize,
	n: usize,
	pieces: Range<usize>,
	from_end: bool,
) -> Vec<usize> {
	let k = pieces.len();

	let mut order: Vec<usize> = pieces.clone().collect();
	unrank_permutation(&mut order, coord % factorial(k));

	let mut combination = coord / factorial(k);
	let mut slots = vec![None; n];
	let mut left = k;

	for j in (0..n).rev() {
		if left > 0 && combination >= binomial(j, left) {
			let slot = if from_end { n - 1 - j } else { j };
			slots[slot] = Some(order[if from_end { k - left } else { left - 1 }]);
			combination -= binomial(j, left);
			left -= 1;
		}
	}

	let mut others = (0..n).filter(|l| !pieces.contains(l));
	slots
		.into_iter()
		.map(|s| s.or_else(|| others.next()).unwrap_or_default())
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn binomials_and_factorials() {
		assert_eq!(binomial(12, 4), 495);
		assert_eq!(binomial(8, 6), 28);
		assert_eq!(binomial(3, 5), 0);
		assert_eq!(factorial(8), 40320);
		assert_eq!(factorial(12), 479001600);
	}

	#[test]
	fn orientation_roundtrip() {
		for coord in 0..2187 {
			let ori = unrank_orientation::<8>(coord, 3);
			assert_eq!(ori.iter().map(|o| *o as usize).sum::<usize>() % 3, 0);
			assert_eq!(rank_orientation(&ori, 3), coord);
		}
		for coord in 0..2048 {
			let ori = unrank_orientation::<12>(coord, 2);
			assert_eq!(ori.iter().map(|o| *o as usize).sum::<usize>() % 2, 0);
			assert_eq!(rank_orientation(&ori, 2), coord);
		}
	}

	#[test]
	fn permutation_roundtrip() {
		for rank in 0..factorial(5) {
			let mut perm: Vec<usize> = (0..5).collect();
			unrank_permutation(&mut perm, rank);
			assert_eq!(rank_permutation(&mut perm), rank);
		}
	}

	#[test]
	fn ranks_of_non_permutations() {
		let mut doubled = [1, 1, 0, 3];
		assert!(rank_permutation(&mut doubled) < factorial(4));

		let mut missing = [4, 0, 2];
		assert!(rank_permutation(&mut missing) < factorial(3));
	}

	#[test]
	fn partial_permutation_roundtrip() {
		// Four slice edges among twelve slots, counted from the back
		for coord in 0..11880 {
			let labels = unrank_partial_permutation(coord, 12, 8..12, true);
			assert_eq!(rank_partial_permutation(&labels, 8..12, true), coord);
		}
		// Three edges, counted from the front
		for coord in 0..1320 {
			let labels = unrank_partial_permutation(coord, 12, 3..6, false);
			assert_eq!(rank_partial_permutation(&labels, 3..6, false), coord);
		}
	}

	#[test]
	fn partial_permutation_fills_the_rest() {
		let labels = unrank_partial_permutation(12345, 12, 0..6, false);
		let mut sorted = labels.clone();
		sorted.sort();
		assert_eq!(sorted, (0..12).collect::<Vec<_>>());
	}

	#[test]
	fn identity_ranks() {
		let identity: Vec<usize> = (0..12).collect();
		assert_eq!(rank_partial_permutation(&identity, 8..12, true), 0);
		assert_eq!(rank_partial_permutation(&identity, 0..6, false), 0);
		// Pieces 3..6 in their home slots are not at the front
		assert_eq!(rank_partial_permutation(&identity, 3..6, false), 114);
	}

	#[test]
	fn parity() {
		assert_eq!(permutation_parity(&[0, 1, 2, 3]), 0);
		assert_eq!(permutation_parity(&[1, 0, 2, 3]), 1);
		assert_eq!(permutation_parity(&[1, 2, 0, 3]), 0);
	}
}
