//! # Fisher–Yates shuffle
use rand::Rng;

/// Returns a uniformly random permutation of `items`, leaving `items` untouched.
/// Walks from the last index down to 1, swapping each element with one chosen
/// uniformly from the indices at or before it
pub fn shuffled<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
  let mut result = items.to_vec();
  for i in (1..result.len()).rev() {
    let j = rng.gen_range(0, i + 1);
    result.swap(i, j);
  }
  result
}
