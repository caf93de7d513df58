//! Sampling & Splitting
//!
//! Index-level helpers so rows are never copied until the final matrices
//! are built.

use rand::rngs::StdRng;
use rand::seq::{index, SliceRandom};
use rand::SeedableRng;

/// `min(size, len)` distinct indices in random order
pub fn sample_indices(len: usize, size: usize, seed: u64) -> Vec<usize> {
    let mut rng = StdRng::seed_from_u64(seed);
    index::sample(&mut rng, len, size.min(len)).into_vec()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Split {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Train/test split that keeps the malicious ratio in both halves.
///
/// Each class contributes `round(count * test_fraction)` rows to the test set.
pub fn stratified_split(labels: &[bool], test_fraction: f64, seed: u64) -> Split {
    let mut rng = StdRng::seed_from_u64(seed);
    let fraction = test_fraction.clamp(0.0, 1.0);
    let mut split = Split::default();

    for class in [false, true] {
        let mut members: Vec<usize> = labels
            .iter()
            .enumerate()
            .filter(|&(_, &label)| label == class)
            .map(|(i, _)| i)
            .collect();
        members.shuffle(&mut rng);

        let n_test = (members.len() as f64 * fraction).round() as usize;
        split.test.extend_from_slice(&members[..n_test]);
        split.train.extend_from_slice(&members[n_test..]);
    }

    split.train.shuffle(&mut rng);
    split.test.shuffle(&mut rng);
    split
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_sample_caps_at_len() {
        let sample = sample_indices(10, 50, 42);
        assert_eq!(sample.len(), 10);
        assert_eq!(sample.iter().collect::<HashSet<_>>().len(), 10);

        assert_eq!(sample_indices(1000, 25, 42).len(), 25);
        assert!(sample_indices(0, 25, 42).is_empty());
    }

    #[test]
    fn test_sample_is_seeded() {
        assert_eq!(sample_indices(500, 20, 7), sample_indices(500, 20, 7));
    }

    #[test]
    fn test_split_is_stratified_and_disjoint() {
        // 30% malicious
        let labels: Vec<bool> = (0..1000).map(|i| i % 10 < 3).collect();
        let split = stratified_split(&labels, 0.2, 42);

        assert_eq!(split.test.len(), 200);
        assert_eq!(split.train.len(), 800);
        assert_eq!(split.test.iter().filter(|&&i| labels[i]).count(), 60);
        assert_eq!(split.train.iter().filter(|&&i| labels[i]).count(), 240);

        let mut all: Vec<usize> = split.train.iter().chain(&split.test).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..1000).collect::<Vec<_>>());
    }

    #[test]
    fn test_split_is_seeded() {
        let labels: Vec<bool> = (0..100).map(|i| i % 3 == 0).collect();
        assert_eq!(stratified_split(&labels, 0.2, 1), stratified_split(&labels, 0.2, 1));
        assert_ne!(stratified_split(&labels, 0.2, 1), stratified_split(&labels, 0.2, 2));
    }
}
