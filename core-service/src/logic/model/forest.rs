//! Random Forest
//!
//! Bagged CART trees with Gini splits over a random feature subset per node.
//! The probability of a row is the mean malicious fraction of the leaves it
//! lands in. Trees are fitted on scoped worker threads; each tree has its own
//! seed, so the result does not depend on the worker count.

use std::num::NonZeroUsize;
use std::thread;

use ndarray::ArrayView2;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::classifier::{check_training_input, Estimator, ModelLayout, ProbabilityModel};
use crate::error::{ClassifierError, ClassifierResult};

// ============================================================================
// CONFIG
// ============================================================================

#[derive(Debug, Clone)]
pub struct ForestConfig {
    pub n_estimators: usize,
    pub max_depth: usize,
    /// Nodes with fewer rows become leaves
    pub min_samples_split: usize,
    /// Candidate features per split; `None` means sqrt(n_features)
    pub max_features: Option<usize>,
    pub seed: u64,
    /// Worker threads; `None` uses every available core
    pub n_jobs: Option<usize>,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            max_depth: 20,
            min_samples_split: 5,
            max_features: None,
            seed: 42,
            n_jobs: None,
        }
    }
}

// ============================================================================
// TREE
// ============================================================================

#[derive(Debug, Clone)]
enum Node {
    Leaf {
        probability: f32,
    },
    Split {
        feature: usize,
        threshold: f32,
        left: usize,
        right: usize,
    },
}

#[derive(Debug, Clone)]
pub struct DecisionTree {
    nodes: Vec<Node>,
}

impl DecisionTree {
    pub fn predict(&self, row: &[f32]) -> f32 {
        let mut index = 0;
        loop {
            match &self.nodes[index] {
                Node::Leaf { probability } => return *probability,
                Node::Split { feature, threshold, left, right } => {
                    let value = row.get(*feature).copied().unwrap_or(0.0);
                    index = if value <= *threshold { *left } else { *right };
                }
            }
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| matches!(n, Node::Leaf { .. })).count()
    }
}

struct Split {
    feature: usize,
    threshold: f32,
}

struct TreeBuilder<'a> {
    features: ArrayView2<'a, f32>,
    labels: &'a [bool],
    max_depth: usize,
    min_samples_split: usize,
    max_features: usize,
    rng: StdRng,
    nodes: Vec<Node>,
}

impl TreeBuilder<'_> {
    fn build(mut self, samples: Vec<usize>) -> DecisionTree {
        self.grow(samples, 0);
        DecisionTree { nodes: self.nodes }
    }

    /// Returns the index of the node created for `samples`
    fn grow(&mut self, mut samples: Vec<usize>, depth: usize) -> usize {
        let n = samples.len();
        let positives = samples.iter().filter(|&&i| self.labels[i]).count();

        let node_index = self.nodes.len();
        self.nodes.push(Node::Leaf {
            probability: positives as f32 / n.max(1) as f32,
        });

        let pure = positives == 0 || positives == n;
        if pure || depth >= self.max_depth || n < self.min_samples_split {
            return node_index;
        }

        let Some(split) = self.best_split(&mut samples) else {
            return node_index;
        };

        let features = self.features;
        let (left, right): (Vec<usize>, Vec<usize>) = samples
            .into_iter()
            .partition(|&i| features[[i, split.feature]] <= split.threshold);

        let left = self.grow(left, depth + 1);
        let right = self.grow(right, depth + 1);
        self.nodes[node_index] = Node::Split {
            feature: split.feature,
            threshold: split.threshold,
            left,
            right,
        };

        node_index
    }

    /// Lowest weighted Gini over `max_features` non-constant candidate features
    fn best_split(&mut self, samples: &mut [usize]) -> Option<Split> {
        let features = self.features;
        let labels = self.labels;
        let n = samples.len();
        let total_positives = samples.iter().filter(|&&i| labels[i]).count();

        let mut order: Vec<usize> = (0..features.ncols()).collect();
        order.shuffle(&mut self.rng);

        let mut best: Option<(f64, Split)> = None;
        let mut visited = 0;

        for feature in order {
            if visited >= self.max_features {
                break;
            }

            samples.sort_unstable_by(|&a, &b| features[[a, feature]].total_cmp(&features[[b, feature]]));
            if features[[samples[0], feature]] == features[[samples[n - 1], feature]] {
                continue;
            }
            visited += 1;

            let mut left_positives = 0;
            for i in 0..n - 1 {
                if labels[samples[i]] {
                    left_positives += 1;
                }

                let current = features[[samples[i], feature]];
                let next = features[[samples[i + 1], feature]];
                if current == next {
                    continue;
                }

                let left_n = i + 1;
                let score = weighted_gini(left_n, left_positives)
                    + weighted_gini(n - left_n, total_positives - left_positives);

                if best.as_ref().map_or(true, |(best_score, _)| score < *best_score) {
                    let mut threshold = current + (next - current) / 2.0;
                    if threshold >= next {
                        threshold = current;
                    }
                    best = Some((score, Split { feature, threshold }));
                }
            }
        }

        best.map(|(_, split)| split)
    }
}

/// Gini impurity times node size
fn weighted_gini(n: usize, positives: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    let p = positives as f64;
    2.0 * p * (n as f64 - p) / n as f64
}

// ============================================================================
// ESTIMATOR
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct RandomForest {
    config: ForestConfig,
}

impl RandomForest {
    pub fn new(config: ForestConfig) -> Self {
        Self { config }
    }

    fn fit_tree(
        &self,
        features: ArrayView2<'_, f32>,
        labels: &[bool],
        tree_index: usize,
        max_features: usize,
    ) -> DecisionTree {
        let mut rng = StdRng::seed_from_u64(self.config.seed.wrapping_add(tree_index as u64));
        let n = features.nrows();
        let bootstrap: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();

        TreeBuilder {
            features: features.reborrow(),
            labels,
            max_depth: self.config.max_depth,
            min_samples_split: self.config.min_samples_split.max(2),
            max_features,
            rng,
            nodes: Vec::new(),
        }
        .build(bootstrap)
    }
}

impl Estimator for RandomForest {
    type Model = FittedForest;

    fn name(&self) -> &'static str {
        "random_forest"
    }

    fn fit(&self, features: ArrayView2<'_, f32>, labels: &[bool]) -> ClassifierResult<FittedForest> {
        check_training_input(self.name(), &features, labels)?;

        let n_estimators = self.config.n_estimators.max(1);
        let n_features = features.ncols();
        let max_features = self
            .config
            .max_features
            .unwrap_or_else(|| (n_features as f64).sqrt() as usize)
            .clamp(1, n_features.max(1));
        let workers = self
            .config
            .n_jobs
            .or_else(|| thread::available_parallelism().ok().map(NonZeroUsize::get))
            .unwrap_or(1)
            .clamp(1, n_estimators);

        log::debug!(
            "Fitting {} trees on {} rows ({} candidate features per split, {} workers)",
            n_estimators,
            features.nrows(),
            max_features,
            workers
        );

        let mut fitted = thread::scope(|scope| {
            let handles: Vec<_> = (0..workers)
                .map(|worker| {
                    scope.spawn(move || {
                        (worker..n_estimators)
                            .step_by(workers)
                            .map(|tree_index| {
                                (tree_index, self.fit_tree(features, labels, tree_index, max_features))
                            })
                            .collect::<Vec<_>>()
                    })
                })
                .collect();

            let mut trees = Vec::with_capacity(n_estimators);
            for handle in handles {
                let batch = handle
                    .join()
                    .map_err(|_| ClassifierError::Model("forest worker panicked".to_string()))?;
                trees.extend(batch);
            }
            Ok::<_, ClassifierError>(trees)
        })?;

        fitted.sort_by_key(|(tree_index, _)| *tree_index);

        Ok(FittedForest {
            trees: fitted.into_iter().map(|(_, tree)| tree).collect(),
            layout: ModelLayout::current(),
        })
    }
}

// ============================================================================
// FITTED MODEL
// ============================================================================

#[derive(Debug, Clone)]
pub struct FittedForest {
    trees: Vec<DecisionTree>,
    layout: ModelLayout,
}

impl FittedForest {
    pub fn trees(&self) -> &[DecisionTree] {
        &self.trees
    }
}

impl ProbabilityModel for FittedForest {
    fn predict_probability(&self, features: &[f32]) -> f32 {
        if self.trees.is_empty() {
            return 0.0;
        }
        let sum: f32 = self.trees.iter().map(|tree| tree.predict(features)).sum();
        (sum / self.trees.len() as f32).clamp(0.0, 1.0)
    }

    fn layout(&self) -> ModelLayout {
        self.layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{s, Array2};

    /// Malicious when the first feature is above 5; second feature is noise
    fn threshold_dataset() -> (Array2<f32>, Vec<bool>) {
        let rows = 200;
        let mut rng = StdRng::seed_from_u64(7);
        let features = Array2::from_shape_fn((rows, 2), |(i, j)| {
            if j == 0 { (i % 10) as f32 } else { rng.gen_range(0.0..1.0) }
        });
        let labels = (0..rows).map(|i| (i % 10) > 5).collect();
        (features, labels)
    }

    fn small_forest() -> RandomForest {
        RandomForest::new(ForestConfig {
            n_estimators: 15,
            max_features: Some(2),
            n_jobs: Some(3),
            ..Default::default()
        })
    }

    #[test]
    fn test_forest_learns_threshold() {
        let (x, y) = threshold_dataset();
        let forest = small_forest().fit(x.view(), &y).unwrap();

        assert_eq!(forest.trees().len(), 15);
        assert!(forest.predict_probability(&[9.0, 0.5]) > 0.9);
        assert!(forest.predict_probability(&[1.0, 0.5]) < 0.1);
    }

    #[test]
    fn test_forest_is_deterministic_across_worker_counts() {
        let (x, y) = threshold_dataset();
        let a = small_forest().fit(x.view(), &y).unwrap();
        let b = RandomForest::new(ForestConfig {
            n_estimators: 15,
            max_features: Some(2),
            n_jobs: Some(1),
            ..Default::default()
        })
        .fit(x.view(), &y)
        .unwrap();

        for probe in [[0.0, 0.1], [5.0, 0.9], [5.5, 0.2], [7.0, 0.4]] {
            assert_eq!(a.predict_probability(&probe), b.predict_probability(&probe));
        }
    }

    #[test]
    fn test_pure_labels_make_single_leaf_trees() {
        let x = Array2::from_shape_fn((20, 3), |(i, j)| (i * j) as f32);
        let y = vec![false; 20];
        let forest = small_forest().fit(x.view(), &y).unwrap();

        assert!(forest.trees().iter().all(|t| t.node_count() == 1 && t.leaf_count() == 1));
        assert_eq!(forest.predict_probability(&[3.0, 3.0, 3.0]), 0.0);
    }

    #[test]
    fn test_max_depth_zero_predicts_base_rate() {
        let (x, y) = threshold_dataset();
        let forest = RandomForest::new(ForestConfig {
            n_estimators: 5,
            max_depth: 0,
            ..Default::default()
        })
        .fit(x.view(), &y)
        .unwrap();

        let p = forest.predict_probability(&[9.0, 0.0]);
        assert!(p > 0.2 && p < 0.6, "bootstrap base rate near 0.4, got {}", p);
    }

    #[test]
    fn test_fit_rejects_label_mismatch() {
        let (x, _) = threshold_dataset();
        assert!(small_forest().fit(x.view(), &[true, false]).is_err());
    }

    #[test]
    fn test_fit_accepts_borrowed_subview() {
        let (x, y) = threshold_dataset();
        let head = x.slice(s![..100, ..]);
        let labels: Vec<bool> = y.iter().take(100).copied().collect();

        let forest = small_forest().fit(head, &labels).unwrap();
        drop(labels);
        assert_eq!(forest.trees().len(), 15);
        assert!(forest.predict_probability(&[8.0, 0.3]) > 0.5);
    }

    #[test]
    fn test_layout_is_recorded() {
        let (x, y) = threshold_dataset();
        let forest = small_forest().fit(x.view(), &y).unwrap();
        assert!(forest.layout().validate().is_ok());
    }
}
