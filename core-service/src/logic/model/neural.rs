//! Neural Network
//!
//! Small feed-forward binary classifier on `ndarray`: ReLU hidden layers with
//! inverted dropout, a sigmoid output, binary cross-entropy and Adam.
//! Training holds out the trailing rows for validation and stops early once
//! the validation loss stalls, keeping the best weights seen.
//!
//! Inputs are expected to be standardized (see `StandardScaler`).

use ndarray::{Array, Array1, Array2, ArrayView1, ArrayView2, Axis, Dimension, Zip};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::classifier::{check_training_input, Estimator, ModelLayout, ProbabilityModel};
use crate::error::ClassifierResult;

/// Probability clip for the loss
const LOSS_EPSILON: f32 = 1e-7;

// ============================================================================
// CONFIG
// ============================================================================

#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// (units, dropout rate) per hidden layer
    pub hidden_layers: Vec<(usize, f32)>,
    pub learning_rate: f32,
    pub batch_size: usize,
    pub epochs: usize,
    /// Fraction of trailing rows held out for validation
    pub validation_split: f64,
    /// Epochs without improvement before stopping
    pub patience: usize,
    pub seed: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            hidden_layers: vec![(64, 0.3), (32, 0.2)],
            learning_rate: 0.001,
            batch_size: 256,
            epochs: 20,
            validation_split: 0.1,
            patience: 3,
            seed: 42,
        }
    }
}

// ============================================================================
// LAYERS
// ============================================================================

#[derive(Debug, Clone)]
struct Dense {
    weights: Array2<f32>,
    bias: Array1<f32>,
}

impl Dense {
    /// Glorot-uniform weights, zero bias
    fn glorot(inputs: usize, outputs: usize, rng: &mut StdRng) -> Self {
        let limit = (6.0 / (inputs + outputs) as f32).sqrt();
        Self {
            weights: Array2::from_shape_fn((inputs, outputs), |_| rng.gen_range(-limit..limit)),
            bias: Array1::zeros(outputs),
        }
    }

    fn forward(&self, input: ArrayView2<'_, f32>) -> Array2<f32> {
        input.dot(&self.weights) + &self.bias
    }
}

fn relu(x: f32) -> f32 {
    x.max(0.0)
}

fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

/// Eval-mode forward pass; dropout is off
fn predict_batch(layers: &[Dense], input: ArrayView2<'_, f32>) -> Array1<f32> {
    let (output, hidden) = match layers.split_last() {
        Some(split) => split,
        None => return Array1::zeros(input.nrows()),
    };

    let mut activation = input.to_owned();
    for layer in hidden {
        activation = layer.forward(activation.view()).mapv(relu);
    }

    let logits = output.forward(activation.view());
    logits.column(0).mapv(sigmoid)
}

fn binary_cross_entropy(probabilities: ArrayView1<'_, f32>, targets: ArrayView1<'_, f32>) -> f32 {
    if probabilities.is_empty() {
        return 0.0;
    }
    let total: f32 = probabilities
        .iter()
        .zip(targets.iter())
        .map(|(&p, &y)| {
            let p = p.clamp(LOSS_EPSILON, 1.0 - LOSS_EPSILON);
            -(y * p.ln() + (1.0 - y) * (1.0 - p).ln())
        })
        .sum();
    total / probabilities.len() as f32
}

type Gradients = Vec<(Array2<f32>, Array1<f32>)>;

/// Training-mode forward and backward pass over one batch
fn gradients(
    layers: &[Dense],
    dropout: &[f32],
    input: Array2<f32>,
    targets: ArrayView1<'_, f32>,
    rng: &mut StdRng,
) -> Gradients {
    let hidden = layers.len() - 1;
    let n = input.nrows().max(1) as f32;

    // masks[l] = relu'(z) * dropout keep / (1 - rate)
    let mut activations: Vec<Array2<f32>> = Vec::with_capacity(layers.len());
    let mut masks: Vec<Array2<f32>> = Vec::with_capacity(hidden);
    activations.push(input);

    for (layer, &rate) in layers[..hidden].iter().zip(dropout) {
        let z = layer.forward(activations[activations.len() - 1].view());
        let keep = 1.0 - rate;
        let mask = z.mapv(|v| {
            if v > 0.0 && rng.gen::<f32>() < keep {
                1.0 / keep
            } else {
                0.0
            }
        });
        activations.push(&z * &mask);
        masks.push(mask);
    }

    let probabilities = layers[hidden].forward(activations[hidden].view()).mapv(sigmoid);
    let mut delta = (&probabilities.column(0) - &targets)
        .mapv(|d| d / n)
        .insert_axis(Axis(1));

    let mut grads = Vec::with_capacity(layers.len());
    for l in (0..layers.len()).rev() {
        let grad_w = activations[l].t().dot(&delta);
        let grad_b = delta.sum_axis(Axis(0));
        if l > 0 {
            delta = delta.dot(&layers[l].weights.t()) * &masks[l - 1];
        }
        grads.push((grad_w, grad_b));
    }
    grads.reverse();
    grads
}

// ============================================================================
// OPTIMIZER
// ============================================================================

struct Moments {
    m_w: Array2<f32>,
    v_w: Array2<f32>,
    m_b: Array1<f32>,
    v_b: Array1<f32>,
}

#[derive(Clone, Copy)]
struct AdamParams {
    learning_rate: f32,
    beta1: f32,
    beta2: f32,
    epsilon: f32,
}

struct Adam {
    params: AdamParams,
    step: i32,
    moments: Vec<Moments>,
}

impl Adam {
    fn new(layers: &[Dense], learning_rate: f32) -> Self {
        Self {
            params: AdamParams {
                learning_rate,
                beta1: 0.9,
                beta2: 0.999,
                epsilon: 1e-7,
            },
            step: 0,
            moments: layers
                .iter()
                .map(|layer| Moments {
                    m_w: Array2::zeros(layer.weights.raw_dim()),
                    v_w: Array2::zeros(layer.weights.raw_dim()),
                    m_b: Array1::zeros(layer.bias.raw_dim()),
                    v_b: Array1::zeros(layer.bias.raw_dim()),
                })
                .collect(),
        }
    }

    fn update(&mut self, layers: &mut [Dense], grads: &Gradients) {
        self.step = self.step.saturating_add(1);
        let p = self.params;
        let c1 = 1.0 - p.beta1.powi(self.step);
        let c2 = 1.0 - p.beta2.powi(self.step);

        for ((layer, (grad_w, grad_b)), m) in layers.iter_mut().zip(grads).zip(&mut self.moments) {
            adam_step(p, c1, c2, &mut layer.weights, grad_w, &mut m.m_w, &mut m.v_w);
            adam_step(p, c1, c2, &mut layer.bias, grad_b, &mut m.m_b, &mut m.v_b);
        }
    }
}

fn adam_step<D: Dimension>(
    p: AdamParams,
    c1: f32,
    c2: f32,
    param: &mut Array<f32, D>,
    grad: &Array<f32, D>,
    m: &mut Array<f32, D>,
    v: &mut Array<f32, D>,
) {
    Zip::from(param).and(grad).and(m).and(v).for_each(|w, &g, m, v| {
        *m = p.beta1 * *m + (1.0 - p.beta1) * g;
        *v = p.beta2 * *v + (1.0 - p.beta2) * g * g;
        let m_hat = *m / c1;
        let v_hat = *v / c2;
        *w -= p.learning_rate * m_hat / (v_hat.sqrt() + p.epsilon);
    });
}

// ============================================================================
// ESTIMATOR
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct NeuralNetwork {
    config: NetworkConfig,
}

impl NeuralNetwork {
    pub fn new(config: NetworkConfig) -> Self {
        Self { config }
    }
}

impl Estimator for NeuralNetwork {
    type Model = FittedNetwork;

    fn name(&self) -> &'static str {
        "neural_network"
    }

    fn fit(&self, features: ArrayView2<'_, f32>, labels: &[bool]) -> ClassifierResult<FittedNetwork> {
        check_training_input(self.name(), &features, labels)?;
        let config = &self.config;

        let rows = features.nrows();
        let held_out = (rows as f64 * config.validation_split.clamp(0.0, 1.0)) as usize;
        let held_out = if held_out >= rows { 0 } else { held_out };
        let train_rows = rows - held_out;

        let targets: Array1<f32> = labels.iter().map(|&malicious| if malicious { 1.0 } else { 0.0 }).collect();
        let (x_train, x_val) = features.split_at(Axis(0), train_rows);
        let (y_train, y_val) = targets.view().split_at(Axis(0), train_rows);

        let mut rng = StdRng::seed_from_u64(config.seed);
        let mut widths = vec![features.ncols()];
        widths.extend(config.hidden_layers.iter().map(|(units, _)| *units));
        widths.push(1);
        let mut layers: Vec<Dense> = widths
            .windows(2)
            .map(|pair| Dense::glorot(pair[0], pair[1], &mut rng))
            .collect();
        let dropout: Vec<f32> = config
            .hidden_layers
            .iter()
            .map(|(_, rate)| rate.clamp(0.0, 0.95))
            .collect();

        log::debug!(
            "Fitting network {:?} on {} rows ({} held out)",
            widths,
            train_rows,
            held_out
        );

        let mut optimizer = Adam::new(&layers, config.learning_rate);
        let mut order: Vec<usize> = (0..train_rows).collect();
        let mut best_loss = f32::INFINITY;
        let mut best_layers = layers.clone();
        let mut stalled = 0;
        let mut epochs_run = 0;

        for epoch in 1..=config.epochs {
            order.shuffle(&mut rng);
            for batch in order.chunks(config.batch_size.max(1)) {
                let x = x_train.select(Axis(0), batch);
                let y = y_train.select(Axis(0), batch);
                let grads = gradients(&layers, &dropout, x, y.view(), &mut rng);
                optimizer.update(&mut layers, &grads);
            }
            epochs_run = epoch;

            let train_loss = binary_cross_entropy(predict_batch(&layers, x_train).view(), y_train);
            let monitored = if held_out > 0 {
                let val_loss = binary_cross_entropy(predict_batch(&layers, x_val).view(), y_val);
                log::debug!(
                    "epoch {}/{}: loss {:.4}, val_loss {:.4}",
                    epoch,
                    config.epochs,
                    train_loss,
                    val_loss
                );
                val_loss
            } else {
                log::debug!("epoch {}/{}: loss {:.4}", epoch, config.epochs, train_loss);
                train_loss
            };

            if monitored < best_loss {
                best_loss = monitored;
                best_layers = layers.clone();
                stalled = 0;
            } else {
                stalled += 1;
                if stalled >= config.patience.max(1) {
                    log::info!(
                        "Early stopping after epoch {} (best loss {:.4})",
                        epoch,
                        best_loss
                    );
                    break;
                }
            }
        }

        Ok(FittedNetwork {
            layers: best_layers,
            layout: ModelLayout::current(),
            epochs_run,
            best_loss,
        })
    }
}

// ============================================================================
// FITTED MODEL
// ============================================================================

#[derive(Debug, Clone)]
pub struct FittedNetwork {
    layers: Vec<Dense>,
    layout: ModelLayout,
    epochs_run: usize,
    best_loss: f32,
}

impl FittedNetwork {
    pub fn epochs_trained(&self) -> usize {
        self.epochs_run
    }

    /// Lowest monitored loss; validation loss when rows were held out
    pub fn best_loss(&self) -> f32 {
        self.best_loss
    }

    pub fn input_width(&self) -> usize {
        self.layers.first().map_or(0, |layer| layer.weights.nrows())
    }

    pub fn predict_batch(&self, features: ArrayView2<'_, f32>) -> Array1<f32> {
        predict_batch(&self.layers, features)
    }
}

impl ProbabilityModel for FittedNetwork {
    fn predict_probability(&self, features: &[f32]) -> f32 {
        let width = self.input_width();
        let row = Array2::from_shape_fn((1, width), |(_, i)| features.get(i).copied().unwrap_or(0.0));
        predict_batch(&self.layers, row.view())
            .first()
            .copied()
            .unwrap_or(0.0)
    }

    fn layout(&self) -> ModelLayout {
        self.layout
    }
}
