//! Feed-forward network controller
//!
//! Fully connected layers with tanh activation mapping the three
//! observation values to three move scores. Weights are opaque to the
//! simulation; an external evolution driver owns how they change.
//!
//! Layer shapes are checked on construction and on deserialization, so a
//! loaded network always chains 3 inputs to 3 outputs.

use ndarray::{Array1, Array2};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::controller::{Controller, Observation};

/// Number of observation inputs
pub const INPUTS: usize = 3;
/// Number of move scores
pub const OUTPUTS: usize = 3;

/// Layer shapes that do not chain from [`INPUTS`] to [`OUTPUTS`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("network has no layers")]
    Empty,
    #[error(
        "layer {index} has {rows}x{cols} weights and {biases} biases, expected {expected} inputs"
    )]
    Layer {
        index: usize,
        rows: usize,
        cols: usize,
        biases: usize,
        expected: usize,
    },
    #[error("network ends in {found} outputs, expected 3")]
    Outputs { found: usize },
}

/// One fully connected layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    /// Weight matrix (`output_size` x `input_size`)
    pub weights: Array2<f32>,
    /// Bias vector (`output_size`)
    pub biases: Array1<f32>,
}

impl Layer {
    /// Layer with weights and biases drawn from `[-scale, scale)`
    ///
    /// Draws come from the caller's RNG so a seeded run builds the same
    /// network every time.
    pub fn new_random<R: Rng + ?Sized>(
        input_size: usize,
        output_size: usize,
        scale: f32,
        rng: &mut R,
    ) -> Self {
        let weights =
            Array2::from_shape_fn((output_size, input_size), |_| rng.random_range(-scale..scale));
        let biases = Array1::from_shape_fn(output_size, |_| rng.random_range(-scale..scale));
        Self { weights, biases }
    }

    pub fn input_size(&self) -> usize {
        self.weights.ncols()
    }

    pub fn output_size(&self) -> usize {
        self.biases.len()
    }

    /// Forward pass with tanh activation
    #[inline]
    pub fn forward(&self, inputs: &Array1<f32>) -> Array1<f32> {
        let mut output = self.weights.dot(inputs);
        output += &self.biases;
        output.mapv_inplace(f32::tanh);
        output
    }
}

/// Walk the layer chain and report the first shape that breaks it
fn check_shapes(layers: &[Layer]) -> Result<(), ShapeError> {
    if layers.is_empty() {
        return Err(ShapeError::Empty);
    }
    let mut width = INPUTS;
    for (index, layer) in layers.iter().enumerate() {
        let (rows, cols) = layer.weights.dim();
        if cols != width || rows != layer.biases.len() {
            return Err(ShapeError::Layer {
                index,
                rows,
                cols,
                biases: layer.biases.len(),
                expected: width,
            });
        }
        width = rows;
    }
    if width != OUTPUTS {
        return Err(ShapeError::Outputs { found: width });
    }
    Ok(())
}

/// Wire form of [`FeedForward`] before its shapes are checked
#[derive(Deserialize)]
struct UncheckedLayers {
    layers: Vec<Layer>,
}

impl TryFrom<UncheckedLayers> for FeedForward {
    type Error = ShapeError;

    fn try_from(raw: UncheckedLayers) -> Result<Self, ShapeError> {
        Self::from_layers(raw.layers)
    }
}

/// A stack of layers from 3 inputs to 3 outputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedLayers")]
pub struct FeedForward {
    pub layers: Vec<Layer>,
}

impl FeedForward {
    /// Random network with the given hidden layer sizes
    pub fn new_random<R: Rng + ?Sized>(hidden: &[usize], scale: f32, rng: &mut R) -> Self {
        let sizes: Vec<usize> = std::iter::once(INPUTS)
            .chain(hidden.iter().copied())
            .chain(std::iter::once(OUTPUTS))
            .collect();
        let layers = sizes
            .windows(2)
            .map(|pair| Layer::new_random(pair[0], pair[1], scale, rng))
            .collect();
        Self { layers }
    }

    /// Network from explicit layers, rejecting shapes that don't chain
    pub fn from_layers(layers: Vec<Layer>) -> Result<Self, ShapeError> {
        check_shapes(&layers)?;
        Ok(Self { layers })
    }

    pub fn is_well_formed(&self) -> bool {
        check_shapes(&self.layers).is_ok()
    }

    /// Runs the observation through every layer
    pub fn activate(&self, inputs: &[f32; INPUTS]) -> Array1<f32> {
        self.layers
            .iter()
            .fold(Array1::from(inputs.to_vec()), |acc, layer| layer.forward(&acc))
    }
}

impl Controller for FeedForward {
    fn scores(&self, obs: &Observation) -> [f32; 3] {
        let out = self.activate(&obs.as_array());
        let mut scores = [0.0; OUTPUTS];
        for (slot, value) in scores.iter_mut().zip(out.iter()) {
            *slot = *value;
        }
        scores
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::Decision;
    use ndarray::{arr1, arr2};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn zero_layer(rows: usize, cols: usize) -> Layer {
        Layer {
            weights: Array2::zeros((rows, cols)),
            biases: Array1::zeros(rows),
        }
    }

    #[test]
    fn test_random_shape() {
        let mut rng = Pcg32::seed_from_u64(7);
        let net = FeedForward::new_random(&[6, 4], 1.0, &mut rng);
        assert_eq!(net.layers.len(), 3);
        assert_eq!(net.layers[0].weights.dim(), (6, 3));
        assert_eq!(net.layers[0].output_size(), 6);
        assert_eq!(net.layers[2].input_size(), 4);
        assert_eq!(net.layers[2].output_size(), 3);
        assert!(net.is_well_formed());
        assert!(net.layers[0].weights.iter().all(|w| (-1.0f32..1.0).contains(w)));
    }

    #[test]
    fn test_random_is_seeded() {
        let a = FeedForward::new_random(&[5], 0.5, &mut Pcg32::seed_from_u64(3));
        let b = FeedForward::new_random(&[5], 0.5, &mut Pcg32::seed_from_u64(3));
        let c = FeedForward::new_random(&[5], 0.5, &mut Pcg32::seed_from_u64(4));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_forward_known_weights() {
        let layer = Layer {
            weights: arr2(&[[1.0, 0.0, 0.0], [0.0, 0.0, 0.0], [0.0, 0.0, -1.0]]),
            biases: arr1(&[0.0, 0.5, 0.0]),
        };
        let out = layer.forward(&arr1(&[0.25, 9.0, 0.25]));
        assert!((out[0] - 0.25f32.tanh()).abs() < 1e-6);
        assert!((out[1] - 0.5f32.tanh()).abs() < 1e-6);
        assert!((out[2] + 0.25f32.tanh()).abs() < 1e-6);
    }

    #[test]
    fn test_controller_decides_from_output() {
        // Single layer that only lights up the "down" output
        let net = FeedForward::from_layers(vec![Layer {
            weights: Array2::zeros((3, 3)),
            biases: arr1(&[0.0, 0.0, 1.0]),
        }])
        .expect("3x3 layer chains");
        let obs = Observation {
            paddle_y: 310.0,
            ball_dx: 430.0,
            ball_y: 300.0,
        };
        assert_eq!(net.decide(&obs), Decision::MoveDown);
    }

    #[test]
    fn test_malformed_detected() {
        assert_eq!(
            FeedForward::from_layers(vec![zero_layer(3, 2)]),
            Err(ShapeError::Layer {
                index: 0,
                rows: 3,
                cols: 2,
                biases: 3,
                expected: 3
            })
        );
        assert_eq!(
            FeedForward::from_layers(vec![zero_layer(4, 3)]),
            Err(ShapeError::Outputs { found: 4 })
        );
        assert_eq!(FeedForward::from_layers(vec![]), Err(ShapeError::Empty));

        let net = FeedForward {
            layers: vec![zero_layer(3, 2)],
        };
        assert!(!net.is_well_formed());
    }

    #[test]
    fn test_deserialize_checks_shapes() {
        let good = FeedForward::from_layers(vec![zero_layer(5, 3), zero_layer(3, 5)])
            .expect("layers chain");
        let json = serde_json::to_string(&good).unwrap();
        let back: FeedForward = serde_json::from_str(&json).unwrap();
        assert_eq!(back, good);

        let bad = FeedForward {
            layers: vec![zero_layer(3, 2)],
        };
        let json = serde_json::to_string(&bad).unwrap();
        let err = serde_json::from_str::<FeedForward>(&json).unwrap_err();
        assert!(err.to_string().contains("layer 0"));
    }
}
