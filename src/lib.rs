//! A small fully connected feedforward neural network with sigmoid neurons,
//! trained one example at a time by backpropagation.
//!
//! Scalars are `f64`. A network is built from a list of layer sizes, from
//! input to output, and owns every layer; see [`feed_forward::Network`].

pub mod activator;
pub mod error;
pub mod feed_forward;
pub mod layer;
pub mod matrix;
pub mod random;
pub mod trainer;

pub use crate::error::{Error, Result};
pub use crate::feed_forward::Network;
pub use crate::layer::Layer;
pub use crate::random::{Uniform, WeightSource};
