//! Features Module - model input construction
//!
//! The layout is the contract with the trained model; the encoder is the
//! only place a reading is turned into numbers.

pub mod encoder;
pub mod layout;
pub mod vector;

pub use encoder::encode;
pub use layout::{layout_hash, LayoutInfo, FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION};
pub use vector::FeatureVector;
