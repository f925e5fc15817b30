pub mod client;
pub mod normalize;
pub mod types;

pub use client::{DetectionClient, DetectionConfig, DetectionError, DetectionOutcome, DEFAULT_ENDPOINT};
pub use normalize::normalize;
pub use types::{Detections, ImageInput, ImageSize, Prediction};
