//! Landmark inference for facemark.
//!
//! `Session` and `Backend` are the seam to the inference engine; the ONNX
//! Runtime backend lives behind the `onnx` feature. The `landmarks` module
//! holds the pipeline around the engine: encoding a normalized frame,
//! decoding fixed-point landmark output and the `LandmarkAnalyzer` that ties
//! a camera image to an annotated result.

pub mod backend;
pub mod backends;
pub mod device;
pub mod error;
pub mod landmarks;
pub mod modelsource;
pub mod session;

pub use backend::Backend;
pub use device::Device;
pub use error::InferError;
pub use landmarks::{
    AnalysisResult, AnalyzerConfig, ChannelOrder, LANDMARK_COUNT, Landmark, LandmarkAnalyzer,
    RawLandmarkOutput, decode, decode_tensor, decode_value, encode,
};
pub use modelsource::ModelSource;
pub use session::Session;

#[cfg(feature = "onnx")]
pub use backends::{OnnxBackend, OnnxSession};
