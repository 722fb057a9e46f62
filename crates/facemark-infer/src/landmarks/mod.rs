mod analyzer;
mod config;
mod decode;
mod encode;
mod types;

pub use analyzer::{AnalysisResult, LandmarkAnalyzer};
pub use config::AnalyzerConfig;
pub use decode::{decode, decode_tensor, decode_value};
pub use encode::encode;
pub use types::{ChannelOrder, LANDMARK_COUNT, Landmark, RawLandmarkOutput};
