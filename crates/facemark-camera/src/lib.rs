//! Camera-side contract for facemark.
//!
//! A `Camera` hands out `CapturedImage`s one at a time together with the
//! sensor rotation. Images arrive in device-native pixel formats and are
//! converted to RGB `Frame`s on demand. `ReplayCamera` plays back a
//! directory of image files through the same contract.

pub mod captured;
pub mod config;
pub mod convert;
pub mod error;
pub mod replay;
pub mod traits;

pub use captured::{CapturedImage, PixelFormat};
pub use config::CameraConfig;
pub use error::CameraError;
pub use replay::ReplayCamera;
pub use traits::Camera;
