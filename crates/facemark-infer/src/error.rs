use crate::Device;
use std::fmt;

#[derive(Debug)]
pub enum InferError {
    BackendError(String),
    ModelLoad(String),
    InvalidInput {
        name: String,
        expected_names: Vec<String>,
    },
    UnsupportedDevice(Device),
    UnsupportedDtype(String),
    ShapeMismatch {
        expected: String,
        got: String,
    },
    Io(String),
    InvalidConfig(String),
}

impl fmt::Display for InferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InferError::BackendError(msg) => write!(f, "backend error: {msg}"),
            InferError::ModelLoad(msg) => write!(f, "model load error: {msg}"),
            InferError::InvalidInput {
                name,
                expected_names,
            } => write!(
                f,
                "invalid input '{name}', model expects one of {expected_names:?}"
            ),
            InferError::UnsupportedDevice(device) => write!(f, "unsupported device: {device}"),
            InferError::UnsupportedDtype(msg) => write!(f, "unsupported dtype: {msg}"),
            InferError::ShapeMismatch { expected, got } => {
                write!(f, "shape mismatch: expected {expected}, got {got}")
            }
            InferError::Io(msg) => write!(f, "io error: {msg}"),
            InferError::InvalidConfig(msg) => write!(f, "invalid configuration: {msg}"),
        }
    }
}

impl std::error::Error for InferError {}

impl From<std::io::Error> for InferError {
    fn from(err: std::io::Error) -> Self {
        InferError::Io(err.to_string())
    }
}

impl From<facemark_base::TensorError> for InferError {
    fn from(err: facemark_base::TensorError) -> Self {
        InferError::BackendError(format!("tensor error: {err}"))
    }
}
