use crate::{Backend, Device, InferError, ModelSource, Session};
use facemark_base::Tensor;
use ort::session::Session as OrtSession;
use ort::value::{DynValue, Tensor as OrtTensor};
use std::collections::HashMap;

/// Loads ONNX models through ONNX Runtime.
#[derive(Debug, Clone, Default)]
pub struct OnnxBackend {
    device: Device,
}

impl OnnxBackend {
    pub fn new(device: Device) -> Self {
        Self { device }
    }

    pub fn device(&self) -> &Device {
        &self.device
    }
}

impl Backend for OnnxBackend {
    fn name(&self) -> &str {
        "onnx"
    }

    fn load_model(&self, model: ModelSource) -> Result<Box<dyn Session>, InferError> {
        let device = &self.device;
        let mut builder = OrtSession::builder().map_err(|e| {
            InferError::BackendError(format!("failed to create session builder: {e}"))
        })?;

        builder = match device {
            Device::Cpu => {
                log::info!("onnx: using CPU execution provider");
                builder
            }
            #[cfg(feature = "cuda")]
            Device::Cuda { device_id } => {
                use ort::ep::ExecutionProvider;
                use ort::execution_providers::CUDAExecutionProvider;
                let ep = CUDAExecutionProvider::default().with_device_id(*device_id);
                let available = ep.is_available().unwrap_or(false);
                log::info!("onnx: CUDA execution provider requested (device_id={device_id}), available: {available}");
                builder
                    .with_execution_providers([ep.build()])
                    .map_err(|_| InferError::UnsupportedDevice(device.clone()))?
            }
            #[cfg(not(feature = "cuda"))]
            Device::Cuda { .. } => {
                return Err(InferError::UnsupportedDevice(device.clone()));
            }
        };

        let session = match model {
            ModelSource::File(path) => builder.commit_from_file(&path).map_err(|e| {
                InferError::ModelLoad(format!("failed to load {}: {e}", path.display()))
            })?,
            ModelSource::Memory(bytes) => builder.commit_from_memory(&bytes).map_err(|e| {
                InferError::ModelLoad(format!("failed to load model from memory: {e}"))
            })?,
        };

        let input_names: Vec<String> = session
            .inputs()
            .iter()
            .map(|input| input.name().to_string())
            .collect();
        let output_names: Vec<String> = session
            .outputs()
            .iter()
            .map(|output| output.name().to_string())
            .collect();
        log::info!("onnx: model inputs {input_names:?}, outputs {output_names:?}");

        Ok(Box::new(OnnxSession {
            session,
            input_names,
            output_names,
        }))
    }
}

/// An ONNX Runtime session behind the `Session` trait.
pub struct OnnxSession {
    session: OrtSession,
    input_names: Vec<String>,
    output_names: Vec<String>,
}

impl Session for OnnxSession {
    fn run(
        &mut self,
        inputs: &[(&str, Tensor<f32>)],
    ) -> Result<HashMap<String, Tensor<f32>>, InferError> {
        let mut values: Vec<(String, DynValue)> = Vec::with_capacity(inputs.len());
        for (name, tensor) in inputs {
            if !self.input_names.iter().any(|n| n == name) {
                return Err(InferError::InvalidInput {
                    name: name.to_string(),
                    expected_names: self.input_names.clone(),
                });
            }
            values.push((name.to_string(), tensor_to_value(tensor)?));
        }

        let outputs = self
            .session
            .run(values)
            .map_err(|e| InferError::BackendError(format!("inference failed: {e}")))?;

        let mut result = HashMap::with_capacity(self.output_names.len());
        for name in &self.output_names {
            let value = outputs.get(name.as_str()).ok_or_else(|| {
                InferError::BackendError(format!("model produced no output named '{name}'"))
            })?;
            if let Some(tensor) = convert_output(name, raw_output(value))? {
                result.insert(name.clone(), tensor);
            }
        }

        if result.is_empty() && !self.output_names.is_empty() {
            return Err(InferError::UnsupportedDtype(format!(
                "none of the outputs {:?} is f32 or i16",
                self.output_names
            )));
        }
        Ok(result)
    }

    fn input_names(&self) -> &[String] {
        &self.input_names
    }

    fn output_names(&self) -> &[String] {
        &self.output_names
    }
}

/// Copy a `Tensor<f32>` into an ONNX Runtime value.
pub fn tensor_to_value(tensor: &Tensor<f32>) -> Result<DynValue, InferError> {
    let data = tensor.data.clone().into_boxed_slice();
    let value = OrtTensor::from_array((tensor.shape.clone(), data))
        .map_err(|e| InferError::BackendError(format!("failed to create input tensor: {e}")))?;
    Ok(value.into_dyn())
}

fn to_shape(dims: &[i64]) -> Result<Vec<usize>, InferError> {
    dims.iter()
        .map(|&d| {
            usize::try_from(d).map_err(|_| InferError::ShapeMismatch {
                expected: "static output dimensions".to_string(),
                got: format!("{dims:?}"),
            })
        })
        .collect()
}

/// Output data borrowed from an ONNX Runtime value.
enum RawOutput<'a> {
    F32(&'a [i64], &'a [f32]),
    I16(&'a [i64], &'a [i16]),
    Unsupported,
}

fn raw_output(value: &DynValue) -> RawOutput<'_> {
    if let Ok((shape, data)) = value.try_extract_tensor::<f32>() {
        return RawOutput::F32(shape, data);
    }
    if let Ok((shape, data)) = value.try_extract_tensor::<i16>() {
        return RawOutput::I16(shape, data);
    }
    RawOutput::Unsupported
}

// f32 is read as is; i16 (fixed-point landmark models) is widened to f32.
// Other dtypes yield `None` and the output is left out of the result.
fn convert_output(name: &str, raw: RawOutput<'_>) -> Result<Option<Tensor<f32>>, InferError> {
    match raw {
        RawOutput::F32(shape, data) => Ok(Some(Tensor::new(to_shape(shape)?, data.to_vec())?)),
        RawOutput::I16(shape, data) => {
            let widened = Tensor::new(to_shape(shape)?, data.to_vec())?.map(|&v| v as f32);
            Ok(Some(widened))
        }
        RawOutput::Unsupported => {
            log::debug!("onnx: skipping output '{name}', dtype is neither f32 nor i16");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_f32_output_keeps_values() {
        let data = [1.5f32, -2.0, 0.0, 4.0];
        let tensor = convert_output("landmarks", RawOutput::F32(&[2, 2], &data))
            .unwrap()
            .unwrap();
        assert_eq!(tensor.shape, vec![2, 2]);
        assert_eq!(tensor.data, data.to_vec());
    }

    #[test]
    fn test_i16_output_is_widened() {
        let data = [i16::MIN, -1, 0, i16::MAX];
        let tensor = convert_output("landmarks", RawOutput::I16(&[1, 2, 2], &data))
            .unwrap()
            .unwrap();
        assert_eq!(tensor.shape, vec![1, 2, 2]);
        assert_eq!(tensor.data, vec![-32768.0, -1.0, 0.0, 32767.0]);
    }

    #[test]
    fn test_unsupported_dtype_is_skipped() {
        assert!(convert_output("ids", RawOutput::Unsupported).unwrap().is_none());
    }

    #[test]
    fn test_dynamic_dimension_is_rejected() {
        let result = convert_output("landmarks", RawOutput::F32(&[-1, 2], &[0.0, 0.0]));
        assert!(matches!(result, Err(InferError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_buffer_not_matching_shape_is_rejected() {
        let result = convert_output("landmarks", RawOutput::I16(&[106, 2], &[0; 20]));
        assert!(matches!(result, Err(InferError::BackendError(_))));
    }
}
