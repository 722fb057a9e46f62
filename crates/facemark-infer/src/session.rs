use crate::InferError;
use facemark_base::Tensor;
use std::collections::HashMap;

/// A loaded model, owned by whoever created it.
///
/// The session stays alive for as many `run` calls as the owner wants and
/// releases its native resources when dropped.
pub trait Session {
    /// Run the model once. Outputs are keyed by name; `output_names` gives the model order.
    fn run(
        &mut self,
        inputs: &[(&str, Tensor<f32>)],
    ) -> Result<HashMap<String, Tensor<f32>>, InferError>;
    fn input_names(&self) -> &[String];
    fn output_names(&self) -> &[String];
}
