use crate::primitive::Primitive;
use linoprust_core::{DType, StorageDevice, TensorError};
use thiserror::Error;

/// Errors raised by linear operators.
#[derive(Error, Debug, PartialEq, Clone)]
pub enum LinOpError {
    /// Invalid shape, Hermitian declaration or missing mandatory primitive at build time.
    #[error("Cannot construct {operator}: {reason}")]
    Construction { operator: String, reason: String },

    /// A primitive has neither an implementation nor a valid derivation.
    #[error("{operator}.{primitive}() is not available: {hint}")]
    Capability {
        operator: String,
        primitive: Primitive,
        hint: String,
    },

    #[error("Shape mismatch in {operation}: expected {expected}, got {actual:?}")]
    ShapeMismatch {
        operation: String,
        expected: String,
        actual: Vec<usize>,
    },

    #[error("DType mismatch in {operation}: expected {expected}, got {actual}")]
    DTypeMismatch {
        operation: String,
        expected: DType,
        actual: DType,
    },

    #[error("Device mismatch in {operation}: expected {expected}, got {actual}")]
    DeviceMismatch {
        operation: String,
        expected: StorageDevice,
        actual: StorageDevice,
    },

    /// An operator did not declare the tensors that influence its output.
    #[error("Cannot enumerate parameters of {operator}: {reason}")]
    ParamIntrospection { operator: String, reason: String },

    /// Failure raised by the tensor runtime while evaluating an operator.
    #[error(transparent)]
    Tensor(#[from] TensorError),
}
