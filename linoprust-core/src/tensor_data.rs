// src/tensor_data.rs
use std::fmt::Debug;
use std::sync::Arc;

use crate::buffer::{Buffer, CpuBuffer};
use crate::device::StorageDevice;
use crate::error::TensorError;
use crate::types::DType;

/// Internal storage and metadata for a Tensor.
///
/// Data is always stored contiguously in row-major order. It is wrapped in
/// `Arc<RwLock<TensorData>>` by the `Tensor` struct so the `requires_grad`
/// flag can be toggled through a shared handle.
#[derive(Debug)]
pub struct TensorData {
    /// The underlying data buffer (CPU or GPU placeholder).
    /// Wrapped in Arc so reshaping views share the buffer.
    pub(crate) buffer: Arc<Buffer>,
    /// The device where the buffer resides.
    pub(crate) device: StorageDevice,
    /// The data type of the elements in the buffer.
    pub(crate) dtype: DType,
    /// The shape (dimensions) of the tensor.
    pub(crate) shape: Vec<usize>,
    /// Flag indicating if the tensor takes part in gradient computation.
    pub(crate) requires_grad: bool,
}

impl TensorData {
    /// Creates a new CPU `TensorData` from a typed buffer.
    ///
    /// # Errors
    /// Returns `TensorError::TensorCreationError` if the buffer length does not match
    /// the number of elements implied by `shape`.
    pub fn from_cpu_buffer(buffer: CpuBuffer, shape: Vec<usize>) -> Result<Self, TensorError> {
        let numel: usize = shape.iter().product();
        let data_len = buffer.len();
        if data_len != numel {
            return Err(TensorError::TensorCreationError { data_len, shape });
        }
        let dtype = buffer.dtype();
        Ok(TensorData {
            buffer: Arc::new(Buffer::Cpu(buffer)),
            device: StorageDevice::CPU,
            dtype,
            shape,
            requires_grad: false,
        })
    }

    /// Creates a new `TensorData` with the given f32 data and shape on the CPU.
    pub fn new(data_vec: Vec<f32>, shape: Vec<usize>) -> Result<Self, TensorError> {
        Self::from_cpu_buffer(CpuBuffer::from(data_vec), shape)
    }

    /// Creates a new `TensorData` with the given f64 data and shape on the CPU.
    pub fn new_f64(data_vec: Vec<f64>, shape: Vec<usize>) -> Result<Self, TensorError> {
        Self::from_cpu_buffer(CpuBuffer::from(data_vec), shape)
    }

    /// Creates a metadata-only `TensorData` on a non-CPU device.
    pub(crate) fn placeholder(device: StorageDevice, dtype: DType, shape: Vec<usize>) -> Self {
        let len = shape.iter().product();
        TensorData {
            buffer: Arc::new(Buffer::Gpu { device, len }),
            device,
            dtype,
            shape,
            requires_grad: false,
        }
    }

    /// Creates a view sharing this tensor's buffer under a new shape with the same numel.
    pub(crate) fn reshaped(&self, shape: Vec<usize>) -> Result<Self, TensorError> {
        let numel: usize = shape.iter().product();
        if numel != self.numel() {
            return Err(TensorError::ShapeMismatch {
                expected: self.shape.clone(),
                actual: shape,
                operation: "reshape".to_string(),
            });
        }
        Ok(TensorData {
            buffer: Arc::clone(&self.buffer),
            device: self.device,
            dtype: self.dtype,
            shape,
            requires_grad: self.requires_grad,
        })
    }

    /// Returns the total number of elements.
    pub fn numel(&self) -> usize {
        self.shape.iter().product()
    }

    /// Returns a reference to the shared buffer.
    pub fn buffer(&self) -> &Arc<Buffer> {
        &self.buffer
    }
}
