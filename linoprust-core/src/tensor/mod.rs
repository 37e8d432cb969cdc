// src/tensor/mod.rs

use crate::buffer::CpuBuffer;
use crate::device::StorageDevice;
use crate::error::TensorError;
use crate::tensor_data::TensorData;
use crate::types::DType;
use std::sync::{Arc, RwLock};

pub mod create;
mod debug;
mod traits;
pub mod utils;

// Re-export creation functions to make them public
pub use create::{eye, from_vec_f32, from_vec_f64, rand, rand_f64, randn, randn_f64, zeros};

/// Represents a multi-dimensional array (tensor).
///
/// `Tensor` uses `Arc<RwLock<TensorData>>` internally:
/// 1.  **Shared Ownership:** clones are cheap and point to the same data.
/// 2.  **Interior Mutability:** the `requires_grad` flag can be changed through
///     an immutable handle. The element data itself is never mutated in place.
pub struct Tensor {
    pub(crate) data: Arc<RwLock<TensorData>>,
}

impl Clone for Tensor {
    /// Shallow clone: both handles refer to the same `TensorData`.
    fn clone(&self) -> Self {
        Tensor {
            data: Arc::clone(&self.data),
        }
    }
}

impl Tensor {
    /// Creates a new Tensor with the given f32 data and shape on the CPU.
    pub fn new(data_vec: Vec<f32>, shape: Vec<usize>) -> Result<Self, TensorError> {
        Ok(Self::from_tensor_data(TensorData::new(data_vec, shape)?))
    }

    /// Creates a new Tensor with the given f64 data and shape on the CPU.
    pub fn new_f64(data_vec: Vec<f64>, shape: Vec<usize>) -> Result<Self, TensorError> {
        Ok(Self::from_tensor_data(TensorData::new_f64(data_vec, shape)?))
    }

    pub(crate) fn from_tensor_data(tensor_data: TensorData) -> Self {
        Tensor {
            data: Arc::new(RwLock::new(tensor_data)),
        }
    }

    /// Creates a CPU tensor from a typed buffer; `requires_grad` is set afterwards.
    pub(crate) fn from_cpu_buffer(
        buffer: CpuBuffer,
        shape: Vec<usize>,
        requires_grad: bool,
    ) -> Result<Self, TensorError> {
        let mut tensor_data = TensorData::from_cpu_buffer(buffer, shape)?;
        tensor_data.requires_grad = requires_grad;
        Ok(Self::from_tensor_data(tensor_data))
    }

    /// Returns the data type (`DType`) of the tensor elements.
    pub fn dtype(&self) -> DType {
        self.read_data().dtype
    }

    /// Returns the device (`StorageDevice`) where the tensor's data resides.
    pub fn device(&self) -> StorageDevice {
        self.read_data().device
    }

    /// Returns a clone of the tensor's shape (`Vec<usize>`).
    pub fn shape(&self) -> Vec<usize> {
        self.read_data().shape.clone()
    }

    /// Returns the number of dimensions.
    pub fn rank(&self) -> usize {
        self.read_data().shape.len()
    }

    /// Returns the number of elements in the tensor.
    pub fn numel(&self) -> usize {
        self.read_data().numel()
    }

    /// Acquires a read lock on the tensor's data.
    /// Panics if the RwLock is poisoned.
    pub fn read_data(&self) -> std::sync::RwLockReadGuard<'_, TensorData> {
        self.data.read().expect("RwLock poisoned")
    }

    /// Acquires a write lock on the tensor's data.
    /// Panics if the RwLock is poisoned.
    pub fn write_data(&self) -> std::sync::RwLockWriteGuard<'_, TensorData> {
        self.data.write().expect("RwLock poisoned")
    }

    /// Returns `true` if both handles point to the very same tensor.
    pub fn ptr_eq(&self, other: &Tensor) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }

    // --- Autograd flag ---

    /// Checks if the tensor takes part in gradient computation.
    pub fn requires_grad(&self) -> bool {
        self.read_data().requires_grad
    }

    /// Sets the `requires_grad` flag.
    pub fn set_requires_grad(&self, requires_grad: bool) {
        self.write_data().requires_grad = requires_grad;
    }

    // --- Data access ---

    /// Returns a clone of the CPU buffer (cheap: the element vector is behind an `Arc`).
    ///
    /// # Errors
    /// `TensorError::DeviceMismatch` if the tensor is not on the CPU.
    pub fn cpu_buffer(&self) -> Result<CpuBuffer, TensorError> {
        let guard = self.read_data();
        Ok(guard.buffer.try_get_cpu()?.clone())
    }

    /// Attempts to get the tensor data as a `Vec<f32>`.
    /// Returns an error if the tensor is not on the CPU or not F32.
    pub fn get_f32_data(&self) -> Result<Vec<f32>, TensorError> {
        let guard = self.read_data();
        Ok(guard.buffer.try_get_cpu_f32()?.as_ref().clone())
    }

    /// Attempts to get the tensor data as a `Vec<f64>`.
    /// Returns an error if the tensor is not on the CPU or not F64.
    pub fn get_f64_data(&self) -> Result<Vec<f64>, TensorError> {
        let guard = self.read_data();
        Ok(guard.buffer.try_get_cpu_f64()?.as_ref().clone())
    }

    /// Returns the data widened to `f64`, whatever the element type.
    pub fn to_f64_vec(&self) -> Result<Vec<f64>, TensorError> {
        Ok(match self.cpu_buffer()? {
            CpuBuffer::F32(data) => data.iter().map(|&v| v as f64).collect(),
            CpuBuffer::F64(data) => data.as_ref().clone(),
        })
    }

    /// Returns a tensor with the same metadata on `device`.
    ///
    /// Data is never transferred between devices: moving to another device yields
    /// a placeholder, and moving a placeholder back to the CPU fails.
    pub fn to_device(&self, device: StorageDevice) -> Result<Tensor, TensorError> {
        let guard = self.read_data();
        if guard.device == device {
            drop(guard);
            return Ok(self.clone());
        }
        if device == StorageDevice::CPU {
            return Err(TensorError::DeviceMismatch {
                expected: StorageDevice::CPU,
                actual: guard.device,
                operation: "to_device".to_string(),
            });
        }
        log::debug!(
            "creating {} placeholder for tensor of shape {:?}; data stays on {}",
            device, guard.shape, guard.device
        );
        let mut placeholder = TensorData::placeholder(device, guard.dtype, guard.shape.clone());
        placeholder.requires_grad = guard.requires_grad;
        Ok(Self::from_tensor_data(placeholder))
    }
}

#[cfg(test)]
mod tests;
