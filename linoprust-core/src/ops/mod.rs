// src/ops/mod.rs

pub mod comparison;
pub mod linalg;
pub mod stack;
pub mod traits;
pub mod view;

use crate::buffer::CpuBuffer;
use crate::device::StorageDevice;
use crate::error::TensorError;
use crate::tensor::Tensor;

/// Fetches the CPU buffer of `tensor`, tagging a device failure with the operation name.
pub(crate) fn cpu_buffer_for(tensor: &Tensor, operation: &str) -> Result<CpuBuffer, TensorError> {
    let device = tensor.device();
    if device != StorageDevice::CPU {
        return Err(TensorError::DeviceMismatch {
            expected: StorageDevice::CPU,
            actual: device,
            operation: operation.to_string(),
        });
    }
    tensor.cpu_buffer()
}

/// Checks that two operands share dtype and device.
pub(crate) fn check_same_placement(a: &Tensor, b: &Tensor, operation: &str) -> Result<(), TensorError> {
    if a.device() != b.device() {
        return Err(TensorError::DeviceMismatch {
            expected: a.device(),
            actual: b.device(),
            operation: operation.to_string(),
        });
    }
    if a.dtype() != b.dtype() {
        return Err(TensorError::DataTypeMismatch {
            expected: a.dtype(),
            actual: b.dtype(),
            operation: operation.to_string(),
        });
    }
    Ok(())
}
