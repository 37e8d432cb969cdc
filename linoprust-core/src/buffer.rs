use std::fmt::Debug;
use std::sync::Arc;

use crate::device::StorageDevice;
use crate::error::TensorError;
use crate::types::DType;

/// Enum representing different buffer types based on device and data type.
#[derive(Debug, Clone)]
pub enum Buffer {
    /// Data resides on the CPU.
    Cpu(CpuBuffer),
    /// Placeholder for GPU buffer. Only the device and the element count are known.
    Gpu { device: StorageDevice, len: usize },
}

/// Enum for CPU-specific buffer types.
#[derive(Debug, Clone)]
pub enum CpuBuffer {
    /// Buffer holding f32 data on the CPU.
    F32(Arc<Vec<f32>>),
    /// Buffer holding f64 data on the CPU.
    F64(Arc<Vec<f64>>),
}

impl CpuBuffer {
    /// Number of elements stored in the buffer.
    pub fn len(&self) -> usize {
        match self {
            CpuBuffer::F32(data) => data.len(),
            CpuBuffer::F64(data) => data.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The element type of the buffer.
    pub fn dtype(&self) -> DType {
        match self {
            CpuBuffer::F32(_) => DType::F32,
            CpuBuffer::F64(_) => DType::F64,
        }
    }
}

impl From<Vec<f32>> for CpuBuffer {
    fn from(data: Vec<f32>) -> Self {
        CpuBuffer::F32(Arc::new(data))
    }
}

impl From<Vec<f64>> for CpuBuffer {
    fn from(data: Vec<f64>) -> Self {
        CpuBuffer::F64(Arc::new(data))
    }
}

impl Buffer {
    /// Number of elements, whatever the device.
    pub fn len(&self) -> usize {
        match self {
            Buffer::Cpu(cpu) => cpu.len(),
            Buffer::Gpu { len, .. } => *len,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Attempts to get the CPU buffer.
    ///
    /// Returns `TensorError::DeviceMismatch` if the data lives on another device.
    pub fn try_get_cpu(&self) -> Result<&CpuBuffer, TensorError> {
        match self {
            Buffer::Cpu(cpu) => Ok(cpu),
            Buffer::Gpu { device, .. } => Err(TensorError::DeviceMismatch {
                expected: StorageDevice::CPU,
                actual: *device,
                operation: "try_get_cpu".to_string(),
            }),
        }
    }

    /// Attempts to get a reference to the underlying `Arc<Vec<f32>>` if this is a CPU F32 buffer.
    pub fn try_get_cpu_f32(&self) -> Result<&Arc<Vec<f32>>, TensorError> {
        match self.try_get_cpu()? {
            CpuBuffer::F32(data_arc) => Ok(data_arc),
            other => Err(TensorError::DataTypeMismatch {
                expected: DType::F32,
                actual: other.dtype(),
                operation: "try_get_cpu_f32".to_string(),
            }),
        }
    }

    /// Attempts to get a reference to the underlying `Arc<Vec<f64>>` if this is a CPU F64 buffer.
    pub fn try_get_cpu_f64(&self) -> Result<&Arc<Vec<f64>>, TensorError> {
        match self.try_get_cpu()? {
            CpuBuffer::F64(data_arc) => Ok(data_arc),
            other => Err(TensorError::DataTypeMismatch {
                expected: DType::F64,
                actual: other.dtype(),
                operation: "try_get_cpu_f64".to_string(),
            }),
        }
    }
}
