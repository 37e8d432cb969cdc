use crate::buffer::CpuBuffer;
use crate::types::DType;
use num_traits::{Float, NumAssignOps};
use std::fmt::Debug;

/// Floating-point element types usable in the generic tensor kernels.
///
/// Besides the arithmetic bounds, each type knows its `DType` tag and how to wrap
/// a kernel's output back into a `CpuBuffer`.
pub trait LinopNumeric: Float + NumAssignOps + Debug + Send + Sync + 'static {
    const DTYPE: DType;

    fn into_buffer(data: Vec<Self>) -> CpuBuffer;
}

impl LinopNumeric for f32 {
    const DTYPE: DType = DType::F32;

    fn into_buffer(data: Vec<Self>) -> CpuBuffer {
        CpuBuffer::from(data)
    }
}

impl LinopNumeric for f64 {
    const DTYPE: DType = DType::F64;

    fn into_buffer(data: Vec<Self>) -> CpuBuffer {
        CpuBuffer::from(data)
    }
}
