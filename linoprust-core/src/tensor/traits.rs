// src/tensor/traits.rs
use crate::buffer::{Buffer, CpuBuffer};
use crate::tensor::Tensor;

impl PartialEq for Tensor {
    /// Two tensors are equal when they share the same shape, dtype, device and
    /// element values. Placeholder (non-CPU) tensors only compare equal to themselves.
    fn eq(&self, other: &Self) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        let lhs = self.read_data();
        let rhs = other.read_data();
        if lhs.shape != rhs.shape || lhs.dtype != rhs.dtype || lhs.device != rhs.device {
            return false;
        }
        match (&*lhs.buffer, &*rhs.buffer) {
            (Buffer::Cpu(a), Buffer::Cpu(b)) => match (a, b) {
                (CpuBuffer::F32(a), CpuBuffer::F32(b)) => a == b,
                (CpuBuffer::F64(a), CpuBuffer::F64(b)) => a == b,
                _ => false,
            },
            _ => false,
        }
    }
}
