//! Operators defined entirely in terms of other operators.

pub mod adjoint;
pub mod matmul;

pub use adjoint::AdjointLinearOperator;
pub use matmul::MatmulLinearOperator;

#[cfg(test)]
mod matmul_test;
