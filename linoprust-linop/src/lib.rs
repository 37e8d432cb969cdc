//! Implicit linear operators.
//!
//! An operator is defined by its action (`mv`, optionally `rmv`, `mm`, `rmm`) rather
//! than by a dense matrix. Concrete operators implement the [`Operator`] hooks and
//! declare which ones they override; [`LinearOperator`] validates the declaration,
//! derives the missing primitives where an identity allows it, and composes
//! operators lazily (adjoint views, products).

pub mod composite;
pub mod contract;
pub mod dispatch;
pub mod error;
pub mod matrix;
pub mod operator;
pub mod params;
pub mod primitive;
mod repr;

#[cfg(test)]
pub(crate) mod test_utils;

pub use composite::{AdjointLinearOperator, MatmulLinearOperator};
pub use dispatch::{Derivation, DispatchPlan};
pub use error::LinOpError;
pub use matrix::MatrixLinearOperator;
pub use operator::{LinearOperator, Operator, OperatorMeta};
pub use primitive::{Capabilities, Primitive};

// Re-export the tensor runtime so operator implementors need a single dependency.
pub use linoprust_core;
