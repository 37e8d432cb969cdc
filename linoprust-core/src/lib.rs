//! Dense tensor runtime used by the LinOpRust operator algebra.
//!
//! Only what an implicit linear operator needs lives here: contiguous `f32`/`f64`
//! storage, shape/dtype/device introspection, `requires_grad` tracking and a
//! handful of dense linear-algebra kernels.

pub mod buffer;
pub mod device;
pub mod error;
pub mod ops;
pub mod tensor;
pub mod tensor_data;
pub mod types;
pub mod utils;

// Re-export the main types so they are reachable as `linoprust_core::Tensor` etc.
pub use device::StorageDevice;
pub use error::TensorError;
pub use tensor::Tensor;
pub use types::DType;
// Re-export traits required by public functions/structs
pub use num_traits;
