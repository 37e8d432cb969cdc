pub mod allclose;

pub use allclose::{allclose, DEFAULT_ATOL, DEFAULT_RTOL};
