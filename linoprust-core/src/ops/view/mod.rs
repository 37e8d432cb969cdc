// src/ops/view/mod.rs
//
// Shape-manipulating operations. Storage is always contiguous, so `transpose`,
// `select` and `stack` copy data while `squeeze`/`unsqueeze` only rewrite metadata.

pub mod select;
pub mod squeeze_unsqueeze;
pub mod transpose;

pub use select::select_op;
pub use squeeze_unsqueeze::{squeeze_op, unsqueeze_op};
pub use transpose::transpose_op;
