//! Parameter introspection: which tensors influence an operator's output.
//!
//! Names are dotted paths under a caller-chosen prefix. Composites nest their
//! constituents' names (`A.`/`B.` for products, unchanged for adjoint views).

use crate::error::LinOpError;
use crate::operator::LinearOperator;
use linoprust_core::Tensor;

impl LinearOperator {
    /// Every `(name, tensor)` pair influencing the output, in declaration order.
    ///
    /// # Errors
    /// `LinOpError::ParamIntrospection` if the operator, or any constituent, does not
    /// override `Operator::named_params`.
    pub fn named_params(&self, prefix: &str) -> Result<Vec<(String, Tensor)>, LinOpError> {
        self.operator().named_params(prefix)
    }

    /// The names from [`LinearOperator::named_params`].
    pub fn param_names(&self, prefix: &str) -> Result<Vec<String>, LinOpError> {
        Ok(self
            .named_params(prefix)?
            .into_iter()
            .map(|(name, _)| name)
            .collect())
    }

    /// Like `named_params`, but each tensor is reported once, under its first name.
    pub fn unique_params(&self, prefix: &str) -> Result<Vec<(String, Tensor)>, LinOpError> {
        let mut unique: Vec<(String, Tensor)> = Vec::new();
        for (name, tensor) in self.named_params(prefix)? {
            if !unique.iter().any(|(_, seen)| seen.ptr_eq(&tensor)) {
                unique.push((name, tensor));
            }
        }
        Ok(unique)
    }

    /// The unique parameters that require gradients.
    pub fn differentiable_params(&self, prefix: &str) -> Result<Vec<(String, Tensor)>, LinOpError> {
        Ok(self
            .unique_params(prefix)?
            .into_iter()
            .filter(|(_, tensor)| tensor.requires_grad())
            .collect())
    }
}

#[cfg(test)]
#[path = "params_test.rs"]
mod tests;
