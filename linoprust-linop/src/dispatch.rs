//! Strategy table deriving missing primitives from the ones an operator implements.
//!
//! Every primitive has an ordered list of derivations. At construction the first
//! applicable one is recorded in a [`DispatchPlan`]; calls then follow the plan.

use crate::error::LinOpError;
use crate::primitive::{Capabilities, Primitive};
use linoprust_core::ops::stack::stack_op;
use linoprust_core::tensor::{self, Tensor};
use linoprust_core::DType;

/// How a primitive is served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Derivation {
    /// The operator's own hook.
    Native,
    /// Self-adjointness: `rmv = mv`, `rmm = mm`.
    Hermitian,
    /// Apply the vector primitive to each column and stack the results.
    ColumnWise,
}

impl Derivation {
    /// The primitive this derivation delegates to when serving `target`.
    pub fn source(self, target: Primitive) -> Primitive {
        match self {
            Derivation::Native => target,
            Derivation::Hermitian => target.adjoint(),
            Derivation::ColumnWise => target.vector_form(),
        }
    }
}

/// Ordered fallbacks for each primitive.
pub fn strategies(primitive: Primitive) -> &'static [Derivation] {
    match primitive {
        Primitive::Mv => &[Derivation::Native],
        Primitive::Rmv => &[Derivation::Native, Derivation::Hermitian],
        Primitive::Mm => &[Derivation::Native, Derivation::ColumnWise],
        Primitive::Rmm => &[
            Derivation::Native,
            Derivation::Hermitian,
            Derivation::ColumnWise,
        ],
    }
}

/// Which override would make `primitive` available on a leaf operator.
pub fn missing_hint(primitive: Primitive) -> String {
    match primitive {
        Primitive::Mv => "forward-apply requires mv_impl to be overridden".to_string(),
        Primitive::Rmv => {
            "override rmv_impl, or declare the operator Hermitian".to_string()
        }
        Primitive::Mm => "override mm_impl or mv_impl".to_string(),
        Primitive::Rmm => {
            "override rmm_impl or rmv_impl, or declare the operator Hermitian"
                .to_string()
        }
    }
}

/// The route chosen for each primitive, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchPlan {
    routes: [Option<Derivation>; 4],
}

impl DispatchPlan {
    /// Resolves every primitive against the declared capabilities.
    pub fn resolve(capabilities: Capabilities, is_hermitian: bool) -> Self {
        let mut plan = DispatchPlan::default();
        // Primitive::ALL lists sources before the primitives derived from them.
        for primitive in Primitive::ALL {
            plan.routes[primitive.index()] = strategies(primitive)
                .iter()
                .copied()
                .find(|d| plan.applicable(*d, primitive, capabilities, is_hermitian));
        }
        plan
    }

    fn applicable(
        &self,
        derivation: Derivation,
        target: Primitive,
        capabilities: Capabilities,
        is_hermitian: bool,
    ) -> bool {
        match derivation {
            Derivation::Native => capabilities.contains(target),
            Derivation::Hermitian => is_hermitian && self.route(target.adjoint()).is_some(),
            Derivation::ColumnWise => self.route(target.vector_form()).is_some(),
        }
    }

    pub fn route(&self, primitive: Primitive) -> Option<Derivation> {
        self.routes[primitive.index()]
    }

    /// Every primitive that can be served, natively or derived.
    pub fn available(&self) -> Capabilities {
        Primitive::ALL
            .into_iter()
            .filter(|p| self.route(*p).is_some())
            .collect()
    }
}

/// Applies `apply` to each column of `x` (last dim) and stacks the results as columns.
///
/// `empty_shape` is the output shape used when `x` has no columns.
pub(crate) fn column_wise<F>(
    x: &Tensor,
    empty_shape: &[usize],
    dtype: DType,
    apply: F,
) -> Result<Tensor, LinOpError>
where
    F: Fn(&Tensor) -> Result<Tensor, LinOpError>,
{
    let n_columns = x.shape().last().copied().unwrap_or(0);
    if n_columns == 0 {
        return Ok(tensor::zeros(empty_shape, dtype)?);
    }
    let columns = (0..n_columns)
        .map(|j| apply(&x.select(-1, j)?))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(stack_op(&columns, -1)?)
}
