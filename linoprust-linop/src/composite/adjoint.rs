use crate::error::LinOpError;
use crate::operator::{LinearOperator, Operator};
use crate::primitive::{Capabilities, Primitive};
use linoprust_core::Tensor;

/// Lazy adjoint view of a parent operator.
///
/// Forward primitives call the parent's adjoint ones and vice versa. The view
/// implements the swap of the parent's implemented primitives; the rest is derived
/// by its own dispatch plan.
pub struct AdjointLinearOperator {
    parent: LinearOperator,
}

impl AdjointLinearOperator {
    /// Returns the adjoint of `parent`.
    ///
    /// A Hermitian operator is its own adjoint and is returned as is; an adjoint view
    /// is unwrapped to its parent.
    pub fn wrap(parent: &LinearOperator) -> LinearOperator {
        if parent.is_hermitian() {
            return parent.clone();
        }
        if let Some(original) = parent.operator().adjoint_parent() {
            return original.clone();
        }
        let meta = parent.meta().adjoint();
        LinearOperator::assemble(
            Box::new(AdjointLinearOperator {
                parent: parent.clone(),
            }),
            meta,
        )
    }

    pub fn parent(&self) -> &LinearOperator {
        &self.parent
    }

    fn forward(&self, primitive: Primitive, x: &Tensor) -> Result<Tensor, LinOpError> {
        match primitive.adjoint() {
            Primitive::Mv => self.parent.mv(x),
            Primitive::Rmv => self.parent.rmv(x),
            Primitive::Mm => self.parent.mm(x),
            Primitive::Rmm => self.parent.rmm(x),
        }
    }
}

impl Operator for AdjointLinearOperator {
    fn name(&self) -> String {
        "AdjointLinearOperator".to_string()
    }

    fn capabilities(&self) -> Capabilities {
        self.parent.implemented_primitives().swapped()
    }

    fn mv_impl(&self, x: &Tensor) -> Result<Tensor, LinOpError> {
        self.forward(Primitive::Mv, x)
    }

    fn rmv_impl(&self, x: &Tensor) -> Result<Tensor, LinOpError> {
        self.forward(Primitive::Rmv, x)
    }

    fn mm_impl(&self, x: &Tensor) -> Result<Tensor, LinOpError> {
        self.forward(Primitive::Mm, x)
    }

    fn rmm_impl(&self, x: &Tensor) -> Result<Tensor, LinOpError> {
        self.forward(Primitive::Rmm, x)
    }

    // Same tensors, same influence.
    fn named_params(&self, prefix: &str) -> Result<Vec<(String, Tensor)>, LinOpError> {
        self.parent.operator().named_params(prefix)
    }

    fn constituents(&self) -> Vec<&LinearOperator> {
        vec![&self.parent]
    }

    fn adjoint_parent(&self) -> Option<&LinearOperator> {
        Some(&self.parent)
    }

    fn capability_hint(&self, primitive: Primitive) -> String {
        let source = primitive.adjoint();
        format!(
            "requires {} on {}: {}",
            source,
            self.parent.name(),
            self.parent.operator().capability_hint(source)
        )
    }
}
