use crate::composite::{AdjointLinearOperator, MatmulLinearOperator};
use crate::contract;
use crate::dispatch::{self, column_wise, Derivation, DispatchPlan};
use crate::error::LinOpError;
use crate::matrix::MatrixLinearOperator;
use crate::primitive::{Capabilities, Primitive};
use linoprust_core::tensor;
use linoprust_core::{DType, StorageDevice, Tensor};
use log::{debug, trace, warn};
use std::sync::Arc;

/// Shape, symmetry and placement of an operator, fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorMeta {
    /// `[batch..., nrows, ncols]`.
    pub shape: Vec<usize>,
    pub is_hermitian: bool,
    pub dtype: DType,
    pub device: StorageDevice,
}

impl OperatorMeta {
    pub fn new(shape: Vec<usize>, dtype: DType, device: StorageDevice) -> Self {
        OperatorMeta {
            shape,
            is_hermitian: false,
            dtype,
            device,
        }
    }

    /// Metadata of an operator acting like the dense `mat`.
    pub fn of_tensor(mat: &Tensor) -> Self {
        Self::new(mat.shape(), mat.dtype(), mat.device())
    }

    #[must_use]
    pub fn hermitian(mut self, is_hermitian: bool) -> Self {
        self.is_hermitian = is_hermitian;
        self
    }

    // The accessors below assume a shape accepted by `contract::validate_meta`.

    pub(crate) fn nrows(&self) -> usize {
        self.shape[self.shape.len() - 2]
    }

    pub(crate) fn ncols(&self) -> usize {
        self.shape[self.shape.len() - 1]
    }

    pub(crate) fn batch_shape(&self) -> &[usize] {
        &self.shape[..self.shape.len() - 2]
    }

    /// Metadata of the adjoint: last two dims swapped.
    pub(crate) fn adjoint(&self) -> Self {
        let mut shape = self.shape.clone();
        let rank = shape.len();
        shape.swap(rank - 2, rank - 1);
        OperatorMeta { shape, ..self.clone() }
    }
}

/// Hooks implemented by a concrete operator.
///
/// `capabilities` declares which of the four primitive hooks are overridden; only
/// those are ever called. `mv_impl` is mandatory for user-defined operators, the
/// others are derived when an identity allows it (see [`crate::dispatch`]).
///
/// Hooks receive operands that already passed shape, dtype and device validation.
pub trait Operator: Send + Sync {
    /// Short type name used in representations and error messages.
    fn name(&self) -> String {
        short_type_name(std::any::type_name::<Self>())
    }

    /// The primitives this operator overrides.
    fn capabilities(&self) -> Capabilities;

    fn mv_impl(&self, _x: &Tensor) -> Result<Tensor, LinOpError> {
        Err(undefined_hook(&self.name(), Primitive::Mv))
    }

    fn rmv_impl(&self, _x: &Tensor) -> Result<Tensor, LinOpError> {
        Err(undefined_hook(&self.name(), Primitive::Rmv))
    }

    fn mm_impl(&self, _x: &Tensor) -> Result<Tensor, LinOpError> {
        Err(undefined_hook(&self.name(), Primitive::Mm))
    }

    fn rmm_impl(&self, _x: &Tensor) -> Result<Tensor, LinOpError> {
        Err(undefined_hook(&self.name(), Primitive::Rmm))
    }

    /// Every tensor influencing the output, named under `prefix`.
    ///
    /// Operators must override this for outer differentiation engines to find their
    /// parameters; the default fails loudly instead of reporting nothing.
    fn named_params(&self, _prefix: &str) -> Result<Vec<(String, Tensor)>, LinOpError> {
        Err(LinOpError::ParamIntrospection {
            operator: self.name(),
            reason: "named_params is not implemented".to_string(),
        })
    }

    /// Operators this one is built from, in display order.
    fn constituents(&self) -> Vec<&LinearOperator> {
        Vec::new()
    }

    /// The wrapped operator, for adjoint views.
    fn adjoint_parent(&self) -> Option<&LinearOperator> {
        None
    }

    /// Which override would make `primitive` available.
    fn capability_hint(&self, primitive: Primitive) -> String {
        dispatch::missing_hint(primitive)
    }
}

fn undefined_hook(operator: &str, primitive: Primitive) -> LinOpError {
    warn!(
        "{} declares {} but does not override {}",
        operator,
        primitive,
        primitive.hook_name()
    );
    LinOpError::Capability {
        operator: operator.to_string(),
        primitive,
        hint: format!(
            "{} is declared in capabilities() but not overridden",
            primitive.hook_name()
        ),
    }
}

/// `a::b::Name<T>` -> `Name`.
pub(crate) fn short_type_name(full: &str) -> String {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base).to_string()
}

struct OperatorInner {
    op: Box<dyn Operator>,
    name: String,
    meta: OperatorMeta,
    capabilities: Capabilities,
    plan: DispatchPlan,
}

/// A (possibly batched) linear map defined by its action.
///
/// Cheap to clone: clones share the same immutable operator.
#[derive(Clone)]
pub struct LinearOperator {
    inner: Arc<OperatorInner>,
}

impl LinearOperator {
    /// Builds a user-defined operator.
    ///
    /// # Errors
    /// `LinOpError::Construction` if the shape has fewer than 2 dims, if a Hermitian
    /// operator is not square, or if `mv_impl` is not declared.
    pub fn new<O: Operator + 'static>(op: O, meta: OperatorMeta) -> Result<Self, LinOpError> {
        let name = op.name();
        contract::validate_meta(&name, &meta)?;
        if !op.capabilities().contains(Primitive::Mv) {
            return Err(LinOpError::Construction {
                operator: name,
                reason: dispatch::missing_hint(Primitive::Mv),
            });
        }
        Ok(Self::assemble(Box::new(op), meta))
    }

    /// Builds an operator whose metadata is already known to be valid.
    ///
    /// Composites go through here: their missing primitives surface when called.
    pub(crate) fn assemble(op: Box<dyn Operator>, meta: OperatorMeta) -> Self {
        let name = op.name();
        let capabilities = op.capabilities();
        let plan = DispatchPlan::resolve(capabilities, meta.is_hermitian);
        debug!(
            "built {} with shape {:?} (hermitian: {}), implements {:?}, available {:?}",
            name,
            meta.shape,
            meta.is_hermitian,
            capabilities,
            plan.available()
        );
        LinearOperator {
            inner: Arc::new(OperatorInner {
                op,
                name,
                meta,
                capabilities,
                plan,
            }),
        }
    }

    /// Wraps a dense matrix, see [`MatrixLinearOperator`].
    pub fn m(mat: &Tensor, is_hermitian: bool) -> Result<Self, LinOpError> {
        MatrixLinearOperator::wrap(mat, is_hermitian)
    }

    // --- Accessors ---

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn meta(&self) -> &OperatorMeta {
        &self.inner.meta
    }

    pub fn shape(&self) -> &[usize] {
        &self.inner.meta.shape
    }

    pub fn batch_shape(&self) -> &[usize] {
        self.inner.meta.batch_shape()
    }

    pub fn nrows(&self) -> usize {
        self.inner.meta.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.inner.meta.ncols()
    }

    pub fn is_hermitian(&self) -> bool {
        self.inner.meta.is_hermitian
    }

    pub fn dtype(&self) -> DType {
        self.inner.meta.dtype
    }

    pub fn device(&self) -> StorageDevice {
        self.inner.meta.device
    }

    /// The primitives the concrete operator overrides.
    pub fn implemented_primitives(&self) -> Capabilities {
        self.inner.capabilities
    }

    /// The primitives that can be called, natively or through a derivation.
    pub fn available_primitives(&self) -> Capabilities {
        self.inner.plan.available()
    }

    pub fn plan(&self) -> &DispatchPlan {
        &self.inner.plan
    }

    pub fn operator(&self) -> &dyn Operator {
        self.inner.op.as_ref()
    }

    /// Returns `true` if both handles share the same operator.
    pub fn ptr_eq(&self, other: &LinearOperator) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    // --- Primitives ---

    /// `A x` for `x` of shape `(..., ncols)`.
    pub fn mv(&self, x: &Tensor) -> Result<Tensor, LinOpError> {
        self.apply(Primitive::Mv, x)
    }

    /// `A^H x` for `x` of shape `(..., nrows)`.
    pub fn rmv(&self, x: &Tensor) -> Result<Tensor, LinOpError> {
        self.apply(Primitive::Rmv, x)
    }

    /// `A X` for `X` of shape `(..., ncols, k)`.
    pub fn mm(&self, x: &Tensor) -> Result<Tensor, LinOpError> {
        self.apply(Primitive::Mm, x)
    }

    /// `A^H X` for `X` of shape `(..., nrows, k)`.
    pub fn rmm(&self, x: &Tensor) -> Result<Tensor, LinOpError> {
        self.apply(Primitive::Rmm, x)
    }

    /// The dense matrix, `mm` applied to the identity. Meant for tests and debugging.
    pub fn fullmatrix(&self) -> Result<Tensor, LinOpError> {
        let identity = tensor::eye(self.ncols(), self.dtype())?.to_device(self.device())?;
        self.mm(&identity)
    }

    fn apply(&self, primitive: Primitive, x: &Tensor) -> Result<Tensor, LinOpError> {
        contract::check_operand(&self.inner.name, &self.inner.meta, primitive, x)?;
        self.dispatch(primitive, x)
    }

    fn dispatch(&self, primitive: Primitive, x: &Tensor) -> Result<Tensor, LinOpError> {
        let op = self.inner.op.as_ref();
        match self.inner.plan.route(primitive) {
            Some(Derivation::Native) => match primitive {
                Primitive::Mv => op.mv_impl(x),
                Primitive::Rmv => op.rmv_impl(x),
                Primitive::Mm => op.mm_impl(x),
                Primitive::Rmm => op.rmm_impl(x),
            },
            Some(Derivation::Hermitian) => {
                trace!(
                    "{}.{} served by {} (Hermitian)",
                    self.inner.name,
                    primitive,
                    primitive.adjoint()
                );
                self.dispatch(primitive.adjoint(), x)
            }
            Some(Derivation::ColumnWise) => {
                let source = primitive.vector_form();
                trace!(
                    "{}.{} served column-wise by {}",
                    self.inner.name,
                    primitive,
                    source
                );
                let empty_shape = contract::output_shape(&self.inner.meta, primitive, x)?;
                column_wise(x, &empty_shape, self.dtype(), |column| {
                    self.dispatch(source, column)
                })
            }
            None => Err(LinOpError::Capability {
                operator: self.inner.name.clone(),
                primitive,
                hint: op.capability_hint(primitive),
            }),
        }
    }

    // --- Composition ---

    /// The adjoint view (`.H`). A Hermitian operator and the adjoint of an adjoint
    /// return the original operator.
    pub fn h(&self) -> LinearOperator {
        AdjointLinearOperator::wrap(self)
    }

    /// The lazy product `self @ other`.
    ///
    /// # Errors
    /// `LinOpError::Construction` if the inner dimensions, dtypes, devices or batch
    /// dimensions are incompatible.
    pub fn matmul(&self, other: &LinearOperator) -> Result<LinearOperator, LinOpError> {
        MatmulLinearOperator::compose(self, other)
    }
}

#[cfg(test)]
#[path = "operator_test.rs"]
mod tests;
