//! Shape, dtype, device and Hermitian checks, at construction and on every call.
//!
//! Pure functions: each check either passes or returns the typed error naming the
//! violated condition with expected and actual values.

use crate::error::LinOpError;
use crate::operator::{LinearOperator, OperatorMeta};
use crate::primitive::Primitive;
use linoprust_core::tensor::utils::broadcast_shapes;
use linoprust_core::Tensor;

/// Construction-time checks: rank >= 2 and Hermitian implies square.
pub fn validate_meta(operator: &str, meta: &OperatorMeta) -> Result<(), LinOpError> {
    let rank = meta.shape.len();
    if rank < 2 {
        return Err(LinOpError::Construction {
            operator: operator.to_string(),
            reason: format!(
                "the shape must have at least 2 dimensions, got {:?}",
                meta.shape
            ),
        });
    }
    if meta.is_hermitian && meta.shape[rank - 1] != meta.shape[rank - 2] {
        return Err(LinOpError::Construction {
            operator: operator.to_string(),
            reason: format!(
                "a Hermitian operator must be square, got shape {:?}",
                meta.shape
            ),
        });
    }
    Ok(())
}

/// Dimension `x` must match along its operand axis for `primitive`.
fn expected_operand_dim(meta: &OperatorMeta, primitive: Primitive) -> usize {
    if primitive.is_adjoint() {
        meta.nrows()
    } else {
        meta.ncols()
    }
}

/// Call-time checks on the operand of `primitive`.
///
/// Vectors are `(..., n)`, matrices `(..., n, k)`, where `n` is the input dimension
/// (columns for forward primitives, rows for adjoint ones). The operand's batch dims
/// must broadcast with the operator's.
pub fn check_operand(
    operator: &str,
    meta: &OperatorMeta,
    primitive: Primitive,
    x: &Tensor,
) -> Result<(), LinOpError> {
    let operation = format!("{}.{}", operator, primitive);

    let device = x.device();
    if device != meta.device {
        return Err(LinOpError::DeviceMismatch {
            operation,
            expected: meta.device,
            actual: device,
        });
    }
    let dtype = x.dtype();
    if dtype != meta.dtype {
        return Err(LinOpError::DTypeMismatch {
            operation,
            expected: meta.dtype,
            actual: dtype,
        });
    }

    let shape = x.shape();
    let n = expected_operand_dim(meta, primitive);
    let (min_rank, expected) = if primitive.is_matrix() {
        (2, format!("[..., {}, k]", n))
    } else {
        (1, format!("[..., {}]", n))
    };
    let dim_ok = shape.len() >= min_rank && shape[shape.len() - min_rank] == n;
    if !dim_ok {
        return Err(LinOpError::ShapeMismatch {
            operation,
            expected,
            actual: shape,
        });
    }

    let x_batch = &shape[..shape.len() - min_rank];
    if broadcast_shapes(meta.batch_shape(), x_batch).is_err() {
        return Err(LinOpError::ShapeMismatch {
            operation,
            expected: format!(
                "batch dimensions broadcastable with {:?}",
                meta.batch_shape()
            ),
            actual: shape,
        });
    }
    Ok(())
}

/// Shape of `primitive`'s result for an operand already accepted by [`check_operand`].
pub fn output_shape(
    meta: &OperatorMeta,
    primitive: Primitive,
    x: &Tensor,
) -> Result<Vec<usize>, LinOpError> {
    let shape = x.shape();
    let operand_rank = if primitive.is_matrix() { 2 } else { 1 };
    let x_batch = &shape[..shape.len().saturating_sub(operand_rank)];
    let mut out = broadcast_shapes(meta.batch_shape(), x_batch)?;
    out.push(if primitive.is_adjoint() {
        meta.ncols()
    } else {
        meta.nrows()
    });
    if primitive.is_matrix() {
        out.push(shape.last().copied().unwrap_or(0));
    }
    Ok(out)
}

/// Checks that `a @ b` is well formed and returns the product's metadata.
pub fn check_composable(
    operator: &str,
    a: &LinearOperator,
    b: &LinearOperator,
) -> Result<OperatorMeta, LinOpError> {
    let construction = |reason: String| LinOpError::Construction {
        operator: operator.to_string(),
        reason,
    };
    if a.ncols() != b.nrows() {
        return Err(construction(format!(
            "inner dimensions differ: {:?} @ {:?}",
            a.shape(),
            b.shape()
        )));
    }
    if a.dtype() != b.dtype() {
        return Err(construction(format!(
            "dtypes differ: {} @ {}",
            a.dtype(),
            b.dtype()
        )));
    }
    if a.device() != b.device() {
        return Err(construction(format!(
            "devices differ: {} @ {}",
            a.device(),
            b.device()
        )));
    }
    let mut shape = broadcast_shapes(a.batch_shape(), b.batch_shape()).map_err(|_| {
        construction(format!(
            "batch dimensions do not broadcast: {:?} @ {:?}",
            a.shape(),
            b.shape()
        ))
    })?;
    shape.push(a.nrows());
    shape.push(b.ncols());
    Ok(OperatorMeta::new(shape, a.dtype(), a.device()))
}
