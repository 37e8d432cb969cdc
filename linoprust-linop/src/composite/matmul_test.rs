use crate::error::LinOpError;
use crate::operator::LinearOperator;
use crate::primitive::{Capabilities, Primitive};
use crate::test_utils::{assert_close, LinOp1, LinOp2};
use linoprust_core::tensor;
use linoprust_core::StorageDevice;

#[test]
fn test_product_of_dense_operators() {
    let a_mat = tensor::rand_f64(&[2, 3]).unwrap();
    let b_mat = tensor::rand_f64(&[3, 4]).unwrap();
    let a = LinearOperator::m(&a_mat, false).unwrap();
    let b = LinearOperator::m(&b_mat, false).unwrap();
    let ab = a.matmul(&b).unwrap();
    assert_eq!(ab.name(), "MatmulLinearOperator");
    assert_eq!(ab.shape(), &[2, 4]);
    assert!(!ab.is_hermitian());
    assert_eq!(ab.implemented_primitives(), Capabilities::ALL);

    let dense = a_mat.matmul(&b_mat).unwrap();
    let x = tensor::rand_f64(&[4]).unwrap();
    assert_close(&ab.mv(&x).unwrap(), &dense.matmul(&x).unwrap());
    let y = tensor::rand_f64(&[2]).unwrap();
    let dense_t = dense.transpose(-2, -1).unwrap();
    assert_close(&ab.rmv(&y).unwrap(), &dense_t.matmul(&y).unwrap());
    assert_close(&ab.fullmatrix().unwrap(), &dense);
}

#[test]
fn test_product_broadcasts_batches() {
    let a_mat = tensor::rand_f64(&[5, 1, 2, 3]).unwrap();
    let b_mat = tensor::rand_f64(&[4, 3, 2]).unwrap();
    let a = LinOp2::build(&a_mat).unwrap();
    let b = LinOp2::build(&b_mat).unwrap();
    let ab = a.matmul(&b).unwrap();
    assert_eq!(ab.shape(), &[5, 4, 2, 2]);
    assert_eq!(ab.batch_shape(), &[5, 4]);

    let xm = tensor::rand_f64(&[2, 3]).unwrap();
    let dense = a_mat.matmul(&b_mat).unwrap();
    assert_close(&ab.mm(&xm).unwrap(), &dense.matmul(&xm).unwrap());
    let dense_t = dense.transpose(-2, -1).unwrap();
    assert_close(&ab.rmm(&xm).unwrap(), &dense_t.matmul(&xm).unwrap());
}

#[test]
fn test_construction_errors() {
    let a = LinOp1::build(&tensor::rand(&[2, 3]).unwrap()).unwrap();
    let wrong_inner = LinOp1::build(&tensor::rand(&[2, 3]).unwrap()).unwrap();
    match a.matmul(&wrong_inner).unwrap_err() {
        LinOpError::Construction { operator, reason } => {
            assert_eq!(operator, "MatmulLinearOperator");
            assert!(reason.contains("inner dimensions"));
        }
        other => panic!("unexpected error {:?}", other),
    }

    let f64_op = LinOp1::build(&tensor::rand_f64(&[3, 2]).unwrap()).unwrap();
    assert!(matches!(
        a.matmul(&f64_op),
        Err(LinOpError::Construction { .. })
    ));

    let gpu_mat = tensor::rand(&[3, 2]).unwrap().to_device(StorageDevice::GPU).unwrap();
    let gpu_op = LinOp1::build(&gpu_mat).unwrap();
    assert!(matches!(
        a.matmul(&gpu_op),
        Err(LinOpError::Construction { .. })
    ));

    let batched_a = LinOp1::build(&tensor::rand(&[3, 2, 3]).unwrap()).unwrap();
    let batched_b = LinOp1::build(&tensor::rand(&[4, 3, 2]).unwrap()).unwrap();
    assert!(matches!(
        batched_a.matmul(&batched_b),
        Err(LinOpError::Construction { .. })
    ));
}

#[test]
fn test_adjoint_is_lazy_on_forward_only_constituents() {
    let a = LinOp1::build(&tensor::rand(&[2, 3]).unwrap()).unwrap();
    let b = LinOp2::build(&tensor::rand(&[3, 2]).unwrap()).unwrap();
    let ab = a.matmul(&b).unwrap();
    assert_eq!(
        ab.implemented_primitives(),
        Capabilities::from_primitives(&[Primitive::Mv, Primitive::Mm])
    );
    assert!(ab.mv(&tensor::rand(&[2]).unwrap()).is_ok());

    match ab.rmv(&tensor::rand(&[2]).unwrap()).unwrap_err() {
        LinOpError::Capability { operator, primitive, hint } => {
            assert_eq!(operator, "MatmulLinearOperator");
            assert_eq!(primitive, Primitive::Rmv);
            assert!(hint.contains("LinOp1"));
        }
        other => panic!("unexpected error {:?}", other),
    }
    assert!(matches!(
        ab.h().mv(&tensor::rand(&[2]).unwrap()),
        Err(LinOpError::Capability { .. })
    ));
}

#[test]
fn test_forward_failure_surfaces_at_call_time() {
    // A.H has no forward action when A only implements mv.
    let a = LinOp1::build(&tensor::rand(&[2, 3, 2]).unwrap()).unwrap();
    let product = a.h().matmul(&a).unwrap();
    assert_eq!(product.shape(), &[2, 2, 2]);
    match product.mv(&tensor::rand(&[2]).unwrap()).unwrap_err() {
        LinOpError::Capability { operator, primitive, .. } => {
            assert_eq!(operator, "AdjointLinearOperator");
            assert_eq!(primitive, Primitive::Mv);
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn test_nested_products() {
    let m1 = tensor::rand_f64(&[2, 3]).unwrap();
    let m2 = tensor::rand_f64(&[3, 3]).unwrap();
    let m3 = tensor::rand_f64(&[3, 2]).unwrap();
    let a = LinearOperator::m(&m1, false).unwrap();
    let b = LinearOperator::m(&m2, false).unwrap();
    let c = LinearOperator::m(&m3, false).unwrap();
    let abc = a.matmul(&b).unwrap().matmul(&c).unwrap();
    let dense = m1.matmul(&m2).unwrap().matmul(&m3).unwrap();
    assert_close(&abc.fullmatrix().unwrap(), &dense);
    assert_eq!(
        abc.param_names("").unwrap(),
        vec!["A.A.mat", "A.B.mat", "B.mat"]
    );
}
