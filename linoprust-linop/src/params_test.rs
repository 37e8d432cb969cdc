use crate::error::LinOpError;
use crate::operator::LinearOperator;
use crate::test_utils::{LinOp1, Opaque};
use linoprust_core::tensor;

#[test]
fn test_leaf_param_names() {
    let op = LinOp1::build(&tensor::rand(&[2, 3]).unwrap()).unwrap();
    assert_eq!(op.param_names("").unwrap(), vec!["mat"]);
    assert_eq!(op.param_names("linop.").unwrap(), vec!["linop.mat"]);
}

#[test]
fn test_matmul_param_names_are_prefixed() {
    let a = LinearOperator::m(&tensor::rand(&[2, 3]).unwrap(), false).unwrap();
    let b = LinearOperator::m(&tensor::rand(&[3, 4]).unwrap(), false).unwrap();
    let ab = a.matmul(&b).unwrap();
    assert_eq!(ab.param_names("").unwrap(), vec!["A.mat", "B.mat"]);
    assert_eq!(ab.param_names("op.").unwrap(), vec!["op.A.mat", "op.B.mat"]);
}

#[test]
fn test_named_params_share_tensors() {
    let mat = tensor::rand(&[2, 3]).unwrap();
    let op = LinearOperator::m(&mat, false).unwrap();
    let params = op.named_params("").unwrap();
    assert_eq!(params.len(), 1);
    assert!(params[0].1.ptr_eq(&mat));
}

#[test]
fn test_unique_params_dedup_by_identity() {
    let mat = tensor::rand(&[2, 3]).unwrap();
    let a = LinearOperator::m(&mat, false).unwrap();
    let gram = a.h().matmul(&a).unwrap();
    assert_eq!(gram.param_names("").unwrap(), vec!["A.mat", "B.mat"]);

    let unique = gram.unique_params("").unwrap();
    assert_eq!(unique.len(), 1);
    assert_eq!(unique[0].0, "A.mat");

    // Equal values, different tensors: both kept.
    let copy = tensor::from_vec_f32(mat.get_f32_data().unwrap(), mat.shape()).unwrap();
    let b = LinearOperator::m(&copy, false).unwrap();
    let ab = a.h().matmul(&b).unwrap();
    assert_eq!(ab.unique_params("").unwrap().len(), 2);
}

#[test]
fn test_differentiable_params_filter_requires_grad() {
    let frozen = tensor::rand(&[2, 3]).unwrap();
    let trained = tensor::rand(&[3, 3]).unwrap();
    trained.set_requires_grad(true);
    let a = LinearOperator::m(&frozen, false).unwrap();
    let b = LinearOperator::m(&trained, false).unwrap();
    let ab = a.matmul(&b).unwrap();

    let params = ab.differentiable_params("").unwrap();
    assert_eq!(params.len(), 1);
    assert_eq!(params[0].0, "B.mat");
    assert!(params[0].1.ptr_eq(&trained));
}

#[test]
fn test_missing_declaration_fails_loudly() {
    let op = Opaque::build(&tensor::rand(&[2, 3]).unwrap()).unwrap();
    match op.param_names("").unwrap_err() {
        LinOpError::ParamIntrospection { operator, .. } => assert_eq!(operator, "Opaque"),
        other => panic!("unexpected error {:?}", other),
    }

    // Construction and evaluation are unaffected; composites propagate the failure.
    assert!(op.mv(&tensor::rand(&[3]).unwrap()).is_ok());
    let dense = LinearOperator::m(&tensor::rand(&[3, 2]).unwrap(), false).unwrap();
    assert!(matches!(
        dense.matmul(&op).unwrap().param_names(""),
        Err(LinOpError::ParamIntrospection { .. })
    ));
}
