use crate::device::StorageDevice;
use crate::error::TensorError;
use crate::tensor::Tensor;
use crate::types::DType;

#[test]
fn test_tensor_accessors() {
    let t = Tensor::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]).unwrap();
    assert_eq!(t.shape(), vec![2, 3]);
    assert_eq!(t.rank(), 2);
    assert_eq!(t.numel(), 6);
    assert_eq!(t.dtype(), DType::F32);
    assert_eq!(t.device(), StorageDevice::CPU);
    assert!(!t.requires_grad());
}

#[test]
fn test_tensor_equality_and_identity() {
    let t1 = Tensor::new(vec![1.0, 2.0], vec![2]).unwrap();
    let t2 = Tensor::new(vec![1.0, 2.0], vec![2]).unwrap();
    let t3 = Tensor::new(vec![1.0, 2.0], vec![1, 2]).unwrap();
    assert_eq!(t1, t2, "Tensors with same data and shape should be equal");
    assert_ne!(t1, t3, "Tensors with different shape should not be equal");
    assert!(!t1.ptr_eq(&t2));
    assert!(t1.ptr_eq(&t1.clone()));
}

#[test]
fn test_requires_grad_shared_through_clones() {
    let t = Tensor::new_f64(vec![1.0], vec![1]).unwrap();
    let alias = t.clone();
    alias.set_requires_grad(true);
    assert!(t.requires_grad());
}

#[test]
fn test_typed_data_access() {
    let t = Tensor::new_f64(vec![0.5, 1.5], vec![2]).unwrap();
    assert_eq!(t.get_f64_data().unwrap(), vec![0.5, 1.5]);
    assert!(matches!(
        t.get_f32_data(),
        Err(TensorError::DataTypeMismatch { .. })
    ));
    let t32 = Tensor::new(vec![0.5, 1.5], vec![2]).unwrap();
    assert_eq!(t32.to_f64_vec().unwrap(), vec![0.5, 1.5]);
}

#[test]
fn test_to_device_placeholder() {
    let t = Tensor::new(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]).unwrap();
    let gpu = t.to_device(StorageDevice::GPU).unwrap();
    assert_eq!(gpu.device(), StorageDevice::GPU);
    assert_eq!(gpu.shape(), vec![2, 2]);
    assert_eq!(gpu.dtype(), DType::F32);
    assert!(matches!(
        gpu.get_f32_data(),
        Err(TensorError::DeviceMismatch { .. })
    ));
    // No transfer back to the CPU.
    assert!(gpu.to_device(StorageDevice::CPU).is_err());
    // Same-device moves are free.
    assert!(t.to_device(StorageDevice::CPU).unwrap().ptr_eq(&t));
}
