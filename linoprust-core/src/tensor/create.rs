// src/tensor/create.rs

use crate::buffer::CpuBuffer;
use crate::error::TensorError;
use crate::tensor::Tensor;
use crate::types::DType;
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

/// Creates a new CPU F32 Tensor from a Vec<f32> and shape.
pub fn from_vec_f32(data_vec: Vec<f32>, shape: Vec<usize>) -> Result<Tensor, TensorError> {
    Tensor::new(data_vec, shape)
}

/// Creates a new CPU F64 Tensor from a Vec<f64> and shape.
pub fn from_vec_f64(data_vec: Vec<f64>, shape: Vec<usize>) -> Result<Tensor, TensorError> {
    Tensor::new_f64(data_vec, shape)
}

/// Creates a new tensor filled with zeros with the specified shape and dtype on the CPU.
pub fn zeros(shape: &[usize], dtype: DType) -> Result<Tensor, TensorError> {
    let numel = shape.iter().product();
    let buffer = match dtype {
        DType::F32 => CpuBuffer::from(vec![0.0f32; numel]),
        DType::F64 => CpuBuffer::from(vec![0.0f64; numel]),
    };
    Tensor::from_cpu_buffer(buffer, shape.to_vec(), false)
}

/// Creates an `n x n` identity matrix with the given dtype on the CPU.
pub fn eye(n: usize, dtype: DType) -> Result<Tensor, TensorError> {
    let buffer = match dtype {
        DType::F32 => {
            let mut data_vec = vec![0.0f32; n * n];
            for i in 0..n {
                data_vec[i * n + i] = 1.0;
            }
            CpuBuffer::from(data_vec)
        }
        DType::F64 => {
            let mut data_vec = vec![0.0f64; n * n];
            for i in 0..n {
                data_vec[i * n + i] = 1.0;
            }
            CpuBuffer::from(data_vec)
        }
    };
    Tensor::from_cpu_buffer(buffer, vec![n, n], false)
}

// Note: rand and randn draw from the thread-local RNG; device-specific RNGs
// would come with a real GPU backend.

/// Uniform samples in `[0, 1)`, F32.
pub fn rand(shape: &[usize]) -> Result<Tensor, TensorError> {
    let numel = shape.iter().product();
    let mut rng = rand::thread_rng();
    let data_vec: Vec<f32> = (0..numel).map(|_| rng.gen::<f32>()).collect();
    Tensor::new(data_vec, shape.to_vec())
}

/// Uniform samples in `[0, 1)`, F64.
pub fn rand_f64(shape: &[usize]) -> Result<Tensor, TensorError> {
    let numel = shape.iter().product();
    let mut rng = rand::thread_rng();
    let data_vec: Vec<f64> = (0..numel).map(|_| rng.gen::<f64>()).collect();
    Tensor::new_f64(data_vec, shape.to_vec())
}

/// Standard normal samples, F32.
pub fn randn(shape: &[usize]) -> Result<Tensor, TensorError> {
    let numel = shape.iter().product();
    let mut rng = rand::thread_rng();
    let data_vec: Vec<f32> = (0..numel)
        .map(|_| StandardNormal.sample(&mut rng))
        .collect();
    Tensor::new(data_vec, shape.to_vec())
}

/// Standard normal samples, F64.
pub fn randn_f64(shape: &[usize]) -> Result<Tensor, TensorError> {
    let numel = shape.iter().product();
    let mut rng = rand::thread_rng();
    let data_vec: Vec<f64> = (0..numel)
        .map(|_| StandardNormal.sample(&mut rng))
        .collect();
    Tensor::new_f64(data_vec, shape.to_vec())
}
