use linoprust_core::Tensor;

// Shared helpers for the integration tests of this crate.
#[allow(dead_code)]
pub(crate) fn create_test_tensor(data: Vec<f64>, shape: Vec<usize>) -> Tensor {
    Tensor::new_f64(data, shape).expect("Test tensor creation failed")
}

#[allow(dead_code)]
pub(crate) fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
