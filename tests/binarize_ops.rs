//! Integration tests for binarize and binarize_into

mod common;

use common::{create_cpu_client, seeded_manager};
use devrand::dtype::DType;
use devrand::error::Error;
use devrand::ops::RandomFillOps;
use devrand::runtime::cpu::CpuRuntime;
use devrand::tensor::{Matrix, MemoryOrder, Vector};

#[test]
fn test_binarize_certain_probabilities() {
    let (client, device) = create_cpu_client();
    let seeds = seeded_manager(1);

    let mut zeros = Vector::<CpuRuntime>::from_slice(&[0.0f64; 1000], &device).unwrap();
    client.binarize(&seeds, &mut zeros).unwrap();
    assert!(zeros.to_vec::<f64>().unwrap().iter().all(|&x| x == 0.0));

    let mut ones = Vector::<CpuRuntime>::from_slice(&[1.0f32; 1000], &device).unwrap();
    client.binarize(&seeds, &mut ones).unwrap();
    assert!(ones.to_vec::<f32>().unwrap().iter().all(|&x| x == 1.0));
}

#[test]
fn test_binarize_mean_matches_probability() {
    let (client, device) = create_cpu_client();
    let seeds = seeded_manager(2);

    let n = 100_000;
    let mut v = Vector::<CpuRuntime>::full(n, 0.3f64, &device).unwrap();
    client.binarize(&seeds, &mut v).unwrap();

    let data: Vec<f64> = v.to_vec().unwrap();
    assert!(data.iter().all(|&x| x == 0.0 || x == 1.0));
    let mean = data.iter().sum::<f64>() / n as f64;
    assert!((mean - 0.3).abs() <= 0.01, "mean={}", mean);
}

#[test]
fn test_binarize_clamps_out_of_range() {
    let (client, device) = create_cpu_client();
    let seeds = seeded_manager(3);

    let mut v = Vector::<CpuRuntime>::from_slice(
        &[-1.0f64, 2.0, f64::NAN, f64::NEG_INFINITY, f64::INFINITY],
        &device,
    )
    .unwrap();
    client.binarize(&seeds, &mut v).unwrap();
    assert_eq!(v.to_vec::<f64>().unwrap(), vec![0.0, 1.0, 0.0, 0.0, 1.0]);
}

#[test]
fn test_binarize_matrix_in_place() {
    let (client, device) = create_cpu_client();
    let seeds = seeded_manager(4);

    let probs: Vec<f32> = (0..6 * 4).map(|i| (i % 2) as f32).collect();
    let mut m =
        Matrix::<CpuRuntime>::from_slice(&probs, 6, 4, MemoryOrder::ColumnMajor, &device).unwrap();
    client.binarize(&seeds, &mut m).unwrap();
    assert_eq!(m.to_vec::<f32>().unwrap(), probs);
}

#[test]
fn test_binarize_integer_container_rejected() {
    let (client, device) = create_cpu_client();
    let seeds = seeded_manager(5);

    let mut v = Vector::<CpuRuntime>::from_slice(&[1u8, 0, 1], &device).unwrap();
    let err = client.binarize(&seeds, &mut v).unwrap_err();
    assert!(matches!(
        err,
        Error::UnsupportedDType {
            dtype: DType::U8,
            op: "binarize"
        }
    ));
    assert_eq!(v.to_vec::<u8>().unwrap(), vec![1, 0, 1]);
}

#[test]
fn test_binarize_into_integer_outputs() {
    let (client, device) = create_cpu_client();
    let seeds = seeded_manager(6);

    let probs_data = [0.0f64, 1.0, 1.0, 0.0, -3.0, 7.5];
    let probs = Vector::<CpuRuntime>::from_slice(&probs_data, &device).unwrap();
    let expected = [0, 1, 1, 0, 0, 1];

    let mut out_u8 = Vector::<CpuRuntime>::zeros(6, DType::U8, &device).unwrap();
    client.binarize_into(&seeds, &probs, &mut out_u8).unwrap();
    assert_eq!(
        out_u8.to_vec::<u8>().unwrap(),
        expected.iter().map(|&x| x as u8).collect::<Vec<_>>()
    );

    let mut out_i32 = Vector::<CpuRuntime>::zeros(6, DType::I32, &device).unwrap();
    client.binarize_into(&seeds, &probs, &mut out_i32).unwrap();
    assert_eq!(out_i32.to_vec::<i32>().unwrap(), expected.to_vec());

    // The source is read-only.
    assert_eq!(probs.to_vec::<f64>().unwrap(), probs_data.to_vec());
}

#[test]
fn test_binarize_into_float_output_mean() {
    let (client, device) = create_cpu_client();
    let seeds = seeded_manager(7);

    let n = 50_000;
    let probs = Vector::<CpuRuntime>::full(n, 0.75f32, &device).unwrap();
    let mut out = Vector::<CpuRuntime>::zeros(n, DType::F64, &device).unwrap();
    client.binarize_into(&seeds, &probs, &mut out).unwrap();

    let data: Vec<f64> = out.to_vec().unwrap();
    let mean = data.iter().sum::<f64>() / n as f64;
    assert!((mean - 0.75).abs() <= 0.01, "mean={}", mean);
}

#[test]
fn test_binarize_into_shape_mismatch() {
    let (client, device) = create_cpu_client();
    let seeds = seeded_manager(8);

    let probs = Vector::<CpuRuntime>::full(10, 0.5f64, &device).unwrap();
    let mut out = Vector::<CpuRuntime>::zeros(9, DType::I32, &device).unwrap();
    let err = client.binarize_into(&seeds, &probs, &mut out).unwrap_err();
    assert!(matches!(err, Error::ShapeMismatch { .. }), "got {}", err);

    let probs =
        Matrix::<CpuRuntime>::zeros(3, 4, DType::F64, MemoryOrder::RowMajor, &device).unwrap();
    let mut out =
        Matrix::<CpuRuntime>::zeros(4, 3, DType::I32, MemoryOrder::RowMajor, &device).unwrap();
    let err = client.binarize_into(&seeds, &probs, &mut out).unwrap_err();
    assert!(matches!(err, Error::ShapeMismatch { .. }), "got {}", err);
}

#[test]
fn test_binarize_into_order_mismatch() {
    let (client, device) = create_cpu_client();
    let seeds = seeded_manager(9);

    let probs =
        Matrix::<CpuRuntime>::zeros(3, 4, DType::F64, MemoryOrder::RowMajor, &device).unwrap();
    let mut out =
        Matrix::<CpuRuntime>::zeros(3, 4, DType::F64, MemoryOrder::ColumnMajor, &device).unwrap();
    let err = client.binarize_into(&seeds, &probs, &mut out).unwrap_err();
    assert!(matches!(err, Error::ShapeMismatch { .. }), "got {}", err);
}

#[test]
fn test_binarize_into_integer_probabilities_rejected() {
    let (client, device) = create_cpu_client();
    let seeds = seeded_manager(10);

    let probs = Vector::<CpuRuntime>::from_slice(&[1i32, 0, 1], &device).unwrap();
    let mut out = Vector::<CpuRuntime>::from_slice(&[9i32, 9, 9], &device).unwrap();
    let err = client.binarize_into(&seeds, &probs, &mut out).unwrap_err();
    assert!(matches!(
        err,
        Error::UnsupportedDType {
            dtype: DType::I32,
            op: "binarize_into"
        }
    ));
    assert_eq!(out.to_vec::<i32>().unwrap(), vec![9, 9, 9]);
}
