//! Integration tests for device selection and memory queries

mod common;

use devrand::error::Error;
use devrand::runtime::cpu::CpuRuntime;
use devrand::runtime::{self, Device, DeviceContext, Runtime};

#[test]
fn test_cpu_has_single_device() {
    let ctx = DeviceContext::<CpuRuntime>::new().unwrap();
    assert_eq!(ctx.count_devices().unwrap(), 1);
    assert_eq!(runtime::count_devices::<CpuRuntime>().unwrap(), 1);
    assert_eq!(ctx.current_index(), runtime::DEFAULT_DEVICE_INDEX);
}

#[test]
fn test_set_device_out_of_range_keeps_selection() {
    common::init_tracing();
    let ctx = DeviceContext::<CpuRuntime>::new().unwrap();

    let err = ctx.set_device(1).unwrap_err();
    assert!(matches!(err, Error::InvalidDevice { index: 1, count: 1 }));
    assert_eq!(ctx.current_index(), 0);

    ctx.set_device(0).unwrap();
    assert_eq!(ctx.current_device().id(), 0);
}

#[test]
fn test_with_device_validates_index() {
    assert!(DeviceContext::<CpuRuntime>::with_device(0).is_ok());
    assert!(matches!(
        DeviceContext::<CpuRuntime>::with_device(3),
        Err(Error::InvalidDevice { index: 3, .. })
    ));
}

#[cfg(target_os = "linux")]
#[test]
fn test_memory_queries() {
    let ctx = DeviceContext::<CpuRuntime>::new().unwrap();

    let info = ctx.memory_info(0).unwrap();
    assert!(info.total > 0);
    assert!(info.free <= info.total);

    let free = ctx.free_memory(0).unwrap();
    let max = ctx.max_memory(0).unwrap();
    assert!(max > 0);
    assert!(free <= max);
}

#[test]
fn test_memory_query_invalid_index() {
    let ctx = DeviceContext::<CpuRuntime>::new().unwrap();
    assert!(matches!(
        ctx.memory_info(5),
        Err(Error::InvalidDevice { index: 5, .. })
    ));
    assert!(matches!(
        runtime::free_memory::<CpuRuntime>(5),
        Err(Error::InvalidDevice { .. })
    ));
    assert!(matches!(
        runtime::max_memory::<CpuRuntime>(5),
        Err(Error::InvalidDevice { .. })
    ));
}

#[test]
fn test_client_targets_current_device() {
    use devrand::runtime::RuntimeClient;

    let ctx = DeviceContext::<CpuRuntime>::new().unwrap();
    let client = ctx.client();
    assert!(client.device().is_same(&CpuRuntime::default_device()));
}

#[cfg(feature = "cuda")]
#[test]
fn test_cuda_device_context() {
    use devrand::runtime::cuda::CudaRuntime;

    if common::create_cuda_client().is_none() {
        return;
    }
    let ctx = DeviceContext::<CudaRuntime>::new().unwrap();
    let count = ctx.count_devices().unwrap();
    assert!(count >= 1);
    assert!(matches!(
        ctx.set_device(count),
        Err(Error::InvalidDevice { .. })
    ));
    assert_eq!(ctx.current_index(), 0);

    let info = ctx.memory_info(0).unwrap();
    assert!(info.free <= info.total);
}
