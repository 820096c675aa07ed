//! Build script for devrand
//!
//! With the `cuda` feature, compiles `src/runtime/cuda/kernels/random.cu` to
//! `$OUT_DIR/random.ptx` and exports the directory as `CUDA_KERNEL_DIR`.
//! nvcc is looked up in `$CUDA_PATH/bin`, the usual install prefixes, then
//! `PATH`.

fn main() {
    #[cfg(feature = "cuda")]
    cuda::compile_random_kernels();
}

#[cfg(feature = "cuda")]
mod cuda {
    use std::env;
    use std::path::{Path, PathBuf};
    use std::process::Command;

    const KERNEL_SOURCE: &str = "src/runtime/cuda/kernels/random.cu";

    /// Oldest architecture the Philox kernels target (Turing)
    const ARCH: &str = "sm_75";

    const INSTALL_PREFIXES: [&str; 3] = ["/usr/local/cuda", "/opt/cuda", "/usr"];

    /// Abort the build with a single formatted report
    fn fail(what: &str, detail: &str) -> ! {
        panic!(
            "devrand `cuda` feature: {what}\n{detail}\n\
             Install the CUDA Toolkit and put nvcc on PATH, or set CUDA_PATH."
        );
    }

    pub fn compile_random_kernels() {
        println!("cargo:rerun-if-changed={KERNEL_SOURCE}");
        println!("cargo:rerun-if-env-changed=CUDA_PATH");

        let out_dir = match env::var("OUT_DIR") {
            Ok(dir) => PathBuf::from(dir),
            Err(e) => fail("OUT_DIR is not set", &e.to_string()),
        };
        let source = Path::new(KERNEL_SOURCE);
        if !source.exists() {
            fail("kernel source missing", &source.display().to_string());
        }

        let nvcc = find_nvcc().unwrap_or_else(|| fail("nvcc not found", ""));
        let ptx = out_dir.join("random.ptx");

        let output = Command::new(&nvcc)
            .arg("-ptx")
            .arg("-O3")
            .arg(format!("-arch={ARCH}"))
            .arg("-o")
            .arg(&ptx)
            .arg(source)
            .output()
            .unwrap_or_else(|e| fail("could not run nvcc", &format!("{}: {e}", nvcc.display())));

        if !output.status.success() {
            fail(
                "nvcc rejected random.cu",
                &format!(
                    "{}{}",
                    String::from_utf8_lossy(&output.stdout),
                    String::from_utf8_lossy(&output.stderr)
                ),
            );
        }

        println!("cargo:rustc-env=CUDA_KERNEL_DIR={}", out_dir.display());
    }

    fn find_nvcc() -> Option<PathBuf> {
        let exe = if cfg!(windows) { "nvcc.exe" } else { "nvcc" };

        let from_env = env::var_os("CUDA_PATH").map(|root| PathBuf::from(root).join("bin").join(exe));
        let candidates = from_env
            .into_iter()
            .chain(INSTALL_PREFIXES.iter().map(|p| Path::new(p).join("bin").join(exe)));
        for candidate in candidates {
            if candidate.is_file() {
                return Some(candidate);
            }
        }

        Command::new(exe)
            .arg("--version")
            .output()
            .ok()
            .filter(|out| out.status.success())
            .map(|_| PathBuf::from(exe))
    }
}
