use std::env;
use std::path::PathBuf;

#[cfg(feature = "generate-bindings")]
fn generate_bindings(target: &str, sysroot: &std::path::Path, bindings_path: &std::path::Path) {
    let header_path = sysroot.join("stdio.h");
    println!("cargo:rerun-if-changed={}", header_path.display());

    let mut builder = bindgen::Builder::default()
        .header(header_path.display().to_string())
        // Only the stub headers may be visible, never the host's libc.
        .clang_arg("-nostdinc")
        .clang_arg(format!("-I{}", sysroot.display()))
        .use_core()
        .ctypes_prefix("::core::ffi")
        .allowlist_var("stderr")
        .allowlist_function("fprintf")
        // FILE is written by hand so that it stays opaque.
        .blocklist_type("FILE")
        .parse_callbacks(Box::new(bindgen::CargoCallbacks::new()));

    if target.contains("wasm") {
        builder = builder.clang_arg(format!("--target={}", target));
    }

    builder
        .generate()
        .expect("Unable to generate bindings")
        .write_to_file(bindings_path)
        .expect("Couldn't write bindings!");
}

// Only called on wasm targets, where the C definitions are the sole provider of
// `fprintf` and `stderr`.
#[cfg(feature = "stdio-impl")]
fn compile_stdio(target: &str, sysroot: &std::path::Path) {
    let source = sysroot.join("src").join("stdio.c");
    println!("cargo:rerun-if-changed={}", source.display());

    cc::Build::new()
        .include(sysroot)
        .file(source)
        .opt_level_str("z")
        .warnings(false)
        .target(target)
        .host(target)
        .compile("wasm_sysroot");
}

fn main() {
    let sysroot = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("wasm-sysroot");
    let target = env::var("TARGET").unwrap_or_default();
    let target_family = env::var("CARGO_CFG_TARGET_FAMILY").unwrap_or_default();

    // Dependents read these as DEP_WASM_SYSROOT_PATH and DEP_WASM_SYSROOT_INCLUDE.
    println!("cargo:PATH={}", sysroot.display());
    println!("cargo:INCLUDE={}", sysroot.display());
    println!("cargo:rerun-if-changed={}", sysroot.display());
    println!("cargo:rerun-if-changed=build.rs");

    let is_wasm = target_family.split(',').any(|family| family == "wasm") || target.contains("wasm");

    #[cfg(feature = "stdio-impl")]
    if is_wasm {
        compile_stdio(&target, &sysroot);
    }

    #[cfg(not(feature = "stdio-impl"))]
    if is_wasm {
        println!("cargo:warning=stdio-impl is disabled; fprintf and stderr are left unresolved");
    }

    #[cfg(feature = "generate-bindings")]
    generate_bindings(
        &target,
        &sysroot,
        &PathBuf::from(env::var("OUT_DIR").unwrap()).join("stdio.rs"),
    );
}
