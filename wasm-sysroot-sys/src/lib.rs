#![no_std]
//! Raw bindings to the stub `stdio.h` shipped in `wasm-sysroot/`, and the
//! location of that directory.
//!
//! Build scripts of dependent crates receive the directory as
//! `DEP_WASM_SYSROOT_PATH`; use it as the first include directory of the C
//! compiler so the stub headers shadow any system ones.

/// Absolute path of the bundled sysroot directory.
pub const SYSROOT_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/wasm-sysroot");

/// Contents of the bundled `stdio.h`.
pub const STDIO_H: &str = include_str!("../wasm-sysroot/stdio.h");

/// Contents of the C file that defines `stderr` and `fprintf` when the
/// `stdio-impl` feature is enabled.
pub const STDIO_C: &str = include_str!("../wasm-sysroot/src/stdio.c");

#[allow(non_camel_case_types, non_upper_case_globals)]
pub mod stdio {
    /// Opaque stream handle. Only ever used behind a pointer.
    #[repr(C)]
    pub struct FILE {
        _unused: [u8; 0],
    }

    pub type size_t = usize;

    #[cfg(feature = "generate-bindings")]
    include!(concat!(env!("OUT_DIR"), "/stdio.rs"));

    #[cfg(not(feature = "generate-bindings"))]
    include!("bindings.rs");
}
