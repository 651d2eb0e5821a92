//! The stub `stdio.h` surface, as seen from Rust.
//!
//! Most operations are substituted: [`snprintf!`](crate::snprintf),
//! [`vsnprintf!`](crate::vsnprintf), [`fputs!`](crate::fputs),
//! [`fputc!`](crate::fputc) and [`fclose!`](crate::fclose) expand to `0`, and
//! [`fdopen!`](crate::fdopen) expands to [`NULL`]. Their arguments are parsed
//! and thrown away; nothing is evaluated and no I/O happens.
//!
//! ```
//! use wasm_sysroot::{fdopen, fputc, stdio};
//!
//! let mut written = 0;
//! assert_eq!(fputc!({ written += 1; b'x' }, stdio::NULL), 0);
//! assert_eq!(written, 0);
//! assert!(fdopen!(2, b"w\0".as_ptr()).is_null());
//! ```
//!
//! [`fprintf`] is the one real declaration. It must be defined somewhere in the
//! final link: on wasm targets the `stdio-impl` feature compiles an inert
//! definition, and without it any call is an unresolved symbol at link time.
//! [`stderr`] is resolved the same way.
//!
//! [`FILE`] exposes nothing. It can neither be built nor looked into:
//!
//! ```compile_fail
//! let stream = wasm_sysroot::stdio::FILE { _unused: [] };
//! ```
//!
//! ```compile_fail
//! fn peek(stream: &wasm_sysroot::stdio::FILE) -> usize {
//!     stream._unused.len()
//! }
//! ```
//!
//! The macros take exactly the C arities, so a trailing comma is an extra,
//! empty argument and is rejected like it would be in C:
//!
//! ```compile_fail
//! let r = wasm_sysroot::fputc!(1, 2,);
//! ```

pub use core::ffi::{c_char, c_int};
pub use wasm_sysroot_sys::stdio::{fprintf, size_t, stderr, FILE};

/// The "no stream" sentinel, `((void*)0)` in C.
pub const NULL: *mut FILE = core::ptr::null_mut();

/// Formatted write into a buffer. Always `0`.
#[macro_export]
macro_rules! snprintf {
    ($str:expr, $size:expr, $format:expr $(, $arg:expr)*) => {
        0 as ::core::ffi::c_int
    };
}

/// Formatted write into a buffer from a `va_list`. Always `0`.
#[macro_export]
macro_rules! vsnprintf {
    ($str:expr, $size:expr, $format:expr, $ap:expr) => {
        0 as ::core::ffi::c_int
    };
}

/// Always `0`.
#[macro_export]
macro_rules! fputs {
    ($s:expr, $stream:expr) => {
        0 as ::core::ffi::c_int
    };
}

/// Always `0`.
#[macro_export]
macro_rules! fputc {
    ($c:expr, $stream:expr) => {
        0 as ::core::ffi::c_int
    };
}

/// Never opens anything; always [`NULL`](crate::stdio::NULL).
#[macro_export]
macro_rules! fdopen {
    ($fd:expr, $mode:expr) => {
        $crate::stdio::NULL
    };
}

/// Always `0`.
#[macro_export]
macro_rules! fclose {
    ($stream:expr) => {
        0 as ::core::ffi::c_int
    };
}
